use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, Set};

use super::db_err;
use crate::domain::{DomainResult, Role, RoleRepository};
use crate::infrastructure::database::entities::role;

pub struct SeaOrmRoleRepository {
    db: DatabaseConnection,
}

impl SeaOrmRoleRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RoleRepository for SeaOrmRoleRepository {
    async fn exists(&self, id: i64) -> DomainResult<bool> {
        let count = role::Entity::find_by_id(id)
            .count(&self.db)
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }

    async fn insert_if_absent(&self, role: Role) -> DomainResult<bool> {
        if self.exists(role.id).await? {
            return Ok(false);
        }

        role::ActiveModel {
            id: Set(role.id),
            name: Set(role.name),
        }
        .insert(&self.db)
        .await
        .map_err(db_err)?;

        Ok(true)
    }
}
