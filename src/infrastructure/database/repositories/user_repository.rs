use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use super::db_err;
use crate::domain::{DomainError, DomainResult, Role, User, UserRecord, UserRepository};
use crate::infrastructure::database::entities::{role, user, user_role};

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn user_model_to_domain(model: user::Model, roles: Vec<Role>) -> User {
    User {
        id: model.id,
        name: model.name,
        login: model.login,
        password: model.password,
        roles,
    }
}

/// Load the roles of `users` and assemble domain values, keeping the order
/// of `users`. Links to roles that no longer exist are skipped.
async fn with_roles<C: ConnectionTrait>(db: &C, users: Vec<user::Model>) -> DomainResult<Vec<User>> {
    if users.is_empty() {
        return Ok(Vec::new());
    }

    let user_ids: Vec<i64> = users.iter().map(|u| u.id).collect();
    let links = user_role::Entity::find()
        .filter(user_role::Column::UserId.is_in(user_ids))
        .all(db)
        .await
        .map_err(db_err)?;

    let role_ids: Vec<i64> = links.iter().map(|l| l.role_id).collect();
    let roles: HashMap<i64, Role> = role::Entity::find()
        .filter(role::Column::Id.is_in(role_ids))
        .all(db)
        .await
        .map_err(db_err)?
        .into_iter()
        .map(|r| (r.id, Role::new(r.id, r.name)))
        .collect();

    let mut by_user: HashMap<i64, Vec<Role>> = HashMap::new();
    for link in links {
        if let Some(role) = roles.get(&link.role_id) {
            by_user.entry(link.user_id).or_default().push(role.clone());
        }
    }

    Ok(users
        .into_iter()
        .map(|model| {
            let mut roles = by_user.remove(&model.id).unwrap_or_default();
            roles.sort_by_key(|r| r.id);
            user_model_to_domain(model, roles)
        })
        .collect())
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_one(&self, id: i64) -> DomainResult<Option<User>> {
        let Some(model) = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };

        Ok(with_roles(&self.db, vec![model]).await?.pop())
    }

    async fn save(&self, record: UserRecord) -> DomainResult<User> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let existing = match record.id {
            Some(id) => user::Entity::find_by_id(id).one(&txn).await.map_err(db_err)?,
            None => None,
        };

        let saved = match existing {
            Some(model) => {
                let mut active: user::ActiveModel = model.into();
                active.name = Set(record.name);
                active.login = Set(record.login);
                active.password = Set(record.password);
                active.update(&txn).await.map_err(db_err)?
            }
            None => {
                let new_user = user::ActiveModel {
                    id: record.id.map_or(NotSet, Set),
                    name: Set(record.name),
                    login: Set(record.login),
                    password: Set(record.password),
                };
                new_user.insert(&txn).await.map_err(db_err)?
            }
        };

        user_role::Entity::delete_many()
            .filter(user_role::Column::UserId.eq(saved.id))
            .exec(&txn)
            .await
            .map_err(db_err)?;

        if !record.role_ids.is_empty() {
            let links = record.role_ids.iter().map(|&role_id| user_role::ActiveModel {
                user_id: Set(saved.id),
                role_id: Set(role_id),
            });
            user_role::Entity::insert_many(links)
                .exec_without_returning(&txn)
                .await
                .map_err(db_err)?;
        }

        let user = with_roles(&txn, vec![saved]).await?.pop().ok_or_else(|| {
            DomainError::Storage("User saved but could not be retrieved".into())
        })?;

        txn.commit().await.map_err(db_err)?;
        Ok(user)
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        let txn = self.db.begin().await.map_err(db_err)?;

        user_role::Entity::delete_many()
            .filter(user_role::Column::UserId.eq(id))
            .exec(&txn)
            .await
            .map_err(db_err)?;

        let result = user::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound {
                entity: "User",
                field: "id",
                value: id.to_string(),
            });
        }

        txn.commit().await.map_err(db_err)?;
        Ok(())
    }

    async fn find_all(&self) -> DomainResult<Vec<User>> {
        let models = user::Entity::find()
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        with_roles(&self.db, models).await
    }
}

// ── Tests ──────────────────────────────────────────────────────
