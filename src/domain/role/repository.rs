use async_trait::async_trait;

use super::Role;
use crate::domain::DomainResult;

#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Whether a role with this id exists right now.
    async fn exists(&self, id: i64) -> DomainResult<bool>;

    /// Insert the role unless its id is already taken. Returns `true` when a
    /// row was written. Used for startup seeding only.
    async fn insert_if_absent(&self, role: Role) -> DomainResult<bool>;
}
