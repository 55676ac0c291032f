use async_trait::async_trait;

use super::{User, UserRecord};
use crate::domain::DomainResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_one(&self, id: i64) -> DomainResult<Option<User>>;

    /// Insert the record, or overwrite every field of the record with the
    /// same id (roles included). Assigns an id when `record.id` is `None`.
    async fn save(&self, record: UserRecord) -> DomainResult<User>;

    /// Remove the record. Fails with `NotFound` when the id is unknown.
    async fn delete(&self, id: i64) -> DomainResult<()>;

    /// Every stored user in ascending id order.
    async fn find_all(&self) -> DomainResult<Vec<User>>;
}
