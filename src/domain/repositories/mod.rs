//! Repository provider for the domain layer

use super::role::RoleRepository;
use super::user::UserRepository;

/// Provides access to the User Store and the Role Store.
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let known = repos.roles().exists(1).await?;
///     let user = repos.users().find_one(42).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn users(&self) -> &dyn UserRepository;
    fn roles(&self) -> &dyn RoleRepository;
}
