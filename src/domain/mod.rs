//! Domain layer: user and role aggregates, static field rules and the
//! repository ports the application layer depends on.

pub mod repositories;
pub mod role;
pub mod user;

pub use repositories::RepositoryProvider;
pub use role::{Role, RoleRef, RoleRepository};
pub use user::{User, UserPayload, UserRecord, UserRepository};

// Re-export errors from support for convenience
pub use crate::support::errors::{DomainError, DomainResult};
