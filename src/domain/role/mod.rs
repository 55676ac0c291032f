//! Role aggregate
//!
//! Roles are owned by the Role Store. Users only reference them by id.

pub mod model;
pub mod repository;

pub use model::{Role, RoleRef};
pub use repository::RoleRepository;
