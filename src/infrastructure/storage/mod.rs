//! In-memory storage implementations

mod memory;

pub use memory::{InMemoryRepositoryProvider, InMemoryRoleRepository, InMemoryUserRepository};
