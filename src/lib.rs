//! # User Service
//!
//! HTTP service for managing users and their role assignments.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Users, roles, field rules and repository traits
//! - **application**: `UserService` validation and orchestration
//! - **infrastructure**: SeaORM (SQLite) and in-memory repositories
//! - **interfaces**: REST API with Swagger documentation
//! - **support**: Error types and graceful shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod support;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::database::repositories::SeaOrmRepositoryProvider;
pub use infrastructure::{init_database, DatabaseConfig, InMemoryRepositoryProvider};

// Re-export API router
pub use interfaces::http::create_api_router;
