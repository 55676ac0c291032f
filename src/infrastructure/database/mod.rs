pub mod entities;
pub mod migrator;
pub mod repositories;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use tracing::{info, warn};

use crate::domain::{DomainResult, Role, RoleRepository};

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database URL (e.g., "sqlite://./users.db?mode=rwc")
    pub url: String,
    /// Upper bound on pooled connections.
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://./users.db?mode=rwc".to_string(),
            max_connections: 10,
        }
    }
}

impl DatabaseConfig {
    /// Create config for SQLite
    pub fn sqlite(path: &str) -> Self {
        Self {
            url: format!("sqlite://{}?mode=rwc", path),
            ..Self::default()
        }
    }

    /// Private in-memory SQLite database. Pinned to one connection, since
    /// every new connection would open a separate empty database.
    pub fn memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        }
    }
}

/// Initialize database connection
pub async fn init_database(config: &DatabaseConfig) -> Result<DatabaseConnection, sea_orm::DbErr> {
    info!("Connecting to database: {}", config.url);
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .sqlx_logging(false);
    let db = Database::connect(options).await?;
    info!("Database connected successfully");
    Ok(db)
}

/// Round-trip a trivial query to check the connection is usable.
pub async fn ping(db: &DatabaseConnection) -> Result<(), sea_orm::DbErr> {
    db.execute(Statement::from_string(
        db.get_database_backend(),
        "SELECT 1".to_string(),
    ))
    .await
    .map(|_| ())
}

/// Insert the configured roles whose ids are not in the Role Store yet.
/// Returns how many were added.
pub async fn seed_roles(roles: &dyn RoleRepository, seed: &[Role]) -> DomainResult<usize> {
    let mut added = 0;
    for role in seed {
        if roles.insert_if_absent(role.clone()).await? {
            info!(role_id = role.id, name = %role.name, "Seeded role");
            added += 1;
        }
    }
    if seed.is_empty() {
        warn!("No roles configured; every role reference will be rejected");
    }
    Ok(added)
}

#[cfg(test)]
pub(crate) mod test_support {
    use sea_orm::DatabaseConnection;
    use sea_orm_migration::MigratorTrait;

    use super::{init_database, migrator::Migrator, DatabaseConfig};

    /// Fresh migrated in-memory database.
    pub async fn memory_database() -> DatabaseConnection {
        let db = init_database(&DatabaseConfig::memory()).await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        db
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::InMemoryRoleRepository;

    #[tokio::test]
    async fn ping_succeeds_on_live_connection() {
        let db = test_support::memory_database().await;
        ping(&db).await.unwrap();
    }

    #[tokio::test]
    async fn seed_roles_only_counts_new_rows() {
        let roles = InMemoryRoleRepository::new();
        let seed = vec![Role::new(1, "ADMIN"), Role::new(2, "USER")];
        assert_eq!(seed_roles(&roles, &seed).await.unwrap(), 2);
        assert_eq!(seed_roles(&roles, &seed).await.unwrap(), 0);
        assert!(roles.exists(2).await.unwrap());
    }

    #[test]
    fn sqlite_config_builds_url() {
        let config = DatabaseConfig::sqlite("/tmp/users.db");
        assert_eq!(config.url, "sqlite:///tmp/users.db?mode=rwc");
    }
}
