//! In-memory storage implementation

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::{
    DomainError, DomainResult, RepositoryProvider, Role, RoleRepository, User, UserRecord,
    UserRepository,
};

/// In-memory Role Store
#[derive(Default)]
pub struct InMemoryRoleRepository {
    roles: DashMap<i64, Role>,
}

impl InMemoryRoleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn resolve(&self, role_ids: &[i64]) -> Vec<Role> {
        let mut roles: Vec<Role> = role_ids
            .iter()
            .filter_map(|id| self.roles.get(id).map(|r| r.value().clone()))
            .collect();
        roles.sort_by_key(|r| r.id);
        roles
    }
}

#[async_trait]
impl RoleRepository for InMemoryRoleRepository {
    async fn exists(&self, id: i64) -> DomainResult<bool> {
        Ok(self.roles.contains_key(&id))
    }

    async fn insert_if_absent(&self, role: Role) -> DomainResult<bool> {
        match self.roles.entry(role.id) {
            dashmap::mapref::entry::Entry::Occupied(_) => Ok(false),
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(role);
                Ok(true)
            }
        }
    }
}

/// In-memory User Store. Role objects are resolved against the shared Role
/// Store on every read, so deleted roles silently drop out.
pub struct InMemoryUserRepository {
    users: DashMap<i64, UserRecord>,
    roles: Arc<InMemoryRoleRepository>,
    id_counter: AtomicI64,
}

impl InMemoryUserRepository {
    pub fn new(roles: Arc<InMemoryRoleRepository>) -> Self {
        Self {
            users: DashMap::new(),
            roles,
            id_counter: AtomicI64::new(1),
        }
    }

    fn to_user(&self, id: i64, record: &UserRecord) -> User {
        User {
            id,
            name: record.name.clone(),
            login: record.login.clone(),
            password: record.password.clone(),
            roles: self.roles.resolve(&record.role_ids),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_one(&self, id: i64) -> DomainResult<Option<User>> {
        Ok(self.users.get(&id).map(|r| self.to_user(id, r.value())))
    }

    async fn save(&self, mut record: UserRecord) -> DomainResult<User> {
        let id = match record.id {
            Some(id) => {
                // Keep generated ids clear of explicitly chosen ones.
                self.id_counter
                    .fetch_max(id.saturating_add(1), Ordering::SeqCst);
                id
            }
            None => self
                .id_counter
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_add(1))
                .map_err(|_| DomainError::Storage("User id sequence exhausted".into()))?,
        };
        record.id = Some(id);

        let user = self.to_user(id, &record);
        self.users.insert(id, record);
        Ok(user)
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        match self.users.remove(&id) {
            Some(_) => Ok(()),
            None => Err(DomainError::NotFound {
                entity: "User",
                field: "id",
                value: id.to_string(),
            }),
        }
    }

    async fn find_all(&self) -> DomainResult<Vec<User>> {
        let mut users: Vec<User> = self
            .users
            .iter()
            .map(|entry| self.to_user(*entry.key(), entry.value()))
            .collect();
        users.sort_by_key(|u| u.id);
        Ok(users)
    }
}

/// Repository provider for development and testing
pub struct InMemoryRepositoryProvider {
    users: InMemoryUserRepository,
    roles: Arc<InMemoryRoleRepository>,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        let roles = Arc::new(InMemoryRoleRepository::new());
        Self {
            users: InMemoryUserRepository::new(roles.clone()),
            roles,
        }
    }

    /// Provider whose Role Store already holds `roles`.
    pub fn with_roles(roles: impl IntoIterator<Item = Role>) -> Self {
        let provider = Self::new();
        for role in roles {
            provider.roles.roles.insert(role.id, role);
        }
        provider
    }
}

impl Default for InMemoryRepositoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositoryProvider for InMemoryRepositoryProvider {
    fn users(&self) -> &dyn UserRepository {
        &self.users
    }

    fn roles(&self) -> &dyn RoleRepository {
        self.roles.as_ref()
    }
}

// ── Tests ──────────────────────────────────────────────────────
