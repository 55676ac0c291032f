use std::collections::HashSet;

use crate::domain::{Role, RoleRef};

/// A persisted user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub login: String,
    pub password: String,
    /// Sorted by role id.
    pub roles: Vec<Role>,
}

/// User as received from a client.
///
/// Every field is optional: a missing or `null` string counts as blank, and
/// a missing `roles` list counts as the empty set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPayload {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub login: Option<String>,
    pub password: Option<String>,
    pub roles: Option<Vec<RoleRef>>,
}

impl UserPayload {
    /// Payload carrying only an id, as sent to `/get` and `/delete`.
    pub fn with_id(id: i64) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    /// Referenced role ids in input order, duplicates dropped.
    pub fn role_ids(&self) -> Vec<i64> {
        let mut seen = HashSet::new();
        self.roles
            .iter()
            .flatten()
            .map(|r| r.id)
            .filter(|id| seen.insert(*id))
            .collect()
    }

    /// Convert into the value handed to the User Store.
    pub fn into_record(self) -> UserRecord {
        let role_ids = self.role_ids();
        UserRecord {
            id: self.id,
            name: self.name.unwrap_or_default(),
            login: self.login.unwrap_or_default(),
            password: self.password.unwrap_or_default(),
            role_ids,
        }
    }
}

/// Validated user ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: Option<i64>,
    pub name: String,
    pub login: String,
    pub password: String,
    pub role_ids: Vec<i64>,
}

// ── Tests ──────────────────────────────────────────────────────
