/// A Role Store record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub id: i64,
    pub name: String,
}

impl Role {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Reference to a role by id, as carried in a user payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoleRef {
    pub id: i64,
}
