//! User DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::MessageResult;
use crate::domain::{Role, RoleRef, User, UserPayload};

/// Role reference inside a request. Other role fields are ignored.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RoleRefDto {
    pub id: i64,
}

/// User request body, shared by every user endpoint.
///
/// `/get` and `/delete` only read `id`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UserRequest {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub login: Option<String>,
    pub password: Option<String>,
    pub roles: Option<Vec<RoleRefDto>>,
}

impl From<UserRequest> for UserPayload {
    fn from(r: UserRequest) -> Self {
        Self {
            id: r.id,
            name: r.name,
            login: r.login,
            password: r.password,
            roles: r
                .roles
                .map(|roles| roles.into_iter().map(|role| RoleRef { id: role.id }).collect()),
        }
    }
}

/// Role API representation
#[derive(Debug, Serialize, ToSchema)]
pub struct RoleDto {
    pub id: i64,
    pub name: String,
}

impl From<Role> for RoleDto {
    fn from(r: Role) -> Self {
        Self {
            id: r.id,
            name: r.name,
        }
    }
}

/// User API representation
#[derive(Debug, Serialize, ToSchema)]
pub struct UserDto {
    pub id: i64,
    pub name: String,
    pub login: String,
    pub password: String,
    pub roles: Vec<RoleDto>,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            login: u.login,
            password: u.password,
            roles: u.roles.into_iter().map(RoleDto::from).collect(),
        }
    }
}

/// Outcome of `/add` and `/edit`
///
/// `errors` holds one `"<field>: <message>"` entry per violated rule.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub errors: Vec<String>,
}

impl From<MessageResult> for MessageResponse {
    fn from(m: MessageResult) -> Self {
        Self {
            success: m.success,
            errors: m.errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_accepts_nulls_and_extra_role_fields() {
        let request: UserRequest = serde_json::from_str(
            r#"{"name": null, "login": "a", "roles": [{"id": 1, "name": "ADMIN"}, {"id": 1}]}"#,
        )
        .unwrap();
        let payload = UserPayload::from(request);
        assert_eq!(payload.id, None);
        assert_eq!(payload.name, None);
        assert_eq!(payload.login.as_deref(), Some("a"));
        assert_eq!(payload.role_ids(), vec![1]);
    }

    #[test]
    fn request_with_only_id() {
        let request: UserRequest = serde_json::from_str(r#"{"id": 12}"#).unwrap();
        assert_eq!(UserPayload::from(request), UserPayload::with_id(12));
    }

    #[test]
    fn user_dto_serializes_roles() {
        let dto = UserDto::from(User {
            id: 1,
            name: "A".into(),
            login: "a1".into(),
            password: "Ab1".into(),
            roles: vec![Role::new(2, "USER")],
        });
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 1,
                "name": "A",
                "login": "a1",
                "password": "Ab1",
                "roles": [{"id": 2, "name": "USER"}]
            })
        );
    }
}
