//! User management API handlers
//!
//! Every endpoint takes a user JSON body, `/get` and `/delete` included.
//! Delegates to `UserService` from the application/identity layer.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use super::dto::{MessageResponse, UserDto, UserRequest};
use crate::application::{MessageResult, UserService};
use crate::interfaces::http::common::{ApiError, JsonBody};

#[derive(Clone)]
pub struct UserHandlerState {
    pub user_service: Arc<UserService>,
}

fn message_response(result: MessageResult) -> (StatusCode, Json<MessageResponse>) {
    let status = if result.success {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };
    (status, Json(result.into()))
}

#[utoipa::path(
    post,
    path = "/add",
    tag = "Users",
    request_body = UserRequest,
    responses(
        (status = 200, description = "User created", body = MessageResponse),
        (status = 400, description = "Validation failed", body = MessageResponse)
    )
)]
pub async fn add_user(
    State(state): State<UserHandlerState>,
    JsonBody(request): JsonBody<UserRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let result = state.user_service.create(request.into()).await?;
    Ok(message_response(result))
}

#[utoipa::path(
    put,
    path = "/edit",
    tag = "Users",
    request_body = UserRequest,
    responses(
        (status = 200, description = "User updated", body = MessageResponse),
        (status = 400, description = "Validation failed or user does not exist", body = MessageResponse)
    )
)]
pub async fn edit_user(
    State(state): State<UserHandlerState>,
    JsonBody(request): JsonBody<UserRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let result = state.user_service.update(request.into()).await?;
    Ok(message_response(result))
}

#[utoipa::path(
    get,
    path = "/get",
    tag = "Users",
    request_body = UserRequest,
    responses(
        (status = 200, description = "Stored user, or null when the id is unknown", body = UserDto),
        (status = 400, description = "No id given")
    )
)]
pub async fn get_user(
    State(state): State<UserHandlerState>,
    JsonBody(request): JsonBody<UserRequest>,
) -> Result<Json<Option<UserDto>>, ApiError> {
    let user = state.user_service.fetch(request.into()).await?;
    Ok(Json(user.map(UserDto::from)))
}

#[utoipa::path(
    delete,
    path = "/delete",
    tag = "Users",
    request_body = UserRequest,
    responses(
        (status = 200, description = "User deleted"),
        (status = 400, description = "No id given or user does not exist")
    )
)]
pub async fn delete_user(
    State(state): State<UserHandlerState>,
    JsonBody(request): JsonBody<UserRequest>,
) -> Result<StatusCode, ApiError> {
    state.user_service.delete(request.into()).await?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    get,
    path = "/list",
    tag = "Users",
    responses(
        (status = 200, description = "Every stored user", body = Vec<UserDto>)
    )
)]
pub async fn list_users(
    State(state): State<UserHandlerState>,
) -> Result<Json<Vec<UserDto>>, ApiError> {
    let users = state.user_service.list_all().await?;
    Ok(Json(users.into_iter().map(UserDto::from).collect()))
}
