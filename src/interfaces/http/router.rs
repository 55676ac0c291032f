//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::UserService;

use super::modules::{health, users};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Users
        users::add_user,
        users::edit_user,
        users::get_user,
        users::delete_user,
        users::list_users,
    ),
    components(
        schemas(
            // Health
            health::HealthResponse,
            health::ComponentHealth,
            // Users
            users::UserRequest,
            users::RoleRefDto,
            users::UserDto,
            users::RoleDto,
            users::MessageResponse,
        )
    ),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Users", description = "User management: create, edit, fetch, delete and list users"),
    ),
    info(
        title = "User Service API",
        version = "1.0.0",
        description = "REST API for managing users and their role assignments",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes.
///
/// `db` is `None` when the service runs on the in-memory store; the health
/// check then reports the database as disabled.
pub fn create_api_router(
    user_service: Arc<UserService>,
    db: Option<DatabaseConnection>,
) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let user_routes = Router::new()
        .route("/add", post(users::add_user))
        .route("/edit", put(users::edit_user))
        .route("/get", get(users::get_user))
        .route("/delete", delete(users::delete_user))
        .route("/list", get(users::list_users))
        .with_state(users::UserHandlerState { user_service });

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(health::HealthState {
            db,
            started_at: Arc::new(Instant::now()),
        });

    let swagger_routes =
        SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi());

    // Build router
    Router::new()
        // Swagger UI
        .merge(swagger_routes)
        .merge(health_routes)
        .merge(user_routes)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, Response, StatusCode};
    use serde_json::{json, Value};

    use crate::domain::Role;
    use crate::infrastructure::storage::InMemoryRepositoryProvider;

    fn app() -> Router {
        let repos = InMemoryRepositoryProvider::with_roles([
            Role::new(1, "ADMIN"),
            Role::new(2, "USER"),
        ]);
        create_api_router(Arc::new(UserService::new(Arc::new(repos))), None)
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response<Body> {
        use tower::Service;
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                builder = builder.header("content-type", "application/json");
                Body::from(serde_json::to_vec(&value).unwrap())
            }
            None => Body::empty(),
        };
        let mut svc = app.clone().into_service();
        svc.call(builder.body(body).unwrap()).await.unwrap()
    }

    async fn body_bytes(resp: Response<Body>) -> Vec<u8> {
        axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    async fn body_json(resp: Response<Body>) -> Value {
        serde_json::from_slice(&body_bytes(resp).await).unwrap()
    }

    fn alice() -> Value {
        json!({"name": "Alice", "login": "alice", "password": "Secret1", "roles": [{"id": 1}]})
    }

    #[tokio::test]
    async fn add_then_list_assigns_id_and_resolves_roles() {
        let app = app();

        let resp = send(&app, "POST", "/add", Some(alice())).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await, json!({"success": true, "errors": []}));

        let resp = send(&app, "GET", "/list", None).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            body_json(resp).await,
            json!([{
                "id": 1,
                "name": "Alice",
                "login": "alice",
                "password": "Secret1",
                "roles": [{"id": 1, "name": "ADMIN"}]
            }])
        );
    }

    #[tokio::test]
    async fn add_reports_every_violation_in_order() {
        let app = app();
        let payload = json!({"name": "", "login": "bob", "password": "", "roles": [{"id": 9}]});

        let resp = send(&app, "POST", "/add", Some(payload)).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(resp).await,
            json!({
                "success": false,
                "errors": [
                    "name: may not be empty",
                    "password: may not be empty",
                    "password: value should contain at least 1 Uppercase Alphabet and 1 Number",
                    "roles: Role with id 9 does not exist"
                ]
            })
        );

        let resp = send(&app, "GET", "/list", None).await;
        assert_eq!(body_json(resp).await, json!([]));
    }

    #[tokio::test]
    async fn add_with_taken_id_is_rejected() {
        let app = app();
        send(&app, "POST", "/add", Some(alice())).await;

        let mut again = alice();
        again["id"] = json!(1);
        let resp = send(&app, "POST", "/add", Some(again)).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(resp).await,
            json!({"success": false, "errors": ["id: This user exist"]})
        );
    }

    #[tokio::test]
    async fn edit_overwrites_user_and_roles() {
        let app = app();
        send(&app, "POST", "/add", Some(alice())).await;

        let edited = json!({
            "id": 1, "name": "Alice B", "login": "aliceb", "password": "Other2", "roles": [{"id": 2}]
        });
        let resp = send(&app, "PUT", "/edit", Some(edited)).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await, json!({"success": true, "errors": []}));

        let resp = send(&app, "GET", "/get", Some(json!({"id": 1}))).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            body_json(resp).await,
            json!({
                "id": 1,
                "name": "Alice B",
                "login": "aliceb",
                "password": "Other2",
                "roles": [{"id": 2, "name": "USER"}]
            })
        );
    }

    #[tokio::test]
    async fn edit_unknown_or_missing_id_is_rejected() {
        let app = app();

        let mut unknown = alice();
        unknown["id"] = json!(42);
        let resp = send(&app, "PUT", "/edit", Some(unknown)).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(resp).await,
            json!({"success": false, "errors": ["id: This user is not exist"]})
        );

        let resp = send(&app, "PUT", "/edit", Some(alice())).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(resp).await,
            json!({"success": false, "errors": ["id: This user is not exist"]})
        );
    }

    #[tokio::test]
    async fn edit_rejects_blank_name_and_unknown_role() {
        let app = app();
        send(&app, "POST", "/add", Some(alice())).await;

        let edited = json!({
            "id": 1, "name": "", "login": "alice", "password": "Secret1", "roles": [{"id": 9}]
        });
        let resp = send(&app, "PUT", "/edit", Some(edited)).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(resp).await,
            json!({
                "success": false,
                "errors": [
                    "name: may not be empty",
                    "roles: Role with id 9 does not exist"
                ]
            })
        );

        let resp = send(&app, "GET", "/get", Some(json!({"id": 1}))).await;
        let stored = body_json(resp).await;
        assert_eq!(stored["name"], "Alice");
        assert_eq!(stored["roles"], json!([{"id": 1, "name": "ADMIN"}]));
    }

    #[tokio::test]
    async fn add_with_max_id_succeeds() {
        let app = app();
        let mut payload = alice();
        payload["id"] = json!(i64::MAX);
        let resp = send(&app, "POST", "/add", Some(payload)).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = send(&app, "POST", "/add", Some(alice())).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_bytes(resp).await.is_empty());
    }

    #[tokio::test]
    async fn get_unknown_id_returns_null() {
        let app = app();
        let resp = send(&app, "GET", "/get", Some(json!({"id": 5}))).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await, Value::Null);
    }

    #[tokio::test]
    async fn get_without_id_is_empty_400() {
        let app = app();
        let resp = send(&app, "GET", "/get", Some(json!({"name": "x"}))).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(body_bytes(resp).await.is_empty());
    }

    #[tokio::test]
    async fn delete_removes_user_once() {
        let app = app();
        send(&app, "POST", "/add", Some(alice())).await;

        let resp = send(&app, "DELETE", "/delete", Some(json!({"id": 1}))).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(body_bytes(resp).await.is_empty());

        let resp = send(&app, "DELETE", "/delete", Some(json!({"id": 1}))).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(body_bytes(resp).await.is_empty());

        let resp = send(&app, "GET", "/list", None).await;
        assert_eq!(body_json(resp).await, json!([]));
    }

    #[tokio::test]
    async fn delete_without_id_is_empty_400() {
        let app = app();
        let resp = send(&app, "DELETE", "/delete", Some(json!({}))).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(body_bytes(resp).await.is_empty());
    }

    #[tokio::test]
    async fn malformed_body_is_empty_400() {
        use tower::Service;
        let req = Request::builder()
            .method("POST")
            .uri("/add")
            .header("content-type", "application/json")
            .body(Body::from("{\"name\": "))
            .unwrap();
        let mut svc = app().into_service();
        let resp = svc.call(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(body_bytes(resp).await.is_empty());
    }

    #[tokio::test]
    async fn health_reports_in_memory_store() {
        let app = app();
        let resp = send(&app, "GET", "/health", None).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["database"]["status"], "disabled");
    }

    #[tokio::test]
    async fn openapi_document_lists_user_paths() {
        let app = app();
        let resp = send(&app, "GET", "/api-docs/openapi.json", None).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        for path in ["/add", "/edit", "/get", "/delete", "/list", "/health"] {
            assert!(body["paths"].get(path).is_some(), "missing {path}");
        }
    }
}
