// Axum test fixture - a user API with its schema and docs endpoints
use axum::{
    extract::{Form, Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct User {
    pub id: u32,
    pub name: String,
    pub email: String,
}

/// Payload for new users
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Page number, starting at 1
    pub page: Option<i32>,
    pub limit: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub remember: bool,
}

#[derive(Clone)]
pub struct AppState;

/// List users
///
/// Results are paginated.
async fn list_users(State(_state): State<AppState>, Query(query): Query<ListQuery>) -> Json<Vec<User>> {
    Json(vec![])
}

/// Fetch a single user
async fn get_user(Path(user_id): Path<u32>) -> Json<User> {
    Json(User {
        id: user_id,
        name: "Test".to_string(),
        email: "test@example.com".to_string(),
    })
}

/// Create a user
async fn create_user(Json(payload): Json<CreateUserRequest>) -> Json<User> {
    Json(User {
        id: 1,
        name: payload.name,
        email: payload.email,
    })
}

async fn update_user(Path(user_id): Path<u32>, Json(payload): Json<CreateUserRequest>) -> Json<User> {
    Json(User {
        id: user_id,
        name: payload.name,
        email: payload.email,
    })
}

async fn delete_user(Path(user_id): Path<u32>) {}

/// Log in with a form post
async fn login(Form(form): Form<LoginForm>) -> &'static str {
    "OK"
}

async fn health_check() -> &'static str {
    "OK"
}

async fn serve_schema() -> &'static str {
    "{}"
}

async fn serve_docs() -> &'static str {
    "<html></html>"
}

pub fn create_router() -> Router {
    let user_routes = Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:user_id", get(get_user).put(update_user).delete(delete_user));

    Router::new()
        .route("/schema/", get(serve_schema))
        .route("/docs/", get(serve_docs))
        .route("/health", get(health_check))
        .route("/login", post(login))
        .nest("/api/users", user_routes)
        .with_state(AppState)
}
