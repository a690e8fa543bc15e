//! User handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};

use common::AppResult;
use domain::{Credentials, PublicUser, RegisterUser};

use crate::extractors::JsonBody;
use crate::state::AppState;

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(register).delete(clear_users))
        .route("/login", post(login))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = RegisterUser,
    responses(
        (status = 201, description = "User registered", body = PublicUser),
        (status = 400, description = "Validation error, every rejected field listed"),
        (status = 409, description = "Email or phone already registered"),
        (status = 500, description = "Storage error")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<RegisterUser>,
) -> AppResult<(StatusCode, Json<PublicUser>)> {
    let user = state.directory.register(payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Log in with email or phone and password
#[utoipa::path(
    post,
    path = "/api/users/login",
    tag = "Users",
    request_body = Credentials,
    responses(
        (status = 200, description = "Credentials accepted", body = PublicUser),
        (status = 401, description = "Missing credentials, unknown identifier or wrong password")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    JsonBody(credentials): JsonBody<Credentials>,
) -> AppResult<Json<PublicUser>> {
    let user = state.directory.login(credentials).await?;
    Ok(Json(user))
}

/// List all users
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    responses(
        (status = 200, description = "All users in registration order", body = Vec<PublicUser>)
    )
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<PublicUser>>> {
    let users = state.directory.list_users().await?;
    Ok(Json(users))
}

/// Remove every user
#[utoipa::path(
    delete,
    path = "/api/users",
    tag = "Users",
    responses(
        (status = 204, description = "All users removed"),
        (status = 500, description = "Storage error")
    )
)]
pub async fn clear_users(State(state): State<AppState>) -> AppResult<StatusCode> {
    state.directory.clear_all().await?;
    Ok(StatusCode::NO_CONTENT)
}
