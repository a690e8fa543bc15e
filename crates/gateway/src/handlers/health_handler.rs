//! Health check handlers.

use std::path::Path;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub services: ServiceStatus,
}

/// Individual store status.
#[derive(Debug, Serialize)]
pub struct ServiceStatus {
    pub users: ServiceHealth,
    pub purchases: ServiceHealth,
}

/// Service health with optional error message.
#[derive(Debug, Serialize)]
pub struct ServiceHealth {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ServiceHealth {
    fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// Create health routes.
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}

/// Health check endpoint - verifies both data files are reachable.
pub async fn health_check(State(state): State<AppState>) -> Response {
    let users = check_file(&state.config.users_file).await;
    let purchases = check_file(&state.config.purchases_file).await;

    let all_healthy = users.is_healthy() && purchases.is_healthy();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        services: ServiceStatus { users, purchases },
    };

    if all_healthy {
        (StatusCode::OK, Json(response)).into_response()
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, Json(response)).into_response()
    }
}

async fn check_file(path: &Path) -> ServiceHealth {
    let problem = match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_file() => {
            return ServiceHealth {
                status: "healthy".to_string(),
                error: None,
            }
        }
        Ok(_) => "not a regular file".to_string(),
        Err(e) => e.to_string(),
    };

    tracing::warn!(path = %path.display(), error = %problem, "Data file check failed");
    ServiceHealth {
        status: "unhealthy".to_string(),
        error: Some("Data file unavailable".to_string()),
    }
}
