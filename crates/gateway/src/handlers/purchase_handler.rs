//! Purchase handlers.

use axum::{extract::State, response::Json, routing::post, Router};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use common::AppResult;

use crate::extractors::JsonBody;
use crate::state::AppState;

/// Purchase receipt
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseReceipt {
    #[schema(example = "Purchase saved")]
    pub message: String,
    /// Number of entries appended to the log
    #[schema(example = 2)]
    pub buys_saved: usize,
}

/// Create purchase routes
pub fn purchase_routes() -> Router<AppState> {
    Router::new().route("/buy", post(record_purchases))
}

/// Append one purchase or an array of purchases to the log
#[utoipa::path(
    post,
    path = "/buy",
    tag = "Purchases",
    request_body(content = Object, description = "A purchase object or an array of them"),
    responses(
        (status = 200, description = "Purchases saved", body = PurchaseReceipt),
        (status = 400, description = "Body is not an object or array of objects"),
        (status = 500, description = "Storage error")
    )
)]
pub async fn record_purchases(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<Value>,
) -> AppResult<Json<PurchaseReceipt>> {
    let buys_saved = state.purchases.record(body).await?;
    Ok(Json(PurchaseReceipt {
        message: "Purchase saved".to_string(),
        buys_saved,
    }))
}
