//! JSON API using Axum

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tracing::error;

use crate::data::PriceSource;
use crate::domain::RangeKey;
use crate::pricing::PriceService;

/// Create the API router
pub fn create_router<S>(service: Arc<PriceService<S>>) -> Router
where
    S: PriceSource + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/prices", get(prices_handler::<S>))
        .route("/api/price-history", get(price_history_handler::<S>))
        .route("/api/health", get(health_handler::<S>))
        .layer(cors)
        .with_state(service)
}

async fn prices_handler<S: PriceSource + 'static>(
    State(service): State<Arc<PriceService<S>>>,
) -> Response {
    match service.current_prices().await {
        Ok(prices) => Json(prices).into_response(),
        Err(err) => {
            error!(error = %err, "failed to fetch ingredient prices");
            error_response("Failed to fetch ingredient prices")
        }
    }
}

async fn price_history_handler<S: PriceSource + 'static>(
    State(service): State<Arc<PriceService<S>>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let range = RangeKey::from_query(params.get("months").map(String::as_str));
    match service.price_history(range).await {
        Ok(points) => Json(points).into_response(),
        Err(err) => {
            error!(error = %err, %range, "failed to fetch price history");
            error_response("Failed to fetch price history")
        }
    }
}

async fn health_handler<S: PriceSource + 'static>(
    State(service): State<Arc<PriceService<S>>>,
) -> Json<serde_json::Value> {
    let status = service.cache().status();
    Json(json!({
        "status": "ok",
        "currentCached": status.current,
        "cachedRanges": status.ranges.iter().map(ToString::to_string).collect::<Vec<_>>(),
    }))
}

fn error_response(message: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": message })),
    )
        .into_response()
}
