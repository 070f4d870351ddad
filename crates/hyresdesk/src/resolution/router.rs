use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};

use super::service::{
    OrderRequest, ParseRequest, ResolutionService, ResolveBatchRequest, ResolveRequest,
};
use crate::error::AppError;

/// Router exposing address parsing, resolution and interest ordering.
pub fn resolution_router(service: Arc<ResolutionService>) -> Router {
    Router::new()
        .route("/api/v1/addresses/parse", post(parse_handler))
        .route("/api/v1/addresses/resolve", post(resolve_handler))
        .route("/api/v1/addresses/resolve-batch", post(resolve_batch_handler))
        .route("/api/v1/interests/order", post(order_handler))
        .with_state(service)
}

pub(crate) async fn parse_handler(
    State(service): State<Arc<ResolutionService>>,
    axum::Json(request): axum::Json<ParseRequest>,
) -> Response {
    let response = service.parse(request);
    (StatusCode::OK, axum::Json(response)).into_response()
}

pub(crate) async fn resolve_handler(
    State(service): State<Arc<ResolutionService>>,
    axum::Json(request): axum::Json<ResolveRequest>,
) -> Response {
    let response = service.resolve(request);
    (StatusCode::OK, axum::Json(response)).into_response()
}

pub(crate) async fn resolve_batch_handler(
    State(service): State<Arc<ResolutionService>>,
    axum::Json(request): axum::Json<ResolveBatchRequest>,
) -> Result<Response, AppError> {
    let resolutions = service.resolve_batch(request)?;
    Ok((StatusCode::OK, axum::Json(resolutions)).into_response())
}

pub(crate) async fn order_handler(
    State(service): State<Arc<ResolutionService>>,
    axum::Json(request): axum::Json<OrderRequest>,
) -> Response {
    let response = service.order(request);
    (StatusCode::OK, axum::Json(response)).into_response()
}
