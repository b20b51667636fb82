use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use serde_json::json;
use talentmesh::marketplace::approvals::approval_router;
use talentmesh::marketplace::credentials::credential_router;
use talentmesh::marketplace::governance::governance_router;
use talentmesh::marketplace::matching::matching_router;

use crate::infra::{AppState, Marketplace};

/// Merge the marketplace routers with the operational endpoints.
pub(crate) fn with_marketplace_routes(marketplace: Marketplace) -> axum::Router {
    let Marketplace {
        credentials,
        approvals,
        matching,
        governance,
    } = marketplace;

    credential_router(credentials)
        .merge(approval_router(approvals))
        .merge(matching_router(matching))
        .merge(governance_router(governance))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
