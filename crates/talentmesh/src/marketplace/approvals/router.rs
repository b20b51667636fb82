use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use super::domain::ApprovalRequestId;
use super::repository::ApprovalRepository;
use super::service::{ApprovalError, ApprovalService, ReviewForm};
use super::verifier::EvidenceVerifier;
use crate::marketplace::credentials::{CredentialId, CredentialRepository};
use crate::marketplace::ActorId;

/// Router builder exposing HTTP endpoints for the review queue.
pub fn approval_router<R, C, V>(service: Arc<ApprovalService<R, C, V>>) -> Router
where
    R: ApprovalRepository + 'static,
    C: CredentialRepository + 'static,
    V: EvidenceVerifier + 'static,
{
    Router::new()
        .route("/api/v1/approvals", post(submit_handler::<R, C, V>))
        .route(
            "/api/v1/approvals/pending",
            get(pending_handler::<R, C, V>),
        )
        .route(
            "/api/v1/approvals/reviewed",
            get(reviewed_handler::<R, C, V>),
        )
        .route(
            "/api/v1/approvals/:request_id/decision",
            post(decide_handler::<R, C, V>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct SubmitRequest {
    pub(crate) credential_id: String,
    pub(crate) submitter_id: String,
    pub(crate) evidence_url: String,
}

pub(crate) async fn submit_handler<R, C, V>(
    State(service): State<Arc<ApprovalService<R, C, V>>>,
    axum::Json(request): axum::Json<SubmitRequest>,
) -> Response
where
    R: ApprovalRepository + 'static,
    C: CredentialRepository + 'static,
    V: EvidenceVerifier + 'static,
{
    let result = service.submit(
        CredentialId(request.credential_id),
        ActorId(request.submitter_id),
        request.evidence_url,
        Utc::now(),
    );
    match result {
        Ok(approval) => (StatusCode::CREATED, axum::Json(approval)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn decide_handler<R, C, V>(
    State(service): State<Arc<ApprovalService<R, C, V>>>,
    Path(request_id): Path<String>,
    axum::Json(form): axum::Json<ReviewForm>,
) -> Response
where
    R: ApprovalRepository + 'static,
    C: CredentialRepository + 'static,
    V: EvidenceVerifier + 'static,
{
    let id = ApprovalRequestId(request_id);
    match service.decide(&id, form, Utc::now()) {
        Ok(approval) => (StatusCode::OK, axum::Json(approval)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn pending_handler<R, C, V>(
    State(service): State<Arc<ApprovalService<R, C, V>>>,
) -> Response
where
    R: ApprovalRepository + 'static,
    C: CredentialRepository + 'static,
    V: EvidenceVerifier + 'static,
{
    match service.pending() {
        Ok(approvals) => (StatusCode::OK, axum::Json(approvals)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn reviewed_handler<R, C, V>(
    State(service): State<Arc<ApprovalService<R, C, V>>>,
) -> Response
where
    R: ApprovalRepository + 'static,
    C: CredentialRepository + 'static,
    V: EvidenceVerifier + 'static,
{
    match service.reviewed() {
        Ok(approvals) => (StatusCode::OK, axum::Json(approvals)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: ApprovalError) -> Response {
    let status = match &error {
        ApprovalError::MissingField(_)
        | ApprovalError::ScoreOutOfRange(_)
        | ApprovalError::IncompleteReview { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        ApprovalError::AlreadyDecided
        | ApprovalError::ReviewAlreadyQueued
        | ApprovalError::CredentialAlreadyReviewed => StatusCode::CONFLICT,
        ApprovalError::NotFound => StatusCode::NOT_FOUND,
        ApprovalError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
