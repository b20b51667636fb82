use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use super::domain::{ApplicationId, CandidateSnapshot, JobDraft, JobFilter, JobId, MatchId};
use super::repository::MatchingRepository;
use super::service::{MatchingError, MatchingService};
use crate::marketplace::credentials::CredentialRepository;
use crate::marketplace::ActorId;

/// Router builder exposing HTTP endpoints for the matching engine.
pub fn matching_router<R, C>(service: Arc<MatchingService<R, C>>) -> Router
where
    R: MatchingRepository + 'static,
    C: CredentialRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/jobs",
            post(create_job_handler::<R, C>).get(list_jobs_handler::<R, C>),
        )
        .route("/api/v1/jobs/:job_id", get(get_job_handler::<R, C>))
        .route("/api/v1/jobs/:job_id/publish", post(publish_job_handler::<R, C>))
        .route("/api/v1/jobs/:job_id/close", post(close_job_handler::<R, C>))
        .route("/api/v1/jobs/:job_id/applications", post(apply_handler::<R, C>))
        .route("/api/v1/applications", get(list_applications_handler::<R, C>))
        .route(
            "/api/v1/applications/:application_id/decline",
            post(decline_handler::<R, C>),
        )
        .route("/api/v1/matches", get(list_matches_handler::<R, C>))
        .route(
            "/api/v1/matches/:match_id/approve",
            post(approve_match_handler::<R, C>),
        )
        .route(
            "/api/v1/matches/:match_id/reject",
            post(reject_match_handler::<R, C>),
        )
        .route("/api/v1/matches/:match_id/chat", post(open_channel_handler::<R, C>))
        .route("/api/v1/matches/:match_id/close", post(close_match_handler::<R, C>))
        .with_state(service)
}

pub(crate) async fn create_job_handler<R, C>(
    State(service): State<Arc<MatchingService<R, C>>>,
    axum::Json(draft): axum::Json<JobDraft>,
) -> Response
where
    R: MatchingRepository + 'static,
    C: CredentialRepository + 'static,
{
    match service.create_job(draft, Utc::now().date_naive()) {
        Ok(job) => (StatusCode::CREATED, axum::Json(job)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_jobs_handler<R, C>(
    State(service): State<Arc<MatchingService<R, C>>>,
    Query(filter): Query<JobFilter>,
) -> Response
where
    R: MatchingRepository + 'static,
    C: CredentialRepository + 'static,
{
    match service.list_jobs(&filter) {
        Ok(jobs) => (StatusCode::OK, axum::Json(jobs)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn get_job_handler<R, C>(
    State(service): State<Arc<MatchingService<R, C>>>,
    Path(job_id): Path<String>,
) -> Response
where
    R: MatchingRepository + 'static,
    C: CredentialRepository + 'static,
{
    match service.get_job(&JobId(job_id)) {
        Ok(job) => (StatusCode::OK, axum::Json(job)).into_response(),
        Err(error) => error_response(error),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct EmployerAction {
    pub(crate) employer_id: String,
}

pub(crate) async fn publish_job_handler<R, C>(
    State(service): State<Arc<MatchingService<R, C>>>,
    Path(job_id): Path<String>,
    axum::Json(action): axum::Json<EmployerAction>,
) -> Response
where
    R: MatchingRepository + 'static,
    C: CredentialRepository + 'static,
{
    match service.publish_job(&JobId(job_id), &ActorId(action.employer_id)) {
        Ok(job) => (StatusCode::OK, axum::Json(job)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn close_job_handler<R, C>(
    State(service): State<Arc<MatchingService<R, C>>>,
    Path(job_id): Path<String>,
    axum::Json(action): axum::Json<EmployerAction>,
) -> Response
where
    R: MatchingRepository + 'static,
    C: CredentialRepository + 'static,
{
    match service.close_job(&JobId(job_id), &ActorId(action.employer_id)) {
        Ok(job) => (StatusCode::OK, axum::Json(job)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn apply_handler<R, C>(
    State(service): State<Arc<MatchingService<R, C>>>,
    Path(job_id): Path<String>,
    axum::Json(snapshot): axum::Json<CandidateSnapshot>,
) -> Response
where
    R: MatchingRepository + 'static,
    C: CredentialRepository + 'static,
{
    match service.apply(&JobId(job_id), snapshot, Utc::now()) {
        Ok(outcome) => (StatusCode::CREATED, axum::Json(outcome)).into_response(),
        Err(error) => error_response(error),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CandidateFilter {
    pub(crate) candidate: String,
}

pub(crate) async fn list_applications_handler<R, C>(
    State(service): State<Arc<MatchingService<R, C>>>,
    Query(filter): Query<CandidateFilter>,
) -> Response
where
    R: MatchingRepository + 'static,
    C: CredentialRepository + 'static,
{
    match service.applications_for(&ActorId(filter.candidate)) {
        Ok(applications) => (StatusCode::OK, axum::Json(applications)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn decline_handler<R, C>(
    State(service): State<Arc<MatchingService<R, C>>>,
    Path(application_id): Path<String>,
    axum::Json(action): axum::Json<EmployerAction>,
) -> Response
where
    R: MatchingRepository + 'static,
    C: CredentialRepository + 'static,
{
    let id = ApplicationId(application_id);
    match service.decline_application(&id, &ActorId(action.employer_id)) {
        Ok(application) => (StatusCode::OK, axum::Json(application)).into_response(),
        Err(error) => error_response(error),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct PartyFilter {
    pub(crate) party: String,
}

pub(crate) async fn list_matches_handler<R, C>(
    State(service): State<Arc<MatchingService<R, C>>>,
    Query(filter): Query<PartyFilter>,
) -> Response
where
    R: MatchingRepository + 'static,
    C: CredentialRepository + 'static,
{
    match service.matches_for(&ActorId(filter.party)) {
        Ok(matches) => (StatusCode::OK, axum::Json(matches)).into_response(),
        Err(error) => error_response(error),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct PartyAction {
    pub(crate) party_id: String,
}

pub(crate) async fn approve_match_handler<R, C>(
    State(service): State<Arc<MatchingService<R, C>>>,
    Path(match_id): Path<String>,
    axum::Json(action): axum::Json<EmployerAction>,
) -> Response
where
    R: MatchingRepository + 'static,
    C: CredentialRepository + 'static,
{
    let id = MatchId(match_id);
    match service.approve_match(&id, &ActorId(action.employer_id), Utc::now()) {
        Ok(matched) => (StatusCode::OK, axum::Json(matched)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn reject_match_handler<R, C>(
    State(service): State<Arc<MatchingService<R, C>>>,
    Path(match_id): Path<String>,
    axum::Json(action): axum::Json<EmployerAction>,
) -> Response
where
    R: MatchingRepository + 'static,
    C: CredentialRepository + 'static,
{
    let id = MatchId(match_id);
    match service.reject_match(&id, &ActorId(action.employer_id), Utc::now()) {
        Ok(matched) => (StatusCode::OK, axum::Json(matched)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn open_channel_handler<R, C>(
    State(service): State<Arc<MatchingService<R, C>>>,
    Path(match_id): Path<String>,
    axum::Json(action): axum::Json<PartyAction>,
) -> Response
where
    R: MatchingRepository + 'static,
    C: CredentialRepository + 'static,
{
    let id = MatchId(match_id);
    match service.open_channel(&id, &ActorId(action.party_id), Utc::now()) {
        Ok(matched) => (StatusCode::OK, axum::Json(matched)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn close_match_handler<R, C>(
    State(service): State<Arc<MatchingService<R, C>>>,
    Path(match_id): Path<String>,
    axum::Json(action): axum::Json<PartyAction>,
) -> Response
where
    R: MatchingRepository + 'static,
    C: CredentialRepository + 'static,
{
    let id = MatchId(match_id);
    match service.close_match(&id, &ActorId(action.party_id), Utc::now()) {
        Ok(matched) => (StatusCode::OK, axum::Json(matched)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: MatchingError) -> Response {
    let status = match &error {
        MatchingError::MissingField(_) => StatusCode::UNPROCESSABLE_ENTITY,
        MatchingError::NotOwner | MatchingError::NotParticipant => StatusCode::FORBIDDEN,
        MatchingError::JobNotOpen
        | MatchingError::DuplicateApplication
        | MatchingError::InvalidTransition { .. } => StatusCode::CONFLICT,
        MatchingError::NotEligible { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        MatchingError::NotFound => StatusCode::NOT_FOUND,
        MatchingError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = match &error {
        MatchingError::NotEligible { failures } => json!({
            "error": error.to_string(),
            "failures": failures,
        }),
        _ => json!({ "error": error.to_string() }),
    };
    (status, axum::Json(payload)).into_response()
}
