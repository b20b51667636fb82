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

use super::domain::{ProposalDraft, ProposalFilter, ProposalId, VoteChoice};
use super::repository::GovernanceRepository;
use super::service::{GovernanceError, GovernanceService};
use crate::marketplace::ActorId;

/// Router builder exposing HTTP endpoints for proposals and ballots.
pub fn governance_router<R>(service: Arc<GovernanceService<R>>) -> Router
where
    R: GovernanceRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/proposals",
            post(create_proposal_handler::<R>).get(list_proposals_handler::<R>),
        )
        .route("/api/v1/proposals/:proposal_id", get(get_proposal_handler::<R>))
        .route("/api/v1/proposals/:proposal_id/votes", post(cast_vote_handler::<R>))
        .route(
            "/api/v1/proposals/:proposal_id/finalize",
            post(finalize_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn create_proposal_handler<R>(
    State(service): State<Arc<GovernanceService<R>>>,
    axum::Json(draft): axum::Json<ProposalDraft>,
) -> Response
where
    R: GovernanceRepository + 'static,
{
    match service.create_proposal(draft, Utc::now()) {
        Ok(proposal) => (StatusCode::CREATED, axum::Json(proposal)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_proposals_handler<R>(
    State(service): State<Arc<GovernanceService<R>>>,
    Query(filter): Query<ProposalFilter>,
) -> Response
where
    R: GovernanceRepository + 'static,
{
    match service.list(&filter) {
        Ok(proposals) => (StatusCode::OK, axum::Json(proposals)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn get_proposal_handler<R>(
    State(service): State<Arc<GovernanceService<R>>>,
    Path(proposal_id): Path<String>,
) -> Response
where
    R: GovernanceRepository + 'static,
{
    match service.get(&ProposalId(proposal_id)) {
        Ok(proposal) => (StatusCode::OK, axum::Json(proposal)).into_response(),
        Err(error) => error_response(error),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct BallotRequest {
    pub(crate) voter_id: String,
    pub(crate) choice: VoteChoice,
}

pub(crate) async fn cast_vote_handler<R>(
    State(service): State<Arc<GovernanceService<R>>>,
    Path(proposal_id): Path<String>,
    axum::Json(ballot): axum::Json<BallotRequest>,
) -> Response
where
    R: GovernanceRepository + 'static,
{
    let id = ProposalId(proposal_id);
    match service.cast_vote(&id, ActorId(ballot.voter_id), ballot.choice, Utc::now()) {
        Ok(proposal) => (StatusCode::CREATED, axum::Json(proposal)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn finalize_handler<R>(
    State(service): State<Arc<GovernanceService<R>>>,
    Path(proposal_id): Path<String>,
) -> Response
where
    R: GovernanceRepository + 'static,
{
    match service.finalize(&ProposalId(proposal_id), Utc::now()) {
        Ok(proposal) => (StatusCode::OK, axum::Json(proposal)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: GovernanceError) -> Response {
    let status = match &error {
        GovernanceError::MissingField(_) | GovernanceError::PeriodOutOfRange(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        GovernanceError::ProposalClosed
        | GovernanceError::DuplicateVote
        | GovernanceError::StillOpen => StatusCode::CONFLICT,
        GovernanceError::NotFound => StatusCode::NOT_FOUND,
        GovernanceError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
