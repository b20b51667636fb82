use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use serde_json::json;

use super::domain::{CredentialDraft, CredentialId, CredentialKind};
use super::repository::CredentialRepository;
use super::service::{CredentialError, CredentialService};
use crate::marketplace::ActorId;

/// Router builder exposing HTTP endpoints for the credential registry.
pub fn credential_router<R>(service: Arc<CredentialService<R>>) -> Router
where
    R: CredentialRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/credentials",
            post(issue_handler::<R>).get(list_handler::<R>),
        )
        .route(
            "/api/v1/credentials/:credential_id/enabled",
            post(set_enabled_handler::<R>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct IssueRequest {
    pub(crate) owner_id: String,
    pub(crate) kind: CredentialKind,
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) issuer: Option<String>,
    pub(crate) proof_reference: String,
    #[serde(default)]
    pub(crate) issued_at: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwnerQuery {
    pub(crate) owner: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SetEnabledRequest {
    pub(crate) actor_id: String,
    pub(crate) enabled: bool,
}

pub(crate) async fn issue_handler<R>(
    State(service): State<Arc<CredentialService<R>>>,
    axum::Json(request): axum::Json<IssueRequest>,
) -> Response
where
    R: CredentialRepository + 'static,
{
    let issued_at = request
        .issued_at
        .unwrap_or_else(|| Utc::now().date_naive());
    let draft = CredentialDraft {
        owner_id: ActorId(request.owner_id),
        kind: request.kind,
        title: request.title,
        issuer: request.issuer,
        proof_reference: request.proof_reference,
    };

    match service.issue(draft, issued_at) {
        Ok(credential) => (StatusCode::CREATED, axum::Json(credential)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_handler<R>(
    State(service): State<Arc<CredentialService<R>>>,
    Query(query): Query<OwnerQuery>,
) -> Response
where
    R: CredentialRepository + 'static,
{
    match service.list(&ActorId(query.owner)) {
        Ok(credentials) => (StatusCode::OK, axum::Json(credentials)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn set_enabled_handler<R>(
    State(service): State<Arc<CredentialService<R>>>,
    Path(credential_id): Path<String>,
    axum::Json(request): axum::Json<SetEnabledRequest>,
) -> Response
where
    R: CredentialRepository + 'static,
{
    let id = CredentialId(credential_id);
    match service.set_enabled(&id, &ActorId(request.actor_id), request.enabled) {
        Ok(credential) => (StatusCode::OK, axum::Json(credential)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: CredentialError) -> Response {
    let status = match &error {
        CredentialError::MissingField(_) => StatusCode::UNPROCESSABLE_ENTITY,
        CredentialError::NotOwner => StatusCode::FORBIDDEN,
        CredentialError::NotFound => StatusCode::NOT_FOUND,
        CredentialError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
