use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::info;

use super::domain::{
    ApprovalRequest, ApprovalRequestId, ApprovalStatus, ReviewCriteria, ReviewDecision,
    ReviewRecord,
};
use super::repository::ApprovalRepository;
use super::verifier::EvidenceVerifier;
use crate::marketplace::credentials::{CredentialId, CredentialRepository, VerificationState};
use crate::marketplace::store::StoreError;
use crate::marketplace::ActorId;

const MAX_REVIEW_SCORE: u8 = 100;

static REQUEST_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_request_id() -> ApprovalRequestId {
    let id = REQUEST_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ApprovalRequestId(format!("req-{id:06}"))
}

/// Reviewer input for a decision.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewForm {
    pub reviewer_id: ActorId,
    pub decision: ReviewDecision,
    pub criteria: ReviewCriteria,
    pub score: u8,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Service composing the review queue, the credential registry, and the
/// automated evidence pre-check.
pub struct ApprovalService<R, C, V> {
    repository: Arc<R>,
    credentials: Arc<C>,
    verifier: Arc<V>,
}

impl<R, C, V> ApprovalService<R, C, V>
where
    R: ApprovalRepository + 'static,
    C: CredentialRepository + 'static,
    V: EvidenceVerifier + 'static,
{
    pub fn new(repository: Arc<R>, credentials: Arc<C>, verifier: Arc<V>) -> Self {
        Self {
            repository,
            credentials,
            verifier,
        }
    }

    /// Queue a credential's evidence for human review. The automated check
    /// runs up front and is recorded as an advisory signal on the request.
    pub fn submit(
        &self,
        credential_id: CredentialId,
        submitter_id: ActorId,
        evidence_url: String,
        now: DateTime<Utc>,
    ) -> Result<ApprovalRequest, ApprovalError> {
        if evidence_url.trim().is_empty() {
            return Err(ApprovalError::MissingField("evidence_url"));
        }

        let credential = self
            .credentials
            .fetch(&credential_id)?
            .ok_or(ApprovalError::NotFound)?;
        if credential.verification != VerificationState::PendingReview {
            return Err(ApprovalError::CredentialAlreadyReviewed);
        }

        let automated_check = self.verifier.verify(&evidence_url);

        let request = ApprovalRequest {
            id: next_request_id(),
            credential_id,
            submitter_id,
            evidence_url,
            submitted_at: now,
            status: ApprovalStatus::Pending,
            automated_check: Some(automated_check),
            review: None,
        };

        let stored = match self.repository.insert(request) {
            Ok(request) => request,
            Err(StoreError::Conflict) => return Err(ApprovalError::ReviewAlreadyQueued),
            Err(other) => return Err(other.into()),
        };
        info!(request = %stored.id.0, check = ?automated_check, "evidence queued for review");
        Ok(stored)
    }

    /// Decide a pending request. Approval demands every review criterion;
    /// a decided request cannot be overwritten.
    pub fn decide(
        &self,
        request_id: &ApprovalRequestId,
        form: ReviewForm,
        now: DateTime<Utc>,
    ) -> Result<ApprovalRequest, ApprovalError> {
        if form.score > MAX_REVIEW_SCORE {
            return Err(ApprovalError::ScoreOutOfRange(form.score));
        }
        if form.decision == ReviewDecision::Approve && !form.criteria.all_met() {
            return Err(ApprovalError::IncompleteReview {
                missing: form.criteria.missing(),
            });
        }

        let status = match form.decision {
            ReviewDecision::Approve => ApprovalStatus::Approved,
            ReviewDecision::Reject => ApprovalStatus::Rejected,
        };
        let review = ReviewRecord {
            reviewer_id: form.reviewer_id,
            score: form.score,
            criteria: form.criteria,
            comment: form.comment,
            reviewed_at: now,
        };

        let decided = match self.repository.complete(request_id, status, review) {
            Ok(request) => request,
            Err(StoreError::Conflict) => return Err(ApprovalError::AlreadyDecided),
            Err(StoreError::NotFound) => return Err(ApprovalError::NotFound),
            Err(other) => return Err(ApprovalError::Store(other)),
        };

        let verification = match decided.status {
            ApprovalStatus::Approved => VerificationState::Verified,
            _ => VerificationState::Rejected,
        };
        // A decided credential keeps its terminal state; only a pending one
        // may be flipped by this review.
        let credential = self
            .credentials
            .fetch(&decided.credential_id)?
            .ok_or(ApprovalError::NotFound)?;
        if credential.verification != VerificationState::PendingReview {
            return Err(ApprovalError::CredentialAlreadyReviewed);
        }
        self.credentials
            .set_verification(&decided.credential_id, verification)?;

        info!(
            request = %decided.id.0,
            credential = %decided.credential_id.0,
            status = decided.status.label(),
            "review decision recorded"
        );
        Ok(decided)
    }

    pub fn pending(&self) -> Result<Vec<ApprovalRequest>, ApprovalError> {
        Ok(self.repository.pending()?)
    }

    pub fn reviewed(&self) -> Result<Vec<ApprovalRequest>, ApprovalError> {
        Ok(self.repository.reviewed()?)
    }
}

/// Error raised by the approval workflow.
#[derive(Debug, thiserror::Error)]
pub enum ApprovalError {
    #[error("{0} must not be empty")]
    MissingField(&'static str),
    #[error("score {0} is outside the 0-100 range")]
    ScoreOutOfRange(u8),
    #[error("approval requires every criterion; missing: {missing:?}")]
    IncompleteReview { missing: Vec<&'static str> },
    #[error("request was already decided")]
    AlreadyDecided,
    #[error("a review for this credential is already pending")]
    ReviewAlreadyQueued,
    #[error("the linked credential already left review")]
    CredentialAlreadyReviewed,
    #[error("request not found")]
    NotFound,
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for ApprovalError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::NotFound => ApprovalError::NotFound,
            other => ApprovalError::Store(other),
        }
    }
}
