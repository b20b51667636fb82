use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;

use super::domain::{Credential, CredentialDraft, CredentialId, VerificationState};
use super::repository::CredentialRepository;
use crate::marketplace::store::StoreError;
use crate::marketplace::ActorId;

static CREDENTIAL_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_credential_id() -> CredentialId {
    let id = CREDENTIAL_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    CredentialId(format!("cred-{id:06}"))
}

/// Service facade for issuing and managing credentials.
pub struct CredentialService<R> {
    repository: Arc<R>,
}

impl<R> CredentialService<R>
where
    R: CredentialRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Register a new credential. It starts enabled but pending review, so it
    /// stays invisible to the matching engine until a reviewer approves it.
    pub fn issue(
        &self,
        draft: CredentialDraft,
        issued_at: NaiveDate,
    ) -> Result<Credential, CredentialError> {
        if draft.title.trim().is_empty() {
            return Err(CredentialError::MissingField("title"));
        }
        if draft.proof_reference.trim().is_empty() {
            return Err(CredentialError::MissingField("proof_reference"));
        }

        let issuer = draft
            .issuer
            .filter(|issuer| !issuer.trim().is_empty())
            .unwrap_or_else(|| draft.kind.default_issuer().to_string());

        let credential = Credential {
            id: next_credential_id(),
            owner_id: draft.owner_id,
            title: draft.title,
            issuer: Some(issuer),
            kind: draft.kind,
            proof_reference: draft.proof_reference,
            issued_at,
            enabled: true,
            verification: VerificationState::PendingReview,
        };

        Ok(self.repository.insert(credential)?)
    }

    /// Toggle whether a credential participates in matching. Owner only.
    pub fn set_enabled(
        &self,
        id: &CredentialId,
        actor: &ActorId,
        enabled: bool,
    ) -> Result<Credential, CredentialError> {
        let credential = self
            .repository
            .fetch(id)?
            .ok_or(CredentialError::NotFound)?;
        if credential.owner_id != *actor {
            return Err(CredentialError::NotOwner);
        }
        Ok(self.repository.set_enabled(id, enabled)?)
    }

    pub fn list(&self, owner: &ActorId) -> Result<Vec<Credential>, CredentialError> {
        Ok(self.repository.list_by_owner(owner)?)
    }

    pub fn get(&self, id: &CredentialId) -> Result<Credential, CredentialError> {
        self.repository.fetch(id)?.ok_or(CredentialError::NotFound)
    }
}

/// Error raised by the credential registry.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("{0} must not be empty")]
    MissingField(&'static str),
    #[error("only the credential owner may change enablement")]
    NotOwner,
    #[error("credential not found")]
    NotFound,
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for CredentialError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::NotFound => CredentialError::NotFound,
            other => CredentialError::Store(other),
        }
    }
}
