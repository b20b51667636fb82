use std::sync::Arc;

use chrono::NaiveDate;

use crate::marketplace::credentials::domain::{Credential, CredentialDraft, CredentialKind};
use crate::marketplace::credentials::repository::{
    CredentialRepository, InMemoryCredentialRepository,
};
use crate::marketplace::credentials::service::CredentialService;
use crate::marketplace::store::StoreError;
use crate::marketplace::ActorId;

pub(super) fn alice() -> ActorId {
    ActorId("user-alice".to_string())
}

pub(super) fn issue_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 14).expect("valid date")
}

pub(super) fn draft(owner: &ActorId) -> CredentialDraft {
    CredentialDraft {
        owner_id: owner.clone(),
        kind: CredentialKind::Cert,
        title: "AWS Certified Solutions Architect".to_string(),
        issuer: Some("Amazon Web Services".to_string()),
        proof_reference: "cert:aws/solutions-architect/7f9fade1".to_string(),
    }
}

pub(super) fn github_draft(owner: &ActorId) -> CredentialDraft {
    CredentialDraft {
        owner_id: owner.clone(),
        kind: CredentialKind::Github,
        title: "Open Source Contributions".to_string(),
        issuer: None,
        proof_reference: "https://github.com/alice".to_string(),
    }
}

pub(super) fn build_service() -> (
    CredentialService<InMemoryCredentialRepository>,
    Arc<InMemoryCredentialRepository>,
) {
    let repository = Arc::new(InMemoryCredentialRepository::default());
    let service = CredentialService::new(repository.clone());
    (service, repository)
}

pub(super) struct UnavailableRepository;

impl CredentialRepository for UnavailableRepository {
    fn insert(&self, _credential: Credential) -> Result<Credential, StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }

    fn fetch(
        &self,
        _id: &crate::marketplace::credentials::domain::CredentialId,
    ) -> Result<Option<Credential>, StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }

    fn set_enabled(
        &self,
        _id: &crate::marketplace::credentials::domain::CredentialId,
        _enabled: bool,
    ) -> Result<Credential, StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }

    fn set_verification(
        &self,
        _id: &crate::marketplace::credentials::domain::CredentialId,
        _state: crate::marketplace::credentials::domain::VerificationState,
    ) -> Result<Credential, StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }

    fn list_by_owner(&self, _owner: &ActorId) -> Result<Vec<Credential>, StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }
}
