use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::marketplace::credentials::domain::{CredentialDraft, CredentialKind, VerificationState};
use crate::marketplace::credentials::repository::{
    CredentialRepository, InMemoryCredentialRepository,
};
use crate::marketplace::credentials::service::CredentialService;
use crate::marketplace::matching::domain::{
    Availability, CandidateSnapshot, JobDraft, JobPosting, SalaryRange,
};
use crate::marketplace::matching::evaluation::{MatchEvaluator, MatchPolicy};
use crate::marketplace::matching::repository::InMemoryMatchingRepository;
use crate::marketplace::matching::service::MatchingService;
use crate::marketplace::ActorId;

pub(super) type TestMatchingService =
    MatchingService<InMemoryMatchingRepository, InMemoryCredentialRepository>;

pub(super) fn employer() -> ActorId {
    ActorId("org-acme".to_string())
}

pub(super) fn candidate() -> ActorId {
    ActorId("user-alice".to_string())
}

pub(super) fn posting_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 5, 4).expect("valid date")
}

pub(super) fn apply_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 6, 14, 0, 0).single().expect("valid time")
}

pub(super) fn skills(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|name| name.to_string()).collect()
}

pub(super) fn rust_job_draft() -> JobDraft {
    JobDraft {
        employer_id: employer(),
        title: "Senior Rust Engineer".to_string(),
        description: "Build and operate the settlement pipeline.".to_string(),
        required_skills: skills(&["Rust", "Anchor"]),
        min_years: Some(2),
        min_verified_credentials: Some(1),
        salary: Some(SalaryRange {
            min: 120_000,
            max: 180_000,
        }),
        publish: true,
    }
}

pub(super) fn snapshot(years: u32) -> CandidateSnapshot {
    CandidateSnapshot {
        candidate_id: candidate(),
        skills: skills(&["Rust", "Solidity"]),
        years_experience: years,
        availability: Availability::TwoWeeks,
    }
}

pub(super) fn build_service() -> (
    TestMatchingService,
    Arc<InMemoryMatchingRepository>,
    Arc<InMemoryCredentialRepository>,
) {
    let repository = Arc::new(InMemoryMatchingRepository::default());
    let credentials = Arc::new(InMemoryCredentialRepository::default());
    let service = MatchingService::new(
        repository.clone(),
        credentials.clone(),
        MatchEvaluator::new(MatchPolicy::default()),
    );
    (service, repository, credentials)
}

/// Seed one verified, enabled credential for the candidate.
pub(super) fn seed_verified_credential(store: &Arc<InMemoryCredentialRepository>) {
    let service = CredentialService::new(store.clone());
    let credential = service
        .issue(
            CredentialDraft {
                owner_id: candidate(),
                kind: CredentialKind::Cert,
                title: "Certified Rust Developer".to_string(),
                issuer: Some("Rust Foundation".to_string()),
                proof_reference: "cert:rust/associate/91be22c0".to_string(),
            },
            posting_date(),
        )
        .expect("credential issues");
    store
        .set_verification(&credential.id, VerificationState::Verified)
        .expect("verification set");
}

pub(super) fn open_job(service: &TestMatchingService) -> JobPosting {
    service
        .create_job(rust_job_draft(), posting_date())
        .expect("job posts")
}
