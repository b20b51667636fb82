use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::marketplace::approvals::domain::{CheckOutcome, ReviewCriteria, ReviewDecision};
use crate::marketplace::approvals::repository::InMemoryApprovalRepository;
use crate::marketplace::approvals::service::{ApprovalService, ReviewForm};
use crate::marketplace::approvals::verifier::FixedOutcomeVerifier;
use crate::marketplace::credentials::domain::{Credential, CredentialDraft, CredentialKind};
use crate::marketplace::credentials::repository::InMemoryCredentialRepository;
use crate::marketplace::credentials::service::CredentialService;
use crate::marketplace::ActorId;

pub(super) type TestApprovalService = ApprovalService<
    InMemoryApprovalRepository,
    InMemoryCredentialRepository,
    FixedOutcomeVerifier,
>;

pub(super) fn alice() -> ActorId {
    ActorId("user-alice".to_string())
}

pub(super) fn reviewer() -> ActorId {
    ActorId("approver-kim".to_string())
}

pub(super) fn review_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 4, 2, 9, 30, 0).single().expect("valid time")
}

pub(super) fn all_criteria() -> ReviewCriteria {
    ReviewCriteria {
        authentic: true,
        relevant: true,
        up_to_date: true,
        sufficient: true,
    }
}

pub(super) fn approve_form(score: u8, criteria: ReviewCriteria) -> ReviewForm {
    ReviewForm {
        reviewer_id: reviewer(),
        decision: ReviewDecision::Approve,
        criteria,
        score,
        comment: Some("solid evidence".to_string()),
    }
}

pub(super) fn reject_form(score: u8) -> ReviewForm {
    ReviewForm {
        reviewer_id: reviewer(),
        decision: ReviewDecision::Reject,
        criteria: ReviewCriteria {
            authentic: false,
            relevant: true,
            up_to_date: true,
            sufficient: false,
        },
        score,
        comment: Some("could not verify the issuer".to_string()),
    }
}

pub(super) fn build_service(
    check: CheckOutcome,
) -> (TestApprovalService, Arc<InMemoryCredentialRepository>, Credential) {
    let credential_store = Arc::new(InMemoryCredentialRepository::default());
    let credential_service = CredentialService::new(credential_store.clone());
    let credential = credential_service
        .issue(
            CredentialDraft {
                owner_id: alice(),
                kind: CredentialKind::Github,
                title: "Open Source Contributions".to_string(),
                issuer: None,
                proof_reference: "https://github.com/alice".to_string(),
            },
            NaiveDate::from_ymd_opt(2026, 1, 10).expect("valid date"),
        )
        .expect("credential issues");

    let service = ApprovalService::new(
        Arc::new(InMemoryApprovalRepository::default()),
        credential_store.clone(),
        Arc::new(FixedOutcomeVerifier::new(check)),
    );
    (service, credential_store, credential)
}
