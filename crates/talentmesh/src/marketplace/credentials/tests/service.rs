use super::common::*;
use crate::marketplace::credentials::domain::{CredentialDraft, CredentialKind, VerificationState};
use crate::marketplace::credentials::repository::CredentialRepository;
use crate::marketplace::credentials::service::{CredentialError, CredentialService};
use crate::marketplace::ActorId;
use std::sync::Arc;

#[test]
fn issue_starts_pending_review_and_enabled() {
    let (service, _repository) = build_service();

    let credential = service
        .issue(draft(&alice()), issue_date())
        .expect("credential issues");

    assert!(credential.enabled);
    assert_eq!(credential.verification, VerificationState::PendingReview);
    assert!(
        !credential.is_matchable(),
        "unreviewed credentials must stay invisible to matching"
    );
}

#[test]
fn issue_rejects_blank_title_and_proof() {
    let (service, _repository) = build_service();

    let mut blank_title = draft(&alice());
    blank_title.title = "   ".to_string();
    assert!(matches!(
        service.issue(blank_title, issue_date()),
        Err(CredentialError::MissingField("title"))
    ));

    let mut blank_proof = draft(&alice());
    blank_proof.proof_reference = String::new();
    assert!(matches!(
        service.issue(blank_proof, issue_date()),
        Err(CredentialError::MissingField("proof_reference"))
    ));
}

#[test]
fn issue_defaults_issuer_by_kind() {
    let (service, _repository) = build_service();

    let github = service
        .issue(github_draft(&alice()), issue_date())
        .expect("github credential issues");
    assert_eq!(github.issuer.as_deref(), Some("GitHub"));

    let self_attested = service
        .issue(
            CredentialDraft {
                issuer: None,
                ..draft(&alice())
            },
            issue_date(),
        )
        .expect("cert credential issues");
    assert_eq!(self_attested.issuer.as_deref(), Some("Self-Attested"));
}

#[test]
fn only_owner_may_toggle_enablement() {
    let (service, _repository) = build_service();
    let credential = service
        .issue(draft(&alice()), issue_date())
        .expect("credential issues");

    let intruder = ActorId("user-mallory".to_string());
    assert!(matches!(
        service.set_enabled(&credential.id, &intruder, false),
        Err(CredentialError::NotOwner)
    ));

    let toggled = service
        .set_enabled(&credential.id, &alice(), false)
        .expect("owner may disable");
    assert!(!toggled.enabled);
}

#[test]
fn matchable_count_excludes_disabled_and_unverified() {
    let (service, repository) = build_service();

    let verified = service
        .issue(draft(&alice()), issue_date())
        .expect("first credential");
    repository
        .set_verification(&verified.id, VerificationState::Verified)
        .expect("mark verified");

    let disabled = service
        .issue(github_draft(&alice()), issue_date())
        .expect("second credential");
    repository
        .set_verification(&disabled.id, VerificationState::Verified)
        .expect("mark verified");
    service
        .set_enabled(&disabled.id, &alice(), false)
        .expect("owner disables");

    service
        .issue(
            CredentialDraft {
                kind: CredentialKind::Test,
                title: "Rust Skill Test".to_string(),
                proof_reference: "test:rust/advanced".to_string(),
                ..draft(&alice())
            },
            issue_date(),
        )
        .expect("third credential stays pending");

    assert_eq!(
        repository.matchable_count(&alice()).expect("count"),
        1,
        "only enabled and verified credentials count"
    );
}

#[test]
fn set_enabled_propagates_not_found() {
    let (service, _repository) = build_service();
    let missing = crate::marketplace::credentials::domain::CredentialId("cred-missing".to_string());
    assert!(matches!(
        service.set_enabled(&missing, &alice(), true),
        Err(CredentialError::NotFound)
    ));
}

#[test]
fn store_failures_surface_as_store_errors() {
    let service = CredentialService::new(Arc::new(UnavailableRepository));
    assert!(matches!(
        service.issue(draft(&alice()), issue_date()),
        Err(CredentialError::Store(_))
    ));
}
