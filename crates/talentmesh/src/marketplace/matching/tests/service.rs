use chrono::Duration;

use super::common::{
    apply_time, build_service, candidate, employer, open_job, posting_date, rust_job_draft,
    seed_verified_credential, snapshot,
};
use crate::marketplace::credentials::repository::CredentialRepository;
use crate::marketplace::matching::domain::{ApplicationStatus, JobDraft, JobStatus, MatchStatus};
use crate::marketplace::matching::repository::MatchingRepository;
use crate::marketplace::matching::service::MatchingError;
use crate::marketplace::ActorId;

#[test]
fn draft_postings_stay_invisible_until_published() {
    let (service, _, _) = build_service();
    let draft = JobDraft {
        publish: false,
        ..rust_job_draft()
    };
    let job = service.create_job(draft, posting_date()).expect("job posts");
    assert_eq!(job.status, JobStatus::Draft);

    let published = service
        .publish_job(&job.id, &employer())
        .expect("employer publishes");
    assert_eq!(published.status, JobStatus::Open);
}

#[test]
fn blank_title_is_rejected() {
    let (service, _, _) = build_service();
    let draft = JobDraft {
        title: "   ".to_string(),
        ..rust_job_draft()
    };
    let error = service.create_job(draft, posting_date()).unwrap_err();
    assert!(matches!(error, MatchingError::MissingField("title")));
}

#[test]
fn only_the_posting_employer_may_close() {
    let (service, _, _) = build_service();
    let job = open_job(&service);

    let error = service
        .close_job(&job.id, &ActorId("org-rival".to_string()))
        .unwrap_err();
    assert!(matches!(error, MatchingError::NotOwner));
}

#[test]
fn qualified_application_creates_a_pending_match() {
    let (service, _, credentials) = build_service();
    seed_verified_credential(&credentials);
    let job = open_job(&service);

    let outcome = service
        .apply(&job.id, snapshot(4), apply_time())
        .expect("application matches");

    assert_eq!(outcome.application.status, ApplicationStatus::Matched);
    let matched = outcome.matched.expect("match created");
    assert_eq!(matched.status, MatchStatus::Pending);
    assert_eq!(matched.employer_id, employer());
    assert_eq!(matched.candidate_id, candidate());
    assert_eq!(matched.score, outcome.report.score);
    assert_eq!(outcome.application.match_id, Some(matched.id));
}

#[test]
fn unqualified_application_is_kept_pending() {
    let (service, repository, credentials) = build_service();
    seed_verified_credential(&credentials);
    let job = open_job(&service);

    let error = service.apply(&job.id, snapshot(1), apply_time()).unwrap_err();
    assert!(matches!(error, MatchingError::NotEligible { .. }));

    let applications = repository
        .applications_for(&candidate())
        .expect("listing works");
    assert_eq!(applications.len(), 1);
    assert_eq!(applications[0].status, ApplicationStatus::Pending);
    assert!(applications[0].match_id.is_none());
}

#[test]
fn second_application_to_the_same_job_is_refused() {
    let (service, _, credentials) = build_service();
    seed_verified_credential(&credentials);
    let job = open_job(&service);

    service
        .apply(&job.id, snapshot(4), apply_time())
        .expect("first application matches");
    let error = service
        .apply(&job.id, snapshot(4), apply_time() + Duration::hours(1))
        .unwrap_err();
    assert!(matches!(error, MatchingError::DuplicateApplication));
}

#[test]
fn disabled_credential_does_not_count_towards_the_gate() {
    let (service, _, credentials) = build_service();
    seed_verified_credential(&credentials);
    for credential in credentials.list_by_owner(&candidate()).expect("listing works") {
        credentials
            .set_enabled(&credential.id, false)
            .expect("toggle works");
    }
    let job = open_job(&service);

    let error = service.apply(&job.id, snapshot(4), apply_time()).unwrap_err();
    let MatchingError::NotEligible { failures } = error else {
        panic!("expected an eligibility failure");
    };
    assert_eq!(failures.len(), 1);
}

#[test]
fn closed_jobs_refuse_applications() {
    let (service, _, credentials) = build_service();
    seed_verified_credential(&credentials);
    let job = open_job(&service);
    service.close_job(&job.id, &employer()).expect("job closes");

    let error = service.apply(&job.id, snapshot(4), apply_time()).unwrap_err();
    assert!(matches!(error, MatchingError::JobNotOpen));
}

#[test]
fn employer_declines_a_pending_application_once() {
    let (service, _, credentials) = build_service();
    seed_verified_credential(&credentials);
    let job = open_job(&service);
    service.apply(&job.id, snapshot(1), apply_time()).unwrap_err();

    let applications = service
        .applications_for(&candidate())
        .expect("listing works");
    let id = applications[0].id.clone();

    let declined = service
        .decline_application(&id, &employer())
        .expect("decline works");
    assert_eq!(declined.status, ApplicationStatus::Rejected);

    let error = service.decline_application(&id, &employer()).unwrap_err();
    assert!(matches!(error, MatchingError::InvalidTransition { .. }));
}

#[test]
fn job_board_filters_compose() {
    let (service, _, _) = build_service();
    let job = open_job(&service);
    let other = JobDraft {
        title: "Data Engineer".to_string(),
        required_skills: super::common::skills(&["Python"]),
        min_years: Some(6),
        ..rust_job_draft()
    };
    service.create_job(other, posting_date()).expect("job posts");

    let filter = crate::marketplace::matching::domain::JobFilter {
        skill: Some("rust".to_string()),
        max_min_years: Some(3),
        open_only: true,
    };
    let jobs = service.list_jobs(&filter).expect("listing works");
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].id, job.id);
}
