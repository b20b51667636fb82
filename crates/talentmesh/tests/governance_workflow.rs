//! Proposal lifecycle over the service facade and the HTTP surface.

use std::sync::Arc;

use axum::body::to_bytes;
use axum::http::{Request, StatusCode};
use chrono::{Duration, TimeZone, Utc};
use tower::util::ServiceExt;

use talentmesh::marketplace::governance::{
    governance_router, GovernancePolicy, GovernanceService, InMemoryGovernanceRepository,
    ProposalCategory, ProposalDraft, ProposalStatus, VoteChoice,
};
use talentmesh::marketplace::ActorId;

fn build_service() -> Arc<GovernanceService<InMemoryGovernanceRepository>> {
    Arc::new(GovernanceService::new(
        Arc::new(InMemoryGovernanceRepository::default()),
        GovernancePolicy::default(),
    ))
}

#[test]
fn proposal_settles_by_simple_majority() {
    let service = build_service();
    let opened = Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).single().expect("valid time");

    let proposal = service
        .create_proposal(
            ProposalDraft {
                proposer_id: ActorId("member-dana".to_string()),
                title: "Adopt quarterly fee reviews".to_string(),
                description: "Review platform fees every quarter.".to_string(),
                category: ProposalCategory::Governance,
                voting_period_days: 7,
            },
            opened,
        )
        .expect("proposal opens");

    let cast_at = opened + Duration::days(1);
    for (name, choice) in [
        ("ada", VoteChoice::For),
        ("bryn", VoteChoice::For),
        ("caro", VoteChoice::Against),
    ] {
        service
            .cast_vote(
                &proposal.id,
                ActorId(format!("member-{name}")),
                choice,
                cast_at,
            )
            .expect("ballot lands");
    }

    let settled = service
        .finalize(&proposal.id, opened + Duration::days(7))
        .expect("settles");
    assert_eq!(settled.status, ProposalStatus::Passed);
    assert_eq!(settled.votes_for, 2);
    assert_eq!(settled.votes_against, 1);

    let ballots = service.votes(&proposal.id).expect("ballots listed");
    assert_eq!(ballots.len(), 3);
}

#[tokio::test]
async fn creating_a_proposal_over_http_returns_an_active_record() {
    let router = governance_router(build_service());

    let body = serde_json::json!({
        "proposer_id": "member-dana",
        "title": "Add a security council",
        "description": "Stand up a rotating security council.",
        "category": "security",
        "voting_period_days": 14
    });
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/proposals")
                .header("content-type", "application/json")
                .body(axum::body::Body::from(body.to_string()))
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::CREATED);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body reads");
    let stored: serde_json::Value = serde_json::from_slice(&bytes).expect("valid json");
    assert_eq!(stored["status"], "active");
    assert_eq!(stored["votes_for"], 0);
}

#[tokio::test]
async fn out_of_range_period_is_unprocessable_over_http() {
    let router = governance_router(build_service());

    let body = serde_json::json!({
        "proposer_id": "member-dana",
        "title": "Eternal vote",
        "description": "Keep voting open for a year.",
        "category": "community",
        "voting_period_days": 365
    });
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/proposals")
                .header("content-type", "application/json")
                .body(axum::body::Body::from(body.to_string()))
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
