use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};

use crate::marketplace::governance::domain::{
    GovernancePolicy, Proposal, ProposalCategory, ProposalDraft,
};
use crate::marketplace::governance::repository::InMemoryGovernanceRepository;
use crate::marketplace::governance::service::GovernanceService;
use crate::marketplace::ActorId;

pub(super) type TestGovernanceService = GovernanceService<InMemoryGovernanceRepository>;

pub(super) fn proposer() -> ActorId {
    ActorId("member-dana".to_string())
}

pub(super) fn member(name: &str) -> ActorId {
    ActorId(format!("member-{name}"))
}

pub(super) fn opened_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).single().expect("valid time")
}

pub(super) fn draft(voting_period_days: u32) -> ProposalDraft {
    ProposalDraft {
        proposer_id: proposer(),
        title: "Lower the listing fee".to_string(),
        description: "Cut the employer listing fee from 5% to 3%.".to_string(),
        category: ProposalCategory::Economics,
        voting_period_days,
    }
}

pub(super) fn build_service() -> (TestGovernanceService, Arc<InMemoryGovernanceRepository>) {
    let repository = Arc::new(InMemoryGovernanceRepository::default());
    let service = GovernanceService::new(repository.clone(), GovernancePolicy::default());
    (service, repository)
}

pub(super) fn open_proposal(service: &TestGovernanceService, days: u32) -> Proposal {
    service
        .create_proposal(draft(days), opened_at())
        .expect("proposal opens")
}
