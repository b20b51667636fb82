use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::info;

use super::domain::{
    GovernancePolicy, Proposal, ProposalDraft, ProposalFilter, ProposalId, ProposalStatus, Vote,
    VoteChoice, VoteId,
};
use super::repository::{BallotError, GovernanceRepository};
use crate::marketplace::store::StoreError;
use crate::marketplace::ActorId;

static PROPOSAL_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static VOTE_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_proposal_id() -> ProposalId {
    let id = PROPOSAL_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ProposalId(format!("prop-{id:06}"))
}

fn next_vote_id() -> VoteId {
    let id = VOTE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    VoteId(format!("vote-{id:06}"))
}

/// Service running the proposal lifecycle against the policy bounds.
pub struct GovernanceService<R> {
    repository: Arc<R>,
    policy: GovernancePolicy,
}

impl<R> GovernanceService<R>
where
    R: GovernanceRepository + 'static,
{
    pub fn new(repository: Arc<R>, policy: GovernancePolicy) -> Self {
        Self { repository, policy }
    }

    /// Open a proposal with a voting window measured in whole days.
    pub fn create_proposal(
        &self,
        draft: ProposalDraft,
        now: DateTime<Utc>,
    ) -> Result<Proposal, GovernanceError> {
        if draft.title.trim().is_empty() {
            return Err(GovernanceError::MissingField("title"));
        }
        if draft.description.trim().is_empty() {
            return Err(GovernanceError::MissingField("description"));
        }
        if !self.policy.allows(draft.voting_period_days) {
            return Err(GovernanceError::PeriodOutOfRange(draft.voting_period_days));
        }

        let proposal = Proposal {
            id: next_proposal_id(),
            proposer_id: draft.proposer_id,
            title: draft.title,
            description: draft.description,
            category: draft.category,
            status: ProposalStatus::Active,
            created_at: now,
            closes_at: now + Duration::days(i64::from(draft.voting_period_days)),
            votes_for: 0,
            votes_against: 0,
        };
        let stored = self.repository.insert(proposal)?;
        info!(proposal = %stored.id.0, closes = %stored.closes_at, "proposal opened");
        Ok(stored)
    }

    /// Record one member's ballot. The duplicate and deadline checks run
    /// inside the store so racing ballots settle to exactly one winner.
    pub fn cast_vote(
        &self,
        proposal_id: &ProposalId,
        voter_id: ActorId,
        choice: VoteChoice,
        now: DateTime<Utc>,
    ) -> Result<Proposal, GovernanceError> {
        let vote = Vote {
            id: next_vote_id(),
            proposal_id: proposal_id.clone(),
            voter_id,
            choice,
            cast_at: now,
        };
        let proposal = match self.repository.record_vote(vote, now) {
            Ok(proposal) => proposal,
            Err(BallotError::Closed) => return Err(GovernanceError::ProposalClosed),
            Err(BallotError::Duplicate) => return Err(GovernanceError::DuplicateVote),
            Err(BallotError::UnknownProposal) => return Err(GovernanceError::NotFound),
            Err(BallotError::Unavailable(reason)) => {
                return Err(GovernanceError::Store(StoreError::Unavailable(reason)))
            }
        };
        info!(
            proposal = %proposal.id.0,
            tally = proposal.total_votes(),
            "ballot recorded"
        );
        Ok(proposal)
    }

    /// Settle a proposal whose window has closed. Safe to call repeatedly;
    /// the first settlement wins and later calls return it unchanged.
    pub fn finalize(
        &self,
        proposal_id: &ProposalId,
        now: DateTime<Utc>,
    ) -> Result<Proposal, GovernanceError> {
        let proposal = match self.repository.finalize(proposal_id, now) {
            Ok(proposal) => proposal,
            Err(StoreError::Conflict) => return Err(GovernanceError::StillOpen),
            Err(other) => return Err(other.into()),
        };
        info!(
            proposal = %proposal.id.0,
            status = proposal.status.label(),
            "proposal settled"
        );
        Ok(proposal)
    }

    pub fn list(&self, filter: &ProposalFilter) -> Result<Vec<Proposal>, GovernanceError> {
        Ok(self.repository.list(filter)?)
    }

    pub fn get(&self, proposal_id: &ProposalId) -> Result<Proposal, GovernanceError> {
        self.repository
            .fetch(proposal_id)?
            .ok_or(GovernanceError::NotFound)
    }

    pub fn votes(&self, proposal_id: &ProposalId) -> Result<Vec<Vote>, GovernanceError> {
        Ok(self.repository.votes_for_proposal(proposal_id)?)
    }
}

/// Error raised by the governance workflow.
#[derive(Debug, thiserror::Error)]
pub enum GovernanceError {
    #[error("{0} must not be empty")]
    MissingField(&'static str),
    #[error("voting period of {0} day(s) is outside the allowed range")]
    PeriodOutOfRange(u32),
    #[error("voting on this proposal has closed")]
    ProposalClosed,
    #[error("member already voted on this proposal")]
    DuplicateVote,
    #[error("voting window has not closed yet")]
    StillOpen,
    #[error("proposal not found")]
    NotFound,
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for GovernanceError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::NotFound => GovernanceError::NotFound,
            other => GovernanceError::Store(other),
        }
    }
}
