use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use thiserror::Error;

use super::domain::{Proposal, ProposalFilter, ProposalId, ProposalStatus, Vote, VoteChoice};
use crate::marketplace::store::StoreError;
use crate::marketplace::ActorId;

/// Errors a ballot can run into inside the store. Each variant corresponds
/// to a check the store performs under its own lock, so two racing ballots
/// can never both pass the duplicate or deadline check.
#[derive(Debug, Error)]
pub enum BallotError {
    #[error("voting on this proposal has closed")]
    Closed,
    #[error("member already voted on this proposal")]
    Duplicate,
    #[error("proposal not found")]
    UnknownProposal,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Storage abstraction for proposals and their ballots.
pub trait GovernanceRepository: Send + Sync {
    fn insert(&self, proposal: Proposal) -> Result<Proposal, StoreError>;
    fn fetch(&self, id: &ProposalId) -> Result<Option<Proposal>, StoreError>;
    fn list(&self, filter: &ProposalFilter) -> Result<Vec<Proposal>, StoreError>;

    /// Record a ballot and bump the tally in one step. Refuses ballots on
    /// closed or expired proposals and second ballots from the same member.
    fn record_vote(&self, vote: Vote, now: DateTime<Utc>) -> Result<Proposal, BallotError>;

    /// Settle a proposal whose window has passed. Settling twice returns the
    /// proposal unchanged; settling early fails with `Conflict`.
    fn finalize(&self, id: &ProposalId, now: DateTime<Utc>) -> Result<Proposal, StoreError>;

    fn votes_for_proposal(&self, id: &ProposalId) -> Result<Vec<Vote>, StoreError>;
}

#[derive(Default)]
struct GovernanceState {
    proposals: HashMap<ProposalId, Proposal>,
    votes: HashMap<ProposalId, Vec<Vote>>,
    voters: HashMap<ProposalId, HashSet<ActorId>>,
}

#[derive(Default, Clone)]
pub struct InMemoryGovernanceRepository {
    state: Arc<Mutex<GovernanceState>>,
}

impl GovernanceRepository for InMemoryGovernanceRepository {
    fn insert(&self, proposal: Proposal) -> Result<Proposal, StoreError> {
        let mut guard = self.state.lock().expect("governance mutex poisoned");
        if guard.proposals.contains_key(&proposal.id) {
            return Err(StoreError::Conflict);
        }
        guard.proposals.insert(proposal.id.clone(), proposal.clone());
        Ok(proposal)
    }

    fn fetch(&self, id: &ProposalId) -> Result<Option<Proposal>, StoreError> {
        let guard = self.state.lock().expect("governance mutex poisoned");
        Ok(guard.proposals.get(id).cloned())
    }

    fn list(&self, filter: &ProposalFilter) -> Result<Vec<Proposal>, StoreError> {
        let guard = self.state.lock().expect("governance mutex poisoned");
        let mut proposals: Vec<Proposal> = guard
            .proposals
            .values()
            .filter(|proposal| filter.accepts(proposal))
            .cloned()
            .collect();
        proposals.sort_by(|a, b| a.id.0.cmp(&b.id.0));
        Ok(proposals)
    }

    fn record_vote(&self, vote: Vote, now: DateTime<Utc>) -> Result<Proposal, BallotError> {
        let mut guard = self.state.lock().expect("governance mutex poisoned");
        let proposal = guard
            .proposals
            .get(&vote.proposal_id)
            .ok_or(BallotError::UnknownProposal)?;
        if proposal.status != ProposalStatus::Active || now >= proposal.closes_at {
            return Err(BallotError::Closed);
        }
        let voters = guard.voters.entry(vote.proposal_id.clone()).or_default();
        if !voters.insert(vote.voter_id.clone()) {
            return Err(BallotError::Duplicate);
        }

        let proposal = guard
            .proposals
            .get_mut(&vote.proposal_id)
            .expect("proposal checked above");
        match vote.choice {
            VoteChoice::For => proposal.votes_for += 1,
            VoteChoice::Against => proposal.votes_against += 1,
        }
        let proposal = proposal.clone();
        guard.votes.entry(vote.proposal_id.clone()).or_default().push(vote);
        Ok(proposal)
    }

    fn finalize(&self, id: &ProposalId, now: DateTime<Utc>) -> Result<Proposal, StoreError> {
        let mut guard = self.state.lock().expect("governance mutex poisoned");
        let proposal = guard.proposals.get_mut(id).ok_or(StoreError::NotFound)?;
        if proposal.status != ProposalStatus::Active {
            return Ok(proposal.clone());
        }
        if now < proposal.closes_at {
            return Err(StoreError::Conflict);
        }
        proposal.status = proposal.verdict();
        Ok(proposal.clone())
    }

    fn votes_for_proposal(&self, id: &ProposalId) -> Result<Vec<Vote>, StoreError> {
        let guard = self.state.lock().expect("governance mutex poisoned");
        Ok(guard.votes.get(id).cloned().unwrap_or_default())
    }
}
