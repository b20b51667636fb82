//! Governance: member proposals with a fixed voting window, one ballot per
//! member, and a simple-majority tally once the window closes.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    GovernancePolicy, Proposal, ProposalCategory, ProposalDraft, ProposalFilter, ProposalId,
    ProposalStatus, Vote, VoteChoice, VoteId,
};
pub use repository::{BallotError, GovernanceRepository, InMemoryGovernanceRepository};
pub use router::governance_router;
pub use service::{GovernanceError, GovernanceService};
