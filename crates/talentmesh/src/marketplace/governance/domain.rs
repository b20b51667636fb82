use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::marketplace::ActorId;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProposalId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoteId(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalCategory {
    Platform,
    Governance,
    Economics,
    Security,
    Community,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalStatus {
    Active,
    Passed,
    Rejected,
}

impl ProposalStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ProposalStatus::Active => "active",
            ProposalStatus::Passed => "passed",
            ProposalStatus::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteChoice {
    For,
    Against,
}

/// A proposal open for ballots until `closes_at`, then settled by finalize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub id: ProposalId,
    pub proposer_id: ActorId,
    pub title: String,
    pub description: String,
    pub category: ProposalCategory,
    pub status: ProposalStatus,
    pub created_at: DateTime<Utc>,
    pub closes_at: DateTime<Utc>,
    pub votes_for: u32,
    pub votes_against: u32,
}

impl Proposal {
    pub fn total_votes(&self) -> u32 {
        self.votes_for + self.votes_against
    }

    /// Simple majority over the ballots cast. A tie or an empty ballot box
    /// does not pass.
    pub fn verdict(&self) -> ProposalStatus {
        if 2 * self.votes_for > self.total_votes() {
            ProposalStatus::Passed
        } else {
            ProposalStatus::Rejected
        }
    }
}

/// One member's ballot; unique per `(proposal, voter)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub id: VoteId,
    pub proposal_id: ProposalId,
    pub voter_id: ActorId,
    pub choice: VoteChoice,
    pub cast_at: DateTime<Utc>,
}

/// Member input for opening a proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalDraft {
    pub proposer_id: ActorId,
    pub title: String,
    pub description: String,
    pub category: ProposalCategory,
    pub voting_period_days: u32,
}

/// Filters for browsing proposals.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProposalFilter {
    #[serde(default)]
    pub status: Option<ProposalStatus>,
    #[serde(default)]
    pub category: Option<ProposalCategory>,
}

impl ProposalFilter {
    pub fn accepts(&self, proposal: &Proposal) -> bool {
        if let Some(status) = self.status {
            if proposal.status != status {
                return false;
            }
        }
        if let Some(category) = self.category {
            if proposal.category != category {
                return false;
            }
        }
        true
    }
}

/// Bounds on the voting window a proposer may pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GovernancePolicy {
    pub min_period_days: u32,
    pub max_period_days: u32,
}

impl Default for GovernancePolicy {
    fn default() -> Self {
        Self {
            min_period_days: 1,
            max_period_days: 30,
        }
    }
}

impl GovernancePolicy {
    pub fn allows(&self, days: u32) -> bool {
        (self.min_period_days..=self.max_period_days).contains(&days)
    }
}
