mod config;
mod rules;

pub use config::{MatchPolicy, SkillRule};
pub use rules::{EligibilityFailure, MatchFactor, ScoreComponent};

use serde::{Deserialize, Serialize};

use super::domain::{CandidateSnapshot, JobPosting};

/// Stateless evaluator applying the match policy to a candidate and a job.
pub struct MatchEvaluator {
    policy: MatchPolicy,
}

impl MatchEvaluator {
    pub fn new(policy: MatchPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &MatchPolicy {
        &self.policy
    }

    /// Run the eligibility gate and compute the weighted score. The score is
    /// reported even for ineligible candidates so employers reviewing pending
    /// applications see the same number the candidate saw.
    pub fn evaluate(
        &self,
        job: &JobPosting,
        snapshot: &CandidateSnapshot,
        matchable_credentials: u32,
    ) -> EligibilityReport {
        rules::evaluate(job, snapshot, matchable_credentials, &self.policy)
    }
}

/// Outcome of one eligibility evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityReport {
    pub failures: Vec<EligibilityFailure>,
    pub score: u8,
    pub components: Vec<ScoreComponent>,
}

impl EligibilityReport {
    pub fn is_eligible(&self) -> bool {
        self.failures.is_empty()
    }
}
