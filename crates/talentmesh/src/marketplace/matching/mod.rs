//! Matching engine: job postings, applications, the eligibility gate with its
//! weighted score, and the match lifecycle the two parties walk through.

pub mod domain;
pub mod evaluation;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Application, ApplicationId, ApplicationStatus, Availability, CandidateSnapshot, JobDraft,
    JobFilter, JobId, JobPosting, JobStatus, Match, MatchId, MatchStatus, SalaryRange,
};
pub use evaluation::{
    EligibilityFailure, EligibilityReport, MatchEvaluator, MatchPolicy, SkillRule,
};
pub use repository::{InMemoryMatchingRepository, MatchingRepository};
pub use router::matching_router;
pub use service::{ApplicationOutcome, MatchingError, MatchingService};
