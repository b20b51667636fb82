use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::marketplace::ActorId;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchId(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Draft,
    Open,
    Closed,
}

impl JobStatus {
    pub const fn label(self) -> &'static str {
        match self {
            JobStatus::Draft => "draft",
            JobStatus::Open => "open",
            JobStatus::Closed => "closed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRange {
    pub min: u32,
    pub max: u32,
}

/// An employer's advertised opening with its eligibility requirements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: JobId,
    pub employer_id: ActorId,
    pub title: String,
    pub description: String,
    pub required_skills: BTreeSet<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_years: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_verified_credentials: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<SalaryRange>,
    pub status: JobStatus,
    pub posted_at: NaiveDate,
}

/// Employer input for creating a posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDraft {
    pub employer_id: ActorId,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub required_skills: BTreeSet<String>,
    #[serde(default)]
    pub min_years: Option<u32>,
    #[serde(default)]
    pub min_verified_credentials: Option<u32>,
    #[serde(default)]
    pub salary: Option<SalaryRange>,
    /// Publish immediately instead of saving a draft.
    #[serde(default)]
    pub publish: bool,
}

/// How soon a candidate can start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    Immediate,
    TwoWeeks,
    OneMonth,
}

impl Availability {
    pub const fn label(self) -> &'static str {
        match self {
            Availability::Immediate => "immediate",
            Availability::TwoWeeks => "two_weeks",
            Availability::OneMonth => "one_month",
        }
    }
}

/// Candidate-provided profile snapshot submitted with each application. The
/// credential side of eligibility is read from the registry, never from here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSnapshot {
    pub candidate_id: ActorId,
    #[serde(default)]
    pub skills: BTreeSet<String>,
    pub years_experience: u32,
    pub availability: Availability,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    Matched,
    Rejected,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Matched => "matched",
            ApplicationStatus::Rejected => "rejected",
        }
    }
}

/// One candidate's application to one job; unique per `(job, candidate)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    pub job_id: JobId,
    pub candidate_id: ActorId,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_id: Option<MatchId>,
}

/// Linear match lifecycle; no state is ever revisited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Pending,
    Accepted,
    Chatting,
    Closed,
}

impl MatchStatus {
    pub const fn label(self) -> &'static str {
        match self {
            MatchStatus::Pending => "pending",
            MatchStatus::Accepted => "accepted",
            MatchStatus::Chatting => "chatting",
            MatchStatus::Closed => "closed",
        }
    }
}

/// A mutually visible pairing between a candidate and a job posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub job_id: JobId,
    pub candidate_id: ActorId,
    pub employer_id: ActorId,
    pub score: u8,
    pub status: MatchStatus,
    pub matched_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_activity_at: Option<DateTime<Utc>>,
}

impl Match {
    pub fn involves(&self, party: &ActorId) -> bool {
        self.candidate_id == *party || self.employer_id == *party
    }
}

/// Filters for browsing the job board.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobFilter {
    /// Case-insensitive substring matched against required skills.
    #[serde(default)]
    pub skill: Option<String>,
    /// Keep postings whose experience requirement does not exceed this.
    #[serde(default)]
    pub max_min_years: Option<u32>,
    /// Restrict to open postings.
    #[serde(default)]
    pub open_only: bool,
}

impl JobFilter {
    pub fn accepts(&self, job: &JobPosting) -> bool {
        if self.open_only && job.status != JobStatus::Open {
            return false;
        }
        if let Some(limit) = self.max_min_years {
            if job.min_years.unwrap_or(0) > limit {
                return false;
            }
        }
        if let Some(query) = &self.skill {
            let query = query.to_lowercase();
            if !job
                .required_skills
                .iter()
                .any(|skill| skill.to_lowercase().contains(&query))
            {
                return false;
            }
        }
        true
    }
}
