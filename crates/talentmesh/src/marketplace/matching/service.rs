use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use super::domain::{
    Application, ApplicationId, ApplicationStatus, CandidateSnapshot, JobDraft, JobFilter, JobId,
    JobPosting, JobStatus, Match, MatchId, MatchStatus,
};
use super::evaluation::{EligibilityFailure, EligibilityReport, MatchEvaluator};
use super::repository::MatchingRepository;
use crate::marketplace::credentials::CredentialRepository;
use crate::marketplace::store::StoreError;
use crate::marketplace::ActorId;

static JOB_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static MATCH_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_job_id() -> JobId {
    let id = JOB_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    JobId(format!("job-{id:06}"))
}

fn next_application_id() -> ApplicationId {
    let id = APPLICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ApplicationId(format!("app-{id:06}"))
}

fn next_match_id() -> MatchId {
    let id = MATCH_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    MatchId(format!("match-{id:06}"))
}

/// Result of one application attempt. `matched` is set only when the
/// eligibility gate passed and a match was created.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationOutcome {
    pub application: Application,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched: Option<Match>,
    pub report: EligibilityReport,
}

/// Service composing the job board, the eligibility gate, and the match
/// lifecycle. Credential counts come straight from the registry so a toggle
/// or a review decision is visible to the next application immediately.
pub struct MatchingService<R, C> {
    repository: Arc<R>,
    credentials: Arc<C>,
    evaluator: MatchEvaluator,
}

impl<R, C> MatchingService<R, C>
where
    R: MatchingRepository + 'static,
    C: CredentialRepository + 'static,
{
    pub fn new(repository: Arc<R>, credentials: Arc<C>, evaluator: MatchEvaluator) -> Self {
        Self {
            repository,
            credentials,
            evaluator,
        }
    }

    /// Record a posting; `publish` in the draft decides whether it opens
    /// straight away or stays invisible to candidates.
    pub fn create_job(&self, draft: JobDraft, today: chrono::NaiveDate) -> Result<JobPosting, MatchingError> {
        if draft.title.trim().is_empty() {
            return Err(MatchingError::MissingField("title"));
        }
        if draft.description.trim().is_empty() {
            return Err(MatchingError::MissingField("description"));
        }

        let status = if draft.publish {
            JobStatus::Open
        } else {
            JobStatus::Draft
        };
        let job = JobPosting {
            id: next_job_id(),
            employer_id: draft.employer_id,
            title: draft.title,
            description: draft.description,
            required_skills: draft.required_skills,
            min_years: draft.min_years,
            min_verified_credentials: draft.min_verified_credentials,
            salary: draft.salary,
            status,
            posted_at: today,
        };

        let stored = self.repository.insert_job(job)?;
        info!(job = %stored.id.0, status = stored.status.label(), "job posting recorded");
        Ok(stored)
    }

    pub fn publish_job(&self, id: &JobId, employer: &ActorId) -> Result<JobPosting, MatchingError> {
        self.set_job_status(id, employer, JobStatus::Open)
    }

    pub fn close_job(&self, id: &JobId, employer: &ActorId) -> Result<JobPosting, MatchingError> {
        self.set_job_status(id, employer, JobStatus::Closed)
    }

    fn set_job_status(
        &self,
        id: &JobId,
        employer: &ActorId,
        status: JobStatus,
    ) -> Result<JobPosting, MatchingError> {
        let job = self.repository.fetch_job(id)?.ok_or(MatchingError::NotFound)?;
        if job.employer_id != *employer {
            return Err(MatchingError::NotOwner);
        }
        Ok(self.repository.update_job_status(id, status)?)
    }

    pub fn list_jobs(&self, filter: &JobFilter) -> Result<Vec<JobPosting>, MatchingError> {
        Ok(self.repository.list_jobs(filter)?)
    }

    pub fn get_job(&self, id: &JobId) -> Result<JobPosting, MatchingError> {
        self.repository.fetch_job(id)?.ok_or(MatchingError::NotFound)
    }

    /// Apply to an open job. The application is persisted before the gate
    /// runs, so an ineligible candidate still appears in the pending queue.
    pub fn apply(
        &self,
        job_id: &JobId,
        snapshot: CandidateSnapshot,
        now: DateTime<Utc>,
    ) -> Result<ApplicationOutcome, MatchingError> {
        let job = self.repository.fetch_job(job_id)?.ok_or(MatchingError::NotFound)?;
        if job.status != JobStatus::Open {
            return Err(MatchingError::JobNotOpen);
        }

        let matchable = self.credentials.matchable_count(&snapshot.candidate_id)?;

        let application = Application {
            id: next_application_id(),
            job_id: job.id.clone(),
            candidate_id: snapshot.candidate_id.clone(),
            status: ApplicationStatus::Pending,
            applied_at: now,
            match_id: None,
        };
        let application = match self.repository.insert_application(application) {
            Ok(application) => application,
            Err(StoreError::Conflict) => return Err(MatchingError::DuplicateApplication),
            Err(other) => return Err(other.into()),
        };

        let report = self.evaluator.evaluate(&job, &snapshot, matchable);
        if !report.is_eligible() {
            info!(
                application = %application.id.0,
                job = %job.id.0,
                failures = report.failures.len(),
                "application recorded, eligibility gate not passed"
            );
            return Err(MatchingError::NotEligible {
                failures: report.failures,
            });
        }

        let matched = Match {
            id: next_match_id(),
            job_id: job.id.clone(),
            candidate_id: snapshot.candidate_id.clone(),
            employer_id: job.employer_id.clone(),
            score: report.score,
            status: MatchStatus::Pending,
            matched_at: now,
            last_activity_at: None,
        };
        let (application, matched) = self
            .repository
            .promote_application(&application.id, matched)?;

        info!(
            application = %application.id.0,
            job = %job.id.0,
            score = matched.score,
            "candidate matched"
        );
        Ok(ApplicationOutcome {
            application,
            matched: Some(matched),
            report,
        })
    }

    pub fn applications_for(&self, candidate: &ActorId) -> Result<Vec<Application>, MatchingError> {
        Ok(self.repository.applications_for(candidate)?)
    }

    /// Employer passes on a pending application without a match.
    pub fn decline_application(
        &self,
        id: &ApplicationId,
        employer: &ActorId,
    ) -> Result<Application, MatchingError> {
        let application = self
            .repository
            .fetch_application(id)?
            .ok_or(MatchingError::NotFound)?;
        let job = self
            .repository
            .fetch_job(&application.job_id)?
            .ok_or(MatchingError::NotFound)?;
        if job.employer_id != *employer {
            return Err(MatchingError::NotOwner);
        }
        match self.repository.decline_application(id) {
            Ok(application) => Ok(application),
            Err(StoreError::Conflict) => Err(MatchingError::InvalidTransition {
                from: application.status.label(),
                to: ApplicationStatus::Rejected.label(),
            }),
            Err(other) => Err(other.into()),
        }
    }

    pub fn approve_match(
        &self,
        id: &MatchId,
        employer: &ActorId,
        now: DateTime<Utc>,
    ) -> Result<Match, MatchingError> {
        self.transition(id, employer, true, &[MatchStatus::Pending], MatchStatus::Accepted, now)
    }

    pub fn reject_match(
        &self,
        id: &MatchId,
        employer: &ActorId,
        now: DateTime<Utc>,
    ) -> Result<Match, MatchingError> {
        self.transition(id, employer, true, &[MatchStatus::Pending], MatchStatus::Closed, now)
    }

    /// Either party opens the conversation once the employer accepted.
    pub fn open_channel(
        &self,
        id: &MatchId,
        party: &ActorId,
        now: DateTime<Utc>,
    ) -> Result<Match, MatchingError> {
        self.transition(id, party, false, &[MatchStatus::Accepted], MatchStatus::Chatting, now)
    }

    pub fn close_match(
        &self,
        id: &MatchId,
        party: &ActorId,
        now: DateTime<Utc>,
    ) -> Result<Match, MatchingError> {
        self.transition(
            id,
            party,
            false,
            &[MatchStatus::Accepted, MatchStatus::Chatting],
            MatchStatus::Closed,
            now,
        )
    }

    fn transition(
        &self,
        id: &MatchId,
        actor: &ActorId,
        employer_only: bool,
        expected: &[MatchStatus],
        next: MatchStatus,
        now: DateTime<Utc>,
    ) -> Result<Match, MatchingError> {
        let matched = self.repository.fetch_match(id)?.ok_or(MatchingError::NotFound)?;
        let authorized = if employer_only {
            matched.employer_id == *actor
        } else {
            matched.involves(actor)
        };
        if !authorized {
            return Err(MatchingError::NotParticipant);
        }
        match self.repository.transition_match(id, expected, next, now) {
            Ok(matched) => {
                info!(matched = %matched.id.0, status = matched.status.label(), "match moved");
                Ok(matched)
            }
            Err(StoreError::Conflict) => Err(MatchingError::InvalidTransition {
                from: matched.status.label(),
                to: next.label(),
            }),
            Err(other) => Err(other.into()),
        }
    }

    pub fn matches_for(&self, party: &ActorId) -> Result<Vec<Match>, MatchingError> {
        Ok(self.repository.matches_for(party)?)
    }
}

/// Error raised by the matching engine.
#[derive(Debug, thiserror::Error)]
pub enum MatchingError {
    #[error("{0} must not be empty")]
    MissingField(&'static str),
    #[error("only the posting employer may do this")]
    NotOwner,
    #[error("job is not open for applications")]
    JobNotOpen,
    #[error("candidate already applied to this job")]
    DuplicateApplication,
    #[error("candidate does not meet the job requirements")]
    NotEligible { failures: Vec<EligibilityFailure> },
    #[error("cannot move from {from} to {to}")]
    InvalidTransition {
        from: &'static str,
        to: &'static str,
    },
    #[error("only a participant of the match may do this")]
    NotParticipant,
    #[error("record not found")]
    NotFound,
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for MatchingError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::NotFound => MatchingError::NotFound,
            other => MatchingError::Store(other),
        }
    }
}
