use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};

use super::domain::{
    Application, ApplicationId, ApplicationStatus, JobFilter, JobId, JobPosting, JobStatus, Match,
    MatchId, MatchStatus,
};
use crate::marketplace::store::StoreError;
use crate::marketplace::ActorId;

/// Storage abstraction for jobs, applications, and matches. Methods that
/// check and mutate in the same call hold one lock for the whole operation.
pub trait MatchingRepository: Send + Sync {
    fn insert_job(&self, job: JobPosting) -> Result<JobPosting, StoreError>;
    fn fetch_job(&self, id: &JobId) -> Result<Option<JobPosting>, StoreError>;
    fn update_job_status(&self, id: &JobId, status: JobStatus) -> Result<JobPosting, StoreError>;
    fn list_jobs(&self, filter: &JobFilter) -> Result<Vec<JobPosting>, StoreError>;

    /// Insert an application, rejecting a second one for the same
    /// `(job, candidate)` pair with `Conflict`.
    fn insert_application(&self, application: Application) -> Result<Application, StoreError>;
    fn fetch_application(&self, id: &ApplicationId) -> Result<Option<Application>, StoreError>;
    fn applications_for(&self, candidate: &ActorId) -> Result<Vec<Application>, StoreError>;

    /// Mark an application matched and store its match in one step. Fails
    /// with `Conflict` if the application already left the pending state.
    fn promote_application(
        &self,
        application_id: &ApplicationId,
        matched: Match,
    ) -> Result<(Application, Match), StoreError>;

    /// Mark a pending application rejected. `Conflict` if already settled.
    fn decline_application(&self, id: &ApplicationId) -> Result<Application, StoreError>;

    fn fetch_match(&self, id: &MatchId) -> Result<Option<Match>, StoreError>;

    /// Move a match to `next` if its current status is listed in `expected`,
    /// stamping the activity time. `Conflict` on any other current status.
    fn transition_match(
        &self,
        id: &MatchId,
        expected: &[MatchStatus],
        next: MatchStatus,
        at: DateTime<Utc>,
    ) -> Result<Match, StoreError>;

    fn matches_for(&self, party: &ActorId) -> Result<Vec<Match>, StoreError>;
}

#[derive(Default)]
struct MatchingState {
    jobs: HashMap<JobId, JobPosting>,
    applications: HashMap<ApplicationId, Application>,
    application_index: HashMap<(String, String), ApplicationId>,
    matches: HashMap<MatchId, Match>,
}

#[derive(Default, Clone)]
pub struct InMemoryMatchingRepository {
    state: Arc<Mutex<MatchingState>>,
}

impl InMemoryMatchingRepository {
    fn pair_key(application: &Application) -> (String, String) {
        (application.job_id.0.clone(), application.candidate_id.0.clone())
    }
}

impl MatchingRepository for InMemoryMatchingRepository {
    fn insert_job(&self, job: JobPosting) -> Result<JobPosting, StoreError> {
        let mut guard = self.state.lock().expect("matching mutex poisoned");
        if guard.jobs.contains_key(&job.id) {
            return Err(StoreError::Conflict);
        }
        guard.jobs.insert(job.id.clone(), job.clone());
        Ok(job)
    }

    fn fetch_job(&self, id: &JobId) -> Result<Option<JobPosting>, StoreError> {
        let guard = self.state.lock().expect("matching mutex poisoned");
        Ok(guard.jobs.get(id).cloned())
    }

    fn update_job_status(&self, id: &JobId, status: JobStatus) -> Result<JobPosting, StoreError> {
        let mut guard = self.state.lock().expect("matching mutex poisoned");
        let job = guard.jobs.get_mut(id).ok_or(StoreError::NotFound)?;
        job.status = status;
        Ok(job.clone())
    }

    fn list_jobs(&self, filter: &JobFilter) -> Result<Vec<JobPosting>, StoreError> {
        let guard = self.state.lock().expect("matching mutex poisoned");
        let mut jobs: Vec<JobPosting> = guard
            .jobs
            .values()
            .filter(|job| filter.accepts(job))
            .cloned()
            .collect();
        jobs.sort_by(|a, b| a.id.0.cmp(&b.id.0));
        Ok(jobs)
    }

    fn insert_application(&self, application: Application) -> Result<Application, StoreError> {
        let mut guard = self.state.lock().expect("matching mutex poisoned");
        let key = Self::pair_key(&application);
        if guard.application_index.contains_key(&key) {
            return Err(StoreError::Conflict);
        }
        guard.application_index.insert(key, application.id.clone());
        guard
            .applications
            .insert(application.id.clone(), application.clone());
        Ok(application)
    }

    fn fetch_application(&self, id: &ApplicationId) -> Result<Option<Application>, StoreError> {
        let guard = self.state.lock().expect("matching mutex poisoned");
        Ok(guard.applications.get(id).cloned())
    }

    fn applications_for(&self, candidate: &ActorId) -> Result<Vec<Application>, StoreError> {
        let guard = self.state.lock().expect("matching mutex poisoned");
        let mut applications: Vec<Application> = guard
            .applications
            .values()
            .filter(|application| application.candidate_id == *candidate)
            .cloned()
            .collect();
        applications.sort_by(|a, b| a.id.0.cmp(&b.id.0));
        Ok(applications)
    }

    fn promote_application(
        &self,
        application_id: &ApplicationId,
        matched: Match,
    ) -> Result<(Application, Match), StoreError> {
        let mut guard = self.state.lock().expect("matching mutex poisoned");
        let application = guard
            .applications
            .get_mut(application_id)
            .ok_or(StoreError::NotFound)?;
        if application.status != ApplicationStatus::Pending {
            return Err(StoreError::Conflict);
        }
        application.status = ApplicationStatus::Matched;
        application.match_id = Some(matched.id.clone());
        let application = application.clone();
        guard.matches.insert(matched.id.clone(), matched.clone());
        Ok((application, matched))
    }

    fn decline_application(&self, id: &ApplicationId) -> Result<Application, StoreError> {
        let mut guard = self.state.lock().expect("matching mutex poisoned");
        let application = guard.applications.get_mut(id).ok_or(StoreError::NotFound)?;
        if application.status != ApplicationStatus::Pending {
            return Err(StoreError::Conflict);
        }
        application.status = ApplicationStatus::Rejected;
        Ok(application.clone())
    }

    fn fetch_match(&self, id: &MatchId) -> Result<Option<Match>, StoreError> {
        let guard = self.state.lock().expect("matching mutex poisoned");
        Ok(guard.matches.get(id).cloned())
    }

    fn transition_match(
        &self,
        id: &MatchId,
        expected: &[MatchStatus],
        next: MatchStatus,
        at: DateTime<Utc>,
    ) -> Result<Match, StoreError> {
        let mut guard = self.state.lock().expect("matching mutex poisoned");
        let matched = guard.matches.get_mut(id).ok_or(StoreError::NotFound)?;
        if !expected.contains(&matched.status) {
            return Err(StoreError::Conflict);
        }
        matched.status = next;
        matched.last_activity_at = Some(at);
        Ok(matched.clone())
    }

    fn matches_for(&self, party: &ActorId) -> Result<Vec<Match>, StoreError> {
        let guard = self.state.lock().expect("matching mutex poisoned");
        let mut matches: Vec<Match> = guard
            .matches
            .values()
            .filter(|matched| matched.involves(party))
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.id.0.cmp(&b.id.0));
        Ok(matches)
    }
}
