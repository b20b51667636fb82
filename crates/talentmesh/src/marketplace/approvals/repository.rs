use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::domain::{ApprovalRequest, ApprovalRequestId, ApprovalStatus, ReviewRecord};
use crate::marketplace::store::StoreError;

/// Storage abstraction for review tasks.
///
/// `insert` and `complete` perform their checks and writes under one lock
/// acquisition so concurrent submissions or decisions cannot both win.
pub trait ApprovalRepository: Send + Sync {
    /// Queue a request. At most one pending request may exist per
    /// credential; a second one fails with `StoreError::Conflict`.
    fn insert(&self, request: ApprovalRequest) -> Result<ApprovalRequest, StoreError>;
    fn fetch(&self, id: &ApprovalRequestId) -> Result<Option<ApprovalRequest>, StoreError>;

    /// Move a pending request to a terminal status, attaching the review.
    /// Returns `StoreError::Conflict` when the request was already decided.
    fn complete(
        &self,
        id: &ApprovalRequestId,
        status: ApprovalStatus,
        review: ReviewRecord,
    ) -> Result<ApprovalRequest, StoreError>;

    fn pending(&self) -> Result<Vec<ApprovalRequest>, StoreError>;
    fn reviewed(&self) -> Result<Vec<ApprovalRequest>, StoreError>;
}

#[derive(Default, Clone)]
pub struct InMemoryApprovalRepository {
    records: Arc<Mutex<HashMap<ApprovalRequestId, ApprovalRequest>>>,
}

impl InMemoryApprovalRepository {
    fn collect_sorted<F>(&self, keep: F) -> Result<Vec<ApprovalRequest>, StoreError>
    where
        F: Fn(&ApprovalRequest) -> bool,
    {
        let guard = self.records.lock().expect("approval mutex poisoned");
        let mut requests: Vec<ApprovalRequest> =
            guard.values().filter(|request| keep(request)).cloned().collect();
        requests.sort_by(|a, b| a.submitted_at.cmp(&b.submitted_at));
        Ok(requests)
    }
}

impl ApprovalRepository for InMemoryApprovalRepository {
    fn insert(&self, request: ApprovalRequest) -> Result<ApprovalRequest, StoreError> {
        let mut guard = self.records.lock().expect("approval mutex poisoned");
        if guard.contains_key(&request.id) {
            return Err(StoreError::Conflict);
        }
        let already_queued = guard.values().any(|queued| {
            queued.credential_id == request.credential_id
                && queued.status == ApprovalStatus::Pending
        });
        if already_queued {
            return Err(StoreError::Conflict);
        }
        guard.insert(request.id.clone(), request.clone());
        Ok(request)
    }

    fn fetch(&self, id: &ApprovalRequestId) -> Result<Option<ApprovalRequest>, StoreError> {
        let guard = self.records.lock().expect("approval mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn complete(
        &self,
        id: &ApprovalRequestId,
        status: ApprovalStatus,
        review: ReviewRecord,
    ) -> Result<ApprovalRequest, StoreError> {
        let mut guard = self.records.lock().expect("approval mutex poisoned");
        let request = guard.get_mut(id).ok_or(StoreError::NotFound)?;
        if request.status != ApprovalStatus::Pending {
            return Err(StoreError::Conflict);
        }
        request.status = status;
        request.review = Some(review);
        Ok(request.clone())
    }

    fn pending(&self) -> Result<Vec<ApprovalRequest>, StoreError> {
        self.collect_sorted(|request| request.status == ApprovalStatus::Pending)
    }

    fn reviewed(&self) -> Result<Vec<ApprovalRequest>, StoreError> {
        self.collect_sorted(|request| request.status != ApprovalStatus::Pending)
    }
}
