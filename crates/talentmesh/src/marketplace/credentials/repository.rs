use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::domain::{Credential, CredentialId, VerificationState};
use crate::marketplace::store::StoreError;
use crate::marketplace::ActorId;

/// Storage abstraction for the credential registry.
pub trait CredentialRepository: Send + Sync {
    fn insert(&self, credential: Credential) -> Result<Credential, StoreError>;
    fn fetch(&self, id: &CredentialId) -> Result<Option<Credential>, StoreError>;
    fn set_enabled(&self, id: &CredentialId, enabled: bool) -> Result<Credential, StoreError>;
    fn set_verification(
        &self,
        id: &CredentialId,
        state: VerificationState,
    ) -> Result<Credential, StoreError>;
    fn list_by_owner(&self, owner: &ActorId) -> Result<Vec<Credential>, StoreError>;

    /// Count of credentials the matching engine may consider for an owner.
    fn matchable_count(&self, owner: &ActorId) -> Result<u32, StoreError> {
        Ok(self
            .list_by_owner(owner)?
            .iter()
            .filter(|credential| credential.is_matchable())
            .count() as u32)
    }
}

#[derive(Default, Clone)]
pub struct InMemoryCredentialRepository {
    records: Arc<Mutex<HashMap<CredentialId, Credential>>>,
}

impl CredentialRepository for InMemoryCredentialRepository {
    fn insert(&self, credential: Credential) -> Result<Credential, StoreError> {
        let mut guard = self.records.lock().expect("credential mutex poisoned");
        if guard.contains_key(&credential.id) {
            return Err(StoreError::Conflict);
        }
        guard.insert(credential.id.clone(), credential.clone());
        Ok(credential)
    }

    fn fetch(&self, id: &CredentialId) -> Result<Option<Credential>, StoreError> {
        let guard = self.records.lock().expect("credential mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn set_enabled(&self, id: &CredentialId, enabled: bool) -> Result<Credential, StoreError> {
        let mut guard = self.records.lock().expect("credential mutex poisoned");
        let credential = guard.get_mut(id).ok_or(StoreError::NotFound)?;
        credential.enabled = enabled;
        Ok(credential.clone())
    }

    fn set_verification(
        &self,
        id: &CredentialId,
        state: VerificationState,
    ) -> Result<Credential, StoreError> {
        let mut guard = self.records.lock().expect("credential mutex poisoned");
        let credential = guard.get_mut(id).ok_or(StoreError::NotFound)?;
        credential.verification = state;
        Ok(credential.clone())
    }

    fn list_by_owner(&self, owner: &ActorId) -> Result<Vec<Credential>, StoreError> {
        let guard = self.records.lock().expect("credential mutex poisoned");
        let mut credentials: Vec<Credential> = guard
            .values()
            .filter(|credential| credential.owner_id == *owner)
            .cloned()
            .collect();
        credentials.sort_by(|a, b| a.id.0.cmp(&b.id.0));
        Ok(credentials)
    }
}
