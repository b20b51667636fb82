//! Credential registry: verifiable claims a candidate holds and whether each
//! one is currently usable in matching.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{Credential, CredentialDraft, CredentialId, CredentialKind, VerificationState};
pub use repository::{CredentialRepository, InMemoryCredentialRepository};
pub use router::credential_router;
pub use service::{CredentialError, CredentialService};
