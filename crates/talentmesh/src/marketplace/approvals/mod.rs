//! Approval workflow: queues credential evidence for human review and records
//! accept/reject decisions with scores and comments.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;
pub mod verifier;

#[cfg(test)]
mod tests;

pub use domain::{
    ApprovalRequest, ApprovalRequestId, ApprovalStatus, CheckOutcome, ReviewCriteria,
    ReviewDecision, ReviewRecord,
};
pub use repository::{ApprovalRepository, InMemoryApprovalRepository};
pub use router::approval_router;
pub use service::{ApprovalError, ApprovalService, ReviewForm};
pub use verifier::{AcceptAllVerifier, EvidenceVerifier, FixedOutcomeVerifier};
