use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::marketplace::credentials::CredentialId;
use crate::marketplace::ActorId;

/// Identifier wrapper for review tasks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApprovalRequestId(pub String);

/// Review state. `Approved` and `Rejected` are terminal; there is no
/// resubmission path, a rejected credential must be re-issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApprovalStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApprovalStatus::Pending => "pending",
            ApprovalStatus::Approved => "approved",
            ApprovalStatus::Rejected => "rejected",
        }
    }
}

/// Terminal outcome of the automated evidence pre-check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckOutcome {
    Pass,
    Fail,
    Timeout,
}

/// Checklist a reviewer works through. Approval requires every box ticked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewCriteria {
    pub authentic: bool,
    pub relevant: bool,
    pub up_to_date: bool,
    pub sufficient: bool,
}

impl ReviewCriteria {
    pub fn all_met(&self) -> bool {
        self.authentic && self.relevant && self.up_to_date && self.sufficient
    }

    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !self.authentic {
            missing.push("authentic");
        }
        if !self.relevant {
            missing.push("relevant");
        }
        if !self.up_to_date {
            missing.push("up_to_date");
        }
        if !self.sufficient {
            missing.push("sufficient");
        }
        missing
    }
}

/// Reviewer input: which way the decision goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewDecision {
    Approve,
    Reject,
}

/// Outcome attached to a request once it leaves `Pending`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub reviewer_id: ActorId,
    pub score: u8,
    pub criteria: ReviewCriteria,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub reviewed_at: DateTime<Utc>,
}

/// A review task pairing a credential with submitted evidence. The `review`
/// field is present exactly when the status is no longer `Pending`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalRequest {
    pub id: ApprovalRequestId,
    pub credential_id: CredentialId,
    pub submitter_id: ActorId,
    pub evidence_url: String,
    pub submitted_at: DateTime<Utc>,
    pub status: ApprovalStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub automated_check: Option<CheckOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review: Option<ReviewRecord>,
}
