use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::marketplace::ActorId;

/// Identifier wrapper for registered credentials.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CredentialId(pub String);

/// Kind of claim a credential encodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CredentialKind {
    Cert,
    Github,
    Test,
}

impl CredentialKind {
    pub const fn label(self) -> &'static str {
        match self {
            CredentialKind::Cert => "CERT",
            CredentialKind::Github => "GITHUB",
            CredentialKind::Test => "TEST",
        }
    }

    /// Issuer recorded when the owner does not name one.
    pub const fn default_issuer(self) -> &'static str {
        match self {
            CredentialKind::Github => "GitHub",
            CredentialKind::Cert | CredentialKind::Test => "Self-Attested",
        }
    }
}

/// Review state driven exclusively by the approval workflow. A rejected
/// credential never becomes usable again; re-issuance creates a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationState {
    PendingReview,
    Verified,
    Rejected,
}

impl VerificationState {
    pub const fn label(self) -> &'static str {
        match self {
            VerificationState::PendingReview => "pending_review",
            VerificationState::Verified => "verified",
            VerificationState::Rejected => "rejected",
        }
    }
}

/// A verifiable claim tied to one owner. Never physically deleted; the
/// `enabled` flag and `verification` state carry the full audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub id: CredentialId,
    pub owner_id: ActorId,
    pub title: String,
    pub issuer: Option<String>,
    pub kind: CredentialKind,
    pub proof_reference: String,
    pub issued_at: NaiveDate,
    pub enabled: bool,
    pub verification: VerificationState,
}

impl Credential {
    /// Whether the matching engine may consider this credential.
    pub fn is_matchable(&self) -> bool {
        self.enabled && self.verification == VerificationState::Verified
    }
}

/// Owner-provided input for issuing a new credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialDraft {
    pub owner_id: ActorId,
    pub kind: CredentialKind,
    pub title: String,
    #[serde(default)]
    pub issuer: Option<String>,
    pub proof_reference: String,
}
