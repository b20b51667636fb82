//! Marketplace subsystems: credentials, approvals, matching, and governance.
//!
//! Control flow between them is one-directional. The credential registry
//! records claims, the approval workflow flips their verification state, the
//! matching engine consumes verified and enabled credentials for its
//! eligibility gate, and governance runs independently of the other three.

pub mod approvals;
pub mod credentials;
pub mod governance;
pub mod matching;
pub mod store;

use serde::{Deserialize, Serialize};

/// Identifier for any authenticated actor (candidate, employer, reviewer, or
/// governance member). Authorization is decided per operation by the owning
/// service, never baked into the entity itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorId(pub String);

impl ActorId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
