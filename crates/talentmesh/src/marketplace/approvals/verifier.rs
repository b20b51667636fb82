use super::domain::CheckOutcome;

/// Automated evidence pre-check consulted at submission time.
///
/// Implementations must resolve within a bounded time and report `Timeout` as
/// a terminal outcome instead of blocking the review queue. The result is
/// advisory for reviewers; it never decides a request on its own.
pub trait EvidenceVerifier: Send + Sync {
    fn verify(&self, evidence_url: &str) -> CheckOutcome;
}

/// Pass-through verifier used until a real proof backend is wired in.
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptAllVerifier;

impl EvidenceVerifier for AcceptAllVerifier {
    fn verify(&self, _evidence_url: &str) -> CheckOutcome {
        CheckOutcome::Pass
    }
}

/// Deterministic verifier for tests and demos.
#[derive(Debug, Clone, Copy)]
pub struct FixedOutcomeVerifier {
    outcome: CheckOutcome,
}

impl FixedOutcomeVerifier {
    pub fn new(outcome: CheckOutcome) -> Self {
        Self { outcome }
    }
}

impl EvidenceVerifier for FixedOutcomeVerifier {
    fn verify(&self, _evidence_url: &str) -> CheckOutcome {
        self.outcome
    }
}
