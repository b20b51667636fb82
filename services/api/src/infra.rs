use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use talentmesh::marketplace::approvals::{AcceptAllVerifier, ApprovalService, InMemoryApprovalRepository};
use talentmesh::marketplace::credentials::{CredentialService, InMemoryCredentialRepository};
use talentmesh::marketplace::governance::{
    GovernancePolicy, GovernanceService, InMemoryGovernanceRepository,
};
use talentmesh::marketplace::matching::{
    InMemoryMatchingRepository, MatchEvaluator, MatchPolicy, MatchingService,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type SharedCredentialService = Arc<CredentialService<InMemoryCredentialRepository>>;
pub(crate) type SharedApprovalService = Arc<
    ApprovalService<InMemoryApprovalRepository, InMemoryCredentialRepository, AcceptAllVerifier>,
>;
pub(crate) type SharedMatchingService =
    Arc<MatchingService<InMemoryMatchingRepository, InMemoryCredentialRepository>>;
pub(crate) type SharedGovernanceService = Arc<GovernanceService<InMemoryGovernanceRepository>>;

/// The four marketplace services wired over one shared credential store, so
/// review decisions and enablement toggles are immediately visible to the
/// matching gate.
pub(crate) struct Marketplace {
    pub(crate) credentials: SharedCredentialService,
    pub(crate) approvals: SharedApprovalService,
    pub(crate) matching: SharedMatchingService,
    pub(crate) governance: SharedGovernanceService,
}

pub(crate) fn build_marketplace() -> Marketplace {
    let credential_store = Arc::new(InMemoryCredentialRepository::default());

    Marketplace {
        credentials: Arc::new(CredentialService::new(credential_store.clone())),
        approvals: Arc::new(ApprovalService::new(
            Arc::new(InMemoryApprovalRepository::default()),
            credential_store.clone(),
            Arc::new(AcceptAllVerifier),
        )),
        matching: Arc::new(MatchingService::new(
            Arc::new(InMemoryMatchingRepository::default()),
            credential_store,
            MatchEvaluator::new(MatchPolicy::default()),
        )),
        governance: Arc::new(GovernanceService::new(
            Arc::new(InMemoryGovernanceRepository::default()),
            GovernancePolicy::default(),
        )),
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
