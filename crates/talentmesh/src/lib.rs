//! Domain services for a credential-backed talent matching marketplace.
//!
//! The library is organized around four collaborating subsystems under
//! [`marketplace`]: the credential registry, the approval workflow that turns
//! submitted evidence into verified credentials, the matching engine pairing
//! candidates with job postings, and the governance module for member
//! proposals and voting. Each subsystem exposes a service facade over a
//! storage trait plus an axum router so the API shell stays thin.

pub mod config;
pub mod error;
pub mod marketplace;
pub mod telemetry;
