//! Health classification and report generation.
//!
//! Both stages are pure functions of one snapshot: [`classify`] turns entity
//! states into a [`HealthSummary`](homeops_api::health::HealthSummary), and
//! [`build_report`] turns that summary into the human-readable
//! [`DiagnosticReport`](homeops_api::health::DiagnosticReport).

mod classify;
mod report;

pub use classify::{classify, severity_for};
pub use report::build_report;

/// Domains considered core to physical home function.
pub const IMPORTANT_DOMAINS: &[&str] = &[
    "light",
    "switch",
    "lock",
    "climate",
    "cover",
    "fan",
    "media_player",
];

/// Number of unavailable important-domain entities at which the system is
/// considered critical.
pub const CRITICAL_THRESHOLD: usize = 5;

pub const UPDATE_DOMAIN: &str = "update";

#[must_use]
pub fn is_important_domain(domain: &str) -> bool {
    IMPORTANT_DOMAINS.contains(&domain)
}
