use std::time::Duration;

use chrono::Utc;
use indexmap::IndexMap;

use homeops_api::doctor::DoctorResponse;
use homeops_api::health::{DiagnosticReport, DomainCounts, HealthSummary, Severity};

use crate::backend::hass::{Snapshot, StateSource};
use crate::health::{build_report, classify};
use crate::model::hass::EntityStateRecord;

pub const UNKNOWN_VERSION: &str = "unknown";

/// How many domains to list in [`DoctorResponse::domain_counts`].
pub const TOP_DOMAINS: usize = 12;

/// Fetch a fresh snapshot and diagnose it.
///
/// Never fails: if the snapshot cannot be fetched, the response describes
/// the failure with severity `unknown`.
pub async fn diagnose(source: &dyn StateSource, uptime: Duration) -> DoctorResponse {
    match source.fetch_snapshot().await {
        Ok(snapshot) => {
            let res = respond(&snapshot, uptime);
            log::debug!(
                "Diagnosis: {} ({} unavailable, {} critical, {} updates)",
                res.health.severity,
                res.health.unavailable.total_count,
                res.health.unavailable.critical_count,
                res.health.updates.count,
            );
            res
        }
        Err(err) => {
            log::warn!("Unable to fetch Home Assistant state: {}", err.reason());
            unavailable(&err.reason(), uptime)
        }
    }
}

#[must_use]
pub fn respond(snapshot: &Snapshot, uptime: Duration) -> DoctorResponse {
    let health = classify(&snapshot.states);
    let report = build_report(&health);
    let config = &snapshot.config;

    DoctorResponse {
        ha_version: config
            .version
            .clone()
            .unwrap_or_else(|| UNKNOWN_VERSION.to_string()),
        entity_count: snapshot.states.len(),
        location_name: config.location_name.clone(),
        time_zone: config.time_zone.clone(),
        unit_system: config.unit_system.clone(),
        domain_counts: domain_counts(&snapshot.states),
        health,
        report,
        homeops_uptime_s: uptime.as_secs(),
        generated_at: Utc::now(),
    }
}

/// Complete response for when no snapshot is available.
#[must_use]
pub fn unavailable(reason: &str, uptime: Duration) -> DoctorResponse {
    DoctorResponse {
        ha_version: UNKNOWN_VERSION.to_string(),
        entity_count: 0,
        location_name: None,
        time_zone: None,
        unit_system: None,
        domain_counts: vec![],
        health: HealthSummary::default(),
        report: DiagnosticReport {
            headline: "Unable to determine health".to_string(),
            severity: Severity::Unknown,
            description: reason.to_string(),
            start_here: vec![],
            details: String::new(),
        },
        homeops_uptime_s: uptime.as_secs(),
        generated_at: Utc::now(),
    }
}

/// Most common domains over all entities. Entity ids without a domain are
/// left out.
fn domain_counts(states: &[EntityStateRecord]) -> Vec<(String, usize)> {
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for (domain, _) in states.iter().filter_map(|rec| rec.entity_id.split_once('.')) {
        *counts.entry(domain.to_string()).or_default() += 1;
    }

    let mut ranked = DomainCounts::ranked(counts).into_inner();
    ranked.truncate(TOP_DOMAINS);
    ranked
}
