use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::health::{DiagnosticReport, HealthSummary};

/// Full payload served to the dashboard and the JSON endpoint.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DoctorResponse {
    pub ha_version: String,
    pub entity_count: usize,
    pub location_name: Option<String>,
    pub time_zone: Option<String>,
    pub unit_system: Option<Value>,
    /// Most common domains across all entities, as `[domain, count]` pairs.
    pub domain_counts: Vec<(String, usize)>,
    pub health: HealthSummary,
    pub report: DiagnosticReport,
    pub homeops_uptime_s: u64,
    pub generated_at: DateTime<Utc>,
}

impl DoctorResponse {
    /// Compare everything except the time-dependent fields
    /// (`homeops_uptime_s`, `generated_at`).
    #[must_use]
    pub fn same_diagnosis(&self, other: &Self) -> bool {
        self.ha_version == other.ha_version
            && self.entity_count == other.entity_count
            && self.location_name == other.location_name
            && self.time_zone == other.time_zone
            && self.unit_system == other.unit_system
            && self.domain_counts == other.domain_counts
            && self.health == other.health
            && self.report == other.report
    }
}
