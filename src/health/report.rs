use itertools::Itertools;

use homeops_api::health::{DiagnosticReport, HealthSummary, Severity, UpdateItem};

use crate::health::{CRITICAL_THRESHOLD, is_important_domain};

const UNAVAILABLE_STEPS: [&str; 3] = [
    "Check whether the affected integration(s) show errors in Settings → Devices & services.",
    "If the affected devices are Zigbee/Z-Wave, verify the coordinator is online and not rebooting.",
    "If this started after an update or restart, review what changed recently before rebooting repeatedly.",
];

const UPDATE_STEPS: [&str; 3] = [
    "Read the release notes for each pending update and look for breaking changes.",
    "Take a full backup before installing anything.",
    "Install updates one at a time and confirm your devices still work before moving on.",
];

/// Turn a health summary into the report shown to the user.
///
/// Only the most pressing issue is reported: unavailable core devices win
/// over pending updates, which remain visible in the summary itself.
#[must_use]
pub fn build_report(summary: &HealthSummary) -> DiagnosticReport {
    let critical_count = summary.unavailable.critical_count;
    let update_count = summary.updates.count;

    if summary.severity == Severity::Healthy {
        DiagnosticReport {
            headline: "No critical issues detected".to_string(),
            severity: Severity::Healthy,
            description: "All core devices appear to be operating normally.".to_string(),
            start_here: vec![],
            details: String::new(),
        }
    } else if critical_count > 0 {
        DiagnosticReport {
            headline: format!("{critical_count} critical devices unavailable"),
            severity: if critical_count >= CRITICAL_THRESHOLD {
                Severity::Critical
            } else {
                Severity::Warning
            },
            description: "Core device domains (lights, climate, locks, media) are unavailable. \
                This usually indicates an integration outage, coordinator issue, \
                or network/device power problem."
                .to_string(),
            start_here: UNAVAILABLE_STEPS.map(String::from).into(),
            details: impacted_domains(summary),
        }
    } else if update_count > 0 {
        let noun = if update_count == 1 { "update" } else { "updates" };
        DiagnosticReport {
            headline: format!("{update_count} {noun} pending"),
            severity: Severity::Warning,
            description: "Pending updates may contain breaking changes. \
                Installing them blindly can take integrations or devices offline."
                .to_string(),
            start_here: UPDATE_STEPS.map(String::from).into(),
            details: pending_updates(&summary.updates.items),
        }
    } else {
        DiagnosticReport {
            headline: "Issues detected".to_string(),
            severity: Severity::Unknown,
            description: "The health check flagged a problem that could not be classified."
                .to_string(),
            start_here: vec![],
            details: String::new(),
        }
    }
}

fn impacted_domains(summary: &HealthSummary) -> String {
    let by_domain = &summary.unavailable.by_domain;

    let mut impacted = by_domain
        .iter()
        .filter(|(domain, _)| is_important_domain(domain))
        .peekable();

    let listing = if impacted.peek().is_some() {
        impacted.map(|(domain, n)| format!("{domain} ({n})")).join(", ")
    } else if let Some((domain, n)) = by_domain.first() {
        format!("{domain} ({n})")
    } else {
        return String::new();
    };

    format!("Most affected domains: {listing}")
}

fn pending_updates(items: &[UpdateItem]) -> String {
    let listing = items
        .iter()
        .map(|item| {
            format!(
                "{} ({} -> {})",
                item.entity_id,
                item.installed.as_deref().unwrap_or("?"),
                item.latest.as_deref().unwrap_or("?"),
            )
        })
        .join(", ");

    format!("Pending: {listing}")
}

#[cfg(test)]
mod tests {
    use homeops_api::health::{
        DomainCounts, HealthSummary, Severity, UnavailableSummary, UpdateItem, UpdateSummary,
    };

    use crate::health::build_report;

    fn summary(
        severity: Severity,
        critical_count: usize,
        by_domain: &[(&str, usize)],
        updates: Vec<UpdateItem>,
    ) -> HealthSummary {
        let by_domain = DomainCounts::ranked(by_domain.iter().map(|(d, n)| (d.to_string(), *n)));
        HealthSummary {
            severity,
            unavailable: UnavailableSummary {
                total_count: by_domain.total(),
                critical_count,
                by_domain,
            },
            updates: UpdateSummary {
                count: updates.len(),
                items: updates,
            },
        }
    }

    fn item(entity_id: &str, installed: Option<&str>, latest: Option<&str>) -> UpdateItem {
        UpdateItem {
            entity_id: entity_id.to_string(),
            installed: installed.map(String::from),
            latest: latest.map(String::from),
        }
    }

    #[test]
    fn healthy_report() {
        let report = build_report(&summary(Severity::Healthy, 0, &[], vec![]));

        assert_eq!(report.severity, Severity::Healthy);
        assert_eq!(report.headline, "No critical issues detected");
        assert!(report.start_here.is_empty());
        assert_eq!(report.details, "");
    }

    #[test]
    fn critical_report() {
        let report = build_report(&summary(
            Severity::Critical,
            6,
            &[("light", 6), ("sensor", 2)],
            vec![],
        ));

        assert_eq!(report.severity, Severity::Critical);
        assert!(report.headline.contains('6'));
        assert_eq!(report.start_here.len(), 3);
        assert_eq!(report.details, "Most affected domains: light (6)");
    }

    #[test]
    fn few_critical_devices_is_a_warning() {
        let report = build_report(&summary(
            Severity::Warning,
            3,
            &[("sensor", 4), ("lock", 2), ("fan", 1)],
            vec![],
        ));

        assert_eq!(report.severity, Severity::Warning);
        assert_eq!(report.headline, "3 critical devices unavailable");
        assert_eq!(report.details, "Most affected domains: lock (2), fan (1)");
    }

    #[test]
    fn falls_back_to_top_domain() {
        // inconsistent summary, but the report must still say something useful
        let report = build_report(&summary(
            Severity::Warning,
            1,
            &[("sensor", 4), ("camera", 1)],
            vec![],
        ));

        assert_eq!(report.details, "Most affected domains: sensor (4)");
    }

    #[test]
    fn critical_wins_over_updates() {
        let report = build_report(&summary(
            Severity::Warning,
            2,
            &[("switch", 2)],
            vec![item("update.core", Some("1.0"), Some("1.1"))],
        ));

        assert_eq!(report.headline, "2 critical devices unavailable");
        assert!(!report.headline.contains("update"));
        assert_eq!(report.severity, Severity::Warning);
    }

    #[test]
    fn updates_report() {
        let report = build_report(&summary(
            Severity::Warning,
            0,
            &[],
            vec![
                item("update.core", Some("2024.1"), Some("2024.2")),
                item("update.hacs", None, None),
            ],
        ));

        assert_eq!(report.severity, Severity::Warning);
        assert_eq!(report.headline, "2 updates pending");
        assert_eq!(report.start_here.len(), 3);
        assert_eq!(
            report.details,
            "Pending: update.core (2024.1 -> 2024.2), update.hacs (? -> ?)"
        );
    }

    #[test]
    fn single_update_headline() {
        let report = build_report(&summary(
            Severity::Warning,
            0,
            &[],
            vec![item("update.core", Some("1"), Some("2"))],
        ));

        assert_eq!(report.headline, "1 update pending");
    }

    #[test]
    fn unexplained_severity_falls_back() {
        let report = build_report(&summary(Severity::Warning, 0, &[("sensor", 1)], vec![]));

        assert_eq!(report.severity, Severity::Unknown);
        assert_eq!(report.headline, "Issues detected");
        assert!(report.start_here.is_empty());
        assert_eq!(report.details, "");
    }
}
