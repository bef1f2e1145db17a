use indexmap::IndexMap;

use homeops_api::health::{
    DomainCounts, HealthSummary, Severity, UnavailableSummary, UpdateItem, UpdateSummary,
};

use crate::health::{CRITICAL_THRESHOLD, UPDATE_DOMAIN, is_important_domain};
use crate::model::hass::EntityStateRecord;

/// Summarize a snapshot of entity states.
///
/// Unavailability and pending updates are classified independently: an
/// unavailable `update.*` entity can show up in both tallies.
pub fn classify<'a>(states: impl IntoIterator<Item = &'a EntityStateRecord>) -> HealthSummary {
    let mut total_count = 0;
    let mut critical_count = 0;
    let mut by_domain: IndexMap<String, usize> = IndexMap::new();
    let mut updates = vec![];

    for record in states {
        let domain = record.domain();

        if record.is_unavailable() {
            total_count += 1;
            *by_domain.entry(domain.to_string()).or_default() += 1;
            if is_important_domain(domain) {
                critical_count += 1;
            }
        }

        if domain == UPDATE_DOMAIN {
            if let Some(item) = pending_update(record) {
                updates.push(item);
            }
        }
    }

    HealthSummary {
        severity: severity_for(critical_count, updates.len()),
        unavailable: UnavailableSummary {
            total_count,
            critical_count,
            by_domain: DomainCounts::ranked(by_domain),
        },
        updates: UpdateSummary {
            count: updates.len(),
            items: updates,
        },
    }
}

/// Severity from the number of unavailable important-domain entities and the
/// number of pending updates, first matching rule wins.
#[must_use]
pub const fn severity_for(critical_count: usize, update_count: usize) -> Severity {
    if critical_count >= CRITICAL_THRESHOLD {
        Severity::Critical
    } else if critical_count > 0 || update_count > 0 {
        Severity::Warning
    } else {
        Severity::Healthy
    }
}

fn pending_update(record: &EntityStateRecord) -> Option<UpdateItem> {
    let installed = record.attribute_text("installed_version");
    let latest = record.attribute_text("latest_version");

    let newer = matches!((&installed, &latest), (Some(i), Some(l)) if i != l);

    (record.state() == "on" || newer).then(|| UpdateItem {
        entity_id: record.entity_id.clone(),
        installed,
        latest,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use homeops_api::health::Severity;

    use crate::health::classify::{classify, severity_for};
    use crate::model::hass::EntityStateRecord;

    fn states(value: Value) -> Vec<EntityStateRecord> {
        serde_json::from_value(value).unwrap()
    }

    fn entity(entity_id: &str, state: &str) -> Value {
        json!({"entity_id": entity_id, "state": state, "attributes": {}})
    }

    fn update(entity_id: &str, state: &str, installed: &str, latest: &str) -> Value {
        json!({
            "entity_id": entity_id,
            "state": state,
            "attributes": {"installed_version": installed, "latest_version": latest},
        })
    }

    #[test]
    fn empty_snapshot_is_healthy() {
        let summary = classify(&Vec::<EntityStateRecord>::new());

        assert_eq!(summary.severity, Severity::Healthy);
        assert_eq!(summary.unavailable.total_count, 0);
        assert_eq!(summary.unavailable.critical_count, 0);
        assert!(summary.unavailable.by_domain.is_empty());
        assert_eq!(summary.updates.count, 0);
        assert!(summary.updates.items.is_empty());
    }

    #[test]
    fn six_unavailable_lights_are_critical() {
        let snapshot: Vec<Value> = (0..6)
            .map(|n| entity(&format!("light.lamp_{n}"), "unavailable"))
            .collect();
        let summary = classify(&states(Value::Array(snapshot)));

        assert_eq!(summary.severity, Severity::Critical);
        assert_eq!(summary.unavailable.total_count, 6);
        assert_eq!(summary.unavailable.critical_count, 6);
        assert_eq!(summary.unavailable.by_domain.get("light"), Some(6));
    }

    #[test]
    fn unknown_state_counts_as_unavailable() {
        let summary = classify(&states(json!([
            entity("lock.front", "unknown"),
            entity("sensor.temp", "unavailable"),
            entity("sensor.humidity", "22"),
        ])));

        assert_eq!(summary.severity, Severity::Warning);
        assert_eq!(summary.unavailable.total_count, 2);
        assert_eq!(summary.unavailable.critical_count, 1);
    }

    #[test]
    fn non_important_domains_stay_healthy() {
        let summary = classify(&states(json!([
            entity("sensor.a", "unavailable"),
            entity("binary_sensor.b", "unavailable"),
            entity("nodomain", "unknown"),
        ])));

        assert_eq!(summary.severity, Severity::Healthy);
        assert_eq!(summary.unavailable.total_count, 3);
        assert_eq!(summary.unavailable.critical_count, 0);
        assert_eq!(summary.unavailable.by_domain.get("unknown"), Some(1));
    }

    #[test]
    fn by_domain_sorted_and_stable() {
        let summary = classify(&states(json!([
            entity("sensor.a", "unavailable"),
            entity("switch.a", "unavailable"),
            entity("light.a", "unavailable"),
            entity("light.b", "unavailable"),
            entity("switch.b", "unavailable"),
            entity("fan.a", "on"),
        ])));

        let order: Vec<_> = summary.unavailable.by_domain.iter().collect();
        assert_eq!(order, vec![("switch", 2), ("light", 2), ("sensor", 1)]);
        assert_eq!(
            summary.unavailable.by_domain.total(),
            summary.unavailable.total_count
        );
    }

    #[test]
    fn update_detection() {
        let same = classify(&states(json!([update("update.foo", "off", "1.0", "1.0")])));
        assert_eq!(same.updates.count, 0);
        assert_eq!(same.severity, Severity::Healthy);

        let on = classify(&states(json!([update("update.foo", "on", "1.0", "1.0")])));
        assert_eq!(on.updates.count, 1);
        assert_eq!(on.severity, Severity::Warning);

        let newer = classify(&states(json!([update("update.foo", "off", "1.0", "1.1")])));
        assert_eq!(newer.updates.count, 1);
        let item = &newer.updates.items[0];
        assert_eq!(item.entity_id, "update.foo");
        assert_eq!(item.installed.as_deref(), Some("1.0"));
        assert_eq!(item.latest.as_deref(), Some("1.1"));
    }

    #[test]
    fn update_on_without_versions() {
        let summary = classify(&states(json!([entity("update.hacs", "on")])));

        assert_eq!(summary.updates.count, 1);
        assert_eq!(summary.updates.items[0].installed, None);
        assert_eq!(summary.updates.items[0].latest, None);
    }

    #[test]
    fn update_missing_one_version_is_not_pending() {
        let summary = classify(&states(json!([{
            "entity_id": "update.zigbee",
            "state": "off",
            "attributes": {"installed_version": "1.0", "latest_version": null},
        }])));

        assert_eq!(summary.updates.count, 0);
    }

    #[test]
    fn unavailable_update_counts_in_both_tallies() {
        let summary = classify(&states(json!([update(
            "update.core",
            "unavailable",
            "2024.1",
            "2024.2"
        )])));

        assert_eq!(summary.unavailable.total_count, 1);
        assert_eq!(summary.unavailable.critical_count, 0);
        assert_eq!(summary.unavailable.by_domain.get("update"), Some(1));
        assert_eq!(summary.updates.count, 1);
        assert_eq!(summary.severity, Severity::Warning);
    }

    #[test]
    fn missing_state_is_neither_unavailable_nor_update() {
        let summary = classify(&states(json!([
            {"entity_id": "light.a"},
            {"entity_id": "update.b"},
        ])));

        assert_eq!(summary.unavailable.total_count, 0);
        assert_eq!(summary.updates.count, 0);
        assert_eq!(summary.severity, Severity::Healthy);
    }

    #[test]
    fn severity_thresholds() {
        assert_eq!(severity_for(0, 0), Severity::Healthy);
        assert_eq!(severity_for(1, 0), Severity::Warning);
        assert_eq!(severity_for(4, 0), Severity::Warning);
        assert_eq!(severity_for(0, 2), Severity::Warning);
        assert_eq!(severity_for(4, 3), Severity::Warning);
        assert_eq!(severity_for(5, 0), Severity::Critical);
        assert_eq!(severity_for(12, 7), Severity::Critical);
    }

    #[test]
    fn counts_invariants_hold_on_mixed_snapshot() {
        let summary = classify(&states(json!([
            entity("light.a", "unavailable"),
            entity("cover.b", "unknown"),
            entity("sensor.c", "unavailable"),
            entity("media_player.d", "playing"),
            entity("climate.e", "unavailable"),
            entity("camera.f", "unknown"),
            entity("", "unavailable"),
        ])));

        let unavailable = &summary.unavailable;
        assert!(unavailable.critical_count <= unavailable.total_count);
        assert_eq!(unavailable.by_domain.total(), unavailable.total_count);
        assert!(unavailable.by_domain.iter().all(|(_, n)| n > 0));
        let counts: Vec<_> = unavailable.by_domain.iter().map(|(_, n)| n).collect();
        assert!(counts.windows(2).all(|w| w[0] >= w[1]));
    }
}
