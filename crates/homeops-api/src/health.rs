use std::fmt::{self, Display};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, Eq, PartialEq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Healthy,
    Warning,
    Critical,
    #[default]
    Unknown,
}

impl Severity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Warning => "warning",
            Self::Critical => "critical",
            Self::Unknown => "unknown",
        }
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-domain counts, ordered by count (descending).
///
/// Serialized as a JSON object whose key order is the ranking order, so
/// dashboards can render it as-is.
#[derive(Clone, Debug, Default, Serialize, Deserialize, Eq, PartialEq)]
#[serde(transparent)]
pub struct DomainCounts(IndexMap<String, usize>);

impl DomainCounts {
    /// Rank `(domain, count)` pairs by count, descending. Ties keep their
    /// input order and zero counts are dropped.
    #[must_use]
    pub fn ranked(counts: impl IntoIterator<Item = (String, usize)>) -> Self {
        let mut counts: IndexMap<_, _> = counts.into_iter().filter(|(_, n)| *n > 0).collect();
        counts.sort_by(|_, a, _, b| b.cmp(a));
        Self(counts)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(domain, n)| (domain.as_str(), *n))
    }

    #[must_use]
    pub fn get(&self, domain: &str) -> Option<usize> {
        self.0.get(domain).copied()
    }

    #[must_use]
    pub fn first(&self) -> Option<(&str, usize)> {
        self.iter().next()
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<(String, usize)> {
        self.0.into_iter().collect()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, Default, Eq, PartialEq)]
pub struct UnavailableSummary {
    pub total_count: usize,
    pub critical_count: usize,
    pub by_domain: DomainCounts,
}

#[derive(Clone, Debug, Serialize, Deserialize, Eq, PartialEq)]
pub struct UpdateItem {
    pub entity_id: String,
    pub installed: Option<String>,
    pub latest: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, Default, Eq, PartialEq)]
pub struct UpdateSummary {
    pub count: usize,
    pub items: Vec<UpdateItem>,
}

/// Derived view of one snapshot of entity states.
///
/// The default value is the "unknown" summary: zero counts and
/// [`Severity::Unknown`], used when no snapshot could be fetched.
#[derive(Clone, Debug, Serialize, Deserialize, Default, Eq, PartialEq)]
pub struct HealthSummary {
    pub severity: Severity,
    pub unavailable: UnavailableSummary,
    pub updates: UpdateSummary,
}

#[derive(Clone, Debug, Serialize, Deserialize, Default, Eq, PartialEq)]
pub struct DiagnosticReport {
    pub headline: String,
    pub severity: Severity,
    pub description: String,
    pub start_here: Vec<String>,
    pub details: String,
}
