use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One entry of `GET /states`.
///
/// Built from any JSON value: fields of the wrong type fall back to their
/// defaults, so a single malformed record never fails a whole snapshot.
#[derive(Clone, Debug, Default, Serialize, Deserialize, Eq, PartialEq)]
#[serde(from = "Value")]
pub struct EntityStateRecord {
    pub entity_id: String,
    pub state: Option<String>,
    pub attributes: Map<String, Value>,
}

impl EntityStateRecord {
    pub const UNKNOWN_DOMAIN: &'static str = "unknown";

    /// Everything before the first `.` of the entity id, or `"unknown"` when
    /// there is no `.` at all.
    #[must_use]
    pub fn domain(&self) -> &str {
        self.entity_id
            .split_once('.')
            .map_or(Self::UNKNOWN_DOMAIN, |(domain, _)| domain)
    }

    #[must_use]
    pub fn state(&self) -> &str {
        self.state.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self.state(), "unavailable" | "unknown")
    }

    /// Non-empty textual attribute. Numbers are rendered as text, since some
    /// integrations report versions as plain numbers.
    #[must_use]
    pub fn attribute_text(&self, key: &str) -> Option<String> {
        match self.attributes.get(key)? {
            Value::String(text) if !text.is_empty() => Some(text.clone()),
            Value::Number(num) => Some(num.to_string()),
            _ => None,
        }
    }
}

impl From<Value> for EntityStateRecord {
    fn from(value: Value) -> Self {
        let Value::Object(mut obj) = value else {
            return Self::default();
        };

        let entity_id = match obj.remove("entity_id") {
            Some(Value::String(id)) => id,
            _ => String::new(),
        };

        let state = match obj.remove("state") {
            Some(Value::String(state)) => Some(state),
            _ => None,
        };

        let attributes = match obj.remove("attributes") {
            Some(Value::Object(attrs)) => attrs,
            _ => Map::new(),
        };

        Self {
            entity_id,
            state,
            attributes,
        }
    }
}

/// Subset of `GET /config` shown on the dashboard.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct HassCoreConfig {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub location_name: Option<String>,
    #[serde(default)]
    pub time_zone: Option<String>,
    #[serde(default)]
    pub unit_system: Option<Value>,
}
