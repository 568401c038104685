use std::collections::BTreeSet;

use serde_json::Value;
use tracing::debug;

use super::domain::ProfileId;

/// Weekly recurring availability, reduced to the set of slot keys marked open.
///
/// Stored availability is a JSON object (`{"monday-morning": true, ...}`), either inline or
/// encoded as a string. Anything that does not decode to an object yields an empty set; a slot
/// counts as open when its value is truthy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Availability {
    open: BTreeSet<String>,
}

impl Availability {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_slots<I, S>(slots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            open: slots.into_iter().map(Into::into).collect(),
        }
    }

    /// Decode an encoded availability object, falling back to empty on any parse failure.
    pub fn from_json(raw: &str) -> Self {
        match serde_json::from_str::<Value>(raw) {
            Ok(value) => Self::from_value(&value),
            Err(_) => Self::empty(),
        }
    }

    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(slots) => Self {
                open: slots
                    .iter()
                    .filter(|(_, flag)| is_truthy(flag))
                    .map(|(slot, _)| slot.clone())
                    .collect(),
            },
            Value::String(encoded) => match serde_json::from_str::<Value>(encoded) {
                Ok(inner @ Value::Object(_)) => Self::from_value(&inner),
                _ => Self::empty(),
            },
            _ => Self::empty(),
        }
    }

    pub(crate) fn from_stored(owner: &ProfileId, stored: Option<&Value>) -> Self {
        let Some(value) = stored else {
            return Self::empty();
        };

        let decoded = Self::from_value(value);
        if decoded.is_empty() && !is_empty_object(value) {
            debug!(profile_id = %owner, "availability unreadable; treating as no open slots");
        }
        decoded
    }

    pub fn is_open(&self, slot: &str) -> bool {
        self.open.contains(slot)
    }

    pub fn len(&self) -> usize {
        self.open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    /// Number of slots open in both schedules.
    pub fn common_slots(&self, other: &Availability) -> usize {
        self.open.intersection(&other.open).count()
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().map(|n| n != 0.0 && !n.is_nan()).unwrap_or(true),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn is_empty_object(value: &Value) -> bool {
    match value {
        Value::Object(slots) => slots.values().all(|flag| !is_truthy(flag)),
        Value::Null => true,
        _ => false,
    }
}
