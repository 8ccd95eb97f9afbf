use std::fmt;

use serde::de::{Deserializer, MapAccess, Visitor};

use crate::foundation::error::{PathVizError, PathVizResult};

/// Name used when a structured document carries no `name`, or a name trims down to nothing.
pub const DEFAULT_PATTERN_NAME: &str = "pattern";

/// Raw `duration` value of an event, kept as authored so the step policy can decide leniently.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum HoldDuration {
    Integer(i64),
    Fractional(f64),
    Flag(bool),
    Text(String),
    Other(serde_json::Value),
}

/// One recorded key event. `key` may join several held keys with `+`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PatternEvent {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub duration: Option<HoldDuration>,
}

impl PatternEvent {
    pub fn new(key: impl Into<String>, duration: Option<HoldDuration>) -> Self {
        Self {
            key: key.into(),
            duration,
        }
    }

    pub fn key_only(key: impl Into<String>) -> Self {
        Self::new(key, None)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Pattern {
    pub name: String,
    pub events: Vec<PatternEvent>,
}

impl Pattern {
    /// Logical name with structural underscores trimmed, e.g. `_test_` -> `test`.
    pub fn display_name(&self) -> &str {
        match self.name.trim_matches('_') {
            "" => DEFAULT_PATTERN_NAME,
            trimmed => trimmed,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceForm {
    Structured,
    Legacy,
}

/// A parsed pattern source. The shape is decided once, here, and never re-inspected downstream.
#[derive(Clone, Debug, PartialEq)]
pub enum PatternDocument {
    /// `{ "name": ..., "pattern": [ { "key": ..., "duration": ... }, ... ] }`
    Structured {
        name: String,
        events: Vec<PatternEvent>,
    },
    /// `{ "<name>": ["w", "a", ...], ... }` in file order.
    Legacy { patterns: Vec<(String, Vec<String>)> },
}

impl PatternDocument {
    pub fn from_json_str(s: &str) -> PathVizResult<Self> {
        let OrderedObject(entries) = serde_json::from_str(s)
            .map_err(|e| PathVizError::parse(format!("pattern source is not a JSON object: {e}")))?;
        Ok(Self::from_entries(entries))
    }

    fn from_entries(entries: Vec<(String, serde_json::Value)>) -> Self {
        if Self::looks_structured(&entries) {
            return Self::structured_from_entries(entries);
        }

        let mut patterns = Vec::with_capacity(entries.len());
        for (name, value) in entries {
            let serde_json::Value::Array(items) = value else {
                tracing::debug!(pattern = %name, "dropping legacy entry that is not a code list");
                continue;
            };
            let codes = items
                .into_iter()
                .filter_map(|item| match item {
                    serde_json::Value::String(code) => Some(code),
                    other => {
                        tracing::debug!(pattern = %name, code = %other, "dropping non-string code");
                        None
                    }
                })
                .collect();
            patterns.push((name, codes));
        }
        Self::Legacy { patterns }
    }

    /// A `pattern` array is an event list when it is empty, holds at least one record, or sits
    /// next to a string `name`. A list of bare codes is a legacy pattern that happens to be
    /// called `pattern`.
    fn looks_structured(entries: &[(String, serde_json::Value)]) -> bool {
        let Some(items) = entries
            .iter()
            .find_map(|(k, v)| if k == "pattern" { v.as_array() } else { None })
        else {
            return false;
        };
        let named = entries
            .iter()
            .any(|(k, v)| k == "name" && v.is_string());
        items.is_empty() || named || items.iter().any(serde_json::Value::is_object)
    }

    fn structured_from_entries(entries: Vec<(String, serde_json::Value)>) -> Self {
        let mut name = None;
        let mut raw_events = Vec::new();
        for (k, v) in entries {
            match (k.as_str(), v) {
                ("name", serde_json::Value::String(s)) => name = Some(s),
                ("pattern", serde_json::Value::Array(items)) => raw_events = items,
                _ => {}
            }
        }

        let events = raw_events
            .into_iter()
            .enumerate()
            .filter_map(
                |(idx, raw)| match serde_json::from_value::<PatternEvent>(raw) {
                    Ok(ev) => Some(ev),
                    Err(e) => {
                        tracing::debug!(index = idx, error = %e, "dropping malformed event");
                        None
                    }
                },
            )
            .collect();

        Self::Structured {
            name: name.unwrap_or_else(|| DEFAULT_PATTERN_NAME.to_string()),
            events,
        }
    }

    pub fn form(&self) -> SourceForm {
        match self {
            Self::Structured { .. } => SourceForm::Structured,
            Self::Legacy { .. } => SourceForm::Legacy,
        }
    }

    /// Normalize either form into patterns, preserving source order.
    pub fn into_patterns(self) -> Vec<Pattern> {
        match self {
            Self::Structured { name, events } => vec![Pattern { name, events }],
            Self::Legacy { patterns } => patterns
                .into_iter()
                .map(|(name, codes)| Pattern {
                    name,
                    events: codes.into_iter().map(PatternEvent::key_only).collect(),
                })
                .collect(),
        }
    }
}

/// JSON object whose entries keep their textual order.
struct OrderedObject(Vec<(String, serde_json::Value)>);

impl<'de> serde::Deserialize<'de> for OrderedObject {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ObjectVisitor;

        impl<'de> Visitor<'de> for ObjectVisitor {
            type Value = OrderedObject;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, serde_json::Value>()? {
                    entries.push(entry);
                }
                Ok(OrderedObject(entries))
            }
        }

        deserializer.deserialize_map(ObjectVisitor)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pattern/model.rs"]
mod tests;
