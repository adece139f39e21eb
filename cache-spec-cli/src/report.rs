//! Rendering parsed specifications for humans and machines.

use std::fmt::Write;

use cache_spec::duration::DisplayDuration;
use cache_spec::{CacheSpec, SpecError, Strength};
use serde::Serialize;

/// Flat, serializable view of a [`CacheSpec`].
///
/// Durations are rendered in their canonical text form so the JSON output can be pasted
/// back into a specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpecReport {
    /// Canonical specification string.
    pub canonical: String,
    /// `initialCapacity`
    pub initial_capacity: Option<u64>,
    /// `maximumSize`
    pub maximum_size: Option<u64>,
    /// `maximumWeight`
    pub maximum_weight: Option<u64>,
    /// `weakKeys`
    pub key_strength: Option<&'static str>,
    /// `weakValues` / `softValues`
    pub value_strength: Option<&'static str>,
    /// `expireAfterWrite`
    pub expire_after_write: Option<String>,
    /// `expireAfterAccess`
    pub expire_after_access: Option<String>,
    /// `refreshAfterWrite`
    pub refresh_after_write: Option<String>,
    /// `recordStats`
    pub record_stats: bool,
}

impl From<&CacheSpec> for SpecReport {
    fn from(spec: &CacheSpec) -> Self {
        let duration = |d: Option<std::time::Duration>| d.map(|d| DisplayDuration(d).to_string());
        let strength = |s: Option<Strength>| s.map(|s| s.as_str());
        Self {
            canonical: spec.to_parsable_string(),
            initial_capacity: spec.initial_capacity(),
            maximum_size: spec.maximum_size(),
            maximum_weight: spec.maximum_weight(),
            key_strength: strength(spec.key_strength()),
            value_strength: strength(spec.value_strength()),
            expire_after_write: duration(spec.expire_after_write()),
            expire_after_access: duration(spec.expire_after_access()),
            refresh_after_write: duration(spec.refresh_after_write()),
            record_stats: spec.record_stats(),
        }
    }
}

impl SpecReport {
    /// Renders one `name: value` line per field, with unset fields shown as `-`.
    pub fn to_text(&self) -> String {
        fn show<T: ToString>(value: &Option<T>) -> String {
            value
                .as_ref()
                .map_or_else(|| "-".to_string(), ToString::to_string)
        }

        let rows = [
            ("initialCapacity", show(&self.initial_capacity)),
            ("maximumSize", show(&self.maximum_size)),
            ("maximumWeight", show(&self.maximum_weight)),
            ("keyStrength", show(&self.key_strength)),
            ("valueStrength", show(&self.value_strength)),
            ("expireAfterWrite", show(&self.expire_after_write)),
            ("expireAfterAccess", show(&self.expire_after_access)),
            ("refreshAfterWrite", show(&self.refresh_after_write)),
            ("recordStats", self.record_stats.to_string()),
        ];

        let mut out = String::new();
        for (name, value) in rows {
            // Writing to a String cannot fail.
            let _ = writeln!(out, "{name:<18} {value}");
        }
        let _ = write!(out, "{:<18} {}", "canonical", self.canonical);
        out
    }

    /// Renders the report as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Result of checking one specification.
#[derive(Debug)]
pub struct CheckOutcome {
    /// Where the specification came from.
    pub origin: String,
    /// The parse result.
    pub result: Result<CacheSpec, SpecError>,
}

impl CheckOutcome {
    /// Returns the `ok`/`error` line printed by `cache-spec check`.
    pub fn summary(&self) -> String {
        match &self.result {
            Ok(spec) => format!("{}: ok ({})", self.origin, spec),
            Err(err) => format!("{}: error: {}", self.origin, err),
        }
    }

    /// Returns `true` if the specification parsed.
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}
