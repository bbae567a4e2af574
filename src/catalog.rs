//! Warning-light description lookup.
//!
//! The catalog is plain injected data: the app shell supplies one record per
//! vocabulary entry and the pipeline treats it as read-only. Lookups never
//! fail; an unknown label yields a well-formed default record at the
//! Warning tier, so downstream display code has nothing special to handle.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// How urgently the driver should react.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    /// Stop driving as soon as safely possible.
    Critical,
    /// Have it checked soon.
    #[default]
    Warning,
    /// Informational.
    Advisory,
}

/// Description record for one warning light.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolInfo {
    pub label: String,
    pub title: String,
    pub urgency: Urgency,
    pub summary: String,
}

/// Static label → description table.
#[derive(Debug, Clone, Default)]
pub struct SymbolCatalog {
    entries: HashMap<String, SymbolInfo>,
}

impl SymbolCatalog {
    /// Build a catalog from injected records. Later duplicates win.
    pub fn from_entries(entries: impl IntoIterator<Item = SymbolInfo>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|e| (e.label.clone(), e))
                .collect(),
        }
    }

    /// Look up the description for a label.
    ///
    /// Unknown labels get a default record: a humanized title derived from
    /// the label text and the Warning tier.
    pub fn lookup(&self, label: &str) -> SymbolInfo {
        self.entries.get(label).cloned().unwrap_or_else(|| SymbolInfo {
            label: label.to_string(),
            title: humanize(label),
            urgency: Urgency::Warning,
            summary: "Unrecognized indicator. Consult the vehicle manual.".to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// `oil_pressure` → `Oil Pressure`.
fn humanize(label: &str) -> String {
    label
        .split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SymbolCatalog {
        SymbolCatalog::from_entries([SymbolInfo {
            label: "oil_pressure".into(),
            title: "Oil Pressure".into(),
            urgency: Urgency::Critical,
            summary: "Low oil pressure. Stop the engine.".into(),
        }])
    }

    #[test]
    fn lookup_returns_injected_record() {
        let info = sample().lookup("oil_pressure");
        assert_eq!(info.urgency, Urgency::Critical);
        assert_eq!(info.title, "Oil Pressure");
    }

    #[test]
    fn unknown_label_gets_warning_tier_default() {
        let info = sample().lookup("flux_capacitor");
        assert_eq!(info.urgency, Urgency::Warning);
        assert_eq!(info.title, "Flux Capacitor");
        assert!(!info.summary.is_empty());
    }
}
