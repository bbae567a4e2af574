//! The closed warning-light vocabulary.
//!
//! Both the on-device classifier and every cloud adapter resolve against
//! this list. Order matters twice: classifier output index *i* maps to entry
//! *i*, and confidence ties in ranked results break toward the lower index.

use crate::types::Label;

/// The 36 recognizable warning-light identifiers, in model output order.
pub const LABELS: [&str; 36] = [
    "check_engine",
    "oil_pressure",
    "battery_charge",
    "coolant_temperature",
    "brake_system",
    "abs",
    "airbag",
    "tire_pressure",
    "traction_control",
    "stability_control",
    "power_steering",
    "low_fuel",
    "washer_fluid",
    "glow_plug",
    "diesel_particulate_filter",
    "seat_belt",
    "door_ajar",
    "hood_open",
    "trunk_open",
    "exterior_light_fault",
    "fog_light",
    "high_beam",
    "low_beam",
    "turn_signal",
    "parking_brake",
    "brake_pad_wear",
    "transmission_temperature",
    "cruise_control",
    "lane_departure",
    "forward_collision",
    "blind_spot",
    "adaptive_headlight",
    "key_fob_battery",
    "security_immobilizer",
    "start_stop_system",
    "service_required",
];

/// Position of a label in the vocabulary, if present.
pub fn index_of(label: &str) -> Option<usize> {
    LABELS.iter().position(|l| *l == label)
}

/// Fold provider text into the vocabulary's shape before matching.
fn normalize(raw: &str) -> String {
    raw.trim()
        .to_ascii_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect()
}

/// Separator-free form used for containment checks, so `oilpressure_symbol`
/// still lines up with `oil_pressure`.
fn squash(normalized: &str) -> String {
    normalized.chars().filter(|c| *c != '_').collect()
}

/// Resolve free-text provider output against the vocabulary.
///
/// Tries an exact match on the normalized text, then separator-insensitive
/// substring containment in either direction, scanning in index order so the
/// first (stable) entry wins. Text that resolves to nothing passes through
/// as [`Label::Unrecognized`] instead of being dropped.
///
/// The containment fallback is deliberately loose and can false-positive on
/// short entries such as `abs`; callers that need certainty should check
/// [`Label::is_known`] and treat the confidence accordingly.
pub fn resolve(raw: &str) -> Label {
    let needle = normalize(raw);
    if needle.is_empty() {
        return Label::Unrecognized(raw.to_string());
    }

    if let Some(idx) = index_of(&needle) {
        return Label::Known(LABELS[idx]);
    }

    let squashed = squash(&needle);
    if squashed.is_empty() {
        return Label::Unrecognized(raw.to_string());
    }
    for entry in LABELS {
        let entry_squashed = squash(entry);
        if squashed.contains(&entry_squashed) || entry_squashed.contains(&squashed) {
            return Label::Known(entry);
        }
    }

    Label::Unrecognized(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vocabulary_has_no_duplicates() {
        let mut seen = std::collections::HashSet::new();
        for label in LABELS {
            assert!(seen.insert(label), "duplicate vocabulary entry: {label}");
        }
    }

    #[test]
    fn exact_match_resolves() {
        assert_eq!(resolve("oil_pressure"), Label::Known("oil_pressure"));
        assert_eq!(index_of("check_engine"), Some(0));
    }

    #[test]
    fn normalization_handles_case_and_separators() {
        assert_eq!(resolve("Oil Pressure"), Label::Known("oil_pressure"));
        assert_eq!(resolve("  tire-pressure "), Label::Known("tire_pressure"));
    }

    #[test]
    fn substring_containment_both_directions() {
        // Provider text contains the vocabulary entry, separators ignored.
        assert_eq!(resolve("oilpressure_symbol"), Label::Known("oil_pressure"));
        assert_eq!(resolve("oil_pressure_symbol"), Label::Known("oil_pressure"));
        // Vocabulary entry contains the provider text.
        assert_eq!(resolve("coolant"), Label::Known("coolant_temperature"));
    }

    #[test]
    fn unresolvable_text_passes_through() {
        let label = resolve("flux capacitor");
        assert_eq!(label, Label::Unrecognized("flux capacitor".into()));
        assert!(!label.is_known());
    }

    #[test]
    fn empty_text_is_unrecognized() {
        assert_eq!(resolve("   "), Label::Unrecognized("   ".into()));
    }
}
