//! Shared parsing of provider replies.
//!
//! Every adapter asks its model for a strict JSON object
//! `{"label": ..., "confidence": ...}` chosen from the closed vocabulary,
//! but real replies arrive as free text that may wrap the object in
//! code-fence decoration or prose. This module digs the object out,
//! resolves the label, and applies the documented confidence default.

use crate::error::RemoteError;
use crate::types::Candidate;
use crate::vocabulary;

/// Confidence assigned when a provider omits it or sends a non-number.
///
/// An explicit documented default, not a silent zero: a provider that
/// answered at all was confident enough to name a label.
pub const DEFAULT_CONFIDENCE: f32 = 0.85;

/// The instruction sent alongside the image.
pub fn instruction(labels: &[&str]) -> String {
    format!(
        "Identify the car dashboard warning light in this photo. Respond with \
         only a JSON object of the form {{\"label\": \"...\", \"confidence\": 0.0}} \
         where label is exactly one of: {}. Do not add any other text.",
        labels.join(", ")
    )
}

/// Parse the assistant's free-text answer into a candidate.
///
/// Fails with [`RemoteError::Parse`] when no JSON object can be located or
/// the `label` field is missing. An unresolvable label is not an error; it
/// passes through as [`crate::Label::Unrecognized`].
pub fn parse_reply(text: &str) -> Result<Candidate, RemoteError> {
    let body = strip_code_fences(text);
    let object = extract_json_object(body)
        .ok_or_else(|| RemoteError::Parse(format!("no JSON object in reply: {}", preview(text))))?;

    let value: serde_json::Value = serde_json::from_str(object)
        .map_err(|e| RemoteError::Parse(format!("malformed JSON in reply: {e}")))?;

    let raw_label = value
        .get("label")
        .and_then(|l| l.as_str())
        .ok_or_else(|| RemoteError::Parse("reply is missing the label field".to_string()))?;
    if raw_label.trim().is_empty() {
        return Err(RemoteError::Parse("reply has an empty label".to_string()));
    }

    let confidence = value
        .get("confidence")
        .and_then(|c| c.as_f64())
        .map_or(DEFAULT_CONFIDENCE, |c| c.clamp(0.0, 1.0) as f32);

    Ok(Candidate::new(vocabulary::resolve(raw_label), confidence))
}

/// Strip a surrounding ``` fence (with or without a language tag).
fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Skip the language tag line, then drop the closing fence.
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    body.rsplit_once("```").map_or(body, |(inner, _)| inner).trim()
}

/// The first balanced-looking `{...}` span in the text.
fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

fn preview(text: &str) -> String {
    const LIMIT: usize = 80;
    let mut out: String = text.chars().take(LIMIT).collect();
    if text.chars().count() > LIMIT {
        out.push('…');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Label;

    #[test]
    fn plain_json_parses() {
        let c = parse_reply(r#"{"label": "oil_pressure", "confidence": 0.92}"#).unwrap();
        assert_eq!(c.label, Label::Known("oil_pressure"));
        assert!((c.confidence - 0.92).abs() < 1e-6);
    }

    #[test]
    fn fenced_json_parses() {
        let text = "```json\n{\"label\": \"oil_pressure\", \"confidence\": 0.92}\n```";
        let c = parse_reply(text).unwrap();
        assert_eq!(c.label, Label::Known("oil_pressure"));
        assert!((c.confidence - 0.92).abs() < 1e-6);
    }

    #[test]
    fn json_embedded_in_prose_parses() {
        let text = "Sure! Here is the result: {\"label\": \"abs\"} Hope that helps.";
        let c = parse_reply(text).unwrap();
        assert_eq!(c.label, Label::Known("abs"));
    }

    #[test]
    fn missing_confidence_gets_documented_default() {
        let c = parse_reply(r#"{"label": "seat_belt"}"#).unwrap();
        assert!((c.confidence - DEFAULT_CONFIDENCE).abs() < 1e-6);
    }

    #[test]
    fn non_numeric_confidence_gets_documented_default() {
        let c = parse_reply(r#"{"label": "seat_belt", "confidence": "high"}"#).unwrap();
        assert!((c.confidence - DEFAULT_CONFIDENCE).abs() < 1e-6);
    }

    #[test]
    fn out_of_range_confidence_is_clamped() {
        let c = parse_reply(r#"{"label": "seat_belt", "confidence": 1.7}"#).unwrap();
        assert!((c.confidence - 1.0).abs() < 1e-6);
    }

    #[test]
    fn unresolvable_label_passes_through() {
        let c = parse_reply(r#"{"label": "mystery_light", "confidence": 0.5}"#).unwrap();
        assert_eq!(c.label, Label::Unrecognized("mystery_light".into()));
    }

    #[test]
    fn substring_label_resolves() {
        let c = parse_reply(r#"{"label": "oilpressure_symbol"}"#).unwrap();
        assert_eq!(c.label, Label::Known("oil_pressure"));
    }

    #[test]
    fn missing_label_is_parse_error() {
        let err = parse_reply(r#"{"confidence": 0.9}"#).unwrap_err();
        assert!(matches!(err, RemoteError::Parse(_)));
    }

    #[test]
    fn no_json_object_is_parse_error() {
        let err = parse_reply("I cannot identify this image.").unwrap_err();
        assert!(matches!(err, RemoteError::Parse(_)));
    }

    #[test]
    fn instruction_lists_vocabulary() {
        let text = instruction(&vocabulary::LABELS);
        assert!(text.contains("oil_pressure"));
        assert!(text.contains("JSON"));
    }
}
