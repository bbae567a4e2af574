//! Classification result types

use serde::{Deserialize, Serialize};

/// A label attached to a classification candidate.
///
/// Labels normally come from the closed vocabulary
/// ([`crate::vocabulary::LABELS`]). Remote providers occasionally answer
/// with text that resolves to no vocabulary entry; such answers are carried
/// through explicitly as [`Label::Unrecognized`] rather than discarded, so
/// the caller keeps the full information the provider returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Label {
    /// An entry of the closed vocabulary.
    Known(&'static str),
    /// Raw provider text that failed exact and substring resolution.
    Unrecognized(String),
}

impl Label {
    /// The label text regardless of resolution status.
    pub fn as_str(&self) -> &str {
        match self {
            Label::Known(s) => s,
            Label::Unrecognized(s) => s,
        }
    }

    /// Whether this label belongs to the vocabulary.
    pub fn is_known(&self) -> bool {
        matches!(self, Label::Known(_))
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One ranked guess: a label plus a confidence in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    pub label: Label,
    pub confidence: f32,
}

impl Candidate {
    pub fn new(label: Label, confidence: f32) -> Self {
        Self { label, confidence }
    }
}

/// Where the winning candidates came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    /// On-device classifier.
    Local,
    /// Cloud vision provider.
    Remote,
}

/// Final result of one identification request.
///
/// At most three candidates, ordered by descending confidence (ties broken
/// by vocabulary index). Constructed once and owned by the caller; the
/// pipeline holds no reference to it after returning.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome {
    pub candidates: Vec<Candidate>,
    pub origin: Origin,
    /// Human-readable diagnostic attached when something degraded along the
    /// way (local failure, low confidence without a credential, remote
    /// fallback).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Outcome {
    /// Outcome with candidates and no diagnostic.
    pub fn new(candidates: Vec<Candidate>, origin: Origin) -> Self {
        Self {
            candidates,
            origin,
            note: None,
        }
    }

    /// Empty local outcome carrying only a diagnostic message.
    pub fn empty(note: impl Into<String>) -> Self {
        Self {
            candidates: Vec::new(),
            origin: Origin::Local,
            note: Some(note.into()),
        }
    }

    /// Attach a diagnostic note, consuming self.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Confidence of the top candidate, `0.0` when empty.
    pub fn top_confidence(&self) -> f32 {
        self.candidates.first().map_or(0.0, |c| c.confidence)
    }
}
