//! Atomic extracted facts
//!
//! A [`Fact`] is one extractable statement from a vector's free text. Its id
//! is a content hash of `(role, normalized text, source_ref)`, so
//! re-extracting identical text always yields an identical id.

use crate::hash::SignalHash;
use crate::text::normalize_text;
use serde::{Deserialize, Serialize};

/// One atomic statement extracted from a vector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fact {
    /// Deterministic content-addressed identity
    pub id: SignalHash,
    /// Statement text as extracted (trimmed, original casing)
    pub text: String,
    /// Role of the contributing stakeholder
    pub role: String,
    /// Id of the vector the statement came from
    pub source_ref: String,
}

impl Fact {
    /// Create a fact, deriving its id from the normalized defining fields
    #[must_use]
    pub fn new(
        role: impl Into<String>,
        text: impl Into<String>,
        source_ref: impl Into<String>,
    ) -> Self {
        let role = role.into();
        let text = text.into();
        let source_ref = source_ref.into();
        let id = SignalHash::compute_fields(&[&role, &normalize_text(&text), &source_ref]);
        Self {
            id,
            text,
            role,
            source_ref,
        }
    }

    /// Normalized form of the statement text
    #[inline]
    #[must_use]
    pub fn normalized_text(&self) -> String {
        normalize_text(&self.text)
    }
}
