//! Executive assertion blocks
//!
//! The [`ExecutiveAssertionBlock`] is the central synthesized entity: a
//! short declarative claim with evidence, implication, and routing metadata.
//! Wire field names preserve the original brief contract, which mixes camel
//! and snake case.

use crate::hash::SignalHash;
use serde::{Deserialize, Serialize};

/// Maximum words allowed in an assertion sentence
pub const MAX_ASSERTION_WORDS: usize = 24;
/// Minimum evidence entries per assertion
pub const MIN_EVIDENCE_ITEMS: usize = 1;
/// Maximum evidence entries per assertion
pub const MAX_EVIDENCE_ITEMS: usize = 3;

/// The four fixed narrative buckets of the brief
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SectionKey {
    /// Day-to-day operating picture
    OperatingReality,
    /// Structural constraints shaping delivery
    ConstraintLandscape,
    /// Divergence-driven risk surface
    BlindSpotRisks,
    /// Cross-role agreement signals
    AlignmentSignals,
}

impl SectionKey {
    /// All sections in canonical rendering order
    pub const ALL: [SectionKey; 4] = [
        SectionKey::OperatingReality,
        SectionKey::ConstraintLandscape,
        SectionKey::BlindSpotRisks,
        SectionKey::AlignmentSignals,
    ];

    /// Wire form of the key
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            SectionKey::OperatingReality => "OPERATING_REALITY",
            SectionKey::ConstraintLandscape => "CONSTRAINT_LANDSCAPE",
            SectionKey::BlindSpotRisks => "BLIND_SPOT_RISKS",
            SectionKey::AlignmentSignals => "ALIGNMENT_SIGNALS",
        }
    }

    /// Parse a wire-form key; `None` for anything outside the four buckets
    #[must_use]
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "OPERATING_REALITY" => Some(SectionKey::OperatingReality),
            "CONSTRAINT_LANDSCAPE" => Some(SectionKey::ConstraintLandscape),
            "BLIND_SPOT_RISKS" => Some(SectionKey::BlindSpotRisks),
            "ALIGNMENT_SIGNALS" => Some(SectionKey::AlignmentSignals),
            _ => None,
        }
    }
}

/// Internal alignment strength (never rendered)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignmentStrength {
    /// Single-role signal
    Low,
    /// Two roles agree
    Medium,
    /// Three or more roles agree
    High,
}

/// Internal alignment scope (never rendered)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlignmentScope {
    /// Observed by several distinct roles
    CrossRole,
    /// Observed only from the leadership vantage point
    LeadershipOnly,
    /// Observed by one non-leadership role
    Fragmented,
}

/// An executive-facing synthesized claim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutiveAssertionBlock {
    /// Deterministic hash of assertion text + source refs
    pub id: SignalHash,
    /// Declarative present-tense claim, at most 24 words
    pub assertion: String,
    /// 1 to 3 paraphrased supporting entries, never raw quotes
    pub evidence: Vec<String>,
    /// At most two sentences of consequence
    pub implication: String,
    /// Structural root-cause label from the allowed set
    pub constraint_signal: String,
    /// The narrative bucket this assertion belongs to
    #[serde(rename = "primarySection")]
    pub primary_section: SectionKey,
    /// Fallback buckets used when the primary section is underpopulated
    #[serde(rename = "secondarySections", default, skip_serializing_if = "Vec::is_empty")]
    pub secondary_sections: Vec<SectionKey>,
    /// Role-divergence signal in `0..=1`
    #[serde(rename = "contrastScore", default, skip_serializing_if = "Option::is_none")]
    pub contrast_score: Option<f64>,
    /// Internal only
    pub alignment_strength: AlignmentStrength,
    /// Internal only
    pub alignment_scope: AlignmentScope,
    /// Synthesis confidence in `0..=1`
    pub confidence_score: f64,
    /// Pattern/fact ids backing this assertion
    pub source_refs: Vec<SignalHash>,
    /// Distinct contributing roles, when known
    #[serde(rename = "roles_observed", default, skip_serializing_if = "Option::is_none")]
    pub roles_observed: Option<Vec<String>>,
}

impl ExecutiveAssertionBlock {
    /// Build a block; the id is derived from the assertion text and source
    /// refs, which are fixed at construction
    #[must_use]
    pub fn new(
        assertion: impl Into<String>,
        implication: impl Into<String>,
        constraint_signal: impl Into<String>,
        primary_section: SectionKey,
        source_refs: Vec<SignalHash>,
    ) -> Self {
        let assertion = assertion.into();
        let mut id_fields = vec![assertion.clone()];
        id_fields.extend(source_refs.iter().map(ToString::to_string));
        let id = SignalHash::compute_fields(&id_fields);
        Self {
            id,
            assertion,
            evidence: Vec::new(),
            implication: implication.into(),
            constraint_signal: constraint_signal.into(),
            primary_section,
            secondary_sections: Vec::new(),
            contrast_score: None,
            alignment_strength: AlignmentStrength::Low,
            alignment_scope: AlignmentScope::Fragmented,
            confidence_score: 0.0,
            source_refs,
            roles_observed: None,
        }
    }

    /// With evidence entries
    #[inline]
    #[must_use]
    pub fn with_evidence(mut self, evidence: Vec<String>) -> Self {
        self.evidence = evidence;
        self
    }

    /// With secondary sections
    #[inline]
    #[must_use]
    pub fn with_secondary_sections(mut self, sections: Vec<SectionKey>) -> Self {
        self.secondary_sections = sections;
        self
    }

    /// With contrast score
    #[inline]
    #[must_use]
    pub fn with_contrast_score(mut self, score: f64) -> Self {
        self.contrast_score = Some(score);
        self
    }

    /// With confidence score
    #[inline]
    #[must_use]
    pub fn with_confidence(mut self, score: f64) -> Self {
        self.confidence_score = score;
        self
    }

    /// With alignment classification
    #[inline]
    #[must_use]
    pub fn with_alignment(mut self, strength: AlignmentStrength, scope: AlignmentScope) -> Self {
        self.alignment_strength = strength;
        self.alignment_scope = scope;
        self
    }

    /// With observed roles
    #[inline]
    #[must_use]
    pub fn with_roles_observed(mut self, roles: Vec<String>) -> Self {
        self.roles_observed = Some(roles);
        self
    }

    /// Contrast score, treating absence as zero (for sorting)
    #[inline]
    #[must_use]
    pub fn contrast_or_zero(&self) -> f64 {
        self.contrast_score.unwrap_or(0.0)
    }
}
