//! The assembled executive brief
//!
//! [`ExecutiveBriefSynthesis`] is the output root: rendered narrative
//! content, internal meta (never rendered), and the capped assertion views.
//! Constructed once per pipeline run, immutable thereafter, never partially
//! returned on failure.

use crate::assertion::{ExecutiveAssertionBlock, SectionKey};
use crate::hash::SignalHash;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Maximum entries in `executiveAssertionBlock`
pub const MAX_EXEC_ASSERTIONS: usize = 4;
/// Maximum entries in `topRisks`
pub const MAX_TOP_RISKS: usize = 5;
/// Maximum entries in `leverageMoves`
pub const MAX_LEVERAGE_MOVES: usize = 5;

/// Signal sufficiency classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalStatus {
    /// Valid assertion yield met the target count
    Sufficient,
    /// Yield met the minimum floor but not the target
    LowSignal,
}

/// Signal quality summary carried in meta
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalQuality {
    /// Sufficiency classification
    pub status: SignalStatus,
    /// Valid assertions available after both tracks
    pub assertion_count: usize,
    /// Target assertion count for a full brief
    pub target_count: usize,
}

/// Contrast coverage summary carried in meta
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContrastCoverage {
    /// Selected assertions backed by more than one role
    pub multi_role_count: usize,
    /// Highest contrast score among selected assertions
    pub max_contrast: f64,
}

/// Elaboration bookkeeping carried in meta, never rendered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElaborationMeta {
    /// Whether any assertion received the three-paragraph treatment
    pub elaboration_applied: bool,
    /// Ids of elaborated assertions
    pub elaborated_assertion_ids: Vec<SignalHash>,
    /// Rendered paragraph count per section
    pub section_depth: IndexMap<SectionKey, usize>,
}

/// Track B bookkeeping carried in meta, never rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpansionMeta {
    /// Whether the external generator was invoked
    pub invoked: bool,
    /// Candidates accepted after structural re-validation
    pub accepted_count: usize,
    /// Candidates rejected by re-validation
    pub rejected_count: usize,
}

impl ExpansionMeta {
    /// Meta for a run that never reached Track B
    #[inline]
    #[must_use]
    pub const fn not_invoked() -> Self {
        Self {
            invoked: false,
            accepted_count: 0,
            rejected_count: 0,
        }
    }
}

/// Rendered narrative content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BriefContent {
    /// Interpretive opening summary
    pub executive_summary: String,
    /// Paragraphs per narrative bucket, keyed in canonical section order
    pub sections: IndexMap<SectionKey, Vec<String>>,
}

impl BriefContent {
    /// Iterate every rendered string with its contract path
    pub fn rendered_paths(&self) -> impl Iterator<Item = (String, &str)> {
        std::iter::once(("content.executiveSummary".to_string(), self.executive_summary.as_str()))
            .chain(self.sections.iter().flat_map(|(key, paragraphs)| {
                paragraphs.iter().enumerate().map(move |(i, p)| {
                    (format!("content.sections.{}[{i}]", key.as_str()), p.as_str())
                })
            }))
    }
}

/// Internal metadata, never rendered into narrative content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BriefMeta {
    /// Signal sufficiency summary
    pub signal_quality: SignalQuality,
    /// Primary-routed assertion count per section
    pub section_coverage: IndexMap<SectionKey, usize>,
    /// Contrast coverage summary
    pub contrast_coverage: ContrastCoverage,
    /// Elaboration bookkeeping
    pub elaboration: ElaborationMeta,
    /// Track B bookkeeping
    pub expansion: ExpansionMeta,
}

/// The output root of a synthesis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutiveBriefSynthesis {
    /// Rendered narrative content; `None` only in malformed external input
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<BriefContent>,
    /// Internal metadata; `None` only in malformed external input
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<BriefMeta>,
    /// Ranked assertion blocks, at most four
    #[serde(rename = "executiveAssertionBlock")]
    pub executive_assertion_block: Vec<ExecutiveAssertionBlock>,
    /// Risk view over the assertion pool, at most five entries
    #[serde(rename = "topRisks")]
    pub top_risks: Vec<String>,
    /// Leverage view over the assertion pool, at most five entries
    #[serde(rename = "leverageMoves")]
    pub leverage_moves: Vec<String>,
}
