//! Fact clusters
//!
//! A [`Pattern`] groups facts sharing a structural signal. Its id is a
//! content hash of the sorted supporting fact ids, so identical clusters
//! always carry identical ids regardless of discovery order.

use crate::hash::SignalHash;
use serde::{Deserialize, Serialize};

/// Recurrence strength of a pattern across the fact pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceLevel {
    /// Seen once
    Low,
    /// Seen twice
    Medium,
    /// Seen three or more times
    High,
}

impl RecurrenceLevel {
    /// Derive the recurrence level from a cluster's fact count
    #[inline]
    #[must_use]
    pub fn from_fact_count(count: usize) -> Self {
        match count {
            0 | 1 => Self::Low,
            2 => Self::Medium,
            _ => Self::High,
        }
    }
}

/// A cluster of facts sharing semantic signal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    /// Deterministic hash of the sorted supporting fact ids
    pub pattern_id: SignalHash,
    /// Short structural description of the shared signal
    pub description: String,
    /// Ids of the facts supporting this pattern, sorted ascending
    pub supporting_facts: Vec<SignalHash>,
    /// Distinct roles contributing facts, in first-seen order
    pub roles_observed: Vec<String>,
    /// Recurrence strength derived from cluster size
    pub recurrence_level: RecurrenceLevel,
    /// Cluster confidence in `0..=1`, derived from size and role spread
    pub confidence: f64,
}

impl Pattern {
    /// Build a pattern; supporting fact ids are sorted and the pattern id
    /// derived from them
    #[must_use]
    pub fn new(
        description: impl Into<String>,
        mut supporting_facts: Vec<SignalHash>,
        roles_observed: Vec<String>,
        confidence: f64,
    ) -> Self {
        supporting_facts.sort_unstable();
        let id_fields: Vec<String> = supporting_facts.iter().map(ToString::to_string).collect();
        let pattern_id = SignalHash::compute_fields(&id_fields);
        let recurrence_level = RecurrenceLevel::from_fact_count(supporting_facts.len());
        Self {
            pattern_id,
            description: description.into(),
            supporting_facts,
            roles_observed,
            recurrence_level,
            confidence,
        }
    }
}
