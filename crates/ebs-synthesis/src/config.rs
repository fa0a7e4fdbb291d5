//! Pipeline configuration

use serde::{Deserialize, Serialize};

/// Tuning knobs for a synthesis run
///
/// Defaults encode the brief contract: four assertions target, three
/// minimum, six expansion candidates considered at most.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthesisConfig {
    /// Assertion count for a full brief; Track B triggers below this
    pub target_assertion_count: usize,
    /// Floor below which the run fails with `INSUFFICIENT_SIGNAL`
    pub min_required_assertions: usize,
    /// Hard cap on Track B candidates considered per run
    pub max_expansion_candidates: usize,
}

impl SynthesisConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With target assertion count
    #[inline]
    #[must_use]
    pub fn with_target_assertion_count(mut self, count: usize) -> Self {
        self.target_assertion_count = count;
        self
    }

    /// With minimum required assertions
    #[inline]
    #[must_use]
    pub fn with_min_required_assertions(mut self, count: usize) -> Self {
        self.min_required_assertions = count;
        self
    }

    /// With expansion candidate cap
    #[inline]
    #[must_use]
    pub fn with_max_expansion_candidates(mut self, count: usize) -> Self {
        self.max_expansion_candidates = count;
        self
    }
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            target_assertion_count: 4,
            min_required_assertions: 3,
            max_expansion_candidates: 6,
        }
    }
}
