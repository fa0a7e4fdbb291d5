//! Pipeline orchestration
//!
//! [`SynthesisPipeline`] wires the five stages together: extract, detect,
//! synthesize, expand on shortfall, assemble, validate. Each stage is a
//! pure function over its predecessor's output; the only suspension point
//! is the Track B generator call. A run either returns a complete brief or
//! fails with a typed [`SynthesisError`] before any output is visible.

use crate::assembler::{assemble_brief, sort_assertion_pool};
use crate::config::SynthesisConfig;
use crate::detector::detect_patterns;
use crate::error::{InvalidAssertionSummary, SignalDiagnostics, SynthesisError};
use crate::expansion::{
    expand_assertions, CandidateGenerator, DisabledGenerator, ExpansionOutcome,
};
use crate::extractor::extract_facts;
use crate::synthesizer::synthesize_assertions;
use ebs_contract::assertion_violations;
use ebs_signal::{
    ExecutiveAssertionBlock, ExecutiveBriefSynthesis, ExpansionMeta, SignalQuality, SignalStatus,
    Vector,
};
use std::sync::Arc;

/// Caller-supplied context, used only to enrich failure diagnostics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Tenant the run is executed for
    pub tenant_id: Option<String>,
    /// Caller action label, for log correlation
    pub action: Option<String>,
}

impl PipelineOptions {
    /// Create empty options
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With tenant id
    #[inline]
    #[must_use]
    pub fn with_tenant_id(mut self, tenant_id: impl Into<String>) -> Self {
        self.tenant_id = Some(tenant_id.into());
        self
    }

    /// With action label
    #[inline]
    #[must_use]
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }
}

/// The five-stage deterministic synthesis pipeline
///
/// Holds no mutable state; concurrent runs over identical input are safe
/// and produce byte-identical briefs.
#[derive(Clone)]
pub struct SynthesisPipeline {
    config: SynthesisConfig,
    generator: Arc<dyn CandidateGenerator>,
}

impl SynthesisPipeline {
    /// Create a pipeline with Track B disabled
    #[inline]
    #[must_use]
    pub fn new(config: SynthesisConfig) -> Self {
        Self {
            config,
            generator: Arc::new(DisabledGenerator),
        }
    }

    /// With an external candidate generator for Track B
    #[inline]
    #[must_use]
    pub fn with_generator(mut self, generator: Arc<dyn CandidateGenerator>) -> Self {
        self.generator = generator;
        self
    }

    /// Get configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &SynthesisConfig {
        &self.config
    }

    /// Execute one synthesis run.
    ///
    /// # Errors
    /// - `INSUFFICIENT_DATA` when a stage receives empty input
    /// - `INSUFFICIENT_SIGNAL` when both tracks together yield fewer valid
    ///   assertions than the configured floor
    /// - `CONTRACT_VIOLATION` when the assembled brief fails validation
    pub async fn execute(
        &self,
        vectors: &[Vector],
        options: &PipelineOptions,
    ) -> Result<ExecutiveBriefSynthesis, SynthesisError> {
        tracing::info!(
            vectors = vectors.len(),
            action = options.action.as_deref().unwrap_or("synthesize"),
            "starting executive brief synthesis"
        );

        let facts = extract_facts(vectors)?;
        let patterns = detect_patterns(&facts)?;
        let drafted = synthesize_assertions(&patterns, &facts)?;
        let (mut pool, invalid_assertions) = screen_track_a(drafted);

        let mut expansion_outcome = ExpansionOutcome::not_invoked();
        if pool.len() < self.config.target_assertion_count {
            let shortfall = self.config.target_assertion_count - pool.len();
            expansion_outcome = expand_assertions(
                self.generator.as_ref(),
                &facts,
                &patterns,
                &self.config,
                shortfall,
            )
            .await;
            merge_accepted(&mut pool, &expansion_outcome.accepted);
        }

        sort_assertion_pool(&mut pool);

        if pool.len() < self.config.min_required_assertions {
            let diagnostics = SignalDiagnostics {
                assertion_count: pool.len(),
                vector_count: vectors.len(),
                fact_count: facts.len(),
                pattern_count: patterns.len(),
                invalid_assertions,
                expansion_invoked: expansion_outcome.invoked,
                expansion_accepted_count: expansion_outcome.accepted_count(),
                tenant_id: options.tenant_id.clone(),
            };
            tracing::warn!(
                assertions = diagnostics.assertion_count,
                floor = self.config.min_required_assertions,
                "valid assertion yield below floor"
            );
            return Err(SynthesisError::insufficient_signal(diagnostics));
        }

        let signal_quality = SignalQuality {
            status: if pool.len() >= self.config.target_assertion_count {
                SignalStatus::Sufficient
            } else {
                SignalStatus::LowSignal
            },
            assertion_count: pool.len(),
            target_count: self.config.target_assertion_count,
        };
        let expansion_meta = ExpansionMeta {
            invoked: expansion_outcome.invoked,
            accepted_count: expansion_outcome.accepted_count(),
            rejected_count: expansion_outcome.rejected_count(),
        };

        let brief = assemble_brief(&pool, signal_quality, expansion_meta);
        ebs_contract::ensure_valid(&brief)?;

        tracing::info!(
            assertions = brief.executive_assertion_block.len(),
            "executive brief synthesis complete"
        );
        Ok(brief)
    }
}

impl std::fmt::Debug for SynthesisPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SynthesisPipeline")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Execute one run with default configuration and Track B disabled.
///
/// Convenience entry point for callers that do not hold a pipeline.
///
/// # Errors
/// Same failure modes as [`SynthesisPipeline::execute`].
pub async fn execute_synthesis_pipeline(
    vectors: &[Vector],
    options: &PipelineOptions,
) -> Result<ExecutiveBriefSynthesis, SynthesisError> {
    SynthesisPipeline::new(SynthesisConfig::default())
        .execute(vectors, options)
        .await
}

/// Screen Track A output through the per-assertion contract rules.
///
/// Invalid assertions are counted per rule for diagnostics, never silently
/// dropped.
fn screen_track_a(
    drafted: Vec<ExecutiveAssertionBlock>,
) -> (Vec<ExecutiveAssertionBlock>, InvalidAssertionSummary) {
    let mut valid = Vec::with_capacity(drafted.len());
    let mut summary = InvalidAssertionSummary::default();
    for (i, block) in drafted.into_iter().enumerate() {
        let violations = assertion_violations(&format!("assertions[{i}]"), &block);
        if violations.is_empty() {
            valid.push(block);
        } else {
            summary.total += 1;
            for violation in violations {
                *summary.by_rule.entry(violation.rule).or_insert(0) += 1;
            }
        }
    }
    (valid, summary)
}

/// Merge accepted Track B blocks into the pool, deduplicating by id
fn merge_accepted(pool: &mut Vec<ExecutiveAssertionBlock>, accepted: &[ExecutiveAssertionBlock]) {
    for block in accepted {
        if !pool.iter().any(|existing| existing.id == block.id) {
            pool.push(block.clone());
        }
    }
}
