//! Stage 4: assertion expansion (Track B)
//!
//! Invoked only when Track A's valid yield falls short of the target
//! count. The external generator is untrusted: every candidate is
//! re-validated structurally before acceptance, and a generator failure is
//! downgraded to zero candidates. This is the single fail-soft boundary in
//! the pipeline; everything else fails closed.

use crate::config::SynthesisConfig;
use crate::scoring::{
    alignment_for, confidence_score, contrast_score, risk_marked, ALLOWED_CONSTRAINT_SIGNALS,
};
use crate::synthesizer::{evidence_entry, secondary_sections_for};
use async_trait::async_trait;
use ebs_signal::text::word_count;
use ebs_signal::{
    ExecutiveAssertionBlock, Fact, Pattern, SectionKey, SignalHash, MAX_ASSERTION_WORDS,
    MAX_EVIDENCE_ITEMS, MIN_EVIDENCE_ITEMS,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Candidate cites an unknown section key
pub const CANDIDATE_SECTION_KEY: &str = "CANDIDATE_SECTION_KEY";
/// Candidate cites a constraint signal outside the allowed set
pub const CANDIDATE_CONSTRAINT_SIGNAL: &str = "CANDIDATE_CONSTRAINT_SIGNAL";
/// Candidate cites a fact id that does not resolve
pub const CANDIDATE_EVIDENCE_REF: &str = "CANDIDATE_EVIDENCE_REF";

/// Raw candidate proposed by the external generator (untrusted input)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssertionCandidate {
    /// Claimed narrative bucket, wire form
    #[serde(rename = "primarySection")]
    pub primary_section: String,
    /// Proposed declarative claim
    pub assertion: String,
    /// Ids of existing facts grounding the claim
    pub evidence_fact_ids: Vec<String>,
    /// Proposed consequence text
    pub implication: String,
    /// Claimed structural root-cause label
    pub constraint_signal: String,
}

/// Options passed through to the generator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpansionOptions {
    /// Hard cap on candidates considered
    pub max_candidates: usize,
    /// How many assertions Track A fell short by
    pub shortfall: usize,
}

/// External generator failure modes
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// Transport-level failure
    #[error("generator transport failure: {0}")]
    Transport(String),
    /// The generator's own client timed out
    #[error("generator timed out")]
    Timeout,
    /// Response could not be interpreted
    #[error("malformed generator response: {0}")]
    Malformed(String),
}

/// External candidate generator seam
///
/// The deterministic path only ever sees stub implementations; the real
/// network-backed generator lives behind this trait and is mocked in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CandidateGenerator: Send + Sync {
    /// Propose additional assertion candidates grounded in existing facts
    async fn propose_candidates(
        &self,
        facts: &[Fact],
        patterns: &[Pattern],
        options: &ExpansionOptions,
    ) -> Result<Vec<AssertionCandidate>, GeneratorError>;
}

/// Generator used when Track B is not configured; proposes nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledGenerator;

#[async_trait]
impl CandidateGenerator for DisabledGenerator {
    async fn propose_candidates(
        &self,
        _facts: &[Fact],
        _patterns: &[Pattern],
        _options: &ExpansionOptions,
    ) -> Result<Vec<AssertionCandidate>, GeneratorError> {
        Ok(Vec::new())
    }
}

/// Result of one Track B pass
#[derive(Debug, Clone, Default)]
pub struct ExpansionOutcome {
    /// Whether the generator was invoked at all
    pub invoked: bool,
    /// Candidates accepted after structural re-validation
    pub accepted: Vec<ExecutiveAssertionBlock>,
    /// Rejection count per rule id
    pub rejected_by_rule: BTreeMap<String, usize>,
}

impl ExpansionOutcome {
    /// Outcome for a run that never reached Track B
    #[inline]
    #[must_use]
    pub fn not_invoked() -> Self {
        Self::default()
    }

    /// Accepted candidate count
    #[inline]
    #[must_use]
    pub fn accepted_count(&self) -> usize {
        self.accepted.len()
    }

    /// Total rejected candidate count
    #[inline]
    #[must_use]
    pub fn rejected_count(&self) -> usize {
        self.rejected_by_rule.values().sum()
    }
}

/// Run Track B: invoke the generator once and re-validate every candidate.
///
/// A generator error is converted to zero accepted candidates and logged;
/// it never aborts the pipeline by itself.
pub async fn expand_assertions(
    generator: &dyn CandidateGenerator,
    facts: &[Fact],
    patterns: &[Pattern],
    config: &SynthesisConfig,
    shortfall: usize,
) -> ExpansionOutcome {
    let options = ExpansionOptions {
        max_candidates: config.max_expansion_candidates,
        shortfall,
    };

    let candidates = match generator.propose_candidates(facts, patterns, &options).await {
        Ok(candidates) => candidates,
        Err(error) => {
            tracing::warn!(%error, "expansion generator failed; continuing with zero candidates");
            return ExpansionOutcome {
                invoked: true,
                accepted: Vec::new(),
                rejected_by_rule: BTreeMap::new(),
            };
        }
    };

    let fact_index: BTreeMap<SignalHash, &Fact> =
        facts.iter().map(|fact| (fact.id, fact)).collect();

    let mut outcome = ExpansionOutcome {
        invoked: true,
        ..ExpansionOutcome::default()
    };
    for candidate in candidates.into_iter().take(config.max_expansion_candidates) {
        match accept_candidate(&candidate, &fact_index) {
            Ok(block) => outcome.accepted.push(block),
            Err(rule) => {
                tracing::debug!(rule, "expansion candidate rejected");
                *outcome.rejected_by_rule.entry(rule.to_string()).or_insert(0) += 1;
            }
        }
    }

    tracing::info!(
        accepted = outcome.accepted.len(),
        rejected = outcome.rejected_count(),
        "assertion expansion complete"
    );
    outcome
}

/// Structurally re-validate one candidate and convert it to a block.
///
/// Returns the id of the first violated rule on rejection; a rejected
/// candidate never fails the run.
fn accept_candidate(
    candidate: &AssertionCandidate,
    fact_index: &BTreeMap<SignalHash, &Fact>,
) -> Result<ExecutiveAssertionBlock, &'static str> {
    if candidate.assertion.trim().is_empty() || candidate.implication.trim().is_empty() {
        return Err(ebs_contract::EAB_REQUIRED_FIELD);
    }
    if word_count(&candidate.assertion) > MAX_ASSERTION_WORDS {
        return Err(ebs_contract::EAB_ASSERTION_WORD_LIMIT);
    }
    let Some(primary) = SectionKey::from_wire(&candidate.primary_section) else {
        return Err(CANDIDATE_SECTION_KEY);
    };
    if !ALLOWED_CONSTRAINT_SIGNALS.contains(&candidate.constraint_signal.as_str()) {
        return Err(CANDIDATE_CONSTRAINT_SIGNAL);
    }
    if !(MIN_EVIDENCE_ITEMS..=MAX_EVIDENCE_ITEMS).contains(&candidate.evidence_fact_ids.len()) {
        return Err(ebs_contract::EAB_EVIDENCE_COUNT);
    }

    let mut cited: Vec<&Fact> = Vec::new();
    for raw_id in &candidate.evidence_fact_ids {
        let id = SignalHash::from_str(raw_id).map_err(|_| CANDIDATE_EVIDENCE_REF)?;
        let fact = fact_index.get(&id).copied().ok_or(CANDIDATE_EVIDENCE_REF)?;
        cited.push(fact);
    }

    let mut roles: Vec<String> = Vec::new();
    for fact in &cited {
        if !roles.contains(&fact.role) {
            roles.push(fact.role.clone());
        }
    }
    let (strength, scope) = alignment_for(&roles);
    let contrast = contrast_score(roles.len(), risk_marked(&candidate.assertion));
    let confidence = confidence_score(cited.len(), roles.len());
    let source_refs: Vec<SignalHash> = cited.iter().map(|fact| fact.id).collect();
    let evidence: Vec<String> = cited.iter().map(|fact| evidence_entry(fact)).collect();

    Ok(ExecutiveAssertionBlock::new(
        candidate.assertion.trim(),
        candidate.implication.trim(),
        candidate.constraint_signal.as_str(),
        primary,
        source_refs,
    )
    .with_evidence(evidence)
    .with_secondary_sections(secondary_sections_for(primary, &candidate.constraint_signal))
    .with_contrast_score(contrast)
    .with_confidence(confidence)
    .with_alignment(strength, scope)
    .with_roles_observed(roles))
}
