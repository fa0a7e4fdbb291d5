//! Testing utilities for the EBS workspace
//!
//! Shared fixtures and deterministic stub generators.

#![allow(missing_docs)]

use async_trait::async_trait;
use ebs_signal::{Fact, Pattern, SectionKey, Vector};
use ebs_synthesis::{
    AssertionCandidate, CandidateGenerator, ExpansionOptions, GeneratorError,
};

/// Build a vector with a fixed tenant
pub fn vector(id: &str, role: &str, constraints: &str) -> Vector {
    Vector::new(id, "tenant-fixture", role, constraints)
}

/// Canonical four-role fixture: one concrete, lexically disjoint constraint
/// per role, so each vector yields exactly one singleton pattern.
pub fn four_role_vectors() -> Vec<Vector> {
    vec![
        vector("v-1", "owner", "Strategic planning keeps slipping behind urgent firefighting."),
        vector("v-2", "sales", "Pipeline forecasts swing wildly between quarters."),
        vector("v-3", "ops", "Inventory handoffs stall whenever approvals queue overnight."),
        vector("v-4", "delivery", "Installation crews wait on missing parts constantly."),
    ]
}

/// First three roles of the canonical fixture
pub fn three_role_vectors() -> Vec<Vector> {
    four_role_vectors()[..3].to_vec()
}

/// First two roles of the canonical fixture
pub fn two_role_vectors() -> Vec<Vector> {
    four_role_vectors()[..2].to_vec()
}

/// A structurally valid candidate grounded in the first given fact
pub fn candidate_grounded_in(facts: &[Fact], section: SectionKey) -> AssertionCandidate {
    AssertionCandidate {
        primary_section: section.as_str().to_string(),
        assertion: "Shared checkpoints gate most delivery work across teams.".to_string(),
        evidence_fact_ids: vec![facts[0].id.to_string()],
        implication: "Work waits on a single checkpoint longer than anyone plans for.".to_string(),
        constraint_signal: "dependency-bottleneck".to_string(),
    }
}

/// Generator returning a fixed candidate list on every call
#[derive(Debug, Clone, Default)]
pub struct ScriptedGenerator {
    pub candidates: Vec<AssertionCandidate>,
}

impl ScriptedGenerator {
    pub fn new(candidates: Vec<AssertionCandidate>) -> Self {
        Self { candidates }
    }
}

#[async_trait]
impl CandidateGenerator for ScriptedGenerator {
    async fn propose_candidates(
        &self,
        _facts: &[Fact],
        _patterns: &[Pattern],
        _options: &ExpansionOptions,
    ) -> Result<Vec<AssertionCandidate>, GeneratorError> {
        Ok(self.candidates.clone())
    }
}

/// Generator that always fails, for fail-soft boundary tests
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingGenerator;

#[async_trait]
impl CandidateGenerator for FailingGenerator {
    async fn propose_candidates(
        &self,
        _facts: &[Fact],
        _patterns: &[Pattern],
        _options: &ExpansionOptions,
    ) -> Result<Vec<AssertionCandidate>, GeneratorError> {
        Err(GeneratorError::Transport("fixture generator offline".to_string()))
    }
}
