//! Error taxonomy for the synthesis pipeline
//!
//! All failures are fail-closed: a run either returns a complete brief or
//! throws a [`SynthesisError`] before any output is visible. The error
//! carries `{stage, code, details}` with details shaped per failure mode,
//! so operators can see exactly why a run produced nothing.

use ebs_contract::{ContractError, Violation};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

/// Pipeline stage a failure is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stage {
    /// Vector → fact extraction
    FactExtraction,
    /// Fact → pattern clustering
    PatternSynthesis,
    /// Pattern → assertion synthesis
    AssertionSynthesis,
    /// Final contract validation of the assembled brief
    AssemblyValidation,
    /// Top-level gate spanning both tracks
    Pipeline,
}

impl Stage {
    /// Wire form of the stage
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Stage::FactExtraction => "FACT_EXTRACTION",
            Stage::PatternSynthesis => "PATTERN_SYNTHESIS",
            Stage::AssertionSynthesis => "ASSERTION_SYNTHESIS",
            Stage::AssemblyValidation => "ASSEMBLY_VALIDATION",
            Stage::Pipeline => "PIPELINE",
        }
    }
}

impl Display for Stage {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// A stage received empty input it cannot process
    InsufficientData,
    /// Both tracks together yielded fewer valid assertions than the floor
    InsufficientSignal,
    /// The assembled brief failed a structural contract rule
    ContractViolation,
}

impl ErrorCode {
    /// Wire form of the code
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InsufficientData => "INSUFFICIENT_DATA",
            ErrorCode::InsufficientSignal => "INSUFFICIENT_SIGNAL",
            ErrorCode::ContractViolation => "CONTRACT_VIOLATION",
        }
    }
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Track A assertions rejected by the validity screen, counted per rule
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidAssertionSummary {
    /// Total rejected assertions
    pub total: usize,
    /// Rejection count per rule id
    pub by_rule: BTreeMap<String, usize>,
}

/// Diagnostic payload for `INSUFFICIENT_SIGNAL`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalDiagnostics {
    /// Valid assertions available after both tracks
    pub assertion_count: usize,
    /// Input vectors
    pub vector_count: usize,
    /// Extracted facts
    pub fact_count: usize,
    /// Detected patterns
    pub pattern_count: usize,
    /// Track A rejections, per rule
    pub invalid_assertions: InvalidAssertionSummary,
    /// Whether Track B was invoked
    pub expansion_invoked: bool,
    /// Candidates accepted by Track B re-validation
    pub expansion_accepted_count: usize,
    /// Caller tenant, when provided in the pipeline options
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
}

/// Failure-mode-specific detail payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ErrorDetails {
    /// `INSUFFICIENT_DATA` carries no payload
    Empty,
    /// `INSUFFICIENT_SIGNAL` diagnostics
    Signal(SignalDiagnostics),
    /// `CONTRACT_VIOLATION` with the complete sorted violation list
    Contract {
        /// Violations sorted `(path, rule)` ascending
        violations: Vec<Violation>,
    },
}

/// Typed pipeline failure
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("synthesis failed at {stage} with {code}")]
pub struct SynthesisError {
    /// Stage the failure is attributed to
    pub stage: Stage,
    /// Failure classification
    pub code: ErrorCode,
    /// Failure-mode-specific payload
    pub details: ErrorDetails,
}

impl SynthesisError {
    /// A stage received empty input
    #[inline]
    #[must_use]
    pub fn insufficient_data(stage: Stage) -> Self {
        Self {
            stage,
            code: ErrorCode::InsufficientData,
            details: ErrorDetails::Empty,
        }
    }

    /// The valid assertion yield stayed below the required floor
    #[inline]
    #[must_use]
    pub fn insufficient_signal(diagnostics: SignalDiagnostics) -> Self {
        Self {
            stage: Stage::Pipeline,
            code: ErrorCode::InsufficientSignal,
            details: ErrorDetails::Signal(diagnostics),
        }
    }

    /// Signal diagnostics, when this is an `INSUFFICIENT_SIGNAL` failure
    #[inline]
    #[must_use]
    pub fn signal_diagnostics(&self) -> Option<&SignalDiagnostics> {
        match &self.details {
            ErrorDetails::Signal(diagnostics) => Some(diagnostics),
            _ => None,
        }
    }

    /// Violations, when this is a `CONTRACT_VIOLATION` failure
    #[inline]
    #[must_use]
    pub fn violations(&self) -> Option<&[Violation]> {
        match &self.details {
            ErrorDetails::Contract { violations } => Some(violations),
            _ => None,
        }
    }
}

impl From<ContractError> for SynthesisError {
    fn from(error: ContractError) -> Self {
        let ContractError::Violations { violations } = error;
        Self {
            stage: Stage::AssemblyValidation,
            code: ErrorCode::ContractViolation,
            details: ErrorDetails::Contract { violations },
        }
    }
}
