//! EBS Synthesis - Deterministic Executive Brief Pipeline
//!
//! The central engine that:
//! - Extracts atomic facts from role-tagged stakeholder vectors
//! - Clusters facts into patterns with recurrence and confidence scores
//! - Synthesizes ranked executive assertions with contrast scoring
//! - Expands the assertion pool through an external generator on shortfall
//! - Assembles and contract-validates the final brief
//!
//! Identical input produces byte-identical output: every id is a content
//! hash, every score an integer-basis-point formula, every sort a total
//! order ending in id comparison.
//!
//! # Example
//!
//! ```rust,ignore
//! use ebs_synthesis::{execute_synthesis_pipeline, PipelineOptions};
//!
//! # async fn example(vectors: Vec<ebs_signal::Vector>) -> Result<(), Box<dyn std::error::Error>> {
//! let brief = execute_synthesis_pipeline(&vectors, &PipelineOptions::new()).await?;
//! println!("{} assertions", brief.executive_assertion_block.len());
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod assembler;
pub mod config;
pub mod detector;
pub mod error;
pub mod expansion;
pub mod extractor;
pub mod pipeline;
pub mod scoring;
pub mod synthesizer;

// Re-exports for convenience
pub use assembler::{
    assemble_brief, elaboration_eligible, fallback_sentence, sort_assertion_pool,
    ELABORATION_MIN_CONFIDENCE, ELABORATION_MIN_CONTRAST, FALLBACK_ALIGNMENT_SIGNALS,
    FALLBACK_BLIND_SPOT_RISKS, FALLBACK_CONSTRAINT_LANDSCAPE, FALLBACK_OPERATING_REALITY,
    MISSING_ROLES_PHRASE,
};
pub use config::SynthesisConfig;
pub use detector::detect_patterns;
pub use error::{
    ErrorCode, ErrorDetails, InvalidAssertionSummary, SignalDiagnostics, Stage, SynthesisError,
};
pub use expansion::{
    AssertionCandidate, CandidateGenerator, DisabledGenerator, ExpansionOptions, ExpansionOutcome,
    GeneratorError,
};
pub use extractor::extract_facts;
pub use pipeline::{execute_synthesis_pipeline, PipelineOptions, SynthesisPipeline};
pub use scoring::{
    classify_constraint, confidence_score, contrast_score, risk_marked,
    ALLOWED_CONSTRAINT_SIGNALS, RISK_MARKERS,
};
pub use synthesizer::synthesize_assertions;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the synthesis pipeline
    pub use crate::{
        execute_synthesis_pipeline, CandidateGenerator, PipelineOptions, SynthesisConfig,
        SynthesisError, SynthesisPipeline,
    };
    pub use ebs_signal::{ExecutiveBriefSynthesis, Vector};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
