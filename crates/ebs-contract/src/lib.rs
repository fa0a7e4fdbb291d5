//! EBS Contract Layer
//!
//! The trusted boundary between assembled briefs and anything that renders
//! or persists them.
//!
//! # Core Operations
//!
//! - **Validate**: re-check a full `ExecutiveBriefSynthesis` against the
//!   canonical contract and return the complete, deterministically sorted
//!   violation list
//! - **Screen**: check a single assertion block against the per-assertion
//!   rules (used by the pipeline's Track A validity gate)
//!
//! Every rule has a stable string id; violations sort by `(path, rule)`
//! ascending, so two runs over the same brief report byte-identical lists.
//!
//! # Example
//!
//! ```rust,ignore
//! use ebs_contract::ensure_valid;
//!
//! let brief = serde_json::from_str(&raw_json)?;
//! ensure_valid(&brief)?;
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod rules;
mod validator;
mod violation;

// Re-exports for convenience
pub use rules::{
    assertion_violations, debug_leak_violation, CONTENT_DEBUG_LEAK, CONTENT_MISSING,
    EAB_ASSERTION_WORD_LIMIT, EAB_EVIDENCE_COUNT, EAB_REQUIRED_FIELD, META_MISSING,
    SECTION_CAP_EXEC_ASSERTIONS, SECTION_CAP_LEVERAGE_MOVES, SECTION_CAP_TOP_RISKS,
};
pub use validator::{ensure_valid, validate, ContractError};
pub use violation::{sort_violations, Violation};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
