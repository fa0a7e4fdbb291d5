//! Contract rule ids and per-concern checks
//!
//! Each rule has a stable string id used in test assertions, diagnostics,
//! and violation sorting. Rules are independent: one malformed assertion
//! can trigger several of them at once.

use crate::violation::Violation;
use ebs_signal::text::word_count;
use ebs_signal::{
    ExecutiveAssertionBlock, MAX_ASSERTION_WORDS, MAX_EVIDENCE_ITEMS, MIN_EVIDENCE_ITEMS,
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::json;

/// Required assertion field is empty or missing
pub const EAB_REQUIRED_FIELD: &str = "EAB_REQUIRED_FIELD";
/// Assertion sentence exceeds the 24-word limit
pub const EAB_ASSERTION_WORD_LIMIT: &str = "EAB_ASSERTION_WORD_LIMIT";
/// Evidence entry count outside `[1, 3]`
pub const EAB_EVIDENCE_COUNT: &str = "EAB_EVIDENCE_COUNT";
/// More than four entries in `executiveAssertionBlock`
pub const SECTION_CAP_EXEC_ASSERTIONS: &str = "SECTION_CAP_EXEC_ASSERTIONS";
/// More than five entries in `topRisks`
pub const SECTION_CAP_TOP_RISKS: &str = "SECTION_CAP_TOP_RISKS";
/// More than five entries in `leverageMoves`
pub const SECTION_CAP_LEVERAGE_MOVES: &str = "SECTION_CAP_LEVERAGE_MOVES";
/// Rendered content is absent or has an empty section
pub const CONTENT_MISSING: &str = "CONTENT_MISSING";
/// Internal meta is absent
pub const META_MISSING: &str = "META_MISSING";
/// Internal diagnostics leaked into rendered narrative
pub const CONTENT_DEBUG_LEAK: &str = "CONTENT_DEBUG_LEAK";

/// Internal taxonomy tokens (`BLIND_SPOT_RISKS`, rule ids, ...) must never
/// appear in rendered narrative text.
static INTERNAL_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Z][A-Z0-9]*_[A-Z0-9_]+\b").expect("internal token regex"));

/// Expansion debug banner prefix, e.g. `[Expansion applied: 2 candidates]`
const EXPANSION_BANNER: &str = "[Expansion applied:";

/// Check one assertion block against the per-assertion rules.
///
/// `path_prefix` is the contract path of the block, e.g.
/// `executiveAssertionBlock[2]`. Used both by the full validator and by the
/// pipeline's Track A validity screen.
#[must_use]
pub fn assertion_violations(path_prefix: &str, block: &ExecutiveAssertionBlock) -> Vec<Violation> {
    let mut violations = Vec::new();

    if block.assertion.trim().is_empty() {
        violations.push(Violation::new(
            EAB_REQUIRED_FIELD,
            format!("{path_prefix}.assertion"),
        ));
    }
    if block.implication.trim().is_empty() {
        violations.push(Violation::new(
            EAB_REQUIRED_FIELD,
            format!("{path_prefix}.implication"),
        ));
    }
    if block.constraint_signal.trim().is_empty() {
        violations.push(Violation::new(
            EAB_REQUIRED_FIELD,
            format!("{path_prefix}.constraint_signal"),
        ));
    }

    let words = word_count(&block.assertion);
    if words > MAX_ASSERTION_WORDS {
        violations.push(
            Violation::new(EAB_ASSERTION_WORD_LIMIT, format!("{path_prefix}.assertion"))
                .with_context(json!({ "words": words, "limit": MAX_ASSERTION_WORDS })),
        );
    }

    let evidence_count = block.evidence.len();
    if !(MIN_EVIDENCE_ITEMS..=MAX_EVIDENCE_ITEMS).contains(&evidence_count) {
        violations.push(
            Violation::new(EAB_EVIDENCE_COUNT, format!("{path_prefix}.evidence")).with_context(
                json!({
                    "count": evidence_count,
                    "min": MIN_EVIDENCE_ITEMS,
                    "max": MAX_EVIDENCE_ITEMS
                }),
            ),
        );
    }

    violations
}

/// Check one rendered string for leaked internal diagnostics.
#[must_use]
pub fn debug_leak_violation(path: &str, rendered: &str) -> Option<Violation> {
    if rendered.contains(EXPANSION_BANNER) {
        return Some(
            Violation::new(CONTENT_DEBUG_LEAK, path)
                .with_context(json!({ "fragment": EXPANSION_BANNER })),
        );
    }
    INTERNAL_TOKEN.find(rendered).map(|m| {
        Violation::new(CONTENT_DEBUG_LEAK, path).with_context(json!({ "fragment": m.as_str() }))
    })
}

/// Build a cap violation with its `{count, cap}` context.
#[must_use]
pub fn cap_violation(rule: &str, path: &str, count: usize, cap: usize) -> Violation {
    Violation::new(rule, path).with_context(json!({ "count": count, "cap": cap }))
}
