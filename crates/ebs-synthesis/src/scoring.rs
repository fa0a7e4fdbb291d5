//! Deterministic scoring formulas
//!
//! Contrast and confidence are computed in integer basis points and divided
//! by 100 exactly once, so measured fixed points (1 role → 0.05, 2 → 0.20,
//! 4 → 0.45) compare equal to the literal values in tests and goldens.

use ebs_signal::{AlignmentScope, AlignmentStrength};

/// Lexical markers flagging a pattern description as risk-bearing
pub const RISK_MARKERS: [&str; 2] = ["risk", "blind spot"];

/// Allowed structural root-cause labels, kebab-case so rendered narrative
/// referencing them can never trip the debug-leak scan
pub const ALLOWED_CONSTRAINT_SIGNALS: [&str; 6] = [
    "capacity-limit",
    "dependency-bottleneck",
    "coordination-gap",
    "visibility-gap",
    "demand-variability",
    "process-drift",
];

/// Keyword table driving constraint-signal classification; first match wins
const SIGNAL_KEYWORDS: &[(&str, &[&str])] = &[
    ("capacity-limit", &["capacity", "bandwidth", "workload", "stretched", "overloaded", "headcount"]),
    ("dependency-bottleneck", &["depend", "wait", "blocked", "bottleneck", "approval", "queue"]),
    ("coordination-gap", &["handoff", "coordination", "communication", "silo", "misaligned"]),
    ("visibility-gap", &["visibility", "reporting", "tracking", "measure", "blind spot"]),
    ("demand-variability", &["demand", "pipeline", "forecast", "seasonal", "unpredictable"]),
];

/// Default label when no keyword matches
pub const DEFAULT_CONSTRAINT_SIGNAL: &str = "process-drift";

/// Contrast tier in basis points for a given role count
const fn contrast_basis_points(role_count: usize) -> u32 {
    match role_count {
        0 | 1 => 5,
        2 => 20,
        3 => 30,
        4 => 45,
        n => {
            let extra = 5 * (n as u32 - 4);
            if 45 + extra > 90 {
                90
            } else {
                45 + extra
            }
        }
    }
}

/// Role-divergence contrast score in `0..=1`
///
/// Monotonically non-decreasing in `role_count`. The risk boost applies
/// only to multi-role patterns: a risk seen by a single role is not
/// evidence of organizational misalignment.
#[must_use]
pub fn contrast_score(role_count: usize, risk_marked: bool) -> f64 {
    let mut bp = contrast_basis_points(role_count);
    if risk_marked && role_count > 1 {
        bp = (bp + 25).min(100);
    }
    f64::from(bp) / 100.0
}

/// Cluster confidence in `0..=1`, from cluster size and role spread
#[must_use]
pub fn confidence_score(fact_count: usize, role_count: usize) -> f64 {
    let size_bp = 10 * fact_count.min(3) as u32;
    let spread_bp = 10 * role_count.saturating_sub(1).min(2) as u32;
    f64::from(40 + size_bp + spread_bp) / 100.0
}

/// Whether a description carries a risk lexical marker
#[must_use]
pub fn risk_marked(description: &str) -> bool {
    let lowered = description.to_lowercase();
    RISK_MARKERS.iter().any(|marker| lowered.contains(marker))
}

/// Classify a description into a structural root-cause label
#[must_use]
pub fn classify_constraint(description: &str) -> &'static str {
    let lowered = description.to_lowercase();
    for (label, keywords) in SIGNAL_KEYWORDS {
        if keywords.iter().any(|keyword| lowered.contains(keyword)) {
            return label;
        }
    }
    DEFAULT_CONSTRAINT_SIGNAL
}

/// Derive the internal alignment classification from observed roles
#[must_use]
pub fn alignment_for(roles: &[String]) -> (AlignmentStrength, AlignmentScope) {
    let strength = match roles.len() {
        0 | 1 => AlignmentStrength::Low,
        2 => AlignmentStrength::Medium,
        _ => AlignmentStrength::High,
    };
    let scope = if roles.len() > 1 {
        AlignmentScope::CrossRole
    } else if roles
        .first()
        .is_some_and(|role| matches!(role.as_str(), "owner" | "founder" | "ceo"))
    {
        AlignmentScope::LeadershipOnly
    } else {
        AlignmentScope::Fragmented
    };
    (strength, scope)
}
