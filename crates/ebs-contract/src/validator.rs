//! Full-brief contract validation
//!
//! [`validate`] re-checks a fully assembled brief against every contract
//! rule and returns the complete violation list in canonical order. It is a
//! pure function: callable by the pipeline before returning, and standalone
//! against externally produced brief-shaped JSON.

use crate::rules::{
    assertion_violations, cap_violation, debug_leak_violation, CONTENT_MISSING, META_MISSING,
    SECTION_CAP_EXEC_ASSERTIONS, SECTION_CAP_LEVERAGE_MOVES, SECTION_CAP_TOP_RISKS,
};
use crate::violation::{sort_violations, Violation};
use ebs_signal::{
    ExecutiveBriefSynthesis, SectionKey, MAX_EXEC_ASSERTIONS, MAX_LEVERAGE_MOVES, MAX_TOP_RISKS,
};

/// Contract check failure
#[derive(Debug, thiserror::Error)]
pub enum ContractError {
    /// The brief failed one or more contract rules
    #[error("brief violates {} contract rule(s)", violations.len())]
    Violations {
        /// Complete violation list, sorted `(path, rule)` ascending
        violations: Vec<Violation>,
    },
}

impl ContractError {
    /// The sorted violation list behind this error
    #[inline]
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        match self {
            Self::Violations { violations } => violations,
        }
    }
}

/// Validate an assembled brief against the canonical contract.
///
/// Returns every violation, never just the first, sorted by
/// `(path ASC, rule ASC)`.
#[must_use]
pub fn validate(brief: &ExecutiveBriefSynthesis) -> Vec<Violation> {
    let mut violations = Vec::new();

    for (i, block) in brief.executive_assertion_block.iter().enumerate() {
        violations.extend(assertion_violations(
            &format!("executiveAssertionBlock[{i}]"),
            block,
        ));
    }

    let exec_count = brief.executive_assertion_block.len();
    if exec_count > MAX_EXEC_ASSERTIONS {
        violations.push(cap_violation(
            SECTION_CAP_EXEC_ASSERTIONS,
            "executiveAssertionBlock",
            exec_count,
            MAX_EXEC_ASSERTIONS,
        ));
    }
    if brief.top_risks.len() > MAX_TOP_RISKS {
        violations.push(cap_violation(
            SECTION_CAP_TOP_RISKS,
            "topRisks",
            brief.top_risks.len(),
            MAX_TOP_RISKS,
        ));
    }
    if brief.leverage_moves.len() > MAX_LEVERAGE_MOVES {
        violations.push(cap_violation(
            SECTION_CAP_LEVERAGE_MOVES,
            "leverageMoves",
            brief.leverage_moves.len(),
            MAX_LEVERAGE_MOVES,
        ));
    }

    match &brief.content {
        None => violations.push(Violation::new(CONTENT_MISSING, "content")),
        Some(content) => {
            if content.executive_summary.trim().is_empty() {
                violations.push(Violation::new(CONTENT_MISSING, "content.executiveSummary"));
            }
            for key in SectionKey::ALL {
                let populated = content
                    .sections
                    .get(&key)
                    .is_some_and(|paragraphs| !paragraphs.is_empty());
                if !populated {
                    violations.push(Violation::new(
                        CONTENT_MISSING,
                        format!("content.sections.{}", key.as_str()),
                    ));
                }
            }
            for (path, rendered) in content.rendered_paths() {
                violations.extend(debug_leak_violation(&path, rendered));
            }
        }
    }

    if brief.meta.is_none() {
        violations.push(Violation::new(META_MISSING, "meta"));
    }

    for (i, risk) in brief.top_risks.iter().enumerate() {
        violations.extend(debug_leak_violation(&format!("topRisks[{i}]"), risk));
    }
    for (i, mv) in brief.leverage_moves.iter().enumerate() {
        violations.extend(debug_leak_violation(&format!("leverageMoves[{i}]"), mv));
    }

    sort_violations(&mut violations);
    violations
}

/// Validate and fail on any violation.
///
/// # Errors
/// Returns [`ContractError::Violations`] carrying the complete sorted list
/// when the brief fails any contract rule.
pub fn ensure_valid(brief: &ExecutiveBriefSynthesis) -> Result<(), ContractError> {
    let violations = validate(brief);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(ContractError::Violations { violations })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_content_and_meta_reported_together() {
        let brief = ExecutiveBriefSynthesis {
            content: None,
            meta: None,
            executive_assertion_block: vec![],
            top_risks: vec![],
            leverage_moves: vec![],
        };
        let violations = validate(&brief);
        let rules: Vec<&str> = violations.iter().map(|v| v.rule.as_str()).collect();
        assert_eq!(rules, vec![CONTENT_MISSING, META_MISSING]);
    }

    #[test]
    fn ensure_valid_carries_full_list() {
        let brief = ExecutiveBriefSynthesis {
            content: None,
            meta: None,
            executive_assertion_block: vec![],
            top_risks: vec![],
            leverage_moves: vec![],
        };
        let err = ensure_valid(&brief).unwrap_err();
        assert_eq!(err.violations().len(), 2);
    }
}
