//! Stage 3: assertion synthesis
//!
//! Converts patterns into executive assertion candidates. All text is
//! produced by deterministic templates over the pattern contents; scores
//! come from the basis-point formulas in [`crate::scoring`].

use crate::error::{Stage, SynthesisError};
use crate::scoring::{alignment_for, classify_constraint, contrast_score, risk_marked};
use ebs_signal::text::{clip_words, normalize_text};
use ebs_signal::{
    ExecutiveAssertionBlock, Fact, Pattern, SectionKey, SignalHash, MAX_ASSERTION_WORDS,
    MAX_EVIDENCE_ITEMS,
};
use std::collections::BTreeMap;

/// Synthesize one assertion candidate per pattern.
///
/// `facts` is the full extracted fact pool; evidence entries paraphrase the
/// supporting facts, so every pattern's supporting ids must resolve here.
///
/// # Errors
/// Fails closed with `ASSERTION_SYNTHESIS` / `INSUFFICIENT_DATA` when the
/// pattern list is empty.
pub fn synthesize_assertions(
    patterns: &[Pattern],
    facts: &[Fact],
) -> Result<Vec<ExecutiveAssertionBlock>, SynthesisError> {
    if patterns.is_empty() {
        return Err(SynthesisError::insufficient_data(Stage::AssertionSynthesis));
    }

    let fact_index: BTreeMap<SignalHash, &Fact> =
        facts.iter().map(|fact| (fact.id, fact)).collect();

    let blocks = patterns
        .iter()
        .map(|pattern| synthesize_one(pattern, &fact_index))
        .collect();
    tracing::debug!(patterns = patterns.len(), "assertion synthesis complete");
    Ok(blocks)
}

fn synthesize_one(
    pattern: &Pattern,
    fact_index: &BTreeMap<SignalHash, &Fact>,
) -> ExecutiveAssertionBlock {
    let risk = risk_marked(&pattern.description);
    let roles = &pattern.roles_observed;
    let contrast = contrast_score(roles.len(), risk);
    let constraint_signal = classify_constraint(&pattern.description);
    let primary = route_primary_section(risk, roles.len(), constraint_signal);
    let secondary = secondary_sections_for(primary, constraint_signal);
    let (strength, scope) = alignment_for(roles);

    let assertion = assertion_text(pattern, risk);
    let implication = implication_text(pattern);
    let evidence: Vec<String> = pattern
        .supporting_facts
        .iter()
        .filter_map(|id| fact_index.get(id).copied())
        .take(MAX_EVIDENCE_ITEMS)
        .map(evidence_entry)
        .collect();

    let mut source_refs = vec![pattern.pattern_id];
    source_refs.extend(pattern.supporting_facts.iter().copied());

    ExecutiveAssertionBlock::new(assertion, implication, constraint_signal, primary, source_refs)
        .with_evidence(evidence)
        .with_secondary_sections(secondary)
        .with_contrast_score(contrast)
        .with_confidence(pattern.confidence)
        .with_alignment(strength, scope)
        .with_roles_observed(roles.clone())
}

/// Route an assertion to its primary narrative bucket
pub(crate) fn route_primary_section(
    risk: bool,
    role_count: usize,
    constraint_signal: &str,
) -> SectionKey {
    if risk {
        SectionKey::BlindSpotRisks
    } else if role_count > 1 {
        SectionKey::AlignmentSignals
    } else if matches!(constraint_signal, "capacity-limit" | "dependency-bottleneck") {
        SectionKey::ConstraintLandscape
    } else {
        SectionKey::OperatingReality
    }
}

/// Secondary buckets an assertion can backfill
pub(crate) fn secondary_sections_for(
    primary: SectionKey,
    constraint_signal: &str,
) -> Vec<SectionKey> {
    let mut sections = Vec::new();
    if primary != SectionKey::OperatingReality {
        sections.push(SectionKey::OperatingReality);
    }
    if matches!(constraint_signal, "capacity-limit" | "dependency-bottleneck")
        && primary != SectionKey::ConstraintLandscape
    {
        sections.push(SectionKey::ConstraintLandscape);
    }
    sections
}

/// Paraphrased evidence entry for one supporting fact; never a raw quote
pub(crate) fn evidence_entry(fact: &Fact) -> String {
    format!(
        "{} input points at {}",
        fact.role,
        clip_words(&normalize_text(&fact.text), 8)
    )
}

fn assertion_text(pattern: &Pattern, risk: bool) -> String {
    let description = &pattern.description;
    let raw = if risk && pattern.roles_observed.len() > 1 {
        format!("Cross-role input surfaces {description}")
    } else if risk {
        format!("One vantage point flags {description}")
    } else if pattern.roles_observed.len() > 1 {
        format!("Several roles report {description}")
    } else {
        let role = pattern
            .roles_observed
            .first()
            .map_or("organization", String::as_str);
        format!("The {role} perspective highlights {description}")
    };
    let mut text = clip_words(&raw, MAX_ASSERTION_WORDS);
    text.push('.');
    text
}

fn implication_text(pattern: &Pattern) -> String {
    match pattern.recurrence_level {
        ebs_signal::RecurrenceLevel::High => {
            "This pressure repeats across the organization. Relieving it is likely to unlock several adjacent workflows.".to_string()
        }
        ebs_signal::RecurrenceLevel::Medium => {
            "The pattern appears in more than one place. A targeted intervention would reduce recurring friction.".to_string()
        }
        ebs_signal::RecurrenceLevel::Low => {
            "The signal is currently localized. Treating it early keeps it from hardening into a structural constraint.".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use ebs_signal::text::word_count;

    fn pattern_with_roles(description: &str, roles: &[&str]) -> (Pattern, Vec<Fact>) {
        let facts: Vec<Fact> = roles
            .iter()
            .enumerate()
            .map(|(i, role)| Fact::new(*role, format!("{description} variant {i}"), format!("v-{i}")))
            .collect();
        let pattern = Pattern::new(
            description,
            facts.iter().map(|f| f.id).collect(),
            roles.iter().map(|r| (*r).to_string()).collect(),
            crate::scoring::confidence_score(facts.len(), roles.len()),
        );
        (pattern, facts)
    }

    #[test]
    fn empty_input_fails_closed() {
        let err = synthesize_assertions(&[], &[]).unwrap_err();
        assert_eq!(err.stage, Stage::AssertionSynthesis);
        assert_eq!(err.code, ErrorCode::InsufficientData);
    }

    #[test]
    fn contrast_reflects_role_spread() {
        for (roles, expected) in [(1usize, 0.05), (2, 0.20), (4, 0.45)] {
            let role_names: Vec<String> = (0..roles).map(|i| format!("role-{i}")).collect();
            let role_refs: Vec<&str> = role_names.iter().map(String::as_str).collect();
            let (pattern, facts) = pattern_with_roles("steady delivery cadence", &role_refs);
            let blocks = synthesize_assertions(&[pattern], &facts).unwrap();
            assert_eq!(blocks[0].contrast_score, Some(expected));
        }
    }

    #[test]
    fn risk_pattern_with_two_roles_gets_boost() {
        let (pattern, facts) = pattern_with_roles("a shared risk in deployments", &["ops", "sales"]);
        let blocks = synthesize_assertions(&[pattern], &facts).unwrap();
        assert_eq!(blocks[0].contrast_score, Some(0.45));
        assert_eq!(blocks[0].primary_section, SectionKey::BlindSpotRisks);
    }

    #[test]
    fn single_role_risk_gets_no_boost() {
        let (pattern, facts) = pattern_with_roles("a shared risk in deployments", &["ops"]);
        let blocks = synthesize_assertions(&[pattern], &facts).unwrap();
        assert_eq!(blocks[0].contrast_score, Some(0.05));
    }

    #[test]
    fn assertions_respect_word_and_evidence_bounds() {
        let long_description = "a very long description of organizational pressure that keeps \
                                going well past any reasonable sentence length for an executive \
                                assertion block in a brief";
        let (pattern, facts) =
            pattern_with_roles(long_description, &["ops", "sales", "delivery", "owner"]);
        let blocks = synthesize_assertions(&[pattern], &facts).unwrap();
        let block = &blocks[0];
        assert!(word_count(&block.assertion) <= MAX_ASSERTION_WORDS);
        assert!((1..=MAX_EVIDENCE_ITEMS).contains(&block.evidence.len()));
    }

    #[test]
    fn evidence_entries_are_paraphrased_not_quoted() {
        let (pattern, facts) = pattern_with_roles("approvals queue overnight", &["ops"]);
        let blocks = synthesize_assertions(&[pattern], &facts).unwrap();
        for entry in &blocks[0].evidence {
            assert!(!entry.contains('"'));
            assert!(entry.starts_with("ops input points at"));
        }
    }

    #[test]
    fn source_refs_resolve_to_pattern_and_facts() {
        let (pattern, facts) = pattern_with_roles("approvals queue overnight", &["ops", "sales"]);
        let blocks = synthesize_assertions(&[pattern.clone()], &facts).unwrap();
        let refs = &blocks[0].source_refs;
        assert!(refs.contains(&pattern.pattern_id));
        for fact in &facts {
            assert!(refs.contains(&fact.id));
        }
    }

    #[test]
    fn multi_role_non_risk_routes_to_alignment() {
        let (pattern, facts) = pattern_with_roles("steady handoff cadence", &["ops", "sales"]);
        let blocks = synthesize_assertions(&[pattern], &facts).unwrap();
        assert_eq!(blocks[0].primary_section, SectionKey::AlignmentSignals);
        assert!(blocks[0].secondary_sections.contains(&SectionKey::OperatingReality));
    }

    #[test]
    fn ids_are_stable_across_runs() {
        let (pattern, facts) = pattern_with_roles("approvals queue overnight", &["ops"]);
        let first = synthesize_assertions(&[pattern.clone()], &facts).unwrap();
        let second = synthesize_assertions(&[pattern], &facts).unwrap();
        assert_eq!(first, second);
    }
}
