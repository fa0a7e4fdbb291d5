//! Contract engine integration tests
//!
//! Exercises the full validator over assembled briefs, including the
//! standalone path where brief-shaped JSON arrives from an external
//! producer.

use ebs_contract::{
    ensure_valid, validate, CONTENT_DEBUG_LEAK, CONTENT_MISSING, EAB_ASSERTION_WORD_LIMIT,
    EAB_EVIDENCE_COUNT, EAB_REQUIRED_FIELD, META_MISSING, SECTION_CAP_EXEC_ASSERTIONS,
    SECTION_CAP_LEVERAGE_MOVES, SECTION_CAP_TOP_RISKS,
};
use ebs_signal::{
    BriefContent, BriefMeta, ContrastCoverage, ElaborationMeta, ExecutiveAssertionBlock,
    ExecutiveBriefSynthesis, ExpansionMeta, SectionKey, SignalHash, SignalQuality, SignalStatus,
};
use indexmap::IndexMap;
use pretty_assertions::assert_eq;

fn block(tag: &str, section: SectionKey) -> ExecutiveAssertionBlock {
    ExecutiveAssertionBlock::new(
        format!("Several roles report recurring friction around {tag}."),
        "The pattern appears in more than one place.",
        "coordination-gap",
        section,
        vec![SignalHash::compute(tag.as_bytes())],
    )
    .with_evidence(vec![format!("ops input points at {tag}")])
    .with_confidence(0.7)
}

fn valid_brief() -> ExecutiveBriefSynthesis {
    let mut sections = IndexMap::new();
    let mut coverage = IndexMap::new();
    let mut depth = IndexMap::new();
    for key in SectionKey::ALL {
        sections.insert(key, vec!["Work continues along familiar routines.".to_string()]);
        coverage.insert(key, 1);
        depth.insert(key, 1);
    }
    ExecutiveBriefSynthesis {
        content: Some(BriefContent {
            executive_summary: "Taken together, the picture points to implied stability."
                .to_string(),
            sections,
        }),
        meta: Some(BriefMeta {
            signal_quality: SignalQuality {
                status: SignalStatus::Sufficient,
                assertion_count: 4,
                target_count: 4,
            },
            section_coverage: coverage,
            contrast_coverage: ContrastCoverage {
                multi_role_count: 0,
                max_contrast: 0.05,
            },
            elaboration: ElaborationMeta {
                elaboration_applied: false,
                elaborated_assertion_ids: vec![],
                section_depth: depth,
            },
            expansion: ExpansionMeta::not_invoked(),
        }),
        executive_assertion_block: vec![
            block("planning", SectionKey::OperatingReality),
            block("approvals", SectionKey::ConstraintLandscape),
        ],
        top_risks: vec!["Approvals queue overnight without an owner.".to_string()],
        leverage_moves: vec!["Shorten the approvals queue before it compounds.".to_string()],
    }
}

#[test]
fn valid_brief_has_no_violations() {
    assert_eq!(validate(&valid_brief()), vec![]);
    assert!(ensure_valid(&valid_brief()).is_ok());
}

#[test]
fn caps_are_enforced_with_counts() {
    let mut brief = valid_brief();
    brief.executive_assertion_block = (0..5)
        .map(|i| block(&format!("tag-{i}"), SectionKey::OperatingReality))
        .collect();
    brief.top_risks = (0..6).map(|i| format!("Risk entry number {i}.")).collect();
    brief.leverage_moves = (0..7).map(|i| format!("Move entry number {i}.")).collect();

    let violations = validate(&brief);
    let by_rule = |rule: &str| violations.iter().find(|v| v.rule == rule).unwrap();

    let exec = by_rule(SECTION_CAP_EXEC_ASSERTIONS);
    assert_eq!(exec.path, "executiveAssertionBlock");
    assert_eq!(exec.context.as_ref().unwrap()["count"], 5);
    assert_eq!(exec.context.as_ref().unwrap()["cap"], 4);

    let risks = by_rule(SECTION_CAP_TOP_RISKS);
    assert_eq!(risks.context.as_ref().unwrap()["count"], 6);
    assert_eq!(risks.context.as_ref().unwrap()["cap"], 5);

    let moves = by_rule(SECTION_CAP_LEVERAGE_MOVES);
    assert_eq!(moves.context.as_ref().unwrap()["count"], 7);
    assert_eq!(moves.context.as_ref().unwrap()["cap"], 5);
}

#[test]
fn one_malformed_assertion_triggers_every_matching_rule() {
    let mut brief = valid_brief();
    let mut broken = block("handoffs", SectionKey::OperatingReality);
    broken.assertion = "word ".repeat(30).trim().to_string();
    broken.constraint_signal = String::new();
    broken.evidence = vec![];
    brief.executive_assertion_block = vec![broken];

    let violations = validate(&brief);
    let rules: Vec<&str> = violations.iter().map(|v| v.rule.as_str()).collect();
    assert!(rules.contains(&EAB_ASSERTION_WORD_LIMIT));
    assert!(rules.contains(&EAB_REQUIRED_FIELD));
    assert!(rules.contains(&EAB_EVIDENCE_COUNT));
}

#[test]
fn violations_come_back_sorted_by_path_then_rule() {
    let mut brief = valid_brief();
    let mut broken = block("handoffs", SectionKey::OperatingReality);
    broken.assertion = "word ".repeat(30).trim().to_string();
    broken.evidence = vec![];
    brief.executive_assertion_block = vec![block("planning", SectionKey::OperatingReality), broken];
    brief.meta = None;
    brief.top_risks = (0..6).map(|i| format!("Risk entry number {i}.")).collect();

    let violations = validate(&brief);
    let keys: Vec<(String, String)> = violations
        .iter()
        .map(|v| (v.path.clone(), v.rule.clone()))
        .collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
    assert!(violations.len() >= 4);
}

#[test]
fn debug_leaks_in_rendered_content_are_reported() {
    let mut brief = valid_brief();
    if let Some(content) = brief.content.as_mut() {
        content
            .sections
            .insert(SectionKey::OperatingReality, vec![
                "Routine work continues. [Expansion applied: 2 candidates]".to_string(),
            ]);
    }
    brief.top_risks = vec!["Escalate BLIND_SPOT_RISKS to leadership.".to_string()];

    let violations = validate(&brief);
    let leak_paths: Vec<&str> = violations
        .iter()
        .filter(|v| v.rule == CONTENT_DEBUG_LEAK)
        .map(|v| v.path.as_str())
        .collect();
    assert_eq!(
        leak_paths,
        vec!["content.sections.OPERATING_REALITY[0]", "topRisks[0]"]
    );
}

#[test]
fn empty_section_is_content_missing() {
    let mut brief = valid_brief();
    if let Some(content) = brief.content.as_mut() {
        content.sections.insert(SectionKey::AlignmentSignals, vec![]);
    }
    let violations = validate(&brief);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].rule, CONTENT_MISSING);
    assert_eq!(violations[0].path, "content.sections.ALIGNMENT_SIGNALS");
}

#[test]
fn external_json_without_meta_is_caught_not_rejected_by_serde() {
    let raw = r#"{
        "executiveAssertionBlock": [],
        "topRisks": [],
        "leverageMoves": []
    }"#;
    let brief: ExecutiveBriefSynthesis = serde_json::from_str(raw).unwrap();
    let err = ensure_valid(&brief).unwrap_err();
    let rules: Vec<&str> = err.violations().iter().map(|v| v.rule.as_str()).collect();
    assert_eq!(rules, vec![CONTENT_MISSING, META_MISSING]);
}
