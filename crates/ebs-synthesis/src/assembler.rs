//! Stage 5: section assembly
//!
//! Routes the ranked assertion pool into the four fixed narrative buckets,
//! injects the canonical fallback sentences for empty sections, runs the
//! elaboration pass, and writes the interpretive executive summary. All
//! text is template-driven; nothing here may surface raw counts, hedging
//! language, or internal taxonomy tokens.

use crate::scoring::risk_marked;
use ebs_signal::{
    BriefContent, BriefMeta, ContrastCoverage, ElaborationMeta, ExecutiveAssertionBlock,
    ExecutiveBriefSynthesis, ExpansionMeta, SectionKey, SignalQuality, MAX_EXEC_ASSERTIONS,
    MAX_LEVERAGE_MOVES, MAX_TOP_RISKS,
};
use indexmap::IndexMap;

/// Elaboration requires at least this confidence
pub const ELABORATION_MIN_CONFIDENCE: f64 = 0.8;
/// Elaboration requires at least this contrast
pub const ELABORATION_MIN_CONTRAST: f64 = 0.45;

/// Canonical fallback for an empty OPERATING_REALITY section
pub const FALLBACK_OPERATING_REALITY: &str = "Day-to-day operations run on established routines, \
     and the organization absorbs variation through familiar working patterns.";
/// Canonical fallback for an empty CONSTRAINT_LANDSCAPE section
pub const FALLBACK_CONSTRAINT_LANDSCAPE: &str = "The constraint landscape reflects structural \
     stability, with known pressure points managed within local capacity.";
/// Canonical fallback for an empty BLIND_SPOT_RISKS section
pub const FALLBACK_BLIND_SPOT_RISKS: &str = "No cross-role divergence stands out at this time, \
     and the risk surface appears contained within everyday operating awareness.";
/// Canonical fallback for an empty ALIGNMENT_SIGNALS section
pub const FALLBACK_ALIGNMENT_SIGNALS: &str = "Stakeholder perspectives remain broadly aligned, \
     with shared priorities carrying more weight than local differences.";

/// Literal phrase used when an elaborated assertion has no observed roles
pub const MISSING_ROLES_PHRASE: &str = "observed within multiple workflows";

const SUMMARY_DECISIVE: &str = "High-confidence signals confirm clear strategic direction, and \
     the organization can commit to the moves already in motion.";
const SUMMARY_HEDGED: &str = "Taken together, the picture points to implied stability, with a \
     small number of pressure points worth deliberate attention.";

/// The fixed, verbatim fallback sentence for a section
#[inline]
#[must_use]
pub const fn fallback_sentence(key: SectionKey) -> &'static str {
    match key {
        SectionKey::OperatingReality => FALLBACK_OPERATING_REALITY,
        SectionKey::ConstraintLandscape => FALLBACK_CONSTRAINT_LANDSCAPE,
        SectionKey::BlindSpotRisks => FALLBACK_BLIND_SPOT_RISKS,
        SectionKey::AlignmentSignals => FALLBACK_ALIGNMENT_SIGNALS,
    }
}

/// Sort the assertion pool into canonical order: confidence descending,
/// contrast descending, id ascending.
pub fn sort_assertion_pool(pool: &mut [ExecutiveAssertionBlock]) {
    pool.sort_by(|a, b| {
        b.confidence_score
            .total_cmp(&a.confidence_score)
            .then_with(|| b.contrast_or_zero().total_cmp(&a.contrast_or_zero()))
            .then_with(|| a.id.cmp(&b.id))
    });
}

/// Whether a block qualifies for the three-paragraph elaboration
#[inline]
#[must_use]
pub fn elaboration_eligible(block: &ExecutiveAssertionBlock) -> bool {
    block.confidence_score >= ELABORATION_MIN_CONFIDENCE
        && block.contrast_or_zero() >= ELABORATION_MIN_CONTRAST
}

/// Assemble the final brief from a sorted assertion pool.
///
/// `pool` must already be in canonical order; the first
/// [`MAX_EXEC_ASSERTIONS`] entries become `executiveAssertionBlock` while
/// the full pool feeds the risk and leverage views.
#[must_use]
pub fn assemble_brief(
    pool: &[ExecutiveAssertionBlock],
    signal_quality: SignalQuality,
    expansion: ExpansionMeta,
) -> ExecutiveBriefSynthesis {
    let selected = &pool[..pool.len().min(MAX_EXEC_ASSERTIONS)];

    let mut sections: IndexMap<SectionKey, Vec<String>> = IndexMap::new();
    let mut section_coverage: IndexMap<SectionKey, usize> = IndexMap::new();
    let mut section_depth: IndexMap<SectionKey, usize> = IndexMap::new();
    let mut elaborated_ids = Vec::new();

    for key in SectionKey::ALL {
        let primary: Vec<&ExecutiveAssertionBlock> = selected
            .iter()
            .filter(|block| block.primary_section == key)
            .collect();
        section_coverage.insert(key, primary.len());

        let mut paragraphs = Vec::new();
        if primary.is_empty() {
            let remapped: Vec<&ExecutiveAssertionBlock> = selected
                .iter()
                .filter(|block| block.secondary_sections.contains(&key))
                .collect();
            if remapped.is_empty() {
                paragraphs.push(fallback_sentence(key).to_string());
            } else {
                paragraphs.extend(remapped.iter().map(|block| core_paragraph(block)));
            }
        } else {
            for block in primary {
                if elaboration_eligible(block) {
                    paragraphs.extend(elaborated_paragraphs(block));
                    elaborated_ids.push(block.id);
                } else {
                    paragraphs.push(core_paragraph(block));
                }
            }
        }
        section_depth.insert(key, paragraphs.len());
        sections.insert(key, paragraphs);
    }

    let content = BriefContent {
        executive_summary: executive_summary(selected),
        sections,
    };

    let meta = BriefMeta {
        signal_quality,
        section_coverage,
        contrast_coverage: ContrastCoverage {
            multi_role_count: selected
                .iter()
                .filter(|block| {
                    block.roles_observed.as_ref().is_some_and(|roles| roles.len() > 1)
                })
                .count(),
            max_contrast: selected
                .iter()
                .map(ExecutiveAssertionBlock::contrast_or_zero)
                .fold(0.0, f64::max),
        },
        elaboration: ElaborationMeta {
            elaboration_applied: !elaborated_ids.is_empty(),
            elaborated_assertion_ids: elaborated_ids,
            section_depth,
        },
        expansion,
    };

    ExecutiveBriefSynthesis {
        content: Some(content),
        meta: Some(meta),
        executive_assertion_block: selected.to_vec(),
        top_risks: top_risks(pool),
        leverage_moves: leverage_moves(pool),
    }
}

fn core_paragraph(block: &ExecutiveAssertionBlock) -> String {
    format!("{} {}", block.assertion, block.implication)
}

fn elaborated_paragraphs(block: &ExecutiveAssertionBlock) -> Vec<String> {
    let roles_phrase = match &block.roles_observed {
        Some(roles) if !roles.is_empty() => format!("this shows up for {}", roles.join(", ")),
        _ => MISSING_ROLES_PHRASE.to_string(),
    };
    vec![
        core_paragraph(block),
        format!(
            "Operational manifestation: {roles_phrase}, supported by {}.",
            block.evidence.join("; ")
        ),
        format!(
            "Impact surface: the underlying {} constraint shapes how decisions and delivery \
             move through the organization.",
            humanize_signal(&block.constraint_signal)
        ),
    ]
}

/// Risk view over the full pool: highest contrast first, then confidence,
/// then id, capped at [`MAX_TOP_RISKS`]
fn top_risks(pool: &[ExecutiveAssertionBlock]) -> Vec<String> {
    let mut risk_blocks: Vec<&ExecutiveAssertionBlock> = pool
        .iter()
        .filter(|block| {
            block.primary_section == SectionKey::BlindSpotRisks
                || block.secondary_sections.contains(&SectionKey::BlindSpotRisks)
                || risk_marked(&block.assertion)
        })
        .collect();
    risk_blocks.sort_by(|a, b| {
        b.contrast_or_zero()
            .total_cmp(&a.contrast_or_zero())
            .then_with(|| b.confidence_score.total_cmp(&a.confidence_score))
            .then_with(|| a.id.cmp(&b.id))
    });
    risk_blocks
        .iter()
        .take(MAX_TOP_RISKS)
        .map(|block| block.assertion.clone())
        .collect()
}

/// Leverage view over the full pool: deduplicated directives in pool order,
/// capped at [`MAX_LEVERAGE_MOVES`]
fn leverage_moves(pool: &[ExecutiveAssertionBlock]) -> Vec<String> {
    let mut moves: Vec<String> = Vec::new();
    for block in pool {
        let directive = format!(
            "Concentrate effort on the {} pressure before it compounds.",
            humanize_signal(&block.constraint_signal)
        );
        if !moves.contains(&directive) {
            moves.push(directive);
        }
        if moves.len() == MAX_LEVERAGE_MOVES {
            break;
        }
    }
    moves
}

/// Interpretive opening summary; never counts, never hedging tokens
fn executive_summary(selected: &[ExecutiveAssertionBlock]) -> String {
    let basis_points: u32 = selected
        .iter()
        .map(|block| to_basis_points(block.confidence_score))
        .sum();
    let decisive = !selected.is_empty() && basis_points >= 80 * selected.len() as u32;
    let band = if decisive { SUMMARY_DECISIVE } else { SUMMARY_HEDGED };
    let lead_signal = selected
        .first()
        .map_or_else(|| "process drift".to_string(), |block| {
            humanize_signal(&block.constraint_signal)
        });
    format!("{band} The strongest structural signal centers on {lead_signal}.")
}

fn humanize_signal(signal: &str) -> String {
    signal.replace('-', " ")
}

#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_basis_points(score: f64) -> u32 {
    (score * 100.0).round() as u32
}
