//! Stage 1: fact extraction
//!
//! Turns role-tagged free text into atomic [`Fact`] records. Output order
//! is vector traversal order then statement order, never re-sorted by
//! content, so re-running on identical input yields an identical array.

use crate::error::{Stage, SynthesisError};
use ebs_signal::text::{word_count, STATEMENT_BOUNDARY};
use ebs_signal::{Fact, Vector};

/// Statements with fewer words than this are dropped as fragments
const MIN_STATEMENT_WORDS: usize = 2;

/// Extract facts from stakeholder vectors.
///
/// # Errors
/// Fails closed with `FACT_EXTRACTION` / `INSUFFICIENT_DATA` when the
/// vector list is empty.
pub fn extract_facts(vectors: &[Vector]) -> Result<Vec<Fact>, SynthesisError> {
    if vectors.is_empty() {
        return Err(SynthesisError::insufficient_data(Stage::FactExtraction));
    }

    let mut facts = Vec::new();
    for vector in vectors {
        for raw in STATEMENT_BOUNDARY.split(&vector.perceived_constraints) {
            let statement = raw.trim();
            if word_count(statement) < MIN_STATEMENT_WORDS {
                continue;
            }
            facts.push(Fact::new(&vector.role_type, statement, &vector.id));
        }
    }

    tracing::debug!(
        vectors = vectors.len(),
        facts = facts.len(),
        "fact extraction complete"
    );
    Ok(facts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn empty_input_fails_closed() {
        let err = extract_facts(&[]).unwrap_err();
        assert_eq!(err.stage, Stage::FactExtraction);
        assert_eq!(err.code, ErrorCode::InsufficientData);
    }

    #[test]
    fn splits_statements_on_boundaries() {
        let vectors = vec![Vector::new(
            "v-1",
            "t-1",
            "ops",
            "Approvals queue overnight. Handoffs stall between shifts; nobody owns the backlog!",
        )];
        let facts = extract_facts(&vectors).unwrap();
        let texts: Vec<&str> = facts.iter().map(|f| f.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "Approvals queue overnight",
                "Handoffs stall between shifts",
                "nobody owns the backlog"
            ]
        );
    }

    #[test]
    fn fragments_are_dropped() {
        let vectors = vec![Vector::new("v-1", "t-1", "ops", "Stalled. Approvals queue overnight.")];
        let facts = extract_facts(&vectors).unwrap();
        assert_eq!(facts.len(), 1);
        assert_eq!(facts[0].text, "Approvals queue overnight");
    }

    #[test]
    fn vector_with_no_extractable_statements_yields_no_facts() {
        let vectors = vec![Vector::new("v-1", "t-1", "ops", "   ")];
        let facts = extract_facts(&vectors).unwrap();
        assert!(facts.is_empty());
    }

    #[test]
    fn order_and_ids_are_stable_across_runs() {
        let vectors = vec![
            Vector::new("v-1", "t-1", "ops", "Approvals queue overnight. Handoffs stall daily."),
            Vector::new("v-2", "t-1", "sales", "Forecasts swing wildly."),
        ];
        let first = extract_facts(&vectors).unwrap();
        let second = extract_facts(&vectors).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
        assert_eq!(first[0].source_ref, "v-1");
        assert_eq!(first[2].role, "sales");
    }
}
