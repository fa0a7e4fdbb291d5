//! Stage 2: pattern detection
//!
//! Clusters facts sharing semantic signal into [`Pattern`] records. The
//! clustering rule: a fact joins the first existing cluster whose running
//! shared-token set overlaps its own significant tokens in at least two
//! tokens; the cluster's shared set narrows to that intersection; otherwise
//! the fact opens a new cluster. Greedy, order-stable, fully deterministic.

use crate::error::{Stage, SynthesisError};
use crate::scoring::confidence_score;
use ebs_signal::text::significant_tokens;
use ebs_signal::{Fact, Pattern};

/// Shared significant tokens required for a fact to join a cluster
const MIN_SHARED_TOKENS: usize = 2;

struct Cluster {
    /// Tokens shared by every member so far, in first-member order
    shared: Vec<String>,
    /// Member indices into the fact array, in discovery order
    members: Vec<usize>,
}

/// Cluster facts into patterns.
///
/// # Errors
/// Fails closed with `PATTERN_SYNTHESIS` / `INSUFFICIENT_DATA` when the
/// fact list is empty.
pub fn detect_patterns(facts: &[Fact]) -> Result<Vec<Pattern>, SynthesisError> {
    if facts.is_empty() {
        return Err(SynthesisError::insufficient_data(Stage::PatternSynthesis));
    }

    let mut clusters: Vec<Cluster> = Vec::new();
    for (index, fact) in facts.iter().enumerate() {
        let tokens = significant_tokens(&fact.text);
        let joined = clusters.iter_mut().find_map(|cluster| {
            let overlap: Vec<String> = cluster
                .shared
                .iter()
                .filter(|token| tokens.contains(token))
                .cloned()
                .collect();
            if overlap.len() >= MIN_SHARED_TOKENS {
                cluster.shared = overlap;
                cluster.members.push(index);
                Some(())
            } else {
                None
            }
        });
        if joined.is_none() {
            clusters.push(Cluster {
                shared: tokens,
                members: vec![index],
            });
        }
    }

    let patterns: Vec<Pattern> = clusters
        .iter()
        .map(|cluster| {
            let member_facts: Vec<&Fact> = cluster.members.iter().map(|&i| &facts[i]).collect();
            let mut roles: Vec<String> = Vec::new();
            for fact in &member_facts {
                if !roles.contains(&fact.role) {
                    roles.push(fact.role.clone());
                }
            }
            let description = describe_cluster(&member_facts, &cluster.shared);
            let confidence = confidence_score(member_facts.len(), roles.len());
            Pattern::new(
                description,
                member_facts.iter().map(|fact| fact.id).collect(),
                roles,
                confidence,
            )
        })
        .collect();

    tracing::debug!(
        facts = facts.len(),
        patterns = patterns.len(),
        "pattern detection complete"
    );
    Ok(patterns)
}

/// Derive the pattern description from the cluster contents.
///
/// Singleton clusters keep the normalized statement so downstream risk
/// markers in the original wording survive; multi-fact clusters describe
/// the shared token signal.
fn describe_cluster(member_facts: &[&Fact], shared: &[String]) -> String {
    if member_facts.len() == 1 {
        return member_facts[0].normalized_text();
    }
    let mut tokens = shared.to_vec();
    tokens.sort_unstable();
    format!("recurring emphasis on {}", tokens.join(", "))
}
