//! Track B behavior through the full pipeline
//!
//! The generator is untrusted and fail-soft: its failure can never abort a
//! run by itself, and its candidates are re-validated before acceptance.

use anyhow::Result;
use ebs_signal::{SectionKey, SignalHash, SignalStatus};
use ebs_synthesis::{
    extract_facts, ErrorCode, PipelineOptions, Stage, SynthesisConfig, SynthesisPipeline,
};
use ebs_test_utils::{
    candidate_grounded_in, four_role_vectors, three_role_vectors, two_role_vectors,
    FailingGenerator, ScriptedGenerator,
};
use pretty_assertions::assert_eq;
use std::sync::Arc;

#[tokio::test]
async fn generator_failure_surfaces_only_as_insufficient_signal() -> Result<()> {
    let pipeline = SynthesisPipeline::new(SynthesisConfig::default())
        .with_generator(Arc::new(FailingGenerator));

    let err = pipeline
        .execute(&two_role_vectors(), &PipelineOptions::new())
        .await
        .unwrap_err();

    assert_eq!(err.stage, Stage::Pipeline);
    assert_eq!(err.code, ErrorCode::InsufficientSignal);
    let diagnostics = err.signal_diagnostics().unwrap();
    assert!(diagnostics.expansion_invoked);
    assert_eq!(diagnostics.expansion_accepted_count, 0);
    Ok(())
}

#[tokio::test]
async fn generator_failure_does_not_touch_a_sufficient_run() -> Result<()> {
    let pipeline = SynthesisPipeline::new(SynthesisConfig::default())
        .with_generator(Arc::new(FailingGenerator));

    let brief = pipeline
        .execute(&four_role_vectors(), &PipelineOptions::new())
        .await?;
    let meta = brief.meta.unwrap();
    assert!(!meta.expansion.invoked);
    assert_eq!(meta.signal_quality.status, SignalStatus::Sufficient);
    Ok(())
}

#[tokio::test]
async fn accepted_candidate_tops_up_a_short_run() -> Result<()> {
    let vectors = three_role_vectors();
    let facts = extract_facts(&vectors)?;
    let generator =
        ScriptedGenerator::new(vec![candidate_grounded_in(&facts, SectionKey::ConstraintLandscape)]);
    let pipeline =
        SynthesisPipeline::new(SynthesisConfig::default()).with_generator(Arc::new(generator));

    let brief = pipeline.execute(&vectors, &PipelineOptions::new()).await?;
    let meta = brief.meta.as_ref().unwrap();
    assert_eq!(meta.signal_quality.status, SignalStatus::Sufficient);
    assert_eq!(meta.signal_quality.assertion_count, 4);
    assert!(meta.expansion.invoked);
    assert_eq!(meta.expansion.accepted_count, 1);
    assert_eq!(brief.executive_assertion_block.len(), 4);
    Ok(())
}

#[tokio::test]
async fn candidate_citing_unknown_fact_is_excluded_without_crashing() -> Result<()> {
    let vectors = three_role_vectors();
    let facts = extract_facts(&vectors)?;
    let mut phantom = candidate_grounded_in(&facts, SectionKey::ConstraintLandscape);
    phantom.evidence_fact_ids = vec![SignalHash::compute(b"phantom fact").to_string()];
    let valid = candidate_grounded_in(&facts, SectionKey::OperatingReality);

    let pipeline = SynthesisPipeline::new(SynthesisConfig::default())
        .with_generator(Arc::new(ScriptedGenerator::new(vec![phantom, valid])));

    let brief = pipeline.execute(&vectors, &PipelineOptions::new()).await?;
    let meta = brief.meta.as_ref().unwrap();
    assert_eq!(meta.expansion.accepted_count, 1);
    assert_eq!(meta.expansion.rejected_count, 1);
    assert_eq!(meta.signal_quality.assertion_count, 4);
    Ok(())
}

#[tokio::test]
async fn scripted_expansion_is_deterministic_across_runs() -> Result<()> {
    let vectors = three_role_vectors();
    let facts = extract_facts(&vectors)?;
    let make_pipeline = || {
        SynthesisPipeline::new(SynthesisConfig::default()).with_generator(Arc::new(
            ScriptedGenerator::new(vec![candidate_grounded_in(
                &facts,
                SectionKey::ConstraintLandscape,
            )]),
        ))
    };

    let first = make_pipeline().execute(&vectors, &PipelineOptions::new()).await?;
    let second = make_pipeline().execute(&vectors, &PipelineOptions::new()).await?;
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first)?,
        serde_json::to_string(&second)?
    );
    Ok(())
}
