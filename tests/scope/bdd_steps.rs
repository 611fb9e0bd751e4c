//! BDD step definitions for volume scope behaviour.

use rstest_bdd_macros::{given, then, when};
use volscope::{PatternFilter, Provenance, Source};

use super::test_helpers::{ScopeContext, build_engine, parse_rule};

#[derive(Debug, thiserror::Error)]
pub enum StepError {
    #[error("assertion failed: {0}")]
    Assertion(String),
}

#[given("a volume set with {prod:u32} PROD volumes included and {test:u32} TEST volumes excluded")]
fn volume_set(mut scope_context: ScopeContext, prod: u32, test: u32) -> ScopeContext {
    scope_context.engine = Some(build_engine(prod, test));
    scope_context
}

#[when("I include volumes matching {match_type} \"{pattern}\"")]
fn include_matching(
    mut scope_context: ScopeContext,
    match_type: String,
    pattern: String,
) -> ScopeContext {
    let (parsed_match, parsed_pattern) = parse_rule(&match_type, &pattern);
    let changed = scope_context
        .engine_mut()
        .include_by_pattern(parsed_match, &parsed_pattern);
    scope_context.last_changed = Some(changed);
    scope_context
}

#[when("I exclude volumes matching {match_type} \"{pattern}\"")]
fn exclude_matching(
    mut scope_context: ScopeContext,
    match_type: String,
    pattern: String,
) -> ScopeContext {
    let (parsed_match, parsed_pattern) = parse_rule(&match_type, &pattern);
    let changed = scope_context
        .engine_mut()
        .exclude_by_pattern(parsed_match, &parsed_pattern);
    scope_context.last_changed = Some(changed);
    scope_context
}

#[when("I manually include volume \"{id}\"")]
fn manually_include(mut scope_context: ScopeContext, id: String) -> ScopeContext {
    let changed = scope_context.engine_mut().include_volumes([id.trim()]);
    scope_context.last_changed = Some(changed);
    scope_context
}

#[when("I filter volumes matching {match_type} \"{pattern}\"")]
fn filter_matching(
    mut scope_context: ScopeContext,
    match_type: String,
    pattern: String,
) -> ScopeContext {
    let (parsed_match, parsed_pattern) = parse_rule(&match_type, &pattern);
    scope_context
        .engine_mut()
        .apply_filter(PatternFilter::new(parsed_match, parsed_pattern));
    scope_context
}

#[then("{included:u32} volumes are included and {excluded:u32} are excluded")]
fn summary_counts(
    scope_context: &ScopeContext,
    included: u32,
    excluded: u32,
) -> Result<(), StepError> {
    let summary = scope_context.engine().summary();
    if summary.included_count == included as usize && summary.excluded_count == excluded as usize {
        Ok(())
    } else {
        Err(StepError::Assertion(format!(
            "expected {included} included and {excluded} excluded, got {summary:?}"
        )))
    }
}

#[then("every TEST volume carries an include rule for {match_type} \"{pattern}\"")]
fn test_volumes_carry_rule(
    scope_context: &ScopeContext,
    match_type: String,
    pattern: String,
) -> Result<(), StepError> {
    let expected = format!("Include: {} \"{}\"", match_type.trim(), pattern);
    let mismatched = scope_context
        .engine()
        .volumes()
        .iter()
        .filter(|volume| volume.volume_id.starts_with("TEST"))
        .filter(|volume| !volume.is_included() || volume.rule_name() != Some(expected.as_str()))
        .map(|volume| volume.id.clone())
        .collect::<Vec<_>>();
    if mismatched.is_empty() {
        Ok(())
    } else {
        Err(StepError::Assertion(format!(
            "volumes {mismatched:?} lack rule {expected:?}"
        )))
    }
}

#[then("the last action moved {count:u32} volumes")]
fn last_action_moved(scope_context: &ScopeContext, count: u32) -> Result<(), StepError> {
    match scope_context.last_changed {
        Some(changed) if changed == count as usize => Ok(()),
        other => Err(StepError::Assertion(format!(
            "expected {count} volumes moved, got {other:?}"
        ))),
    }
}

#[then("volume \"{id}\" is included by hand without a rule")]
fn included_by_hand(scope_context: &ScopeContext, id: String) -> Result<(), StepError> {
    let volume = scope_context
        .engine()
        .get(id.trim())
        .ok_or_else(|| StepError::Assertion(format!("missing volume {id}")))?;
    if volume.is_included()
        && volume.source() == Source::Manual
        && volume.provenance == Provenance::Manual
        && volume.rule_name().is_none()
    {
        Ok(())
    } else {
        Err(StepError::Assertion(format!(
            "expected manual inclusion, got {volume:?}"
        )))
    }
}

#[then(
    "the included view shows {included:u32} volumes and the excluded view shows {excluded:u32} volumes"
)]
fn filtered_views(
    scope_context: &ScopeContext,
    included: u32,
    excluded: u32,
) -> Result<(), StepError> {
    let engine = scope_context.engine();
    let shown = (engine.included_volumes().len(), engine.excluded_volumes().len());
    if shown == (included as usize, excluded as usize) {
        Ok(())
    } else {
        Err(StepError::Assertion(format!(
            "expected views of {included} and {excluded}, got {shown:?}"
        )))
    }
}
