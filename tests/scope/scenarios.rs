//! BDD scenarios for volume scope curation.

use rstest_bdd_macros::scenario;

use super::test_helpers::{ScopeContext, scope_context};

#[scenario(
    path = "tests/features/volume_scope.feature",
    name = "Include volumes by pattern records the rule"
)]
fn scenario_include_by_pattern(scope_context: ScopeContext) {
    let _ = scope_context;
}

#[scenario(
    path = "tests/features/volume_scope.feature",
    name = "Repeating a bulk include changes nothing"
)]
fn scenario_repeat_include(scope_context: ScopeContext) {
    let _ = scope_context;
}

#[scenario(
    path = "tests/features/volume_scope.feature",
    name = "A manual move clears rule provenance"
)]
fn scenario_manual_move(scope_context: ScopeContext) {
    let _ = scope_context;
}

#[scenario(
    path = "tests/features/volume_scope.feature",
    name = "A display filter leaves the summary alone"
)]
fn scenario_display_filter(scope_context: ScopeContext) {
    let _ = scope_context;
}

#[scenario(
    path = "tests/features/volume_scope.feature",
    name = "Excluding by an unmatched pattern is a no-op"
)]
fn scenario_unmatched_exclude(scope_context: ScopeContext) {
    let _ = scope_context;
}
