//! Shared fixtures and helpers for volume scope BDD scenarios.

use rstest::fixture;
use volscope::test_support::VolumeSetBuilder;
use volscope::{MatchType, Pattern, VolumeScopeEngine};

/// State threaded through the steps of one scenario.
#[derive(Clone, Debug)]
pub struct ScopeContext {
    pub engine: Option<VolumeScopeEngine>,
    pub last_changed: Option<usize>,
}

#[fixture]
pub fn scope_context() -> ScopeContext {
    ScopeContext {
        engine: None,
        last_changed: None,
    }
}

impl ScopeContext {
    pub fn engine(&self) -> &VolumeScopeEngine {
        self.engine
            .as_ref()
            .unwrap_or_else(|| panic!("test setup requires a volume set"))
    }

    pub fn engine_mut(&mut self) -> &mut VolumeScopeEngine {
        self.engine
            .as_mut()
            .unwrap_or_else(|| panic!("test setup requires a volume set"))
    }
}

/// Builds `prod` included `PROD000n` volumes followed by `test` `TEST000n`
/// volumes excluded by the seed rule. Ids run `vol-0..` in that order.
pub fn build_engine(prod: u32, test: u32) -> VolumeScopeEngine {
    let builder = (1..=prod).fold(VolumeSetBuilder::new(), |builder, n| {
        builder.included(&format!("PROD{n:04}"), 100)
    });
    (1..=test)
        .fold(builder, |builder, n| {
            builder.excluded_by_rule(&format!("TEST{n:04}"), 100, "Exclude: starts-with \"TEST\"")
        })
        .engine()
}

pub fn parse_rule(match_type: &str, pattern: &str) -> (MatchType, Pattern) {
    let parsed_match = match_type
        .trim()
        .parse::<MatchType>()
        .unwrap_or_else(|err| panic!("match type {match_type:?}: {err}"));
    let parsed_pattern =
        Pattern::new(pattern).unwrap_or_else(|err| panic!("pattern {pattern:?}: {err}"));
    (parsed_match, parsed_pattern)
}
