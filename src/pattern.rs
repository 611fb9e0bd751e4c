//! Volume label pattern matching.
//!
//! Patterns are validated once at the edge ([`Pattern::new`]) so the engine
//! can assume non-empty, trimmed text. Matching is case-insensitive.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// How a pattern is compared against a volume label.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchType {
    /// The label begins with the pattern.
    StartsWith,
    /// The label contains the pattern anywhere.
    Contains,
    /// The label ends with the pattern.
    EndsWith,
}

impl MatchType {
    /// Every supported match type, in display order.
    pub const ALL: [Self; 3] = [Self::StartsWith, Self::Contains, Self::EndsWith];

    /// Returns the canonical name (`starts-with`, `contains`, `ends-with`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StartsWith => "starts-with",
            Self::Contains => "contains",
            Self::EndsWith => "ends-with",
        }
    }

    /// Tests `volume_id` against `pattern`, ignoring case.
    #[must_use]
    pub fn matches(self, volume_id: &str, pattern: &Pattern) -> bool {
        let label = volume_id.to_uppercase();
        let needle = pattern.folded.as_str();
        match self {
            Self::StartsWith => label.starts_with(needle),
            Self::Contains => label.contains(needle),
            Self::EndsWith => label.ends_with(needle),
        }
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchType {
    type Err = PatternError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim();
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| PatternError::UnknownMatchType(wanted.to_owned()))
    }
}

/// Errors raised while building patterns from user input.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum PatternError {
    /// The pattern was empty after trimming.
    #[error("pattern must not be empty")]
    Empty,
    /// The match type name was not recognised.
    #[error("unknown match type '{0}' (expected starts-with, contains, or ends-with)")]
    UnknownMatchType(String),
}

/// Non-empty, trimmed pattern text.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Pattern {
    text: String,
    folded: String,
}

impl Pattern {
    /// Builds a pattern from raw input, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::Empty`] when nothing remains after trimming.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, PatternError> {
        let text = raw.as_ref().trim();
        if text.is_empty() {
            return Err(PatternError::Empty);
        }
        Ok(Self {
            text: text.to_owned(),
            folded: text.to_uppercase(),
        })
    }

    /// Returns the pattern as the operator typed it (trimmed).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl FromStr for Pattern {
    type Err = PatternError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::new(value)
    }
}

impl Serialize for Pattern {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

/// Display-only predicate narrowing the partition views.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct PatternFilter {
    /// Comparison applied to each label.
    pub match_type: MatchType,
    /// Pattern compared against each label.
    pub pattern: Pattern,
}

impl PatternFilter {
    /// Creates a filter from a match type and pattern.
    #[must_use]
    pub const fn new(match_type: MatchType, pattern: Pattern) -> Self {
        Self {
            match_type,
            pattern,
        }
    }

    /// Returns true when `volume_id` passes the filter.
    #[must_use]
    pub fn matches(&self, volume_id: &str) -> bool {
        self.match_type.matches(volume_id, &self.pattern)
    }
}

impl fmt::Display for PatternFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} \"{}\"", self.match_type, self.pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn pattern(text: &str) -> Pattern {
        Pattern::new(text).unwrap_or_else(|err| panic!("pattern {text:?}: {err}"))
    }

    #[rstest]
    #[case(MatchType::StartsWith, "PROD", true)]
    #[case(MatchType::Contains, "OD00", true)]
    #[case(MatchType::EndsWith, "0001", true)]
    #[case(MatchType::StartsWith, "prod", true)]
    #[case(MatchType::EndsWith, "PROD", false)]
    #[case(MatchType::StartsWith, "XYZ", false)]
    #[case(MatchType::Contains, "XYZ", false)]
    #[case(MatchType::EndsWith, "XYZ", false)]
    fn matches_prod0001(#[case] match_type: MatchType, #[case] text: &str, #[case] expected: bool) {
        assert_eq!(match_type.matches("PROD0001", &pattern(text)), expected);
    }

    #[rstest]
    fn lower_case_labels_match_upper_case_patterns() {
        assert!(MatchType::Contains.matches("prod0001", &pattern("D0")));
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    fn blank_patterns_are_rejected(#[case] raw: &str) {
        assert_eq!(Pattern::new(raw), Err(PatternError::Empty));
    }

    #[rstest]
    fn patterns_are_trimmed_but_keep_their_case() {
        let built = pattern("  dev ");
        assert_eq!(built.as_str(), "dev");
        assert!(MatchType::StartsWith.matches("DEV0042", &built));
    }

    #[rstest]
    #[case("starts-with", MatchType::StartsWith)]
    #[case("CONTAINS", MatchType::Contains)]
    #[case(" ends-with ", MatchType::EndsWith)]
    fn match_types_parse_from_canonical_names(#[case] raw: &str, #[case] expected: MatchType) {
        assert_eq!(raw.parse::<MatchType>(), Ok(expected));
    }

    #[rstest]
    fn unknown_match_type_is_reported() {
        let err = "regex"
            .parse::<MatchType>()
            .expect_err("regex is not a match type");
        assert_eq!(err, PatternError::UnknownMatchType(String::from("regex")));
    }

    #[rstest]
    fn filter_displays_match_type_and_quoted_pattern() {
        let filter = PatternFilter::new(MatchType::StartsWith, pattern("PROD"));
        assert_eq!(filter.to_string(), "starts-with \"PROD\"");
        assert!(filter.matches("prod1234"));
        assert!(!filter.matches("TEST1234"));
    }
}
