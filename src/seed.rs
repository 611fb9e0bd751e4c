//! Demo seed data: a generated volume collection and the sysplex list.
//!
//! Generation is deterministic for a given [`SeedSpec::rng_seed`], so the
//! CLI and tests can reproduce a collection exactly.

use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::volume::{Inclusion, Provenance, Sysplex, Volume};

/// Label prefixes used for generated volumes.
pub const PREFIXES: [&str; 10] = [
    "PROD", "TEST", "DEV", "STG", "BAK", "ARC", "DB2", "IMS", "CICS", "VSAM",
];

/// Storage groups assigned to generated volumes.
pub const STORAGE_GROUPS: [&str; 8] = [
    "PROD-DB2",
    "PROD-CICS",
    "TEST-ENV",
    "DEV-BATCH",
    "ARCHIVE",
    "BACKUP-STG",
    "VSAM-DATA",
    "IMS-DB",
];

/// Prefixes whose volumes start excluded under a seed rule.
pub const EXCLUDED_PREFIXES: [&str; 2] = ["TEST", "DEV"];

/// Number of volumes in the reference collection.
pub const DEFAULT_VOLUME_COUNT: usize = 3248;

/// Numeric suffixes run from `0000` to `9998`.
const SUFFIX_SPACE: usize = 9999;

const MIN_SIZE_GB: u32 = 50;
const MAX_SIZE_GB: u32 = 549;

/// Parameters for a generated collection.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SeedSpec {
    /// Number of volumes to generate.
    pub volume_count: usize,
    /// Seed for the random generator.
    pub rng_seed: u64,
}

impl Default for SeedSpec {
    fn default() -> Self {
        Self {
            volume_count: DEFAULT_VOLUME_COUNT,
            rng_seed: 42,
        }
    }
}

/// Errors raised when a seed specification cannot be satisfied.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum SeedError {
    /// At least one volume is required.
    #[error("seed volume count must be at least 1")]
    Empty,
    /// More volumes were requested than there are unique labels.
    #[error("seed volume count {requested} exceeds the {available} unique labels available")]
    TooMany {
        /// Requested volume count.
        requested: usize,
        /// Number of distinct labels the generator can produce.
        available: usize,
    },
}

/// Maximum number of distinct labels the generator can produce.
#[must_use]
pub const fn label_space() -> usize {
    PREFIXES.len() * SUFFIX_SPACE
}

/// Generates a volume collection sorted ascending by label.
///
/// Labels are unique. Volumes whose label starts with one of
/// [`EXCLUDED_PREFIXES`] start excluded under a rule; the rest start
/// included by default.
///
/// # Errors
///
/// Returns [`SeedError`] when the count is zero or exceeds [`label_space`].
pub fn generate_volumes(spec: SeedSpec) -> Result<Vec<Volume>, SeedError> {
    if spec.volume_count == 0 {
        return Err(SeedError::Empty);
    }
    let available = label_space();
    if spec.volume_count > available {
        return Err(SeedError::TooMany {
            requested: spec.volume_count,
            available,
        });
    }

    let mut rng = StdRng::seed_from_u64(spec.rng_seed);
    let mut used = BTreeSet::new();
    let mut volumes = Vec::with_capacity(spec.volume_count);

    for index in 0..spec.volume_count {
        let label = loop {
            let candidate = random_label(&mut rng);
            if used.insert(candidate.clone()) {
                break candidate;
            }
        };
        volumes.push(seed_volume(index, label, &mut rng));
    }

    volumes.sort_by(|left, right| left.volume_id.cmp(&right.volume_id));
    Ok(volumes)
}

fn random_label(rng: &mut StdRng) -> String {
    let prefix = pick(rng, &PREFIXES);
    let suffix = rng.gen_range(0..SUFFIX_SPACE);
    format!("{prefix}{suffix:04}")
}

fn seed_volume(index: usize, label: String, rng: &mut StdRng) -> Volume {
    let size_gb = rng.gen_range(MIN_SIZE_GB..=MAX_SIZE_GB);
    let storage_group = pick(rng, &STORAGE_GROUPS).to_owned();
    let (inclusion, provenance) = EXCLUDED_PREFIXES
        .iter()
        .find(|prefix| label.starts_with(*prefix))
        .map_or((Inclusion::Included, Provenance::Default), |prefix| {
            (
                Inclusion::Excluded,
                Provenance::Rule {
                    rule_name: format!("Exclude: starts-with \"{prefix}\""),
                },
            )
        });
    Volume {
        id: format!("vol-{index}"),
        volume_id: label,
        size_gb,
        storage_group,
        inclusion,
        provenance,
    }
}

fn pick<'a>(rng: &mut StdRng, items: &[&'a str]) -> &'a str {
    items
        .get(rng.gen_range(0..items.len()))
        .copied()
        .unwrap_or_default()
}

/// The reference sysplex list shown by the selector.
#[must_use]
pub fn default_sysplexes() -> Vec<Sysplex> {
    vec![
        Sysplex::new("sysplex-1", "PROD-SYSPLEX-01", 3248, "US-EAST"),
        Sysplex::new("sysplex-2", "PROD-SYSPLEX-02", 2891, "US-WEST"),
        Sysplex::new("sysplex-3", "DR-SYSPLEX-01", 1567, "EU-CENTRAL"),
        Sysplex::new("sysplex-4", "TEST-SYSPLEX-01", 892, "US-EAST"),
    ]
}
