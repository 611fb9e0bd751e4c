//! Test support utilities shared across unit and integration tests.

use crate::scope::VolumeScopeEngine;
use crate::volume::{Inclusion, Provenance, Volume};

/// Builds hand-written volumes without going through the seed generator.
///
/// Ids are assigned as `vol-<n>` in insertion order.
#[derive(Clone, Debug, Default)]
pub struct VolumeSetBuilder {
    volumes: Vec<Volume>,
}

impl VolumeSetBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an included volume with default provenance.
    #[must_use]
    pub fn included(self, label: &str, size_gb: u32) -> Self {
        self.with(label, size_gb, Inclusion::Included, Provenance::Default)
    }

    /// Adds an excluded volume placed by the named rule.
    #[must_use]
    pub fn excluded_by_rule(self, label: &str, size_gb: u32, rule_name: &str) -> Self {
        self.with(
            label,
            size_gb,
            Inclusion::Excluded,
            Provenance::Rule {
                rule_name: rule_name.to_owned(),
            },
        )
    }

    /// Adds a volume with explicit placement.
    #[must_use]
    pub fn with(
        mut self,
        label: &str,
        size_gb: u32,
        inclusion: Inclusion,
        provenance: Provenance,
    ) -> Self {
        let id = format!("vol-{}", self.volumes.len());
        self.volumes.push(Volume {
            id,
            volume_id: label.to_owned(),
            size_gb,
            storage_group: String::from("PROD-DB2"),
            inclusion,
            provenance,
        });
        self
    }

    /// Returns the volumes in insertion order.
    #[must_use]
    pub fn build(self) -> Vec<Volume> {
        self.volumes
    }

    /// Returns an engine over the volumes.
    #[must_use]
    pub fn engine(self) -> VolumeScopeEngine {
        VolumeScopeEngine::new(self.volumes)
    }
}

/// Returns the ids of `volumes`, sorted.
#[must_use]
pub fn sorted_ids(volumes: &[&Volume]) -> Vec<String> {
    let mut ids = volumes
        .iter()
        .map(|volume| volume.id.clone())
        .collect::<Vec<_>>();
    ids.sort();
    ids
}

/// Returns true when the unfiltered partitions cover `engine`'s collection
/// exactly once.
#[must_use]
pub fn is_partitioned(engine: &VolumeScopeEngine) -> bool {
    let mut unfiltered = engine.clone();
    unfiltered.clear_filter();
    let mut seen = sorted_ids(&unfiltered.included_volumes());
    seen.extend(sorted_ids(&unfiltered.excluded_volumes()));
    seen.sort();
    let all = unfiltered.volumes().iter().collect::<Vec<_>>();
    seen == sorted_ids(&all)
}
