//! Volume scope partitioning engine.
//!
//! [`VolumeScopeEngine`] owns the authoritative volume collection, each
//! volume tagged included or excluded with a [`Provenance`]. Bulk pattern
//! rules and manual moves mutate it in place; the partition views and the
//! summary are recomputed from the collection on every read.
//!
//! Mutations never fail. A pattern that matches nothing, or an id list with
//! no qualifying members, is a no-op reported through the returned count.

use std::collections::BTreeSet;

use tracing::debug;

use crate::pattern::{MatchType, Pattern, PatternFilter};
use crate::volume::{BackupScopeSummary, Inclusion, Provenance, Volume};

/// Holds the volume collection and the active display filter.
#[derive(Clone, Debug, Default)]
pub struct VolumeScopeEngine {
    volumes: Vec<Volume>,
    filter: Option<PatternFilter>,
    version: u64,
}

impl VolumeScopeEngine {
    /// Creates an engine over `volumes`, keeping their order.
    #[must_use]
    pub const fn new(volumes: Vec<Volume>) -> Self {
        Self {
            volumes,
            filter: None,
            version: 0,
        }
    }

    /// Returns the full collection in seed order.
    #[must_use]
    pub fn volumes(&self) -> &[Volume] {
        &self.volumes
    }

    /// Looks up a volume by its stable id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Volume> {
        self.volumes.iter().find(|volume| volume.id == id)
    }

    /// Returns the active display filter, if any.
    #[must_use]
    pub const fn active_filter(&self) -> Option<&PatternFilter> {
        self.filter.as_ref()
    }

    /// Counter bumped by every mutation call. Callers memoising derived
    /// views can key them on this value.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Included volumes, narrowed by the active filter.
    #[must_use]
    pub fn included_volumes(&self) -> Vec<&Volume> {
        self.partition(Inclusion::Included)
    }

    /// Excluded volumes, narrowed by the active filter.
    #[must_use]
    pub fn excluded_volumes(&self) -> Vec<&Volume> {
        self.partition(Inclusion::Excluded)
    }

    /// Volumes in `inclusion`, narrowed by the active filter.
    #[must_use]
    pub fn partition(&self, inclusion: Inclusion) -> Vec<&Volume> {
        self.volumes
            .iter()
            .filter(|volume| volume.inclusion == inclusion)
            .filter(|volume| {
                self.filter
                    .as_ref()
                    .is_none_or(|filter| filter.matches(&volume.volume_id))
            })
            .collect()
    }

    /// Summary over the whole collection; the display filter is ignored.
    #[must_use]
    pub fn summary(&self) -> BackupScopeSummary {
        BackupScopeSummary::from_volumes(&self.volumes)
    }

    /// Number of volumes in either partition whose label matches.
    #[must_use]
    pub fn preview_matches(&self, match_type: MatchType, pattern: &Pattern) -> usize {
        self.iter_matching(match_type, pattern).count()
    }

    /// Volumes in either partition whose label matches.
    #[must_use]
    pub fn matching_volumes(&self, match_type: MatchType, pattern: &Pattern) -> Vec<&Volume> {
        self.iter_matching(match_type, pattern).collect()
    }

    /// Number of matching volumes a bulk move into `target` would change.
    #[must_use]
    pub fn pending_changes(
        &self,
        target: Inclusion,
        match_type: MatchType,
        pattern: &Pattern,
    ) -> usize {
        self.iter_matching(match_type, pattern)
            .filter(|volume| volume.inclusion != target)
            .count()
    }

    /// Includes every matching excluded volume under a rule.
    ///
    /// Matches that are already included keep their provenance. Returns the
    /// number of volumes moved.
    pub fn include_by_pattern(&mut self, match_type: MatchType, pattern: &Pattern) -> usize {
        self.apply_rule(Inclusion::Included, match_type, pattern)
    }

    /// Excludes every matching included volume under a rule.
    ///
    /// Matches that are already excluded keep their provenance. Returns the
    /// number of volumes moved.
    pub fn exclude_by_pattern(&mut self, match_type: MatchType, pattern: &Pattern) -> usize {
        self.apply_rule(Inclusion::Excluded, match_type, pattern)
    }

    /// Manually includes the listed volumes that are currently excluded.
    ///
    /// Unknown ids and already-included volumes are ignored. Returns the
    /// number of volumes moved.
    pub fn include_volumes<I, S>(&mut self, ids: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.move_manually(Inclusion::Included, ids)
    }

    /// Manually excludes the listed volumes that are currently included.
    ///
    /// Unknown ids and already-excluded volumes are ignored. Returns the
    /// number of volumes moved.
    pub fn exclude_volumes<I, S>(&mut self, ids: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.move_manually(Inclusion::Excluded, ids)
    }

    /// Replaces the display filter.
    pub fn apply_filter(&mut self, filter: PatternFilter) {
        debug!(%filter, "display filter applied");
        self.filter = Some(filter);
        self.bump();
    }

    /// Removes the display filter.
    pub fn clear_filter(&mut self) {
        debug!("display filter cleared");
        self.filter = None;
        self.bump();
    }

    fn iter_matching<'a, 'p>(
        &'a self,
        match_type: MatchType,
        pattern: &'p Pattern,
    ) -> impl Iterator<Item = &'a Volume> + use<'a, 'p> {
        self.volumes
            .iter()
            .filter(move |volume| match_type.matches(&volume.volume_id, pattern))
    }

    fn apply_rule(&mut self, target: Inclusion, match_type: MatchType, pattern: &Pattern) -> usize {
        let rule_name = format!("{}: {match_type} \"{pattern}\"", target.verb());
        let mut changed = 0;
        for volume in &mut self.volumes {
            if volume.inclusion != target && match_type.matches(&volume.volume_id, pattern) {
                volume.place(
                    target,
                    Provenance::Rule {
                        rule_name: rule_name.clone(),
                    },
                );
                changed += 1;
            }
        }
        self.bump();
        debug!(rule = %rule_name, changed, version = self.version, "pattern rule applied");
        changed
    }

    fn move_manually<I, S>(&mut self, target: Inclusion, ids: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let wanted = ids
            .into_iter()
            .map(|id| id.as_ref().to_owned())
            .collect::<BTreeSet<_>>();
        let mut changed = 0;
        for volume in &mut self.volumes {
            if volume.inclusion != target && wanted.contains(&volume.id) {
                volume.place(target, Provenance::Manual);
                changed += 1;
            }
        }
        self.bump();
        debug!(
            partition = %target,
            requested = wanted.len(),
            changed,
            version = self.version,
            "manual move applied"
        );
        changed
    }

    const fn bump(&mut self) {
        self.version = self.version.wrapping_add(1);
    }
}
