//! Per-table search, sort, and selection over a derived partition view.
//!
//! These helpers only reorder or narrow slices the engine already produced;
//! they never touch inclusion state or provenance.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::volume::Volume;

/// Column a table is sorted by.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SortField {
    /// Operator-facing label.
    #[default]
    VolumeId,
    /// Capacity in gigabytes.
    Size,
    /// Storage group label.
    StorageGroup,
}

/// Sort direction.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first.
    Descending,
}

/// Local search and sort settings for one table.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TableQuery {
    /// Case-insensitive text matched against label or storage group.
    pub search: Option<String>,
    /// Sort column.
    pub sort_field: SortField,
    /// Sort direction.
    pub direction: SortDirection,
}

impl TableQuery {
    /// Toggles the direction when `field` is already the sort column,
    /// otherwise sorts ascending by `field`.
    pub fn sort_by(&mut self, field: SortField) {
        if self.sort_field == field {
            self.direction = match self.direction {
                SortDirection::Ascending => SortDirection::Descending,
                SortDirection::Descending => SortDirection::Ascending,
            };
        } else {
            self.sort_field = field;
            self.direction = SortDirection::Ascending;
        }
    }

    /// Narrows and orders `volumes` for display.
    #[must_use]
    pub fn apply<'a>(&self, volumes: &[&'a Volume]) -> Vec<&'a Volume> {
        let needle = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_lowercase);
        let mut rows = volumes
            .iter()
            .copied()
            .filter(|volume| {
                needle.as_deref().is_none_or(|text| {
                    volume.volume_id.to_lowercase().contains(text)
                        || volume.storage_group.to_lowercase().contains(text)
                })
            })
            .collect::<Vec<_>>();
        rows.sort_by(|left, right| {
            let ordering = self.compare(left, right);
            match self.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
        rows
    }

    fn compare(&self, left: &Volume, right: &Volume) -> Ordering {
        match self.sort_field {
            SortField::VolumeId => left.volume_id.cmp(&right.volume_id),
            SortField::Size => left.size_gb.cmp(&right.size_gb),
            SortField::StorageGroup => left.storage_group.cmp(&right.storage_group),
        }
    }
}

/// Ids selected in one partition table.
///
/// Owned by the presentation layer; the engine only ever sees the id list
/// handed to a move.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Selection {
    ids: BTreeSet<String>,
}

impl Selection {
    /// Creates an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `id` when absent, removes it when present.
    pub fn toggle(&mut self, id: &str) {
        if !self.ids.remove(id) {
            self.ids.insert(id.to_owned());
        }
    }

    /// Adds every id in `ids`; ids already selected stay selected.
    pub fn extend<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.ids
            .extend(ids.into_iter().map(|id| id.as_ref().to_owned()));
    }

    /// Returns true when `id` is selected.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Selects every visible row.
    pub fn select_all(&mut self, visible: &[&Volume]) {
        self.ids
            .extend(visible.iter().map(|volume| volume.id.clone()));
    }

    /// Returns true when the view is non-empty and every row is selected.
    #[must_use]
    pub fn is_all_selected(&self, visible: &[&Volume]) -> bool {
        !visible.is_empty() && visible.iter().all(|volume| self.contains(&volume.id))
    }

    /// Drops ids that are no longer in the view, e.g. after a move.
    pub fn retain_visible(&mut self, visible: &[&Volume]) {
        let present = visible
            .iter()
            .map(|volume| volume.id.as_str())
            .collect::<BTreeSet<_>>();
        self.ids.retain(|id| present.contains(id.as_str()));
    }

    /// Clears the selection.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Number of selected ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns true when nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Selected ids in sorted order.
    #[must_use]
    pub fn ids(&self) -> Vec<String> {
        self.ids.iter().cloned().collect()
    }
}
