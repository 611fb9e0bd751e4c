//! Volume, sysplex, and backup scope types.

use std::fmt;

use serde::Serialize;

/// Gigabytes per terabyte used for scope size estimates.
pub const GB_PER_TB: u64 = 1024;

/// Which backup partition a volume belongs to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Inclusion {
    /// The volume is part of the backup job.
    Included,
    /// The volume is left out of the backup job.
    Excluded,
}

impl Inclusion {
    /// Returns the other partition.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Included => Self::Excluded,
            Self::Excluded => Self::Included,
        }
    }

    /// Verb used in rule names and notifications (`Include` / `Exclude`).
    #[must_use]
    pub const fn verb(self) -> &'static str {
        match self {
            Self::Included => "Include",
            Self::Excluded => "Exclude",
        }
    }
}

impl fmt::Display for Inclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Included => "included",
            Self::Excluded => "excluded",
        })
    }
}

/// Why a volume currently sits in its partition.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum Provenance {
    /// Placed by the default backup policy.
    Default,
    /// Placed by a bulk pattern rule.
    Rule {
        /// Human-readable rule description, e.g. `Include: starts-with "PROD"`.
        rule_name: String,
    },
    /// Moved by hand.
    Manual,
}

/// Provenance tag without the rule payload.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Source {
    /// See [`Provenance::Default`].
    Default,
    /// See [`Provenance::Rule`].
    Rule,
    /// See [`Provenance::Manual`].
    Manual,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Default => "default",
            Self::Rule => "rule",
            Self::Manual => "manual",
        })
    }
}

/// A storage volume that can be placed in or out of the backup scope.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Volume {
    /// Stable unique identifier.
    pub id: String,
    /// Operator-facing label such as `PROD0001`.
    pub volume_id: String,
    /// Capacity in gigabytes.
    pub size_gb: u32,
    /// Classification label, independent of inclusion.
    pub storage_group: String,
    /// Current partition.
    pub inclusion: Inclusion,
    /// Reason for the current partition.
    #[serde(flatten)]
    pub provenance: Provenance,
}

impl Volume {
    /// Returns true when the volume is in the backup scope.
    #[must_use]
    pub fn is_included(&self) -> bool {
        self.inclusion == Inclusion::Included
    }

    /// Returns the provenance tag.
    #[must_use]
    pub const fn source(&self) -> Source {
        match self.provenance {
            Provenance::Default => Source::Default,
            Provenance::Rule { .. } => Source::Rule,
            Provenance::Manual => Source::Manual,
        }
    }

    /// Returns the rule description when the volume was placed by a rule.
    #[must_use]
    pub fn rule_name(&self) -> Option<&str> {
        match &self.provenance {
            Provenance::Rule { rule_name } => Some(rule_name),
            Provenance::Default | Provenance::Manual => None,
        }
    }

    pub(crate) fn place(&mut self, inclusion: Inclusion, provenance: Provenance) {
        self.inclusion = inclusion;
        self.provenance = provenance;
    }
}

/// A named cluster of volumes. Selection context only.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Sysplex {
    /// Stable identifier (`sysplex-1`).
    pub id: String,
    /// Display name (`PROD-SYSPLEX-01`).
    pub name: String,
    /// Number of volumes the sysplex reports.
    pub total_volumes: u32,
    /// Hosting region.
    pub region: String,
}

impl Sysplex {
    /// Creates a sysplex record.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        total_volumes: u32,
        region: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            total_volumes,
            region: region.into(),
        }
    }
}

/// Counts and size of the current backup scope.
///
/// Always derived from the full collection, never from a filtered view.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BackupScopeSummary {
    /// Number of volumes in the collection.
    pub total_volumes: usize,
    /// Number of included volumes.
    pub included_count: usize,
    /// Number of excluded volumes.
    pub excluded_count: usize,
    /// Sum of included volume sizes in gigabytes.
    pub included_size_gb: u64,
    /// `included_size_gb / 1024`.
    pub estimated_size_tb: f64,
}

impl BackupScopeSummary {
    /// Aggregates a summary over `volumes`.
    #[must_use]
    pub fn from_volumes<'a>(volumes: impl IntoIterator<Item = &'a Volume>) -> Self {
        let mut total_volumes = 0;
        let mut included_count = 0;
        let mut included_size_gb = 0_u64;
        for volume in volumes {
            total_volumes += 1;
            if volume.is_included() {
                included_count += 1;
                included_size_gb += u64::from(volume.size_gb);
            }
        }
        Self {
            total_volumes,
            included_count,
            excluded_count: total_volumes - included_count,
            included_size_gb,
            estimated_size_tb: gb_to_tb(included_size_gb),
        }
    }

    /// Share of volumes included, as a percentage. Zero for an empty
    /// collection.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "percentages are presentation values; counts stay far below 2^52"
    )]
    pub fn inclusion_percentage(&self) -> f64 {
        if self.total_volumes == 0 {
            return 0.0;
        }
        self.included_count as f64 * 100.0 / self.total_volumes as f64
    }
}

impl fmt::Display for BackupScopeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total volumes:  {}", self.total_volumes)?;
        writeln!(
            f,
            "Included:       {} ({:.1}%)",
            self.included_count,
            self.inclusion_percentage()
        )?;
        writeln!(f, "Excluded:       {}", self.excluded_count)?;
        write!(f, "Estimated size: {:.1} TB", self.estimated_size_tb)
    }
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "size estimate in TB is a display value; GB totals stay far below 2^52"
)]
fn gb_to_tb(size_gb: u64) -> f64 {
    size_gb as f64 / GB_PER_TB as f64
}
