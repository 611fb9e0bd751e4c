//! Core library for the `volscope` backup scope tool.
//!
//! The crate holds the volume partitioning engine behind a mainframe backup
//! policy's volume-selection step: an operator curates which volumes of a
//! sysplex are included in a backup job, using bulk pattern rules or manual
//! moves, while a live summary reports the resulting scope.

pub mod config;
pub mod pattern;
pub mod scope;
pub mod seed;
pub mod session;
pub mod test_support;
pub mod view;
pub mod volume;

pub use config::{ConfigError, ScopeConfig};
pub use pattern::{MatchType, Pattern, PatternError, PatternFilter};
pub use scope::VolumeScopeEngine;
pub use seed::{SeedError, SeedSpec, default_sysplexes, generate_volumes};
pub use session::{
    BulkOutcome, DEFAULT_CONFIRM_THRESHOLD, Notification, NotificationLevel, PendingBulkAction,
    ScopeSession, SessionError,
};
pub use view::{Selection, SortDirection, SortField, TableQuery};
pub use volume::{BackupScopeSummary, Inclusion, Provenance, Source, Sysplex, Volume};
