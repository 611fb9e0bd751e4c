//! Volume selection session: the controller between the operator and the
//! scope engine.
//!
//! The engine applies any mutation it is asked to. The session adds the
//! operator-facing policy around it: bulk pattern actions that would move
//! more than the confirmation threshold are parked until confirmed, and every
//! action yields a [`Notification`] describing what changed.

use std::fmt;

use thiserror::Error;
use tracing::info;

use crate::pattern::{MatchType, Pattern};
use crate::scope::VolumeScopeEngine;
use crate::volume::{Inclusion, Sysplex};

/// Bulk actions moving more volumes than this need confirmation.
pub const DEFAULT_CONFIRM_THRESHOLD: usize = 100;

/// Severity of a user-visible notification.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NotificationLevel {
    /// Something changed.
    Success,
    /// Nothing changed; informational only.
    Info,
}

/// Message shown to the operator after an action.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Notification {
    /// Severity.
    pub level: NotificationLevel,
    /// Text.
    pub message: String,
}

impl Notification {
    fn moved(target: Inclusion, count: usize) -> Self {
        let message = match target {
            Inclusion::Included => format!("{count} volumes included in backup"),
            Inclusion::Excluded => format!("{count} volumes excluded from backup"),
        };
        Self {
            level: NotificationLevel::Success,
            message,
        }
    }

    fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// A bulk pattern action waiting for operator confirmation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PendingBulkAction {
    /// Partition the matching volumes move into.
    pub target: Inclusion,
    /// Comparison used by the rule.
    pub match_type: MatchType,
    /// Pattern used by the rule.
    pub pattern: Pattern,
    /// Number of volumes the action would move when parked.
    pub count: usize,
}

impl PendingBulkAction {
    /// Confirmation prompt shown before running the parked action.
    #[must_use]
    pub fn prompt(&self) -> String {
        format!(
            "You are about to {} all volumes matching \"{}\" ({}). This affects {} volumes.",
            self.target.verb().to_lowercase(),
            self.pattern,
            self.match_type.as_str().replace('-', " "),
            self.count
        )
    }
}

/// Result of requesting a bulk pattern action.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BulkOutcome {
    /// The rule ran immediately.
    Applied(Notification),
    /// The rule would move too many volumes and is parked.
    NeedsConfirmation(PendingBulkAction),
    /// No volume would move; nothing ran.
    Skipped(Notification),
}

/// Errors raised by session operations.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum SessionError {
    /// The session was created without any sysplex.
    #[error("at least one sysplex is required")]
    NoSysplexes,
    /// The requested sysplex is not in the list.
    #[error("unknown sysplex '{0}'")]
    UnknownSysplex(String),
    /// Confirmation was requested with nothing parked.
    #[error("no bulk action is awaiting confirmation")]
    NoPendingAction,
}

/// Operator session over one engine.
#[derive(Clone, Debug)]
pub struct ScopeSession {
    engine: VolumeScopeEngine,
    sysplexes: Vec<Sysplex>,
    selected_sysplex: usize,
    confirm_threshold: usize,
    pending: Option<PendingBulkAction>,
}

impl ScopeSession {
    /// Creates a session with the first sysplex selected.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoSysplexes`] when `sysplexes` is empty.
    pub fn new(
        engine: VolumeScopeEngine,
        sysplexes: Vec<Sysplex>,
        confirm_threshold: usize,
    ) -> Result<Self, SessionError> {
        if sysplexes.is_empty() {
            return Err(SessionError::NoSysplexes);
        }
        Ok(Self {
            engine,
            sysplexes,
            selected_sysplex: 0,
            confirm_threshold,
            pending: None,
        })
    }

    /// Read access to the engine.
    #[must_use]
    pub const fn engine(&self) -> &VolumeScopeEngine {
        &self.engine
    }

    /// Write access to the engine, for filter changes.
    pub const fn engine_mut(&mut self) -> &mut VolumeScopeEngine {
        &mut self.engine
    }

    /// All known sysplexes.
    #[must_use]
    pub fn sysplexes(&self) -> &[Sysplex] {
        &self.sysplexes
    }

    /// The currently selected sysplex.
    #[must_use]
    pub fn selected_sysplex(&self) -> Option<&Sysplex> {
        self.sysplexes.get(self.selected_sysplex)
    }

    /// Bulk actions moving more volumes than this are parked.
    #[must_use]
    pub const fn confirm_threshold(&self) -> usize {
        self.confirm_threshold
    }

    /// The action awaiting confirmation, if any.
    #[must_use]
    pub const fn pending(&self) -> Option<&PendingBulkAction> {
        self.pending.as_ref()
    }

    /// Selects a sysplex by id. The volume collection is not reloaded.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnknownSysplex`] when no sysplex has `id`.
    pub fn select_sysplex(&mut self, id: &str) -> Result<&Sysplex, SessionError> {
        let index = self
            .sysplexes
            .iter()
            .position(|sysplex| sysplex.id == id)
            .ok_or_else(|| SessionError::UnknownSysplex(id.to_owned()))?;
        self.selected_sysplex = index;
        let selected = self
            .sysplexes
            .get(index)
            .ok_or_else(|| SessionError::UnknownSysplex(id.to_owned()))?;
        info!(sysplex = %selected.name, "sysplex selected");
        Ok(selected)
    }

    /// Requests a bulk move of every volume matching the pattern into
    /// `target`.
    ///
    /// Any previously parked action is replaced.
    pub fn request_bulk(
        &mut self,
        target: Inclusion,
        match_type: MatchType,
        pattern: Pattern,
    ) -> BulkOutcome {
        let count = self.engine.pending_changes(target, match_type, &pattern);
        if count == 0 {
            self.pending = None;
            return BulkOutcome::Skipped(Notification::info(format!(
                "No matching volumes to {}",
                target.verb().to_lowercase()
            )));
        }
        if count > self.confirm_threshold {
            let action = PendingBulkAction {
                target,
                match_type,
                pattern,
                count,
            };
            info!(
                partition = %target,
                %match_type,
                pattern = %action.pattern,
                count,
                "bulk action awaiting confirmation"
            );
            self.pending = Some(action.clone());
            return BulkOutcome::NeedsConfirmation(action);
        }
        self.pending = None;
        BulkOutcome::Applied(self.run_bulk(target, match_type, &pattern))
    }

    /// Runs the parked bulk action.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoPendingAction`] when nothing is parked.
    pub fn confirm_pending(&mut self) -> Result<Notification, SessionError> {
        let action = self.pending.take().ok_or(SessionError::NoPendingAction)?;
        info!(partition = %action.target, count = action.count, "bulk action confirmed");
        Ok(self.run_bulk(action.target, action.match_type, &action.pattern))
    }

    /// Drops the parked bulk action, returning it.
    pub const fn cancel_pending(&mut self) -> Option<PendingBulkAction> {
        self.pending.take()
    }

    /// Moves hand-picked volumes into `target`.
    ///
    /// The notification reports how many volumes actually moved.
    pub fn move_selected<I, S>(&mut self, target: Inclusion, ids: I) -> Notification
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let moved = match target {
            Inclusion::Included => self.engine.include_volumes(ids),
            Inclusion::Excluded => self.engine.exclude_volumes(ids),
        };
        info!(partition = %target, moved, "manual move");
        if moved == 0 {
            return Notification::info(format!(
                "No selected volumes to {}",
                target.verb().to_lowercase()
            ));
        }
        Notification::moved(target, moved)
    }

    fn run_bulk(
        &mut self,
        target: Inclusion,
        match_type: MatchType,
        pattern: &Pattern,
    ) -> Notification {
        let moved = match target {
            Inclusion::Included => self.engine.include_by_pattern(match_type, pattern),
            Inclusion::Excluded => self.engine.exclude_by_pattern(match_type, pattern),
        };
        info!(partition = %target, %match_type, %pattern, moved, "bulk action applied");
        Notification::moved(target, moved)
    }
}
