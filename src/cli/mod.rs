//! Command-line interface definitions for the `volscope` binary.
//!
//! This module centralises the clap parser structures so both the main binary
//! and the build script can reuse them when generating the manual page.

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Top-level CLI for the `volscope` binary.
#[derive(Debug, Parser)]
#[command(
    name = "volscope",
    about = "Curate which sysplex volumes are included in a backup job",
    arg_required_else_help = true
)]
pub(crate) struct Cli {
    /// Settings applied before the command runs.
    #[command(flatten)]
    pub(crate) globals: GlobalArgs,
    /// Action to perform on the seeded volume collection.
    #[command(subcommand)]
    pub(crate) command: Command,
}

/// Options shared by every subcommand.
#[derive(Debug, Args)]
pub(crate) struct GlobalArgs {
    /// Seed for the demo volume generator (overrides `rng_seed`).
    #[arg(long, global = true, value_name = "SEED")]
    pub(crate) seed: Option<u64>,
    /// Number of demo volumes to generate (overrides `seed_volume_count`).
    #[arg(long, global = true, value_name = "COUNT")]
    pub(crate) volumes: Option<usize>,
    /// Bulk actions moving more volumes than this need `--yes`
    /// (overrides `confirm_threshold`).
    #[arg(long, global = true, value_name = "COUNT")]
    pub(crate) confirm_threshold: Option<usize>,
    /// Sysplex to select before running the command.
    #[arg(long, global = true, value_name = "ID")]
    pub(crate) sysplex: Option<String>,
    /// Emit JSON instead of text.
    #[arg(long, global = true)]
    pub(crate) json: bool,
}

/// Subcommands of `volscope`.
#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Show counts and estimated size of the backup scope.
    #[command(name = "summary")]
    Summary,
    /// List the known sysplexes.
    #[command(name = "sysplexes")]
    Sysplexes,
    /// Count volumes matching a pattern in either list.
    #[command(name = "preview")]
    Preview(PatternArgs),
    /// List the included or excluded volumes.
    #[command(name = "list")]
    List(ListCommand),
    /// Include every excluded volume matching a pattern.
    #[command(name = "include")]
    Include(BulkCommand),
    /// Exclude every included volume matching a pattern.
    #[command(name = "exclude")]
    Exclude(BulkCommand),
    /// Manually include volumes by id.
    #[command(name = "move-in")]
    MoveIn(MoveCommand),
    /// Manually exclude volumes by id.
    #[command(name = "move-out")]
    MoveOut(MoveCommand),
}

/// How a pattern is compared against volume labels.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub(crate) enum MatchArg {
    /// The label begins with the pattern.
    StartsWith,
    /// The label contains the pattern.
    Contains,
    /// The label ends with the pattern.
    EndsWith,
}

/// A pattern and its match type.
#[derive(Debug, Args)]
pub(crate) struct PatternArgs {
    /// Comparison applied to each volume label.
    #[arg(long = "match", value_enum, default_value = "starts-with")]
    pub(crate) match_type: MatchArg,
    /// Pattern text; compared case-insensitively.
    #[arg(value_name = "PATTERN")]
    pub(crate) pattern: String,
}

/// Which list `volscope list` prints.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub(crate) enum ListSide {
    /// Volumes included in the backup.
    Included,
    /// Volumes excluded from the backup.
    Excluded,
}

/// Column used to order `volscope list`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub(crate) enum SortArg {
    /// Volume label.
    VolumeId,
    /// Size in gigabytes.
    Size,
    /// Storage group.
    StorageGroup,
}

/// Arguments for `volscope list`.
#[derive(Debug, Args)]
pub(crate) struct ListCommand {
    /// List to print.
    #[arg(value_enum, default_value = "included")]
    pub(crate) side: ListSide,
    /// Display filter match type.
    #[arg(long = "filter-match", value_enum, default_value = "starts-with")]
    pub(crate) filter_match: MatchArg,
    /// Display filter pattern; narrows the list without changing the scope.
    #[arg(long, value_name = "PATTERN")]
    pub(crate) filter: Option<String>,
    /// Case-insensitive search on label or storage group.
    #[arg(long, value_name = "TEXT")]
    pub(crate) search: Option<String>,
    /// Sort column.
    #[arg(long, value_enum, default_value = "volume-id")]
    pub(crate) sort: SortArg,
    /// Sort in descending order.
    #[arg(long)]
    pub(crate) desc: bool,
    /// Maximum number of rows to print.
    #[arg(long, value_name = "ROWS")]
    pub(crate) limit: Option<usize>,
}

/// Arguments for `volscope include` and `volscope exclude`.
#[derive(Debug, Args)]
pub(crate) struct BulkCommand {
    /// Pattern selecting the volumes to move.
    #[command(flatten)]
    pub(crate) pattern: PatternArgs,
    /// Confirm actions that move more volumes than the threshold.
    #[arg(long, short = 'y')]
    pub(crate) yes: bool,
}

/// Arguments for `volscope move-in` and `volscope move-out`.
#[derive(Debug, Args)]
pub(crate) struct MoveCommand {
    /// Volume ids (for example `vol-12`). Ids already in the target list
    /// are ignored.
    #[arg(required_unless_present = "all", value_name = "ID")]
    pub(crate) ids: Vec<String>,
    /// Select every volume in the source list.
    #[arg(long, conflicts_with = "ids")]
    pub(crate) all: bool,
}
