//! Binary entry point for the volscope CLI.

use std::io::{self, Write};
use std::process;

use clap::Parser;
use serde_json::json;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use volscope::{
    BulkOutcome, ConfigError, Inclusion, MatchType, Pattern, PatternError, PatternFilter,
    ScopeConfig, ScopeSession, SeedError, Selection, SessionError, SortDirection, SortField,
    TableQuery, Volume, VolumeScopeEngine, default_sysplexes, generate_volumes,
};

mod cli;

use cli::{
    BulkCommand, Cli, Command, GlobalArgs, ListCommand, ListSide, MatchArg, MoveCommand, SortArg,
};

/// Exit status when a bulk action needs `--yes`.
const EXIT_NEEDS_CONFIRMATION: i32 = 2;

/// Environment variable holding the tracing filter directive.
const LOG_ENV: &str = "VOLSCOPE_LOG";

#[derive(Debug, Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("seed error: {0}")]
    Seed(#[from] SeedError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("invalid pattern: {0}")]
    Pattern(#[from] PatternError),
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
    #[error("failed to encode output: {0}")]
    Json(#[from] serde_json::Error),
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let exit_code = match run(cli, &mut io::stdout().lock()) {
        Ok(code) => code,
        Err(err) => {
            report_error(&err);
            1
        }
    };

    process::exit(exit_code);
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli, out: &mut impl Write) -> Result<i32, CliError> {
    let loaded = ScopeConfig::load_without_cli_args()?;
    let config = apply_overrides(loaded, &cli.globals);
    config.validate()?;
    let mut session = build_session(&config, cli.globals.sysplex.as_deref())?;
    execute(&mut session, cli.command, cli.globals.json, out)
}

fn apply_overrides(config: ScopeConfig, globals: &GlobalArgs) -> ScopeConfig {
    ScopeConfig {
        seed_volume_count: globals.volumes.unwrap_or(config.seed_volume_count),
        rng_seed: globals.seed.unwrap_or(config.rng_seed),
        confirm_threshold: globals.confirm_threshold.unwrap_or(config.confirm_threshold),
        default_sysplex: config.default_sysplex,
    }
}

fn build_session(config: &ScopeConfig, sysplex: Option<&str>) -> Result<ScopeSession, CliError> {
    let volumes = generate_volumes(config.seed_spec())?;
    let mut session = ScopeSession::new(
        VolumeScopeEngine::new(volumes),
        default_sysplexes(),
        config.confirm_threshold,
    )?;
    session.select_sysplex(sysplex.unwrap_or(&config.default_sysplex))?;
    Ok(session)
}

fn execute(
    session: &mut ScopeSession,
    command: Command,
    as_json: bool,
    out: &mut impl Write,
) -> Result<i32, CliError> {
    match command {
        Command::Summary => write_summary(session, as_json, out)?,
        Command::Sysplexes => write_sysplexes(session, as_json, out)?,
        Command::Preview(args) => {
            let match_type = to_match_type(args.match_type);
            let pattern = Pattern::new(&args.pattern)?;
            let count = session.engine().preview_matches(match_type, &pattern);
            if as_json {
                let value = json!({
                    "match_type": match_type,
                    "pattern": pattern,
                    "matches": count,
                });
                writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
            } else {
                writeln!(out, "{count} volumes match {match_type} \"{pattern}\"")?;
            }
        }
        Command::List(args) => write_list(session, &args, as_json, out)?,
        Command::Include(args) => {
            return run_bulk(session, Inclusion::Included, &args, as_json, out);
        }
        Command::Exclude(args) => {
            return run_bulk(session, Inclusion::Excluded, &args, as_json, out);
        }
        Command::MoveIn(args) => {
            move_selection(session, Inclusion::Included, &args, as_json, out)?;
        }
        Command::MoveOut(args) => {
            move_selection(session, Inclusion::Excluded, &args, as_json, out)?;
        }
    }
    Ok(0)
}

fn run_bulk(
    session: &mut ScopeSession,
    target: Inclusion,
    args: &BulkCommand,
    as_json: bool,
    out: &mut impl Write,
) -> Result<i32, CliError> {
    let match_type = to_match_type(args.pattern.match_type);
    let pattern = Pattern::new(&args.pattern.pattern)?;
    match session.request_bulk(target, match_type, pattern) {
        BulkOutcome::Applied(notification) | BulkOutcome::Skipped(notification) => {
            write_notification(session, &notification.message, as_json, out)?;
        }
        BulkOutcome::NeedsConfirmation(action) => {
            if !args.yes {
                session.cancel_pending();
                if as_json {
                    let value = json!({
                        "confirmation_required": true,
                        "message": action.prompt(),
                        "count": action.count,
                    });
                    writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
                } else {
                    writeln!(out, "{}", action.prompt())?;
                    writeln!(out, "Re-run with --yes to confirm.")?;
                }
                return Ok(EXIT_NEEDS_CONFIRMATION);
            }
            let notification = session.confirm_pending()?;
            write_notification(session, &notification.message, as_json, out)?;
        }
    }
    Ok(0)
}

/// Selects volumes in the list opposite `target` and moves them across.
fn move_selection(
    session: &mut ScopeSession,
    target: Inclusion,
    args: &MoveCommand,
    as_json: bool,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let ids = {
        let visible = session.engine().partition(target.opposite());
        let mut selection = Selection::new();
        if args.all {
            selection.select_all(&visible);
        } else {
            selection.extend(&args.ids);
            selection.retain_visible(&visible);
        }
        selection.ids()
    };
    let notification = session.move_selected(target, &ids);
    write_notification(session, &notification.message, as_json, out)
}

fn write_summary(
    session: &ScopeSession,
    as_json: bool,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let summary = session.engine().summary();
    if as_json {
        let value = json!({
            "sysplex": session.selected_sysplex(),
            "summary": summary,
            "inclusion_percentage": summary.inclusion_percentage(),
        });
        writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
        return Ok(());
    }
    if let Some(sysplex) = session.selected_sysplex() {
        writeln!(out, "Sysplex:        {} ({})", sysplex.name, sysplex.region)?;
    }
    writeln!(out, "{summary}")?;
    Ok(())
}

fn write_sysplexes(
    session: &ScopeSession,
    as_json: bool,
    out: &mut impl Write,
) -> Result<(), CliError> {
    if as_json {
        writeln!(
            out,
            "{}",
            serde_json::to_string_pretty(session.sysplexes())?
        )?;
        return Ok(());
    }
    let selected = session.selected_sysplex().map(|sysplex| sysplex.id.as_str());
    for sysplex in session.sysplexes() {
        let marker = if selected == Some(sysplex.id.as_str()) {
            '*'
        } else {
            ' '
        };
        writeln!(
            out,
            "{marker} {:<10} {:<16} {:<11} {:>5} volumes",
            sysplex.id, sysplex.name, sysplex.region, sysplex.total_volumes
        )?;
    }
    Ok(())
}

fn write_list(
    session: &mut ScopeSession,
    args: &ListCommand,
    as_json: bool,
    out: &mut impl Write,
) -> Result<(), CliError> {
    if let Some(raw) = &args.filter {
        let filter = PatternFilter::new(to_match_type(args.filter_match), Pattern::new(raw)?);
        session.engine_mut().apply_filter(filter);
    }
    let side = match args.side {
        ListSide::Included => Inclusion::Included,
        ListSide::Excluded => Inclusion::Excluded,
    };
    let query = TableQuery {
        search: args.search.clone(),
        sort_field: sort_field(args.sort),
        direction: if args.desc {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        },
    };
    let partition = session.engine().partition(side);
    let mut rows = query.apply(&partition);
    if let Some(limit) = args.limit {
        rows.truncate(limit);
    }

    if as_json {
        writeln!(out, "{}", serde_json::to_string_pretty(&rows)?)?;
        return Ok(());
    }
    for volume in &rows {
        writeln!(out, "{}", render_row(volume))?;
    }
    writeln!(out, "{} {side} volumes shown", rows.len())?;
    Ok(())
}

fn write_notification(
    session: &ScopeSession,
    message: &str,
    as_json: bool,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let summary = session.engine().summary();
    if as_json {
        let value = json!({ "message": message, "summary": summary });
        writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
        return Ok(());
    }
    writeln!(out, "{message}")?;
    writeln!(out, "{summary}")?;
    Ok(())
}

fn render_row(volume: &Volume) -> String {
    let rule = volume.rule_name().unwrap_or("");
    format!(
        "{:<10} {:<10} {:>4} GB  {:<11} {:<7} {rule}",
        volume.id,
        volume.volume_id,
        volume.size_gb,
        volume.storage_group,
        volume.source()
    )
    .trim_end()
    .to_owned()
}

const fn to_match_type(arg: MatchArg) -> MatchType {
    match arg {
        MatchArg::StartsWith => MatchType::StartsWith,
        MatchArg::Contains => MatchType::Contains,
        MatchArg::EndsWith => MatchType::EndsWith,
    }
}

const fn sort_field(arg: SortArg) -> SortField {
    match arg {
        SortArg::VolumeId => SortField::VolumeId,
        SortArg::Size => SortField::Size,
        SortArg::StorageGroup => SortField::StorageGroup,
    }
}

fn report_error(err: &CliError) {
    write_error(io::stderr(), err);
}

fn write_error(mut target: impl Write, err: &CliError) {
    writeln!(target, "{err}").ok();
}
