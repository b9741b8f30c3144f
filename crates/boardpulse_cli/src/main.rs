//! Command-line front end.
//!
//! # Responsibility
//! - Read a board export file and run the core engine over it.
//! - Print the snapshot, or the report projection, as JSON on stdout.
//!
//! # Invariants
//! - Logs never go to stdout; stdout carries only the JSON document.

use anyhow::{bail, Context, Result};
use boardpulse_core::{
    default_log_level, init_logging, process_board, BoardSnapshot, LogConfig, Period,
    ProcessOptions, Report, TaskFilter, TaskStatus,
};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, ValueEnum};
use log::info;
use std::path::PathBuf;

/// What to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputKind {
    /// Normalized tasks, members and metrics.
    Snapshot,
    /// Summary, team performance and task rows.
    Report,
}

/// Command-line arguments for boardpulse
#[derive(Parser, Debug)]
#[command(name = "boardpulse")]
#[command(about = "Task status and team metrics from a board export")]
#[command(version)]
struct Args {
    /// Board export JSON file
    #[arg(short, long, env = "BOARDPULSE_INPUT")]
    input: PathBuf,

    /// First day of the reporting window (YYYY-MM-DD)
    #[arg(long, requires = "end", env = "BOARDPULSE_START")]
    start: Option<NaiveDate>,

    /// Last day of the reporting window, inclusive (YYYY-MM-DD)
    #[arg(long, requires = "start", env = "BOARDPULSE_END")]
    end: Option<NaiveDate>,

    /// Keep only tasks in this status (completed, in_progress, overdue)
    #[arg(long, value_parser = parse_status)]
    status: Option<TaskStatus>,

    /// Keep only tasks assigned to this member id
    #[arg(long)]
    member: Option<String>,

    /// Keep only tasks whose name or observations contain this text
    #[arg(long)]
    search: Option<String>,

    /// Output document
    #[arg(long, value_enum, default_value_t = OutputKind::Snapshot, env = "BOARDPULSE_OUTPUT")]
    output: OutputKind,

    /// Evaluation instant (RFC 3339); defaults to the current time
    #[arg(long)]
    now: Option<DateTime<Utc>>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "BOARDPULSE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rotating log files; logs go to stderr otherwise
    #[arg(long, env = "BOARDPULSE_LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = args
        .log_level
        .clone()
        .unwrap_or_else(|| default_log_level().to_string());
    let log_config = match &args.log_dir {
        Some(dir) => LogConfig::file(level, dir.clone()),
        None => LogConfig::stderr(level),
    };
    init_logging(&log_config).map_err(anyhow::Error::msg)?;

    let output = run(&args)?;
    println!("{output}");
    Ok(())
}

fn run(args: &Args) -> Result<String> {
    let period = match (args.start, args.end) {
        (Some(start), Some(end)) => Some(Period::new(start, end)?),
        (None, None) => None,
        _ => bail!("--start and --end must be given together"),
    };

    let mut options = ProcessOptions::new(period);
    if let Some(now) = args.now {
        options = options.evaluated_at(now);
    }

    let text = std::fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read board export `{}`", args.input.display()))?;
    let snapshot = process_board(&text, &options).context("failed to process board export")?;

    let filter = TaskFilter {
        status: args.status,
        member: args.member.clone(),
        search: args.search.clone(),
    };
    let document = render(&snapshot, &filter, args.output)?;

    info!(
        "event=cli_output module=cli status=ok output={:?} filtered={}",
        args.output,
        !filter.is_empty()
    );

    if args.pretty {
        serde_json::to_string_pretty(&document).context("failed to encode output")
    } else {
        serde_json::to_string(&document).context("failed to encode output")
    }
}

fn render(
    snapshot: &BoardSnapshot,
    filter: &TaskFilter,
    output: OutputKind,
) -> Result<serde_json::Value> {
    let document = match (output, filter.is_empty()) {
        (OutputKind::Snapshot, true) => serde_json::to_value(snapshot),
        (OutputKind::Snapshot, false) => serde_json::to_value(snapshot.filter(filter)),
        (OutputKind::Report, true) => serde_json::to_value(Report::from_snapshot(snapshot)),
        (OutputKind::Report, false) => {
            let view = snapshot.filter(filter);
            serde_json::to_value(Report::from_view(snapshot, &view))
        }
    };
    document.context("failed to serialize output")
}

fn parse_status(value: &str) -> Result<TaskStatus, String> {
    TaskStatus::parse(value).ok_or_else(|| {
        format!("unknown status `{value}`; expected completed|in_progress|overdue")
    })
}

#[cfg(test)]
mod tests {
    use super::{run, Args};
    use clap::{CommandFactory, Parser};
    use serde_json::{json, Value};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn export_file() -> NamedTempFile {
        let board = json!({
            "id": "b1",
            "name": "Marketing",
            "lists": [
                { "id": "todo", "name": "Backlog" },
                { "id": "done", "name": "Done" }
            ],
            "members": [{ "id": "ana", "fullName": "Ana Costa", "username": "ana" }],
            "cards": [
                { "id": "1", "name": "Post", "idList": "done", "idMembers": ["ana"],
                  "dateLastActivity": "2025-06-03T10:00:00Z" },
                { "id": "2", "name": "Video", "idList": "todo", "due": "2025-06-04T10:00:00Z" },
                { "id": "3", "name": "Archive", "idList": "todo",
                  "dateLastActivity": "2025-08-01T10:00:00Z" }
            ]
        });
        let mut file = NamedTempFile::new().expect("temp file should be created");
        write!(file, "{board}").expect("export should be written");
        file
    }

    fn run_with(extra: &[&str]) -> anyhow::Result<Value> {
        let file = export_file();
        let path = file.path().to_str().expect("utf-8 temp path").to_string();
        let mut argv = vec![
            "boardpulse",
            "--input",
            path.as_str(),
            "--now",
            "2025-06-10T10:00:00Z",
        ];
        argv.extend_from_slice(extra);
        let args = Args::try_parse_from(argv)?;
        Ok(serde_json::from_str(&run(&args)?)?)
    }

    #[test]
    fn cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn prints_snapshot_for_period() {
        let output = run_with(&["--start", "2025-06-01", "--end", "2025-06-30"]).unwrap();
        assert_eq!(output["boardInfo"]["totalCards"], 2);
        assert_eq!(output["metrics"]["overdue"], 1);
        assert_eq!(output["cards"][1]["daysLate"], 6);
    }

    #[test]
    fn prints_filtered_report() {
        let output = run_with(&["--output", "report", "--status", "completed"]).unwrap();
        assert_eq!(output["summary"]["totalTasks"], 1);
        assert_eq!(output["detailedTasks"][0]["member"], "Ana Costa");
        assert_eq!(output["metadata"]["boardName"], "Marketing");
    }

    #[test]
    fn rejects_half_open_and_inverted_periods() {
        assert!(run_with(&["--start", "2025-06-01"]).is_err());

        let err = run_with(&["--start", "2025-06-30", "--end", "2025-06-01"]).unwrap_err();
        assert!(err.to_string().contains("is after period end"));
    }

    #[test]
    fn rejects_unknown_status_and_missing_file() {
        assert!(run_with(&["--status", "late"]).is_err());

        let args =
            Args::try_parse_from(["boardpulse", "--input", "/nonexistent/board.json"]).unwrap();
        let err = run(&args).unwrap_err();
        assert!(err.to_string().contains("failed to read board export"));
    }
}
