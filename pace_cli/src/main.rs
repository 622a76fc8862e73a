use std::io::{self, BufRead, Write};

use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use clap::{ArgAction, Parser, Subcommand};
use pace_engine::{
    error_messages, History, PaceReport, RaceInput, Session, Submission, ValidationError,
    HISTORY_COLUMNS,
};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("PACE_COMMIT_HASH"), ")");

#[derive(Parser, Debug)]
#[command(author, version = VERSION, about = "Race pace calculator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute current and required pace for a single set of inputs
    Calc(CalcArgs),
    /// Submit inputs line by line and keep a history of accepted calculations
    Session(SessionArgs),
}

#[derive(Parser, Debug)]
struct CalcArgs {
    /// Total race distance (km)
    #[arg(long, allow_hyphen_values = true)]
    total: String,

    /// Distance already covered (km)
    #[arg(long, allow_hyphen_values = true)]
    covered: String,

    /// Time already elapsed (hours)
    #[arg(long, allow_hyphen_values = true)]
    elapsed: String,

    /// Target finish time (hours)
    #[arg(long, allow_hyphen_values = true)]
    target: String,

    /// Print the report as JSON
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,

    /// Verbose logging
    #[arg(long, action = ArgAction::SetTrue)]
    verbose: bool,
}

#[derive(Parser, Debug)]
struct SessionArgs {
    /// Render the history table as CSV
    #[arg(long, action = ArgAction::SetTrue)]
    csv: bool,

    /// Verbose logging
    #[arg(long, action = ArgAction::SetTrue)]
    verbose: bool,
}

#[derive(Debug, PartialEq)]
enum SessionCommand {
    Submit(RaceInput),
    History,
    Clear,
    Quit,
    Blank,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let verbose = match &cli.command {
        Command::Calc(args) => args.verbose,
        Command::Session(args) => args.verbose,
    };
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    match cli.command {
        Command::Calc(args) => handle_calc(args),
        Command::Session(args) => handle_session(args),
    }
}

fn handle_calc(args: CalcArgs) -> Result<()> {
    let input = RaceInput::from_fields(&args.total, &args.covered, &args.elapsed, &args.target);
    debug!(?input, "coerced calc input");

    let mut session = Session::new();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match session.submit(&input, Utc::now()) {
        Submission::Rejected(errors) => {
            write_errors(&mut out, &errors)?;
            Err(anyhow!("input rejected ({} problem(s))", errors.len()))
        }
        Submission::Accepted(report) => {
            if args.json {
                serde_json::to_writer_pretty(&mut out, &report)
                    .context("failed to serialize report")?;
                writeln!(out)?;
            } else {
                write_report(&mut out, &report)?;
            }
            Ok(())
        }
    }
}

fn handle_session(args: SessionArgs) -> Result<()> {
    let mut session = Session::new();
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(
        out,
        "Enter: <total km> <covered km> <elapsed h> <target h>, or 'history', 'clear', 'quit'"
    )?;
    for line in stdin.lock().lines() {
        let line = line.context("failed to read stdin")?;
        let command = match parse_session_line(&line) {
            Ok(command) => command,
            Err(err) => {
                warn!("{}", err);
                continue;
            }
        };
        match command {
            SessionCommand::Submit(input) => match session.submit(&input, Utc::now()) {
                Submission::Rejected(errors) => {
                    debug!(count = errors.len(), "submission rejected");
                    write_errors(&mut out, &errors)?;
                }
                Submission::Accepted(report) => {
                    write_report(&mut out, &report)?;
                    render_history(&mut out, session.history(), args.csv)?;
                }
            },
            SessionCommand::History => render_history(&mut out, session.history(), args.csv)?,
            SessionCommand::Clear => {
                session.clear_history();
                info!("History cleared");
                render_history(&mut out, session.history(), args.csv)?;
            }
            SessionCommand::Quit => break,
            SessionCommand::Blank => {}
        }
        out.flush()?;
    }

    info!(
        "Session ended with {} calculation(s) in history",
        session.history().len()
    );
    Ok(())
}

fn parse_session_line(line: &str) -> Result<SessionCommand> {
    let trimmed = line.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "" => return Ok(SessionCommand::Blank),
        "history" => return Ok(SessionCommand::History),
        "clear" => return Ok(SessionCommand::Clear),
        "quit" | "exit" => return Ok(SessionCommand::Quit),
        _ => {}
    }

    let fields: Vec<&str> = trimmed
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .collect();
    if fields.len() != 4 {
        return Err(anyhow!(
            "expected 4 fields (total covered elapsed target), got {}",
            fields.len()
        ));
    }
    Ok(SessionCommand::Submit(RaceInput::from_fields(
        fields[0], fields[1], fields[2], fields[3],
    )))
}

fn write_errors<W: Write>(out: &mut W, errors: &[ValidationError]) -> Result<()> {
    writeln!(out, "Please fix the following:")?;
    for message in error_messages(errors) {
        writeln!(out, "  - {}", message)?;
    }
    Ok(())
}

fn write_report<W: Write>(out: &mut W, report: &PaceReport) -> Result<()> {
    writeln!(out, "Current speed:      {}", report.current_speed)?;
    writeln!(out, "Required speed:     {}", report.required_speed)?;
    writeln!(out, "Remaining distance: {}", report.remaining_distance)?;
    writeln!(out, "Remaining time:     {}", report.remaining_time)?;
    writeln!(
        out,
        "[{}] {}",
        report.status_style.css_class(),
        report.status_message
    )?;
    Ok(())
}

fn render_history<W: Write>(out: &mut W, history: &History, as_csv: bool) -> Result<()> {
    if as_csv {
        let mut writer = csv::Writer::from_writer(out);
        write_history_rows(history, &mut writer)
    } else {
        write_history_table(out, history)
    }
}

fn write_history_rows<W: Write>(history: &History, writer: &mut csv::Writer<W>) -> Result<()> {
    writer.write_record(HISTORY_COLUMNS)?;
    for record in history.newest_first() {
        writer.write_record(record.cells())?;
    }
    writer.flush()?;
    Ok(())
}

fn write_history_table<W: Write>(out: &mut W, history: &History) -> Result<()> {
    let mut widths: Vec<usize> = HISTORY_COLUMNS.iter().map(|c| c.chars().count()).collect();
    for record in history.records() {
        for (width, cell) in widths.iter_mut().zip(record.cells()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let render_row = |cells: &[&str]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{:<width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join(" | ")
    };

    writeln!(out, "{}", render_row(&HISTORY_COLUMNS[..]))?;
    let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    writeln!(out, "{}", rule.join("-+-"))?;
    for record in history.newest_first() {
        writeln!(out, "{}", render_row(&record.cells()[..]))?;
    }
    Ok(())
}
