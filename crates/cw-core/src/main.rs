//! cw - crossword game graphical reports.
//!
//! Turns a saved game into an HTML report with one section per position:
//! board, scores and, with recorded analysis, the top candidate moves next to
//! the move that was played.

use clap::{Args, Parser, Subcommand};
use cw_common::{Game, OutputFormat, SCHEMA_VERSION};
use cw_core::config::{load_config, ConfigError, ConfigOptions, ReportOverrides};
use cw_core::engine::RecordedEngine;
use cw_core::exit_codes::ExitCode;
use cw_core::logging::{generate_run_id, init_logging, LogConfig, LogFormat, LogLevel};
use cw_report::{EvaluationEngine, ReportSession, ReportSummary};
use std::path::PathBuf;
use tracing::{error, info};

/// Crossword game graphical report generator
#[derive(Parser)]
#[command(name = "cw")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Report configuration file (overrides CW_CONFIG and the XDG default)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "summary")]
    format: OutputFormat,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log format on stderr (human or jsonl)
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,
}

impl GlobalOpts {
    /// Level requested on the command line, if any.
    fn log_level(&self) -> Option<LogLevel> {
        if self.quiet {
            return Some(LogLevel::Error);
        }
        match self.verbose {
            0 => None,
            1 => Some(LogLevel::Debug),
            _ => Some(LogLevel::Trace),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an HTML report for a game
    Report(ReportArgs),

    /// Validate a game file
    Check(CheckArgs),

    /// Print version information
    Version,
}

#[derive(Args, Debug)]
struct ReportArgs {
    /// Game file (JSON)
    game: PathBuf,

    /// Report file, or output directory with --images
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write PNG board images next to an index.html
    #[arg(long)]
    images: bool,

    /// List candidate moves from the analysis recorded in the game file
    #[arg(long)]
    analysis: bool,

    /// Side of the square image canvas in pixels
    #[arg(long, value_name = "PX")]
    canvas: Option<u32>,

    /// Number of candidate moves listed per position
    #[arg(long)]
    moves: Option<usize>,
}

#[derive(Args, Debug)]
struct CheckArgs {
    /// Game file (JSON)
    game: PathBuf,
}

// ============================================================================
// Main entry point
// ============================================================================

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = if err.use_stderr() {
                ExitCode::ArgsError
            } else {
                ExitCode::Clean
            };
            let _ = err.print();
            std::process::exit(code.as_i32());
        }
    };

    let log_config = LogConfig::from_env(cli.global.log_level(), cli.global.log_format);
    init_logging(&log_config);

    let run_id = generate_run_id();
    let span = tracing::info_span!("run", run_id = %run_id);
    let _enter = span.enter();

    let exit_code = match &cli.command {
        Commands::Report(args) => run_report(&cli.global, args, &run_id),
        Commands::Check(args) => run_check(&cli.global, args),
        Commands::Version => {
            print_version(&cli.global);
            ExitCode::Clean
        }
    };

    std::process::exit(exit_code.as_i32());
}

// ============================================================================
// Command implementations
// ============================================================================

fn run_report(global: &GlobalOpts, args: &ReportArgs, run_id: &str) -> ExitCode {
    let game = match Game::load(&args.game) {
        Ok(game) => game,
        Err(e) => return output_error(global, "report", &e.to_string(), ExitCode::InputError),
    };

    let options = ConfigOptions {
        config_path: global.config.clone(),
    };
    let overrides = ReportOverrides {
        output: args.output.clone(),
        images: args.images,
        canvas: args.canvas,
        moves_to_show: args.moves,
    };
    let config = match load_config(&options).and_then(|resolved| resolved.finalize(&overrides)) {
        Ok(config) => config,
        Err(e) => return output_config_error(global, &e),
    };

    let mut session = match ReportSession::new(config) {
        Ok(session) => session,
        Err(e) => return output_error(global, "report", &e.to_string(), ExitCode::ArgsError),
    };

    let mut engine = args.analysis.then(RecordedEngine::new);
    session.report_game(
        &game,
        engine.as_mut().map(|e| e as &mut dyn EvaluationEngine),
    );
    let summary = session.finish();

    let exit_code = if summary.is_clean() {
        ExitCode::Clean
    } else {
        ExitCode::PartialFail
    };
    info!(exit_code = %exit_code, "Report command finished");
    output_summary(global, &summary, run_id, exit_code);
    exit_code
}

fn run_check(global: &GlobalOpts, args: &CheckArgs) -> ExitCode {
    let game = match Game::load(&args.game) {
        Ok(game) => game,
        Err(e) => return output_error(global, "check", &e.to_string(), ExitCode::InputError),
    };

    let layout = game.layout();
    let players = game
        .current_position()
        .map(|p| p.players.len())
        .unwrap_or_default();
    let game_over = game.current_position().is_some_and(|p| p.game_over());
    let analysed = game
        .history()
        .iter()
        .filter(|p| !p.analysis.is_empty())
        .count();

    match global.format {
        OutputFormat::Json => print_json(&serde_json::json!({
            "schema_version": SCHEMA_VERSION,
            "command": "check",
            "status": "ok",
            "game": args.game.display().to_string(),
            "positions": game.history().len(),
            "players": players,
            "board": { "width": layout.width, "height": layout.height },
            "game_over": game_over,
            "positions_with_analysis": analysed,
        })),
        OutputFormat::Summary => println!(
            "{}: ok ({} positions, {} players, {}x{} board{})",
            args.game.display(),
            game.history().len(),
            players,
            layout.width,
            layout.height,
            if game_over { ", finished" } else { "" }
        ),
        OutputFormat::Md => {
            println!("# cw check");
            println!();
            println!("- Game: `{}`", args.game.display());
            println!("- Positions: {}", game.history().len());
            println!("- Players: {}", players);
            println!("- Board: {}x{}", layout.width, layout.height);
            println!("- Finished: {}", if game_over { "yes" } else { "no" });
            println!("- Positions with analysis: {}", analysed);
        }
        OutputFormat::Exitcode => {}
    }

    ExitCode::Clean
}

fn print_version(global: &GlobalOpts) {
    match global.format {
        OutputFormat::Json => print_json(&serde_json::json!({
            "schema_version": SCHEMA_VERSION,
            "cw_version": env!("CARGO_PKG_VERSION"),
            "rust_version": env!("CARGO_PKG_RUST_VERSION"),
        })),
        OutputFormat::Exitcode => {}
        _ => {
            println!("cw {}", env!("CARGO_PKG_VERSION"));
            println!("schema version: {}", SCHEMA_VERSION);
        }
    }
}

// ============================================================================
// Output helpers
// ============================================================================

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(e) => error!(error = %e, "Could not serialize command output"),
    }
}

fn output_summary(global: &GlobalOpts, summary: &ReportSummary, run_id: &str, exit_code: ExitCode) {
    match global.format {
        OutputFormat::Json => print_json(&serde_json::json!({
            "schema_version": SCHEMA_VERSION,
            "run_id": run_id,
            "command": "report",
            "status": if summary.is_clean() { "ok" } else { "partial" },
            "exit_code": exit_code.code_name(),
            "summary": summary,
        })),
        OutputFormat::Summary => {
            println!(
                "[{}] report: {} ({} positions, {} images, {} failed)",
                run_id,
                summary.report_path.display(),
                summary.positions_rendered,
                summary.assets_written,
                summary.assets_failed
            );
            for diagnostic in &summary.diagnostics {
                println!("  error: {}", diagnostic.message);
            }
        }
        OutputFormat::Md => {
            println!("# cw report");
            println!();
            println!("- Report: `{}`", summary.report_path.display());
            println!("- Positions: {}", summary.positions_rendered);
            if summary.image_mode {
                println!("- Images written: {}", summary.assets_written);
                println!("- Images failed: {}", summary.assets_failed);
            }
            if !summary.diagnostics.is_empty() {
                println!();
                println!("## Errors");
                println!();
                for diagnostic in &summary.diagnostics {
                    println!("- {}", diagnostic.message);
                }
            }
            println!();
            println!("Run: {}", run_id);
        }
        OutputFormat::Exitcode => {}
    }
}

/// Output a command error in the appropriate format.
fn output_error(global: &GlobalOpts, command: &str, message: &str, exit_code: ExitCode) -> ExitCode {
    error!(command, "{}", message);

    match global.format {
        OutputFormat::Json => {
            let response = serde_json::json!({
                "schema_version": SCHEMA_VERSION,
                "command": command,
                "status": "error",
                "error": {
                    "code": exit_code.as_i32(),
                    "name": exit_code.code_name(),
                    "message": message,
                }
            });
            match serde_json::to_string_pretty(&response) {
                Ok(text) => eprintln!("{}", text),
                Err(_) => eprintln!("{} error: {}", command, message),
            }
        }
        OutputFormat::Summary => eprintln!("{} error: {}", command, message),
        OutputFormat::Exitcode => {}
        OutputFormat::Md => {
            eprintln!("# Error");
            eprintln!();
            eprintln!("{}", message);
        }
    }

    exit_code
}

/// Output a config error in the appropriate format.
fn output_config_error(global: &GlobalOpts, error: &ConfigError) -> ExitCode {
    let exit_code = match error {
        ConfigError::IoError { .. } => ExitCode::IoError,
        ConfigError::NotFound { .. }
        | ConfigError::ParseError { .. }
        | ConfigError::VersionMismatch { .. }
        | ConfigError::Invalid(_) => ExitCode::ArgsError,
    };
    output_error(global, "config", &error.to_string(), exit_code)
}
