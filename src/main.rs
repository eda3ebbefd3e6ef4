use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use thiserror::Error;

use kira_teamcomp::input::config::load_config;
use kira_teamcomp::input::{InputError, load_input};
use kira_teamcomp::logging::init_tracing;
use kira_teamcomp::pipeline::stage2_pair_synergy::{NoHistory, SynergySource};
use kira_teamcomp::pipeline::stage8_report::write_reports;
use kira_teamcomp::report::format_f64_6;
use kira_teamcomp::{EngineConfig, EngineError, optimize};

#[derive(Debug, Parser)]
#[command(name = "kira-teamcomp")]
#[command(about = "Optimal five-role team composition from skill, preference and synergy")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Optimize a candidate pool and write reports
    Run(RunArgs),
}

#[derive(Debug, Clone, Args)]
struct RunArgs {
    /// Candidate pool JSON (optionally .gz)
    #[arg(long)]
    players: PathBuf,

    /// Shared-history JSON (optionally .gz); role defaults are used without it
    #[arg(long)]
    history: Option<PathBuf>,

    /// Engine configuration JSON overriding the built-in profile
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output directory
    #[arg(long)]
    out: PathBuf,

    /// Maximum number of alternative compositions
    #[arg(long)]
    max_alternatives: Option<usize>,

    /// Largest accepted score gap between an alternative and the best
    #[arg(long)]
    min_score_diff: Option<f64>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("failed to write reports: {0}")]
    Report(#[from] std::io::Error),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let Command::Run(args) = cli.command;
    init_tracing(args.verbose);
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &RunArgs) -> Result<(), CliError> {
    let config = resolve_config(args)?;
    let bundle = load_input(&args.players, args.history.as_deref())?;

    let source: &dyn SynergySource = match &bundle.history {
        Some(table) => table,
        None => &NoHistory,
    };
    let result = optimize(&bundle.players, source, &config)?;

    println!("Best composition (total {}):", format_f64_6(result.best.total_score));
    for slot in &result.best.players {
        println!("  {:<8} {}", slot.role.name(), slot.player_id);
    }
    if !result.alternatives.is_empty() {
        println!("{} alternative(s) written to report", result.alternatives.len());
    }

    write_reports(&result, &config, &args.out)?;
    Ok(())
}

fn resolve_config(args: &RunArgs) -> Result<EngineConfig, CliError> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => EngineConfig::default_v1(),
    };
    if let Some(n) = args.max_alternatives {
        config.search.max_alternatives = n;
    }
    if let Some(diff) = args.min_score_diff {
        config.search.min_score_diff = diff;
    }
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
