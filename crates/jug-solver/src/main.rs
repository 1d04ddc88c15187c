//! CLI entry point for the jug solver.
//!
//! Usage:
//!   jug-solver solve <A> <B> <TARGET> [options]
//!   jug-solver solve --file <puzzle.json> [options]
//!   jug-solver solve --stdin [options]
//!   jug-solver check <A> <B> <TARGET> [--format text|json]
//!
//! Options:
//!   --strategy <greedy|shortest>  How the trace is produced (default: greedy)
//!   --max-states <n>              State limit for the shortest search (default: 1000000)
//!   --format <text|json>          Output format (default: text)
//!
//! Exit codes: 0 solved or feasible, 1 no solution, 2 bad input.
//! Logs go to stderr; set `RUST_LOG=debug` for solver details.

use std::fmt::{self, Write as _};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use jug_solver::{check, solve_with, JugPuzzle, SolverConfig, SolverResult, Step, Strategy};

#[derive(Parser)]
#[command(name = "jug-solver")]
#[command(about = "Solve the two water jugs puzzle")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find a sequence of moves that measures the target volume
    Solve {
        #[command(flatten)]
        input: PuzzleArgs,

        /// How the trace is produced
        #[arg(long, value_enum, default_value = "greedy")]
        strategy: StrategyArg,

        /// State limit for the shortest search
        #[arg(long, default_value = "1000000")]
        max_states: usize,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: Format,
    },
    /// Only check whether the target can be measured
    Check {
        #[command(flatten)]
        input: PuzzleArgs,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: Format,
    },
}

#[derive(clap::Args)]
struct PuzzleArgs {
    /// Capacity of jug A
    #[arg(
        value_name = "A",
        required_unless_present_any = ["file", "stdin"],
        conflicts_with_all = ["file", "stdin"]
    )]
    capacity_a: Option<u32>,

    /// Capacity of jug B
    #[arg(
        value_name = "B",
        required_unless_present_any = ["file", "stdin"],
        conflicts_with_all = ["file", "stdin"]
    )]
    capacity_b: Option<u32>,

    /// Volume to measure
    #[arg(
        value_name = "TARGET",
        required_unless_present_any = ["file", "stdin"],
        conflicts_with_all = ["file", "stdin"]
    )]
    target: Option<u32>,

    /// Path to puzzle JSON file
    #[arg(long, value_name = "FILE", conflicts_with = "stdin")]
    file: Option<PathBuf>,

    /// Read puzzle JSON from stdin instead of arguments
    #[arg(long)]
    stdin: bool,
}

/// CLI spelling of `Strategy`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StrategyArg {
    /// Shorter of the two greedy pour simulations
    Greedy,
    /// Breadth-first search over all jug states
    Shortest,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Greedy => Strategy::Greedy,
            StrategyArg::Shortest => Strategy::Shortest,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// Output format for a solve result
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SolutionOutput {
    solved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason_code: Option<&'static str>,
    strategy: Strategy,
    #[serde(skip_serializing_if = "Option::is_none")]
    source_capacity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    destination_capacity: Option<u32>,
    steps: Vec<Step>,
    time_elapsed_us: u64,
}

/// Output format for a feasibility check
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckOutput {
    feasible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason_code: Option<&'static str>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    report(run(cli.command))
}

/// Turn the outcome of `run` into an exit code, printing input errors once
fn report(outcome: Result<ExitCode>) -> ExitCode {
    match outcome {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn run(command: Commands) -> Result<ExitCode> {
    match command {
        Commands::Solve {
            input,
            strategy,
            max_states,
            format,
        } => {
            let puzzle = read_puzzle(&input)?;
            let config = SolverConfig {
                strategy: strategy.into(),
                max_states,
            };
            tracing::info!(
                capacity_a = puzzle.capacity_a,
                capacity_b = puzzle.capacity_b,
                target = puzzle.target,
                strategy = %config.strategy,
                "solve"
            );

            let result = solve_with(&puzzle, &config);
            tracing::info!(
                solved = result.solved,
                steps = result.sequence.as_ref().map_or(0, |s| s.len()),
                elapsed_us = result.time_elapsed_us,
                "done"
            );

            match format {
                Format::Text => print!("{}", format_text(&result)?),
                Format::Json => println!(
                    "{}",
                    serde_json::to_string_pretty(&format_result(&result))?
                ),
            }

            Ok(exit_code(result.solved))
        }
        Commands::Check { input, format } => {
            let puzzle = read_puzzle(&input)?;
            let outcome = check(puzzle.capacity_a, puzzle.capacity_b, puzzle.target);
            tracing::info!(feasible = outcome.is_ok(), "check");

            let output = CheckOutput {
                feasible: outcome.is_ok(),
                reason: outcome.err().map(|r| r.to_string()),
                reason_code: outcome.err().map(|r| r.code()),
            };
            match format {
                Format::Text => match &output.reason {
                    None => println!("feasible"),
                    Some(reason) => println!("infeasible: {}", reason),
                },
                Format::Json => println!("{}", serde_json::to_string_pretty(&output)?),
            }

            Ok(exit_code(output.feasible))
        }
    }
}

fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

/// Build the puzzle from positional arguments, a JSON file, or stdin
fn read_puzzle(args: &PuzzleArgs) -> Result<JugPuzzle> {
    let json_content = if args.stdin {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read puzzle from stdin")?;
        buffer
    } else if let Some(path) = &args.file {
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?
    } else {
        return match (args.capacity_a, args.capacity_b, args.target) {
            (Some(a), Some(b), Some(target)) => Ok(JugPuzzle::new(a, b, target)),
            _ => bail!("expected capacities A and B and a target, or --file / --stdin"),
        };
    };

    serde_json::from_str(&json_content).context("failed to parse puzzle JSON")
}

fn format_result(result: &SolverResult) -> SolutionOutput {
    SolutionOutput {
        solved: result.solved,
        reason: result.reason.map(|r| r.to_string()),
        reason_code: result.reason.map(|r| r.code()),
        strategy: result.strategy,
        source_capacity: result.sequence.as_ref().map(|s| s.source_capacity),
        destination_capacity: result.sequence.as_ref().map(|s| s.destination_capacity),
        steps: result
            .sequence
            .as_ref()
            .map(|s| s.steps().to_vec())
            .unwrap_or_default(),
        time_elapsed_us: result.time_elapsed_us,
    }
}

fn format_text(result: &SolverResult) -> Result<String, fmt::Error> {
    let mut out = String::new();
    match &result.sequence {
        Some(sequence) => {
            writeln!(
                out,
                "Source jug {}, destination jug {}",
                sequence.source_capacity, sequence.destination_capacity
            )?;
            for step in sequence {
                writeln!(
                    out,
                    "{:<16}({}, {})",
                    step.label(),
                    step.source_volume,
                    step.destination_volume
                )?;
            }
        }
        None => {
            let reason = result
                .reason
                .map(|r| r.to_string())
                .unwrap_or_else(|| "unreachable".to_string());
            writeln!(out, "No solution: {}", reason)?;
        }
    }
    Ok(out)
}
