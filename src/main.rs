//! gptree CLI - generate, inspect and evaluate expression trees.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// gptree - typed expression trees for genetic programming
#[derive(Parser, Debug)]
#[command(name = "gptree")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// List the functions of a domain
    Describe(cli::describe::DescribeArgs),

    /// Generate random individuals
    Generate(cli::generate::GenerateArgs),

    /// Evaluate a saved individual
    Evaluate(cli::evaluate::EvaluateArgs),
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Logs go to stderr so generated trees can be piped
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match &args.command {
        Commands::Describe(describe) => cli::describe::execute(describe),
        Commands::Generate(generate) => cli::generate::execute(generate),
        Commands::Evaluate(evaluate) => cli::evaluate::execute(evaluate),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::warn!(error = %e, "command failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
