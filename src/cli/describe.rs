//! Describe command implementation.

use super::CliError;
use super::output::format_registry;
use clap::Args;
use std::path::PathBuf;

/// Arguments of the `describe` command.
#[derive(Args, Debug)]
pub(crate) struct DescribeArgs {
    /// Domain description file (default: built-in arithmetic domain)
    #[arg(short, long)]
    domain: Option<PathBuf>,
}

/// Execute the describe command.
///
/// # Errors
///
/// Returns an error if the domain description is invalid.
pub(crate) fn execute(args: &DescribeArgs) -> Result<(), CliError> {
    let interpreter = super::arithmetic_interpreter(args.domain.as_deref())?;
    print!("{}", format_registry(interpreter.registry()));
    Ok(())
}
