//! Evaluate command implementation.

use super::output::JsonEvaluation;
use super::{CliError, OutputFormat, arithmetic_interpreter, parse_var_bindings};
use clap::Args;
use gptree::tree::load_from_path;
use std::path::PathBuf;

/// Arguments of the `evaluate` command.
#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Saved individual (JSON)
    #[arg(required = true)]
    individual: PathBuf,

    /// Type the tree must evaluate to
    #[arg(short, long, default_value = "float")]
    return_type: String,

    /// Variable bindings as name:type=value (repeatable)
    #[arg(short, long = "var")]
    vars: Vec<String>,

    /// Domain description file (default: built-in arithmetic domain)
    #[arg(short, long)]
    domain: Option<PathBuf>,

    /// Output format: text or json
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,
}

/// Execute the evaluate command.
///
/// # Errors
///
/// Returns an error if the individual cannot be loaded or fails to evaluate.
pub(crate) fn execute(args: &EvaluateArgs) -> Result<(), CliError> {
    let interpreter = arithmetic_interpreter(args.domain.as_deref())?;
    let (var_types, var_values) = parse_var_bindings(&args.vars)?;

    let individual = load_from_path(&args.individual).map_err(|e| {
        CliError::new(format!("Failed to load {}: {e}", args.individual.display()))
    })?;

    let value = interpreter.evaluate(&individual, &var_types, &var_values, &args.return_type)?;

    match args.format {
        OutputFormat::Text => {
            println!("{individual}");
            println!("= {value}");
        }
        OutputFormat::Json => {
            let result = JsonEvaluation {
                tree: individual.to_string(),
                return_type: args.return_type.clone(),
                value,
            };
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}
