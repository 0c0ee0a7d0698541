//! Generate command implementation.

use super::{CliError, arithmetic_interpreter, parse_var_types};
use clap::Args;
use gptree::tree::{save_to_path, to_text};
use gptree::{ArithmeticConstantParams, GenerationConfig};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fs;
use std::path::{Path, PathBuf};

/// Arguments of the `generate` command.
#[derive(Args, Debug)]
pub(crate) struct GenerateArgs {
    /// Type the generated trees evaluate to
    #[arg(short, long, default_value = "float")]
    return_type: String,

    /// Variable declarations as name:type (repeatable)
    #[arg(short, long = "var")]
    vars: Vec<String>,

    /// Domain description file (default: built-in arithmetic domain)
    #[arg(short, long)]
    domain: Option<PathBuf>,

    /// Generation config file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Constant parameters file (JSON)
    #[arg(long)]
    constants: Option<PathBuf>,

    /// Random seed (default: random)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of individuals to generate
    #[arg(short = 'n', long, default_value = "1")]
    count: usize,

    /// Directory to save individuals in (default: print to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// Execute the generate command.
///
/// # Errors
///
/// Returns an error if a configuration file is invalid, generation fails or
/// an individual cannot be saved.
pub(crate) fn execute(args: &GenerateArgs) -> Result<(), CliError> {
    let interpreter = arithmetic_interpreter(args.domain.as_deref())?;
    let var_types = parse_var_types(&args.vars)?;
    let config: GenerationConfig = read_json_or_default(args.config.as_deref())?;
    let params: ArithmeticConstantParams = read_json_or_default(args.constants.as_deref())?;

    let seed = args.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, count = args.count, "generating individuals");
    let mut rng = StdRng::seed_from_u64(seed);

    if let Some(dir) = &args.output {
        fs::create_dir_all(dir)?;
    }

    for i in 0..args.count {
        let individual =
            interpreter.create_individual(&args.return_type, &config, &params, &var_types, &mut rng)?;

        match &args.output {
            Some(dir) => {
                let path = dir.join(format!("individual_{i:04}.json"));
                save_to_path(&individual, &path)?;
                println!("{}: {individual}", path.display());
            }
            None => println!("{}", to_text(&individual)?),
        }
    }

    Ok(())
}

/// Read a JSON file into `T`, or use `T::default()` when no path is given.
fn read_json_or_default<T>(path: Option<&Path>) -> Result<T, CliError>
where
    T: serde::de::DeserializeOwned + Default,
{
    let Some(path) = path else {
        return Ok(T::default());
    };
    let text = fs::read_to_string(path)
        .map_err(|e| CliError::new(format!("Failed to read {}: {e}", path.display())))?;
    serde_json::from_str(&text)
        .map_err(|e| CliError::new(format!("Invalid JSON in {}: {e}", path.display())))
}
