//! CLI command implementations for gptree.

pub(crate) mod describe;
pub(crate) mod evaluate;
pub(crate) mod generate;

mod output;

use clap::ValueEnum;
use gptree::{
    ArithmeticDomain, DomainDescription, Interpreter, InterpreterError, PersistenceError,
    VariableTypes, VariableValues, convert,
};
use std::error::Error;
use std::fmt;
use std::path::Path;

/// Output format for the `evaluate` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<InterpreterError> for CliError {
    fn from(e: InterpreterError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<PersistenceError> for CliError {
    fn from(e: PersistenceError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(e.to_string())
    }
}

/// Build an arithmetic interpreter, from a description file or the built-in one.
fn arithmetic_interpreter(domain: Option<&Path>) -> Result<Interpreter<ArithmeticDomain>, CliError> {
    let description = match domain {
        Some(path) => DomainDescription::from_path(path)?,
        None => ArithmeticDomain::description(),
    };
    Ok(Interpreter::new(&description, ArithmeticDomain)?)
}

/// Parse `name:type` variable declarations.
fn parse_var_types(entries: &[String]) -> Result<VariableTypes, CliError> {
    let mut types = VariableTypes::new();
    for entry in entries {
        let (name, type_tag) = entry
            .split_once(':')
            .filter(|(n, t)| !n.is_empty() && !t.is_empty())
            .ok_or_else(|| CliError::new(format!("Invalid variable '{entry}', expected name:type")))?;
        types.insert(name.to_string(), type_tag.to_string());
    }
    Ok(types)
}

/// Parse `name:type=value` variable bindings.
fn parse_var_bindings(entries: &[String]) -> Result<(VariableTypes, VariableValues), CliError> {
    let mut types = VariableTypes::new();
    let mut values = VariableValues::new();
    for entry in entries {
        let (declaration, literal) = entry.split_once('=').ok_or_else(|| {
            CliError::new(format!("Invalid binding '{entry}', expected name:type=value"))
        })?;
        let declared = parse_var_types(&[declaration.to_string()])?;
        for (name, type_tag) in declared {
            values.insert(name.clone(), convert(&type_tag, literal)?);
            types.insert(name, type_tag);
        }
    }
    Ok((types, values))
}
