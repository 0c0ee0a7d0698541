//! Output formatting utilities for CLI.

use gptree::{FunctionRegistry, Value};
use serde::Serialize;
use std::fmt::Write;

/// JSON-serializable evaluation result.
#[derive(Debug, Serialize)]
pub(super) struct JsonEvaluation {
    /// The evaluated tree, as an S-expression.
    pub(super) tree: String,
    /// Type the tree was evaluated as.
    pub(super) return_type: String,
    /// Resulting value.
    pub(super) value: Value,
}

/// Format a registry as a table of signatures.
pub(super) fn format_registry(registry: &FunctionRegistry) -> String {
    let width = registry.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    let mut output = String::new();

    let _ = writeln!(output, "{} functions", registry.len());
    for (name, signature) in registry.iter() {
        let _ = writeln!(
            output,
            "  {name:<width$}  ({}) -> {}",
            signature.parameter_types().join(", "),
            signature.return_type()
        );
    }

    output
}
