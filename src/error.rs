//! Error types for the interpreter and generator.

use thiserror::Error;

/// Errors raised while building a registry, evaluating a tree or generating one.
///
/// Every variant is surfaced to the caller as-is; the interpreter never
/// retries or recovers, and a failed call leaves the registry untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InterpreterError {
    /// Malformed domain description: missing or empty field, duplicate or
    /// reserved function name, bad parameter type list.
    #[error("configuration error: {0}")]
    Config(String),

    /// Unknown function name or unknown variable name.
    #[error("lookup error: unknown {kind} '{name}'")]
    Lookup {
        /// What was looked up (`function`, `variable type`, `variable value`).
        kind: &'static str,
        /// The name that was not found.
        name: String,
    },

    /// A call has a different number of children than its signature declares.
    #[error("arity error: '{function}' expects {expected} argument(s), got {actual}")]
    Arity {
        /// The called function.
        function: String,
        /// Number of declared parameters.
        expected: usize,
        /// Number of children found in the tree.
        actual: usize,
    },

    /// A child or the call itself has a type different from the one required.
    #[error("type mismatch in '{function}': expected {expected}, got {actual}")]
    TypeMismatch {
        /// The function whose signature was being checked.
        function: String,
        /// Type demanded by the signature or by the parent.
        expected: String,
        /// Type actually found.
        actual: String,
    },

    /// A type tag the converter or the constant factory does not handle.
    #[error("unsupported type '{0}'")]
    UnsupportedType(String),

    /// The domain hooks have no definition for a registered function.
    #[error("function '{0}' is not implemented by the domain")]
    UnimplementedFunction(String),

    /// The tree does not have the expected shape.
    #[error("structural error: {0}")]
    Structural(String),

    /// The generator went deeper than the configured ceiling.
    #[error("generation depth {depth} exceeds the maximum of {max_depth}")]
    DepthExceeded {
        /// Depth that was requested.
        depth: usize,
        /// Configured ceiling.
        max_depth: usize,
    },

    /// The weights of the functions eligible for a return type are all zero,
    /// or add up to infinity.
    #[error("functions returning '{return_type}' have no usable weights")]
    InvalidWeights {
        /// The return type being generated.
        return_type: String,
    },

    /// A constant literal could not be parsed as its expected type.
    #[error("cannot convert literal '{literal}' to {type_tag}")]
    InvalidLiteral {
        /// The expected type at the constant's position.
        type_tag: String,
        /// The offending literal text.
        literal: String,
    },

    /// A domain hook rejected its arguments.
    #[error("domain error: {0}")]
    Domain(String),
}

/// Result type for interpreter operations.
pub type Result<T> = std::result::Result<T, InterpreterError>;

/// Errors raised while saving or loading an individual.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Reading or writing the underlying file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The text is not a valid individual document.
    #[error("format error: {0}")]
    Format(#[from] serde_json::Error),
    /// The tree is too tall to load back once saved.
    #[error("tree height {height} exceeds the persisted maximum of {max_height}")]
    TooDeep {
        /// Height of the tree.
        height: usize,
        /// Tallest tree the format round-trips.
        max_height: usize,
    },
}
