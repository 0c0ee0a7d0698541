//! Runtime values and literal conversion.
//!
//! Constants are stored in trees as raw text. They only become values when
//! evaluated, and the type they are parsed as is the type expected at their
//! position in the tree.

use crate::error::{InterpreterError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Type tag for floating point values.
pub const FLOAT: &str = "float";
/// Type tag for integer values.
pub const INT: &str = "int";
/// Type tag for boolean values.
pub const BOOL: &str = "bool";
/// Type tag for string values.
pub const STRING: &str = "string";

/// A value produced by evaluating a tree, or bound to a variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Boolean.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Double precision float.
    Float(f64),
    /// Text.
    String(String),
}

impl Value {
    /// The type tag this value naturally carries.
    #[must_use]
    pub fn type_tag(&self) -> &'static str {
        match self {
            Self::Bool(_) => BOOL,
            Self::Int(_) => INT,
            Self::Float(_) => FLOAT,
            Self::String(_) => STRING,
        }
    }

    /// Numeric view of the value. Integers and booleans widen to `f64`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Int(v) => Some(*v as f64),
            Self::Bool(v) => Some(if *v { 1.0 } else { 0.0 }),
            Self::String(_) => None,
        }
    }

    /// Integer view of the value. Booleans widen to 0/1, floats are rejected.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            Self::Bool(v) => Some(i64::from(*v)),
            Self::Float(_) | Self::String(_) => None,
        }
    }

    /// Boolean view of the value.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::String(v) => write!(f, "{v}"),
        }
    }
}

/// Convert literal text into a value of the given type.
///
/// Booleans accept `true` and `yes` in any case; every other text, including
/// typos, becomes `false`.
///
/// # Errors
///
/// Returns [`InterpreterError::UnsupportedType`] for unknown type tags and
/// [`InterpreterError::InvalidLiteral`] when numeric text does not parse.
pub fn convert(type_tag: &str, literal: &str) -> Result<Value> {
    let invalid = || InterpreterError::InvalidLiteral {
        type_tag: type_tag.to_string(),
        literal: literal.to_string(),
    };

    match type_tag {
        FLOAT => literal
            .trim()
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| invalid()),
        INT => literal
            .trim()
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| invalid()),
        BOOL => {
            let lowered = literal.to_lowercase();
            Ok(Value::Bool(lowered == "true" || lowered == "yes"))
        }
        STRING => Ok(Value::String(literal.to_string())),
        other => Err(InterpreterError::UnsupportedType(other.to_string())),
    }
}
