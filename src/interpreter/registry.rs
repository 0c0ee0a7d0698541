//! Function signatures and the registry built from a domain description.

use crate::error::{InterpreterError, Result};
use crate::tree::{CONSTANT_TAG, VARIABLE_TAG};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Declared parameter types and return type of a domain function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSignature {
    parameter_types: Vec<String>,
    return_type: String,
}

impl FunctionSignature {
    /// Create a signature.
    #[must_use]
    pub fn new(parameter_types: Vec<String>, return_type: impl Into<String>) -> Self {
        Self {
            parameter_types,
            return_type: return_type.into(),
        }
    }

    /// Parameter types, in positional order.
    #[must_use]
    pub fn parameter_types(&self) -> &[String] {
        &self.parameter_types
    }

    /// Return type.
    #[must_use]
    pub fn return_type(&self) -> &str {
        &self.return_type
    }

    /// Number of parameters.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.parameter_types.len()
    }
}

/// Parameter types as written in a domain description.
///
/// The canonical spelling is a bracketed list such as `[float,float]`; a JSON
/// array of tags is accepted too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterTypes {
    /// `[float,float]`
    Text(String),
    /// `["float", "float"]`
    List(Vec<String>),
}

/// One function record of a domain description.
///
/// Fields are optional so that a missing field is reported as a configuration
/// error naming it, not as a parse failure.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FunctionRecord {
    /// Unique function name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Ordered parameter types.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter_types: Option<ParameterTypes>,
    /// Return type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,
}

impl FunctionRecord {
    /// Create a complete record from its parts.
    #[must_use]
    pub fn new(name: &str, parameter_types: &str, return_type: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            parameter_types: Some(ParameterTypes::Text(parameter_types.to_string())),
            return_type: Some(return_type.to_string()),
        }
    }
}

/// Ordered set of function records describing a domain.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DomainDescription {
    /// Function records, in declaration order.
    pub functions: Vec<FunctionRecord>,
}

impl DomainDescription {
    /// Build a description from records.
    #[must_use]
    pub fn new(functions: Vec<FunctionRecord>) -> Self {
        Self { functions }
    }

    /// Parse a description from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`InterpreterError::Config`] if the text is not valid JSON of
    /// the expected shape.
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text)
            .map_err(|e| InterpreterError::Config(format!("invalid domain description: {e}")))
    }

    /// Read and parse a description from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`InterpreterError::Config`] if the file cannot be read or parsed.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            InterpreterError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json_str(&text)
    }
}

/// Parse a bracketed, comma-separated list of type tags.
///
/// Whitespace is ignored and `[]` yields an empty list.
///
/// # Errors
///
/// Returns [`InterpreterError::Config`] if the brackets are missing or a tag
/// is empty.
pub fn parse_parameter_types(text: &str) -> Result<Vec<String>> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    let inner = compact
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(|| {
            InterpreterError::Config(format!("parameter types '{text}' must be enclosed in brackets"))
        })?;

    if inner.is_empty() {
        return Ok(Vec::new());
    }

    inner
        .split(',')
        .map(|tag| {
            if tag.is_empty() {
                Err(InterpreterError::Config(format!(
                    "parameter types '{text}' contain an empty type"
                )))
            } else {
                Ok(tag.to_string())
            }
        })
        .collect()
}

/// Name to signature mapping for one domain.
///
/// Iteration follows the declaration order of the domain description.
#[derive(Debug, Clone, Default)]
pub struct FunctionRegistry {
    entries: Vec<(String, FunctionSignature)>,
    index: HashMap<String, usize>,
}

impl FunctionRegistry {
    /// Build a registry from a domain description.
    ///
    /// # Errors
    ///
    /// Returns [`InterpreterError::Config`] if a record misses a field, has an
    /// empty field, reuses a name, or uses a name reserved by the tree format.
    pub fn from_description(description: &DomainDescription) -> Result<Self> {
        let mut registry = Self::default();

        for (position, record) in description.functions.iter().enumerate() {
            let name = record
                .name
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .ok_or_else(|| {
                    InterpreterError::Config(format!(
                        "function record #{position} has a missing or empty 'name'"
                    ))
                })?;

            let parameter_types = match &record.parameter_types {
                Some(ParameterTypes::Text(text)) if !text.trim().is_empty() => {
                    parse_parameter_types(text)
                        .map_err(|e| InterpreterError::Config(format!("function '{name}': {e}")))?
                }
                Some(ParameterTypes::List(tags)) => {
                    if tags.iter().any(|t| t.trim().is_empty()) {
                        return Err(InterpreterError::Config(format!(
                            "function '{name}' has an empty type in 'parameter_types'"
                        )));
                    }
                    tags.iter().map(|t| t.trim().to_string()).collect()
                }
                _ => {
                    return Err(InterpreterError::Config(format!(
                        "function '{name}' has a missing or empty 'parameter_types'"
                    )));
                }
            };

            let return_type = record
                .return_type
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .ok_or_else(|| {
                    InterpreterError::Config(format!(
                        "function '{name}' has a missing or empty 'return_type'"
                    ))
                })?;

            registry.insert(name, FunctionSignature::new(parameter_types, return_type))?;
        }

        tracing::debug!(functions = registry.len(), "built function registry");
        Ok(registry)
    }

    fn insert(&mut self, name: &str, signature: FunctionSignature) -> Result<()> {
        if name == CONSTANT_TAG || name == VARIABLE_TAG {
            return Err(InterpreterError::Config(format!(
                "the function name '{name}' is reserved"
            )));
        }
        if self.index.contains_key(name) {
            return Err(InterpreterError::Config(format!(
                "the function name '{name}' is declared more than once"
            )));
        }
        self.index.insert(name.to_string(), self.entries.len());
        self.entries.push((name.to_string(), signature));
        Ok(())
    }

    /// Signature of a registered function.
    ///
    /// # Errors
    ///
    /// Returns [`InterpreterError::Lookup`] if the function is unknown.
    pub fn signature_of(&self, name: &str) -> Result<&FunctionSignature> {
        self.index
            .get(name)
            .map(|&i| &self.entries[i].1)
            .ok_or_else(|| InterpreterError::Lookup {
                kind: "function",
                name: name.to_string(),
            })
    }

    /// Names of the functions returning `type_tag`, in declaration order.
    #[must_use]
    pub fn functions_returning(&self, type_tag: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, sig)| sig.return_type() == type_tag)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Whether a function is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Number of registered functions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(name, signature)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FunctionSignature)> {
        self.entries.iter().map(|(name, sig)| (name.as_str(), sig))
    }
}
