//! The typed tree interpreter.
//!
//! An [`Interpreter`] pairs a [`FunctionRegistry`] with the [`DomainHooks`] of
//! one domain. It evaluates individuals (type-checking every call before any
//! of its arguments run) and generates new random, type-correct individuals.
//!
//! # Example
//!
//! ```
//! use gptree::{ArithmeticDomain, Individual, Interpreter, Node, Value, VariableTypes, VariableValues};
//!
//! let interpreter = Interpreter::new(&ArithmeticDomain::description(), ArithmeticDomain)?;
//! let tree = Individual::new(Node::call(
//!     "addition_float",
//!     vec![Node::constant("2"), Node::variable("x")],
//! ));
//!
//! let types = VariableTypes::from([("x".to_string(), "float".to_string())]);
//! let values = VariableValues::from([("x".to_string(), Value::Float(3.0))]);
//! let result = interpreter.evaluate(&tree, &types, &values, "float")?;
//! assert_eq!(result, Value::Float(5.0));
//! # Ok::<(), gptree::InterpreterError>(())
//! ```

mod eval;
mod generate;
mod registry;

pub use generate::GenerationConfig;
pub use registry::{
    DomainDescription, FunctionRecord, FunctionRegistry, FunctionSignature, ParameterTypes,
    parse_parameter_types,
};

use crate::domain::DomainHooks;
use crate::error::Result;
use crate::value::Value;
use std::collections::BTreeMap;

/// Declared type of each variable, used for type checking.
pub type VariableTypes = BTreeMap<String, String>;

/// Value of each variable, used for evaluation.
pub type VariableValues = BTreeMap<String, Value>;

/// Evaluates and generates trees for one domain.
#[derive(Debug, Clone)]
pub struct Interpreter<H> {
    registry: FunctionRegistry,
    hooks: H,
}

impl<H: DomainHooks> Interpreter<H> {
    /// Build an interpreter from a domain description and its hooks.
    ///
    /// # Errors
    ///
    /// Returns [`crate::InterpreterError::Config`] if the description is malformed.
    pub fn new(description: &DomainDescription, hooks: H) -> Result<Self> {
        let registry = FunctionRegistry::from_description(description)?;
        Ok(Self::with_registry(registry, hooks))
    }

    /// Build an interpreter around an existing registry.
    #[must_use]
    pub fn with_registry(registry: FunctionRegistry, hooks: H) -> Self {
        Self { registry, hooks }
    }

    /// The function registry.
    #[must_use]
    pub fn registry(&self) -> &FunctionRegistry {
        &self.registry
    }

    /// The domain hooks.
    #[must_use]
    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    /// Signature of a registered function.
    ///
    /// # Errors
    ///
    /// Returns [`crate::InterpreterError::Lookup`] if the function is unknown.
    pub fn signature_of(&self, name: &str) -> Result<&FunctionSignature> {
        self.registry.signature_of(name)
    }

    /// Names of the registered functions returning `type_tag`.
    #[must_use]
    pub fn functions_returning(&self, type_tag: &str) -> Vec<&str> {
        self.registry.functions_returning(type_tag)
    }
}
