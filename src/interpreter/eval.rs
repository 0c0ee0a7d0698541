//! Type-checked recursive evaluation.

use super::{Interpreter, VariableTypes, VariableValues};
use crate::domain::DomainHooks;
use crate::error::{InterpreterError, Result};
use crate::tree::{Individual, Node};
use crate::value::{Value, convert};

impl<H: DomainHooks> Interpreter<H> {
    /// Evaluate an individual.
    ///
    /// # Errors
    ///
    /// Returns [`InterpreterError::Structural`] if the individual's container
    /// does not hold exactly one node, and any error raised while evaluating
    /// the tree (see [`Interpreter::evaluate_element`]).
    pub fn evaluate(
        &self,
        individual: &Individual,
        var_types: &VariableTypes,
        var_values: &VariableValues,
        expected_type: &str,
    ) -> Result<Value> {
        let head = individual.head()?;
        tracing::debug!(tree = %head, expected_type, "evaluating individual");
        self.evaluate_element(head, var_types, var_values, expected_type)
    }

    /// Evaluate a node whose position demands `expected_type`.
    ///
    /// Constants are parsed as `expected_type`. Variables are read from
    /// `var_values`. Calls are signature-checked first, then their children are
    /// evaluated left to right against the declared parameter types, and the
    /// results handed to the domain.
    ///
    /// # Errors
    ///
    /// Returns lookup, arity, type mismatch and conversion errors from the
    /// tree, and any error raised by the domain hooks.
    pub fn evaluate_element(
        &self,
        node: &Node,
        var_types: &VariableTypes,
        var_values: &VariableValues,
        expected_type: &str,
    ) -> Result<Value> {
        match node {
            Node::Constant { literal } => convert(expected_type, literal),
            Node::Variable { name } => {
                var_values
                    .get(name)
                    .cloned()
                    .ok_or_else(|| InterpreterError::Lookup {
                        kind: "variable value",
                        name: name.clone(),
                    })
            }
            Node::Call { function, children } => {
                self.check_signature(function, children, var_types, expected_type)?;
                let signature = self.registry.signature_of(function)?;

                let args = children
                    .iter()
                    .zip(signature.parameter_types())
                    .map(|(child, param_type)| {
                        self.evaluate_element(child, var_types, var_values, param_type)
                    })
                    .collect::<Result<Vec<_>>>()?;

                self.hooks.function_definition(function, &args)
            }
        }
    }

    /// Check a call against its registered signature without evaluating it.
    ///
    /// Each child's type is inferred from its kind: a variable has its declared
    /// type, a constant takes whatever type the parameter needs, and a nested
    /// call has its function's return type.
    ///
    /// # Errors
    ///
    /// Returns [`InterpreterError::Lookup`] for unknown functions or undeclared
    /// variables, [`InterpreterError::Arity`] for a wrong number of children,
    /// and [`InterpreterError::TypeMismatch`] when an argument or the return
    /// type does not match.
    pub fn check_signature(
        &self,
        function: &str,
        children: &[Node],
        var_types: &VariableTypes,
        expected_type: &str,
    ) -> Result<()> {
        let signature = self.registry.signature_of(function)?;

        if children.len() != signature.arity() {
            return Err(InterpreterError::Arity {
                function: function.to_string(),
                expected: signature.arity(),
                actual: children.len(),
            });
        }

        for (child, param_type) in children.iter().zip(signature.parameter_types()) {
            let argument_type = match child {
                Node::Variable { name } => {
                    var_types
                        .get(name)
                        .map(String::as_str)
                        .ok_or_else(|| InterpreterError::Lookup {
                            kind: "variable type",
                            name: name.clone(),
                        })?
                }
                // Parsed against the parameter type at evaluation.
                Node::Constant { .. } => param_type.as_str(),
                Node::Call {
                    function: nested, ..
                } => self.registry.signature_of(nested)?.return_type(),
            };

            if argument_type != param_type {
                return Err(InterpreterError::TypeMismatch {
                    function: function.to_string(),
                    expected: param_type.clone(),
                    actual: argument_type.to_string(),
                });
            }
        }

        if expected_type != signature.return_type() {
            return Err(InterpreterError::TypeMismatch {
                function: function.to_string(),
                expected: expected_type.to_string(),
                actual: signature.return_type().to_string(),
            });
        }

        Ok(())
    }
}
