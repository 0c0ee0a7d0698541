//! Random generation of type-correct trees.
//!
//! Generation is driven by a depth table: at each depth, the table gives the
//! probability of emitting a function call rather than a terminal. Depths
//! missing from the table have probability 0, so the table's extent is what
//! normally ends the recursion. `max_depth` is a hard ceiling on top of that.

use super::{Interpreter, VariableTypes};
use crate::domain::DomainHooks;
use crate::error::{InterpreterError, Result};
use crate::tree::{Individual, MAX_PERSISTED_HEIGHT, Node};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Configuration for tree generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Probability of generating a function call at each depth.
    pub depth_to_function_probability: BTreeMap<usize, f64>,
    /// Probability of choosing a constant over a variable for a terminal.
    pub constant_proportion: f64,
    /// Relative selection weight per function. Unlisted functions weigh 1.
    pub function_weights: BTreeMap<String, f64>,
    /// Generation fails past this depth, whatever the depth table says.
    /// At most [`MAX_PERSISTED_HEIGHT`].
    pub max_depth: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            depth_to_function_probability: BTreeMap::from([(0, 1.0), (1, 0.8), (2, 0.6), (3, 0.4)]),
            constant_proportion: 0.5,
            function_weights: BTreeMap::new(),
            max_depth: 17,
        }
    }
}

impl GenerationConfig {
    /// Probability of emitting a call at `depth`.
    #[must_use]
    pub fn function_probability(&self, depth: usize) -> f64 {
        self.depth_to_function_probability
            .get(&depth)
            .copied()
            .unwrap_or(0.0)
    }

    /// Selection weight of a function, clamped at zero. NaN reads as zero.
    #[must_use]
    pub fn weight_of(&self, function: &str) -> f64 {
        self.function_weights
            .get(function)
            .copied()
            .unwrap_or(1.0)
            .max(0.0)
    }
}

impl<H: DomainHooks> Interpreter<H> {
    /// Generate a new individual whose tree evaluates to `return_type`.
    ///
    /// The tree is not validated; type errors, if any, surface at the first
    /// evaluation.
    ///
    /// # Errors
    ///
    /// See [`Interpreter::create_element`].
    pub fn create_individual<R: Rng>(
        &self,
        return_type: &str,
        config: &GenerationConfig,
        constant_params: &H::ConstantParams,
        var_types: &VariableTypes,
        rng: &mut R,
    ) -> Result<Individual> {
        let head = self.create_element(return_type, 0, config, constant_params, var_types, rng)?;
        tracing::debug!(tree = %head, height = head.height(), "generated individual");
        Ok(Individual::new(head))
    }

    /// Generate a random subtree of type `return_type` rooted at `depth`.
    ///
    /// # Errors
    ///
    /// Returns [`InterpreterError::Config`] if `config.max_depth` is above
    /// [`MAX_PERSISTED_HEIGHT`], [`InterpreterError::DepthExceeded`] past
    /// `config.max_depth`, [`InterpreterError::InvalidWeights`] when the
    /// weights of the eligible functions are all zero or sum to infinity, and
    /// any error from the domain's constant factory.
    pub fn create_element<R: Rng>(
        &self,
        return_type: &str,
        depth: usize,
        config: &GenerationConfig,
        constant_params: &H::ConstantParams,
        var_types: &VariableTypes,
        rng: &mut R,
    ) -> Result<Node> {
        if config.max_depth > MAX_PERSISTED_HEIGHT {
            return Err(InterpreterError::Config(format!(
                "max_depth {} exceeds {MAX_PERSISTED_HEIGHT}, the tallest tree that can be saved",
                config.max_depth
            )));
        }
        if depth > config.max_depth {
            return Err(InterpreterError::DepthExceeded {
                depth,
                max_depth: config.max_depth,
            });
        }

        let function_probability = config.function_probability(depth);
        if rng.random::<f64>() < function_probability {
            let candidates = self.registry.functions_returning(return_type);
            if candidates.is_empty() {
                tracing::trace!(return_type, depth, "no function returns this type, using a terminal");
            } else {
                let function = select_weighted(&candidates, config, return_type, rng)?;
                let signature = self.registry.signature_of(function)?;
                tracing::trace!(function, depth, "selected function");

                let mut children = Vec::with_capacity(signature.arity());
                for param_type in signature.parameter_types() {
                    children.push(self.create_element(
                        param_type,
                        depth + 1,
                        config,
                        constant_params,
                        var_types,
                        rng,
                    )?);
                }

                return Ok(Node::call(function, children));
            }
        }

        self.create_terminal(return_type, config, constant_params, var_types, rng)
    }

    fn create_terminal<R: Rng>(
        &self,
        return_type: &str,
        config: &GenerationConfig,
        constant_params: &H::ConstantParams,
        var_types: &VariableTypes,
        rng: &mut R,
    ) -> Result<Node> {
        let variables: Vec<&str> = var_types
            .iter()
            .filter(|(_, type_tag)| type_tag.as_str() == return_type)
            .map(|(name, _)| name.as_str())
            .collect();

        if variables.is_empty() || rng.random::<f64>() < config.constant_proportion {
            let literal = self
                .hooks
                .create_constant(return_type, constant_params, rng)?;
            return Ok(Node::constant(literal));
        }

        let name = variables[rng.random_range(0..variables.len())];
        Ok(Node::variable(name))
    }
}

/// Pick one candidate with probability proportional to its weight.
///
/// Walks the cumulative distribution left to right and returns the first
/// candidate whose cumulative probability reaches the draw.
fn select_weighted<'a, R: Rng>(
    candidates: &[&'a str],
    config: &GenerationConfig,
    return_type: &str,
    rng: &mut R,
) -> Result<&'a str> {
    let weights: Vec<f64> = candidates.iter().map(|c| config.weight_of(c)).collect();
    let total: f64 = weights.iter().sum();
    if total <= 0.0 || !total.is_finite() {
        return Err(InterpreterError::InvalidWeights {
            return_type: return_type.to_string(),
        });
    }

    let draw = rng.random::<f64>();
    let mut cumulative = 0.0;
    let mut last_positive = 0;
    for (i, weight) in weights.iter().enumerate() {
        if *weight <= 0.0 {
            continue;
        }
        cumulative += weight / total;
        last_positive = i;
        if cumulative >= draw {
            return Ok(candidates[i]);
        }
    }

    // Rounding can leave the final cumulative sum just under the draw.
    Ok(candidates[last_positive])
}
