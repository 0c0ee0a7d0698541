//! Arithmetic domain: float and integer arithmetic, comparisons and logic.
//!
//! Division is protected: dividing by zero returns 0 instead of infinity.

use crate::domain::DomainHooks;
use crate::error::{InterpreterError, Result};
use crate::interpreter::{DomainDescription, FunctionRecord};
use crate::value::{BOOL, FLOAT, INT, Value};
use rand::Rng;
use rand::distr::{Bernoulli, Uniform};
use serde::{Deserialize, Serialize};

/// Functions of the arithmetic domain: name, parameter types, return type.
const FUNCTIONS: &[(&str, &str, &str)] = &[
    ("addition_float", "[float,float]", FLOAT),
    ("subtraction_float", "[float,float]", FLOAT),
    ("multiplication_float", "[float,float]", FLOAT),
    ("division_float", "[float,float]", FLOAT),
    ("addition_int", "[int,int]", INT),
    ("subtraction_int", "[int,int]", INT),
    ("greater_than_float", "[float,float]", BOOL),
    ("less_than_float", "[float,float]", BOOL),
    ("and_bool", "[bool,bool]", BOOL),
    ("or_bool", "[bool,bool]", BOOL),
    ("not_bool", "[bool]", BOOL),
    ("if_then_else_float", "[bool,float,float]", FLOAT),
    ("int_to_float", "[int]", FLOAT),
];

/// Parameters for arithmetic constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArithmeticConstantParams {
    /// Half-open range `[low, high)` for float constants.
    pub float_range: (f64, f64),
    /// Inclusive range for integer constants.
    pub int_range: (i64, i64),
    /// Probability that a boolean constant is `true`, within `[0, 1]`.
    pub true_probability: f64,
}

impl Default for ArithmeticConstantParams {
    fn default() -> Self {
        Self {
            float_range: (-10.0, 10.0),
            int_range: (-10, 10),
            true_probability: 0.5,
        }
    }
}

/// Hooks for the arithmetic domain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArithmeticDomain;

impl ArithmeticDomain {
    /// The domain description matching these hooks.
    #[must_use]
    pub fn description() -> DomainDescription {
        DomainDescription::new(
            FUNCTIONS
                .iter()
                .map(|(name, params, ret)| FunctionRecord::new(name, params, ret))
                .collect(),
        )
    }
}

fn expect_args<'a, const N: usize>(name: &str, args: &'a [Value]) -> Result<&'a [Value; N]> {
    args.try_into().map_err(|_| {
        InterpreterError::Domain(format!(
            "'{name}' takes {N} argument(s), got {}",
            args.len()
        ))
    })
}

fn float_arg(name: &str, value: &Value) -> Result<f64> {
    value
        .as_f64()
        .ok_or_else(|| InterpreterError::Domain(format!("'{name}' expects a number, got {value}")))
}

fn int_arg(name: &str, value: &Value) -> Result<i64> {
    value
        .as_i64()
        .ok_or_else(|| InterpreterError::Domain(format!("'{name}' expects an integer, got {value}")))
}

fn bool_arg(name: &str, value: &Value) -> Result<bool> {
    value
        .as_bool()
        .ok_or_else(|| InterpreterError::Domain(format!("'{name}' expects a boolean, got {value}")))
}

fn floats(name: &str, args: &[Value]) -> Result<(f64, f64)> {
    let [a, b] = expect_args::<2>(name, args)?;
    Ok((float_arg(name, a)?, float_arg(name, b)?))
}

fn ints(name: &str, args: &[Value]) -> Result<(i64, i64)> {
    let [a, b] = expect_args::<2>(name, args)?;
    Ok((int_arg(name, a)?, int_arg(name, b)?))
}

fn bools(name: &str, args: &[Value]) -> Result<(bool, bool)> {
    let [a, b] = expect_args::<2>(name, args)?;
    Ok((bool_arg(name, a)?, bool_arg(name, b)?))
}

impl DomainHooks for ArithmeticDomain {
    type ConstantParams = ArithmeticConstantParams;

    #[allow(clippy::cast_precision_loss)]
    fn function_definition(&self, name: &str, args: &[Value]) -> Result<Value> {
        let value = match name {
            "addition_float" => floats(name, args).map(|(a, b)| Value::Float(a + b))?,
            "subtraction_float" => floats(name, args).map(|(a, b)| Value::Float(a - b))?,
            "multiplication_float" => floats(name, args).map(|(a, b)| Value::Float(a * b))?,
            "division_float" => floats(name, args)
                .map(|(a, b)| Value::Float(if b == 0.0 { 0.0 } else { a / b }))?,
            "addition_int" => ints(name, args).map(|(a, b)| Value::Int(a.wrapping_add(b)))?,
            "subtraction_int" => ints(name, args).map(|(a, b)| Value::Int(a.wrapping_sub(b)))?,
            "greater_than_float" => floats(name, args).map(|(a, b)| Value::Bool(a > b))?,
            "less_than_float" => floats(name, args).map(|(a, b)| Value::Bool(a < b))?,
            "and_bool" => bools(name, args).map(|(a, b)| Value::Bool(a && b))?,
            "or_bool" => bools(name, args).map(|(a, b)| Value::Bool(a || b))?,
            "not_bool" => {
                let [a] = expect_args::<1>(name, args)?;
                Value::Bool(!bool_arg(name, a)?)
            }
            "if_then_else_float" => {
                let [condition, then, otherwise] = expect_args::<3>(name, args)?;
                let branch = if bool_arg(name, condition)? { then } else { otherwise };
                Value::Float(float_arg(name, branch)?)
            }
            "int_to_float" => {
                let [a] = expect_args::<1>(name, args)?;
                Value::Float(int_arg(name, a)? as f64)
            }
            other => return Err(InterpreterError::UnimplementedFunction(other.to_string())),
        };
        Ok(value)
    }

    fn create_constant<R: Rng>(
        &self,
        return_type: &str,
        params: &ArithmeticConstantParams,
        rng: &mut R,
    ) -> Result<String> {
        match return_type {
            FLOAT => {
                let (low, high) = params.float_range;
                if !low.is_finite() || !high.is_finite() {
                    return Err(InterpreterError::Domain(format!(
                        "float range ({low}, {high}) must have finite bounds"
                    )));
                }
                if low >= high {
                    return Ok(low.to_string());
                }
                // The width can still overflow to infinity.
                let uniform = Uniform::<f64>::new(low, high).map_err(|e| {
                    InterpreterError::Domain(format!("float range ({low}, {high}): {e}"))
                })?;
                Ok(rng.sample(uniform).to_string())
            }
            INT => {
                let (low, high) = params.int_range;
                let value = if low <= high { rng.random_range(low..=high) } else { low };
                Ok(value.to_string())
            }
            BOOL => {
                let p = params.true_probability;
                let bernoulli = Bernoulli::new(p).map_err(|e| {
                    InterpreterError::Domain(format!("true probability {p}: {e}"))
                })?;
                Ok(rng.sample(bernoulli).to_string())
            }
            other => Err(InterpreterError::UnsupportedType(other.to_string())),
        }
    }
}
