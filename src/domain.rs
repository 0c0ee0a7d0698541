//! Domain hooks: the semantics an interpreter delegates to its domain.
//!
//! The interpreter knows how to type-check, evaluate and grow trees, but not
//! what any function means or what a constant looks like. A domain supplies
//! both through [`DomainHooks`].

pub mod arithmetic;

use crate::error::Result;
use crate::value::Value;
use rand::Rng;

/// Function semantics and constant creation for one domain.
pub trait DomainHooks {
    /// Domain-specific parameters for creating constants.
    type ConstantParams;

    /// Apply the named function to already evaluated arguments.
    ///
    /// Must handle every function the domain registers. The returned value is
    /// passed through the interpreter unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`crate::InterpreterError::UnimplementedFunction`] for names the
    /// domain does not define.
    fn function_definition(&self, name: &str, args: &[Value]) -> Result<Value>;

    /// Produce the literal text of a new constant of the given type.
    ///
    /// # Errors
    ///
    /// Returns [`crate::InterpreterError::UnsupportedType`] for type tags the
    /// domain cannot create constants for.
    fn create_constant<R: Rng>(
        &self,
        return_type: &str,
        params: &Self::ConstantParams,
        rng: &mut R,
    ) -> Result<String>;
}
