// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! gptree: a typed expression-tree interpreter for genetic programming.
//!
//! This crate evaluates and generates the tree-shaped programs an evolutionary
//! loop works on:
//! - a function registry built from a domain description
//! - a type-checked recursive evaluator
//! - a depth-aware, weighted random tree generator
//! - lossless save/load of individuals
//!
//! What the functions mean, and what constants look like, is supplied by a
//! domain through [`DomainHooks`]. The [`ArithmeticDomain`] is bundled.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Evolutionary loop (not included)  │
//! ├──────────────────┬──────────────────┤
//! │    Evaluator     │    Generator     │
//! ├──────────────────┴──────────────────┤
//! │  Function registry │ Domain hooks   │
//! ├─────────────────────────────────────┤
//! │      Individual / Node trees        │
//! └─────────────────────────────────────┘
//! ```

pub mod domain;
pub mod error;
pub mod interpreter;
pub mod tree;
pub mod value;

pub use domain::DomainHooks;
pub use domain::arithmetic::{ArithmeticConstantParams, ArithmeticDomain};
pub use error::{InterpreterError, PersistenceError, Result};
pub use interpreter::{
    DomainDescription, FunctionRecord, FunctionRegistry, FunctionSignature, GenerationConfig,
    Interpreter, VariableTypes, VariableValues,
};
pub use tree::{Individual, Node};
pub use value::{Value, convert};
