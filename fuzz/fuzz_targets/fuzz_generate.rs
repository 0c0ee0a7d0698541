#![no_main]

use arbitrary::Arbitrary;
use gptree::{
    ArithmeticConstantParams, ArithmeticDomain, GenerationConfig, Interpreter, InterpreterError,
    Value, VariableTypes, VariableValues,
};
use libfuzzer_sys::fuzz_target;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::collections::BTreeMap;

/// Structured input for generator fuzzing.
#[derive(Arbitrary, Debug)]
struct GenerateInput {
    /// RNG seed.
    seed: u64,
    /// Function probability per depth, as a fraction of 255.
    probabilities: Vec<u8>,
    /// Constant proportion, as a fraction of 255.
    constant_proportion: u8,
    /// Weight of each arithmetic function, in declaration order.
    weights: Vec<i8>,
    /// Depth ceiling (capped).
    max_depth: u8,
    /// Index of the return type to generate.
    return_type: u8,
}

fuzz_target!(|input: GenerateInput| {
    let Ok(interpreter) = Interpreter::new(&ArithmeticDomain::description(), ArithmeticDomain)
    else {
        return;
    };

    let weights = interpreter
        .registry()
        .iter()
        .zip(&input.weights)
        .map(|((name, _), w)| (name.to_string(), f64::from(*w)))
        .collect();
    let config = GenerationConfig {
        depth_to_function_probability: input
            .probabilities
            .iter()
            .take(32)
            .enumerate()
            .map(|(depth, p)| (depth, f64::from(*p) / 255.0))
            .collect::<BTreeMap<_, _>>(),
        constant_proportion: f64::from(input.constant_proportion) / 255.0,
        function_weights: weights,
        max_depth: usize::from(input.max_depth.min(12)),
    };

    let types = VariableTypes::from([("x".to_string(), "float".to_string())]);
    let values = VariableValues::from([("x".to_string(), Value::Float(0.5))]);
    let return_type = ["float", "int", "bool"][usize::from(input.return_type % 3)];
    let mut rng = SmallRng::seed_from_u64(input.seed);

    match interpreter.create_individual(
        return_type,
        &config,
        &ArithmeticConstantParams::default(),
        &types,
        &mut rng,
    ) {
        // Every generated tree must be well typed.
        Ok(individual) => {
            let result = interpreter.evaluate(&individual, &types, &values, return_type);
            assert!(result.is_ok(), "generated tree failed: {individual}: {result:?}");
        }
        Err(InterpreterError::DepthExceeded { .. } | InterpreterError::InvalidWeights { .. }) => {}
        Err(other) => panic!("unexpected generation error: {other}"),
    }
});
