//! End-to-end tests for registry construction, evaluation, generation and
//! persistence.
//!
//! Run with: cargo test --test interpreter_integration

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::cast_precision_loss)]

use gptree::tree::{MAX_PERSISTED_HEIGHT, from_text, load_from_path, save_to_path, to_text};
use gptree::{
    ArithmeticConstantParams, ArithmeticDomain, DomainDescription, FunctionRecord,
    GenerationConfig, Individual, Interpreter, InterpreterError, Node, Value, VariableTypes,
    VariableValues,
};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::collections::BTreeMap;

fn arithmetic() -> Interpreter<ArithmeticDomain> {
    Interpreter::new(&ArithmeticDomain::description(), ArithmeticDomain).unwrap()
}

fn xy_types() -> VariableTypes {
    VariableTypes::from([
        ("x".to_string(), "float".to_string()),
        ("y".to_string(), "float".to_string()),
    ])
}

fn xy_values() -> VariableValues {
    VariableValues::from([
        ("x".to_string(), Value::Float(1.0)),
        ("y".to_string(), Value::Float(2.0)),
    ])
}

fn assert_same_value(a: &Value, b: &Value) {
    match (a, b) {
        (Value::Float(a), Value::Float(b)) => {
            assert!(
                (a - b).abs() <= 1e-9 * a.abs().max(1.0) || (a.is_nan() && b.is_nan()),
                "{a} != {b}"
            );
        }
        _ => assert_eq!(a, b),
    }
}

fn no_variables(node: &Node) -> bool {
    match node {
        Node::Variable { .. } => false,
        Node::Constant { .. } => true,
        Node::Call { children, .. } => children.iter().all(no_variables),
    }
}

#[test]
fn test_registry_rejects_duplicate_names() {
    let description = DomainDescription::new(vec![
        FunctionRecord::new("add", "[float,float]", "float"),
        FunctionRecord::new("add", "[float,float]", "float"),
    ]);
    let result = Interpreter::new(&description, ArithmeticDomain);
    assert!(matches!(result, Err(InterpreterError::Config(_))));
}

#[test]
fn test_domain_file_matches_builtin_description() {
    let path = format!("{}/domains/arithmetic.json", env!("CARGO_MANIFEST_DIR"));
    let from_file = DomainDescription::from_path(std::path::Path::new(&path)).unwrap();
    assert_eq!(from_file, ArithmeticDomain::description());
}

#[test]
fn test_evaluate_sample_individual() {
    let path = format!(
        "{}/domains/arithmetic_individual.json",
        env!("CARGO_MANIFEST_DIR")
    );
    let individual = load_from_path(std::path::Path::new(&path)).unwrap();
    let value = arithmetic()
        .evaluate(&individual, &xy_types(), &xy_values(), "float")
        .unwrap();
    // x + (3.5 - y) with x = 1, y = 2
    assert_eq!(value, Value::Float(2.5));
}

#[test]
fn test_known_evaluation() {
    let description =
        DomainDescription::new(vec![FunctionRecord::new("addition_float", "[float,float]", "float")]);
    let interpreter = Interpreter::new(&description, ArithmeticDomain).unwrap();
    let tree = Individual::new(Node::call(
        "addition_float",
        vec![Node::constant("2"), Node::constant("3")],
    ));
    let value = interpreter
        .evaluate(&tree, &VariableTypes::new(), &VariableValues::new(), "float")
        .unwrap();
    assert_eq!(value, Value::Float(5.0));
}

#[test]
fn test_mixed_types_evaluate() {
    let interpreter = arithmetic();
    let types = VariableTypes::from([
        ("x".to_string(), "float".to_string()),
        ("n".to_string(), "int".to_string()),
    ]);
    let values = VariableValues::from([
        ("x".to_string(), Value::Float(0.5)),
        ("n".to_string(), Value::Int(3)),
    ]);
    // if (x < 1) and (not false) then n + 2 as float else 0
    let tree = Individual::new(Node::call(
        "if_then_else_float",
        vec![
            Node::call(
                "and_bool",
                vec![
                    Node::call("less_than_float", vec![Node::variable("x"), Node::constant("1")]),
                    Node::call("not_bool", vec![Node::constant("no")]),
                ],
            ),
            Node::call(
                "int_to_float",
                vec![Node::call("addition_int", vec![Node::variable("n"), Node::constant("2")])],
            ),
            Node::constant("0"),
        ],
    ));
    let value = interpreter.evaluate(&tree, &types, &values, "float").unwrap();
    assert_eq!(value, Value::Float(5.0));
}

#[test]
fn test_generated_trees_evaluate() {
    let interpreter = arithmetic();
    let config = GenerationConfig::default();
    let params = ArithmeticConstantParams::default();
    let mut rng = SmallRng::seed_from_u64(2024);

    for return_type in ["float", "bool", "int"] {
        for _ in 0..200 {
            let individual = interpreter
                .create_individual(return_type, &config, &params, &xy_types(), &mut rng)
                .unwrap();
            let value = interpreter
                .evaluate(&individual, &xy_types(), &xy_values(), return_type)
                .unwrap();
            assert_eq!(value.type_tag(), return_type);
        }
    }
}

#[test]
fn test_roundtrip_preserves_evaluation() {
    let interpreter = arithmetic();
    let config = GenerationConfig::default();
    let params = ArithmeticConstantParams::default();
    let mut rng = SmallRng::seed_from_u64(77);
    let dir = tempfile::tempdir().unwrap();

    for i in 0..50 {
        let original = interpreter
            .create_individual("float", &config, &params, &xy_types(), &mut rng)
            .unwrap();

        let path = dir.path().join(format!("ind_{i}.json"));
        save_to_path(&original, &path).unwrap();
        let loaded = load_from_path(&path).unwrap();
        assert_eq!(loaded, original);

        let expected = interpreter
            .evaluate(&original, &xy_types(), &xy_values(), "float")
            .unwrap();
        let actual = interpreter
            .evaluate(&loaded, &xy_types(), &xy_values(), "float")
            .unwrap();
        assert_same_value(&expected, &actual);
    }
}

#[test]
fn test_bounded_generation() {
    let interpreter = arithmetic();
    let config = GenerationConfig {
        depth_to_function_probability: BTreeMap::from([(0, 1.0)]),
        ..GenerationConfig::default()
    };
    let mut rng = SmallRng::seed_from_u64(8);
    for _ in 0..500 {
        let node = interpreter
            .create_element(
                "float",
                0,
                &config,
                &ArithmeticConstantParams::default(),
                &xy_types(),
                &mut rng,
            )
            .unwrap();
        assert_eq!(node.height(), 1, "{node}");
    }
}

#[test]
fn test_weighted_selection_convergence() {
    let description = DomainDescription::new(vec![
        FunctionRecord::new("addition_float", "[float,float]", "float"),
        FunctionRecord::new("subtraction_float", "[float,float]", "float"),
    ]);
    let interpreter = Interpreter::new(&description, ArithmeticDomain).unwrap();
    let config = GenerationConfig {
        depth_to_function_probability: BTreeMap::from([(0, 1.0)]),
        ..GenerationConfig::default()
    };
    let params = ArithmeticConstantParams::default();
    let mut rng = SmallRng::seed_from_u64(12345);

    let draws = 10_000;
    let mut additions = 0usize;
    for _ in 0..draws {
        let node = interpreter
            .create_element("float", 0, &config, &params, &xy_types(), &mut rng)
            .unwrap();
        match node {
            Node::Call { function, .. } if function == "addition_float" => additions += 1,
            Node::Call { function, .. } => assert_eq!(function, "subtraction_float"),
            other => panic!("expected a call, got {other}"),
        }
    }

    let frequency = additions as f64 / f64::from(draws);
    assert!((frequency - 0.5).abs() < 0.02, "frequency {frequency}");
}

#[test]
fn test_weights_shift_selection() {
    let description = DomainDescription::new(vec![
        FunctionRecord::new("addition_float", "[float,float]", "float"),
        FunctionRecord::new("subtraction_float", "[float,float]", "float"),
    ]);
    let interpreter = Interpreter::new(&description, ArithmeticDomain).unwrap();
    let config = GenerationConfig {
        depth_to_function_probability: BTreeMap::from([(0, 1.0)]),
        function_weights: BTreeMap::from([
            ("addition_float".to_string(), 3.0),
            ("subtraction_float".to_string(), 1.0),
        ]),
        ..GenerationConfig::default()
    };
    let params = ArithmeticConstantParams::default();
    let mut rng = SmallRng::seed_from_u64(99);

    let draws = 10_000;
    let additions = (0..draws)
        .filter(|_| {
            let node = interpreter
                .create_element("float", 0, &config, &params, &xy_types(), &mut rng)
                .unwrap();
            matches!(node, Node::Call { ref function, .. } if function == "addition_float")
        })
        .count();

    let frequency = additions as f64 / f64::from(draws);
    assert!((frequency - 0.75).abs() < 0.02, "frequency {frequency}");
}

#[test]
fn test_invalid_weights() {
    let interpreter = arithmetic();
    let weights = interpreter
        .functions_returning("bool")
        .into_iter()
        .map(|name| (name.to_string(), 0.0))
        .collect();
    let config = GenerationConfig {
        depth_to_function_probability: BTreeMap::from([(0, 1.0)]),
        function_weights: weights,
        ..GenerationConfig::default()
    };
    let mut rng = SmallRng::seed_from_u64(1);
    let result = interpreter.create_individual(
        "bool",
        &config,
        &ArithmeticConstantParams::default(),
        &xy_types(),
        &mut rng,
    );
    assert_eq!(
        result,
        Err(InterpreterError::InvalidWeights {
            return_type: "bool".to_string()
        })
    );
}

#[test]
fn test_forced_constant() {
    let interpreter = arithmetic();
    let config = GenerationConfig {
        depth_to_function_probability: BTreeMap::from([(0, 1.0), (1, 0.5), (2, 0.5)]),
        constant_proportion: 0.0,
        ..GenerationConfig::default()
    };
    let params = ArithmeticConstantParams::default();
    let bool_only = VariableTypes::from([("flag".to_string(), "bool".to_string())]);
    let mut rng = SmallRng::seed_from_u64(31);

    for _ in 0..200 {
        let individual = interpreter
            .create_individual("int", &config, &params, &bool_only, &mut rng)
            .unwrap();
        assert!(no_variables(individual.head().unwrap()));
    }
}

#[test]
fn test_unresolvable_variable() {
    let interpreter = arithmetic();
    let types = VariableTypes::from([("z".to_string(), "float".to_string())]);
    let tree = Individual::new(Node::variable("z"));
    let result = interpreter.evaluate(&tree, &types, &VariableValues::new(), "float");
    assert!(matches!(result, Err(InterpreterError::Lookup { .. })));
}

#[test]
fn test_structural_error_after_load() {
    let text = r#"{ "individual": [ { "constant": "1" }, { "constant": "2" } ] }"#;
    let individual = from_text(text).unwrap();
    let result = arithmetic().evaluate(
        &individual,
        &VariableTypes::new(),
        &VariableValues::new(),
        "float",
    );
    assert!(matches!(result, Err(InterpreterError::Structural(_))));
}

#[test]
fn test_text_roundtrip_of_generated_trees() {
    let interpreter = arithmetic();
    let config = GenerationConfig::default();
    let params = ArithmeticConstantParams::default();
    let mut rng = SmallRng::seed_from_u64(5);
    for _ in 0..100 {
        let individual = interpreter
            .create_individual("bool", &config, &params, &xy_types(), &mut rng)
            .unwrap();
        let text = to_text(&individual).unwrap();
        assert_eq!(from_text(&text).unwrap(), individual);
    }
}

#[test]
fn test_sample_generation_config_loads() {
    let path = format!("{}/domains/generation.json", env!("CARGO_MANIFEST_DIR"));
    let text = std::fs::read_to_string(path).unwrap();
    let config: GenerationConfig = serde_json::from_str(&text).unwrap();
    assert_eq!(config.max_depth, 17);
    assert!((config.function_probability(0) - 1.0).abs() < f64::EPSILON);
    assert!((config.weight_of("division_float") - 0.5).abs() < f64::EPSILON);
    assert!((config.weight_of("and_bool") - 1.0).abs() < f64::EPSILON);

    let mut rng = SmallRng::seed_from_u64(3);
    let individual = arithmetic()
        .create_individual(
            "float",
            &config,
            &ArithmeticConstantParams::default(),
            &xy_types(),
            &mut rng,
        )
        .unwrap();
    assert!(individual.head().unwrap().height() <= 4);
}

fn not_only() -> Interpreter<ArithmeticDomain> {
    let description =
        DomainDescription::new(vec![FunctionRecord::new("not_bool", "[bool]", "bool")]);
    Interpreter::new(&description, ArithmeticDomain).unwrap()
}

#[test]
fn test_tallest_generated_tree_roundtrips() {
    let config = GenerationConfig {
        depth_to_function_probability: (0..MAX_PERSISTED_HEIGHT).map(|d| (d, 1.0)).collect(),
        max_depth: MAX_PERSISTED_HEIGHT,
        ..GenerationConfig::default()
    };
    let mut rng = SmallRng::seed_from_u64(70);
    let individual = not_only()
        .create_individual(
            "bool",
            &config,
            &ArithmeticConstantParams::default(),
            &VariableTypes::new(),
            &mut rng,
        )
        .unwrap();
    assert_eq!(individual.head().unwrap().height(), MAX_PERSISTED_HEIGHT);

    let loaded = from_text(&to_text(&individual).unwrap()).unwrap();
    assert_eq!(loaded, individual);
}

#[test]
fn test_max_depth_beyond_persisted_height_is_rejected() {
    let config = GenerationConfig {
        depth_to_function_probability: (0..70).map(|d| (d, 1.0)).collect(),
        max_depth: 100,
        ..GenerationConfig::default()
    };
    let mut rng = SmallRng::seed_from_u64(70);
    let result = not_only().create_individual(
        "bool",
        &config,
        &ArithmeticConstantParams::default(),
        &VariableTypes::new(),
        &mut rng,
    );
    assert!(matches!(result, Err(InterpreterError::Config(_))));
}
