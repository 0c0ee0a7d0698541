#![no_main]

use gptree::tree::from_text;
use gptree::{ArithmeticDomain, Interpreter, Value, VariableTypes, VariableValues};
use libfuzzer_sys::fuzz_target;

// Arbitrary documents must load or fail cleanly, and whatever loads must
// evaluate or fail cleanly.
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(individual) = from_text(text) else {
        return;
    };

    let Ok(interpreter) = Interpreter::new(&ArithmeticDomain::description(), ArithmeticDomain)
    else {
        return;
    };
    let types = VariableTypes::from([
        ("x".to_string(), "float".to_string()),
        ("b".to_string(), "bool".to_string()),
    ]);
    let values = VariableValues::from([
        ("x".to_string(), Value::Float(1.5)),
        ("b".to_string(), Value::Bool(true)),
    ]);

    for return_type in ["float", "int", "bool", "string"] {
        let _ = interpreter.evaluate(&individual, &types, &values, return_type);
    }
});
