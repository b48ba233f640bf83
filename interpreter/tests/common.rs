#![allow(dead_code)]

use interpreter::environment::Environment;
use interpreter::error::InterpreterError;
use interpreter::object::Object;

pub struct Run {
    pub env: Environment,
    pub output: String,
}

/// Test helper function to parse and execute a program against in-memory I/O
pub fn test_program(source_code: &str) -> Result<Run, InterpreterError> {
    test_program_with(source_code, &[], "")
}

pub fn test_program_with(source_code: &str, args: &[&str], input: &str) -> Result<Run, InterpreterError> {
    test_program_with_depth(source_code, args, input, interpreter::DEFAULT_MAX_RECURSION_DEPTH)
}

pub fn test_program_with_depth(source_code: &str, args: &[&str], input: &str, depth: u32) -> Result<Run, InterpreterError> {
    let program = frontend::parse_source(source_code, args)
        .unwrap_or_else(|e| panic!("Parse error: {e}"));
    let mut input = input.as_bytes();
    let mut output: Vec<u8> = Vec::new();
    let env = interpreter::execute_program_with_depth(&program, &mut input, &mut output, depth)?;
    Ok(Run { env, output: String::from_utf8(output).expect("program output is UTF-8") })
}

/// Helper function to execute a program and return what it printed
pub fn program_output(source_code: &str) -> String {
    test_program(source_code)
        .unwrap_or_else(|e| panic!("Program execution failed: {e}"))
        .output
}

/// Helper function to execute a program and expect it to fail
pub fn assert_program_fails(source_code: &str) -> InterpreterError {
    match test_program(source_code) {
        Ok(_) => panic!("Expected program to fail, but it succeeded"),
        Err(e) => e,
    }
}

pub fn value<'a>(run: &'a Run, name: &str) -> &'a Object {
    run.env
        .get_value(name)
        .unwrap_or_else(|| panic!("variable {name} is not in the store"))
}

pub fn assert_int(run: &Run, name: &str, expected: i64) {
    assert_eq!(value(run, name), &Object::Int(expected), "value of {name}");
}
