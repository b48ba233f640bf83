pub mod calculator;
pub mod environment;
pub mod object;
pub mod plan;
pub mod evaluation;
pub mod error;
pub mod error_formatter;

use std::io::{BufRead, Write};
use frontend::ast::*;
use crate::environment::Environment;
use crate::error::InterpreterResult;
use crate::evaluation::EvaluationContext;
use crate::object::Object;

pub const DEFAULT_MAX_RECURSION_DEPTH: u32 = 200;

/// Run a parsed program and hand back the final variable store.
pub fn execute_program(program: &Program, input: &mut dyn BufRead, output: &mut dyn Write) -> InterpreterResult<Environment> {
    execute_program_with_depth(program, input, output, DEFAULT_MAX_RECURSION_DEPTH)
}

pub fn execute_program_with_depth(
    program: &Program,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
    max_recursion_depth: u32,
) -> InterpreterResult<Environment> {
    let mut eval = EvaluationContext::new(input, output).with_max_recursion_depth(max_recursion_depth);
    eval.execute_program(program)?;
    Ok(eval.environment)
}

fn format_elements(elements: &[Object]) -> String {
    let mut s = String::from("[");
    for e in elements {
        match e {
            Object::Array(inner) => {
                s.push(' ');
                s.push_str(&format_elements(inner));
            }
            other => {
                s.push(' ');
                s.push_str(&other.to_string());
            }
        }
    }
    s.push_str(" ]");
    s
}

/// Dump every variable of the store, one line each, sorted by name.
pub fn report_variables(env: &Environment, writer: &mut dyn Write) -> std::io::Result<()> {
    for (name, var) in env.snapshot() {
        match &var.value {
            Object::Array(elements) => writeln!(
                writer,
                "Name: {name}\tValue: {name}\tType: {}\tArray Elements: {}",
                var.value.get_kind(),
                format_elements(elements)
            )?,
            value => writeln!(writer, "Name: {name}\tValue: {value}\tType: {}", value.get_kind())?,
        }
    }
    Ok(())
}
