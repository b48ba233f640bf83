pub mod ast;
pub mod token;
pub mod source;
pub mod parser;

use crate::ast::{Program, Token, ARGS_MAX_NUM};

pub use crate::parser::{Parser, ParserError, ParserErrorKind, ParserResult};
pub use crate::source::{split_to_lines, read_source, SourceLine};

/// Copy up to `ARGS_MAX_NUM` external arguments into the fixed argument array.
pub fn args_from_slice<S: AsRef<str>>(args: &[S]) -> [Token; ARGS_MAX_NUM] {
    let mut fixed: [Token; ARGS_MAX_NUM] = Default::default();
    for (slot, arg) in fixed.iter_mut().zip(args) {
        *slot = arg.as_ref().to_string();
    }
    fixed
}

/// Split `source` into lines and parse it as a top-level program.
pub fn parse_source<S: AsRef<str>>(source: &str, args: &[S]) -> ParserResult<Program> {
    let lines = split_to_lines(source);
    let args = args_from_slice(args);
    let mut parser = Parser::new(&lines, Some(&args));
    parser.parse_program()
}
