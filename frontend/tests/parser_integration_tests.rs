//! Parser Integration Tests
//!
//! Whole-program parsing through the public entry points: source splitting,
//! comment handling, nested blocks, external arguments and error reporting.

use frontend::ast::*;
use frontend::{parse_source, split_to_lines, ParserErrorKind};

mod helpers {
    use super::*;

    /// Parse a complete program and verify it succeeds
    pub fn parse_success(source: &str) -> Program {
        let no_args: [&str; 0] = [];
        match parse_source(source, &no_args) {
            Ok(program) => program,
            Err(e) => panic!("Failed to parse: {source} - Error: {e}"),
        }
    }
}

#[cfg(test)]
mod program_tests {
    use super::*;
    use super::helpers::parse_success;

    #[test]
    fn test_parse_program_with_comments() {
        let program = parse_success(r"
# sum the first numbers
var i = 0
var sum = 0
while i < 3 {
    sum = sum + i
    i = i + 1
}
# report
println sum
");
        assert_eq!(program.statements.len(), 4);
        assert_eq!(program.statements[2].kind, StatementKind::While);
        assert_eq!(program.statements[2].main_body.len(), 2);
        assert_eq!(program.statements[2].line_no, 5);
        assert_eq!(program.statements[3].line_no, 10);
    }

    #[test]
    fn test_parse_function_and_call() {
        let program = parse_success(r"
function greet : who {
    println 'hello' who
}
call greet 'world'
");
        assert_eq!(program.statements.len(), 2);
        let def = &program.statements[0];
        assert_eq!(def.kind, StatementKind::DefFunc);
        assert_eq!(def.operands(), vec!["who"]);
        assert_eq!(def.main_body[0].operands(), vec!["'hello'", "who"]);
    }

    #[test]
    fn test_parse_deeply_nested_blocks() {
        let program = parse_success(r"
if a == 1 {
    if b == 2 {
        while c < 3 {
            c = c + 1
        }
    }
}
println c
");
        assert_eq!(program.statements.len(), 2);
        let inner = &program.statements[0].main_body[0].main_body[0];
        assert_eq!(inner.kind, StatementKind::While);
        assert_eq!(inner.main_body[0].kind, StatementKind::Assign);
    }

    #[test]
    fn test_parse_external_arguments() {
        let program = parse_source("println $ARGS", &["a", "b", "c"]).unwrap();
        assert_eq!(&program.args[..3], &["a".to_string(), "b".to_string(), "c".to_string()]);
        assert!(program.args[3..].iter().all(|a| a.is_empty()));
    }

    #[test]
    fn test_parse_error_uses_source_line() {
        let no_args: [&str; 0] = [];
        let err = parse_source("# comment\nvar a = 1\n\nvar b 2\n", &no_args).unwrap_err();
        assert_eq!(err.line, 4);
        assert!(matches!(err.kind, ParserErrorKind::TokenCount { .. }));
    }

    #[test]
    fn test_split_lines_preserve_numbers() {
        let lines = split_to_lines("#a\n#b\nprintln x");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].number, 3);
    }

    #[test]
    fn test_empty_program() {
        let program = parse_success("# nothing here\n\n");
        assert!(program.statements.is_empty());
    }
}
