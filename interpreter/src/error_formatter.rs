use frontend::parser::ParserError;
use crate::error::InterpreterError;

pub struct ErrorFormatter<'a> {
    source_code: &'a str,
    filename: &'a str,
}

impl<'a> ErrorFormatter<'a> {
    pub fn new(source_code: &'a str, filename: &'a str) -> Self {
        Self {
            source_code,
            filename,
        }
    }

    pub fn format_parse_error(&self, error: &ParserError) -> String {
        let message = error.message();
        let hint = last_quoted(&message);
        self.format_error_with_line(&message, error.line, hint)
    }

    pub fn format_runtime_error(&self, error: &InterpreterError) -> String {
        let root = error.root();
        match error.line() {
            Some(line) => self.format_error_with_line(&root.to_string(), line, subject(root)),
            None => format!("Runtime Error: {}", error),
        }
    }

    fn format_error_with_line(&self, error_msg: &str, line_number: usize, hint: Option<&str>) -> String {
        let source_line = self
            .source_code
            .lines()
            .nth(line_number.wrapping_sub(1))
            .map(|l| l.trim_end_matches('\r'))
            .unwrap_or("<line not available>");

        // Point at the offending token when it can be found, else at the statement start
        let indent = source_line.len() - source_line.trim_start().len();
        let position = hint
            .filter(|h| !h.is_empty())
            .and_then(|h| find_token(source_line, h))
            .unwrap_or(indent);
        let caret = format!("{:width$}^^", "", width = position);

        format!(
            "Error at {}:{}:\n   |\n{:2} | {}\n   | {} {}\n   |",
            self.filename, line_number, line_number, source_line, caret, error_msg
        )
    }
}

/// Byte offset of `token` as a whole whitespace-separated word of `line`.
fn find_token(line: &str, token: &str) -> Option<usize> {
    let mut offset = 0;
    for word in line.split(' ') {
        if word.trim() == token {
            return Some(offset + (word.len() - word.trim_start().len()));
        }
        offset += word.len() + 1;
    }
    None
}

fn last_quoted(message: &str) -> Option<&str> {
    let end = message.rfind('\'')?;
    let start = message[..end].rfind('\'')?;
    Some(&message[start + 1..end])
}

fn subject(error: &InterpreterError) -> Option<&str> {
    match error {
        InterpreterError::UndefinedVariable(name)
        | InterpreterError::FunctionNotFound(name)
        | InterpreterError::NotAnArray(name)
        | InterpreterError::EmptyArray(name)
        | InterpreterError::InvalidIndex(name) => Some(name),
        InterpreterError::InvalidInput { target, .. } => Some(target),
        InterpreterError::TypeError { operator, .. } | InterpreterError::InvalidOperator(operator) => {
            Some(operator)
        }
        _ => None,
    }
}
