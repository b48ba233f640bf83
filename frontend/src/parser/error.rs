use crate::ast::StatementKind;

#[derive(Debug, Clone, PartialEq)]
pub enum ParserErrorKind {
    UnknownStatement { token: String },
    MissingAssign { found: Option<String> },
    TokenCount { kind: StatementKind, found: usize, min: usize, max: usize },
    MissingBlockOpen { kind: StatementKind },
    UnterminatedBlock,
    UnexpectedBlockMarker { marker: String },
    MalformedArrayLiteral,
    MissingParamSeparator { found: Option<String> },
    DuplicateParameter { name: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParserError {
    pub kind: ParserErrorKind,
    pub line: usize,
}

pub type ParserResult<T> = Result<T, ParserError>;

impl ParserError {
    pub fn new(kind: ParserErrorKind, line: usize) -> Self {
        Self { kind, line }
    }

    pub fn message(&self) -> String {
        match &self.kind {
            ParserErrorKind::UnknownStatement { token } => {
                format!("invalid statement starting with '{token}'")
            }
            ParserErrorKind::MissingAssign { found } => match found {
                Some(found) => format!("expected '=' but found '{found}'"),
                None => "expected '='".to_string(),
            },
            ParserErrorKind::TokenCount { kind, found, min, max } => {
                if min == max {
                    format!("{kind:?} statement takes {min} tokens, found {found}")
                } else {
                    format!("{kind:?} statement takes {min} to {max} tokens, found {found}")
                }
            }
            ParserErrorKind::MissingBlockOpen { kind } => {
                format!("{kind:?} statement must end with '{{'")
            }
            ParserErrorKind::UnterminatedBlock => "block is never closed with '}'".to_string(),
            ParserErrorKind::UnexpectedBlockMarker { marker } => {
                format!("unexpected '{marker}'")
            }
            ParserErrorKind::MalformedArrayLiteral => {
                "array literal must be written as '[ E1 E2 E3 ]'".to_string()
            }
            ParserErrorKind::MissingParamSeparator { found } => match found {
                Some(found) => format!("expected ':' after function name but found '{found}'"),
                None => "expected ':' after function name".to_string(),
            },
            ParserErrorKind::DuplicateParameter { name } => {
                format!("parameter '{name}' is declared twice")
            }
        }
    }
}

impl std::fmt::Display for ParserError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}, at line: {}", self.message(), self.line)
    }
}

impl std::error::Error for ParserError {}
