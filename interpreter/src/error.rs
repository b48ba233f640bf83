use thiserror::Error;
use crate::calculator::CalculatorError;
use crate::object::VarKind;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InterpreterError {
    #[error("Undefined variable: {0}")]
    UndefinedVariable(String),
    #[error("Function not found: {0}")]
    FunctionNotFound(String),
    #[error("Variable {0} is not an array")]
    NotAnArray(String),
    #[error("Array index {index} out of bounds for array of size {size}")]
    IndexOutOfBounds { index: i64, size: usize },
    #[error("Cannot pop from empty array {0}")]
    EmptyArray(String),
    #[error("Type error: {operator} cannot combine {left} and {right}")]
    TypeError { operator: String, left: VarKind, right: VarKind },
    #[error("Invalid operator '{0}'")]
    InvalidOperator(String),
    #[error("Invalid index '{0}': expected an integer")]
    InvalidIndex(String),
    #[error("Invalid input for {target}: {message}")]
    InvalidInput { target: String, message: String },
    #[error("Maximum recursion depth of {0} exceeded")]
    RecursionLimit(u32),
    #[error("I/O error: {0}")]
    Io(String),
    #[error("Calculation failed: {0}")]
    Calculator(#[from] CalculatorError),
    #[error("{source}, at line: {line}")]
    AtLine {
        line: usize,
        #[source]
        source: Box<InterpreterError>,
    },
}

impl InterpreterError {
    /// Attach the line of the failing statement. The innermost line wins.
    pub fn at_line(self, line: usize) -> Self {
        match self {
            InterpreterError::AtLine { .. } => self,
            other => InterpreterError::AtLine { line, source: Box::new(other) },
        }
    }

    pub fn line(&self) -> Option<usize> {
        match self {
            InterpreterError::AtLine { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// The error without its line information.
    pub fn root(&self) -> &InterpreterError {
        match self {
            InterpreterError::AtLine { source, .. } => source.root(),
            other => other,
        }
    }
}

impl From<std::io::Error> for InterpreterError {
    fn from(e: std::io::Error) -> Self {
        InterpreterError::Io(e.to_string())
    }
}

pub type InterpreterResult<T> = Result<T, InterpreterError>;
