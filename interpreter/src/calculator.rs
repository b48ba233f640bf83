use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

pub const OPERATORS: [char; 6] = ['+', '-', '*', '/', '%', '^'];

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalculatorError {
    #[error("invalid operator '{0}'")]
    InvalidOperator(String),
    #[error("invalid operator '%' used for non integral type")]
    ModuloOnFloat,
    #[error("division by zero")]
    DivisionByZero,
    #[error("arithmetic overflow evaluating '{0}'")]
    Overflow(char),
    #[error("no number within given stream")]
    MissingOperand,
    #[error("'{0}' is not a number")]
    InvalidOperand(String),
    #[error("unbalanced parentheses")]
    UnbalancedParentheses,
}

/// Numeric type the calculator can evaluate an expression as.
pub trait Operand: Copy + FromStr + Display + PartialOrd {
    fn apply(l: Self, r: Self, op: char) -> Result<Self, CalculatorError>;

    fn parse_operand(s: &str) -> Result<Self, CalculatorError> {
        s.parse::<Self>().map_err(|_| CalculatorError::InvalidOperand(s.to_string()))
    }
}

impl Operand for i64 {
    fn apply(l: i64, r: i64, op: char) -> Result<i64, CalculatorError> {
        let checked = match op {
            '+' => l.checked_add(r),
            '-' => l.checked_sub(r),
            '*' => l.checked_mul(r),
            '/' | '%' if r == 0 => return Err(CalculatorError::DivisionByZero),
            '/' => l.checked_div(r),
            '%' => l.checked_rem(r),
            '^' => {
                let v = (l as f64).powf(r as f64);
                if v.is_finite() && v >= i64::MIN as f64 && v <= i64::MAX as f64 {
                    Some(v as i64)
                } else {
                    None
                }
            }
            _ => return Err(CalculatorError::InvalidOperator(op.to_string())),
        };
        checked.ok_or(CalculatorError::Overflow(op))
    }
}

impl Operand for f64 {
    fn apply(l: f64, r: f64, op: char) -> Result<f64, CalculatorError> {
        match op {
            '+' => Ok(l + r),
            '-' => Ok(l - r),
            '*' => Ok(l * r),
            '/' if r == 0.0 => Err(CalculatorError::DivisionByZero),
            '/' => Ok(l / r),
            '^' => Ok(l.powf(r)),
            '%' => Err(CalculatorError::ModuloOnFloat),
            _ => Err(CalculatorError::InvalidOperator(op.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Calculator {
    expression: String,
}

impl Calculator {
    pub fn new(expression: &str) -> Self {
        Self { expression: expression.to_string() }
    }

    pub fn set_expression(&mut self, expression: &str) {
        self.expression = expression.to_string();
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn evaluate<T: Operand>(&self) -> Result<T, CalculatorError> {
        let postfix = infix_to_postfix(&self.expression)?;
        evaluate_postfix::<T>(&postfix)
    }
}

pub fn is_operator(c: char) -> bool {
    OPERATORS.contains(&c)
}

fn is_parenthesis(c: char) -> bool {
    c == '(' || c == ')'
}

pub fn precedence(op: char) -> Result<u8, CalculatorError> {
    match op {
        '+' | '-' => Ok(0),
        '*' | '/' | '%' => Ok(1),
        '^' => Ok(2),
        _ => Err(CalculatorError::InvalidOperator(op.to_string())),
    }
}

/// Read one operand from the front of `input`, stopping at an operator,
/// parenthesis or whitespace.
fn read_operand(input: &str) -> Result<&str, CalculatorError> {
    let end = input
        .find(|c: char| is_operator(c) || is_parenthesis(c) || c.is_whitespace())
        .unwrap_or(input.len());
    if end == 0 {
        return Err(CalculatorError::MissingOperand);
    }
    Ok(&input[..end])
}

/// Reorder an infix expression into space separated postfix form.
///
/// Operators of equal precedence are resolved left to right, so `2 ^ 3 ^ 2`
/// becomes `2 3 ^ 2 ^`. A `-` where an operand is expected is read as the
/// sign of that operand.
pub fn infix_to_postfix(infix: &str) -> Result<String, CalculatorError> {
    let mut output: Vec<String> = vec![];
    let mut stack: Vec<char> = vec![];
    let mut expect_operand = true;
    let mut i = 0;

    while let Some(c) = infix[i..].chars().next() {
        if c.is_whitespace() {
            i += c.len_utf8();
        } else if c == '(' {
            if !expect_operand {
                return Err(CalculatorError::InvalidOperator(c.to_string()));
            }
            stack.push(c);
            i += 1;
        } else if c == ')' {
            if expect_operand {
                return Err(CalculatorError::MissingOperand);
            }
            loop {
                match stack.pop() {
                    Some('(') => break,
                    Some(op) => output.push(op.to_string()),
                    None => return Err(CalculatorError::UnbalancedParentheses),
                }
            }
            i += 1;
        } else if is_operator(c) && !(c == '-' && expect_operand) {
            if expect_operand {
                return Err(CalculatorError::MissingOperand);
            }
            let current = precedence(c)?;
            while let Some(&top) = stack.last() {
                if top == '(' || precedence(top)? < current {
                    break;
                }
                output.push(top.to_string());
                stack.pop();
            }
            stack.push(c);
            expect_operand = true;
            i += 1;
        } else {
            let sign = if c == '-' { 1 } else { 0 };
            let operand = read_operand(&infix[i + sign..])?;
            output.push(format!("{}{}", &infix[i..i + sign], operand));
            i += sign + operand.len();
            expect_operand = false;
        }
    }

    if expect_operand {
        return Err(CalculatorError::MissingOperand);
    }

    while let Some(op) = stack.pop() {
        if op == '(' {
            return Err(CalculatorError::UnbalancedParentheses);
        }
        output.push(op.to_string());
    }

    Ok(output.join(" "))
}

pub fn evaluate_postfix<T: Operand>(postfix: &str) -> Result<T, CalculatorError> {
    let mut operands: Vec<String> = vec![];

    for token in postfix.split_whitespace() {
        let mut chars = token.chars();
        match (chars.next(), chars.next()) {
            (Some(op), None) if is_operator(op) => {
                let (r, l) = match (operands.pop(), operands.pop()) {
                    (Some(r), Some(l)) => (r, l),
                    _ => return Err(CalculatorError::MissingOperand),
                };
                let value = T::apply(T::parse_operand(&l)?, T::parse_operand(&r)?, op)?;
                operands.push(value.to_string());
            }
            _ => operands.push(token.to_string()),
        }
    }

    match (operands.pop(), operands.is_empty()) {
        (Some(result), true) => T::parse_operand(&result),
        _ => Err(CalculatorError::MissingOperand),
    }
}

/// Compare two operands read as `T` with one of `== != >= > <= <`.
pub fn evaluate_relation<T: Operand>(l: &str, r: &str, op: &str) -> Result<bool, CalculatorError> {
    let l = T::parse_operand(l)?;
    let r = T::parse_operand(r)?;
    match op {
        "==" => Ok(l == r),
        "!=" => Ok(l != r),
        ">=" => Ok(l >= r),
        ">" => Ok(l > r),
        "<=" => Ok(l <= r),
        "<" => Ok(l < r),
        _ => Err(CalculatorError::InvalidOperator(op.to_string())),
    }
}

/// Combine two operands with `and`, anything else is treated as `or`.
/// Only the literal text `true` is truthy; an empty right operand takes the
/// value of the left one.
pub fn evaluate_bool(l: &str, r: &str, op: &str) -> bool {
    let l = l == "true";
    let r = if r.is_empty() { l } else { r == "true" };
    if op == "and" { l && r } else { l || r }
}
