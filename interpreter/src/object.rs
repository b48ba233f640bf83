use std::fmt;
use frontend::token::QUOTE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarKind {
    Bool,
    Int,
    Double,
    String,
    Array,
    None,
}

impl fmt::Display for VarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VarKind::Bool => "BOOL",
            VarKind::Int => "INT",
            VarKind::Double => "DOUBLE",
            VarKind::String => "STRING",
            VarKind::Array => "ARRAY",
            VarKind::None => "NONE",
        };
        write!(f, "{name}")
    }
}

/// Infer the kind of a literal token from its text alone.
///
/// `true`/`false` are booleans. A leading quote, or any character other than
/// letters, digits and `.`, makes a string. All digits is an integer; digits
/// with a single `.` are a double only when the fractional part has a nonzero
/// digit, so `3.0` is an integer. A `-` may precede a number.
pub fn infer_kind(token: &str) -> VarKind {
    if token == "true" || token == "false" {
        return VarKind::Bool;
    }
    if token.is_empty() {
        return VarKind::None;
    }

    let unsigned = token.strip_prefix('-').unwrap_or(token);
    if token.starts_with(QUOTE)
        || unsigned.is_empty()
        || unsigned.chars().any(|c| !c.is_ascii_alphanumeric() && c != '.')
    {
        return VarKind::String;
    }

    match unsigned.split_once('.') {
        None if unsigned.chars().all(|c| c.is_ascii_digit()) => VarKind::Int,
        Some((whole, frac))
            if !(whole.is_empty() && frac.is_empty())
                && whole.chars().all(|c| c.is_ascii_digit())
                && frac.chars().all(|c| c.is_ascii_digit()) =>
        {
            if frac.chars().any(|c| c != '0') {
                VarKind::Double
            } else {
                VarKind::Int
            }
        }
        _ => VarKind::String,
    }
}

/// Remove the `'` delimiters of a string literal, either end independently.
pub fn strip_quotes(token: &str) -> &str {
    let token = token.strip_prefix(QUOTE).unwrap_or(token);
    token.strip_suffix(QUOTE).unwrap_or(token)
}

#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    Bool(bool),
    Int(i64),
    Double(f64),
    String(String),
    Array(Vec<Object>),
    None,
}

impl Object {
    /// Build a value from literal text using `infer_kind`.
    pub fn from_literal(token: &str) -> Object {
        match infer_kind(token) {
            VarKind::Bool => Object::Bool(token == "true"),
            VarKind::Int => {
                let whole = token.split('.').next().unwrap_or(token);
                match whole.parse::<i64>() {
                    Ok(v) => Object::Int(v),
                    // too large for i64
                    Err(_) => token.parse::<f64>().map(Object::Double).unwrap_or_else(|_| Object::String(token.to_string())),
                }
            }
            VarKind::Double => token
                .parse::<f64>()
                .map(Object::Double)
                .unwrap_or_else(|_| Object::String(token.to_string())),
            VarKind::String => Object::String(strip_quotes(token).to_string()),
            VarKind::Array | VarKind::None => Object::None,
        }
    }

    pub fn get_kind(&self) -> VarKind {
        match self {
            Object::Bool(_) => VarKind::Bool,
            Object::Int(_) => VarKind::Int,
            Object::Double(_) => VarKind::Double,
            Object::String(_) => VarKind::String,
            Object::Array(_) => VarKind::Array,
            Object::None => VarKind::None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Object::Int(_) | Object::Double(_))
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Object::None)
    }

    pub fn as_array(&self) -> Option<&Vec<Object>> {
        match self {
            Object::Array(elements) => Some(elements),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Object>> {
        match self {
            Object::Array(elements) => Some(elements),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            Object::Int(v) => Some(*v as f64),
            Object::Double(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::Bool(v) => write!(f, "{v}"),
            Object::Int(v) => write!(f, "{v}"),
            Object::Double(v) => write!(f, "{v}"),
            Object::String(s) => write!(f, "{s}"),
            Object::Array(elements) => {
                write!(f, "[")?;
                for (i, e) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{e}")?;
                }
                write!(f, "]")
            }
            Object::None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_kind() {
        assert_eq!(infer_kind("true"), VarKind::Bool);
        assert_eq!(infer_kind("false"), VarKind::Bool);
        assert_eq!(infer_kind("42"), VarKind::Int);
        assert_eq!(infer_kind("-42"), VarKind::Int);
        assert_eq!(infer_kind("3.0"), VarKind::Int);
        assert_eq!(infer_kind("3.00"), VarKind::Int);
        assert_eq!(infer_kind("3.5"), VarKind::Double);
        assert_eq!(infer_kind("3.50"), VarKind::Double);
        assert_eq!(infer_kind(".5"), VarKind::Double);
        assert_eq!(infer_kind("'hi'"), VarKind::String);
        assert_eq!(infer_kind("a+b"), VarKind::String);
        assert_eq!(infer_kind("1.2.3"), VarKind::String);
        assert_eq!(infer_kind("abc"), VarKind::String);
        assert_eq!(infer_kind("-"), VarKind::String);
        assert_eq!(infer_kind(""), VarKind::None);
    }

    #[test]
    fn test_from_literal() {
        assert_eq!(Object::from_literal("7"), Object::Int(7));
        assert_eq!(Object::from_literal("3.0"), Object::Int(3));
        assert_eq!(Object::from_literal("-2.25"), Object::Double(-2.25));
        assert_eq!(Object::from_literal("'hello'"), Object::String("hello".to_string()));
        assert_eq!(Object::from_literal("'hello"), Object::String("hello".to_string()));
        assert_eq!(Object::from_literal("false"), Object::Bool(false));
        assert_eq!(Object::from_literal(""), Object::None);
    }

    #[test]
    fn test_display() {
        let nested = Object::Array(vec![
            Object::Int(1),
            Object::Array(vec![Object::Double(2.5), Object::String("x".to_string())]),
        ]);
        assert_eq!(nested.to_string(), "[1 [2.5 x]]");
        assert_eq!(Object::Double(3.0).to_string(), "3");
        assert_eq!(Object::None.to_string(), "");
    }

    #[test]
    fn test_kinds() {
        assert_eq!(Object::Array(vec![]).get_kind(), VarKind::Array);
        assert_eq!(VarKind::Double.to_string(), "DOUBLE");
        assert!(Object::Int(1).is_numeric());
        assert_eq!(Object::Int(2).as_double(), Some(2.0));
    }
}
