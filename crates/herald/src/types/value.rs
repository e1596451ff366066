use std::collections::HashMap;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Substitution variables passed to the pattern formatter, keyed by name.
pub type Variables = HashMap<String, Value>;

/// A runtime value substituted into a pattern.
///
/// # Example
///
/// ```
/// use herald::Value;
///
/// let amount: Value = 42.into();
/// let target: Value = "Pikachu".into();
/// assert_eq!(amount.to_string(), "42");
/// assert_eq!(target.to_string(), "Pikachu");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// An integer number (used for plural selection).
    Number(i64),

    /// A floating-point number.
    Float(f64),

    /// A string value.
    String(String),
}

impl Value {
    /// Get this value as a number, if it is one.
    pub fn as_number(&self) -> Option<i64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Float(_) | Value::String(_) => None,
        }
    }

    /// Get this value as a float. Integers widen.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Number(n) => Some(*n as f64),
            Value::String(_) => None,
        }
    }

    /// Get this value as a string, if it is one.
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            Value::Number(_) | Value::Float(_) => None,
        }
    }

    /// Parse a command-line style argument: integer, then finite float,
    /// else string.
    ///
    /// ```
    /// use herald::Value;
    ///
    /// assert_eq!(Value::parse_lossy("42"), Value::Number(42));
    /// assert_eq!(Value::parse_lossy("1.5"), Value::Float(1.5));
    /// assert_eq!(Value::parse_lossy("nan"), Value::String("nan".to_string()));
    /// ```
    pub fn parse_lossy(raw: &str) -> Self {
        if let Ok(n) = raw.parse::<i64>() {
            return Value::Number(n);
        }
        match raw.parse::<f64>() {
            Ok(f) if f.is_finite() => Value::Float(f),
            _ => Value::String(raw.to_string()),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::String(s) => write!(f, "{s}"),
        }
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(i64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(i64::from(n))
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Number(n as i64)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Number(n as i64)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Float(f64::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_lossy_prefers_integers_then_floats() {
        assert_eq!(Value::parse_lossy("-7"), Value::Number(-7));
        assert_eq!(Value::parse_lossy("2.25"), Value::Float(2.25));
        assert_eq!(
            Value::parse_lossy("Pikachu"),
            Value::String("Pikachu".to_string())
        );
    }

    #[test]
    fn parse_lossy_keeps_non_finite_floats_as_strings() {
        for raw in ["nan", "NaN", "inf", "-inf", "infinity"] {
            assert_eq!(Value::parse_lossy(raw), Value::String(raw.to_string()));
        }
    }
}
