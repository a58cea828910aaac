use std::fmt;

use ordered_float::NotNan;
use serde::{Deserialize, Serialize};

/// A literal value as it appears on the wire.
///
/// Untagged: JSON `null`, booleans, integers, floats and strings map directly. Integers are
/// tried before floats so `5` stays an `Int`.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LiteralValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(NotNan<f64>),
    String(String),
}

impl LiteralValue {
    /// SQL text of the literal. Strings are single-quoted with embedded quotes doubled.
    pub fn to_sql(&self) -> String {
        match self {
            LiteralValue::Null => "NULL".to_string(),
            LiteralValue::Bool(b) => if *b { "1".to_string() } else { "0".to_string() },
            LiteralValue::Int(i) => i.to_string(),
            LiteralValue::Float(n) => n.into_inner().to_string(),
            LiteralValue::String(s) => format!("'{}'", s.replace('\'', "''")),
        }
    }
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::Null => write!(f, "n: NULL"),
            LiteralValue::Bool(b) => write!(f, "b: {}", b),
            LiteralValue::Int(i) => write!(f, "i: {}", i),
            LiteralValue::Float(n) => write!(f, "f: {}", n.into_inner()),
            LiteralValue::String(s) => write!(f, "s: \"{}\"", s),
        }
    }
}

impl fmt::Debug for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::Null => write!(f, "Null(n: NULL)"),
            LiteralValue::Bool(_) => write!(f, "Bool({})", self),
            LiteralValue::Int(_) => write!(f, "Int({})", self),
            LiteralValue::Float(_) => write!(f, "Float({})", self),
            LiteralValue::String(_) => write!(f, "String({})", self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(text: &str) -> LiteralValue {
        serde_json::from_str(text).unwrap()
    }

    #[test]
    fn test_decode_picks_the_narrowest_variant() {
        assert_eq!(decode("null"), LiteralValue::Null);
        assert_eq!(decode("true"), LiteralValue::Bool(true));
        assert_eq!(decode("42"), LiteralValue::Int(42));
        assert_eq!(decode("-7"), LiteralValue::Int(-7));
        assert_eq!(decode("2.5"), LiteralValue::Float(NotNan::new(2.5).unwrap()));
        assert_eq!(decode("\"x\""), LiteralValue::String("x".into()));
    }

    #[test]
    fn test_to_sql() {
        assert_eq!(LiteralValue::Null.to_sql(), "NULL");
        assert_eq!(LiteralValue::Bool(true).to_sql(), "1");
        assert_eq!(LiteralValue::Bool(false).to_sql(), "0");
        assert_eq!(LiteralValue::Int(-3).to_sql(), "-3");
        assert_eq!(LiteralValue::Float(NotNan::new(0.25).unwrap()).to_sql(), "0.25");
        assert_eq!(LiteralValue::String("O'Brien".into()).to_sql(), "'O''Brien'");
    }
}
