//! Raw descriptor values as they appear in a declarative interface description.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A raw, unresolved field value from a declaration.
///
/// Width-like fields may be an integer literal, a string of decimal digits, or
/// the name of a parameter. Flag-like fields may additionally be a boolean.
/// Classification into immediate and symbolic values happens during resolution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// A boolean literal.
    Bool(bool),
    /// A non-negative integer literal.
    Int(u64),
    /// A string: either all decimal digits or a symbolic name.
    Str(String),
}

impl RawValue {
    /// Returns the string payload, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            RawValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Bool(b) => write!(f, "{b}"),
            RawValue::Int(n) => write!(f, "{n}"),
            RawValue::Str(s) => f.write_str(s),
        }
    }
}

impl From<bool> for RawValue {
    fn from(b: bool) -> Self {
        RawValue::Bool(b)
    }
}

impl From<u64> for RawValue {
    fn from(n: u64) -> Self {
        RawValue::Int(n)
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Str(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::Str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untagged_deserialize() {
        let v: Vec<RawValue> = serde_json::from_str(r#"[true, 12, "12", "WIDTH_D"]"#).unwrap();
        assert_eq!(
            v,
            vec![
                RawValue::Bool(true),
                RawValue::Int(12),
                RawValue::Str("12".into()),
                RawValue::Str("WIDTH_D".into()),
            ]
        );
    }

    #[test]
    fn display() {
        assert_eq!(RawValue::Bool(false).to_string(), "false");
        assert_eq!(RawValue::Int(32).to_string(), "32");
        assert_eq!(RawValue::from("NO_READY").to_string(), "NO_READY");
    }

    #[test]
    fn as_str_only_for_strings() {
        assert_eq!(RawValue::from("x").as_str(), Some("x"));
        assert_eq!(RawValue::Int(1).as_str(), None);
    }
}
