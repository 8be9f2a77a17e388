//! Boolean flags as they arrive from forms and as they are stored.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// A flag submitted by a client, which may send a bool, a number or a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlagValue {
    Bool(bool),
    Number(Number),
    Text(String),
    Other(Value),
}

impl FlagValue {
    /// `true`, `"true"`, `"1"` and `1` are true; anything else is false.
    pub fn is_truthy(&self) -> bool {
        match self {
            FlagValue::Bool(b) => *b,
            FlagValue::Number(n) => n.as_u64() == Some(1) || n.as_f64() == Some(1.0),
            FlagValue::Text(s) => s == "true" || s == "1",
            FlagValue::Other(_) => false,
        }
    }
}

impl From<bool> for FlagValue {
    fn from(value: bool) -> Self {
        FlagValue::Bool(value)
    }
}

/// Stored flags are the literal strings `"true"` and `"false"`.
pub fn parse_stored_flag(stored: Option<&str>, default: bool) -> bool {
    match stored {
        Some(value) => value == "true",
        None => default,
    }
}

pub fn encode_flag(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn flag(value: Value) -> FlagValue {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn truthy_values() {
        assert!(flag(json!(true)).is_truthy());
        assert!(flag(json!("true")).is_truthy());
        assert!(flag(json!("1")).is_truthy());
        assert!(flag(json!(1)).is_truthy());
    }

    #[test]
    fn everything_else_is_false() {
        for value in [json!(false), json!("yes"), json!("TRUE"), json!(0), json!(2), json!([]), json!({})] {
            assert!(!flag(value.clone()).is_truthy(), "{value} should be false");
        }
    }

    #[test]
    fn stored_flag_falls_back_to_default_only_when_absent() {
        assert!(parse_stored_flag(None, true));
        assert!(!parse_stored_flag(Some("false"), true));
        assert!(!parse_stored_flag(Some("garbage"), true));
        assert!(parse_stored_flag(Some("true"), false));
    }
}
