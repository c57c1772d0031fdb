//! Structured key-value fields

use std::borrow::Cow;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single key-value pair attached to log records
///
/// Values are kept as [`serde_json::Value`] so both encoders can render them
/// without knowing where they came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Field name as it appears in output
    pub key: Cow<'static, str>,
    /// Field value
    pub value: Value,
}

impl Field {
    /// Create a field from any JSON value
    pub fn json(key: impl Into<Cow<'static, str>>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// String field
    pub fn string(key: impl Into<Cow<'static, str>>, value: impl Into<String>) -> Self {
        Self::json(key, Value::String(value.into()))
    }

    /// Signed integer field
    pub fn int(key: impl Into<Cow<'static, str>>, value: i64) -> Self {
        Self::json(key, value)
    }

    /// Unsigned integer field
    pub fn uint(key: impl Into<Cow<'static, str>>, value: u64) -> Self {
        Self::json(key, value)
    }

    /// Float field; non-finite values become `null`
    pub fn float(key: impl Into<Cow<'static, str>>, value: f64) -> Self {
        Self::json(key, value)
    }

    /// Boolean field
    pub fn bool(key: impl Into<Cow<'static, str>>, value: bool) -> Self {
        Self::json(key, value)
    }

    /// Duration field, rendered as fractional seconds
    pub fn duration(key: impl Into<Cow<'static, str>>, value: Duration) -> Self {
        Self::float(key, value.as_secs_f64())
    }

    /// Field name
    #[inline]
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// String value, if this is a string field
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.value.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn duration_is_seconds() {
        let field = Field::duration("elapsed", Duration::from_millis(1500));
        assert_eq!(field.value, json!(1.5));
    }

    #[test]
    fn non_finite_float_is_null() {
        assert_eq!(Field::float("ratio", f64::NAN).value, Value::Null);
    }

    #[test]
    fn owned_and_static_keys() {
        let dynamic = String::from("region");
        assert_eq!(Field::string(dynamic, "eu").key(), "region");
        assert_eq!(Field::int("pid", 42).value, json!(42));
        assert_eq!(Field::string("host", "a").as_str(), Some("a"));
        assert_eq!(Field::bool("ok", true).as_str(), None);
    }
}
