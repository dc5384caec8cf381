// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The module for key-value pairs in a log record.

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::Error;
use crate::pretty::Pretty;
use crate::pretty::fallback;

/// The value appended to a key/value list of odd length.
pub const MISSING: &str = "<missing>";

/// Represents a key in a key-value pair.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Key(Cow<'static, str>);

impl Key {
    /// Create a key from a static string.
    pub const fn new(key: &'static str) -> Self {
        Key(Cow::Borrowed(key))
    }

    /// Gets the key string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Turn the key position of a flat key/value list into a key.
    pub(crate) fn from_value(value: Value) -> Self {
        match value {
            Value::Str(s) => Key(s),
            other => Key(Cow::Owned(other.to_string())),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Key {
    fn from(key: &'static str) -> Self {
        Key::new(key)
    }
}

impl From<String> for Key {
    fn from(key: String) -> Self {
        Key(Cow::Owned(key))
    }
}

/// Represents a value in a key-value pair.
///
/// Values are dynamic: scalars, strings, structured data captured through serde, or a
/// [`Pretty`] marker.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The absent value.
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// An unsigned integer above `i64::MAX`.
    ///
    /// Smaller unsigned numbers are always held as [`Value::Int`], however they are captured.
    Uint(u64),
    /// A floating point number.
    Float(f64),
    /// A string.
    Str(Cow<'static, str>),
    /// A container or record captured through serde.
    Structured(JsonValue),
    /// A value that renders itself and is never re-formatted.
    Pretty(Pretty),
}

impl Value {
    /// Capture any serializable value.
    ///
    /// The value is serialized to a JSON data model first. Objects and arrays become
    /// [`Value::Structured`]; anything that serializes to a scalar (newtypes, unit enum
    /// variants, plain numbers) becomes the matching scalar variant. When serialization fails
    /// the value is kept as its `Debug` text with the error appended.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::BTreeMap;
    ///
    /// use logweave::kv::Value;
    ///
    /// let map = BTreeMap::from([("a", 1)]);
    /// assert!(matches!(Value::serde(&map), Value::Structured(_)));
    /// assert_eq!(Value::serde(&7u8), Value::Int(7));
    /// ```
    pub fn serde<T: Serialize + fmt::Debug + ?Sized>(value: &T) -> Value {
        match serde_json::to_value(value) {
            Ok(json) => Value::from_json(json),
            Err(err) => Value::Str(Cow::Owned(fallback(value, &err))),
        }
    }

    /// Convert a JSON data model value.
    pub fn from_json(json: JsonValue) -> Value {
        match json {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(b),
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Value::Uint(u)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            JsonValue::String(s) => Value::Str(Cow::Owned(s)),
            json @ (JsonValue::Array(_) | JsonValue::Object(_)) => Value::Structured(json),
        }
    }

    /// Capture a value through its `Display` implementation.
    pub fn display(value: impl fmt::Display) -> Value {
        Value::Str(Cow::Owned(value.to_string()))
    }

    /// Capture a value through its `Debug` implementation.
    pub fn debug(value: impl fmt::Debug) -> Value {
        Value::Str(Cow::Owned(format!("{value:?}")))
    }

    /// Capture an error through its message.
    pub fn error(err: &(dyn std::error::Error + '_)) -> Value {
        Value::display(err)
    }

    /// Whether this value is a string.
    pub fn is_str(&self) -> bool {
        matches!(self, Value::Str(_))
    }

    /// The string content, if this value is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Convert into the JSON data model for the structured encoder.
    pub fn to_json(&self) -> JsonValue {
        match self {
            Value::Null => JsonValue::Null,
            Value::Bool(b) => JsonValue::Bool(*b),
            Value::Int(i) => JsonValue::from(*i),
            Value::Uint(u) => JsonValue::from(*u),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(JsonValue::Number)
                .unwrap_or_else(|| JsonValue::String(f.to_string())),
            Value::Str(s) => JsonValue::String(s.to_string()),
            Value::Structured(json) => json.clone(),
            Value::Pretty(p) => JsonValue::String(p.as_str().to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("<nil>"),
            Value::Bool(b) => fmt::Display::fmt(b, f),
            Value::Int(i) => fmt::Display::fmt(i, f),
            Value::Uint(u) => fmt::Display::fmt(u, f),
            Value::Float(v) => fmt::Display::fmt(v, f),
            Value::Str(s) => f.write_str(s),
            Value::Structured(json) => fmt::Display::fmt(json, f),
            Value::Pretty(p) => fmt::Display::fmt(p, f),
        }
    }
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Value::Int(v as i64)
            }
        })*
    };
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(v: $t) -> Self {
                let v = v as u64;
                i64::try_from(v).map_or(Value::Uint(v), Value::Int)
            }
        })*
    };
}

impl_from_signed!(i8, i16, i32, i64, isize);
impl_from_unsigned!(u8, u16, u32, u64, usize);

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v as f64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Value::Str(Cow::Owned(v.to_string()))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(Cow::Owned(v.to_owned()))
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Str(Cow::Owned(v.clone()))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(Cow::Owned(v))
    }
}

impl From<Cow<'static, str>> for Value {
    fn from(v: Cow<'static, str>) -> Self {
        Value::Str(v)
    }
}

impl From<Pretty> for Value {
    fn from(v: Pretty) -> Self {
        Value::Pretty(v)
    }
}

impl From<JsonValue> for Value {
    fn from(v: JsonValue) -> Self {
        Value::from_json(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

/// A visitor to walk through key-value pairs.
///
/// `groups` is the group path the pair was recorded under, outermost first.
pub trait Visitor {
    /// Visit a key-value pair.
    fn visit(&mut self, groups: &[String], key: &Key, value: &Value) -> Result<(), Error>;
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde::Serialize;

    use super::*;

    #[derive(Debug, Serialize)]
    struct Pod {
        name: &'static str,
        replicas: u32,
    }

    #[derive(Debug, Serialize)]
    struct Port(u16);

    #[test]
    fn serde_capture_detects_records() {
        let value = Value::serde(&Pod {
            name: "web",
            replicas: 3,
        });
        assert!(matches!(value, Value::Structured(JsonValue::Object(_))));

        let value = Value::serde(&vec!["a", "b"]);
        assert!(matches!(value, Value::Structured(JsonValue::Array(_))));
    }

    #[test]
    fn serde_capture_keeps_scalar_shapes_scalar() {
        assert_eq!(Value::serde(&Port(8080)), Value::Int(8080));
        assert_eq!(Value::serde(&"plain"), Value::from("plain"));
        assert_eq!(Value::serde(&Option::<u8>::None), Value::Null);
    }

    #[test]
    fn serde_capture_falls_back_on_failure() {
        let map = BTreeMap::from([((1, 2), "tuple keys are not JSON")]);
        let value = Value::serde(&map);
        let text = value.as_str().unwrap();
        assert!(text.contains("serialize error"), "{text}");
    }

    #[test]
    fn unsigned_numbers_compare_equal_however_captured() {
        assert_eq!(Value::from(7u8), Value::Int(7));
        assert_eq!(Value::from(7u8), Value::serde(&7u8));
        assert_eq!(Value::from(8080usize), Value::serde(&Port(8080)));
        assert_eq!(Value::from(u64::MAX), Value::Uint(u64::MAX));
        assert_eq!(Value::from(u64::MAX), Value::serde(&u64::MAX));
        assert_eq!(Value::from(i64::MAX as u64), Value::Int(i64::MAX));
    }

    #[test]
    fn display_values() {
        assert_eq!(Value::Null.to_string(), "<nil>");
        assert_eq!(Value::from(42).to_string(), "42");
        assert_eq!(Value::from(true).to_string(), "true");
        assert_eq!(Value::from(1.5).to_string(), "1.5");
        assert_eq!(
            Value::serde(&BTreeMap::from([("a", 1)])).to_string(),
            r#"{"a":1}"#
        );
    }

    #[test]
    fn keys_from_values() {
        assert_eq!(Key::from_value(Value::from("name")).as_str(), "name");
        assert_eq!(Key::from_value(Value::from(7)).as_str(), "7");
    }

    #[test]
    fn json_conversion() {
        assert_eq!(Value::from(-3).to_json(), serde_json::json!(-3));
        assert_eq!(Value::from(f64::NAN).to_json(), serde_json::json!("NaN"));
        assert_eq!(Value::from(Some("x")).to_json(), serde_json::json!("x"));
        assert_eq!(Value::from(None::<i32>).to_json(), JsonValue::Null);
    }
}
