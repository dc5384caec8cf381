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

//! Automatic pretty-printing of structured attribute values.
//!
//! The rules, applied to every attribute value before it reaches an encoder:
//!
//! 1. A [`Value::Pretty`] is left alone.
//! 2. A [`Value::Str`] whose trimmed text starts with `{` and ends with `}` (or `[` / `]`) is
//!    parsed as JSON and re-indented with two spaces. Text that fails to parse is kept.
//! 3. A [`Value::Structured`] holding an object or an array is rendered with
//!    [`pretty`](crate::pretty::pretty). Which values end up here is decided at capture time by
//!    [`Value::serde`]: a value is a record or container exactly when its serde form is a JSON
//!    object or array.
//! 4. Everything else passes through unchanged.

use std::borrow::Cow;

use serde_json::Value as JsonValue;

use crate::kv::Key;
use crate::kv::MISSING;
use crate::kv::Value;
use crate::pretty::pretty;
use crate::pretty::reformat_json;

/// Normalize one attribute value for display.
///
/// # Examples
///
/// ```
/// use logweave::autoformat::auto_format;
/// use logweave::kv::Value;
///
/// let value = auto_format(Value::from(r#"{"a":1,"b":2}"#));
/// assert_eq!(value.as_str(), Some("{\n  \"a\": 1,\n  \"b\": 2\n}"));
///
/// let value = auto_format(Value::from("plain"));
/// assert_eq!(value.as_str(), Some("plain"));
/// ```
pub fn auto_format(value: Value) -> Value {
    match value {
        Value::Str(text) => match reformat_json_like(&text) {
            Some(rendered) => Value::Str(Cow::Owned(rendered)),
            None => Value::Str(text),
        },
        Value::Structured(json @ (JsonValue::Array(_) | JsonValue::Object(_))) => {
            Value::Str(Cow::Owned(pretty(&json)))
        }
        Value::Structured(scalar) => Value::from_json(scalar),
        other => other,
    }
}

fn reformat_json_like(text: &str) -> Option<String> {
    let trimmed = text.trim();
    let bracketed = (trimmed.starts_with('{') && trimmed.ends_with('}'))
        || (trimmed.starts_with('[') && trimmed.ends_with(']'));
    if bracketed {
        reformat_json(trimmed)
    } else {
        None
    }
}

/// Pair up a flat `key, value, key, value, ...` list.
///
/// A list of odd length gets [`MISSING`] as its last value. Keys that are not strings are
/// rendered with `Display`. Every value goes through [`auto_format`].
pub fn normalize_kvs(kvs: impl IntoIterator<Item = Value>) -> Vec<(Key, Value)> {
    let mut pairs = Vec::new();
    let mut iter = kvs.into_iter();
    while let Some(key) = iter.next() {
        let value = iter.next().unwrap_or(Value::Str(Cow::Borrowed(MISSING)));
        pairs.push((Key::from_value(key), auto_format(value)));
    }
    pairs
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::pretty::Pretty;

    #[test]
    fn json_text_round_trips() {
        let formatted = auto_format(Value::from(r#"{"a":1,"b":2}"#));
        let text = formatted.as_str().unwrap();
        assert!(text.contains('\n'));

        let reparsed: JsonValue = serde_json::from_str(text).unwrap();
        assert_eq!(reparsed, serde_json::json!({"a": 1, "b": 2}));
    }

    #[test]
    fn json_arrays_and_padding() {
        let formatted = auto_format(Value::from("  [1, 2]  "));
        assert_eq!(formatted.as_str(), Some("[\n  1,\n  2\n]"));
    }

    #[test]
    fn broken_json_text_is_kept() {
        let formatted = auto_format(Value::from("{not: json}"));
        assert_eq!(formatted.as_str(), Some("{not: json}"));

        let formatted = auto_format(Value::from("{ half"));
        assert_eq!(formatted.as_str(), Some("{ half"));
    }

    #[test]
    fn pretty_marker_is_untouched() {
        let marker = Pretty::text("{\"a\":1}");
        let value = auto_format(Value::from(marker.clone()));
        assert_eq!(value, Value::Pretty(marker));
    }

    #[test]
    fn containers_are_pretty_printed() {
        let value = auto_format(Value::serde(&BTreeMap::from([("a", 1)])));
        assert_eq!(value.as_str(), Some("{\n  \"a\": 1\n}"));

        let value = auto_format(Value::serde(&vec!["x"]));
        assert_eq!(value.as_str(), Some("[\n  \"x\"\n]"));
    }

    #[test]
    fn scalars_pass_through() {
        assert_eq!(auto_format(Value::from(42)), Value::from(42));
        assert_eq!(auto_format(Value::from(false)), Value::from(false));
        assert_eq!(auto_format(Value::Null), Value::Null);
        assert_eq!(
            auto_format(Value::Structured(serde_json::json!(3))),
            Value::Int(3)
        );
    }

    #[test]
    fn odd_lists_get_a_placeholder() {
        let pairs = normalize_kvs([Value::from("a"), Value::from(1), Value::from("b")]);
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].0.as_str(), "a");
        assert_eq!(pairs[0].1, Value::from(1));
        assert_eq!(pairs[1].0.as_str(), "b");
        assert_eq!(pairs[1].1.as_str(), Some(MISSING));
    }

    #[test]
    fn values_in_lists_are_formatted() {
        let pairs = normalize_kvs([Value::from(7), Value::from("[1]")]);
        assert_eq!(pairs[0].0.as_str(), "7");
        assert_eq!(pairs[0].1.as_str(), Some("[\n  1\n]"));
    }
}
