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

//! Pretty-printing primitives and the [`Pretty`] marker.
//!
//! None of the functions here fail. When a value cannot be serialized, they return its `Debug`
//! text followed by `(serialize error: ...)`.

use std::fmt;

use serde::Serialize;
use serde_json::Value as JsonValue;

/// Serialize `value` as compact JSON.
pub fn json<T: Serialize + fmt::Debug + ?Sized>(value: &T) -> String {
    match serde_json::to_string(value) {
        Ok(text) => text,
        Err(err) => fallback(value, &err),
    }
}

/// Serialize `value` as JSON indented by `indent` spaces per level.
///
/// An indent of `0` means the default of two spaces.
pub fn json_indent<T: Serialize + fmt::Debug + ?Sized>(value: &T, indent: usize) -> String {
    let indent = " ".repeat(if indent == 0 { 2 } else { indent });
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    match value.serialize(&mut serializer) {
        Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
        Err(err) => fallback(value, &err),
    }
}

/// Serialize `value` as JSON indented by two spaces.
///
/// # Examples
///
/// ```
/// let text = logweave::pretty::pretty(&serde_json::json!({"a": 1}));
/// assert_eq!(text, "{\n  \"a\": 1\n}");
/// ```
pub fn pretty<T: Serialize + fmt::Debug + ?Sized>(value: &T) -> String {
    json_indent(value, 2)
}

pub(crate) fn fallback<T: fmt::Debug + ?Sized>(value: &T, err: &dyn fmt::Display) -> String {
    format!("{value:?} (serialize error: {err})")
}

/// Parse `text` as JSON and re-serialize it with two-space indentation.
pub(crate) fn reformat_json(text: &str) -> Option<String> {
    let value: JsonValue = serde_json::from_str(text).ok()?;
    serde_json::to_string_pretty(&value).ok()
}

/// Parse `text` as YAML and re-serialize it in block style.
pub(crate) fn reformat_yaml(text: &str) -> Option<String> {
    let value: serde_yaml_ng::Value = serde_yaml_ng::from_str(text).ok()?;
    serde_yaml_ng::to_string(&value).ok()
}

/// A `key: value` shape near the start, and not a JSON opener.
pub(crate) fn looks_like_yaml(text: &str) -> bool {
    if text.starts_with(['{', '[']) {
        return false;
    }
    matches!(text.find(':'), Some(colon) if colon > 0 && colon < 80)
}

/// A value that is rendered once, as readable multi-line text, and never re-formatted.
///
/// # Examples
///
/// ```
/// use logweave::pretty::Pretty;
///
/// let pretty = Pretty::new(&vec![1, 2]);
/// assert_eq!(pretty.as_str(), "[\n  1,\n  2\n]");
///
/// let pretty = Pretty::text(r#"{"a":1}"#);
/// assert_eq!(pretty.as_str(), "{\n  \"a\": 1\n}");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Pretty {
    rendered: String,
}

impl Pretty {
    /// Render any serializable value.
    ///
    /// Strings follow [`Pretty::text`]. Other values are tried as two-space JSON, then YAML,
    /// then their alternate `Debug` form.
    pub fn new<T: Serialize + fmt::Debug + ?Sized>(value: &T) -> Self {
        let rendered = match serde_json::to_value(value) {
            Ok(JsonValue::Null) => "null".to_string(),
            Ok(JsonValue::String(s)) => return Pretty::text(&s),
            Ok(json) => match serde_json::to_string_pretty(&json) {
                Ok(text) => text,
                Err(_) => format!("{value:#?}"),
            },
            Err(_) => match serde_yaml_ng::to_string(value) {
                Ok(text) => text,
                Err(_) => format!("{value:#?}"),
            },
        };
        Pretty { rendered }
    }

    /// Render raw text that may hold JSON or YAML.
    ///
    /// JSON-looking text is re-indented as JSON, YAML-looking text is re-emitted as YAML, and
    /// anything else (including text that fails to parse) is kept verbatim.
    pub fn text(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.starts_with(['{', '[']) {
            if let Some(rendered) = reformat_json(trimmed) {
                return Pretty { rendered };
            }
        }
        if looks_like_yaml(trimmed) {
            if let Some(rendered) = reformat_yaml(trimmed) {
                return Pretty { rendered };
            }
        }
        Pretty {
            rendered: text.to_string(),
        }
    }

    /// The rendered text.
    pub fn as_str(&self) -> &str {
        &self.rendered
    }
}

impl fmt::Display for Pretty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendered)
    }
}

impl fmt::Debug for Pretty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pretty").field(&self.rendered).finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde::Serialize;

    use super::*;

    #[derive(Debug, Serialize)]
    struct Spec {
        name: String,
        ports: Vec<u16>,
    }

    #[test]
    fn indent_width() {
        let value = serde_json::json!({"a": [1]});
        assert_eq!(json(&value), r#"{"a":[1]}"#);
        assert_eq!(json_indent(&value, 4), "{\n    \"a\": [\n        1\n    ]\n}");
        assert_eq!(json_indent(&value, 0), pretty(&value));
    }

    #[test]
    fn serialize_failure_falls_back() {
        let map = BTreeMap::from([((1, 2), 3)]);
        let text = pretty(&map);
        assert!(text.starts_with("{(1, 2): 3} (serialize error:"), "{text}");
    }

    #[test]
    fn pretty_records() {
        let spec = Spec {
            name: "web".to_string(),
            ports: vec![80],
        };
        assert_eq!(
            Pretty::new(&spec).as_str(),
            "{\n  \"name\": \"web\",\n  \"ports\": [\n    80\n  ]\n}"
        );
        assert_eq!(Pretty::new(&()).as_str(), "null");
    }

    #[test]
    fn pretty_yaml_text() {
        let pretty = Pretty::text("name: web\nreplicas: 3");
        assert_eq!(pretty.as_str(), "name: web\nreplicas: 3\n");
    }

    #[test]
    fn pretty_keeps_plain_and_broken_text() {
        assert_eq!(Pretty::text("just words").as_str(), "just words");
        assert_eq!(Pretty::text("{not json").as_str(), "{not json");
        assert_eq!(Pretty::new(&"plain").as_str(), "plain");
    }

    #[test]
    fn pretty_never_fails_for_complex_keys() {
        let map = BTreeMap::from([((1, 2), "pair")]);
        let text = Pretty::new(&map).to_string();
        assert!(!text.contains("serialize error"), "{text}");
        assert!(text.contains("pair"), "{text}");
    }

    #[test]
    fn yaml_heuristic() {
        assert!(looks_like_yaml("kind: Pod"));
        assert!(!looks_like_yaml("{\"kind\": \"Pod\"}"));
        assert!(!looks_like_yaml(": leading colon"));
        assert!(!looks_like_yaml("no colon here"));
    }
}
