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

use std::fmt::Write;

use jiff::tz::TimeZone;

use crate::Error;
use crate::kv::Key;
use crate::kv::Value;
use crate::kv::Visitor;
use crate::layout::Layout;
use crate::layout::format_timestamp;
use crate::record::Record;
use crate::scope::Scope;
use crate::unescape::unescape_multiline;

/// A `key=value` text layout.
///
/// Output format:
///
/// ```text
/// time=2025-10-23T17:29:28Z level=INFO msg="server started" caller=cmd/main.rs:42 port=8080
/// time=2025-10-23T17:29:29Z level=DEBUG msg=ping ok=true req.id=7
/// ```
///
/// Keys and values holding a space, `=`, `"` or any control character are quoted and escaped.
/// Attributes recorded under groups get their keys qualified with the group path joined by `.`.
///
/// # Examples
///
/// ```
/// use jiff::tz::TimeZone;
/// use logweave::layout::TextLayout;
///
/// let layout = TextLayout::default()
///     .timezone(TimeZone::UTC)
///     .unescape_multiline(true);
/// ```
#[derive(Debug, Clone)]
pub struct TextLayout {
    tz: TimeZone,
    unescape_multiline: bool,
}

impl Default for TextLayout {
    fn default() -> Self {
        TextLayout {
            tz: TimeZone::system(),
            unescape_multiline: false,
        }
    }
}

impl TextLayout {
    /// Sets the timezone for timestamps. Defaults to the system timezone.
    pub fn timezone(mut self, tz: TimeZone) -> Self {
        self.tz = tz;
        self
    }

    /// Expand escaped newlines inside quoted attribute values so multi-line values print as
    /// real lines.
    pub fn unescape_multiline(mut self, yes: bool) -> Self {
        self.unescape_multiline = yes;
        self
    }

    fn render(&self, record: &Record, scope: &Scope) -> Result<String, Error> {
        let time = format_timestamp(record.time(), &self.tz)?;
        let mut visitor = KvFormatter {
            text: format!("time={time} level={}", record.level().as_str()),
        };

        visitor.encode(&[], "msg", record.message())?;
        if let Some(caller) = record.caller() {
            visitor.encode(&[], "caller", &caller.to_string())?;
        }
        scope.visit(record, &mut visitor)?;

        visitor.text.push('\n');
        Ok(visitor.text)
    }
}

impl Layout for TextLayout {
    fn format(&self, record: &Record, scope: &Scope) -> Result<Vec<u8>, Error> {
        let text = self.render(record, scope)?;
        if self.unescape_multiline {
            Ok(unescape_multiline(text.as_bytes()).into_owned())
        } else {
            Ok(text.into_bytes())
        }
    }
}

struct KvFormatter {
    text: String,
}

impl KvFormatter {
    fn encode(&mut self, groups: &[String], key: &str, value: &str) -> Result<(), Error> {
        self.text.push(' ');
        if groups.is_empty() {
            encode_text(&mut self.text, key)?;
        } else {
            let mut qualified = groups.join(".");
            qualified.push('.');
            qualified.push_str(key);
            encode_text(&mut self.text, &qualified)?;
        }
        self.text.push('=');
        encode_text(&mut self.text, value)
    }
}

impl Visitor for KvFormatter {
    fn visit(&mut self, groups: &[String], key: &Key, value: &Value) -> Result<(), Error> {
        match value {
            Value::Str(s) => self.encode(groups, key.as_str(), s),
            other => self.encode(groups, key.as_str(), &other.to_string()),
        }
    }
}

fn needs_quoting(text: &str) -> bool {
    text.is_empty()
        || text.chars().any(|c| {
            c == '='
                || c == '"'
                || c.is_whitespace()
                || c.is_control()
                || c == char::REPLACEMENT_CHARACTER
        })
}

fn encode_text(result: &mut String, text: &str) -> Result<(), Error> {
    if !needs_quoting(text) {
        result.push_str(text);
        return Ok(());
    }

    result.push('"');
    for c in text.chars() {
        match c {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            c if c.is_ascii_control() => {
                write!(result, "\\x{:02x}", c as u32).map_err(Error::from_fmt_error)?
            }
            c if c.is_control() => {
                write!(result, "\\u{:04x}", c as u32).map_err(Error::from_fmt_error)?
            }
            c => result.push(c),
        }
    }
    result.push('"');
    Ok(())
}
