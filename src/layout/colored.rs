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

use colored::Color;

use crate::Error;
use crate::Level;
use crate::layout::Layout;
use crate::layout::TextLayout;
use crate::record::Record;
use crate::scope::Scope;

const RESET: &[u8] = b"\x1b[0m";

/// Colors for different log levels.
#[derive(Debug, Clone)]
pub struct LevelColor {
    /// Color for error level logs.
    pub error: Color,
    /// Color for warning level logs.
    pub warn: Color,
    /// Color for info level logs.
    pub info: Color,
    /// Color for debug level logs.
    pub debug: Color,
}

impl Default for LevelColor {
    fn default() -> Self {
        Self {
            error: Color::Red,
            warn: Color::Yellow,
            info: Color::Green,
            debug: Color::Blue,
        }
    }
}

impl LevelColor {
    /// The color of a level.
    pub fn color(&self, level: Level) -> Color {
        match level {
            Level::Error => self.error,
            Level::Warn => self.warn,
            Level::Info => self.info,
            Level::Debug => self.debug,
        }
    }
}

/// A text layout that paints every physical line of an event in the color of its level.
///
/// Each line is wrapped in its own color sequence and reset, so a multi-line event never bleeds
/// color into the next one, even when lines from several threads interleave. Colors are always
/// emitted; pick [`TextLayout`] for uncolored output.
///
/// # Examples
///
/// ```
/// use colored::Color;
/// use jiff::tz::TimeZone;
/// use logweave::layout::ColoredTextLayout;
/// use logweave::layout::TextLayout;
///
/// let layout = ColoredTextLayout::new(TextLayout::default().timezone(TimeZone::UTC))
///     .debug_color(Color::Magenta);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ColoredTextLayout {
    text: TextLayout,
    colors: LevelColor,
}

impl ColoredTextLayout {
    /// Colorize the output of `text`.
    pub fn new(text: TextLayout) -> Self {
        ColoredTextLayout {
            text,
            colors: LevelColor::default(),
        }
    }

    /// Replace all level colors.
    pub fn colors(mut self, colors: LevelColor) -> Self {
        self.colors = colors;
        self
    }

    /// Customize the color of the error level. Default to red.
    pub fn error_color(mut self, color: Color) -> Self {
        self.colors.error = color;
        self
    }

    /// Customize the color of the warn level. Default to yellow.
    pub fn warn_color(mut self, color: Color) -> Self {
        self.colors.warn = color;
        self
    }

    /// Customize the color of the info level. Default to green.
    pub fn info_color(mut self, color: Color) -> Self {
        self.colors.info = color;
        self
    }

    /// Customize the color of the debug level. Default to blue.
    pub fn debug_color(mut self, color: Color) -> Self {
        self.colors.debug = color;
        self
    }
}

impl Layout for ColoredTextLayout {
    fn format(&self, record: &Record, scope: &Scope) -> Result<Vec<u8>, Error> {
        let line = self.text.format(record, scope)?;
        Ok(colorize_lines(&line, self.colors.color(record.level())))
    }
}

/// Wrap each `\n`-separated line of `text` in `color`, keeping a trailing newline outside the
/// color sequences.
pub(crate) fn colorize_lines(text: &[u8], color: Color) -> Vec<u8> {
    if text.is_empty() {
        return Vec::new();
    }

    let start = format!("\x1b[{}m", color.to_fg_str());
    let (body, newline) = match text.strip_suffix(b"\n") {
        Some(body) => (body, true),
        None => (text, false),
    };

    let mut out = Vec::with_capacity(text.len() + 16);
    for (i, line) in body.split(|b| *b == b'\n').enumerate() {
        if i > 0 {
            out.push(b'\n');
        }
        out.extend_from_slice(start.as_bytes());
        out.extend_from_slice(line);
        out.extend_from_slice(RESET);
    }
    if newline {
        out.push(b'\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use std::time::Duration;
    use std::time::SystemTime;

    use jiff::tz::TimeZone;

    use super::*;
    use crate::kv::Key;
    use crate::kv::Value;

    #[test]
    fn every_line_is_wrapped() {
        assert_eq!(
            colorize_lines(b"a\nb\n", Color::Red),
            b"\x1b[31ma\x1b[0m\n\x1b[31mb\x1b[0m\n"
        );
        assert_eq!(
            colorize_lines(b"single", Color::Green),
            b"\x1b[32msingle\x1b[0m"
        );
        assert!(colorize_lines(b"", Color::Blue).is_empty());
    }

    #[test]
    fn level_bands() {
        let colors = LevelColor::default();
        assert_eq!(colors.color(Level::Debug), Color::Blue);
        assert_eq!(colors.color(Level::Info), Color::Green);
        assert_eq!(colors.color(Level::Warn), Color::Yellow);
        assert_eq!(colors.color(Level::Error), Color::Red);
    }

    #[test]
    fn multiline_event_is_colored_per_line() {
        let text = TextLayout::default()
            .timezone(TimeZone::UTC)
            .unescape_multiline(true);
        let layout = ColoredTextLayout::new(text);
        let record = Record::builder()
            .time(SystemTime::UNIX_EPOCH + Duration::from_secs(1_761_240_568))
            .level(Level::Error)
            .message("boom")
            .key_values(vec![(Key::new("trace"), Value::from("a\nb"))])
            .build();

        let out = String::from_utf8(layout.format(&record, &Scope::default()).unwrap()).unwrap();
        assert_eq!(
            out,
            "\x1b[31mtime=2025-10-23T17:29:28Z level=ERROR msg=boom trace=a\x1b[0m\n\x1b[31mb\x1b[0m\n"
        );
    }
}
