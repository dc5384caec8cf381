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

//! The configuration surface applied once at startup.

use serde::Deserialize;

use crate::Level;
use crate::Logger;
use crate::append::Append;
use crate::append::Stdout;
use crate::handler::Handler;
use crate::layout::ColoredTextLayout;
use crate::layout::JsonLayout;
use crate::layout::Layout;
use crate::layout::TextLayout;

/// Logger configuration.
///
/// `Config` deserializes from any serde source; missing fields keep their defaults.
///
/// # Examples
///
/// ```
/// use logweave::Config;
///
/// let config = Config::default().level("debug").json(false).colorize_line(true);
/// let logger = config.build();
/// logweave::debug!(logger, "ready");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// The lowest level written, by name. Unknown names mean `info`.
    pub level: String,
    /// Write JSON lines instead of text.
    pub json: bool,
    /// Attach the call site to every event.
    pub add_caller: bool,
    /// Reserved; has no effect.
    pub disable_stacktrace: bool,
    /// Color every text line by level. Ignored for JSON.
    pub colorize_line: bool,
    /// Expand escaped newlines in quoted text values. Ignored for JSON.
    pub unescape_multiline: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            level: "info".to_string(),
            json: true,
            add_caller: false,
            disable_stacktrace: false,
            colorize_line: false,
            unescape_multiline: false,
        }
    }
}

impl Config {
    /// Set [`level`](Config::level).
    pub fn level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Set [`json`](Config::json).
    pub fn json(mut self, yes: bool) -> Self {
        self.json = yes;
        self
    }

    /// Set [`add_caller`](Config::add_caller).
    pub fn add_caller(mut self, yes: bool) -> Self {
        self.add_caller = yes;
        self
    }

    /// Set [`disable_stacktrace`](Config::disable_stacktrace).
    pub fn disable_stacktrace(mut self, yes: bool) -> Self {
        self.disable_stacktrace = yes;
        self
    }

    /// Set [`colorize_line`](Config::colorize_line).
    pub fn colorize_line(mut self, yes: bool) -> Self {
        self.colorize_line = yes;
        self
    }

    /// Set [`unescape_multiline`](Config::unescape_multiline).
    pub fn unescape_multiline(mut self, yes: bool) -> Self {
        self.unescape_multiline = yes;
        self
    }

    /// The threshold named by [`level`](Config::level).
    pub fn threshold(&self) -> Level {
        Level::from_name(&self.level)
    }

    /// The layout selected by this configuration.
    pub fn layout(&self) -> Box<dyn Layout> {
        if self.json {
            return JsonLayout::default().into();
        }

        let text = TextLayout::default().unescape_multiline(self.unescape_multiline);
        if self.colorize_line {
            ColoredTextLayout::new(text).into()
        } else {
            text.into()
        }
    }

    /// Build a logger writing to standard output.
    pub fn build(&self) -> Logger {
        self.build_with(Stdout::default())
    }

    /// Build a logger writing to `append`.
    pub fn build_with(&self, append: impl Into<Box<dyn Append>>) -> Logger {
        let handler = Handler::new(self.threshold(), self.layout(), append);
        Logger::new(handler).add_caller(self.add_caller)
    }
}
