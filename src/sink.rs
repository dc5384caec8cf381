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

//! Adapter to verbosity-based log sinks.
//!
//! Controller frameworks commonly log through a small sink contract: a verbosity integer
//! instead of a level, a free-form key/value list, and hierarchical names. [`LogSink`] is that
//! contract, and [`LoggerSink`] implements it on top of a [`Logger`].

use std::error::Error as StdError;

use crate::Level;
use crate::Logger;
use crate::autoformat::normalize_kvs;
use crate::kv::Key;
use crate::kv::Value;

/// The key the error passed to [`LogSink::error`] is recorded under.
pub const ERROR_KEY: &str = "err";

/// Information about the framework's call stack, handed over once by [`LogSink::init`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuntimeInfo {
    /// The number of framework frames between the application and the sink.
    pub call_depth: usize,
}

/// A verbosity-based log sink.
///
/// Verbosity `0` is normal output; larger values are increasingly verbose.
pub trait LogSink: Send + Sync {
    /// Receives runtime information before the first use.
    fn init(&mut self, info: RuntimeInfo);

    /// Whether messages at `verbosity` are written.
    fn enabled(&self, verbosity: usize) -> bool;

    /// Log a non-error message with the flat `key, value, ...` list `kvs`.
    #[track_caller]
    fn info(&self, verbosity: usize, msg: &str, kvs: &[Value]);

    /// Log an error message, recording `err` under [`ERROR_KEY`] after `kvs`.
    #[track_caller]
    fn error(&self, err: Option<&(dyn StdError + 'static)>, msg: &str, kvs: &[Value]);

    /// A new sink adding `kvs` to every message.
    fn with_values(&self, kvs: &[Value]) -> Box<dyn LogSink>;

    /// A new sink whose name is this sink's name with `name` appended, joined by `/`.
    fn with_name(&self, name: &str) -> Box<dyn LogSink>;
}

/// A [`LogSink`] writing through a [`Logger`].
///
/// The accumulated name is applied as a group, and the accumulated values as attributes
/// inside that group.
///
/// # Examples
///
/// ```
/// use logweave::Config;
/// use logweave::append::Testing;
/// use logweave::kv::Value;
/// use logweave::sink::LogSink;
///
/// let capture = Testing::default();
/// let logger = Config::default().json(false).build_with(capture.clone());
///
/// let sink = logger.sink().with_name("controller").with_name("pods");
/// sink.info(0, "reconciled", &[Value::from("pod"), Value::from("web-0")]);
/// assert!(capture.contents().contains("msg=reconciled controller/pods.pod=web-0"));
/// ```
#[derive(Debug, Clone)]
pub struct LoggerSink {
    logger: Logger,
    name: String,
    kvs: Vec<Value>,
}

impl LoggerSink {
    /// Wraps `logger` with no name and no values.
    pub fn new(logger: Logger) -> Self {
        LoggerSink {
            logger,
            name: String::new(),
            kvs: vec![],
        }
    }

    /// The accumulated name.
    pub fn name(&self) -> &str {
        &self.name
    }

    fn scoped(&self) -> Logger {
        self.logger
            .with_group(&self.name)
            .with(self.kvs.iter().cloned())
    }
}

impl LogSink for LoggerSink {
    fn init(&mut self, _: RuntimeInfo) {}

    fn enabled(&self, verbosity: usize) -> bool {
        self.logger.enabled(Level::from_verbosity(verbosity))
    }

    #[track_caller]
    fn info(&self, verbosity: usize, msg: &str, kvs: &[Value]) {
        let level = Level::from_verbosity(verbosity);
        if !self.logger.enabled(level) {
            return;
        }
        self.scoped().log(level, msg.to_string(), kvs.to_vec());
    }

    #[track_caller]
    fn error(&self, err: Option<&(dyn StdError + 'static)>, msg: &str, kvs: &[Value]) {
        if !self.logger.enabled(Level::Error) {
            return;
        }
        self.scoped().log_pairs(Level::Error, msg.to_string(), || {
            let mut pairs = normalize_kvs(kvs.iter().cloned());
            pairs.push((Key::new(ERROR_KEY), err.map_or(Value::Null, Value::error)));
            pairs
        });
    }

    fn with_values(&self, kvs: &[Value]) -> Box<dyn LogSink> {
        let mut sink = self.clone();
        sink.kvs.extend_from_slice(kvs);
        Box::new(sink)
    }

    fn with_name(&self, name: &str) -> Box<dyn LogSink> {
        let mut sink = self.clone();
        if !sink.name.is_empty() {
            sink.name.push('/');
        }
        sink.name.push_str(name);
        Box::new(sink)
    }
}
