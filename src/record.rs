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

//! Log record.

use std::borrow::Cow;
use std::time::SystemTime;

use crate::Level;
use crate::caller::Caller;
use crate::kv::Key;
use crate::kv::Value;

/// The payload of a log event.
///
/// Records are created per call and dropped once written.
#[derive(Clone, Debug)]
pub struct Record {
    // the observed time
    now: SystemTime,

    level: Level,
    caller: Option<Caller>,

    // the payload
    message: Cow<'static, str>,

    // call-site attributes, in call order
    kvs: Vec<(Key, Value)>,
}

impl Record {
    /// The observed time.
    pub fn time(&self) -> SystemTime {
        self.now
    }

    /// The severity of the event.
    pub fn level(&self) -> Level {
        self.level
    }

    /// Where the logging call was made, when caller attribution is on.
    pub fn caller(&self) -> Option<&Caller> {
        self.caller.as_ref()
    }

    /// The message body.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The call-site key-values.
    pub fn key_values(&self) -> &[(Key, Value)] {
        &self.kvs
    }

    /// Returns a new builder.
    pub fn builder() -> RecordBuilder {
        RecordBuilder::default()
    }
}

/// Builder for [`Record`].
#[derive(Debug)]
pub struct RecordBuilder {
    record: Record,
}

impl Default for RecordBuilder {
    fn default() -> Self {
        RecordBuilder {
            record: Record {
                now: SystemTime::now(),
                level: Level::Info,
                caller: None,
                message: Cow::Borrowed(""),
                kvs: vec![],
            },
        }
    }
}

impl RecordBuilder {
    /// Set [`time`](Record::time). Defaults to the moment the builder was created.
    pub fn time(mut self, now: SystemTime) -> Self {
        self.record.now = now;
        self
    }

    /// Set [`level`](Record::level).
    pub fn level(mut self, level: Level) -> Self {
        self.record.level = level;
        self
    }

    /// Set [`caller`](Record::caller).
    pub fn caller(mut self, caller: Option<Caller>) -> Self {
        self.record.caller = caller;
        self
    }

    /// Set [`message`](Record::message).
    pub fn message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.record.message = message.into();
        self
    }

    /// Set [`key_values`](Record::key_values).
    pub fn key_values(mut self, kvs: Vec<(Key, Value)>) -> Self {
        self.record.kvs = kvs;
        self
    }

    /// Invoke the builder and return a `Record`.
    pub fn build(self) -> Record {
        self.record
    }
}
