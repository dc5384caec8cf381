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

//! The encoder pipeline behind a logger.

use std::sync::Arc;

use crate::Error;
use crate::Level;
use crate::append::Append;
use crate::kv::Key;
use crate::kv::Value;
use crate::layout::Layout;
use crate::record::Record;
use crate::scope::Scope;

/// A threshold, a layout, an output stream and the context accumulated through derivation.
///
/// Handlers are cheap to clone. Derived handlers share the layout and the output stream with
/// their parent, and own an extended copy of its [`Scope`].
///
/// # Examples
///
/// ```
/// use logweave::Level;
/// use logweave::append::Testing;
/// use logweave::handler::Handler;
/// use logweave::layout::TextLayout;
/// use logweave::record::Record;
///
/// let capture = Testing::default();
/// let handler = Handler::new(Level::Info, TextLayout::default(), capture.clone());
/// let record = Record::builder().message("hello").build();
/// handler.handle(&record).unwrap();
/// assert!(capture.contents().contains("msg=hello"));
/// ```
#[derive(Debug, Clone)]
pub struct Handler {
    threshold: Level,
    layout: Arc<dyn Layout>,
    append: Arc<dyn Append>,
    scope: Scope,
}

impl Handler {
    /// Creates a handler with an empty scope.
    pub fn new(
        threshold: Level,
        layout: impl Into<Box<dyn Layout>>,
        append: impl Into<Box<dyn Append>>,
    ) -> Self {
        Handler {
            threshold,
            layout: Arc::from(layout.into()),
            append: Arc::from(append.into()),
            scope: Scope::default(),
        }
    }

    /// The lowest level this handler writes.
    pub fn threshold(&self) -> Level {
        self.threshold
    }

    /// The context this handler adds to every event.
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Whether events at `level` are written.
    pub fn enabled(&self, level: Level) -> bool {
        level >= self.threshold
    }

    /// Formats `record` and writes it to the output stream as one unit.
    pub fn handle(&self, record: &Record) -> Result<(), Error> {
        let bytes = self
            .layout
            .format(record, &self.scope)
            .map_err(|err| err.with_context("level", record.level()))?;
        self.append.append(&bytes)
    }

    /// A new handler that adds `attrs` to every event, under the groups open right now.
    pub fn with_attrs(&self, attrs: impl IntoIterator<Item = (Key, Value)>) -> Handler {
        Handler {
            scope: self.scope.with_attrs(attrs),
            ..self.clone()
        }
    }

    /// A new handler that qualifies attributes added from now on with group `name`.
    pub fn with_group(&self, name: &str) -> Handler {
        Handler {
            scope: self.scope.with_group(name),
            ..self.clone()
        }
    }

    /// Flushes the output stream.
    pub fn flush(&self) -> Result<(), Error> {
        self.append.flush()
    }
}

#[cfg(test)]
mod tests {
    use jiff::tz::TimeZone;

    use super::*;
    use crate::append::Testing;
    use crate::layout::TextLayout;

    fn handler(threshold: Level) -> (Handler, Testing) {
        let capture = Testing::default();
        let layout = TextLayout::default().timezone(TimeZone::UTC);
        (Handler::new(threshold, layout, capture.clone()), capture)
    }

    #[test]
    fn threshold_is_inclusive() {
        let (handler, _) = handler(Level::Warn);
        assert!(!handler.enabled(Level::Debug));
        assert!(!handler.enabled(Level::Info));
        assert!(handler.enabled(Level::Warn));
        assert!(handler.enabled(Level::Error));
    }

    #[test]
    fn derived_handlers_share_output() {
        let (root, capture) = handler(Level::Debug);
        let child = root
            .with_group("job")
            .with_attrs([(Key::new("id"), Value::from(3))]);

        root.handle(&Record::builder().message("root").build())
            .unwrap();
        child
            .handle(&Record::builder().message("child").build())
            .unwrap();

        let lines = capture.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("msg=root"), "{}", lines[0]);
        assert!(lines[1].ends_with("msg=child job.id=3"), "{}", lines[1]);
        assert!(root.scope().attrs().is_empty());
        assert!(root.scope().groups().is_empty());
    }
}
