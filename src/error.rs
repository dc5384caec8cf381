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

use std::fmt;
use std::io;

/// A failure while formatting or writing a log event.
///
/// Errors only travel between the internal stages of the pipeline (layout, append, handler).
/// The [`Logger`](crate::Logger) facade never hands them to the application; they end up in a
/// [`Trap`](crate::trap::Trap) instead.
///
/// The rendered form is the message, then the cause, then any context:
///
/// ```text
/// failed to write log event: broken pipe (level=ERROR)
/// ```
pub struct Error {
    message: String,
    source: Option<anyhow::Error>,
    context: Vec<(&'static str, String)>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }
        for (i, (k, v)) in self.context.iter().enumerate() {
            let open = if i == 0 { " (" } else { ", " };
            write!(f, "{open}{k}={v}")?;
        }
        if !self.context.is_empty() {
            f.write_str(")")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Error")
            .field("message", &self.message)
            .field("source", &self.source)
            .field("context", &self.context)
            .finish()
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|v| v.as_ref())
    }
}

impl Error {
    /// Create a new Error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
            context: vec![],
        }
    }

    /// Attach a piece of context, such as the level of the event that failed.
    pub fn with_context(mut self, key: &'static str, value: impl ToString) -> Self {
        self.context.push((key, value.to_string()));
        self
    }

    /// Set the underlying cause.
    pub fn with_source(mut self, src: impl Into<anyhow::Error>) -> Self {
        self.source = Some(src.into());
        self
    }

    pub(crate) fn from_io_error(err: io::Error) -> Error {
        Error::new("failed to write log event").with_source(err)
    }

    pub(crate) fn from_fmt_error(err: fmt::Error) -> Error {
        Error::new("failed to format log event").with_source(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_cause_and_context() {
        let err = Error::from_io_error(io::Error::new(io::ErrorKind::BrokenPipe, "broken pipe"))
            .with_context("level", "ERROR")
            .with_context("bytes", 42);

        assert_eq!(
            err.to_string(),
            "failed to write log event: broken pipe (level=ERROR, bytes=42)"
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn plain_message() {
        let err = Error::new("stream closed");
        assert_eq!(err.to_string(), "stream closed");
        assert!(std::error::Error::source(&err).is_none());
    }
}
