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

//! Layouts for formatting log records.

use std::fmt;
use std::time::SystemTime;

use jiff::Timestamp;
use jiff::tz::Offset;
use jiff::tz::TimeZone;

use crate::Error;
use crate::record::Record;
use crate::scope::Scope;

mod colored;
mod json;
mod text;

pub use self::colored::ColoredTextLayout;
pub use self::colored::LevelColor;
pub use self::json::JsonLayout;
pub use self::text::TextLayout;

/// A layout for formatting log records.
///
/// The returned bytes are one complete event, including the trailing line terminator.
pub trait Layout: fmt::Debug + Send + Sync + 'static {
    /// Formats a log record together with the context inherited by the handler.
    fn format(&self, record: &Record, scope: &Scope) -> Result<Vec<u8>, Error>;
}

impl<T: Layout> From<T> for Box<dyn Layout> {
    fn from(value: T) -> Self {
        Box::new(value)
    }
}

/// RFC 3339 with second precision, `Z` for UTC.
pub(crate) fn format_timestamp(now: SystemTime, tz: &TimeZone) -> Result<String, Error> {
    let ts = Timestamp::try_from(now)
        .map_err(|err| Error::new("failed to convert timestamp").with_source(err))?;
    let format = if tz.to_offset(ts) == Offset::UTC {
        "%Y-%m-%dT%H:%M:%SZ"
    } else {
        "%Y-%m-%dT%H:%M:%S%:z"
    };
    Ok(ts.to_zoned(tz.clone()).strftime(format).to_string())
}
