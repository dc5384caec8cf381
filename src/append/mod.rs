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

//! Output streams for formatted log events.

use std::fmt;

use crate::Error;

mod stdio;
mod testing;

pub use self::stdio::Stdout;
pub use self::stdio::SyncWriter;
pub use self::testing::Testing;

/// A destination for formatted log events.
///
/// Each call to [`Append::append`] carries one complete event. Implementations must write it
/// as a unit, so that events from concurrent callers never interleave.
pub trait Append: fmt::Debug + Send + Sync + 'static {
    /// Writes one formatted event.
    fn append(&self, bytes: &[u8]) -> Result<(), Error>;

    /// Flushes any buffered output.
    fn flush(&self) -> Result<(), Error> {
        Ok(())
    }
}

impl<T: Append> From<T> for Box<dyn Append> {
    fn from(value: T) -> Self {
        Box::new(value)
    }
}
