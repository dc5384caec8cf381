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
use std::io::Write;
use std::sync::Mutex;
use std::sync::PoisonError;

use crate::Error;
use crate::append::Append;

/// An appender that prints log events to stdout.
#[derive(Default, Debug)]
#[non_exhaustive]
pub struct Stdout {}

impl Append for Stdout {
    fn append(&self, bytes: &[u8]) -> Result<(), Error> {
        std::io::stdout()
            .lock()
            .write_all(bytes)
            .map_err(Error::from_io_error)
    }

    fn flush(&self) -> Result<(), Error> {
        std::io::stdout().flush().map_err(Error::from_io_error)
    }
}

/// An appender that writes log events to any [`Write`] behind a mutex.
///
/// # Examples
///
/// ```
/// use logweave::append::SyncWriter;
///
/// let appender = SyncWriter::new(std::io::sink());
/// ```
pub struct SyncWriter<W> {
    inner: Mutex<W>,
}

impl<W: Write + Send + 'static> SyncWriter<W> {
    /// Wraps `writer`.
    pub fn new(writer: W) -> Self {
        SyncWriter {
            inner: Mutex::new(writer),
        }
    }

    /// Unwraps the writer.
    pub fn into_inner(self) -> W {
        self.inner
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W> fmt::Debug for SyncWriter<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncWriter").finish_non_exhaustive()
    }
}

impl<W: Write + Send + 'static> Append for SyncWriter<W> {
    fn append(&self, bytes: &[u8]) -> Result<(), Error> {
        let mut writer = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        writer.write_all(bytes).map_err(Error::from_io_error)
    }

    fn flush(&self) -> Result<(), Error> {
        let mut writer = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        writer.flush().map_err(Error::from_io_error)
    }
}
