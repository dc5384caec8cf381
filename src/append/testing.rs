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

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;

use crate::Error;
use crate::append::Append;

/// An appender that captures log events in memory, for assertions in tests.
///
/// Clones share the same buffer, so keep one clone to inspect what the logger wrote.
///
/// # Examples
///
/// ```
/// use logweave::append::Append;
/// use logweave::append::Testing;
///
/// let capture = Testing::default();
/// capture.clone().append(b"hello\n").unwrap();
/// assert_eq!(capture.lines(), ["hello"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Testing {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl Testing {
    /// Everything written so far.
    pub fn contents(&self) -> String {
        let buf = self.buf.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Everything written so far, split into lines.
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    /// Discards everything written so far.
    pub fn clear(&self) {
        self.buf
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Append for Testing {
    fn append(&self, bytes: &[u8]) -> Result<(), Error> {
        let mut buf = self.buf.lock().unwrap_or_else(PoisonError::into_inner);
        buf.extend_from_slice(bytes);
        Ok(())
    }
}
