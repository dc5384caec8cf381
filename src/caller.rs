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

//! Caller attribution.
//!
//! Every public logging entry point of this crate is `#[track_caller]`, so the location the
//! compiler hands over is already the first frame outside the crate, however many wrapper
//! frames sit in between. A [`CallerResolver`] decides what to make of that location.

use std::borrow::Cow;
use std::fmt;
use std::panic::Location;

/// A resolved program location.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Caller {
    file: Cow<'static, str>,
    line: u32,
}

impl Caller {
    /// Create a caller from a file path and a line number.
    pub fn new(file: impl Into<Cow<'static, str>>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }

    /// The full source file path.
    pub fn file(&self) -> &str {
        &self.file
    }

    /// The line number.
    pub fn line(&self) -> u32 {
        self.line
    }
}

/// Renders as `<last two path segments>:<line>`.
impl fmt::Display for Caller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", shorten_path(&self.file), self.line)
    }
}

impl From<&'static Location<'static>> for Caller {
    fn from(location: &'static Location<'static>) -> Self {
        Caller::new(location.file(), location.line())
    }
}

/// Reduce a path to its last two segments, e.g. `src/bin/server.rs` to `bin/server.rs`.
///
/// Backslashes are treated as separators.
pub fn shorten_path(path: &str) -> Cow<'_, str> {
    if path.is_empty() {
        return Cow::Borrowed(path);
    }

    let path = if path.contains('\\') {
        Cow::Owned(path.replace('\\', "/"))
    } else {
        Cow::Borrowed(path)
    };

    let cut = {
        let mut separators = path.rmatch_indices('/');
        let _ = separators.next();
        separators.next().map(|(idx, _)| idx)
    };
    match cut {
        Some(idx) => Cow::Owned(path[idx + 1..].to_string()),
        None => path,
    }
}

/// Turns the call site of a logging call into an optional [`Caller`].
///
/// Resolution must never fail the logging call; returning `None` simply omits the caller
/// attribute.
pub trait CallerResolver: fmt::Debug + Send + Sync + 'static {
    /// Resolve the caller for a logging call made at `site`.
    fn resolve(&self, site: &'static Location<'static>) -> Option<Caller>;
}

/// The default resolver: reports the call site tracked by the compiler.
#[derive(Debug, Default, Clone, Copy)]
#[non_exhaustive]
pub struct TrackedCaller {}

impl CallerResolver for TrackedCaller {
    fn resolve(&self, site: &'static Location<'static>) -> Option<Caller> {
        if site.file().is_empty() {
            None
        } else {
            Some(Caller::from(site))
        }
    }
}

/// A resolver that never resolves anything.
#[derive(Debug, Default, Clone, Copy)]
#[non_exhaustive]
pub struct NoCaller {}

impl CallerResolver for NoCaller {
    fn resolve(&self, _: &'static Location<'static>) -> Option<Caller> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shorten_keeps_last_two_segments() {
        assert_eq!(shorten_path("/home/dev/project/src/main.rs"), "src/main.rs");
        assert_eq!(shorten_path("src/main.rs"), "src/main.rs");
        assert_eq!(shorten_path("main.rs"), "main.rs");
        assert_eq!(shorten_path(""), "");
        assert_eq!(shorten_path(r"C:\work\crate\src\lib.rs"), "src/lib.rs");
    }

    #[test]
    fn tracked_caller_points_here() {
        let site = Location::caller();
        let caller = TrackedCaller::default().resolve(site).unwrap();
        assert!(caller.file().ends_with("caller.rs"));
        assert_eq!(caller.to_string(), format!("src/caller.rs:{}", site.line()));
    }

    #[test]
    fn no_caller_resolves_nothing() {
        assert_eq!(NoCaller::default().resolve(Location::caller()), None);
    }
}
