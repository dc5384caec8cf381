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

//! Severity levels and the mappings into them.

use std::fmt;
use std::str::FromStr;

use crate::Error;

/// An enum representing the available severities of the logger.
///
/// Levels are ordered from the least to the most severe, so `Level::Debug < Level::Error` and a
/// threshold check reads `level >= threshold`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Designates lower priority information.
    Debug,
    /// Designates useful information.
    Info,
    /// Designates hazardous situations.
    Warn,
    /// Designates errors, and every more severe alias collapsed onto it.
    Error,
}

impl Level {
    /// Return the string representation of the `Level`.
    ///
    /// This returns the same string as the `fmt::Display` implementation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        }
    }

    /// Map a human-readable level name onto a `Level`, never failing.
    ///
    /// Matching is case-insensitive. The empty string and any unrecognized name map to
    /// [`Level::Info`].
    ///
    /// # Examples
    ///
    /// ```
    /// use logweave::Level;
    ///
    /// assert_eq!(Level::from_name("WARNING"), Level::Warn);
    /// assert_eq!(Level::from_name("fatal"), Level::Error);
    /// assert_eq!(Level::from_name("not-a-level"), Level::Info);
    /// ```
    pub fn from_name(name: &str) -> Level {
        name.parse().unwrap_or(Level::Info)
    }

    /// Map an external verbosity onto a `Level`.
    ///
    /// Verbosity `0` is normal output and maps to [`Level::Info`]; anything more verbose maps to
    /// [`Level::Debug`].
    pub fn from_verbosity(verbosity: usize) -> Level {
        if verbosity == 0 {
            Level::Info
        } else {
            Level::Debug
        }
    }

    /// The most verbose `log` crate filter that lets this level through.
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            Level::Debug => log::LevelFilter::Debug,
            Level::Info => log::LevelFilter::Info,
            Level::Warn => log::LevelFilter::Warn,
            Level::Error => log::LevelFilter::Error,
        }
    }
}

impl fmt::Debug for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl From<log::Level> for Level {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Level::Error,
            log::Level::Warn => Level::Warn,
            log::Level::Info => Level::Info,
            log::Level::Debug | log::Level::Trace => Level::Debug,
        }
    }
}

impl FromStr for Level {
    type Err = Error;

    /// Strict parsing: unknown names are an error. See [`Level::from_name`] for the lenient form.
    fn from_str(s: &str) -> Result<Level, Self::Err> {
        for (name, level) in [
            ("debug", Level::Debug),
            ("info", Level::Info),
            ("warn", Level::Warn),
            ("warning", Level::Warn),
            ("error", Level::Error),
            ("dpanic", Level::Error),
            ("panic", Level::Error),
            ("fatal", Level::Error),
        ] {
            if s.eq_ignore_ascii_case(name) {
                return Ok(level);
            }
        }

        Err(Error::new(format!("malformed level: {s:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_map_case_insensitively() {
        assert_eq!(Level::from_name("debug"), Level::Debug);
        assert_eq!(Level::from_name("INFO"), Level::Info);
        assert_eq!(Level::from_name("WARNING"), Level::from_name("warn"));
        assert_eq!(Level::from_name("Error"), Level::Error);
    }

    #[test]
    fn severe_aliases_collapse_onto_error() {
        for name in ["dpanic", "panic", "fatal", "PANIC"] {
            assert_eq!(Level::from_name(name), Level::Error, "{name}");
        }
    }

    #[test]
    fn unknown_and_empty_default_to_info() {
        assert_eq!(Level::from_name(""), Level::Info);
        assert_eq!(Level::from_name("not-a-level"), Level::from_name("info"));
        assert!("not-a-level".parse::<Level>().is_err());
    }

    #[test]
    fn verbosity_mapping() {
        assert_eq!(Level::from_verbosity(0), Level::Info);
        assert_eq!(Level::from_verbosity(1), Level::Debug);
        assert_eq!(Level::from_verbosity(7), Level::Debug);
    }

    #[test]
    fn levels_are_ordered_by_severity() {
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Warn);
        assert!(Level::Warn < Level::Error);
        assert_eq!(format!("{:>5}", Level::Info), " INFO");
    }

    #[test]
    fn log_crate_levels() {
        assert_eq!(Level::from(log::Level::Trace), Level::Debug);
        assert_eq!(Level::from(log::Level::Warn), Level::Warn);
        assert_eq!(Level::Warn.to_level_filter(), log::LevelFilter::Warn);
    }
}
