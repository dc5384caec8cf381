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

//! Logweave is a structured event logger: leveled, attributed events rendered as JSON lines or as
//! `key=value` text, optionally colored per level, with readable multi-line attribute values.
//!
//! # Overview
//!
//! A [`Config`] is applied once at startup and yields a [`Logger`], an explicit handle that is
//! passed to whatever needs to log. Loggers derive cheaply: [`Logger::with`] and
//! [`Logger::with_group`] return new loggers carrying extra context and never touch the parent,
//! so any number of threads may derive from and log through one logger at once.
//!
//! Every event passes through the same pipeline: threshold check, optional caller attribution,
//! attribute normalization ([`autoformat`]), a [`Layout`] rendering the bytes, and an [`Append`]
//! writing them as one unit. Failures never reach the application; they go to a
//! [`Trap`](trap::Trap).
//!
//! # Examples
//!
//! ```
//! use logweave::Config;
//! use logweave::pretty::Pretty;
//!
//! let logger = Config::default()
//!     .level("debug")
//!     .json(false)
//!     .unescape_multiline(true)
//!     .build();
//!
//! logweave::info!(logger, "listening on port ", 8080);
//! logweave::debugf!(logger, "{} workers", 4);
//!
//! let request = logger.with(logweave::kvs!("request_id", "a1b2", "spec", Pretty::text(r#"{"replicas":3}"#)));
//! logweave::warn!(request, "slow response");
//! ```
//!
//! Records from the `log` crate can be routed to the same logger:
//!
//! ```
//! let logger = logweave::setup(logweave::Config::default()).unwrap();
//! log::info!(user = "ana"; "signed in");
//! logweave::info!(logger, "direct");
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod append;
pub mod autoformat;
pub mod bridge;
pub mod caller;
pub mod handler;
pub mod kv;
pub mod layout;
pub mod logger;
pub mod pretty;
pub mod record;
pub mod scope;
pub mod sink;
pub mod trap;
pub mod unescape;

mod config;
mod error;
mod level;

pub use append::Append;
pub use config::Config;
pub use error::Error;
pub use layout::Layout;
pub use level::Level;
pub use logger::Logger;
pub use logger::Logging;

/// Build a logger writing to standard output from `config`, and route `log` crate records to
/// it.
///
/// This is the single bootstrap call of a program. Calling it again replaces the logger that
/// `log` crate records go to; loggers returned earlier keep working unchanged.
///
/// # Errors
///
/// Return an error if another `log` crate global logger was installed first.
pub fn setup(config: Config) -> Result<Logger, Error> {
    let logger = config.build();
    bridge::setup_log_crate(logger.clone())?;
    Ok(logger)
}

/// Build a flat `key, value, ...` list for [`Logger::with`] and [`Logger::log`].
///
/// # Examples
///
/// ```
/// let kvs = logweave::kvs!("user", "ana", "attempt", 2);
/// assert_eq!(kvs.len(), 4);
/// ```
#[macro_export]
macro_rules! kvs {
    ($($arg:expr),* $(,)?) => {
        {
            let kvs: ::std::vec::Vec<$crate::kv::Value> =
                ::std::vec![$($crate::kv::Value::from($arg)),*];
            kvs
        }
    };
}

/// Log the concatenation of the operands at debug level.
#[macro_export]
macro_rules! debug {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $logger.debug(&[$($crate::kv::Value::from($arg)),*])
    };
}

/// Log the concatenation of the operands at info level.
///
/// Adjacent operands are joined without a separator, except that a space goes between two
/// operands when neither is a string. See [`logger::sprint`].
///
/// # Examples
///
/// ```
/// use logweave::Config;
/// use logweave::append::Testing;
///
/// let capture = Testing::default();
/// let logger = Config::default().json(false).build_with(capture.clone());
/// logweave::info!(logger, "x", 42);
/// assert!(capture.contents().contains("level=INFO msg=x42"));
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $logger.info(&[$($crate::kv::Value::from($arg)),*])
    };
}

/// Log the concatenation of the operands at warn level.
#[macro_export]
macro_rules! warn {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $logger.warn(&[$($crate::kv::Value::from($arg)),*])
    };
}

/// Log the concatenation of the operands at error level.
#[macro_export]
macro_rules! error {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $logger.error(&[$($crate::kv::Value::from($arg)),*])
    };
}

/// Log a formatted message at debug level.
#[macro_export]
macro_rules! debugf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.debugf(::std::format_args!($($arg)+))
    };
}

/// Log a formatted message at info level.
///
/// # Examples
///
/// ```
/// let logger = logweave::Config::default().build();
/// let pods = 3;
/// logweave::infof!(logger, "scaled to {pods} pods");
/// ```
#[macro_export]
macro_rules! infof {
    ($logger:expr, $($arg:tt)+) => {
        $logger.infof(::std::format_args!($($arg)+))
    };
}

/// Log a formatted message at warn level.
#[macro_export]
macro_rules! warnf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.warnf(::std::format_args!($($arg)+))
    };
}

/// Log a formatted message at error level.
#[macro_export]
macro_rules! errorf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.errorf(::std::format_args!($($arg)+))
    };
}
