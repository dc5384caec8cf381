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

//! The logger facade.

use std::borrow::Cow;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

use crate::Level;
use crate::autoformat::normalize_kvs;
use crate::caller::Caller;
use crate::caller::CallerResolver;
use crate::caller::TrackedCaller;
use crate::handler::Handler;
use crate::kv::Key;
use crate::kv::Value;
use crate::record::Record;
use crate::sink::LoggerSink;
use crate::trap::DefaultTrap;
use crate::trap::Trap;

/// A cheap-to-clone logging handle.
///
/// Two call shapes are offered for each level:
///
/// - `debug`/`info`/`warn`/`error` take a list of operands concatenated into the message, see
///   [`sprint`]. The [`info!`](crate::info) family of macros builds the list.
/// - `debugf`/`infof`/`warnf`/`errorf` take pre-built format arguments, see
///   [`infof!`](crate::infof).
///
/// Key/value context is attached with [`Logger::with`], which returns a new logger and leaves
/// this one untouched. Every call formats and writes synchronously before returning; failures
/// go to the logger's [`Trap`] and never reach the caller.
///
/// # Examples
///
/// ```
/// use logweave::Config;
/// use logweave::append::Testing;
///
/// let capture = Testing::default();
/// let logger = Config::default().json(false).build_with(capture.clone());
///
/// let logger = logger.with(logweave::kvs!("request", 7));
/// logweave::info!(logger, "handled ", 3, " items");
/// assert!(capture.contents().contains("msg=\"handled 3 items\" request=7"));
/// ```
#[derive(Debug, Clone)]
pub struct Logger {
    handler: Handler,
    add_caller: bool,
    resolver: Arc<dyn CallerResolver>,
    trap: Arc<dyn Trap>,
}

impl Logger {
    /// Creates a logger writing through `handler`, without caller attribution.
    pub fn new(handler: Handler) -> Self {
        Logger {
            handler,
            add_caller: false,
            resolver: Arc::new(TrackedCaller::default()),
            trap: Arc::new(DefaultTrap::default()),
        }
    }

    /// Attach a `caller` attribute naming the call site to every event.
    pub fn add_caller(mut self, yes: bool) -> Self {
        self.add_caller = yes;
        self
    }

    /// Replace the resolver used for caller attribution.
    pub fn with_resolver(mut self, resolver: impl CallerResolver) -> Self {
        self.resolver = Arc::new(resolver);
        self
    }

    /// Replace the trap receiving logging failures.
    pub fn with_trap(mut self, trap: impl Trap) -> Self {
        self.trap = Arc::new(trap);
        self
    }

    /// The handler behind this logger.
    pub fn handler(&self) -> &Handler {
        &self.handler
    }

    /// Whether events at `level` are written.
    pub fn enabled(&self, level: Level) -> bool {
        self.handler.enabled(level)
    }

    /// A new logger adding the flat `key, value, ...` list `kvs` to every event.
    ///
    /// A list of odd length gets `<missing>` as its last value; values are auto-formatted.
    pub fn with(&self, kvs: impl IntoIterator<Item = Value>) -> Logger {
        Logger {
            handler: self.handler.with_attrs(normalize_kvs(kvs)),
            ..self.clone()
        }
    }

    /// A new logger qualifying every attribute added from now on with group `name`.
    pub fn with_group(&self, name: &str) -> Logger {
        Logger {
            handler: self.handler.with_group(name),
            ..self.clone()
        }
    }

    /// An adapter exposing this logger through the [`LogSink`](crate::sink::LogSink) contract.
    pub fn sink(&self) -> LoggerSink {
        LoggerSink::new(self.clone())
    }

    /// Log the concatenation of `args` at debug level.
    #[track_caller]
    pub fn debug(&self, args: &[Value]) {
        self.emit(Level::Debug, Location::caller(), || sprint(args), Vec::new);
    }

    /// Log the concatenation of `args` at info level.
    #[track_caller]
    pub fn info(&self, args: &[Value]) {
        self.emit(Level::Info, Location::caller(), || sprint(args), Vec::new);
    }

    /// Log the concatenation of `args` at warn level.
    #[track_caller]
    pub fn warn(&self, args: &[Value]) {
        self.emit(Level::Warn, Location::caller(), || sprint(args), Vec::new);
    }

    /// Log the concatenation of `args` at error level.
    #[track_caller]
    pub fn error(&self, args: &[Value]) {
        self.emit(Level::Error, Location::caller(), || sprint(args), Vec::new);
    }

    /// Log formatted arguments at debug level.
    #[track_caller]
    pub fn debugf(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Debug, Location::caller(), || format_message(args), Vec::new);
    }

    /// Log formatted arguments at info level.
    #[track_caller]
    pub fn infof(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Info, Location::caller(), || format_message(args), Vec::new);
    }

    /// Log formatted arguments at warn level.
    #[track_caller]
    pub fn warnf(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Warn, Location::caller(), || format_message(args), Vec::new);
    }

    /// Log formatted arguments at error level.
    #[track_caller]
    pub fn errorf(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Error, Location::caller(), || format_message(args), Vec::new);
    }

    /// Log `msg` at `level` with the flat `key, value, ...` list `kvs`.
    ///
    /// `kvs` is normalized like [`Logger::with`], and only when the level is enabled.
    #[track_caller]
    pub fn log(
        &self,
        level: Level,
        msg: impl Into<Cow<'static, str>>,
        kvs: impl IntoIterator<Item = Value>,
    ) {
        let site = Location::caller();
        self.emit(level, site, || msg.into(), || normalize_kvs(kvs));
    }

    /// Log `msg` at `level` with attributes that are already paired up and auto-formatted.
    /// `kvs` only runs when the level is enabled.
    #[track_caller]
    pub(crate) fn log_pairs(
        &self,
        level: Level,
        msg: impl Into<Cow<'static, str>>,
        kvs: impl FnOnce() -> Vec<(Key, Value)>,
    ) {
        let site = Location::caller();
        self.emit(level, site, || msg.into(), kvs);
    }

    /// Log an event whose caller was resolved elsewhere, e.g. by another logging facade.
    pub(crate) fn log_with_caller(
        &self,
        level: Level,
        caller: Option<Caller>,
        msg: impl Into<Cow<'static, str>>,
        kvs: impl IntoIterator<Item = Value>,
    ) {
        if !self.handler.enabled(level) {
            return;
        }
        let caller = if self.add_caller { caller } else { None };
        self.write(level, caller, msg.into(), normalize_kvs(kvs));
    }

    /// Flush the output stream. Failures go to the trap.
    pub fn flush(&self) {
        if let Err(err) = self.handler.flush() {
            self.trap.trap(&err);
        }
    }

    // threshold first, so disabled levels cost neither caller resolution nor formatting
    fn emit(
        &self,
        level: Level,
        site: &'static Location<'static>,
        message: impl FnOnce() -> Cow<'static, str>,
        kvs: impl FnOnce() -> Vec<(Key, Value)>,
    ) {
        if !self.handler.enabled(level) {
            return;
        }
        let caller = if self.add_caller {
            self.resolver.resolve(site)
        } else {
            None
        };
        self.write(level, caller, message(), kvs());
    }

    fn write(
        &self,
        level: Level,
        caller: Option<Caller>,
        message: Cow<'static, str>,
        kvs: Vec<(Key, Value)>,
    ) {
        let record = Record::builder()
            .level(level)
            .caller(caller)
            .message(message)
            .key_values(kvs)
            .build();
        if let Err(err) = self.handler.handle(&record) {
            self.trap.trap(&err);
        }
    }
}

/// Concatenate operands into a message.
///
/// A single space goes between two adjacent operands only when neither of them is a string.
///
/// # Examples
///
/// ```
/// use logweave::kv::Value;
/// use logweave::logger::sprint;
///
/// assert_eq!(sprint(&[Value::from("x"), Value::from(42)]), "x42");
/// assert_eq!(sprint(&[Value::from(1), Value::from(2), Value::from("a")]), "1 2a");
/// ```
pub fn sprint(args: &[Value]) -> Cow<'static, str> {
    match args {
        [] => Cow::Borrowed(""),
        [Value::Str(s)] => s.clone(),
        _ => {
            let mut message = String::new();
            for (i, arg) in args.iter().enumerate() {
                if i > 0 && !arg.is_str() && !args[i - 1].is_str() {
                    message.push(' ');
                }
                match arg {
                    Value::Str(s) => message.push_str(s),
                    other => message.push_str(&other.to_string()),
                }
            }
            Cow::Owned(message)
        }
    }
}

fn format_message(args: fmt::Arguments<'_>) -> Cow<'static, str> {
    match args.as_str() {
        Some(s) => Cow::Borrowed(s),
        None => Cow::Owned(args.to_string()),
    }
}

/// The leveled logging capability, for code that should not depend on a concrete logger.
///
/// [`Logger`] implements it; the inherent methods of the same names are preferred when the
/// concrete type is known.
pub trait Logging: fmt::Debug + Send + Sync {
    /// Log the concatenation of `args` at debug level.
    #[track_caller]
    fn debug(&self, args: &[Value]);
    /// Log the concatenation of `args` at info level.
    #[track_caller]
    fn info(&self, args: &[Value]);
    /// Log the concatenation of `args` at warn level.
    #[track_caller]
    fn warn(&self, args: &[Value]);
    /// Log the concatenation of `args` at error level.
    #[track_caller]
    fn error(&self, args: &[Value]);
    /// Log formatted arguments at debug level.
    #[track_caller]
    fn debugf(&self, args: fmt::Arguments<'_>);
    /// Log formatted arguments at info level.
    #[track_caller]
    fn infof(&self, args: fmt::Arguments<'_>);
    /// Log formatted arguments at warn level.
    #[track_caller]
    fn warnf(&self, args: fmt::Arguments<'_>);
    /// Log formatted arguments at error level.
    #[track_caller]
    fn errorf(&self, args: fmt::Arguments<'_>);
    /// A new logger adding the flat `key, value, ...` list `kvs` to every event.
    fn with(&self, kvs: Vec<Value>) -> Box<dyn Logging>;
}

impl Logging for Logger {
    #[track_caller]
    fn debug(&self, args: &[Value]) {
        Logger::debug(self, args)
    }

    #[track_caller]
    fn info(&self, args: &[Value]) {
        Logger::info(self, args)
    }

    #[track_caller]
    fn warn(&self, args: &[Value]) {
        Logger::warn(self, args)
    }

    #[track_caller]
    fn error(&self, args: &[Value]) {
        Logger::error(self, args)
    }

    #[track_caller]
    fn debugf(&self, args: fmt::Arguments<'_>) {
        Logger::debugf(self, args)
    }

    #[track_caller]
    fn infof(&self, args: fmt::Arguments<'_>) {
        Logger::infof(self, args)
    }

    #[track_caller]
    fn warnf(&self, args: fmt::Arguments<'_>) {
        Logger::warnf(self, args)
    }

    #[track_caller]
    fn errorf(&self, args: fmt::Arguments<'_>) {
        Logger::errorf(self, args)
    }

    fn with(&self, kvs: Vec<Value>) -> Box<dyn Logging> {
        Box::new(Logger::with(self, kvs))
    }
}
