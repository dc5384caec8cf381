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

use std::borrow::Cow;
use std::sync::OnceLock;
use std::sync::PoisonError;
use std::sync::RwLock;

use crate::Error;
use crate::Level;
use crate::Logger;
use crate::caller::Caller;
use crate::kv::Value;

struct LogCrateLogger {
    current: RwLock<Option<Logger>>,
}

static LOGGER: LogCrateLogger = LogCrateLogger {
    current: RwLock::new(None),
};

static INSTALLED: OnceLock<bool> = OnceLock::new();

impl LogCrateLogger {
    fn current(&self) -> Option<Logger> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn replace(&self, logger: Logger) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(logger);
    }
}

impl log::Log for LogCrateLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        match self.current() {
            Some(logger) => logger.enabled(metadata.level().into()),
            None => false,
        }
    }

    fn log(&self, record: &log::Record) {
        let Some(logger) = self.current() else {
            return;
        };
        let level = Level::from(record.level());
        if !logger.enabled(level) {
            return;
        }

        let file = match record.file_static() {
            Some(file) => Some(Cow::Borrowed(file)),
            None => record.file().map(|file| Cow::Owned(file.to_string())),
        };
        let caller = file.map(|file| Caller::new(file, record.line().unwrap_or_default()));

        let message = match record.args().as_str() {
            Some(message) => Cow::Borrowed(message),
            None => Cow::Owned(record.args().to_string()),
        };

        let mut visitor = KvCollector { kvs: Vec::new() };
        // the collector never fails
        let _ = record.key_values().visit(&mut visitor);

        logger.log_with_caller(level, caller, message, visitor.kvs);
    }

    fn flush(&self) {
        if let Some(logger) = self.current() {
            logger.flush();
        }
    }
}

struct KvCollector {
    kvs: Vec<Value>,
}

impl<'kvs> log::kv::VisitSource<'kvs> for KvCollector {
    fn visit_pair(
        &mut self,
        key: log::kv::Key<'kvs>,
        value: log::kv::Value<'kvs>,
    ) -> Result<(), log::kv::Error> {
        self.kvs.push(Value::from(key.as_str()));
        self.kvs.push(convert_value(&value));
        Ok(())
    }
}

fn convert_value(value: &log::kv::Value) -> Value {
    if let Some(b) = value.to_bool() {
        Value::Bool(b)
    } else if let Some(i) = value.to_i64() {
        Value::Int(i)
    } else if let Some(u) = value.to_u64() {
        Value::Uint(u)
    } else if let Some(f) = value.to_f64() {
        Value::Float(f)
    } else if let Some(s) = value.to_borrowed_str() {
        Value::from(s)
    } else {
        Value::display(value)
    }
}

/// Set up the log crate global logger.
///
/// The first call installs a proxy with [`log::set_logger`], so that records from the log crate
/// are forwarded to `logger`, including their key-values and call site. Later calls replace the
/// logger records are forwarded to; handles already held by callers are not affected. Each call
/// sets the log crate's maximum level to the logger's threshold.
///
/// Write failures of forwarded records go to the logger's trap.
///
/// # Errors
///
/// Return an error if another log crate global logger was installed first.
///
/// # Examples
///
/// ```
/// use logweave::Config;
///
/// let logger = Config::default().build();
/// logweave::bridge::setup_log_crate(logger).unwrap();
/// log::info!(attempt = 1; "connected");
/// ```
pub fn setup_log_crate(logger: Logger) -> Result<(), Error> {
    let installed = *INSTALLED.get_or_init(|| log::set_logger(&LOGGER).is_ok());
    if !installed {
        return Err(Error::new(
            "failed to set up the log crate global logger: another logger is already installed",
        ));
    }

    let max_level = logger.handler().threshold().to_level_filter();
    LOGGER.replace(logger);
    log::set_max_level(max_level);
    Ok(())
}
