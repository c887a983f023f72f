use std::env;
use std::str::FromStr;
use std::time::Duration;

use failure::{format_err, Error};
use log::warn;

/// What to do when a row of the `files` table cannot be inserted.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FileErrorPolicy {
    /// Log a warning and keep going.
    Ignore,
    /// Abort the batch, rolling it back.
    Propagate,
}

impl FromStr for FileErrorPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ignore" => Ok(FileErrorPolicy::Ignore),
            "propagate" => Ok(FileErrorPolicy::Propagate),
            _ => Err(format_err!("Unknown file error policy: {}", s)),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Options {
    pub file_errors: FileErrorPolicy,
    /// How long SQLite waits on a locked database before giving up.
    pub busy_timeout: Option<Duration>,
    /// Check tables and `db_info` when opening an existing database.
    pub validate_on_open: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            file_errors: FileErrorPolicy::Propagate,
            busy_timeout: None,
            validate_on_open: true,
        }
    }
}

fn env_value<T: FromStr>(key: &str) -> Option<T> {
    let value = env::var(key).ok()?;
    match value.parse() {
        Ok(t) => Some(t),
        Err(_) => {
            warn!("Ignoring malformed {}={}", key, value);
            None
        }
    }
}

impl Options {
    /// Defaults overridden by `PRIMARY_DB_FILE_ERRORS`,
    /// `PRIMARY_DB_BUSY_TIMEOUT_MS` and `PRIMARY_DB_VALIDATE`.
    pub fn from_env() -> Options {
        let mut options = Options::default();
        if let Some(policy) = env_value("PRIMARY_DB_FILE_ERRORS") {
            options.file_errors = policy;
        }
        if let Some(ms) = env_value::<u64>("PRIMARY_DB_BUSY_TIMEOUT_MS") {
            options.busy_timeout = Some(Duration::from_millis(ms));
        }
        if let Some(validate) = env_value("PRIMARY_DB_VALIDATE") {
            options.validate_on_open = validate;
        }
        options
    }
}
