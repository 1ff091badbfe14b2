//! Environment variable overrides
//!
//! The process environment is global: every read-modify-write goes through
//! `ENV_LOCK` so that two scenarios on different threads can't interleave a
//! snapshot with a write.

use std::env;
use std::ffi::{OsStr, OsString};

use parking_lot::{const_mutex, Mutex};

static ENV_LOCK: Mutex<()> = const_mutex(());

/// Snapshot of one variable taken before it was overridden
#[derive(Debug)]
pub struct EnvOverride {
    key: String,
    previous: Option<OsString>,
}

impl EnvOverride {
    /// Remember the current value of `key`, then set it to `value`
    pub fn apply(key: &str, value: impl AsRef<OsStr>) -> Self {
        let _guard = ENV_LOCK.lock();
        let previous = env::var_os(key);
        env::set_var(key, value);
        Self {
            key: key.to_string(),
            previous,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Value the variable had before the override, if it was set
    pub fn previous(&self) -> Option<&OsStr> {
        self.previous.as_deref()
    }

    /// Put the variable back the way it was, unsetting it if it was absent
    pub fn restore(self) {
        let _guard = ENV_LOCK.lock();
        match &self.previous {
            Some(value) => env::set_var(&self.key, value),
            None => env::remove_var(&self.key),
        }
    }
}
