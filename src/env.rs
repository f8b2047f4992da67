//! Injected environment-variable access.
//!
//! Library code never reads `std::env` directly; callers pass either the
//! live process environment or a detached snapshot, so tests can substitute
//! values without mutating process state.

use std::collections::HashMap;

/// Read access to environment variables.
pub trait Environment {
    /// Value of `key`, or `None` when unset.
    fn var(&self, key: &str) -> Option<String>;
}

/// Live process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Fixed set of variables, detached from the process.
#[derive(Debug, Clone, Default)]
pub struct SnapshotEnv {
    vars: HashMap<String, String>,
}

impl SnapshotEnv {
    /// Empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current process environment.
    pub fn from_process() -> Self {
        Self { vars: std::env::vars().collect() }
    }

    /// Add or replace a variable, builder style.
    pub fn with<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }
}

impl Environment for SnapshotEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}
