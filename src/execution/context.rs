//! Shared Execution Context
//!
//! The string-keyed value store every step action reads and writes.
//! Values are [`serde_json::Value`], a closed tagged type that round-trips
//! exactly and serializes cleanly when the host persists a checkpoint.
//!
//! The context lives for the machine's lifetime and is never implicitly
//! cleared between runs; only [`Context::set_values`] replaces it, and only
//! with a non-empty map.

use std::collections::HashMap;

use serde_json::Value;

/// Shared key/value store mutated by every step in a machine.
#[derive(Debug, Clone, Default)]
pub struct Context {
    values: HashMap<String, Value>,
}

impl Context {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a value; absent keys yield `None`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Writes or overwrites a value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    /// Returns true iff `key` has ever been written.
    ///
    /// This is an existence check, not a truthiness check: a key holding
    /// `false`, `0`, `""` or `null` still reports true.
    pub fn is_set(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Read view of the full context.
    pub fn values(&self) -> &HashMap<String, Value> {
        &self.values
    }

    /// Replaces the context wholesale.
    ///
    /// An empty map is a no-op: existing values are preserved, so resuming
    /// without captured values leaves the current context intact.
    pub fn set_values(&mut self, values: HashMap<String, Value>) {
        if values.is_empty() {
            return;
        }
        self.values = values;
    }
}
