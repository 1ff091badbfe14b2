//! DemoStore implementation
//!
//! HashMap-based present-set with bracketed rendering.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// In-memory set of present keys
///
/// Every stored value is `true`; absence of a key means "not present".
#[derive(Debug, Default, Clone)]
pub struct DemoStore {
    state: HashMap<String, bool>,
}

impl DemoStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a key as present. Adding an existing key has no further effect.
    pub fn add(&mut self, key: impl Into<String>) {
        self.state.insert(key.into(), true);
    }

    /// Remove a key if present. Removing an absent key is a no-op.
    pub fn remove(&mut self, key: &str) {
        self.state.remove(key);
    }

    /// Whether the key is present
    pub fn contains(&self, key: &str) -> bool {
        self.state.contains_key(key)
    }

    /// Number of present keys
    pub fn len(&self) -> usize {
        self.state.len()
    }

    /// Whether no key is present
    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    /// The present set, ordered for comparison
    pub fn keys(&self) -> BTreeSet<String> {
        self.state.keys().cloned().collect()
    }

    /// Render present keys as `[a b c]`
    ///
    /// Key order follows the map's iteration order and is unspecified:
    /// two renders of the same content may differ between runs.
    pub fn render(&self) -> String {
        bracketed(self.state.keys().map(String::as_str))
    }

    /// Render present keys as `[a b c]`, sorted
    pub fn render_sorted(&self) -> String {
        let mut keys: Vec<&str> = self.state.keys().map(String::as_str).collect();
        keys.sort_unstable();
        bracketed(keys)
    }
}

impl fmt::Display for DemoStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

fn bracketed<'a>(keys: impl IntoIterator<Item = &'a str>) -> String {
    let mut out = String::from("[");
    for (i, key) in keys.into_iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(key);
    }
    out.push(']');
    out
}
