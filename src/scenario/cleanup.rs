//! Deferred cleanup stack

use super::Scenario;

/// A deferred callback; receives the scenario it was registered on
pub type CleanupFn = Box<dyn FnOnce(&mut Scenario)>;

/// Last-in, first-out stack of cleanup callbacks
#[derive(Default)]
pub struct CleanupStack {
    entries: Vec<CleanupFn>,
}

impl CleanupStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, f: CleanupFn) {
        self.entries.push(f);
    }

    /// Most recently registered callback
    pub fn pop(&mut self) -> Option<CleanupFn> {
        self.entries.pop()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
