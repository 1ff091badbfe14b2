//! Owning scope over a DemoStore
//!
//! Pairs every addition with its removal so callers don't have to register
//! the undo by hand.

use super::DemoStore;

/// Borrows a store and removes the keys it introduced, newest first, on drop
pub struct StoreScope<'a> {
    store: &'a mut DemoStore,
    added: Vec<String>,
}

impl<'a> StoreScope<'a> {
    pub fn new(store: &'a mut DemoStore) -> Self {
        Self {
            store,
            added: Vec::new(),
        }
    }

    /// Add a key and record it for removal
    ///
    /// Only keys this scope made present are recorded, so a key that was
    /// already in the store, or was added twice, survives or is removed once.
    pub fn add(&mut self, key: impl Into<String>) {
        let key = key.into();
        if self.store.contains(&key) {
            return;
        }
        self.store.add(key.clone());
        self.added.push(key);
    }

    /// Keys this scope made present, in addition order
    pub fn added(&self) -> &[String] {
        &self.added
    }

    /// Read access to the underlying store
    pub fn store(&self) -> &DemoStore {
        &*self.store
    }
}

impl Drop for StoreScope<'_> {
    fn drop(&mut self) {
        while let Some(key) = self.added.pop() {
            tracing::trace!(key = %key, "scope releasing key");
            self.store.remove(&key);
        }
    }
}
