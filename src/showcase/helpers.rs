//! Helper functions used by the showcase scenarios
//!
//! Pairs of functions that differ only in `#[track_caller]`, so the
//! report shows where each one attributes its output.

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::Config;
use crate::scenario::Scenario;
use crate::store::DemoStore;

/// A store shared between a scenario body and its cleanups
///
/// `Rc` keeps it on the scenario's own thread.
pub type SharedStore = Rc<RefCell<DemoStore>>;

pub fn new_store() -> SharedStore {
    Rc::new(RefCell::new(DemoStore::new()))
}

// =============================================================================
// Failure Attribution
// =============================================================================

/// Fails; the report points at this function
pub fn fail_without_helper(s: &mut Scenario) {
    s.fatal("failing in fail_without_helper")
}

/// Fails; the report points at the caller
#[track_caller]
pub fn fail_with_helper(s: &mut Scenario) {
    s.fatal("failing in fail_with_helper")
}

/// Call each function in turn
///
/// Marked `#[track_caller]`, but calls through `dyn Fn` drop the caller
/// location: whatever `fns` report is attributed inside them.
#[track_caller]
pub fn dispatch(s: &mut Scenario, fns: &[&dyn Fn(&mut Scenario)]) {
    for f in fns {
        f(s);
    }
}

/// Every frame down to `fatal` is a helper, so the failure lands on the
/// line that called `bubble_outer`
#[track_caller]
pub fn bubble_outer(s: &mut Scenario) {
    bubble_middle(s)
}

#[track_caller]
fn bubble_middle(s: &mut Scenario) {
    bubble_inner(s)
}

#[track_caller]
fn bubble_inner(s: &mut Scenario) {
    s.fatal("I should bubble up error to the top")
}

// =============================================================================
// Log Attribution
// =============================================================================

pub fn log_without_helper(s: &mut Scenario) {
    s.log("logging in log_without_helper");
}

#[track_caller]
pub fn log_with_helper(s: &mut Scenario) {
    s.log("logging in log_with_helper");
}

// =============================================================================
// Store Helpers
// =============================================================================

/// Add a key and register its removal in the same breath
pub fn add(s: &mut Scenario, store: &SharedStore, key: &str) {
    store.borrow_mut().add(key);

    let store = Rc::clone(store);
    let key = key.to_string();
    s.cleanup(move |_| {
        store.borrow_mut().remove(&key);
    });
}

/// One cleanup per key; fine while data sets stay small
pub fn add_keys(s: &mut Scenario, store: &SharedStore, keys: &[&str]) {
    for key in keys {
        add(s, store, key);
    }
}

/// Register a cleanup that logs the store's final contents
///
/// Register this first: cleanups run newest first, so it runs last.
pub fn log_store_on_cleanup(s: &mut Scenario, store: &SharedStore) {
    let store = Rc::clone(store);
    s.cleanup(move |s| {
        let rendered = render(s.config(), &store.borrow());
        s.log(rendered);
    });
}

/// Render according to the configured ordering
pub fn render(config: &Config, store: &DemoStore) -> String {
    if config.sorted_render {
        store.render_sorted()
    } else {
        store.render()
    }
}
