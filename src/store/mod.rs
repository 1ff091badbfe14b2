//! Store Module
//!
//! A tiny in-memory key-existence store, used as a prop to make cleanup
//! ordering visible in scenario logs.
//!
//! ## Responsibilities
//! - Track the set of currently present keys
//! - Render the present set as a bracketed list for logging
//! - Offer an owning scope that undoes its additions in reverse order
//!
//! ## Data Structure Choice
//! `HashMap<String, bool>`:
//! - `HashMap::new()` does not allocate, so a default store is usable
//!   before any explicit setup
//! - Iteration order is unspecified, and so is `render()` order
//! - No locking: one store per scenario, never shared across threads

mod demo;
mod scope;

pub use demo::DemoStore;
pub use scope::StoreScope;
