//! # scopekit
//!
//! A showcase of scoped test helpers:
//! - Scenario-scoped temporary directories
//! - Environment overrides restored at scenario end
//! - Sequential and parallel child scenarios
//! - Caller attribution for helpers via `#[track_caller]`
//! - Deferred cleanups that run last-in, first-out
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Showcase (CLI / tests)                   │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                       Scenario                               │
//! │     (cleanup stack, logs, failures, nested children)         │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │  tempfile / │          │  DemoStore  │
//!   │  env vars   │          │ (key set)   │
//!   └─────────────┘          └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod store;
pub mod scenario;
pub mod showcase;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{ShowcaseError, Result};
pub use config::{Config, Section};
pub use scenario::{Outcome, Scenario};
pub use store::{DemoStore, StoreScope};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of scopekit
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
