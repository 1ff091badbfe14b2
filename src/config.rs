//! Configuration for scopekit
//!
//! Centralized configuration with sensible defaults.

use std::str::FromStr;
use std::time::Duration;

use crate::error::{Result, ShowcaseError};

/// Main configuration for a showcase run
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Scheduling Configuration
    // -------------------------------------------------------------------------
    /// How long each case of the parallel section sleeps
    pub case_delay: Duration,

    // -------------------------------------------------------------------------
    // Content Configuration
    // -------------------------------------------------------------------------
    /// Run the scenarios that fail on purpose (helper attribution demos)
    pub include_failing: bool,

    /// Render store contents sorted instead of in map order
    pub sorted_render: bool,

    /// Sections to run. Empty means all of them.
    pub sections: Vec<Section>,

    // -------------------------------------------------------------------------
    // Environment Configuration
    // -------------------------------------------------------------------------
    /// Variable overridden by the set_env section
    pub env_key: String,

    /// Value written by the set_env section
    pub env_value: String,
}

/// Top-level sections of the showcase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    TempDir,
    SetEnv,
    Parallel,
    Helper,
    Cleanup,
}

impl Section {
    /// All sections in the order the showcase runs them
    pub const ALL: [Section; 5] = [
        Section::TempDir,
        Section::SetEnv,
        Section::Parallel,
        Section::Helper,
        Section::Cleanup,
    ];

    /// Scenario name used for this section
    pub fn name(self) -> &'static str {
        match self {
            Section::TempDir => "temp_dir",
            Section::SetEnv => "set_env",
            Section::Parallel => "parallel",
            Section::Helper => "helper",
            Section::Cleanup => "cleanup",
        }
    }
}

impl FromStr for Section {
    type Err = ShowcaseError;

    fn from_str(s: &str) -> Result<Self> {
        Section::ALL
            .into_iter()
            .find(|section| section.name() == s)
            .ok_or_else(|| ShowcaseError::Config(format!("unknown section: {}", s)))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            case_delay: Duration::from_secs(1),
            include_failing: true,
            sorted_render: false,
            sections: Vec::new(),
            env_key: "THREEVE".to_string(),
            env_value: "$TEXAS".to_string(),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Whether the given section is selected
    pub fn runs(&self, section: Section) -> bool {
        self.sections.is_empty() || self.sections.contains(&section)
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the per-case delay of the parallel section
    pub fn case_delay(mut self, delay: Duration) -> Self {
        self.config.case_delay = delay;
        self
    }

    /// Include or skip the scenarios that fail on purpose
    pub fn include_failing(mut self, include: bool) -> Self {
        self.config.include_failing = include;
        self
    }

    /// Render store contents sorted
    pub fn sorted_render(mut self, sorted: bool) -> Self {
        self.config.sorted_render = sorted;
        self
    }

    /// Restrict the run to one more section (may be called repeatedly)
    pub fn section(mut self, section: Section) -> Self {
        if !self.config.sections.contains(&section) {
            self.config.sections.push(section);
        }
        self
    }

    /// Set the variable overridden by the set_env section
    pub fn env_key(mut self, key: impl Into<String>) -> Self {
        self.config.env_key = key.into();
        self
    }

    /// Set the value written by the set_env section
    pub fn env_value(mut self, value: impl Into<String>) -> Self {
        self.config.env_value = value.into();
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
