//! Failure records and source locations
//!
//! `fatal` unwinds with a private marker payload; everything that needs to
//! be reported has already been recorded on the scenario by then.

use std::any::Any;
use std::fmt;
use std::panic::Location;

/// A source position a log line or failure is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub file: &'static str,
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    /// Location of the caller, honouring `#[track_caller]` frames
    #[track_caller]
    pub fn caller() -> Self {
        Self::from(Location::caller())
    }

    /// File name without its directories
    pub fn file_name(&self) -> &'static str {
        self.file
            .rsplit(|c: char| c == '/' || c == '\\')
            .next()
            .unwrap_or(self.file)
    }
}

impl From<&'static Location<'static>> for SourceLocation {
    fn from(location: &'static Location<'static>) -> Self {
        Self {
            file: location.file(),
            line: location.line(),
            column: location.column(),
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file_name(), self.line)
    }
}

/// A recorded scenario failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub message: String,

    /// `None` for panics raised outside the scenario API (e.g. `assert!`)
    pub location: Option<SourceLocation>,
}

impl Failure {
    pub fn at(message: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            message: message.into(),
            location: Some(location),
        }
    }

    pub fn unlocated(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            location: None,
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(location) => write!(f, "{}: {}", location, self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Unwind payload used by `Scenario::fatal`
pub(crate) struct FatalSignal;

/// Turn a caught unwind payload into a failure, unless it came from `fatal`
pub(crate) fn from_panic(payload: Box<dyn Any + Send>) -> Option<Failure> {
    if payload.is::<FatalSignal>() {
        return None;
    }

    let message = if let Some(s) = payload.downcast_ref::<&'static str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic with non-string payload".to_string()
    };

    Some(Failure::unlocated(format!("panic: {}", message)))
}
