//! Scenario outcomes
//!
//! The finished result tree, plus a report rendering that mimics
//! `go test -v` summaries.

use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

use super::failure::{Failure, SourceLocation};
use crate::error::{Result, ShowcaseError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Passed,
    Failed,
}

/// One line logged by a scenario (failures are logged too)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub location: Option<SourceLocation>,
    pub message: String,
}

impl fmt::Display for LogLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(location) => write!(f, "{}: {}", location, self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Record of a finished scenario
#[derive(Debug, Clone)]
pub struct Outcome {
    /// Full slash-joined path, e.g. `Showcase/cleanup/isolated`
    pub name: String,
    pub status: Status,
    pub failures: Vec<Failure>,
    pub logs: Vec<LogLine>,

    /// Children in the order they finished
    pub children: Vec<Outcome>,
    pub elapsed: Duration,
}

impl Outcome {
    pub fn passed(&self) -> bool {
        self.status == Status::Passed
    }

    /// Last path segment of the name
    pub fn short_name(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }

    /// Direct child by short name
    pub fn child(&self, name: &str) -> Option<&Outcome> {
        self.children.iter().find(|c| c.short_name() == name)
    }

    /// Descendant by a path relative to this outcome, e.g. `cleanup/isolated`
    pub fn find(&self, path: &str) -> Option<&Outcome> {
        path.split('/')
            .try_fold(self, |outcome, segment| outcome.child(segment))
    }

    /// Logged messages without their locations
    pub fn messages(&self) -> Vec<&str> {
        self.logs.iter().map(|l| l.message.as_str()).collect()
    }

    /// Number of scenarios in this tree, including this one
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Outcome::count).sum::<usize>()
    }

    /// Number of failed scenarios in this tree
    pub fn failed_count(&self) -> usize {
        let own = usize::from(!self.passed());
        own + self.children.iter().map(Outcome::failed_count).sum::<usize>()
    }

    /// `Ok` when the tree passed, `Err(ShowcaseError::Scenario)` otherwise
    pub fn into_result(self) -> Result<Outcome> {
        if self.passed() {
            return Ok(self);
        }
        Err(ShowcaseError::Scenario(format!(
            "{} failed ({} of {} scenarios failed)",
            self.name,
            self.failed_count(),
            self.count()
        )))
    }

    /// Write the report to `path`, replacing any existing file
    pub fn write_report(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.to_string())?;
        Ok(())
    }

    fn write_runs(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== RUN   {}", self.name)?;
        for child in &self.children {
            child.write_runs(f)?;
        }
        Ok(())
    }

    fn write_tree(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let indent = "    ".repeat(depth);
        let verdict = match self.status {
            Status::Passed => "PASS",
            Status::Failed => "FAIL",
        };
        writeln!(
            f,
            "{}--- {}: {} ({:.2}s)",
            indent,
            verdict,
            self.name,
            self.elapsed.as_secs_f64()
        )?;
        for line in &self.logs {
            writeln!(f, "{}    {}", indent, line)?;
        }
        for child in &self.children {
            child.write_tree(f, depth + 1)?;
        }
        Ok(())
    }
}

/// `=== RUN` lines for the whole tree, then the indented summary
impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_runs(f)?;
        self.write_tree(f, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(name: &str, status: Status) -> Outcome {
        Outcome {
            name: name.to_string(),
            status,
            failures: Vec::new(),
            logs: Vec::new(),
            children: Vec::new(),
            elapsed: Duration::ZERO,
        }
    }

    #[test]
    fn test_find_walks_relative_paths() {
        let mut child = leaf("root/a", Status::Passed);
        child.children.push(leaf("root/a/b", Status::Failed));
        let mut root = leaf("root", Status::Failed);
        root.children.push(child);

        assert_eq!(root.find("a/b").map(|o| o.name.as_str()), Some("root/a/b"));
        assert!(root.find("a/c").is_none());
        assert_eq!(root.count(), 3);
        assert_eq!(root.failed_count(), 2);
    }

    #[test]
    fn test_report_indents_children() {
        let mut root = leaf("root", Status::Passed);
        root.logs.push(LogLine {
            location: None,
            message: "hello".to_string(),
        });
        root.children.push(leaf("root/a", Status::Passed));

        let report = root.to_string();
        assert_eq!(
            report,
            "=== RUN   root\n=== RUN   root/a\n\
             --- PASS: root (0.00s)\n    hello\n    --- PASS: root/a (0.00s)\n"
        );
    }

    #[test]
    fn test_run_lines_are_pre_order() {
        let mut a = leaf("root/a", Status::Passed);
        a.children.push(leaf("root/a/x", Status::Passed));
        let mut root = leaf("root", Status::Passed);
        root.children.push(a);
        root.children.push(leaf("root/b", Status::Passed));

        let report = root.to_string();
        let runs: Vec<&str> = report
            .lines()
            .filter_map(|l| l.strip_prefix("=== RUN   "))
            .collect();
        assert_eq!(runs, ["root", "root/a", "root/a/x", "root/b"]);
    }

    #[test]
    fn test_into_result_reports_failed_counts() {
        let mut root = leaf("root", Status::Failed);
        root.children.push(leaf("root/a", Status::Failed));
        root.children.push(leaf("root/b", Status::Passed));

        match root.into_result() {
            Err(ShowcaseError::Scenario(msg)) => {
                assert_eq!(msg, "root failed (2 of 3 scenarios failed)")
            }
            other => panic!("expected Scenario error, got {:?}", other),
        }
        assert!(leaf("ok", Status::Passed).into_result().is_ok());
    }
}
