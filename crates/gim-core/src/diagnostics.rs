//! Unified diagnostics infrastructure for tracking issues during validation.
//!
//! This module provides a common interface for collecting warnings and errors
//! while walking a document tree. It supports:
//!
//! - Severity levels (Warning, Error)
//! - Categories for grouping issues (domain, invariant, uniqueness, ...)
//! - JSONPath-style field paths (e.g., `$.loads[3].rated_power.cos_phi`)
//! - Serialization for JSON output
//!
//! # Example
//!
//! ```
//! use gim_core::diagnostics::{Diagnostics, Severity};
//!
//! let mut diag = Diagnostics::new();
//!
//! // Add a domain error with field path
//! diag.add_error("domain", "$.nodes[0].u_n.value", "value must be >= 0");
//!
//! // Add a deprecation warning
//! diag.add_warning("deprecation", "$.meta.name", "name is deprecated. Use grid instead.");
//!
//! assert_eq!(diag.error_count(), 1);
//! assert_eq!(diag.warning_count(), 1);
//! assert!(diag.has_errors());
//! ```

use serde::Serialize;

use crate::error::{GimError, GimResult};

/// Severity level for diagnostic issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Unusual but construction continued (e.g., deprecated field)
    Warning,
    /// Invariant violated; the object must not be used
    Error,
}

/// A single diagnostic issue encountered during validation
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticIssue {
    /// Severity of the issue
    pub severity: Severity,
    /// Category for grouping (e.g., "domain", "invariant", "uniqueness")
    pub category: String,
    /// Field path of the offending value (e.g., `$.loads[3].rated_power`)
    pub path: String,
    /// Human-readable description of the issue
    pub message: String,
}

impl DiagnosticIssue {
    /// Create a new diagnostic issue
    pub fn new(
        severity: Severity,
        category: impl Into<String>,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            category: category.into(),
            path: path.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for DiagnosticIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let severity = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };

        write!(
            f,
            "[{}:{}] {}: {}",
            severity, self.category, self.path, self.message
        )
    }
}

/// Collection of diagnostic issues for a validation pass
///
/// This is the primary container for tracking warnings and errors while
/// validating a document. The whole tree is walked before failing, so a
/// single pass reports every offending field path.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Diagnostics {
    /// All collected issues
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<DiagnosticIssue>,
}

impl Diagnostics {
    /// Create new empty diagnostics
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a raw issue directly
    pub fn add(&mut self, issue: DiagnosticIssue) {
        self.issues.push(issue);
    }

    /// Add an error with category, field path and message
    pub fn add_error(&mut self, category: &str, path: &str, message: impl Into<String>) {
        self.issues
            .push(DiagnosticIssue::new(Severity::Error, category, path, message));
    }

    /// Add a warning with category, field path and message
    pub fn add_warning(&mut self, category: &str, path: &str, message: impl Into<String>) {
        self.issues.push(DiagnosticIssue::new(
            Severity::Warning,
            category,
            path,
            message,
        ));
    }

    /// Merge all issues of another collection into this one
    pub fn extend(&mut self, other: Diagnostics) {
        self.issues.extend(other.issues);
    }

    /// Count of error-severity issues
    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count()
    }

    /// Count of warning-severity issues
    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .count()
    }

    /// True if any error-severity issue was collected
    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::Error)
    }

    /// Iterate over error-severity issues
    pub fn errors(&self) -> impl Iterator<Item = &DiagnosticIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
    }

    /// True if no issues at all were collected
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}

impl std::fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, issue) in self.issues.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

/// Eager validation over a document tree.
///
/// Every schema type implements this trait. `validate` appends issues for
/// `self` (and recursively for owned children) to `diag`, prefixing field
/// paths with `path`. `validated` is the construction-time entry point:
/// it walks the whole value and fails with the complete issue list.
pub trait Validate {
    /// Append issues found on `self` to `diag`, using `path` as prefix.
    fn validate(&self, path: &str, diag: &mut Diagnostics);

    /// Run validation rooted at `$`, failing if any error was collected.
    ///
    /// An object either fully satisfies its invariants or does not exist;
    /// there is no partial construction.
    fn validated(self) -> GimResult<Self>
    where
        Self: Sized,
    {
        let mut diag = Diagnostics::new();
        self.validate("$", &mut diag);
        if diag.has_errors() {
            Err(GimError::Validation(diag))
        } else {
            Ok(self)
        }
    }
}

/// Join a field name onto a path prefix.
pub fn field(path: &str, name: &str) -> String {
    format!("{path}.{name}")
}

/// Join a sequence index onto a path prefix.
pub fn index(path: &str, i: usize) -> String {
    format!("{path}[{i}]")
}

/// Report duplicate entries in a list that must be unique by full equality.
pub fn check_unique<T: PartialEq>(items: &[T], path: &str, diag: &mut Diagnostics) {
    for (i, item) in items.iter().enumerate() {
        if items[..i].contains(item) {
            diag.add_error("uniqueness", &index(path, i), "duplicate entry");
        }
    }
}

/// Validate every element of a list, recursing with indexed paths.
pub fn validate_each<T: Validate>(items: &[T], path: &str, diag: &mut Diagnostics) {
    for (i, item) in items.iter().enumerate() {
        item.validate(&index(path, i), diag);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_display() {
        let issue = DiagnosticIssue::new(
            Severity::Error,
            "domain",
            "$.nodes[0].u_n.value",
            "value must be >= 0",
        );
        assert_eq!(
            issue.to_string(),
            "[error:domain] $.nodes[0].u_n.value: value must be >= 0"
        );
    }

    #[test]
    fn test_counts() {
        let mut diag = Diagnostics::new();
        diag.add_error("domain", "$.a", "bad");
        diag.add_error("invariant", "$.b", "worse");
        diag.add_warning("deprecation", "$.c", "old");
        assert_eq!(diag.error_count(), 2);
        assert_eq!(diag.warning_count(), 1);
        assert!(diag.has_errors());
    }

    #[test]
    fn test_warnings_do_not_fail_validated() {
        struct Deprecated;
        impl Validate for Deprecated {
            fn validate(&self, path: &str, diag: &mut Diagnostics) {
                diag.add_warning("deprecation", path, "old field");
            }
        }
        assert!(Deprecated.validated().is_ok());
    }

    #[test]
    fn test_check_unique_reports_every_duplicate() {
        let mut diag = Diagnostics::new();
        check_unique(&[1, 2, 1, 2, 3], "$.xs", &mut diag);
        assert_eq!(diag.error_count(), 2);
        let paths: Vec<_> = diag.errors().map(|i| i.path.as_str()).collect();
        assert_eq!(paths, vec!["$.xs[2]", "$.xs[3]"]);
    }

    #[test]
    fn test_path_helpers() {
        assert_eq!(field("$", "meta"), "$.meta");
        assert_eq!(index("$.loads", 3), "$.loads[3]");
    }
}
