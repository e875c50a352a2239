//! Error types for parsing and schema validation.

use thiserror::Error;

/// A single validation failure, located by its dotted config path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub path: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(path: &str, message: impl Into<String>) -> Self {
        Self {
            path: if path.is_empty() { "(root)".to_string() } else { path.to_string() },
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Errors raised by the parse entry points.
///
/// Per-key problems (non-matching prefix, empty segments) never raise; they
/// skip the offending key. Only schema validation aborts a parse, and it
/// aborts atomically with every issue collected.
#[derive(Debug, Error)]
pub enum EnvyError {
    #[error("schema validation failed: {}", format_issues(.issues))]
    Validation { issues: Vec<ValidationIssue> },
}

fn format_issues(issues: &[ValidationIssue]) -> String {
    issues.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_display() {
        let issue = ValidationIssue::new("database.port", "expected number, got string");
        assert_eq!(issue.to_string(), "database.port: expected number, got string");
    }

    #[test]
    fn test_root_issue_display() {
        let issue = ValidationIssue::new("", "missing required field \"port\"");
        assert_eq!(issue.to_string(), "(root): missing required field \"port\"");
    }

    #[test]
    fn test_validation_error_joins_issues() {
        let err = EnvyError::Validation {
            issues: vec![
                ValidationIssue::new("port", "expected number, got string"),
                ValidationIssue::new("log.level", "missing required field"),
            ],
        };
        let rendered = err.to_string();
        assert!(rendered.starts_with("schema validation failed: "));
        assert!(rendered.contains("port: expected number, got string"));
        assert!(rendered.contains("log.level: missing required field"));
    }
}
