//! Core domain models for naming issues and traversal summaries
//!
//! Architecture: Rich Domain Models - Issues are values with behavior, not just data
//! - An Issue knows its kind and how to render itself for a terminal
//! - Summary acts as the aggregate root for one traversal and is threaded through it explicitly
//! - Errors separate hard faults (I/O) from the soft "issues found" outcome

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Kind of naming issue recorded during a traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Hash)]
#[serde(rename_all = "camelCase")]
pub enum IssueKind {
    /// A directory name does not satisfy the directory rule
    DirectoryNaming,
    /// A file name does not satisfy its resolved file rule
    FileNaming,
    /// An ignored directory was encountered (informational)
    IgnoredDirectory,
}

impl IssueKind {
    /// Wire name used in serialized summaries
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DirectoryNaming => "directoryNaming",
            Self::FileNaming => "fileNaming",
            Self::IgnoredDirectory => "ignoredDirectory",
        }
    }
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A naming issue found during a traversal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    #[serde(rename = "Type")]
    pub kind: IssueKind,
    /// Entry path relative to the search root, `/`-separated
    #[serde(rename = "Path")]
    pub path: String,
    #[serde(rename = "Message")]
    pub message: String,
}

impl Issue {
    /// Create a new issue
    pub fn new(kind: IssueKind, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
            message: message.into(),
        }
    }

    /// Format the issue the way the banner listing prints it
    pub fn format_display(&self) -> String {
        format!(
            "Type: {}, Path: {}, Message: {}",
            self.kind, self.path, self.message
        )
    }
}

/// Aggregate result of one traversal
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Directories that were evaluated (pruned ones excluded)
    #[serde(rename = "CheckedDirectories")]
    pub directories_checked: usize,
    /// Files that were evaluated (ignored ones excluded)
    #[serde(rename = "CheckedFiles")]
    pub files_checked: usize,
    /// Issues in traversal order
    #[serde(rename = "Issues")]
    pub issues: Vec<Issue>,
}

impl Summary {
    /// Create an empty summary
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_directory(&mut self) {
        self.directories_checked += 1;
    }

    pub fn record_file(&mut self) {
        self.files_checked += 1;
    }

    /// Add an issue to the summary
    pub fn add_issue(&mut self, issue: Issue) {
        self.issues.push(issue);
    }

    /// Whether the summary contains any issues
    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }

    /// Number of recorded issues
    pub fn issue_count(&self) -> usize {
        self.issues.len()
    }

    /// Issues of a specific kind
    pub fn issues_of_kind(&self, kind: IssueKind) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(move |i| i.kind == kind)
    }

    /// Convert into the overall outcome: `Ok` when clean, `IssuesFound` otherwise
    pub fn into_result(self) -> StandardizerResult<Summary> {
        if self.has_issues() {
            Err(StandardizerError::issues_found(self))
        } else {
            Ok(self)
        }
    }
}

/// Error types that can occur while checking a tree
#[derive(Debug, thiserror::Error)]
pub enum StandardizerError {
    /// Configuration file could not be loaded, parsed or validated
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// File could not be read or accessed
    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// Traversal aborted on a filesystem fault
    #[error("Walk error at {}: {source}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// The traversal completed but recorded naming issues
    #[error("found {count} issues in the codebase")]
    IssuesFound { count: usize, summary: Box<Summary> },

    /// Report could not be rendered
    #[error("Report error: {message}")]
    Report { message: String },
}

impl StandardizerError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a report error
    pub fn report(message: impl Into<String>) -> Self {
        Self::Report {
            message: message.into(),
        }
    }

    /// Wrap a completed summary that carries issues
    pub fn issues_found(summary: Summary) -> Self {
        Self::IssuesFound {
            count: summary.issue_count(),
            summary: Box::new(summary),
        }
    }

    /// Summary attached to a soft failure, if this is one
    pub fn summary(&self) -> Option<&Summary> {
        match self {
            Self::IssuesFound { summary, .. } => Some(summary),
            _ => None,
        }
    }

    /// Whether this error is a hard fault rather than recorded issues
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::IssuesFound { .. })
    }
}

impl From<walkdir::Error> for StandardizerError {
    fn from(err: walkdir::Error) -> Self {
        let path = err.path().map(PathBuf::from).unwrap_or_default();
        Self::Walk { path, source: err }
    }
}

/// Result type for standardizer operations
pub type StandardizerResult<T> = Result<T, StandardizerError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_issue() -> Issue {
        Issue::new(
            IssueKind::FileNaming,
            "src/My-File.txt",
            "File naming issues: must be lowercase",
        )
    }

    #[test]
    fn test_issue_display() {
        let issue = sample_issue();
        assert_eq!(
            issue.format_display(),
            "Type: fileNaming, Path: src/My-File.txt, Message: File naming issues: must be lowercase"
        );
    }

    #[test]
    fn test_summary_serializes_with_wire_names() {
        let mut summary = Summary::new();
        summary.record_directory();
        summary.record_file();
        summary.record_file();
        summary.add_issue(sample_issue());

        let json: serde_json::Value = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["CheckedDirectories"], 1);
        assert_eq!(json["CheckedFiles"], 2);
        assert_eq!(json["Issues"][0]["Type"], "fileNaming");
        assert_eq!(json["Issues"][0]["Path"], "src/My-File.txt");
        assert!(json["Issues"][0]["Message"]
            .as_str()
            .unwrap()
            .contains("must be lowercase"));
    }

    #[test]
    fn test_empty_summary_serializes_empty_issue_list() {
        let json: serde_json::Value = serde_json::to_value(Summary::new()).unwrap();
        assert_eq!(json["Issues"], serde_json::json!([]));
    }

    #[test]
    fn test_into_result_keeps_summary() {
        let mut summary = Summary::new();
        summary.add_issue(sample_issue());
        summary.add_issue(Issue::new(IssueKind::DirectoryNaming, "Bad_Dir", "bad"));

        let err = summary.clone().into_result().unwrap_err();
        assert!(!err.is_fatal());
        assert_eq!(err.to_string(), "found 2 issues in the codebase");
        assert_eq!(err.summary(), Some(&summary));

        assert!(Summary::new().into_result().is_ok());
    }

    #[test]
    fn test_issues_of_kind() {
        let mut summary = Summary::new();
        summary.add_issue(sample_issue());
        summary.add_issue(Issue::new(IssueKind::DirectoryNaming, "Bad_Dir", "bad"));

        assert_eq!(summary.issues_of_kind(IssueKind::FileNaming).count(), 1);
        assert_eq!(summary.issues_of_kind(IssueKind::IgnoredDirectory).count(), 0);
    }

    #[test]
    fn test_io_errors_are_fatal() {
        let err: StandardizerError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert!(err.is_fatal());
        assert!(err.summary().is_none());
    }
}
