//! Report generation with multiple output formats
//!
//! CDD Principle: Anti-Corruption Layer - Formatters translate domain objects to external formats
//! - Summary (domain) is converted to JSON, terminal text, or CI annotations
//! - The JSON shape is the stable contract consumed by other tools
//! - Domain logic remains pure while supporting multiple presentation needs

use crate::domain::violations::{Issue, StandardizerError, StandardizerResult, Summary};
use std::io::Write;

const RULE: &str =
    "===================================================================================================";

/// Supported output formats for summaries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Banner, one line per issue, and a closing count
    Human,
    /// Pretty-printed Summary JSON
    Json,
    /// GitHub Actions workflow commands
    GitHub,
}

/// Options for customizing report output
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Whether to use colored output (human format only)
    pub use_colors: bool,
    /// Maximum number of issues to list (JSON always carries all of them)
    pub max_issues: Option<usize>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            use_colors: true,
            max_issues: None,
        }
    }
}

/// Main report formatter that dispatches to specific formatters
#[derive(Debug, Clone, Default)]
pub struct ReportFormatter {
    options: ReportOptions,
}

impl ReportFormatter {
    /// Create a new report formatter with options
    pub fn new(options: ReportOptions) -> Self {
        Self { options }
    }

    /// Format a summary in the specified format
    pub fn format_report(&self, summary: &Summary, format: OutputFormat) -> StandardizerResult<String> {
        match format {
            OutputFormat::Human => Ok(self.format_human(summary)),
            OutputFormat::Json => self.format_json(summary),
            OutputFormat::GitHub => Ok(self.format_github(summary)),
        }
    }

    /// Write a formatted summary to a writer
    pub fn write_report<W: Write>(
        &self,
        summary: &Summary,
        format: OutputFormat,
        mut writer: W,
    ) -> StandardizerResult<()> {
        let formatted = self.format_report(summary, format)?;
        writer.write_all(formatted.as_bytes())?;
        Ok(())
    }

    /// The block printed ahead of the summary when issues were found
    pub fn format_issue_banner(&self, summary: &Summary) -> String {
        let mut output = String::new();

        output.push_str(&self.paint_header("## Issues found:"));
        output.push('\n');
        output.push_str(RULE);
        output.push('\n');

        for issue in self.limited(&summary.issues) {
            output.push_str(&issue.format_display());
            output.push('\n');
        }

        let hidden = summary.issues.len() - self.limited(&summary.issues).len();
        if hidden > 0 {
            output.push_str(&format!("... and {hidden} more\n"));
        }

        output
    }

    /// The closing lines printed after a failed check
    pub fn format_failure_footer(&self, error: &StandardizerError) -> String {
        format!(
            "\n{RULE}\nPlease check whether the files above follow the naming policy, or whether the configuration file is correct\n!!!Error during check: {error}\n"
        )
    }

    fn limited<'a>(&self, issues: &'a [Issue]) -> &'a [Issue] {
        match self.options.max_issues {
            Some(max) if max < issues.len() => &issues[..max],
            _ => issues,
        }
    }

    /// Format summary in human-readable form
    fn format_human(&self, summary: &Summary) -> String {
        let mut output = String::new();

        if summary.has_issues() {
            output.push_str(&self.format_issue_banner(summary));
            output.push('\n');
        } else {
            output.push_str(&self.paint_ok("No naming issues found"));
            output.push('\n');
        }

        output.push_str(&format!(
            "Summary: {} issue{} in {} directories and {} files\n",
            summary.issue_count(),
            if summary.issue_count() == 1 { "" } else { "s" },
            summary.directories_checked,
            summary.files_checked
        ));

        output
    }

    /// Format summary as JSON
    fn format_json(&self, summary: &Summary) -> StandardizerResult<String> {
        serde_json::to_string_pretty(summary)
            .map_err(|e| StandardizerError::report(format!("JSON serialization failed: {e}")))
    }

    /// Format summary for GitHub Actions
    fn format_github(&self, summary: &Summary) -> String {
        let mut output = String::new();

        for issue in self.limited(&summary.issues) {
            output.push_str(&format!(
                "::error file={},title={}::{}\n",
                issue.path, issue.kind, issue.message
            ));
        }

        output
    }

    #[cfg(feature = "colors")]
    fn paint_header(&self, text: &str) -> String {
        use colored::Colorize;
        if self.options.use_colors {
            text.red().bold().to_string()
        } else {
            text.to_string()
        }
    }

    #[cfg(not(feature = "colors"))]
    fn paint_header(&self, text: &str) -> String {
        text.to_string()
    }

    #[cfg(feature = "colors")]
    fn paint_ok(&self, text: &str) -> String {
        use colored::Colorize;
        if self.options.use_colors {
            text.green().to_string()
        } else {
            text.to_string()
        }
    }

    #[cfg(not(feature = "colors"))]
    fn paint_ok(&self, text: &str) -> String {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::violations::IssueKind;
    use serde_json::Value as JsonValue;

    fn plain() -> ReportFormatter {
        ReportFormatter::new(ReportOptions {
            use_colors: false,
            ..Default::default()
        })
    }

    fn create_test_summary() -> Summary {
        let mut summary = Summary::new();
        summary.directories_checked = 4;
        summary.files_checked = 10;
        summary.add_issue(Issue::new(
            IssueKind::FileNaming,
            "src/My-File.txt",
            "File naming issues: must be lowercase",
        ));
        summary.add_issue(Issue::new(
            IssueKind::DirectoryNaming,
            "Bad_Dir",
            "Directory naming issues: underscores not allowed",
        ));
        summary
    }

    #[test]
    fn test_human_format() {
        let output = plain()
            .format_report(&create_test_summary(), OutputFormat::Human)
            .unwrap();

        assert!(output.starts_with("## Issues found:\n===="));
        assert!(output.contains(
            "Type: fileNaming, Path: src/My-File.txt, Message: File naming issues: must be lowercase"
        ));
        assert!(output.contains("Summary: 2 issues in 4 directories and 10 files"));
    }

    #[test]
    fn test_json_format() {
        let output = plain()
            .format_report(&create_test_summary(), OutputFormat::Json)
            .unwrap();

        let json: JsonValue = serde_json::from_str(&output).unwrap();
        assert_eq!(json["CheckedDirectories"], 4);
        assert_eq!(json["CheckedFiles"], 10);
        assert_eq!(json["Issues"].as_array().unwrap().len(), 2);
        assert_eq!(json["Issues"][1]["Type"], "directoryNaming");
    }

    #[test]
    fn test_json_ignores_issue_limit() {
        let formatter = ReportFormatter::new(ReportOptions {
            use_colors: false,
            max_issues: Some(1),
        });
        let output = formatter
            .format_report(&create_test_summary(), OutputFormat::Json)
            .unwrap();
        let json: JsonValue = serde_json::from_str(&output).unwrap();
        assert_eq!(json["Issues"].as_array().unwrap().len(), 2);

        let banner = formatter.format_issue_banner(&create_test_summary());
        assert!(banner.contains("src/My-File.txt"));
        assert!(!banner.contains("Bad_Dir"));
        assert!(banner.contains("... and 1 more"));
    }

    #[test]
    fn test_github_format() {
        let output = plain()
            .format_report(&create_test_summary(), OutputFormat::GitHub)
            .unwrap();

        assert!(output.contains(
            "::error file=src/My-File.txt,title=fileNaming::File naming issues: must be lowercase"
        ));
        assert_eq!(output.lines().count(), 2);
    }

    #[test]
    fn test_empty_summary() {
        let output = plain()
            .format_report(&Summary::new(), OutputFormat::Human)
            .unwrap();

        assert!(output.contains("No naming issues found"));
        assert!(output.contains("Summary: 0 issues in 0 directories and 0 files"));
    }

    #[test]
    fn test_failure_footer() {
        let err = StandardizerError::issues_found(create_test_summary());
        let footer = plain().format_failure_footer(&err);
        assert!(footer.contains("!!!Error during check: found 2 issues in the codebase"));
    }

    #[test]
    fn test_write_report() {
        let mut buffer = Vec::new();
        plain()
            .write_report(&Summary::new(), OutputFormat::Json, &mut buffer)
            .unwrap();
        let json: JsonValue = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(json["Issues"], serde_json::json!([]));
    }
}
