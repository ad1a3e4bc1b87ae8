//! Standardizer - directory and file naming enforcement for source trees
//!
//! Architecture: Clean Architecture - Library interface serves as the application layer
//! - Pure naming rules live in the policy layer, data in the domain layer
//! - Configuration is translated once into an immutable Policy before any walk
//! - The walker returns a Summary; `check` turns recorded issues into a soft failure

pub mod config;
pub mod domain;
pub mod policy;
pub mod report;
pub mod walker;

// Re-export main types for convenient access
pub use domain::violations::{Issue, IssueKind, StandardizerError, StandardizerResult, Summary};

pub use config::{locate_config, BaseConfig, ConfigBuilder, StandardizerConfig, CONFIG_ENV_VAR};

pub use policy::{check_name, EntryKind, NameCheck, NamingRule, Policy, SkippedPattern};

pub use report::{OutputFormat, ReportFormatter, ReportOptions};

pub use walker::Validator;

use std::path::Path;

/// Main entry point tying configuration, policy, traversal and reporting together
pub struct Standardizer {
    config: StandardizerConfig,
    policy: Policy,
    report_formatter: ReportFormatter,
}

impl Standardizer {
    /// Create a standardizer for the given configuration
    pub fn new_with_config(config: StandardizerConfig) -> StandardizerResult<Self> {
        config.validate()?;
        let policy = Policy::from_config(&config);

        Ok(Self {
            config,
            policy,
            report_formatter: ReportFormatter::default(),
        })
    }

    /// Create a standardizer with the default configuration
    pub fn new() -> StandardizerResult<Self> {
        Self::new_with_config(StandardizerConfig::default())
    }

    /// Create a standardizer loading configuration from file
    pub fn from_config_file<P: AsRef<Path>>(path: P) -> StandardizerResult<Self> {
        let config = StandardizerConfig::load_from_file(path)?;
        Self::new_with_config(config)
    }

    /// Set custom report formatter
    pub fn with_report_formatter(mut self, formatter: ReportFormatter) -> Self {
        self.report_formatter = formatter;
        self
    }

    pub fn config(&self) -> &StandardizerConfig {
        &self.config
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Walk the tree and return the Summary, whatever it contains
    ///
    /// Only filesystem faults are errors here.
    pub fn walk(&self) -> StandardizerResult<Summary> {
        Validator::new(&self.policy).walk()
    }

    /// Walk the tree and fail with [`StandardizerError::IssuesFound`] if anything was recorded
    ///
    /// The Summary stays available through [`StandardizerError::summary`].
    pub fn check(&self) -> StandardizerResult<Summary> {
        let summary = self.walk()?;
        if summary.has_issues() {
            tracing::info!("{} naming issues found", summary.issue_count());
        }
        summary.into_result()
    }

    /// Format a summary for output
    pub fn format_report(&self, summary: &Summary, format: OutputFormat) -> StandardizerResult<String> {
        self.report_formatter.format_report(summary, format)
    }

    pub fn report_formatter(&self) -> &ReportFormatter {
        &self.report_formatter
    }
}

/// Convenience function to check the tree described by a configuration
pub fn check_tree(config: StandardizerConfig) -> StandardizerResult<Summary> {
    Standardizer::new_with_config(config)?.check()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn config_for(root: &Path) -> StandardizerConfig {
        ConfigBuilder::new()
            .search_directory(root)
            .directory_naming(NamingRule::new(true, false, true))
            .file_naming(NamingRule::new(true, true, true))
            .ignore_directory(".git")
            .build()
            .unwrap()
    }

    #[test]
    fn test_check_clean_tree() -> StandardizerResult<()> {
        let temp_dir = TempDir::new()?;
        fs::create_dir_all(temp_dir.path().join("src/core-lib"))?;
        fs::write(temp_dir.path().join("src/core-lib/lib.rs"), "")?;

        let summary = check_tree(config_for(temp_dir.path()))?;
        assert_eq!(summary.directories_checked, 2);
        assert_eq!(summary.files_checked, 1);
        assert!(summary.issues.is_empty());

        Ok(())
    }

    #[test]
    fn test_check_reports_issue_count_and_keeps_summary() -> StandardizerResult<()> {
        let temp_dir = TempDir::new()?;
        fs::create_dir_all(temp_dir.path().join("Src"))?;
        fs::write(temp_dir.path().join("Src/Main.rs"), "")?;
        fs::create_dir_all(temp_dir.path().join(".git/Objects"))?;

        let standardizer = Standardizer::new_with_config(config_for(temp_dir.path()))?;
        let err = standardizer.check().unwrap_err();

        match &err {
            StandardizerError::IssuesFound { count, summary } => {
                assert_eq!(*count, 2);
                assert_eq!(summary.directories_checked, 1);
                assert_eq!(summary.files_checked, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(err.to_string(), "found 2 issues in the codebase");

        // walk() exposes the same summary without failing
        let summary = standardizer.walk()?;
        assert_eq!(Some(&summary), err.summary());

        Ok(())
    }

    #[test]
    fn test_from_config_file() -> StandardizerResult<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("standardizer.yaml");
        fs::write(
            &config_path,
            format!(
                "baseConfig:\n  searchDirectory: {}\nfileNaming:\n  mustBeLowercase: true\n",
                temp_dir.path().display()
            ),
        )?;

        let standardizer = Standardizer::from_config_file(&config_path)?;
        assert!(standardizer.policy().file_rule().must_be_lowercase);

        // The config file itself is a conforming file in the tree
        let summary = standardizer.check()?;
        assert_eq!(summary.files_checked, 1);

        Ok(())
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = StandardizerConfig::default();
        config
            .file_type_specific_naming
            .insert("rs".to_string(), NamingRule::default());

        assert!(Standardizer::new_with_config(config).is_err());
    }
}
