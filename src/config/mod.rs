//! Configuration loading and management for the standardizer
//!
//! Architecture: Anti-Corruption Layer - Configuration translates external YAML formats
//! - Raw YAML documents are deserialized into a typed configuration
//! - Default configurations are embedded in the domain, not infrastructure
//! - The policy layer compiles this configuration; nothing here evaluates names

use crate::domain::violations::{StandardizerError, StandardizerResult};
use crate::policy::NamingRule;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable consulted by the CLI when no `--config` flag is given
pub const CONFIG_ENV_VAR: &str = "STANDARDIZER_CONFIG_PATH";

/// Config file locations tried, in order, when neither flag nor env var is set
pub const DEFAULT_CONFIG_LOCATIONS: &[&str] = &[
    ".github/standardizer.yaml",
    ".github/standardizer.yml",
    "standardizer.yaml",
];

/// Main configuration structure, mirroring the YAML document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandardizerConfig {
    /// Where to search and how to compare
    #[serde(default)]
    pub base_config: BaseConfig,
    /// Rule applied to every directory name
    #[serde(default)]
    pub directory_naming: NamingRule,
    /// Default rule applied to file names
    #[serde(default)]
    pub file_naming: NamingRule,
    /// Regexes or plain extensions (`.md`) of files to skip
    #[serde(default)]
    pub ignore_formats: Vec<String>,
    /// Directory names or segment paths to prune
    #[serde(default)]
    pub ignore_directories: Vec<String>,
    /// Per-extension overrides of `file_naming`, keyed with the leading dot
    #[serde(default)]
    pub file_type_specific_naming: BTreeMap<String, NamingRule>,
}

/// Traversal-wide settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseConfig {
    /// Root of the traversal
    #[serde(default = "default_search_directory")]
    pub search_directory: PathBuf,
    /// Compare extensions, ignored directories and ignore patterns case-insensitively
    #[serde(default)]
    pub ignore_case: bool,
}

impl Default for BaseConfig {
    fn default() -> Self {
        Self {
            search_directory: default_search_directory(),
            ignore_case: false,
        }
    }
}

fn default_search_directory() -> PathBuf {
    PathBuf::from("./")
}

impl StandardizerConfig {
    /// Load configuration from a YAML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> StandardizerResult<Self> {
        let contents = fs::read_to_string(&path).map_err(|e| {
            StandardizerError::config(format!(
                "Failed to read config file '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;

        let config: Self = serde_yaml::from_str(&contents).map_err(|e| {
            StandardizerError::config(format!(
                "Failed to parse config file '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;

        config.validate()?;
        tracing::debug!("Loaded configuration from {}", path.as_ref().display());
        Ok(config)
    }

    /// Load configuration from string content
    pub fn load_from_str(content: &str) -> StandardizerResult<Self> {
        let config: Self = serde_yaml::from_str(content)
            .map_err(|e| StandardizerError::config(format!("Failed to parse config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration used when nothing else is supplied
    pub fn with_defaults() -> Self {
        let mut file_type_specific_naming = BTreeMap::new();
        file_type_specific_naming.insert(
            ".go".to_string(),
            NamingRule::new(false, true, true),
        );
        file_type_specific_naming.insert(
            ".md".to_string(),
            NamingRule::new(true, true, false),
        );

        Self {
            base_config: BaseConfig::default(),
            directory_naming: NamingRule::new(true, false, true),
            file_naming: NamingRule::new(true, true, true),
            ignore_formats: vec![r"\.pb\.go$".to_string(), r"\.gen\.go$".to_string()],
            ignore_directories: vec![
                ".git".to_string(),
                ".github".to_string(),
                ".idea".to_string(),
                ".vscode".to_string(),
                "vendor".to_string(),
                "node_modules".to_string(),
                "target".to_string(),
            ],
            file_type_specific_naming,
        }
    }

    /// Validate the configuration for consistency
    ///
    /// Regex ignore patterns are deliberately not compiled here: a bad pattern is
    /// skipped with a warning when the policy is built.
    pub fn validate(&self) -> StandardizerResult<()> {
        if self.base_config.search_directory.as_os_str().is_empty() {
            return Err(StandardizerError::config(
                "baseConfig.searchDirectory must not be empty",
            ));
        }

        for extension in self.file_type_specific_naming.keys() {
            if !extension.starts_with('.') || extension.len() < 2 {
                return Err(StandardizerError::config(format!(
                    "Invalid extension key '{extension}' in fileTypeSpecificNaming: expected a leading dot, e.g. '.md'"
                )));
            }
        }

        if let Some(pos) = self
            .ignore_directories
            .iter()
            .position(|d| d.trim().trim_matches('/').is_empty())
        {
            return Err(StandardizerError::config(format!(
                "ignoreDirectories entry #{pos} is empty"
            )));
        }

        if let Some(pos) = self.ignore_formats.iter().position(|f| f.is_empty()) {
            return Err(StandardizerError::config(format!(
                "ignoreFormats entry #{pos} is empty"
            )));
        }

        Ok(())
    }

    /// Serialize back to YAML
    pub fn to_yaml(&self) -> StandardizerResult<String> {
        serde_yaml::to_string(self)
            .map_err(|e| StandardizerError::config(format!("Failed to serialize config: {e}")))
    }
}

impl Default for StandardizerConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Decide which config file to load
///
/// An explicit path (flag or env var, already resolved by the caller) wins. Otherwise
/// the first existing entry of [`DEFAULT_CONFIG_LOCATIONS`] under `base_dir` is used,
/// falling back to `standardizer.yaml` even if it does not exist so the load error
/// names a sensible file.
pub fn locate_config(explicit: Option<PathBuf>, base_dir: &Path) -> PathBuf {
    if let Some(path) = explicit {
        return path;
    }

    DEFAULT_CONFIG_LOCATIONS
        .iter()
        .map(|candidate| base_dir.join(candidate))
        .find(|candidate| candidate.is_file())
        .unwrap_or_else(|| base_dir.join("standardizer.yaml"))
}

/// Configuration builder for programmatic construction
pub struct ConfigBuilder {
    config: StandardizerConfig,
}

impl ConfigBuilder {
    /// Start from an empty configuration with default (strict separator) rules
    pub fn new() -> Self {
        Self {
            config: StandardizerConfig {
                base_config: BaseConfig::default(),
                directory_naming: NamingRule::default(),
                file_naming: NamingRule::default(),
                ignore_formats: Vec::new(),
                ignore_directories: Vec::new(),
                file_type_specific_naming: BTreeMap::new(),
            },
        }
    }

    pub fn search_directory(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.base_config.search_directory = path.into();
        self
    }

    pub fn ignore_case(mut self, ignore_case: bool) -> Self {
        self.config.base_config.ignore_case = ignore_case;
        self
    }

    pub fn directory_naming(mut self, rule: NamingRule) -> Self {
        self.config.directory_naming = rule;
        self
    }

    pub fn file_naming(mut self, rule: NamingRule) -> Self {
        self.config.file_naming = rule;
        self
    }

    /// Add a per-extension override
    pub fn extension_rule(mut self, extension: impl Into<String>, rule: NamingRule) -> Self {
        self.config
            .file_type_specific_naming
            .insert(extension.into(), rule);
        self
    }

    pub fn ignore_directory(mut self, directory: impl Into<String>) -> Self {
        self.config.ignore_directories.push(directory.into());
        self
    }

    pub fn ignore_format(mut self, pattern: impl Into<String>) -> Self {
        self.config.ignore_formats.push(pattern.into());
        self
    }

    /// Build the final configuration
    pub fn build(self) -> StandardizerResult<StandardizerConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"
baseConfig:
  searchDirectory: ./src
  ignoreCase: true
directoryNaming:
  allowHyphens: true
  allowUnderscores: false
  mustBeLowercase: true
fileNaming:
  allowHyphens: false
  allowUnderscores: true
  mustBeLowercase: true
ignoreFormats:
  - "\\.pb\\.go$"
  - ".md"
ignoreDirectories:
  - vendor
  - node_modules
fileTypeSpecificNaming:
  ".yaml":
    allowHyphens: true
    allowUnderscores: false
    mustBeLowercase: true
"#;

    #[test]
    fn test_load_from_str() {
        let config = StandardizerConfig::load_from_str(SAMPLE).unwrap();

        assert_eq!(config.base_config.search_directory, PathBuf::from("./src"));
        assert!(config.base_config.ignore_case);
        assert_eq!(config.directory_naming, NamingRule::new(true, false, true));
        assert_eq!(config.file_naming, NamingRule::new(false, true, true));
        assert_eq!(config.ignore_formats, vec![r"\.pb\.go$", ".md"]);
        assert_eq!(config.ignore_directories, vec!["vendor", "node_modules"]);
        assert_eq!(
            config.file_type_specific_naming.get(".yaml"),
            Some(&NamingRule::new(true, false, true))
        );
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = StandardizerConfig::load_from_str("fileNaming:\n  mustBeLowercase: true\n")
            .unwrap();

        assert_eq!(config.base_config.search_directory, PathBuf::from("./"));
        assert!(!config.base_config.ignore_case);
        assert_eq!(config.directory_naming, NamingRule::new(false, false, false));
        assert_eq!(config.file_naming, NamingRule::new(false, false, true));
        assert!(config.ignore_directories.is_empty());
    }

    #[test]
    fn test_invalid_yaml_is_configuration_error() {
        let err = StandardizerConfig::load_from_str("fileNaming: [oops").unwrap_err();
        assert!(matches!(err, StandardizerError::Configuration { .. }));
    }

    #[test]
    fn test_extension_keys_need_leading_dot() {
        let err = ConfigBuilder::new()
            .extension_rule("md", NamingRule::default())
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("'md'"));
    }

    #[test]
    fn test_empty_ignore_entries_rejected() {
        assert!(ConfigBuilder::new().ignore_directory("/").build().is_err());
        assert!(ConfigBuilder::new().ignore_format("").build().is_err());
    }

    #[test]
    fn test_bad_regex_is_not_a_config_error() {
        let config = ConfigBuilder::new().ignore_format("([unclosed").build();
        assert!(config.is_ok());
    }

    #[test]
    fn test_defaults_are_valid_and_round_trip() {
        let config = StandardizerConfig::default();
        config.validate().unwrap();

        let yaml = config.to_yaml().unwrap();
        let reloaded = StandardizerConfig::load_from_str(&yaml).unwrap();
        assert_eq!(config, reloaded);
    }

    #[test]
    fn test_load_from_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = StandardizerConfig::load_from_file(temp_dir.path().join("nope.yaml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_locate_config_prefers_explicit_path() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join(".github")).unwrap();
        fs::write(temp_dir.path().join(".github/standardizer.yaml"), "").unwrap();

        let explicit = PathBuf::from("custom.yaml");
        assert_eq!(
            locate_config(Some(explicit.clone()), temp_dir.path()),
            explicit
        );
    }

    #[test]
    fn test_locate_config_search_order() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        assert_eq!(locate_config(None, root), root.join("standardizer.yaml"));

        fs::create_dir_all(root.join(".github")).unwrap();
        fs::write(root.join(".github/standardizer.yml"), "").unwrap();
        assert_eq!(
            locate_config(None, root),
            root.join(".github/standardizer.yml")
        );

        fs::write(root.join(".github/standardizer.yaml"), "").unwrap();
        assert_eq!(
            locate_config(None, root),
            root.join(".github/standardizer.yaml")
        );
    }
}
