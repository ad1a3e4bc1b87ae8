//! Naming policy: rule resolution and name evaluation
//!
//! Architectural Principle: Domain Services - the Policy answers every question the walker asks
//! - Which rule applies to an entry, including per-extension overrides
//! - Whether an entry is ignored, via the compiled ignore lists
//! - Whether a name conforms, and what a conforming name would look like

pub mod ignore;

use crate::config::StandardizerConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub use ignore::{IgnoreSet, SkippedPattern};

const MUST_BE_LOWERCASE: &str = "must be lowercase";
const HYPHENS_NOT_ALLOWED: &str = "hyphens not allowed";
const UNDERSCORES_NOT_ALLOWED: &str = "underscores not allowed";

const DIRECTORY_PLACEHOLDER: &str = "Example_Directory";
const FILE_PLACEHOLDER: &str = "Example_File";

/// The three naming toggles shared by directory, file and per-extension rules
///
/// Missing fields deserialize as `false`: hyphens and underscores are rejected unless
/// explicitly allowed, and case is free unless lowercase is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NamingRule {
    pub allow_hyphens: bool,
    pub allow_underscores: bool,
    pub must_be_lowercase: bool,
}

impl NamingRule {
    pub const fn new(allow_hyphens: bool, allow_underscores: bool, must_be_lowercase: bool) -> Self {
        Self {
            allow_hyphens,
            allow_underscores,
            must_be_lowercase,
        }
    }

    /// Evaluate a name against this rule
    pub fn check(&self, name: &str) -> NameCheck {
        check_name(name, self)
    }

    /// Short human description, e.g. `lowercase, hyphens allowed, no underscores`
    pub fn describe(&self) -> String {
        let case = if self.must_be_lowercase { "lowercase" } else { "any case" };
        let hyphens = if self.allow_hyphens { "hyphens allowed" } else { "no hyphens" };
        let underscores = if self.allow_underscores {
            "underscores allowed"
        } else {
            "no underscores"
        };
        format!("{case}, {hyphens}, {underscores}")
    }
}

impl Default for NamingRule {
    fn default() -> Self {
        Self::new(false, false, false)
    }
}

/// Outcome of evaluating one name: every failing constraint, in a fixed order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameCheck {
    reasons: Vec<&'static str>,
}

impl NameCheck {
    pub fn passed(&self) -> bool {
        self.reasons.is_empty()
    }

    pub fn reasons(&self) -> &[&'static str] {
        &self.reasons
    }

    /// Reasons joined for display
    pub fn joined(&self) -> String {
        self.reasons.join("; ")
    }
}

/// Evaluate each enabled constraint independently and collect every failure
pub fn check_name(name: &str, rule: &NamingRule) -> NameCheck {
    let mut reasons = Vec::new();

    if rule.must_be_lowercase && name != name.to_lowercase() {
        reasons.push(MUST_BE_LOWERCASE);
    }
    if !rule.allow_hyphens && name.contains('-') {
        reasons.push(HYPHENS_NOT_ALLOWED);
    }
    if !rule.allow_underscores && name.contains('_') {
        reasons.push(UNDERSCORES_NOT_ALLOWED);
    }

    NameCheck { reasons }
}

/// Extension of a file name: everything from the last `.` on, dot included
///
/// `.gitignore` yields `.gitignore`, `archive.tar.gz` yields `.gz`, `Makefile` yields nothing.
pub fn extension_of(name: &str) -> Option<&str> {
    name.rfind('.').map(|idx| &name[idx..])
}

/// Kind of filesystem entry being evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
}

impl EntryKind {
    pub fn noun(self) -> &'static str {
        match self {
            Self::Directory => "directory",
            Self::File => "file",
        }
    }
}

/// Build a name that satisfies `rule`, starting from a fixed placeholder
fn example_name(placeholder: &str, rule: &NamingRule) -> String {
    let mut name = placeholder.to_string();

    if rule.must_be_lowercase {
        name = name.to_lowercase();
    }

    if !rule.allow_hyphens && !rule.allow_underscores {
        name = name.replace(['-', '_'], "");
    } else if !rule.allow_underscores {
        name = name.replace('_', "-");
    } else if !rule.allow_hyphens {
        name = name.replace('-', "_");
    }

    name
}

/// Resolved, immutable naming policy for one traversal
#[derive(Debug, Clone)]
pub struct Policy {
    search_root: PathBuf,
    ignore_case: bool,
    directory_rule: NamingRule,
    file_rule: NamingRule,
    /// Keys are lowercased when `ignore_case` is set
    extension_rules: BTreeMap<String, NamingRule>,
    ignores: IgnoreSet,
}

impl Policy {
    /// Compile a policy from a loaded configuration
    ///
    /// Malformed ignore patterns are logged and skipped; they never fail construction.
    pub fn from_config(config: &StandardizerConfig) -> Self {
        let ignore_case = config.base_config.ignore_case;

        let mut extension_rules = BTreeMap::new();
        for (extension, rule) in &config.file_type_specific_naming {
            let key = if ignore_case {
                extension.to_lowercase()
            } else {
                extension.clone()
            };
            // BTreeMap order makes the first of two case-colliding keys win
            extension_rules.entry(key).or_insert(*rule);
        }

        let ignores = IgnoreSet::new(
            &config.ignore_directories,
            &config.ignore_formats,
            ignore_case,
        );

        Self {
            search_root: config.base_config.search_directory.clone(),
            ignore_case,
            directory_rule: config.directory_naming,
            file_rule: config.file_naming,
            extension_rules,
            ignores,
        }
    }

    pub fn search_root(&self) -> &Path {
        &self.search_root
    }

    pub fn ignore_case(&self) -> bool {
        self.ignore_case
    }

    pub fn directory_rule(&self) -> NamingRule {
        self.directory_rule
    }

    pub fn file_rule(&self) -> NamingRule {
        self.file_rule
    }

    /// Per-extension overrides in key order
    pub fn extension_rules(&self) -> impl Iterator<Item = (&str, NamingRule)> {
        self.extension_rules.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Override for `extension` if one exists, otherwise the global file rule
    pub fn resolve_file_rule(&self, extension: Option<&str>) -> NamingRule {
        let Some(extension) = extension else {
            return self.file_rule;
        };

        let found = if self.ignore_case {
            self.extension_rules.get(&extension.to_lowercase())
        } else {
            self.extension_rules.get(extension)
        };

        found.copied().unwrap_or(self.file_rule)
    }

    /// Effective rule for an entry of the given kind and name
    pub fn resolve_rule(&self, kind: EntryKind, name: &str) -> NamingRule {
        match kind {
            EntryKind::Directory => self.directory_rule,
            EntryKind::File => self.resolve_file_rule(extension_of(name)),
        }
    }

    /// Whether a directory, given relative to the search root, is pruned
    pub fn is_ignored_directory(&self, relative_path: &str) -> bool {
        self.ignores.is_ignored_directory(relative_path)
    }

    /// Whether a file, given as its full walked path, is skipped
    pub fn is_ignored_file(&self, path: &str) -> bool {
        self.ignores.is_ignored_file(path)
    }

    /// Sample name satisfying the rule resolved for `kind` and `extension`
    pub fn example_valid_name(&self, kind: EntryKind, extension: Option<&str>) -> String {
        match kind {
            EntryKind::Directory => example_name(DIRECTORY_PLACEHOLDER, &self.directory_rule),
            EntryKind::File => {
                let rule = self.resolve_file_rule(extension);
                let mut name = example_name(FILE_PLACEHOLDER, &rule);
                if let Some(extension) = extension {
                    name.push_str(extension);
                }
                name
            }
        }
    }

    /// Patterns that were dropped because they failed to compile
    pub fn skipped_patterns(&self) -> &[SkippedPattern] {
        self.ignores.skipped()
    }
}
