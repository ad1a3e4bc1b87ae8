//! Ignore lists for directories and files
//!
//! Architectural Principle: Service Layer - IgnoreSet encapsulates every skip decision
//! - Directory entries match anywhere inside the relative path, or as globs when they contain wildcards
//! - File entries are plain extensions (`.md`) or regular expressions over the walked path
//! - Patterns that fail to compile are reported once and skipped, never fatal

use regex::{Regex, RegexBuilder};

/// A configured pattern that was dropped because it did not compile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedPattern {
    pub pattern: String,
    pub reason: String,
}

/// Compiled ignore lists
#[derive(Debug, Clone)]
pub struct IgnoreSet {
    directories: Vec<DirectoryMatcher>,
    files: Vec<FileMatcher>,
    skipped: Vec<SkippedPattern>,
    ignore_case: bool,
}

#[derive(Debug, Clone)]
enum DirectoryMatcher {
    /// Literal text found anywhere in the relative path, e.g. `node_modules` or `web/dist`
    Substring(String),
    /// Wildcard pattern; matched against the full relative path when it contains
    /// a `/`, otherwise against the last segment only
    Glob {
        pattern: glob::Pattern,
        full_path: bool,
    },
}

#[derive(Debug, Clone)]
enum FileMatcher {
    Extension(String),
    Regex(Regex),
}

impl IgnoreSet {
    /// Compile directory and file ignore lists
    pub fn new(directories: &[String], file_patterns: &[String], ignore_case: bool) -> Self {
        let mut set = Self {
            directories: Vec::new(),
            files: Vec::new(),
            skipped: Vec::new(),
            ignore_case,
        };

        for entry in directories {
            set.add_directory(entry);
        }
        for pattern in file_patterns {
            set.add_file_pattern(pattern);
        }

        set
    }

    fn add_directory(&mut self, entry: &str) {
        let trimmed = entry.trim().trim_start_matches("./").trim_matches('/');

        if trimmed.contains(['*', '?', '[']) {
            match glob::Pattern::new(trimmed) {
                Ok(pattern) => self.directories.push(DirectoryMatcher::Glob {
                    pattern,
                    full_path: trimmed.contains('/'),
                }),
                Err(e) => self.skip(entry, e.to_string()),
            }
            return;
        }

        let literal = split_segments(trimmed).collect::<Vec<_>>().join("/");
        if literal.is_empty() {
            self.skip(entry, "no path segments".to_string());
        } else {
            let literal = self.fold(&literal);
            self.directories.push(DirectoryMatcher::Substring(literal));
        }
    }

    fn add_file_pattern(&mut self, pattern: &str) {
        if is_plain_extension(pattern) {
            let extension = self.fold(pattern);
            self.files.push(FileMatcher::Extension(extension));
            return;
        }

        match RegexBuilder::new(pattern)
            .case_insensitive(self.ignore_case)
            .build()
        {
            Ok(regex) => self.files.push(FileMatcher::Regex(regex)),
            Err(e) => self.skip(pattern, e.to_string()),
        }
    }

    fn skip(&mut self, pattern: &str, reason: String) {
        // Log warning but don't fail - just skip invalid patterns
        tracing::warn!("Invalid ignore pattern '{}': {}", pattern, reason);
        self.skipped.push(SkippedPattern {
            pattern: pattern.to_string(),
            reason,
        });
    }

    fn fold(&self, s: &str) -> String {
        if self.ignore_case {
            s.to_lowercase()
        } else {
            s.to_string()
        }
    }

    /// Whether a directory, relative to the search root, should be pruned
    pub fn is_ignored_directory(&self, relative_path: &str) -> bool {
        let normalized = relative_path.replace('\\', "/");
        let segments = split_segments(&normalized)
            .map(|s| self.fold(s))
            .collect::<Vec<_>>();
        if segments.is_empty() {
            return false;
        }
        let joined = segments.join("/");

        let options = glob::MatchOptions {
            case_sensitive: !self.ignore_case,
            require_literal_separator: true,
            require_literal_leading_dot: false,
        };

        self.directories.iter().any(|matcher| match matcher {
            DirectoryMatcher::Substring(wanted) => joined.contains(wanted.as_str()),
            DirectoryMatcher::Glob { pattern, full_path } => {
                if *full_path {
                    pattern.matches_with(&joined, options)
                } else {
                    segments
                        .last()
                        .is_some_and(|last| pattern.matches_with(last, options))
                }
            }
        })
    }

    /// Whether a file, given as its walked path, should be skipped
    pub fn is_ignored_file(&self, path: &str) -> bool {
        let normalized = path.replace('\\', "/");
        let file_name = normalized.rsplit('/').next().unwrap_or(&normalized);
        let extension = crate::policy::extension_of(file_name).map(|e| self.fold(e));

        self.files.iter().any(|matcher| match matcher {
            FileMatcher::Extension(wanted) => extension.as_deref() == Some(wanted.as_str()),
            FileMatcher::Regex(regex) => regex.is_match(&normalized),
        })
    }

    /// Patterns that were skipped at compile time
    pub fn skipped(&self) -> &[SkippedPattern] {
        &self.skipped
    }

    /// Number of usable directory and file matchers
    pub fn len(&self) -> usize {
        self.directories.len() + self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty() && *s != ".")
}

/// `.md`, `.json`: a leading dot followed only by alphanumerics
fn is_plain_extension(pattern: &str) -> bool {
    pattern
        .strip_prefix('.')
        .is_some_and(|rest| !rest.is_empty() && rest.chars().all(|c| c.is_ascii_alphanumeric()))
}
