//! Tree walker that applies the naming policy
//!
//! CDD Principle: Domain Services - the Validator orchestrates one traversal
//! - Pre-order, depth-first, siblings in file-name order so repeated runs agree
//! - Ignored directories are pruned silently; ignored files are skipped silently
//! - The Summary is owned by the traversal call and threaded through it explicitly
//! - Any filesystem fault aborts the walk and is reported apart from naming issues

use crate::domain::violations::{Issue, IssueKind, StandardizerError, StandardizerResult, Summary};
use crate::policy::{extension_of, EntryKind, Policy};
use std::path::Path;
use walkdir::WalkDir;

/// Walks the search root of a policy and evaluates every descendant
pub struct Validator<'p> {
    policy: &'p Policy,
}

impl<'p> Validator<'p> {
    pub fn new(policy: &'p Policy) -> Self {
        Self { policy }
    }

    /// Walk the policy's search root
    pub fn walk(&self) -> StandardizerResult<Summary> {
        self.walk_root(self.policy.search_root())
    }

    /// Walk an explicit root with this validator's policy
    pub fn walk_root(&self, root: &Path) -> StandardizerResult<Summary> {
        let metadata = std::fs::metadata(root)?;
        if !metadata.is_dir() {
            return Err(StandardizerError::config(format!(
                "search directory '{}' is not a directory",
                root.display()
            )));
        }

        tracing::debug!("walk: start at {}", root.display());

        let mut summary = Summary::new();
        let mut entries = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter();

        while let Some(entry) = entries.next() {
            let entry = entry?;

            // The root itself is never evaluated
            if entry.depth() == 0 {
                continue;
            }

            let relative = relative_path(root, entry.path());
            let name = entry.file_name().to_string_lossy();

            if entry.file_type().is_dir() {
                if self.policy.is_ignored_directory(&relative) {
                    tracing::debug!("prune {}", relative);
                    entries.skip_current_dir();
                    continue;
                }
                self.visit_directory(&mut summary, &relative, &name);
            } else {
                let walked = entry.path().to_string_lossy().replace('\\', "/");
                if self.policy.is_ignored_file(&walked) {
                    tracing::debug!("skip {}", relative);
                    continue;
                }
                self.visit_file(&mut summary, &relative, &name);
            }
        }

        tracing::debug!(
            "walk: done, {} directories, {} files, {} issues",
            summary.directories_checked,
            summary.files_checked,
            summary.issue_count()
        );

        Ok(summary)
    }

    fn visit_directory(&self, summary: &mut Summary, relative: &str, name: &str) {
        summary.record_directory();

        let rule = self.policy.resolve_rule(EntryKind::Directory, name);
        let check = rule.check(name);
        tracing::debug!("dir  {} ok={}", relative, check.passed());

        if !check.passed() {
            summary.add_issue(Issue::new(
                IssueKind::DirectoryNaming,
                relative,
                format!(
                    "Directory naming issues: {}. Example of valid directory name: '{}'",
                    check.joined(),
                    self.policy.example_valid_name(EntryKind::Directory, None)
                ),
            ));
        }
    }

    fn visit_file(&self, summary: &mut Summary, relative: &str, name: &str) {
        summary.record_file();

        let rule = self.policy.resolve_rule(EntryKind::File, name);
        let check = rule.check(name);
        tracing::debug!("file {} ok={}", relative, check.passed());

        if !check.passed() {
            summary.add_issue(Issue::new(
                IssueKind::FileNaming,
                relative,
                format!(
                    "File naming issues: {}. Example of valid file name: '{}'",
                    check.joined(),
                    self.policy
                        .example_valid_name(EntryKind::File, extension_of(name))
                ),
            ));
        }
    }
}

/// `path` relative to `root`, `/`-separated
fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
