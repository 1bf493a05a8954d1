//! Source file selection with gitignore-style rules.
//!
//! A rule set is an ordered list of [`PatternRule`]s. Every regular file under
//! the scanned root is tested against all of them; the **last** rule that
//! matches decides. A file is included only when that rule is a negation
//! (`!pattern`). Files no rule matches are excluded, so rule sets normally
//! start from `*` and whitelist what they want:
//!
//! ```text
//! *                # exclude everything
//! !*.py            # ...but include Python files
//! node_modules/    # ...except anything below a node_modules directory
//! ```
//!
//! ## Rule Syntax
//!
//! | Form | Meaning |
//! |------|---------|
//! | blank, `# comment` | ignored |
//! | `!pat` | negation (include) |
//! | `pat/` | only matches directories, i.e. everything below them |
//! | `/pat`, `a/pat` | anchored: matched against the whole relative path |
//! | `pat` (no `/`) | matched against the last component at any depth |
//! | `*`, `?`, `[a-z]`, `**` | glob syntax; `*` never crosses `/` |
//! | `\!pat`, `\#pat` | literal leading `!` / `#` |
//!
//! A rule that is not a directory-only rule matches a file when it matches the
//! file's own path or any ancestor directory, so `build` excludes everything
//! under any `build` directory just like gitignore does. Unlike git, a later
//! negation can still re-include a file under an excluded directory: rules
//! are evaluated per file, not per directory.
//!
//! Malformed lines produce a [`Warning::MalformedPattern`] and are skipped.

use crate::diagnostics::{Diagnostics, Warning};
use glob::{MatchOptions, Pattern};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Rule set used when no override is configured.
pub const DEFAULT_PATTERNS: &str = r#"
# Exclude everything by default
*

# Include code files
!*.py
!*.cpp
!*.h
!*.hpp
!*.java
!*.js
!*.rs

# Exclude environments, generated docs and build output
*venv/
vmdoc/
node_modules/
build/
dist/
target/

# Exclude logs and temp files
*.log
*.tmp
"#;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Source directory not found or unreadable: {}", .0.display())]
    NotFound(PathBuf),
}

/// A discovered source file.
///
/// `relative` is `/`-separated and unique within one scan. Ordering is by
/// relative path.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceFileRef {
    pub relative: String,
    pub absolute: PathBuf,
}

/// One parsed rule line.
#[derive(Debug, Clone)]
pub struct PatternRule {
    /// The line as written (trimmed).
    pub source: String,
    pub negated: bool,
    pub dir_only: bool,
    pub anchored: bool,
    glob: Pattern,
}

impl PatternRule {
    /// Parse one line. `Ok(None)` for blank lines and comments.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let source = line.trim();
        if source.is_empty() || source.starts_with('#') {
            return Ok(None);
        }

        let mut body = source;
        let mut negated = false;
        if let Some(rest) = body.strip_prefix('!') {
            negated = true;
            body = rest;
        } else if let Some(rest) = body.strip_prefix('\\') {
            body = rest;
        }

        let mut dir_only = false;
        if let Some(rest) = body.strip_suffix('/') {
            dir_only = true;
            body = rest;
        }

        let mut anchored = false;
        if let Some(rest) = body.strip_prefix('/') {
            anchored = true;
            body = rest;
        }

        // `**/name` is the same as an unanchored `name`.
        while let Some(rest) = body.strip_prefix("**/") {
            body = rest;
        }
        if body.contains('/') {
            anchored = true;
        }

        if body.is_empty() {
            return Err("empty pattern".to_string());
        }

        let glob = Pattern::new(body).map_err(|e| e.msg.to_string())?;
        Ok(Some(Self {
            source: source.to_string(),
            negated,
            dir_only,
            anchored,
            glob,
        }))
    }

    /// Test a single `/`-separated candidate path.
    fn matches_candidate(&self, candidate: &str) -> bool {
        if self.anchored {
            self.glob.matches_with(candidate, MATCH_OPTIONS)
        } else {
            let name = candidate.rsplit('/').next().unwrap_or(candidate);
            self.glob.matches_with(name, MATCH_OPTIONS)
        }
    }

    /// Whether this rule applies to the file at `relative`.
    pub fn matches_file(&self, relative: &str) -> bool {
        if !self.dir_only && self.matches_candidate(relative) {
            return true;
        }
        ancestors(relative).any(|dir| self.matches_candidate(dir))
    }

    /// Whether this rule applies to the directory at `relative` (and hence
    /// to everything below it).
    fn matches_dir(&self, relative: &str) -> bool {
        self.matches_candidate(relative) || ancestors(relative).any(|d| self.matches_candidate(d))
    }
}

/// Proper ancestor directories of a relative path, shallowest first:
/// `a/b/c.py` → `a`, `a/b`.
fn ancestors(relative: &str) -> impl Iterator<Item = &str> {
    relative
        .match_indices('/')
        .map(move |(idx, _)| &relative[..idx])
}

/// Ordered rule set.
#[derive(Debug, Clone, Default)]
pub struct PathMatcher {
    rules: Vec<PatternRule>,
}

impl PathMatcher {
    /// Parse a multi-line rule set, skipping malformed lines with a warning.
    pub fn parse(patterns: &str, diags: &mut Diagnostics) -> Self {
        let mut rules = Vec::new();
        for (idx, line) in patterns.lines().enumerate() {
            match PatternRule::parse(line) {
                Ok(Some(rule)) => rules.push(rule),
                Ok(None) => {}
                Err(reason) => diags.warn(Warning::MalformedPattern {
                    line: idx + 1,
                    pattern: line.trim().to_string(),
                    reason,
                }),
            }
        }
        Self { rules }
    }

    pub fn rules(&self) -> &[PatternRule] {
        &self.rules
    }

    /// Last-match-wins decision for one file.
    pub fn is_included(&self, relative: &str) -> bool {
        self.rules
            .iter()
            .rev()
            .find(|r| r.matches_file(relative))
            .is_some_and(|r| r.negated)
    }

    /// A directory can be skipped when the last rule covering it excludes it
    /// and no negation follows that rule: every file below would be excluded.
    fn can_prune_dir(&self, relative: &str) -> bool {
        let Some(idx) = self.rules.iter().rposition(|r| r.matches_dir(relative)) else {
            return false;
        };
        !self.rules[idx].negated && !self.rules[idx + 1..].iter().any(|r| r.negated)
    }

    /// Walk `root` and return every included regular file, sorted by
    /// relative path.
    ///
    /// Fails only when the root itself is missing or unreadable. Unreadable
    /// entries below it and non-UTF-8 names are reported and skipped.
    pub fn matching_files(
        &self,
        root: &Path,
        diags: &mut Diagnostics,
    ) -> Result<Vec<SourceFileRef>, ScanError> {
        let root = fs::canonicalize(root).map_err(|_| ScanError::NotFound(root.to_path_buf()))?;
        if fs::read_dir(&root).is_err() {
            return Err(ScanError::NotFound(root));
        }

        let mut files = Vec::new();
        let walker = WalkDir::new(&root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                if entry.depth() == 0 || !entry.file_type().is_dir() {
                    return true;
                }
                match relative_path(&root, entry.path()) {
                    Some(rel) => !self.can_prune_dir(&rel),
                    None => true,
                }
            });

        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    diags.warn(Warning::FileIo {
                        path: e.path().map(Path::to_path_buf).unwrap_or_else(|| root.clone()),
                        reason: e.to_string(),
                    });
                    continue;
                }
            };
            if entry.file_type().is_symlink() {
                // File links are read through; directory links are not walked.
                match fs::metadata(entry.path()) {
                    Ok(meta) if meta.is_file() => {}
                    Ok(_) => continue,
                    Err(e) => {
                        diags.warn(Warning::FileIo {
                            path: entry.path().to_path_buf(),
                            reason: format!("broken symlink: {e}"),
                        });
                        continue;
                    }
                }
            } else if !entry.file_type().is_file() {
                continue;
            }
            let Some(relative) = relative_path(&root, entry.path()) else {
                diags.warn(Warning::FileIo {
                    path: entry.path().to_path_buf(),
                    reason: "path is not valid UTF-8".to_string(),
                });
                continue;
            };
            if self.is_included(&relative) {
                files.push(SourceFileRef {
                    relative,
                    absolute: entry.into_path(),
                });
            }
        }

        files.sort();
        tracing::debug!(root = %root.display(), files = files.len(), "scan complete");
        Ok(files)
    }
}

/// `/`-joined path of `path` below `root`; `None` for non-UTF-8 components.
fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Option<Vec<&str>> = rel.components().map(|c| c.as_os_str().to_str()).collect();
    Some(parts?.join("/"))
}
