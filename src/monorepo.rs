//! Merge several MkDocs projects into one combined site.
//!
//! ```text
//! combined/
//! ├── mkdocs.yml          nav gets a managed `projects` section
//! ├── docs/index.md
//! └── projects/
//!     ├── backend/        copy of the backend project, minus site/
//!     └── frontend/
//! ```
//!
//! Each project is copied wholesale, except for its `site/` build output. The
//! combined nav lists every site project found under `projects/` (not just the
//! ones merged in this run) as `!include ./projects/<name>/mkdocs.yml`, sorted
//! by name. The `monorepo` plugin resolves the includes at build time.

use crate::diagnostics::{Diagnostics, Warning};
use crate::nav::{NavEntry, NavOutcome, SectionUpdate, rewrite_nav_section};
use crate::scaffold;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Managed nav section of the combined site.
pub const PROJECTS_SECTION: &str = "projects";

/// Build output directory excluded when copying a project.
const BUILD_DIR: &str = "site";

#[derive(Error, Debug)]
pub enum MonorepoError {
    #[error("invalid project name '{0}': must be a single directory name")]
    InvalidName(String),
    #[error("failed to create combined site at {}: {source}", path.display())]
    Scaffold {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to copy {}: {source}", path.display())]
    Copy {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to walk {0}")]
    Walk(#[from] walkdir::Error),
}

/// A directory with both `mkdocs.yml` and `docs/`.
pub fn is_site_project(path: &Path) -> bool {
    path.join("mkdocs.yml").is_file() && path.join("docs").is_dir()
}

/// Names of the site projects directly under `dir`, sorted.
pub fn list_site_projects(dir: &Path) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !is_site_project(&entry.path()) {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            names.push(name.to_string());
        }
    }
    names.sort();
    Ok(names)
}

fn valid_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(components.next(), Some(Component::Normal(_))) && components.next().is_none()
}

/// What a [`MonorepoMerger::merge`] did.
#[derive(Debug)]
pub struct MergeReport {
    pub root: PathBuf,
    /// Project name → number of files copied.
    pub copied: BTreeMap<String, usize>,
    /// Names listed in the regenerated nav section.
    pub listed: Vec<String>,
    pub nav: NavOutcome,
}

#[derive(Debug)]
pub struct MonorepoMerger {
    root: PathBuf,
    projects: BTreeMap<String, PathBuf>,
}

impl MonorepoMerger {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            projects: BTreeMap::new(),
        }
    }

    /// Queue a project for merging under `name`.
    ///
    /// Directories that are not site projects are skipped and `Ok(false)` is
    /// returned. Adding the same name twice keeps the later path.
    pub fn add_project(&mut self, path: &Path, name: &str) -> Result<bool, MonorepoError> {
        if !valid_name(name) {
            return Err(MonorepoError::InvalidName(name.to_string()));
        }
        if !is_site_project(path) {
            tracing::info!(path = %path.display(), "not a site project, skipping");
            return Ok(false);
        }
        self.projects.insert(name.to_string(), path.to_path_buf());
        Ok(true)
    }

    pub fn projects(&self) -> &BTreeMap<String, PathBuf> {
        &self.projects
    }

    /// Regenerate the `projects` nav section from the contents of `projects/`.
    pub fn update_nav(&self, diags: &mut Diagnostics) -> (Vec<String>, NavOutcome) {
        let projects_dir = self.root.join("projects");
        let names = match list_site_projects(&projects_dir) {
            Ok(names) => names,
            Err(e) => {
                diags.warn(Warning::FileIo {
                    path: projects_dir,
                    reason: e.to_string(),
                });
                return (Vec::new(), NavOutcome::Skipped);
            }
        };

        let entries: Vec<NavEntry> = names
            .iter()
            .map(|name| NavEntry::include(name, format!("./projects/{name}/mkdocs.yml")))
            .collect();
        let outcome = rewrite_nav_section(
            &self.root.join("mkdocs.yml"),
            PROJECTS_SECTION,
            SectionUpdate::Replace(&entries),
            diags,
        );
        (names, outcome)
    }

    /// Scaffold the combined site if needed, copy every queued project, and
    /// regenerate the nav.
    pub fn merge(&self, diags: &mut Diagnostics) -> Result<MergeReport, MonorepoError> {
        if !self.root.exists() {
            scaffold::monorepo_project(&self.root).map_err(|source| MonorepoError::Scaffold {
                path: self.root.clone(),
                source,
            })?;
        }

        let mut copied = BTreeMap::new();
        for (name, source) in &self.projects {
            let dest = self.root.join("projects").join(name);
            tracing::info!(from = %source.display(), to = %dest.display(), "copying project");
            let count = copy_project(source, &dest)?;
            copied.insert(name.clone(), count);
        }

        let (listed, nav) = self.update_nav(diags);
        Ok(MergeReport {
            root: self.root.clone(),
            copied,
            listed,
            nav,
        })
    }
}

/// Copy `src` into `dest`, skipping the top-level build directory.
fn copy_project(src: &Path, dest: &Path) -> Result<usize, MonorepoError> {
    let mut count = 0;
    let walker = WalkDir::new(src)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !(e.depth() == 1 && e.file_name() == BUILD_DIR && e.file_type().is_dir()));

    for entry in walker {
        let entry = entry?;
        let Ok(rel) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dest.join(rel);
        let copy_err = |source: io::Error| MonorepoError::Copy {
            path: entry.path().to_path_buf(),
            source,
        };
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(copy_err)?;
        } else {
            fs::copy(entry.path(), &target).map_err(copy_err)?;
            count += 1;
        }
    }
    Ok(count)
}
