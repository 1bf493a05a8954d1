//! Starter MkDocs projects.
//!
//! Two layouts are supported: a single docs project that the generator writes
//! into, and a combined monorepo site that other projects get merged into.
//!
//! ```text
//! docs/                       combined/
//! ├── mkdocs.yml              ├── mkdocs.yml   (monorepo + search plugins)
//! └── docs/                   ├── docs/
//!     └── index.md            │   └── index.md
//!                             └── projects/    (filled by `merge`)
//! ```
//!
//! Existing files are never overwritten.

use crate::config::OutputConfig;
use std::fs;
use std::io;
use std::path::Path;

const THEME: &str = "\
theme:
  name: material
  features:
    - content.code.copy
  palette:
    - media: \"(prefers-color-scheme: light)\"
      scheme: default
      toggle:
        icon: material/toggle-switch-off-outline
        name: Switch to dark mode
    - media: \"(prefers-color-scheme: dark)\"
      scheme: slate
      toggle:
        icon: material/toggle-switch
        name: Switch to light mode
";

const MARKDOWN_EXTENSIONS: &str = "\
markdown_extensions:
  - codehilite:
      guess_lang: false
  - fenced_code
  - pymdownx.superfences
  - pymdownx.tabbed
  - attr_list
";

/// Quote `s` as a YAML scalar when it needs it.
fn yaml_scalar(s: &str) -> String {
    serde_yaml::to_string(s)
        .map(|y| y.trim_end().to_string())
        .unwrap_or_else(|_| format!("{s:?}"))
}

/// `mkdocs.yml` for a single docs project.
pub fn default_config(site_name: &str, output: &OutputConfig) -> String {
    format!(
        "site_name: {}\n\n{THEME}\nnav:\n  - Home: index.md\n  - vmdoc: {}/{}\n\n{MARKDOWN_EXTENSIONS}",
        yaml_scalar(site_name),
        output.dir,
        output.overview_page
    )
}

/// `mkdocs.yml` for a combined monorepo site.
pub fn monorepo_config() -> String {
    format!(
        "site_name: Combined MkDocs Site\n\n{THEME}\nnav:\n  - Home: index.md\n\n{MARKDOWN_EXTENSIONS}plugins:\n  - monorepo\n  - search\n"
    )
}

/// Write `content` to `path` unless it already exists. Returns whether it wrote.
fn write_if_absent(path: &Path, content: &str) -> io::Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    tracing::info!(path = %path.display(), "created");
    Ok(true)
}

/// Create a single docs project at `docs_root`.
///
/// Returns `true` when `mkdocs.yml` was created by this call.
pub fn default_project(docs_root: &Path, site_name: &str, output: &OutputConfig) -> io::Result<bool> {
    let created = write_if_absent(
        &docs_root.join("mkdocs.yml"),
        &default_config(site_name, output),
    )?;
    write_if_absent(
        &docs_root.join("docs/index.md"),
        &format!("# Welcome to {site_name}\n\nThis is your homepage!\n"),
    )?;
    Ok(created)
}

/// Create a combined monorepo site at `root`.
pub fn monorepo_project(root: &Path) -> io::Result<bool> {
    let created = write_if_absent(&root.join("mkdocs.yml"), &monorepo_config())?;
    write_if_absent(
        &root.join("docs/index.md"),
        "# Welcome to MkDocs\n\nThis is your homepage!\n",
    )?;
    fs::create_dir_all(root.join("projects"))?;
    Ok(created)
}
