//! Shared test utilities.
//!
//! Fixture trees are built on the fly inside a `TempDir`, so each test
//! states exactly the files it depends on.
//!
//! ```ignore
//! let tmp = TempDir::new().unwrap();
//! write_tree(tmp.path(), &[("src/a.py", "[vmdoc:start]x[vmdoc:end]"), ("b.txt", "")]);
//!
//! let files = PathMatcher::parse(DEFAULT_PATTERNS, &mut diags)
//!     .matching_files(tmp.path(), &mut diags)
//!     .unwrap();
//! assert_eq!(relative_paths(&files), vec!["src/a.py"]);
//! ```

use std::path::Path;

use crate::emit::EmittedDoc;
use crate::generate::GenerateReport;
use crate::matcher::SourceFileRef;

// =========================================================================
// Fixture setup
// =========================================================================

/// A `mkdocs.yml` as a user would have it before the first generate run.
pub const SAMPLE_MKDOCS_YML: &str = "\
site_name: Sample Docs
theme:
  name: material
  features:
    - content.code.copy
nav:
  - Home: index.md
  - vmdoc: vmdoc/vmdocs.md
markdown_extensions:
  - codehilite:
      guess_lang: false
  - fenced_code
  - attr_list
plugins:
  - search
";

/// Write `(relative path, content)` pairs under `root`, creating parents.
pub fn write_tree(root: &Path, files: &[(&str, &str)]) {
    for (rel, content) in files {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
    }
}

/// A source reference rooted at `root`.
pub fn source_ref(root: &Path, relative: &str) -> SourceFileRef {
    SourceFileRef {
        relative: relative.to_string(),
        absolute: root.join(relative),
    }
}

// =========================================================================
// Lookups: panic with a clear message on miss
// =========================================================================

/// Relative paths of a working set, in order.
pub fn relative_paths(files: &[SourceFileRef]) -> Vec<&str> {
    files.iter().map(|f| f.relative.as_str()).collect()
}

/// Find a documented file in a report by relative path. Panics if not found.
pub fn find_doc<'a>(report: &'a GenerateReport, relative: &str) -> &'a EmittedDoc {
    report
        .documented
        .iter()
        .find(|d| d.source.relative == relative)
        .unwrap_or_else(|| {
            let paths: Vec<&str> = report
                .documented
                .iter()
                .map(|d| d.source.relative.as_str())
                .collect();
            panic!("document '{relative}' not found. Available: {paths:?}")
        })
}
