//! Markdown page and raw sidecar emission.
//!
//! Each documented source file produces two files in the output directory:
//!
//! ```text
//! docs/vmdoc/
//! ├── http_client.py_3f9a0c21b4e7.md    # front matter + extracted body
//! └── http_client.py_3f9a0c21b4e7.txt   # verbatim copy of the source
//! ```
//!
//! The page is written first. If the sidecar then fails (source deleted,
//! unreadable, disk full) the page stays on disk and the failure is reported
//! as a warning: the two writes are not atomic as a pair.

use crate::diagnostics::{Diagnostics, Warning};
use crate::extract::{ExtractedDoc, strip_skip_lines};
use crate::matcher::SourceFileRef;
use crate::naming::{OutputId, output_id};
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Front matter of a generated page.
#[derive(Debug, Serialize)]
struct FrontMatter<'a> {
    title: &'a str,
    source_file: &'a str,
    description: &'a str,
    generated_from: &'static str,
    source_code_file: &'a str,
}

/// A page that was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedDoc {
    pub source: SourceFileRef,
    pub id: OutputId,
    /// Extracted description, empty when the file has none.
    pub description: String,
    pub sidecar_written: bool,
}

/// Writes generated pages into one output directory.
#[derive(Debug, Clone)]
pub struct DocEmitter {
    out_dir: PathBuf,
    skip_marker: String,
}

impl DocEmitter {
    /// Create the output directory if needed.
    ///
    /// Failing to create it is fatal for the run, unlike per-file failures.
    pub fn prepare(out_dir: &Path, skip_marker: &str) -> io::Result<Self> {
        fs::create_dir_all(out_dir)?;
        Ok(Self {
            out_dir: out_dir.to_path_buf(),
            skip_marker: skip_marker.to_string(),
        })
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Render the markdown page for `doc`.
    pub fn render_markdown(&self, doc: &ExtractedDoc, id: &OutputId) -> String {
        let sidecar = id.sidecar_file();
        let front = FrontMatter {
            title: &doc.source.relative,
            source_file: &doc.source.relative,
            description: doc.description.as_deref().unwrap_or(""),
            generated_from: "vmdoc",
            source_code_file: &sidecar,
        };
        // Serializing a struct of plain strings cannot fail; fall back to an
        // empty block rather than panicking.
        let yaml = serde_yaml::to_string(&front).unwrap_or_default();
        let body = strip_skip_lines(&doc.joined_body(), &self.skip_marker);

        format!(
            "---\n{yaml}---\n\n[View raw source code]({sidecar})\n\n{}\n",
            body.trim()
        )
    }

    /// Write page and sidecar for one document.
    ///
    /// Returns `None` when the page itself could not be written; the document
    /// is then left out of navigation and the overview.
    pub fn emit(&self, doc: &ExtractedDoc, diags: &mut Diagnostics) -> Option<EmittedDoc> {
        let id = output_id(&doc.source.relative);
        let md_path = self.out_dir.join(id.markdown_file());

        if let Err(e) = fs::write(&md_path, self.render_markdown(doc, &id)) {
            diags.warn(Warning::FileIo {
                path: md_path,
                reason: e.to_string(),
            });
            return None;
        }

        let sidecar_path = self.out_dir.join(id.sidecar_file());
        let sidecar_written = match copy_verbatim(&doc.source.absolute, &sidecar_path) {
            Ok(()) => true,
            Err(e) => {
                diags.warn(Warning::FileIo {
                    path: doc.source.absolute.clone(),
                    reason: format!("sidecar not written: {e}"),
                });
                false
            }
        };

        tracing::debug!(source = %doc.source.relative, id = %id, "emitted");
        Some(EmittedDoc {
            source: doc.source.clone(),
            id,
            description: doc.description.clone().unwrap_or_default(),
            sidecar_written,
        })
    }
}

/// Re-read the source and write it unmodified.
fn copy_verbatim(source: &Path, dest: &Path) -> io::Result<()> {
    let bytes = fs::read(source)?;
    fs::write(dest, bytes)
}
