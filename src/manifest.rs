//! Record of the pages written by the last run.
//!
//! Output names are derived from source paths, so renaming or deleting a
//! source file leaves its old page pair behind in the output directory. The
//! generator records every identifier it wrote in
//! `<output_dir>/.vmdoc-manifest.json`; the next run compares that list with
//! what it just produced.
//!
//! Stale pages are kept unless pruning is requested. Pruning only ever removes
//! files this tool recorded itself: hand-written pages that share the output
//! directory are never touched, and neither is anything when the manifest is
//! missing or unreadable.

use crate::diagnostics::{Diagnostics, Warning};
use crate::naming::OutputId;
use std::collections::BTreeMap;
use std::io;
use std::path::{Component, Path};

/// Name of the manifest file within the output directory.
pub const MANIFEST_FILENAME: &str = ".vmdoc-manifest.json";

/// Bump to discard manifests written by an incompatible version.
const MANIFEST_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GenerationManifest {
    pub version: u32,
    /// Output identifier → relative source path.
    pub outputs: BTreeMap<String, String>,
}

impl GenerationManifest {
    pub fn empty() -> Self {
        Self {
            version: MANIFEST_VERSION,
            outputs: BTreeMap::new(),
        }
    }

    /// Load from the output directory. Missing, corrupt, or outdated files
    /// yield an empty manifest.
    pub fn load(output_dir: &Path) -> Self {
        let path = output_dir.join(MANIFEST_FILENAME);
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(_) => return Self::empty(),
        };
        match serde_json::from_str::<Self>(&content) {
            Ok(m) if m.version == MANIFEST_VERSION => m,
            _ => Self::empty(),
        }
    }

    pub fn save(&self, output_dir: &Path) -> io::Result<()> {
        let path = output_dir.join(MANIFEST_FILENAME);
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
    }

    pub fn insert(&mut self, id: &OutputId, relative_source: &str) {
        self.outputs
            .insert(id.as_str().to_string(), relative_source.to_string());
    }

    /// Identifiers recorded here but absent from `current`, sorted.
    pub fn orphans(&self, current: &GenerationManifest) -> Vec<String> {
        self.outputs
            .keys()
            .filter(|id| !current.outputs.contains_key(*id))
            .cloned()
            .collect()
    }
}

/// Delete the page pair of every identifier in `ids`.
///
/// Returns how many files were removed. Files already gone are not an error.
/// Ids that are not a plain file name are reported and left alone.
pub fn prune(output_dir: &Path, ids: &[String], diags: &mut Diagnostics) -> usize {
    let mut removed = 0;
    for id in ids {
        if !is_plain_name(id) {
            diags.warn(Warning::FileIo {
                path: output_dir.join(MANIFEST_FILENAME),
                reason: format!("refusing to prune suspicious id {id:?}"),
            });
            continue;
        }
        for name in [format!("{id}.md"), format!("{id}.txt")] {
            let path = output_dir.join(name);
            match std::fs::remove_file(&path) {
                Ok(()) => {
                    tracing::info!(path = %path.display(), "pruned stale output");
                    removed += 1;
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => diags.warn(Warning::FileIo {
                    path,
                    reason: e.to_string(),
                }),
            }
        }
    }
    removed
}

fn is_plain_name(id: &str) -> bool {
    let mut components = Path::new(id).components();
    matches!(components.next(), Some(Component::Normal(_))) && components.next().is_none()
}
