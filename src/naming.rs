//! Output identifiers for generated pages.
//!
//! Every documented source file gets one identifier, used as the stem of both
//! its markdown page and its raw sidecar:
//!
//! ```text
//! src/net/http__client.py  →  http_client.py_3f9a0c21b4e7
//!                              └── basename ──┘ └── hash ──┘
//! ```
//!
//! The basename keeps its extension and has every `__` collapsed to `_`. The
//! suffix is the first [`HASH_LEN`] hex digits of the SHA-256 of the relative
//! path, so two files whose basenames collapse to the same text still get
//! distinct identifiers (`a/b__c.py` vs `a/b_c.py`).
//!
//! Identifiers depend only on the relative path string: no filesystem access,
//! no clock, no process state. The same tree always yields the same names.

use sha2::{Digest, Sha256};
use std::fmt;

/// Number of hex digits kept from the path digest.
pub const HASH_LEN: usize = 12;

/// Stable identifier of a generated page pair (`<id>.md`, `<id>.txt`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OutputId(String);

impl OutputId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name of the generated markdown page.
    pub fn markdown_file(&self) -> String {
        format!("{}.md", self.0)
    }

    /// File name of the raw source sidecar.
    pub fn sidecar_file(&self) -> String {
        format!("{}.txt", self.0)
    }
}

impl fmt::Display for OutputId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for OutputId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Derive the output identifier for a `/`-separated relative path.
pub fn output_id(relative_path: &str) -> OutputId {
    OutputId(format!(
        "{}_{}",
        collapsed_basename(relative_path),
        path_hash(relative_path)
    ))
}

/// Last path component with every `__` replaced by `_`.
///
/// A single left-to-right pass, so `a___b` becomes `a__b`. Existing output
/// names depend on this exact behavior.
pub fn collapsed_basename(relative_path: &str) -> String {
    let basename = relative_path
        .rsplit('/')
        .next()
        .unwrap_or(relative_path);
    basename.replace("__", "_")
}

/// Truncated hex SHA-256 of the relative path.
pub fn path_hash(relative_path: &str) -> String {
    let digest = Sha256::digest(relative_path.as_bytes());
    let mut hex = format!("{:x}", digest);
    hex.truncate(HASH_LEN);
    hex
}
