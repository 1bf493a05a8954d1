//! Recoverable conditions raised during a generate run.
//!
//! Nothing in here aborts a run. Each [`Warning`] is logged through `tracing`
//! the moment it is recorded and kept in a [`Diagnostics`] sink so the CLI
//! can summarize it and tests can assert on it.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    #[error("Malformed pattern on line {line} ({pattern:?}): {reason}")]
    MalformedPattern {
        line: usize,
        pattern: String,
        reason: String,
    },
    #[error("Mismatched tags in {path}: {starts} x {start_tag} but {ends} x {end_tag}")]
    TagMismatch {
        path: String,
        start_tag: String,
        end_tag: String,
        starts: usize,
        ends: usize,
    },
    #[error("File error for {}: {reason}", path.display())]
    FileIo { path: PathBuf, reason: String },
    #[error("Config not updated ({}): {reason}", path.display())]
    ConfigParse { path: PathBuf, reason: String },
}

/// Warning sink threaded through a run.
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning and log it.
    pub fn warn(&mut self, warning: Warning) {
        tracing::warn!("{warning}");
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_in_order() {
        let mut diags = Diagnostics::new();
        diags.warn(Warning::FileIo {
            path: PathBuf::from("a.py"),
            reason: "gone".into(),
        });
        diags.warn(Warning::ConfigParse {
            path: PathBuf::from("mkdocs.yml"),
            reason: "no nav".into(),
        });

        assert_eq!(diags.warnings().len(), 2);
        assert!(matches!(diags.warnings()[0], Warning::FileIo { .. }));
        assert!(matches!(diags.warnings()[1], Warning::ConfigParse { .. }));
    }

    #[test]
    fn tag_mismatch_message_names_both_counts() {
        let w = Warning::TagMismatch {
            path: "src/a.py".into(),
            start_tag: "[vmdoc:start]".into(),
            end_tag: "[vmdoc:end]".into(),
            starts: 2,
            ends: 1,
        };
        let msg = w.to_string();
        assert!(msg.contains("src/a.py"));
        assert!(msg.contains("2 x [vmdoc:start]"));
        assert!(msg.contains("1 x [vmdoc:end]"));
    }
}
