//! External static-site generator invocation.
//!
//! The generated markdown is turned into HTML by an external program
//! (`mkdocs` by default). It is never installed on demand: [`SiteGenerator::preflight`]
//! checks that it can be started before any work is done, and a missing
//! program is a fatal [`SiteError::MissingDependency`].

use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("'{program}' not found on PATH; install it (e.g. `pip install mkdocs mkdocs-material`)")]
    MissingDependency { program: String },
    #[error("failed to run '{program}': {source}")]
    Io {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("'{program} {action}' failed with {status}")]
    Failed {
        program: String,
        action: String,
        status: ExitStatus,
    },
}

#[derive(Debug, Clone)]
pub struct SiteGenerator {
    program: String,
}

impl SiteGenerator {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Confirm the program can be started (`<program> --version`).
    pub fn preflight(&self) -> Result<(), SiteError> {
        self.run("--version", &["--version"], None)
    }

    /// `<program> build -f mkdocs.yml -d site` inside `docs_root`.
    pub fn build(&self, docs_root: &Path) -> Result<(), SiteError> {
        self.run(
            "build",
            &["build", "-f", "mkdocs.yml", "-d", "site"],
            Some(docs_root),
        )
    }

    /// `<program> serve -a <addr>` inside `docs_root`. Blocks until the server exits.
    pub fn serve(&self, docs_root: &Path, addr: &str) -> Result<(), SiteError> {
        self.run("serve", &["serve", "-f", "mkdocs.yml", "-a", addr], Some(docs_root))
    }

    fn run(&self, action: &str, args: &[&str], cwd: Option<&Path>) -> Result<(), SiteError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(args);
        if let Some(dir) = cwd {
            cmd.current_dir(dir);
        }
        tracing::debug!(program = %self.program, ?args, "running site generator");

        let status = cmd.status().map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                SiteError::MissingDependency {
                    program: self.program.clone(),
                }
            } else {
                SiteError::Io {
                    program: self.program.clone(),
                    source,
                }
            }
        })?;

        if status.success() {
            Ok(())
        } else {
            Err(SiteError::Failed {
                program: self.program.clone(),
                action: action.to_string(),
                status,
            })
        }
    }
}
