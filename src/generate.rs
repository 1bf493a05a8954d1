//! The generate run: scan → extract → emit → nav.
//!
//! ```text
//! source/            ──scan──►  working set (sorted)
//!   src/http.py                 │
//!   src/util.py      ──extract─►  tagged docs
//!                               │
//! docs/              ◄──emit───┘  <out>/<id>.md + <id>.txt, manifest
//!   mkdocs.yml       ◄──nav────   managed section replaced or removed
//!   docs/vmdoc/vmdocs.md ◄──────  overview page rewritten
//! ```
//!
//! A [`Generator`] moves through the [`Stage`]s in order and never revisits
//! one. Only three things stop a run: a missing source root (detected before
//! anything is written), an output directory that cannot be created, and a
//! docs project that cannot be scaffolded. Everything else is a
//! [`Warning`] collected into the [`GenerateReport`].

use crate::config::{NavMode, VmdocConfig};
use crate::diagnostics::{Diagnostics, Warning};
use crate::emit::{DocEmitter, EmittedDoc};
use crate::extract::{ExtractedDoc, TagExtractor};
use crate::manifest::{self, GenerationManifest};
use crate::matcher::{PathMatcher, ScanError, SourceFileRef};
use crate::nav::{NavEntry, NavOutcome, SectionUpdate, rewrite_nav_section};
use crate::overview::write_overview;
use crate::scaffold;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error("Cannot create output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Cannot create docs project at {}: {source}", path.display())]
    Scaffold {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Scanning,
    Extracting,
    Emitting,
    RewritingNav,
    Done,
    Failed,
}

#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Root of the source tree to scan.
    pub source: PathBuf,
    /// Docs project root (holds `mkdocs.yml` and `docs/`).
    pub docs_root: PathBuf,
    /// Delete pages recorded by the previous run but not produced by this one.
    pub prune: bool,
}

/// Outcome of a completed run.
#[derive(Debug)]
pub struct GenerateReport {
    pub source: PathBuf,
    pub out_dir: PathBuf,
    /// Files in the working set.
    pub scanned: usize,
    /// Pages written, sorted by relative source path.
    pub documented: Vec<EmittedDoc>,
    /// Working-set files with nothing to extract.
    pub untagged: usize,
    /// Whether a default docs project was created.
    pub scaffolded: bool,
    pub nav_mode: NavMode,
    pub nav: NavOutcome,
    /// Path of the overview page, when it was written.
    pub overview: Option<PathBuf>,
    /// Identifiers from the previous run that this run did not produce.
    pub stale: Vec<String>,
    /// Files deleted by pruning.
    pub pruned: usize,
    pub warnings: Vec<Warning>,
}

pub struct Generator<'a> {
    config: &'a VmdocConfig,
    options: GenerateOptions,
    stage: Stage,
}

impl<'a> Generator<'a> {
    pub fn new(config: &'a VmdocConfig, options: GenerateOptions) -> Self {
        Self {
            config,
            options,
            stage: Stage::Idle,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    fn enter(&mut self, stage: Stage) {
        tracing::debug!(from = ?self.stage, to = ?stage, "stage");
        self.stage = stage;
    }

    /// Execute the run. Construct a new generator for each run.
    pub fn run(&mut self) -> Result<GenerateReport, GenerateError> {
        let mut diags = Diagnostics::new();
        match self.run_stages(&mut diags) {
            Ok(mut report) => {
                self.enter(Stage::Done);
                report.warnings = diags.into_warnings();
                Ok(report)
            }
            Err(e) => {
                self.enter(Stage::Failed);
                Err(e)
            }
        }
    }

    fn run_stages(&mut self, diags: &mut Diagnostics) -> Result<GenerateReport, GenerateError> {
        let config = self.config;
        let source = self.options.source.clone();
        let docs_root = self.options.docs_root.clone();

        self.enter(Stage::Scanning);
        let matcher = PathMatcher::parse(config.patterns.effective(), diags);
        let files = matcher.matching_files(&source, diags)?;
        tracing::info!(source = %source.display(), files = files.len(), "scanned");

        self.enter(Stage::Extracting);
        let (tagged, untagged) = extract_all(config, &files, diags);

        self.enter(Stage::Emitting);
        let scaffolded = if docs_root.exists() {
            false
        } else {
            scaffold::default_project(&docs_root, &config.site.name, &config.output).map_err(
                |source| GenerateError::Scaffold {
                    path: docs_root.clone(),
                    source,
                },
            )?
        };
        let out_dir = docs_root.join("docs").join(&config.output.dir);
        let emitter = DocEmitter::prepare(&out_dir, &config.tags.skip_line).map_err(|source| {
            GenerateError::OutputDir {
                path: out_dir.clone(),
                source,
            }
        })?;

        let previous = GenerationManifest::load(&out_dir);
        let mut current = GenerationManifest::empty();
        let mut documented = Vec::new();
        for doc in &tagged {
            if let Some(emitted) = emitter.emit(doc, diags) {
                current.insert(&emitted.id, &emitted.source.relative);
                documented.push(emitted);
            }
        }
        if let Err(e) = current.save(&out_dir) {
            diags.warn(Warning::FileIo {
                path: out_dir.join(manifest::MANIFEST_FILENAME),
                reason: e.to_string(),
            });
        }

        let stale = previous.orphans(&current);
        let pruned = if self.options.prune {
            manifest::prune(&out_dir, &stale, diags)
        } else {
            if !stale.is_empty() {
                tracing::info!(count = stale.len(), "stale pages kept (use --prune to delete)");
            }
            0
        };

        self.enter(Stage::RewritingNav);
        let nav = rewrite_nav(config, &docs_root, &documented, diags);
        let overview = write_overview(&out_dir, &config.output.overview_page, &documented)
            .map(|()| out_dir.join(&config.output.overview_page))
            .map_err(|e| {
                diags.warn(Warning::FileIo {
                    path: out_dir.join(&config.output.overview_page),
                    reason: e.to_string(),
                })
            })
            .ok();

        Ok(GenerateReport {
            source,
            out_dir,
            scanned: files.len(),
            documented,
            untagged,
            scaffolded,
            nav_mode: config.output.nav_mode,
            nav,
            overview,
            stale,
            pruned,
            warnings: Vec::new(),
        })
    }
}

/// Read and extract every file. Returns the documented files and the number
/// of files with nothing to extract.
fn extract_all(
    config: &VmdocConfig,
    files: &[SourceFileRef],
    diags: &mut Diagnostics,
) -> (Vec<ExtractedDoc>, usize) {
    let extractor = TagExtractor::new(&config.tags);
    let mut tagged = Vec::new();
    let mut untagged = 0;

    for file in files {
        let text = match fs::read_to_string(&file.absolute) {
            Ok(t) => t,
            Err(e) => {
                diags.warn(Warning::FileIo {
                    path: file.absolute.clone(),
                    reason: e.to_string(),
                });
                continue;
            }
        };
        let (doc, mismatches) = extractor.extract(file.clone(), &text);
        for m in mismatches {
            diags.warn(Warning::TagMismatch {
                path: file.relative.clone(),
                start_tag: m.tags.start,
                end_tag: m.tags.end,
                starts: m.mismatch.starts,
                ends: m.mismatch.ends,
            });
        }
        if doc.is_empty() {
            untagged += 1;
        } else {
            tagged.push(doc);
        }
    }
    (tagged, untagged)
}

fn rewrite_nav(
    config: &VmdocConfig,
    docs_root: &Path,
    documented: &[EmittedDoc],
    diags: &mut Diagnostics,
) -> NavOutcome {
    let entries: Vec<NavEntry> = documented
        .iter()
        .map(|doc| {
            NavEntry::page(
                &doc.source.relative,
                format!("{}/{}", config.output.dir, doc.id.markdown_file()),
            )
        })
        .collect();
    let update = match config.output.nav_mode {
        NavMode::Overview => SectionUpdate::Remove,
        NavMode::Section => SectionUpdate::Replace(&entries),
    };
    rewrite_nav_section(
        &docs_root.join("mkdocs.yml"),
        &config.output.nav_section,
        update,
        diags,
    )
}

/// Run one generate pass with `config`.
pub fn generate(
    config: &VmdocConfig,
    options: GenerateOptions,
) -> Result<GenerateReport, GenerateError> {
    Generator::new(config, options).run()
}
