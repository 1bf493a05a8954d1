//! # vmdoc
//!
//! Turns documentation written inside source comments into an MkDocs site.
//! Source files mark the text to publish with literal tags; everything else
//! about the site (page names, navigation, the overview listing) is derived.
//!
//! # Pipeline
//!
//! ```text
//! 1. Scan     source/   →  working set       (gitignore-style rules)
//! 2. Extract  files     →  tagged text       (positional start/end pairing)
//! 3. Emit     text      →  docs/<dir>/       (<id>.md page + <id>.txt sidecar)
//! 4. Nav      pages     →  mkdocs.yml        (one managed nav section)
//!             pages     →  <dir>/vmdocs.md   (overview page, fully rewritten)
//! ```
//!
//! Building the HTML is left to the external generator (`mkdocs build`),
//! invoked afterwards when requested.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`matcher`] | Include/exclude rules and the sorted working set |
//! | [`extract`] | Tag-pair extraction of body and description |
//! | [`naming`] | Stable `<basename>_<hash>` output identifiers |
//! | [`emit`] | Markdown page and raw sidecar writer |
//! | [`nav`] | Parse, edit, and reserialize one `nav` section of `mkdocs.yml` |
//! | [`overview`] | Flat listing page of every documented file |
//! | [`generate`] | Orchestrates a run and produces the report |
//! | [`manifest`] | Record of pages written, used to find and prune stale ones |
//! | [`scaffold`] | Default single and monorepo MkDocs projects |
//! | [`monorepo`] | Merge several docs projects into one site |
//! | [`site`] | External generator preflight, build, and serve |
//! | [`config`] | `vmdoc.toml` loading, merging, and validation |
//! | [`diagnostics`] | Recoverable warnings collected during a run |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Warnings, Not Errors
//!
//! One badly tagged file or an unreadable directory must not cost the rest of
//! the documentation. Per-file problems become [`diagnostics::Warning`]s that
//! are logged and reported; only a missing source root, an uncreatable output
//! directory, invalid configuration, and a missing external generator stop a
//! run.
//!
//! ## Tree Edit of `mkdocs.yml`
//!
//! The nav section is edited on the parsed YAML tree. Only the `nav` value is
//! serialized and put back in place of the old block, so every other key keeps
//! its text, including comments and tags like `!!python/name:`. The file is
//! only written when the nav changes, so repeated runs leave it untouched.
//!
//! ## Hash-Suffixed Page Names
//!
//! Page names keep the source basename for readability and add a short hash
//! of the relative path for uniqueness. They depend on nothing but the path,
//! so links to generated pages survive regeneration.
//!
//! ## No Implicit Deletion
//!
//! The output directory may hold hand-written pages. Generated pages that
//! lost their source are only removed with `--prune`, and only when a previous
//! run recorded them in its manifest.

pub mod config;
pub mod diagnostics;
pub mod emit;
pub mod extract;
pub mod generate;
pub mod manifest;
pub mod matcher;
pub mod monorepo;
pub mod naming;
pub mod nav;
pub mod output;
pub mod overview;
pub mod scaffold;
pub mod site;

#[cfg(test)]
pub(crate) mod test_helpers;
