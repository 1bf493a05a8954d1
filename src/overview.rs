//! Flat overview page listing every documented file.
//!
//! Unlike the nav section, the overview page is owned entirely by the
//! generator and is rewritten from scratch on every run. It lives next to the
//! generated pages, so links are bare file names.

use crate::emit::EmittedDoc;
use std::io;
use std::path::Path;

const HEADING: &str = "# Vmdoc Overview";
const INTRO: &str = "This document lists all the generated documentation files.";

/// Render the overview markdown for `docs`, sorted by relative source path.
pub fn render_overview(docs: &[EmittedDoc]) -> String {
    let mut sorted: Vec<&EmittedDoc> = docs.iter().collect();
    sorted.sort_by(|a, b| a.source.relative.cmp(&b.source.relative));

    let mut out = format!("{HEADING}\n\n{INTRO}\n\n");
    for doc in sorted {
        let description = single_line(&doc.description);
        out.push_str(&format!(
            "- [{}]({}) - {}\n",
            doc.source.relative,
            doc.id.markdown_file(),
            description
        ));
    }
    out
}

/// Collapse runs of whitespace, including newlines, into single spaces.
fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Overwrite `<out_dir>/<page_name>` with the rendered overview.
pub fn write_overview(out_dir: &Path, page_name: &str, docs: &[EmittedDoc]) -> io::Result<()> {
    let path = out_dir.join(page_name);
    std::fs::write(&path, render_overview(docs))?;
    tracing::info!(path = %path.display(), documents = docs.len(), "wrote overview page");
    Ok(())
}
