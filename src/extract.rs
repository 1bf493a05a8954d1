//! Tag-delimited content extraction.
//!
//! Source files carry their documentation between literal marker strings:
//!
//! ```text
//! """
//! [vmdoc:description]
//! HTTP client helpers
//! [vmdoc:enddescription]
//!
//! [vmdoc:start]
//! ## fetch(url)
//! Downloads `url` and returns the body.
//! [vmdoc:end]
//! """
//! ```
//!
//! Start and end markers are located independently and paired by position:
//! the i-th start goes with the i-th end. When the counts differ nothing is
//! extracted from the file; a [`TagMismatch`] is returned and the caller logs
//! it. Malformed tagging in one file never stops the batch.

use crate::config::TagsConfig;
use crate::matcher::SourceFileRef;

/// A literal start/end marker pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPair {
    pub start: String,
    pub end: String,
}

impl TagPair {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

/// Start and end markers occur a different number of times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagMismatch {
    pub starts: usize,
    pub ends: usize,
}

/// Body and description extracted from one source file.
///
/// `body` holds one trimmed segment per matched pair, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedDoc {
    pub source: SourceFileRef,
    pub body: Vec<String>,
    pub description: Option<String>,
}

impl ExtractedDoc {
    /// Files with neither body text nor description are not documented.
    pub fn is_empty(&self) -> bool {
        self.body.iter().all(String::is_empty) && self.description.is_none()
    }

    /// Body segments joined by a blank line.
    pub fn joined_body(&self) -> String {
        self.body.join("\n\n")
    }
}

/// Byte offsets of every non-overlapping occurrence of `needle`.
fn positions(haystack: &str, needle: &str) -> Vec<usize> {
    haystack.match_indices(needle).map(|(i, _)| i).collect()
}

/// Extract the trimmed text between each positional start/end pair.
///
/// Pairs whose end precedes their start are skipped.
pub fn extract_segments(text: &str, tags: &TagPair) -> Result<Vec<String>, TagMismatch> {
    let starts = positions(text, &tags.start);
    let ends = positions(text, &tags.end);
    if starts.len() != ends.len() {
        return Err(TagMismatch {
            starts: starts.len(),
            ends: ends.len(),
        });
    }

    Ok(starts
        .iter()
        .zip(&ends)
        .filter(|&(&start, &end)| end > start)
        .map(|(&start, &end)| {
            let from = start + tags.start.len();
            // An end marker overlapping its own start marker yields an empty segment.
            if from <= end {
                text[from..end].trim().to_string()
            } else {
                String::new()
            }
        })
        .collect())
}

/// Extract and join with a blank line; trimmed.
pub fn extract_joined(text: &str, tags: &TagPair) -> Result<String, TagMismatch> {
    Ok(extract_segments(text, tags)?.join("\n\n").trim().to_string())
}

/// Drop every line containing `marker`.
pub fn strip_skip_lines(text: &str, marker: &str) -> String {
    text.lines()
        .filter(|line| !line.contains(marker))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Extracts body and description tags configured in [`TagsConfig`].
#[derive(Debug, Clone)]
pub struct TagExtractor {
    body: TagPair,
    description: TagPair,
}

/// Which of the two tag pairs failed to balance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairMismatch {
    pub tags: TagPair,
    pub mismatch: TagMismatch,
}

impl TagExtractor {
    pub fn new(tags: &TagsConfig) -> Self {
        Self {
            body: TagPair::new(&tags.start, &tags.end),
            description: TagPair::new(&tags.description_start, &tags.description_end),
        }
    }

    /// Extract both tag kinds from `text`.
    ///
    /// A mismatch in one kind empties only that kind; both are reported.
    pub fn extract(&self, source: SourceFileRef, text: &str) -> (ExtractedDoc, Vec<PairMismatch>) {
        let mut mismatches = Vec::new();

        let body = match extract_segments(text, &self.body) {
            Ok(segments) => segments,
            Err(mismatch) => {
                mismatches.push(PairMismatch {
                    tags: self.body.clone(),
                    mismatch,
                });
                Vec::new()
            }
        };

        let description = match extract_joined(text, &self.description) {
            Ok(joined) if !joined.is_empty() => Some(joined),
            Ok(_) => None,
            Err(mismatch) => {
                mismatches.push(PairMismatch {
                    tags: self.description.clone(),
                    mismatch,
                });
                None
            }
        };

        (
            ExtractedDoc {
                source,
                body,
                description,
            },
            mismatches,
        )
    }
}
