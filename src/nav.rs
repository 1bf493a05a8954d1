//! Managed sections of the `nav` list in `mkdocs.yml`.
//!
//! The generator owns exactly one top-level `nav` item per section name, for
//! example `files` or `projects`:
//!
//! ```yaml
//! nav:
//! - Home: index.md
//! - vmdoc: vmdoc/vmdocs.md
//! - files:                      # managed
//!   - src/a.py: vmdoc/a.py_1f2e3d4c5b6a.md
//!   - src/b.py: vmdoc/b.py_6a5b4c3d2e1f.md
//! ```
//!
//! A rewrite parses the whole file into a YAML tree, drops every `nav` item
//! keyed by the section name, and appends the fresh section at the end of the
//! list. Only the `nav` block is serialized back: it is spliced into the
//! original text in place of the old block, so every other key keeps its exact
//! text, including comments, anchors and tags such as `!!python/name:` or
//! `!ENV` that a full round trip through the tree would lose. The spliced text
//! is parsed again and must match the edited tree, otherwise the file is left
//! alone.
//!
//! When the edit does not change the nav, the file is left byte-for-byte as it
//! was, so running the same rewrite twice is a no-op the second time.
//!
//! Removing a section that is not there is a no-op. Removing the last item of
//! the nav drops the `nav` key, leaving MkDocs to build its default navigation.
//!
//! Nothing here ever fails a run. A missing file, unparseable YAML, or a
//! missing/empty/non-list `nav` when a section is to be written is reported as
//! a warning and the file is left untouched.

use crate::diagnostics::{Diagnostics, Warning};
use serde_yaml::value::{Tag, TaggedValue};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NavError {
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("top level is not a mapping")]
    NotAMapping,
    #[error("no 'nav' key")]
    MissingNav,
    #[error("'nav' should be a list")]
    NavNotList,
    #[error("'nav' list is empty")]
    EmptyNav,
    #[error("could not find the top-level 'nav:' line")]
    NavNotLocated,
    #[error("rewritten file would not keep the other keys intact")]
    Lossy,
}

/// Where a nav entry points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavTarget {
    /// Page path relative to the `docs/` directory.
    Page(String),
    /// Another MkDocs config pulled in with `!include`.
    Include(String),
}

impl NavTarget {
    fn to_yaml(&self) -> Value {
        match self {
            NavTarget::Page(path) => Value::String(path.clone()),
            NavTarget::Include(path) => Value::Tagged(Box::new(TaggedValue {
                tag: Tag::new("include"),
                value: Value::String(path.clone()),
            })),
        }
    }
}

/// One `label: target` line of a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    pub label: String,
    pub target: NavTarget,
}

impl NavEntry {
    pub fn page(label: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            target: NavTarget::Page(path.into()),
        }
    }

    pub fn include(label: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            target: NavTarget::Include(path.into()),
        }
    }
}

/// What to do with the managed section.
#[derive(Debug, Clone, Copy)]
pub enum SectionUpdate<'a> {
    /// Remove the section and do not re-add it.
    Remove,
    /// Replace the section with these entries, in order.
    Replace(&'a [NavEntry]),
}

/// Result of [`rewrite_nav_section`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    /// The file was rewritten.
    Updated,
    /// The rewrite produced the existing content; the file was not touched.
    Unchanged,
    /// The rewrite was skipped with a warning.
    Skipped,
}

fn is_section(item: &Value, section: &str) -> bool {
    item.as_mapping()
        .is_some_and(|m| m.contains_key(Value::String(section.to_string())))
}

/// Apply `update` to a parsed config tree. Returns whether the tree changed.
pub fn apply_section(
    config: &mut Value,
    section: &str,
    update: SectionUpdate<'_>,
) -> Result<bool, NavError> {
    let root = config.as_mapping_mut().ok_or(NavError::NotAMapping)?;
    let nav = match (root.get_mut("nav"), update) {
        (None | Some(Value::Null), SectionUpdate::Remove) => return Ok(false),
        (None | Some(Value::Null), _) => return Err(NavError::MissingNav),
        (Some(Value::Sequence(seq)), _) => seq,
        (Some(_), _) => return Err(NavError::NavNotList),
    };

    let SectionUpdate::Replace(entries) = update else {
        if !nav.iter().any(|item| is_section(item, section)) {
            return Ok(false);
        }
        nav.retain(|item| !is_section(item, section));
        if nav.is_empty() {
            root.shift_remove("nav");
        }
        return Ok(true);
    };

    if nav.is_empty() {
        return Err(NavError::EmptyNav);
    }
    let before = nav.clone();
    nav.retain(|item| !is_section(item, section));
    let items = entries
        .iter()
        .map(|entry| {
            let mut m = Mapping::new();
            m.insert(Value::String(entry.label.clone()), entry.target.to_yaml());
            Value::Mapping(m)
        })
        .collect();
    let mut block = Mapping::new();
    block.insert(Value::String(section.to_string()), Value::Sequence(items));
    nav.push(Value::Mapping(block));
    Ok(*nav != before)
}

/// Key of a top-level `key: ...` line, unquoted. `None` for indented lines,
/// comments, sequence items and document markers.
fn top_level_key(line: &str) -> Option<&str> {
    if line.starts_with([' ', '\t', '#', '-', '.']) {
        return None;
    }
    let colon = line
        .char_indices()
        .find(|&(i, c)| c == ':' && line[i + 1..].chars().next().is_none_or(char::is_whitespace))
        .map(|(i, _)| i)?;
    let key = line[..colon].trim();
    Some(
        key.strip_prefix('"')
            .and_then(|k| k.strip_suffix('"'))
            .or_else(|| key.strip_prefix('\'').and_then(|k| k.strip_suffix('\'')))
            .unwrap_or(key),
    )
}

/// Byte range of the `nav` block in `content`. The block runs from the `nav:`
/// line up to the line of `next_key`, minus trailing blank and comment lines.
fn nav_block(content: &str, next_key: Option<&str>) -> Option<std::ops::Range<usize>> {
    let mut lines = Vec::new();
    let mut offset = 0;
    for line in content.split_inclusive('\n') {
        lines.push((offset, line));
        offset += line.len();
    }

    let first = lines.iter().position(|(_, l)| top_level_key(l) == Some("nav"))?;
    let last = match next_key {
        Some(key) => {
            first + 1 + lines[first + 1..].iter().position(|(_, l)| top_level_key(l) == Some(key))?
        }
        None => lines[first + 1..]
            .iter()
            .position(|(_, l)| l.starts_with("---") || l.starts_with("..."))
            .map_or(lines.len(), |i| first + 1 + i),
    };
    let kept = lines[first + 1..last]
        .iter()
        .rposition(|(_, l)| {
            let t = l.trim();
            !t.is_empty() && !t.starts_with('#')
        })
        .map_or(first + 1, |i| first + 2 + i);

    let start = lines[first].0;
    let end = lines.get(kept).map_or(content.len(), |(o, _)| *o);
    Some(start..end)
}

/// Rewrite config text; pure version of [`rewrite_nav_section`].
pub fn rewrite_nav_text(
    content: &str,
    section: &str,
    update: SectionUpdate<'_>,
) -> Result<String, NavError> {
    let mut config: Value = serde_yaml::from_str(content)?;
    let next_key = config.as_mapping().and_then(|root| {
        let mut keys = root.keys().skip_while(|k| k.as_str() != Some("nav"));
        keys.next();
        keys.next().map(|k| k.as_str().map(str::to_string))
    });
    if !apply_section(&mut config, section, update)? {
        return Ok(content.to_string());
    }

    let next_key = match next_key {
        Some(Some(key)) => Some(key),
        Some(None) => return Err(NavError::NavNotLocated),
        None => None,
    };
    let range = nav_block(content, next_key.as_deref()).ok_or(NavError::NavNotLocated)?;
    let block = match config.get("nav") {
        Some(nav) => {
            let mut m = Mapping::new();
            m.insert(Value::String("nav".to_string()), nav.clone());
            serde_yaml::to_string(&m)?
        }
        None => String::new(),
    };

    let mut out = String::with_capacity(content.len() + block.len());
    out.push_str(&content[..range.start]);
    out.push_str(&block);
    out.push_str(&content[range.end..]);

    match serde_yaml::from_str::<Value>(&out) {
        Ok(reparsed) if reparsed == config => Ok(out),
        _ => Err(NavError::Lossy),
    }
}

/// Rewrite one managed section of the config file at `path`.
pub fn rewrite_nav_section(
    path: &Path,
    section: &str,
    update: SectionUpdate<'_>,
    diags: &mut Diagnostics,
) -> NavOutcome {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            diags.warn(Warning::FileIo {
                path: path.to_path_buf(),
                reason: format!("navigation config not readable: {e}"),
            });
            return NavOutcome::Skipped;
        }
    };

    let updated = match rewrite_nav_text(&content, section, update) {
        Ok(u) => u,
        Err(e) => {
            diags.warn(Warning::ConfigParse {
                path: path.to_path_buf(),
                reason: e.to_string(),
            });
            return NavOutcome::Skipped;
        }
    };

    if updated == content {
        return NavOutcome::Unchanged;
    }
    match fs::write(path, updated) {
        Ok(()) => {
            tracing::info!(path = %path.display(), section, "updated nav section");
            NavOutcome::Updated
        }
        Err(e) => {
            diags.warn(Warning::FileIo {
                path: path.to_path_buf(),
                reason: e.to_string(),
            });
            NavOutcome::Skipped
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::SAMPLE_MKDOCS_YML;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn entries(pairs: &[(&str, &str)]) -> Vec<NavEntry> {
        pairs.iter().map(|(l, t)| NavEntry::page(*l, *t)).collect()
    }

    fn nav_of(text: &str) -> Vec<Value> {
        let v: Value = serde_yaml::from_str(text).unwrap();
        v["nav"].as_sequence().unwrap().clone()
    }

    fn sections_named<'a>(nav: &'a [Value], name: &str) -> Vec<&'a Value> {
        nav.iter().filter(|i| is_section(i, name)).collect()
    }

    #[test]
    fn appends_section_at_end() {
        let new = entries(&[("a.py", "vmdoc/a.md"), ("b.py", "vmdoc/b.md")]);
        let out = rewrite_nav_text(SAMPLE_MKDOCS_YML, "files", SectionUpdate::Replace(&new)).unwrap();
        let nav = nav_of(&out);
        assert_eq!(nav.len(), 3);
        assert_eq!(nav[0]["Home"].as_str(), Some("index.md"));
        let files = nav[2]["files"].as_sequence().unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0]["a.py"].as_str(), Some("vmdoc/a.md"));
        assert_eq!(files[1]["b.py"].as_str(), Some("vmdoc/b.md"));
    }

    #[test]
    fn replaces_existing_section() {
        let before = "\
site_name: Combined
nav:
  - Home: index.md
  - projects:
      - old1: x
      - old2: y
  - About: about.md
";
        let new = entries(&[("p1", "1"), ("p2", "2"), ("p3", "3")]);
        let out = rewrite_nav_text(before, "projects", SectionUpdate::Replace(&new)).unwrap();
        let nav = nav_of(&out);

        let projects = sections_named(&nav, "projects");
        assert_eq!(projects.len(), 1);
        let labels: Vec<&str> = projects[0]["projects"]
            .as_sequence()
            .unwrap()
            .iter()
            .map(|e| e.as_mapping().unwrap().keys().next().unwrap().as_str().unwrap())
            .collect();
        assert_eq!(labels, vec!["p1", "p2", "p3"]);
        assert!(!out.contains("old1"));
        // Untouched items keep their relative order; the section moves last.
        assert_eq!(nav[0]["Home"].as_str(), Some("index.md"));
        assert_eq!(nav[1]["About"].as_str(), Some("about.md"));
        assert!(is_section(&nav[2], "projects"));
    }

    #[test]
    fn duplicate_sections_collapse_to_one() {
        let before = "nav:\n- files: [a: b]\n- Home: index.md\n- files: [c: d]\n";
        let new = entries(&[("e", "f")]);
        let out = rewrite_nav_text(before, "files", SectionUpdate::Replace(&new)).unwrap();
        assert_eq!(sections_named(&nav_of(&out), "files").len(), 1);
    }

    #[test]
    fn remove_only() {
        let before = "nav:\n- Home: index.md\n- files:\n  - a.py: vmdoc/a.md\n";
        let out = rewrite_nav_text(before, "files", SectionUpdate::Remove).unwrap();
        let nav = nav_of(&out);
        assert_eq!(nav.len(), 1);
        assert!(sections_named(&nav, "files").is_empty());
    }

    #[test]
    fn preserves_other_top_level_keys() {
        let new = entries(&[("a.py", "vmdoc/a.md")]);
        let out = rewrite_nav_text(SAMPLE_MKDOCS_YML, "files", SectionUpdate::Replace(&new)).unwrap();
        let before: Value = serde_yaml::from_str(SAMPLE_MKDOCS_YML).unwrap();
        let after: Value = serde_yaml::from_str(&out).unwrap();
        for key in ["site_name", "theme", "markdown_extensions", "plugins"] {
            assert_eq!(before[key], after[key], "key {key} changed");
        }
        let keys: Vec<&str> = after
            .as_mapping()
            .unwrap()
            .keys()
            .map(|k| k.as_str().unwrap())
            .collect();
        assert_eq!(
            keys,
            vec!["site_name", "theme", "nav", "markdown_extensions", "plugins"]
        );
    }

    #[test]
    fn idempotent() {
        let new = entries(&[("a.py", "vmdoc/a.md"), ("b.py", "vmdoc/b.md")]);
        let once = rewrite_nav_text(SAMPLE_MKDOCS_YML, "files", SectionUpdate::Replace(&new)).unwrap();
        let twice = rewrite_nav_text(&once, "files", SectionUpdate::Replace(&new)).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn include_targets_are_tagged() {
        let new = vec![NavEntry::include("project1", "./projects/project1/mkdocs.yml")];
        let out = rewrite_nav_text(SAMPLE_MKDOCS_YML, "projects", SectionUpdate::Replace(&new)).unwrap();
        assert!(out.contains("!include ./projects/project1/mkdocs.yml"));

        // The tag survives another round trip.
        let again = rewrite_nav_text(&out, "files", SectionUpdate::Remove).unwrap();
        let nav = nav_of(&again);
        let entry = &sections_named(&nav, "projects")[0]["projects"][0]["project1"];
        match entry {
            Value::Tagged(tagged) => {
                assert_eq!(tagged.tag, Tag::new("include"));
                assert_eq!(tagged.value.as_str(), Some("./projects/project1/mkdocs.yml"));
            }
            other => panic!("expected tagged value, got {other:?}"),
        }
    }

    #[test]
    fn missing_nav_is_error() {
        let new = entries(&[("a.py", "vmdoc/a.md")]);
        assert!(matches!(
            rewrite_nav_text("site_name: x\n", "files", SectionUpdate::Replace(&new)),
            Err(NavError::MissingNav)
        ));
    }

    #[test]
    fn empty_nav_is_error() {
        let new = entries(&[("a.py", "vmdoc/a.md")]);
        assert!(matches!(
            rewrite_nav_text("nav: []\n", "files", SectionUpdate::Replace(&new)),
            Err(NavError::EmptyNav)
        ));
    }

    #[test]
    fn remove_without_section_is_noop() {
        for text in ["site_name: x\n", "nav: []\n", "nav:\n# hand-written\n  - Home: index.md\n"] {
            assert_eq!(
                rewrite_nav_text(text, "files", SectionUpdate::Remove).unwrap(),
                text
            );
        }
    }

    #[test]
    fn removing_last_item_drops_nav() {
        let before = "site_name: x\nnav:\n  - files:\n      - a.py: vmdoc/a.md\n";
        let out = rewrite_nav_text(before, "files", SectionUpdate::Remove).unwrap();
        assert_eq!(out, "site_name: x\n");
        assert_eq!(rewrite_nav_text(&out, "files", SectionUpdate::Remove).unwrap(), out);
    }

    #[test]
    fn non_list_nav_is_error() {
        assert!(matches!(
            rewrite_nav_text("nav:\n  Home: index.md\n", "files", SectionUpdate::Remove),
            Err(NavError::NavNotList)
        ));
    }

    #[test]
    fn scalar_document_is_error() {
        assert!(matches!(
            rewrite_nav_text("just text", "files", SectionUpdate::Remove),
            Err(NavError::NotAMapping)
        ));
    }

    // =========================================================================
    // Text outside the nav block
    // =========================================================================

    const MATERIAL_MKDOCS_YML: &str = "\
# Project docs
site_name: Material Docs
site_url: !ENV [SITE_URL, 'http://localhost:8000/']

defaults: &defaults
  permalink: true

theme:
  name: material  # keep in sync with requirements.txt

nav:
  - Home: index.md
  - files:
      - old.py: vmdoc/old.md
  # hand-maintained below
  - About: about.md

# Extensions
markdown_extensions:
  - toc: *defaults
  - pymdownx.emoji:
      emoji_index: !!python/name:material.extensions.emoji.twemoji
      emoji_generator: !!python/name:material.extensions.emoji.to_svg
  - pymdownx.superfences:
      custom_fences:
        - name: mermaid
          class: mermaid
          format: !!python/name:pymdownx.superfences.fence_code_format
";

    fn without_nav(text: &str) -> String {
        let mut v: Value = serde_yaml::from_str(text).unwrap();
        v.as_mapping_mut().unwrap().shift_remove("nav");
        serde_yaml::to_string(&v).unwrap()
    }

    #[test]
    fn python_name_tags_kept_verbatim() {
        let new = entries(&[("a.py", "vmdoc/a.md")]);
        let out = rewrite_nav_text(MATERIAL_MKDOCS_YML, "files", SectionUpdate::Replace(&new)).unwrap();

        assert!(out.contains("emoji_index: !!python/name:material.extensions.emoji.twemoji\n"));
        assert!(out.contains("emoji_generator: !!python/name:material.extensions.emoji.to_svg\n"));
        assert!(out.contains("format: !!python/name:pymdownx.superfences.fence_code_format\n"));
        assert!(!out.contains("''"));
        assert!(!out.contains("old.py"));
    }

    #[test]
    fn text_around_nav_block_is_untouched() {
        let new = entries(&[("a.py", "vmdoc/a.md")]);
        let out = rewrite_nav_text(MATERIAL_MKDOCS_YML, "files", SectionUpdate::Replace(&new)).unwrap();

        let (head, _) = MATERIAL_MKDOCS_YML.split_once("nav:\n").unwrap();
        let (_, tail) = MATERIAL_MKDOCS_YML.split_once("# Extensions\n").unwrap();
        assert!(out.starts_with(head));
        assert!(out.ends_with(&format!("# Extensions\n{tail}")));
        assert!(out.contains("site_url: !ENV [SITE_URL, 'http://localhost:8000/']\n"));
        assert!(out.contains("  - toc: *defaults\n"));
        assert_eq!(without_nav(&out), without_nav(MATERIAL_MKDOCS_YML));

        let nav = nav_of(&out);
        assert_eq!(nav[0]["Home"].as_str(), Some("index.md"));
        assert_eq!(nav[1]["About"].as_str(), Some("about.md"));
        assert_eq!(nav[2]["files"][0]["a.py"].as_str(), Some("vmdoc/a.md"));
    }

    #[test]
    fn tagged_config_rewrite_is_idempotent() {
        let new = entries(&[("a.py", "vmdoc/a.md")]);
        let once = rewrite_nav_text(MATERIAL_MKDOCS_YML, "files", SectionUpdate::Replace(&new)).unwrap();
        let twice = rewrite_nav_text(&once, "files", SectionUpdate::Replace(&new)).unwrap();
        assert_eq!(once, twice);

        let removed = rewrite_nav_text(&once, "files", SectionUpdate::Remove).unwrap();
        assert!(removed.contains("!!python/name:material.extensions.emoji.twemoji"));
        assert_eq!(nav_of(&removed).len(), 2);
    }

    #[test]
    fn nav_as_last_key() {
        let before = "site_name: x\nplugins:\n  - search\nnav:\n  - Home: index.md\n\n# trailing\n";
        let new = entries(&[("a.py", "vmdoc/a.md")]);
        let out = rewrite_nav_text(before, "files", SectionUpdate::Replace(&new)).unwrap();
        assert!(out.starts_with("site_name: x\nplugins:\n  - search\nnav:\n"));
        assert!(out.ends_with("\n\n# trailing\n"));
        assert_eq!(nav_of(&out).len(), 2);
    }

    #[test]
    fn quoted_nav_key_is_found() {
        let before = "\"nav\":\n  - Home: index.md\nsite_name: x\n";
        let new = entries(&[("a.py", "vmdoc/a.md")]);
        let out = rewrite_nav_text(before, "files", SectionUpdate::Replace(&new)).unwrap();
        assert!(out.ends_with("site_name: x\n"));
        assert_eq!(nav_of(&out).len(), 2);
    }

    #[test]
    fn flow_style_document_is_not_rewritten() {
        let new = entries(&[("a.py", "vmdoc/a.md")]);
        assert!(matches!(
            rewrite_nav_text("{nav: [{Home: index.md}], site_name: x}\n", "files", SectionUpdate::Replace(&new)),
            Err(NavError::NavNotLocated)
        ));
    }

    // =========================================================================
    // File-level behavior
    // =========================================================================

    #[test]
    fn missing_file_is_skipped_with_warning() {
        let tmp = TempDir::new().unwrap();
        let mut diags = Diagnostics::new();
        let outcome = rewrite_nav_section(
            &tmp.path().join("mkdocs.yml"),
            "files",
            SectionUpdate::Remove,
            &mut diags,
        );
        assert_eq!(outcome, NavOutcome::Skipped);
        assert!(matches!(diags.warnings()[0], Warning::FileIo { .. }));
    }

    #[test]
    fn malformed_file_left_untouched() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("mkdocs.yml");
        let text = "nav: [unclosed\n";
        fs::write(&path, text).unwrap();

        let mut diags = Diagnostics::new();
        let outcome = rewrite_nav_section(&path, "files", SectionUpdate::Remove, &mut diags);
        assert_eq!(outcome, NavOutcome::Skipped);
        assert!(matches!(diags.warnings()[0], Warning::ConfigParse { .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), text);
    }

    #[test]
    fn overview_rerun_on_files_only_nav_settles() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("mkdocs.yml");
        fs::write(&path, "site_name: x\nnav:\n  - files:\n      - a.py: vmdoc/a.md\n").unwrap();

        let mut diags = Diagnostics::new();
        let first = rewrite_nav_section(&path, "files", SectionUpdate::Remove, &mut diags);
        let after_first = fs::read_to_string(&path).unwrap();
        let second = rewrite_nav_section(&path, "files", SectionUpdate::Remove, &mut diags);

        assert_eq!(first, NavOutcome::Updated);
        assert_eq!(after_first, "site_name: x\n");
        assert_eq!(second, NavOutcome::Unchanged);
        assert_eq!(fs::read_to_string(&path).unwrap(), after_first);
        assert!(diags.is_empty(), "{:?}", diags.warnings());
    }

    #[test]
    fn material_config_file_keeps_extensions() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("mkdocs.yml");
        fs::write(&path, MATERIAL_MKDOCS_YML).unwrap();
        let new = entries(&[("a.py", "vmdoc/a.md")]);

        let mut diags = Diagnostics::new();
        let outcome = rewrite_nav_section(&path, "files", SectionUpdate::Replace(&new), &mut diags);
        assert_eq!(outcome, NavOutcome::Updated);
        assert!(diags.is_empty());
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(
            text.split_once("# Extensions\n").unwrap().1,
            MATERIAL_MKDOCS_YML.split_once("# Extensions\n").unwrap().1
        );
    }

    #[test]
    fn second_rewrite_is_unchanged() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("mkdocs.yml");
        fs::write(&path, SAMPLE_MKDOCS_YML).unwrap();
        let new = entries(&[("a.py", "vmdoc/a.md")]);

        let mut diags = Diagnostics::new();
        let first = rewrite_nav_section(&path, "files", SectionUpdate::Replace(&new), &mut diags);
        let after_first = fs::read_to_string(&path).unwrap();
        let second = rewrite_nav_section(&path, "files", SectionUpdate::Replace(&new), &mut diags);

        assert_eq!(first, NavOutcome::Updated);
        assert_eq!(second, NavOutcome::Unchanged);
        assert_eq!(fs::read_to_string(&path).unwrap(), after_first);
        assert!(diags.is_empty());
    }
}
