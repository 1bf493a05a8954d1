//! CLI output formatting.
//!
//! Every command prints an inventory of what it looked at or produced, keyed
//! by the source-relative path a user recognizes, with generated file names
//! as secondary context on indented lines.
//!
//! ## Scan
//!
//! ```text
//! Working set: ./src (2 files)
//! 001 net/http.py
//! 002 util.py
//! ```
//!
//! ## Generate
//!
//! ```text
//! Documented
//! 001 net/http.py → http.py_3f9a0c21b4e7.md
//!     Description: HTTP helpers
//! 002 util.py → util.py_9b1e04c7d2aa.md
//!     Sidecar: not written
//!
//! Nav: files section updated
//! Overview: docs/docs/vmdoc/vmdocs.md
//! Stale: 1 page kept (use --prune to delete)
//!
//! Warnings (1)
//!     Mismatched tags in broken.py: 1 x [vmdoc:start] but 0 x [vmdoc:end]
//!
//! Documented 2 of 4 files (1 untagged)
//! ```
//!
//! Each command has a pure `format_*` function returning lines and a
//! `print_*` wrapper that writes them to stdout.

use crate::config::NavMode;
use crate::diagnostics::Warning;
use crate::generate::GenerateReport;
use crate::matcher::SourceFileRef;
use crate::monorepo::MergeReport;
use crate::nav::NavOutcome;
use std::path::Path;

/// Description text longer than this is cut in listings.
const DESCRIPTION_WIDTH: usize = 72;

// ============================================================================
// Shared helpers
// ============================================================================

/// 1-based positional index, zero-padded to three digits.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Cut `text` to `max` characters, appending `...` when cut.
fn truncate_desc(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{cut}...")
    }
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

fn format_warnings(warnings: &[Warning]) -> Vec<String> {
    if warnings.is_empty() {
        return Vec::new();
    }
    let mut lines = vec![format!("Warnings ({})", warnings.len())];
    lines.extend(warnings.iter().map(|w| format!("{}{}", indent(1), w)));
    lines
}

fn nav_line(section: &str, mode: NavMode, outcome: NavOutcome) -> String {
    let action = match (outcome, mode) {
        (NavOutcome::Updated, NavMode::Overview) => "removed",
        (NavOutcome::Updated, NavMode::Section) => "updated",
        (NavOutcome::Unchanged, _) => "unchanged",
        (NavOutcome::Skipped, _) => "not updated (see warnings)",
    };
    format!("Nav: {section} section {action}")
}

// ============================================================================
// Scan
// ============================================================================

/// Format the working set of a scan.
pub fn format_scan_output(
    files: &[SourceFileRef],
    source_root: &Path,
    warnings: &[Warning],
) -> Vec<String> {
    let mut lines = vec![format!(
        "Working set: {} ({})",
        source_root.display(),
        plural(files.len(), "file", "files")
    )];
    for (i, file) in files.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), file.relative));
    }
    let warning_lines = format_warnings(warnings);
    if !warning_lines.is_empty() {
        lines.push(String::new());
        lines.extend(warning_lines);
    }
    lines
}

pub fn print_scan_output(files: &[SourceFileRef], source_root: &Path, warnings: &[Warning]) {
    for line in format_scan_output(files, source_root, warnings) {
        println!("{}", line);
    }
}

// ============================================================================
// Generate
// ============================================================================

/// Format the result of a generate run.
pub fn format_generate_output(report: &GenerateReport, nav_section: &str) -> Vec<String> {
    let mut lines = Vec::new();

    if report.scaffolded {
        lines.push("Created default docs project".to_string());
        lines.push(String::new());
    }

    lines.push("Documented".to_string());
    for (i, doc) in report.documented.iter().enumerate() {
        lines.push(format!(
            "{} {} → {}",
            format_index(i + 1),
            doc.source.relative,
            doc.id.markdown_file()
        ));
        if !doc.description.is_empty() {
            let flat = doc.description.split_whitespace().collect::<Vec<_>>().join(" ");
            lines.push(format!(
                "{}Description: {}",
                indent(1),
                truncate_desc(&flat, DESCRIPTION_WIDTH)
            ));
        }
        if !doc.sidecar_written {
            lines.push(format!("{}Sidecar: not written", indent(1)));
        }
    }
    lines.push(String::new());

    lines.push(nav_line(nav_section, report.nav_mode, report.nav));
    if let Some(path) = &report.overview {
        lines.push(format!("Overview: {}", path.display()));
    }
    if report.pruned > 0 {
        lines.push(format!("Pruned {}", plural(report.pruned, "file", "files")));
    } else if !report.stale.is_empty() {
        lines.push(format!(
            "Stale: {} kept (use --prune to delete)",
            plural(report.stale.len(), "page", "pages")
        ));
    }

    let warning_lines = format_warnings(&report.warnings);
    if !warning_lines.is_empty() {
        lines.push(String::new());
        lines.extend(warning_lines);
    }

    lines.push(String::new());
    lines.push(format!(
        "Documented {} of {} ({} untagged)",
        report.documented.len(),
        plural(report.scanned, "file", "files"),
        report.untagged
    ));
    lines
}

pub fn print_generate_output(report: &GenerateReport, nav_section: &str) {
    for line in format_generate_output(report, nav_section) {
        println!("{}", line);
    }
}

// ============================================================================
// Merge
// ============================================================================

/// Format the result of a monorepo merge.
pub fn format_merge_output(report: &MergeReport, warnings: &[Warning]) -> Vec<String> {
    let mut lines = vec![format!("Merged into {}", report.root.display())];
    for (name, count) in &report.copied {
        lines.push(format!(
            "{}{} ({} copied)",
            indent(1),
            name,
            plural(*count, "file", "files")
        ));
    }
    lines.push(String::new());
    lines.push("Projects".to_string());
    for (i, name) in report.listed.iter().enumerate() {
        lines.push(format!(
            "{} {} → ./projects/{}/mkdocs.yml",
            format_index(i + 1),
            name,
            name
        ));
    }
    let warning_lines = format_warnings(warnings);
    if !warning_lines.is_empty() {
        lines.push(String::new());
        lines.extend(warning_lines);
    }
    lines
}

pub fn print_merge_output(report: &MergeReport, warnings: &[Warning]) {
    for line in format_merge_output(report, warnings) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::EmittedDoc;
    use crate::naming::output_id;
    use crate::test_helpers::source_ref;
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    fn emitted(rel: &str, description: &str, sidecar_written: bool) -> EmittedDoc {
        EmittedDoc {
            source: source_ref(Path::new("/src"), rel),
            id: output_id(rel),
            description: description.to_string(),
            sidecar_written,
        }
    }

    fn report(documented: Vec<EmittedDoc>) -> GenerateReport {
        GenerateReport {
            source: PathBuf::from("/src"),
            out_dir: PathBuf::from("docs/docs/vmdoc"),
            scanned: 4,
            documented,
            untagged: 2,
            scaffolded: false,
            nav_mode: NavMode::Section,
            nav: NavOutcome::Updated,
            overview: Some(PathBuf::from("docs/docs/vmdoc/vmdocs.md")),
            stale: Vec::new(),
            pruned: 0,
            warnings: Vec::new(),
        }
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(1234), "1234");
    }

    #[test]
    fn indent_levels() {
        assert_eq!(indent(0), "");
        assert_eq!(indent(2), "        ");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_desc("short", 10), "short");
        assert_eq!(truncate_desc("ééééé", 3), "ééé...");
    }

    #[test]
    fn nav_line_by_mode() {
        assert_eq!(
            nav_line("files", NavMode::Overview, NavOutcome::Updated),
            "Nav: files section removed"
        );
        assert_eq!(
            nav_line("files", NavMode::Section, NavOutcome::Unchanged),
            "Nav: files section unchanged"
        );
    }

    // =========================================================================
    // Commands
    // =========================================================================

    #[test]
    fn scan_output_lists_files() {
        let files = vec![
            source_ref(Path::new("/src"), "a.py"),
            source_ref(Path::new("/src"), "sub/c.py"),
        ];
        let lines = format_scan_output(&files, Path::new("src"), &[]);
        assert_eq!(lines, vec!["Working set: src (2 files)", "001 a.py", "002 sub/c.py"]);
    }

    #[test]
    fn scan_output_appends_warnings() {
        let warning = Warning::MalformedPattern {
            line: 2,
            pattern: "[".into(),
            reason: "bad".into(),
        };
        let lines = format_scan_output(&[], Path::new("src"), &[warning]);
        assert_eq!(lines[0], "Working set: src (0 files)");
        assert_eq!(lines[2], "Warnings (1)");
        assert!(lines[3].starts_with("    Malformed pattern on line 2"));
    }

    #[test]
    fn generate_output_shape() {
        let r = report(vec![
            emitted("a.py", "Helpers\nfor things", true),
            emitted("b.py", "", false),
        ]);
        let lines = format_generate_output(&r, "files");
        assert_eq!(lines[0], "Documented");
        assert_eq!(
            lines[1],
            format!("001 a.py → {}", output_id("a.py").markdown_file())
        );
        assert_eq!(lines[2], "    Description: Helpers for things");
        assert_eq!(lines[4], "    Sidecar: not written");
        assert!(lines.contains(&"Nav: files section updated".to_string()));
        assert!(lines.contains(&"Overview: docs/docs/vmdoc/vmdocs.md".to_string()));
        assert_eq!(lines.last().unwrap(), "Documented 2 of 4 files (2 untagged)");
    }

    #[test]
    fn generate_output_reports_stale_and_pruned() {
        let mut r = report(vec![]);
        r.stale = vec!["x.py_000000000000".into()];
        let lines = format_generate_output(&r, "files");
        assert!(lines.contains(&"Stale: 1 page kept (use --prune to delete)".to_string()));

        r.pruned = 2;
        let lines = format_generate_output(&r, "files");
        assert!(lines.contains(&"Pruned 2 files".to_string()));
        assert!(!lines.iter().any(|l| l.starts_with("Stale")));
    }

    #[test]
    fn merge_output_lists_projects() {
        let mut copied = BTreeMap::new();
        copied.insert("api".to_string(), 3);
        let report = MergeReport {
            root: PathBuf::from("combined"),
            copied,
            listed: vec!["api".into(), "web".into()],
            nav: NavOutcome::Updated,
        };
        let lines = format_merge_output(&report, &[]);
        assert_eq!(
            lines,
            vec![
                "Merged into combined",
                "    api (3 files copied)",
                "",
                "Projects",
                "001 api → ./projects/api/mkdocs.yml",
                "002 web → ./projects/web/mkdocs.yml",
            ]
        );
    }
}
