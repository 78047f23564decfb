pub mod document;
pub mod locate;
pub mod names;

use serde::Serialize;

use document::HtmlDocument;

/// Everything one run learned about a page, for `--json` output.
#[derive(Debug, Serialize)]
pub struct BoardReport {
    pub url: String,
    pub heading: String,
    pub lines: Vec<String>,
    pub names: Vec<String>,
}

/// Two-step pipeline: page html → block lines → names.
pub fn build_report(url: &str, html: &str, heading: &str) -> BoardReport {
    let doc = HtmlDocument::parse(html);
    let lines = locate::locate_lines(&doc, heading);
    let names = names::filter_names(&lines);

    BoardReport {
        url: url.to_string(),
        heading: heading.to_string(),
        lines,
        names,
    }
}

// ── Tests ──
