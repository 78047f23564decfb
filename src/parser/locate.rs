use tracing::debug;

use super::document::Document;

/// Heading that introduces the board member listing on governance pages.
pub const BOARD_HEADING: &str = "Composition of the Board";

const HEADING_TAGS: &[&str] = &["h2", "h3", "h4"];
const CONTAINER_TAGS: &[&str] = &["ul", "ol", "div", "table"];

/// Line boundaries, including the vertical-tab, form-feed, separator and
/// Unicode line/paragraph characters that page text sometimes carries.
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Find the first h2-h4 containing `heading`, then reduce the next list, div
/// or table after it to raw text lines.
///
/// A missing heading or container yields an empty Vec; that is a normal
/// outcome on pages with a different layout, not an error.
pub fn locate_lines<D: Document>(doc: &D, heading: &str) -> Vec<String> {
    let Some(found) = doc.find_first(HEADING_TAGS, &|text| text.contains(heading)) else {
        debug!("No h2-h4 heading contains {:?}", heading);
        return Vec::new();
    };

    let Some(container) = doc.find_next(found, CONTAINER_TAGS) else {
        debug!("Heading {:?} found but no container follows it", heading);
        return Vec::new();
    };

    let items = doc.list_items(container);
    if !items.is_empty() {
        debug!("Container has {} list items", items.len());
        // Each run is trimmed and glued without a separator. Blank items are
        // kept here; the name filter skips them.
        return items
            .into_iter()
            .map(|li| {
                doc.text_runs(li)
                    .into_iter()
                    .map(str::trim)
                    .filter(|run| !run.is_empty())
                    .collect::<String>()
            })
            .collect();
    }

    let lines: Vec<String> = doc
        .text_runs(container)
        .join("\n")
        .split(is_line_break)
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect();
    debug!("Container flattened into {} text lines", lines.len());
    lines
}
