use std::sync::LazyLock;

use regex::Regex;

/// "54 years", "61year-old", "7 Years old": digits, optional space, "year".
static AGE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^\d+\s*year").unwrap());

pub fn is_age_line(line: &str) -> bool {
    AGE_RE.is_match(line.trim())
}

/// Keep every line that is immediately followed by an age line.
///
/// Purely positional: a title or nationality between a name and its age hides
/// the name, and any line sitting right above an age is taken as a name.
/// The last line can never qualify. Blank lines are never names, but they
/// still occupy their slot, so a blank between a name and its age breaks the
/// pair.
pub fn filter_names<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    lines
        .windows(2)
        .filter(|pair| !pair[0].as_ref().trim().is_empty() && is_age_line(pair[1].as_ref()))
        .map(|pair| pair[0].as_ref().to_string())
        .collect()
}
