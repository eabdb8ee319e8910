//! Pure string helpers shared by the extractor, resolver and orchestrator.
//!
//! Markers and section text are matched case-insensitively, so the search and
//! replace helpers here work on ASCII-lowercased views of the haystack, which
//! keeps byte offsets stable.

/// Extension of a path, from the last `.` inclusive; empty if there is none.
#[must_use]
pub fn extension_of(path: &str) -> &str {
    path.rfind('.').map_or("", |dot| &path[dot..])
}

/// Byte offset of the first case-insensitive occurrence of `needle` in
/// `haystack` at or after `from`.
#[must_use]
pub fn find_ci(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    if from > haystack.len() || needle.is_empty() {
        return None;
    }
    haystack[from..]
        .to_ascii_lowercase()
        .find(&needle.to_ascii_lowercase())
        .map(|hit| from + hit)
}

/// Replace every case-insensitive occurrence of `needle` with `replacement`.
///
/// Used for section removal: the section's verbatim text is substituted
/// directly, with no regex compiled from document-controlled input.
#[must_use]
pub fn replace_all_ci(haystack: &str, needle: &str, replacement: &str) -> String {
    if needle.is_empty() {
        return haystack.to_string();
    }
    let mut out = String::with_capacity(haystack.len());
    let mut at = 0;
    while let Some(hit) = find_ci(haystack, needle, at) {
        out.push_str(&haystack[at..hit]);
        out.push_str(replacement);
        at = hit + needle.len();
    }
    out.push_str(&haystack[at..]);
    out
}

/// Whether a task path expression carries a bracket annotation.
#[must_use]
pub fn has_brackets(expr: &str) -> bool {
    expr.contains('[')
}

/// The dotted portion of a task path expression, up to the first bracket.
#[must_use]
pub fn dotted_prefix(expr: &str) -> &str {
    expr.find('[').map_or(expr, |open| &expr[..open])
}

/// The bracket-enclosed sub-keys of a task path expression, in order.
///
/// An unclosed bracket ends the scan; literal brackets inside key names are
/// not supported.
#[must_use]
pub fn bracket_keys(expr: &str) -> Vec<String> {
    let mut keys = Vec::new();
    let mut rest = expr;
    while let Some(open) = rest.find('[') {
        let Some(close) = rest[open..].find(']') else {
            break;
        };
        keys.push(rest[open + 1..open + close].to_string());
        rest = &rest[open + close + 1..];
    }
    keys
}

#[cfg(test)]
#[path = "tests/paths.rs"]
mod tests;
