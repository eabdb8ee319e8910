//! Marker section extraction from HTML text.
//!
//! A section is the verbatim span between a start comment
//! (`<!-- sinter:concat dist/app.js -->` or
//! `<!-- sinter:update concat.app[files][dist/app.js] -->`) and the matching
//! end comment (`<!-- endsinter -->`), both matched case-insensitively.
//! Markers do not nest: the first end comment closes the nearest preceding
//! start comment. This is not an HTML parser; only the marker syntax is
//! recognised and everything between markers is kept as raw text.

use crate::paths;

/// Marker-delimited span extracted verbatim from an HTML document.
#[derive(Clone)]
pub struct Section {
    /// The full span, both marker comments included, exactly as it appears
    /// in the document. This is the text replaced by the generated tag.
    pub text: String,
    /// Inside of the start comment, trimmed (e.g. `sinter:concat dist/app.js`).
    pub header: String,
    /// Raw text between the start and end comments.
    pub body: String,
    /// Byte offset of the start comment in the document.
    pub byte_start: usize,
    /// Byte offset just past the end comment.
    pub byte_end: usize,
}

/// Parsed section directive. A section carrying neither variant is
/// malformed and skipped by the orchestrator.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Directive {
    /// Concatenate the declared sources into `dest` and reference it.
    Concat {
        /// Artifact path, relative to the HTML file's directory.
        dest: String,
    },
    /// Merge the declared sources into an existing task's file list.
    Update {
        /// Dotted task path expression, optionally bracket-annotated.
        expr: String,
        /// Destination file the rewritten HTML should reference, from a
        /// trailing `replace:<path>` argument.
        replace: Option<String>,
    },
}

/// Find every marker section in `html` for the given marker keyword.
///
/// Returns sections in document order. A start comment with no terminating
/// `-->`, or no matching end comment, ends the scan; everything found up to
/// that point is returned.
#[must_use]
pub fn extract_sections(html: &str, marker: &str) -> Vec<Section> {
    let start_token = format!("<!-- {marker}:");
    let end_token = format!("<!-- end{marker}");
    let mut sections = Vec::new();
    let mut at = 0;

    while let Some(start) = paths::find_ci(html, &start_token, at) {
        let Some(header_close) = paths::find_ci(html, "-->", start) else {
            break;
        };
        let Some(end) = paths::find_ci(html, &end_token, header_close + 3) else {
            break;
        };
        let Some(end_close) = paths::find_ci(html, "-->", end) else {
            break;
        };
        let byte_end = end_close + 3;
        sections.push(Section {
            text: html[start..byte_end].to_string(),
            header: html[start + 4..header_close].trim().to_string(),
            body: html[header_close + 3..end].to_string(),
            byte_start: start,
            byte_end,
        });
        at = byte_end;
    }

    sections
}

impl Section {
    /// Parse this section's directive from its header.
    ///
    /// Returns `None` for a malformed header: no `concat`/`update` mode word
    /// after the marker, or a missing argument. Malformed sections are
    /// skipped silently downstream.
    #[must_use]
    pub fn directive(&self) -> Option<Directive> {
        let mut words = self.header.split_whitespace();
        let mode = words.next()?.split(':').nth(1)?.to_ascii_lowercase();
        let arg = words.next()?;
        match mode.as_str() {
            "concat" => Some(Directive::Concat {
                dest: arg.to_string(),
            }),
            "update" => Some(Directive::Update {
                expr: arg.to_string(),
                replace: words.find_map(strip_replace),
            }),
            _ => None,
        }
    }

    /// Quoted path-like tokens in the section body whose extension matches
    /// `expected_ext`, in declaration order. Duplicates are preserved here;
    /// de-duplication happens at union time.
    #[must_use]
    pub fn file_paths(&self, expected_ext: &str) -> Vec<String> {
        let mut found = Vec::new();
        let bytes = self.body.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            let quote = bytes[i];
            if quote == b'"' || quote == b'\'' {
                if let Some(close) = self.body[i + 1..].find(char::from(quote)) {
                    let token = &self.body[i + 1..i + 1 + close];
                    if !token.is_empty() && paths::extension_of(token) == expected_ext {
                        found.push(token.to_string());
                    }
                    i += close + 2;
                    continue;
                }
            }
            i += 1;
        }
        found
    }
}

fn strip_replace(word: &str) -> Option<String> {
    let prefix = "replace:";
    if word.len() > prefix.len() && word[..prefix.len()].eq_ignore_ascii_case(prefix) {
        Some(word[prefix.len()..].to_string())
    } else {
        None
    }
}

#[cfg(test)]
#[path = "tests/section.rs"]
mod tests;
