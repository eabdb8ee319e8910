//! Per-file orchestration: extract sections, run each directive, rewrite.
//!
//! Each input HTML file is read, its marker sections run in document order
//! (concat sections write an artifact, update sections patch the shared task
//! tree), and every case-insensitive occurrence of each section's verbatim
//! text is replaced by a script or link tag before the result is written to
//! the file's output destination. A file with zero sections is still written,
//! unchanged.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::paths;
use crate::section::{self, Directive, Section};
use crate::tasks::{self, PathExpr};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Process one HTML file and write the rewritten content to `output`.
///
/// Declared source paths and concat destinations are resolved relative to
/// the input file's directory; the directory is threaded through explicitly
/// rather than held as process state. Returns `true` when an `update`
/// section mutated the task tree.
///
/// # Errors
///
/// Fails on I/O errors for the input, artifacts or output, on an
/// unresolvable task path, and on a destination whose extension has no
/// replacement tag.
pub fn process_file(
    input: &Path,
    output: &Path,
    cfg: &Config,
    task_tree: &mut Value,
) -> Result<bool> {
    let content = fs::read_to_string(input).map_err(|e| Error::io(input, e))?;
    let html_root = input.parent().map_or_else(PathBuf::new, Path::to_path_buf);

    let sections = section::extract_sections(&content, &cfg.marker);
    let mut rewritten = content;
    let mut touched = false;
    for sec in sections {
        let Some(directive) = sec.directive() else {
            // Neither concat nor update: the marker text stays verbatim.
            continue;
        };
        // The tag is validated before any artifact is written or the task
        // tree touched, so an unsupported destination leaves nothing behind.
        let tag = match directive {
            Directive::Concat { dest } => {
                let tag = replacement_tag(&dest)?;
                concat_sources(&sec, &dest, &html_root, &cfg.separator)?;
                tag
            }
            Directive::Update { expr, replace } => {
                let parsed = PathExpr::parse(&expr);
                let dest = replace
                    .or_else(|| parsed.compact_dest().map(str::to_string))
                    .ok_or(Error::MissingDestination { expr })?;
                let tag = replacement_tag(&dest)?;
                let raw = sec.file_paths(paths::extension_of(&dest));
                tasks::reconcile(task_tree, &parsed, &html_root, &raw)?;
                touched = true;
                tag
            }
        };
        rewritten = paths::replace_all_ci(&rewritten, &sec.text, &tag);
    }

    fs::write(output, &rewritten).map_err(|e| Error::io(output, e))?;
    tracing::info!(input = %input.display(), output = %output.display(), "wrote rewritten HTML");
    Ok(touched)
}

/// Read the section's declared sources (relative to `html_root`), join the
/// existing ones with `separator`, and write the artifact at the declared
/// destination. Missing sources are skipped with a warning.
fn concat_sources(sec: &Section, dest: &str, html_root: &Path, separator: &str) -> Result<()> {
    let mut pieces = Vec::new();
    for raw in sec.file_paths(paths::extension_of(dest)) {
        let source = html_root.join(&raw);
        if source.exists() {
            pieces.push(fs::read_to_string(&source).map_err(|e| Error::io(&source, e))?);
        } else {
            tracing::warn!(source = %source.display(), "declared source missing, skipped");
        }
    }

    let artifact = html_root.join(dest);
    if let Some(parent) = artifact.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
    }
    fs::write(&artifact, pieces.join(separator)).map_err(|e| Error::io(&artifact, e))?;
    tracing::info!(artifact = %artifact.display(), sources = pieces.len(), "wrote concatenated artifact");
    Ok(())
}

/// The tag substituted for a section, chosen by the output path's extension.
///
/// # Errors
///
/// Anything other than `.js` or `.css` has no replacement tag and is a
/// configuration error.
pub fn replacement_tag(dest: &str) -> Result<String> {
    match paths::extension_of(dest) {
        ".js" => Ok(format!(r#"<script src="{dest}"></script>"#)),
        ".css" => Ok(format!(r#"<link rel="stylesheet" href="{dest}">"#)),
        _ => Err(Error::UnsupportedExtension {
            path: dest.to_string(),
        }),
    }
}

#[cfg(test)]
#[path = "tests/build.rs"]
mod tests;
