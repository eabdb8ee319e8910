//! Error taxonomy for the section engine and CLI.
//!
//! Missing concat sources and malformed sections are not errors: the first is
//! recovered with a warning, the second is a silent skip. Everything here is
//! fatal and aborts the run with the offending path or expression.

use std::path::Path;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal conditions raised while processing HTML files and task trees.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Reading or writing a file failed.
    #[error("{path}: {source}")]
    Io {
        /// The file being read or written.
        path: String,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// An intermediate segment of a dotted task path is absent from the
    /// configuration tree. The referenced task must already exist.
    #[error("task path `{path}` has no entry `{segment}`")]
    UnresolvedTaskPath {
        /// The full dotted path being resolved.
        path: String,
        /// The segment that could not be found.
        segment: String,
    },

    /// A resolved task entry is not the container shape the path implies
    /// (an object where descent continues, an array at the list slot).
    #[error("task entry at `{path}` is not an object/list where one was expected")]
    MalformedTaskTree {
        /// The dotted path whose resolved value had the wrong shape.
        path: String,
    },

    /// The output path's extension has no replacement tag defined.
    #[error("no replacement tag defined for `{path}` (expected a .js or .css destination)")]
    UnsupportedExtension {
        /// The offending output path.
        path: String,
    },

    /// An `update` section gives no way to determine its destination file,
    /// so neither the expected extension nor the tag type can be chosen.
    #[error("update section `{expr}` declares no destination file")]
    MissingDestination {
        /// The section's task path expression.
        expr: String,
    },

    /// Two input files map to the same output path under `--out-dir`,
    /// which would silently overwrite the first file's result.
    #[error("output path `{path}` is written by more than one input file")]
    OutputCollision {
        /// The contested output path.
        path: String,
    },

    /// The task configuration file is not valid JSON.
    #[error("invalid task configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// An [`Error::Io`] tagged with the offending path.
    #[must_use]
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }
}
