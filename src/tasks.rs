//! Task path resolution and file-list reconciliation.
//!
//! The externally owned task configuration tree is a `serde_json::Value`.
//! A dotted path (`concat.app.src`) addresses a list slot directly (the
//! "full" shape); bracket annotations (`concat.app[files][dist/app.js]`)
//! descend further below the resolved leaf into a dictionary of
//! destination→sources lists (the "compact" shape), with the final
//! bracket key doubling as the destination path.
//!
//! Reconciliation is additive-only: the existing list keeps its order, new
//! entries are appended in discovery order, and stale entries are never
//! pruned even when no longer declared in the HTML.

use crate::error::{Error, Result};
use crate::paths;
use serde_json::Value;
use std::path::Path;

/// How a task stores its source list, detected once per expression.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ListShape {
    /// A dictionary of destination→sources nested under bracket sub-keys;
    /// the last sub-key is the destination.
    Compact {
        /// Bracket-enclosed sub-keys, in order of appearance.
        sub_keys: Vec<String>,
    },
    /// The resolved leaf holds the source list directly.
    Full,
}

/// A task path expression split once into its dotted path and shape.
#[derive(Clone, Debug)]
pub struct PathExpr {
    /// Dotted portion, up to the first bracket annotation.
    pub dotted: String,
    /// List shape implied by the expression.
    pub shape: ListShape,
}

impl PathExpr {
    /// Split an expression into dotted path and shape. Any `[` makes the
    /// shape compact; key names containing literal brackets are unsupported.
    #[must_use]
    pub fn parse(expr: &str) -> Self {
        let dotted = paths::dotted_prefix(expr).to_string();
        let shape = if paths::has_brackets(expr) {
            ListShape::Compact {
                sub_keys: paths::bracket_keys(expr),
            }
        } else {
            ListShape::Full
        };
        Self { dotted, shape }
    }

    /// The destination key for a compact expression, if it has one.
    #[must_use]
    pub fn compact_dest(&self) -> Option<&str> {
        match &self.shape {
            ListShape::Compact { sub_keys } => sub_keys.last().map(String::as_str),
            ListShape::Full => None,
        }
    }
}

/// Walk all but the last dotted segment from `root`, returning the container
/// value and the unresolved leaf key.
///
/// # Errors
///
/// Returns [`Error::UnresolvedTaskPath`] when an intermediate segment is
/// absent: the referenced task must already exist.
pub fn resolve<'a>(root: &'a mut Value, dotted: &str) -> Result<(&'a mut Value, String)> {
    let segments: Vec<&str> = dotted.split('.').collect();
    let Some((leaf, walk)) = segments.split_last() else {
        return Err(Error::UnresolvedTaskPath {
            path: dotted.to_string(),
            segment: String::new(),
        });
    };
    let mut container = root;
    for segment in walk {
        container = container
            .get_mut(*segment)
            .ok_or_else(|| missing(dotted, segment))?;
    }
    Ok((container, (*leaf).to_string()))
}

/// Merge root-prefixed `raw_paths` into the list the expression addresses,
/// creating the list slot if absent and writing the union back in place.
///
/// # Errors
///
/// Returns [`Error::UnresolvedTaskPath`] when a dotted segment or compact
/// sub-key is absent, [`Error::MalformedTaskTree`] when a walked value is
/// not an object or the list slot is not an array, and
/// [`Error::MissingDestination`] for a compact expression with no sub-keys.
pub fn reconcile(
    root: &mut Value,
    expr: &PathExpr,
    html_root: &Path,
    raw_paths: &[String],
) -> Result<()> {
    let (container, leaf) = resolve(root, &expr.dotted)?;
    let list = match &expr.shape {
        ListShape::Full => list_entry(container, &leaf, &expr.dotted)?,
        ListShape::Compact { sub_keys } => {
            let Some((dest, walk)) = sub_keys.split_last() else {
                return Err(Error::MissingDestination {
                    expr: expr.dotted.clone(),
                });
            };
            let mut value = container
                .get_mut(leaf.as_str())
                .ok_or_else(|| missing(&expr.dotted, &leaf))?;
            for key in walk {
                value = value
                    .get_mut(key)
                    .ok_or_else(|| missing(&expr.dotted, key))?;
            }
            list_entry(value, dest, &expr.dotted)?
        }
    };

    tracing::info!(task = %expr.dotted, before = ?list, "task file list before reconcile");
    for raw in raw_paths {
        let prefixed = html_root.join(raw).to_string_lossy().into_owned();
        let present = list
            .iter()
            .any(|entry| entry.as_str() == Some(prefixed.as_str()));
        if !present {
            list.push(Value::String(prefixed));
        }
    }
    tracing::info!(task = %expr.dotted, after = ?list, "task file list after reconcile");
    Ok(())
}

fn list_entry<'a>(container: &'a mut Value, key: &str, path: &str) -> Result<&'a mut Vec<Value>> {
    let object = container
        .as_object_mut()
        .ok_or_else(|| malformed(path))?;
    object
        .entry(key)
        .or_insert_with(|| Value::Array(Vec::new()))
        .as_array_mut()
        .ok_or_else(|| malformed(path))
}

fn missing(path: &str, segment: &str) -> Error {
    Error::UnresolvedTaskPath {
        path: path.to_string(),
        segment: segment.to_string(),
    }
}

fn malformed(path: &str) -> Error {
    Error::MalformedTaskTree {
        path: path.to_string(),
    }
}

#[cfg(test)]
#[path = "tests/tasks.rs"]
mod tests;
