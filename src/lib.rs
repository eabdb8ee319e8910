//! Scan HTML documents for marked build sections and fuse what they declare.
//!
//! A section either concatenates its declared script/stylesheet sources into
//! one artifact (`concat`) or merges the discovered file list into an
//! existing task's configured inputs (`update`); either way the section text
//! is replaced by a single `<script>` or `<link>` tag in the output HTML.
#![allow(clippy::multiple_crate_versions)]

pub mod build;
pub mod config;
pub mod error;
pub mod paths;
pub mod section;
pub mod tasks;

pub use error::{Error, Result};
