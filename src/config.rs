//! Configuration to acknowledge developer preferences as well as set defaults.
//!
//! Specifically, we try to find a sinter.toml, and if present we load settings
//! from there. This provides the marker keyword and the separator placed
//! between concatenated sources.

use facet::Facet;
use std::fs;

#[derive(Facet, Clone)]
/// User preferences loaded from sinter.toml or falling back to defaults.
pub struct Config {
    #[facet(default = "sinter".to_string())]
    /// Marker keyword searched for inside HTML comments.
    pub marker: String,
    #[facet(default = "\n".to_string())]
    /// Separator joined between concatenated source file contents.
    pub separator: String,
}

impl Config {
    #[must_use]
    /// Load configuration from sinter.toml if present.
    ///
    /// # Panics
    ///
    /// Panics if the default configuration cannot be parsed.
    pub fn load() -> Self {
        if let Ok(contents) = fs::read_to_string("sinter.toml") {
            if let Ok(config) = facet_toml::from_str::<Self>(&contents) {
                return config;
            }
        }
        facet_toml::from_str::<Self>("").unwrap()
    }
}
