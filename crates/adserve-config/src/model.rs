// SPDX-FileCopyrightText: 2026 Adserve Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Adserve plugin loader.
//!
//! Fixed sections use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level Adserve configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AdserveConfig {
    /// Filesystem locations of plugin trees.
    #[serde(default)]
    pub plugin_paths: PluginPathsConfig,

    /// Per-group enablement switches, consulted for legacy extensions.
    ///
    /// ```toml
    /// [plugin_group_components]
    /// Site = true
    /// Client = false
    /// ```
    #[serde(default)]
    pub plugin_group_components: BTreeMap<String, bool>,

    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AdserveConfig {
    /// Root directory holding `<extension>/<group>/<component>` files.
    pub fn extensions_root(&self) -> PathBuf {
        PathBuf::from(&self.plugin_paths.extensions)
    }

    /// True only when the group is present in the enablement map and set.
    pub fn group_enabled(&self, group: &str) -> bool {
        self.plugin_group_components
            .get(group)
            .copied()
            .unwrap_or(false)
    }
}

/// Plugin path configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PluginPathsConfig {
    /// Directory containing one subdirectory per extension.
    #[serde(default = "default_extensions_path")]
    pub extensions: String,
}

impl Default for PluginPathsConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions_path(),
        }
    }
}

fn default_extensions_path() -> String {
    "plugins".to_string()
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_plugins_dir() {
        let config = AdserveConfig::default();
        assert_eq!(config.plugin_paths.extensions, "plugins");
        assert_eq!(config.extensions_root(), PathBuf::from("plugins"));
        assert_eq!(config.logging.level, "info");
        assert!(config.plugin_group_components.is_empty());
    }

    #[test]
    fn group_enabled_requires_truthy_entry() {
        let mut config = AdserveConfig::default();
        config.plugin_group_components.insert("Site".into(), true);
        config.plugin_group_components.insert("Client".into(), false);

        assert!(config.group_enabled("Site"));
        assert!(!config.group_enabled("Client"));
        assert!(!config.group_enabled("Geo"));
    }
}
