// SPDX-FileCopyrightText: 2026 Adserve Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./adserve.toml` > `~/.config/adserve/adserve.toml` > `/etc/adserve/adserve.toml`
//! with environment variable overrides via `ADSERVE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::AdserveConfig;

/// System-wide configuration file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/adserve/adserve.toml";

/// Local configuration file, relative to the working directory.
pub const LOCAL_CONFIG_FILE: &str = "adserve.toml";

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/adserve/adserve.toml` (system-wide)
/// 3. `~/.config/adserve/adserve.toml` (user XDG config)
/// 4. `./adserve.toml` (local directory)
/// 5. `ADSERVE_*` environment variables
pub fn load_config() -> Result<AdserveConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<AdserveConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(AdserveConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<AdserveConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(AdserveConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading.
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(AdserveConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// `~/.config/adserve/adserve.toml`, when a config dir is known.
pub fn user_config_path() -> Option<std::path::PathBuf> {
    dirs::config_dir().map(|d| d.join("adserve").join(LOCAL_CONFIG_FILE))
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because section and key
/// names contain underscores: `ADSERVE_PLUGIN_PATHS_EXTENSIONS` must map to
/// `plugin_paths.extensions`, not `plugin.paths.extensions`. Lowercasing is
/// done by [`map_env_key`] so group names keep their case:
/// `ADSERVE_PLUGIN_GROUP_COMPONENTS_Site` enables group `Site`.
fn env_provider() -> Env {
    Env::prefixed("ADSERVE_")
        .lowercase(false)
        .map(|key| map_env_key(key.as_str()).into())
}

/// Map a prefix-stripped env var name to a dotted config path.
///
/// Section names match case-insensitively and are lowercased, as are the keys
/// of fixed sections. Keys under `plugin_group_components` are group names and
/// are kept as written.
pub(crate) fn map_env_key(key: &str) -> String {
    let lower = key.to_ascii_lowercase();
    for section in ["plugin_group_components", "plugin_paths", "logging"] {
        let Some(rest) = lower.strip_prefix(section).and_then(|r| r.strip_prefix('_')) else {
            continue;
        };
        if section == "plugin_group_components" {
            // ASCII lowercasing keeps byte offsets, so the original tail lines up.
            let group = &key[key.len() - rest.len()..];
            return format!("{section}.{group}");
        }
        return format!("{section}.{rest}");
    }
    lower
}
