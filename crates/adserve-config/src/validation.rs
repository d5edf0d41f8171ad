// SPDX-FileCopyrightText: 2026 Adserve Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use crate::diagnostic::ConfigError;
use crate::model::AdserveConfig;

/// Log levels accepted by `logging.level`.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &AdserveConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.plugin_paths.extensions.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "plugin_paths.extensions must not be empty".to_string(),
        });
    }

    let level = config.logging.level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "logging.level `{}` is not one of: {}",
                config.logging.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    for group in config.plugin_group_components.keys() {
        if group.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: "plugin_group_components keys must not be empty".to_string(),
            });
        } else if group.contains(':') {
            errors.push(ConfigError::Validation {
                message: format!("plugin_group_components key `{group}` must not contain ':'"),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
