// SPDX-FileCopyrightText: 2026 Adserve Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Group enablement for legacy extensions.
//!
//! Components are enabled unless their extension is one of the refactored
//! extensions below, in which case the group must be switched on in
//! `[plugin_group_components]`. Extensions are added here as they move to
//! the group enablement model; all others are unconditionally enabled.

use adserve_config::AdserveConfig;

/// Extensions whose components are gated by the group enablement map.
pub const REFACTORED_EXTENSIONS: &[&str] =
    &["deliveryLimitations", "bannerTypeHtml", "bannerTypeText"];

/// Whether components of `extension/group` are enabled under `config`.
pub fn is_enabled(config: &AdserveConfig, extension: &str, group: &str) -> bool {
    if REFACTORED_EXTENSIONS.contains(&extension) {
        return config.group_enabled(group);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(groups: &[(&str, bool)]) -> AdserveConfig {
        let mut config = AdserveConfig::default();
        for (group, on) in groups {
            config.plugin_group_components.insert(group.to_string(), *on);
        }
        config
    }

    #[test]
    fn other_extensions_are_always_enabled() {
        let config = config_with(&[("ox_click", false)]);
        assert!(is_enabled(&config, "deliveryLog", "ox_click"));
        assert!(is_enabled(&config, "deliveryLog", "unlisted"));
    }

    #[test]
    fn refactored_extension_needs_truthy_group() {
        let config = config_with(&[("Site", true), ("Client", false)]);
        assert!(is_enabled(&config, "deliveryLimitations", "Site"));
        assert!(!is_enabled(&config, "deliveryLimitations", "Client"));
        assert!(!is_enabled(&config, "deliveryLimitations", "Geo"));
    }

    #[test]
    fn every_refactored_extension_is_gated() {
        let config = AdserveConfig::default();
        for ext in REFACTORED_EXTENSIONS {
            assert!(!is_enabled(&config, ext, "anything"), "{ext} should be gated");
        }
    }
}
