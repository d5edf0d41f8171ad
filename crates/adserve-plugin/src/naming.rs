// SPDX-FileCopyrightText: 2026 Adserve Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Path and class-name conventions for component packages.
//!
//! These are the whole contract a plugin author honours: where the component
//! file lives and which class name the registry must know it by.

use std::path::{Path, PathBuf};

use adserve_core::ComponentDescriptor;

/// Suffix of every component file.
pub const COMPONENT_SUFFIX: &str = ".component.toml";

/// Suffix of an extension's fallback handler file.
pub const FALLBACK_SUFFIX: &str = ".toml";

/// Prefix of every component and fallback class name.
pub const CLASS_PREFIX: &str = "Plugins";

/// Upper-case the first character, leaving the rest untouched.
pub fn ucfirst(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `Plugins_<Extension>_<Group>_<Component>`.
pub fn component_class_name(descriptor: &ComponentDescriptor) -> String {
    format!(
        "{CLASS_PREFIX}_{}_{}_{}",
        ucfirst(&descriptor.extension),
        ucfirst(&descriptor.group),
        ucfirst(&descriptor.component)
    )
}

/// `Plugins_<extension>`, with the extension name as-is.
pub fn fallback_class_name(extension: &str) -> String {
    format!("{CLASS_PREFIX}_{extension}")
}

/// `<root>/<extension>/[<group>/]<component>.component.toml`.
pub fn component_path(root: &Path, descriptor: &ComponentDescriptor) -> PathBuf {
    let mut path = root.join(&descriptor.extension);
    if !descriptor.group.is_empty() {
        path.push(&descriptor.group);
    }
    path.push(format!("{}{COMPONENT_SUFFIX}", descriptor.component));
    path
}

/// `<root>/<extension>/<extension>.toml`.
pub fn fallback_path(root: &Path, extension: &str) -> PathBuf {
    root.join(extension)
        .join(format!("{extension}{FALLBACK_SUFFIX}"))
}

/// Strip [`COMPONENT_SUFFIX`] from a file name, if present.
pub fn component_stem(file_name: &str) -> Option<&str> {
    file_name
        .strip_suffix(COMPONENT_SUFFIX)
        .filter(|stem| !stem.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ucfirst_only_touches_first_char() {
        assert_eq!(ucfirst("deliveryLog"), "DeliveryLog");
        assert_eq!(ucfirst("ox_click"), "Ox_click");
        assert_eq!(ucfirst(""), "");
        assert_eq!(ucfirst("Site"), "Site");
    }

    #[test]
    fn component_class_name_joins_capitalised_segments() {
        let d = ComponentDescriptor::new("deliveryLog", "ox_click", None);
        assert_eq!(
            component_class_name(&d),
            "Plugins_DeliveryLog_Ox_click_Ox_click"
        );
    }

    #[test]
    fn empty_group_leaves_double_underscore() {
        let d = ComponentDescriptor::new("bannerTypeText", "", Some("plain"));
        assert_eq!(component_class_name(&d), "Plugins_BannerTypeText__Plain");
    }

    #[test]
    fn fallback_class_name_is_not_capitalised() {
        assert_eq!(fallback_class_name("deliveryLog"), "Plugins_deliveryLog");
    }

    #[test]
    fn component_path_with_group() {
        let d = ComponentDescriptor::new("deliveryLog", "ox_click", None);
        assert_eq!(
            component_path(Path::new("/srv/plugins"), &d),
            PathBuf::from("/srv/plugins/deliveryLog/ox_click/ox_click.component.toml")
        );
    }

    #[test]
    fn component_path_without_group_collapses_to_extension_root() {
        let d = ComponentDescriptor::new("bannerTypeText", "", Some("plain"));
        assert_eq!(
            component_path(Path::new("plugins"), &d),
            PathBuf::from("plugins/bannerTypeText/plain.component.toml")
        );
    }

    #[test]
    fn fallback_path_is_named_after_extension() {
        assert_eq!(
            fallback_path(Path::new("plugins"), "deliveryLog"),
            PathBuf::from("plugins/deliveryLog/deliveryLog.toml")
        );
    }

    #[test]
    fn component_stem_strips_suffix() {
        assert_eq!(component_stem("ox_click.component.toml"), Some("ox_click"));
        assert_eq!(component_stem(".component.toml"), None);
        assert_eq!(component_stem("ox_click.toml"), None);
    }
}
