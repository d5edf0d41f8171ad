// SPDX-FileCopyrightText: 2026 Adserve Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across the component loader and dispatch helpers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::AdserveError;

/// Separator between the parts of a component identifier.
pub const IDENTIFIER_SEPARATOR: char = ':';

/// Identifies a component by its `extension/group/component` path segments.
///
/// [`identifier`](Self::identifier) gives the colon-joined form
/// `extension:group:component`; parsing is the exact inverse as long as no
/// part contains a colon.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentDescriptor {
    /// Top-level namespace (the extension directory).
    pub extension: String,
    /// Sub-namespace within the extension. May be empty.
    pub group: String,
    /// Leaf component name.
    pub component: String,
}

impl ComponentDescriptor {
    /// Build a descriptor. When `component` is `None` the group name is used.
    pub fn new(
        extension: impl Into<String>,
        group: impl Into<String>,
        component: Option<&str>,
    ) -> Self {
        let group = group.into();
        let component = component.map(str::to_string).unwrap_or_else(|| group.clone());
        Self {
            extension: extension.into(),
            group,
            component,
        }
    }

    /// The colon-joined identifier, e.g. `deliveryLog:ox_click:ox_click`.
    pub fn identifier(&self) -> String {
        format!(
            "{}{sep}{}{sep}{}",
            self.extension,
            self.group,
            self.component,
            sep = IDENTIFIER_SEPARATOR
        )
    }

    /// Parse an identifier produced by [`identifier`](Self::identifier).
    ///
    /// Exactly three colon-separated parts are required. Parts may be empty.
    pub fn parse_identifier(identifier: &str) -> Result<Self, AdserveError> {
        let parts: Vec<&str> = identifier.split(IDENTIFIER_SEPARATOR).collect();
        match parts.as_slice() {
            [extension, group, component] => Ok(Self {
                extension: (*extension).to_string(),
                group: (*group).to_string(),
                component: (*component).to_string(),
            }),
            _ => Err(AdserveError::MalformedIdentifier(identifier.to_string())),
        }
    }
}

impl fmt::Display for ComponentDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.identifier())
    }
}

impl FromStr for ComponentDescriptor {
    type Err = AdserveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_identifier(s)
    }
}

/// When a maintenance plugin runs relative to the task it hooks.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum HookType {
    /// Runs before the standard task; returning `false` replaces it.
    Pre,
    /// Runs after the standard task.
    Post,
}

/// A named maintenance lifecycle point, e.g. `summariseIntermediateClicks`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HookPoint(pub String);

impl HookPoint {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HookPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How far a component scan descends below its starting directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanDepth {
    /// Walk the whole subtree.
    Unlimited,
    /// Descend at most this many directory levels. Files directly in the
    /// scan directory are at level 0.
    Levels(usize),
}

impl ScanDepth {
    /// The equivalent `walkdir` max depth (the root itself is depth 0 there,
    /// so files in the root sit at depth 1).
    pub fn max_walk_depth(self) -> usize {
        match self {
            ScanDepth::Unlimited => usize::MAX,
            ScanDepth::Levels(levels) => levels.saturating_add(1),
        }
    }
}

impl Default for ScanDepth {
    fn default() -> Self {
        ScanDepth::Levels(1)
    }
}

/// How results of a component scan are keyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComponentIndex {
    /// Key by bare component name. Later duplicates overwrite earlier ones.
    #[default]
    Name,
    /// Key by `group:component`, always unique.
    GroupAndName,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn component_defaults_to_group() {
        let d = ComponentDescriptor::new("deliveryLog", "ox_click", None);
        assert_eq!(d.component, "ox_click");
        assert_eq!(d.identifier(), "deliveryLog:ox_click:ox_click");
    }

    #[test]
    fn explicit_component_is_kept() {
        let d = ComponentDescriptor::new("deliveryLimitations", "Site", Some("Channel"));
        assert_eq!(d.group, "Site");
        assert_eq!(d.component, "Channel");
        assert_eq!(d.to_string(), "deliveryLimitations:Site:Channel");
    }

    #[test]
    fn empty_group_round_trips() {
        let d = ComponentDescriptor::new("bannerTypeText", "", Some("plain"));
        let parsed: ComponentDescriptor = d.identifier().parse().unwrap();
        assert_eq!(parsed, d);
        assert_eq!(parsed.group, "");
    }

    #[test]
    fn too_few_parts_is_rejected() {
        let err = ComponentDescriptor::parse_identifier("deliveryLog:ox_click").unwrap_err();
        assert!(matches!(err, AdserveError::MalformedIdentifier(ref s) if s == "deliveryLog:ox_click"));
    }

    #[test]
    fn too_many_parts_is_rejected() {
        assert!(ComponentDescriptor::parse_identifier("a:b:c:d").is_err());
        assert!(ComponentDescriptor::parse_identifier("").is_err());
    }

    #[test]
    fn hook_type_parses_case_insensitively() {
        assert_eq!("pre".parse::<HookType>().unwrap(), HookType::Pre);
        assert_eq!("POST".parse::<HookType>().unwrap(), HookType::Post);
        assert_eq!(HookType::Pre.to_string(), "Pre");
    }

    #[test]
    fn scan_depth_maps_to_walk_depth() {
        assert_eq!(ScanDepth::default(), ScanDepth::Levels(1));
        assert_eq!(ScanDepth::Levels(0).max_walk_depth(), 1);
        assert_eq!(ScanDepth::Levels(1).max_walk_depth(), 2);
        assert_eq!(ScanDepth::Unlimited.max_walk_depth(), usize::MAX);
    }

    proptest! {
        #[test]
        fn identifier_round_trips_without_colons(
            extension in "[A-Za-z0-9_-]{0,12}",
            group in "[A-Za-z0-9_-]{0,12}",
            component in "[A-Za-z0-9_-]{0,12}",
        ) {
            let d = ComponentDescriptor::new(extension, group, Some(component.as_str()));
            let parsed = ComponentDescriptor::parse_identifier(&d.identifier()).unwrap();
            prop_assert_eq!(parsed, d);
        }
    }
}
