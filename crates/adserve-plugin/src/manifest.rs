// SPDX-FileCopyrightText: 2026 Adserve Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Component manifest parsing from `<component>.component.toml` files.
//!
//! The file's existence is what makes a component loadable; its body is
//! optional metadata. An empty file is a valid manifest.

use std::path::Path;

use adserve_core::{AdserveError, ComponentDescriptor};
use serde::Deserialize;

/// Parsed component manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentManifest {
    /// Human-readable description.
    pub description: Option<String>,
    /// Semantic version of the component package.
    pub version: Option<semver::Version>,
    /// Components that must run before this one.
    pub depends_on: Vec<ComponentDescriptor>,
}

/// Intermediate TOML deserialization struct.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestFile {
    #[serde(default)]
    component: ComponentSection,
}

/// The `[component]` section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ComponentSection {
    description: Option<String>,
    version: Option<String>,
    #[serde(default)]
    depends_on: Vec<String>,
}

/// Parse a component manifest from TOML content.
///
/// `path` is only used for error messages.
pub fn parse_component_manifest(
    toml_content: &str,
    path: &Path,
) -> Result<ComponentManifest, AdserveError> {
    let manifest_error = |message: String| AdserveError::Manifest {
        path: path.to_path_buf(),
        message,
    };

    let file: ManifestFile = toml::from_str(toml_content).map_err(|e| manifest_error(e.to_string()))?;
    let section = file.component;

    let version = section
        .version
        .map(|v| {
            semver::Version::parse(&v)
                .map_err(|e| manifest_error(format!("invalid version '{v}': {e}")))
        })
        .transpose()?;

    let depends_on = section
        .depends_on
        .iter()
        .map(|id| {
            ComponentDescriptor::parse_identifier(id)
                .map_err(|_| manifest_error(format!("invalid dependency identifier '{id}'")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ComponentManifest {
        description: section.description,
        version,
        depends_on,
    })
}
