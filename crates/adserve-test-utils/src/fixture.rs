// SPDX-FileCopyrightText: 2026 Adserve Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin tree fixtures on temporary directories.
//!
//! `PluginTree` lays out `<extension>/<group>/<component>.component.toml`
//! files under a temp dir and produces a matching `AdserveConfig`.

use std::path::{Path, PathBuf};

use adserve_config::AdserveConfig;
use adserve_core::{AdserveError, ComponentDescriptor};
use adserve_plugin::naming::{COMPONENT_SUFFIX, component_path, fallback_path};

/// Builder for plugin tree fixtures.
pub struct PluginTreeBuilder {
    files: Vec<(PathBuf, String)>,
    groups: Vec<(String, bool)>,
}

impl PluginTreeBuilder {
    fn new() -> Self {
        Self {
            files: Vec::new(),
            groups: Vec::new(),
        }
    }

    /// Add an empty component manifest at `extension/group/component`.
    pub fn component(self, extension: &str, group: &str, component: &str) -> Self {
        self.component_with(extension, group, component, "")
    }

    /// Add a component manifest with the given TOML body.
    pub fn component_with(mut self, extension: &str, group: &str, component: &str, body: &str) -> Self {
        let descriptor = ComponentDescriptor::new(extension, group, Some(component));
        self.files
            .push((component_path(Path::new(""), &descriptor), body.to_string()));
        self
    }

    /// Add a component file directly in the extension directory (no group).
    pub fn root_file(mut self, extension: &str, name: &str) -> Self {
        self.files.push((
            Path::new(extension).join(format!("{name}{COMPONENT_SUFFIX}")),
            String::new(),
        ));
        self
    }

    /// Add a component file below `extension/<relative_dir>`.
    pub fn nested_file(mut self, extension: &str, relative_dir: &str, name: &str) -> Self {
        self.files.push((
            Path::new(extension)
                .join(relative_dir)
                .join(format!("{name}{COMPONENT_SUFFIX}")),
            String::new(),
        ));
        self
    }

    /// Add the extension's fallback handler file.
    pub fn fallback(mut self, extension: &str) -> Self {
        self.files
            .push((fallback_path(Path::new(""), extension), String::new()));
        self
    }

    /// Set a `[plugin_group_components]` entry on the produced config.
    pub fn group_enabled(mut self, group: &str, enabled: bool) -> Self {
        self.groups.push((group.to_string(), enabled));
        self
    }

    /// Write the tree to a fresh temp directory.
    pub fn build(self) -> Result<PluginTree, AdserveError> {
        let dir = tempfile::TempDir::new().map_err(|e| AdserveError::Internal(e.to_string()))?;

        for (relative, body) in &self.files {
            let path = dir.path().join(relative);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|source| AdserveError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
            std::fs::write(&path, body).map_err(|source| AdserveError::Io { path, source })?;
        }

        let mut config = AdserveConfig::default();
        config.plugin_paths.extensions = dir.path().display().to_string();
        config.plugin_group_components.extend(self.groups);

        Ok(PluginTree { dir, config })
    }
}

/// A plugin tree on disk plus the config pointing at it.
///
/// The directory is removed when the fixture is dropped.
pub struct PluginTree {
    dir: tempfile::TempDir,
    config: AdserveConfig,
}

impl PluginTree {
    pub fn builder() -> PluginTreeBuilder {
        PluginTreeBuilder::new()
    }

    /// The plugins root directory.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Config with `plugin_paths.extensions` set to [`root`](Self::root).
    pub fn config(&self) -> &AdserveConfig {
        &self.config
    }

    /// Overwrite (or create) a file relative to the root.
    pub fn write(&self, relative: &str, body: &str) -> Result<PathBuf, AdserveError> {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| AdserveError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(&path, body).map_err(|source| AdserveError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}
