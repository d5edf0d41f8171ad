// SPDX-FileCopyrightText: 2026 Adserve Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `adserve-plugins list`, `show`, and `fallback` implementations.

use std::sync::Arc;

use adserve_config::AdserveConfig;
use adserve_core::{AdserveError, ComponentIndex, ScanDepth};
use adserve_delivery_log::{BucketStore, MemoryBucketStore};
use adserve_plugin::{ComponentInstance, ComponentLoader, ComponentRegistry};

/// Registry of every component class compiled into this binary.
pub fn builtin_registry(store: Arc<dyn BucketStore>) -> ComponentRegistry {
    let mut registry = ComponentRegistry::new();
    adserve_delivery_log::register(&mut registry, store);
    registry
}

/// Loader over the built-in registry with an in-memory bucket store.
pub fn builtin_loader() -> ComponentLoader {
    let store: Arc<dyn BucketStore> = Arc::new(MemoryBucketStore::new());
    ComponentLoader::new(Arc::new(builtin_registry(store)))
}

/// Options of `adserve-plugins list`.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub group: Option<String>,
    pub full_keys: bool,
    pub all: bool,
    pub depth: ScanDepth,
}

/// One line per discovered component: key, identifier, and enablement.
pub fn list_components(
    loader: &ComponentLoader,
    config: &AdserveConfig,
    extension: &str,
    options: &ListOptions,
) -> Vec<String> {
    let index = if options.full_keys {
        ComponentIndex::GroupAndName
    } else {
        ComponentIndex::Name
    };
    let components = loader.get_components(
        config,
        extension,
        options.group.as_deref(),
        index,
        options.depth,
        !options.all,
    );

    let width = components.keys().map(str::len).max().unwrap_or(0);
    components
        .iter()
        .map(|(key, component)| {
            let state = if component.enabled() { "enabled" } else { "disabled" };
            format!("{key:<width$}  {}  [{state}]", component.identifier())
        })
        .collect()
}

/// Detail lines for one component instance.
pub fn describe(component: &ComponentInstance) -> Vec<String> {
    let manifest = component.manifest();
    let mut lines = vec![
        format!("identifier:  {}", component.identifier()),
        format!("class:       {}", component.class_name()),
        format!("enabled:     {}", component.enabled()),
    ];
    if let Some(description) = &manifest.description {
        lines.push(format!("description: {description}"));
    }
    if let Some(version) = &manifest.version {
        lines.push(format!("version:     {version}"));
    }
    lines.push(format!("methods:     {}", component.methods().join(", ")));
    if !manifest.depends_on.is_empty() {
        let deps: Vec<String> = manifest.depends_on.iter().map(|d| d.identifier()).collect();
        lines.push(format!("depends on:  {}", deps.join(", ")));
    }
    if let Some(hook) = component.as_maintenance() {
        lines.push(format!("hook:        {} {}", hook.hook_type(), hook.hook_point()));
    }
    lines
}

/// `adserve-plugins show <identifier>`.
pub fn show(
    loader: &ComponentLoader,
    config: &AdserveConfig,
    identifier: &str,
) -> Result<Vec<String>, AdserveError> {
    let component = loader.factory_by_identifier(config, identifier)?;
    Ok(describe(&component))
}

/// `adserve-plugins fallback <extension>`.
pub fn fallback(
    loader: &ComponentLoader,
    config: &AdserveConfig,
    extension: &str,
) -> Result<Vec<String>, AdserveError> {
    let handler = loader.get_fallback_handler(config, extension)?;
    Ok(vec![
        format!("extension:   {}", handler.extension()),
        format!("class:       {}", handler.class_name()),
        format!("enabled:     {}", handler.enabled()),
        format!("methods:     {}", handler.methods().join(", ")),
    ])
}
