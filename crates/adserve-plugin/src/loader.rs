// SPDX-FileCopyrightText: 2026 Adserve Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The component loader: resolve, load, instantiate, and tag components.
//!
//! Every operation takes the configuration explicitly and is a synchronous
//! resolve-load-instantiate (or invoke) sequence. The only state kept across
//! calls is the manifest load cache, which makes loading a component file
//! idempotent.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use adserve_config::AdserveConfig;
use adserve_core::traits::resolve_method;
use adserve_core::{
    AdserveError, ComponentDescriptor, ComponentIndex, ComponentMap, ErrorReporter, HookPoint,
    HookType, ScanDepth, TracingReporter,
};
use serde_json::Value;
use tracing::{debug, warn};

use crate::dispatch;
use crate::enablement;
use crate::instance::ComponentInstance;
use crate::manifest::{ComponentManifest, parse_component_manifest};
use crate::naming::{component_class_name, component_path, fallback_class_name, fallback_path};
use crate::registry::{ComponentFactory, ComponentRegistry};
use crate::scanner::scan_component_files;

/// Loads components from a plugin tree using a class registry.
pub struct ComponentLoader {
    registry: Arc<ComponentRegistry>,
    reporter: Arc<dyn ErrorReporter>,
    loaded: Mutex<HashMap<PathBuf, Arc<ComponentManifest>>>,
}

impl ComponentLoader {
    /// Create a loader that reports hard failures through `tracing`.
    pub fn new(registry: Arc<ComponentRegistry>) -> Self {
        Self::with_reporter(registry, Arc::new(TracingReporter))
    }

    /// Create a loader with a custom error reporter.
    pub fn with_reporter(registry: Arc<ComponentRegistry>, reporter: Arc<dyn ErrorReporter>) -> Self {
        Self {
            registry,
            reporter,
            loaded: Mutex::new(HashMap::new()),
        }
    }

    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    /// Number of distinct component files loaded so far.
    pub fn loaded_count(&self) -> usize {
        self.loaded
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Load and instantiate `extension/group/component`.
    ///
    /// `component` defaults to `group`. Enablement is evaluated after the
    /// component is constructed, so construction happens even for disabled
    /// components; a disabled component is returned with `enabled() == false`.
    pub fn factory(
        &self,
        config: &AdserveConfig,
        extension: &str,
        group: &str,
        component: Option<&str>,
    ) -> Result<ComponentInstance, AdserveError> {
        self.instantiate(config, ComponentDescriptor::new(extension, group, component))
    }

    /// [`factory`](Self::factory) for an `extension:group:component` identifier.
    ///
    /// Identifiers without exactly three parts are rejected with
    /// [`AdserveError::MalformedIdentifier`].
    pub fn factory_by_identifier(
        &self,
        config: &AdserveConfig,
        identifier: &str,
    ) -> Result<ComponentInstance, AdserveError> {
        let descriptor = ComponentDescriptor::parse_identifier(identifier)?;
        self.instantiate(config, descriptor)
    }

    /// Discover and load every component under an extension (or one group).
    ///
    /// Files directly in the extension directory, and files nested below a
    /// group's own directory, are skipped: only `extension/group/component`
    /// files are addressable. Components that fail to load, or are disabled
    /// while `enabled_only` is set, are left out of the result.
    pub fn get_components(
        &self,
        config: &AdserveConfig,
        extension: &str,
        group: Option<&str>,
        index: ComponentIndex,
        depth: ScanDepth,
        enabled_only: bool,
    ) -> ComponentMap<ComponentInstance> {
        let extension_dir = config.extensions_root().join(extension);
        let scan_dir = match group.filter(|g| !g.is_empty()) {
            Some(g) => extension_dir.join(g),
            None => extension_dir.clone(),
        };

        let mut components = ComponentMap::new();
        for file in scan_component_files(&extension_dir, &scan_dir, depth) {
            let Some((group, name)) = file.group_and_component() else {
                debug!(key = %file.key, "skipping component file outside a group directory");
                continue;
            };

            let instance = match self.factory(config, extension, group, Some(name)) {
                Ok(instance) => instance,
                Err(err) => {
                    warn!(key = %file.key, error = %err, "dropping component that failed to load");
                    continue;
                }
            };

            if enabled_only && !instance.enabled() {
                debug!(identifier = %instance.identifier(), "skipping disabled component");
                continue;
            }

            let key = match index {
                ComponentIndex::Name => name.to_string(),
                ComponentIndex::GroupAndName => file.key.clone(),
            };
            components.insert(key, instance);
        }

        debug!(extension, count = components.len(), "components discovered");
        components
    }

    /// Call a class-level method without instantiating the component.
    ///
    /// Enablement is checked before the component file is loaded. The method
    /// name is matched case-insensitively; `None` args call with no arguments.
    pub fn call_static_method(
        &self,
        config: &AdserveConfig,
        extension: &str,
        group: &str,
        component: Option<&str>,
        method: &str,
        args: Option<&[Value]>,
    ) -> Result<Value, AdserveError> {
        let descriptor = ComponentDescriptor::new(extension, group, component);
        if !enablement::is_enabled(config, extension, group) {
            return Err(AdserveError::ComponentDisabled {
                identifier: descriptor.identifier(),
            });
        }

        let (_, factory, class) = self.include_component_file(config, &descriptor)?;
        let resolved = resolve_method(factory.static_methods(), method).ok_or_else(|| {
            self.fail(AdserveError::MethodNotFound {
                class,
                method: method.to_string(),
            })
        })?;

        factory
            .call_static(resolved, args.unwrap_or_default())
            .map_err(|e| self.fail(e))
    }

    /// Run `method` on every component, all-or-nothing. See
    /// [`dispatch::call_on_components`].
    pub fn call_on_components(
        &self,
        components: &ComponentMap<ComponentInstance>,
        method: &str,
        args: Option<&[Value]>,
    ) -> Result<ComponentMap<Value>, AdserveError> {
        dispatch::call_on_components(components, method, args, self.reporter.as_ref())
    }

    /// Run `method` on maintenance components matching a hook. See
    /// [`dispatch::call_on_components_by_hook`].
    pub fn call_on_components_by_hook(
        &self,
        components: &ComponentMap<ComponentInstance>,
        method: &str,
        hook_type: HookType,
        hook_point: &HookPoint,
        args: Option<&[Value]>,
    ) -> Result<bool, AdserveError> {
        dispatch::call_on_components_by_hook(
            components,
            method,
            hook_type,
            hook_point,
            args,
            self.reporter.as_ref(),
        )
    }

    /// Load the extension-wide fallback handler.
    ///
    /// The handler lives at `<root>/<extension>/<extension>.toml` and is
    /// registered as `Plugins_<extension>`. It is always reported disabled.
    pub fn get_fallback_handler(
        &self,
        config: &AdserveConfig,
        extension: &str,
    ) -> Result<ComponentInstance, AdserveError> {
        let path = fallback_path(&config.extensions_root(), extension);
        let manifest = self.load_manifest(&path).map_err(|err| {
            if err.is_not_found() {
                self.reporter.report(&err);
            }
            err
        })?;

        let class = fallback_class_name(extension);
        let factory = self.registry.fallback(&class).ok_or_else(|| {
            self.fail(AdserveError::ClassNotFound {
                class: class.clone(),
                path: path.clone(),
            })
        })?;
        let inner = factory.create().map_err(|e| {
            self.fail(AdserveError::Construction {
                class: class.clone(),
                message: e.to_string(),
            })
        })?;

        let descriptor = ComponentDescriptor {
            extension: extension.to_string(),
            group: String::new(),
            component: String::new(),
        };
        Ok(ComponentInstance::new(descriptor, false, class, manifest, inner))
    }

    fn instantiate(
        &self,
        config: &AdserveConfig,
        descriptor: ComponentDescriptor,
    ) -> Result<ComponentInstance, AdserveError> {
        let (manifest, factory, class) = self.include_component_file(config, &descriptor)?;
        let inner = factory.create(&descriptor).map_err(|e| {
            self.fail(AdserveError::Construction {
                class: class.clone(),
                message: e.to_string(),
            })
        })?;

        let enabled = enablement::is_enabled(config, &descriptor.extension, &descriptor.group);
        debug!(identifier = %descriptor, class = %class, enabled, "component instantiated");
        Ok(ComponentInstance::new(descriptor, enabled, class, manifest, inner))
    }

    /// Load the component file and resolve its class.
    fn include_component_file(
        &self,
        config: &AdserveConfig,
        descriptor: &ComponentDescriptor,
    ) -> Result<(Arc<ComponentManifest>, Arc<dyn ComponentFactory>, String), AdserveError> {
        let path = component_path(&config.extensions_root(), descriptor);
        let manifest = self.load_manifest(&path)?;

        let class = component_class_name(descriptor);
        match self.registry.component(&class) {
            Some(factory) => Ok((manifest, factory, class)),
            None => Err(self.fail(AdserveError::ClassNotFound { class, path })),
        }
    }

    /// Read and parse a component file once; later calls hit the cache.
    fn load_manifest(&self, path: &Path) -> Result<Arc<ComponentManifest>, AdserveError> {
        if !path.is_file() {
            return Err(AdserveError::ComponentNotFound {
                path: path.to_path_buf(),
            });
        }

        let mut loaded = self.loaded.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(manifest) = loaded.get(path) {
            return Ok(Arc::clone(manifest));
        }

        let content = std::fs::read_to_string(path).map_err(|source| {
            self.fail(AdserveError::Io {
                path: path.to_path_buf(),
                source,
            })
        })?;
        let manifest = Arc::new(parse_component_manifest(&content, path).map_err(|e| self.fail(e))?);

        debug!(path = %path.display(), "component file loaded");
        loaded.insert(path.to_path_buf(), Arc::clone(&manifest));
        Ok(manifest)
    }

    /// Report hard failures, then hand the error back for returning.
    fn fail(&self, error: AdserveError) -> AdserveError {
        if error.is_hard() {
            self.reporter.report(&error);
        }
        error
    }
}

impl std::fmt::Debug for ComponentLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentLoader")
            .field("registry", &self.registry)
            .field("loaded", &self.loaded_count())
            .finish()
    }
}
