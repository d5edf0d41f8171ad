// SPDX-FileCopyrightText: 2026 Adserve Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Component registry mapping class names to typed factories.
//!
//! Every loadable component class is registered here at startup, keyed by the
//! class name derived from its `extension/group/component` path. The loader
//! looks factories up by that name after the component file has been found.

use std::collections::HashMap;
use std::sync::Arc;

use adserve_core::{AdserveError, Component, ComponentDescriptor};
use serde_json::Value;
use tracing::warn;

use crate::naming::{component_class_name, fallback_class_name};

/// Factory for a component class.
pub trait ComponentFactory: Send + Sync {
    /// Construct a component instance for the given identity.
    fn create(&self, descriptor: &ComponentDescriptor) -> Result<Box<dyn Component>, AdserveError>;

    /// Names of the class-level methods callable without an instance.
    fn static_methods(&self) -> &[&'static str] {
        &[]
    }

    /// Invoke a class-level method. `method` is one of `static_methods()`.
    fn call_static(&self, method: &str, _args: &[Value]) -> Result<Value, AdserveError> {
        Err(AdserveError::invocation(method, "no static methods defined"))
    }
}

impl<F> ComponentFactory for F
where
    F: Fn(&ComponentDescriptor) -> Result<Box<dyn Component>, AdserveError> + Send + Sync,
{
    fn create(&self, descriptor: &ComponentDescriptor) -> Result<Box<dyn Component>, AdserveError> {
        self(descriptor)
    }
}

/// Factory for an extension-wide fallback handler. Takes no arguments.
pub trait FallbackFactory: Send + Sync {
    fn create(&self) -> Result<Box<dyn Component>, AdserveError>;
}

impl<F> FallbackFactory for F
where
    F: Fn() -> Result<Box<dyn Component>, AdserveError> + Send + Sync,
{
    fn create(&self) -> Result<Box<dyn Component>, AdserveError> {
        self()
    }
}

/// Registry of component and fallback handler classes.
#[derive(Default)]
pub struct ComponentRegistry {
    components: HashMap<String, Arc<dyn ComponentFactory>>,
    fallbacks: HashMap<String, Arc<dyn FallbackFactory>>,
}

impl ComponentRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a component class for the given path segments.
    ///
    /// Registering the same class twice replaces the earlier factory.
    pub fn register(
        &mut self,
        descriptor: &ComponentDescriptor,
        factory: impl ComponentFactory + 'static,
    ) {
        let class = component_class_name(descriptor);
        if self.components.insert(class.clone(), Arc::new(factory)).is_some() {
            warn!(class = %class, "component class registered twice, replacing");
        }
    }

    /// Register the fallback handler class for an extension.
    pub fn register_fallback(&mut self, extension: &str, factory: impl FallbackFactory + 'static) {
        let class = fallback_class_name(extension);
        if self.fallbacks.insert(class.clone(), Arc::new(factory)).is_some() {
            warn!(class = %class, "fallback class registered twice, replacing");
        }
    }

    /// Look up a component factory by class name.
    pub fn component(&self, class: &str) -> Option<Arc<dyn ComponentFactory>> {
        self.components.get(class).cloned()
    }

    /// Look up a fallback factory by class name.
    pub fn fallback(&self, class: &str) -> Option<Arc<dyn FallbackFactory>> {
        self.fallbacks.get(class).cloned()
    }

    /// All registered class names (components and fallbacks), sorted.
    pub fn class_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .components
            .keys()
            .chain(self.fallbacks.keys())
            .map(String::as_str)
            .collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of registered classes.
    pub fn len(&self) -> usize {
        self.components.len() + self.fallbacks.len()
    }

    /// Returns true if no classes are registered.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty() && self.fallbacks.is_empty()
    }
}

impl std::fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("classes", &self.class_names())
            .finish()
    }
}
