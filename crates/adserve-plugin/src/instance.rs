// SPDX-FileCopyrightText: 2026 Adserve Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A loaded component, tagged with its identity and enablement.

use std::sync::Arc;

use adserve_core::traits::resolve_method;
use adserve_core::{AdserveError, Component, ComponentDescriptor, MaintenancePlugin};
use serde_json::Value;

use crate::manifest::ComponentManifest;

/// The result of a successful component load.
///
/// Identity and `enabled` are set once by the loader and never change; the
/// wrapped object cannot override them.
pub struct ComponentInstance {
    descriptor: ComponentDescriptor,
    enabled: bool,
    class_name: String,
    manifest: Arc<ComponentManifest>,
    inner: Box<dyn Component>,
}

impl ComponentInstance {
    pub(crate) fn new(
        descriptor: ComponentDescriptor,
        enabled: bool,
        class_name: String,
        manifest: Arc<ComponentManifest>,
        inner: Box<dyn Component>,
    ) -> Self {
        Self {
            descriptor,
            enabled,
            class_name,
            manifest,
            inner,
        }
    }

    pub fn descriptor(&self) -> &ComponentDescriptor {
        &self.descriptor
    }

    pub fn extension(&self) -> &str {
        &self.descriptor.extension
    }

    pub fn group(&self) -> &str {
        &self.descriptor.group
    }

    pub fn component(&self) -> &str {
        &self.descriptor.component
    }

    /// `extension:group:component`.
    pub fn identifier(&self) -> String {
        self.descriptor.identifier()
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// The class name this instance was resolved under.
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn manifest(&self) -> &ComponentManifest {
        &self.manifest
    }

    /// Components that must run before this one.
    pub fn dependencies(&self) -> &[ComponentDescriptor] {
        &self.manifest.depends_on
    }

    /// Instance methods the component answers to.
    pub fn methods(&self) -> &[&'static str] {
        self.inner.methods()
    }

    /// The maintenance facet, if the component hooks maintenance tasks.
    pub fn as_maintenance(&self) -> Option<&dyn MaintenancePlugin> {
        self.inner.as_maintenance()
    }

    /// True if `method` names one of the component's methods (any case).
    pub fn responds_to(&self, method: &str) -> bool {
        resolve_method(self.inner.methods(), method).is_some()
    }

    /// Resolve `method` to the component's own spelling.
    pub fn resolve_method(&self, method: &str) -> Result<&'static str, AdserveError> {
        resolve_method(self.inner.methods(), method).ok_or_else(|| AdserveError::MethodNotFound {
            class: self.class_name.clone(),
            method: method.to_string(),
        })
    }

    /// Invoke a method by name (case-insensitive).
    pub fn call(&self, method: &str, args: &[Value]) -> Result<Value, AdserveError> {
        let resolved = self.resolve_method(method)?;
        self.inner.call(resolved, args)
    }
}

impl std::fmt::Debug for ComponentInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentInstance")
            .field("descriptor", &self.descriptor)
            .field("enabled", &self.enabled)
            .field("class_name", &self.class_name)
            .field("methods", &self.inner.methods())
            .finish()
    }
}
