// SPDX-FileCopyrightText: 2026 Adserve Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock components and factories for deterministic loader tests.
//!
//! `MockComponent` answers to a configured set of methods with canned results
//! and records every call. `MockFactory` hands out clones of a template
//! component, so all instances it creates share one call log.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use adserve_core::{
    AdserveError, Component, ComponentDescriptor, HookPoint, HookType, MaintenancePlugin,
};
use adserve_plugin::ComponentFactory;
use serde_json::Value;

/// Shared record of `(method, args)` calls.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<(String, Vec<Value>)>>>);

impl CallLog {
    fn push(&self, method: &str, args: &[Value]) {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((method.to_string(), args.to_vec()));
    }

    /// All recorded calls in order.
    pub fn calls(&self) -> Vec<(String, Vec<Value>)> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Recorded method names in order.
    pub fn methods(&self) -> Vec<String> {
        self.calls().into_iter().map(|(m, _)| m).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).is_empty()
    }
}

/// A component with canned method results.
#[derive(Debug, Clone)]
pub struct MockComponent {
    methods: Vec<&'static str>,
    returns: HashMap<&'static str, Value>,
    failing: Vec<&'static str>,
    hook_type: Option<HookType>,
    hook_point: HookPoint,
    log: CallLog,
}

impl MockComponent {
    /// A component answering to `methods`, each returning `true`.
    pub fn new(methods: &[&'static str]) -> Self {
        Self {
            methods: methods.to_vec(),
            returns: HashMap::new(),
            failing: Vec::new(),
            hook_type: None,
            hook_point: HookPoint::new(""),
            log: CallLog::default(),
        }
    }

    /// Return `value` from `method`.
    pub fn returning(mut self, method: &'static str, value: Value) -> Self {
        self.returns.insert(method, value);
        self
    }

    /// Make `method` fail with an invocation error.
    pub fn failing(mut self, method: &'static str) -> Self {
        self.failing.push(method);
        self
    }

    /// Expose the maintenance facet with the given hook.
    pub fn with_hook(mut self, hook_type: HookType, hook_point: &str) -> Self {
        self.hook_type = Some(hook_type);
        self.hook_point = HookPoint::new(hook_point);
        self
    }

    /// Handle on the call log shared by this component and its clones.
    pub fn log(&self) -> CallLog {
        self.log.clone()
    }
}

impl Component for MockComponent {
    fn methods(&self) -> &[&'static str] {
        &self.methods
    }

    fn call(&self, method: &str, args: &[Value]) -> Result<Value, AdserveError> {
        self.log.push(method, args);
        if self.failing.iter().any(|m| *m == method) {
            return Err(AdserveError::invocation(method, "mock failure"));
        }
        Ok(self.returns.get(method).cloned().unwrap_or(Value::Bool(true)))
    }

    fn as_maintenance(&self) -> Option<&dyn MaintenancePlugin> {
        self.hook_type.map(|_| self as &dyn MaintenancePlugin)
    }
}

impl MaintenancePlugin for MockComponent {
    fn hook_type(&self) -> HookType {
        self.hook_type.unwrap_or(HookType::Post)
    }

    fn hook_point(&self) -> &HookPoint {
        &self.hook_point
    }
}

/// Factory producing clones of a template [`MockComponent`].
#[derive(Debug, Clone)]
pub struct MockFactory {
    template: MockComponent,
    static_methods: Vec<&'static str>,
    static_returns: HashMap<&'static str, Value>,
    construction_error: Option<String>,
    created: Arc<Mutex<Vec<ComponentDescriptor>>>,
    static_log: CallLog,
}

impl MockFactory {
    pub fn new(template: MockComponent) -> Self {
        Self {
            template,
            static_methods: Vec::new(),
            static_returns: HashMap::new(),
            construction_error: None,
            created: Arc::new(Mutex::new(Vec::new())),
            static_log: CallLog::default(),
        }
    }

    /// Add a class-level method returning `value`.
    pub fn with_static(mut self, method: &'static str, value: Value) -> Self {
        self.static_methods.push(method);
        self.static_returns.insert(method, value);
        self
    }

    /// Make every `create` call fail with `message`.
    pub fn failing_construction(mut self, message: &str) -> Self {
        self.construction_error = Some(message.to_string());
        self
    }

    /// Call log of the components this factory creates.
    pub fn log(&self) -> CallLog {
        self.template.log()
    }

    /// Call log of class-level method calls.
    pub fn static_log(&self) -> CallLog {
        self.static_log.clone()
    }

    /// Descriptors passed to `create`, in order.
    pub fn created(&self) -> Vec<ComponentDescriptor> {
        self.created
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ComponentFactory for MockFactory {
    fn create(&self, descriptor: &ComponentDescriptor) -> Result<Box<dyn Component>, AdserveError> {
        self.created
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(descriptor.clone());
        match &self.construction_error {
            Some(message) => Err(AdserveError::Internal(message.clone())),
            None => Ok(Box::new(self.template.clone())),
        }
    }

    fn static_methods(&self) -> &[&'static str] {
        &self.static_methods
    }

    fn call_static(&self, method: &str, args: &[Value]) -> Result<Value, AdserveError> {
        self.static_log.push(method, args);
        self.static_returns
            .get(method)
            .cloned()
            .ok_or_else(|| AdserveError::invocation(method, "no canned result"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_call_log() {
        let mock = MockComponent::new(&["run"]).returning("run", Value::from(3));
        let clone = mock.clone();

        assert_eq!(clone.call("run", &[Value::from("x")]).unwrap(), Value::from(3));
        assert_eq!(mock.log().calls(), vec![("run".to_string(), vec![Value::from("x")])]);
    }

    #[test]
    fn maintenance_facet_only_when_hooked() {
        assert!(MockComponent::new(&[]).as_maintenance().is_none());

        let hooked = MockComponent::new(&[]).with_hook(HookType::Pre, "adLogin");
        let facet = hooked.as_maintenance().unwrap();
        assert_eq!(facet.hook_type(), HookType::Pre);
        assert_eq!(facet.hook_point().as_str(), "adLogin");
    }

    #[test]
    fn factory_records_creations() {
        let factory = MockFactory::new(MockComponent::new(&["run"]));
        let d = ComponentDescriptor::new("deliveryLog", "ox_click", None);
        factory.create(&d).unwrap();
        assert_eq!(factory.created(), vec![d]);
    }
}
