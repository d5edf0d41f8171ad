// SPDX-FileCopyrightText: 2026 Adserve Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The component capability contract.

use serde_json::Value;

use crate::error::AdserveError;
use crate::types::{HookPoint, HookType};

/// The trait every loadable component implements.
///
/// Identity (`extension`, `group`, `component`) and enablement are not part
/// of this trait: the loader owns them and stamps them onto the
/// `ComponentInstance` wrapping the object, so implementations cannot
/// override them.
pub trait Component: Send + Sync + 'static {
    /// Names of the instance methods this component answers to.
    fn methods(&self) -> &[&'static str];

    /// Invoke one of [`methods`](Self::methods) with positional JSON arguments.
    ///
    /// `method` is always one of the names returned by `methods()`, already
    /// resolved from the caller's spelling.
    fn call(&self, method: &str, args: &[Value]) -> Result<Value, AdserveError>;

    /// The maintenance facet, for components that hook maintenance tasks.
    fn as_maintenance(&self) -> Option<&dyn MaintenancePlugin> {
        None
    }
}

/// Components that run at a maintenance hook point.
pub trait MaintenancePlugin {
    /// Whether the plugin runs before or after the hooked task.
    fn hook_type(&self) -> HookType;

    /// The task this plugin hooks.
    fn hook_point(&self) -> &HookPoint;
}

/// Resolve a method name case-insensitively against a method list.
///
/// Returns the canonical spelling from `methods`.
pub fn resolve_method<'a>(methods: &[&'a str], name: &str) -> Option<&'a str> {
    methods
        .iter()
        .copied()
        .find(|m| m.eq_ignore_ascii_case(name))
}
