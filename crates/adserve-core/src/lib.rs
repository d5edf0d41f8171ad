// SPDX-FileCopyrightText: 2026 Adserve Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Adserve plugin system.
//!
//! This crate provides the component identity types, the error type, and the
//! capability traits shared by the loader, the dispatch helpers, and every
//! plugin crate in the workspace.

pub mod error;
pub mod ordered;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::AdserveError;
pub use ordered::ComponentMap;
pub use traits::{Component, ErrorReporter, MaintenancePlugin, TracingReporter};
pub use types::{ComponentDescriptor, ComponentIndex, HookPoint, HookType, ScanDepth};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adserve_error_has_all_variants() {
        let _not_found = AdserveError::ComponentNotFound {
            path: "x".into(),
        };
        let _disabled = AdserveError::ComponentDisabled {
            identifier: "a:b:c".into(),
        };
        let _malformed = AdserveError::MalformedIdentifier("a".into());
        let _class = AdserveError::ClassNotFound {
            class: "Plugins_A_B_C".into(),
            path: "x".into(),
        };
        let _method = AdserveError::MethodNotFound {
            class: "Plugins_A_B_C".into(),
            method: "run".into(),
        };
        let _manifest = AdserveError::Manifest {
            path: "x".into(),
            message: "bad".into(),
        };
        let _construction = AdserveError::Construction {
            class: "Plugins_A_B_C".into(),
            message: "bad".into(),
        };
        let _invocation = AdserveError::invocation("run", "bad");
        let _cycle = AdserveError::DependencyCycle { members: vec![] };
        let _io = AdserveError::Io {
            path: "x".into(),
            source: std::io::Error::other("test"),
        };
        let _internal = AdserveError::Internal("test".into());
    }

    #[test]
    fn descriptor_serialization() {
        let d = ComponentDescriptor::new("deliveryLog", "ox_click", None);
        let json = serde_json::to_string(&d).expect("should serialize");
        let parsed: ComponentDescriptor = serde_json::from_str(&json).expect("should deserialize");
        assert_eq!(d, parsed);
    }

    #[test]
    fn all_traits_are_exported() {
        fn _assert_component<T: Component>() {}
        fn _assert_maintenance<T: MaintenancePlugin>() {}
        fn _assert_reporter<T: ErrorReporter>() {}
        _assert_reporter::<TracingReporter>();
    }
}
