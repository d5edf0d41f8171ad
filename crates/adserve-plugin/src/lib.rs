// SPDX-FileCopyrightText: 2026 Adserve Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Component registry, loader, and batch dispatch.
//!
//! Components live in a plugin tree as `<extension>/<group>/<component>`
//! files. The loader finds a component file, resolves its class in the
//! [`ComponentRegistry`], constructs it, and stamps the result with its
//! identity and enablement as a [`ComponentInstance`].

pub mod dependencies;
pub mod dispatch;
pub mod enablement;
pub mod instance;
pub mod loader;
pub mod manifest;
pub mod naming;
pub mod registry;
pub mod scanner;

pub use dependencies::sort_by_dependencies;
pub use instance::ComponentInstance;
pub use loader::ComponentLoader;
pub use manifest::{ComponentManifest, parse_component_manifest};
pub use naming::{component_class_name, fallback_class_name};
pub use registry::{ComponentFactory, ComponentRegistry, FallbackFactory};
pub use scanner::{ComponentFile, scan_component_files};
