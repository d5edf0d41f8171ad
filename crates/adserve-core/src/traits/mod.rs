// SPDX-FileCopyrightText: 2026 Adserve Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capability traits for the Adserve plugin architecture.

pub mod component;
pub mod reporter;

pub use component::{Component, MaintenancePlugin, resolve_method};
pub use reporter::{ErrorReporter, TracingReporter};
