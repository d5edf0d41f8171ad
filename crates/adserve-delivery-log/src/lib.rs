// SPDX-FileCopyrightText: 2026 Adserve Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Delivery logging plugin components.
//!
//! Ships the `deliveryLog/ox_click/ox_click` component, which counts clicks
//! into the click aggregation bucket. Its component file lives under
//! `plugins/` in this crate.

pub mod bucket;
pub mod log_click;

use std::sync::Arc;

use adserve_core::{AdserveError, Component, ComponentDescriptor};
use adserve_plugin::ComponentRegistry;

pub use bucket::{BucketId, BucketKey, BucketStore, MemoryBucketStore};
pub use log_click::{CLICK_BUCKET_TABLE, DeliveryData, LOG_CLICK, LogClick};

/// Extension the components of this crate belong to.
pub const EXTENSION: &str = "deliveryLog";

/// Descriptor of the click logging component.
pub fn log_click_descriptor() -> ComponentDescriptor {
    ComponentDescriptor::new(EXTENSION, "ox_click", None)
}

/// Register this crate's component classes, all sharing `store`.
pub fn register(registry: &mut ComponentRegistry, store: Arc<dyn BucketStore>) {
    registry.register(
        &log_click_descriptor(),
        move |_: &ComponentDescriptor| -> Result<Box<dyn Component>, AdserveError> {
            Ok(Box::new(LogClick::new(Arc::clone(&store))))
        },
    );
}
