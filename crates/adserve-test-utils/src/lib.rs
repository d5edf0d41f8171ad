// SPDX-FileCopyrightText: 2026 Adserve Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Adserve integration tests.
//!
//! Provides plugin tree fixtures, mock components, and a collecting error
//! reporter for fast, deterministic tests of the component loader.
//!
//! # Components
//!
//! - [`PluginTree`] - Temp-dir plugin tree plus matching config
//! - [`MockComponent`] / [`MockFactory`] - Components with canned results and call logs
//! - [`CollectingReporter`] - Error reporter capturing hard failures

pub mod fixture;
pub mod mock_component;
pub mod reporter;

pub use fixture::{PluginTree, PluginTreeBuilder};
pub use mock_component::{CallLog, MockComponent, MockFactory};
pub use reporter::CollectingReporter;
