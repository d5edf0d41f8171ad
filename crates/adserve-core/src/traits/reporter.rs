// SPDX-FileCopyrightText: 2026 Adserve Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error reporting collaborator for hard component failures.

use crate::error::AdserveError;

/// Receives human-readable descriptions of hard failures.
///
/// Reporting is fire-and-forget: the failing operation still returns its
/// error to the caller whether or not anything listens here.
pub trait ErrorReporter: Send + Sync {
    fn report(&self, error: &AdserveError);
}

/// Reporter that logs every hard failure at `error` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn report(&self, error: &AdserveError) {
        tracing::error!(error = %error, "component failure");
    }
}
