// SPDX-FileCopyrightText: 2026 Adserve Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error reporter that keeps reported failures for assertions.

use std::sync::{Mutex, PoisonError};

use adserve_core::{AdserveError, ErrorReporter};

/// Collects the display text of every reported error.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    reports: Mutex<Vec<String>>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reported messages in order.
    pub fn messages(&self) -> Vec<String> {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.reports.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ErrorReporter for CollectingReporter {
    fn report(&self, error: &AdserveError) {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(error.to_string());
    }
}
