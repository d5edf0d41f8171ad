// SPDX-FileCopyrightText: 2026 Adserve Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `deliveryLog:ox_click:ox_click` component.

use std::sync::Arc;

use adserve_core::{AdserveError, Component};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::bucket::{BucketId, BucketKey, BucketStore};

/// Aggregation table clicks are counted in.
pub const CLICK_BUCKET_TABLE: &str = "data_bucket_click";

/// Method name of the click logging entry point.
pub const LOG_CLICK: &str = "logClick";

/// The delivery data record handed to logging components.
///
/// Only the fields clicks are bucketed by are read; the rest of the record
/// is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct DeliveryData {
    pub interval_start: String,
    pub creative_id: BucketId,
    pub zone_id: BucketId,
}

impl From<DeliveryData> for BucketKey {
    fn from(data: DeliveryData) -> Self {
        BucketKey {
            interval_start: data.interval_start,
            creative_id: data.creative_id,
            zone_id: data.zone_id,
        }
    }
}

/// Logs clicks by upserting into [`CLICK_BUCKET_TABLE`].
pub struct LogClick {
    store: Arc<dyn BucketStore>,
}

impl LogClick {
    pub fn new(store: Arc<dyn BucketStore>) -> Self {
        Self { store }
    }

    /// Record one click for the record's interval, creative, and zone.
    pub fn log_click(&self, data: DeliveryData) -> Result<bool, AdserveError> {
        let key = BucketKey::from(data);
        debug!(?key, "logging click");
        self.store.update_table(CLICK_BUCKET_TABLE, &key)
    }
}

impl Component for LogClick {
    fn methods(&self) -> &[&'static str] {
        &[LOG_CLICK]
    }

    fn call(&self, method: &str, args: &[Value]) -> Result<Value, AdserveError> {
        if method != LOG_CLICK {
            return Err(AdserveError::invocation(method, "unknown method"));
        }
        let record = args
            .first()
            .ok_or_else(|| AdserveError::invocation(method, "missing delivery data argument"))?;
        let data = DeliveryData::deserialize(record)
            .map_err(|e| AdserveError::invocation(method, format!("invalid delivery data: {e}")))?;

        self.log_click(data).map(Value::Bool)
    }
}
