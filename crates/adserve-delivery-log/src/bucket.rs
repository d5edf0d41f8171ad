// SPDX-FileCopyrightText: 2026 Adserve Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Aggregation bucket store.
//!
//! Delivery logging components record events by upserting into an
//! aggregation table keyed by interval, creative, and zone. The store behind
//! that upsert is a collaborator; [`MemoryBucketStore`] keeps counts in memory.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Mutex, PoisonError};

use adserve_core::AdserveError;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// A creative or zone id as it appeared in the delivery record.
///
/// Request-derived records carry ids as JSON numbers or as numeric strings;
/// both are kept as given.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BucketId {
    Int(i64),
    Text(String),
}

impl From<i64> for BucketId {
    fn from(id: i64) -> Self {
        BucketId::Int(id)
    }
}

impl From<&str> for BucketId {
    fn from(id: &str) -> Self {
        BucketId::Text(id.to_string())
    }
}

impl fmt::Display for BucketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BucketId::Int(id) => write!(f, "{id}"),
            BucketId::Text(id) => f.write_str(id),
        }
    }
}

/// Key of one aggregation bucket row.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BucketKey {
    /// Start of the aggregation interval, `YYYY-MM-DD HH:MM:SS`.
    pub interval_start: String,
    pub creative_id: BucketId,
    pub zone_id: BucketId,
}

/// Upsert target for aggregation buckets.
pub trait BucketStore: Send + Sync {
    /// Increment the bucket row for `key` in `table`, creating it if absent.
    ///
    /// Returns whether the update was recorded.
    fn update_table(&self, table: &str, key: &BucketKey) -> Result<bool, AdserveError>;
}

/// In-memory bucket store counting updates per `(table, key)`.
#[derive(Debug, Default)]
pub struct MemoryBucketStore {
    counts: Mutex<BTreeMap<(String, BucketKey), u64>>,
    updates: Mutex<Vec<(String, BucketKey)>>,
}

impl MemoryBucketStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current count for a bucket row, 0 if it was never updated.
    pub fn count(&self, table: &str, key: &BucketKey) -> u64 {
        self.counts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&(table.to_string(), key.clone()))
            .copied()
            .unwrap_or(0)
    }

    /// Every update received, in order.
    pub fn updates(&self) -> Vec<(String, BucketKey)> {
        self.updates
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl BucketStore for MemoryBucketStore {
    fn update_table(&self, table: &str, key: &BucketKey) -> Result<bool, AdserveError> {
        let mut counts = self.counts.lock().unwrap_or_else(PoisonError::into_inner);
        let count = counts.entry((table.to_string(), key.clone())).or_insert(0);
        *count += 1;
        trace!(table, ?key, count = *count, "bucket updated");

        self.updates
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((table.to_string(), key.clone()));
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(zone_id: i64) -> BucketKey {
        BucketKey {
            interval_start: "2008-01-01 00:00:00".to_string(),
            creative_id: 42.into(),
            zone_id: zone_id.into(),
        }
    }

    #[test]
    fn repeated_updates_increment_one_row() {
        let store = MemoryBucketStore::new();
        assert!(store.update_table("data_bucket_click", &key(7)).unwrap());
        assert!(store.update_table("data_bucket_click", &key(7)).unwrap());
        store.update_table("data_bucket_click", &key(8)).unwrap();

        assert_eq!(store.count("data_bucket_click", &key(7)), 2);
        assert_eq!(store.count("data_bucket_click", &key(8)), 1);
        assert_eq!(store.count("data_bucket_impression", &key(7)), 0);
        assert_eq!(store.updates().len(), 3);
    }

    #[test]
    fn numeric_and_string_ids_are_distinct_rows() {
        let store = MemoryBucketStore::new();
        let text = BucketKey {
            zone_id: "7".into(),
            ..key(7)
        };
        store.update_table("data_bucket_click", &key(7)).unwrap();
        store.update_table("data_bucket_click", &text).unwrap();

        assert_eq!(store.count("data_bucket_click", &key(7)), 1);
        assert_eq!(store.count("data_bucket_click", &text), 1);
        assert_eq!(text.zone_id.to_string(), "7");
    }
}
