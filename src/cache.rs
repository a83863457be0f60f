use std::time::Duration;

use chrono::Utc;
use log::{debug, warn};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::error::ReportResult;
use crate::store::property_repo;

/// One cached value with its lifetime bookkeeping, stored JSON-encoded in
/// the property store.
#[derive(Debug, Serialize, Deserialize)]
struct CacheRecord {
    value: serde_json::Value,
    /// Absolute expiry, epoch milliseconds.
    expires: i64,
    /// Creation time, epoch milliseconds.
    created: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub total_entries: usize,
    pub valid_entries: usize,
    pub expired_entries: usize,
}

/// TTL cache over the flat key/value property store. Expired entries are
/// purged opportunistically on read; nothing sweeps the store in the
/// background.
pub struct TtlCache<'a> {
    conn: &'a Connection,
}

impl<'a> TtlCache<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// The cached value under `key`, or None when missing, expired, or
    /// unreadable. Expired and corrupt entries are removed.
    pub fn get(&self, key: &str) -> ReportResult<Option<serde_json::Value>> {
        let Some(raw) = property_repo::get(self.conn, key)? else {
            return Ok(None);
        };

        let record: CacheRecord = match serde_json::from_str(&raw) {
            Ok(r) => r,
            Err(e) => {
                warn!("dropping unreadable cache entry '{}': {}", key, e);
                property_repo::delete(self.conn, key)?;
                return Ok(None);
            }
        };

        if Utc::now().timestamp_millis() > record.expires {
            debug!("cache entry '{}' expired", key);
            property_repo::delete(self.conn, key)?;
            return Ok(None);
        }

        Ok(Some(record.value))
    }

    pub fn set(&self, key: &str, value: serde_json::Value, ttl: Duration) -> ReportResult<()> {
        let now = Utc::now().timestamp_millis();
        let record = CacheRecord {
            value,
            expires: now + ttl.as_millis() as i64,
            created: now,
        };
        property_repo::set(self.conn, key, &serde_json::to_string(&record)?)
    }

    pub fn delete(&self, key: &str) -> ReportResult<()> {
        property_repo::delete(self.conn, key)
    }

    pub fn clear(&self) -> ReportResult<()> {
        property_repo::delete_all(self.conn)
    }

    /// Counts entries without purging them. Unreadable entries count as
    /// expired.
    pub fn stats(&self) -> ReportResult<CacheStats> {
        let now = Utc::now().timestamp_millis();
        let mut stats = CacheStats::default();

        for (_, raw) in property_repo::all(self.conn)? {
            stats.total_entries += 1;
            match serde_json::from_str::<CacheRecord>(&raw) {
                Ok(record) if now <= record.expires => stats.valid_entries += 1,
                _ => stats.expired_entries += 1,
            }
        }

        Ok(stats)
    }
}
