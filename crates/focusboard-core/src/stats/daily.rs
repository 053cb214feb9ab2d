use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::clock::date_key;
use crate::error::Result;
use crate::storage::{load_json, save_json, KvStore};

pub const DAILY_PREFIX: &str = "daily_";

pub fn daily_key(date: NaiveDate) -> String {
    format!("{DAILY_PREFIX}{}", date_key(date))
}

/// Totals for one calendar day. Stored as `{ "sessions", "focusSeconds" }`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRecord {
    #[serde(rename = "sessions", default)]
    pub session_count: u64,
    #[serde(rename = "focusSeconds", default)]
    pub focus_seconds_total: u64,
}

impl DailyRecord {
    fn credit(&mut self, seconds: u64) {
        self.session_count = self.session_count.saturating_add(1);
        self.focus_seconds_total = self.focus_seconds_total.saturating_add(seconds);
    }
}

/// Per-day aggregate view over a [`KvStore`].
pub struct DailyStore<'a, S: ?Sized> {
    store: &'a S,
}

impl<'a, S: KvStore + ?Sized> DailyStore<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// The record for `date`, zero if none exists.
    pub fn get(&self, date: NaiveDate) -> Result<DailyRecord> {
        load_json(self.store, &daily_key(date))
    }

    /// Add one session of `seconds` to `date` and return the new totals.
    pub fn record_focus_completion(&self, date: NaiveDate, seconds: u64) -> Result<DailyRecord> {
        let key = daily_key(date);
        let mut record: DailyRecord = load_json(self.store, &key)?;
        record.credit(seconds);
        save_json(self.store, &key, &record)?;
        tracing::debug!(
            %key,
            sessions = record.session_count,
            focus_seconds = record.focus_seconds_total,
            "daily record updated"
        );
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    #[test]
    fn missing_day_reads_as_zero() {
        let store = MemoryStore::new();
        let daily = DailyStore::new(&store);
        assert_eq!(daily.get(day(1)).unwrap(), DailyRecord::default());
        assert!(store.is_empty());
    }

    #[test]
    fn completions_accumulate_per_day() {
        let store = MemoryStore::new();
        let daily = DailyStore::new(&store);
        daily.record_focus_completion(day(1), 1500).unwrap();
        daily.record_focus_completion(day(1), 600).unwrap();
        daily.record_focus_completion(day(2), 300).unwrap();

        let first = daily.get(day(1)).unwrap();
        assert_eq!(first.session_count, 2);
        assert_eq!(first.focus_seconds_total, 2100);
        assert_eq!(daily.get(day(2)).unwrap().session_count, 1);
    }

    #[test]
    fn stored_shape_uses_browser_field_names() {
        let store = MemoryStore::new();
        DailyStore::new(&store)
            .record_focus_completion(day(3), 1500)
            .unwrap();
        let raw = store.kv_get("daily_2024-05-03").unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value, serde_json::json!({ "sessions": 1, "focusSeconds": 1500 }));
    }

    #[test]
    fn malformed_record_restarts_from_zero() {
        let store = MemoryStore::new();
        store.kv_set("daily_2024-05-04", "\"oops\"").unwrap();
        let daily = DailyStore::new(&store);
        assert_eq!(daily.get(day(4)).unwrap(), DailyRecord::default());
        let updated = daily.record_focus_completion(day(4), 60).unwrap();
        assert_eq!(updated.session_count, 1);
    }
}
