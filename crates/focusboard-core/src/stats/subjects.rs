use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::clock::date_key;
use crate::error::Result;
use crate::storage::{load_json, save_json, KvStore};
use crate::timer::Acceptance;

pub const SUBJECT_DATA_PREFIX: &str = "subjectData_";
pub const SUBJECTS_KEY: &str = "subjects";

pub fn subject_data_key(date: NaiveDate) -> String {
    format!("{SUBJECT_DATA_PREFIX}{}", date_key(date))
}

/// Totals for one subject on one day. Stored as `{ "sessions", "seconds" }`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectRecord {
    #[serde(rename = "sessions", default)]
    pub session_count: u64,
    #[serde(rename = "seconds", default)]
    pub focus_seconds_total: u64,
}

/// One day's subject map as stored. Entries stay raw JSON so that a bad
/// entry decodes to zero on its own and is written back untouched.
type SubjectDay = BTreeMap<String, serde_json::Value>;

fn decode_record(name: &str, raw: &serde_json::Value) -> SubjectRecord {
    SubjectRecord::deserialize(raw).unwrap_or_else(|e| {
        tracing::warn!(subject = name, error = %e, "malformed subject record, reading as zero");
        SubjectRecord::default()
    })
}

/// Per-(day, subject) aggregates plus the ordered subject catalog.
pub struct SubjectStore<'a, S: ?Sized> {
    store: &'a S,
}

impl<'a, S: KvStore + ?Sized> SubjectStore<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    // ── Catalog ──────────────────────────────────────────────────────

    pub fn subjects(&self) -> Result<Vec<String>> {
        load_json(self.store, SUBJECTS_KEY)
    }

    pub fn contains(&self, name: &str) -> Result<bool> {
        Ok(self.subjects()?.iter().any(|s| s == name))
    }

    /// Append `name` (trimmed). Empty names and duplicates are refused.
    pub fn add_subject(&self, name: &str) -> Result<Acceptance> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(Acceptance::Rejected);
        }
        let mut subjects = self.subjects()?;
        if subjects.iter().any(|s| s == name) {
            return Ok(Acceptance::Rejected);
        }
        subjects.push(name.to_string());
        save_json(self.store, SUBJECTS_KEY, &subjects)?;
        tracing::info!(subject = name, "subject added");
        Ok(Acceptance::Accepted)
    }

    /// Drop `name` from the catalog and delete its record for `today`.
    ///
    /// Records on other days are left in place.
    pub fn remove_subject(&self, today: NaiveDate, name: &str) -> Result<Acceptance> {
        let mut subjects = self.subjects()?;
        let before = subjects.len();
        subjects.retain(|s| s != name);
        let in_catalog = subjects.len() != before;
        if in_catalog {
            save_json(self.store, SUBJECTS_KEY, &subjects)?;
        }

        let key = subject_data_key(today);
        let mut day: SubjectDay = load_json(self.store, &key)?;
        let had_record = day.remove(name).is_some();
        if had_record {
            if day.is_empty() {
                self.store.kv_remove(&key)?;
            } else {
                save_json(self.store, &key, &day)?;
            }
        }

        if in_catalog || had_record {
            tracing::info!(subject = name, %key, "subject removed");
        }
        Ok((in_catalog || had_record).into())
    }

    // ── Aggregates ───────────────────────────────────────────────────

    /// The record for (`date`, `subject`), zero if none exists.
    pub fn get(&self, date: NaiveDate, subject: &str) -> Result<SubjectRecord> {
        Ok(self.all(date)?.get(subject).copied().unwrap_or_default())
    }

    /// Every subject record for `date`, keyed by name.
    pub fn all(&self, date: NaiveDate) -> Result<BTreeMap<String, SubjectRecord>> {
        let day: SubjectDay = load_json(self.store, &subject_data_key(date))?;
        Ok(day
            .iter()
            .map(|(name, raw)| (name.clone(), decode_record(name, raw)))
            .collect())
    }

    /// Add one session of `seconds` to (`date`, `subject`).
    pub fn record_focus_completion(
        &self,
        date: NaiveDate,
        subject: &str,
        seconds: u64,
    ) -> Result<SubjectRecord> {
        let key = subject_data_key(date);
        let mut day: SubjectDay = load_json(self.store, &key)?;
        let mut record = day
            .get(subject)
            .map(|raw| decode_record(subject, raw))
            .unwrap_or_default();
        record.session_count = record.session_count.saturating_add(1);
        record.focus_seconds_total = record.focus_seconds_total.saturating_add(seconds);
        day.insert(subject.to_string(), serde_json::to_value(record)?);
        save_json(self.store, &key, &day)?;
        tracing::debug!(
            %key,
            subject,
            seconds = record.focus_seconds_total,
            "subject record updated"
        );
        Ok(record)
    }
}
