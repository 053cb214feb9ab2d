//! Summary views over the aggregate stores.
//!
//! Everything here is recomputed from storage on every call.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use super::daily::DailyStore;
use super::subjects::{SubjectRecord, SubjectStore};
use crate::error::Result;
use crate::storage::KvStore;
use crate::widgets::tasks::TaskList;

/// One row of the per-subject chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectBar {
    pub name: String,
    pub sessions: u64,
    pub seconds: u64,
    pub minutes: u64,
    /// Share of the busiest subject, 0.0 ..= 100.0.
    pub width_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub date: NaiveDate,
    pub focus_minutes: u64,
    pub focus_seconds: u64,
    pub sessions: u64,
    pub tasks_completed_today: usize,
    pub tasks_pending: usize,
    pub subjects: Vec<SubjectBar>,
}

/// Build the dashboard summary for `date`.
pub fn present<S: KvStore + ?Sized>(store: &S, date: NaiveDate) -> Result<DashboardStats> {
    let daily = DailyStore::new(store).get(date)?;
    let subject_store = SubjectStore::new(store);
    let catalog = subject_store.subjects()?;
    let records = subject_store.all(date)?;
    let tasks = TaskList::new(store).counts(date)?;

    Ok(DashboardStats {
        date,
        focus_minutes: daily.focus_seconds_total / 60,
        focus_seconds: daily.focus_seconds_total,
        sessions: daily.session_count,
        tasks_completed_today: tasks.completed_today,
        tasks_pending: tasks.pending,
        subjects: subject_bars(&catalog, &records),
    })
}

/// Bars for every catalog subject in catalog order, then any recorded
/// subject missing from the catalog, by name.
///
/// Widths are relative to the largest total; all zero when nothing is logged.
pub fn subject_bars(
    catalog: &[String],
    records: &BTreeMap<String, SubjectRecord>,
) -> Vec<SubjectBar> {
    let names = catalog.iter().chain(
        records
            .keys()
            .filter(|name| !catalog.contains(name)),
    );
    let rows: Vec<(&String, SubjectRecord)> = names
        .map(|name| (name, records.get(name).copied().unwrap_or_default()))
        .collect();

    let max = rows
        .iter()
        .map(|(_, r)| r.focus_seconds_total)
        .max()
        .unwrap_or(0);

    rows.into_iter()
        .map(|(name, r)| SubjectBar {
            name: name.clone(),
            sessions: r.session_count,
            seconds: r.focus_seconds_total,
            minutes: r.focus_seconds_total / 60,
            width_pct: if max == 0 {
                0.0
            } else {
                r.focus_seconds_total as f64 / max as f64 * 100.0
            },
        })
        .collect()
}

/// `95` -> `"1h 35m"`, `40` -> `"40m"`.
pub fn format_duration_min(minutes: u64) -> String {
    let (h, m) = (minutes / 60, minutes % 60);
    if h > 0 {
        format!("{h}h {m}m")
    } else {
        format!("{m}m")
    }
}
