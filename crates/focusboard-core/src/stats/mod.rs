//! Session aggregates and the stats presenter.
//!
//! Two derived views over the key-value store, both written only when a focus
//! phase completes:
//! - `daily_<date>`: sessions and focused seconds per calendar day
//! - `subjectData_<date>`: the same per subject, for the selected subject only
//!
//! The two are never reconciled; their totals diverge whenever a session
//! completes with no subject selected.

mod daily;
mod presenter;
mod subjects;

pub use daily::{daily_key, DailyRecord, DailyStore, DAILY_PREFIX};
pub use presenter::{format_duration_min, present, subject_bars, DashboardStats, SubjectBar};
pub use subjects::{
    subject_data_key, SubjectRecord, SubjectStore, SUBJECTS_KEY, SUBJECT_DATA_PREFIX,
};
