use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::Phase;

/// Every timer state change produces an Event.
/// The CLI prints them; the dashboard logs them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        phase: Phase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        phase: Phase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// New durations applied from a preset or the custom form.
    PresetApplied {
        focus_secs: u64,
        break_secs: u64,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    SubjectSelected {
        subject: Option<String>,
        at: DateTime<Utc>,
    },
    /// A phase reached zero. Focus completions carry the credited seconds.
    PhaseCompleted {
        phase: Phase,
        next_phase: Phase,
        credited_seconds: u64,
        subject: Option<String>,
        message: String,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        phase: Phase,
        running: bool,
        remaining_secs: u64,
        total_secs: u64,
        display: String,
        active_subject: Option<String>,
        at: DateTime<Utc>,
    },
}
