//! Timer engine implementation.
//!
//! The timer engine is a tick-driven state machine. It does not use internal
//! threads: the caller fires `tick()` once per second for as long as the
//! engine holds an armed [`TickHandle`].
//!
//! ## State Transitions
//!
//! ```text
//! Idle-Focus <-> Running-Focus --(0)--> Idle-Break <-> Running-Break --(0)--> Idle-Focus
//! ```
//!
//! Completion happens on the tick that brings the countdown to zero. The
//! engine never writes storage itself; `tick()` hands back a [`Completion`]
//! that the dashboard credits to the aggregate stores.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new(TimerConfig::default());
//! engine.start();
//! // Once per second, while engine.is_running():
//! if let Some(done) = engine.tick() { /* credit `done` */ }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::config::{parse_minutes, Acceptance, TimerConfig};
use crate::events::Event;

pub const FOCUS_COMPLETE_MESSAGE: &str = "Focus session complete! Take a break.";
pub const BREAK_COMPLETE_MESSAGE: &str = "Break over! Ready for another session?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Focus,
    Break,
}

impl Phase {
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Focus => "Focus Time",
            Phase::Break => "Break Time",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Focus => "focus",
            Phase::Break => "break",
        }
    }
}

/// The armed once-per-second tick source.
///
/// Held as `Option<TickHandle>` inside the engine: arming replaces `None` and
/// every exit path takes it, so at most one exists at a time.
#[derive(Debug, Clone)]
pub struct TickHandle {
    armed_at: DateTime<Utc>,
    fired: u64,
}

impl TickHandle {
    fn arm() -> Self {
        Self {
            armed_at: Utc::now(),
            fired: 0,
        }
    }

    pub fn armed_at(&self) -> DateTime<Utc> {
        self.armed_at
    }

    /// Ticks delivered since this handle was armed.
    pub fn fired(&self) -> u64 {
        self.fired
    }
}

/// A finished phase, returned by [`TimerEngine::tick`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub phase: Phase,
    pub next_phase: Phase,
    /// Focus seconds to credit; zero for a completed break.
    pub credited_secs: u64,
    /// Subject selected at the moment of completion (focus only).
    pub subject: Option<String>,
}

impl Completion {
    pub fn message(&self) -> &'static str {
        match self.phase {
            Phase::Focus => FOCUS_COMPLETE_MESSAGE,
            Phase::Break => BREAK_COMPLETE_MESSAGE,
        }
    }
}

/// Core timer engine.
#[derive(Debug, Clone)]
pub struct TimerEngine {
    config: TimerConfig,
    phase: Phase,
    remaining_secs: u64,
    active_subject: Option<String>,
    ticker: Option<TickHandle>,
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new(TimerConfig::default())
    }
}

impl TimerEngine {
    /// Create an idle engine at the start of a focus phase.
    pub fn new(config: TimerConfig) -> Self {
        Self {
            config,
            phase: Phase::Focus,
            remaining_secs: config.focus_secs(),
            active_subject: None,
            ticker: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn config(&self) -> TimerConfig {
        self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.ticker.is_some()
    }

    pub fn tick_handle(&self) -> Option<&TickHandle> {
        self.ticker.as_ref()
    }

    pub fn active_subject(&self) -> Option<&str> {
        self.active_subject.as_deref()
    }

    /// Full duration of the current phase.
    pub fn total_secs(&self) -> u64 {
        match self.phase {
            Phase::Focus => self.config.focus_secs(),
            Phase::Break => self.config.break_secs(),
        }
    }

    /// 0.0 .. 1.0 progress within the current phase.
    pub fn progress(&self) -> f64 {
        let total = self.total_secs();
        if total == 0 {
            return 0.0;
        }
        (1.0 - self.remaining_secs as f64 / total as f64).clamp(0.0, 1.0)
    }

    /// Countdown as `MM:SS`.
    pub fn display(&self) -> String {
        format_clock(self.remaining_secs)
    }

    pub fn phase_label(&self) -> &'static str {
        self.phase.label()
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            phase: self.phase,
            running: self.is_running(),
            remaining_secs: self.remaining_secs,
            total_secs: self.total_secs(),
            display: self.display(),
            active_subject: self.active_subject.clone(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Switch to a preset's durations. Refused while running.
    pub fn select_preset(&mut self, focus_min: u32, break_min: u32) -> Acceptance {
        match TimerConfig::from_minutes(focus_min.into(), break_min.into()) {
            Ok(config) => self.apply_config(config),
            Err(e) => {
                tracing::debug!(error = %e, "preset rejected");
                Acceptance::Rejected
            }
        }
    }

    /// Apply user-entered durations: below 1 is refused, above the maximum is
    /// clamped. Refused while running.
    pub fn apply_custom(&mut self, focus_min: i64, break_min: i64) -> Acceptance {
        match TimerConfig::clamped(focus_min, break_min) {
            Some(config) => self.apply_config(config),
            None => Acceptance::Rejected,
        }
    }

    /// [`Self::apply_custom`] for raw form text; unparsable input is refused.
    pub fn apply_custom_input(&mut self, focus: &str, brk: &str) -> Acceptance {
        match (parse_minutes(focus), parse_minutes(brk)) {
            (Some(f), Some(b)) => self.apply_custom(f, b),
            _ => Acceptance::Rejected,
        }
    }

    fn apply_config(&mut self, config: TimerConfig) -> Acceptance {
        if self.is_running() {
            return Acceptance::Rejected;
        }
        self.config = config;
        self.phase = Phase::Focus;
        self.remaining_secs = config.focus_secs();
        Acceptance::Accepted
    }

    pub fn start(&mut self) -> Option<Event> {
        if self.is_running() {
            return None;
        }
        self.ticker = Some(TickHandle::arm());
        Some(Event::TimerStarted {
            phase: self.phase,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        self.ticker.take()?;
        Some(Event::TimerPaused {
            phase: self.phase,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    pub fn reset(&mut self) -> Option<Event> {
        self.ticker = None;
        self.phase = Phase::Focus;
        self.remaining_secs = self.config.focus_secs();
        Some(Event::TimerReset {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Set or clear the subject credited by the next focus completion.
    pub fn select_subject(&mut self, subject: Option<String>) -> Option<Event> {
        self.active_subject = subject;
        Some(Event::SubjectSelected {
            subject: self.active_subject.clone(),
            at: Utc::now(),
        })
    }

    /// Fire one tick. Does nothing unless running.
    ///
    /// Returns the [`Completion`] when this tick finishes the phase; the tick
    /// handle is cancelled before returning.
    pub fn tick(&mut self) -> Option<Completion> {
        let ticker = self.ticker.as_mut()?;
        ticker.fired += 1;
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            return None;
        }
        self.ticker = None;
        Some(self.complete_phase())
    }

    fn complete_phase(&mut self) -> Completion {
        let finished = self.phase;
        let (next_phase, credited_secs, subject) = match finished {
            Phase::Focus => (
                Phase::Break,
                self.config.focus_secs(),
                self.active_subject.clone(),
            ),
            Phase::Break => (Phase::Focus, 0, None),
        };
        self.phase = next_phase;
        self.remaining_secs = self.total_secs();
        Completion {
            phase: finished,
            next_phase,
            credited_secs,
            subject,
        }
    }
}

/// Format seconds as `MM:SS`.
pub fn format_clock(total_secs: u64) -> String {
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}
