//! Box-style breathing cycle: inhale, hold, exhale, four seconds each.

use std::time::Duration;

pub const PHASE_DURATION: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreathPhase {
    Inhale,
    Hold,
    Exhale,
}

impl BreathPhase {
    pub fn label(self) -> &'static str {
        match self {
            BreathPhase::Inhale => "Breathe In",
            BreathPhase::Hold => "Hold",
            BreathPhase::Exhale => "Breathe Out",
        }
    }

    pub fn next(self) -> Self {
        match self {
            BreathPhase::Inhale => BreathPhase::Hold,
            BreathPhase::Hold => BreathPhase::Exhale,
            BreathPhase::Exhale => BreathPhase::Inhale,
        }
    }
}

/// Start/stop toggle around the phase cycle. The caller advances it every
/// [`PHASE_DURATION`].
#[derive(Debug, Default)]
pub struct BreathingExercise {
    current: Option<BreathPhase>,
}

impl BreathingExercise {
    pub const IDLE_LABEL: &'static str = "Start";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Option<BreathPhase> {
        self.current
    }

    /// Begin at Inhale. Restarting while running starts over.
    pub fn start(&mut self) -> BreathPhase {
        self.current = Some(BreathPhase::Inhale);
        BreathPhase::Inhale
    }

    /// Move to the next phase; `None` when stopped.
    pub fn advance(&mut self) -> Option<BreathPhase> {
        let next = self.current?.next();
        self.current = Some(next);
        Some(next)
    }

    pub fn stop(&mut self) {
        self.current = None;
    }

    pub fn label(&self) -> &'static str {
        self.current.map_or(Self::IDLE_LABEL, BreathPhase::label)
    }
}
