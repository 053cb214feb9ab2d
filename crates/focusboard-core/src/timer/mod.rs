mod config;
mod engine;

pub use config::{
    parse_minutes, Acceptance, TimerConfig, MAX_BREAK_MINUTES, MAX_FOCUS_MINUTES,
};
pub use engine::{format_clock, Completion, Phase, TickHandle, TimerEngine};
