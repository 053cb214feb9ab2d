//! # Focusboard Core Library
//!
//! This library provides the core business logic for Focusboard, a personal
//! study dashboard built around a Pomodoro-style focus timer. The CLI binary is
//! a thin layer over the same core library.
//!
//! ## Architecture
//!
//! - **Timer Engine**: A tick-driven state machine; the caller invokes `tick()`
//!   once per second while the timer holds an armed tick handle
//! - **Storage**: A string-keyed JSON key-value store (SQLite or in-memory) and
//!   TOML-based configuration
//! - **Stats**: Per-day and per-(day, subject) aggregates written on every
//!   completed focus phase, plus a presenter that summarizes them
//! - **Widgets**: Task list, theme, quotes, breathing cycle, memory game
//!
//! ## Key Components
//!
//! - [`Dashboard`]: Facade wiring the timer to the aggregate stores
//! - [`TimerEngine`]: Core timer state machine
//! - [`Database`]: SQLite-backed [`KvStore`]
//! - [`Config`]: Application configuration management

pub mod clock;
pub mod dashboard;
pub mod error;
pub mod events;
pub mod stats;
pub mod storage;
pub mod timer;
pub mod widgets;

pub use clock::{Clock, FixedClock, SystemClock};
pub use dashboard::{Dashboard, LogNotifier, Notifier};
pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use events::Event;
pub use stats::{DailyRecord, DashboardStats, SubjectBar, SubjectRecord};
pub use storage::{Config, Database, KvStore, MemoryStore};
pub use timer::{Acceptance, Completion, Phase, TimerConfig, TimerEngine};
pub use widgets::{Task, Theme};
