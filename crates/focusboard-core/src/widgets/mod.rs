//! The smaller dashboard widgets that sit beside the focus timer.
//!
//! Only the task list feeds the stats presenter; the rest are independent.

pub mod breathing;
pub mod memory;
pub mod quotes;
pub mod tasks;
pub mod theme;

pub use breathing::{BreathPhase, BreathingExercise};
pub use memory::{FlipOutcome, MemoryGame};
pub use quotes::{random_quote, Quote, QUOTES};
pub use tasks::{task_counts, Task, TaskCounts, TaskList, TASKS_KEY};
pub use theme::{load_theme, save_theme, toggle_theme, Theme, THEME_KEY};
