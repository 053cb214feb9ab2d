//! Task list persisted under the `tasks` key.
//!
//! Tasks are addressed by position, so indices shift after a delete.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::storage::{load_json, save_json, KvStore};
use crate::timer::Acceptance;

pub const TASKS_KEY: &str = "tasks";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub text: String,
    #[serde(default)]
    pub done: bool,
    pub created_at: NaiveDate,
    #[serde(default)]
    pub completed_at: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskCounts {
    pub completed_today: usize,
    pub pending: usize,
}

/// Count tasks finished on `today` and tasks still open.
pub fn task_counts(tasks: &[Task], today: NaiveDate) -> TaskCounts {
    TaskCounts {
        completed_today: tasks
            .iter()
            .filter(|t| t.done && t.completed_at == Some(today))
            .count(),
        pending: tasks.iter().filter(|t| !t.done).count(),
    }
}

pub struct TaskList<'a, S: ?Sized> {
    store: &'a S,
}

impl<'a, S: KvStore + ?Sized> TaskList<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Tasks in stored order. Entries that fail to decode are skipped here
    /// but stay in storage untouched.
    pub fn list(&self) -> Result<Vec<Task>> {
        Ok(decoded(&self.load_raw()?).into_iter().map(|(_, t)| t).collect())
    }

    /// Append a task. Blank text is refused.
    pub fn add(&self, text: &str, today: NaiveDate) -> Result<Acceptance> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Acceptance::Rejected);
        }
        let mut raw = self.load_raw()?;
        raw.push(serde_json::to_value(Task {
            text: text.to_string(),
            done: false,
            created_at: today,
            completed_at: None,
        })?);
        save_json(self.store, TASKS_KEY, &raw)?;
        Ok(Acceptance::Accepted)
    }

    /// Flip the done flag; `completed_at` follows it.
    pub fn toggle(&self, index: usize, today: NaiveDate) -> Result<Acceptance> {
        let mut raw = self.load_raw()?;
        let Some((slot, mut task)) = decoded(&raw).into_iter().nth(index) else {
            return Ok(Acceptance::Rejected);
        };
        task.done = !task.done;
        task.completed_at = task.done.then_some(today);
        raw[slot] = serde_json::to_value(task)?;
        save_json(self.store, TASKS_KEY, &raw)?;
        Ok(Acceptance::Accepted)
    }

    pub fn delete(&self, index: usize) -> Result<Acceptance> {
        let mut raw = self.load_raw()?;
        let Some((slot, _)) = decoded(&raw).into_iter().nth(index) else {
            return Ok(Acceptance::Rejected);
        };
        raw.remove(slot);
        save_json(self.store, TASKS_KEY, &raw)?;
        Ok(Acceptance::Accepted)
    }

    pub fn counts(&self, today: NaiveDate) -> Result<TaskCounts> {
        Ok(task_counts(&self.list()?, today))
    }

    fn load_raw(&self) -> Result<Vec<serde_json::Value>> {
        load_json(self.store, TASKS_KEY)
    }
}

/// Decodable tasks, each paired with its slot in the stored array.
fn decoded(raw: &[serde_json::Value]) -> Vec<(usize, Task)> {
    raw.iter()
        .enumerate()
        .filter_map(|(slot, value)| match Task::deserialize(value) {
            Ok(task) => Some((slot, task)),
            Err(e) => {
                tracing::warn!(slot, error = %e, "skipping malformed task");
                None
            }
        })
        .collect()
}
