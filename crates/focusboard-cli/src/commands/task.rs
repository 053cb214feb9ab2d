use clap::Subcommand;
use focusboard_core::widgets::TaskList;
use focusboard_core::{Clock, Database, SystemClock};

use super::{list_index, CmdResult};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task
    Add {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// List tasks, numbered from 1
    List {
        #[arg(long)]
        json: bool,
    },
    /// Mark a task done, or undone again
    Toggle { number: usize },
    /// Delete a task
    Delete { number: usize },
}

pub fn run(action: TaskAction) -> CmdResult {
    let db = Database::open()?;
    let tasks = TaskList::new(&db);
    let today = SystemClock.today();

    match action {
        TaskAction::Add { text } => {
            let text = text.join(" ");
            if !tasks.add(&text, today)?.is_accepted() {
                return Err("task text cannot be empty".into());
            }
            println!("Added task #{}", tasks.list()?.len());
        }
        TaskAction::List { json } => {
            let list = tasks.list()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&list)?);
                return Ok(());
            }
            if list.is_empty() {
                println!("No tasks.");
            }
            for (i, task) in list.iter().enumerate() {
                let mark = if task.done { "x" } else { " " };
                println!("{:>3}. [{mark}] {}", i + 1, task.text);
            }
            let counts = tasks.counts(today)?;
            println!(
                "{} pending, {} completed today",
                counts.pending, counts.completed_today
            );
        }
        TaskAction::Toggle { number } => {
            let index = list_index(number)?;
            if !tasks.toggle(index, today)?.is_accepted() {
                return Err(format!("no task #{number}").into());
            }
            let done = tasks.list()?.get(index).is_some_and(|t| t.done);
            println!("Task #{number} {}", if done { "done" } else { "reopened" });
        }
        TaskAction::Delete { number } => {
            if !tasks.delete(list_index(number)?)?.is_accepted() {
                return Err(format!("no task #{number}").into());
            }
            println!("Deleted task #{number}");
        }
    }
    Ok(())
}
