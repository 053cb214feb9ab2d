use clap::Subcommand;
use focusboard_core::stats::SubjectStore;
use focusboard_core::{Clock, Database, SystemClock};

use super::CmdResult;

#[derive(Subcommand)]
pub enum SubjectAction {
    /// List the subject catalog with today's totals
    List {
        #[arg(long)]
        json: bool,
    },
    /// Add a subject to the catalog
    Add { name: String },
    /// Remove a subject and today's record for it
    Remove { name: String },
}

pub fn run(action: SubjectAction) -> CmdResult {
    let db = Database::open()?;
    let subjects = SubjectStore::new(&db);
    let today = SystemClock.today();

    match action {
        SubjectAction::List { json } => {
            let catalog = subjects.subjects()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&catalog)?);
            } else if catalog.is_empty() {
                println!("No subjects yet. Add one with `focusboard subject add <name>`.");
            } else {
                for name in &catalog {
                    let record = subjects.get(today, name)?;
                    println!(
                        "{name}  {} min today ({} sessions)",
                        record.focus_seconds_total / 60,
                        record.session_count
                    );
                }
            }
        }
        SubjectAction::Add { name } => {
            if subjects.add_subject(&name)?.is_accepted() {
                println!("Added subject: {}", name.trim());
            } else {
                return Err(format!("subject '{}' is blank or already exists", name.trim()).into());
            }
        }
        SubjectAction::Remove { name } => {
            if subjects.remove_subject(today, &name)?.is_accepted() {
                println!("Removed subject: {name}");
            } else {
                return Err(format!("no subject named '{name}'").into());
            }
        }
    }
    Ok(())
}
