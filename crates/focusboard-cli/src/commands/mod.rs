pub mod breathe;
pub mod config;
pub mod memory;
pub mod quote;
pub mod stats;
pub mod subject;
pub mod task;
pub mod theme;
pub mod timer;

use std::error::Error;
use std::future::Future;
use std::io::Write;

use focusboard_core::storage::NotificationsConfig;
use focusboard_core::{Config, Dashboard, Database, LogNotifier, Notifier};

pub type CmdResult<T = ()> = Result<T, Box<dyn Error>>;

/// Prints phase-completion messages to the terminal, optionally with a bell.
pub struct TerminalNotifier {
    bell: bool,
}

impl Notifier for TerminalNotifier {
    fn notify(&self, message: &str) {
        let bell = if self.bell { "\x07" } else { "" };
        let mut out = std::io::stdout().lock();
        let _ = writeln!(out, "\n{bell}{message}");
        let _ = out.flush();
        tracing::info!(message, "phase complete");
    }
}

/// Open the on-disk dashboard with the configured default durations.
pub fn open_dashboard(config: &Config) -> CmdResult<Dashboard<Database>> {
    let db = Database::open()?;
    let dashboard = Dashboard::open(db, config.timer_config()?);
    Ok(attach_notifier(dashboard, &config.notifications))
}

fn attach_notifier(
    dashboard: Dashboard<Database>,
    cfg: &NotificationsConfig,
) -> Dashboard<Database> {
    if cfg.enabled {
        dashboard.with_notifier(TerminalNotifier { bell: cfg.bell })
    } else {
        dashboard.with_notifier(LogNotifier)
    }
}

/// Run a future to completion on a single-threaded runtime.
pub fn block_on<F: Future>(future: F) -> CmdResult<F::Output> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    Ok(rt.block_on(future))
}

/// 1-based index from the command line to a list position.
pub fn list_index(position: usize) -> CmdResult<usize> {
    position
        .checked_sub(1)
        .ok_or_else(|| "task numbers start at 1".into())
}
