use std::io::Write;
use std::time::Duration;

use clap::Subcommand;
use focusboard_core::stats::format_duration_min;
use focusboard_core::{Config, Dashboard, Database, Event, LogNotifier, Phase};
use tokio::time::MissedTickBehavior;

use super::{block_on, open_dashboard, CmdResult};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run the countdown in the foreground
    Run {
        /// Preset label (see `timer presets`)
        #[arg(long, conflicts_with_all = ["focus", "break_minutes"])]
        preset: Option<String>,
        /// Custom focus minutes (1-120)
        #[arg(long)]
        focus: Option<String>,
        /// Custom break minutes (1-60)
        #[arg(long = "break")]
        break_minutes: Option<String>,
        /// Subject credited when a focus phase completes
        #[arg(long)]
        subject: Option<String>,
        /// Focus + break cycles to run before exiting
        #[arg(long, default_value = "1")]
        cycles: u32,
        /// Tick interval in milliseconds
        #[arg(long, default_value = "1000", hide = true)]
        tick_ms: u64,
        /// Print events as JSON lines instead of a live countdown
        #[arg(long)]
        json: bool,
    },
    /// List configured presets
    Presets,
    /// Print configured durations and today's progress
    Status,
}

pub fn run(action: TimerAction) -> CmdResult {
    let config = Config::load()?;

    match action {
        TimerAction::Run {
            preset,
            focus,
            break_minutes,
            subject,
            cycles,
            tick_ms,
            json,
        } => {
            let mut dashboard = open_dashboard(&config)?;
            if json {
                dashboard = dashboard.with_notifier(LogNotifier);
            }
            let applied = configure(&mut dashboard, &config, preset, focus, break_minutes)?;
            if let Some(event) = applied {
                emit(&event, json)?;
            }

            if let Some(name) = subject {
                if !dashboard.select_subject(Some(&name))?.is_accepted() {
                    return Err(format!(
                        "unknown subject '{name}' (add it with `focusboard subject add`)"
                    )
                    .into());
                }
            }

            let tick = Duration::from_millis(tick_ms.max(1));
            block_on(drive(&mut dashboard, cycles.max(1), tick, json))??;
        }
        TimerAction::Presets => {
            for preset in &config.presets {
                println!(
                    "{:<10} {:>3} min focus / {:>2} min break",
                    preset.label, preset.focus_minutes, preset.break_minutes
                );
            }
        }
        TimerAction::Status => {
            let dashboard = open_dashboard(&config)?;
            let timer = dashboard.timer();
            let today = dashboard.today_record()?;
            println!(
                "Focus {} min / break {} min",
                timer.config().focus_minutes(),
                timer.config().break_minutes()
            );
            println!(
                "Sessions today: {} ({})",
                today.session_count,
                format_duration_min(today.focus_seconds_total / 60)
            );
        }
    }
    Ok(())
}

/// Apply `--preset` or `--focus`/`--break`. `None` when neither was given.
fn configure(
    dashboard: &mut Dashboard<Database>,
    config: &Config,
    preset: Option<String>,
    focus: Option<String>,
    break_minutes: Option<String>,
) -> CmdResult<Option<Event>> {
    if let Some(label) = preset {
        let preset = config
            .preset(&label)
            .ok_or_else(|| format!("unknown preset '{label}'"))?;
        let applied = dashboard
            .select_preset(preset.focus_minutes, preset.break_minutes)
            .ok_or_else(|| format!("preset '{label}' is out of range"))?;
        return Ok(Some(applied));
    }
    if focus.is_none() && break_minutes.is_none() {
        return Ok(None);
    }
    let focus = focus.unwrap_or_else(|| config.timer.focus_minutes.to_string());
    let brk = break_minutes.unwrap_or_else(|| config.timer.break_minutes.to_string());
    let applied = dashboard
        .apply_custom_input(&focus, &brk)
        .ok_or("durations must be whole minutes of at least 1")?;
    Ok(Some(applied))
}

/// Tick once per interval until the requested cycles finish or Ctrl-C.
///
/// Each completed phase auto-starts the next one.
async fn drive(
    dashboard: &mut Dashboard<Database>,
    cycles: u32,
    tick: Duration,
    json: bool,
) -> CmdResult {
    let mut interval = tokio::time::interval(tick);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval.tick().await;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut breaks_done = 0;
    if let Some(event) = dashboard.start() {
        emit(&event, json)?;
    }
    render(dashboard, json)?;

    while dashboard.timer().is_running() {
        tokio::select! {
            _ = interval.tick() => {
                if let Some(event) = dashboard.tick()? {
                    emit(&event, json)?;
                    if matches!(event, Event::PhaseCompleted { phase: Phase::Break, .. }) {
                        breaks_done += 1;
                    }
                    if breaks_done < cycles {
                        if let Some(event) = dashboard.start() {
                            emit(&event, json)?;
                        }
                    }
                }
                render(dashboard, json)?;
            }
            _ = &mut ctrl_c => {
                if let Some(event) = dashboard.pause() {
                    emit(&event, json)?;
                }
            }
        }
    }

    if !json {
        println!();
    }
    print_summary(dashboard, json)
}

fn emit(event: &Event, json: bool) -> CmdResult {
    if json {
        println!("{}", serde_json::to_string(event)?);
    }
    Ok(())
}

fn render(dashboard: &Dashboard<Database>, json: bool) -> CmdResult {
    if json {
        return Ok(());
    }
    let timer = dashboard.timer();
    let subject = timer
        .active_subject()
        .map(|s| format!(" [{s}]"))
        .unwrap_or_default();
    let mut out = std::io::stdout().lock();
    write!(
        out,
        "\r{:<11} {}{}   ",
        timer.phase_label(),
        timer.display(),
        subject
    )?;
    out.flush()?;
    Ok(())
}

fn print_summary(dashboard: &Dashboard<Database>, json: bool) -> CmdResult {
    if json {
        println!("{}", serde_json::to_string(&dashboard.timer().snapshot())?);
        return Ok(());
    }
    let today = dashboard.today_record()?;
    println!(
        "Sessions today: {} ({})",
        today.session_count,
        format_duration_min(today.focus_seconds_total / 60)
    );
    Ok(())
}
