use std::io::Write;
use std::time::Duration;

use focusboard_core::widgets::BreathingExercise;

use super::{block_on, CmdResult};

pub fn run(cycles: u32, phase_ms: u64) -> CmdResult {
    block_on(guide(cycles, Duration::from_millis(phase_ms)))?
}

async fn guide(cycles: u32, phase: Duration) -> CmdResult {
    let mut exercise = BreathingExercise::new();
    let mut out = std::io::stdout();
    let steps = cycles.saturating_mul(3);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    for step in 0..steps {
        let current = if step == 0 {
            exercise.start()
        } else {
            match exercise.advance() {
                Some(p) => p,
                None => break,
            }
        };
        writeln!(out, "{}", current.label())?;
        out.flush()?;

        tokio::select! {
            _ = tokio::time::sleep(phase) => {}
            _ = &mut ctrl_c => break,
        }
    }

    exercise.stop();
    writeln!(out, "{}", exercise.label())?;
    Ok(())
}
