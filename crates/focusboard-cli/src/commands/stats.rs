use clap::Subcommand;
use focusboard_core::clock::parse_date;
use focusboard_core::stats::{format_duration_min, present, DailyStore, DAILY_PREFIX};
use focusboard_core::{Clock, Database, DashboardStats, SystemClock};

use super::CmdResult;

const BAR_WIDTH: usize = 20;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Today's dashboard summary
    Today {
        #[arg(long)]
        json: bool,
    },
    /// Summary for a past date (YYYY-MM-DD)
    Day {
        date: String,
        #[arg(long)]
        json: bool,
    },
    /// Every recorded day with its totals
    History {
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: StatsAction) -> CmdResult {
    let db = Database::open()?;

    match action {
        StatsAction::Today { json } => {
            let stats = present(&db, SystemClock.today())?;
            print_stats(&stats, json)?;
        }
        StatsAction::Day { date, json } => {
            let date = parse_date(&date)
                .ok_or_else(|| format!("invalid date '{date}', expected YYYY-MM-DD"))?;
            let stats = present(&db, date)?;
            print_stats(&stats, json)?;
        }
        StatsAction::History { json } => {
            let daily = DailyStore::new(&db);
            let mut rows = Vec::new();
            for key in db.kv_keys(DAILY_PREFIX)? {
                let Some(date) = parse_date(&key[DAILY_PREFIX.len()..]) else {
                    continue;
                };
                rows.push((date, daily.get(date)?));
            }
            if json {
                let entries: Vec<_> = rows
                    .iter()
                    .map(|(date, r)| {
                        serde_json::json!({
                            "date": date,
                            "sessions": r.session_count,
                            "focusSeconds": r.focus_seconds_total,
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else if rows.is_empty() {
                println!("No sessions recorded yet.");
            } else {
                for (date, r) in rows {
                    println!(
                        "{date}  {:>3} sessions  {:>8}",
                        r.session_count,
                        format_duration_min(r.focus_seconds_total / 60)
                    );
                }
            }
        }
    }
    Ok(())
}

fn print_stats(stats: &DashboardStats, json: bool) -> CmdResult {
    if json {
        println!("{}", serde_json::to_string_pretty(stats)?);
    } else {
        print!("{}", render_stats(stats));
    }
    Ok(())
}

pub fn render_stats(stats: &DashboardStats) -> String {
    let mut out = format!(
        "Stats for {}\n  Focus time:     {} min\n  Sessions:       {}\n  \
         Tasks done:     {}\n  Tasks pending:  {}\n",
        stats.date,
        stats.focus_minutes,
        stats.sessions,
        stats.tasks_completed_today,
        stats.tasks_pending,
    );
    if stats.subjects.is_empty() {
        return out;
    }

    let name_width = stats
        .subjects
        .iter()
        .map(|b| b.name.chars().count())
        .max()
        .unwrap_or(0);
    out.push_str("  Subjects:\n");
    for bar in &stats.subjects {
        let filled = (bar.width_pct / 100.0 * BAR_WIDTH as f64).round() as usize;
        let filled = filled.min(BAR_WIDTH);
        out.push_str(&format!(
            "    {:<name_width$}  {}{}  {:>3.0}%  {} ({} sessions)\n",
            bar.name,
            "█".repeat(filled),
            "░".repeat(BAR_WIDTH - filled),
            bar.width_pct,
            format_duration_min(bar.minutes),
            bar.sessions,
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use focusboard_core::SubjectBar;

    #[test]
    fn render_includes_bars() {
        let stats = DashboardStats {
            date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            focus_minutes: 50,
            focus_seconds: 3000,
            sessions: 2,
            tasks_completed_today: 1,
            tasks_pending: 3,
            subjects: vec![
                SubjectBar {
                    name: "Math".into(),
                    sessions: 2,
                    seconds: 3000,
                    minutes: 50,
                    width_pct: 100.0,
                },
                SubjectBar {
                    name: "Art".into(),
                    sessions: 0,
                    seconds: 0,
                    minutes: 0,
                    width_pct: 0.0,
                },
            ],
        };
        let text = render_stats(&stats);
        assert!(text.contains("Focus time:     50 min"));
        assert!(text.contains(&format!("Math  {}  100%", "█".repeat(BAR_WIDTH))));
        assert!(text.contains(&format!("Art   {}    0%", "░".repeat(BAR_WIDTH))));
    }
}
