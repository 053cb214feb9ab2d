//! Dashboard facade.
//!
//! Owns the key-value store, the clock, the notifier and the timer engine.
//! Every UI command goes through here so that a completed focus phase is
//! credited to the aggregate stores in the same call that finishes it.

use chrono::{NaiveDate, Utc};

use crate::clock::{Clock, SystemClock};
use crate::error::Result;
use crate::events::Event;
use crate::stats::{present, DailyRecord, DailyStore, DashboardStats, SubjectStore};
use crate::storage::KvStore;
use crate::timer::{Acceptance, Completion, Phase, TimerConfig, TimerEngine};
use crate::widgets::TaskList;

/// Receives the user-facing message for every phase completion.
pub trait Notifier {
    fn notify(&self, message: &str);
}

/// Notifier that only logs.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) {
        tracing::info!(message, "phase complete");
    }
}

pub struct Dashboard<S, C = SystemClock> {
    store: S,
    clock: C,
    timer: TimerEngine,
    notifier: Box<dyn Notifier>,
}

impl<S: KvStore> Dashboard<S, SystemClock> {
    /// Dashboard on the local wall clock.
    pub fn open(store: S, config: TimerConfig) -> Self {
        Self::new(store, SystemClock, config)
    }
}

impl<S: KvStore, C: Clock> Dashboard<S, C> {
    pub fn new(store: S, clock: C, config: TimerConfig) -> Self {
        Self {
            store,
            clock,
            timer: TimerEngine::new(config),
            notifier: Box::new(LogNotifier),
        }
    }

    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn timer(&self) -> &TimerEngine {
        &self.timer
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn daily(&self) -> DailyStore<'_, S> {
        DailyStore::new(&self.store)
    }

    pub fn subjects(&self) -> SubjectStore<'_, S> {
        SubjectStore::new(&self.store)
    }

    pub fn tasks(&self) -> TaskList<'_, S> {
        TaskList::new(&self.store)
    }

    pub fn today_record(&self) -> Result<DailyRecord> {
        self.daily().get(self.today())
    }

    /// Summary for today, recomputed from storage.
    pub fn stats(&self) -> Result<DashboardStats> {
        present(&self.store, self.today())
    }

    // ── Timer commands ───────────────────────────────────────────────

    /// Switch to a preset's durations. `None` when refused.
    pub fn select_preset(&mut self, focus_min: u32, break_min: u32) -> Option<Event> {
        let accepted = self.timer.select_preset(focus_min, break_min);
        tracing::debug!(focus_min, break_min, ?accepted, "select preset");
        self.preset_applied(accepted)
    }

    pub fn apply_custom(&mut self, focus_min: i64, break_min: i64) -> Option<Event> {
        let accepted = self.timer.apply_custom(focus_min, break_min);
        tracing::debug!(focus_min, break_min, ?accepted, "apply custom durations");
        self.preset_applied(accepted)
    }

    pub fn apply_custom_input(&mut self, focus: &str, brk: &str) -> Option<Event> {
        let accepted = self.timer.apply_custom_input(focus, brk);
        tracing::debug!(focus, brk, ?accepted, "apply custom form input");
        self.preset_applied(accepted)
    }

    fn preset_applied(&self, accepted: Acceptance) -> Option<Event> {
        accepted.is_accepted().then(|| {
            let config = self.timer.config();
            Event::PresetApplied {
                focus_secs: config.focus_secs(),
                break_secs: config.break_secs(),
                remaining_secs: self.timer.remaining_secs(),
                at: Utc::now(),
            }
        })
    }

    pub fn start(&mut self) -> Option<Event> {
        self.timer.start().inspect(|e| tracing::debug!(event = ?e, "timer started"))
    }

    pub fn pause(&mut self) -> Option<Event> {
        self.timer.pause().inspect(|e| tracing::debug!(event = ?e, "timer paused"))
    }

    pub fn reset(&mut self) -> Option<Event> {
        self.timer.reset().inspect(|e| tracing::debug!(event = ?e, "timer reset"))
    }

    /// Select a catalog subject, or clear the selection with `None`/blank.
    ///
    /// Names missing from the catalog are refused.
    pub fn select_subject(&mut self, name: Option<&str>) -> Result<Acceptance> {
        let name = name.map(str::trim).filter(|n| !n.is_empty());
        if let Some(n) = name {
            if !self.subjects().contains(n)? {
                return Ok(Acceptance::Rejected);
            }
        }
        self.timer.select_subject(name.map(str::to_string));
        tracing::debug!(subject = ?name, "subject selected");
        Ok(Acceptance::Accepted)
    }

    pub fn add_subject(&self, name: &str) -> Result<Acceptance> {
        self.subjects().add_subject(name)
    }

    /// Remove `name` from the catalog along with today's record for it.
    /// Clears the selection if it was the active subject.
    pub fn remove_subject(&mut self, name: &str) -> Result<Acceptance> {
        let accepted = self.subjects().remove_subject(self.today(), name)?;
        if self.timer.active_subject() == Some(name) {
            self.timer.select_subject(None);
        }
        Ok(accepted)
    }

    /// Fire one tick and credit the aggregates if a focus phase finished.
    ///
    /// The daily and subject credits land together or not at all. On failure
    /// the timer is put back on its last second and the error returned, so
    /// the next tick completes the phase again.
    pub fn tick(&mut self) -> Result<Option<Event>> {
        let before = (self.timer.remaining_secs() <= 1).then(|| self.timer.clone());
        let Some(done) = self.timer.tick() else {
            return Ok(None);
        };

        if done.phase == Phase::Focus {
            if let Err(e) = self.credit(&done) {
                tracing::warn!(error = %e, "focus session not recorded, timer rolled back");
                if let Some(before) = before {
                    self.timer = before;
                }
                return Err(e);
            }
        } else {
            tracing::info!("break finished");
        }

        self.notifier.notify(done.message());

        Ok(Some(Event::PhaseCompleted {
            phase: done.phase,
            next_phase: done.next_phase,
            credited_seconds: done.credited_secs,
            message: done.message().to_string(),
            subject: done.subject,
            at: Utc::now(),
        }))
    }

    fn credit(&self, done: &Completion) -> Result<()> {
        let today = self.today();
        let daily = self.store.atomically(|| {
            let daily = self.daily().record_focus_completion(today, done.credited_secs)?;
            if let Some(subject) = done.subject.as_deref() {
                self.subjects()
                    .record_focus_completion(today, subject, done.credited_secs)?;
            }
            Ok(daily)
        })?;
        tracing::info!(
            %today,
            seconds = done.credited_secs,
            subject = ?done.subject,
            sessions_today = daily.session_count,
            "focus session recorded"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::error::DatabaseError;
    use crate::stats::SUBJECT_DATA_PREFIX;
    use crate::storage::MemoryStore;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    /// Memory store whose subject writes can be made to fail.
    #[derive(Default)]
    struct FlakyStore {
        inner: MemoryStore,
        fail_subject_writes: Cell<bool>,
    }

    impl KvStore for FlakyStore {
        fn kv_get(&self, key: &str) -> Result<Option<String>, DatabaseError> {
            self.inner.kv_get(key)
        }

        fn kv_set(&self, key: &str, value: &str) -> Result<(), DatabaseError> {
            if self.fail_subject_writes.get() && key.starts_with(SUBJECT_DATA_PREFIX) {
                return Err(DatabaseError::Locked);
            }
            self.inner.kv_set(key, value)
        }

        fn kv_remove(&self, key: &str) -> Result<(), DatabaseError> {
            self.inner.kv_remove(key)
        }

        fn atomically<T, F>(&self, f: F) -> Result<T>
        where
            F: FnOnce() -> Result<T>,
        {
            self.inner.atomically(f)
        }
    }

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<String>>>);

    impl Notifier for Recorder {
        fn notify(&self, message: &str) {
            self.0.borrow_mut().push(message.to_string());
        }
    }

    fn dashboard() -> Dashboard<MemoryStore, FixedClock> {
        Dashboard::new(
            MemoryStore::new(),
            FixedClock::new(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()),
            TimerConfig::from_minutes(1, 1).unwrap(),
        )
    }

    fn tick_n(d: &mut Dashboard<MemoryStore, FixedClock>, n: usize) -> Vec<Event> {
        (0..n).filter_map(|_| d.tick().unwrap()).collect()
    }

    #[test]
    fn focus_completion_writes_through_and_notifies() {
        let recorder = Recorder::default();
        let mut d = dashboard().with_notifier(recorder.clone());
        d.add_subject("Math").unwrap();
        assert!(d.select_subject(Some("Math")).unwrap().is_accepted());
        d.start();

        let events = tick_n(&mut d, 60);
        assert_eq!(events.len(), 1);
        assert!(matches!(
            &events[0],
            Event::PhaseCompleted { phase: Phase::Focus, credited_seconds: 60, .. }
        ));

        let today = d.today();
        assert_eq!(d.today_record().unwrap().session_count, 1);
        assert_eq!(d.subjects().get(today, "Math").unwrap().focus_seconds_total, 60);

        d.start();
        tick_n(&mut d, 60);
        assert_eq!(
            *recorder.0.borrow(),
            [
                "Focus session complete! Take a break.",
                "Break over! Ready for another session?"
            ]
        );
        assert_eq!(d.today_record().unwrap().session_count, 1);
    }

    #[test]
    fn duration_commands_report_preset_applied() {
        let mut d = dashboard();
        match d.select_preset(50, 10) {
            Some(Event::PresetApplied {
                focus_secs,
                break_secs,
                remaining_secs,
                ..
            }) => {
                assert_eq!((focus_secs, break_secs, remaining_secs), (3000, 600, 3000));
            }
            other => panic!("expected PresetApplied, got {other:?}"),
        }
        assert!(d.apply_custom(0, 5).is_none());
        assert!(matches!(
            d.apply_custom_input("200", "7"),
            Some(Event::PresetApplied { focus_secs: 7200, break_secs: 420, .. })
        ));

        d.start();
        assert!(d.select_preset(25, 5).is_none());
        assert_eq!(d.timer().config().focus_secs(), 7200);
    }

    #[test]
    fn failed_credit_rolls_back_and_retries() {
        let mut d = Dashboard::new(
            FlakyStore::default(),
            FixedClock::new(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()),
            TimerConfig::from_minutes(1, 1).unwrap(),
        );
        d.add_subject("Math").unwrap();
        d.select_subject(Some("Math")).unwrap();
        d.start();
        for _ in 0..59 {
            assert!(d.tick().unwrap().is_none());
        }

        d.store().fail_subject_writes.set(true);
        assert!(d.tick().is_err());
        assert_eq!(d.today_record().unwrap(), DailyRecord::default());
        assert_eq!(d.timer().phase(), Phase::Focus);
        assert_eq!(d.timer().remaining_secs(), 1);
        assert!(d.timer().is_running());

        d.store().fail_subject_writes.set(false);
        assert!(matches!(
            d.tick().unwrap(),
            Some(Event::PhaseCompleted { phase: Phase::Focus, credited_seconds: 60, .. })
        ));
        assert_eq!(d.today_record().unwrap().session_count, 1);
        let math = d.subjects().get(d.today(), "Math").unwrap();
        assert_eq!((math.session_count, math.focus_seconds_total), (1, 60));
        assert_eq!(d.timer().phase(), Phase::Break);
    }

    #[test]
    fn unknown_subject_is_refused() {
        let mut d = dashboard();
        assert_eq!(d.select_subject(Some("Ghost")).unwrap(), Acceptance::Rejected);
        assert!(d.select_subject(Some("  ")).unwrap().is_accepted());
        assert!(d.timer().active_subject().is_none());
    }

    #[test]
    fn removing_active_subject_clears_selection() {
        let mut d = dashboard();
        d.add_subject("Science").unwrap();
        d.select_subject(Some("Science")).unwrap();
        d.remove_subject("Science").unwrap();
        assert!(d.timer().active_subject().is_none());

        d.start();
        tick_n(&mut d, 60);
        assert!(d.subjects().all(d.today()).unwrap().is_empty());
    }

    #[test]
    fn completion_credits_the_date_it_finishes_on() {
        let mut d = dashboard();
        d.start();
        tick_n(&mut d, 30);
        d.clock().advance_days(1);
        tick_n(&mut d, 30);

        let yesterday = d.today().pred_opt().unwrap();
        assert_eq!(d.daily().get(yesterday).unwrap(), DailyRecord::default());
        assert_eq!(d.today_record().unwrap().session_count, 1);
    }
}
