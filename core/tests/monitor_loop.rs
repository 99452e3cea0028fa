//! Transition/gating behavior of the monitor loop over scripted samples.

use tspfix::controllers::monitor_logic::{MonitorLoop, MonitorTunables, StepOutcome};
use tspfix::daemon::logging::StateLog;
use tspfix::daemon::traits::{BrightnessSource, LockscreenProbe, LogSink, TspDriver};
use tspfix::daemon::types::{BrightnessLevel, FixError, TspOutcome};
use tspfix::hal::tsp::TspNode;

use std::collections::VecDeque;
use std::fs;
use std::sync::{Arc, Mutex};

struct Samples(VecDeque<Option<u32>>);

impl Samples {
    fn new(values: &[Option<u32>]) -> Self {
        Self(values.iter().copied().collect())
    }
}

impl BrightnessSource for Samples {
    fn sample(&mut self) -> Result<BrightnessLevel, FixError> {
        self.0
            .pop_front()
            .flatten()
            .map(BrightnessLevel)
            .ok_or_else(|| FixError::Unreadable("attribute empty".into()))
    }
}

/// Lock state per probe call; an `Err` entry stands for a failed dumpsys.
struct LockStates(VecDeque<Result<bool, ()>>);

impl LockscreenProbe for LockStates {
    fn query(&mut self) -> Result<bool, FixError> {
        match self.0.pop_front() {
            Some(Ok(active)) => Ok(active),
            _ => Err(FixError::CommandFailed("dumpsys unavailable".into())),
        }
    }
}

fn always(active: bool) -> LockStates {
    LockStates((0..64).map(|_| Ok(active)).collect())
}

#[derive(Clone, Default)]
struct FixCounter(Arc<Mutex<u32>>);

impl FixCounter {
    fn count(&self) -> u32 {
        *self.0.lock().unwrap()
    }
}

impl TspDriver for FixCounter {
    fn reinitialize(&mut self) -> TspOutcome {
        *self.0.lock().unwrap() += 1;
        TspOutcome::Success {
            response: "OK".into(),
        }
    }
}

#[derive(Clone, Default)]
struct Records(Arc<Mutex<Vec<String>>>);

impl Records {
    fn matching(&self, needle: &str) -> usize {
        self.0
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.contains(needle))
            .count()
    }
}

impl LogSink for Records {
    fn append(&self, message: &str) {
        self.0.lock().unwrap().push(message.to_string());
    }
}

fn drive(
    baseline: u32,
    samples: &[Option<u32>],
    lock: LockStates,
) -> (Vec<StepOutcome>, FixCounter, Records, BrightnessLevel) {
    let tsp = FixCounter::default();
    let records = Records::default();
    let mut monitor = MonitorLoop::new(
        Samples::new(samples),
        lock,
        tsp.clone(),
        records.clone(),
        BrightnessLevel(baseline),
        MonitorTunables::default(),
    );
    let outcomes = (0..samples.len()).map(|_| monitor.step()).collect();
    (outcomes, tsp, records, monitor.previous())
}

#[test]
fn fixes_exactly_on_changes_while_locked() {
    let samples = [Some(50), Some(50), Some(80), Some(80), Some(30), Some(30), Some(30)];
    let (_, tsp, _, previous) = drive(50, &samples, always(true));
    assert_eq!(tsp.count(), 2);
    assert_eq!(previous, BrightnessLevel(30));
}

#[test]
fn repeated_zero_is_not_a_transition() {
    let (outcomes, tsp, _, _) = drive(0, &[Some(0), Some(0), Some(0)], always(true));
    assert!(outcomes.iter().all(|o| *o == StepOutcome::Unchanged));
    assert_eq!(tsp.count(), 0);
}

#[test]
fn transition_through_zero_fixes_twice() {
    let (outcomes, tsp, _, previous) = drive(120, &[Some(0), Some(120)], always(true));
    assert_eq!(tsp.count(), 2);
    assert!(matches!(
        outcomes[0],
        StepOutcome::Fixed {
            from: BrightnessLevel(120),
            to: BrightnessLevel(0),
            ..
        }
    ));
    assert_eq!(previous, BrightnessLevel(120));
}

#[test]
fn unreadable_samples_neither_trigger_nor_overwrite() {
    let samples = [None, None, Some(50), None, Some(90)];
    let (outcomes, tsp, records, previous) = drive(50, &samples, always(true));
    assert_eq!(outcomes[0], StepOutcome::Unreadable);
    assert_eq!(outcomes[2], StepOutcome::Unchanged);
    assert_eq!(tsp.count(), 1);
    assert_eq!(records.matching("WARNING brightness unreadable"), 3);
    assert_eq!(previous, BrightnessLevel(90));
}

#[test]
fn change_during_outage_is_still_seen_after_recovery() {
    let (outcomes, tsp, _, _) = drive(50, &[None, Some(80)], always(true));
    assert!(matches!(
        outcomes[1],
        StepOutcome::Fixed {
            from: BrightnessLevel(50),
            to: BrightnessLevel(80),
            ..
        }
    ));
    assert_eq!(tsp.count(), 1);
}

#[test]
fn unlocked_transitions_only_log_skips() {
    let samples = [Some(10), Some(20), Some(20), Some(0), Some(255)];
    let (_, tsp, records, previous) = drive(5, &samples, always(false));
    assert_eq!(tsp.count(), 0);
    assert_eq!(records.matching("fix skipped"), 4);
    assert_eq!(previous, BrightnessLevel(255));
}

#[test]
fn failed_lock_query_counts_as_unlocked() {
    let lock = LockStates(VecDeque::from([Err(()), Ok(true)]));
    let (outcomes, tsp, records, _) = drive(1, &[Some(2), Some(3)], lock);
    assert!(matches!(outcomes[0], StepOutcome::Skipped { .. }));
    assert!(matches!(outcomes[1], StepOutcome::Fixed { .. }));
    assert_eq!(tsp.count(), 1);
    assert_eq!(records.matching("lock screen query failed"), 1);
}

#[test]
fn worked_examples() {
    let (outcomes, tsp, _, previous) = drive(50, &[Some(50)], always(true));
    assert_eq!(outcomes[0], StepOutcome::Unchanged);
    assert_eq!((tsp.count(), previous), (0, BrightnessLevel(50)));

    let (_, tsp, _, previous) = drive(50, &[Some(80)], always(true));
    assert_eq!((tsp.count(), previous), (1, BrightnessLevel(80)));

    let (_, tsp, records, previous) = drive(80, &[Some(0)], always(false));
    assert_eq!((tsp.count(), previous), (0, BrightnessLevel(0)));
    assert_eq!(records.matching("80 -> 0"), 1);
}

#[test]
fn tsp_write_and_read_failures_are_logged_differently() {
    let dir = tempfile::tempdir().unwrap();
    let log = Arc::new(StateLog::new("Test", dir.path().join("tspfix.log")));
    let cmd = dir.path().join("cmd");
    let result = dir.path().join("cmd_result");

    let mut write_fails = MonitorLoop::new(
        Samples::new(&[Some(1)]),
        always(true),
        TspNode::new(&cmd, &result, "run_force_calibration"),
        log.clone(),
        BrightnessLevel(0),
        MonitorTunables::default(),
    );
    match write_fails.step() {
        StepOutcome::Fixed { outcome, .. } => assert!(!outcome.is_success()),
        other => panic!("expected a fix attempt, got {other:?}"),
    }

    fs::write(&cmd, "").unwrap();
    let mut read_fails = MonitorLoop::new(
        Samples::new(&[Some(1)]),
        always(true),
        TspNode::new(&cmd, &result, "run_force_calibration"),
        log.clone(),
        BrightnessLevel(0),
        MonitorTunables::default(),
    );
    match read_fails.step() {
        StepOutcome::Fixed { outcome, .. } => {
            assert!(outcome.is_success());
            assert!(matches!(outcome, TspOutcome::Unconfirmed { .. }));
        }
        other => panic!("expected a fix attempt, got {other:?}"),
    }

    let content = fs::read_to_string(log.path()).unwrap();
    assert_eq!(content.matches("Tsp: ERROR command write failed").count(), 1);
    assert_eq!(content.matches("Tsp: command written, result unreadable").count(), 1);
}
