//! Author: [Seclususs](https://github.com/seclususs)

use crate::config::loop_settings::{POLL_INTERVAL_MS, UNREADABLE_BACKOFF_SEC};
use crate::daemon::traits::{BrightnessSource, LockscreenProbe, LogSink, TspDriver};
use crate::daemon::types::{BrightnessLevel, TspOutcome};

use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub struct MonitorTunables {
    pub poll_interval: Duration,
    pub unreadable_backoff: Duration,
}

impl Default for MonitorTunables {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(POLL_INTERVAL_MS),
            unreadable_backoff: Duration::from_secs(UNREADABLE_BACKOFF_SEC),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Unchanged,
    Unreadable,
    Skipped {
        from: BrightnessLevel,
        to: BrightnessLevel,
    },
    Fixed {
        from: BrightnessLevel,
        to: BrightnessLevel,
        outcome: TspOutcome,
    },
}

pub struct MonitorLoop<B, P, T, L> {
    source: B,
    probe: P,
    tsp: T,
    log: L,
    previous: BrightnessLevel,
    tunables: MonitorTunables,
}

impl<B, P, T, L> MonitorLoop<B, P, T, L>
where
    B: BrightnessSource,
    P: LockscreenProbe,
    T: TspDriver,
    L: LogSink,
{
    pub fn new(
        source: B,
        probe: P,
        tsp: T,
        log: L,
        baseline: BrightnessLevel,
        tunables: MonitorTunables,
    ) -> Self {
        Self {
            source,
            probe,
            tsp,
            log,
            previous: baseline,
            tunables,
        }
    }

    pub fn previous(&self) -> BrightnessLevel {
        self.previous
    }

    /// One iteration without the sleeps.
    pub fn step(&mut self) -> StepOutcome {
        let current = match self.source.sample() {
            Ok(level) => level,
            Err(e) => {
                self.log.append(&format!(
                    "Monitor: WARNING brightness unreadable ({e}), backing off {}s",
                    self.tunables.unreadable_backoff.as_secs_f32()
                ));
                return StepOutcome::Unreadable;
            }
        };
        let from = self.previous;
        self.previous = current;
        if current == from {
            return StepOutcome::Unchanged;
        }
        if self.probe.is_lockscreen_active(&self.log) {
            self.log.append(&format!(
                "Monitor: brightness {from} -> {current} on lock screen, re-initializing TSP"
            ));
            let outcome = self.tsp.reinitialize();
            self.report(&outcome);
            StepOutcome::Fixed {
                from,
                to: current,
                outcome,
            }
        } else {
            self.log.append(&format!(
                "Monitor: brightness {from} -> {current}, lock screen not active, fix skipped"
            ));
            StepOutcome::Skipped { from, to: current }
        }
    }

    fn report(&self, outcome: &TspOutcome) {
        let message = match outcome {
            TspOutcome::Success { response } => {
                format!("Tsp: re-initialized, driver replied '{response}'")
            }
            TspOutcome::Unconfirmed { read_error } => {
                format!("Tsp: command written, result unreadable ({read_error})")
            }
            TspOutcome::WriteFailed { reason } => {
                format!("Tsp: ERROR command write failed: {reason}")
            }
        };
        self.log.append(&message);
    }

    /// Runs until the process is killed.
    pub fn run(&mut self) {
        self.log.append(&format!(
            "Monitor: started at brightness {}, polling every {}ms",
            self.previous,
            self.tunables.poll_interval.as_millis()
        ));
        loop {
            thread::sleep(self.tunables.poll_interval);
            if self.step() == StepOutcome::Unreadable {
                thread::sleep(self.tunables.unreadable_backoff);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::daemon::types::FixError;

    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    struct Script(VecDeque<Option<u32>>);

    impl BrightnessSource for Script {
        fn sample(&mut self) -> Result<BrightnessLevel, FixError> {
            match self.0.pop_front().flatten() {
                Some(v) => Ok(BrightnessLevel(v)),
                None => Err(FixError::Unreadable("empty".into())),
            }
        }
    }

    struct Fixed(bool);

    impl LockscreenProbe for Fixed {
        fn query(&mut self) -> Result<bool, FixError> {
            Ok(self.0)
        }
    }

    #[derive(Clone, Default)]
    struct Counter(Arc<Mutex<u32>>);

    impl TspDriver for Counter {
        fn reinitialize(&mut self) -> TspOutcome {
            *self.0.lock().unwrap() += 1;
            TspOutcome::Success {
                response: "OK".into(),
            }
        }
    }

    #[derive(Clone, Default)]
    struct Lines(Arc<Mutex<Vec<String>>>);

    impl LogSink for Lines {
        fn append(&self, message: &str) {
            self.0.lock().unwrap().push(message.to_string());
        }
    }

    fn monitor(
        samples: &[Option<u32>],
        lock: bool,
        baseline: u32,
    ) -> (MonitorLoop<Script, Fixed, Counter, Lines>, Counter, Lines) {
        let tsp = Counter::default();
        let lines = Lines::default();
        let m = MonitorLoop::new(
            Script(samples.iter().copied().collect()),
            Fixed(lock),
            tsp.clone(),
            lines.clone(),
            BrightnessLevel(baseline),
            MonitorTunables::default(),
        );
        (m, tsp, lines)
    }

    #[test]
    fn same_value_is_a_no_op() {
        let (mut m, tsp, lines) = monitor(&[Some(50)], true, 50);
        assert_eq!(m.step(), StepOutcome::Unchanged);
        assert_eq!(m.previous(), BrightnessLevel(50));
        assert_eq!(*tsp.0.lock().unwrap(), 0);
        assert!(lines.0.lock().unwrap().is_empty());
    }

    #[test]
    fn change_on_lockscreen_fixes_and_advances() {
        let (mut m, tsp, _) = monitor(&[Some(80)], true, 50);
        assert!(matches!(m.step(), StepOutcome::Fixed { .. }));
        assert_eq!(m.previous(), BrightnessLevel(80));
        assert_eq!(*tsp.0.lock().unwrap(), 1);
    }

    #[test]
    fn change_off_lockscreen_is_skipped_and_advances() {
        let (mut m, tsp, lines) = monitor(&[Some(0)], false, 80);
        assert_eq!(
            m.step(),
            StepOutcome::Skipped {
                from: BrightnessLevel(80),
                to: BrightnessLevel(0)
            }
        );
        assert_eq!(m.previous(), BrightnessLevel(0));
        assert_eq!(*tsp.0.lock().unwrap(), 0);
        assert!(lines.0.lock().unwrap()[0].contains("80 -> 0"));
    }

    #[test]
    fn unreadable_keeps_previous() {
        let (mut m, tsp, lines) = monitor(&[None], true, 50);
        assert_eq!(m.step(), StepOutcome::Unreadable);
        assert_eq!(m.previous(), BrightnessLevel(50));
        assert_eq!(*tsp.0.lock().unwrap(), 0);
        assert!(lines.0.lock().unwrap()[0].contains("WARNING"));
    }
}
