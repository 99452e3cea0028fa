//! Author: [Seclususs](https://github.com/seclususs)

use crate::daemon::types::{BrightnessLevel, FixError, TspOutcome};

use std::sync::Arc;

pub trait LogSink {
    fn append(&self, message: &str);
}

impl<T: LogSink + ?Sized> LogSink for Arc<T> {
    fn append(&self, message: &str) {
        (**self).append(message);
    }
}

pub trait BrightnessSource {
    fn sample(&mut self) -> Result<BrightnessLevel, FixError>;
}

pub trait LockscreenProbe {
    fn query(&mut self) -> Result<bool, FixError>;
    /// Any query failure is recorded and reads as "not on the lock screen".
    fn is_lockscreen_active(&mut self, log: &dyn LogSink) -> bool {
        self.query().unwrap_or_else(|e| {
            log.append(&format!(
                "Monitor: lock screen query failed ({e}), assuming inactive"
            ));
            false
        })
    }
}

pub trait TspDriver {
    fn reinitialize(&mut self) -> TspOutcome;
}

pub trait KeyValueStore {
    fn name(&self) -> &'static str;
    fn get(&self, key: &str) -> Result<Option<String>, FixError>;
    fn put(&self, key: &str, value: &str) -> Result<(), FixError>;
}
