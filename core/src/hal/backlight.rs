//! Author: [Seclususs](https://github.com/seclususs)

use crate::config::loop_settings::SAMPLE_BUFFER_SIZE;
use crate::daemon::traits::BrightnessSource;
use crate::daemon::types::{BrightnessLevel, FixError};
use crate::hal::monitored_file::MonitoredFile;

use std::path::PathBuf;

pub struct Backlight {
    node: MonitoredFile<SAMPLE_BUFFER_SIZE>,
}

impl Backlight {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            node: MonitoredFile::new(path),
        }
    }
}

impl BrightnessSource for Backlight {
    fn sample(&mut self) -> Result<BrightnessLevel, FixError> {
        self.node.read_value()?.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn samples_zero_as_a_level() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("brightness");
        fs::write(&path, "0\n").unwrap();
        let mut backlight = Backlight::new(&path);
        assert_eq!(backlight.sample().unwrap(), BrightnessLevel(0));
    }

    #[test]
    fn empty_attribute_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("brightness");
        fs::write(&path, "").unwrap();
        let mut backlight = Backlight::new(&path);
        assert!(matches!(backlight.sample(), Err(FixError::Unreadable(_))));
    }

    #[test]
    fn missing_attribute_is_an_error_not_zero() {
        let dir = tempfile::tempdir().unwrap();
        let mut backlight = Backlight::new(dir.path().join("absent"));
        assert!(matches!(backlight.sample(), Err(FixError::Io(_))));
    }
}
