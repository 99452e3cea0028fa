//! Author: [Seclususs](https://github.com/seclususs)

use crate::daemon::traits::LockscreenProbe;
use crate::daemon::types::FixError;
use crate::hal::process;
use crate::resources::sys_paths;

use std::path::PathBuf;

pub fn contains_marker(dump: &str, marker: &str) -> bool {
    dump.lines().any(|line| line.contains(marker))
}

/// Asks the window manager whether the keyguard is up over a dream.
pub struct DumpsysLockscreenProbe {
    program: PathBuf,
    args: Vec<String>,
    marker: String,
}

impl DumpsysLockscreenProbe {
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>, marker: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args,
            marker: marker.into(),
        }
    }
}

impl Default for DumpsysLockscreenProbe {
    fn default() -> Self {
        Self::new(
            sys_paths::K_DUMPSYS_BINARY,
            vec![sys_paths::K_LOCKSCREEN_DUMP_SERVICE.to_string()],
            sys_paths::K_LOCKSCREEN_MARKER,
        )
    }
}

impl LockscreenProbe for DumpsysLockscreenProbe {
    fn query(&mut self) -> Result<bool, FixError> {
        let dump = process::stdout_of(&self.program, &self.args)?;
        Ok(contains_marker(&dump, &self.marker))
    }
}
