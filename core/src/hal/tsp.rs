//! Author: [Seclususs](https://github.com/seclususs)

use crate::daemon::traits::TspDriver;
use crate::daemon::types::TspOutcome;
use crate::hal::filesystem;

use std::path::PathBuf;

/// The TSP driver's command/result attribute pair.
pub struct TspNode {
    cmd_path: PathBuf,
    result_path: PathBuf,
    command: String,
}

impl TspNode {
    pub fn new(
        cmd_path: impl Into<PathBuf>,
        result_path: impl Into<PathBuf>,
        command: impl Into<String>,
    ) -> Self {
        Self {
            cmd_path: cmd_path.into(),
            result_path: result_path.into(),
            command: command.into(),
        }
    }
}

impl TspDriver for TspNode {
    fn reinitialize(&mut self) -> TspOutcome {
        if let Err(e) = filesystem::write_attribute(&self.cmd_path, &self.command) {
            return TspOutcome::WriteFailed {
                reason: format!("'{}' -> {}: {}", self.command, self.cmd_path.display(), e),
            };
        }
        match filesystem::read_attribute(&self.result_path) {
            Ok(response) => TspOutcome::Success {
                response: response.trim().to_string(),
            },
            Err(e) => TspOutcome::Unconfirmed {
                read_error: format!("{}: {}", self.result_path.display(), e),
            },
        }
    }
}
