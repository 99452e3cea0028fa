//! Author: [Seclususs](https://github.com/seclususs)

use crate::config::loop_settings::{LOG_DIR_MODE, LOG_FILE_MODE};
use crate::daemon::traits::LogSink;
use crate::daemon::types::FixError;

use android_logger::Config;
use log::LevelFilter;
use rustix::fs::{Mode, OFlags};
use std::fs;
use std::io::{ErrorKind, Write};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn init() {
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    android_logger::init_once(Config::default().with_tag("TspFix").with_max_level(level));
}

pub fn format_record(message: &str) -> String {
    format!(
        "[{}] {}\n",
        chrono::Local::now().format(TIMESTAMP_FORMAT),
        message
    )
}

/// Append-only timestamped log file owned by one subsystem.
///
/// The file is truncated once per run by [`StateLog::reset`]. Every append
/// reopens it, recreating it if it was deleted and restoring its world
/// writable mode if something changed it in the meantime.
#[derive(Debug)]
pub struct StateLog {
    name: &'static str,
    path: PathBuf,
}

impl StateLog {
    pub fn new(name: &'static str, path: impl Into<PathBuf>) -> Self {
        Self {
            name,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn reset(&self) -> Result<(), FixError> {
        self.ensure_parent()?;
        let fd = rustix::fs::openat(
            rustix::fs::CWD,
            &self.path,
            OFlags::WRONLY | OFlags::CREATE | OFlags::TRUNC | OFlags::CLOEXEC,
            Mode::from_bits_truncate(LOG_FILE_MODE),
        )?;
        rustix::fs::fchmod(&fd, Mode::from_bits_truncate(LOG_FILE_MODE))?;
        log::debug!("{}: reset {}", self.name, self.path.display());
        Ok(())
    }

    fn ensure_parent(&self) -> Result<(), FixError> {
        let Some(parent) = self.path.parent() else {
            return Err(FixError::InvalidPath(format!(
                "{} has no parent directory",
                self.path.display()
            )));
        };
        if parent.as_os_str().is_empty() || parent.is_dir() {
            return Ok(());
        }
        fs::create_dir_all(parent)?;
        fs::set_permissions(parent, fs::Permissions::from_mode(LOG_DIR_MODE))?;
        Ok(())
    }

    fn open_healed(&self) -> Result<fs::File, FixError> {
        let open = || {
            rustix::fs::openat(
                rustix::fs::CWD,
                &self.path,
                OFlags::WRONLY | OFlags::APPEND | OFlags::CREATE | OFlags::CLOEXEC,
                Mode::from_bits_truncate(LOG_FILE_MODE),
            )
        };
        let fd = match open() {
            Ok(fd) => fd,
            Err(e) if e == rustix::io::Errno::NOENT => {
                self.ensure_parent()?;
                open()?
            }
            Err(e) => return Err(e.into()),
        };
        let stat = rustix::fs::fstat(&fd)?;
        if stat.st_mode & 0o777 != LOG_FILE_MODE {
            rustix::fs::fchmod(&fd, Mode::from_bits_truncate(LOG_FILE_MODE))?;
        }
        Ok(fs::File::from(fd))
    }

    pub fn try_append(&self, message: &str) -> Result<(), FixError> {
        let record = format_record(message);
        let mut file = self.open_healed()?;
        file.write_all(record.as_bytes()).map_err(|e| match e.kind() {
            ErrorKind::PermissionDenied => FixError::PermissionDenied(format!(
                "{}: {}",
                self.path.display(),
                e
            )),
            _ => FixError::Io(e),
        })
    }

    /// Records every non-empty line of a child process stream under `label`.
    pub fn append_output(&self, label: &str, bytes: &[u8]) {
        let text = String::from_utf8_lossy(bytes);
        for line in text.lines().filter(|l| !l.trim().is_empty()) {
            self.append(&format!("{label}| {line}"));
        }
    }
}

impl LogSink for StateLog {
    fn append(&self, message: &str) {
        log::info!("{}: {}", self.name, message);
        if let Err(e) = self.try_append(message) {
            log::warn!("{}: could not write {}: {}", self.name, self.path.display(), e);
        }
    }
}

/// The two log destinations of one run.
#[derive(Debug, Clone)]
pub struct LogSet {
    pub service: Arc<StateLog>,
    pub verbose: Arc<StateLog>,
}

impl LogSet {
    pub fn new(service: impl Into<PathBuf>, verbose: impl Into<PathBuf>) -> Self {
        Self {
            service: Arc::new(StateLog::new("Service", service)),
            verbose: Arc::new(StateLog::new("Verbose", verbose)),
        }
    }

    pub fn reset_all(&self) -> Result<(), FixError> {
        let mut result = Ok(());
        for sink in [&self.service, &self.verbose] {
            if let Err(e) = sink.reset() {
                log::error!("Logging: failed to reset {}: {}", sink.path().display(), e);
                if result.is_ok() {
                    result = Err(e);
                }
            }
        }
        result
    }
}
