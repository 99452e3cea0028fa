//! Author: [Seclususs](https://github.com/seclususs)

use std::io;

#[derive(Debug, thiserror::Error)]
pub enum FixError {
    #[error("I/O Error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid Input: {0}")]
    InvalidInput(String),
    #[error("Invalid Path: {0}")]
    InvalidPath(String),
    #[error("Permission Denied: {0}")]
    PermissionDenied(String),
    #[error("Command Failed: {0}")]
    CommandFailed(String),
    #[error("Unreadable: {0}")]
    Unreadable(String),
}

impl From<rustix::io::Errno> for FixError {
    fn from(err: rustix::io::Errno) -> Self {
        FixError::Io(err.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BrightnessLevel(pub u32);

impl std::fmt::Display for BrightnessLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for BrightnessLevel {
    type Err = FixError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(FixError::Unreadable("brightness attribute is empty".into()));
        }
        trimmed
            .parse::<u32>()
            .map(BrightnessLevel)
            .map_err(|e| FixError::Unreadable(format!("brightness '{trimmed}' is not a level: {e}")))
    }
}

/// Result of one TSP re-initialization attempt.
///
/// The command write is the operative signal. `Unconfirmed` means the write
/// went through but the result node could not be read back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TspOutcome {
    Success { response: String },
    Unconfirmed { read_error: String },
    WriteFailed { reason: String },
}

impl TspOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, TspOutcome::WriteFailed { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollaboratorOutcome {
    Success,
    Failed(Option<i32>),
    NotFound,
    SpawnFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizeOutcome {
    AlreadySet,
    Updated,
    Failed(String),
}

impl NormalizeOutcome {
    pub fn is_ok(&self) -> bool {
        !matches!(self, NormalizeOutcome::Failed(_))
    }
}
