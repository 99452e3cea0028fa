//! Author: [Seclususs](https://github.com/seclususs)

use crate::daemon::types::FixError;

use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, Output, Stdio};

pub fn run_captured<I, S>(program: &Path, args: I) -> Result<Output, FixError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| {
            log::debug!("Failed to spawn {}: {}", program.display(), e);
            FixError::Io(e)
        })
}

pub fn stdout_of<I, S>(program: &Path, args: I) -> Result<String, FixError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let output = run_captured(program, args)?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(FixError::CommandFailed(format!(
            "{} exited with {}: {}",
            program.display(),
            output.status,
            stderr.trim()
        )));
    }
    String::from_utf8(output.stdout)
        .map_err(|e| FixError::CommandFailed(format!("{}: non UTF-8 output: {e}", program.display())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_stdout_of_successful_command() {
        let out = stdout_of(Path::new("/bin/sh"), ["-c", "echo hello"]).unwrap();
        assert_eq!(out, "hello\n");
    }

    #[test]
    fn non_zero_exit_is_command_failure() {
        let err = stdout_of(Path::new("/bin/sh"), ["-c", "echo nope >&2; exit 3"]).unwrap_err();
        match err {
            FixError::CommandFailed(msg) => assert!(msg.contains("nope")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_binary_is_io_error() {
        let err = run_captured(Path::new("/nonexistent/tool"), ["x"]).unwrap_err();
        assert!(matches!(err, FixError::Io(_)));
    }
}
