//! Author: [Seclususs](https://github.com/seclususs)

use crate::daemon::types::FixError;
use crate::utils::strings;

use std::fs;
use std::path::Path;

const MAX_ATTRIBUTE_LEN: usize = 64;

pub fn read_attribute(path: &Path) -> Result<String, FixError> {
    fs::read_to_string(path).map_err(|e| {
        log::debug!("Read failed for {}: {}", path.display(), e);
        FixError::Io(e)
    })
}

pub fn write_attribute(path: &Path, value: &str) -> Result<(), FixError> {
    if !strings::validate_value(value) {
        return Err(FixError::InvalidInput(format!(
            "Invalid characters in value for {}: '{value}'",
            path.display()
        )));
    }
    let mut buffer = [0u8; MAX_ATTRIBUTE_LEN];
    let val_bytes = value.as_bytes();
    if val_bytes.len() + 1 > buffer.len() {
        return Err(FixError::InvalidInput(
            "Value too long for stack buffer".into(),
        ));
    }
    buffer[..val_bytes.len()].copy_from_slice(val_bytes);
    buffer[val_bytes.len()] = b'\n';
    let final_slice = &buffer[..=val_bytes.len()];
    let fd = rustix::fs::openat(
        rustix::fs::CWD,
        path,
        rustix::fs::OFlags::WRONLY | rustix::fs::OFlags::TRUNC | rustix::fs::OFlags::CLOEXEC,
        rustix::fs::Mode::empty(),
    )
    .map_err(|e| {
        log::debug!("Openat failed for {}: {e}", path.display());
        FixError::from(e)
    })?;
    let written = rustix::io::write(&fd, final_slice).map_err(|e| {
        log::debug!("Write raw failed '{value}' -> {}: {e}", path.display());
        FixError::from(e)
    })?;
    if written != final_slice.len() {
        return Err(FixError::Io(std::io::Error::new(
            std::io::ErrorKind::WriteZero,
            format!("short write to {}: {written}/{}", path.display(), final_slice.len()),
        )));
    }
    Ok(())
}
