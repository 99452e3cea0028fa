//! Author: [Seclususs](https://github.com/seclususs)

use crate::daemon::types::FixError;

use std::path::PathBuf;
use std::{fs, io};

/// A sysfs attribute kept open between reads.
///
/// The handle is dropped after any failed read so the next read reopens the
/// node; a driver that was briefly unbound comes back on its own.
pub struct MonitoredFile<const BUFFER_SIZE: usize> {
    path: PathBuf,
    file: Option<fs::File>,
    buffer: [u8; BUFFER_SIZE],
}

impl<const BUFFER_SIZE: usize> MonitoredFile<BUFFER_SIZE> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file: None,
            buffer: [0u8; BUFFER_SIZE],
        }
    }

    pub fn read_value(&mut self) -> Result<&str, FixError> {
        let len = match self.read_raw() {
            Ok(len) => len,
            Err(e) => {
                self.file = None;
                return Err(e);
            }
        };
        std::str::from_utf8(&self.buffer[..len])
            .map_err(|e| FixError::Unreadable(format!("{}: {e}", self.path.display())))
    }

    fn read_raw(&mut self) -> Result<usize, FixError> {
        let file = match self.file.take() {
            Some(file) => file,
            None => fs::File::open(&self.path)?,
        };
        let file = self.file.insert(file);
        io::Seek::seek(file, io::SeekFrom::Start(0))?;
        Ok(io::Read::read(file, &mut self.buffer)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rereads_current_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("brightness");
        fs::write(&path, "120\n").unwrap();
        let mut file = MonitoredFile::<16>::new(&path);
        assert_eq!(file.read_value().unwrap(), "120\n");
        fs::write(&path, "0\n").unwrap();
        assert_eq!(file.read_value().unwrap(), "0\n");
    }

    #[test]
    fn recovers_after_node_disappears() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("brightness");
        let mut file = MonitoredFile::<16>::new(&path);
        assert!(file.read_value().is_err());
        fs::write(&path, "42\n").unwrap();
        assert_eq!(file.read_value().unwrap(), "42\n");
    }
}
