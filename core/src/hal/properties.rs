//! Author: [Seclususs](https://github.com/seclususs)

use crate::daemon::traits::KeyValueStore;
use crate::daemon::types::FixError;
use crate::hal::process;
use crate::resources::sys_paths;
use crate::utils::strings;

use std::path::PathBuf;

pub(crate) fn check_pair(key: &str, value: Option<&str>) -> Result<(), FixError> {
    if !strings::validate_key(key) {
        return Err(FixError::InvalidInput(format!("Invalid characters in key: '{key}'")));
    }
    if let Some(value) = value
        && !strings::validate_value(value)
    {
        return Err(FixError::InvalidInput(format!("Invalid characters in value: '{value}'")));
    }
    Ok(())
}

/// Device properties through the `getprop`/`setprop` toolbox binaries.
pub struct PropertyStore {
    getprop: PathBuf,
    setprop: PathBuf,
}

impl PropertyStore {
    pub fn new(getprop: impl Into<PathBuf>, setprop: impl Into<PathBuf>) -> Self {
        Self {
            getprop: getprop.into(),
            setprop: setprop.into(),
        }
    }
}

impl Default for PropertyStore {
    fn default() -> Self {
        Self::new(sys_paths::K_GETPROP_BINARY, sys_paths::K_SETPROP_BINARY)
    }
}

impl KeyValueStore for PropertyStore {
    fn name(&self) -> &'static str {
        "property"
    }

    fn get(&self, key: &str) -> Result<Option<String>, FixError> {
        check_pair(key, None)?;
        let value = process::stdout_of(&self.getprop, [key])?;
        let value = value.trim();
        Ok((!value.is_empty()).then(|| value.to_string()))
    }

    fn put(&self, key: &str, value: &str) -> Result<(), FixError> {
        check_pair(key, Some(value))?;
        process::stdout_of(&self.setprop, [key, value]).map(|_| ())
    }
}
