//! Author: [Seclususs](https://github.com/seclususs)

use crate::daemon::traits::KeyValueStore;
use crate::daemon::types::FixError;
use crate::hal::process;
use crate::hal::properties::check_pair;
use crate::resources::sys_paths;

use std::path::PathBuf;

const TABLE: &str = "global";

pub fn parse_setting_output(raw: &str) -> Option<String> {
    let value = raw.trim();
    if value.is_empty() || value == "null" {
        None
    } else {
        Some(value.to_string())
    }
}

/// The `global` table of the settings provider.
///
/// Goes through `cmd settings` first and falls back to editing the provider
/// database with `sqlite3` when the service is not answering.
pub struct GlobalSettings {
    cmd: PathBuf,
    sqlite: PathBuf,
    database: PathBuf,
}

impl GlobalSettings {
    pub fn new(
        cmd: impl Into<PathBuf>,
        sqlite: impl Into<PathBuf>,
        database: impl Into<PathBuf>,
    ) -> Self {
        Self {
            cmd: cmd.into(),
            sqlite: sqlite.into(),
            database: database.into(),
        }
    }

    fn sql(&self, statement: &str) -> Result<String, FixError> {
        let database = self.database.to_string_lossy();
        process::stdout_of(&self.sqlite, [&*database, statement])
    }
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self::new(
            sys_paths::K_CMD_BINARY,
            sys_paths::K_SQLITE_BINARY,
            sys_paths::K_SETTINGS_DB,
        )
    }
}

impl KeyValueStore for GlobalSettings {
    fn name(&self) -> &'static str {
        "settings"
    }

    fn get(&self, key: &str) -> Result<Option<String>, FixError> {
        check_pair(key, None)?;
        match process::stdout_of(&self.cmd, ["settings", "get", TABLE, key]) {
            Ok(out) => Ok(parse_setting_output(&out)),
            Err(e) => {
                log::warn!("Settings: cmd get {key} failed ({e}), reading database");
                let out = self.sql(&format!("SELECT value FROM {TABLE} WHERE name='{key}';"))?;
                Ok(parse_setting_output(&out))
            }
        }
    }

    fn put(&self, key: &str, value: &str) -> Result<(), FixError> {
        check_pair(key, Some(value))?;
        let Err(e) = process::stdout_of(&self.cmd, ["settings", "put", TABLE, key, value]) else {
            return Ok(());
        };
        log::warn!("Settings: cmd put {key}={value} failed ({e}), writing database");
        self.sql(&format!(
            "INSERT OR REPLACE INTO {TABLE} (name, value) VALUES ('{key}', '{value}');"
        ))
        .map(|_| ())
        .map_err(|db_err| {
            FixError::CommandFailed(format!("cmd settings: {e}; sqlite fallback: {db_err}"))
        })
    }
}
