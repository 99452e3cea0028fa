//! Author: [Seclususs](https://github.com/seclususs)

use crate::config::loop_settings::NETWORK_FIX_DELAY_SEC;
use crate::controllers::monitor_logic::MonitorLoop;
use crate::daemon::logging::LogSet;
use crate::daemon::traits::{BrightnessSource, LockscreenProbe, LogSink, TspDriver};
use crate::daemon::types::{BrightnessLevel, CollaboratorOutcome, FixError};
use crate::hal::process;
use crate::resources::sys_paths;

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct BootTunables {
    pub shell: PathBuf,
    pub boot_values_script: PathBuf,
    pub network_fix_script: PathBuf,
    pub network_fix_delay: Duration,
}

impl Default for BootTunables {
    fn default() -> Self {
        Self {
            shell: PathBuf::from(sys_paths::K_SHELL_BINARY),
            boot_values_script: PathBuf::from(sys_paths::K_BOOT_VALUES_SCRIPT),
            network_fix_script: PathBuf::from(sys_paths::K_NETWORK_FIX_SCRIPT),
            network_fix_delay: Duration::from_secs(NETWORK_FIX_DELAY_SEC),
        }
    }
}

pub fn panic_message(cause: &(dyn Any + Send)) -> String {
    if let Some(s) = cause.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = cause.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Runs one collaborator script to completion, its output going to the
/// verbose log.
pub fn run_collaborator(
    label: &str,
    shell: &Path,
    script: &Path,
    logs: &LogSet,
) -> CollaboratorOutcome {
    if !script.is_file() {
        return CollaboratorOutcome::NotFound;
    }
    logs.verbose.append(&format!("==== {label}: {} ====", script.display()));
    let output = match process::run_captured(shell, [script]) {
        Ok(output) => output,
        Err(e) => return CollaboratorOutcome::SpawnFailed(e.to_string()),
    };
    logs.verbose.append_output(label, &output.stdout);
    logs.verbose.append_output(label, &output.stderr);
    logs.verbose.append(&format!("==== {label}: {} ====", output.status));
    if output.status.success() {
        CollaboratorOutcome::Success
    } else {
        CollaboratorOutcome::Failed(output.status.code())
    }
}

pub fn report_collaborator(
    label: &str,
    script: &Path,
    outcome: &CollaboratorOutcome,
    log: &dyn LogSink,
) {
    let message = match outcome {
        CollaboratorOutcome::Success => format!("Boot: {label} completed successfully"),
        CollaboratorOutcome::Failed(Some(code)) => {
            format!("Boot: ERROR {label} failed with exit code {code}")
        }
        CollaboratorOutcome::Failed(None) => {
            format!("Boot: ERROR {label} was terminated by a signal")
        }
        CollaboratorOutcome::NotFound => {
            format!("Boot: {label} script not found at {}, skipping", script.display())
        }
        CollaboratorOutcome::SpawnFailed(reason) => {
            format!("Boot: ERROR {label} could not be started: {reason}")
        }
    };
    log.append(&message);
}

/// Fire-and-forget: the network fix runs once after the configured delay.
/// The handle is only returned for tests; the daemon drops it.
pub fn schedule_network_fix(tunables: &BootTunables, logs: &LogSet) -> Option<JoinHandle<()>> {
    let shell = tunables.shell.clone();
    let script = tunables.network_fix_script.clone();
    let delay = tunables.network_fix_delay;
    let task_logs = logs.clone();
    let spawned = thread::Builder::new()
        .name("NetworkFix".into())
        .spawn(move || {
            thread::sleep(delay);
            let result = panic::catch_unwind(AssertUnwindSafe(|| {
                run_collaborator("Network fix", &shell, &script, &task_logs)
            }));
            match result {
                Ok(outcome) => {
                    report_collaborator("Network fix", &script, &outcome, &*task_logs.service);
                }
                Err(cause) => task_logs.service.append(&format!(
                    "Boot: ERROR network fix task panicked: {}",
                    panic_message(&*cause)
                )),
            }
        });
    match spawned {
        Ok(handle) => {
            logs.service.append(&format!(
                "Boot: network fix scheduled in {}s",
                delay.as_secs()
            ));
            Some(handle)
        }
        Err(e) => {
            logs.service.append(&format!("Boot: ERROR could not schedule network fix: {e}"));
            None
        }
    }
}

fn check_root(log: &dyn LogSink) {
    if !rustix::process::geteuid().is_root() {
        log.append("Boot: WARNING not running as root, sysfs writes will likely fail");
    }
}

/// Everything before the monitor takes over. Returns the baseline brightness;
/// failing to read it is the one condition that aborts startup.
pub fn boot_sequence<B: BrightnessSource>(
    logs: &LogSet,
    tunables: &BootTunables,
    source: &mut B,
) -> Result<(BrightnessLevel, Option<JoinHandle<()>>), FixError> {
    let reset = logs.reset_all();
    logs.service.append("Boot: starting, logs reset");
    if let Err(e) = reset {
        logs.service.append(&format!("Boot: WARNING log reset incomplete: {e}"));
    }
    check_root(&*logs.service);

    let outcome = run_collaborator(
        "Boot values",
        &tunables.shell,
        &tunables.boot_values_script,
        logs,
    );
    report_collaborator(
        "Boot values",
        &tunables.boot_values_script,
        &outcome,
        &*logs.service,
    );

    let baseline = match source.sample() {
        Ok(level) => level,
        Err(e) => {
            logs.service.append(&format!(
                "Boot: FATAL initial brightness unreadable ({e}), monitor not started"
            ));
            return Err(e);
        }
    };
    logs.service.append(&format!("Boot: initial brightness {baseline}"));

    let handle = schedule_network_fix(tunables, logs);
    Ok((baseline, handle))
}

/// Gives the calling thread to the monitor. Returning at all means the loop
/// died; the reason is recorded before control comes back.
pub fn hand_off<B, P, T, L>(monitor: &mut MonitorLoop<B, P, T, L>, log: &dyn LogSink)
where
    B: BrightnessSource,
    P: LockscreenProbe,
    T: TspDriver,
    L: LogSink,
{
    match panic::catch_unwind(AssertUnwindSafe(|| monitor.run())) {
        Ok(()) => log.append("Monitor: ERROR loop exited unexpectedly"),
        Err(cause) => log.append(&format!(
            "Monitor: ERROR loop terminated by panic: {}",
            panic_message(&*cause)
        )),
    }
}
