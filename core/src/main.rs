//! Author: [Seclususs](https://github.com/seclususs)

use tspfix::controllers::monitor_logic::{MonitorLoop, MonitorTunables};
use tspfix::controllers::normalize_logic;
use tspfix::daemon::logging::{self, LogSet};
use tspfix::daemon::runtime::{self, BootTunables};
use tspfix::hal::activity::DumpsysLockscreenProbe;
use tspfix::hal::backlight::Backlight;
use tspfix::hal::tsp::TspNode;
use tspfix::resources::sys_paths;

use anyhow::Context;
use std::process;

fn daemon_entry() -> anyhow::Result<()> {
    let logs = LogSet::new(sys_paths::K_SERVICE_LOG, sys_paths::K_VERBOSE_LOG);
    let mut backlight = Backlight::new(sys_paths::K_BACKLIGHT_BRIGHTNESS);
    let (baseline, _network_fix) =
        runtime::boot_sequence(&logs, &BootTunables::default(), &mut backlight)
            .context("no initial brightness, monitor cannot start")?;
    let mut monitor = MonitorLoop::new(
        backlight,
        DumpsysLockscreenProbe::default(),
        TspNode::new(
            sys_paths::K_TSP_CMD,
            sys_paths::K_TSP_CMD_RESULT,
            sys_paths::K_TSP_REINIT_CMD,
        ),
        logs.service.clone(),
        baseline,
        MonitorTunables::default(),
    );
    runtime::hand_off(&mut monitor, &*logs.service);
    anyhow::bail!("monitor loop terminated")
}

fn main() {
    logging::init();
    let args: Vec<String> = std::env::args().collect();
    let code = match args.get(1).map(String::as_str) {
        None => match daemon_entry() {
            Ok(()) => 0,
            Err(e) => {
                log::error!("TspFix daemon failed: {e:#}");
                1
            }
        },
        Some("boot-values") => normalize_logic::boot_values_main(),
        Some("network-fix") => normalize_logic::network_fix_main(),
        Some("version") => {
            println!("tspfixd {}", env!("CARGO_PKG_VERSION"));
            0
        }
        Some(other) => {
            eprintln!("usage: tspfixd [boot-values|network-fix|version] (got '{other}')");
            2
        }
    };
    process::exit(code);
}
