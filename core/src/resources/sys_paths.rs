//! Author: [Seclususs](https://github.com/seclususs)

pub const K_SERVICE_LOG: &str = "/data/adb/modules/tspfix/logs/tspfix.log";
pub const K_VERBOSE_LOG: &str = "/data/adb/modules/tspfix/logs/tspfix_verbose.log";
pub const K_BOOT_VALUES_SCRIPT: &str = "/data/adb/modules/tspfix/boot_values.sh";
pub const K_NETWORK_FIX_SCRIPT: &str = "/data/adb/modules/tspfix/network_fix.sh";

pub const K_BACKLIGHT_BRIGHTNESS: &str = "/sys/class/backlight/panel/brightness";
pub const K_TSP_CMD: &str = "/sys/class/sec/tsp/cmd";
pub const K_TSP_CMD_RESULT: &str = "/sys/class/sec/tsp/cmd_result";
pub const K_TSP_REINIT_CMD: &str = "run_force_calibration";

pub const K_DUMPSYS_BINARY: &str = "/system/bin/dumpsys";
pub const K_LOCKSCREEN_DUMP_SERVICE: &str = "window";
pub const K_LOCKSCREEN_MARKER: &str = "mDreamingLockscreen=true";

pub const K_SHELL_BINARY: &str = "/system/bin/sh";
pub const K_CMD_BINARY: &str = "/system/bin/cmd";
pub const K_GETPROP_BINARY: &str = "/system/bin/getprop";
pub const K_SETPROP_BINARY: &str = "/system/bin/setprop";
pub const K_SQLITE_BINARY: &str = "/system/xbin/sqlite3";
pub const K_SETTINGS_DB: &str =
    "/data/data/com.android.providers.settings/databases/settings.db";
