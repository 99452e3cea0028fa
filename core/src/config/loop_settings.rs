//! Author: [Seclususs](https://github.com/seclususs)

pub const POLL_INTERVAL_MS: u64 = 600;
pub const UNREADABLE_BACKOFF_SEC: u64 = 5;
pub const NETWORK_FIX_DELAY_SEC: u64 = 30;
pub const LOG_FILE_MODE: u32 = 0o666;
pub const LOG_DIR_MODE: u32 = 0o777;
pub const SAMPLE_BUFFER_SIZE: usize = 32;
