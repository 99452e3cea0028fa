pub mod activity;
pub mod backlight;
pub mod filesystem;
pub mod monitored_file;
pub mod process;
pub mod properties;
pub mod settings;
pub mod tsp;
