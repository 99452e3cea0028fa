pub mod loop_settings;
