pub mod value_tweaks;
