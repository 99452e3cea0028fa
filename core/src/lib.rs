//! This file is part of TspFix.
//! Licensed under the GNU GPL v3 or later.

#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod controllers;
pub mod daemon;
pub mod hal;
pub mod registry;
pub mod resources;
pub mod utils;
