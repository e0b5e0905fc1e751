//! Internal modules for the imposter terminal front-end.
//!
//! This library provides command parsing, configuration and screen
//! rendering used by the imposter_cli binary.

pub mod commands;
pub mod config;
pub mod display;
