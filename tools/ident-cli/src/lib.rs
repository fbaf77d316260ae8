//! # Ident CLI
//!
//! Command-line adapter over `ident-core`. Settings come from the
//! environment and can be overridden per invocation with flags.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod commands;
pub mod config;

pub use commands::{generate, inspect, validate, InspectReport, Requirement};
pub use config::{load_config, load_config_from, CliConfig};
