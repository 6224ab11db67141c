//! Harvester CLI Library
//!
//! Command-line interface for inspecting harvester settings, the course
//! table and the portal selector catalog.

#![warn(missing_docs)]

mod commands;
mod config;
mod error;
pub mod handlers;
mod output;
pub mod telemetry;

pub use commands::{
    Cli, ColorArg, Commands, ConfigArgs, CourseArgs, CoursesArgs, ResolveArgs, SelectorsArgs,
};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use output::{OutputFormat, Printer};
