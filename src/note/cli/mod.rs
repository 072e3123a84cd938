//! # CLI Layer
//!
//! One client of the note library. This is the only place that:
//! - Parses arguments (clap)
//! - Writes to stdout/stderr and sets up logging
//! - Asks for confirmation before destructive operations
//! - Reads stdin, files and the external editor for input
//!
//! ## Structure
//!
//! - [`setup`]: clap argument definitions
//! - [`commands`]: `run()`, context setup and per-command handlers
//! - [`print`]: turning `CmdResult` data into terminal output

mod commands;
mod print;
mod setup;

pub use commands::run;
