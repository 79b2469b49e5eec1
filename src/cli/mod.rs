//! Command-line interface module.
//!
//! This module handles:
//! - Argument parsing via clap
//! - The frame loop that filters and renders a capture

mod args;
mod dump;

pub use args::Args;
pub use dump::{DumpOptions, DumpStats, FrameDumper, HostFilter};
