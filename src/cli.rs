//! CLI argument parsing.
//!
//! The surface is a single script path; everything else is derived from it.
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "parse2docs",
    version,
    about = "Generate Markdown usage documentation from a script's argument definition"
)]
pub struct Args {
    /// Path to the script file containing the argument definition
    pub file_path: PathBuf,
}
