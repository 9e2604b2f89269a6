//! CLI module for mkv-enhance
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::Parser;

pub mod args;
pub mod commands;

/// mkv-enhance
///
/// Adds a louder stereo downmix next to every audio track of an MKV file.
/// Original streams are kept untouched; the result is written to
/// `<name>_enhanced.mkv` unless `--output` is given.
#[derive(Parser, Debug)]
#[command(name = "mkv-enhance")]
#[command(about = "Add enhanced stereo downmixes to every audio track of an MKV file")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Input MKV file
    pub input: PathBuf,

    /// Output file path (default: <input stem>_enhanced.mkv)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Settings file (default: ./mkv_enhance.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub tools: args::ToolArgs,

    #[command(flatten)]
    pub logging: args::LogArgs,
}
