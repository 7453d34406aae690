//! CLI parse: clap types for graphbatch. No behavior; definitions only.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// graphbatch - submit and track bulk graph operations
#[derive(Parser)]
#[command(name = "graphbatch")]
#[command(about = "Submit and track bulk graph operations (delete, chgrp, chown, chmod, disk usage)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory (for config/config.toml)
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging
    #[arg(long)]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Targets and the options that shape the submitted request.
#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    /// Objects as Type[/Type...]:id[,id...], e.g. Image:1,2 or Project/Dataset:5
    #[arg(required = true)]
    pub targets: Vec<String>,

    /// Child types to include (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub include: Vec<String>,

    /// Child types to exclude (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Submit targets separately and in order instead of combining them
    #[arg(long)]
    pub ordered: bool,

    /// Ask the server what would happen without changing anything
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args, Debug, Clone)]
pub struct SubmitArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Seconds to wait: negative waits until done (Ctrl+C cancels), 0 returns at once
    #[arg(long, allow_negative_numbers = true)]
    pub wait: Option<i64>,

    /// Print steps, timing, flags and affected object counts
    #[arg(long)]
    pub report: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Delete objects and what they own
    Delete {
        #[command(flatten)]
        args: SubmitArgs,
    },
    /// Move objects into another group
    Chgrp {
        /// Target group id
        #[arg(long)]
        group: u64,
        #[command(flatten)]
        args: SubmitArgs,
    },
    /// Give objects to another user
    Chown {
        /// Target user id
        #[arg(long)]
        user: u64,
        #[command(flatten)]
        args: SubmitArgs,
    },
    /// Change group permissions
    Chmod {
        /// Permissions string, e.g. rwr---
        #[arg(long)]
        perms: String,
        #[command(flatten)]
        args: SubmitArgs,
    },
    /// Report disk usage of objects
    DiskUsage {
        #[command(flatten)]
        args: SubmitArgs,
    },
    /// Show the requests that would be submitted, without submitting
    Plan {
        #[command(flatten)]
        target: TargetArgs,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}
