use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// remote-sync - pull and push databases and storage files between environments
#[derive(Parser, Debug)]
#[command(name = "remote-sync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output NDJSON events for CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (default: ./remote-sync.toml, then the user config)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Skip confirmation prompts (mirror-deletion pushes still ask)
    #[arg(short, long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Copy the remote database and/or storage files to the local environment
    Pull(PullArgs),

    /// Copy the local database and/or storage files to a remote
    Push(PushArgs),

    /// Delete old snapshots, keeping the most recent ones
    CleanupSnapshots(CleanupArgs),

    /// List configured remotes
    Remotes,
}

/// Options shared by pull and push
#[derive(Args, Debug, Clone, Default)]
pub struct TransferArgs {
    /// Remote name (default: the configured default remote)
    pub remote: Option<String>,

    /// Sync the database
    #[arg(long)]
    pub database: bool,

    /// Sync storage files
    #[arg(long)]
    pub files: bool,

    /// Storage-relative path to sync (repeatable; default: configured paths)
    #[arg(long = "path", value_name = "PATH")]
    pub paths: Vec<String>,

    /// Remove destination files missing from the source
    #[arg(long)]
    pub delete: bool,

    /// Preview file changes without transferring
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct PullArgs {
    #[command(flatten)]
    pub transfer: TransferArgs,

    /// Drop local tables before loading a snapshot of every table
    #[arg(long)]
    pub full: bool,

    /// Skip the local database backup taken before loading
    #[arg(long)]
    pub no_backup: bool,

    /// Keep the downloaded snapshot file
    #[arg(long)]
    pub keep_snapshot: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct PushArgs {
    #[command(flatten)]
    pub transfer: TransferArgs,
}

#[derive(Args, Debug, Clone, Default)]
pub struct CleanupArgs {
    /// Remote whose snapshots are cleaned (default: the configured default remote)
    #[arg(value_name = "REMOTE")]
    pub remote_name: Option<String>,

    /// Clean local snapshots
    #[arg(long)]
    pub local: bool,

    /// Clean remote snapshots
    #[arg(long)]
    pub remote: bool,

    /// Number of most recent snapshots to keep (default: from config)
    #[arg(long)]
    pub keep: Option<usize>,

    /// Show what would be deleted without deleting
    #[arg(long)]
    pub dry_run: bool,
}
