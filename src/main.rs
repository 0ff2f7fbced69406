//! remote-sync CLI - database and storage sync with remote environments
//!
//! Usage: remote-sync <COMMAND>
//!
//! Commands:
//!   pull               Copy the remote database and/or files to local
//!   push               Copy the local database and/or files to a remote
//!   cleanup-snapshots  Delete old snapshots, keeping the most recent ones
//!   remotes            List configured remotes

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod ui;

use cli::{Cli, Commands};
use commands::CommandContext;
use remote_sync::domain::value_objects::Direction;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ui::error::print_error(&e, cli.json);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Remotes => {
            let ctx = CommandContext::load(cli)?;
            commands::remotes::cmd_remotes(&ctx)
        }
        Commands::Pull(args) => {
            let ctx = CommandContext::load(cli)?;
            commands::sync::cmd_sync(
                &ctx,
                Direction::Pull,
                &args.transfer,
                &commands::sync::DatabaseOptions {
                    full: args.full,
                    backup: !args.no_backup,
                    keep_snapshot: args.keep_snapshot,
                },
            )
        }
        Commands::Push(args) => {
            let ctx = CommandContext::load(cli)?;
            commands::sync::cmd_sync(
                &ctx,
                Direction::Push,
                &args.transfer,
                &commands::sync::DatabaseOptions::default(),
            )
        }
        Commands::CleanupSnapshots(args) => {
            let ctx = CommandContext::load(cli)?;
            commands::cleanup::cmd_cleanup(&ctx, args)
        }
    }
}

/// `RUST_LOG` wins; otherwise `-v` is debug, `-vv` trace, default warn
fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
