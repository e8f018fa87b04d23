//! zonemap - match zone requirements to building model spaces
//!
//! Reads the zone requirements extracted from project documents and the
//! spaces of a building model, and writes the match report and placement
//! stubs for the equipment-placement step.

mod cli;
mod commands;
mod config;
mod output;

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};
use crate::config::RuntimeContext;

fn main() -> ExitCode {
    match try_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let _ = writeln!(io::stderr(), "Error: {err:#}");
            ExitCode::from(1)
        }
    }
}

fn try_main() -> Result<()> {
    let cli = Cli::parse();

    // Completions need neither config nor logging
    if let Command::Completions { shell } = cli.command {
        return commands::completions::run(shell);
    }

    let ctx = RuntimeContext::new(&cli.global)?;
    ctx.init_logging()?;

    log::debug!("Config loaded from: {:?}", ctx.config_path());

    run_command(&ctx, cli.command)
}

fn run_command(ctx: &RuntimeContext, command: Command) -> Result<()> {
    match command {
        Command::Resolve(cmd) => commands::resolve::run(ctx, cmd),
        Command::Assign(cmd) => commands::assign::run(ctx, cmd),
        Command::Classify {
            names,
            requirements,
        } => commands::classify::run(ctx, &names, requirements.as_deref()),
        Command::Suggest {
            name,
            candidates,
            cutoff,
        } => commands::suggest::run(ctx, &name, &candidates, cutoff),
        Command::Config { command } => commands::config::run(ctx, command),
        Command::Completions { shell } => commands::completions::run(shell),
    }
}
