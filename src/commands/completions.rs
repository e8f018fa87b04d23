//! Shell completions command

use std::io;

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::Cli;

/// Write the completion script for `shell` to stdout
pub fn run(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, bin_name, &mut io::stdout());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completions_cover_subcommands() {
        let mut cmd = Cli::command();
        let mut buffer = Vec::new();
        clap_complete::generate(Shell::Bash, &mut cmd, "zonemap", &mut buffer);

        let script = String::from_utf8(buffer).unwrap();
        for subcommand in ["resolve", "assign", "classify", "suggest", "config"] {
            assert!(script.contains(subcommand), "missing {subcommand}");
        }
    }
}
