//! Shell completion generation command.
//!
//! Generates shell completion scripts for bash, zsh, fish, and `PowerShell`.

use anyhow::Result;
use clap::Command;
use clap_complete::{Shell, generate};
use sdkgen_core::cli::ExitCode;
use std::io::{self, Write};
use tracing::debug;

/// Writes the completion script for `shell` to `out`.
///
/// # Examples
///
/// ```
/// use clap::Command;
/// use clap_complete::Shell;
/// use sdkgen_cli::commands::completions;
///
/// let mut buf = Vec::new();
/// completions::write_completions(Shell::Bash, &mut Command::new("sdkgen"), &mut buf);
/// assert!(!buf.is_empty());
/// ```
pub fn write_completions(shell: Shell, cmd: &mut Command, out: &mut dyn Write) {
    let name = cmd.get_name().to_string();
    generate(shell, cmd, name, out);
}

/// Runs the completions command, printing the script to stdout.
pub async fn run(shell: Shell, cmd: &mut Command) -> Result<ExitCode> {
    debug!("Generating {shell} completions");
    write_completions(shell, cmd, &mut io::stdout());
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::CommandFactory;

    fn script(shell: Shell) -> String {
        let mut buf = Vec::new();
        write_completions(shell, &mut Cli::command(), &mut buf);
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_bash_completions_mention_subcommands() {
        let bash = script(Shell::Bash);
        assert!(bash.contains("sdkgen"));
        assert!(bash.contains("generate"));
        assert!(bash.contains("--sdk-version"));
    }

    #[test]
    fn test_other_shells() {
        for shell in [Shell::Zsh, Shell::Fish, Shell::PowerShell, Shell::Elvish] {
            assert!(!script(shell).is_empty(), "{shell} produced nothing");
        }
    }

    #[tokio::test]
    async fn test_run() {
        let mut cmd = Command::new("test-cli");
        assert_eq!(run(Shell::Bash, &mut cmd).await.unwrap(), ExitCode::SUCCESS);
    }
}
