// SPDX-FileCopyrightText: 2026 roombook contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::{ArgMatches, Command, ValueEnum, ValueHint, arg, value_parser};
use clap_complete::Shell as BuiltinShell;
use clap_complete_nushell::Nushell;
use roombook_core::APP_NAME;

use crate::Cli;

/// Prints or writes the completion script of the `roombook` command.
#[derive(Debug, Clone)]
pub struct CmdGenerateCompletion {
    pub shell: Shell,
    pub output: Option<PathBuf>,
}

impl CmdGenerateCompletion {
    pub const NAME: &str = "generate-completion";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("completion")
            .about("Print the shell completion script for roombook")
            .hide(true)
            .arg(arg!(shell: <SHELL> "Shell to complete for").value_parser(value_parser!(Shell)))
            .arg(
                arg!(-o --output <FILE> "Write the script to FILE instead of stdout")
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            shell: matches
                .get_one::<Shell>("shell")
                .copied()
                .ok_or("Shell is required")?,
            output: matches.get_one("output").cloned(),
        })
    }

    pub fn run(self) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "generating shell completion...");
        match &self.output {
            Some(path) => {
                let mut file = File::create(path)
                    .map_err(|e| format!("Failed to create {}: {e}", path.display()))?;
                self.shell.write_script(&mut file);
                file.flush()?;
                tracing::info!(path = %path.display(), shell = ?self.shell, "completion written");
            }
            None => self.shell.write_script(&mut io::stdout()),
        }
        Ok(())
    }
}

/// Shells with a completion generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    Bash,
    Elvish,
    Fish,
    Nushell,
    #[value(name = "powershell")]
    #[allow(clippy::enum_variant_names)]
    PowerShell,
    Zsh,
}

impl Shell {
    /// The `clap_complete` generator, `None` for shells served by another crate.
    fn builtin(self) -> Option<BuiltinShell> {
        match self {
            Shell::Bash => Some(BuiltinShell::Bash),
            Shell::Elvish => Some(BuiltinShell::Elvish),
            Shell::Fish => Some(BuiltinShell::Fish),
            Shell::PowerShell => Some(BuiltinShell::PowerShell),
            Shell::Zsh => Some(BuiltinShell::Zsh),
            Shell::Nushell => None,
        }
    }

    pub fn write_script(self, buf: &mut dyn Write) {
        let mut cmd = Cli::command();
        match self.builtin() {
            Some(shell) => clap_complete::generate(shell, &mut cmd, APP_NAME, buf),
            None => clap_complete::generate(Nushell {}, &mut cmd, APP_NAME, buf),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn script(shell: Shell) -> String {
        let mut buf = Vec::new();
        shell.write_script(&mut buf);
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn parses_through_the_root_command() {
        let cli = Cli::command()
            .try_get_matches_from(["roombook", "completion", "powershell", "-o", "rb.ps1"])
            .unwrap();
        let (_, matches) = cli.subcommand().unwrap();
        let parsed = CmdGenerateCompletion::from(matches).unwrap();
        assert_eq!(parsed.shell, Shell::PowerShell);
        assert_eq!(parsed.output, Some(PathBuf::from("rb.ps1")));

        assert!(
            Cli::command()
                .try_get_matches_from(["roombook", "generate-completion", "tcsh"])
                .is_err()
        );
    }

    #[test]
    fn every_shell_completes_roombook_commands() {
        for shell in Shell::value_variants() {
            let script = script(*shell);
            assert!(script.contains(APP_NAME), "{shell:?} misses the binary name");
            for sub in ["book", "cancel", "chaos", "availability"] {
                assert!(script.contains(sub), "{shell:?} misses `{sub}`");
            }
        }
    }

    #[test]
    fn writes_script_to_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("roombook.fish");
        let cmd = CmdGenerateCompletion {
            shell: Shell::Fish,
            output: Some(path.clone()),
        };
        cmd.run().unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, script(Shell::Fish));
    }
}
