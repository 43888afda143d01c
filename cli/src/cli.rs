// SPDX-FileCopyrightText: 2026 roombook contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, ffi::OsString, io, path::PathBuf};

use clap::{ArgMatches, Command, ValueHint, arg, builder::styling, crate_version, value_parser};
use colored::Colorize;
use futures::{FutureExt, future::BoxFuture};
use roombook_core::APP_NAME;
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::cmd_account::{CmdLogin, CmdLogout, CmdRegister};
use crate::cmd_booking::{CmdBook, CmdBookingList, CmdCancel};
use crate::cmd_generate_completion::CmdGenerateCompletion;
use crate::cmd_room::{CmdAvailability, CmdRoomList};
use crate::cmd_session::{CmdChaos, CmdTheme};
use crate::config::parse_config;

/// Run the roombook command-line interface.
pub async fn run() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    match Cli::parse() {
        Ok(cli) => {
            if let Err(e) = cli.run().await {
                println!("{} {}", "Error:".red(), e);
            }
        }
        Err(e) => println!("{} {}", "Error:".red(), e),
    };
    Ok(())
}

/// Command-line interface
#[derive(Debug)]
pub struct Cli {
    /// Path to the configuration file
    pub config: Option<PathBuf>,

    /// The command to execute
    pub command: Commands,
}

impl Cli {
    /// Create the command-line interface
    pub fn command() -> Command {
        const STYLES: styling::Styles = styling::Styles::styled()
            .header(styling::AnsiColor::Green.on_default().bold())
            .usage(styling::AnsiColor::Green.on_default().bold())
            .literal(styling::AnsiColor::Blue.on_default().bold())
            .placeholder(styling::AnsiColor::Cyan.on_default());

        Command::new(APP_NAME)
            .about("Browse, check and book library rooms from the terminal.")
            .version(crate_version!())
            .styles(STYLES)
            .subcommand_required(false) // allow default to rooms
            .arg_required_else_help(false)
            .arg(
                arg!(-c --config [CONFIG] "Path to the configuration file")
                    .long_help(
                        "\
Path to the configuration file. Defaults to $XDG_CONFIG_HOME/roombook/config.toml on Linux and MacOS, \
%APPDATA%/roombook/config.toml on Windows.",
                    )
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
            .subcommand(CmdRoomList::command())
            .subcommand(CmdAvailability::command())
            .subcommand(CmdBook::command())
            .subcommand(CmdBookingList::command())
            .subcommand(CmdCancel::command())
            .subcommand(CmdLogin::command())
            .subcommand(CmdRegister::command())
            .subcommand(CmdLogout::command())
            .subcommand(CmdTheme::command())
            .subcommand(CmdChaos::command())
            .subcommand(CmdGenerateCompletion::command())
    }

    /// Parse the command-line arguments
    pub fn parse() -> Result<Self, Box<dyn Error>> {
        let commands = Self::command();
        let matches = commands.get_matches();
        Self::from(matches)
    }

    /// Parse the specified arguments
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, Box<dyn Error>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let commands = Self::command();
        let matches = commands.try_get_matches_from(args)?;
        Self::from(matches)
    }

    /// Create a CLI instance from the `ArgMatches`
    pub fn from(matches: ArgMatches) -> Result<Self, Box<dyn Error>> {
        use Commands::*;
        let command = match matches.subcommand() {
            Some((CmdRoomList::NAME, matches)) => Rooms(CmdRoomList::from(matches)),
            Some((CmdAvailability::NAME, matches)) => {
                Availability(CmdAvailability::from(matches))
            }
            Some((CmdBook::NAME, matches)) => Book(CmdBook::from(matches)?),
            Some((CmdBookingList::NAME, matches)) => Bookings(CmdBookingList::from(matches)),
            Some((CmdCancel::NAME, matches)) => Cancel(CmdCancel::from(matches)),
            Some((CmdLogin::NAME, matches)) => Login(CmdLogin::from(matches)?),
            Some((CmdRegister::NAME, matches)) => Register(CmdRegister::from(matches)?),
            Some((CmdLogout::NAME, matches)) => Logout(CmdLogout::from(matches)),
            Some((CmdTheme::NAME, matches)) => Theme(CmdTheme::from(matches)),
            Some((CmdChaos::NAME, matches)) => Chaos(CmdChaos::from(matches)),
            Some((CmdGenerateCompletion::NAME, matches)) => {
                GenerateCompletion(CmdGenerateCompletion::from(matches)?)
            }
            None => Rooms(CmdRoomList::new()),
            Some((name, _)) => return Err(format!("Unknown command: {name}").into()),
        };

        let config = matches.get_one("config").cloned();
        Ok(Cli { config, command })
    }

    /// Run the command
    pub async fn run(self) -> Result<(), Box<dyn Error>> {
        self.command.run(self.config).await
    }
}

/// The commands available in the CLI
#[derive(Debug, Clone)]
pub enum Commands {
    /// List rooms
    Rooms(CmdRoomList),

    /// Show the booked ranges of a room
    Availability(CmdAvailability),

    /// Book a room
    Book(CmdBook),

    /// List the user's bookings
    Bookings(CmdBookingList),

    /// Cancel bookings
    Cancel(CmdCancel),

    /// Sign in
    Login(CmdLogin),

    /// Create an account
    Register(CmdRegister),

    /// Sign out
    Logout(CmdLogout),

    /// Set or switch the theme
    Theme(CmdTheme),

    /// Set or switch chaos mode
    Chaos(CmdChaos),

    /// Generate shell completion
    GenerateCompletion(CmdGenerateCompletion),
}

impl Commands {
    /// Run the command with the given configuration
    #[rustfmt::skip]
    pub async fn run(self, config: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
        use Commands::*;
        match self {
            Rooms(a)        => Self::run_with(config, |x| a.run(x).boxed()).await,
            Availability(a) => Self::run_with(config, |x| a.run(x).boxed()).await,
            Book(a)         => Self::run_with(config, |x| a.run(x).boxed()).await,
            Bookings(a)     => Self::run_with(config, |x| a.run(x).boxed()).await,
            Cancel(a)       => Self::run_with(config, |x| a.run(x).boxed()).await,
            Login(a)        => Self::run_with(config, |x| a.run(x).boxed()).await,
            Register(a)     => Self::run_with(config, |x| a.run(x).boxed()).await,
            Logout(a)       => Self::run_with(config, |x| a.run(x).boxed()).await,
            Theme(a)        => Self::run_with(config, |x| a.run(x).boxed()).await,
            Chaos(a)        => Self::run_with(config, |x| a.run(x).boxed()).await,
            GenerateCompletion(a) => a.run(),
        }
    }

    async fn run_with<F>(config: Option<PathBuf>, f: F) -> Result<(), Box<dyn Error>>
    where
        F: for<'a> FnOnce(&'a mut App) -> BoxFuture<'a, Result<(), Box<dyn Error>>>,
    {
        tracing::debug!("parsing configuration...");
        let (core_config, api_config) = parse_config(config).await?;
        let mut app = App::new(core_config, api_config).await?;

        let result = f(&mut app).await;

        // Keep session changes made before a failure, such as the selected room.
        app.close().await?;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd_generate_completion::Shell;
    use crate::util::OutputFormat;
    use roombook_core::{BookingId, RoomId, RoomType, Theme as SessionTheme};

    #[test]
    fn test_parse_config() {
        let cli = Cli::try_parse_from(vec!["test", "-c", "/tmp/config.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/config.toml")));
        assert!(matches!(cli.command, Commands::Rooms(_)));
    }

    #[test]
    fn test_parse_default_rooms() {
        let cli = Cli::try_parse_from(vec!["test"]).unwrap();
        match cli.command {
            Commands::Rooms(cmd) => {
                assert_eq!(cmd.kind, None);
                assert_eq!(cmd.page, 1);
            }
            _ => panic!("Expected Rooms command"),
        }
    }

    #[test]
    fn test_parse_rooms() {
        let args = vec!["test", "rooms", "-t", "C", "-p", "2", "--output-format", "json"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::Rooms(cmd) => {
                assert_eq!(cmd.kind, Some(RoomType::C));
                assert_eq!(cmd.page, 2);
                assert_eq!(cmd.output_format, OutputFormat::Json);
            }
            _ => panic!("Expected Rooms command"),
        }
    }

    #[test]
    fn test_parse_rooms_alias() {
        let cli = Cli::try_parse_from(vec!["test", "ls"]).unwrap();
        assert!(matches!(cli.command, Commands::Rooms(_)));
    }

    #[test]
    fn test_parse_availability() {
        let cli = Cli::try_parse_from(vec!["test", "availability", "4", "-d", "tomorrow"]).unwrap();
        match cli.command {
            Commands::Availability(cmd) => {
                assert_eq!(cmd.room, Some(RoomId(4)));
                assert_eq!(cmd.date.as_deref(), Some("tomorrow"));
            }
            _ => panic!("Expected Availability command"),
        }
    }

    #[test]
    fn test_parse_book() {
        let args = vec![
            "test",
            "book",
            "7",
            "--start",
            "2025-03-10T09:00",
            "--end",
            "2025-03-10T10:00",
            "--attendees",
            "1",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::Book(cmd) => {
                assert_eq!(cmd.room, RoomId(7));
                assert_eq!(cmd.attendees.as_deref(), Some("1"));
            }
            _ => panic!("Expected Book command"),
        }
    }

    #[test]
    fn test_parse_bookings() {
        let cli = Cli::try_parse_from(vec!["test", "bookings"]).unwrap();
        assert!(matches!(cli.command, Commands::Bookings(_)));
    }

    #[test]
    fn test_parse_cancel() {
        let cli = Cli::try_parse_from(vec!["test", "cancel", "1", "2"]).unwrap();
        match cli.command {
            Commands::Cancel(cmd) => assert_eq!(cmd.ids, vec![BookingId(1), BookingId(2)]),
            _ => panic!("Expected Cancel command"),
        }
    }

    #[test]
    fn test_parse_account_commands() {
        let cli = Cli::try_parse_from(vec!["test", "login", "a@b.c", "-p", "pw"]).unwrap();
        assert!(matches!(cli.command, Commands::Login(_)));

        let args = vec!["test", "register", "-n", "A", "-e", "a@b.c", "-p", "pw"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(matches!(cli.command, Commands::Register(_)));

        let cli = Cli::try_parse_from(vec!["test", "logout"]).unwrap();
        assert!(matches!(cli.command, Commands::Logout(_)));
    }

    #[test]
    fn test_parse_session_commands() {
        let cli = Cli::try_parse_from(vec!["test", "theme", "light"]).unwrap();
        match cli.command {
            Commands::Theme(cmd) => assert_eq!(cmd.theme, Some(SessionTheme::Light)),
            _ => panic!("Expected Theme command"),
        }

        let cli = Cli::try_parse_from(vec!["test", "chaos", "on"]).unwrap();
        match cli.command {
            Commands::Chaos(cmd) => assert_eq!(cmd.enabled, Some(true)),
            _ => panic!("Expected Chaos command"),
        }
    }

    #[test]
    fn test_parse_generate_completions() {
        let args = vec!["test", "generate-completion", "zsh"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::GenerateCompletion(cmd) => {
                assert_eq!(cmd.shell, Shell::Zsh);
            }
            _ => panic!("Expected GenerateCompletion command"),
        }
    }

    #[test]
    fn test_unknown_command_fails() {
        assert!(Cli::try_parse_from(vec!["test", "dashboard"]).is_err());
    }
}
