// SPDX-FileCopyrightText: 2026 roombook contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::builder::BoolishValueParser;
use clap::{ArgMatches, Command, arg, value_parser};
use colored::Colorize;
use roombook_core::Theme;

use crate::app::App;

#[derive(Debug, Clone, Copy)]
pub struct CmdTheme {
    pub theme: Option<Theme>,
}

impl CmdTheme {
    pub const NAME: &str = "theme";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Set the colour theme, or switch it when none is given")
            .arg(arg!(theme: [THEME] "Theme to use").value_parser(value_parser!(Theme)))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            theme: matches.get_one("theme").copied(),
        }
    }

    pub async fn run(self, app: &mut App) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "changing theme...");
        let theme = match self.theme {
            Some(theme) => {
                app.session.theme = theme;
                theme
            }
            None => app.session.toggle_theme(),
        };
        println!("Theme: {}", theme.to_string().color(app.palette().accent));
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CmdChaos {
    pub enabled: Option<bool>,
}

impl CmdChaos {
    pub const NAME: &str = "chaos";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Tag requests for fault injection by the server")
            .arg(
                arg!(state: [STATE] "on or off, switches when omitted")
                    .value_parser(BoolishValueParser::new()),
            )
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            enabled: matches.get_one("state").copied(),
        }
    }

    pub async fn run(self, app: &mut App) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "changing chaos mode...");
        let enabled = self.enabled.unwrap_or(!app.session.chaos_mode);
        app.session.chaos_mode = enabled;

        let palette = app.palette();
        let state = match enabled {
            true => "on".color(palette.bad),
            false => "off".color(palette.good),
        };
        println!("Chaos mode: {state}");
        Ok(())
    }
}
