// SPDX-FileCopyrightText: 2026 roombook contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command, arg};
use colored::Colorize;
use roombook_api::{BookingClient, NewUser};

use crate::app::App;
use crate::util::api_error;

#[derive(Clone)]
pub struct CmdLogin {
    pub email: String,
    pub password: String,
}

impl CmdLogin {
    pub const NAME: &str = "login";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Sign in and keep the access token")
            .arg(arg!(email: <EMAIL> "Email of your account"))
            .arg(arg!(-p --password <PASSWORD> "Password of your account").required(true))
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            email: matches
                .get_one::<String>("email")
                .cloned()
                .ok_or("Email is required")?,
            password: matches
                .get_one::<String>("password")
                .cloned()
                .ok_or("Password is required")?,
        })
    }

    pub async fn run(self, app: &mut App) -> Result<(), Box<dyn Error>> {
        tracing::debug!(email = %self.email, "logging in...");
        let client = app.client()?;
        login(app, &client, &self.email, &self.password).await
    }
}

// The password stays out of logs.
impl std::fmt::Debug for CmdLogin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CmdLogin")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

#[derive(Clone)]
pub struct CmdRegister {
    pub user: NewUser,
}

impl CmdRegister {
    pub const NAME: &str = "register";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Create an account and sign in")
            .arg(arg!(-n --name <NAME> "Your display name").required(true))
            .arg(arg!(-e --email <EMAIL> "Email to sign in with").required(true))
            .arg(arg!(-p --password <PASSWORD> "Password to sign in with").required(true))
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        let get = |id: &str| -> Result<String, Box<dyn Error>> {
            matches
                .get_one::<String>(id)
                .cloned()
                .ok_or_else(|| format!("{id} is required").into())
        };
        Ok(Self {
            user: NewUser {
                name: get("name")?,
                email: get("email")?,
                password: get("password")?,
            },
        })
    }

    pub async fn run(self, app: &mut App) -> Result<(), Box<dyn Error>> {
        tracing::debug!(email = %self.user.email, "registering...");
        let client = app.client()?;
        let user = client
            .register(&self.user)
            .await
            .map_err(api_error("Registration failed. Please try again."))?;
        println!(
            "{} {} <{}>",
            "Registered".color(app.palette().good),
            user.name,
            user.email
        );

        login(app, &client, &self.user.email, &self.user.password).await
    }
}

impl std::fmt::Debug for CmdRegister {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CmdRegister")
            .field("name", &self.user.name)
            .field("email", &self.user.email)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CmdLogout;

impl CmdLogout {
    pub const NAME: &str = "logout";

    pub fn command() -> Command {
        Command::new(Self::NAME).about("Forget the stored access token")
    }

    pub fn from(_matches: &ArgMatches) -> Self {
        Self
    }

    pub async fn run(self, app: &mut App) -> Result<(), Box<dyn Error>> {
        tracing::debug!("logging out...");
        match app.session.is_authenticated() {
            true => {
                app.session.logout();
                println!("Logged out");
            }
            false => println!("Not logged in"),
        }
        Ok(())
    }
}

async fn login(
    app: &mut App,
    client: &BookingClient,
    email: &str,
    password: &str,
) -> Result<(), Box<dyn Error>> {
    let token = client
        .authenticate(email, password)
        .await
        .map_err(api_error("Login failed. Please check your credentials."))?;
    app.session.login(token.access_token);

    let palette = app.palette();
    match app.session.user_id() {
        Some(id) => println!("{} as user {id}", "Logged in".color(palette.good)),
        None => {
            tracing::warn!("token carries no user id");
            println!("{}", "Logged in".color(palette.good));
        }
    }
    Ok(())
}
