// SPDX-FileCopyrightText: 2026 roombook contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::path::PathBuf;

use roombook_api::{ApiConfig, BookingClient};
use roombook_core::{Config as CoreConfig, Session};

use crate::util::Palette;

/// Everything a command needs: configuration, the stored session and a way to reach the API.
#[derive(Debug)]
pub struct App {
    pub config: CoreConfig,
    pub session: Session,
    api: ApiConfig,
    session_path: Option<PathBuf>,
    loaded: Session,
}

impl App {
    pub async fn new(config: CoreConfig, api: ApiConfig) -> Result<Self, Box<dyn Error>> {
        let session_path = config.session_path();
        let session = match &session_path {
            Some(path) => Session::load(path).await?,
            None => {
                tracing::warn!("no state directory, the session will not be kept");
                Session::default()
            }
        };

        Ok(Self {
            config,
            loaded: session.clone(),
            session,
            api,
            session_path,
        })
    }

    /// An API client carrying the session's token and chaos flag.
    pub fn client(&self) -> Result<BookingClient, Box<dyn Error>> {
        let client = BookingClient::new(self.api.clone())?.with_chaos(self.session.chaos_mode);
        Ok(match &self.session.token {
            Some(token) => client.with_token(token.clone()),
            None => client,
        })
    }

    /// The signed-in user, or an error asking to log in.
    pub fn user_id(&self) -> Result<i64, Box<dyn Error>> {
        if !self.session.is_authenticated() {
            return Err("Please log in first".into());
        }
        self.session
            .user_id()
            .ok_or_else(|| "The stored session is invalid, please log in again".into())
    }

    pub fn palette(&self) -> Palette {
        self.session.theme.into()
    }

    /// Persists the session if a command changed it.
    pub async fn close(self) -> Result<(), Box<dyn Error>> {
        match &self.session_path {
            Some(path) if self.session != self.loaded => self.session.save(path).await,
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roombook_core::{SESSION_FILE, Theme};
    use tempfile::TempDir;

    fn config(dir: &TempDir) -> CoreConfig {
        CoreConfig {
            state_dir: Some(dir.path().to_path_buf()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn saves_only_changed_sessions() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(SESSION_FILE);

        let app = App::new(config(&dir), ApiConfig::default()).await.unwrap();
        app.close().await.unwrap();
        assert!(!path.exists());

        let mut app = App::new(config(&dir), ApiConfig::default()).await.unwrap();
        app.session.toggle_theme();
        app.close().await.unwrap();

        let app = App::new(config(&dir), ApiConfig::default()).await.unwrap();
        assert_eq!(app.session.theme, Theme::Dark);
    }

    #[tokio::test]
    async fn user_id_requires_login() {
        let dir = TempDir::new().unwrap();
        let mut app = App::new(config(&dir), ApiConfig::default()).await.unwrap();
        assert_eq!(app.user_id().unwrap_err().to_string(), "Please log in first");

        app.session.login("garbage".to_string());
        assert!(app.user_id().is_err());
        assert!(app.client().is_ok());
    }
}
