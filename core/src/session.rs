// SPDX-FileCopyrightText: 2026 roombook contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::fmt;
use std::path::Path;

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::room::RoomId;

/// File name of the persisted session inside the state directory.
pub const SESSION_FILE: &str = "session.toml";

#[cfg(unix)]
const SESSION_FILE_MODE: u32 = 0o600;

const JWT_PAYLOAD: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Colour theme of the terminal output.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light background.
    #[default]
    Light,
    /// Dark background.
    Dark,
}

impl Theme {
    /// The other theme.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        })
    }
}

/// Client state kept between invocations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Session {
    /// Access token of the signed-in user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Output theme.
    pub theme: Theme,

    /// Whether requests are tagged for fault injection.
    pub chaos_mode: bool,

    /// The room last looked at.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_room: Option<RoomId>,
}

impl Session {
    /// Loads the session stored at `path`, or a fresh one if there is none.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load(path: &Path) -> Result<Self, Box<dyn Error>> {
        if !fs::try_exists(path).await? {
            tracing::debug!(path = %path.display(), "no session file, starting fresh");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .await
            .map_err(|e| format!("Failed to read session at {}: {e}", path.display()))?;
        let session = toml::from_str(&content)
            .map_err(|e| format!("Failed to parse session at {}: {e}", path.display()))?;
        Ok(session)
    }

    /// Writes the session to `path`, creating parent directories.
    ///
    /// On unix the file is readable by its owner only, as it holds the token.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub async fn save(&self, path: &Path) -> Result<(), Box<dyn Error>> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let content = toml::to_string(self)?;

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(SESSION_FILE_MODE);
        let mut file = options.open(path).await?;
        // Files written before the mode was set keep their permissions otherwise.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(std::fs::Permissions::from_mode(SESSION_FILE_MODE))
                .await?;
        }
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;

        tracing::debug!(path = %path.display(), "session saved");
        Ok(())
    }

    /// Stores the token of a successful login.
    pub fn login(&mut self, token: String) {
        self.token = Some(token);
    }

    /// Forgets the token.
    pub fn logout(&mut self) {
        self.token = None;
    }

    /// Whether a token is present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// The id of the signed-in user, read from the token.
    #[must_use]
    pub fn user_id(&self) -> Option<i64> {
        self.token.as_deref().and_then(decode_user_id)
    }

    /// Switches between light and dark theme and returns the new one.
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }
}

#[derive(Deserialize)]
struct Claims {
    sub: Option<serde_json::Value>,
}

/// Reads the numeric `sub` claim of a JWT without verifying it.
///
/// Returns `None` for anything that is not a token with such a claim.
#[must_use]
pub fn decode_user_id(token: &str) -> Option<i64> {
    let payload = token.split('.').nth(1)?;
    let bytes = JWT_PAYLOAD.decode(payload).ok()?;
    let claims: Claims = serde_json::from_slice(&bytes).ok()?;
    match claims.sub? {
        serde_json::Value::String(sub) => sub.trim().parse().ok(),
        serde_json::Value::Number(sub) => sub.as_i64(),
        _ => None,
    }
}
