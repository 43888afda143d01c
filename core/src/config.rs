// SPDX-FileCopyrightText: 2026 roombook contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::fmt;
use std::path::{Path, PathBuf};

use jiff::SignedDuration;
use serde::de;

use crate::availability::DisplayWindow;
use crate::catalog::DEFAULT_PAGE_SIZE;
use crate::eligibility::Checker;
use crate::session::SESSION_FILE;

/// The name of the roombook application.
pub const APP_NAME: &str = "roombook";

/// Configuration of the roombook client.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    /// Directory for storing the session.
    #[serde(default)]
    pub state_dir: Option<PathBuf>,

    /// Span of the day drawn on availability timelines.
    #[serde(default)]
    pub display_window: DisplayWindow,

    /// Rooms listed per page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Longest booking accepted before submitting, `0m` to disable.
    #[serde(default = "default_max_booking_duration")]
    pub max_booking_duration: ConfigDuration,
}

impl Config {
    /// Normalize the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the state directory cannot be resolved.
    pub fn normalize(&mut self) -> Result<(), Box<dyn Error>> {
        match &self.state_dir {
            Some(a) => {
                self.state_dir = Some(
                    expand_path(a)
                        .map_err(|e| format!("Failed to expand state directory path: {e}"))?,
                );
            }

            None => match get_state_dir() {
                Ok(a) => self.state_dir = Some(a.join(APP_NAME)),
                Err(e) => tracing::warn!("Failed to get state directory: {e}"),
            },
        }

        if self.page_size == 0 {
            tracing::warn!("page_size must be positive, using {DEFAULT_PAGE_SIZE}");
            self.page_size = DEFAULT_PAGE_SIZE;
        }

        Ok(())
    }

    /// Where the session is stored, if a state directory is known.
    #[must_use]
    pub fn session_path(&self) -> Option<PathBuf> {
        self.state_dir.as_ref().map(|dir| dir.join(SESSION_FILE))
    }

    /// The eligibility checker matching this configuration.
    #[must_use]
    pub fn checker(&self) -> Checker {
        Checker::default().with_max_duration(self.max_booking_duration.0)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            state_dir: None,
            display_window: DisplayWindow::default(),
            page_size: default_page_size(),
            max_booking_duration: default_max_booking_duration(),
        }
    }
}

const fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

const fn default_max_booking_duration() -> ConfigDuration {
    ConfigDuration(SignedDuration::from_hours(4))
}

/// A duration written as `HH:MM`, `1d`, `4h`, `90m` or `1800s`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigDuration(pub SignedDuration);

impl<'de> serde::Deserialize<'de> for ConfigDuration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct DurationVisitor;

        impl de::Visitor<'_> for DurationVisitor {
            type Value = ConfigDuration;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter
                    .write_str(r#"a duration string like "HH:MM", "1d", "4h", "90m", or "1800s""#)
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                parse_duration(value)
                    .map(ConfigDuration)
                    .map_err(|e| de::Error::custom(e.to_string()))
            }
        }

        deserializer.deserialize_str(DurationVisitor)
    }
}

/// Handle tilde (~) and environment variables in the path
fn expand_path(path: &Path) -> Result<PathBuf, Box<dyn Error>> {
    if path.is_absolute() {
        return Ok(path.to_owned());
    }

    let path = path.to_str().ok_or("Invalid path")?;

    let home_prefixes: &[&str] = if cfg!(unix) {
        &["~/", "$HOME/", "${HOME}/"]
    } else {
        &[r"~\", "~/", r"%UserProfile%\", r"%UserProfile%/"]
    };
    for prefix in home_prefixes {
        if let Some(stripped) = path.strip_prefix(prefix) {
            return Ok(get_home_dir()?.join(stripped));
        }
    }

    let state_prefixes: &[&str] = if cfg!(unix) {
        &["$XDG_STATE_HOME/", "${XDG_STATE_HOME}/"]
    } else {
        &[r"%LOCALAPPDATA%\", "%LOCALAPPDATA%/"]
    };
    for prefix in state_prefixes {
        if let Some(stripped) = path.strip_prefix(prefix) {
            return Ok(get_state_dir()?.join(stripped));
        }
    }

    Ok(path.into())
}

fn get_home_dir() -> Result<PathBuf, Box<dyn Error>> {
    dirs::home_dir().ok_or_else(|| "User-specific home directory not found".into())
}

fn get_state_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let state_dir = xdg::BaseDirectories::new().get_state_home();
    #[cfg(not(unix))]
    let state_dir = dirs::data_local_dir();
    state_dir.ok_or_else(|| "User-specific state directory not found".into())
}

fn parse_duration(s: &str) -> Result<SignedDuration, Box<dyn Error>> {
    let s = s.trim();
    if let Some((h, m)) = s.split_once(':') {
        let hours: i64 = h.trim().parse()?;
        let minutes: i64 = m.trim().parse()?;
        Ok(SignedDuration::from_mins(hours * 60 + minutes))
    } else if let Some(rest) = s.strip_suffix('d') {
        let days: i64 = rest.trim().parse()?;
        Ok(SignedDuration::from_hours(days * 24))
    } else if let Some(rest) = s.strip_suffix('h') {
        let hours: i64 = rest.trim().parse()?;
        Ok(SignedDuration::from_hours(hours))
    } else if let Some(rest) = s.strip_suffix('m') {
        let minutes: i64 = rest.trim().parse()?;
        Ok(SignedDuration::from_mins(minutes))
    } else if let Some(rest) = s.strip_suffix('s') {
        let seconds: i64 = rest.trim().parse()?;
        Ok(SignedDuration::from_secs(seconds))
    } else {
        Err(format!("Invalid duration format: {s}").into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_table() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.display_window, DisplayWindow::new(480, 1200));
        assert_eq!(
            config.max_booking_duration,
            ConfigDuration(SignedDuration::from_hours(4))
        );
        assert_eq!(config.state_dir, None);
    }

    #[test]
    fn test_full_table() {
        let config: Config = toml::from_str(
            r#"
state_dir = "/tmp/roombook"
page_size = 20
max_booking_duration = "02:30"
display_window = { start = "09:00", end = "18:00" }
"#,
        )
        .unwrap();
        assert_eq!(config.state_dir, Some(PathBuf::from("/tmp/roombook")));
        assert_eq!(config.page_size, 20);
        assert_eq!(config.display_window, DisplayWindow::new(540, 1080));
        assert_eq!(
            config.max_booking_duration,
            ConfigDuration(SignedDuration::from_mins(150))
        );
        assert_eq!(
            config.session_path(),
            Some(PathBuf::from("/tmp/roombook").join(SESSION_FILE))
        );
    }

    #[test]
    fn test_checker_from_config() {
        use crate::room::RoomType;

        let config = Config::default();
        let result = config.checker().check(
            &RoomType::A,
            "1",
            Some("2025-01-01T08:00"),
            Some("2025-01-01T13:00"),
        );
        assert!(!result.is_valid());

        let config: Config = toml::from_str(r#"max_booking_duration = "0m""#).unwrap();
        let result = config.checker().check(
            &RoomType::A,
            "1",
            Some("2025-01-01T08:00"),
            Some("2025-01-01T13:00"),
        );
        assert!(result.is_valid());
    }

    #[test]
    fn test_normalize_resets_page_size() {
        let mut config = Config {
            state_dir: Some(PathBuf::from("/var/lib/roombook")),
            page_size: 0,
            ..Default::default()
        };
        config.normalize().unwrap();
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.state_dir, Some(PathBuf::from("/var/lib/roombook")));
    }

    #[test]
    fn test_expand_path_home_env() {
        let home = get_home_dir().unwrap();
        let home_prefixes: &[&str] = if cfg!(unix) {
            &["~", "$HOME", "${HOME}"]
        } else {
            &[r"~", r"%UserProfile%"]
        };
        for prefix in home_prefixes {
            let result = expand_path(&PathBuf::from(format!("{prefix}/state"))).unwrap();
            assert_eq!(result, home.join("state"));
            assert!(result.is_absolute());
        }
    }

    #[test]
    fn test_expand_path_absolute_and_relative() {
        let absolute_path = PathBuf::from("/etc/roombook");
        assert_eq!(expand_path(&absolute_path).unwrap(), absolute_path);

        let relative_path = PathBuf::from("relative/path");
        assert_eq!(expand_path(&relative_path).unwrap(), relative_path);
    }

    #[test]
    fn test_parse_duration_formats() {
        assert_eq!(parse_duration("01:30").unwrap(), SignedDuration::from_mins(90));
        assert_eq!(parse_duration("1d").unwrap(), SignedDuration::from_hours(24));
        assert_eq!(parse_duration("4h").unwrap(), SignedDuration::from_hours(4));
        assert_eq!(parse_duration("45m").unwrap(), SignedDuration::from_mins(45));
        assert_eq!(parse_duration("1800s").unwrap(), SignedDuration::from_secs(1800));
    }

    #[test]
    fn test_parse_duration_invalid_format() {
        assert!(parse_duration("abc").is_err());
        assert!(parse_duration("99x").is_err());
        assert!(parse_duration("12:xx").is_err());
        assert!(parse_duration("12").is_err());
    }
}
