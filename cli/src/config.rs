// SPDX-FileCopyrightText: 2026 roombook contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, path::PathBuf, str::FromStr};

use tokio::fs;

use roombook_api::ApiConfig;
use roombook_core::{APP_NAME, Config as CoreConfig};

const ROOMBOOK_CONFIG_ENV: &str = "ROOMBOOK_CONFIG";
const ROOMBOOK_DEV_ENV: &str = "ROOMBOOK_DEV";

const ROOMBOOK_DEV_VALID_TRUE: &[&str] = &["1", "true", "yes"];
const ROOMBOOK_DEV_VALID_FALSE: &[&str] = &["0", "false", "no"];

#[tracing::instrument]
pub async fn parse_config(path: Option<PathBuf>) -> Result<(CoreConfig, ApiConfig), Box<dyn Error>> {
    let path = if let Some(path) = path {
        path
    } else if let Ok(env_path) = std::env::var(ROOMBOOK_CONFIG_ENV) {
        PathBuf::from(env_path)
    } else {
        if let Some(true) = is_dev_mode() {
            return Err(format!(
                "Development environment detected ({ROOMBOOK_DEV_ENV} is set): config must be explicitly specified via --config or {ROOMBOOK_CONFIG_ENV} environment variable",
            ).into());
        }

        let config = get_config_dir()?.join(format!("{APP_NAME}/config.toml"));
        if !fs::try_exists(&config).await? {
            tracing::debug!(path = %config.display(), "no config file, using defaults");
            return ConfigRaw::default().finish();
        }
        config
    };

    fs::read_to_string(&path)
        .await
        .map_err(|e| format!("Failed to read config file at {}: {}", path.display(), e))?
        .parse::<ConfigRaw>()?
        .finish()
}

#[derive(Debug, Default, serde::Deserialize)]
struct ConfigRaw {
    #[serde(default)]
    core: CoreConfig,
    #[serde(default)]
    api: ApiConfig,
}

impl ConfigRaw {
    fn finish(mut self) -> Result<(CoreConfig, ApiConfig), Box<dyn Error>> {
        self.core.normalize()?;
        Ok((self.core, self.api))
    }
}

impl FromStr for ConfigRaw {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

fn get_config_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let config_dir = xdg::BaseDirectories::new().get_config_home();
    #[cfg(not(unix))]
    let config_dir = dirs::config_dir();
    config_dir.ok_or_else(|| "User-specific config directory not found".into())
}

fn is_dev_mode() -> Option<bool> {
    let val = std::env::var(ROOMBOOK_DEV_ENV).ok()?;
    let lower = val.to_lowercase();
    if ROOMBOOK_DEV_VALID_TRUE.contains(&lower.as_str()) {
        Some(true)
    } else if ROOMBOOK_DEV_VALID_FALSE.contains(&lower.as_str()) {
        Some(false)
    } else {
        tracing::warn!(
            "Unrecognized value for {}: '{}'. Expected one of: true: {}, false: {}. Treating as unset.",
            ROOMBOOK_DEV_ENV,
            val,
            ROOMBOOK_DEV_VALID_TRUE.join(", "),
            ROOMBOOK_DEV_VALID_FALSE.join(", ")
        );
        None
    }
}
