// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use comptoir_app::{Credentials, DEFAULT_STOCK_THRESHOLD, PageKind, UserInfo, WorkspaceOptions};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_VERSION: i64 = 1;
const DEFAULT_USERNAME: &str = "admin";
const DEFAULT_PASSWORD: &str = "admin";
const DEFAULT_FULL_NAME: &str = "Youssouf BOIRE";
const DEFAULT_ROLE: &str = "admin";
const DEFAULT_LOG_LEVEL: &str = "info";
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub auth: Auth,
    #[serde(default)]
    pub ui: Ui,
    #[serde(default)]
    pub alerts: Alerts,
    #[serde(default)]
    pub data: Data,
    #[serde(default)]
    pub log: Log,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            auth: Auth::default(),
            ui: Ui::default(),
            alerts: Alerts::default(),
            data: Data::default(),
            log: Log::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Auth {
    pub username: Option<String>,
    pub password: Option<String>,
    pub full_name: Option<String>,
    pub role: Option<String>,
}

impl Default for Auth {
    fn default() -> Self {
        Self {
            username: Some(DEFAULT_USERNAME.to_owned()),
            password: Some(DEFAULT_PASSWORD.to_owned()),
            full_name: Some(DEFAULT_FULL_NAME.to_owned()),
            role: Some(DEFAULT_ROLE.to_owned()),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Ui {
    pub start_page: Option<String>,
    pub skip_login: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Alerts {
    pub stock_threshold: Option<i64>,
}

impl Default for Alerts {
    fn default() -> Self {
        Self {
            stock_threshold: Some(DEFAULT_STOCK_THRESHOLD),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Data {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Log {
    pub level: Option<String>,
    pub path: Option<String>,
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("COMPTOIR_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set COMPTOIR_CONFIG_PATH to the config file")
        })?;
        Ok(config_root
            .join(comptoir_data::APP_NAME)
            .join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} is not versioned. Add `version = 1` and put values under [auth], [ui], [alerts], [data] and [log]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if let Some(start_page) = &self.ui.start_page
            && PageKind::parse(start_page).is_none()
        {
            bail!(
                "ui.start_page in {} must be one of: {}; got {:?}",
                path.display(),
                PageKind::ALL.map(PageKind::slug).join(", "),
                start_page
            );
        }

        if let Some(threshold) = self.alerts.stock_threshold
            && threshold < 0
        {
            bail!(
                "alerts.stock_threshold in {} must be non-negative, got {}",
                path.display(),
                threshold
            );
        }

        if let Some(level) = &self.log.level
            && !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str())
        {
            bail!(
                "log.level in {} must be one of: {}; got {:?}",
                path.display(),
                LOG_LEVELS.join(", "),
                level
            );
        }

        for (key, value) in [
            ("auth.username", &self.auth.username),
            ("auth.password", &self.auth.password),
        ] {
            if value.as_deref().is_some_and(|value| value.trim().is_empty()) {
                bail!("{key} in {} must not be empty", path.display());
            }
        }

        if let Some(data_path) = &self.data.path {
            comptoir_data::validate_data_path(data_path)?;
        }

        Ok(())
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(
            self.auth.username.as_deref().unwrap_or(DEFAULT_USERNAME),
            self.auth.password.as_deref().unwrap_or(DEFAULT_PASSWORD),
        )
    }

    pub fn user(&self) -> UserInfo {
        UserInfo {
            full_name: self
                .auth
                .full_name
                .clone()
                .unwrap_or_else(|| DEFAULT_FULL_NAME.to_owned()),
            role: self
                .auth
                .role
                .clone()
                .unwrap_or_else(|| DEFAULT_ROLE.to_owned()),
        }
    }

    pub fn skip_login(&self) -> bool {
        self.ui.skip_login.unwrap_or(false)
    }

    pub fn workspace_options(&self) -> WorkspaceOptions {
        let defaults = WorkspaceOptions::default();
        WorkspaceOptions {
            stock_threshold: self
                .alerts
                .stock_threshold
                .unwrap_or(defaults.stock_threshold),
            start_page: self
                .ui
                .start_page
                .as_deref()
                .and_then(PageKind::parse)
                .unwrap_or(defaults.start_page),
        }
    }

    /// `[data].path`, then `COMPTOIR_DATA_PATH`. `None` means the built-in sample data.
    pub fn data_path(&self) -> Option<PathBuf> {
        match &self.data.path {
            Some(path) => Some(PathBuf::from(path)),
            None => env::var_os("COMPTOIR_DATA_PATH").map(PathBuf::from),
        }
    }

    pub fn log_level(&self) -> String {
        self.log
            .level
            .as_deref()
            .unwrap_or(DEFAULT_LOG_LEVEL)
            .to_ascii_lowercase()
    }

    pub fn log_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.log.path {
            return Ok(PathBuf::from(path));
        }
        if let Some(path) = env::var_os("COMPTOIR_LOG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let data_root = dirs::data_local_dir().ok_or_else(|| {
            anyhow!("cannot resolve data directory; set [log].path or COMPTOIR_LOG_PATH")
        })?;
        Ok(data_root
            .join(comptoir_data::APP_NAME)
            .join("comptoir.log"))
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# comptoir config\n# Place this file at: {}\n\nversion = 1\n\n[auth]\nusername = \"{}\"\npassword = \"{}\"\nfull_name = \"{}\"\nrole = \"{}\"\n\n[ui]\n# One of: {}\nstart_page = \"{}\"\nskip_login = false\n\n[alerts]\nstock_threshold = {}\n\n[data]\n# Optional. Without it the built-in sample data is shown.\n# path = \"/absolute/path/to/donnees.json\"\n\n[log]\nlevel = \"{}\"\n# Optional. Default is the platform data dir (for example ~/.local/share/comptoir/comptoir.log)\n# path = \"/absolute/path/to/comptoir.log\"\n",
            path.display(),
            DEFAULT_USERNAME,
            DEFAULT_PASSWORD,
            DEFAULT_FULL_NAME,
            DEFAULT_ROLE,
            PageKind::ALL.map(PageKind::slug).join(", "),
            PageKind::Sales.slug(),
            DEFAULT_STOCK_THRESHOLD,
            DEFAULT_LOG_LEVEL,
        )
    }
}
