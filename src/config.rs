//! Client configuration
//!
//! A [`ClientConfig`] names the AppSheet app, carries its access key and the
//! default request [`Properties`]. Build it in code or read it from the
//! environment with [`ClientConfig::from_env`].

use std::{collections::HashMap, env};

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://api.appsheet.com/api/v2";

pub const ENV_APP_ID: &str = "APPSHEET_APP_ID";
pub const ENV_ACCESS_KEY: &str = "APPSHEET_ACCESS_KEY";
pub const ENV_LOCALE: &str = "APPSHEET_LOCALE";
pub const ENV_LOCATION: &str = "APPSHEET_LOCATION";
pub const ENV_TIMEZONE: &str = "APPSHEET_TIMEZONE";
pub const ENV_BASE_URL: &str = "APPSHEET_BASE_URL";

/// `Properties` object of the request envelope.
///
/// Unset fields are left out of the JSON body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Properties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,

    /// `"47.623098, -122.330184"`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_settings: Option<HashMap<String, String>>,
}

impl Properties {
    /// Fields set in `overrides` replace the ones in `self`.
    pub fn merged(&self, overrides: &Properties) -> Properties {
        Properties {
            locale: overrides.locale.clone().or_else(|| self.locale.clone()),
            location: overrides.location.clone().or_else(|| self.location.clone()),
            timezone: overrides.timezone.clone().or_else(|| self.timezone.clone()),
            selector: overrides.selector.clone().or_else(|| self.selector.clone()),
            user_settings: overrides
                .user_settings
                .clone()
                .or_else(|| self.user_settings.clone()),
        }
    }
}

/// Errors that can occur while loading configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    MissingVar(&'static str),

    #[error("environment variable {name} is invalid: {reason}")]
    InvalidVar { name: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub app_id: String,
    pub access_key: String,
    /// Sent with every request; the selector is always per request.
    pub properties: Properties,
    pub base_url: String,
}

impl ClientConfig {
    pub fn new(app_id: impl Into<String>, access_key: impl Into<String>) -> Self {
        ClientConfig {
            app_id: app_id.into(),
            access_key: access_key.into(),
            properties: Properties::default(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_properties(mut self, mut properties: Properties) -> Self {
        properties.selector = None;
        self.properties = properties;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Reads `APPSHEET_APP_ID` and `APPSHEET_ACCESS_KEY`, plus the optional
    /// `APPSHEET_LOCALE`, `APPSHEET_LOCATION`, `APPSHEET_TIMEZONE` and
    /// `APPSHEET_BASE_URL`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| -> Result<String, ConfigError> {
            match lookup(name) {
                Some(value) if !value.trim().is_empty() => Ok(value),
                Some(_) => Err(ConfigError::InvalidVar {
                    name,
                    reason: "value is empty".to_string(),
                }),
                None => Err(ConfigError::MissingVar(name)),
            }
        };

        // Blank optional variables count as unset
        let optional = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let mut config = ClientConfig::new(required(ENV_APP_ID)?, required(ENV_ACCESS_KEY)?);
        config.properties = Properties {
            locale: optional(ENV_LOCALE),
            location: optional(ENV_LOCATION),
            timezone: optional(ENV_TIMEZONE),
            ..Properties::default()
        };

        if let Some(base_url) = optional(ENV_BASE_URL) {
            if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
                return Err(ConfigError::InvalidVar {
                    name: ENV_BASE_URL,
                    reason: format!("'{}' is not an http(s) URL", base_url),
                });
            }
            config.base_url = base_url.trim_end_matches('/').to_string();
        }

        Ok(config)
    }
}
