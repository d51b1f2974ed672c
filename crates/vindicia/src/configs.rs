//! Client settings.

use config::{Config, Environment as ConfigEnvironment, File};
use error_stack::ResultExt;
use serde::Deserialize;

use crate::{
    consts,
    errors::{CustomResult, SettingsError},
    logger::config::Log,
};

const CONFIG_FILE_PATH: &str = "config/vindicia.toml";
const ENV_PREFIX: &str = "VINDICIA";

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub gateway: GatewaySettings,
    pub log: Log,
}

/// Gateway environment; selects the SOAP endpoint.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq, strum::Display)]
pub enum Environment {
    #[default]
    Sandbox,
    Production,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct GatewaySettings {
    pub environment: Environment,
    pub api_version: String,
    pub apple_pay: ApplePaySettings,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            api_version: consts::API_VERSION.to_owned(),
            apple_pay: ApplePaySettings::default(),
        }
    }
}

impl GatewaySettings {
    pub fn endpoint(&self) -> &'static str {
        match self.environment {
            Environment::Sandbox => consts::SANDBOX_ENDPOINT,
            Environment::Production => consts::PRODUCTION_ENDPOINT,
        }
    }
}

/// Merchant identity presented to Apple during session validation.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ApplePaySettings {
    pub merchant_identifier: Option<String>,
    pub display_name: Option<String>,
    pub domain_name: Option<String>,
}

impl Settings {
    /// Load settings from `config/vindicia.toml` (optional) overlaid with
    /// `VINDICIA__`-prefixed environment variables.
    pub fn new() -> CustomResult<Self, SettingsError> {
        Self::with_config_path(CONFIG_FILE_PATH)
    }

    pub fn with_config_path(path: &str) -> CustomResult<Self, SettingsError> {
        let config = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                ConfigEnvironment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()
            .change_context(SettingsError::ConfigurationBuildFailed)
            .attach_printable_lazy(|| format!("Unable to read configuration from {path}"))?;

        config
            .try_deserialize()
            .change_context(SettingsError::DeserializationFailed)
    }

    /// Parse settings from an in-memory TOML document.
    pub fn from_toml(contents: &str) -> CustomResult<Self, SettingsError> {
        Config::builder()
            .add_source(File::from_str(contents, config::FileFormat::Toml))
            .build()
            .change_context(SettingsError::ConfigurationBuildFailed)?
            .try_deserialize()
            .change_context(SettingsError::DeserializationFailed)
    }
}
