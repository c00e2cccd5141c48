use serde::Deserialize;
use std::env;

use crate::service::validators::FormLimits;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Settings {
    pub form: FormSettings,
    pub transport: TransportSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct FormSettings {
    pub limits: FormLimits,
    pub labels: SubmitLabels,
}

/// Submit button text while idle and while a submission is in flight.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct SubmitLabels {
    pub idle: String,
    pub sending: String,
}

impl Default for SubmitLabels {
    fn default() -> Self {
        Self {
            idle: "Сохранить".to_string(),
            sending: "Сохраняю...".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct TransportSettings {
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8080/upload".to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self, config::ConfigError> {
        let environment = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        Self::load_for_environment(&environment)
    }

    /// Layers, later ones win:
    /// 1. `config/default`
    /// 2. `config/{env}`
    /// 3. `UPLOAD_FORM__*` environment variables, e.g. `UPLOAD_FORM__TRANSPORT__ENDPOINT`
    pub fn load_for_environment(env: &str) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", env)).required(false))
            .add_source(config::Environment::with_prefix("UPLOAD_FORM").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
