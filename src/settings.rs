use serde::{Deserialize, Serialize};
use std::fs;

use crate::store::DEFAULT_TOKEN_MAX_AGE_SECONDS;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ClientSettings {
    pub api: ApiSettings,
    pub auth: AuthSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL every endpoint path is appended to.
    pub base_url: String,
    /// Per-request timeout; a hung call fails instead of spinning forever.
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSettings {
    /// Location of the persisted token record.
    pub token_file: String,
    /// Maximum age of a persisted token before it is treated as absent.
    pub token_max_age_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".to_string(),
            timeout_seconds: 30,
        }
    }
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            token_file: ".redbridge/token.json".to_string(),
            token_max_age_seconds: DEFAULT_TOKEN_MAX_AGE_SECONDS,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl ClientSettings {
    /// Load settings from configuration files and environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Logger initialization fails
    /// - Settings file cannot be read or parsed
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        Self::initialize_environment()?;

        let mut settings = Self::load_base_settings()?;
        Self::apply_env_overrides(&mut settings);

        Ok(settings)
    }

    /// Load the `.env` file and initialize logging
    ///
    /// # Errors
    ///
    /// Returns an error if logger initialization fails
    fn initialize_environment() -> Result<(), Box<dyn std::error::Error>> {
        Self::load_env_file();
        env_logger::try_init()?;
        Ok(())
    }

    /// Load base settings from TOML file(s) or use defaults.
    /// Priority (highest to lowest):
    /// 1. Environment variables (applied separately after loading)
    /// 2. Settings.toml in `REDBRIDGE_CONFIG_DIR` (if set and present)
    /// 3. Settings.toml in the current directory (if present)
    /// 4. Default settings
    ///
    /// # Errors
    ///
    /// Returns an error if a settings file exists but cannot be read or
    /// parsed.
    fn load_base_settings() -> Result<Self, Box<dyn std::error::Error>> {
        let mut settings = Self::default();

        let default_config_path = std::path::PathBuf::from("Settings.toml");
        if default_config_path.exists() {
            let toml_content = fs::read_to_string(&default_config_path)?;
            settings = basic_toml::from_str(&toml_content)?;
            log::info!("loaded base settings from {}", default_config_path.display());
        }

        if let Ok(config_dir) = std::env::var("REDBRIDGE_CONFIG_DIR") {
            let config_path = std::path::Path::new(&config_dir).join("Settings.toml");
            if config_path.exists() {
                let config_toml_content = fs::read_to_string(&config_path)?;
                settings = basic_toml::from_str(&config_toml_content)?;
                log::info!("overriding settings from {}", config_path.display());
            } else {
                log::info!(
                    "REDBRIDGE_CONFIG_DIR set but no Settings.toml found at: {}",
                    config_path.display()
                );
            }
        }

        Ok(settings)
    }

    /// Apply environment variable overrides to settings
    pub fn apply_env_overrides(settings: &mut Self) {
        Self::apply_api_env_overrides(&mut settings.api);
        Self::apply_auth_env_overrides(&mut settings.auth);
        Self::apply_logging_env_overrides(&mut settings.logging);
    }

    /// Apply environment overrides for API settings
    pub fn apply_api_env_overrides(api_settings: &mut ApiSettings) {
        if let Ok(base_url) = std::env::var("REDBRIDGE_API_URL") {
            api_settings.base_url = base_url;
        }
        Self::apply_numeric_env_override(
            "REDBRIDGE_TIMEOUT_SECONDS",
            &mut api_settings.timeout_seconds,
        );
    }

    /// Apply environment overrides for auth settings
    pub fn apply_auth_env_overrides(auth_settings: &mut AuthSettings) {
        if let Ok(token_file) = std::env::var("REDBRIDGE_TOKEN_FILE") {
            auth_settings.token_file = token_file;
        }
        Self::apply_numeric_env_override(
            "REDBRIDGE_TOKEN_MAX_AGE_SECONDS",
            &mut auth_settings.token_max_age_seconds,
        );
    }

    /// Apply environment overrides for logging settings
    fn apply_logging_env_overrides(logging_settings: &mut LoggingSettings) {
        if let Ok(log_level) = std::env::var("RUST_LOG") {
            logging_settings.level = log_level;
        }
    }

    /// Helper function to apply numeric environment variable overrides
    fn apply_numeric_env_override(env_var: &str, target: &mut u64) {
        if let Ok(value_str) = std::env::var(env_var) {
            if let Ok(value) = value_str.parse::<u64>() {
                *target = value;
            }
        }
    }

    /// Load environment variables from .env file
    fn load_env_file() {
        if let Ok(contents) = std::fs::read_to_string(".env") {
            for line in contents.lines() {
                if let Some((key, value)) = line.split_once('=') {
                    std::env::set_var(key.trim(), value.trim());
                }
            }
        }
    }
}
