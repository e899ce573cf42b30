use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

/// Environment variable holding the OpenWeather API key.
pub const API_KEY_ENV: &str = "OWM_API_KEY";

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Weather provider settings
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Persisted recents/favorites location
    #[serde(default)]
    pub storage: StorageConfig,

    /// Log filter used when RUST_LOG is not set
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// OpenWeather API key. Never written back to disk; `OWM_API_KEY` wins.
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// Direct geocoding endpoint
    #[serde(default = "default_geocode_url")]
    pub geocode_url: String,

    /// Current weather endpoint
    #[serde(default = "default_current_url")]
    pub current_url: String,

    /// Language of the weather description
    #[serde(default = "default_lang")]
    pub lang: String,

    /// Country code appended to every geocoding query
    #[serde(default = "default_country")]
    pub country: String,
}

fn default_geocode_url() -> String {
    "https://api.openweathermap.org/geo/1.0/direct".to_string()
}

fn default_current_url() -> String {
    "https://api.openweathermap.org/data/2.5/weather".to_string()
}

fn default_lang() -> String {
    "es".to_string()
}

fn default_country() -> String {
    "ES".to_string()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            geocode_url: default_geocode_url(),
            current_url: default_current_url(),
            lang: default_lang(),
            country: default_country(),
        }
    }
}

impl WeatherConfig {
    /// The API key, unless it is blank or a `YOUR_...` placeholder
    pub fn usable_api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty() && !k.starts_with("YOUR_"))
    }

    /// Check if an API key is present (not empty, not a placeholder)
    pub fn is_configured(&self) -> bool {
        self.usable_api_key().is_some()
    }

    /// Apply a key read from the environment; a non-empty value overrides the file.
    pub fn apply_env_key(&mut self, env_key: Option<String>) {
        if let Some(key) = env_key.filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key);
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding one JSON file per persisted list
    #[serde(default = "default_data_dir_str")]
    pub data_dir: String,
}

fn default_data_dir_str() -> String {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("meteo")
        .to_string_lossy()
        .into_owned()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir_str(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from the default location, creating it if it doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, creating a default file if missing.
    ///
    /// The API key is read once here from `OWM_API_KEY`.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("Failed to read config file")?;
            toml::from_str::<Config>(&contents).context("Failed to parse config file")?
        } else {
            let config = Self::default();
            config.save_to(path)?;
            config
        };

        config
            .weather
            .apply_env_key(std::env::var(API_KEY_ENV).ok());
        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns the config along with any validation warnings.
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated(path: Option<&Path>) -> Result<(Self, ValidationResult)> {
        let config = match path {
            Some(p) => Self::load_from(p)?,
            None => Self::load()?,
        };
        let validation = config.validate();

        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    /// Validate the configuration
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        validate_url(&self.weather.geocode_url, "weather.geocode_url", &mut result);
        validate_url(&self.weather.current_url, "weather.current_url", &mut result);

        if self.weather.lang.trim().is_empty() {
            result.add_error("weather.lang", "Language must not be empty");
        }

        if self.weather.country.trim().is_empty() {
            result.add_error("weather.country", "Country code must not be empty");
        } else if self.weather.country.len() != 2 {
            result.add_warning(
                "weather.country",
                format!(
                    "Expected a two-letter country code, got: {}",
                    self.weather.country
                ),
            );
        }

        if !self.weather.is_configured() {
            result.add_warning(
                "weather.api_key",
                format!("No API key configured (set {API_KEY_ENV}) - lookups will fail"),
            );
        }

        if self.storage.data_dir.trim().is_empty() {
            result.add_error("storage.data_dir", "Data directory must not be empty");
        } else {
            let data_dir = PathBuf::from(&self.storage.data_dir);
            if data_dir.exists() && !data_dir.is_dir() {
                result.add_error(
                    "storage.data_dir",
                    format!("Path is not a directory: {}", data_dir.display()),
                );
            }
        }

        result
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure config directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("meteo");

        Ok(config_dir.join("config.toml"))
    }
}

/// Validate a URL field
fn validate_url(url_str: &str, field_name: &str, result: &mut ValidationResult) {
    match Url::parse(url_str) {
        Ok(url) => {
            if url.scheme() != "http" && url.scheme() != "https" {
                result.add_error(
                    field_name,
                    format!("URL must use http or https scheme, got: {}", url.scheme()),
                );
            }

            if url.host().is_none() {
                result.add_error(field_name, "URL must have a host");
            }
        }
        Err(e) => {
            result.add_error(field_name, format!("Invalid URL: {}", e));
        }
    }
}
