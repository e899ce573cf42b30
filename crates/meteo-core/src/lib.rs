pub mod config;
pub mod error;

pub use config::{
    Config, LoggingConfig, StorageConfig, ValidationResult, WeatherConfig, API_KEY_ENV,
};
pub use error::{
    AppError, ConfigError, LookupErrorKind, NetworkError, ReqwestErrorExt, StorageError,
};

use anyhow::Result;

/// Initialize logging. `RUST_LOG` wins over `default_level`.
pub fn init(default_level: &str) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    tracing::debug!("Meteo core initialized");
    Ok(())
}
