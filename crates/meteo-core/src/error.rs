//! Centralized error types for Meteo.
//!
//! This module provides a typed error hierarchy that:
//! - Classifies lookup failures into config / not-found / transport / deserialization
//! - Provides user-friendly messages suitable for display
//! - Preserves full error context for logging

use thiserror::Error;

/// Top-level application error type.
///
/// Use `user_message()` to get a display-appropriate message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Returns a user-friendly message suitable for display.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Network(e) => e.user_message(),
            AppError::Config(e) => e.user_message(),
            AppError::Storage(e) => e.user_message(),
            AppError::Io(_) => "A file operation failed. Please try again.",
            AppError::Other(_) => "An unexpected error occurred. Please try again.",
        }
    }
}

/// Failure classes of a province weather lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupErrorKind {
    /// Missing credential or bad setup; never retried.
    Config,
    /// Unknown slug or the provider found no matching place.
    NotFound,
    /// HTTP status or network failure.
    Transport,
    /// A body that did not match the expected schema.
    Deserialization,
}

impl LookupErrorKind {
    pub fn user_message(self) -> &'static str {
        match self {
            LookupErrorKind::Config => "Weather API key is missing. Check your settings.",
            LookupErrorKind::NotFound => "Location not found.",
            LookupErrorKind::Transport => "Unable to reach the weather service. Please try again.",
            LookupErrorKind::Deserialization => {
                "Received an unexpected response from the weather service."
            }
        }
    }
}

/// Network-related errors (HTTP, connectivity).
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl NetworkError {
    pub fn user_message(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed(_) => {
                "Unable to connect. Check your internet connection."
            }
            NetworkError::Timeout => "The request timed out. Please try again.",
            NetworkError::ServerError { status, .. } if *status == 401 => {
                "Weather API key was rejected. Check your settings."
            }
            NetworkError::ServerError { status, .. } if *status >= 500 => {
                "The server is experiencing issues. Please try again later."
            }
            NetworkError::ServerError { .. } => "The request failed. Please try again.",
            NetworkError::InvalidResponse(_) => {
                "Received an unexpected response. Please try again."
            }
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),

    #[error("Missing required setting: {0}")]
    MissingSetting(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::NotFound(_) => "Configuration not found. Using defaults.",
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
            ConfigError::ParseError(_) => "Configuration file is malformed. Check your settings.",
            ConfigError::MissingSetting(_) => "A required setting is missing. Check your settings.",
        }
    }
}

/// Key-value storage errors (persisted slug lists).
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to write key {key}: {message}")]
    WriteFailed { key: String, message: String },

    #[error("Failed to serialize value: {0}")]
    Serialize(String),
}

impl StorageError {
    pub fn user_message(&self) -> &'static str {
        match self {
            StorageError::Unavailable(_) => "Local data is unavailable. Check the data directory.",
            StorageError::WriteFailed { .. } => "Failed to save local data. Please try again.",
            StorageError::Serialize(_) => "Failed to save local data. Please try again.",
        }
    }
}

/// Extension trait for converting reqwest errors to our error types.
pub trait ReqwestErrorExt {
    fn into_network_error(self) -> NetworkError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_network_error(self) -> NetworkError {
        if self.is_timeout() {
            NetworkError::Timeout
        } else if self.is_connect() {
            NetworkError::ConnectionFailed(self.to_string())
        } else if let Some(status) = self.status() {
            NetworkError::ServerError {
                status: status.as_u16(),
                message: self.to_string(),
            }
        } else if self.is_decode() {
            NetworkError::InvalidResponse(self.to_string())
        } else {
            NetworkError::ConnectionFailed(self.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages_are_non_empty() {
        let messages = [
            NetworkError::Timeout.user_message(),
            ConfigError::Invalid("test".into()).user_message(),
            StorageError::Unavailable("test".into()).user_message(),
            LookupErrorKind::Config.user_message(),
            LookupErrorKind::NotFound.user_message(),
            LookupErrorKind::Transport.user_message(),
            LookupErrorKind::Deserialization.user_message(),
        ];

        for message in messages {
            assert!(!message.is_empty());
        }
    }

    #[test]
    fn test_app_error_conversion() {
        let storage_err = StorageError::Serialize("bad".into());
        let app_err: AppError = storage_err.into();
        assert!(matches!(app_err, AppError::Storage(StorageError::Serialize(_))));
    }

    #[test]
    fn test_user_message_propagation() {
        let app_err = AppError::Config(ConfigError::MissingSetting("weather.api_key".into()));
        assert_eq!(
            app_err.user_message(),
            "A required setting is missing. Check your settings."
        );
    }

    #[test]
    fn test_server_error_messages_by_status() {
        let unauthorized = NetworkError::ServerError {
            status: 401,
            message: "Invalid API key".into(),
        };
        assert!(unauthorized.user_message().contains("API key"));

        let unavailable = NetworkError::ServerError {
            status: 503,
            message: "down".into(),
        };
        assert!(unavailable.user_message().contains("try again later"));
    }
}
