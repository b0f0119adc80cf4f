//! Error types for oxidized-gx

use std::io;

use thiserror::Error;

/// Main error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Input error: {0}")]
    Input(#[from] InputError),
}

/// Errors raised while loading or saving the settings document
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Settings version {found} is older than {minimum}")]
    IncompatibleVersion { found: String, minimum: String },

    #[error("No configuration directory available on this platform")]
    NoConfigDir,
}

/// Errors raised when validating input settings before they reach the decoder
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Channel {channel} assigned to emulated slot {slot}, which does not exist")]
    InvalidAssignment { channel: usize, slot: u8 },

    #[error("Unknown button map key: {0}")]
    UnknownMapKey(String),

    #[error("Invalid turbo button index: {0}")]
    InvalidTurboButton(u8),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_errors_convert_into_main_error() {
        let err: Error = InputError::InvalidTurboButton(42).into();
        assert!(matches!(err, Error::Input(InputError::InvalidTurboButton(42))));
        assert_eq!(err.to_string(), "Input error: Invalid turbo button index: 42");
    }

    #[test]
    fn version_error_message() {
        let err = ConfigError::IncompatibleVersion {
            found: "4.1.0".to_string(),
            minimum: "4.7.0".to_string(),
        };
        assert_eq!(err.to_string(), "Settings version 4.1.0 is older than 4.7.0");
    }
}
