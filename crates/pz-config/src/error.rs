use std::panic::Location;
use std::path::PathBuf;
use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error as ThisError;

/// Coarse classification of a configuration failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigErrorKind {
    Missing,
    Unreadable,
    Malformed,
}

#[derive(ThisError, Debug)]
pub enum ConfigError {
    #[error("Configuration file does not exist at {path} {location}")]
    MissingFile {
        path: PathBuf,
        location: ErrorLocation,
    },

    #[error("Configuration is missing required field \"{field}\" {location}")]
    MissingField {
        field: &'static str,
        location: ErrorLocation,
    },

    #[error("Data directory not found {location}")]
    NoDataDir { location: ErrorLocation },

    #[error("IO error reading {path}: {source} {location}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Malformed configuration in {path}: {message} {location}")]
    Malformed {
        path: PathBuf,
        message: String,
        location: ErrorLocation,
    },
}

impl ConfigError {
    #[track_caller]
    pub fn missing_file(path: PathBuf) -> Self {
        Self::MissingFile {
            path,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField {
            field,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn no_data_dir() -> Self {
        Self::NoDataDir {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn unreadable(path: PathBuf, source: std::io::Error) -> Self {
        Self::Unreadable {
            path,
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn malformed<S: Into<String>>(path: PathBuf, message: S) -> Self {
        Self::Malformed {
            path,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn kind(&self) -> ConfigErrorKind {
        match self {
            Self::MissingFile { .. } | Self::MissingField { .. } | Self::NoDataDir { .. } => {
                ConfigErrorKind::Missing
            }
            Self::Unreadable { .. } => ConfigErrorKind::Unreadable,
            Self::Malformed { .. } => ConfigErrorKind::Malformed,
        }
    }

    /// Name of the missing field, if that is what went wrong.
    pub fn missing_field_name(&self) -> Option<&'static str> {
        match self {
            Self::MissingField { field, .. } => Some(field),
            _ => None,
        }
    }

    pub fn recovery_hint(&self) -> &'static str {
        match self {
            Self::MissingFile { .. } => {
                "The launcher configuration file was not found. \
                   Reinstall the application or create config.json in the data directory."
            }
            Self::MissingField { .. } => {
                "The configuration file lacks a required setting. \
                   Add both \"gradio_port\" and \"pdf2zh_path\" to config.json."
            }
            Self::NoDataDir { .. } => {
                "Unable to locate the per-user data directory. \
                   Set PDF2ZH_DESKTOP_CONFIG_DIR to the folder holding config.json."
            }
            Self::Unreadable { .. } => {
                "The configuration file could not be read. \
                   Check file permissions."
            }
            Self::Malformed { .. } => {
                "The configuration file is not valid. \
                   Fix the JSON syntax or the reported value."
            }
        }
    }
}

pub type ConfigErrorResult<T> = StdResult<T, ConfigError>;
