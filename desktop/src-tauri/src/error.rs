use std::panic::Location;

use error_location::ErrorLocation;
use pz_supervisor::SupervisionError;
use thiserror::Error;

/// Anything that stops the shell from showing the pdf2zh UI.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("{source}")]
    Supervision {
        #[source]
        source: SupervisionError,
        location: ErrorLocation,
    },

    #[error("Invalid server URL {url}: {source} {location}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
        location: ErrorLocation,
    },

    #[error("Failed to open window: {source} {location}")]
    Window {
        #[source]
        source: tauri::Error,
        location: ErrorLocation,
    },
}

impl StartupError {
    #[track_caller]
    pub fn invalid_url(url: impl Into<String>, source: url::ParseError) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn recovery_hint(&self) -> &'static str {
        match self {
            Self::Supervision { source, .. } => source.recovery_hint(),
            Self::InvalidUrl { .. } => {
                "The configured port does not form a valid address. Check gradio_port."
            }
            Self::Window { .. } => {
                "The application window could not be created. \
                   Please check the logs for details."
            }
        }
    }
}

impl From<SupervisionError> for StartupError {
    #[track_caller]
    fn from(source: SupervisionError) -> Self {
        Self::Supervision {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<tauri::Error> for StartupError {
    #[track_caller]
    fn from(source: tauri::Error) -> Self {
        Self::Window {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type StartupResult<T> = std::result::Result<T, StartupError>;
