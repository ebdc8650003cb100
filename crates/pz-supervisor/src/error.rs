use std::panic::Location;
use std::path::PathBuf;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SupervisionError {
    #[error("Server responded with unexpected status {code} {location}")]
    UnexpectedStatus { code: u16, location: ErrorLocation },

    #[error("Server did not become ready after {attempts} attempts {location}")]
    Timeout {
        attempts: u32,
        location: ErrorLocation,
    },

    #[error("Startup cancelled by user {location}")]
    CancelledByUser { location: ErrorLocation },

    #[error("pdf2zh exited before becoming ready (exit code {code:?}) {location}")]
    ProcessExited {
        code: Option<i32>,
        location: ErrorLocation,
    },

    #[error("Failed to spawn {path}: {source} {location}")]
    Spawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("pdf2zh is already running with PID {pid} {location}")]
    AlreadyLaunched { pid: u32, location: ErrorLocation },

    #[error("Invalid retry policy: {message} {location}")]
    InvalidPolicy {
        message: String,
        location: ErrorLocation,
    },

    #[error("Failed to build HTTP client: {source} {location}")]
    HttpClient {
        #[source]
        source: reqwest::Error,
        location: ErrorLocation,
    },
}

impl SupervisionError {
    #[track_caller]
    pub fn unexpected_status(code: u16) -> Self {
        Self::UnexpectedStatus {
            code,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn timeout(attempts: u32) -> Self {
        Self::Timeout {
            attempts,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn cancelled_by_user() -> Self {
        Self::CancelledByUser {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn process_exited(code: Option<i32>) -> Self {
        Self::ProcessExited {
            code,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn spawn(path: PathBuf, source: std::io::Error) -> Self {
        Self::Spawn {
            path,
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn already_launched(pid: u32) -> Self {
        Self::AlreadyLaunched {
            pid,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_policy(message: impl Into<String>) -> Self {
        Self::InvalidPolicy {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Whether the operator chose to stop, as opposed to startup failing.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::CancelledByUser { .. })
    }

    pub fn recovery_hint(&self) -> &'static str {
        match self {
            Self::UnexpectedStatus { .. } => {
                "The translation server answered but reported an error. \
                   Check the pdf2zh log output for details."
            }
            Self::Timeout { .. } => {
                "The translation server did not start in time. \
                   Check the configured port and pdf2zh path, or raise startup.max_attempts."
            }
            Self::CancelledByUser { .. } => "Startup was cancelled.",
            Self::ProcessExited { .. } => {
                "pdf2zh stopped during startup. \
                   Run it from a terminal to see why."
            }
            Self::Spawn { .. } => {
                "pdf2zh could not be started. \
                   Check that pdf2zh_path in config.json points to the executable."
            }
            Self::AlreadyLaunched { .. } => {
                "The translation server is already running. Restart the application."
            }
            Self::InvalidPolicy { .. } => {
                "Startup retry settings are invalid. \
                   Both startup.max_attempts and startup.interval_ms must be positive."
            }
            Self::HttpClient { .. } => {
                "An unexpected error occurred. Please check the logs for details."
            }
        }
    }
}

impl From<reqwest::Error> for SupervisionError {
    #[track_caller]
    fn from(source: reqwest::Error) -> Self {
        Self::HttpClient {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Failure to deliver a termination signal.
///
/// Only ever logged: the process may already be gone.
#[derive(Error, Debug)]
pub enum TerminationError {
    #[error("Failed to signal process {pid}: {source} {location}")]
    Signal {
        pid: u32,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },
}

impl TerminationError {
    #[track_caller]
    pub fn signal(pid: u32, source: std::io::Error) -> Self {
        Self::Signal {
            pid,
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type SupervisorResult<T> = std::result::Result<T, SupervisionError>;
