//! Turns startup failures into the text of an error dialog.

use crate::error::StartupError;

use std::path::Path;

use pz_config::{ConfigError, ConfigErrorKind};
use pz_supervisor::SupervisionError;
use tauri::{AppHandle, Runtime};
use tauri_plugin_dialog::{DialogExt, MessageDialogKind};
use tracing::error;

/// What the operator sees when startup is abandoned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub title: &'static str,
    pub message: String,
}

impl Diagnostic {
    pub fn for_config(err: &ConfigError, config_path: Option<&Path>, log_path: &Path) -> Self {
        let title = match err.kind() {
            ConfigErrorKind::Missing => "Configuration missing",
            ConfigErrorKind::Unreadable => "Configuration unreadable",
            ConfigErrorKind::Malformed => "Configuration invalid",
        };

        let detail = match (err.missing_field_name(), config_path) {
            (Some(field), _) => format!("Required setting \"{field}\" is not set."),
            (None, Some(path)) => format!("Unable to load {}.", path.display()),
            (None, None) => "Unable to load the launcher configuration.".to_string(),
        };

        Self {
            title,
            message: compose(&detail, err.recovery_hint(), log_path),
        }
    }

    pub fn for_startup(err: &StartupError, log_path: &Path) -> Self {
        let (title, detail) = match err {
            StartupError::Supervision { source, .. } => supervision_summary(source),
            StartupError::InvalidUrl { url, .. } => {
                ("Invalid server address", format!("Cannot open {url}."))
            }
            StartupError::Window { .. } => (
                "Unable to open window",
                "The translation server is running but its window could not be shown.".into(),
            ),
        };

        Self {
            title,
            message: compose(&detail, err.recovery_hint(), log_path),
        }
    }
}

fn supervision_summary(err: &SupervisionError) -> (&'static str, String) {
    match err {
        SupervisionError::Timeout { attempts, .. } => (
            "Server startup timed out",
            format!("The translation server did not respond after {attempts} attempts."),
        ),
        SupervisionError::UnexpectedStatus { code, .. } => (
            "Server returned an error",
            format!("The translation server answered with HTTP status {code}."),
        ),
        SupervisionError::CancelledByUser { .. } => (
            "Startup cancelled",
            "Startup of the translation server was cancelled.".into(),
        ),
        SupervisionError::ProcessExited { code, .. } => (
            "pdf2zh stopped unexpectedly",
            match code {
                Some(code) => format!("pdf2zh exited with code {code} before it was ready."),
                None => "pdf2zh was terminated before it was ready.".into(),
            },
        ),
        SupervisionError::Spawn { path, .. } => (
            "Unable to start pdf2zh",
            format!("Could not run {}.", path.display()),
        ),
        other => ("Startup failed", other.to_string()),
    }
}

fn compose(detail: &str, hint: &str, log_path: &Path) -> String {
    format!("{detail}\n\n{hint}\n\nLog file: {}", log_path.display())
}

/// Show an error dialog and exit once it is dismissed. Does not block.
pub fn show_fatal<R: Runtime>(app: &AppHandle<R>, diagnostic: Diagnostic) {
    error!("{}: {}", diagnostic.title, diagnostic.message);

    let app_handle = app.clone();
    app.dialog()
        .message(diagnostic.message)
        .title(diagnostic.title)
        .kind(MessageDialogKind::Error)
        .show(move |_| app_handle.exit(1));
}
