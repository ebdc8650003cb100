//! Tauri IPC commands for the splash window.

use crate::StartupPlan;
use crate::startup_status::StartupStatus;

use std::sync::Arc;

use pz_supervisor::{ServiceSupervisor, SupervisionState};
use tauri::{Manager, State};
use tracing::info;

/// Called by the splash page after it subscribes to progress events.
/// Returns the current status so that nothing emitted earlier is lost.
#[tauri::command]
pub async fn splash_ready(
    app: tauri::AppHandle,
    supervisor: State<'_, Arc<ServiceSupervisor>>,
) -> Result<StartupStatus, String> {
    info!("Splash ready notification received");

    let plan = app.try_state::<StartupPlan>();
    let max_attempts = plan.as_ref().map(|p| p.policy.max_attempts());
    let url = plan.as_ref().map(|p| p.endpoint.url());

    Ok(build_startup_status(&supervisor.state(), max_attempts, url))
}

/// Operator pressed Cancel on the splash window.
#[tauri::command]
pub async fn cancel_startup(supervisor: State<'_, Arc<ServiceSupervisor>>) -> Result<(), String> {
    // A click that races the final outcome must not linger as a request
    if supervisor.state().is_terminal() {
        info!("Ignoring cancel: startup already finished");
        return Ok(());
    }
    supervisor.cancel_handle().cancel();
    Ok(())
}

/// Converts supervisor state to the splash-facing status.
pub fn build_startup_status(
    state: &SupervisionState,
    max_attempts: Option<u32>,
    url: Option<String>,
) -> StartupStatus {
    let (state_str, attempt, error) = match state {
        SupervisionState::NotStarted => ("not_started", None, None),
        SupervisionState::Polling { attempt } => ("polling", Some(*attempt), None),
        SupervisionState::Ready => ("ready", None, None),
        SupervisionState::Failed { reason } => ("failed", None, Some(reason.clone())),
        SupervisionState::Aborted => ("aborted", None, None),
    };

    StartupStatus {
        state: state_str.into(),
        attempt,
        max_attempts,
        url,
        error,
    }
}
