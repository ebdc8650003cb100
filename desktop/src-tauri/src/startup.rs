//! Launch pdf2zh, wait for its UI, then swap the splash for the main window.

use crate::diagnostics::{self, Diagnostic};
use crate::error::{StartupError, StartupResult};
use crate::progress::SplashProgress;
use crate::{MAIN_WINDOW, SPLASH_WINDOW, StartupPlan};

use std::path::PathBuf;
use std::sync::Arc;

use pz_supervisor::ServiceSupervisor;
use tauri::{AppHandle, Manager, WebviewUrl, WebviewWindowBuilder};
use tracing::{info, warn};

const MAIN_WINDOW_TITLE: &str = "PDFMathTranslate";
const MAIN_WINDOW_WIDTH: f64 = 1280.0;
const MAIN_WINDOW_HEIGHT: f64 = 880.0;

/// Run the whole startup sequence. On failure the process is torn down,
/// the diagnostic is shown and the application exits. The splash stays up
/// until then so the app always has a window.
pub async fn run(
    app: AppHandle,
    supervisor: Arc<ServiceSupervisor>,
    plan: StartupPlan,
    log_path: PathBuf,
) {
    let result = match start(&app, &supervisor, &plan).await {
        Ok(()) => open_main_window(&app, &plan),
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => {
            info!("pdf2zh UI is open at {}", plan.endpoint);
            watch_for_exit(&supervisor).await;
        }
        Err(e) => {
            supervisor.terminate();
            diagnostics::show_fatal(&app, Diagnostic::for_startup(&e, &log_path));
        }
    }
}

/// Log when pdf2zh goes away while its UI is open.
async fn watch_for_exit(supervisor: &ServiceSupervisor) {
    let mut exit_rx = supervisor.subscribe_exit();
    let exit = match exit_rx.wait_for(Option::is_some).await {
        Ok(exit) => *exit,
        Err(_) => return,
    };

    if let Some(exit) = exit {
        warn!("pdf2zh (PID {}) stopped, exit code {:?}", exit.pid, exit.code);
    }
}

async fn start(
    app: &AppHandle,
    supervisor: &ServiceSupervisor,
    plan: &StartupPlan,
) -> StartupResult<()> {
    supervisor.launch(&plan.executable, plan.endpoint.port())?;

    let sink = SplashProgress::new(app.clone());
    supervisor
        .await_ready(&plan.endpoint, &plan.policy, &sink)
        .await?;

    Ok(())
}

fn open_main_window(app: &AppHandle, plan: &StartupPlan) -> StartupResult<()> {
    let url_str = plan.endpoint.url();
    let url = url::Url::parse(&url_str).map_err(|e| StartupError::invalid_url(&url_str, e))?;

    WebviewWindowBuilder::new(app, MAIN_WINDOW, WebviewUrl::External(url))
        .title(MAIN_WINDOW_TITLE)
        .inner_size(MAIN_WINDOW_WIDTH, MAIN_WINDOW_HEIGHT)
        .center()
        .build()?;

    if let Err(e) = app.remove_menu() {
        warn!("Failed to remove application menu: {e}");
    }

    close_splash(app);
    Ok(())
}

/// `destroy` skips the close-requested handler, which would read this as
/// the operator aborting.
fn close_splash(app: &AppHandle) {
    if let Some(splash) = app.get_webview_window(SPLASH_WINDOW)
        && let Err(e) = splash.destroy()
    {
        warn!("Failed to close splash window: {e}");
    }
}
