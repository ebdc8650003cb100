mod commands;
mod diagnostics;
mod error;
mod logging;
mod progress;
mod startup;
mod startup_status;

use diagnostics::Diagnostic;
use logging::{current_log_path, setup_logging};


use std::path::PathBuf;
use std::sync::Arc;

use pz_config::LauncherConfig;
use pz_supervisor::{RetryPolicy, ServiceEndpoint, ServiceSupervisor};
use tauri::{AppHandle, Manager, RunEvent, WindowEvent};
use tracing::{error, info};

pub(crate) const SPLASH_WINDOW: &str = "splash";
pub(crate) const MAIN_WINDOW: &str = "main";

// Must match the listener in ui/index.html
pub(crate) const EVENT_STARTUP_PROGRESS: &str = "startup-progress";

/// Everything resolved from configuration before pdf2zh is launched.
#[derive(Debug, Clone)]
pub struct StartupPlan {
    pub executable: PathBuf,
    pub endpoint: ServiceEndpoint,
    pub policy: RetryPolicy,
}

impl StartupPlan {
    pub fn from_config(config: &LauncherConfig) -> pz_supervisor::SupervisorResult<Self> {
        Ok(Self {
            executable: config.pdf2zh_path.clone(),
            endpoint: ServiceEndpoint::localhost(config.gradio_port),
            policy: RetryPolicy::new(config.startup.max_attempts, config.startup.interval_ms)?,
        })
    }
}

fn terminate_server(app: &AppHandle, reason: &str) {
    if let Some(supervisor) = app.try_state::<Arc<ServiceSupervisor>>()
        && let Some(pid) = supervisor.live_pid()
    {
        info!("Terminating pdf2zh (PID {pid}): {reason}");
        supervisor.terminate();
    }
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .plugin(tauri_plugin_single_instance::init(|app, _argv, _cwd| {
            // Focus existing window on second instance attempt
            let window = app
                .get_webview_window(MAIN_WINDOW)
                .or_else(|| app.get_webview_window(SPLASH_WINDOW));
            if let Some(window) = window {
                window.show().ok();
                window.set_focus().ok();
            }
        }))
        .plugin(tauri_plugin_dialog::init())
        .setup(|app| {
            let data_dir = app.path().app_data_dir()?;
            std::fs::create_dir_all(&data_dir)?;

            setup_logging(&data_dir)?;
            let log_path = current_log_path(&data_dir);

            info!("Starting PDFMathTranslate desktop v{}", env!("CARGO_PKG_VERSION"));
            info!("Data directory: {:?}", data_dir);

            let supervisor = Arc::new(ServiceSupervisor::with_http()?);
            app.manage(supervisor.clone());

            // Setup signal handlers so pdf2zh is not orphaned on Unix
            #[cfg(unix)]
            {
                let app_handle = app.handle().clone();
                std::thread::spawn(move || {
                    use signal_hook::consts::{SIGINT, SIGTERM};
                    use signal_hook::iterator::Signals;

                    let mut signals = match Signals::new([SIGINT, SIGTERM]) {
                        Ok(s) => s,
                        Err(e) => {
                            error!("Failed to register signal handlers: {e}");
                            return;
                        }
                    };

                    if let Some(sig) = signals.forever().next() {
                        info!("Received signal {sig}, shutting down...");
                        terminate_server(&app_handle, "signal");
                        std::process::exit(0);
                    }
                });
            }

            // Fatal: never start pdf2zh with a guessed port or path
            let config = match LauncherConfig::load() {
                Ok(config) => config,
                Err(e) => {
                    let config_path = LauncherConfig::config_path().ok();
                    diagnostics::show_fatal(
                        app.handle(),
                        Diagnostic::for_config(&e, config_path.as_deref(), &log_path),
                    );
                    return Ok(());
                }
            };

            let plan = match StartupPlan::from_config(&config) {
                Ok(plan) => plan,
                Err(e) => {
                    diagnostics::show_fatal(
                        app.handle(),
                        Diagnostic::for_startup(&e.into(), &log_path),
                    );
                    return Ok(());
                }
            };
            app.manage(plan.clone());

            let app_handle = app.handle().clone();
            tauri::async_runtime::spawn(startup::run(app_handle, supervisor, plan, log_path));

            Ok(())
        })
        .on_window_event(|window, event| match (window.label(), event) {
            (SPLASH_WINDOW, WindowEvent::CloseRequested { api, .. }) => {
                // Closing the splash is the operator aborting startup; the
                // startup task reports it and exits.
                let app = window.app_handle();
                if app.try_state::<StartupPlan>().is_some()
                    && let Some(supervisor) = app.try_state::<Arc<ServiceSupervisor>>()
                    && !supervisor.state().is_terminal()
                {
                    api.prevent_close();
                    supervisor.cancel_handle().cancel();
                }
            }
            (MAIN_WINDOW, WindowEvent::CloseRequested { .. } | WindowEvent::Destroyed) => {
                terminate_server(window.app_handle(), "main window closed");
            }
            _ => {}
        })
        .invoke_handler(tauri::generate_handler![
            commands::splash_ready,
            commands::cancel_startup,
        ])
        .build(tauri::generate_context!())
        .expect("error while building tauri application")
        .run(|app_handle, event| match event {
            RunEvent::ExitRequested { code, .. } => {
                info!("Exit requested (code: {:?})", code);
                terminate_server(app_handle, "exit requested");
            }
            RunEvent::Exit => terminate_server(app_handle, "exit"),
            _ => {}
        });
}
