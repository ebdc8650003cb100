use crate::{EVENT_STARTUP_PROGRESS, SPLASH_WINDOW};

use pz_supervisor::{ProgressEvent, ProgressSink};
use tauri::{AppHandle, Emitter, Runtime};
use tracing::{debug, info, warn};

/// Forwards readiness progress to the splash window.
pub struct SplashProgress<R: Runtime> {
    app: AppHandle<R>,
}

impl<R: Runtime> SplashProgress<R> {
    pub fn new(app: AppHandle<R>) -> Self {
        Self { app }
    }
}

impl<R: Runtime> ProgressSink for SplashProgress<R> {
    fn report(&self, event: ProgressEvent) {
        if event.is_terminal() {
            info!("Startup finished: {event:?}");
        } else {
            debug!("Emitting {EVENT_STARTUP_PROGRESS}: {event:?}");
        }
        if let Err(e) = self
            .app
            .emit_to(SPLASH_WINDOW, EVENT_STARTUP_PROGRESS, event)
        {
            warn!("Failed to emit startup progress: {e}");
        }
    }
}
