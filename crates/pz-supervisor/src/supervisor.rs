//! Process lifecycle and readiness polling for pdf2zh.

use crate::process::{self, SharedHandle, lock};
use crate::{
    EndpointProber, HttpProber, ProbeOutcome, ProcessExit, ProcessHandle, ProgressEvent,
    ProgressSink, RetryPolicy, ServiceEndpoint, SupervisionError, SupervisionState,
    SupervisorResult, pdf2zh_args,
};

use std::path::Path;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Requests cancellation of the readiness wait.
///
/// Cancellation is observed at the next suspension point; an in-flight
/// probe is allowed to finish. A request made while no wait is running
/// applies to the next one. Each request is consumed by the wait that
/// observes it.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        info!("Startup cancellation requested");
        self.tx.send_replace(true);
    }

    fn clear(&self) {
        self.tx.send_replace(false);
    }
}

/// Owns the pdf2zh process for one application run.
///
/// Responsibilities:
/// - Launch the process with the configured port
/// - Poll its web UI until it answers, bounded by a [`RetryPolicy`]
/// - Signal termination exactly once, from whichever exit path gets there first
pub struct ServiceSupervisor<P = HttpProber> {
    prober: P,
    process: SharedHandle,
    latest_pid: Arc<AtomicU32>,
    exit_tx: Arc<watch::Sender<Option<ProcessExit>>>,
    cancel: CancelHandle,
    state_tx: watch::Sender<SupervisionState>,
}

impl ServiceSupervisor<HttpProber> {
    /// Supervisor probing over real HTTP.
    pub fn with_http() -> SupervisorResult<Self> {
        Ok(Self::new(HttpProber::new()?))
    }
}

impl<P: EndpointProber> ServiceSupervisor<P> {
    pub fn new(prober: P) -> Self {
        let (exit_tx, _) = watch::channel(None);
        let (cancel_tx, _) = watch::channel(false);
        let (state_tx, _) = watch::channel(SupervisionState::NotStarted);

        Self {
            prober,
            process: Arc::new(Mutex::new(None)),
            latest_pid: Arc::new(AtomicU32::new(0)),
            exit_tx: Arc::new(exit_tx),
            cancel: CancelHandle {
                tx: Arc::new(cancel_tx),
            },
            state_tx,
        }
    }

    /// Start pdf2zh serving its UI on `port`. Does not wait for it.
    ///
    /// Must be called from within a tokio runtime.
    pub fn launch(&self, executable: &Path, port: u16) -> SupervisorResult<ProcessHandle> {
        info!("Launching {} on port {port}", executable.display());
        self.launch_with_args(executable, &pdf2zh_args(port))
    }

    /// Start an arbitrary program as the supervised process.
    pub fn launch_with_args(
        &self,
        program: &Path,
        args: &[String],
    ) -> SupervisorResult<ProcessHandle> {
        let mut guard = lock(&self.process);
        if let Some(existing) = guard.as_ref() {
            return Err(SupervisionError::already_launched(existing.pid()));
        }

        // Reapers publish under this lock and only for the latest launch, so
        // no earlier exit can land after this reset.
        self.exit_tx.send_replace(None);

        let (handle, child) = match process::spawn(program, args) {
            Ok(spawned) => spawned,
            Err(e) => {
                warn!("Launch failed: {e}");
                self.set_state(SupervisionState::Failed {
                    reason: e.to_string(),
                });
                return Err(e);
            }
        };
        *guard = Some(handle.clone());
        self.latest_pid.store(handle.pid(), Ordering::SeqCst);
        drop(guard);

        process::reap(
            child,
            handle.pid(),
            self.process.clone(),
            self.latest_pid.clone(),
            self.exit_tx.clone(),
        );

        Ok(handle)
    }

    /// Poll `endpoint` until it answers 200 or the policy is exhausted.
    ///
    /// Algorithm:
    /// 1. Check for cancellation or early process exit
    /// 2. Probe once
    ///    - 200: ready
    ///    - any other status: fail immediately, no retry
    ///    - no response: count the attempt, give up after `max_attempts`
    /// 3. Sleep `interval`, waking early on cancellation or exit, and repeat
    pub async fn await_ready(
        &self,
        endpoint: &ServiceEndpoint,
        policy: &RetryPolicy,
        sink: &dyn ProgressSink,
    ) -> SupervisorResult<()> {
        let result = self.poll(endpoint, policy, sink).await;
        self.cancel.clear();
        result
    }

    async fn poll(
        &self,
        endpoint: &ServiceEndpoint,
        policy: &RetryPolicy,
        sink: &dyn ProgressSink,
    ) -> SupervisorResult<()> {
        let mut cancel_rx = self.cancel.tx.subscribe();
        let mut exit_rx = self.exit_tx.subscribe();
        let max = policy.max_attempts();
        let mut attempt: u32 = 0;

        info!(
            "Waiting for {endpoint} (max {max} attempts, {}ms apart, up to {:?})",
            policy.interval().as_millis(),
            policy.max_wait()
        );
        self.set_state(SupervisionState::Polling { attempt });

        loop {
            if *cancel_rx.borrow_and_update() {
                return Err(self.fail(SupervisionError::cancelled_by_user(), sink));
            }
            let exited = *exit_rx.borrow_and_update();
            if let Some(exit) = exited {
                return Err(self.fail(SupervisionError::process_exited(exit.code), sink));
            }

            match self.prober.probe(endpoint).await {
                ProbeOutcome::Status(200) => {
                    info!("{endpoint} is ready after {attempt} failed attempts");
                    self.set_state(SupervisionState::Ready);
                    sink.report(ProgressEvent::Completed);
                    return Ok(());
                }
                ProbeOutcome::Status(code) => {
                    return Err(self.fail(SupervisionError::unexpected_status(code), sink));
                }
                ProbeOutcome::Unreachable(reason) => {
                    attempt += 1;
                    debug!("Attempt {attempt}/{max} failed: {reason}");
                    self.set_state(SupervisionState::Polling { attempt });
                    sink.report(ProgressEvent::Attempt {
                        current: attempt,
                        max,
                    });

                    if attempt >= max {
                        return Err(self.fail(SupervisionError::timeout(attempt), sink));
                    }
                }
            }

            tokio::select! {
                _ = tokio::time::sleep(policy.interval()) => {}
                _ = cancel_rx.changed() => {}
                _ = exit_rx.changed() => {}
            }
        }
    }

    /// Signal the process to exit, if one is live.
    ///
    /// Idempotent and non-blocking. Signal failures are logged, never
    /// returned: the process may already be gone.
    pub fn terminate(&self) {
        let handle = lock(&self.process).take();

        match handle {
            Some(handle) => match process::signal_terminate(handle.pid()) {
                Ok(()) => info!("Sent termination signal to pdf2zh (PID {})", handle.pid()),
                Err(e) => warn!("{e}"),
            },
            None => info!("No pdf2zh process is running"),
        }
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// PID of the live process, if any.
    pub fn live_pid(&self) -> Option<u32> {
        lock(&self.process).as_ref().map(ProcessHandle::pid)
    }

    /// Current readiness state.
    pub fn state(&self) -> SupervisionState {
        self.state_tx.borrow().clone()
    }

    /// Subscribe to the process exit notification. Reset to `None` by
    /// each launch.
    pub fn subscribe_exit(&self) -> watch::Receiver<Option<ProcessExit>> {
        self.exit_tx.subscribe()
    }

    fn set_state(&self, state: SupervisionState) {
        self.state_tx.send_replace(state);
    }

    fn fail(&self, error: SupervisionError, sink: &dyn ProgressSink) -> SupervisionError {
        if error.is_cancellation() {
            info!("Readiness wait aborted by user");
            self.set_state(SupervisionState::Aborted);
            sink.report(ProgressEvent::AbortedByUser);
        } else {
            warn!("Readiness wait failed: {error}");
            self.set_state(SupervisionState::Failed {
                reason: error.to_string(),
            });
            sink.report(ProgressEvent::Failed {
                message: error.to_string(),
            });
        }
        error
    }
}
