//! Spawning, output capture and signalling of the pdf2zh child.

use crate::{SupervisionError, SupervisorResult, TerminationError};

use std::path::Path;
use std::process::Stdio;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};
use tokio::sync::watch;
use tracing::{debug, info, warn};

const OUTPUT_TARGET: &str = "pdf2zh";

/// Command line pdf2zh needs to serve its UI for the desktop shell.
pub fn pdf2zh_args(port: u16) -> Vec<String> {
    vec![
        "-i".into(),
        "--electron".into(),
        format!("--serverport={port}"),
    ]
}

/// Identity of the launched process.
///
/// Carries no ability to signal; only the supervisor can terminate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessHandle {
    pid: u32,
}

impl ProcessHandle {
    pub fn pid(&self) -> u32 {
        self.pid
    }
}

/// Published once the child has been reaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessExit {
    pub pid: u32,
    pub code: Option<i32>,
}

pub(crate) type SharedHandle = Arc<Mutex<Option<ProcessHandle>>>;

pub(crate) fn lock(slot: &Mutex<Option<ProcessHandle>>) -> MutexGuard<'_, Option<ProcessHandle>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Start `program` in its own process group with captured output.
pub(crate) fn spawn(program: &Path, args: &[String]) -> SupervisorResult<(ProcessHandle, Child)> {
    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    // New session so SIGTERM to the group also reaches pdf2zh's own workers
    #[cfg(unix)]
    unsafe {
        cmd.pre_exec(|| {
            nix::unistd::setsid()
                .map(|_| ())
                .map_err(std::io::Error::from)
        });
    }

    let mut child = cmd
        .spawn()
        .map_err(|e| SupervisionError::spawn(program.to_path_buf(), e))?;

    let pid = child.id().ok_or_else(|| {
        SupervisionError::spawn(
            program.to_path_buf(),
            std::io::Error::other("process exited before its PID could be read"),
        )
    })?;

    if let Some(stdout) = child.stdout.take() {
        forward_output(stdout, pid, "stdout");
    }
    if let Some(stderr) = child.stderr.take() {
        forward_output(stderr, pid, "stderr");
    }

    info!("Spawned pdf2zh with PID: {pid}");
    Ok((ProcessHandle { pid }, child))
}

/// Wait for the child in the background, then invalidate its handle and
/// publish the exit. An exit is published only while `pid` is still the
/// latest launch.
pub(crate) fn reap(
    mut child: Child,
    pid: u32,
    slot: SharedHandle,
    latest: Arc<AtomicU32>,
    exit_tx: Arc<watch::Sender<Option<ProcessExit>>>,
) {
    tokio::spawn(async move {
        let code = match child.wait().await {
            Ok(status) => {
                info!("pdf2zh (PID {pid}) exited: {status}");
                status.code()
            }
            Err(e) => {
                warn!("Failed to wait for pdf2zh (PID {pid}): {e}");
                None
            }
        };

        let mut guard = lock(&slot);
        if guard.as_ref().is_some_and(|h| h.pid == pid) {
            *guard = None;
        }
        if latest.load(Ordering::SeqCst) == pid {
            exit_tx.send_replace(Some(ProcessExit { pid, code }));
        } else {
            debug!("Dropping exit of superseded pdf2zh (PID {pid})");
        }
    });
}

/// Log each line the child writes. Bytes are decoded lossily since the
/// program may print in a non-UTF-8 locale.
fn forward_output<R>(reader: R, pid: u32, stream: &'static str)
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut reader = BufReader::new(reader);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf).await {
                Ok(0) => break,
                Ok(_) => {
                    let line = String::from_utf8_lossy(&buf);
                    info!(target: OUTPUT_TARGET, pid, stream, "{}", line.trim_end());
                }
                Err(e) => {
                    debug!("Stopped reading pdf2zh {stream}: {e}");
                    break;
                }
            }
        }
    });
}

/// Ask the process group to exit. Does not wait.
#[cfg(unix)]
pub(crate) fn signal_terminate(pid: u32) -> Result<(), TerminationError> {
    use nix::sys::signal::{Signal, killpg};
    use nix::unistd::Pid;

    killpg(Pid::from_raw(pid as i32), Signal::SIGTERM)
        .map_err(|errno| TerminationError::signal(pid, std::io::Error::from(errno)))
}

/// Kill the process tree. `taskkill` runs detached; we do not wait for it.
#[cfg(windows)]
pub(crate) fn signal_terminate(pid: u32) -> Result<(), TerminationError> {
    std::process::Command::new("taskkill")
        .args(["/T", "/F", "/PID", &pid.to_string()])
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
        .map_err(|e| TerminationError::signal(pid, e))
}
