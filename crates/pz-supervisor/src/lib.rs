//! Launch the pdf2zh server, wait for its web UI to answer, and tear it down.
//!
//! The supervisor owns the single child process of an application run. Callers
//! hold a reference to the supervisor, never to the process itself.

mod endpoint;
mod error;
mod process;
mod progress;
mod prober;
mod retry_policy;
mod supervision_state;
mod supervisor;

pub use endpoint::ServiceEndpoint;
pub use error::{SupervisionError, SupervisorResult, TerminationError};
pub use process::{ProcessExit, ProcessHandle, pdf2zh_args};
pub use progress::{ProgressEvent, ProgressSink};
pub use prober::{EndpointProber, HttpProber, ProbeOutcome};
pub use retry_policy::RetryPolicy;
pub use supervision_state::SupervisionState;
pub use supervisor::{CancelHandle, ServiceSupervisor};

#[cfg(test)]
mod tests;
