mod policy;

use crate::{CancelHandle, EndpointProber, ProbeOutcome, ProgressEvent, ProgressSink, ServiceEndpoint};

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

/// Prober that replays a fixed script, then repeats a fallback outcome.
pub(crate) struct ScriptedProber {
    script: Mutex<VecDeque<ProbeOutcome>>,
    fallback: ProbeOutcome,
    calls: AtomicU32,
    cancel_on_call: Mutex<Option<(u32, CancelHandle)>>,
}

impl ScriptedProber {
    pub(crate) fn new(script: Vec<ProbeOutcome>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            fallback: unreachable(),
            calls: AtomicU32::new(0),
            cancel_on_call: Mutex::new(None),
        })
    }

    /// Never answers.
    pub(crate) fn dead() -> Arc<Self> {
        Self::new(Vec::new())
    }

    pub(crate) fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    /// Trigger `handle` while probe number `call` is in flight.
    pub(crate) fn cancel_during(&self, call: u32, handle: CancelHandle) {
        *self.cancel_on_call.lock().unwrap() = Some((call, handle));
    }
}

#[async_trait]
impl EndpointProber for Arc<ScriptedProber> {
    async fn probe(&self, _endpoint: &ServiceEndpoint) -> ProbeOutcome {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;

        if let Some((at, handle)) = self.cancel_on_call.lock().unwrap().as_ref()
            && *at == call
        {
            handle.cancel();
        }

        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone())
    }
}

#[derive(Default)]
pub(crate) struct RecordingSink {
    events: Mutex<Vec<ProgressEvent>>,
}

impl RecordingSink {
    pub(crate) fn events(&self) -> Vec<ProgressEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl ProgressSink for RecordingSink {
    fn report(&self, event: ProgressEvent) {
        self.events.lock().unwrap().push(event);
    }
}

pub(crate) fn unreachable() -> ProbeOutcome {
    ProbeOutcome::Unreachable("connection refused".into())
}

pub(crate) fn endpoint() -> ServiceEndpoint {
    ServiceEndpoint::localhost(7860)
}
