//! In-process model of the host engine: the shared container of remote
//! objects, participant lifecycle, and request/response pairing.

mod bindable_event;
mod namespace;
mod remote_event;
mod remote_function;

pub use bindable_event::BindableEvent;
pub use namespace::{Backing, BackingObject, Namespace, ObjectTables};
pub use remote_event::RemoteEvent;
pub use remote_function::{reply_handler, BoxFuture, RemoteFunction, ReplyHandler};

use std::{
    collections::BTreeMap,
    future,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use log::{debug, warn};
use tokio::sync::watch;

use crate::{sync::lock, Args, HostConfig, InvokeError, ParticipantId, Value};

/// What an inbound callback receives: the payload, plus the participant it
/// came from when the receiving side is the server.
#[derive(Clone, Debug, PartialEq)]
pub struct Inbound {
    pub origin: Option<ParticipantId>,
    pub args: Args,
}

/// Handle to a host. Clones share the same container and participants.
#[derive(Clone)]
pub struct Host {
    inner: Arc<HostInner>,
}

struct HostInner {
    config: HostConfig,
    namespace: Namespace,
    // Dropping a participant's sender wakes every invocation watching it.
    participants: Mutex<BTreeMap<ParticipantId, watch::Sender<()>>>,
    next_participant: AtomicU64,
}

impl Host {
    pub fn new(config: HostConfig) -> Self {
        Self {
            inner: Arc::new(HostInner {
                namespace: Namespace::new(config.clone()),
                config,
                participants: Mutex::new(BTreeMap::new()),
                next_participant: AtomicU64::new(1),
            }),
        }
    }

    pub fn config(&self) -> &HostConfig {
        &self.inner.config
    }

    /// The container replicated to every role: remote events and functions.
    pub fn namespace(&self) -> &Namespace {
        &self.inner.namespace
    }

    pub fn connect_participant(&self) -> ParticipantId {
        let participant =
            ParticipantId::from_u64(self.inner.next_participant.fetch_add(1, Ordering::Relaxed));
        let (departure, _) = watch::channel(());
        lock(&self.inner.participants).insert(participant, departure);
        debug!("{participant} connected");
        participant
    }

    /// Removes the participant and everything it left behind on remote
    /// objects. Returns whether it was connected.
    pub fn disconnect_participant(&self, participant: ParticipantId) -> bool {
        let removed = lock(&self.inner.participants).remove(&participant);
        if removed.is_none() {
            return false;
        }
        self.inner.namespace.forget_participant(participant);
        debug!("{participant} disconnected");
        true
    }

    pub fn is_connected(&self, participant: ParticipantId) -> bool {
        lock(&self.inner.participants).contains_key(&participant)
    }

    /// Connected participants, oldest first.
    pub fn participants(&self) -> Vec<ParticipantId> {
        lock(&self.inner.participants).keys().copied().collect()
    }

    /// Runs `handler` on its own task and waits for its reply, the configured
    /// invoke timeout, or `participant` leaving, whichever comes first. Must be
    /// awaited inside a tokio runtime.
    pub async fn await_reply(
        &self,
        function: &str,
        participant: ParticipantId,
        handler: ReplyHandler,
        inbound: Inbound,
    ) -> Result<Value, InvokeError> {
        let disconnected = || InvokeError::ParticipantDisconnected {
            name: function.to_owned(),
            participant,
        };
        let mut departure = self.departure(participant).ok_or_else(disconnected)?;
        let timeout = self.inner.config.invoke_timeout;

        let reply = tokio::spawn(handler(inbound));
        let abort = reply.abort_handle();

        let outcome = tokio::select! {
            joined = reply => joined.map_err(|_| {
                warn!("reply callback of function {function:?} panicked");
                InvokeError::HandlerFailed { name: function.to_owned() }
            }),
            _ = departure.changed() => Err(disconnected()),
            _ = deadline(timeout) => Err(InvokeError::Timeout {
                name: function.to_owned(),
                timeout: timeout.unwrap_or_default(),
            }),
        };

        // the reply task is abandoned once the caller stops waiting
        abort.abort();
        outcome
    }

    fn departure(&self, participant: ParticipantId) -> Option<watch::Receiver<()>> {
        lock(&self.inner.participants)
            .get(&participant)
            .map(watch::Sender::subscribe)
    }
}

impl Default for Host {
    fn default() -> Self {
        Self::new(HostConfig::default())
    }
}

async fn deadline(timeout: Option<Duration>) {
    match timeout {
        Some(timeout) => tokio::time::sleep(timeout).await,
        None => future::pending::<()>().await,
    }
}
