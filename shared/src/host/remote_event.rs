use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use log::trace;

use crate::{signal::Signal, sync::lock, Args, ChannelKind, HostConfig, ParticipantId};

use super::{Backing, BackingObject, Inbound, ObjectTables};

/// Fire-and-forget event crossing the client/server boundary.
///
/// The server side has a single inbound signal; every participant has its own,
/// created when that participant first connects to the event and dropped when
/// it leaves the host.
pub struct RemoteEvent {
    name: String,
    catch_panics: bool,
    server: Signal<Inbound>,
    clients: Mutex<HashMap<ParticipantId, Signal<Inbound>>>,
}

impl RemoteEvent {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Delivers `args` to the server's listeners, tagged with `origin`.
    pub fn fire_server(&self, origin: ParticipantId, args: Args) {
        self.server.fire(&Inbound {
            origin: Some(origin),
            args,
        });
    }

    /// Delivers `args` to the listeners of one participant. Nothing happens if
    /// that participant never connected a listener.
    pub fn fire_client(&self, target: ParticipantId, args: Args) {
        let signal = lock(&self.clients).get(&target).cloned();
        let Some(signal) = signal else {
            trace!("event {:?} has no listeners on {target}, dropping", self.name);
            return;
        };
        signal.fire(&Inbound { origin: None, args });
    }

    /// Delivers `args` to the listeners of every participant in `participants`.
    pub fn fire_all_clients(&self, participants: &[ParticipantId], args: Args) {
        for participant in participants {
            self.fire_client(*participant, args.clone());
        }
    }

    pub fn client_listener_count(&self, participant: ParticipantId) -> usize {
        lock(&self.clients)
            .get(&participant)
            .map_or(0, Signal::listener_count)
    }

    pub(crate) fn server_signal(&self) -> Signal<Inbound> {
        self.server.clone()
    }

    pub(crate) fn client_signal(&self, participant: ParticipantId) -> Signal<Inbound> {
        lock(&self.clients)
            .entry(participant)
            .or_insert_with(|| Signal::new(self.catch_panics))
            .clone()
    }

    /// Ends every connection the participant held on this event.
    pub(crate) fn forget(&self, participant: ParticipantId) {
        if let Some(signal) = lock(&self.clients).remove(&participant) {
            signal.clear();
        }
    }
}

impl Backing for RemoteEvent {
    const KIND: ChannelKind = ChannelKind::Event;

    fn create(name: &str, config: &HostConfig) -> Self {
        Self {
            name: name.to_owned(),
            catch_panics: config.catch_listener_panics,
            server: Signal::new(config.catch_listener_panics),
            clients: Mutex::new(HashMap::new()),
        }
    }

    fn table(tables: &mut ObjectTables) -> &mut HashMap<String, Arc<Self>> {
        &mut tables.events
    }

    fn into_object(this: Arc<Self>) -> BackingObject {
        BackingObject::Event(this)
    }
}
