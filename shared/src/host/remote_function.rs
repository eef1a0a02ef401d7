use std::{
    collections::HashMap,
    future::Future,
    pin::Pin,
    sync::{Arc, Mutex},
};

use crate::{sync::lock, ChannelKind, HostConfig, ParticipantId, Value};

use super::{Backing, BackingObject, Inbound, ObjectTables};

pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;

/// The single reply-producing callback of one side of a [`RemoteFunction`].
pub type ReplyHandler = Arc<dyn Fn(Inbound) -> BoxFuture<Value> + Send + Sync>;

/// Wraps an async closure as a [`ReplyHandler`].
pub fn reply_handler<F, Fut>(callback: F) -> ReplyHandler
where
    F: Fn(Inbound) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Value> + Send + 'static,
{
    Arc::new(move |inbound| Box::pin(callback(inbound)) as BoxFuture<Value>)
}

/// Request/response call crossing the client/server boundary. Each side holds
/// at most one reply handler; setting another replaces it.
pub struct RemoteFunction {
    name: String,
    server_handler: Mutex<Option<ReplyHandler>>,
    client_handlers: Mutex<HashMap<ParticipantId, ReplyHandler>>,
}

impl RemoteFunction {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_server_handler(&self, handler: ReplyHandler) {
        *lock(&self.server_handler) = Some(handler);
    }

    pub fn set_client_handler(&self, participant: ParticipantId, handler: ReplyHandler) {
        lock(&self.client_handlers).insert(participant, handler);
    }

    pub(crate) fn server_handler(&self) -> Option<ReplyHandler> {
        lock(&self.server_handler).clone()
    }

    pub(crate) fn client_handler(&self, participant: ParticipantId) -> Option<ReplyHandler> {
        lock(&self.client_handlers).get(&participant).cloned()
    }

    pub(crate) fn forget(&self, participant: ParticipantId) {
        lock(&self.client_handlers).remove(&participant);
    }
}

impl Backing for RemoteFunction {
    const KIND: ChannelKind = ChannelKind::Function;

    fn create(name: &str, _config: &HostConfig) -> Self {
        Self {
            name: name.to_owned(),
            server_handler: Mutex::new(None),
            client_handlers: Mutex::new(HashMap::new()),
        }
    }

    fn table(tables: &mut ObjectTables) -> &mut HashMap<String, Arc<Self>> {
        &mut tables.functions
    }

    fn into_object(this: Arc<Self>) -> BackingObject {
        BackingObject::Function(this)
    }
}
