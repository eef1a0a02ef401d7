use std::future::Future;

use log::{debug, warn};

use simple_shared::{
    adapter::{self, Side, Target},
    reply_handler, Args, BindableEvent, Connection, Host, Inbound, InvokeError, ParticipantId,
    Registry, RemoteEvent, RemoteFunction, Role, SimpleShared, Value, ValueError,
};

/// A client joined to a host as one participant. Everything it sends goes to
/// the server, and inbound callbacks carry no origin.
///
/// Dropping the client leaves the host: its listeners and reply callbacks are
/// removed, and invocations waiting on it fail.
pub struct Client {
    registry: Registry,
    participant: ParticipantId,
}

impl Client {
    /// Joins `host` as a new participant
    pub fn connect(host: &Host) -> Self {
        let participant = host.connect_participant();
        debug!("client joined as {participant}");
        Self {
            registry: Registry::new(Role::Client, host.clone()),
            participant,
        }
    }

    pub fn participant(&self) -> ParticipantId {
        self.participant
    }

    pub fn host(&self) -> &Host {
        self.registry.host()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn is_connected(&self) -> bool {
        self.host().is_connected(self.participant)
    }

    /// Leaves the host. Same as dropping the client.
    pub fn disconnect(self) {}

    fn side(&self) -> Side {
        Side::Client(self.participant)
    }
}

impl Drop for Client {
    fn drop(&mut self) {
        self.registry.host().disconnect_participant(self.participant);
    }
}

impl SimpleShared for Client {
    type Target = ();

    fn on<F>(&self, name: &str, callback: F) -> Connection
    where
        F: Fn(&Inbound) + Send + Sync + 'static,
    {
        let event = self.registry.resolve_as::<RemoteEvent>(name);
        adapter::connect(self.host(), &event, self.side(), callback)
    }

    fn once<F>(&self, name: &str, callback: F)
    where
        F: FnOnce(&Inbound) + Send + 'static,
    {
        let event = self.registry.resolve_as::<RemoteEvent>(name);
        adapter::connect_once(self.host(), &event, self.side(), callback);
    }

    fn fire(&self, name: &str, _target: (), args: Args) {
        let event = self.registry.resolve_as::<RemoteEvent>(name);
        if let Err(error) = adapter::call(self.host(), &event, self.side(), Target::Server, args) {
            warn!("{error}");
        }
    }

    fn invoke<T>(
        &self,
        name: &str,
        _target: (),
        args: Args,
    ) -> impl Future<Output = Result<T, InvokeError>> + Send
    where
        T: TryFrom<Value> + Send,
        ValueError: From<T::Error>,
    {
        let host = self.host().clone();
        let function = self.registry.resolve_as::<RemoteFunction>(name);
        let side = self.side();
        async move { adapter::invoke(&host, &function, side, Target::Server, args).await }
    }

    fn set_callback<F, Fut>(&self, name: &str, callback: F)
    where
        F: Fn(Inbound) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Value> + Send + 'static,
    {
        let function = self.registry.resolve_as::<RemoteFunction>(name);
        adapter::set_callback(self.host(), &function, self.side(), reply_handler(callback));
    }

    fn fire_bindable(&self, name: &str, args: Args) {
        self.registry.resolve_as::<BindableEvent>(name).fire(args);
    }

    fn on_bindable<F>(&self, name: &str, callback: F) -> Connection
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.registry.resolve_as::<BindableEvent>(name).connect(callback)
    }

    fn once_bindable<F>(&self, name: &str, callback: F)
    where
        F: FnOnce(&Args) + Send + 'static,
    {
        self.registry.resolve_as::<BindableEvent>(name).once(callback);
    }
}
