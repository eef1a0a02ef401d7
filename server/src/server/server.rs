use std::future::Future;

use log::warn;

use simple_shared::{
    adapter::{self, Side, Target},
    reply_handler, Args, BindableEvent, Connection, Host, Inbound, InvokeError, ParticipantId,
    Registry, RegistryError, RemoteEvent, RemoteFunction, Role, SimpleShared, Value, ValueError,
};

/// The server side of a host. Outbound messages address one participant (or
/// all of them with [`Server::fire_all_clients`]); inbound callbacks see the
/// participant each message came from in [`Inbound::origin`].
pub struct Server {
    registry: Registry,
}

impl Server {
    /// Create a new Server on `host`, with its own channel registry
    pub fn new(host: &Host) -> Self {
        Self {
            registry: Registry::new(Role::Server, host.clone()),
        }
    }

    pub fn host(&self) -> &Host {
        self.registry.host()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Returns the participants currently connected to the host
    pub fn participants(&self) -> Vec<ParticipantId> {
        self.host().participants()
    }

    /// Fires the remote event `name` to every connected participant
    pub fn fire_all_clients(&self, name: &str, args: Args) {
        self.fire_to(name, Target::AllClients, args);
    }

    /// Creates the remote event `name` ahead of its first use. Fails if it
    /// already exists, whether registered before or created on first use.
    pub fn register(&self, name: &str) -> Result<(), RegistryError> {
        self.registry.preregister_as::<RemoteEvent>(name).map(|_| ())
    }

    /// Creates the remote function `name` ahead of its first use.
    pub fn register_function(&self, name: &str) -> Result<(), RegistryError> {
        self.registry.preregister_as::<RemoteFunction>(name).map(|_| ())
    }

    fn fire_to(&self, name: &str, target: Target, args: Args) {
        let event = self.registry.resolve_as::<RemoteEvent>(name);
        if let Err(error) = adapter::call(self.host(), &event, Side::Server, target, args) {
            warn!("{error}");
        }
    }
}

impl SimpleShared for Server {
    type Target = ParticipantId;

    fn on<F>(&self, name: &str, callback: F) -> Connection
    where
        F: Fn(&Inbound) + Send + Sync + 'static,
    {
        let event = self.registry.resolve_as::<RemoteEvent>(name);
        adapter::connect(self.host(), &event, Side::Server, callback)
    }

    fn once<F>(&self, name: &str, callback: F)
    where
        F: FnOnce(&Inbound) + Send + 'static,
    {
        let event = self.registry.resolve_as::<RemoteEvent>(name);
        adapter::connect_once(self.host(), &event, Side::Server, callback);
    }

    fn fire(&self, name: &str, target: ParticipantId, args: Args) {
        self.fire_to(name, Target::Participant(target), args);
    }

    fn invoke<T>(
        &self,
        name: &str,
        target: ParticipantId,
        args: Args,
    ) -> impl Future<Output = Result<T, InvokeError>> + Send
    where
        T: TryFrom<Value> + Send,
        ValueError: From<T::Error>,
    {
        let host = self.host().clone();
        let function = self.registry.resolve_as::<RemoteFunction>(name);
        async move {
            adapter::invoke(&host, &function, Side::Server, Target::Participant(target), args).await
        }
    }

    fn set_callback<F, Fut>(&self, name: &str, callback: F)
    where
        F: Fn(Inbound) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Value> + Send + 'static,
    {
        let function = self.registry.resolve_as::<RemoteFunction>(name);
        adapter::set_callback(self.host(), &function, Side::Server, reply_handler(callback));
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
