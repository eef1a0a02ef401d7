use std::future::Future;

use crate::{host::Inbound, Args, Connection, InvokeError, Value, ValueError};

/// The operations both role facades provide.
///
/// The two sides differ only in addressing. Outbound, a server must name the
/// participant it talks to, while a client always talks to the server: that is
/// [`SimpleShared::Target`]. Inbound, the server learns who sent a message
/// through [`Inbound::origin`], which is always `None` on a client.
///
/// Channel names are resolved on first use; see [`crate::Registry`].
pub trait SimpleShared {
    /// `ParticipantId` on the server, `()` on the client.
    type Target: Copy + Send + 'static;

    /// Connects `callback` to the remote event `name`.
    fn on<F>(&self, name: &str, callback: F) -> Connection
    where
        F: Fn(&Inbound) + Send + Sync + 'static;

    /// Connects `callback` to the next delivery of the remote event `name`
    /// only. Returns at once; nothing waits for the event.
    fn once<F>(&self, name: &str, callback: F)
    where
        F: FnOnce(&Inbound) + Send + 'static;

    /// Fires the remote event `name`. Best effort, never fails.
    fn fire(&self, name: &str, target: Self::Target, args: Args);

    /// Invokes the remote function `name` and waits for its reply.
    fn invoke<T>(
        &self,
        name: &str,
        target: Self::Target,
        args: Args,
    ) -> impl Future<Output = Result<T, InvokeError>> + Send
    where
        T: TryFrom<Value> + Send,
        ValueError: From<T::Error>;

    /// Sets this side's reply callback for the remote function `name`. The
    /// last callback set wins.
    fn set_callback<F, Fut>(&self, name: &str, callback: F)
    where
        F: Fn(Inbound) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Value> + Send + 'static;

    fn fire_bindable(&self, name: &str, args: Args);

    fn on_bindable<F>(&self, name: &str, callback: F) -> Connection
    where
        F: Fn(&Args) + Send + Sync + 'static;

    fn once_bindable<F>(&self, name: &str, callback: F)
    where
        F: FnOnce(&Args) + Send + 'static;
}
