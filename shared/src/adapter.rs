//! Turns the host's connect / fire / call primitives into the uniform shapes
//! both role facades expose.
//!
//! | Operation | Returns | Suspends |
//! |-----------|---------|----------|
//! | [`connect`] | [`Connection`] | no |
//! | [`connect_once`] | [`Connection`] | no |
//! | [`call`] | `Result<(), InvalidRoleOperation>` | no |
//! | [`invoke`] | `Result<T, InvokeError>` | until reply, timeout or departure |
//! | [`set_callback`] | `()` | no |

use log::{debug, warn};

use crate::{
    host::{Host, Inbound, RemoteEvent, RemoteFunction, ReplyHandler},
    signal::Signal,
    Args, Connection, InvalidRoleOperation, InvokeError, ParticipantId, Role, Value, ValueError,
};

/// The endpoint an operation runs on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Server,
    /// A client, identified by the participant it joined the host as.
    Client(ParticipantId),
}

impl Side {
    pub fn role(self) -> Role {
        match self {
            Side::Server => Role::Server,
            Side::Client(_) => Role::Client,
        }
    }
}

/// Where an outbound fire or invoke goes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    Server,
    Participant(ParticipantId),
    AllClients,
}

pub fn connect<F>(host: &Host, event: &RemoteEvent, side: Side, callback: F) -> Connection
where
    F: Fn(&Inbound) + Send + Sync + 'static,
{
    match inbound_signal(host, event, side) {
        Some(signal) => signal.connect(callback),
        None => Connection::detached(),
    }
}

/// Connects `callback` for the next delivery only. Returns immediately, even
/// if the event has never fired.
pub fn connect_once<F>(host: &Host, event: &RemoteEvent, side: Side, callback: F) -> Connection
where
    F: FnOnce(&Inbound) + Send + 'static,
{
    match inbound_signal(host, event, side) {
        Some(signal) => signal.once(callback),
        None => Connection::detached(),
    }
}

/// Fires `event` towards `target`. Delivery is best effort: a target that is
/// not connected is skipped without error.
pub fn call(
    host: &Host,
    event: &RemoteEvent,
    side: Side,
    target: Target,
    args: Args,
) -> Result<(), InvalidRoleOperation> {
    match (side, target) {
        (Side::Client(origin), Target::Server) => {
            if host.is_connected(origin) {
                event.fire_server(origin, args);
            } else {
                debug!("{origin} has left, dropping fire of event {:?}", event.name());
            }
        }
        (Side::Server, Target::Participant(participant)) => {
            if host.is_connected(participant) {
                event.fire_client(participant, args);
            } else {
                debug!("{participant} is not connected, dropping fire of event {:?}", event.name());
            }
        }
        (Side::Server, Target::AllClients) => {
            event.fire_all_clients(&host.participants(), args);
        }
        (side, target) => {
            return Err(InvalidRoleOperation {
                operation: fire_operation(target),
                role: side.role(),
            })
        }
    }
    Ok(())
}

/// Invokes `function` on `target` and waits for the reply, converted into `T`.
pub async fn invoke<T>(
    host: &Host,
    function: &RemoteFunction,
    side: Side,
    target: Target,
    args: Args,
) -> Result<T, InvokeError>
where
    T: TryFrom<Value>,
    ValueError: From<T::Error>,
{
    let (participant, handler, inbound) = match (side, target) {
        (Side::Client(origin), Target::Server) => (
            origin,
            function.server_handler(),
            Inbound {
                origin: Some(origin),
                args,
            },
        ),
        (Side::Server, Target::Participant(participant)) => (
            participant,
            function.client_handler(participant),
            Inbound { origin: None, args },
        ),
        (side, target) => {
            return Err(InvalidRoleOperation {
                operation: invoke_operation(target),
                role: side.role(),
            }
            .into())
        }
    };

    if !host.is_connected(participant) {
        return Err(InvokeError::ParticipantDisconnected {
            name: function.name().to_owned(),
            participant,
        });
    }
    let handler = handler.ok_or_else(|| InvokeError::NoHandler {
        name: function.name().to_owned(),
    })?;

    let reply = host
        .await_reply(function.name(), participant, handler, inbound)
        .await?;

    T::try_from(reply).map_err(|error| InvokeError::UnexpectedReply {
        name: function.name().to_owned(),
        source: error.into(),
    })
}

/// Installs `handler` as this side's reply callback, replacing any earlier one.
pub fn set_callback(host: &Host, function: &RemoteFunction, side: Side, handler: ReplyHandler) {
    match side {
        Side::Server => function.set_server_handler(handler),
        Side::Client(participant) if host.is_connected(participant) => {
            function.set_client_handler(participant, handler)
        }
        Side::Client(participant) => {
            warn!(
                "{participant} has left, ignoring reply callback for function {:?}",
                function.name()
            );
        }
    }
}

fn inbound_signal(host: &Host, event: &RemoteEvent, side: Side) -> Option<Signal<Inbound>> {
    match side {
        Side::Server => Some(event.server_signal()),
        Side::Client(participant) if host.is_connected(participant) => {
            Some(event.client_signal(participant))
        }
        Side::Client(participant) => {
            warn!("{participant} has left, not connecting to event {:?}", event.name());
            None
        }
    }
}

fn fire_operation(target: Target) -> &'static str {
    match target {
        Target::Server => "fire_server",
        Target::Participant(_) => "fire_client",
        Target::AllClients => "fire_all_clients",
    }
}

fn invoke_operation(target: Target) -> &'static str {
    match target {
        Target::Server => "invoke_server",
        Target::Participant(_) => "invoke_client",
        Target::AllClients => "invoke_all_clients",
    }
}
