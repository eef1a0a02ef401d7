//! # Simple Server
//! The server role over a host: resolves named channels on demand, sends to
//! one connected participant or all of them, and answers invocations.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

pub mod shared {
    pub use simple_shared::{
        args, Args, BindableRef, Connection, Host, HostConfig, Inbound, InvokeError,
        ParticipantId, RegistryError, SimpleShared, Value, ValueError,
    };
}

mod server;

pub use server::Server;
