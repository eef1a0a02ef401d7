//! # Simple Client
//! The client role over a host: joins as a participant, resolves named
//! channels on demand, and talks to the server.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

pub mod shared {
    pub use simple_shared::{
        args, Args, BindableRef, Connection, Host, HostConfig, Inbound, InvokeError,
        ParticipantId, SimpleShared, Value, ValueError,
    };
}

mod client;

pub use client::Client;
