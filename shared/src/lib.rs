//! # Simple Shared
//! Common functionality shared between simple-server & simple-client crates:
//! named-channel resolution, the promise adapter over host primitives, and
//! local signals.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

pub mod adapter;
mod config;
mod contract;
mod error;
pub mod host;
mod registry;
mod signal;
mod sync;
mod types;
mod value;

pub use config::HostConfig;
pub use contract::SimpleShared;
pub use error::{InvalidRoleOperation, InvokeError, RegistryError};
pub use host::{
    reply_handler, Backing, BackingObject, BindableEvent, Host, Inbound, RemoteEvent,
    RemoteFunction, ReplyHandler,
};
pub use registry::Registry;
pub use signal::{BindableRef, Connection};
pub use types::{ChannelKind, ParticipantId, Role};
pub use value::{Args, Value, ValueError};
