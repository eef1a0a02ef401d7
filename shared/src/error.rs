use std::time::Duration;

use thiserror::Error;

use crate::{ChannelKind, ParticipantId, Role, ValueError};

/// A role-specific operation was attempted from the other role.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{operation}` cannot be used from the {role} role")]
pub struct InvalidRoleOperation {
    pub operation: &'static str,
    pub role: Role,
}

/// Errors that can occur while resolving or preregistering channels
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The channel already exists, either preregistered or created on first use
    #[error("{kind} channel {name:?} already exists. Preregistration must happen once, before anything resolves the channel")]
    DuplicateChannel { kind: ChannelKind, name: String },

    /// Preregistration attempted from a role that does not own channel creation
    #[error(transparent)]
    InvalidRoleOperation(#[from] InvalidRoleOperation),
}

/// Errors that can occur while invoking a remote function
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvokeError {
    /// The remote side never set a reply callback for this function
    #[error("Function {name:?} has no reply callback on the remote side. Call set_callback() there before invoking")]
    NoHandler { name: String },

    /// The host's invoke timeout elapsed before a reply arrived
    #[error("Invocation of function {name:?} timed out after {timeout:?} without a reply")]
    Timeout { name: String, timeout: Duration },

    /// The participant on the other end is not connected, or left mid-call
    #[error("Invocation of function {name:?} failed because {participant} is not connected")]
    ParticipantDisconnected { name: String, participant: ParticipantId },

    /// The reply callback panicked instead of producing a value
    #[error("Reply callback for function {name:?} failed before producing a value")]
    HandlerFailed { name: String },

    /// The reply did not convert into the type the caller asked for
    #[error("Reply from function {name:?} has the wrong type: {source}")]
    UnexpectedReply { name: String, source: ValueError },

    /// The invoke target does not fit the calling role
    #[error(transparent)]
    InvalidRoleOperation(#[from] InvalidRoleOperation),
}
