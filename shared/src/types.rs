use std::fmt;

/// Which side of the client/server boundary an endpoint lives on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Server,
    Client,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Server => f.write_str("server"),
            Role::Client => f.write_str("client"),
        }
    }
}

/// The three kinds of backing object a channel name can refer to. Each kind is
/// its own namespace: an event and a function may share a name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChannelKind {
    /// Fire-and-forget remote event.
    Event,
    /// Request/response remote function.
    Function,
    /// Same-process bindable event.
    Bindable,
}

impl ChannelKind {
    pub const ALL: [ChannelKind; 3] = [
        ChannelKind::Event,
        ChannelKind::Function,
        ChannelKind::Bindable,
    ];

    /// Whether objects of this kind live in the host's shared container, visible
    /// to every role. Bindables stay local to the endpoint that made them.
    pub fn is_replicated(self) -> bool {
        !matches!(self, ChannelKind::Bindable)
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelKind::Event => f.write_str("event"),
            ChannelKind::Function => f.write_str("function"),
            ChannelKind::Bindable => f.write_str("bindable"),
        }
    }
}

// ParticipantId
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, PartialOrd, Ord)]
pub struct ParticipantId(u64);

impl ParticipantId {
    pub fn from_u64(value: u64) -> Self {
        ParticipantId(value)
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "participant#{}", self.0)
    }
}
