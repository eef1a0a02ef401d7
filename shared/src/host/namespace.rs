use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, Mutex},
};

use crate::{sync::lock, ChannelKind, HostConfig, ParticipantId};

use super::{BindableEvent, RemoteEvent, RemoteFunction};

/// Name-indexed storage with one table per [`ChannelKind`].
#[derive(Default)]
pub struct ObjectTables {
    pub(super) events: HashMap<String, Arc<RemoteEvent>>,
    pub(super) functions: HashMap<String, Arc<RemoteFunction>>,
    pub(super) bindables: HashMap<String, Arc<BindableEvent>>,
}

impl ObjectTables {
    pub fn contains(&self, kind: ChannelKind, name: &str) -> bool {
        match kind {
            ChannelKind::Event => self.events.contains_key(name),
            ChannelKind::Function => self.functions.contains_key(name),
            ChannelKind::Bindable => self.bindables.contains_key(name),
        }
    }
}

/// A host object that can back a channel of kind [`Backing::KIND`].
pub trait Backing: Send + Sync + Sized + 'static {
    const KIND: ChannelKind;

    fn create(name: &str, config: &HostConfig) -> Self;

    fn table(tables: &mut ObjectTables) -> &mut HashMap<String, Arc<Self>>;

    fn into_object(this: Arc<Self>) -> BackingObject;
}

/// Any backing object, tagged with its kind.
#[derive(Clone)]
pub enum BackingObject {
    Event(Arc<RemoteEvent>),
    Function(Arc<RemoteFunction>),
    Bindable(Arc<BindableEvent>),
}

impl BackingObject {
    pub fn kind(&self) -> ChannelKind {
        match self {
            BackingObject::Event(_) => ChannelKind::Event,
            BackingObject::Function(_) => ChannelKind::Function,
            BackingObject::Bindable(_) => ChannelKind::Bindable,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            BackingObject::Event(event) => event.name(),
            BackingObject::Function(function) => function.name(),
            BackingObject::Bindable(bindable) => bindable.name(),
        }
    }

    /// Whether both handles point at the very same host object.
    pub fn same_object(&self, other: &BackingObject) -> bool {
        match (self, other) {
            (BackingObject::Event(a), BackingObject::Event(b)) => Arc::ptr_eq(a, b),
            (BackingObject::Function(a), BackingObject::Function(b)) => Arc::ptr_eq(a, b),
            (BackingObject::Bindable(a), BackingObject::Bindable(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for BackingObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackingObject")
            .field("kind", &self.kind())
            .field("name", &self.name())
            .finish()
    }
}

/// A container of named host objects. Creation is create-if-absent under one
/// lock, so two racing lookups of a missing name still yield one object.
pub struct Namespace {
    config: HostConfig,
    tables: Mutex<ObjectTables>,
}

impl Namespace {
    pub(crate) fn new(config: HostConfig) -> Self {
        Self {
            config,
            tables: Mutex::new(ObjectTables::default()),
        }
    }

    pub fn find<B: Backing>(&self, name: &str) -> Option<Arc<B>> {
        B::table(&mut lock(&self.tables)).get(name).cloned()
    }

    pub fn contains(&self, kind: ChannelKind, name: &str) -> bool {
        lock(&self.tables).contains(kind, name)
    }

    /// Returns the object named `name`, creating it if missing. The flag tells
    /// whether this call did the creating.
    pub fn find_or_create<B: Backing>(&self, name: &str) -> (Arc<B>, bool) {
        let mut tables = lock(&self.tables);
        let table = B::table(&mut tables);
        if let Some(existing) = table.get(name) {
            return (existing.clone(), false);
        }
        let created = Arc::new(B::create(name, &self.config));
        table.insert(name.to_owned(), created.clone());
        (created, true)
    }

    /// Creates the object named `name`, or returns `None` if it already exists.
    pub fn create_exclusive<B: Backing>(&self, name: &str) -> Option<Arc<B>> {
        let mut tables = lock(&self.tables);
        let table = B::table(&mut tables);
        if table.contains_key(name) {
            return None;
        }
        let created = Arc::new(B::create(name, &self.config));
        table.insert(name.to_owned(), created.clone());
        Some(created)
    }

    /// Drops every per-participant piece of state held by remote objects.
    pub(crate) fn forget_participant(&self, participant: ParticipantId) {
        let (events, functions): (Vec<Arc<RemoteEvent>>, Vec<Arc<RemoteFunction>>) = {
            let tables = lock(&self.tables);
            (
                tables.events.values().cloned().collect(),
                tables.functions.values().cloned().collect(),
            )
        };

        for event in events {
            event.forget(participant);
        }
        for function in functions {
            function.forget(participant);
        }
    }
}
