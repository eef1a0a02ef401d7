use std::{collections::HashMap, sync::Arc};

use crate::{signal::Signal, Args, ChannelKind, Connection, HostConfig};

use super::{Backing, BackingObject, ObjectTables};

/// Same-process event addressed by name. Never crosses the boundary: each
/// endpoint keeps its own bindables.
pub struct BindableEvent {
    name: String,
    signal: Signal<Args>,
}

impl BindableEvent {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn connect<F>(&self, callback: F) -> Connection
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.signal.connect(callback)
    }

    pub fn once<F>(&self, callback: F) -> Connection
    where
        F: FnOnce(&Args) + Send + 'static,
    {
        self.signal.once(callback)
    }

    pub fn fire(&self, args: Args) {
        self.signal.fire(&args);
    }

    pub fn listener_count(&self) -> usize {
        self.signal.listener_count()
    }
}

impl Backing for BindableEvent {
    const KIND: ChannelKind = ChannelKind::Bindable;

    fn create(name: &str, config: &HostConfig) -> Self {
        Self {
            name: name.to_owned(),
            signal: Signal::new(config.catch_listener_panics),
        }
    }

    fn table(tables: &mut ObjectTables) -> &mut HashMap<String, Arc<Self>> {
        &mut tables.bindables
    }

    fn into_object(this: Arc<Self>) -> BackingObject {
        BackingObject::Bindable(this)
    }
}
