use std::sync::{Arc, Mutex};

use log::debug;

use crate::{
    host::{
        Backing, BackingObject, BindableEvent, Host, Namespace, ObjectTables, RemoteEvent,
        RemoteFunction,
    },
    sync::lock,
    ChannelKind, InvalidRoleOperation, RegistryError, Role,
};

/// Per-role memo from channel name to backing object.
///
/// Remote events and functions are found in, or created in, the host's shared
/// container; bindables live in a container private to this registry. Either
/// way the first resolution of a (kind, name) pair fixes the object and every
/// later one returns the same instance.
pub struct Registry {
    role: Role,
    host: Host,
    local: Namespace,
    entries: Mutex<ObjectTables>,
}

impl Registry {
    pub fn new(role: Role, host: Host) -> Self {
        Self {
            role,
            local: Namespace::new(host.config().clone()),
            host,
            entries: Mutex::new(ObjectTables::default()),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn host(&self) -> &Host {
        &self.host
    }

    pub fn contains(&self, kind: ChannelKind, name: &str) -> bool {
        lock(&self.entries).contains(kind, name)
    }

    pub fn resolve(&self, kind: ChannelKind, name: &str) -> BackingObject {
        match kind {
            ChannelKind::Event => RemoteEvent::into_object(self.resolve_as(name)),
            ChannelKind::Function => RemoteFunction::into_object(self.resolve_as(name)),
            ChannelKind::Bindable => BindableEvent::into_object(self.resolve_as(name)),
        }
    }

    /// Returns the object backing `name`, creating it on first use.
    pub fn resolve_as<B: Backing>(&self, name: &str) -> Arc<B> {
        // held across the create-if-absent step
        let mut entries = lock(&self.entries);
        if let Some(existing) = B::table(&mut entries).get(name) {
            return existing.clone();
        }

        let (object, created) = self.container::<B>().find_or_create::<B>(name);
        if created {
            debug!("{} created {} channel {:?}", self.role, B::KIND, name);
        } else {
            debug!("{} adopted existing {} channel {:?}", self.role, B::KIND, name);
        }
        B::table(&mut entries).insert(name.to_owned(), object.clone());
        object
    }

    pub fn preregister(
        &self,
        kind: ChannelKind,
        name: &str,
    ) -> Result<BackingObject, RegistryError> {
        Ok(match kind {
            ChannelKind::Event => RemoteEvent::into_object(self.preregister_as(name)?),
            ChannelKind::Function => RemoteFunction::into_object(self.preregister_as(name)?),
            ChannelKind::Bindable => BindableEvent::into_object(self.preregister_as(name)?),
        })
    }

    /// Creates the object backing `name` ahead of first use. Fails if any role
    /// already created it, including by resolving it.
    pub fn preregister_as<B: Backing>(&self, name: &str) -> Result<Arc<B>, RegistryError> {
        if self.role != Role::Server {
            return Err(InvalidRoleOperation {
                operation: "register",
                role: self.role,
            }
            .into());
        }

        let duplicate = || RegistryError::DuplicateChannel {
            kind: B::KIND,
            name: name.to_owned(),
        };

        let mut entries = lock(&self.entries);
        if B::table(&mut entries).contains_key(name) {
            return Err(duplicate());
        }
        let object = self
            .container::<B>()
            .create_exclusive::<B>(name)
            .ok_or_else(duplicate)?;

        debug!("{} preregistered {} channel {:?}", self.role, B::KIND, name);
        B::table(&mut entries).insert(name.to_owned(), object.clone());
        Ok(object)
    }

    fn container<B: Backing>(&self) -> &Namespace {
        if B::KIND.is_replicated() {
            self.host.namespace()
        } else {
            &self.local
        }
    }
}
