//! Ordered callback lists with detachable connections.
//!
//! Every host primitive is built on [`Signal`]: remote events keep one for the
//! server side and one per connected participant, bindable events keep one,
//! and [`BindableRef`] exposes one directly as a local signal.

mod bindable_ref;

pub use bindable_ref::BindableRef;

use std::{
    fmt,
    panic::{self, AssertUnwindSafe},
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex, Weak,
    },
};

use log::error;

use crate::sync::lock;

type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Slots<T> {
    listeners: Mutex<Vec<(u64, Listener<T>)>>,
    next_id: AtomicU64,
    catch_panics: bool,
}

impl<T> Slots<T> {
    fn allocate_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    fn remove(&self, id: u64) {
        lock(&self.listeners).retain(|(listener_id, _)| *listener_id != id);
    }

    fn contains(&self, id: u64) -> bool {
        lock(&self.listeners)
            .iter()
            .any(|(listener_id, _)| *listener_id == id)
    }
}

// Type-erased view of a Slots<T>, so a Connection does not carry T.
trait Detach: Send + Sync {
    fn detach(&self, id: u64);
    fn is_attached(&self, id: u64) -> bool;
}

impl<T: 'static> Detach for Slots<T> {
    fn detach(&self, id: u64) {
        self.remove(id);
    }

    fn is_attached(&self, id: u64) -> bool {
        self.contains(id)
    }
}

/// A live subscription returned when a callback is connected.
///
/// Dropping a `Connection` does **not** disconnect it; call
/// [`Connection::disconnect`]. The connection also ends on its own when the
/// signal that owns it is destroyed, or after a `once` callback has run.
#[derive(Clone)]
pub struct Connection {
    slots: Weak<dyn Detach>,
    id: u64,
}

impl Connection {
    /// A connection that was never attached to anything, returned when the
    /// owning side is already gone.
    pub(crate) fn detached() -> Self {
        let slots: Weak<dyn Detach> = Weak::<Slots<()>>::new();
        Self { slots, id: 0 }
    }

    /// Removes the callback from its signal. Calling this more than once, or on
    /// a connection whose signal is gone, does nothing.
    pub fn disconnect(&self) {
        if let Some(slots) = self.slots.upgrade() {
            slots.detach(self.id);
        }
    }

    pub fn is_connected(&self) -> bool {
        self.slots
            .upgrade()
            .is_some_and(|slots| slots.is_attached(self.id))
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("id", &self.id)
            .field("connected", &self.is_connected())
            .finish()
    }
}

pub(crate) struct Signal<T> {
    slots: Arc<Slots<T>>,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
        }
    }
}

impl<T: 'static> Signal<T> {
    pub fn new(catch_panics: bool) -> Self {
        Self {
            slots: Arc::new(Slots {
                listeners: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(1),
                catch_panics,
            }),
        }
    }

    pub fn connect<F>(&self, callback: F) -> Connection
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = self.slots.allocate_id();
        self.attach(id, Arc::new(callback))
    }

    /// Connects `callback` so that it runs for the next firing only. Nothing
    /// waits here: the listener detaches itself the first time it is called.
    pub fn once<F>(&self, callback: F) -> Connection
    where
        F: FnOnce(&T) + Send + 'static,
    {
        let id = self.slots.allocate_id();
        let slots = Arc::downgrade(&self.slots);
        let pending = Mutex::new(Some(callback));

        self.attach(
            id,
            Arc::new(move |value: &T| {
                let Some(callback) = lock(&pending).take() else {
                    return;
                };
                if let Some(slots) = slots.upgrade() {
                    slots.remove(id);
                }
                callback(value);
            }),
        )
    }

    /// Calls every connected listener in connection order. Iterates a snapshot,
    /// so listeners may connect or disconnect (themselves or others) while the
    /// dispatch is running; one disconnected before its turn is skipped.
    pub fn fire(&self, value: &T) {
        let snapshot: Vec<(u64, Listener<T>)> = lock(&self.slots.listeners).clone();

        for (id, listener) in snapshot {
            if !self.slots.contains(id) {
                continue;
            }
            if !self.slots.catch_panics {
                listener(value);
                continue;
            }
            if panic::catch_unwind(AssertUnwindSafe(|| listener(value))).is_err() {
                error!("Listener #{id} panicked during dispatch, remaining listeners still run");
            }
        }
    }

    pub fn listener_count(&self) -> usize {
        lock(&self.slots.listeners).len()
    }

    /// Detaches every listener, ending all outstanding connections.
    pub fn clear(&self) {
        lock(&self.slots.listeners).clear();
    }

    fn attach(&self, id: u64, listener: Listener<T>) -> Connection {
        lock(&self.slots.listeners).push((id, listener));
        let slots: Weak<dyn Detach> = Arc::downgrade(&self.slots) as Weak<dyn Detach>;
        Connection { slots, id }
    }
}
