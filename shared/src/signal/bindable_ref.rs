use super::{Connection, Signal};

/// A typed, standalone signal for decoupling modules inside one process.
///
/// Nothing is looked up by name: whoever holds a `BindableRef` (or a clone of
/// it, which shares the same signal) can connect and fire. Two separately
/// constructed refs never see each other's firings, even with the same `T`.
///
/// ```
/// use simple_shared::BindableRef;
///
/// let something_happened = BindableRef::<(i64, String)>::new();
/// let connection = something_happened.connect(|(number, text)| {
///     assert_eq!((*number, text.as_str()), (5, "foo"));
/// });
/// something_happened.fire((5, "foo".to_string()));
/// connection.disconnect();
/// ```
pub struct BindableRef<T> {
    signal: Signal<T>,
}

impl<T: 'static> BindableRef<T> {
    pub fn new() -> Self {
        Self {
            signal: Signal::new(true),
        }
    }

    pub fn connect<F>(&self, callback: F) -> Connection
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.signal.connect(callback)
    }

    /// Connects `callback` for the next firing only.
    pub fn once<F>(&self, callback: F) -> Connection
    where
        F: FnOnce(&T) + Send + 'static,
    {
        self.signal.once(callback)
    }

    /// Dispatches `value` synchronously to every connected callback, in
    /// connection order.
    pub fn fire(&self, value: T) {
        self.signal.fire(&value);
    }

    pub fn connection_count(&self) -> usize {
        self.signal.listener_count()
    }
}

impl<T: 'static> Default for BindableRef<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for BindableRef<T> {
    fn clone(&self) -> Self {
        Self {
            signal: self.signal.clone(),
        }
    }
}
