use std::{default::Default, time::Duration};

/// Contains Config properties which will be used by the Host
#[derive(Clone, Debug)]
pub struct HostConfig {
    /// How long an invocation waits for its reply before failing with
    /// `InvokeError::Timeout`. `None` waits until the reply arrives or the
    /// participant on the other end leaves.
    pub invoke_timeout: Option<Duration>,
    /// Whether a panicking listener is caught and logged, letting the rest of
    /// the listeners on the same signal still run. When disabled the panic
    /// unwinds out of `fire`.
    pub catch_listener_panics: bool,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            invoke_timeout: Some(Duration::from_secs(30)),
            catch_listener_panics: true,
        }
    }
}
