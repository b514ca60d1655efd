use std::fmt::{Debug, Formatter};

use crate::constants::DEFAULT_THREAD_NAME;

/// Where asynchronous handlers run.
#[derive(Clone, Default)]
pub enum AsyncDispatch {
    /// Spawn a fresh OS thread for every asynchronous invocation.
    #[default]
    Thread,

    /// Run asynchronous invocations on the blocking pool of a Tokio runtime.
    #[cfg(feature = "tokio")]
    Runtime(tokio::runtime::Handle),
}

impl Debug for AsyncDispatch {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AsyncDispatch::Thread => write!(f, "Thread"),
            #[cfg(feature = "tokio")]
            AsyncDispatch::Runtime(_) => write!(f, "Runtime"),
        }
    }
}

/// Settings for an [`EventManager`](crate::EventManager).
///
/// # Example
/// ```
/// use event_watch::{AsyncDispatch, EventManager, ManagerConfig};
///
/// let config = ManagerConfig::default()
///     .with_thread_name("sensor-events")
///     .with_dispatch(AsyncDispatch::Thread);
/// let manager = EventManager::with_config(config);
/// assert_eq!(manager.config().thread_name(), "sensor-events");
/// ```
#[derive(Clone, Debug)]
pub struct ManagerConfig {
    thread_name: String,
    dispatch: AsyncDispatch,
}

impl ManagerConfig {
    /// Name for threads running asynchronous handlers.
    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }

    /// Choose where asynchronous handlers run.
    pub fn with_dispatch(mut self, dispatch: AsyncDispatch) -> Self {
        self.dispatch = dispatch;
        self
    }

    pub fn thread_name(&self) -> &str {
        &self.thread_name
    }

    pub fn dispatch(&self) -> &AsyncDispatch {
        &self.dispatch
    }
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            thread_name: DEFAULT_THREAD_NAME.to_string(),
            dispatch: AsyncDispatch::default(),
        }
    }
}
