use std::collections::{HashMap, HashSet};
use std::fmt::{Debug, Formatter};
use std::thread;

use parking_lot::Mutex;
use tracing::{debug, error, trace};

use crate::wait_group::{InFlight, WaitGroup};
use crate::{Args, AsyncDispatch, EventError, Handler, IntoHandler, ManagerConfig, Registration};

type EventTable = HashMap<String, Vec<Registration>>;

/// An event manager that owns named events, their handlers and the
/// asynchronous invocations it has scheduled.
///
/// All methods take `&self`; share a manager between threads with an `Arc`.
///
/// # Locking
/// - One `parking_lot::Mutex` guards the whole event table. Every watch,
///   unwatch, query and the scan phase of [`trigger`](Self::trigger) hold it.
/// - The lock stays held while synchronous handlers run. A synchronous handler
///   that calls back into its own manager (to watch, unwatch or trigger)
///   deadlocks. Use an asynchronous registration for handlers that need to do
///   that.
/// - Asynchronous handlers run on their own thread, outside the lock.
///   [`wait`](Self::wait) never takes the lock.
///
/// # Example
/// ```
/// use std::sync::atomic::{AtomicI32, Ordering};
/// use std::sync::Arc;
/// use event_watch::{args, EventManager, Handler};
///
/// let manager = EventManager::new();
/// let total = Arc::new(AtomicI32::new(0));
///
/// let sum = Arc::clone(&total);
/// manager.watch("foo", Handler::from_fn(move |delta: i32| {
///     sum.fetch_add(delta, Ordering::SeqCst);
/// })).unwrap();
///
/// manager.trigger("foo", args![2]);
/// assert_eq!(total.load(Ordering::SeqCst), 2);
/// ```
pub struct EventManager {
    events: Mutex<EventTable>,
    in_flight: WaitGroup,
    config: ManagerConfig,
}

impl EventManager {
    /// Creates an `EventManager` with an empty event table and the default
    /// [`ManagerConfig`].
    pub fn new() -> Self {
        Self::with_config(ManagerConfig::default())
    }

    /// Creates an `EventManager` with an empty event table and explicit settings.
    pub fn with_config(config: ManagerConfig) -> Self {
        Self {
            events: Mutex::new(EventTable::new()),
            in_flight: WaitGroup::new(),
            config,
        }
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    /// Watch `event` with `handler` for every future trigger.
    ///
    /// # Returns
    /// * `Err(EventError::InvalidHandler)` if `handler` is not callable.
    pub fn watch(&self, event: &str, handler: impl IntoHandler) -> Result<(), EventError> {
        self.watch_impl(event, handler, None, false)
    }

    /// Watch `event` with `handler` for the next `num` triggers.
    ///
    /// # Returns
    /// * `Err(EventError::InvalidArgument)` if `num` is zero or negative.
    /// * `Err(EventError::InvalidHandler)` if `handler` is not callable.
    ///
    /// # Example
    /// ```
    /// use event_watch::{args, EventError, EventManager, Handler};
    ///
    /// let manager = EventManager::new();
    /// let handler = Handler::from_fn(|_: i32| {});
    /// assert_eq!(manager.watch_num("foo", &handler, 0), Err(EventError::InvalidArgument(0)));
    ///
    /// manager.watch_num("foo", &handler, 2).unwrap();
    /// manager.trigger("foo", args![1]);
    /// assert!(manager.has_event("foo"));
    /// manager.trigger("foo", args![1]);
    /// assert!(!manager.has_event("foo"));
    /// ```
    pub fn watch_num(&self, event: &str, handler: impl IntoHandler, num: i64) -> Result<(), EventError> {
        self.watch_impl(event, handler, Some(Self::positive(num)?), false)
    }

    /// Watch `event` with `handler` for the next trigger only.
    pub fn watch_once(&self, event: &str, handler: impl IntoHandler) -> Result<(), EventError> {
        self.watch_num(event, handler, 1)
    }

    /// Like [`watch`](Self::watch), but the handler runs on its own thread.
    pub fn watch_async(&self, event: &str, handler: impl IntoHandler) -> Result<(), EventError> {
        self.watch_impl(event, handler, None, true)
    }

    /// Like [`watch_num`](Self::watch_num), but the handler runs on its own thread.
    pub fn watch_num_async(&self, event: &str, handler: impl IntoHandler, num: i64) -> Result<(), EventError> {
        self.watch_impl(event, handler, Some(Self::positive(num)?), true)
    }

    /// Like [`watch_once`](Self::watch_once), but the handler runs on its own thread.
    pub fn watch_once_async(&self, event: &str, handler: impl IntoHandler) -> Result<(), EventError> {
        self.watch_num_async(event, handler, 1)
    }

    fn positive(num: i64) -> Result<u64, EventError> {
        u64::try_from(num)
            .ok()
            .filter(|&n| n > 0)
            .ok_or(EventError::InvalidArgument(num))
    }

    fn watch_impl(
        &self,
        event: &str,
        handler: impl IntoHandler,
        remaining: Option<u64>,
        is_async: bool,
    ) -> Result<(), EventError> {
        let mut events = self.events.lock();
        let handler = handler.into_handler()?;
        events
            .entry(event.to_string())
            .or_default()
            .push(Registration::new(handler, remaining, is_async));
        debug!(event, ?remaining, is_async, "watching event");
        Ok(())
    }

    /// Whether `event` has at least one registration.
    pub fn has_event(&self, event: &str) -> bool {
        self.events.lock().contains_key(event)
    }

    /// Names of every event with at least one registration, in no particular order.
    pub fn events(&self) -> HashSet<String> {
        self.events.lock().keys().cloned().collect()
    }

    /// Number of registrations for `event`, 0 when it is not watched.
    pub fn listener_count(&self, event: &str) -> usize {
        self.events.lock().get(event).map_or(0, Vec::len)
    }

    /// Snapshot of the registrations for `event` in invocation order.
    pub fn registrations(&self, event: &str) -> Vec<Registration> {
        self.events.lock().get(event).cloned().unwrap_or_default()
    }

    /// Number of asynchronous invocations scheduled but not yet finished.
    pub fn pending(&self) -> usize {
        self.in_flight.pending()
    }

    /// Remove the first registration of `handler` for `event`.
    ///
    /// # Returns
    /// * `Ok(())` if the event exists, even when `handler` was not one of its
    ///   registrations.
    /// * `Err(EventError::EventNotFound)` if the event has no registrations.
    ///
    /// # Example
    /// ```
    /// use event_watch::{EventError, EventManager, Handler};
    ///
    /// let manager = EventManager::new();
    /// let handler = Handler::new(|_| {});
    /// manager.watch("foo", &handler).unwrap();
    ///
    /// assert_eq!(manager.unwatch("foo", &handler), Ok(()));
    /// assert_eq!(manager.unwatch("foo", &handler), Err(EventError::EventNotFound("foo".into())));
    /// ```
    pub fn unwatch(&self, event: &str, handler: &Handler) -> Result<(), EventError> {
        let mut events = self.events.lock();
        if events.get(event).map_or(true, Vec::is_empty) {
            return Err(EventError::EventNotFound(event.to_string()));
        }
        let removed = Self::remove(&mut events, event, handler);
        debug!(event, removed, "unwatching handler");
        Ok(())
    }

    /// Remove `event` and all of its registrations.
    ///
    /// # Returns
    /// * `Err(EventError::EventNotFound)` if the event has no registrations.
    pub fn unwatch_event(&self, event: &str) -> Result<(), EventError> {
        match self.events.lock().remove(event) {
            Some(registrations) => {
                debug!(event, handlers = registrations.len(), "unwatching event");
                Ok(())
            }
            None => Err(EventError::EventNotFound(event.to_string())),
        }
    }

    /// Drop every event and registration.
    pub fn clear(&self) {
        let previous = std::mem::take(&mut *self.events.lock());
        debug!(events = previous.len(), "cleared event table");
    }

    fn remove(events: &mut EventTable, event: &str, handler: &Handler) -> bool {
        let Some(registrations) = events.get_mut(event) else {
            return false;
        };
        let Some(position) = registrations
            .iter()
            .position(|registration| registration.handler().ptr_eq(handler))
        else {
            return false;
        };
        registrations.remove(position);
        if registrations.is_empty() {
            events.remove(event);
        }
        true
    }

    /// Run every handler of `event` with `args`.
    ///
    /// Handlers run in the order they were watched. Each registration is
    /// counted down just before its handler runs, and one reaching zero leaves
    /// the table before it is invoked. Synchronous handlers have returned when
    /// `trigger` returns; asynchronous ones have only been started, see
    /// [`wait`](Self::wait).
    ///
    /// Triggering an event nobody watches does nothing.
    ///
    /// If no thread can be started for an asynchronous handler, it runs on the
    /// calling thread after the table lock is released, once every other
    /// handler of this trigger has been dispatched.
    ///
    /// # Panics
    /// A synchronous handler whose expected arguments do not match `args`
    /// panics on the calling thread. Registrations after it are left untouched.
    /// Asynchronous handlers panic on their own thread instead.
    pub fn trigger(&self, event: &str, args: Args) {
        let mut events = self.events.lock();
        if !events.contains_key(event) {
            trace!(event, "trigger without watchers");
            return;
        }
        trace!(event, args = args.len(), "triggering event");

        let mut stranded = Vec::new();
        let mut position = 0;
        loop {
            let Some(registrations) = events.get_mut(event) else {
                break;
            };
            let Some(registration) = registrations.get_mut(position) else {
                break;
            };
            let keep = registration.consume();
            let handler = registration.handler().clone();
            let is_async = registration.is_async();
            if keep {
                position += 1;
            } else {
                registrations.remove(position);
                if registrations.is_empty() {
                    events.remove(event);
                }
            }

            if is_async {
                stranded.extend(self.spawn(event, handler, args.clone()));
            } else {
                handler.call(&args);
            }
        }
        drop(events);

        for handler in stranded {
            handler.call(&args);
        }
    }

    /// Start `handler` off the calling thread.
    ///
    /// Returns the handler when it could not be started and must run inline.
    fn spawn(&self, event: &str, handler: Handler, args: Args) -> Option<Handler> {
        let in_flight = self.in_flight.add();
        match self.config.dispatch() {
            AsyncDispatch::Thread => {
                let spawned = spawn_thread(self.config.thread_name(), handler.clone(), args, in_flight);
                match spawned {
                    Ok(()) => None,
                    Err(err) => {
                        error!(event, %err, "failed to spawn handler thread, running inline");
                        Some(handler)
                    }
                }
            }
            #[cfg(feature = "tokio")]
            AsyncDispatch::Runtime(runtime) => {
                let job = RuntimeJob {
                    event: event.to_string(),
                    thread_name: self.config.thread_name().to_string(),
                    task: Some((handler, args, in_flight)),
                };
                runtime.spawn_blocking(move || job.run());
                None
            }
        }
    }

    /// Block until every asynchronous handler started by an earlier
    /// [`trigger`](Self::trigger) has finished.
    ///
    /// Handlers scheduled while waiting extend the wait. There is no timeout.
    ///
    /// # Example
    /// ```
    /// use std::sync::mpsc;
    /// use event_watch::{args, EventManager, Handler};
    ///
    /// let manager = EventManager::new();
    /// let (tx, rx) = mpsc::channel();
    /// manager.watch_async("foo", Handler::from_fn(move |word: &'static str| {
    ///     tx.send(word).unwrap();
    /// })).unwrap();
    ///
    /// manager.trigger("foo", args!["a"]);
    /// manager.wait();
    /// assert_eq!(rx.try_recv(), Ok("a"));
    /// ```
    pub fn wait(&self) {
        self.in_flight.wait();
    }
}

impl Default for EventManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for EventManager {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventManager")
            .field("events", &self.events.lock().len())
            .field("pending", &self.pending())
            .field("config", &self.config)
            .finish()
    }
}

fn spawn_thread(name: &str, handler: Handler, args: Args, in_flight: InFlight) -> std::io::Result<()> {
    thread::Builder::new()
        .name(name.to_string())
        .spawn(move || {
            let _in_flight = in_flight;
            handler.call(&args);
        })
        .map(drop)
}

/// An invocation handed to a Tokio blocking pool.
///
/// A runtime that is shutting down drops queued jobs without running them;
/// such a job moves its handler to a plain thread from `drop` instead.
#[cfg(feature = "tokio")]
struct RuntimeJob {
    event: String,
    thread_name: String,
    task: Option<(Handler, Args, InFlight)>,
}

#[cfg(feature = "tokio")]
impl RuntimeJob {
    fn run(mut self) {
        if let Some((handler, args, _in_flight)) = self.task.take() {
            handler.call(&args);
        }
    }
}

#[cfg(feature = "tokio")]
impl Drop for RuntimeJob {
    fn drop(&mut self) {
        let Some((handler, args, in_flight)) = self.task.take() else {
            return;
        };
        error!(event = %self.event, "runtime dropped handler, moving it to a thread");
        let fallback = (handler.clone(), args.clone());
        if let Err(err) = spawn_thread(&self.thread_name, handler, args, in_flight) {
            error!(event = %self.event, %err, "failed to spawn handler thread, running inline");
            let (handler, args) = fallback;
            handler.call(&args);
        }
    }
}
