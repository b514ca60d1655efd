//! Process-wide default [`EventManager`] and free functions delegating to it.
//!
//! Handy for small programs. Libraries and tests should own their manager
//! instead of sharing this one.

use std::collections::HashSet;
use std::sync::LazyLock;

use crate::{Args, EventError, EventManager, Handler, IntoHandler};

static DEFAULT_MANAGER: LazyLock<EventManager> = LazyLock::new(EventManager::new);

/// The process-wide manager behind the free functions of this crate.
pub fn default_manager() -> &'static EventManager {
    &DEFAULT_MANAGER
}

/// [`EventManager::watch`] on the default manager.
pub fn watch(event: &str, handler: impl IntoHandler) -> Result<(), EventError> {
    DEFAULT_MANAGER.watch(event, handler)
}

/// [`EventManager::watch_num`] on the default manager.
pub fn watch_num(event: &str, handler: impl IntoHandler, num: i64) -> Result<(), EventError> {
    DEFAULT_MANAGER.watch_num(event, handler, num)
}

/// [`EventManager::watch_once`] on the default manager.
pub fn watch_once(event: &str, handler: impl IntoHandler) -> Result<(), EventError> {
    DEFAULT_MANAGER.watch_once(event, handler)
}

/// [`EventManager::watch_async`] on the default manager.
pub fn watch_async(event: &str, handler: impl IntoHandler) -> Result<(), EventError> {
    DEFAULT_MANAGER.watch_async(event, handler)
}

/// [`EventManager::watch_num_async`] on the default manager.
pub fn watch_num_async(event: &str, handler: impl IntoHandler, num: i64) -> Result<(), EventError> {
    DEFAULT_MANAGER.watch_num_async(event, handler, num)
}

/// [`EventManager::watch_once_async`] on the default manager.
pub fn watch_once_async(event: &str, handler: impl IntoHandler) -> Result<(), EventError> {
    DEFAULT_MANAGER.watch_once_async(event, handler)
}

/// [`EventManager::has_event`] on the default manager.
pub fn has_event(event: &str) -> bool {
    DEFAULT_MANAGER.has_event(event)
}

/// [`EventManager::events`] on the default manager.
pub fn events() -> HashSet<String> {
    DEFAULT_MANAGER.events()
}

/// [`EventManager::unwatch`] on the default manager.
pub fn unwatch(event: &str, handler: &Handler) -> Result<(), EventError> {
    DEFAULT_MANAGER.unwatch(event, handler)
}

/// [`EventManager::unwatch_event`] on the default manager.
pub fn unwatch_event(event: &str) -> Result<(), EventError> {
    DEFAULT_MANAGER.unwatch_event(event)
}

/// [`EventManager::clear`] on the default manager.
pub fn clear() {
    DEFAULT_MANAGER.clear()
}

/// [`EventManager::trigger`] on the default manager.
pub fn trigger(event: &str, args: Args) {
    DEFAULT_MANAGER.trigger(event, args)
}

/// [`EventManager::wait`] on the default manager.
pub fn wait() {
    DEFAULT_MANAGER.wait()
}
