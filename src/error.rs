use thiserror::Error;

/// Errors that can occur while watching or unwatching events.
///
/// - `InvalidHandler`: The value passed as a handler is not callable.
/// - `InvalidArgument`: A bounded watch was given a non-positive count.
/// - `EventNotFound`: Tried to unwatch an event that has no registrations.
///
/// None of them leave the event table partially modified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    /// Adding a Handler:
    /// - The value could not be converted into a `Handler`.
    #[error("handler is not callable")]
    InvalidHandler,

    /// Adding a bounded Handler:
    /// - The invocation count was zero or negative.
    #[error("invalid invocation count: {0}")]
    InvalidArgument(i64),

    /// Removing a Handler/Event:
    /// - The event name is not present in the table.
    #[error("event not found: {0}")]
    EventNotFound(String),
}
