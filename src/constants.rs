use std::any::Any;
use std::sync::Arc;

use crate::Args;

/// Type alias for a single trigger argument.
///
/// Any `'static` value that can cross threads. Handlers downcast it back to the
/// concrete type they expect.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use event_watch::Arg;
///
/// let arg: Arg = Arc::new(String::from("payload"));
/// assert_eq!(arg.downcast_ref::<String>().map(String::as_str), Some("payload"));
/// ```
pub type Arg = Arc<dyn Any + Send + Sync>;

/// Type alias for the raw, untyped callback stored behind every [`Handler`](crate::Handler).
///
/// - Receives the whole argument list of a trigger.
/// - Requires `Send + Sync` so async registrations can run it on another thread.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use event_watch::{Args, Callback};
///
/// let callback: Callback = Arc::new(|args: &Args| {
///     println!("triggered with {} argument(s)", args.len());
/// });
/// ```
pub type Callback = Arc<dyn Fn(&Args) + Send + Sync>;

/// Name given to threads running asynchronous handlers unless configured otherwise.
pub const DEFAULT_THREAD_NAME: &str = "event-watch";
