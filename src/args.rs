use std::any::{type_name, Any};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use crate::Arg;

/// The argument list passed to every handler of a trigger.
///
/// Cloning is cheap: all clones share one slice, so the same list can be handed
/// to synchronous handlers and to every spawned asynchronous handler.
///
/// Build one with the [`args!`](crate::args) macro or from a `Vec<Arg>`.
#[derive(Clone)]
pub struct Args(Arc<[Arg]>);

impl Args {
    /// An empty argument list.
    pub fn empty() -> Self {
        Self(Arc::from(Vec::new()))
    }

    /// Number of arguments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the argument at `position` as a `T`.
    ///
    /// Returns `None` when the position is out of range or holds another type.
    ///
    /// # Example
    /// ```
    /// use event_watch::args;
    ///
    /// let args = args![7_u32, "seven"];
    /// assert_eq!(args.get::<u32>(0), Some(&7));
    /// assert_eq!(args.get::<&str>(1), Some(&"seven"));
    /// assert_eq!(args.get::<u32>(1), None);
    /// ```
    pub fn get<T: Any>(&self, position: usize) -> Option<&T> {
        self.0.get(position).and_then(|arg| arg.downcast_ref::<T>())
    }

    /// Iterate over the raw arguments.
    pub fn iter(&self) -> impl Iterator<Item = &Arg> {
        self.0.iter()
    }

    /// Panics unless exactly `arity` arguments were supplied.
    pub(crate) fn expect_arity(&self, arity: usize) {
        if self.len() != arity {
            panic!(
                "handler expects {arity} argument(s), trigger supplied {}",
                self.len()
            );
        }
    }

    /// Panics unless the argument at `position` is a `T`.
    pub(crate) fn expect<T: Any>(&self, position: usize) -> &T {
        self.get::<T>(position).unwrap_or_else(|| {
            panic!("argument {position} is not a `{}`", type_name::<T>())
        })
    }
}

impl Default for Args {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Vec<Arg>> for Args {
    fn from(values: Vec<Arg>) -> Self {
        Self(Arc::from(values))
    }
}

impl Debug for Args {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Args").field("len", &self.len()).finish()
    }
}

/// Build an [`Args`] list from values.
///
/// Every value must be `Send + Sync + 'static`. Literals keep their default
/// types, so `args![2]` carries an `i32`.
///
/// # Example
/// ```
/// use event_watch::args;
///
/// let none = args![];
/// assert!(none.is_empty());
///
/// let two = args![2, String::from("two")];
/// assert_eq!(two.len(), 2);
/// assert_eq!(two.get::<i32>(0), Some(&2));
/// ```
#[macro_export]
macro_rules! args {
    () => {
        $crate::Args::empty()
    };
    ($($value:expr),+ $(,)?) => {
        $crate::Args::from(::std::vec![
            $(::std::sync::Arc::new($value) as $crate::Arg),+
        ])
    };
}
