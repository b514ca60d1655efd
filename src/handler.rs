use std::any::Any;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use crate::{Args, Callback, EventError};

/// A type-erased, shareable event handler.
///
/// Clones share the same callback, and identity (used by
/// [`EventManager::unwatch`](crate::EventManager::unwatch)) is pointer
/// equality of that callback. Keep a clone of the handler you watched if you
/// want to unwatch it later.
///
/// # Examples
///
/// Typed closure:
/// ```
/// use event_watch::{args, Handler};
///
/// let handler = Handler::from_fn(|delta: i32, label: &'static str| {
///     println!("{label}: {delta}");
/// });
/// handler.call(&args![2, "delta"]);
/// ```
///
/// Raw variadic callback:
/// ```
/// use event_watch::{args, Handler};
///
/// let handler = Handler::new(|args| println!("{} argument(s)", args.len()));
/// handler.call(&args![1, 2, 3]);
/// ```
#[derive(Clone)]
pub struct Handler {
    callback: Callback,
}

impl Handler {
    /// Wrap a callback that receives the raw argument list.
    pub fn new(callback: impl Fn(&Args) + Send + Sync + 'static) -> Self {
        Self { callback: Arc::new(callback) }
    }

    /// Wrap an ordinary closure taking up to six typed arguments.
    ///
    /// Arguments are downcast and cloned at call time. A trigger whose
    /// argument count or types do not match the closure panics on the thread
    /// running the handler.
    pub fn from_fn<F, Marker>(func: F) -> Self
    where
        F: Callable<Marker>,
        Marker: 'static,
    {
        Self::new(move |args: &Args| func.invoke(args))
    }

    /// Run the handler with `args` on the current thread.
    #[inline]
    pub fn call(&self, args: &Args) {
        (self.callback)(args);
    }

    /// Check whether two handlers share the same callback.
    #[inline]
    pub fn ptr_eq(&self, other: &Handler) -> bool {
        Arc::ptr_eq(&self.callback, &other.callback)
    }
}

impl From<Callback> for Handler {
    fn from(callback: Callback) -> Self {
        Self { callback }
    }
}

impl Debug for Handler {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Handler")
            .field("callback", &Arc::as_ptr(&self.callback).cast::<()>())
            .finish()
    }
}

impl PartialEq for Handler {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}
impl Eq for Handler {}

/// Closures that can be driven by an [`Args`] list.
///
/// Implemented for every `Fn` of arity 0 to 6 whose argument types are
/// `Clone + Send + Sync + 'static`. `Marker` is the closure's `fn` signature and
/// only exists to keep the implementations apart.
pub trait Callable<Marker>: Send + Sync + 'static {
    /// Downcast `args` and call the closure, panicking on a mismatch.
    fn invoke(&self, args: &Args);
}

macro_rules! impl_callable {
    ($arity:literal $(, $param:ident $value:ident)*) => {
        impl<Func $(, $param)*> Callable<fn($($param),*)> for Func
        where
            Func: Fn($($param),*) + Send + Sync + 'static,
            $($param: Any + Clone + Send + Sync,)*
        {
            #[allow(unused_mut, unused_variables, unused_assignments)]
            fn invoke(&self, args: &Args) {
                args.expect_arity($arity);
                let mut position = 0;
                $(
                    let $value = args.expect::<$param>(position).clone();
                    position += 1;
                )*
                (self)($($value),*)
            }
        }
    };
}

impl_callable!(0);
impl_callable!(1, A a);
impl_callable!(2, A a, B b);
impl_callable!(3, A a, B b, C c);
impl_callable!(4, A a, B b, C c, D d);
impl_callable!(5, A a, B b, C c, D d, E e);
impl_callable!(6, A a, B b, C c, D d, E e, G g);

/// Values that may be registered as a handler.
///
/// Typed values convert infallibly. Dynamically typed values (`dyn Any`) are
/// checked at watch time and rejected with [`EventError::InvalidHandler`]
/// unless they hold a [`Handler`] or a [`Callback`].
///
/// # Example
/// ```
/// use std::any::Any;
/// use event_watch::{EventError, Handler, IntoHandler};
///
/// let not_a_handler: Box<dyn Any + Send + Sync> = Box::new("what");
/// assert_eq!(not_a_handler.into_handler().unwrap_err(), EventError::InvalidHandler);
///
/// let boxed: Box<dyn Any + Send + Sync> = Box::new(Handler::new(|_| {}));
/// assert!(boxed.into_handler().is_ok());
/// ```
pub trait IntoHandler {
    fn into_handler(self) -> Result<Handler, EventError>;
}

impl IntoHandler for Handler {
    fn into_handler(self) -> Result<Handler, EventError> {
        Ok(self)
    }
}

impl IntoHandler for &Handler {
    fn into_handler(self) -> Result<Handler, EventError> {
        Ok(self.clone())
    }
}

impl IntoHandler for Callback {
    fn into_handler(self) -> Result<Handler, EventError> {
        Ok(Handler::from(self))
    }
}

impl IntoHandler for Box<dyn Any + Send + Sync> {
    fn into_handler(self) -> Result<Handler, EventError> {
        let value = match self.downcast::<Handler>() {
            Ok(handler) => return Ok(*handler),
            Err(value) => value,
        };
        value
            .downcast::<Callback>()
            .map(|callback| Handler::from(*callback))
            .map_err(|_| EventError::InvalidHandler)
    }
}

impl IntoHandler for Arc<dyn Any + Send + Sync> {
    fn into_handler(self) -> Result<Handler, EventError> {
        if let Some(handler) = self.downcast_ref::<Handler>() {
            return Ok(handler.clone());
        }
        self.downcast_ref::<Callback>()
            .map(|callback| Handler::from(Arc::clone(callback)))
            .ok_or(EventError::InvalidHandler)
    }
}
