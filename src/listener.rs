use std::fmt::{Debug, Formatter};

use crate::Handler;

/// One subscription of a [`Handler`] to an event.
///
/// Holds the handler, an optional remaining-invocation count and whether it is
/// run inline or on its own thread. Counts are only touched while the owning
/// manager's lock is held, so no atomics are needed here.
#[derive(Clone)]
pub struct Registration {
    handler: Handler,
    remaining: Option<u64>,
    is_async: bool,
}

impl Registration {
    /// Create a registration. `None` as `remaining` means unlimited; a count
    /// must be positive.
    pub(crate) fn new(handler: Handler, remaining: Option<u64>, is_async: bool) -> Self {
        debug_assert!(remaining != Some(0), "registration created with a zero count");
        Self {
            handler,
            remaining,
            is_async,
        }
    }

    pub fn handler(&self) -> &Handler {
        &self.handler
    }

    /// Remaining invocations, `-1` when unlimited.
    pub fn remaining(&self) -> i64 {
        self.remaining
            .map_or(-1, |n| i64::try_from(n).unwrap_or(i64::MAX))
    }

    pub fn is_async(&self) -> bool {
        self.is_async
    }

    /// Account for one trigger.
    ///
    /// Returns `false` when this was the last allowed invocation and the
    /// registration must leave the table.
    #[inline]
    pub(crate) fn consume(&mut self) -> bool {
        match self.remaining.as_mut() {
            None => true,
            Some(count) => {
                *count -= 1;
                *count > 0
            }
        }
    }
}

impl Debug for Registration {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("remaining", &self.remaining())
            .field("is_async", &self.is_async)
            .finish()
    }
}
