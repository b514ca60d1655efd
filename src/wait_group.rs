use std::sync::Arc;

use parking_lot::{Condvar, Mutex};

/// Counts asynchronous invocations that have been scheduled but not finished.
///
/// Every scheduled invocation holds an [`InFlight`] guard; dropping the guard,
/// on return or on unwind, marks the invocation finished.
#[derive(Clone, Default)]
pub(crate) struct WaitGroup {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    outstanding: Mutex<usize>,
    idle: Condvar,
}

impl WaitGroup {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Register one unit of outstanding work.
    pub(crate) fn add(&self) -> InFlight {
        *self.inner.outstanding.lock() += 1;
        InFlight {
            inner: Arc::clone(&self.inner),
        }
    }

    /// Number of units not yet finished.
    pub(crate) fn pending(&self) -> usize {
        *self.inner.outstanding.lock()
    }

    /// Block until every registered unit has finished.
    pub(crate) fn wait(&self) {
        let mut outstanding = self.inner.outstanding.lock();
        while *outstanding > 0 {
            self.inner.idle.wait(&mut outstanding);
        }
    }
}

/// Guard for one outstanding unit of a [`WaitGroup`].
#[must_use = "dropping the guard marks the work finished"]
pub(crate) struct InFlight {
    inner: Arc<Inner>,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        let mut outstanding = self.inner.outstanding.lock();
        *outstanding -= 1;
        if *outstanding == 0 {
            self.inner.idle.notify_all();
        }
    }
}
