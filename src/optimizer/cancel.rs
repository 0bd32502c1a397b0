//! Cooperative cancellation.
//!
//! The optimizer polls a [`CancellationCheck`] once per improvement
//! iteration and between restarts. When it reports `true` the search stops
//! and the best plan found so far is returned.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A polled stop signal.
///
/// # Examples
///
/// ```
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use waste_routing::optimizer::CancellationCheck;
///
/// let flag = AtomicBool::new(false);
/// assert!(!flag.is_cancelled());
/// flag.store(true, Ordering::Relaxed);
/// assert!(flag.is_cancelled());
/// ```
pub trait CancellationCheck {
    /// Returns `true` once the caller wants the search to stop.
    fn is_cancelled(&self) -> bool;
}

/// A check that never fires.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancel;

impl CancellationCheck for NeverCancel {
    fn is_cancelled(&self) -> bool {
        false
    }
}

impl CancellationCheck for AtomicBool {
    fn is_cancelled(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

impl<T: CancellationCheck + ?Sized> CancellationCheck for &T {
    fn is_cancelled(&self) -> bool {
        (**self).is_cancelled()
    }
}

impl<T: CancellationCheck + ?Sized> CancellationCheck for Arc<T> {
    fn is_cancelled(&self) -> bool {
        (**self).is_cancelled()
    }
}

/// Fires once a wall-clock instant has passed.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    at: Instant,
}

impl Deadline {
    /// A deadline `budget` from now.
    pub fn after(budget: Duration) -> Self {
        Self {
            at: Instant::now() + budget,
        }
    }

    /// A deadline at a fixed instant.
    pub fn at(at: Instant) -> Self {
        Self { at }
    }
}

impl CancellationCheck for Deadline {
    fn is_cancelled(&self) -> bool {
        Instant::now() >= self.at
    }
}

/// Caller's check combined with the configured time limit.
pub(crate) struct RunGuard<'a, C: CancellationCheck + ?Sized> {
    external: &'a C,
    deadline: Option<Deadline>,
}

impl<'a, C: CancellationCheck + ?Sized> RunGuard<'a, C> {
    pub(crate) fn new(external: &'a C, time_limit_ms: Option<u64>) -> Self {
        Self {
            external,
            deadline: time_limit_ms.map(|ms| Deadline::after(Duration::from_millis(ms))),
        }
    }
}

impl<C: CancellationCheck + ?Sized> CancellationCheck for RunGuard<'_, C> {
    fn is_cancelled(&self) -> bool {
        self.external.is_cancelled() || self.deadline.is_some_and(|d| d.is_cancelled())
    }
}
