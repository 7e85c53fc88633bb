//! Cooperative cancellation for long-running passes.
//!
//! An [`Interrupt`] is a shared flag that callers may raise from any thread.
//! Operations poll it at fine granularity and stop at the next check point.
//!
//! ```
//! use strand::interrupt::Interrupt;
//!
//! let interrupt = Interrupt::new();
//! let handle = interrupt.clone();
//! assert!(!interrupt.is_interrupted());
//! handle.interrupt();
//! assert!(interrupt.is_interrupted());
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::OperationError;

/// A poll-based cancellation signal.
#[derive(Clone)]
pub struct Interrupt {
    /// `None` for an interrupt that can never be raised.
    flag: Option<Arc<AtomicBool>>,
    /// Optional external poll, consulted in addition to the flag.
    poll: Option<Arc<dyn Fn() -> bool + Send + Sync>>,
}

impl Interrupt {
    /// Creates a new, unraised interrupt.
    #[must_use]
    pub fn new() -> Self {
        Self {
            flag: Some(Arc::default()),
            poll: None,
        }
    }

    /// Creates an interrupt that can never be raised.
    ///
    /// [`interrupt`](Self::interrupt) has no effect on it, and checks skip the
    /// atomic load.
    #[must_use]
    pub fn none() -> Self {
        Self {
            flag: None,
            poll: None,
        }
    }

    /// Creates an interrupt backed by a host-provided poll function.
    ///
    /// The host's "was interrupted" query is called at every check point.
    pub fn from_poll<F>(poll: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        Self {
            flag: Some(Arc::default()),
            poll: Some(Arc::new(poll)),
        }
    }

    /// Raises the interrupt. Does nothing on [`Interrupt::none`].
    pub fn interrupt(&self) {
        if let Some(flag) = &self.flag {
            flag.store(true, Ordering::Relaxed);
        }
    }

    /// Returns `true` if this interrupt can be raised at all.
    #[must_use]
    pub fn is_raisable(&self) -> bool {
        self.flag.is_some() || self.poll.is_some()
    }

    /// Returns `true` once the interrupt has been raised.
    #[must_use]
    pub fn is_interrupted(&self) -> bool {
        self.flag
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
            || self.poll.as_ref().is_some_and(|poll| poll())
    }

    /// Returns `Err(Cancelled)` if the interrupt has been raised.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::Cancelled`] when interrupted.
    #[inline]
    pub fn check(&self) -> Result<(), OperationError> {
        if self.is_interrupted() {
            Err(OperationError::Cancelled)
        } else {
            Ok(())
        }
    }
}

impl Default for Interrupt {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Interrupt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interrupt")
            .field("raisable", &self.is_raisable())
            .field(
                "raised",
                &self
                    .flag
                    .as_ref()
                    .is_some_and(|flag| flag.load(Ordering::Relaxed)),
            )
            .finish_non_exhaustive()
    }
}
