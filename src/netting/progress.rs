//! Progress reporting and cooperative cancellation.
//!
//! Both are polled once per scanned row. Progress is advisory: under
//! parallel scans updates may arrive out of order.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Receives `(current, total)` row counts.
pub trait ProgressSink: Sync {
    fn report(&self, current: usize, total: usize);
}

/// Answers whether the host wants the scan aborted.
pub trait CancelCheck: Sync {
    fn is_cancelled(&self) -> bool;
}

/// Discards progress updates.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&self, _current: usize, _total: usize) {}
}

impl<F> ProgressSink for F
where
    F: Fn(usize, usize) + Sync,
{
    fn report(&self, current: usize, total: usize) {
        self(current, total)
    }
}

/// Never requests cancellation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancel;

impl CancelCheck for NeverCancel {
    fn is_cancelled(&self) -> bool {
        false
    }
}

impl<F> CancelCheck for F
where
    F: Fn() -> bool + Sync,
{
    fn is_cancelled(&self) -> bool {
        self()
    }
}

/// Shared cancellation flag.
///
/// Clones observe the same flag, so a host thread can keep one clone and
/// hand another to the scan (e.g. to restart a preview when parameters change).
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Clear the flag so the token can drive another scan.
    pub fn reset(&self) {
        self.flag.store(false, Ordering::Relaxed);
    }
}

impl CancelCheck for CancelToken {
    fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}
