use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Number of items processed between two polls of a [`ProgressCallback`] by the point-based
/// loops (e.g. [`VoxelGrid::count_points`](crate::voxels::VoxelGrid::count_points)).
pub const CALLBACK_INTERVAL: usize = 500;

/// A cancellation and progress capability given to long-running grid operations.
///
/// Operations poll it periodically. Returning `false` requests the operation to stop as soon
/// as possible, in which case it returns [`VoxelsError::Aborted`](crate::voxels::VoxelsError).
/// Results already written by the operation are left in place.
///
/// This is implemented for every `Fn(bool) -> bool + Sync` closure, so `&|_| true` is a valid
/// callback that never cancels anything.
pub trait ProgressCallback: Sync {
    /// Returns `true` if the current operation should keep going.
    ///
    /// The `progress_hint` argument is reserved. It is always `false` for now.
    fn should_continue(&self, progress_hint: bool) -> bool;
}

impl<F: Fn(bool) -> bool + Sync> ProgressCallback for F {
    fn should_continue(&self, progress_hint: bool) -> bool {
        self(progress_hint)
    }
}

/// Shares a [`ProgressCallback`] between the workers of a parallel loop.
///
/// The callback itself is only ever invoked by one thread at a time. Once it asked for a
/// cancellation, the abort flag stays raised and every later check fails without calling it
/// again.
pub(crate) struct CancelToken<'a> {
    callback: &'a dyn ProgressCallback,
    aborted: AtomicBool,
    gate: Mutex<()>,
}

impl<'a> CancelToken<'a> {
    pub fn new(callback: &'a dyn ProgressCallback) -> Self {
        Self {
            callback,
            aborted: AtomicBool::new(false),
            gate: Mutex::new(()),
        }
    }

    /// Polls the callback. Returns `false` if the operation must stop.
    pub fn check(&self) -> bool {
        if self.is_aborted() {
            return false;
        }

        let _guard = self.gate.lock().unwrap_or_else(|e| e.into_inner());

        // Another worker may have been cancelled while we were waiting.
        if self.is_aborted() {
            return false;
        }

        if !self.callback.should_continue(false) {
            self.aborted.store(true, Ordering::Release);
            log::warn!("Voxel operation cancelled by its progress callback.");
            return false;
        }

        true
    }

    /// Checks the abort flag without polling the callback.
    #[inline]
    pub fn is_aborted(&self) -> bool {
        self.aborted.load(Ordering::Acquire)
    }
}
