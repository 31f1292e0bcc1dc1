//! The single pending animation timer.
//!
//! The animation keeps at most one one-shot timer outstanding. Every arm
//! cancels the previous handle first, and a fire whose handle does not match
//! the pending one is stale and ignored.

use crate::host::Timers;

/// Bookkeeping for the one outstanding animation timer.
#[derive(Debug)]
pub struct AnimationTimer<H> {
    pending: Option<H>,
}

impl<H: Copy + PartialEq> AnimationTimer<H> {
    pub const fn new() -> Self { Self { pending: None } }

    /// Cancel any pending timer, then schedule a new one.
    ///
    /// Returns `false` if the host could not schedule; the animation then
    /// stalls until the next reset.
    pub fn arm<T>(
        &mut self,
        timers: &mut T,
        delay_ms: u32,
    ) -> bool
    where
        T: Timers<Handle = H> + ?Sized,
    {
        self.cancel(timers);
        self.pending = timers.schedule(delay_ms);
        self.pending.is_some()
    }

    /// Arm only if nothing is pending.
    pub fn ensure_armed<T>(
        &mut self,
        timers: &mut T,
        delay_ms: u32,
    ) -> bool
    where
        T: Timers<Handle = H> + ?Sized,
    {
        if self.pending.is_some() {
            return true;
        }
        self.arm(timers, delay_ms)
    }

    pub fn cancel<T>(
        &mut self,
        timers: &mut T,
    ) where
        T: Timers<Handle = H> + ?Sized,
    {
        if let Some(handle) = self.pending.take() {
            timers.cancel(handle);
        }
    }

    /// Consume a fire. `true` only for the pending handle.
    pub fn fired(
        &mut self,
        handle: H,
    ) -> bool {
        if self.pending == Some(handle) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    #[inline]
    pub const fn is_armed(&self) -> bool { self.pending.is_some() }
}

impl<H: Copy + PartialEq> Default for AnimationTimer<H> {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Tests
// =============================================================================
