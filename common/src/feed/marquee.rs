//! Marquee scroll state over a sealed feed title.
//!
//! Each invocation either burns one settle cycle or advances the cursor by
//! one character. Reaching `last_index` wraps the cursor to 0 and restores
//! the settle wait, so the title rests at its start once per loop.

use crate::config::feed::FEED_SETTLE_CYCLES;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Marquee {
    cursor: usize,
    wait: u8,
    scrolling: bool,
}

impl Marquee {
    pub const fn new() -> Self {
        Self {
            cursor: 0,
            wait: FEED_SETTLE_CYCLES,
            scrolling: false,
        }
    }

    /// Back to the start with a full settle wait.
    pub fn rewind(&mut self) { *self = Self::new(); }

    /// One marquee invocation. Returns `true` if the window moved.
    pub fn step(
        &mut self,
        last_index: usize,
    ) -> bool {
        if last_index == 0 {
            return false;
        }
        if self.wait > 0 {
            self.wait -= 1;
            self.scrolling = false;
            return false;
        }

        self.cursor += 1;
        if self.cursor >= last_index {
            self.rewind();
        } else {
            self.scrolling = true;
        }
        true
    }

    #[inline]
    pub const fn cursor(&self) -> usize { self.cursor }

    /// Advancing on the short marquee delay rather than resting.
    #[inline]
    pub const fn is_scrolling(&self) -> bool { self.scrolling }

    #[inline]
    pub const fn wait(&self) -> u8 { self.wait }
}

impl Default for Marquee {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_settles_before_scrolling() {
        let mut marquee = Marquee::new();
        for _ in 0..FEED_SETTLE_CYCLES {
            assert!(!marquee.step(30));
            assert_eq!(marquee.cursor(), 0);
            assert!(!marquee.is_scrolling());
        }
        assert!(marquee.step(30));
        assert_eq!(marquee.cursor(), 1);
        assert!(marquee.is_scrolling());
    }

    #[test]
    fn test_wrap_restores_wait() {
        let mut marquee = Marquee::new();
        for _ in 0..FEED_SETTLE_CYCLES {
            marquee.step(30);
        }
        for _ in 0..29 {
            marquee.step(30);
        }
        assert_eq!(marquee.cursor(), 29);

        assert!(marquee.step(30));
        assert_eq!(marquee.cursor(), 0);
        assert_eq!(marquee.wait(), FEED_SETTLE_CYCLES);
        assert!(!marquee.is_scrolling());
    }

    #[test]
    fn test_unsealed_never_moves() {
        let mut marquee = Marquee::new();
        for _ in 0..20 {
            assert!(!marquee.step(0));
        }
        assert_eq!(marquee.wait(), FEED_SETTLE_CYCLES);
    }

    proptest! {
        #[test]
        fn prop_cursor_visits_each_offset_once(last_index in 30usize..=170) {
            let mut marquee = Marquee::new();
            for _ in 0..FEED_SETTLE_CYCLES {
                marquee.step(last_index);
            }

            let mut seen = vec![false; last_index];
            seen[0] = true;
            for _ in 0..last_index {
                prop_assert!(marquee.step(last_index));
                let cursor = marquee.cursor();
                prop_assert!(cursor < last_index);
                if cursor != 0 {
                    prop_assert!(!seen[cursor]);
                    seen[cursor] = true;
                }
            }
            prop_assert_eq!(marquee.cursor(), 0);
            prop_assert!(seen.iter().all(|s| *s));
        }

        #[test]
        fn prop_cursor_stays_in_range(last_index in 1usize..=170, steps in 0usize..1000) {
            let mut marquee = Marquee::new();
            for _ in 0..steps {
                marquee.step(last_index);
                prop_assert!(marquee.cursor() < last_index);
            }
        }
    }
}
