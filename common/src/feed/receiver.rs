//! Chunked feed title reception.
//!
//! # State Machine
//!
//! ```text
//!         start            end / empty chunk / cap
//!  Idle ────────> Receiving ───────────────────────> Ready
//!                  ^   │ start                        │
//!                  └───┘ (restart)                    │ start
//!                  ^──────────────────────────────────┘
//! ```
//!
//! A reception that stays open for [`FEED_RECEIVE_TIMEOUT_CYCLES`] idle cycles
//! is closed: a partial title is sealed as is, an empty one is abandoned.

use heapless::String;

use crate::config::feed::{FEED_MAX_TITLE_LEN, FEED_RECEIVE_TIMEOUT_CYCLES, FEED_TITLE_CHUNK_SIZE};
use crate::feed::buffer::{FeedBuffer, clip_chunk};

/// Reception phase.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    Idle,
    Receiving,
    Ready,
}

/// Result of feeding one title chunk.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChunkOutcome {
    Appended,
    /// Same as the previous chunk; dropped.
    Duplicate,
    /// Not receiving, or an empty chunk before any content.
    Ignored,
    /// Title sealed. `changed` when it replaces a different earlier title.
    Completed { changed: bool },
}

/// Result of one idle cycle while a reception may be open.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimeoutOutcome {
    /// Nothing open, or budget left.
    Waiting,
    /// Budget ran out with content; the partial title was sealed.
    Sealed { changed: bool },
    /// Budget ran out with nothing received.
    Abandoned,
}

#[derive(Clone, Debug)]
pub struct FeedReceiver {
    phase: Phase,
    buffer: FeedBuffer,
    last_chunk: String<FEED_TITLE_CHUNK_SIZE>,
    chunks: u8,
    previous_title: String<FEED_MAX_TITLE_LEN>,
    budget: u8,
}

impl FeedReceiver {
    pub const fn new() -> Self {
        Self {
            phase: Phase::Idle,
            buffer: FeedBuffer::new(),
            last_chunk: String::new(),
            chunks: 0,
            previous_title: String::new(),
            budget: FEED_RECEIVE_TIMEOUT_CYCLES,
        }
    }

    /// Begin (or restart) a title transmission.
    pub fn start(&mut self) {
        self.phase = Phase::Receiving;
        self.buffer.clear();
        self.last_chunk.clear();
        self.chunks = 0;
        self.budget = FEED_RECEIVE_TIMEOUT_CYCLES;
    }

    /// Drop the current title and any open transmission.
    ///
    /// The last completed title is still remembered for change detection.
    pub fn discard(&mut self) {
        self.phase = Phase::Idle;
        self.buffer.clear();
        self.last_chunk.clear();
        self.chunks = 0;
        self.budget = FEED_RECEIVE_TIMEOUT_CYCLES;
    }

    pub fn chunk(
        &mut self,
        chunk: &str,
    ) -> ChunkOutcome {
        if self.phase != Phase::Receiving {
            return ChunkOutcome::Ignored;
        }
        if chunk.is_empty() {
            return if self.chunks > 0 { self.finish() } else { ChunkOutcome::Ignored };
        }

        let clipped = clip_chunk(chunk);
        if self.chunks > 0 && clipped == self.last_chunk {
            return ChunkOutcome::Duplicate;
        }

        self.buffer.push_chunk(&clipped);
        self.last_chunk = clipped;
        self.chunks = self.chunks.saturating_add(1);
        self.budget = FEED_RECEIVE_TIMEOUT_CYCLES;

        if self.buffer.is_full() { self.finish() } else { ChunkOutcome::Appended }
    }

    /// Explicit end of transmission.
    pub fn end(&mut self) -> ChunkOutcome {
        if self.phase != Phase::Receiving {
            return ChunkOutcome::Ignored;
        }
        if self.chunks == 0 {
            self.phase = Phase::Idle;
            return ChunkOutcome::Ignored;
        }
        self.finish()
    }

    /// Spend one idle cycle of the reception budget.
    pub fn idle_cycle(&mut self) -> TimeoutOutcome {
        if self.phase != Phase::Receiving {
            return TimeoutOutcome::Waiting;
        }
        self.budget = self.budget.saturating_sub(1);
        if self.budget > 0 {
            return TimeoutOutcome::Waiting;
        }

        if self.chunks > 0 {
            match self.finish() {
                ChunkOutcome::Completed { changed } => TimeoutOutcome::Sealed { changed },
                _ => TimeoutOutcome::Waiting,
            }
        } else {
            self.phase = Phase::Idle;
            TimeoutOutcome::Abandoned
        }
    }

    fn finish(&mut self) -> ChunkOutcome {
        self.buffer.seal();
        self.phase = Phase::Ready;

        let title = self.buffer.title();
        let changed = !self.previous_title.is_empty() && self.previous_title.as_str() != title;
        self.previous_title.clear();
        let _ = self.previous_title.push_str(title);

        ChunkOutcome::Completed { changed }
    }

    #[inline]
    pub const fn phase(&self) -> Phase { self.phase }

    #[inline]
    pub fn is_ready(&self) -> bool { self.phase == Phase::Ready }

    #[inline]
    pub const fn buffer(&self) -> &FeedBuffer { &self.buffer }

    /// Chunks accepted in the current transmission.
    #[inline]
    pub const fn chunks(&self) -> u8 { self.chunks }
}

impl Default for FeedReceiver {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Tests
// =============================================================================
