//! Bounded feed title buffer.
//!
//! # Contract
//!
//! - Incoming text is ASCII only. Any other character, and any control
//!   character, is stored as `?` since the terminal font cannot draw it.
//! - A single chunk contributes at most [`FEED_TITLE_CHUNK_SIZE`] characters.
//! - The title never exceeds [`FEED_MAX_TITLE_LEN`] characters; the rest of a
//!   chunk that would cross it is dropped.
//! - [`FeedBuffer::seal`] pads the title to [`FEED_WINDOW`], appends
//!   [`FEED_GAP`] spaces, records `last_index` and appends a copy of the first
//!   window. Every cursor in `[0, last_index)` then has a full window.
//!
//! Since every stored character is ASCII, byte offsets and character offsets
//! coincide.

use heapless::String;

use crate::config::feed::{FEED_BUFFER_CAPACITY, FEED_GAP, FEED_MAX_TITLE_LEN, FEED_TITLE_CHUNK_SIZE, FEED_WINDOW};

/// Replace anything the terminal font cannot draw.
#[inline]
pub const fn sanitize(c: char) -> char {
    if c.is_ascii() && !c.is_ascii_control() { c } else { '?' }
}

/// Sanitize and truncate one incoming chunk.
pub fn clip_chunk(chunk: &str) -> String<FEED_TITLE_CHUNK_SIZE> {
    let mut clipped = String::new();
    for c in chunk.chars().take(FEED_TITLE_CHUNK_SIZE) {
        let _ = clipped.push(sanitize(c));
    }
    clipped
}

/// Title storage for the ticker.
#[derive(Clone, Debug, Default)]
pub struct FeedBuffer {
    text: String<FEED_BUFFER_CAPACITY>,
    title_len: usize,
    last_index: usize,
    sealed: bool,
}

impl FeedBuffer {
    pub const fn new() -> Self {
        Self {
            text: String::new(),
            title_len: 0,
            last_index: 0,
            sealed: false,
        }
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.title_len = 0;
        self.last_index = 0;
        self.sealed = false;
    }

    /// Append a chunk to an unsealed title. Returns the characters taken.
    pub fn push_chunk(
        &mut self,
        chunk: &str,
    ) -> usize {
        if self.sealed {
            return 0;
        }
        let mut taken = 0;
        for c in clip_chunk(chunk).chars() {
            if self.text.len() >= FEED_MAX_TITLE_LEN || self.text.push(c).is_err() {
                break;
            }
            taken += 1;
        }
        taken
    }

    /// Title reached [`FEED_MAX_TITLE_LEN`].
    #[inline]
    pub fn is_full(&self) -> bool { self.text.len() >= FEED_MAX_TITLE_LEN }

    /// Close the title and lay out the scroll loop.
    pub fn seal(&mut self) {
        if self.sealed {
            return;
        }
        self.title_len = self.text.len();

        while self.text.len() < FEED_WINDOW {
            let _ = self.text.push(' ');
        }
        for _ in 0..FEED_GAP {
            let _ = self.text.push(' ');
        }
        self.last_index = self.text.len();

        let mut head: String<FEED_WINDOW> = String::new();
        let _ = head.push_str(&self.text[..FEED_WINDOW]);
        let _ = self.text.push_str(&head);

        self.sealed = true;
    }

    /// The received title without padding. Empty until sealed.
    pub fn title(&self) -> &str {
        if self.sealed { &self.text[..self.title_len] } else { "" }
    }

    /// Wrap point of the scroll cursor. Zero until sealed.
    #[inline]
    pub const fn last_index(&self) -> usize { self.last_index }

    /// The [`FEED_WINDOW`] characters starting at `cursor`. Empty until sealed.
    pub fn window(
        &self,
        cursor: usize,
    ) -> &str {
        if !self.sealed {
            return "";
        }
        let start = cursor.min(self.last_index);
        &self.text[start..start + FEED_WINDOW]
    }

    /// Characters received so far (or sealed length).
    #[inline]
    pub fn len(&self) -> usize { self.text.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.text.is_empty() }
}

// =============================================================================
// Tests
// =============================================================================
