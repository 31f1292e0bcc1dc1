//! Feed ticker limits.
//!
//! A title is received in chunks of at most [`FEED_TITLE_CHUNK_SIZE`] characters
//! and never grows beyond [`FEED_MAX_TITLE_LEN`]. Once sealed, the buffer holds
//! the padded title, a gap, and a copy of its first window so that any window
//! starting before the gap end is complete:
//!
//! ```text
//! | title (padded to FEED_WINDOW) | FEED_GAP spaces | first FEED_WINDOW chars |
//!                                                   ^ last_index
//! ```

/// Visible width of the ticker line in characters.
pub const FEED_WINDOW: usize = 17;

/// Maximum characters accepted from a single title chunk.
pub const FEED_TITLE_CHUNK_SIZE: usize = 17;

/// Maximum title length kept from a transmission.
pub const FEED_MAX_TITLE_LEN: usize = 140;

/// Blank run between the end of the title and its repeated start.
pub const FEED_GAP: usize = 13;

/// Backing storage for a sealed title.
pub const FEED_BUFFER_CAPACITY: usize = 192;

/// Marquee invocations the ticker stays still before it starts scrolling.
pub const FEED_SETTLE_CYCLES: u8 = 5;

/// Idle cycles a reception may stay open before it is closed or retried.
pub const FEED_RECEIVE_TIMEOUT_CYCLES: u8 = 15;

const _: () = assert!(FEED_MAX_TITLE_LEN + FEED_GAP + FEED_WINDOW <= FEED_BUFFER_CAPACITY);
