//! Watchface configuration.
//!
//! - `layout`: Screen dimensions and text field positions
//! - `timing`: Animation delays and tick granularity
//! - `feed`: Feed ticker limits (buffer sizes, settle and timeout cycles)
//!
//! Runtime configuration (the user's choices synced from the phone) lives in
//! [`crate::settings`], not here.

pub mod feed;
pub mod layout;
pub mod timing;

// Re-export at config level for convenience
pub use feed::{
    FEED_BUFFER_CAPACITY,
    FEED_GAP,
    FEED_MAX_TITLE_LEN,
    FEED_RECEIVE_TIMEOUT_CYCLES,
    FEED_SETTLE_CYCLES,
    FEED_TITLE_CHUNK_SIZE,
    FEED_WINDOW,
};
pub use layout::{SCREEN_HEIGHT, SCREEN_WIDTH};
pub use timing::{
    FEED_HANDSHAKE_UPDATES,
    MARQUEE_DELTA_MS,
    PAUSE_DELTA_MS,
    PROMPT_DELTA_MS,
    STARTUP_IDLE_CYCLES,
    TICK_UNIT,
    TYPE_DELTA_MS,
    TickUnit,
};
