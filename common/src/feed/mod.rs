//! Feed ticker.
//!
//! - [`buffer`]: Bounded title storage with the sealing contract
//! - [`marquee`]: Scroll cursor and settle wait over a sealed title
//! - [`receiver`]: Chunked title reception from the phone
//!
//! # Data Flow
//!
//! ```text
//! phone chunks ─> FeedReceiver ─> FeedBuffer (sealed) ─> Marquee window ─> FeedValue
//! ```

pub mod buffer;
pub mod marquee;
pub mod receiver;

pub use buffer::FeedBuffer;
pub use marquee::Marquee;
pub use receiver::{ChunkOutcome, FeedReceiver, Phase, TimeoutOutcome};

/// Placeholder shown on the feed line until a title is ready.
pub const LOADING_TEXT: &str = "Loading...";
