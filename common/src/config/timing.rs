//! Animation timing constants.
//!
//! All delays are in milliseconds and are handed to the host's one-shot timer.
//! The sequencer picks one of these per step; see [`crate::sequencer::Step::delay_ms`].

/// Delay between two keystrokes of a typed command.
pub const TYPE_DELTA_MS: u32 = 200;

/// Pause after a command's value has been revealed.
pub const PAUSE_DELTA_MS: u32 = 5 * TYPE_DELTA_MS;

/// Idle cadence: one cursor blink, or one settled marquee cycle.
pub const PROMPT_DELTA_MS: u32 = 1000;

/// Idle cadence while the feed ticker is scrolling.
pub const MARQUEE_DELTA_MS: u32 = 500;

/// Idle cycles after launch during which clock ticks do not restart the animation.
pub const STARTUP_IDLE_CYCLES: u8 = 30;

/// Feed-enabled updates treated as the initial settings handshake.
///
/// The first sync echoes the stored value and the phone then sends its own;
/// neither may restart the animation.
pub const FEED_HANDSHAKE_UPDATES: u8 = 2;

/// Granularity of the real-time clock tick subscription.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickUnit {
    /// Tick on every second change.
    Second,
    /// Tick on every minute change.
    Minute,
}

/// Tick unit the watchface subscribes to.
pub const TICK_UNIT: TickUnit = TickUnit::Minute;
