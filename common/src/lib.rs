//! Platform-agnostic core of the terminal watchface.
//!
//! This crate contains everything that does not touch real hardware, shared
//! between the desktop simulator and any device port:
//!
//! - [`config`]: Layout, timing and feed-ticker constants
//! - [`sequencer`]: The pure step table of the typed-terminal animation
//! - [`timer`]: Single pending one-shot timer bookkeeping
//! - [`feed`]: Title buffer, marquee and chunked reception
//! - [`sync`]: Settings synchronization with the paired phone app
//! - [`protocol`]: Dictionary keys, control codes and update decoding
//! - [`settings`]: Persisted user settings (versioned postcard blob)
//! - [`clock`], [`battery`]: Pure formatting of clock and status values
//! - [`host`]: Collaborator traits the platform implements
//! - [`watchface`]: The application state machine driving all of the above
//! - [`scene`], [`widgets`], [`styles`]: Retained display model and drawing
//! - [`debug_log`]: On-device debug log ring buffer
//!
//! # no_std Compatibility
//!
//! This crate is `no_std` outside of tests. All buffers are bounded `heapless`
//! types; nothing allocates.

#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod battery;
pub mod clock;
pub mod config;
pub mod debug_log;
pub mod feed;
pub mod host;
pub mod protocol;
pub mod scene;
pub mod sequencer;
pub mod settings;
pub mod styles;
pub mod sync;
pub mod timer;
pub mod watchface;
pub mod widgets;

#[cfg(test)]
mod testing;

// Re-export commonly used items
pub use battery::{BatteryState, BatteryView};
pub use clock::{ClockText, LocalTime};
pub use config::*;
pub use debug_log::DebugLog;
pub use host::{Clock, Element, Field, Haptics, Host, Outbox, Pulse, SendError, Storage, Timers, Ui};
pub use protocol::{ControlCode, SyncUpdate, TupleValue};
pub use scene::Scene;
pub use settings::{Settings, SettingsError};
pub use watchface::Watchface;
