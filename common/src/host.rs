//! Collaborator traits implemented by the platform.
//!
//! The watchface never owns hardware. Every effect goes through one of these
//! traits, and the host passes itself into each callback as `&mut H`:
//!
//! - [`Ui`]: retained text fields and element visibility
//! - [`Timers`]: one-shot timers identified by an opaque handle
//! - [`Clock`]: local time and the 12/24h preference
//! - [`Haptics`]: vibration pulses
//! - [`Outbox`]: control codes to the phone companion
//! - [`Storage`]: the persisted settings blob
//!
//! [`Host`] bundles all six and is implemented automatically.

use core::fmt;

use crate::battery::BatteryView;
use crate::clock::LocalTime;
use crate::protocol::ControlCode;

// =============================================================================
// UI
// =============================================================================

/// Text fields of the terminal.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Field {
    DateLabel,
    DateValue,
    HourLabel,
    HourValue,
    TimeLabel,
    TimeValue,
    PromptLabel,
    FeedLabel,
    FeedValue,
}

impl Field {
    #[inline]
    pub const fn index(self) -> usize { self as usize }
}

/// Display elements that can be attached/detached or hidden.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Element {
    DateValue,
    HourValue,
    TimeValue,
    PromptCursor,
    FeedValue,
}

impl Element {
    pub const ALL: [Self; 5] = [
        Self::DateValue,
        Self::HourValue,
        Self::TimeValue,
        Self::PromptCursor,
        Self::FeedValue,
    ];

    #[inline]
    pub const fn index(self) -> usize { self as usize }
}

/// Retained display surface.
pub trait Ui {
    fn set_text(
        &mut self,
        field: Field,
        text: &str,
    );

    /// Attach (show in the layer tree) or detach an element.
    fn set_attached(
        &mut self,
        element: Element,
        attached: bool,
    );

    /// Hide an attached element without detaching it.
    fn set_hidden(
        &mut self,
        element: Element,
        hidden: bool,
    );

    fn set_bluetooth(
        &mut self,
        connected: bool,
    );

    fn set_battery(
        &mut self,
        view: &BatteryView,
    );
}

// =============================================================================
// Timers
// =============================================================================

/// One-shot timer service.
pub trait Timers {
    type Handle: Copy + PartialEq + fmt::Debug;

    /// Schedule a one-shot fire after `delay_ms`. `None` if the host is out of timers.
    fn schedule(
        &mut self,
        delay_ms: u32,
    ) -> Option<Self::Handle>;

    /// Cancel a pending timer. Cancelling an expired handle is a no-op.
    fn cancel(
        &mut self,
        handle: Self::Handle,
    );
}

// =============================================================================
// Clock, Haptics
// =============================================================================

pub trait Clock {
    fn now(&self) -> LocalTime;

    fn is_24h(&self) -> bool;
}

/// Vibration patterns.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pulse {
    Short,
    Long,
}

pub trait Haptics {
    fn vibrate(
        &mut self,
        pulse: Pulse,
    );
}

// =============================================================================
// Outbox
// =============================================================================

/// Why a control code could not be handed to the phone link.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SendError {
    /// No phone connected.
    Disconnected,
    /// Outbox still holds an undelivered message.
    Busy,
}

impl fmt::Display for SendError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Disconnected => f.write_str("phone disconnected"),
            Self::Busy => f.write_str("outbox busy"),
        }
    }
}

pub trait Outbox {
    fn send(
        &mut self,
        code: ControlCode,
    ) -> Result<(), SendError>;
}

// =============================================================================
// Storage
// =============================================================================

/// Persistent key-value slot for the settings blob.
pub trait Storage {
    /// Copy the stored blob into `buf`. `None` when nothing is stored.
    fn read(
        &mut self,
        buf: &mut [u8],
    ) -> Option<usize>;

    fn write(
        &mut self,
        bytes: &[u8],
    );
}

/// Everything the watchface needs from its platform.
pub trait Host: Ui + Timers + Clock + Haptics + Outbox + Storage {}

impl<T: Ui + Timers + Clock + Haptics + Outbox + Storage> Host for T {}
