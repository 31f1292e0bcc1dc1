//! Persisted user settings.
//!
//! Settings are the only runtime configuration of the watchface. They are read
//! once at startup, mutated only by settings sync and written back through the
//! [`Storage`] collaborator.
//!
//! # Blob Format
//!
//! ```text
//! | version: u8 | postcard-encoded record |
//! ```
//!
//! - Version 2 is [`Settings`] as defined here.
//! - Version 1 predates the feed-vibe toggle; it is upgraded with the default.
//!
//! Anything else (empty store, unknown version, truncated record) is reported
//! as a [`SettingsError`]; callers fall back to [`Settings::default`].

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::host::Storage;

/// Current schema version byte.
pub const SETTINGS_VERSION: u8 = 2;

/// Scratch space large enough for any encoded settings blob.
pub const SETTINGS_BLOB_CAPACITY: usize = 32;

/// User settings synced from the phone.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Settings {
    /// Vibrate when the phone connection drops.
    pub bluetooth_vibe: bool,
    /// Replay the typing animation on every clock tick.
    pub typing_animation: bool,
    /// Minutes added to the displayed unix timestamp.
    pub timezone_offset_min: i16,
    /// Show the feed ticker below the clock lines.
    pub feed_enabled: bool,
    /// Vibrate when a new feed title arrives.
    pub feed_vibe: bool,
}

impl Settings {
    pub const fn new() -> Self {
        Self {
            bluetooth_vibe: true,
            typing_animation: true,
            timezone_offset_min: 0,
            feed_enabled: false,
            feed_vibe: true,
        }
    }

    /// Decode a stored blob.
    pub fn decode(blob: &[u8]) -> Result<Self, SettingsError> {
        let (&version, record) = blob.split_first().ok_or(SettingsError::Empty)?;
        match version {
            SETTINGS_VERSION => postcard::from_bytes(record).map_err(|_| SettingsError::Corrupt),
            1 => postcard::from_bytes::<SettingsV1>(record)
                .map(Self::from)
                .map_err(|_| SettingsError::Corrupt),
            other => Err(SettingsError::UnknownVersion(other)),
        }
    }

    /// Encode into `buf`, returning the blob length.
    pub fn encode(
        &self,
        buf: &mut [u8],
    ) -> Result<usize, SettingsError> {
        let (version, record) = buf.split_first_mut().ok_or(SettingsError::BufferTooSmall)?;
        *version = SETTINGS_VERSION;
        let used = postcard::to_slice(self, record).map_err(|_| SettingsError::BufferTooSmall)?;
        Ok(1 + used.len())
    }

    /// Read settings from storage.
    pub fn load<S: Storage + ?Sized>(storage: &mut S) -> Result<Self, SettingsError> {
        let mut buf = [0u8; SETTINGS_BLOB_CAPACITY];
        let len = storage.read(&mut buf).ok_or(SettingsError::Empty)?;
        Self::decode(&buf[..len.min(buf.len())])
    }

    /// Write settings to storage.
    pub fn store<S: Storage + ?Sized>(
        &self,
        storage: &mut S,
    ) -> Result<(), SettingsError> {
        let mut buf = [0u8; SETTINGS_BLOB_CAPACITY];
        let len = self.encode(&mut buf)?;
        storage.write(&buf[..len]);
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self { Self::new() }
}

/// Schema version 1, before the feed-vibe toggle existed.
#[derive(Serialize, Deserialize)]
struct SettingsV1 {
    bluetooth_vibe: bool,
    typing_animation: bool,
    timezone_offset_min: i16,
    feed_enabled: bool,
}

impl From<SettingsV1> for Settings {
    fn from(v1: SettingsV1) -> Self {
        Self {
            bluetooth_vibe: v1.bluetooth_vibe,
            typing_animation: v1.typing_animation,
            timezone_offset_min: v1.timezone_offset_min,
            feed_enabled: v1.feed_enabled,
            ..Self::new()
        }
    }
}

// =============================================================================
// Errors
// =============================================================================

/// Why a stored settings blob could not be used.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingsError {
    /// Nothing stored yet.
    Empty,
    /// Leading version byte is not a known schema.
    UnknownVersion(u8),
    /// Record does not decode under its declared schema.
    Corrupt,
    /// Output buffer cannot hold the encoded record.
    BufferTooSmall,
}

impl fmt::Display for SettingsError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("no stored settings"),
            Self::UnknownVersion(v) => write!(f, "unknown settings version {v}"),
            Self::Corrupt => f.write_str("corrupt settings record"),
            Self::BufferTooSmall => f.write_str("settings buffer too small"),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
