//! Settings synchronization with the paired phone app.
//!
//! [`SettingsSync::apply`] folds one decoded [`SyncUpdate`] into [`Settings`]
//! and reports what the watchface has to do about it as a [`SyncEffect`].
//! Applying the same update twice never yields a second actionable effect.
//!
//! # Feed-Enabled Handshake
//!
//! On startup the message layer first echoes the stored settings back, then
//! the phone sends its own. The first [`FEED_HANDSHAKE_UPDATES`] feed-enabled
//! updates are therefore stored without restarting the animation. A change
//! during the handshake is reported as [`SyncEffect::FeedSynced`].

use crate::config::timing::FEED_HANDSHAKE_UPDATES;
use crate::protocol::{ControlCode, SyncUpdate, keys};
use crate::settings::Settings;

/// What an applied update asks of the watchface.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SyncEffect<'a> {
    /// Key carries nothing the watch uses.
    Ignored,
    /// Value already held.
    Unchanged,
    /// Settings changed; persist them.
    Stored,
    /// Feed mode flipped after the handshake; persist and restart.
    FeedToggled { enabled: bool },
    /// Feed mode changed during the handshake; persist without restarting.
    FeedSynced { enabled: bool },
    Control(ControlCode),
    TitleChunk(&'a str),
}

#[derive(Clone, Copy, Debug)]
pub struct SettingsSync {
    handshake_remaining: u8,
}

impl SettingsSync {
    pub const fn new() -> Self {
        Self {
            handshake_remaining: FEED_HANDSHAKE_UPDATES,
        }
    }

    /// Feed-enabled updates still treated as handshake.
    #[inline]
    pub const fn handshake_remaining(&self) -> u8 { self.handshake_remaining }

    pub fn apply<'a>(
        &mut self,
        settings: &mut Settings,
        update: SyncUpdate<'a>,
    ) -> SyncEffect<'a> {
        match update {
            SyncUpdate::BluetoothVibe(v) => store(&mut settings.bluetooth_vibe, v),
            SyncUpdate::TypingAnimation(v) => store(&mut settings.typing_animation, v),
            SyncUpdate::TimezoneOffset(v) => store(&mut settings.timezone_offset_min, v),
            SyncUpdate::FeedVibe(v) => store(&mut settings.feed_vibe, v),
            SyncUpdate::FeedEnabled(v) => {
                let handshake = self.handshake_remaining > 0;
                self.handshake_remaining = self.handshake_remaining.saturating_sub(1);
                match store(&mut settings.feed_enabled, v) {
                    SyncEffect::Stored if handshake => SyncEffect::FeedSynced { enabled: v },
                    SyncEffect::Stored => SyncEffect::FeedToggled { enabled: v },
                    other => other,
                }
            }
            SyncUpdate::Control(code) => SyncEffect::Control(code),
            SyncUpdate::FeedTitle(chunk) => SyncEffect::TitleChunk(chunk),
            SyncUpdate::FeedUrl(_) | SyncUpdate::FeedInterval(_) => SyncEffect::Ignored,
        }
    }
}

impl Default for SettingsSync {
    fn default() -> Self { Self::new() }
}

fn store<'a, T: PartialEq>(
    slot: &mut T,
    value: T,
) -> SyncEffect<'a> {
    if *slot == value {
        SyncEffect::Unchanged
    } else {
        *slot = value;
        SyncEffect::Stored
    }
}

/// Updates of one message in ascending key order, stable within a key.
pub fn in_key_order<'u, 'a>(updates: &'u [SyncUpdate<'a>]) -> impl Iterator<Item = SyncUpdate<'a>> + 'u {
    (keys::BLUETOOTH_VIBE..=keys::FEED_INTERVAL)
        .flat_map(move |key| updates.iter().copied().filter(move |u| u.key() == key))
}

// =============================================================================
// Tests
// =============================================================================
