//! Companion phone emulator.
//!
//! Plays the phone side of the message protocol:
//!
//! - On connect, the message layer echoes the watch's stored settings, then
//!   the phone sends its own values
//! - Settings changed on the phone travel as single-key messages
//! - `FeedReady` and `FetchFeed` trigger a "fetch" and a chunked title
//!   transmission: `FeedFetched`, then `FeedTitleStart` with the first chunk,
//!   the remaining chunks, and `FeedTitleEnd` with an empty chunk
//!
//! Messages own their values; [`Message::updates`] borrows them as decoded
//! [`SyncUpdate`]s for the watchface.

use std::collections::VecDeque;

use termwatch_common::protocol::keys;
use termwatch_common::{ControlCode, FEED_TITLE_CHUNK_SIZE, Settings, SyncUpdate, TupleValue};

/// Headlines served in rotation.
const HEADLINES: [&str; 4] = [
    "Rust 2024 edition ships with async closures and a new prelude",
    "Local bakery reports record croissant demand after snowfall",
    "Open hardware smartwatch hits funding goal in under 48 hours",
    "Researchers teach robot dog to fetch the morning newspaper",
];

/// Refresh interval the phone advertises, in minutes.
const FEED_INTERVAL_MIN: u32 = 30;

// =============================================================================
// Messages
// =============================================================================

#[derive(Clone, Debug)]
enum Value {
    Uint(u32),
    Int(i32),
    Text(String),
}

impl Value {
    fn as_tuple(&self) -> TupleValue<'_> {
        match self {
            Self::Uint(v) => TupleValue::Uint(*v),
            Self::Int(v) => TupleValue::Int(*v),
            Self::Text(s) => TupleValue::CString(s),
        }
    }
}

/// One dictionary in flight to the watch.
#[derive(Clone, Debug, Default)]
pub struct Message {
    entries: Vec<(u32, Value)>,
}

impl Message {
    fn with(
        mut self,
        key: u32,
        value: Value,
    ) -> Self {
        self.entries.push((key, value));
        self
    }

    fn flag(
        self,
        key: u32,
        on: bool,
    ) -> Self {
        self.with(key, Value::Uint(u32::from(on)))
    }

    fn control(
        self,
        code: ControlCode,
    ) -> Self {
        self.with(keys::MSG_TYPE, Value::Uint(u32::from(code.to_byte())))
    }

    fn title(
        self,
        chunk: String,
    ) -> Self {
        self.with(keys::FEED_TITLE, Value::Text(chunk))
    }

    /// Decoded entries. Entries the watch would not understand are dropped.
    pub fn updates(&self) -> Vec<SyncUpdate<'_>> {
        self.entries
            .iter()
            .filter_map(|(key, value)| SyncUpdate::decode(*key, value.as_tuple()))
            .collect()
    }
}

// =============================================================================
// Phone
// =============================================================================

pub struct Phone {
    /// The phone's own copy of the user's choices.
    settings: Settings,
    inbox: VecDeque<Message>,
    headline: usize,
}

impl Phone {
    pub fn new() -> Self {
        Self {
            settings: Settings {
                feed_enabled: true,
                ..Settings::new()
            },
            inbox: VecDeque::new(),
            headline: 0,
        }
    }

    /// Connection handshake: echo of the watch's stored values, then the phone's.
    pub fn connect(
        &mut self,
        stored: &Settings,
    ) {
        self.inbox.push_back(settings_message(stored));
        self.inbox.push_back(settings_message(&self.settings));
    }

    /// Next message for the watch, oldest first.
    pub fn next_message(&mut self) -> Option<Message> { self.inbox.pop_front() }

    pub const fn settings(&self) -> &Settings { &self.settings }

    /// A control code from the watch.
    pub fn receive(
        &mut self,
        code: ControlCode,
    ) {
        tracing::debug!(code = code.name(), "phone <- watch");
        match code {
            ControlCode::FeedReady | ControlCode::FetchFeed => self.push_headline(),
            ControlCode::Ping => self.inbox.push_back(Message::default().control(ControlCode::Ping)),
            ControlCode::AppClose => tracing::info!("watchface closed"),
            other => tracing::warn!(code = other.name(), "unexpected code from watch"),
        }
    }

    /// Fetch the next headline and transmit it.
    pub fn push_headline(&mut self) {
        if !self.settings.feed_enabled {
            return;
        }
        let title = HEADLINES[self.headline % HEADLINES.len()];
        self.headline = self.headline.wrapping_add(1);
        tracing::info!(title, "phone: sending headline");

        self.inbox
            .push_back(Message::default().control(ControlCode::FeedFetched));

        let chars: Vec<char> = title.chars().collect();
        let mut chunks = chars.chunks(FEED_TITLE_CHUNK_SIZE).map(|c| c.iter().collect::<String>());
        let first = chunks.next().unwrap_or_default();
        self.inbox.push_back(
            Message::default()
                .control(ControlCode::FeedTitleStart)
                .title(first),
        );
        for chunk in chunks {
            self.inbox.push_back(Message::default().title(chunk));
        }
        self.inbox.push_back(
            Message::default()
                .control(ControlCode::FeedTitleEnd)
                .title(String::new()),
        );
    }

    // =========================================================================
    // Settings changed on the phone
    // =========================================================================

    pub fn toggle_typing(&mut self) {
        self.settings.typing_animation = !self.settings.typing_animation;
        let msg = Message::default().flag(keys::TYPING_ANIMATION, self.settings.typing_animation);
        self.inbox.push_back(msg);
    }

    pub fn toggle_feed(&mut self) {
        self.settings.feed_enabled = !self.settings.feed_enabled;
        let msg = Message::default().flag(keys::FEED_ENABLED, self.settings.feed_enabled);
        self.inbox.push_back(msg);
    }

    pub fn toggle_bluetooth_vibe(&mut self) {
        self.settings.bluetooth_vibe = !self.settings.bluetooth_vibe;
        let msg = Message::default().flag(keys::BLUETOOTH_VIBE, self.settings.bluetooth_vibe);
        self.inbox.push_back(msg);
    }

    /// Step the timezone offset by one hour, wrapping from +14h to -12h.
    pub fn step_timezone(&mut self) {
        let next = self.settings.timezone_offset_min + 60;
        self.settings.timezone_offset_min = if next > 14 * 60 { -12 * 60 } else { next };
        let msg = Message::default().with(
            keys::TIMEZONE_OFFSET,
            Value::Int(i32::from(self.settings.timezone_offset_min)),
        );
        self.inbox.push_back(msg);
    }
}

impl Default for Phone {
    fn default() -> Self { Self::new() }
}

fn settings_message(settings: &Settings) -> Message {
    Message::default()
        .flag(keys::BLUETOOTH_VIBE, settings.bluetooth_vibe)
        .flag(keys::TYPING_ANIMATION, settings.typing_animation)
        .with(keys::TIMEZONE_OFFSET, Value::Int(i32::from(settings.timezone_offset_min)))
        .flag(keys::FEED_ENABLED, settings.feed_enabled)
        .flag(keys::FEED_VIBE, settings.feed_vibe)
        .with(keys::FEED_INTERVAL, Value::Uint(FEED_INTERVAL_MIN))
}

// =============================================================================
// Tests
// =============================================================================
