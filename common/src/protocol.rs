//! Paired-app message protocol.
//!
//! The phone companion and the watch exchange small dictionaries of
//! integer-keyed values. Every key carries exactly one field and may be sent
//! on its own. Control flow (keepalives, feed requests, title framing) travels
//! as a [`ControlCode`] under [`keys::MSG_TYPE`], separate from settings data.
//!
//! Decoding never fails loudly: an unknown key, an unknown control code or a
//! value of the wrong type decodes to `None` and is skipped by the caller.

/// Dictionary keys shared with the phone companion.
pub mod keys {
    pub const BLUETOOTH_VIBE: u32 = 0;
    pub const TYPING_ANIMATION: u32 = 1;
    pub const TIMEZONE_OFFSET: u32 = 2;
    pub const FEED_ENABLED: u32 = 3;
    pub const FEED_URL: u32 = 4;
    pub const MSG_TYPE: u32 = 5;
    pub const FEED_TITLE: u32 = 6;
    pub const FEED_VIBE: u32 = 7;
    pub const FEED_INTERVAL: u32 = 8;
}

/// Out-of-band control codes carried under [`keys::MSG_TYPE`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ControlCode {
    /// Keepalive, either direction.
    Ping = 0,
    /// Watch → phone: the watchface is closing.
    AppClose = 1,
    /// Watch → phone: fetch the feed now.
    FetchFeed = 2,
    /// Watch → phone: ready to receive a feed title.
    FeedReady = 3,
    /// Phone → watch: the feed has been fetched.
    FeedFetched = 4,
    /// Phone → watch: a new title transmission begins.
    FeedTitleStart = 5,
    /// Phone → watch: the title transmission is complete.
    FeedTitleEnd = 6,
}

impl ControlCode {
    /// Parse a code from its wire byte.
    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::Ping),
            1 => Some(Self::AppClose),
            2 => Some(Self::FetchFeed),
            3 => Some(Self::FeedReady),
            4 => Some(Self::FeedFetched),
            5 => Some(Self::FeedTitleStart),
            6 => Some(Self::FeedTitleEnd),
            _ => None,
        }
    }

    /// Wire byte for this code.
    #[inline]
    pub const fn to_byte(self) -> u8 { self as u8 }

    /// Short name for logs.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ping => "ping",
            Self::AppClose => "app-close",
            Self::FetchFeed => "fetch-feed",
            Self::FeedReady => "feed-ready",
            Self::FeedFetched => "feed-fetched",
            Self::FeedTitleStart => "title-start",
            Self::FeedTitleEnd => "title-end",
        }
    }
}

/// A raw dictionary value as delivered by the host's message layer.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TupleValue<'a> {
    Uint(u32),
    Int(i32),
    CString(&'a str),
}

impl TupleValue<'_> {
    fn as_int(self) -> Option<i64> {
        match self {
            Self::Uint(v) => Some(i64::from(v)),
            Self::Int(v) => Some(i64::from(v)),
            Self::CString(_) => None,
        }
    }

    fn as_flag(self) -> Option<bool> { self.as_int().map(|v| v != 0) }
}

/// A decoded, typed update from the phone.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SyncUpdate<'a> {
    BluetoothVibe(bool),
    TypingAnimation(bool),
    /// Signed offset in minutes added to the unix timestamp display.
    TimezoneOffset(i16),
    FeedEnabled(bool),
    /// Carried for completeness; the watch never reads it.
    FeedUrl(&'a str),
    Control(ControlCode),
    /// One chunk of a feed title (possibly empty).
    FeedTitle(&'a str),
    FeedVibe(bool),
    /// Carried for completeness; the phone owns the fetch schedule.
    FeedInterval(u8),
}

impl<'a> SyncUpdate<'a> {
    /// Decode one dictionary entry.
    ///
    /// Returns `None` for unknown keys, unknown control codes and mistyped values.
    pub fn decode(
        key: u32,
        value: TupleValue<'a>,
    ) -> Option<Self> {
        match key {
            keys::BLUETOOTH_VIBE => value.as_flag().map(Self::BluetoothVibe),
            keys::TYPING_ANIMATION => value.as_flag().map(Self::TypingAnimation),
            keys::TIMEZONE_OFFSET => value
                .as_int()
                .map(|v| Self::TimezoneOffset(v.clamp(i64::from(i16::MIN), i64::from(i16::MAX)) as i16)),
            keys::FEED_ENABLED => value.as_flag().map(Self::FeedEnabled),
            keys::FEED_URL => match value {
                TupleValue::CString(s) => Some(Self::FeedUrl(s)),
                _ => None,
            },
            keys::MSG_TYPE => value
                .as_int()
                .and_then(|v| u8::try_from(v).ok())
                .and_then(ControlCode::from_byte)
                .map(Self::Control),
            keys::FEED_TITLE => match value {
                TupleValue::CString(s) => Some(Self::FeedTitle(s)),
                _ => None,
            },
            keys::FEED_VIBE => value.as_flag().map(Self::FeedVibe),
            keys::FEED_INTERVAL => value
                .as_int()
                .map(|v| Self::FeedInterval(v.clamp(0, i64::from(u8::MAX)) as u8)),
            _ => None,
        }
    }

    /// Dictionary key this update travels under.
    pub const fn key(&self) -> u32 {
        match self {
            Self::BluetoothVibe(_) => keys::BLUETOOTH_VIBE,
            Self::TypingAnimation(_) => keys::TYPING_ANIMATION,
            Self::TimezoneOffset(_) => keys::TIMEZONE_OFFSET,
            Self::FeedEnabled(_) => keys::FEED_ENABLED,
            Self::FeedUrl(_) => keys::FEED_URL,
            Self::Control(_) => keys::MSG_TYPE,
            Self::FeedTitle(_) => keys::FEED_TITLE,
            Self::FeedVibe(_) => keys::FEED_VIBE,
            Self::FeedInterval(_) => keys::FEED_INTERVAL,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
