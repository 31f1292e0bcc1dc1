//! Clock value formatting.
//!
//! The host supplies a broken-down [`LocalTime`]; [`ClockText::format`] turns
//! it into the three strings revealed by the terminal animation:
//!
//! | Command            | Value        | Example               |
//! |--------------------|--------------|-----------------------|
//! | `date +%F`         | date         | `2024-03-09`          |
//! | `date +%T`         | time of day  | `21:07:45`/`09:07:45` |
//! | `date +%s`         | epoch + tz   | `1710018465`          |

use core::fmt::Write;

use heapless::String;

/// Broken-down local time plus the device epoch seconds.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LocalTime {
    pub year: u16,
    /// 1-12
    pub month: u8,
    /// 1-31
    pub day: u8,
    /// 0-23
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    /// Seconds since the unix epoch as the device counts them.
    pub unix: i64,
}

/// Formatted clock values, one per terminal line.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct ClockText {
    /// `YYYY-MM-DD`
    pub date: String<10>,
    /// `HH:MM:SS`, 24h or 12h per the host preference.
    pub hour: String<8>,
    /// Epoch seconds with the timezone offset applied.
    pub unix: String<20>,
}

impl ClockText {
    pub const fn new() -> Self {
        Self {
            date: String::new(),
            hour: String::new(),
            unix: String::new(),
        }
    }

    /// Format `time`, shifting the epoch value by `offset_min` minutes.
    pub fn format(
        time: &LocalTime,
        is_24h: bool,
        offset_min: i16,
    ) -> Self {
        let mut text = Self::new();

        let _ = write!(text.date, "{:04}-{:02}-{:02}", time.year % 10_000, time.month, time.day);

        let hour = if is_24h { time.hour } else { to_12h(time.hour) };
        let _ = write!(text.hour, "{:02}:{:02}:{:02}", hour, time.minute, time.second);

        let shifted = time.unix.saturating_add(i64::from(offset_min) * 60);
        let _ = write!(text.unix, "{shifted}");

        text
    }
}

/// 0 and 12 display as 12, the rest wrap at noon.
#[inline]
const fn to_12h(hour: u8) -> u8 {
    match hour % 12 {
        0 => 12,
        h => h,
    }
}

// =============================================================================
// Tests
// =============================================================================
