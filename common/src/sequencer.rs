//! Step table of the typed-terminal animation.
//!
//! The animation is an integer step counter advanced once per timer fire.
//! [`Step::at`] maps the counter to exactly one display action, and
//! [`next_index`] and [`Step::delay_ms`] form the rest of the transition table.
//! Nothing here touches the host; [`crate::watchface::Watchface`] performs the
//! side effects.
//!
//! # Step Layout
//!
//! ```text
//!  0        Refresh              read the clock
//!  1..=7    Type(Date, 1..=7)    pebble>date +%F
//!  8        Reveal(Date)
//!  9..=15   Type(Hour, 1..=7)    pebble>date +%T
//! 16        Reveal(Hour)
//! 17..=23   Type(Time, 1..=7)    pebble>date +%s
//! 24        Reveal(Time)         ── feed disabled ──> 36
//! 25..=33   Type(Feed, 1..=9)    pebble>./feed.sh
//! 34        ShowFeed
//! 35        SettleFeed
//! 36        Idle                 saturating
//! ```
//!
//! A keystroke is one non-space character; a space is typed together with the
//! character that follows it.

use crate::config::timing::{MARQUEE_DELTA_MS, PAUSE_DELTA_MS, PROMPT_DELTA_MS, TYPE_DELTA_MS};
use crate::host::{Element, Field};

/// Bare shell prompt.
pub const PROMPT: &str = "pebble>";

/// Terminal lines, each a command followed by its output.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Line {
    Date,
    Hour,
    Time,
    Feed,
}

impl Line {
    const ORDER: [Self; 4] = [Self::Date, Self::Hour, Self::Time, Self::Feed];

    /// Full command line including the prompt.
    pub const fn command(self) -> &'static str {
        match self {
            Self::Date => "pebble>date +%F",
            Self::Hour => "pebble>date +%T",
            Self::Time => "pebble>date +%s",
            Self::Feed => "pebble>./feed.sh",
        }
    }

    /// Field the command is typed into.
    pub const fn label(self) -> Field {
        match self {
            Self::Date => Field::DateLabel,
            Self::Hour => Field::HourLabel,
            Self::Time => Field::TimeLabel,
            Self::Feed => Field::FeedLabel,
        }
    }

    /// Element holding the command's output.
    pub const fn value(self) -> Element {
        match self {
            Self::Date => Element::DateValue,
            Self::Hour => Element::HourValue,
            Self::Time => Element::TimeValue,
            Self::Feed => Element::FeedValue,
        }
    }

    /// Number of keystrokes needed to type the command after the prompt.
    pub fn keystrokes(self) -> u8 { self.command()[PROMPT.len()..].chars().filter(|c| *c != ' ').count() as u8 }

    /// First step index of this line's typing run.
    const fn first_step(self) -> u8 {
        match self {
            Self::Date => 1,
            Self::Hour => 9,
            Self::Time => 17,
            Self::Feed => 25,
        }
    }
}

/// Command text after `keystrokes` keystrokes.
///
/// `0` yields the bare prompt; values past the end yield the whole command.
pub fn typed(
    line: Line,
    keystrokes: u8,
) -> &'static str {
    let command = line.command();
    let mut remaining = keystrokes;
    if remaining == 0 {
        return PROMPT;
    }
    for (offset, c) in command[PROMPT.len()..].char_indices() {
        if c == ' ' {
            continue;
        }
        remaining -= 1;
        if remaining == 0 {
            return &command[..PROMPT.len() + offset + c.len_utf8()];
        }
    }
    command
}

/// Index of the terminal idle step.
pub const IDLE_INDEX: u8 = 36;

const REVEAL_TIME_INDEX: u8 = 24;
const SHOW_FEED_INDEX: u8 = 34;
const SETTLE_FEED_INDEX: u8 = 35;

/// One display action of the animation.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    /// Read the clock and format every value.
    Refresh,
    /// Show the command typed up to `keystrokes`.
    Type { line: Line, keystrokes: u8 },
    /// Attach the line's value and put a fresh prompt on the next line.
    Reveal(Line),
    /// Attach and unhide the feed ticker, first marquee invocation.
    ShowFeed,
    /// One more marquee invocation before idling.
    SettleFeed,
    /// Blink the cursor or drive the marquee until the next reset.
    Idle,
}

impl Step {
    /// Action for a step index. Indices past the idle step saturate to it.
    pub fn at(index: u8) -> Self {
        match index {
            0 => return Self::Refresh,
            SHOW_FEED_INDEX => return Self::ShowFeed,
            SETTLE_FEED_INDEX => return Self::SettleFeed,
            i if i >= IDLE_INDEX => return Self::Idle,
            _ => {}
        }

        for line in Line::ORDER {
            let first = line.first_step();
            let reveal = first + line.keystrokes();
            if (first..reveal).contains(&index) {
                return Self::Type { line, keystrokes: index - first + 1 };
            }
            if index == reveal {
                return Self::Reveal(line);
            }
        }
        Self::Idle
    }

    /// Delay before the step after this one runs.
    pub const fn delay_ms(
        self,
        scrolling: bool,
    ) -> u32 {
        match self {
            Self::Refresh | Self::Type { .. } => TYPE_DELTA_MS,
            Self::Reveal(_) | Self::ShowFeed => PAUSE_DELTA_MS,
            Self::SettleFeed => PROMPT_DELTA_MS,
            Self::Idle if scrolling => MARQUEE_DELTA_MS,
            Self::Idle => PROMPT_DELTA_MS,
        }
    }
}

/// Step index following `index`.
///
/// Without the feed the third reveal jumps straight to idle.
pub const fn next_index(
    index: u8,
    feed_enabled: bool,
) -> u8 {
    if index == REVEAL_TIME_INDEX && !feed_enabled {
        return IDLE_INDEX;
    }
    if index >= IDLE_INDEX { IDLE_INDEX } else { index + 1 }
}

// =============================================================================
// Tests
// =============================================================================
