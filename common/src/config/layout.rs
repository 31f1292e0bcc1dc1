//! Display and layout configuration constants.
//!
//! Positions are top-left corners in pixels on the 144x168 panel. The terminal
//! lines are stacked 16 px apart; the prompt line and the feed command line
//! share a row since only one of them is ever used per cycle.

use embedded_graphics::prelude::{Point, Size};

// =============================================================================
// Display Configuration
// =============================================================================

/// Display width in pixels.
pub const SCREEN_WIDTH: u32 = 144;

/// Display height in pixels.
pub const SCREEN_HEIGHT: u32 = 168;

// =============================================================================
// Terminal Lines
// =============================================================================

/// Left margin shared by every terminal line.
pub const TEXT_X: i32 = 5;

pub const DATE_LABEL_POS: Point = Point::new(TEXT_X, 24);
pub const DATE_VALUE_POS: Point = Point::new(TEXT_X, 40);
pub const HOUR_LABEL_POS: Point = Point::new(TEXT_X, 55);
pub const HOUR_VALUE_POS: Point = Point::new(TEXT_X, 71);
pub const TIME_LABEL_POS: Point = Point::new(TEXT_X, 87);
pub const TIME_VALUE_POS: Point = Point::new(TEXT_X, 103);
pub const PROMPT_LABEL_POS: Point = Point::new(TEXT_X, 119);
pub const FEED_LABEL_POS: Point = Point::new(TEXT_X, 119);
pub const FEED_VALUE_POS: Point = Point::new(TEXT_X, 135);

/// Inverted block cursor drawn after the idle prompt (x follows the prompt width).
pub const CURSOR_Y: i32 = 132;
pub const CURSOR_SIZE: Size = Size::new(8, 2);

// =============================================================================
// Status Bar
// =============================================================================

pub const BLUETOOTH_ICON_POS: Point = Point::new(80, 5);
pub const BATTERY_ICON_POS: Point = Point::new(121, 6);
pub const BATTERY_ICON_SIZE: Size = Size::new(16, 9);

/// Width of the battery level bar at 100%.
pub const BATTERY_BAR_WIDTH: u32 = 11;

/// Percent text origin for the "100%" layout (four glyphs).
pub const BATTERY_PERCENT_FULL_POS: Point = Point::new(93, 6);

/// Percent text origin for the "NN%" layout (three glyphs).
pub const BATTERY_PERCENT_POS: Point = Point::new(99, 6);
