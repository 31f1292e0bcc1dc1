//! Pre-computed static text styles.
//!
//! Every style is a `const`, so widgets reference them without constructing
//! style structs per draw call. The panel is 1-bit, so "on" pixels are the
//! foreground and the background is cleared to "off".

use embedded_graphics::{
    mono_font::{MonoFont, MonoTextStyle, ascii::FONT_6X9},
    pixelcolor::BinaryColor,
    text::{Alignment, Baseline, TextStyle, TextStyleBuilder},
};
use profont::PROFONT_12_POINT;

// =============================================================================
// Text Alignment Styles
// =============================================================================

/// Left-aligned, positioned by the top of the glyph cell. Matches the layout
/// constants, which are top-left corners.
pub const TOP_LEFT: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Left)
    .baseline(Baseline::Top)
    .build();

// =============================================================================
// Fonts
// =============================================================================

/// Terminal font. Monospace, 8 px advance, so the 17-character ticker window
/// fits the panel width.
pub const TERMINAL_FONT: &MonoFont = &PROFONT_12_POINT;

/// Battery percent digits, 6 px pitch.
pub const PERCENT_FONT: &MonoFont = &FONT_6X9;

// =============================================================================
// Pre-computed Text Styles
// =============================================================================

pub const TERMINAL_STYLE: MonoTextStyle<'static, BinaryColor> = MonoTextStyle::new(TERMINAL_FONT, BinaryColor::On);

pub const PERCENT_STYLE: MonoTextStyle<'static, BinaryColor> = MonoTextStyle::new(PERCENT_FONT, BinaryColor::On);

/// Debug page text (hosts that draw the log use the same small font).
pub const DEBUG_STYLE: MonoTextStyle<'static, BinaryColor> = MonoTextStyle::new(PERCENT_FONT, BinaryColor::On);
