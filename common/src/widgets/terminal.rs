//! Terminal session rendering.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::Text;

use crate::config::layout::{
    CURSOR_SIZE,
    CURSOR_Y,
    DATE_LABEL_POS,
    DATE_VALUE_POS,
    FEED_LABEL_POS,
    FEED_VALUE_POS,
    HOUR_LABEL_POS,
    HOUR_VALUE_POS,
    PROMPT_LABEL_POS,
    TEXT_X,
    TIME_LABEL_POS,
    TIME_VALUE_POS,
};
use crate::host::{Element, Field};
use crate::scene::Scene;
use crate::sequencer::PROMPT;
use crate::styles::{TERMINAL_FONT, TERMINAL_STYLE, TOP_LEFT};

/// Labels are always drawn; an empty label draws nothing.
const LABELS: [(Field, Point); 5] = [
    (Field::DateLabel, DATE_LABEL_POS),
    (Field::HourLabel, HOUR_LABEL_POS),
    (Field::TimeLabel, TIME_LABEL_POS),
    (Field::PromptLabel, PROMPT_LABEL_POS),
    (Field::FeedLabel, FEED_LABEL_POS),
];

/// Values are drawn only while their element is visible.
const VALUES: [(Field, Element, Point); 4] = [
    (Field::DateValue, Element::DateValue, DATE_VALUE_POS),
    (Field::HourValue, Element::HourValue, HOUR_VALUE_POS),
    (Field::TimeValue, Element::TimeValue, TIME_VALUE_POS),
    (Field::FeedValue, Element::FeedValue, FEED_VALUE_POS),
];

const CURSOR_FILL: PrimitiveStyle<BinaryColor> = PrimitiveStyle::with_fill(BinaryColor::On);

/// Cursor sits right after the bare prompt.
fn cursor_origin() -> Point {
    let advance = TERMINAL_FONT.character_size.width + TERMINAL_FONT.character_spacing;
    Point::new(TEXT_X + (advance * PROMPT.len() as u32) as i32, CURSOR_Y)
}

pub fn draw_terminal<D>(
    display: &mut D,
    scene: &Scene,
) where
    D: DrawTarget<Color = BinaryColor>,
{
    for (field, pos) in LABELS {
        let text = scene.text(field);
        if !text.is_empty() {
            Text::with_text_style(text, pos, TERMINAL_STYLE, TOP_LEFT)
                .draw(display)
                .ok();
        }
    }

    for (field, element, pos) in VALUES {
        if scene.is_visible(element) {
            Text::with_text_style(scene.text(field), pos, TERMINAL_STYLE, TOP_LEFT)
                .draw(display)
                .ok();
        }
    }

    if scene.is_visible(Element::PromptCursor) {
        Rectangle::new(cursor_origin(), CURSOR_SIZE)
            .into_styled(CURSOR_FILL)
            .draw(display)
            .ok();
    }
}

// =============================================================================
// Tests
// =============================================================================
