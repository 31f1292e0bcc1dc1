//! Status bar indicators.
//!
//! Icons are drawn from primitives instead of bitmaps. Positions follow the
//! layout constants; everything fits inside the status bar height.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};
use embedded_graphics::text::Text;

use crate::battery::{BatteryView, PercentLayout};
use crate::config::layout::{
    BATTERY_ICON_POS,
    BATTERY_ICON_SIZE,
    BATTERY_PERCENT_FULL_POS,
    BATTERY_PERCENT_POS,
    BLUETOOTH_ICON_POS,
};
use crate::styles::{PERCENT_STYLE, TOP_LEFT};

const STROKE: PrimitiveStyle<BinaryColor> = PrimitiveStyle::with_stroke(BinaryColor::On, 1);
const FILL: PrimitiveStyle<BinaryColor> = PrimitiveStyle::with_fill(BinaryColor::On);

// =============================================================================
// Battery Geometry
// =============================================================================

/// Outline without the terminal nub.
const BATTERY_BODY_SIZE: Size = Size::new(BATTERY_ICON_SIZE.width - 2, BATTERY_ICON_SIZE.height);

/// Positive terminal on the right edge.
const BATTERY_NUB_POS: Point = Point::new(
    BATTERY_ICON_POS.x + BATTERY_BODY_SIZE.width as i32,
    BATTERY_ICON_POS.y + 3,
);
const BATTERY_NUB_SIZE: Size = Size::new(2, 3);

/// Level bar origin inside the outline.
const BATTERY_BAR_POS: Point = Point::new(BATTERY_ICON_POS.x + 2, BATTERY_ICON_POS.y + 2);
const BATTERY_BAR_HEIGHT: u32 = 5;

// =============================================================================
// Drawing Functions
// =============================================================================

/// Bluetooth rune: a spine with two chevrons.
pub fn draw_bluetooth_icon<D>(display: &mut D)
where
    D: DrawTarget<Color = BinaryColor>,
{
    let o = BLUETOOTH_ICON_POS;
    let segments = [
        (Point::new(3, 0), Point::new(3, 10)),
        (Point::new(3, 0), Point::new(6, 3)),
        (Point::new(6, 3), Point::new(0, 8)),
        (Point::new(3, 10), Point::new(6, 7)),
        (Point::new(6, 7), Point::new(0, 2)),
    ];
    for (start, end) in segments {
        Line::new(o + start, o + end).into_styled(STROKE).draw(display).ok();
    }
}

/// Battery outline, level bar or charging bolt, and the percent digits.
pub fn draw_battery<D>(
    display: &mut D,
    view: &BatteryView,
) where
    D: DrawTarget<Color = BinaryColor>,
{
    Rectangle::new(BATTERY_ICON_POS, BATTERY_BODY_SIZE)
        .into_styled(STROKE)
        .draw(display)
        .ok();
    Rectangle::new(BATTERY_NUB_POS, BATTERY_NUB_SIZE)
        .into_styled(FILL)
        .draw(display)
        .ok();

    if view.charging_icon {
        let o = BATTERY_ICON_POS;
        let bolt = [
            (Point::new(7, 1), Point::new(4, 5)),
            (Point::new(4, 5), Point::new(9, 4)),
            (Point::new(9, 4), Point::new(6, 8)),
        ];
        for (start, end) in bolt {
            Line::new(o + start, o + end).into_styled(STROKE).draw(display).ok();
        }
    }

    if view.bar_visible && view.fill_width > 0 {
        Rectangle::new(BATTERY_BAR_POS, Size::new(view.fill_width, BATTERY_BAR_HEIGHT))
            .into_styled(FILL)
            .draw(display)
            .ok();
    }

    let origin = match view.layout {
        PercentLayout::Full => BATTERY_PERCENT_FULL_POS,
        PercentLayout::TwoDigit => BATTERY_PERCENT_POS,
    };
    Text::with_text_style(&view.digits, origin, PERCENT_STYLE, TOP_LEFT)
        .draw(display)
        .ok();
}
