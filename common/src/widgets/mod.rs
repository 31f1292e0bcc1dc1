//! Widget components for the watchface display.
//!
//! - [`status`]: Bluetooth and battery indicators in the top bar
//! - [`terminal`]: The faux shell session (labels, values, cursor, ticker)
//!
//! All widgets are generic over `DrawTarget<Color = BinaryColor>` so the same
//! code drives the simulator window and a real 1-bit panel. Drawing errors are
//! discarded with `.ok()`: a failed blit has no recovery path on a watchface.

mod status;
mod terminal;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

pub use status::{draw_battery, draw_bluetooth_icon};
pub use terminal::draw_terminal;

use crate::scene::Scene;

/// Redraw the whole face from the retained scene.
pub fn draw_scene<D>(
    display: &mut D,
    scene: &Scene,
) where
    D: DrawTarget<Color = BinaryColor>,
{
    display.clear(BinaryColor::Off).ok();

    if scene.bluetooth() {
        draw_bluetooth_icon(display);
    }
    draw_battery(display, scene.battery());
    draw_terminal(display, scene);
}
