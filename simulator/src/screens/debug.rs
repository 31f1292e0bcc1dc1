//! Debug page rendering.
//!
//! Shows the animation and feed state machines plus the tail of the
//! watchface's own log, sized for the 144x168 panel.

use core::fmt::Write;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle};
use embedded_graphics::text::Text;
use embedded_graphics_simulator::SimulatorDisplay;
use heapless::String;
use termwatch_common::Watchface;
use termwatch_common::config::SCREEN_WIDTH;
use termwatch_common::sequencer::IDLE_INDEX;
use termwatch_common::styles::{DEBUG_STYLE, TOP_LEFT};

const HEADER_Y: i32 = 2;
const HEADER_DIVIDER_Y: i32 = 12;
const STATS_Y: i32 = 15;
const STAT_LINE_HEIGHT: i32 = 9;
const LOG_DIVIDER_Y: i32 = 52;
const LOG_Y: i32 = 55;
const LOG_LINE_HEIGHT: i32 = 9;
const COL1_X: i32 = 2;

pub fn draw_debug_page(
    display: &mut SimulatorDisplay<BinaryColor>,
    face: &Watchface<u32>,
    fps: f32,
) {
    display.clear(BinaryColor::Off).ok();
    draw_header(display, fps);
    draw_horizontal_line(display, HEADER_DIVIDER_Y);
    draw_state(display, face);
    draw_horizontal_line(display, LOG_DIVIDER_Y);
    draw_log(display, face);
}

fn draw_header(
    display: &mut SimulatorDisplay<BinaryColor>,
    fps: f32,
) {
    let mut s: String<24> = String::new();
    let _ = write!(s, "DEBUG       {fps:>3.0} FPS");
    line(display, &s, HEADER_Y);
}

fn draw_state(
    display: &mut SimulatorDisplay<BinaryColor>,
    face: &Watchface<u32>,
) {
    let mut y = STATS_Y;

    let mut s: String<24> = String::new();
    let armed = if face.is_timer_armed() { "armed" } else { "idle" };
    let _ = write!(s, "step {:>2}/{IDLE_INDEX} {armed}", face.step());
    line(display, &s, y);
    y += STAT_LINE_HEIGHT;

    let mut s: String<24> = String::new();
    let _ = write!(s, "boot {:?}", face.startup());
    line(display, &s, y);
    y += STAT_LINE_HEIGHT;

    let receiver = face.receiver();
    let mut s: String<24> = String::new();
    let _ = write!(
        s,
        "feed {:?} {}ch {}B",
        receiver.phase(),
        receiver.chunks(),
        receiver.buffer().len()
    );
    line(display, &s, y);
    y += STAT_LINE_HEIGHT;

    let marquee = face.marquee();
    let mut s: String<24> = String::new();
    let _ = write!(
        s,
        "mrq {}/{} w{}",
        marquee.cursor(),
        receiver.buffer().last_index(),
        marquee.wait()
    );
    line(display, &s, y);
}

/// Newest lines that fit, oldest at the top.
fn draw_log(
    display: &mut SimulatorDisplay<BinaryColor>,
    face: &Watchface<u32>,
) {
    let rows = ((display.size().height as i32 - LOG_Y) / LOG_LINE_HEIGHT) as usize;
    let log = face.log();
    let mut y = LOG_Y;

    for entry in log.iter().skip(log.len().saturating_sub(rows)) {
        line(display, entry, y);
        y += LOG_LINE_HEIGHT;
    }
}

fn line(
    display: &mut SimulatorDisplay<BinaryColor>,
    text: &str,
    y: i32,
) {
    Text::with_text_style(text, Point::new(COL1_X, y), DEBUG_STYLE, TOP_LEFT)
        .draw(display)
        .ok();
}

fn draw_horizontal_line(
    display: &mut SimulatorDisplay<BinaryColor>,
    y: i32,
) {
    Line::new(Point::new(2, y), Point::new(SCREEN_WIDTH as i32 - 2, y))
        .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
        .draw(display)
        .ok();
}
