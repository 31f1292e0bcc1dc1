//! Terminal watchface simulator for desktop.
//!
//! Runs the shared watchface core against a desktop host and an emulated
//! phone companion, drawing into an `embedded-graphics-simulator` window.
//!
//! # Keys
//!
//! | Key        | Action                                   |
//! |------------|------------------------------------------|
//! | `B`        | Toggle the phone connection              |
//! | `Up/Down`  | Battery level +/- 10%                    |
//! | `C`        | Toggle charging                          |
//! | `H`        | Toggle 12/24h clock                      |
//! | `T`        | Phone: toggle typing animation           |
//! | `F`        | Phone: toggle feed ticker                |
//! | `V`        | Phone: toggle disconnect vibration       |
//! | `Z`        | Phone: step timezone offset by one hour  |
//! | `N`        | Phone: push the next headline            |
//! | `R`        | Watch: request a feed refresh            |
//! | `D`        | Toggle the debug page                    |
//!
//! Set `RUST_LOG=debug` to see the message traffic.

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

mod host;
mod phone;
mod screens;
mod timing;

use std::thread;
use std::time::Instant;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::sdl2::Keycode;
use embedded_graphics_simulator::{
    BinaryColorTheme,
    OutputSettingsBuilder,
    SimulatorDisplay,
    SimulatorEvent,
    Window,
};
use termwatch_common::config::{SCREEN_HEIGHT, SCREEN_WIDTH, TICK_UNIT, TickUnit};
use termwatch_common::widgets::draw_scene;
use termwatch_common::{BatteryState, Clock, LocalTime, Watchface};
use tracing_subscriber::EnvFilter;

use crate::host::SimHost;
use crate::phone::Phone;
use crate::screens::draw_debug_page;
use crate::timing::{FRAME_TIME, PHONE_LATENCY_FRAMES};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Page {
    Watch,
    Debug,
}

impl Page {
    const fn toggle(self) -> Self {
        match self {
            Self::Watch => Self::Debug,
            Self::Debug => Self::Watch,
        }
    }
}

fn main() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .try_init();

    let mut display: SimulatorDisplay<BinaryColor> = SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
    let output_settings = OutputSettingsBuilder::new()
        .scale(3)
        .theme(BinaryColorTheme::OledWhite)
        .build();
    let mut window = Window::new("Terminal Watchface Sim", &output_settings);

    let mut host = SimHost::new();
    let mut phone = Phone::new();
    let mut battery = BatteryState {
        percent: 80,
        charging: false,
    };

    let mut face: Watchface<u32> = Watchface::load(&mut host);
    let connected = host.connected;
    face.start(&mut host, battery, connected);
    face.on_tick(&mut host);
    phone.connect(face.settings());

    let mut last_tick = tick_key(&host.now());
    let mut logged = 0u32;
    let mut frame_count = 0u32;

    // UI state
    let mut page = Page::Watch;
    let mut page_just_switched = true;
    let mut last_fps_calc = Instant::now();
    let mut fps_frame_count = 0u32;
    let mut current_fps = 0.0f32;

    loop {
        let frame_start = Instant::now();

        // Handle events
        for ev in window.events() {
            match ev {
                SimulatorEvent::Quit => {
                    face.shutdown(&mut host);
                    while let Some(code) = host.take_sent() {
                        phone.receive(code);
                    }
                    forward_log(&face, &mut logged);
                    return;
                }
                SimulatorEvent::KeyDown { keycode, repeat, .. } => {
                    if repeat {
                        continue;
                    }
                    match keycode {
                        Keycode::B => {
                            let connected = !host.connected;
                            host.connected = connected;
                            face.on_bluetooth(&mut host, connected);
                            if connected {
                                phone.connect(face.settings());
                            }
                        }
                        Keycode::Up => {
                            battery.percent = battery.percent.saturating_add(10).min(100);
                            face.on_battery(&mut host, battery);
                        }
                        Keycode::Down => {
                            battery.percent = battery.percent.saturating_sub(10);
                            face.on_battery(&mut host, battery);
                        }
                        Keycode::C => {
                            battery.charging = !battery.charging;
                            face.on_battery(&mut host, battery);
                        }
                        Keycode::H => {
                            host.is_24h = !host.is_24h;
                            tracing::info!(is_24h = host.is_24h, "clock format");
                        }
                        Keycode::T => phone.toggle_typing(),
                        Keycode::F => {
                            phone.toggle_feed();
                            tracing::info!(enabled = phone.settings().feed_enabled, "phone: feed");
                        }
                        Keycode::V => phone.toggle_bluetooth_vibe(),
                        Keycode::Z => {
                            phone.step_timezone();
                            tracing::info!(offset_min = phone.settings().timezone_offset_min, "phone: timezone");
                        }
                        Keycode::N => phone.push_headline(),
                        Keycode::R => face.request_feed_refresh(&mut host),
                        Keycode::D => {
                            page = page.toggle();
                            page_just_switched = true;
                        }
                        _ => {}
                    }
                }
                _ => {}
            }
        }

        // Phone link
        while let Some(code) = host.take_sent() {
            phone.receive(code);
        }
        if host.connected
            && frame_count.is_multiple_of(PHONE_LATENCY_FRAMES)
            && let Some(message) = phone.next_message()
        {
            face.on_message(&mut host, &message.updates());
        }

        // Animation timer
        if let Some(handle) = host.due_timer(Instant::now()) {
            face.on_timer(&mut host, handle);
        }

        // Clock tick
        let tick = tick_key(&host.now());
        if tick != last_tick {
            last_tick = tick;
            face.on_tick(&mut host);
        }

        forward_log(&face, &mut logged);

        // FPS calculation
        fps_frame_count += 1;
        if last_fps_calc.elapsed().as_secs() >= 1 {
            current_fps = fps_frame_count as f32 / last_fps_calc.elapsed().as_secs_f32();
            fps_frame_count = 0;
            last_fps_calc = Instant::now();
        }

        // Render based on current page
        match page {
            Page::Watch => {
                if host.scene.take_dirty() || page_just_switched {
                    draw_scene(&mut display, &host.scene);
                }
            }
            Page::Debug => draw_debug_page(&mut display, &face, current_fps),
        }
        page_just_switched = false;

        window.update(&display);
        frame_count = frame_count.wrapping_add(1);

        if let Some(remaining) = FRAME_TIME.checked_sub(frame_start.elapsed()) {
            thread::sleep(remaining);
        }
    }
}

/// Changes exactly when the host would deliver a clock tick.
fn tick_key(now: &LocalTime) -> i64 {
    match TICK_UNIT {
        TickUnit::Second => now.unix,
        TickUnit::Minute => now.unix.div_euclid(60),
    }
}

/// Mirror new watchface log lines into `tracing`.
fn forward_log(
    face: &Watchface<u32>,
    logged: &mut u32,
) {
    let log = face.log();
    let fresh = log.total().wrapping_sub(*logged) as usize;
    if fresh == 0 {
        return;
    }
    for line in log.iter().skip(log.len().saturating_sub(fresh)) {
        tracing::info!(target: "watchface", "{line}");
    }
    *logged = log.total();
}
