//! The watchface application state machine.
//!
//! [`Watchface`] owns every piece of mutable state and reacts to the three
//! callback sources the host serializes:
//!
//! 1. [`Watchface::on_timer`]: the one-shot animation timer fired
//! 2. [`Watchface::on_tick`]: the real-time clock ticked
//! 3. [`Watchface::on_message`]: the phone sent a dictionary
//!
//! plus the status callbacks [`Watchface::on_battery`] and
//! [`Watchface::on_bluetooth`]. The host passes itself into every call, so
//! there is no global state.
//!
//! # Animation
//!
//! Each timer fire performs exactly one [`Step`], re-arms exactly one timer
//! and advances the step counter (see [`crate::sequencer`]). A reset cancels
//! the timer, blanks the terminal and starts over from step 0.
//!
//! # Startup
//!
//! ```text
//! Fresh ──first idle step──> WarmingUp(n) ──STARTUP_IDLE_CYCLES──> Settled
//! ```
//!
//! While `Fresh`, a tick starts the animation if nothing is armed. While
//! warming up, ticks never restart it. Once `Settled`, every tick restarts it
//! when the typing animation is enabled.

use core::fmt;

use crate::battery::{BatteryState, BatteryView};
use crate::clock::ClockText;
use crate::config::timing::{STARTUP_IDLE_CYCLES, TYPE_DELTA_MS};
use crate::debug_log::DebugLog;
use crate::feed::{ChunkOutcome, FeedReceiver, LOADING_TEXT, Marquee, TimeoutOutcome};
use crate::host::{Element, Field, Host, Pulse, Storage, Timers};
use crate::protocol::{ControlCode, SyncUpdate};
use crate::sequencer::{IDLE_INDEX, Line, PROMPT, Step, next_index, typed};
use crate::settings::Settings;
use crate::sync::{SettingsSync, SyncEffect, in_key_order};
use crate::timer::AnimationTimer;
use crate::watch_log;

/// Launch progress, gating tick-driven restarts.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Startup {
    Fresh,
    WarmingUp(u8),
    Settled,
}

pub struct Watchface<T> {
    settings: Settings,
    sync: SettingsSync,
    timer: AnimationTimer<T>,
    step: u8,
    startup: Startup,
    clock: ClockText,
    receiver: FeedReceiver,
    marquee: Marquee,
    cursor_visible: bool,
    can_fetch: bool,
    started: bool,
    log: DebugLog,
}

impl<T: Copy + PartialEq + fmt::Debug> Watchface<T> {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            sync: SettingsSync::new(),
            timer: AnimationTimer::new(),
            step: 0,
            startup: Startup::Fresh,
            clock: ClockText::new(),
            receiver: FeedReceiver::new(),
            marquee: Marquee::new(),
            cursor_visible: false,
            can_fetch: false,
            started: false,
            log: DebugLog::new(),
        }
    }

    /// Build from persisted settings, falling back to defaults.
    pub fn load<S: Storage + ?Sized>(storage: &mut S) -> Self {
        match Settings::load(storage) {
            Ok(settings) => {
                let mut face = Self::new(settings);
                watch_log!(face.log, "settings: loaded");
                face
            }
            Err(e) => {
                let mut face = Self::new(Settings::default());
                watch_log!(face.log, "settings: {}, defaults", e);
                face
            }
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Lay out the blank terminal and the status bar.
    ///
    /// The animation itself starts on the first clock tick.
    pub fn start<H>(
        &mut self,
        host: &mut H,
        battery: BatteryState,
        connected: bool,
    ) where
        H: Host + Timers<Handle = T> + ?Sized,
    {
        self.reset_display(host);
        self.on_battery(host, battery);
        self.on_bluetooth(host, connected);
        self.started = true;
        watch_log!(self.log, "start: feed {}", on_off(self.settings.feed_enabled));
    }

    /// Tell the phone we are closing, stop animating and persist.
    pub fn shutdown<H>(
        &mut self,
        host: &mut H,
    ) where
        H: Host + Timers<Handle = T> + ?Sized,
    {
        self.send(host, ControlCode::AppClose);
        self.timer.cancel(host);
        self.persist(host);
        watch_log!(self.log, "shutdown");
    }

    // =========================================================================
    // Callbacks
    // =========================================================================

    /// Real-time clock tick.
    pub fn on_tick<H>(
        &mut self,
        host: &mut H,
    ) where
        H: Host + Timers<Handle = T> + ?Sized,
    {
        let reset = match self.startup {
            Startup::Settled => self.settings.typing_animation,
            Startup::Fresh => !self.timer.is_armed(),
            Startup::WarmingUp(_) => false,
        };

        if !reset {
            if !self.timer.ensure_armed(host, TYPE_DELTA_MS) {
                watch_log!(self.log, "timer: unavailable");
            }
            return;
        }

        let first = self.startup == Startup::Fresh;
        self.reset_animation(host);

        if first && self.settings.feed_enabled {
            self.announce_feed_ready(host);
        }
    }

    /// Animation timer fired.
    pub fn on_timer<H>(
        &mut self,
        host: &mut H,
        handle: T,
    ) where
        H: Host + Timers<Handle = T> + ?Sized,
    {
        if !self.timer.fired(handle) {
            watch_log!(self.log, "timer: stale {:?}", handle);
            return;
        }

        let index = self.step;
        let step = Step::at(index);
        self.perform(host, step);

        let scrolling = self.feed_visible() && self.marquee.is_scrolling();
        if !self.timer.arm(host, step.delay_ms(scrolling)) {
            watch_log!(self.log, "timer: stalled at {}", index);
        }

        if index > 0 && !self.settings.typing_animation {
            self.refresh_clock(host);
        }

        self.step = next_index(index, self.settings.feed_enabled);
    }

    /// One inbound dictionary from the phone. Entries apply in key order.
    pub fn on_message<H>(
        &mut self,
        host: &mut H,
        updates: &[SyncUpdate<'_>],
    ) where
        H: Host + Timers<Handle = T> + ?Sized,
    {
        for update in in_key_order(updates) {
            self.apply_update(host, update);
        }
    }

    pub fn on_battery<H>(
        &mut self,
        host: &mut H,
        state: BatteryState,
    ) where
        H: Host + ?Sized,
    {
        host.set_battery(&BatteryView::from_state(state));
    }

    pub fn on_bluetooth<H>(
        &mut self,
        host: &mut H,
        connected: bool,
    ) where
        H: Host + ?Sized,
    {
        if self.started && !connected && self.settings.bluetooth_vibe {
            host.vibrate(Pulse::Long);
            watch_log!(self.log, "bt: lost");
        }
        host.set_bluetooth(connected);
    }

    /// Ask the phone for a fresh feed, once per grant.
    pub fn request_feed_refresh<H>(
        &mut self,
        host: &mut H,
    ) where
        H: Host + ?Sized,
    {
        if !self.settings.feed_enabled {
            return;
        }
        if !self.can_fetch {
            watch_log!(self.log, "fetch: no grant");
            return;
        }
        self.can_fetch = false;
        self.send(host, ControlCode::FetchFeed);
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub const fn settings(&self) -> &Settings { &self.settings }

    #[inline]
    pub const fn step(&self) -> u8 { self.step }

    /// Animation has reached its idle step.
    #[inline]
    pub const fn is_idle(&self) -> bool { self.step == IDLE_INDEX }

    #[inline]
    pub const fn startup(&self) -> Startup { self.startup }

    #[inline]
    pub const fn receiver(&self) -> &FeedReceiver { &self.receiver }

    #[inline]
    pub const fn marquee(&self) -> &Marquee { &self.marquee }

    #[inline]
    pub const fn is_timer_armed(&self) -> bool { self.timer.is_armed() }

    #[inline]
    pub const fn log(&self) -> &DebugLog { &self.log }

    // =========================================================================
    // Animation
    // =========================================================================

    fn perform<H>(
        &mut self,
        host: &mut H,
        step: Step,
    ) where
        H: Host + ?Sized,
    {
        match step {
            Step::Refresh => self.refresh_clock(host),
            Step::Type { line, keystrokes } => host.set_text(line.label(), typed(line, keystrokes)),
            Step::Reveal(line) => self.reveal(host, line),
            Step::ShowFeed => {
                host.set_attached(Element::FeedValue, true);
                host.set_hidden(Element::FeedValue, false);
                self.drive_marquee(host);
            }
            Step::SettleFeed => self.drive_marquee(host),
            Step::Idle => self.idle(host),
        }
    }

    fn reveal<H>(
        &mut self,
        host: &mut H,
        line: Line,
    ) where
        H: Host + ?Sized,
    {
        host.set_attached(line.value(), true);
        match line {
            Line::Date => host.set_text(Field::HourLabel, PROMPT),
            Line::Hour => host.set_text(Field::TimeLabel, PROMPT),
            Line::Time if self.settings.feed_enabled => host.set_text(Field::FeedLabel, PROMPT),
            Line::Time => {
                host.set_text(Field::PromptLabel, PROMPT);
                host.set_attached(Element::PromptCursor, true);
                self.cursor_visible = true;
            }
            Line::Feed => {}
        }
    }

    fn idle<H>(
        &mut self,
        host: &mut H,
    ) where
        H: Host + ?Sized,
    {
        if self.settings.feed_enabled {
            self.drive_marquee(host);
            match self.receiver.idle_cycle() {
                TimeoutOutcome::Waiting => {}
                TimeoutOutcome::Sealed { changed } => {
                    watch_log!(self.log, "feed: timeout, partial");
                    self.title_completed(host, changed);
                }
                TimeoutOutcome::Abandoned => {
                    watch_log!(self.log, "feed: timeout, empty");
                    self.request_feed_refresh(host);
                }
            }
        } else {
            self.cursor_visible = !self.cursor_visible;
            host.set_attached(Element::PromptCursor, self.cursor_visible);
        }

        self.startup = match self.startup {
            Startup::Fresh => Startup::WarmingUp(1),
            Startup::WarmingUp(n) if n + 1 >= STARTUP_IDLE_CYCLES => {
                watch_log!(self.log, "startup: settled");
                Startup::Settled
            }
            Startup::WarmingUp(n) => Startup::WarmingUp(n + 1),
            Startup::Settled => Startup::Settled,
        };
    }

    fn drive_marquee<H>(
        &mut self,
        host: &mut H,
    ) where
        H: Host + ?Sized,
    {
        if !self.feed_visible() {
            return;
        }
        let buffer = self.receiver.buffer();
        if self.marquee.step(buffer.last_index()) {
            host.set_text(Field::FeedValue, buffer.window(self.marquee.cursor()));
        }
    }

    fn animation_begun(&self) -> bool { self.step > 0 || self.timer.is_armed() }

    fn feed_visible(&self) -> bool { self.settings.feed_enabled && self.receiver.is_ready() }

    fn refresh_clock<H>(
        &mut self,
        host: &mut H,
    ) where
        H: Host + ?Sized,
    {
        self.clock = ClockText::format(&host.now(), host.is_24h(), self.settings.timezone_offset_min);
        host.set_text(Field::DateValue, &self.clock.date);
        host.set_text(Field::HourValue, &self.clock.hour);
        host.set_text(Field::TimeValue, &self.clock.unix);
    }

    fn reset_animation<H>(
        &mut self,
        host: &mut H,
    ) where
        H: Host + Timers<Handle = T> + ?Sized,
    {
        self.timer.cancel(host);
        self.reset_display(host);
        self.step = 0;
        if !self.timer.arm(host, TYPE_DELTA_MS) {
            watch_log!(self.log, "timer: unavailable");
        }
    }

    fn reset_display<H>(
        &mut self,
        host: &mut H,
    ) where
        H: Host + ?Sized,
    {
        host.set_text(Field::DateLabel, PROMPT);
        for field in [Field::HourLabel, Field::TimeLabel, Field::PromptLabel, Field::FeedLabel] {
            host.set_text(field, "");
        }
        for field in [Field::DateValue, Field::HourValue, Field::TimeValue] {
            host.set_text(field, "");
        }
        for element in Element::ALL {
            host.set_attached(element, false);
        }
        host.set_hidden(Element::FeedValue, true);
        self.cursor_visible = false;

        self.show_feed_start(host);
    }

    /// Rewind the marquee and show the first window, or the placeholder.
    fn show_feed_start<H>(
        &mut self,
        host: &mut H,
    ) where
        H: Host + ?Sized,
    {
        self.marquee.rewind();
        if self.receiver.is_ready() {
            host.set_text(Field::FeedValue, self.receiver.buffer().window(0));
        } else {
            host.set_text(Field::FeedValue, LOADING_TEXT);
        }
    }

    // =========================================================================
    // Sync
    // =========================================================================

    fn apply_update<H>(
        &mut self,
        host: &mut H,
        update: SyncUpdate<'_>,
    ) where
        H: Host + Timers<Handle = T> + ?Sized,
    {
        match self.sync.apply(&mut self.settings, update) {
            SyncEffect::Ignored | SyncEffect::Unchanged => {}
            SyncEffect::Stored => {
                self.persist(host);
                if let SyncUpdate::TimezoneOffset(offset) = update {
                    watch_log!(self.log, "sync: tz {}min", offset);
                    if self.step > 0 {
                        self.refresh_clock(host);
                    }
                }
            }
            SyncEffect::FeedToggled { enabled } => {
                watch_log!(self.log, "sync: feed {}", on_off(enabled));
                self.persist(host);
                if enabled {
                    self.receiver.discard();
                }
                self.reset_animation(host);
                if enabled {
                    self.announce_feed_ready(host);
                }
            }
            SyncEffect::FeedSynced { enabled } => {
                watch_log!(self.log, "sync: feed {} (handshake)", on_off(enabled));
                self.persist(host);
                // Before the first tick the startup reset announces instead
                if enabled && self.animation_begun() {
                    self.announce_feed_ready(host);
                }
            }
            SyncEffect::Control(code) => self.on_control(host, code),
            SyncEffect::TitleChunk(chunk) => {
                let outcome = self.receiver.chunk(chunk);
                self.on_chunk_outcome(host, outcome);
            }
        }
    }

    fn on_control<H>(
        &mut self,
        host: &mut H,
        code: ControlCode,
    ) where
        H: Host + ?Sized,
    {
        match code {
            ControlCode::FeedTitleStart => {
                self.receiver.start();
                self.show_feed_start(host);
                watch_log!(self.log, "feed: receiving");
            }
            ControlCode::FeedTitleEnd => {
                let outcome = self.receiver.end();
                self.on_chunk_outcome(host, outcome);
            }
            ControlCode::FeedFetched | ControlCode::Ping => {
                watch_log!(self.log, "<- {}", code.name());
            }
            ControlCode::AppClose | ControlCode::FetchFeed | ControlCode::FeedReady => {
                watch_log!(self.log, "<- {}?", code.name());
            }
        }
    }

    fn on_chunk_outcome<H>(
        &mut self,
        host: &mut H,
        outcome: ChunkOutcome,
    ) where
        H: Host + ?Sized,
    {
        match outcome {
            ChunkOutcome::Appended | ChunkOutcome::Ignored => {}
            ChunkOutcome::Duplicate => watch_log!(self.log, "feed: duplicate chunk"),
            ChunkOutcome::Completed { changed } => self.title_completed(host, changed),
        }
    }

    fn title_completed<H>(
        &mut self,
        host: &mut H,
        changed: bool,
    ) where
        H: Host + ?Sized,
    {
        watch_log!(self.log, "feed: ready ({} chars)", self.receiver.buffer().title().len());
        self.show_feed_start(host);
        if changed && self.settings.feed_vibe {
            host.vibrate(Pulse::Short);
        }
    }

    /// Grant one fetch and tell the phone we can take a title.
    fn announce_feed_ready<H>(
        &mut self,
        host: &mut H,
    ) where
        H: Host + ?Sized,
    {
        self.can_fetch = true;
        self.send(host, ControlCode::FeedReady);
    }

    fn send<H>(
        &mut self,
        host: &mut H,
        code: ControlCode,
    ) where
        H: Host + ?Sized,
    {
        match host.send(code) {
            Ok(()) => watch_log!(self.log, "-> {}", code.name()),
            Err(e) => watch_log!(self.log, "-> {} failed: {}", code.name(), e),
        }
    }

    fn persist<H>(
        &mut self,
        host: &mut H,
    ) where
        H: Host + ?Sized,
    {
        if let Err(e) = self.settings.store(host) {
            watch_log!(self.log, "settings: {}", e);
        }
    }
}

const fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::feed::{FEED_SETTLE_CYCLES, FEED_WINDOW};
    use crate::config::timing::{MARQUEE_DELTA_MS, PAUSE_DELTA_MS, PROMPT_DELTA_MS};
    use crate::testing::MockHost;

    /// Expire the pending timer `n` times.
    fn run(
        face: &mut Watchface<u32>,
        host: &mut MockHost,
        n: usize,
    ) {
        for _ in 0..n {
            let handle = host.timers.expire().expect("a timer must be pending");
            face.on_timer(host, handle);
        }
    }

    fn started(settings: Settings) -> (Watchface<u32>, MockHost) {
        let mut host = MockHost::new();
        let mut face = Watchface::new(settings);
        face.start(&mut host, BatteryState { percent: 80, charging: false }, true);
        (face, host)
    }

    /// Drive past the two handshake updates.
    fn handshake(
        face: &mut Watchface<u32>,
        host: &mut MockHost,
    ) {
        let enabled = face.settings().feed_enabled;
        face.on_message(host, &[SyncUpdate::FeedEnabled(enabled)]);
        face.on_message(host, &[SyncUpdate::FeedEnabled(enabled)]);
    }

    fn settle(
        face: &mut Watchface<u32>,
        host: &mut MockHost,
    ) {
        while face.startup() != Startup::Settled {
            run(face, host, 1);
        }
    }

    fn deliver_title(
        face: &mut Watchface<u32>,
        host: &mut MockHost,
        chunks: &[&str],
    ) {
        face.on_message(host, &[SyncUpdate::Control(ControlCode::FeedTitleStart)]);
        for chunk in chunks {
            face.on_message(host, &[SyncUpdate::FeedTitle(chunk)]);
        }
    }

    #[test]
    fn test_first_tick_starts_animation() {
        let (mut face, mut host) = started(Settings::new());
        assert!(!face.is_timer_armed());

        face.on_tick(&mut host);
        assert!(face.is_timer_armed());
        assert_eq!(host.timers.pending_count(), 1);
        assert_eq!(host.timers.last_delay(), Some(TYPE_DELTA_MS));
        assert_eq!(host.text(Field::DateLabel), "pebble>");
    }

    #[test]
    fn test_every_step_arms_one_timer() {
        for feed in [false, true] {
            let (mut face, mut host) = started(Settings { feed_enabled: feed, ..Settings::new() });
            face.on_tick(&mut host);
            for _ in 0..60 {
                run(&mut face, &mut host, 1);
                assert_eq!(host.timers.pending_count(), 1);
            }
        }
    }

    #[test]
    fn test_date_line_types_and_reveals() {
        let (mut face, mut host) = started(Settings::new());
        face.on_tick(&mut host);

        run(&mut face, &mut host, 1);
        assert_eq!(face.step(), 1);
        let mut typed_lines = Vec::new();
        for _ in 0..7 {
            run(&mut face, &mut host, 1);
            typed_lines.push(host.text(Field::DateLabel).to_string());
            assert_eq!(host.timers.last_delay(), Some(TYPE_DELTA_MS));
        }
        assert_eq!(typed_lines.last().map(String::as_str), Some("pebble>date +%F"));
        assert_eq!(typed_lines[4], "pebble>date +");
        assert!(!host.ui.is_attached(Element::DateValue));

        run(&mut face, &mut host, 1);
        assert!(host.ui.is_attached(Element::DateValue));
        assert_eq!(host.text(Field::DateValue), "2024-03-09");
        assert_eq!(host.text(Field::HourLabel), "pebble>");
        assert_eq!(host.timers.last_delay(), Some(PAUSE_DELTA_MS));
    }

    #[test]
    fn test_without_feed_reaches_blinking_cursor() {
        let (mut face, mut host) = started(Settings::new());
        face.on_tick(&mut host);
        run(&mut face, &mut host, 25);

        assert!(face.is_idle());
        assert_eq!(host.text(Field::TimeValue), "1710018465");
        assert_eq!(host.text(Field::PromptLabel), "pebble>");
        assert!(host.ui.is_attached(Element::PromptCursor));

        run(&mut face, &mut host, 1);
        assert!(!host.ui.is_attached(Element::PromptCursor));
        assert_eq!(host.timers.last_delay(), Some(PROMPT_DELTA_MS));
        run(&mut face, &mut host, 1);
        assert!(host.ui.is_attached(Element::PromptCursor));
    }

    #[test]
    fn test_reset_from_any_step() {
        for steps in [0, 3, 8, 24, 40] {
            let (mut face, mut host) = started(Settings::new());
            face.on_tick(&mut host);
            run(&mut face, &mut host, steps);
            settle(&mut face, &mut host);

            face.on_tick(&mut host);
            assert_eq!(face.step(), 0);
            assert_eq!(host.timers.pending_count(), 1);
            for element in Element::ALL {
                assert!(!host.ui.is_attached(element));
            }
            for field in [Field::DateValue, Field::HourValue, Field::TimeValue] {
                assert_eq!(host.text(field), "");
            }
            assert_eq!(host.text(Field::DateLabel), "pebble>");
        }
    }

    #[test]
    fn test_warm_up_ignores_ticks() {
        let (mut face, mut host) = started(Settings::new());
        face.on_tick(&mut host);
        run(&mut face, &mut host, 26);
        assert!(matches!(face.startup(), Startup::WarmingUp(_)));

        let scheduled = host.timers.scheduled.len();
        face.on_tick(&mut host);
        assert!(face.is_idle());
        assert_eq!(host.timers.scheduled.len(), scheduled);

        settle(&mut face, &mut host);
        face.on_tick(&mut host);
        assert_eq!(face.step(), 0);
    }

    #[test]
    fn test_typing_disabled_keeps_clock_current() {
        let (mut face, mut host) = started(Settings { typing_animation: false, ..Settings::new() });
        face.on_tick(&mut host);
        run(&mut face, &mut host, 30);
        settle(&mut face, &mut host);

        host.time.unix += 60;
        face.on_tick(&mut host);
        assert!(face.is_idle());

        run(&mut face, &mut host, 1);
        assert_eq!(host.text(Field::TimeValue), "1710018525");
    }

    #[test]
    fn test_feed_toggle_after_handshake() {
        let (mut face, mut host) = started(Settings::new());
        face.on_tick(&mut host);
        handshake(&mut face, &mut host);
        run(&mut face, &mut host, 10);
        assert!(host.sent.is_empty());

        face.on_message(&mut host, &[SyncUpdate::FeedEnabled(true)]);
        assert_eq!(face.step(), 0);
        assert_eq!(host.timers.pending_count(), 1);
        assert_eq!(host.sent_count(ControlCode::FeedReady), 1);
        assert_eq!(host.text(Field::FeedValue), LOADING_TEXT);

        face.on_message(&mut host, &[SyncUpdate::FeedEnabled(true)]);
        assert_eq!(host.sent_count(ControlCode::FeedReady), 1);
        assert_eq!(host.storage.writes, 1);
    }

    #[test]
    fn test_handshake_does_not_reset() {
        let (mut face, mut host) = started(Settings::new());
        face.on_tick(&mut host);
        run(&mut face, &mut host, 5);

        face.on_message(&mut host, &[SyncUpdate::FeedEnabled(false)]);
        face.on_message(&mut host, &[SyncUpdate::FeedEnabled(true)]);
        assert_eq!(face.step(), 5);
        assert!(face.settings().feed_enabled);
        assert_eq!(host.storage.writes, 1);
    }

    #[test]
    fn test_handshake_enabling_feed_requests_title() {
        let (mut face, mut host) = started(Settings::new());
        face.on_tick(&mut host);
        face.on_message(&mut host, &[SyncUpdate::FeedEnabled(false)]);
        face.on_message(&mut host, &[SyncUpdate::FeedEnabled(true)]);
        assert_eq!(host.sent, vec![ControlCode::FeedReady]);

        settle(&mut face, &mut host);
        face.on_tick(&mut host);
        run(&mut face, &mut host, 100);
        assert_eq!(host.sent_count(ControlCode::FeedReady), 1);

        // The grant from the handshake is still usable
        face.request_feed_refresh(&mut host);
        assert_eq!(host.sent_count(ControlCode::FetchFeed), 1);

        deliver_title(&mut face, &mut host, &["Fresh news", ""]);
        assert!(face.receiver().is_ready());
        assert_ne!(host.text(Field::FeedValue), LOADING_TEXT);
    }

    #[test]
    fn test_handshake_before_first_tick_announces_once() {
        let (mut face, mut host) = started(Settings::new());
        face.on_message(&mut host, &[SyncUpdate::FeedEnabled(false)]);
        face.on_message(&mut host, &[SyncUpdate::FeedEnabled(true)]);
        assert!(host.sent.is_empty());

        face.on_tick(&mut host);
        assert_eq!(host.sent, vec![ControlCode::FeedReady]);
    }

    #[test]
    fn test_feed_reenabled_drops_old_title() {
        let (mut face, mut host) = started(Settings { feed_enabled: true, ..Settings::new() });
        face.on_tick(&mut host);
        handshake(&mut face, &mut host);
        deliver_title(&mut face, &mut host, &["Old story", ""]);
        assert!(face.receiver().is_ready());

        face.on_message(&mut host, &[SyncUpdate::FeedEnabled(false)]);
        face.on_message(&mut host, &[SyncUpdate::FeedEnabled(true)]);
        assert!(!face.receiver().is_ready());
        assert_eq!(host.text(Field::FeedValue), LOADING_TEXT);

        run(&mut face, &mut host, 40);
        assert_eq!(host.text(Field::FeedValue), LOADING_TEXT);
    }

    #[test]
    fn test_first_tick_with_feed_announces_ready() {
        let (mut face, mut host) = started(Settings { feed_enabled: true, ..Settings::new() });
        face.on_tick(&mut host);
        assert_eq!(host.sent, vec![ControlCode::FeedReady]);

        face.request_feed_refresh(&mut host);
        face.request_feed_refresh(&mut host);
        assert_eq!(host.sent_count(ControlCode::FetchFeed), 1);
    }

    #[test]
    fn test_feed_title_scrolls_after_settle() {
        let (mut face, mut host) = started(Settings { feed_enabled: true, ..Settings::new() });
        face.on_tick(&mut host);
        deliver_title(&mut face, &mut host, &["Hello ", "World", ""]);

        assert!(face.receiver().is_ready());
        assert_eq!(face.receiver().buffer().title(), "Hello World");
        assert_eq!(host.text(Field::FeedValue), "Hello World      ");

        // Through the feed command to ShowFeed
        run(&mut face, &mut host, 35);
        assert!(host.ui.is_visible(Element::FeedValue));
        assert_eq!(host.text(Field::FeedLabel), "pebble>./feed.sh");

        // ShowFeed, SettleFeed and three idle steps burn the settle wait
        run(&mut face, &mut host, usize::from(FEED_SETTLE_CYCLES) - 1);
        assert_eq!(face.marquee().cursor(), 0);
        assert_eq!(host.timers.last_delay(), Some(PROMPT_DELTA_MS));

        run(&mut face, &mut host, 1);
        assert_eq!(face.marquee().cursor(), 1);
        assert_eq!(host.text(Field::FeedValue), "ello World       ");
        assert_eq!(host.text(Field::FeedValue).len(), FEED_WINDOW);
        assert_eq!(host.timers.last_delay(), Some(MARQUEE_DELTA_MS));
    }

    #[test]
    fn test_new_title_vibrates_once() {
        let (mut face, mut host) = started(Settings { feed_enabled: true, ..Settings::new() });
        face.on_tick(&mut host);

        deliver_title(&mut face, &mut host, &["First", ""]);
        assert!(host.vibrations.is_empty());

        deliver_title(&mut face, &mut host, &["First", ""]);
        assert!(host.vibrations.is_empty());

        deliver_title(&mut face, &mut host, &["Second", ""]);
        assert_eq!(host.vibrations, vec![Pulse::Short]);
    }

    #[test]
    fn test_feed_vibe_off_is_silent() {
        let (mut face, mut host) = started(Settings {
            feed_enabled: true,
            feed_vibe: false,
            ..Settings::new()
        });
        face.on_tick(&mut host);

        deliver_title(&mut face, &mut host, &["First", ""]);
        deliver_title(&mut face, &mut host, &["Second", ""]);
        assert_eq!(face.receiver().buffer().title(), "Second");
        assert!(host.vibrations.is_empty());
    }

    #[test]
    fn test_title_end_and_empty_chunk_in_one_message() {
        let (mut face, mut host) = started(Settings { feed_enabled: true, ..Settings::new() });
        face.on_tick(&mut host);
        face.on_message(
            &mut host,
            &[SyncUpdate::Control(ControlCode::FeedTitleStart), SyncUpdate::FeedTitle("Markets up")],
        );
        face.on_message(
            &mut host,
            &[SyncUpdate::FeedTitle(""), SyncUpdate::Control(ControlCode::FeedTitleEnd)],
        );
        assert!(face.receiver().is_ready());
        assert_eq!(face.receiver().buffer().title(), "Markets up");
    }

    #[test]
    fn test_reception_timeout_requests_fetch() {
        let (mut face, mut host) = started(Settings { feed_enabled: true, ..Settings::new() });
        face.on_tick(&mut host);
        face.on_message(&mut host, &[SyncUpdate::Control(ControlCode::FeedTitleStart)]);

        run(&mut face, &mut host, 36 + usize::from(crate::config::feed::FEED_RECEIVE_TIMEOUT_CYCLES));
        assert_eq!(host.sent_count(ControlCode::FetchFeed), 1);
        assert_eq!(host.text(Field::FeedValue), LOADING_TEXT);
    }

    #[test]
    fn test_bluetooth_vibe() {
        let (mut face, mut host) = started(Settings::new());
        assert!(host.vibrations.is_empty());

        face.on_bluetooth(&mut host, false);
        assert_eq!(host.vibrations, vec![Pulse::Long]);
        assert!(!host.ui.bluetooth());

        face.on_message(&mut host, &[SyncUpdate::BluetoothVibe(false)]);
        face.on_bluetooth(&mut host, true);
        face.on_bluetooth(&mut host, false);
        assert_eq!(host.vibrations.len(), 1);
    }

    #[test]
    fn test_disconnect_before_start_is_silent() {
        let mut host = MockHost::new();
        let mut face: Watchface<u32> = Watchface::new(Settings::new());
        face.start(&mut host, BatteryState { percent: 100, charging: false }, false);
        assert!(host.vibrations.is_empty());
        assert_eq!(host.ui.battery().digits.as_str(), "100%");
    }

    #[test]
    fn test_timer_exhaustion_stalls_until_tick() {
        let (mut face, mut host) = started(Settings::new());
        face.on_tick(&mut host);
        run(&mut face, &mut host, 3);

        host.timers.exhausted = true;
        run(&mut face, &mut host, 1);
        assert_eq!(face.step(), 4);
        assert!(!face.is_timer_armed());
        assert_eq!(host.timers.pending_count(), 0);
        assert!(face.log().iter().any(|line| line == "timer: stalled at 3"));

        host.timers.exhausted = false;
        face.on_tick(&mut host);
        assert_eq!(face.step(), 0);
        assert!(face.is_timer_armed());
        assert_eq!(host.timers.pending_count(), 1);
    }

    #[test]
    fn test_stale_timer_ignored() {
        let (mut face, mut host) = started(Settings::new());
        face.on_tick(&mut host);
        let stale = host.timers.last_handle().unwrap();
        face.on_message(&mut host, &[SyncUpdate::FeedEnabled(false)]);
        face.on_message(&mut host, &[SyncUpdate::FeedEnabled(true)]);
        face.on_message(&mut host, &[SyncUpdate::FeedEnabled(false)]);

        face.on_timer(&mut host, stale);
        assert_eq!(face.step(), 0);
    }

    #[test]
    fn test_timezone_offset_applied() {
        let (mut face, mut host) = started(Settings::new());
        face.on_message(&mut host, &[SyncUpdate::TimezoneOffset(60)]);
        face.on_tick(&mut host);
        run(&mut face, &mut host, 1);
        assert_eq!(host.text(Field::TimeValue), "1710022065");
    }

    #[test]
    fn test_load_and_shutdown() {
        let mut host = MockHost::new();
        let mut face: Watchface<u32> = Watchface::load(&mut host);
        assert_eq!(face.settings(), &Settings::default());
        assert!(face.log().last().unwrap().starts_with("settings:"));

        face.on_tick(&mut host);
        face.shutdown(&mut host);
        assert_eq!(host.sent.last(), Some(&ControlCode::AppClose));
        assert_eq!(host.timers.pending_count(), 0);

        let reloaded: Watchface<u32> = Watchface::load(&mut host);
        assert_eq!(reloaded.settings(), &Settings::default());
        assert_eq!(reloaded.log().last(), Some("settings: loaded"));
    }

    #[test]
    fn test_send_failure_logged() {
        let (mut face, mut host) = started(Settings::new());
        host.disconnected = true;
        face.shutdown(&mut host);
        assert!(host.sent.is_empty());
        assert!(face.log().iter().any(|line| line.contains("failed")));
    }
}
