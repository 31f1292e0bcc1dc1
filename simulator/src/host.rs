//! Desktop implementation of the watchface host traits.
//!
//! - The display is the retained [`Scene`], redrawn by the main loop when dirty
//! - One timer slot with a wall-clock deadline; handles are increasing ids
//! - Local time comes from `chrono`
//! - Settings persist to a file in the system temp directory
//! - Outgoing control codes queue up until the phone emulator collects them

use std::collections::VecDeque;
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use chrono::{Datelike, Local, Timelike};
use termwatch_common::{
    BatteryView,
    Clock,
    ControlCode,
    Element,
    Field,
    Haptics,
    LocalTime,
    Outbox,
    Pulse,
    Scene,
    SendError,
    Storage,
    Timers,
    Ui,
};

const SETTINGS_FILE: &str = "termwatch-settings.bin";

pub struct SimHost {
    pub scene: Scene,
    timer: Option<(u32, Instant)>,
    next_handle: u32,
    storage_path: PathBuf,
    outbox: VecDeque<ControlCode>,
    pub connected: bool,
    pub is_24h: bool,
}

impl SimHost {
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            timer: None,
            next_handle: 0,
            storage_path: std::env::temp_dir().join(SETTINGS_FILE),
            outbox: VecDeque::new(),
            connected: true,
            is_24h: true,
        }
    }

    /// Handle of the pending timer if its deadline has passed. The slot is freed.
    pub fn due_timer(
        &mut self,
        now: Instant,
    ) -> Option<u32> {
        match self.timer {
            Some((handle, deadline)) if deadline <= now => {
                self.timer = None;
                Some(handle)
            }
            _ => None,
        }
    }

    /// Next control code for the phone, oldest first.
    pub fn take_sent(&mut self) -> Option<ControlCode> { self.outbox.pop_front() }
}

impl Default for SimHost {
    fn default() -> Self { Self::new() }
}

impl Ui for SimHost {
    fn set_text(
        &mut self,
        field: Field,
        text: &str,
    ) {
        self.scene.set_text(field, text);
    }

    fn set_attached(
        &mut self,
        element: Element,
        attached: bool,
    ) {
        self.scene.set_attached(element, attached);
    }

    fn set_hidden(
        &mut self,
        element: Element,
        hidden: bool,
    ) {
        self.scene.set_hidden(element, hidden);
    }

    fn set_bluetooth(
        &mut self,
        connected: bool,
    ) {
        self.scene.set_bluetooth(connected);
    }

    fn set_battery(
        &mut self,
        view: &BatteryView,
    ) {
        self.scene.set_battery(view);
    }
}

impl Timers for SimHost {
    type Handle = u32;

    fn schedule(
        &mut self,
        delay_ms: u32,
    ) -> Option<u32> {
        if let Some((pending, _)) = self.timer {
            tracing::warn!(pending, "timer slot busy");
            return None;
        }
        self.next_handle = self.next_handle.wrapping_add(1);
        let deadline = Instant::now() + Duration::from_millis(u64::from(delay_ms));
        self.timer = Some((self.next_handle, deadline));
        Some(self.next_handle)
    }

    fn cancel(
        &mut self,
        handle: u32,
    ) {
        if matches!(self.timer, Some((pending, _)) if pending == handle) {
            self.timer = None;
        }
    }
}

impl Clock for SimHost {
    fn now(&self) -> LocalTime {
        let now = Local::now();
        LocalTime {
            year: u16::try_from(now.year()).unwrap_or_default(),
            month: now.month() as u8,
            day: now.day() as u8,
            hour: now.hour() as u8,
            minute: now.minute() as u8,
            second: now.second() as u8,
            // The watch keeps its epoch counter in local time
            unix: now.timestamp() + i64::from(now.offset().local_minus_utc()),
        }
    }

    fn is_24h(&self) -> bool { self.is_24h }
}

impl Haptics for SimHost {
    fn vibrate(
        &mut self,
        pulse: Pulse,
    ) {
        tracing::info!(?pulse, "vibrate");
    }
}

impl Outbox for SimHost {
    fn send(
        &mut self,
        code: ControlCode,
    ) -> Result<(), SendError> {
        if !self.connected {
            return Err(SendError::Disconnected);
        }
        tracing::debug!(code = code.name(), "watch -> phone");
        self.outbox.push_back(code);
        Ok(())
    }
}

impl Storage for SimHost {
    fn read(
        &mut self,
        buf: &mut [u8],
    ) -> Option<usize> {
        let bytes = fs::read(&self.storage_path).ok()?;
        if bytes.len() > buf.len() {
            tracing::warn!(len = bytes.len(), "stored settings larger than the blob slot");
            return None;
        }
        buf[..bytes.len()].copy_from_slice(&bytes);
        Some(bytes.len())
    }

    fn write(
        &mut self,
        bytes: &[u8],
    ) {
        match fs::write(&self.storage_path, bytes) {
            Ok(()) => tracing::debug!(path = %self.storage_path.display(), "settings stored"),
            Err(e) => tracing::warn!(error = %e, "settings not stored"),
        }
    }
}
