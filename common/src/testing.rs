//! Recording host for unit tests.

use crate::battery::BatteryView;
use crate::clock::LocalTime;
use crate::host::{Clock, Element, Field, Haptics, Outbox, Pulse, SendError, Storage, Timers, Ui};
use crate::protocol::ControlCode;
use crate::scene::Scene;

// =============================================================================
// Timers
// =============================================================================

#[derive(Debug, Default)]
pub struct MockTimers {
    pub next: u32,
    pub pending: Vec<u32>,
    /// Every schedule as `(handle, delay_ms)`.
    pub scheduled: Vec<(u32, u32)>,
    pub cancelled: Vec<u32>,
    /// Refuse every schedule.
    pub exhausted: bool,
}

impl MockTimers {
    pub fn pending_count(&self) -> usize { self.pending.len() }

    pub fn last_handle(&self) -> Option<u32> { self.scheduled.last().map(|(h, _)| *h) }

    pub fn last_delay(&self) -> Option<u32> { self.scheduled.last().map(|(_, d)| *d) }

    /// Expire the most recently scheduled pending timer.
    pub fn expire(&mut self) -> Option<u32> { self.pending.pop() }
}

impl Timers for MockTimers {
    type Handle = u32;

    fn schedule(
        &mut self,
        delay_ms: u32,
    ) -> Option<u32> {
        if self.exhausted {
            return None;
        }
        self.next += 1;
        self.pending.push(self.next);
        self.scheduled.push((self.next, delay_ms));
        Some(self.next)
    }

    fn cancel(
        &mut self,
        handle: u32,
    ) {
        self.pending.retain(|h| *h != handle);
        self.cancelled.push(handle);
    }
}

// =============================================================================
// Storage
// =============================================================================

#[derive(Debug, Default)]
pub struct MemoryStorage {
    bytes: Option<Vec<u8>>,
    pub writes: usize,
}

impl MemoryStorage {
    pub fn bytes(&self) -> &[u8] { self.bytes.as_deref().unwrap_or_default() }
}

impl Storage for MemoryStorage {
    fn read(
        &mut self,
        buf: &mut [u8],
    ) -> Option<usize> {
        let bytes = self.bytes.as_ref()?;
        let len = bytes.len().min(buf.len());
        buf[..len].copy_from_slice(&bytes[..len]);
        Some(len)
    }

    fn write(
        &mut self,
        bytes: &[u8],
    ) {
        self.bytes = Some(bytes.to_vec());
        self.writes += 1;
    }
}

// =============================================================================
// Host
// =============================================================================

/// Host that records every effect.
#[derive(Debug)]
pub struct MockHost {
    pub ui: Scene,
    pub timers: MockTimers,
    pub storage: MemoryStorage,
    pub time: LocalTime,
    pub is_24h: bool,
    pub vibrations: Vec<Pulse>,
    pub sent: Vec<ControlCode>,
    pub disconnected: bool,
}

impl MockHost {
    pub fn new() -> Self {
        Self {
            ui: Scene::new(),
            timers: MockTimers::default(),
            storage: MemoryStorage::default(),
            time: LocalTime {
                year: 2024,
                month: 3,
                day: 9,
                hour: 21,
                minute: 7,
                second: 45,
                unix: 1_710_018_465,
            },
            is_24h: true,
            vibrations: Vec::new(),
            sent: Vec::new(),
            disconnected: false,
        }
    }

    pub fn text(
        &self,
        field: Field,
    ) -> &str {
        self.ui.text(field)
    }

    pub fn sent_count(
        &self,
        code: ControlCode,
    ) -> usize {
        self.sent.iter().filter(|c| **c == code).count()
    }
}

impl Ui for MockHost {
    fn set_text(
        &mut self,
        field: Field,
        text: &str,
    ) {
        self.ui.set_text(field, text);
    }

    fn set_attached(
        &mut self,
        element: Element,
        attached: bool,
    ) {
        self.ui.set_attached(element, attached);
    }

    fn set_hidden(
        &mut self,
        element: Element,
        hidden: bool,
    ) {
        self.ui.set_hidden(element, hidden);
    }

    fn set_bluetooth(
        &mut self,
        connected: bool,
    ) {
        self.ui.set_bluetooth(connected);
    }

    fn set_battery(
        &mut self,
        view: &BatteryView,
    ) {
        self.ui.set_battery(view);
    }
}

impl Timers for MockHost {
    type Handle = u32;

    fn schedule(
        &mut self,
        delay_ms: u32,
    ) -> Option<u32> {
        self.timers.schedule(delay_ms)
    }

    fn cancel(
        &mut self,
        handle: u32,
    ) {
        self.timers.cancel(handle);
    }
}

impl Clock for MockHost {
    fn now(&self) -> LocalTime { self.time }

    fn is_24h(&self) -> bool { self.is_24h }
}

impl Haptics for MockHost {
    fn vibrate(
        &mut self,
        pulse: Pulse,
    ) {
        self.vibrations.push(pulse);
    }
}

impl Outbox for MockHost {
    fn send(
        &mut self,
        code: ControlCode,
    ) -> Result<(), SendError> {
        if self.disconnected {
            return Err(SendError::Disconnected);
        }
        self.sent.push(code);
        Ok(())
    }
}

impl Storage for MockHost {
    fn read(
        &mut self,
        buf: &mut [u8],
    ) -> Option<usize> {
        self.storage.read(buf)
    }

    fn write(
        &mut self,
        bytes: &[u8],
    ) {
        self.storage.write(bytes);
    }
}
