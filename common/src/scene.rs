//! Retained display model.
//!
//! [`Scene`] implements [`Ui`] by recording the latest state of every text
//! field and element. Hosts hand it to [`crate::widgets::draw_scene`] whenever
//! it is dirty, which keeps drawing independent of how often the watchface
//! touches the UI.

use heapless::String;

use crate::battery::BatteryView;
use crate::host::{Element, Field, Ui};

/// Longest text any field holds (unix timestamp with sign).
pub const FIELD_TEXT_CAPACITY: usize = 24;

#[derive(Clone, Debug)]
pub struct Scene {
    texts: [String<FIELD_TEXT_CAPACITY>; 9],
    attached: [bool; 5],
    hidden: [bool; 5],
    bluetooth: bool,
    battery: BatteryView,
    dirty: bool,
}

impl Scene {
    /// Blank terminal with every element detached.
    pub fn new() -> Self {
        Self {
            texts: Default::default(),
            attached: [false; 5],
            hidden: [false; 5],
            bluetooth: false,
            battery: BatteryView::default(),
            dirty: true,
        }
    }

    #[inline]
    pub fn text(
        &self,
        field: Field,
    ) -> &str {
        self.texts[field.index()].as_str()
    }

    /// Attached and not hidden.
    #[inline]
    pub const fn is_visible(
        &self,
        element: Element,
    ) -> bool {
        self.attached[element.index()] && !self.hidden[element.index()]
    }

    #[inline]
    pub const fn is_attached(
        &self,
        element: Element,
    ) -> bool {
        self.attached[element.index()]
    }

    #[inline]
    pub const fn bluetooth(&self) -> bool { self.bluetooth }

    #[inline]
    pub const fn battery(&self) -> &BatteryView { &self.battery }

    /// Changed since the last [`Scene::take_dirty`].
    #[inline]
    pub const fn is_dirty(&self) -> bool { self.dirty }

    /// Clear the dirty flag, returning its previous value.
    pub fn take_dirty(&mut self) -> bool { core::mem::replace(&mut self.dirty, false) }
}

impl Default for Scene {
    fn default() -> Self { Self::new() }
}

impl Ui for Scene {
    fn set_text(
        &mut self,
        field: Field,
        text: &str,
    ) {
        let slot = &mut self.texts[field.index()];
        if slot.as_str() == text {
            return;
        }
        slot.clear();
        for c in text.chars() {
            if slot.push(c).is_err() {
                break;
            }
        }
        self.dirty = true;
    }

    fn set_attached(
        &mut self,
        element: Element,
        attached: bool,
    ) {
        if self.attached[element.index()] != attached {
            self.attached[element.index()] = attached;
            self.dirty = true;
        }
    }

    fn set_hidden(
        &mut self,
        element: Element,
        hidden: bool,
    ) {
        if self.hidden[element.index()] != hidden {
            self.hidden[element.index()] = hidden;
            self.dirty = true;
        }
    }

    fn set_bluetooth(
        &mut self,
        connected: bool,
    ) {
        if self.bluetooth != connected {
            self.bluetooth = connected;
            self.dirty = true;
        }
    }

    fn set_battery(
        &mut self,
        view: &BatteryView,
    ) {
        if self.battery != *view {
            self.battery = view.clone();
            self.dirty = true;
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_text_marks_dirty_once() {
        let mut scene = Scene::new();
        scene.take_dirty();

        scene.set_text(Field::DateLabel, "pebble>");
        assert!(scene.take_dirty());
        scene.set_text(Field::DateLabel, "pebble>");
        assert!(!scene.is_dirty());
        assert_eq!(scene.text(Field::DateLabel), "pebble>");
    }

    #[test]
    fn test_visibility() {
        let mut scene = Scene::new();
        assert!(!scene.is_visible(Element::FeedValue));

        scene.set_attached(Element::FeedValue, true);
        assert!(scene.is_visible(Element::FeedValue));

        scene.set_hidden(Element::FeedValue, true);
        assert!(scene.is_attached(Element::FeedValue));
        assert!(!scene.is_visible(Element::FeedValue));
    }

    #[test]
    fn test_long_text_truncated() {
        let mut scene = Scene::new();
        scene.set_text(Field::FeedValue, "0123456789012345678901234567890");
        assert_eq!(scene.text(Field::FeedValue).len(), FIELD_TEXT_CAPACITY);
    }
}
