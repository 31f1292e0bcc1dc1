//! Battery indicator view model.
//!
//! Maps the host's charge state to what the status bar shows. The view is a
//! pure function of [`BatteryState`], so hosts can compare views to skip
//! redundant redraws.

use core::fmt::Write;

use heapless::String;

use crate::config::layout::BATTERY_BAR_WIDTH;

/// Charge state as reported by the host.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatteryState {
    /// 0-100
    pub percent: u8,
    pub charging: bool,
}

/// Which percent text slot arrangement to use.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PercentLayout {
    /// Four glyphs, `100%`.
    Full,
    /// Three glyphs, `NN%` with a leading zero below 10.
    TwoDigit,
}

/// Rendered state of the battery indicator.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BatteryView {
    pub layout: PercentLayout,
    pub digits: String<4>,
    /// Level bar inside the battery outline.
    pub bar_visible: bool,
    /// Show the charging bolt variant of the icon.
    pub charging_icon: bool,
    /// Level bar width in pixels.
    pub fill_width: u32,
}

impl BatteryView {
    pub fn from_state(state: BatteryState) -> Self {
        let percent = state.percent.min(100);
        let fill_width = u32::from(percent) * BATTERY_BAR_WIDTH / 100;
        let mut digits = String::new();

        // A full battery always shows the plain icon with its bar, even on the charger
        if percent == 100 {
            let _ = digits.push_str("100%");
            return Self {
                layout: PercentLayout::Full,
                digits,
                bar_visible: true,
                charging_icon: false,
                fill_width,
            };
        }

        let _ = write!(digits, "{}{}%", percent / 10, percent % 10);
        Self {
            layout: PercentLayout::TwoDigit,
            digits,
            bar_visible: !state.charging,
            charging_icon: state.charging,
            fill_width,
        }
    }
}

impl Default for BatteryView {
    fn default() -> Self { Self::from_state(BatteryState::default()) }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_battery_layout() {
        let view = BatteryView::from_state(BatteryState { percent: 100, charging: true });
        assert_eq!(view.layout, PercentLayout::Full);
        assert_eq!(view.digits.as_str(), "100%");
        assert!(view.bar_visible);
        assert!(!view.charging_icon);
        assert_eq!(view.fill_width, BATTERY_BAR_WIDTH);
    }

    #[test]
    fn test_two_digit_layout() {
        let view = BatteryView::from_state(BatteryState { percent: 57, charging: false });
        assert_eq!(view.layout, PercentLayout::TwoDigit);
        assert_eq!(view.digits.as_str(), "57%");
        assert!(view.bar_visible);
        assert_eq!(view.fill_width, 6);
    }

    #[test]
    fn test_single_digit_keeps_leading_zero() {
        let view = BatteryView::from_state(BatteryState { percent: 5, charging: false });
        assert_eq!(view.digits.as_str(), "05%");
        assert_eq!(view.fill_width, 0);
    }

    #[test]
    fn test_charging_hides_bar() {
        let view = BatteryView::from_state(BatteryState { percent: 40, charging: true });
        assert!(!view.bar_visible);
        assert!(view.charging_icon);
    }
}
