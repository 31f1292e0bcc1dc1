//! On-device debug log.
//!
//! Provides a ring buffer of short event lines (sync traffic, resets, feed
//! reception) that the host can draw on a debug page. The [`watch_log!`] macro
//! formats a line without allocation, pushes it into a [`DebugLog`] and, with
//! the `defmt` feature, mirrors it to the defmt logger.
//!
//! # Usage
//!
//! ```ignore
//! let mut log = DebugLog::new();
//! watch_log!(log, "feed: ready ({} chars)", 11);
//!
//! for line in log.iter() {
//!     println!("{}", line);
//! }
//! ```

use heapless::{Deque, String};

// =============================================================================
// Debug Log Configuration
// =============================================================================

/// Maximum number of log lines to keep in the ring buffer.
pub const LOG_BUFFER_SIZE: usize = 12;

/// Maximum characters per log line.
pub const LOG_LINE_LENGTH: usize = 40;

// =============================================================================
// Debug Log Ring Buffer
// =============================================================================

/// Ring buffer for debug log messages.
///
/// Stores the last `LOG_BUFFER_SIZE` messages.
/// Old messages are automatically dropped when the buffer is full.
pub struct DebugLog {
    buffer: Deque<String<LOG_LINE_LENGTH>, LOG_BUFFER_SIZE>,
    total: u32,
}

impl DebugLog {
    /// Create a new empty debug log.
    pub const fn new() -> Self {
        Self {
            buffer: Deque::new(),
            total: 0,
        }
    }

    /// Push a log message. If buffer is full, oldest message is dropped.
    pub fn push(
        &mut self,
        msg: &str,
    ) {
        if self.buffer.is_full() {
            self.buffer.pop_front();
        }

        // Truncate message if too long
        let mut line: String<LOG_LINE_LENGTH> = String::new();
        for c in msg.chars() {
            if line.push(c).is_err() {
                break;
            }
        }

        self.buffer.push_back(line).ok();
        self.total = self.total.wrapping_add(1);
    }

    /// Iterate over log messages (oldest first).
    pub fn iter(&self) -> impl Iterator<Item = &str> { self.buffer.iter().map(|line| line.as_str()) }

    /// Most recent message, if any.
    pub fn last(&self) -> Option<&str> { self.buffer.back().map(|line| line.as_str()) }

    /// Number of messages ever pushed (including dropped ones).
    ///
    /// Hosts use this to forward only new lines to their own logger.
    #[inline]
    pub const fn total(&self) -> u32 { self.total }

    /// Get number of log entries.
    #[inline]
    pub fn len(&self) -> usize { self.buffer.len() }

    /// Check if log is empty.
    #[inline]
    pub fn is_empty(&self) -> bool { self.buffer.is_empty() }
}

impl Default for DebugLog {
    fn default() -> Self { Self::new() }
}

/// Format a line into a [`DebugLog`] (and defmt, when enabled).
#[macro_export]
macro_rules! watch_log {
    ($log:expr, $($arg:tt)*) => {{
        use core::fmt::Write as _;
        let mut line: heapless::String<{ $crate::debug_log::LOG_LINE_LENGTH }> = heapless::String::new();
        let _ = write!(line, $($arg)*);
        $log.push(line.as_str());
        #[cfg(feature = "defmt")]
        defmt::debug!("{=str}", line.as_str());
    }};
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_log_push() {
        let mut log = DebugLog::new();
        assert!(log.is_empty());

        log.push("Test message");
        assert_eq!(log.len(), 1);
        assert_eq!(log.last(), Some("Test message"));

        log.push("Another message");
        assert_eq!(log.len(), 2);
        assert_eq!(log.total(), 2);
    }

    #[test]
    fn test_debug_log_ring_buffer() {
        let mut log = DebugLog::new();

        for i in 0..LOG_BUFFER_SIZE {
            watch_log!(log, "{}", i);
        }
        assert_eq!(log.len(), LOG_BUFFER_SIZE);

        // One more drops the oldest
        log.push("New");
        assert_eq!(log.len(), LOG_BUFFER_SIZE);
        assert_eq!(log.iter().next(), Some("1"));
        assert_eq!(log.total(), LOG_BUFFER_SIZE as u32 + 1);
    }

    #[test]
    fn test_debug_log_truncation() {
        let mut log = DebugLog::new();
        log.push("This is a very long message that exceeds the maximum line length limit");

        let stored = log.iter().next().unwrap();
        assert_eq!(stored.len(), LOG_LINE_LENGTH);
    }

    #[test]
    fn test_watch_log_formats() {
        let mut log = DebugLog::new();
        watch_log!(log, "feed: {} chars", 11);
        assert_eq!(log.last(), Some("feed: 11 chars"));
    }
}
