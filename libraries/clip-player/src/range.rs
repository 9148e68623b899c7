//! Restricted playback range
//!
//! An inclusive-start, exclusive-end window that playback is held inside
//! while enforcement is enabled.

use serde::{Deserialize, Serialize};

/// Restricted time window in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RestrictedRange {
    start: f64,
    end: f64,
    enabled: bool,
}

/// What enforcement requires after observing a position
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RangeAction {
    /// Position is inside the window
    Hold,

    /// Move the position to the range start and keep playing
    SnapToStart,

    /// Move the position to the range start and pause
    SnapToStartAndPause,
}

/// Highlighted sub-region of the progress bar, in percent of duration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeHighlight {
    /// Left edge (0-100)
    pub left: f64,

    /// Width (0-100)
    pub width: f64,
}

impl RestrictedRange {
    /// Build a range from optional bounds
    ///
    /// Returns `None` ("not configured") unless both bounds are present,
    /// finite, non-negative and ordered.
    pub fn from_bounds(start: Option<f64>, end: Option<f64>, enabled: bool) -> Option<Self> {
        let (start, end) = (start?, end?);

        if !start.is_finite() || !end.is_finite() || start < 0.0 || start > end {
            tracing::warn!(
                "Restricted range {}..{} is invalid, range features disabled",
                start,
                end
            );
            return None;
        }

        Some(Self {
            start,
            end,
            enabled,
        })
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Flip enforcement, returning the new state
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }

    /// Decide what to do with an observed position
    ///
    /// A disabled range always holds.
    pub fn enforce(&self, position: f64, looping: bool) -> RangeAction {
        if !self.enabled {
            return RangeAction::Hold;
        }

        if position < self.start {
            RangeAction::SnapToStart
        } else if position >= self.end {
            if looping {
                RangeAction::SnapToStart
            } else {
                RangeAction::SnapToStartAndPause
            }
        } else {
            RangeAction::Hold
        }
    }

    /// Progress bar highlight for a known duration
    pub fn highlight(&self, duration: f64) -> Option<RangeHighlight> {
        if !duration.is_finite() || duration <= 0.0 {
            return None;
        }

        let left = (self.start / duration * 100.0).clamp(0.0, 100.0);
        let right = (self.end / duration * 100.0).clamp(0.0, 100.0);

        Some(RangeHighlight {
            left,
            width: right - left,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requires_both_bounds() {
        assert!(RestrictedRange::from_bounds(Some(1.0), None, true).is_none());
        assert!(RestrictedRange::from_bounds(None, Some(5.0), true).is_none());
        assert!(RestrictedRange::from_bounds(None, None, true).is_none());
    }

    #[test]
    fn rejects_invalid_bounds() {
        assert!(RestrictedRange::from_bounds(Some(20.0), Some(10.0), true).is_none());
        assert!(RestrictedRange::from_bounds(Some(-1.0), Some(10.0), true).is_none());
        assert!(RestrictedRange::from_bounds(Some(f64::NAN), Some(10.0), true).is_none());
        assert!(RestrictedRange::from_bounds(Some(0.0), Some(f64::INFINITY), true).is_none());
    }

    #[test]
    fn equal_bounds_are_accepted() {
        let range = RestrictedRange::from_bounds(Some(5.0), Some(5.0), true).unwrap();
        // Empty window: every position snaps back to start
        assert_eq!(range.enforce(5.0, true), RangeAction::SnapToStart);
    }

    #[test]
    fn enforce_window() {
        let range = RestrictedRange::from_bounds(Some(10.0), Some(20.0), true).unwrap();

        assert_eq!(range.enforce(3.0, false), RangeAction::SnapToStart);
        assert_eq!(range.enforce(10.0, false), RangeAction::Hold);
        assert_eq!(range.enforce(19.99, false), RangeAction::Hold);
        assert_eq!(range.enforce(20.0, false), RangeAction::SnapToStartAndPause);
        assert_eq!(range.enforce(25.0, true), RangeAction::SnapToStart);
    }

    #[test]
    fn disabled_range_holds() {
        let mut range = RestrictedRange::from_bounds(Some(10.0), Some(20.0), true).unwrap();
        assert!(!range.toggle());
        assert_eq!(range.enforce(50.0, false), RangeAction::Hold);
        assert!(range.toggle());
    }

    #[test]
    fn highlight_in_percent() {
        let range = RestrictedRange::from_bounds(Some(10.0), Some(20.0), true).unwrap();
        let highlight = range.highlight(100.0).unwrap();
        assert_eq!(highlight.left, 10.0);
        assert_eq!(highlight.width, 10.0);

        assert!(range.highlight(0.0).is_none());
        assert!(range.highlight(f64::NAN).is_none());
    }

    #[test]
    fn highlight_clamped_to_bar() {
        let range = RestrictedRange::from_bounds(Some(50.0), Some(150.0), true).unwrap();
        let highlight = range.highlight(100.0).unwrap();
        assert_eq!(highlight.left, 50.0);
        assert_eq!(highlight.width, 50.0);
    }
}
