//! Volume control with mute memory
//!
//! Volume is a linear 0.0-1.0 level as the media element expects. Muting
//! forces the level to zero and remembers the last audible level so that
//! unmuting can restore it.

/// Volume controller
///
/// Invariant: `level == 0.0` implies muted, any positive level implies unmuted.
#[derive(Debug, Clone)]
pub struct Volume {
    /// Volume level (0.0-1.0)
    level: f32,

    /// Mute state
    muted: bool,

    /// Last non-zero level, restored on unmute
    remembered: Option<f32>,
}

impl Volume {
    /// Create new volume controller
    ///
    /// # Arguments
    /// * `level` - Initial volume (0.0-1.0)
    /// * `muted` - Start muted; the initial level is remembered for unmute
    pub fn new(level: f32, muted: bool) -> Self {
        let level = Self::clamp(level);
        let remembered = (level > 0.0).then_some(level);

        if muted || level == 0.0 {
            Self {
                level: 0.0,
                muted: true,
                remembered,
            }
        } else {
            Self {
                level,
                muted: false,
                remembered,
            }
        }
    }

    /// Set volume level
    ///
    /// Zero mutes, any positive level unmutes.
    pub fn set_level(&mut self, level: f32) {
        self.level = Self::clamp(level);

        if self.level > 0.0 {
            self.remembered = Some(self.level);
            self.muted = false;
        } else {
            self.muted = true;
        }
    }

    /// Get current volume level
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Toggle mute state
    ///
    /// Muting remembers the current level and drops to zero. Unmuting
    /// restores the last non-zero level; with none recorded the level stays
    /// at zero and therefore muted.
    pub fn toggle_mute(&mut self) {
        if self.muted {
            self.level = self.remembered.unwrap_or(0.0);
            self.muted = self.level == 0.0;
        } else {
            if self.level > 0.0 {
                self.remembered = Some(self.level);
            }
            self.level = 0.0;
            self.muted = true;
        }
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Level that unmuting would restore
    pub fn remembered(&self) -> Option<f32> {
        self.remembered
    }

    /// Slider fill as a percentage (0-100)
    pub fn fill_percent(&self) -> f32 {
        self.level * 100.0
    }

    fn clamp(level: f32) -> f32 {
        if level.is_nan() {
            0.0
        } else {
            level.clamp(0.0, 1.0)
        }
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(1.0, false)
    }
}
