//! Frame-counted fade-out for dynamic mode.
//!
//! The countdown is measured in frames, not wall-clock time: the host's
//! frame cadence decides how long a fade actually takes.

/// Post-release opacity countdown.
#[derive(Debug, Clone, PartialEq)]
pub struct Fade {
    duration: u32,
    remaining: u32,
    fading: bool,
}

impl Fade {
    pub fn new(duration: u32) -> Self {
        let duration = duration.max(1);
        Self {
            duration,
            remaining: duration,
            fading: false,
        }
    }

    /// Frames left before the widget is hidden.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_fading(&self) -> bool {
        self.fading
    }

    /// Change the duration. Any fade in progress restarts from full.
    pub fn set_duration(&mut self, duration: u32) {
        self.duration = duration.max(1);
        self.remaining = self.duration;
    }

    /// Begin fading. A fade already in progress continues where it is.
    pub fn start(&mut self) {
        self.fading = true;
    }

    /// Stop fading and rewind the countdown.
    pub fn cancel(&mut self) {
        self.fading = false;
        self.remaining = self.duration;
    }

    /// Advance one frame.
    ///
    /// Returns the new opacity while fading, `None` otherwise. A returned
    /// opacity of `0.0` means the fade just finished: the countdown has
    /// already been rewound for the next activation.
    pub fn tick(&mut self) -> Option<f32> {
        if !self.fading {
            return None;
        }
        self.remaining = self.remaining.saturating_sub(1);
        let opacity = (self.remaining as f32 / self.duration as f32).abs();
        if opacity <= 0.0 {
            self.fading = false;
            self.remaining = self.duration;
            return Some(0.0);
        }
        Some(opacity)
    }
}

impl Default for Fade {
    fn default() -> Self {
        Self::new(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_fade_does_nothing() {
        let mut fade = Fade::new(10);
        assert_eq!(fade.tick(), None);
        assert_eq!(fade.remaining(), 10);
    }

    #[test]
    fn opacity_decreases_linearly() {
        let mut fade = Fade::new(4);
        fade.start();
        assert_eq!(fade.tick(), Some(0.75));
        assert_eq!(fade.tick(), Some(0.5));
        assert_eq!(fade.tick(), Some(0.25));
        assert_eq!(fade.tick(), Some(0.0));
        assert!(!fade.is_fading());
        assert_eq!(fade.remaining(), 4);
        assert_eq!(fade.tick(), None);
    }

    #[test]
    fn cancel_rewinds() {
        let mut fade = Fade::new(10);
        fade.start();
        fade.tick();
        fade.tick();
        fade.cancel();
        assert!(!fade.is_fading());
        assert_eq!(fade.remaining(), 10);
    }

    #[test]
    fn zero_duration_is_one_frame() {
        let mut fade = Fade::new(0);
        fade.start();
        assert_eq!(fade.tick(), Some(0.0));
    }
}
