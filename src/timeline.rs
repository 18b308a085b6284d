use crate::error::{CourtsideError, CourtsideResult};

/// Total still-clip duration in seconds.
pub const DEFAULT_DURATION_SECS: f64 = 18.0;
/// Output frame rate.
pub const DEFAULT_FPS: u32 = 30;
/// How long the reveal overlay stays on screen by default.
pub const DEFAULT_REVEAL_SECS: f64 = 2.2;
/// Shortest reveal window ever scheduled.
pub const MIN_REVEAL_SECS: f64 = 1.8;
/// Crossfade-in length for the reveal overlay.
pub const REVEAL_FADE_SECS: f64 = 0.35;
/// Linear gain applied to the attached music track.
pub const MUSIC_GAIN: f32 = 0.12;

/// When the reveal overlay is active within the clip. The overlay always
/// runs to the end of the clip; only its entry point and fade vary.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealWindow {
    /// Seconds into the clip at which the overlay starts fading in.
    pub start_secs: f64,
    /// Length of the linear fade-in.
    pub fade_secs: f64,
}

impl RevealWindow {
    /// Schedule a reveal of `reveal_seconds` (default 2.2 s, floor 1.8 s)
    /// ending at `duration`. A reveal longer than the clip clamps the start
    /// to zero rather than going negative.
    pub fn for_clip(duration_secs: f64, reveal_seconds: Option<f64>) -> Self {
        let len = reveal_seconds
            .unwrap_or(DEFAULT_REVEAL_SECS)
            .max(MIN_REVEAL_SECS);
        Self {
            start_secs: (duration_secs - len).max(0.0),
            fade_secs: REVEAL_FADE_SECS,
        }
    }

    /// Overlay opacity at `t` seconds: zero before the window, a linear ramp
    /// across the fade, fully opaque after.
    pub fn opacity_at(&self, t: f64) -> f32 {
        if t < self.start_secs {
            return 0.0;
        }
        if self.fade_secs <= 0.0 {
            return 1.0;
        }
        (((t - self.start_secs) / self.fade_secs).min(1.0)) as f32
    }
}

/// The terminal artifact's shape: a fixed-duration still visual track,
/// optionally overlaid by a reveal window. Audio is attached at encode time.
#[derive(Clone, Copy, Debug)]
pub struct ClipSpec {
    pub duration_secs: f64,
    pub fps: u32,
    pub reveal: Option<RevealWindow>,
}

impl ClipSpec {
    pub fn standard(reveal: Option<RevealWindow>) -> Self {
        Self {
            duration_secs: DEFAULT_DURATION_SECS,
            fps: DEFAULT_FPS,
            reveal,
        }
    }

    pub fn validate(&self) -> CourtsideResult<()> {
        if !self.duration_secs.is_finite() || self.duration_secs <= 0.0 {
            return Err(CourtsideError::validation(
                "clip duration must be finite and > 0",
            ));
        }
        if self.fps == 0 {
            return Err(CourtsideError::validation("clip fps must be > 0"));
        }
        if let Some(reveal) = &self.reveal {
            if reveal.start_secs < 0.0 {
                return Err(CourtsideError::validation(
                    "reveal start must not be negative",
                ));
            }
            if reveal.start_secs > self.duration_secs {
                return Err(CourtsideError::validation(
                    "reveal window must not start past the clip end",
                ));
            }
        }
        Ok(())
    }

    pub fn total_frames(&self) -> u64 {
        (self.duration_secs * f64::from(self.fps)).round() as u64
    }

    /// Timestamp of frame `idx` in seconds.
    pub fn frame_time(&self, idx: u64) -> f64 {
        idx as f64 / f64::from(self.fps)
    }

    /// Overlay opacity for frame `idx`; zero when the clip has no reveal.
    pub fn overlay_opacity(&self, idx: u64) -> f32 {
        match &self.reveal {
            Some(window) => window.opacity_at(self.frame_time(idx)),
            None => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_window_covers_the_final_2_2_seconds() {
        let w = RevealWindow::for_clip(18.0, None);
        assert!((w.start_secs - 15.8).abs() < 1e-9);
        assert!((w.fade_secs - 0.35).abs() < 1e-9);
    }

    #[test]
    fn reveal_floor_is_applied() {
        let w = RevealWindow::for_clip(18.0, Some(0.5));
        assert!((w.start_secs - 16.2).abs() < 1e-9);
    }

    #[test]
    fn reveal_longer_than_clip_clamps_start_to_zero() {
        let w = RevealWindow::for_clip(18.0, Some(40.0));
        assert_eq!(w.start_secs, 0.0);
        let w = RevealWindow::for_clip(18.0, Some(18.0));
        assert_eq!(w.start_secs, 0.0);
    }

    #[test]
    fn opacity_ramps_linearly_across_the_fade() {
        let w = RevealWindow {
            start_secs: 10.0,
            fade_secs: 0.35,
        };
        assert_eq!(w.opacity_at(9.99), 0.0);
        assert_eq!(w.opacity_at(10.0), 0.0);
        let mid = w.opacity_at(10.175);
        assert!((mid - 0.5).abs() < 0.01);
        assert_eq!(w.opacity_at(10.35), 1.0);
        assert_eq!(w.opacity_at(17.0), 1.0);
    }

    #[test]
    fn standard_clip_is_540_frames() {
        let spec = ClipSpec::standard(None);
        assert_eq!(spec.total_frames(), 540);
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn overlay_opacity_tracks_the_window_per_frame() {
        let spec = ClipSpec::standard(Some(RevealWindow::for_clip(18.0, None)));
        // Frame 473 is 15.766 s, just before the window opens at 15.8 s.
        assert_eq!(spec.overlay_opacity(473), 0.0);
        // Final frame is fully opaque.
        assert_eq!(spec.overlay_opacity(539), 1.0);
        // A frame inside the fade is partially opaque.
        let t = spec.overlay_opacity(477);
        assert!(t > 0.0 && t < 1.0);
    }

    #[test]
    fn validation_rejects_degenerate_specs() {
        let mut spec = ClipSpec::standard(None);
        spec.fps = 0;
        assert!(spec.validate().is_err());

        let mut spec = ClipSpec::standard(None);
        spec.duration_secs = 0.0;
        assert!(spec.validate().is_err());
    }
}
