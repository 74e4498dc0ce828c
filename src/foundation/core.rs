use std::{fs::File, io::BufReader, path::Path};

use crate::foundation::error::{CardspinError, CardspinResult};

/// Largest width or height a GIF logical screen can describe.
pub const MAX_SIDE: u32 = u16::MAX as u32;

/// Absolute 0-based frame index in the exported sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameIndex(pub u64);

/// Raster dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Create a size from `width` x `height`.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of RGBA8 bytes a tightly packed buffer of this size holds.
    pub fn rgba_len(self) -> usize {
        (self.width as usize) * (self.height as usize) * 4
    }
}

/// What to render: canvas size, rotation period and sampling rate.
///
/// The animation performs exactly one full turn per `duration_secs`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnimationConfig {
    /// Canvas size; the source is resized to this once before synthesis.
    pub size: Size,
    /// Length of one rotation in seconds.
    #[serde(rename = "duration")]
    pub duration_secs: f64,
    /// Sampling rate in frames per second.
    pub fps: u32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            size: Size::new(200, 200),
            duration_secs: 2.0,
            fps: 30,
        }
    }
}

impl AnimationConfig {
    /// Load a JSON config file. Fields that are absent keep their defaults.
    pub fn from_path(path: &Path) -> CardspinResult<Self> {
        let f = File::open(path)
            .map_err(|e| CardspinError::input(format!("open config '{}': {e}", path.display())))?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f)).map_err(|e| {
            CardspinError::validation(format!("parse config '{}': {e}", path.display()))
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject configurations no encoder could honor.
    pub fn validate(&self) -> CardspinResult<()> {
        if self.size.width == 0 || self.size.height == 0 {
            return Err(CardspinError::validation("size width/height must be non-zero"));
        }
        if self.size.width > MAX_SIDE || self.size.height > MAX_SIDE {
            return Err(CardspinError::validation(format!(
                "size {}x{} exceeds the GIF limit of {MAX_SIDE} pixels per side",
                self.size.width, self.size.height
            )));
        }
        if !self.duration_secs.is_finite() || self.duration_secs <= 0.0 {
            return Err(CardspinError::validation(
                "duration must be a finite number of seconds > 0",
            ));
        }
        if self.fps == 0 {
            return Err(CardspinError::validation("fps must be non-zero"));
        }
        Ok(())
    }

    /// Number of frames sampled across one period: `ceil(duration * fps)`.
    pub fn frame_count(&self) -> u64 {
        let exact = self.duration_secs * f64::from(self.fps);
        let nearest = exact.round();
        // 0.1 * 30 is 3.0000000000000004; that is 3 frames, not 4.
        if (exact - nearest).abs() < 1e-9 {
            nearest.max(0.0) as u64
        } else {
            exact.ceil().max(0.0) as u64
        }
    }

    /// Timestamp in seconds of frame `idx`.
    pub fn timestamp_for(&self, idx: FrameIndex) -> f64 {
        idx.0 as f64 / f64::from(self.fps)
    }

    /// Per-frame delay in GIF centiseconds, never below 1.
    pub fn frame_delay_cs(&self) -> u16 {
        let cs = (100.0 / f64::from(self.fps.max(1))).round();
        cs.clamp(1.0, f64::from(u16::MAX)) as u16
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
