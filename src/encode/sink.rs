use crate::foundation::core::{FrameIndex, Size};
use crate::foundation::error::CardspinResult;
use crate::render::frame::FrameRGBA;

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkConfig {
    /// Size of every frame that will be pushed.
    pub size: Size,
    /// Playback rate in frames per second.
    pub fps: u32,
    /// Number of frames that will be pushed.
    pub frame_count: u64,
    /// Per-frame delay in centiseconds.
    pub frame_delay_cs: u16,
}

/// Consumer of synthesized frames.
///
/// Ordering contract: `push_frame` is called with strictly increasing `FrameIndex` values, all
/// between one `begin` and one `end`. If anything fails the sink is dropped without `end`, and
/// must not leave a finished-looking artifact behind.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> CardspinResult<()>;
    /// Push one frame in strictly increasing order.
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> CardspinResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> CardspinResult<()>;
}

/// In-memory sink for tests and headless callers.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, FrameRGBA)>,
    finished: bool,
}

impl InMemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<&SinkConfig> {
        self.cfg.as_ref()
    }

    /// Captured frames in push order.
    pub fn frames(&self) -> &[(FrameIndex, FrameRGBA)] {
        &self.frames
    }

    /// Whether `end` has been called.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> CardspinResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.finished = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> CardspinResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> CardspinResult<()> {
        self.finished = true;
        Ok(())
    }
}
