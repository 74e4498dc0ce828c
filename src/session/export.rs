use std::path::Path;

use crate::{
    assets::decode::SourceImage,
    encode::{
        gif_sink::{GifSink, GifSinkOpts},
        sink::{FrameSink, SinkConfig},
    },
    foundation::{
        core::{AnimationConfig, FrameIndex},
        error::{CardspinError, CardspinResult},
    },
    render::{frame::FrameRGBA, synth::FrameSynthesizer},
};

/// Counters reported by a finished export.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExportStats {
    /// Frames synthesized and handed to the sink.
    pub frames_total: u64,
}

/// Lazy, finite frame sequence over one rotation period.
///
/// Yields `(index, frame)` for `index` in `0..cfg.frame_count()`, sampling at `index / fps`
/// seconds. Each frame is synthesized only when requested. Once exhausted it stays exhausted;
/// build a new one with [`frames`] to replay.
pub struct Frames<'a> {
    synth: &'a FrameSynthesizer,
    cfg: &'a AnimationConfig,
    next: u64,
    count: u64,
}

impl Iterator for Frames<'_> {
    type Item = (FrameIndex, FrameRGBA);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.count {
            return None;
        }
        let idx = FrameIndex(self.next);
        self.next += 1;

        let t = self.cfg.timestamp_for(idx);
        Some((idx, self.synth.synthesize(t, self.cfg.duration_secs)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = usize::try_from(self.count - self.next).unwrap_or(usize::MAX);
        (left, Some(left))
    }
}

impl ExactSizeIterator for Frames<'_> {}

/// Sample `synth` across one period of `cfg`.
pub fn frames<'a>(synth: &'a FrameSynthesizer, cfg: &'a AnimationConfig) -> Frames<'a> {
    Frames {
        synth,
        cfg,
        next: 0,
        count: cfg.frame_count(),
    }
}

/// Synthesize every frame of `cfg` and stream them into `sink`.
///
/// The first error aborts the export; `end` is only called after every frame was accepted.
#[tracing::instrument(skip_all, fields(frames = cfg.frame_count(), fps = cfg.fps))]
pub fn render_to_sink(
    synth: &FrameSynthesizer,
    cfg: &AnimationConfig,
    sink: &mut dyn FrameSink,
) -> CardspinResult<ExportStats> {
    cfg.validate()?;
    if synth.canvas() != cfg.size {
        return Err(CardspinError::validation(format!(
            "source is {}x{} but config asks for {}x{}",
            synth.canvas().width,
            synth.canvas().height,
            cfg.size.width,
            cfg.size.height
        )));
    }

    sink.begin(SinkConfig {
        size: cfg.size,
        fps: cfg.fps,
        frame_count: cfg.frame_count(),
        frame_delay_cs: cfg.frame_delay_cs(),
    })?;

    let mut stats = ExportStats::default();
    for (idx, frame) in frames(synth, cfg) {
        tracing::debug!(frame = idx.0, "synthesized");
        sink.push_frame(idx, &frame)?;
        stats.frames_total += 1;
    }

    sink.end()?;
    Ok(stats)
}

/// Export an already decoded image into `sink`.
///
/// The image is resized to `cfg.size` once, up front.
pub fn export_image(
    img: &image::DynamicImage,
    cfg: &AnimationConfig,
    sink: &mut dyn FrameSink,
) -> CardspinResult<ExportStats> {
    cfg.validate()?;
    let source = SourceImage::from_dynamic(img, cfg.size)?;
    render_to_sink(&FrameSynthesizer::new(source), cfg, sink)
}

/// Read `input`, render its rotation and write it as a GIF.
///
/// Either the whole GIF lands at `opts.out_path` or, on any failure, no output file is created
/// and the first error is returned.
#[tracing::instrument(skip_all, fields(input = %input.display(), out = %opts.out_path.display()))]
pub fn export(
    input: &Path,
    cfg: &AnimationConfig,
    opts: GifSinkOpts,
) -> CardspinResult<ExportStats> {
    cfg.validate()?;
    let source = SourceImage::open(input, cfg.size)?;
    let synth = FrameSynthesizer::new(source);

    let mut sink = GifSink::new(opts);
    let stats = render_to_sink(&synth, cfg, &mut sink)?;

    tracing::info!(
        frames = stats.frames_total,
        out = %sink.out_path().display(),
        "gif written"
    );
    Ok(stats)
}

/// Render the single frame at `t` seconds; used for previews.
pub fn render_frame_at(
    input: &Path,
    cfg: &AnimationConfig,
    t: f64,
) -> CardspinResult<FrameRGBA> {
    cfg.validate()?;
    if !t.is_finite() || t < 0.0 {
        return Err(CardspinError::validation(format!(
            "timestamp must be a finite number of seconds >= 0, got {t}"
        )));
    }
    let synth = FrameSynthesizer::new(SourceImage::open(input, cfg.size)?);
    Ok(synth.synthesize(t, cfg.duration_secs))
}
