use std::fs::File;
use std::io::{BufWriter, Write as _};
use std::path::{Path, PathBuf};

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{FrameIndex, MAX_SIDE};
use crate::foundation::error::{CardspinError, CardspinResult};
use crate::render::frame::FrameRGBA;

/// Fastest and slowest settings `gif`'s NeuQuant quantizer accepts.
const SPEED_RANGE: std::ops::RangeInclusive<i32> = 1..=30;

/// Alpha at or above which a pixel is encoded opaque.
pub const ALPHA_CUTOFF: u8 = 128;

/// Options for [`GifSink`].
#[derive(Clone, Debug)]
pub struct GifSinkOpts {
    /// Output GIF file path.
    pub out_path: PathBuf,
    /// Overwrite the output file if it already exists. When false, an output file that appears
    /// while encoding is also left untouched.
    pub overwrite: bool,
    /// Quantizer speed, 1 (best palette) to 30 (fastest).
    pub speed: i32,
}

impl GifSinkOpts {
    /// Options for writing a GIF to `out_path`.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
            speed: 10,
        }
    }
}

/// Sink that encodes frames into an infinitely looping animated GIF.
///
/// Frames are written to a hidden sibling of `out_path` and moved into place by `end`. If the
/// sink is dropped before `end` succeeds, the partial file and any parent directories `begin`
/// had to create are removed, and `out_path` is never created.
///
/// GIF has no partial transparency: pixels with alpha below [`ALPHA_CUTOFF`] are written fully
/// transparent, all others fully opaque.
pub struct GifSink {
    opts: GifSinkOpts,

    encoder: Option<gif::Encoder<BufWriter<File>>>,
    partial: TempFileGuard,

    scratch: Vec<u8>,
    cfg: Option<SinkConfig>,
    last_idx: Option<FrameIndex>,
    frames_written: u64,
}

impl GifSink {
    /// Create a sink; nothing touches the filesystem until `begin`.
    pub fn new(opts: GifSinkOpts) -> Self {
        Self {
            opts,
            encoder: None,
            partial: TempFileGuard::default(),
            scratch: Vec::new(),
            cfg: None,
            last_idx: None,
            frames_written: 0,
        }
    }

    /// Final output path.
    pub fn out_path(&self) -> &Path {
        &self.opts.out_path
    }
}

impl FrameSink for GifSink {
    fn begin(&mut self, cfg: SinkConfig) -> CardspinResult<()> {
        if self.encoder.is_some() {
            return Err(CardspinError::validation("gif sink already started"));
        }
        if cfg.size.width == 0 || cfg.size.height == 0 {
            return Err(CardspinError::validation(
                "gif sink width/height must be non-zero",
            ));
        }
        if cfg.size.width > MAX_SIDE || cfg.size.height > MAX_SIDE {
            return Err(CardspinError::validation(format!(
                "gif sink size {}x{} exceeds {MAX_SIDE} pixels per side",
                cfg.size.width, cfg.size.height
            )));
        }
        if cfg.fps == 0 {
            return Err(CardspinError::validation("fps must be non-zero"));
        }
        if !SPEED_RANGE.contains(&self.opts.speed) {
            return Err(CardspinError::validation(format!(
                "gif quantizer speed must be within 1..=30, got {}",
                self.opts.speed
            )));
        }

        let created_dirs = create_missing_parents(&self.opts.out_path)?;
        self.partial.dirs = created_dirs;
        if !self.opts.overwrite && self.opts.out_path.exists() {
            return Err(CardspinError::output(format!(
                "output file '{}' already exists",
                self.opts.out_path.display()
            )));
        }

        let partial_path = partial_path_for(&self.opts.out_path)?;
        let file = File::create(&partial_path).map_err(|e| {
            CardspinError::output(format!("create '{}': {e}", partial_path.display()))
        })?;
        self.partial.file = Some(partial_path.clone());

        let mut encoder = gif::Encoder::new(
            BufWriter::new(file),
            cfg.size.width as u16,
            cfg.size.height as u16,
            &[],
        )
        .map_err(|e| CardspinError::output(format!("start gif encoder: {e}")))?;
        encoder
            .set_repeat(gif::Repeat::Infinite)
            .map_err(|e| CardspinError::output(format!("set gif repeat: {e}")))?;

        tracing::debug!(
            partial = %partial_path.display(),
            w = cfg.size.width,
            h = cfg.size.height,
            delay_cs = cfg.frame_delay_cs,
            "gif sink started"
        );

        self.scratch = vec![0u8; cfg.size.rgba_len()];
        self.encoder = Some(encoder);
        self.cfg = Some(cfg);
        self.last_idx = None;
        self.frames_written = 0;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> CardspinResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| CardspinError::validation("gif sink not started"))?;
        let encoder = self
            .encoder
            .as_mut()
            .ok_or_else(|| CardspinError::validation("gif sink not started"))?;

        if let Some(last) = self.last_idx
            && idx.0 <= last.0
        {
            return Err(CardspinError::validation(format!(
                "frames must be pushed in increasing order (got {} after {})",
                idx.0, last.0
            )));
        }
        if frame.size() != cfg.size || frame.data.len() != self.scratch.len() {
            return Err(CardspinError::validation(format!(
                "frame {} is {}x{}, expected {}x{}",
                idx.0, frame.width, frame.height, cfg.size.width, cfg.size.height
            )));
        }

        // Quantization rewrites the buffer in place; keep the caller's frame intact.
        self.scratch.copy_from_slice(&frame.data);
        binarize_alpha(&mut self.scratch);
        let mut out = gif::Frame::from_rgba_speed(
            cfg.size.width as u16,
            cfg.size.height as u16,
            &mut self.scratch,
            self.opts.speed,
        );
        out.delay = cfg.frame_delay_cs;
        // Clear to transparent between frames so the shrinking card leaves no trail.
        out.dispose = gif::DisposalMethod::Background;

        encoder
            .write_frame(&out)
            .map_err(|e| CardspinError::output(format!("write gif frame {}: {e}", idx.0)))?;

        self.last_idx = Some(idx);
        self.frames_written += 1;
        Ok(())
    }

    fn end(&mut self) -> CardspinResult<()> {
        let encoder = self
            .encoder
            .take()
            .ok_or_else(|| CardspinError::validation("gif sink not started"))?;
        if self.frames_written == 0 {
            return Err(CardspinError::validation("gif sink received no frames"));
        }

        let mut writer = encoder
            .into_inner()
            .map_err(|e| CardspinError::output(format!("finish gif: {e}")))?;
        writer
            .flush()
            .map_err(|e| CardspinError::output(format!("flush gif: {e}")))?;
        let file = writer
            .into_inner()
            .map_err(|e| CardspinError::output(format!("flush gif: {}", e.error())))?;
        file.sync_all()
            .map_err(|e| CardspinError::output(format!("sync gif: {e}")))?;
        drop(file);

        let partial = self
            .partial
            .file
            .clone()
            .ok_or_else(|| CardspinError::validation("gif sink lost its partial file"))?;
        if self.opts.overwrite {
            std::fs::rename(&partial, &self.opts.out_path).map_err(|e| {
                CardspinError::output(format!(
                    "move '{}' to '{}': {e}",
                    partial.display(),
                    self.opts.out_path.display()
                ))
            })?;
        } else {
            // A hard link fails instead of replacing a file created since `begin`.
            std::fs::hard_link(&partial, &self.opts.out_path).map_err(|e| {
                if e.kind() == std::io::ErrorKind::AlreadyExists {
                    CardspinError::output(format!(
                        "output file '{}' already exists",
                        self.opts.out_path.display()
                    ))
                } else {
                    CardspinError::output(format!(
                        "link '{}' to '{}': {e}",
                        partial.display(),
                        self.opts.out_path.display()
                    ))
                }
            })?;
            if let Err(e) = std::fs::remove_file(&partial) {
                tracing::warn!(partial = %partial.display(), "remove partial gif: {e}");
            }
        }
        self.partial.disarm();

        tracing::debug!(
            out = %self.opts.out_path.display(),
            frames = self.frames_written,
            "gif sink finished"
        );
        Ok(())
    }
}

/// Create `path`'s parent directory if it is missing.
pub fn ensure_parent_dir(path: &Path) -> CardspinResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| {
            CardspinError::output(format!(
                "create output directory '{}': {e}",
                parent.display()
            ))
        })?;
    }
    Ok(())
}

/// Like [`ensure_parent_dir`], but returns the directories it created, outermost first.
fn create_missing_parents(path: &Path) -> CardspinResult<Vec<PathBuf>> {
    let mut missing = Vec::new();
    let mut cur = path.parent();
    while let Some(dir) = cur
        && !dir.as_os_str().is_empty()
        && !dir.exists()
    {
        missing.push(dir.to_path_buf());
        cur = dir.parent();
    }
    missing.reverse();

    ensure_parent_dir(path)?;
    Ok(missing)
}

/// Force every pixel to alpha 0 or 255; transparent pixels share one RGB so the quantizer
/// maps them all to the transparent palette entry.
fn binarize_alpha(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        if px[3] >= ALPHA_CUTOFF {
            px[3] = 255;
        } else {
            px.fill(0);
        }
    }
}

/// Hidden sibling of `out` used while encoding; same directory so the final rename is atomic.
fn partial_path_for(out: &Path) -> CardspinResult<PathBuf> {
    let name = out
        .file_name()
        .ok_or_else(|| {
            CardspinError::output(format!("output path '{}' has no file name", out.display()))
        })?
        .to_string_lossy();
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    Ok(out.with_file_name(format!(
        ".{name}.{}.{nanos}.partial",
        std::process::id()
    )))
}

/// Removes the partial file, then any directories created for it, unless disarmed.
#[derive(Default)]
struct TempFileGuard {
    file: Option<PathBuf>,
    dirs: Vec<PathBuf>,
}

impl TempFileGuard {
    fn disarm(&mut self) {
        self.file = None;
        self.dirs.clear();
    }
}

impl Drop for TempFileGuard {
    fn drop(&mut self) {
        if let Some(path) = self.file.take() {
            let _ = std::fs::remove_file(path);
        }
        // Innermost first; `remove_dir` leaves anything that is no longer empty.
        for dir in self.dirs.drain(..).rev() {
            let _ = std::fs::remove_dir(dir);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif_sink.rs"]
mod tests;
