//! cardspin turns a still image into a looping pseudo-3D spin and writes it as an animated GIF.
//!
//! The picture is treated as a flat card turning about its vertical axis. Each frame squeezes
//! the card horizontally by `|cos(angle)|`, shows its mirrored back between 90° and 270°, and
//! centers it on a transparent canvas of fixed size.
//!
//! # Pipeline overview
//!
//! 1. **Prepare**: decode the input and resize it once to the canvas ([`SourceImage`])
//! 2. **Synthesize**: `timestamp -> FrameRGBA` ([`FrameSynthesizer`]), pure and deterministic
//! 3. **Sample**: `ceil(duration * fps)` frames at `i / fps` seconds ([`frames`])
//! 4. **Encode**: stream frames into a [`FrameSink`]; [`GifSink`] writes the GIF atomically
//!
//! [`export`] runs all four steps and either writes the whole GIF or nothing.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod encode;
mod foundation;
mod render;
mod session;

pub mod shell;

pub use crate::assets::decode::{SourceImage, read_image};
pub use crate::encode::gif_sink::{ALPHA_CUTOFF, GifSink, GifSinkOpts, ensure_parent_dir};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::foundation::core::{AnimationConfig, FrameIndex, MAX_SIDE, Size};
pub use crate::foundation::error::{CardspinError, CardspinResult};
pub use crate::render::composite::{Rgba8, blit_over, over};
pub use crate::render::frame::FrameRGBA;
pub use crate::render::rotation::{Pose, is_back_facing};
pub use crate::render::synth::FrameSynthesizer;
pub use crate::session::export::{
    ExportStats, Frames, export, export_image, frames, render_frame_at, render_to_sink,
};
pub use crate::shell::{check_input_path, resolve_output_path};
