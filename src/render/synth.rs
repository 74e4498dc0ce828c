use image::RgbaImage;

use crate::{
    assets::decode::{SourceImage, resize_premultiplied},
    foundation::core::Size,
    render::{composite::blit_over, frame::FrameRGBA, rotation::Pose},
};

/// Turns one [`SourceImage`] into frames of its Y-axis rotation.
///
/// Synthesis is a pure function of the source and the requested instant: the same inputs always
/// produce the same pixels, and every frame has the source's (canvas) size.
#[derive(Clone, Debug)]
pub struct FrameSynthesizer {
    source: SourceImage,
}

impl FrameSynthesizer {
    /// Wrap an already resized source.
    pub fn new(source: SourceImage) -> Self {
        Self { source }
    }

    /// Canvas size of every frame this synthesizer produces.
    pub fn canvas(&self) -> Size {
        self.source.size()
    }

    /// Frame at timestamp `t` of a `duration_secs`-second turn.
    ///
    /// `duration_secs` must be > 0; callers validate it through
    /// [`AnimationConfig::validate`](crate::AnimationConfig::validate).
    pub fn synthesize(&self, t: f64, duration_secs: f64) -> FrameRGBA {
        self.synthesize_pose(Pose::at(t, duration_secs))
    }

    /// Frame for an explicit pose.
    pub fn synthesize_pose(&self, pose: Pose) -> FrameRGBA {
        let size = self.canvas();
        let card = self.card(pose);

        let mut canvas = RgbaImage::new(size.width, size.height);
        blit_over(&mut canvas, &card, i64::from(pose.offset_x(size.width)), 0);
        FrameRGBA::from_image(canvas)
    }

    /// The foreshortened (and, past 90°, mirrored) card before it is placed on the canvas.
    pub fn card(&self, pose: Pose) -> RgbaImage {
        let size = self.canvas();
        let w = pose.sub_width(size.width);

        let mut card = if w == size.width {
            self.source.pixels().clone()
        } else {
            resize_premultiplied(self.source.pixels(), w, size.height)
        };
        if pose.mirrored {
            image::imageops::flip_horizontal_in_place(&mut card);
        }
        card
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/synth.rs"]
mod tests;
