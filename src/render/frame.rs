use crate::foundation::{
    core::Size,
    error::{CardspinError, CardspinResult},
};

/// A synthesized frame as RGBA8 pixels.
///
/// Straight (non-premultiplied) alpha, tightly packed, row-major. Frames carry no identity of
/// their own; their position in the sequence is tracked by the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, `width * height * 4` long.
    pub data: Vec<u8>,
}

impl FrameRGBA {
    /// Wrap an `image` raster without copying.
    pub fn from_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            data: img.into_raw(),
        }
    }

    /// Convert back to an `image` raster, e.g. to save a preview.
    pub fn into_image(self) -> CardspinResult<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.data)
            .ok_or_else(|| CardspinError::validation("frame buffer does not match its dimensions"))
    }

    /// Frame dimensions.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// RGBA of the pixel at `(x, y)`, if in bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Half-open column span `[first, last + 1)` holding any non-transparent pixel.
    pub fn opaque_columns(&self) -> Option<(u32, u32)> {
        let mut first = None;
        let mut last = 0;
        for x in 0..self.width {
            let any = (0..self.height).any(|y| self.pixel(x, y).is_some_and(|px| px[3] != 0));
            if any {
                first.get_or_insert(x);
                last = x;
            }
        }
        first.map(|f| (f, last + 1))
    }
}
