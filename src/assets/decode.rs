use std::path::Path;

use image::{DynamicImage, ImageReader, Rgba, Rgba32FImage, RgbaImage, imageops::FilterType};

use crate::foundation::{
    core::Size,
    error::{CardspinError, CardspinResult},
};

/// Resampling filter for every resize in the pipeline.
const RESAMPLE: FilterType = FilterType::Lanczos3;

/// The still image a rotation is built from, in straight-alpha RGBA8.
///
/// Always already resized to the canvas size: the one up-front resize happens on construction,
/// so synthesis never touches the original resolution.
#[derive(Clone, Debug)]
pub struct SourceImage {
    pixels: RgbaImage,
}

impl SourceImage {
    /// Read, decode and resize the image at `path`.
    #[tracing::instrument(skip_all, fields(path = %path.display(), w = size.width, h = size.height))]
    pub fn open(path: &Path, size: Size) -> CardspinResult<Self> {
        let img = read_image(path)?;
        tracing::debug!(
            src_w = img.width(),
            src_h = img.height(),
            "decoded source image"
        );
        Self::from_dynamic(&img, size)
    }

    /// Convert any decoded image to RGBA8 and resize it to `size`.
    pub fn from_dynamic(img: &DynamicImage, size: Size) -> CardspinResult<Self> {
        Self::from_rgba(img.to_rgba8(), size)
    }

    /// Take ownership of an RGBA8 raster and resize it to `size`.
    pub fn from_rgba(img: RgbaImage, size: Size) -> CardspinResult<Self> {
        if size.width == 0 || size.height == 0 {
            return Err(CardspinError::validation(
                "source size width/height must be non-zero",
            ));
        }
        if img.width() == 0 || img.height() == 0 {
            return Err(CardspinError::input("source image has no pixels"));
        }

        let pixels = if img.dimensions() == (size.width, size.height) {
            img
        } else {
            resize_premultiplied(&img, size.width, size.height)
        };
        Ok(Self { pixels })
    }

    /// Canvas size (equal to the resized source).
    pub fn size(&self) -> Size {
        Size::new(self.pixels.width(), self.pixels.height())
    }

    /// Borrow the resized pixels.
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

/// Open and decode a still image, guessing the format from its contents.
pub fn read_image(path: &Path) -> CardspinResult<DynamicImage> {
    let reader = ImageReader::open(path)
        .map_err(|e| CardspinError::input(format!("open '{}': {e}", path.display())))?
        .with_guessed_format()
        .map_err(|e| CardspinError::input(format!("read '{}': {e}", path.display())))?;
    reader
        .decode()
        .map_err(|e| CardspinError::from_image_read(path, e))
}

/// Resize straight-alpha `img` to `width` x `height` with [`RESAMPLE`].
///
/// Filtering runs on premultiplied `f32` samples so fully transparent neighbours (whatever
/// their RGB) do not darken the edges of the opaque content. The result is straight alpha again.
pub(crate) fn resize_premultiplied(img: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    let premul = Rgba32FImage::from_fn(img.width(), img.height(), |x, y| {
        let [r, g, b, a] = img.get_pixel(x, y).0.map(|c| f32::from(c) / 255.0);
        Rgba([r * a, g * a, b * a, a])
    });
    let scaled = image::imageops::resize(&premul, width, height, RESAMPLE);

    RgbaImage::from_fn(width, height, |x, y| {
        let [r, g, b, a] = scaled.get_pixel(x, y).0;
        let a = a.clamp(0.0, 1.0);
        if a * 255.0 < 0.5 {
            return Rgba([0, 0, 0, 0]);
        }
        let straight = |c: f32| to_u8(c / a);
        Rgba([straight(r), straight(g), straight(b), to_u8(a)])
    })
}

fn to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}
