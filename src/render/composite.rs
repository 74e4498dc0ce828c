use image::RgbaImage;

/// Straight-alpha RGBA8 pixel.
pub type Rgba8 = [u8; 4];

/// Source-over for straight-alpha pixels.
///
/// Over a fully transparent `dst` the result is exactly `src`, which is what keeps the rotating
/// card bit-exact on its transparent canvas.
pub fn over(dst: Rgba8, src: Rgba8) -> Rgba8 {
    let sa = u32::from(src[3]);
    if sa == 0 {
        return dst;
    }
    if sa == 255 || dst[3] == 0 {
        return src;
    }

    let da = u32::from(dst[3]);
    // Destination weight, scaled by 255.
    let dw = div255(da * (255 - sa));
    let oa = sa + dw;
    if oa == 0 {
        return [0, 0, 0, 0];
    }

    let mut out = [0u8; 4];
    for i in 0..3 {
        let c = u32::from(src[i]) * sa + u32::from(dst[i]) * dw;
        out[i] = ((c + oa / 2) / oa).min(255) as u8;
    }
    out[3] = oa.min(255) as u8;
    out
}

/// Composite `src` over `dst` with its top-left corner at `(x, y)`.
///
/// Parts of `src` falling outside `dst` are clipped.
pub fn blit_over(dst: &mut RgbaImage, src: &RgbaImage, x: i64, y: i64) {
    let (dw, dh) = (i64::from(dst.width()), i64::from(dst.height()));
    for (sx, sy, px) in src.enumerate_pixels() {
        let tx = x + i64::from(sx);
        let ty = y + i64::from(sy);
        if tx < 0 || ty < 0 || tx >= dw || ty >= dh {
            continue;
        }
        let d = dst.get_pixel_mut(tx as u32, ty as u32);
        d.0 = over(d.0, px.0);
    }
}

fn div255(v: u32) -> u32 {
    (v + 127) / 255
}
