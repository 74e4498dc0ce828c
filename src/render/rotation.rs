/// Where the card is in its turn at one instant.
///
/// A flat card spinning about its vertical axis, seen orthographically: its projected width is
/// `|cos(angle)|` of the full width, and between 90° and 270° we see its back, which is the
/// front mirrored left to right. The flip is a hard switch at exactly 90°/270°.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    /// Rotation angle in degrees, `(t / duration) * 360`.
    pub angle_deg: f64,
    /// Horizontal foreshortening in `[0, 1]`.
    pub scale: f64,
    /// Whether the back face (mirrored image) is showing.
    pub mirrored: bool,
}

impl Pose {
    /// Pose at timestamp `t` of a `duration`-second turn.
    pub fn at(t: f64, duration_secs: f64) -> Self {
        Self::from_angle((t / duration_secs) * 360.0)
    }

    /// Pose for an explicit angle in degrees.
    pub fn from_angle(angle_deg: f64) -> Self {
        Self {
            angle_deg,
            scale: angle_deg.to_radians().cos().abs(),
            mirrored: is_back_facing(angle_deg),
        }
    }

    /// Width of the foreshortened card, never below one pixel.
    pub fn sub_width(&self, full_width: u32) -> u32 {
        let w = (f64::from(full_width) * self.scale).round();
        // NaN casts to 0 and lands on the 1px floor as well.
        (w as u32).clamp(1, full_width.max(1))
    }

    /// Left edge that centers the card; odd remainders lean left.
    pub fn offset_x(&self, full_width: u32) -> u32 {
        full_width.saturating_sub(self.sub_width(full_width)) / 2
    }
}

/// `true` when `angle mod 360` is strictly inside `(90, 270)`.
pub fn is_back_facing(angle_deg: f64) -> bool {
    let a = angle_deg.rem_euclid(360.0);
    a > 90.0 && a < 270.0
}
