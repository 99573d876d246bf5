/// Slack added before flooring a coordinate to a pixel position.
///
/// Absorbs float representation error just below an integral boundary,
/// so `8.99999999` lands on pixel 9 together with `9.0`.
pub const PIXEL_EPSILON: f64 = 0.99999;

/// Bounding box with top-left origin coordinate system.
///
/// Coordinates follow the page-space convention used by layout providers:
/// - `x0`: left edge
/// - `top`: top edge (distance from top of page)
/// - `x1`: right edge
/// - `bottom`: bottom edge (distance from top of page)
///
/// A coordinate the provider could not determine is stored as `NaN`;
/// see [`BBox::unknown`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BBox {
    pub x0: f64,
    pub top: f64,
    pub x1: f64,
    pub bottom: f64,
}

impl BBox {
    pub fn new(x0: f64, top: f64, x1: f64, bottom: f64) -> Self {
        Self {
            x0,
            top,
            x1,
            bottom,
        }
    }

    /// A box whose coordinates are all unknown.
    ///
    /// Unknown coordinates round to [`i64::MIN`] in [`to_pixel`], so items
    /// carrying this box sort ahead of everything else.
    pub fn unknown() -> Self {
        Self::new(f64::NAN, f64::NAN, f64::NAN, f64::NAN)
    }

    /// Returns `true` if all four coordinates are finite numbers.
    pub fn is_known(&self) -> bool {
        [self.x0, self.top, self.x1, self.bottom]
            .iter()
            .all(|c| c.is_finite())
    }

    /// Width of the bounding box.
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// Height of the bounding box.
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Compute the union of two bounding boxes.
    pub fn union(&self, other: &BBox) -> BBox {
        BBox {
            x0: self.x0.min(other.x0),
            top: self.top.min(other.top),
            x1: self.x1.max(other.x1),
            bottom: self.bottom.max(other.bottom),
        }
    }

    /// Left edge rounded to its pixel position.
    pub fn left_px(&self) -> i64 {
        to_pixel(self.x0)
    }

    /// Top edge rounded to its pixel position.
    pub fn top_px(&self) -> i64 {
        to_pixel(self.top)
    }
}

/// Map a page coordinate to an integer pixel position: `floor(c + 0.99999)`.
///
/// Behaves like `ceil` for fractional values while keeping values that sit a
/// hair below an integer on that integer. `NaN` maps to [`i64::MIN`];
/// infinities and out-of-range values saturate.
pub fn to_pixel(c: f64) -> i64 {
    if c.is_nan() {
        return i64::MIN;
    }
    // `as` saturates at the i64 bounds for infinite inputs.
    (c + PIXEL_EPSILON).floor() as i64
}
