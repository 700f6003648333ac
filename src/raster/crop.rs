use crate::{
    foundation::{
        color::Color,
        error::{CartridgeError, CartridgeResult},
    },
    raster::Bitmap,
};

/// Largest possible ARGB distance between two pixels, used to express tolerance in percent.
pub const MAX_PIXEL_DISTANCE: f64 = 510.0;

/// Inclusive bounding box of a bitmap's foreground content.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContentBounds {
    /// Leftmost foreground column.
    pub left: u32,
    /// Topmost foreground row.
    pub top: u32,
    /// Rightmost foreground column.
    pub right: u32,
    /// Bottom foreground row.
    pub bottom: u32,
}

impl ContentBounds {
    /// Width of the box.
    pub fn width(&self) -> u32 {
        self.right - self.left + 1
    }

    /// Height of the box.
    pub fn height(&self) -> u32 {
        self.bottom - self.top + 1
    }
}

/// Whether `px` differs from `reference` by more than `tolerance_percent` of the maximum
/// ARGB distance.
pub fn is_foreground(px: Color, reference: Color, tolerance_percent: f64) -> bool {
    let d = |a: u8, b: u8| {
        let v = f64::from(a) - f64::from(b);
        v * v
    };
    let dist = (d(px.a, reference.a) + d(px.r, reference.r) + d(px.g, reference.g)
        + d(px.b, reference.b))
    .sqrt();
    dist / MAX_PIXEL_DISTANCE * 100.0 > tolerance_percent
}

/// Bounding box of every pixel that differs from `reference`, or `None` when all match.
pub fn content_bounds(
    bitmap: &Bitmap,
    reference: Color,
    tolerance_percent: f64,
) -> Option<ContentBounds> {
    let mut bounds: Option<ContentBounds> = None;
    for (x, y, px) in bitmap.enumerate_pixels() {
        if !is_foreground(Color::from_pixel(*px), reference, tolerance_percent) {
            continue;
        }
        bounds = Some(match bounds {
            None => ContentBounds {
                left: x,
                top: y,
                right: x,
                bottom: y,
            },
            Some(b) => ContentBounds {
                left: b.left.min(x),
                top: b.top.min(y),
                right: b.right.max(x),
                bottom: b.bottom.max(y),
            },
        });
    }
    bounds
}

/// Crop `bitmap` to its foreground content.
///
/// The reference colour defaults to the top-left pixel. A bitmap with no foreground pixel at
/// all is a content error.
pub fn crop(
    bitmap: &Bitmap,
    reference: Option<Color>,
    tolerance_percent: f64,
) -> CartridgeResult<Bitmap> {
    if bitmap.width() == 0 || bitmap.height() == 0 {
        return Err(CartridgeError::content("cannot crop an empty bitmap"));
    }
    let reference = reference.unwrap_or_else(|| Color::from_pixel(*bitmap.get_pixel(0, 0)));
    let bounds = content_bounds(bitmap, reference, tolerance_percent).ok_or_else(|| {
        CartridgeError::content(format!(
            "no content differs from {reference:?} by more than {tolerance_percent}%"
        ))
    })?;

    tracing::trace!(?bounds, "cropped bitmap to content");
    Ok(
        image::imageops::crop_imm(bitmap, bounds.left, bounds.top, bounds.width(), bounds.height())
            .to_image(),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/raster/crop.rs"]
mod tests;
