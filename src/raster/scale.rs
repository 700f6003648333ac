use image::imageops::FilterType;

use crate::raster::Bitmap;

/// Largest size with the aspect ratio of `width` x `height` that fits the bounds.
///
/// A missing bound is unbounded; results are truncated and clamped to at least 1 pixel.
pub fn fit_dimensions(
    width: u32,
    height: u32,
    max_width: Option<u32>,
    max_height: Option<u32>,
) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (width, height);
    }
    let bound_w = max_width.map_or(f64::INFINITY, f64::from);
    let bound_h = max_height.map_or(f64::INFINITY, f64::from);
    let aspect = f64::from(width) / f64::from(height);
    let bound_ratio = bound_w / bound_h;

    let (w, h) = if bound_ratio < aspect {
        (bound_w, bound_w / aspect)
    } else {
        (bound_h * aspect, bound_h)
    };
    let clamp = |v: f64| (v.trunc() as u32).max(1);
    (clamp(w), clamp(h))
}

/// Resize `bitmap` to the largest aspect-preserving size within the bounds.
///
/// Scaling is bilinear; with no bounds, or when the size already matches, the input is
/// returned unchanged.
pub fn scale(bitmap: Bitmap, max_width: Option<u32>, max_height: Option<u32>) -> Bitmap {
    if max_width.is_none() && max_height.is_none() {
        return bitmap;
    }
    let (w, h) = bitmap.dimensions();
    let (tw, th) = fit_dimensions(w, h, max_width, max_height);
    if (tw, th) == (w, h) {
        return bitmap;
    }
    tracing::trace!(from = ?(w, h), to = ?(tw, th), "scaling bitmap");
    image::imageops::resize(&bitmap, tw, th, FilterType::Triangle)
}

#[cfg(test)]
#[path = "../../tests/unit/raster/scale.rs"]
mod tests;
