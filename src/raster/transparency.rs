use crate::{foundation::color::Color, raster::Bitmap};

/// Copy of `bitmap` where every pixel whose RGB equals `key` has alpha 0.
///
/// Other pixels are untouched and the RGB of keyed pixels is kept, so applying the same key
/// twice changes nothing.
pub fn make_transparent(bitmap: &Bitmap, key: Color) -> Bitmap {
    let mut out = bitmap.clone();
    for px in out.pixels_mut() {
        if key.same_rgb(Color::from_pixel(*px)) {
            px.0[3] = 0;
        }
    }
    out
}
