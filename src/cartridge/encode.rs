use std::{io::Cursor, path::Path};

use crate::{
    config::request::OutputFormat,
    foundation::error::{CartridgeError, CartridgeResult},
    raster::Bitmap,
};

/// MIME type used when a filename's extension is not a known image format.
pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Encode `bitmap` in `format`. Formats without alpha get the RGB channels only.
pub fn encode(bitmap: &Bitmap, format: OutputFormat) -> CartridgeResult<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());
    let result = if format.supports_alpha() {
        bitmap.write_to(&mut out, format.image_format())
    } else {
        image::DynamicImage::ImageRgba8(bitmap.clone())
            .into_rgb8()
            .write_to(&mut out, format.image_format())
    };
    result.map_err(|e| {
        CartridgeError::io(format!("encode cartridge as {}", format.extension()), e)
    })?;
    Ok(out.into_inner())
}

/// MIME type for `filename`, guessed from its extension.
pub fn content_type_for(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .and_then(image::ImageFormat::from_extension)
        .map_or(FALLBACK_CONTENT_TYPE, |f| f.to_mime_type())
        .to_string()
}
