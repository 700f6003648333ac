/// Straight-alpha RGBA8 bitmap all raster operations work on.
pub type Bitmap = image::RgbaImage;

pub(crate) mod border;
pub(crate) mod canvas;
pub(crate) mod composite;
pub(crate) mod crop;
pub(crate) mod scale;
pub(crate) mod transparency;
