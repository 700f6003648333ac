use crate::{
    foundation::{
        color::Color,
        error::{CartridgeError, CartridgeResult},
        math::{mul_div255_u8, premultiply, unpremultiply},
    },
    raster::Bitmap,
};

pub(crate) type PremulRgba8 = [u8; 4];

/// Premultiplied source-over.
pub(crate) fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    if src[3] == 0 {
        return dst;
    }
    if src[3] == 255 {
        return src;
    }

    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255_u8(u16::from(dst[i]), inv));
    }
    out
}

/// Largest side of one `vello_cpu` layer; bigger regions are painted tile by tile.
pub(crate) const MAX_LAYER_SIDE: u32 = 4096;

/// Blend a premultiplied RGBA8 layer `width` pixels wide onto the straight-alpha `target`
/// with its top-left corner at `(x, y)`. The layer must lie inside `target`.
pub(crate) fn blend_premul_layer(
    target: &mut Bitmap,
    x: u32,
    y: u32,
    width: u32,
    layer: &[u8],
) -> CartridgeResult<()> {
    let row_len = width as usize * 4;
    if row_len == 0 || !layer.len().is_multiple_of(row_len) {
        return Err(CartridgeError::Other(anyhow::anyhow!(
            "layer blend expects whole rgba8 rows of {width} pixels"
        )));
    }
    let height = (layer.len() / row_len) as u32;
    if x.saturating_add(width) > target.width() || y.saturating_add(height) > target.height() {
        return Err(CartridgeError::Other(anyhow::anyhow!(
            "layer {width}x{height} at ({x}, {y}) exceeds the target"
        )));
    }

    for (row, src_row) in layer.chunks_exact(row_len).enumerate() {
        for (col, s) in src_row.chunks_exact(4).enumerate() {
            if s[3] == 0 {
                continue;
            }
            let px = target.get_pixel_mut(x + col as u32, y + row as u32);
            px.0 = unpremultiply(over(premultiply(px.0), [s[0], s[1], s[2], s[3]]));
        }
    }
    Ok(())
}

/// Draw vector content onto the `(x, y, w, h)` region of `target` through transparent
/// `vello_cpu` layers.
///
/// `draw` works in `target` coordinates and is called once per tile; anything it draws
/// outside the region is clipped.
pub(crate) fn paint_layer(
    target: &mut Bitmap,
    x: u32,
    y: u32,
    w: u32,
    h: u32,
    mut draw: impl FnMut(&mut vello_cpu::RenderContext) -> CartridgeResult<()>,
) -> CartridgeResult<()> {
    let x1 = x.saturating_add(w).min(target.width());
    let y1 = y.saturating_add(h).min(target.height());

    let mut ty = y;
    while ty < y1 {
        let th = (y1 - ty).min(MAX_LAYER_SIDE);
        let mut tx = x;
        while tx < x1 {
            let tw = (x1 - tx).min(MAX_LAYER_SIDE);
            paint_tile(target, tx, ty, tw, th, &mut draw)?;
            tx += tw;
        }
        ty += th;
    }
    Ok(())
}

fn paint_tile(
    target: &mut Bitmap,
    x: u32,
    y: u32,
    w: u32,
    h: u32,
    draw: &mut impl FnMut(&mut vello_cpu::RenderContext) -> CartridgeResult<()>,
) -> CartridgeResult<()> {
    let width: u16 = w
        .try_into()
        .map_err(|_| anyhow::anyhow!("layer width {w} exceeds u16"))?;
    let height: u16 = h
        .try_into()
        .map_err(|_| anyhow::anyhow!("layer height {h} exceeds u16"))?;

    let mut ctx = vello_cpu::RenderContext::new(width, height);
    ctx.set_transform(vello_cpu::kurbo::Affine::translate((
        -f64::from(x),
        -f64::from(y),
    )));
    draw(&mut ctx)?;
    ctx.flush();

    let mut pixmap = vello_cpu::Pixmap::new(width, height);
    ctx.render_to_pixmap(&mut pixmap);
    blend_premul_layer(target, x, y, w, pixmap.data_as_u8_slice())
}

/// A `width` x `height` bitmap filled with `background`.
///
/// When `background` is the transparency key the fill is skipped and the canvas starts fully
/// transparent instead.
pub fn blank_canvas(
    width: u32,
    height: u32,
    background: Color,
    transparent: Option<Color>,
) -> Bitmap {
    if transparent == Some(background) {
        let clear = Color::rgba(background.r, background.g, background.b, 0);
        return Bitmap::from_pixel(width, height, clear.to_pixel());
    }
    Bitmap::from_pixel(width, height, background.to_pixel())
}

/// Fill the axis-aligned rectangle `(x, y, w, h)`, clipped to `target`.
pub fn fill_rect(target: &mut Bitmap, x: u32, y: u32, w: u32, h: u32, color: Color) {
    let x1 = x.saturating_add(w).min(target.width());
    let y1 = y.saturating_add(h).min(target.height());
    for yy in y..y1 {
        for xx in x..x1 {
            blend_pixel(target.get_pixel_mut(xx, yy), color.to_array());
        }
    }
}

/// Source-over `src` onto `target` with its top-left corner at `(x, y)`, clipped.
pub fn overlay(target: &mut Bitmap, src: &Bitmap, x: u32, y: u32) {
    let w = src.width().min(target.width().saturating_sub(x));
    let h = src.height().min(target.height().saturating_sub(y));
    for sy in 0..h {
        for sx in 0..w {
            blend_pixel(target.get_pixel_mut(x + sx, y + sy), src.get_pixel(sx, sy).0);
        }
    }
}

fn blend_pixel(dst: &mut image::Rgba<u8>, src: [u8; 4]) {
    match src[3] {
        0 => {}
        255 => dst.0 = src,
        _ => dst.0 = unpremultiply(over(premultiply(dst.0), premultiply(src))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/composite.rs"]
mod tests;
