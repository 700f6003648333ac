use crate::{
    foundation::error::CartridgeResult,
    raster::{
        Bitmap,
        composite::{fill_rect, paint_layer},
    },
    text::fit::TextRenderDetails,
};

/// Rasterizer options for text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderHints {
    /// Hint glyph outlines to the pixel grid.
    pub hinting: bool,
}

impl Default for RenderHints {
    fn default() -> Self {
        Self { hinting: true }
    }
}

/// Draw a fitted block of `lines` onto `target` with its top-left corner at `(x, y)`.
///
/// The block rectangle is filled with the background first unless the background is the
/// transparency key. Each line is inset by the left padding and drops by top padding, line
/// height and bottom padding. Glyphs are clipped to the block.
pub fn render_text<S: AsRef<str>>(
    target: &mut Bitmap,
    lines: &[S],
    x: u32,
    y: u32,
    details: &TextRenderDetails,
    hints: RenderHints,
) -> CartridgeResult<()> {
    let colors = details.colors;
    if !colors.background_is_transparent() {
        fill_rect(target, x, y, details.width, details.height, colors.background);
    }
    if lines.is_empty() {
        return Ok(());
    }

    let metrics = details.font.metrics()?;
    let line_height = f64::from(metrics.height_px());
    let desc = &details.descriptor;
    let pen_x = f64::from(x) + f64::from(desc.left);

    paint_layer(target, x, y, details.width, details.height, |ctx| {
        ctx.set_paint(colors.foreground.to_paint());
        let mut baseline = f64::from(y) + f64::from(metrics.ascent);
        for line in lines {
            baseline += f64::from(desc.top);
            details.font.fill_text(
                ctx,
                line.as_ref(),
                kurbo::Point::new(pen_x, baseline),
                hints.hinting,
            )?;
            baseline += line_height + f64::from(desc.bottom);
        }
        Ok(())
    })
}

#[cfg(test)]
#[path = "../../tests/unit/raster/canvas.rs"]
mod tests;
