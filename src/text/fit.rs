use crate::{
    foundation::{
        color::Color,
        error::{CartridgeError, CartridgeResult},
    },
    text::{
        cache::FontCache,
        font::{Font, FontDescriptor},
    },
};

/// Smallest font size the fit solver will go down to.
pub const MIN_FONT_SIZE: f32 = 1.0;

/// Colours a text field is painted with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldColors {
    /// Field background.
    pub background: Color,
    /// Colour keyed out to transparency, if any.
    pub transparent: Option<Color>,
    /// Text colour.
    pub foreground: Color,
}

impl FieldColors {
    /// Whether the background fill would be keyed out anyway.
    pub fn background_is_transparent(&self) -> bool {
        self.transparent == Some(self.background)
    }
}

/// Result of fitting a block of lines: the chosen font and the block's pixel size.
#[derive(Clone, Debug)]
pub struct TextRenderDetails {
    /// Descriptor at the fitted size.
    pub descriptor: FontDescriptor,
    /// Font at the fitted size.
    pub font: Font,
    /// Block width in pixels, padding included.
    pub width: u32,
    /// Block height in pixels, padding included.
    pub height: u32,
    /// Colours the block is painted with.
    pub colors: FieldColors,
}

/// Chooses the largest font size (in whole-point steps down from the base size) at which a
/// block of lines fits a bounding box.
///
/// Width of a block is the widest `line + " "` plus left and right padding; height is
/// `(line height + top + bottom)` per line. When the box cannot be met even at
/// [`MIN_FONT_SIZE`] the smallest tried size is returned and the block overflows.
#[derive(Clone, Copy, Debug)]
pub struct TextFitSolver<'a> {
    fonts: &'a FontCache,
}

impl<'a> TextFitSolver<'a> {
    /// Solver resolving fonts through `fonts`.
    pub fn new(fonts: &'a FontCache) -> Self {
        Self { fonts }
    }

    /// Fit `lines` into `max_width` x `max_height`; `None` leaves a dimension unconstrained.
    pub fn fit<S: AsRef<str>>(
        &self,
        lines: &[S],
        descriptor: &FontDescriptor,
        colors: FieldColors,
        max_width: Option<u32>,
        max_height: Option<u32>,
    ) -> CartridgeResult<TextRenderDetails> {
        let base = descriptor.size;
        if !base.is_finite() || base <= 0.0 {
            return Err(CartridgeError::configuration(format!(
                "font '{}' size must be finite and > 0, got {base}",
                descriptor.name
            )));
        }

        let mut steps = 0u32;
        let (font, width, height, fits) = loop {
            let font = self
                .fonts
                .font(&descriptor.name, descriptor.style, base - steps as f32)?;
            let (width, height) = measure(lines, &font, descriptor)?;
            steps += 1;
            let fits = max_width.is_none_or(|w| width <= w)
                && max_height.is_none_or(|h| height <= h);
            if fits || base - (steps as f32) < MIN_FONT_SIZE {
                break (font, width, height, fits);
            }
        };
        // The counter already stepped past the last measured size.
        let size = base - (steps - 1) as f32;

        if !fits {
            tracing::warn!(
                font = %descriptor.name,
                size,
                width,
                height,
                ?max_width,
                ?max_height,
                "text does not fit even at the smallest size"
            );
        }

        Ok(TextRenderDetails {
            descriptor: descriptor.with_size(size),
            font,
            width,
            height,
            colors,
        })
    }
}

/// Pixel size of `lines` set in `font` with the paddings of `descriptor`.
///
/// Fails with a configuration error when the paddings push either dimension past `u32`.
pub fn measure<S: AsRef<str>>(
    lines: &[S],
    font: &Font,
    descriptor: &FontDescriptor,
) -> CartridgeResult<(u32, u32)> {
    let line_box = font
        .metrics()?
        .height_px()
        .checked_add(descriptor.top)
        .and_then(|h| h.checked_add(descriptor.bottom))
        .ok_or_else(|| field_overflow(descriptor))?;
    if lines.is_empty() {
        return Ok((0, line_box));
    }

    let mut width = 0u32;
    for line in lines {
        let advance = font.advance(&format!("{} ", line.as_ref()))?;
        let line_width = (advance.ceil().max(0.0) as u32)
            .checked_add(descriptor.left)
            .and_then(|w| w.checked_add(descriptor.right))
            .ok_or_else(|| field_overflow(descriptor))?;
        width = width.max(line_width);
    }
    let height = u32::try_from(lines.len())
        .ok()
        .and_then(|n| line_box.checked_mul(n))
        .ok_or_else(|| field_overflow(descriptor))?;
    Ok((width, height))
}

fn field_overflow(descriptor: &FontDescriptor) -> CartridgeError {
    CartridgeError::configuration(format!(
        "font '{}' field size overflows (padding {}/{}/{}/{})",
        descriptor.name, descriptor.left, descriptor.right, descriptor.top, descriptor.bottom
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/text/fit.rs"]
mod tests;
