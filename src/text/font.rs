use std::{
    borrow::Cow,
    fmt,
    hash::{Hash, Hasher},
    sync::{Arc, Mutex},
};

use serde::{Deserialize, Serialize};

use crate::foundation::error::{CartridgeError, CartridgeResult};

/// Style bitmask of a font request (`PLAIN`, `BOLD`, `ITALIC`, combinable).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FontStyle(pub u8);

impl FontStyle {
    /// Regular upright face.
    pub const PLAIN: Self = Self(0);
    /// Bold weight.
    pub const BOLD: Self = Self(1);
    /// Italic slant.
    pub const ITALIC: Self = Self(2);

    /// Whether the bold bit is set.
    pub fn is_bold(self) -> bool {
        self.0 & Self::BOLD.0 != 0
    }

    /// Whether the italic bit is set.
    pub fn is_italic(self) -> bool {
        self.0 & Self::ITALIC.0 != 0
    }
}

impl std::ops::BitOr for FontStyle {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Logical font request of one cartridge field: face name, style, base size and padding.
///
/// Descriptors are never mutated once built; [`FontDescriptor::with_size`] produces the
/// size-adjusted copy the fit solver hands back.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct FontDescriptor {
    /// Logical font name (file stem in a font directory, or an installed family name).
    pub name: String,
    /// Style bitmask.
    pub style: FontStyle,
    /// Base size in points (pixels at 1:1).
    pub size: f32,
    /// Padding left of every line.
    pub left: u32,
    /// Padding right of every line.
    pub right: u32,
    /// Padding above every line.
    pub top: u32,
    /// Padding below every line.
    pub bottom: u32,
}

impl FontDescriptor {
    /// Descriptor with default padding for `name` at `size`.
    pub fn new(name: impl Into<String>, style: FontStyle, size: f32) -> Self {
        Self {
            name: name.into(),
            style,
            size,
            ..Self::default()
        }
    }

    /// Same descriptor with all four paddings replaced.
    pub fn with_padding(mut self, left: u32, right: u32, top: u32, bottom: u32) -> Self {
        self.left = left;
        self.right = right;
        self.top = top;
        self.bottom = bottom;
        self
    }

    /// Copy of this descriptor at another size.
    pub fn with_size(&self, size: f32) -> Self {
        Self {
            size,
            ..self.clone()
        }
    }
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self {
            name: "sans-serif".to_string(),
            style: FontStyle::PLAIN,
            size: 20.0,
            left: 0,
            right: 0,
            top: 0,
            bottom: 0,
        }
    }
}

impl PartialEq for FontDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.style == other.style
            && self.size.to_bits() == other.size.to_bits()
            && self.left == other.left
            && self.right == other.right
            && self.top == other.top
            && self.bottom == other.bottom
    }
}

impl Eq for FontDescriptor {}

impl Hash for FontDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.style.hash(state);
        self.size.to_bits().hash(state);
        self.left.hash(state);
        self.right.hash(state);
        self.top.hash(state);
        self.bottom.hash(state);
    }
}

/// Vertical metrics of one line of text at a given size.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LineMetrics {
    /// Distance from the top of the line box to the baseline.
    pub ascent: f32,
    /// Distance from the baseline to the bottom of the glyph box.
    pub descent: f32,
    /// Extra spacing between consecutive lines.
    pub leading: f32,
}

impl LineMetrics {
    /// Total line height in pixels, rounded up.
    pub fn height_px(&self) -> u32 {
        (self.ascent + self.descent + self.leading).ceil().max(0.0) as u32
    }
}

/// A loaded font face that can measure and rasterize single lines of text.
///
/// Implementations must be shareable across threads: faces live in the process-wide
/// [`crate::FontCache`].
pub trait FontFace: Send + Sync {
    /// Family name reported by the face.
    fn family_name(&self) -> &str;

    /// Line metrics at `size_px`.
    fn line_metrics(&self, size_px: f32, style: FontStyle) -> CartridgeResult<LineMetrics>;

    /// Horizontal advance of `text` laid out on one line, trailing whitespace included.
    fn advance(&self, text: &str, size_px: f32, style: FontStyle) -> CartridgeResult<f32>;

    /// Fill the glyphs of `text` into `ctx` with the current paint, baseline starting at
    /// `baseline`.
    fn fill_text(
        &self,
        ctx: &mut vello_cpu::RenderContext,
        text: &str,
        baseline: kurbo::Point,
        size_px: f32,
        style: FontStyle,
        hint: bool,
    ) -> CartridgeResult<()>;
}

/// A face resolved at a specific style and size.
#[derive(Clone)]
pub struct Font {
    face: Arc<dyn FontFace>,
    style: FontStyle,
    size: f32,
}

impl Font {
    /// Bind `face` to a style and size.
    pub fn new(face: Arc<dyn FontFace>, style: FontStyle, size: f32) -> Self {
        Self { face, style, size }
    }

    /// Size in points.
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Style bitmask.
    pub fn style(&self) -> FontStyle {
        self.style
    }

    /// Family name of the underlying face.
    pub fn family_name(&self) -> &str {
        self.face.family_name()
    }

    /// Line metrics at this size.
    pub fn metrics(&self) -> CartridgeResult<LineMetrics> {
        self.face.line_metrics(self.size, self.style)
    }

    /// Advance of `text` at this size.
    pub fn advance(&self, text: &str) -> CartridgeResult<f32> {
        self.face.advance(text, self.size, self.style)
    }

    /// Fill `text` into `ctx` at `baseline`.
    pub fn fill_text(
        &self,
        ctx: &mut vello_cpu::RenderContext,
        text: &str,
        baseline: kurbo::Point,
        hint: bool,
    ) -> CartridgeResult<()> {
        self.face
            .fill_text(ctx, text, baseline, self.size, self.style, hint)
    }
}

impl fmt::Debug for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Font")
            .field("family", &self.face.family_name())
            .field("style", &self.style)
            .field("size", &self.size)
            .finish()
    }
}

const METRICS_PROBE: &str = "Hg";

/// Outline stroke width of synthesized bold, relative to the font size.
const EMBOLDEN_RATIO: f64 = 1.0 / 24.0;

/// Outline font face shaped with Parley and rasterized with `vello_cpu` glyph runs.
pub struct OutlineFace {
    family: String,
    font_data: vello_cpu::peniko::FontData,
    engine: Mutex<TextLayoutEngine>,
}

impl OutlineFace {
    /// Load a face from raw TrueType/OpenType bytes; `index` selects the face of a collection.
    pub fn from_bytes(font_bytes: Vec<u8>, index: u32) -> CartridgeResult<Self> {
        let engine = TextLayoutEngine::new(&font_bytes)?;
        let family = engine.family_name.clone();
        let font_data =
            vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(font_bytes), index);
        Ok(Self {
            family,
            font_data,
            engine: Mutex::new(engine),
        })
    }

    fn with_layout<R>(
        &self,
        text: &str,
        size_px: f32,
        style: FontStyle,
        f: impl FnOnce(&parley::Layout<()>) -> R,
    ) -> CartridgeResult<R> {
        let mut engine = self
            .engine
            .lock()
            .map_err(|_| anyhow::anyhow!("text layout engine lock poisoned"))?;
        let layout = engine.layout_line(text, size_px, style)?;
        Ok(f(&layout))
    }
}

impl fmt::Debug for OutlineFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutlineFace")
            .field("family", &self.family)
            .finish_non_exhaustive()
    }
}

impl FontFace for OutlineFace {
    fn family_name(&self) -> &str {
        &self.family
    }

    fn line_metrics(&self, size_px: f32, style: FontStyle) -> CartridgeResult<LineMetrics> {
        self.with_layout(METRICS_PROBE, size_px, style, |layout| {
            layout.lines().next().map(|line| {
                let m = line.metrics();
                LineMetrics {
                    ascent: m.ascent,
                    descent: m.descent,
                    leading: m.leading,
                }
            })
        })?
        .ok_or_else(|| CartridgeError::content("font produced no line to measure"))
    }

    fn advance(&self, text: &str, size_px: f32, style: FontStyle) -> CartridgeResult<f32> {
        self.with_layout(text, size_px, style, |layout| layout.full_width())
    }

    fn fill_text(
        &self,
        ctx: &mut vello_cpu::RenderContext,
        text: &str,
        baseline: kurbo::Point,
        size_px: f32,
        style: FontStyle,
        hint: bool,
    ) -> CartridgeResult<()> {
        let (x0, y0) = (baseline.x as f32, baseline.y as f32);
        self.with_layout(text, size_px, style, |layout| {
            let Some(first_baseline) = layout.lines().next().map(|l| l.metrics().baseline) else {
                return;
            };
            for line in layout.lines() {
                for item in line.items() {
                    let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                        continue;
                    };
                    let glyphs: Vec<vello_cpu::Glyph> = run
                        .positioned_glyphs()
                        .map(|g| vello_cpu::Glyph {
                            id: g.id,
                            x: x0 + g.x,
                            y: y0 + (g.y - first_baseline),
                        })
                        .collect();
                    self.draw_run(ctx, run.run(), &glyphs, hint);
                }
            }
        })
    }
}

impl OutlineFace {
    /// Fill one shaped run, applying the bold and italic synthesis Parley asks for when the
    /// face lacks the requested style.
    fn draw_run(
        &self,
        ctx: &mut vello_cpu::RenderContext,
        run: &parley::layout::Run<'_, ()>,
        glyphs: &[vello_cpu::Glyph],
        hint: bool,
    ) {
        let synthesis = run.synthesis();
        let size = run.font_size();
        let coords = run.normalized_coords();
        // Outlines are y-down here, so a rightward slant is a negative x skew.
        let skew = synthesis
            .skew()
            .map(|deg| vello_cpu::kurbo::Affine::skew(-f64::from(deg).to_radians().tan(), 0.0));

        let mut fill = ctx
            .glyph_run(&self.font_data)
            .font_size(size)
            .normalized_coords(coords)
            .hint(hint);
        if let Some(t) = skew {
            fill = fill.glyph_transform(t);
        }
        fill.fill_glyphs(glyphs.iter().copied());

        if synthesis.embolden() {
            let previous = ctx.stroke().clone();
            ctx.set_stroke(vello_cpu::kurbo::Stroke::new(f64::from(size) * EMBOLDEN_RATIO));
            let mut outline = ctx
                .glyph_run(&self.font_data)
                .font_size(size)
                .normalized_coords(coords)
                .hint(hint);
            if let Some(t) = skew {
                outline = outline.glyph_transform(t);
            }
            outline.stroke_glyphs(glyphs.iter().copied());
            ctx.set_stroke(previous);
        }
    }
}

/// Parley contexts bound to a single registered family.
struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    family_name: String,
}

impl TextLayoutEngine {
    fn new(font_bytes: &[u8]) -> CartridgeResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            CartridgeError::configuration("no font families registered from font bytes")
        })?;

        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| CartridgeError::configuration("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
        })
    }

    fn layout_line(
        &mut self,
        text: &str,
        size_px: f32,
        style: FontStyle,
    ) -> CartridgeResult<parley::Layout<()>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(CartridgeError::configuration(
                "font size must be finite and > 0",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        if style.is_bold() {
            builder.push_default(parley::style::StyleProperty::FontWeight(
                parley::style::FontWeight::BOLD,
            ));
        }
        if style.is_italic() {
            builder.push_default(parley::style::StyleProperty::FontStyle(
                parley::style::FontStyle::Italic,
            ));
        }

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/font.rs"]
mod tests;
