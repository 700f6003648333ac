use crate::{
    config::request::{ConfigurationRequest, FieldAppearance, OutputFormat},
    foundation::{color::Color, error::CartridgeResult},
    raster::canvas::RenderHints,
    text::{
        cache::FontCache,
        fit::FieldColors,
        font::{Font, FontDescriptor},
    },
};

/// One field's font, at its base size, and text colour.
#[derive(Clone, Debug)]
pub struct ResolvedField {
    /// Descriptor as requested.
    pub descriptor: FontDescriptor,
    /// Loaded font at the descriptor's base size.
    pub font: Font,
    /// Text colour.
    pub color: Color,
}

/// A [`ConfigurationRequest`] with colours parsed and fonts loaded.
#[derive(Clone, Debug)]
pub struct ResolvedConfiguration {
    /// Background colour.
    pub background: Color,
    /// Default text colour.
    pub foreground: Color,
    /// Colour keyed out to transparency.
    pub transparent: Option<Color>,
    /// Border stroke colour.
    pub border: Color,
    /// Session label field.
    pub session: ResolvedField,
    /// Signature text field.
    pub signature: ResolvedField,
    /// Trace field.
    pub trace: ResolvedField,
    /// Date label field.
    pub date: ResolvedField,
    /// Prefix of the session line.
    pub session_label: String,
    /// Prefix of the date line.
    pub date_label: String,
    /// Default width.
    pub width: Option<u32>,
    /// Default height.
    pub height: Option<u32>,
    /// Output encoding.
    pub format: OutputFormat,
    /// Drawn fields.
    pub appearance: FieldAppearance,
    /// Text rasterizer options.
    pub hints: RenderHints,
}

impl ResolvedConfiguration {
    /// Parse every colour of `request` and load its four fonts from `fonts`.
    #[tracing::instrument(skip_all)]
    pub fn resolve(request: &ConfigurationRequest, fonts: &FontCache) -> CartridgeResult<Self> {
        let background = Color::parse(&request.background_color)?;
        let foreground = Color::parse(&request.foreground_color)?;
        let transparent = request
            .transparent_color
            .as_deref()
            .map(Color::parse)
            .transpose()?;
        let or_foreground = |c: &Option<String>| -> CartridgeResult<Color> {
            c.as_deref().map_or(Ok(foreground), Color::parse)
        };
        let field = |descriptor: &FontDescriptor,
                     color: &Option<String>|
         -> CartridgeResult<ResolvedField> {
            Ok(ResolvedField {
                descriptor: descriptor.clone(),
                font: fonts.resolve(descriptor)?,
                color: or_foreground(color)?,
            })
        };

        Ok(Self {
            background,
            foreground,
            transparent,
            border: or_foreground(&request.border_color)?,
            session: field(&request.session_font, &request.session_color)?,
            signature: field(&request.signature_font, &request.signature_color)?,
            trace: field(&request.trace_font, &request.trace_color)?,
            date: field(&request.date_font, &request.date_color)?,
            session_label: request.session_label.clone(),
            date_label: request.date_label.clone(),
            width: request.width,
            height: request.height,
            format: request.image_format,
            appearance: request.appearance,
            hints: RenderHints {
                hinting: request.hinting,
            },
        })
    }

    /// Colours a field's text block is painted with.
    pub fn colors_for(&self, field: &ResolvedField) -> FieldColors {
        FieldColors {
            background: self.background,
            transparent: self.transparent,
            foreground: field.color,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/resolved.rs"]
mod tests;
