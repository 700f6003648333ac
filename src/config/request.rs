use serde::{Deserialize, Serialize};

use crate::text::font::FontDescriptor;

/// Which cartridge fields are drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldAppearance {
    /// Session label at the top.
    #[serde(default)]
    pub session: bool,
    /// Signature text or image.
    #[serde(default)]
    pub signature: bool,
    /// Trace lines below the signature.
    #[serde(default)]
    pub trace: bool,
    /// Date label at the bottom.
    #[serde(default)]
    pub date: bool,
    /// Decorative border around session and signature.
    #[serde(default)]
    pub border: bool,
}

impl FieldAppearance {
    /// Every field and the border.
    pub const FULL: Self = Self {
        session: true,
        signature: true,
        trace: true,
        date: true,
        border: true,
    };

    /// Appearance used when a request does not say otherwise.
    pub const DEFAULT: Self = Self::FULL;

    /// Nothing at all.
    pub const NONE: Self = Self {
        session: false,
        signature: false,
        trace: false,
        date: false,
        border: false,
    };

    /// Whether the session label is drawn.
    pub fn has_session(&self) -> bool {
        self.session
    }

    /// Whether the signature is drawn.
    pub fn has_signature(&self) -> bool {
        self.signature
    }

    /// Whether the trace lines are drawn.
    pub fn has_trace(&self) -> bool {
        self.trace
    }

    /// Whether the date label is drawn.
    pub fn has_date(&self) -> bool {
        self.date
    }

    /// Whether the border is drawn.
    pub fn has_border(&self) -> bool {
        self.border
    }
}

/// Encoding of the final cartridge image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// PNG, keeps transparency.
    #[default]
    #[serde(alias = "PNG")]
    Png,
    /// JPEG; alpha is dropped.
    #[serde(alias = "jpg", alias = "JPG", alias = "JPEG")]
    Jpeg,
    /// GIF.
    #[serde(alias = "GIF")]
    Gif,
    /// Windows bitmap.
    #[serde(alias = "BMP")]
    Bmp,
    /// TIFF.
    #[serde(alias = "tif", alias = "TIFF")]
    Tiff,
}

impl OutputFormat {
    /// Matching `image` crate format.
    pub fn image_format(self) -> image::ImageFormat {
        match self {
            Self::Png => image::ImageFormat::Png,
            Self::Jpeg => image::ImageFormat::Jpeg,
            Self::Gif => image::ImageFormat::Gif,
            Self::Bmp => image::ImageFormat::Bmp,
            Self::Tiff => image::ImageFormat::Tiff,
        }
    }

    /// Lowercase file extension.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Gif => "gif",
            Self::Bmp => "bmp",
            Self::Tiff => "tiff",
        }
    }

    /// Whether the encoder keeps an alpha channel.
    pub fn supports_alpha(self) -> bool {
        !matches!(self, Self::Jpeg)
    }
}

/// Declarative description of a cartridge's look.
///
/// Requests are compared and hashed by value and serve as the key of the
/// [`crate::ConfigurationCache`]. Missing JSON fields take the [`Default`] values.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigurationRequest {
    /// Background colour of every field.
    pub background_color: String,
    /// Text colour, and the fallback for the per-field and border colours.
    pub foreground_color: String,
    /// Colour keyed out to full transparency.
    pub transparent_color: Option<String>,
    /// Border colour.
    pub border_color: Option<String>,
    /// Session label colour.
    pub session_color: Option<String>,
    /// Signature text colour.
    pub signature_color: Option<String>,
    /// Trace text colour.
    pub trace_color: Option<String>,
    /// Date label colour.
    pub date_color: Option<String>,
    /// Session label font.
    pub session_font: FontDescriptor,
    /// Signature text font.
    pub signature_font: FontDescriptor,
    /// Trace font.
    pub trace_font: FontDescriptor,
    /// Date label font.
    pub date_font: FontDescriptor,
    /// Prefix drawn before the session id.
    pub session_label: String,
    /// Prefix drawn before the date.
    pub date_label: String,
    /// Cartridge width used when the build call leaves it open.
    pub width: Option<u32>,
    /// Cartridge height used when the build call leaves it open.
    pub height: Option<u32>,
    /// Output encoding.
    pub image_format: OutputFormat,
    /// Drawn fields.
    pub appearance: FieldAppearance,
    /// Hint glyph outlines.
    pub hinting: bool,
}

impl Default for ConfigurationRequest {
    fn default() -> Self {
        Self {
            background_color: "white".to_string(),
            foreground_color: "black".to_string(),
            transparent_color: None,
            border_color: None,
            session_color: None,
            signature_color: None,
            trace_color: None,
            date_color: None,
            session_font: FontDescriptor::default(),
            signature_font: FontDescriptor::default(),
            trace_font: FontDescriptor::default(),
            date_font: FontDescriptor::default(),
            session_label: String::new(),
            date_label: String::new(),
            width: None,
            height: None,
            image_format: OutputFormat::Png,
            appearance: FieldAppearance::DEFAULT,
            hinting: true,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/request.rs"]
mod tests;
