//! Signature cartridge rendering.
//!
//! A cartridge is one raster image recording a signing event: a session label, the signature
//! (fitted text or a cropped and scaled image), trace lines and a date label, stacked top to
//! bottom, optionally framed by a small border motif and color-keyed to transparency.
//!
//! # Pipeline overview
//!
//! 1. **Resolve**: [`ConfigurationRequest`] -> [`ResolvedConfiguration`] (colours parsed,
//!    fonts loaded; cached by request value)
//! 2. **Measure**: each label field is fitted into the remaining height by [`TextFitSolver`]
//! 3. **Signature**: text is fitted and centred, images are auto-cropped, scaled and centred
//! 4. **Composite**: fields are drawn top to bottom, the border goes on top
//! 5. **Encode**: the bitmap is written in the configured [`OutputFormat`]
//!
//! Text is shaped with `parley` and rasterized with `vello_cpu`; bitmaps are straight-alpha
//! RGBA8 ([`Bitmap`]).
//!
//! # Getting started
//!
//! Build a [`CartridgeAssembler`] over a [`FontCache`] once and call
//! [`CartridgeAssembler::build_sized`] for every [`CartridgeRequest`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod cartridge;
mod config;
mod foundation;
mod raster;
mod text;

/// Wildcard matching of field names.
pub mod matcher;


pub use crate::cartridge::assembler::{
    AUTO_CROP_TOLERANCE, CartridgeAssembler, ComposedCartridge, FieldLayout,
};
pub use crate::cartridge::encode::{FALLBACK_CONTENT_TYPE, content_type_for, encode};
pub use crate::cartridge::renderer::CartridgeRenderer;
pub use crate::cartridge::request::{
    CartridgeRequest, CartridgeResponse, ImageResource, SignatureContent, SignaturePayload,
};
pub use crate::config::cache::ConfigurationCache;
pub use crate::config::request::{ConfigurationRequest, FieldAppearance, OutputFormat};
pub use crate::config::resolved::{ResolvedConfiguration, ResolvedField};
pub use crate::foundation::color::Color;
pub use crate::foundation::error::{CartridgeError, CartridgeResult};
pub use crate::raster::Bitmap;
pub use crate::raster::border::{BorderGeometry, BorderStyle, draw_border};
pub use crate::raster::canvas::{RenderHints, render_text};
pub use crate::raster::composite::{blank_canvas, fill_rect, overlay};
pub use crate::raster::crop::{ContentBounds, MAX_PIXEL_DISTANCE, content_bounds, crop, is_foreground};
pub use crate::raster::scale::{fit_dimensions, scale};
pub use crate::raster::transparency::make_transparent;
pub use crate::text::cache::FontCache;
pub use crate::text::fit::{FieldColors, MIN_FONT_SIZE, TextFitSolver, TextRenderDetails, measure};
pub use crate::text::font::{Font, FontDescriptor, FontFace, FontStyle, LineMetrics, OutlineFace};
pub use crate::text::source::{FontDirectory, FontSource, SystemFonts, normalize_font_name};
