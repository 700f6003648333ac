use crate::{
    cartridge::{
        encode::encode,
        request::{CartridgeRequest, CartridgeResponse, ImageResource, SignatureContent},
    },
    config::{
        cache::ConfigurationCache,
        request::OutputFormat,
        resolved::{ResolvedConfiguration, ResolvedField},
    },
    foundation::{
        error::{CartridgeError, CartridgeResult},
        math::center_offset,
    },
    raster::{
        Bitmap,
        border::{BorderStyle, draw_border},
        canvas::render_text,
        composite::{blank_canvas, overlay},
        crop::crop,
        scale::scale,
        transparency::make_transparent,
    },
    text::{
        cache::FontCache,
        fit::{TextFitSolver, TextRenderDetails},
    },
};

/// Tolerance, in percent of the maximum pixel distance, used to crop signature images.
pub const AUTO_CROP_TOLERANCE: f64 = 5.0;

/// Heights of the four stacked fields of a composed cartridge; disabled fields are 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FieldLayout {
    /// Session label height.
    pub session: u32,
    /// Signature region height.
    pub signature: u32,
    /// Trace block height.
    pub trace: u32,
    /// Date label height.
    pub date: u32,
}

impl FieldLayout {
    /// Sum of all field heights, saturating at `u32::MAX`.
    pub fn total(&self) -> u32 {
        self.checked_total().unwrap_or(u32::MAX)
    }

    /// Sum of all field heights, `None` on overflow.
    pub fn checked_total(&self) -> Option<u32> {
        self.session
            .checked_add(self.signature)?
            .checked_add(self.trace)?
            .checked_add(self.date)
    }
}

/// A composed, not yet encoded cartridge.
#[derive(Clone, Debug)]
pub struct ComposedCartridge {
    /// Final bitmap.
    pub bitmap: Bitmap,
    /// Field heights, top to bottom.
    pub layout: FieldLayout,
    /// Encoding the configuration asks for.
    pub format: OutputFormat,
}

struct TextField {
    lines: Vec<String>,
    details: TextRenderDetails,
}

/// Builds signature cartridges.
///
/// Owns the font and configuration caches, both shared by every build on every thread.
/// Fields are stacked top to bottom as session, signature, trace and date.
#[derive(Debug)]
pub struct CartridgeAssembler {
    fonts: FontCache,
    configurations: ConfigurationCache,
    border: BorderStyle,
}

impl CartridgeAssembler {
    /// Assembler resolving fonts through `fonts`.
    pub fn new(fonts: FontCache) -> Self {
        Self {
            fonts,
            configurations: ConfigurationCache::new(),
            border: BorderStyle::default(),
        }
    }

    /// Replace the border dimensions.
    pub fn with_border_style(mut self, border: BorderStyle) -> Self {
        self.border = border;
        self
    }

    /// Font cache.
    pub fn fonts(&self) -> &FontCache {
        &self.fonts
    }

    /// Configuration cache.
    pub fn configurations(&self) -> &ConfigurationCache {
        &self.configurations
    }

    /// Build using the width and height of the request's configuration.
    pub fn build(&self, request: CartridgeRequest) -> CartridgeResult<CartridgeResponse> {
        self.build_sized(request, None, None)
    }

    /// Build with `width`/`height` overriding the configured size.
    #[tracing::instrument(skip(self, request), fields(session = %request.session))]
    pub fn build_sized(
        &self,
        mut request: CartridgeRequest,
        width: Option<u32>,
        height: Option<u32>,
    ) -> CartridgeResult<CartridgeResponse> {
        let composed = self.compose(&mut request, width, height)?;
        let bytes = encode(&composed.bitmap, composed.format)?;
        let filename = format!("{}.{}", request.session, composed.format.extension());
        let resource = ImageResource::new(filename, bytes);
        tracing::debug!(
            filename = resource.filename(),
            bytes = resource.len(),
            width = composed.bitmap.width(),
            height = composed.bitmap.height(),
            "built cartridge"
        );

        Ok(CartridgeResponse {
            content_type: resource.content_type().to_string(),
            request,
            resource,
        })
    }

    /// Run every pipeline stage except encoding.
    ///
    /// The signature payload of `request` is consumed when it is a stream.
    pub fn compose(
        &self,
        request: &mut CartridgeRequest,
        width: Option<u32>,
        height: Option<u32>,
    ) -> CartridgeResult<ComposedCartridge> {
        let config = self
            .configurations
            .get_or_resolve(&request.configuration, &self.fonts)?;
        let width = width.or(config.width).ok_or_else(|| {
            CartridgeError::configuration("cartridge width is neither given nor configured")
        })?;
        let height = height.or(config.height).ok_or_else(|| {
            CartridgeError::configuration("cartridge height is neither given nor configured")
        })?;
        if width == 0 || height == 0 || rgba_len(width, height).is_none() {
            return Err(CartridgeError::configuration(format!(
                "cartridge size must be non-zero and addressable, got {width}x{height}"
            )));
        }

        let appearance = config.appearance;
        let mut consumed = 0u32;
        let mut measure_label = |enabled: bool,
                                 field: &ResolvedField,
                                 lines: Vec<String>|
         -> CartridgeResult<Option<TextField>> {
            if !enabled {
                return Ok(None);
            }
            let details = TextFitSolver::new(&self.fonts).fit(
                &lines,
                &field.descriptor,
                config.colors_for(field),
                Some(width),
                Some(height.saturating_sub(consumed)),
            )?;
            consumed = consumed.saturating_add(details.height);
            Ok(Some(TextField { lines, details }))
        };

        let session = measure_label(
            appearance.has_session(),
            &config.session,
            vec![format!("{}{}", config.session_label, request.session)],
        )?;
        let trace = measure_label(appearance.has_trace(), &config.trace, request.trace.clone())?;
        let date = measure_label(
            appearance.has_date(),
            &config.date,
            vec![format!("{}{}", config.date_label, request.date)],
        )?;

        let budget = height.saturating_sub(consumed);
        let signature = if appearance.has_signature() {
            Some(self.signature_field(request, &config, width, budget)?)
        } else {
            None
        };

        let layout = FieldLayout {
            session: field_height(&session),
            signature: signature.as_ref().map_or(0, Bitmap::height),
            trace: field_height(&trace),
            date: field_height(&date),
        };
        let total = layout
            .checked_total()
            .filter(|&h| rgba_len(width, h).is_some())
            .ok_or_else(|| {
                CartridgeError::configuration(format!("cartridge size overflows: {layout:?}"))
            })?;
        if total == 0 {
            return Err(CartridgeError::configuration(
                "cartridge appearance enables no field",
            ));
        }

        let mut bitmap = blank_canvas(width, total, config.background, config.transparent);
        let mut y = 0;
        if let Some(f) = &session {
            render_text(&mut bitmap, &f.lines, 0, y, &f.details, config.hints)?;
        }
        y += layout.session;
        if let Some(sig) = &signature {
            overlay(&mut bitmap, sig, 0, y);
        }
        y += layout.signature;
        if let Some(f) = &trace {
            render_text(&mut bitmap, &f.lines, 0, y, &f.details, config.hints)?;
        }
        y += layout.trace;
        if let Some(f) = &date {
            render_text(&mut bitmap, &f.lines, 0, y, &f.details, config.hints)?;
        }

        if appearance.has_border() {
            let geometry = self.border.geometry(
                width,
                config.session.descriptor.left,
                layout.session,
                layout.signature,
            );
            draw_border(&mut bitmap, &geometry, &self.border, config.border)?;
        }

        if let Some(key) = config.transparent {
            bitmap = make_transparent(&bitmap, key);
        }

        Ok(ComposedCartridge {
            bitmap,
            layout,
            format: config.format,
        })
    }

    fn signature_field(
        &self,
        request: &mut CartridgeRequest,
        config: &ResolvedConfiguration,
        width: u32,
        budget: u32,
    ) -> CartridgeResult<Bitmap> {
        let payload = request.signature.as_mut().ok_or_else(|| {
            CartridgeError::content("signature field is enabled but the request has no signature")
        })?;
        let content = payload.resolve()?;

        if budget == 0 {
            tracing::warn!(width, "no height left for the signature field");
            return Ok(Bitmap::new(width, 0));
        }

        let mut field = blank_canvas(width, budget, config.background, config.transparent);
        match content {
            SignatureContent::Lines(lines) => {
                let details = TextFitSolver::new(&self.fonts).fit(
                    &lines,
                    &config.signature.descriptor,
                    config.colors_for(&config.signature),
                    Some(width),
                    Some(budget),
                )?;
                render_text(
                    &mut field,
                    &lines,
                    center_offset(width, details.width),
                    center_offset(budget, details.height),
                    &details,
                    config.hints,
                )?;
            }
            SignatureContent::Image(image) => {
                let cropped = crop(&image, Some(config.background), AUTO_CROP_TOLERANCE)?;
                let fitted = if cropped.width() > width || cropped.height() > budget {
                    scale(cropped, Some(width), Some(budget))
                } else {
                    cropped
                };
                overlay(
                    &mut field,
                    &fitted,
                    center_offset(width, fitted.width()),
                    center_offset(budget, fitted.height()),
                );
            }
        }
        Ok(field)
    }
}

fn rgba_len(width: u32, height: u32) -> Option<usize> {
    usize::try_from(width)
        .ok()?
        .checked_mul(usize::try_from(height).ok()?)?
        .checked_mul(4)
}

fn field_height(field: &Option<TextField>) -> u32 {
    field.as_ref().map_or(0, |f| f.details.height)
}

#[cfg(test)]
#[path = "../../tests/unit/cartridge/assembler.rs"]
mod tests;
