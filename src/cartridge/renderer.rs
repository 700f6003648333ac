use crate::{
    cartridge::{
        assembler::CartridgeAssembler,
        request::{CartridgeRequest, ImageResource},
    },
    foundation::error::CartridgeResult,
};

/// A cartridge request bound to the assembler that will render it.
#[derive(Debug)]
pub struct CartridgeRenderer<'a> {
    assembler: &'a CartridgeAssembler,
    request: CartridgeRequest,
}

impl<'a> CartridgeRenderer<'a> {
    /// Bind `request` to `assembler`.
    pub fn new(assembler: &'a CartridgeAssembler, request: CartridgeRequest) -> Self {
        Self { assembler, request }
    }

    /// Request to be rendered.
    pub fn request(&self) -> &CartridgeRequest {
        &self.request
    }

    /// Render at `width` x `height` and return the named image.
    pub fn render(self, width: u32, height: u32) -> CartridgeResult<ImageResource> {
        self.assembler
            .build_sized(self.request, Some(width), Some(height))
            .map(|response| response.resource)
    }
}

impl CartridgeAssembler {
    /// Renderer for `request` backed by this assembler.
    pub fn renderer(&self, request: CartridgeRequest) -> CartridgeRenderer<'_> {
        CartridgeRenderer::new(self, request)
    }
}
