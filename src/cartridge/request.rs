use std::{fmt, io::Read, path::PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::{
    config::request::ConfigurationRequest,
    foundation::error::{CartridgeError, CartridgeResult},
    raster::Bitmap,
};

/// Signature content of a cartridge request.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignaturePayload {
    /// Text, split into lines on line breaks.
    Text(String),
    /// Encoded image bytes.
    Bytes(Vec<u8>),
    /// Reader yielding encoded image bytes.
    #[serde(skip)]
    Stream(Box<dyn Read + Send>),
    /// Path of an encoded image file.
    File(PathBuf),
}

impl fmt::Debug for SignaturePayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.debug_tuple("Text").field(s).finish(),
            Self::Bytes(b) => write!(f, "Bytes({} bytes)", b.len()),
            Self::Stream(_) => f.write_str("Stream(..)"),
            Self::File(p) => f.debug_tuple("File").field(p).finish(),
        }
    }
}

/// Signature payload resolved into drawable content.
#[derive(Clone, Debug, PartialEq)]
pub enum SignatureContent {
    /// Lines of text.
    Lines(Vec<String>),
    /// Decoded bitmap.
    Image(Bitmap),
}

impl SignaturePayload {
    /// Read and decode the payload. Streams are consumed.
    pub fn resolve(&mut self) -> CartridgeResult<SignatureContent> {
        match self {
            Self::Text(s) => Ok(SignatureContent::Lines(
                s.lines().map(str::to_owned).collect(),
            )),
            Self::Bytes(bytes) => decode_image(bytes).map(SignatureContent::Image),
            Self::Stream(reader) => {
                let mut bytes = Vec::new();
                reader
                    .read_to_end(&mut bytes)
                    .context("read signature stream")
                    .map_err(|e| CartridgeError::content(format!("{e:#}")))?;
                decode_image(&bytes).map(SignatureContent::Image)
            }
            Self::File(path) => {
                let bytes = std::fs::read(&*path)
                    .with_context(|| format!("read signature file '{}'", path.display()))
                    .map_err(|e| CartridgeError::content(format!("{e:#}")))?;
                decode_image(&bytes).map(SignatureContent::Image)
            }
        }
    }
}

fn decode_image(bytes: &[u8]) -> CartridgeResult<Bitmap> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| CartridgeError::content(format!("decode signature image: {e}")))?;
    Ok(img.to_rgba8())
}

/// Everything needed to build one cartridge.
#[derive(Debug, Serialize, Deserialize)]
pub struct CartridgeRequest {
    /// Session identifier; also the stem of the output filename.
    pub session: String,
    /// Signature content. Required when the signature field is drawn.
    #[serde(default)]
    pub signature: Option<SignaturePayload>,
    /// Trace lines.
    #[serde(default)]
    pub trace: Vec<String>,
    /// Date text.
    #[serde(default)]
    pub date: String,
    /// Look of the cartridge.
    #[serde(default)]
    pub configuration: ConfigurationRequest,
}

impl CartridgeRequest {
    /// Request for `session` with default configuration and no content.
    pub fn new(session: impl Into<String>) -> Self {
        Self {
            session: session.into(),
            signature: None,
            trace: Vec::new(),
            date: String::new(),
            configuration: ConfigurationRequest::default(),
        }
    }

    /// Set the signature payload.
    pub fn with_signature(mut self, signature: SignaturePayload) -> Self {
        self.signature = Some(signature);
        self
    }

    /// Set the trace lines.
    pub fn with_trace<I, S>(mut self, trace: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.trace = trace.into_iter().map(Into::into).collect();
        self
    }

    /// Set the date text.
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    /// Replace the configuration.
    pub fn with_configuration(mut self, configuration: ConfigurationRequest) -> Self {
        self.configuration = configuration;
        self
    }
}

/// An encoded image with its filename and MIME type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageResource {
    filename: String,
    content_type: String,
    bytes: Vec<u8>,
}

impl ImageResource {
    /// Resource named `filename`, its MIME type derived from the extension.
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        let filename = filename.into();
        let content_type = crate::cartridge::encode::content_type_for(&filename);
        Self {
            filename,
            content_type,
            bytes,
        }
    }

    /// File name.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// MIME type.
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Encoded bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Encoded size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the resource holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Take the encoded bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Result of a successful build: the original request and the encoded cartridge.
#[derive(Debug)]
pub struct CartridgeResponse {
    /// Request the cartridge was built from.
    pub request: CartridgeRequest,
    /// MIME type of the resource.
    pub content_type: String,
    /// Encoded cartridge.
    pub resource: ImageResource,
}

#[cfg(test)]
#[path = "../../tests/unit/cartridge/request.rs"]
mod tests;
