/// Convenience result type used across the cartridge engine.
pub type CartridgeResult<T> = Result<T, CartridgeError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Every variant is fatal for the build that raised it: the assembler either returns a
/// complete cartridge or one of these.
#[derive(thiserror::Error, Debug)]
pub enum CartridgeError {
    /// Missing or unloadable font, unparsable colour, incomplete configuration request.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Unsupported or undecodable signature payload, or a bitmap without usable content.
    #[error("content error: {0}")]
    Content(String),

    /// Failure while encoding or writing the final image.
    #[error("i/o error: {message}")]
    Io {
        /// Human readable description of the failed step.
        message: String,
        /// Underlying cause.
        #[source]
        source: anyhow::Error,
    },

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CartridgeError {
    /// Build a [`CartridgeError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`CartridgeError::Content`] value.
    pub fn content(msg: impl Into<String>) -> Self {
        Self::Content(msg.into())
    }

    /// Build a [`CartridgeError::Io`] value carrying `source` as its cause.
    pub fn io(msg: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        Self::Io {
            message: msg.into(),
            source: source.into(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
