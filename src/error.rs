use thiserror::Error;

#[derive(Debug, Error)]
pub enum SigError {
    #[error("DOM not available")]
    DomUnavailable,
    #[error("Element not found: {0}")]
    ElementNotFound(String),
    #[error("Canvas context unavailable")]
    NoContext2d,
    #[error("Operation failed: {0}")]
    OpFailed(String),
    #[error("Signature is empty")]
    Empty,
    #[error("Invalid surface size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
    #[error("PNG encoding failed: {0}")]
    Encode(String),
    #[error("Not a PNG data URL")]
    InvalidDataUrl,
    #[error(transparent)]
    Base64(#[from] base64::DecodeError)
}
