use thiserror::Error;

/// Errors produced while encoding a mesh into the Quantized Mesh wire format.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    #[error("invalid extension: {0}")]
    InvalidExtension(&'static str),

    #[error("numeric failure: {0}")]
    NumericFailure(&'static str),

    #[error("write failed")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EncodeError>;
