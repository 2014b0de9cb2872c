use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DracoError {
    #[error("General error: {0}")]
    DracoError(String),
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("Unsupported version: {0}.{1}")]
    UnsupportedVersion(u8, u8),
    #[error("Unsupported feature: {0}")]
    UnsupportedFeature(String),
    #[error("Invalid geometry type: {0}")]
    InvalidGeometryType(u8),
    #[error("Buffer decode error: {0}")]
    BufferError(String),
}

pub type Status = Result<(), DracoError>;

pub fn ok_status() -> Status {
    Ok(())
}

pub fn error_status(msg: impl Into<String>) -> DracoError {
    DracoError::DracoError(msg.into())
}
