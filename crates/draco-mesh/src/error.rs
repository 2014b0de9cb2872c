use draco_core::DracoError;
use thiserror::Error;

/// Errors raised while converting meshes to and from the codec.
#[derive(Debug, Error)]
pub enum MeshCodecError {
    /// Options rejected before any codec work.
    #[error("Invalid configuration: {0}")]
    Config(String),
    /// The stream carries a geometry type tag this crate cannot handle.
    #[error("Unrecognized geometry type tag {0}")]
    GeometryType(u8),
    #[error("Codec failure: {0}")]
    Codec(#[from] DracoError),
    /// An index of the input mesh points outside its target array.
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),
}

pub type Result<T, E = MeshCodecError> = std::result::Result<T, E>;

impl MeshCodecError {
    /// Maps codec errors about the geometry tag to [`MeshCodecError::GeometryType`].
    pub(crate) fn from_decode(err: DracoError) -> Self {
        match err {
            DracoError::InvalidGeometryType(tag) => MeshCodecError::GeometryType(tag),
            other => MeshCodecError::Codec(other),
        }
    }
}
