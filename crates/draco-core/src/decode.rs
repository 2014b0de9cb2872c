use crate::compression_config::EncodedGeometryType;
use crate::decoder_buffer::DecoderBuffer;
use crate::mesh::Mesh;
use crate::mesh_decoder::decode_mesh_data;
use crate::point_cloud::PointCloud;
use crate::point_cloud_decoder::{decode_header, decode_point_cloud_data};
use crate::status::DracoError;

/// High level decoder that dispatches on the geometry type in the header.
#[derive(Debug, Clone, Copy, Default)]
pub struct Decoder;

impl Decoder {
    pub fn new() -> Self {
        Self
    }

    /// Reads the geometry type without consuming `in_buffer`.
    pub fn get_encoded_geometry_type(&self, in_buffer: &DecoderBuffer) -> Result<EncodedGeometryType, DracoError> {
        let mut peek = in_buffer.clone();
        Ok(decode_header(&mut peek)?.geometry_type)
    }

    /// Decodes a mesh stream. Point cloud streams yield a mesh without faces.
    pub fn decode_mesh_from_buffer(&self, in_buffer: &mut DecoderBuffer) -> Result<Mesh, DracoError> {
        let header = decode_header(in_buffer)?;
        let mut mesh = Mesh::new();
        match header.geometry_type {
            EncodedGeometryType::TriangularMesh => decode_mesh_data(in_buffer, header.method, &mut mesh)?,
            EncodedGeometryType::PointCloud => decode_point_cloud_data(in_buffer, header.method, &mut mesh)?,
            EncodedGeometryType::InvalidGeometryType => {
                return Err(DracoError::DracoError("Invalid geometry type".into()))
            }
        }
        Ok(mesh)
    }

    /// Decodes any stream into a point cloud. Mesh connectivity is dropped.
    pub fn decode_point_cloud_from_buffer(&self, in_buffer: &mut DecoderBuffer) -> Result<PointCloud, DracoError> {
        Ok(self.decode_mesh_from_buffer(in_buffer)?.into_point_cloud())
    }
}
