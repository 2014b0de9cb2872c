use tracing::debug;

use crate::compression_config::{EncodedGeometryType, SequentialEncodingMethod};
use crate::encoder_buffer::EncoderBuffer;
use crate::encoder_options::EncoderOptions;
use crate::mesh::Mesh;
use crate::point_cloud_encoder::encode_header;
use crate::sequential_attribute_encoder::{encode_attributes, encode_indices};
use crate::status::{DracoError, Status};
use crate::version::DEFAULT_MESH_VERSION;

/// Sequential mesh encoder. Faces are written corner by corner in their
/// original order, so point ids survive the round trip unchanged.
pub struct MeshEncoder {
    mesh: Option<Mesh>,
    options: EncoderOptions,
    num_encoded_faces: usize,
}

impl Default for MeshEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl MeshEncoder {
    pub fn new() -> Self {
        Self {
            mesh: None,
            options: EncoderOptions::default(),
            num_encoded_faces: 0,
        }
    }

    pub fn set_mesh(&mut self, mesh: Mesh) {
        self.mesh = Some(mesh);
    }

    pub fn mesh(&self) -> Option<&Mesh> {
        self.mesh.as_ref()
    }

    pub fn num_encoded_faces(&self) -> usize {
        self.num_encoded_faces
    }

    pub fn get_geometry_type(&self) -> EncodedGeometryType {
        EncodedGeometryType::TriangularMesh
    }

    pub fn encode(&mut self, options: &EncoderOptions, out_buffer: &mut EncoderBuffer) -> Status {
        self.options = options.clone();
        let mesh = self
            .mesh
            .as_ref()
            .ok_or_else(|| DracoError::DracoError("Mesh not set".to_string()))?;
        mesh.validate_faces()?;
        mesh.validate_attributes()?;

        let method = SequentialEncodingMethod::for_speeds(
            self.options.get_encoding_speed(),
            self.options.get_decoding_speed(),
        );
        debug!(
            ?method,
            num_faces = mesh.num_faces(),
            num_points = mesh.num_points(),
            "encoding mesh"
        );

        encode_header(out_buffer, self.get_geometry_type(), method, DEFAULT_MESH_VERSION)?;
        out_buffer.encode_varint(mesh.num_faces() as u64);
        out_buffer.encode_varint(mesh.num_points() as u64);
        Self::encode_connectivity(mesh, method, out_buffer)?;
        encode_attributes(mesh, &self.options, method, out_buffer)?;

        self.num_encoded_faces = mesh.num_faces();
        Ok(())
    }

    fn encode_connectivity(mesh: &Mesh, method: SequentialEncodingMethod, out_buffer: &mut EncoderBuffer) -> Status {
        let corners: Vec<u32> = mesh.faces().iter().flat_map(|face| face.iter().map(|p| p.0)).collect();
        encode_indices(&corners, mesh.num_points(), method, out_buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry_indices::PointIndex;

    #[test]
    fn test_rejects_dangling_face() {
        let mut mesh = Mesh::new();
        mesh.set_num_points(2);
        mesh.add_face([PointIndex(0), PointIndex(1), PointIndex(2)]);
        let mut encoder = MeshEncoder::new();
        encoder.set_mesh(mesh);
        let mut buffer = EncoderBuffer::new();
        assert!(encoder.encode(&EncoderOptions::new(), &mut buffer).is_err());
        assert_eq!(encoder.num_encoded_faces(), 0);
    }

    #[test]
    fn test_raw_connectivity_layout() {
        let mut mesh = Mesh::new();
        mesh.set_num_points(4);
        mesh.add_face([PointIndex(0), PointIndex(1), PointIndex(2)]);
        mesh.add_face([PointIndex(0), PointIndex(2), PointIndex(3)]);
        let mut encoder = MeshEncoder::new();
        encoder.set_mesh(mesh);

        let mut options = EncoderOptions::new();
        options.set_speed(10, 10);
        let mut buffer = EncoderBuffer::new();
        encoder.encode(&options, &mut buffer).unwrap();

        assert_eq!(encoder.num_encoded_faces(), 2);
        // Header (11), face count, point count, six u8 corners, attribute count.
        assert_eq!(&buffer.data()[11..], &[2, 4, 0, 1, 2, 0, 2, 3, 0]);
    }
}
