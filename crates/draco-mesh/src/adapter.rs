use draco_core::{Decoder, DecoderBuffer, EncodedGeometryType, Encoder, EncoderBuffer};
use tracing::{debug, warn};

use crate::capabilities::AttributeKind;
use crate::corner_point_set::CornerPointSet;
use crate::error::{MeshCodecError, Result};
use crate::options::Options;

/// Drives the codec with a [`CornerPointSet`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CodecAdapter;

impl CodecAdapter {
    pub fn new() -> Self {
        Self
    }

    /// Encodes `points` with the given options.
    ///
    /// Kinds whose quantization bits are negative are removed first. Point
    /// sets with a face table go through the mesh encoder, all others through
    /// the point cloud encoder.
    pub fn encode(&self, mut points: CornerPointSet, options: &Options) -> Result<Vec<u8>> {
        options.validate()?;
        for kind in options.deleted_kinds().iter() {
            if points.delete_attribute(kind) {
                warn!(%kind, "attribute deleted by negative quantization bits");
            }
        }

        let mut encoder = Encoder::new();
        let speed = options.speed();
        encoder.set_speed_options(speed, speed);
        for kind in AttributeKind::ALL {
            let bits = options.quantization_bits(kind);
            if bits > 0 {
                encoder.set_attribute_quantization(kind.geometry_type(), bits);
            }
        }

        let mut buffer = EncoderBuffer::new();
        if points.face_table().is_empty() {
            encoder.encode_point_cloud_to_buffer(points.as_mesh().point_cloud(), &mut buffer)?;
        } else {
            encoder.encode_mesh_to_buffer(points.as_mesh(), &mut buffer)?;
        }
        debug!(
            bytes = buffer.size(),
            num_points = points.num_points(),
            num_faces = points.num_faces(),
            speed,
            "encoded corner point set"
        );
        Ok(buffer.into_data())
    }

    /// Decodes `data` and reports which geometry type the stream carried.
    pub fn decode(&self, data: &[u8]) -> Result<(CornerPointSet, EncodedGeometryType)> {
        let mut buffer = DecoderBuffer::new(data);
        let decoder = Decoder::new();
        let geometry_type = decoder
            .get_encoded_geometry_type(&buffer)
            .map_err(MeshCodecError::from_decode)?;
        let mesh = decoder
            .decode_mesh_from_buffer(&mut buffer)
            .map_err(MeshCodecError::from_decode)?;
        debug!(
            ?geometry_type,
            num_points = mesh.num_points(),
            num_faces = mesh.num_faces(),
            "decoded corner point set"
        );
        Ok((CornerPointSet::from_mesh(mesh)?, geometry_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::AttributeSetBuilder;
    use crate::shared_mesh::SharedMesh;

    fn triangle() -> SharedMesh {
        SharedMesh::from_positions(vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]])
            .with_faces(vec![[0, 1, 2]])
            .with_uvs(vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]], vec![[0, 1, 2]])
    }

    #[test]
    fn test_dispatch_on_face_table() {
        let adapter = CodecAdapter::new();
        let built = AttributeSetBuilder::new().build(&triangle()).unwrap();
        let bytes = adapter.encode(built.points, &Options::default()).unwrap();
        let (points, geometry_type) = adapter.decode(&bytes).unwrap();
        assert_eq!(geometry_type, EncodedGeometryType::TriangularMesh);
        assert_eq!(points.num_faces(), 1);

        let cloud = SharedMesh::from_positions(vec![[1.0, 2.0, 3.0]]);
        let built = AttributeSetBuilder::new().build(&cloud).unwrap();
        let bytes = adapter.encode(built.points, &Options::default()).unwrap();
        let (points, geometry_type) = adapter.decode(&bytes).unwrap();
        assert_eq!(geometry_type, EncodedGeometryType::PointCloud);
        assert!(points.face_table().is_empty());
    }

    #[test]
    fn test_negative_bits_delete_attribute() {
        let adapter = CodecAdapter::new();
        let built = AttributeSetBuilder::new().build(&triangle()).unwrap();
        let options = Options::default().with_tex_coords_quantization_bits(-1);
        let bytes = adapter.encode(built.points, &options).unwrap();
        let (points, _) = adapter.decode(&bytes).unwrap();
        assert!(points.attribute(AttributeKind::TexCoord).is_none());
        assert!(points.attribute(AttributeKind::Position).is_some());
    }

    #[test]
    fn test_config_checked_before_encoding() {
        let built = AttributeSetBuilder::new().build(&triangle()).unwrap();
        let options = Options::default().with_pos_quantization_bits(-2);
        assert!(matches!(
            CodecAdapter::new().encode(built.points, &options),
            Err(MeshCodecError::Config(_))
        ));
    }

    #[test]
    fn test_unknown_geometry_tag() {
        let built = AttributeSetBuilder::new().build(&triangle()).unwrap();
        let mut bytes = CodecAdapter::new().encode(built.points, &Options::default()).unwrap();
        bytes[7] = 9;
        assert!(matches!(
            CodecAdapter::new().decode(&bytes),
            Err(MeshCodecError::GeometryType(9))
        ));
    }

    #[test]
    fn test_garbage_is_codec_error() {
        assert!(matches!(
            CodecAdapter::new().decode(b"NOTDRACO"),
            Err(MeshCodecError::Codec(_))
        ));
    }
}
