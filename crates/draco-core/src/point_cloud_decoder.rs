use tracing::debug;

use crate::compression_config::{EncodedGeometryType, SequentialEncodingMethod, DRACO_MAGIC};
use crate::decoder_buffer::DecoderBuffer;
use crate::point_cloud::PointCloud;
use crate::sequential_attribute_decoder::decode_attributes;
use crate::status::{DracoError, Status};
use crate::version::is_supported_version;

/// Fields of the fixed-size stream header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DracoHeader {
    pub version_major: u8,
    pub version_minor: u8,
    pub geometry_type: EncodedGeometryType,
    pub method: SequentialEncodingMethod,
    pub flags: u16,
}

/// Parses and validates the header, leaving `buffer` positioned at the
/// geometry data.
pub fn decode_header(buffer: &mut DecoderBuffer) -> Result<DracoHeader, DracoError> {
    let mut magic = [0u8; 5];
    buffer
        .decode_bytes(&mut magic)
        .map_err(|_| DracoError::DracoError("Stream too short for header".to_string()))?;
    if &magic != DRACO_MAGIC {
        return Err(DracoError::DracoError("Invalid magic".to_string()));
    }

    let version_major = buffer.decode_u8()?;
    let version_minor = buffer.decode_u8()?;
    if !is_supported_version(version_major, version_minor) {
        return Err(DracoError::UnsupportedVersion(version_major, version_minor));
    }
    buffer.set_version(version_major, version_minor);

    let geometry_type = EncodedGeometryType::try_from(buffer.decode_u8()?)?;
    let method = SequentialEncodingMethod::try_from(buffer.decode_u8()?)?;
    let flags = buffer
        .decode_u16()
        .map_err(|_| DracoError::DracoError("Failed to decode flags".to_string()))?;

    Ok(DracoHeader {
        version_major,
        version_minor,
        geometry_type,
        method,
        flags,
    })
}

pub struct PointCloudDecoder {
    header: Option<DracoHeader>,
}

impl Default for PointCloudDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl PointCloudDecoder {
    pub fn new() -> Self {
        Self { header: None }
    }

    /// Header of the last decoded stream.
    pub fn header(&self) -> Option<&DracoHeader> {
        self.header.as_ref()
    }

    /// Decodes a point cloud stream. Mesh streams are rejected; use
    /// `MeshDecoder` or the `Decoder` facade for those.
    pub fn decode(&mut self, in_buffer: &mut DecoderBuffer, out_pc: &mut PointCloud) -> Status {
        let header = decode_header(in_buffer)?;
        self.header = Some(header);
        if header.geometry_type != EncodedGeometryType::PointCloud {
            return Err(DracoError::DracoError(format!(
                "Expected a point cloud stream, found {:?}",
                header.geometry_type
            )));
        }
        decode_point_cloud_data(in_buffer, header.method, out_pc)
    }
}

pub(crate) fn decode_point_cloud_data(
    in_buffer: &mut DecoderBuffer,
    method: SequentialEncodingMethod,
    pc: &mut PointCloud,
) -> Status {
    let num_points = in_buffer.decode_count(u32::MAX as usize, "point count")?;
    pc.set_num_points(num_points);
    decode_attributes(in_buffer, pc, method)?;
    debug!(num_points, num_attributes = pc.num_attributes(), "decoded point cloud");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder_buffer::EncoderBuffer;
    use crate::point_cloud_encoder::encode_header;

    #[test]
    fn test_header_fields() {
        let mut enc = EncoderBuffer::new();
        encode_header(&mut enc, EncodedGeometryType::PointCloud, SequentialEncodingMethod::Compressed, (2, 2)).unwrap();
        let mut dec = DecoderBuffer::new(enc.data());
        let header = decode_header(&mut dec).unwrap();
        assert_eq!(header.geometry_type, EncodedGeometryType::PointCloud);
        assert_eq!(header.method, SequentialEncodingMethod::Compressed);
        assert_eq!((header.version_major, header.version_minor), (2, 2));
        assert_eq!(dec.remaining_size(), 0);
    }

    #[test]
    fn test_bad_magic_and_version() {
        let mut dec = DecoderBuffer::new(b"DRACA\x02\x02\x00\x00\x00\x00");
        assert!(decode_header(&mut dec).is_err());

        let mut dec = DecoderBuffer::new(b"DRACO\x01\x03\x00\x00\x00\x00");
        assert!(matches!(decode_header(&mut dec), Err(DracoError::UnsupportedVersion(1, 3))));
    }

    #[test]
    fn test_unknown_geometry_type() {
        let mut dec = DecoderBuffer::new(b"DRACO\x02\x02\x05\x00\x00\x00");
        assert!(matches!(decode_header(&mut dec), Err(DracoError::InvalidGeometryType(5))));
    }

    #[test]
    fn test_rejects_mesh_stream() {
        let mut decoder = PointCloudDecoder::new();
        let mut dec = DecoderBuffer::new(b"DRACO\x02\x02\x01\x00\x00\x00\x00\x00\x00");
        let mut pc = PointCloud::new();
        assert!(decoder.decode(&mut dec, &mut pc).is_err());
        assert_eq!(
            decoder.header().map(|h| h.geometry_type),
            Some(EncodedGeometryType::TriangularMesh)
        );
    }
}
