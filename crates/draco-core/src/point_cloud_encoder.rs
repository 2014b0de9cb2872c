use tracing::debug;

use crate::compression_config::{EncodedGeometryType, SequentialEncodingMethod, DRACO_MAGIC};
use crate::encoder_buffer::EncoderBuffer;
use crate::encoder_options::EncoderOptions;
use crate::point_cloud::PointCloud;
use crate::sequential_attribute_encoder::encode_attributes;
use crate::status::{DracoError, Status};
use crate::version::DEFAULT_POINT_CLOUD_VERSION;

/// Writes the stream header: magic, version, geometry type, method and flags.
pub fn encode_header(
    buffer: &mut EncoderBuffer,
    geometry_type: EncodedGeometryType,
    method: SequentialEncodingMethod,
    version: (u8, u8),
) -> Status {
    let tag = geometry_type
        .tag()
        .ok_or_else(|| DracoError::DracoError("Cannot encode invalid geometry type".into()))?;
    buffer.encode_data(DRACO_MAGIC);
    buffer.encode_u8(version.0);
    buffer.encode_u8(version.1);
    buffer.set_version(version.0, version.1);
    buffer.encode_u8(tag);
    buffer.encode_u8(method as u8);
    buffer.encode_u16(0); // Flags
    Ok(())
}

pub struct PointCloudEncoder {
    point_cloud: Option<PointCloud>,
    options: EncoderOptions,
}

impl Default for PointCloudEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl PointCloudEncoder {
    pub fn new() -> Self {
        Self {
            point_cloud: None,
            options: EncoderOptions::default(),
        }
    }

    pub fn point_cloud(&self) -> Option<&PointCloud> {
        self.point_cloud.as_ref()
    }

    pub fn set_point_cloud(&mut self, pc: PointCloud) {
        self.point_cloud = Some(pc);
    }

    pub fn get_geometry_type(&self) -> EncodedGeometryType {
        EncodedGeometryType::PointCloud
    }

    pub fn encode(&mut self, options: &EncoderOptions, out_buffer: &mut EncoderBuffer) -> Status {
        self.options = options.clone();
        let pc = self
            .point_cloud
            .as_ref()
            .ok_or_else(|| DracoError::DracoError("Point cloud not set".to_string()))?;
        pc.validate_attributes()?;

        let method = SequentialEncodingMethod::for_speeds(
            self.options.get_encoding_speed(),
            self.options.get_decoding_speed(),
        );
        debug!(
            ?method,
            num_points = pc.num_points(),
            num_attributes = pc.num_attributes(),
            "encoding point cloud"
        );

        encode_header(out_buffer, self.get_geometry_type(), method, DEFAULT_POINT_CLOUD_VERSION)?;
        out_buffer.encode_varint(pc.num_points() as u64);
        encode_attributes(pc, &self.options, method, out_buffer)
    }
}
