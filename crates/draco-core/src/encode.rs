use crate::encoder_buffer::EncoderBuffer;
use crate::encoder_options::EncoderOptions;
use crate::geometry_attribute::GeometryAttributeType;
use crate::mesh::Mesh;
use crate::mesh_encoder::MeshEncoder;
use crate::point_cloud::PointCloud;
use crate::point_cloud_encoder::PointCloudEncoder;
use crate::status::Status;

/// High level encoder. Options are set per attribute type and apply to every
/// attribute of that type.
///
/// # Example
///
/// ```
/// use draco_core::{Encoder, EncoderBuffer, GeometryAttributeType, PointCloud};
///
/// let mut encoder = Encoder::new();
/// encoder.set_speed_options(5, 5);
/// encoder.set_attribute_quantization(GeometryAttributeType::Position, 11);
///
/// let mut buffer = EncoderBuffer::new();
/// encoder.encode_point_cloud_to_buffer(&PointCloud::new(), &mut buffer).unwrap();
/// assert_eq!(&buffer.data()[..5], b"DRACO");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Encoder {
    options: EncoderOptions,
}

impl Encoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn options(&self) -> &EncoderOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut EncoderOptions {
        &mut self.options
    }

    /// Speeds range from 0 (best compression) to 10 (fastest).
    pub fn set_speed_options(&mut self, encoding_speed: i32, decoding_speed: i32) {
        self.options.set_speed(encoding_speed, decoding_speed);
    }

    pub fn set_attribute_quantization(&mut self, att_type: GeometryAttributeType, quantization_bits: i32) {
        self.options
            .set_attribute_type_int(att_type, "quantization_bits", quantization_bits);
    }

    pub fn encode_point_cloud_to_buffer(&self, pc: &PointCloud, out_buffer: &mut EncoderBuffer) -> Status {
        let mut encoder = PointCloudEncoder::new();
        encoder.set_point_cloud(pc.clone());
        encoder.encode(&self.options, out_buffer)
    }

    pub fn encode_mesh_to_buffer(&self, mesh: &Mesh, out_buffer: &mut EncoderBuffer) -> Status {
        let mut encoder = MeshEncoder::new();
        encoder.set_mesh(mesh.clone());
        encoder.encode(&self.options, out_buffer)
    }
}
