//! Draco Core Library
//!
//! Geometry containers and a sequential codec for the Draco-style bitstream.
//! Attribute values and point mappings are stored in their given order, so
//! point ids and face corners survive a round trip unchanged. Only attribute
//! values are lossy, and only when quantization is requested.

#![allow(clippy::needless_range_loop)]

// =============================================================================
// Geometry
// =============================================================================

pub mod data_buffer;
pub mod draco_types;
pub mod geometry_attribute;
pub mod geometry_indices;
pub mod mesh;
pub mod point_cloud;
pub mod status;

// =============================================================================
// Bitstream
// =============================================================================

pub mod attribute_quantization_transform;
pub mod compression_config;
pub mod decoder_buffer;
pub mod encoder_buffer;
pub mod encoder_options;
pub mod quantization_utils;
pub mod version;

// =============================================================================
// Encoders and decoders
// =============================================================================

pub mod decode;
pub mod encode;
pub mod mesh_decoder;
pub mod mesh_encoder;
pub mod point_cloud_decoder;
pub mod point_cloud_encoder;
pub mod sequential_attribute_decoder;
pub mod sequential_attribute_encoder;

// =============================================================================
// Re-exports
// =============================================================================

pub use attribute_quantization_transform::AttributeQuantizationTransform;
pub use compression_config::{EncodedGeometryType, SequentialEncodingMethod};
pub use data_buffer::DataBuffer;
pub use decode::Decoder;
pub use decoder_buffer::DecoderBuffer;
pub use draco_types::{ComponentType, DataType};
pub use encode::Encoder;
pub use encoder_buffer::EncoderBuffer;
pub use encoder_options::EncoderOptions;
pub use geometry_attribute::{GeometryAttribute, GeometryAttributeType, PointAttribute};
pub use geometry_indices::{AttributeValueIndex, FaceIndex, PointIndex};
pub use mesh::{Face, Mesh};
pub use mesh_decoder::MeshDecoder;
pub use mesh_encoder::MeshEncoder;
pub use point_cloud::PointCloud;
pub use point_cloud_decoder::{DracoHeader, PointCloudDecoder};
pub use point_cloud_encoder::PointCloudEncoder;
pub use status::{DracoError, Status};
