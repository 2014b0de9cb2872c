use tracing::{debug, warn};

use crate::attribute_quantization_transform::AttributeQuantizationTransform;
use crate::compression_config::{AttributeValueEncoding, SequentialEncodingMethod};
use crate::draco_types::DataType;
use crate::encoder_buffer::EncoderBuffer;
use crate::encoder_options::EncoderOptions;
use crate::geometry_attribute::{GeometryAttributeType, PointAttribute};
use crate::point_cloud::PointCloud;
use crate::status::{DracoError, Status};

/// Mapping stored as point index == value index.
pub const MAPPING_IDENTITY: u8 = 0;
/// Mapping stored as one value index per point.
pub const MAPPING_EXPLICIT: u8 = 1;

/// Byte width used for fixed-width index streams addressing `count` entries.
pub fn index_width(count: usize) -> usize {
    if count <= 1 << 8 {
        1
    } else if count <= 1 << 16 {
        2
    } else {
        4
    }
}

/// Writes an index stream. Raw streams use the fixed width returned by
/// [`index_width`], compressed streams store zig-zag varint deltas.
pub fn encode_indices(
    indices: &[u32],
    count: usize,
    method: SequentialEncodingMethod,
    out_buffer: &mut EncoderBuffer,
) -> Status {
    if let Some(bad) = indices.iter().find(|&&i| i as usize >= count) {
        return Err(DracoError::DracoError(format!(
            "Index {} out of range for {} entries",
            bad, count
        )));
    }
    match method {
        SequentialEncodingMethod::Raw => match index_width(count) {
            1 => indices.iter().for_each(|&i| out_buffer.encode_u8(i as u8)),
            2 => indices.iter().for_each(|&i| out_buffer.encode_u16(i as u16)),
            _ => indices.iter().for_each(|&i| out_buffer.encode_u32(i)),
        },
        SequentialEncodingMethod::Compressed => {
            let mut prev = 0i64;
            for &i in indices {
                out_buffer.encode_varint_signed(i as i64 - prev);
                prev = i as i64;
            }
        }
    }
    Ok(())
}

/// Encodes the values and the point mapping of one attribute.
pub struct SequentialAttributeEncoder {
    attribute_id: i32,
    method: SequentialEncodingMethod,
    quantization: Option<AttributeQuantizationTransform>,
}

impl SequentialAttributeEncoder {
    pub fn init(
        point_cloud: &PointCloud,
        attribute_id: i32,
        options: &EncoderOptions,
        method: SequentialEncodingMethod,
    ) -> Result<Self, DracoError> {
        if attribute_id < 0 || attribute_id >= point_cloud.num_attributes() {
            return Err(DracoError::InvalidParameter(format!("Invalid attribute id {}", attribute_id)));
        }
        let att = point_cloud.attribute(attribute_id);
        if att.attribute_type() == GeometryAttributeType::Invalid {
            return Err(DracoError::InvalidParameter(format!(
                "Attribute {} has no type",
                attribute_id
            )));
        }
        att.validate_mapping(point_cloud.num_points())?;

        let bits = options.quantization_bits(attribute_id, att.attribute_type());
        let quantization = if bits > 0 && att.data_type() == DataType::Float32 {
            let transform = AttributeQuantizationTransform::compute_parameters(att, bits)?;
            if transform.is_none() {
                warn!(attribute_id, "value extent exceeds f32, storing values unquantized");
            }
            transform
        } else {
            if bits > 0 {
                debug!(
                    attribute_id,
                    data_type = ?att.data_type(),
                    "quantization only applies to float32 attributes"
                );
            }
            None
        };

        Ok(Self {
            attribute_id,
            method,
            quantization,
        })
    }

    pub fn attribute_id(&self) -> i32 {
        self.attribute_id
    }

    pub fn value_encoding(&self) -> AttributeValueEncoding {
        if self.quantization.is_some() {
            AttributeValueEncoding::Quantized
        } else {
            AttributeValueEncoding::Generic
        }
    }

    /// Writes the attribute descriptor followed by mapping and values.
    pub fn encode(&self, point_cloud: &PointCloud, out_buffer: &mut EncoderBuffer) -> Status {
        let att = point_cloud.attribute(self.attribute_id);
        out_buffer.encode_u8(att.attribute_type() as u8);
        out_buffer.encode_u8(att.data_type() as u8);
        out_buffer.encode_u8(att.num_components());
        out_buffer.encode_u8(u8::from(att.normalized()));
        out_buffer.encode_varint(att.unique_id() as u64);
        out_buffer.encode_varint(att.size() as u64);
        out_buffer.encode_u8(self.value_encoding() as u8);

        self.encode_mapping(att, point_cloud.num_points(), out_buffer)?;
        self.encode_values(att, out_buffer)
    }

    fn encode_mapping(&self, att: &PointAttribute, num_points: usize, out_buffer: &mut EncoderBuffer) -> Status {
        if att.is_mapping_identity() {
            out_buffer.encode_u8(MAPPING_IDENTITY);
            return Ok(());
        }
        out_buffer.encode_u8(MAPPING_EXPLICIT);
        let indices: Vec<u32> = att.indices_map()[..num_points].iter().map(|avi| avi.0).collect();
        encode_indices(&indices, att.size(), self.method, out_buffer)
    }

    fn encode_values(&self, att: &PointAttribute, out_buffer: &mut EncoderBuffer) -> Status {
        let Some(transform) = &self.quantization else {
            let len = att.size() * att.byte_stride();
            let data = att
                .buffer()
                .data()
                .get(..len)
                .ok_or_else(|| DracoError::DracoError("Attribute buffer shorter than its values".into()))?;
            out_buffer.encode_data(data);
            return Ok(());
        };

        transform.encode_parameters(out_buffer);
        let quantized = transform.quantize_values(att)?;
        match self.method {
            SequentialEncodingMethod::Raw => {
                let bits = transform.quantization_bits();
                out_buffer.start_bit_encoding(quantized.len() * bits as usize, true)?;
                for q in &quantized {
                    out_buffer.encode_least_significant_bits32(bits, *q)?;
                }
                out_buffer.end_bit_encoding();
            }
            SequentialEncodingMethod::Compressed => {
                let num_components = att.num_components() as usize;
                let mut prev = vec![0i64; num_components];
                for (i, q) in quantized.iter().enumerate() {
                    let c = i % num_components;
                    out_buffer.encode_varint_signed(*q as i64 - prev[c]);
                    prev[c] = *q as i64;
                }
            }
        }
        Ok(())
    }
}

/// Writes every attribute of `point_cloud` in attribute id order.
pub fn encode_attributes(
    point_cloud: &PointCloud,
    options: &EncoderOptions,
    method: SequentialEncodingMethod,
    out_buffer: &mut EncoderBuffer,
) -> Status {
    let num_attributes = point_cloud.num_attributes();
    if num_attributes > u8::MAX as i32 {
        return Err(DracoError::UnsupportedFeature(format!(
            "{} attributes exceed the limit of 255",
            num_attributes
        )));
    }
    out_buffer.encode_u8(num_attributes as u8);
    for att_id in 0..num_attributes {
        let encoder = SequentialAttributeEncoder::init(point_cloud, att_id, options, method)?;
        debug!(
            attribute_id = att_id,
            encoding = ?encoder.value_encoding(),
            "encoding attribute"
        );
        encoder.encode(point_cloud, out_buffer)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry_indices::{AttributeValueIndex, PointIndex};

    #[test]
    fn test_index_width() {
        assert_eq!(index_width(0), 1);
        assert_eq!(index_width(256), 1);
        assert_eq!(index_width(257), 2);
        assert_eq!(index_width(70_000), 4);
    }

    #[test]
    fn test_raw_indices_layout() {
        let mut buffer = EncoderBuffer::new();
        encode_indices(&[0, 2, 1], 3, SequentialEncodingMethod::Raw, &mut buffer).unwrap();
        assert_eq!(buffer.data(), &[0, 2, 1]);
    }

    #[test]
    fn test_compressed_indices_layout() {
        let mut buffer = EncoderBuffer::new();
        encode_indices(&[3, 1, 2], 4, SequentialEncodingMethod::Compressed, &mut buffer).unwrap();
        // +3, -2, +1 zig-zag folded.
        assert_eq!(buffer.data(), &[6, 3, 2]);
    }

    #[test]
    fn test_out_of_range_index() {
        let mut buffer = EncoderBuffer::new();
        assert!(encode_indices(&[0, 5], 5, SequentialEncodingMethod::Raw, &mut buffer).is_err());
    }

    #[test]
    fn test_rejects_incomplete_mapping() {
        let mut att = PointAttribute::new();
        att.init(GeometryAttributeType::Position, 3, DataType::Float32, false, 2);
        att.set_explicit_mapping(3);
        att.set_point_map_entry(PointIndex(0), AttributeValueIndex(1));

        let mut pc = PointCloud::new();
        pc.set_num_points(3);
        pc.add_attribute(att);
        let options = EncoderOptions::new();
        assert!(SequentialAttributeEncoder::init(&pc, 0, &options, SequentialEncodingMethod::Raw).is_err());
    }
}
