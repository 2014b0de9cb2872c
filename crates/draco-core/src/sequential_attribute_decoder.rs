use crate::attribute_quantization_transform::{float_attribute_like, AttributeQuantizationTransform};
use crate::compression_config::{AttributeValueEncoding, SequentialEncodingMethod};
use crate::decoder_buffer::DecoderBuffer;
use crate::draco_types::DataType;
use crate::geometry_attribute::{GeometryAttributeType, PointAttribute};
use crate::geometry_indices::{AttributeValueIndex, PointIndex};
use crate::point_cloud::PointCloud;
use crate::sequential_attribute_encoder::{index_width, MAPPING_EXPLICIT, MAPPING_IDENTITY};
use crate::status::{DracoError, Status};

/// Reads `num_indices` indices addressing `count` entries. Every index is
/// checked against `count`.
pub fn decode_indices(
    in_buffer: &mut DecoderBuffer,
    num_indices: usize,
    count: usize,
    method: SequentialEncodingMethod,
) -> Result<Vec<u32>, DracoError> {
    // Each index takes at least one byte in either layout.
    if num_indices > in_buffer.remaining_size() {
        return Err(DracoError::BufferError(format!(
            "{} indices cannot fit into {} bytes",
            num_indices,
            in_buffer.remaining_size()
        )));
    }
    let mut indices = Vec::with_capacity(num_indices);
    match method {
        SequentialEncodingMethod::Raw => {
            let width = index_width(count);
            for _ in 0..num_indices {
                let index = match width {
                    1 => in_buffer.decode_u8()? as u32,
                    2 => in_buffer.decode_u16()? as u32,
                    _ => in_buffer.decode_u32()?,
                };
                indices.push(index);
            }
        }
        SequentialEncodingMethod::Compressed => {
            let mut prev = 0i64;
            for _ in 0..num_indices {
                let index = prev + in_buffer.decode_varint_signed()?;
                if index < 0 || index > u32::MAX as i64 {
                    return Err(DracoError::DracoError(format!("Decoded index {} out of range", index)));
                }
                indices.push(index as u32);
                prev = index;
            }
        }
    }
    if let Some(bad) = indices.iter().find(|&&i| i as usize >= count) {
        return Err(DracoError::DracoError(format!(
            "Index {} out of range for {} entries",
            bad, count
        )));
    }
    Ok(indices)
}

/// Decodes one attribute written by `SequentialAttributeEncoder`.
pub struct SequentialAttributeDecoder {
    method: SequentialEncodingMethod,
}

impl SequentialAttributeDecoder {
    pub fn new(method: SequentialEncodingMethod) -> Self {
        Self { method }
    }

    pub fn decode(&self, in_buffer: &mut DecoderBuffer, num_points: usize) -> Result<PointAttribute, DracoError> {
        let att_type = GeometryAttributeType::from_u8(in_buffer.decode_u8()?);
        if att_type == GeometryAttributeType::Invalid {
            return Err(DracoError::DracoError("Invalid attribute type".into()));
        }
        let data_type = DataType::from_u8(in_buffer.decode_u8()?);
        if data_type == DataType::Invalid {
            return Err(DracoError::DracoError("Invalid attribute data type".into()));
        }
        let num_components = in_buffer.decode_u8()?;
        if num_components == 0 {
            return Err(DracoError::DracoError("Attribute without components".into()));
        }
        let normalized = in_buffer.decode_u8()? != 0;
        let unique_id = in_buffer.decode_varint()?;
        let unique_id = u32::try_from(unique_id)
            .map_err(|_| DracoError::DracoError(format!("Invalid unique id {}", unique_id)))?;
        let num_values = in_buffer.decode_count(u32::MAX as usize, "attribute value count")?;
        let encoding = AttributeValueEncoding::try_from(in_buffer.decode_u8()?)?;
        let max_values = self.max_values(in_buffer.remaining_size(), encoding, data_type, num_components);
        if num_values > max_values {
            return Err(DracoError::BufferError(format!(
                "{} attribute values cannot fit into {} bytes",
                num_values,
                in_buffer.remaining_size()
            )));
        }

        let mut att = PointAttribute::new();
        att.init(att_type, num_components, data_type, normalized, num_values);
        att.set_unique_id(unique_id);

        self.decode_mapping(in_buffer, &mut att, num_points)?;
        match encoding {
            AttributeValueEncoding::Generic => {
                let len = num_values * att.byte_stride();
                let data = in_buffer.decode_slice(len)?;
                att.buffer_mut().write(0, data);
            }
            AttributeValueEncoding::Quantized => {
                if data_type != DataType::Float32 {
                    return Err(DracoError::DracoError(format!(
                        "Quantized attribute with data type {:?}",
                        data_type
                    )));
                }
                self.decode_quantized_values(in_buffer, &mut att)?;
            }
        }
        att.validate_mapping(num_points)?;
        Ok(att)
    }

    /// Largest value count whose payload fits into `remaining` bytes. Generic
    /// values take their full stride; quantized values take at least one bit
    /// (raw) or one byte (compressed) per component.
    fn max_values(
        &self,
        remaining: usize,
        encoding: AttributeValueEncoding,
        data_type: DataType,
        num_components: u8,
    ) -> usize {
        let num_components = num_components as usize;
        match encoding {
            AttributeValueEncoding::Generic => remaining / (num_components * data_type.byte_length()),
            AttributeValueEncoding::Quantized => match self.method {
                SequentialEncodingMethod::Raw => remaining.saturating_mul(8) / num_components,
                SequentialEncodingMethod::Compressed => remaining / num_components,
            },
        }
    }

    fn decode_mapping(&self, in_buffer: &mut DecoderBuffer, att: &mut PointAttribute, num_points: usize) -> Status {
        match in_buffer.decode_u8()? {
            MAPPING_IDENTITY => Ok(()),
            MAPPING_EXPLICIT => {
                let indices = decode_indices(in_buffer, num_points, att.size(), self.method)?;
                att.set_explicit_mapping(num_points);
                for (point, index) in indices.into_iter().enumerate() {
                    att.set_point_map_entry(PointIndex(point as u32), AttributeValueIndex(index));
                }
                Ok(())
            }
            other => Err(DracoError::DracoError(format!("Unknown mapping kind {}", other))),
        }
    }

    fn decode_quantized_values(&self, in_buffer: &mut DecoderBuffer, att: &mut PointAttribute) -> Status {
        let num_components = att.num_components() as usize;
        let transform = AttributeQuantizationTransform::decode_parameters(in_buffer, num_components)?;
        let total = att.size() * num_components;
        let mut quantized = Vec::with_capacity(total.min(in_buffer.remaining_size() * 8));

        match self.method {
            SequentialEncodingMethod::Raw => {
                let bits = transform.quantization_bits() as u32;
                in_buffer.start_bit_decoding(true)?;
                for _ in 0..total {
                    match in_buffer.decode_least_significant_bits32(bits) {
                        Ok(q) => quantized.push(q),
                        Err(err) => {
                            in_buffer.end_bit_decoding();
                            return Err(err);
                        }
                    }
                }
                in_buffer.end_bit_decoding();
            }
            SequentialEncodingMethod::Compressed => {
                let mut prev = vec![0i64; num_components];
                for i in 0..total {
                    let c = i % num_components;
                    let q = prev[c] + in_buffer.decode_varint_signed()?;
                    if q < 0 || q > u32::MAX as i64 {
                        return Err(DracoError::DracoError(format!("Quantized value {} out of range", q)));
                    }
                    quantized.push(q as u32);
                    prev[c] = q;
                }
            }
        }

        let mut restored = float_attribute_like(att, att.size());
        transform.dequantize_values(&quantized, &mut restored)?;
        *att.buffer_mut() = restored.buffer().clone();
        Ok(())
    }
}

/// Reads the attribute block into `point_cloud`, whose point count must
/// already be set.
pub fn decode_attributes(
    in_buffer: &mut DecoderBuffer,
    point_cloud: &mut PointCloud,
    method: SequentialEncodingMethod,
) -> Status {
    let num_attributes = in_buffer.decode_u8()?;
    let num_points = point_cloud.num_points();
    let decoder = SequentialAttributeDecoder::new(method);
    for _ in 0..num_attributes {
        let att = decoder.decode(in_buffer, num_points)?;
        let unique_id = att.unique_id();
        let att_id = point_cloud.add_attribute(att);
        point_cloud.attribute_mut(att_id).set_unique_id(unique_id);
    }
    Ok(())
}
