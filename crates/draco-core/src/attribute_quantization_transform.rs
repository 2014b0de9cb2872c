use crate::decoder_buffer::DecoderBuffer;
use crate::draco_types::DataType;
use crate::encoder_buffer::EncoderBuffer;
use crate::geometry_attribute::PointAttribute;
use crate::geometry_indices::AttributeValueIndex;
use crate::quantization_utils::{max_quantized_value, Dequantizer, Quantizer};
use crate::status::{DracoError, Status};

/// Valid quantization bit counts.
pub const QUANTIZATION_BITS_RANGE: std::ops::RangeInclusive<i32> = 1..=30;

/// Uniform quantization of a float attribute over its bounding box.
///
/// All components share one range (the largest extent of the box) so the
/// quantization step is the same along every axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeQuantizationTransform {
    quantization_bits: u8,
    min_values: Vec<f32>,
    range: f32,
}

impl AttributeQuantizationTransform {
    pub fn quantization_bits(&self) -> u8 {
        self.quantization_bits
    }

    pub fn min_values(&self) -> &[f32] {
        &self.min_values
    }

    pub fn range(&self) -> f32 {
        self.range
    }

    pub fn set_parameters(quantization_bits: i32, min_values: &[f32], range: f32) -> Result<Self, DracoError> {
        if !QUANTIZATION_BITS_RANGE.contains(&quantization_bits) {
            return Err(DracoError::InvalidParameter(format!(
                "Quantization bits {} outside 1..=30",
                quantization_bits
            )));
        }
        if !range.is_finite() || range < 0.0 {
            return Err(DracoError::InvalidParameter(format!("Invalid quantization range {}", range)));
        }
        Ok(Self {
            quantization_bits: quantization_bits as u8,
            min_values: min_values.to_vec(),
            range,
        })
    }

    /// Computes the bounding box of every stored value of `attribute`.
    ///
    /// Returns `None` when the largest extent is finite in `f64` but does not
    /// fit the `f32` range stored in the stream.
    pub fn compute_parameters(attribute: &PointAttribute, quantization_bits: i32) -> Result<Option<Self>, DracoError> {
        if !attribute.data_type().is_float() {
            return Err(DracoError::InvalidParameter(format!(
                "Cannot quantize attribute of type {:?}",
                attribute.data_type()
            )));
        }
        let num_components = attribute.num_components() as usize;
        let mut min_values = vec![f32::MAX; num_components];
        let mut max_values = vec![f32::MIN; num_components];

        for i in 0..attribute.size() {
            let value = read_floats(attribute, i)?;
            for (c, v) in value.iter().enumerate() {
                if !v.is_finite() {
                    return Err(DracoError::InvalidParameter(format!(
                        "Non-finite component in value {}",
                        i
                    )));
                }
                min_values[c] = min_values[c].min(*v);
                max_values[c] = max_values[c].max(*v);
            }
        }
        if attribute.is_empty() {
            min_values.iter_mut().for_each(|m| *m = 0.0);
            max_values.iter_mut().for_each(|m| *m = 0.0);
        }

        let range = min_values
            .iter()
            .zip(&max_values)
            .map(|(lo, hi)| f64::from(*hi) - f64::from(*lo))
            .fold(0.0f64, f64::max);
        if range > f64::from(f32::MAX) {
            return Ok(None);
        }
        let range = if range == 0.0 { 1.0 } else { range as f32 };

        Self::set_parameters(quantization_bits, &min_values, range).map(Some)
    }

    /// Quantizes every stored value, component-major within a value.
    pub fn quantize_values(&self, attribute: &PointAttribute) -> Result<Vec<u32>, DracoError> {
        let max_value = max_quantized_value(self.quantization_bits);
        let mut quantizer = Quantizer::new();
        quantizer.init(self.range, max_value);

        let mut out = Vec::with_capacity(attribute.size() * self.min_values.len());
        for i in 0..attribute.size() {
            for (c, v) in read_floats(attribute, i)?.iter().enumerate() {
                let q = quantizer.quantize_float(v - self.min_values[c]);
                out.push(q.clamp(0, max_value as i32) as u32);
            }
        }
        Ok(out)
    }

    /// Fills `target` (a float attribute with room for the values) with the
    /// dequantized `values`.
    pub fn dequantize_values(&self, values: &[u32], target: &mut PointAttribute) -> Status {
        let num_components = self.min_values.len();
        if num_components == 0 || target.num_components() as usize != num_components {
            return Err(DracoError::DracoError("Quantized component count mismatch".into()));
        }
        if values.len() != target.size() * num_components {
            return Err(DracoError::DracoError(format!(
                "Expected {} quantized components, got {}",
                target.size() * num_components,
                values.len()
            )));
        }
        let mut dequantizer = Dequantizer::new();
        if !dequantizer.init(self.range, max_quantized_value(self.quantization_bits)) {
            return Err(DracoError::DracoError("Invalid dequantization parameters".into()));
        }

        let mut value = vec![0.0f32; num_components];
        for (i, chunk) in values.chunks_exact(num_components).enumerate() {
            for (c, q) in chunk.iter().enumerate() {
                value[c] = self.min_values[c] + dequantizer.dequantize_float(*q as i32);
            }
            if !target.set_attribute_value(AttributeValueIndex(i as u32), value.as_slice()) {
                return Err(DracoError::DracoError(format!("Failed to store value {}", i)));
            }
        }
        Ok(())
    }

    pub fn encode_parameters(&self, buffer: &mut EncoderBuffer) {
        buffer.encode_u8(self.quantization_bits);
        for min in &self.min_values {
            buffer.encode_f32(*min);
        }
        buffer.encode_f32(self.range);
    }

    pub fn decode_parameters(buffer: &mut DecoderBuffer, num_components: usize) -> Result<Self, DracoError> {
        let bits = buffer.decode_u8()? as i32;
        let mut min_values = Vec::with_capacity(num_components);
        for _ in 0..num_components {
            min_values.push(buffer.decode_f32()?);
        }
        let range = buffer.decode_f32()?;
        Self::set_parameters(bits, &min_values, range)
    }
}

fn read_floats(attribute: &PointAttribute, index: usize) -> Result<Vec<f32>, DracoError> {
    let data_type = attribute.data_type();
    let component_size = data_type.byte_length();
    let bytes = attribute
        .value_bytes(AttributeValueIndex(index as u32))
        .ok_or_else(|| DracoError::DracoError(format!("Attribute value {} out of range", index)))?;
    bytes
        .chunks_exact(component_size)
        .map(|chunk| {
            data_type
                .read_component(chunk)
                .map(|v| v as f32)
                .ok_or_else(|| DracoError::DracoError("Unreadable attribute component".into()))
        })
        .collect()
}

/// Float attribute with `num_values` zeroed entries, ready for dequantized data.
pub fn float_attribute_like(source: &PointAttribute, num_values: usize) -> PointAttribute {
    let mut att = PointAttribute::new();
    att.init(
        source.attribute_type(),
        source.num_components(),
        DataType::Float32,
        source.normalized(),
        num_values,
    );
    att.set_unique_id(source.unique_id());
    att
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry_attribute::GeometryAttributeType;

    fn positions(values: &[[f32; 3]]) -> PointAttribute {
        let mut att = PointAttribute::new();
        att.init(GeometryAttributeType::Position, 3, DataType::Float32, false, values.len());
        for (i, v) in values.iter().enumerate() {
            att.set_attribute_value(AttributeValueIndex(i as u32), v);
        }
        att
    }

    #[test]
    fn test_compute_parameters() {
        let att = positions(&[[0.0, -1.0, 2.0], [4.0, 1.0, 2.5]]);
        let transform = AttributeQuantizationTransform::compute_parameters(&att, 8).unwrap().unwrap();
        assert_eq!(transform.min_values(), &[0.0f32, -1.0, 2.0][..]);
        assert_eq!(transform.range(), 4.0);
    }

    #[test]
    fn test_rejects_bad_bits_and_integer_data() {
        let att = positions(&[[0.0; 3]]);
        assert!(AttributeQuantizationTransform::compute_parameters(&att, 0).is_err());
        assert!(AttributeQuantizationTransform::compute_parameters(&att, 31).is_err());

        let mut colors = PointAttribute::new();
        colors.init(GeometryAttributeType::Color, 3, DataType::Uint8, true, 1);
        assert!(AttributeQuantizationTransform::compute_parameters(&colors, 8).is_err());
    }

    #[test]
    fn test_quantize_dequantize_within_step() {
        let values = [[0.0, 0.0, 0.0], [1.0, 0.3, 0.7], [0.25, 0.5, 0.9]];
        let att = positions(&values);
        let transform = AttributeQuantizationTransform::compute_parameters(&att, 4).unwrap().unwrap();
        let quantized = transform.quantize_values(&att).unwrap();
        assert!(quantized.iter().all(|q| *q <= 15));

        let mut restored = float_attribute_like(&att, values.len());
        transform.dequantize_values(&quantized, &mut restored).unwrap();
        let step = transform.range() / 15.0;
        for (i, v) in values.iter().enumerate() {
            let r = restored.convert_value::<f32, 3>(AttributeValueIndex(i as u32)).unwrap();
            for c in 0..3 {
                assert!((r[c] - v[c]).abs() <= step);
            }
        }
    }

    #[test]
    fn test_extent_beyond_f32() {
        let att = positions(&[[-3.0e38, 0.0, 0.0], [3.0e38, 1.0, 1.0]]);
        assert_eq!(AttributeQuantizationTransform::compute_parameters(&att, 11).unwrap(), None);

        let att = positions(&[[-1.5e38, 0.0, 0.0], [1.5e38, 1.0, 1.0]]);
        let transform = AttributeQuantizationTransform::compute_parameters(&att, 11).unwrap().unwrap();
        assert!(transform.range().is_finite());
        assert!(transform.quantize_values(&att).is_ok());
    }

    #[test]
    fn test_parameters_through_buffers() {
        let transform = AttributeQuantizationTransform::set_parameters(11, &[1.0, 2.0], 3.5).unwrap();
        let mut enc = EncoderBuffer::new();
        transform.encode_parameters(&mut enc);
        let mut dec = DecoderBuffer::new(enc.data());
        let decoded = AttributeQuantizationTransform::decode_parameters(&mut dec, 2).unwrap();
        assert_eq!(decoded, transform);
    }
}
