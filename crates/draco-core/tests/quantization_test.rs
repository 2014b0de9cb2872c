use draco_core::decoder_buffer::DecoderBuffer;
use draco_core::draco_types::DataType;
use draco_core::encoder_buffer::EncoderBuffer;
use draco_core::geometry_attribute::{GeometryAttributeType, PointAttribute};
use draco_core::geometry_indices::AttributeValueIndex;
use draco_core::point_cloud::PointCloud;
use draco_core::{Decoder, Encoder};
use proptest::prelude::*;

fn point_cloud(positions: &[[f32; 3]]) -> PointCloud {
    let mut pos_att = PointAttribute::new();
    pos_att.init(GeometryAttributeType::Position, 3, DataType::Float32, false, positions.len());
    for (i, p) in positions.iter().enumerate() {
        pos_att.set_attribute_value(AttributeValueIndex(i as u32), p);
    }
    let mut pc = PointCloud::new();
    pc.add_attribute(pos_att);
    pc
}

fn largest_extent(positions: &[[f32; 3]]) -> f32 {
    (0..3)
        .map(|c| {
            let lo = positions.iter().map(|p| p[c]).fold(f32::MAX, f32::min);
            let hi = positions.iter().map(|p| p[c]).fold(f32::MIN, f32::max);
            hi - lo
        })
        .fold(0.0, f32::max)
}

#[test]
fn test_quantization_encoding() {
    let positions = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
    let mut encoder = Encoder::new();
    encoder.set_attribute_quantization(GeometryAttributeType::Position, 14);

    let mut quantized = EncoderBuffer::new();
    encoder.encode_point_cloud_to_buffer(&point_cloud(&positions), &mut quantized).unwrap();

    let mut raw = EncoderBuffer::new();
    Encoder::new()
        .encode_point_cloud_to_buffer(&point_cloud(&positions), &mut raw)
        .unwrap();
    assert!(quantized.size() > 0);
    assert_ne!(quantized.data(), raw.data());
}

#[test]
fn test_invalid_bits_fail() {
    let positions = [[0.0, 0.0, 0.0], [1.0, 2.0, 3.0]];
    for bits in [31, 40] {
        let mut encoder = Encoder::new();
        encoder.set_attribute_quantization(GeometryAttributeType::Position, bits);
        let mut buffer = EncoderBuffer::new();
        assert!(encoder
            .encode_point_cloud_to_buffer(&point_cloud(&positions), &mut buffer)
            .is_err());
    }
}

proptest! {
    #[test]
    fn prop_error_within_one_step(
        positions in prop::collection::vec(prop::array::uniform3(-100.0f32..100.0), 1..40),
        bits in 4i32..=20,
        speed in prop::sample::select(vec![0, 5, 10]),
    ) {
        let mut encoder = Encoder::new();
        encoder.set_speed_options(speed, speed);
        encoder.set_attribute_quantization(GeometryAttributeType::Position, bits);
        let mut buffer = EncoderBuffer::new();
        encoder.encode_point_cloud_to_buffer(&point_cloud(&positions), &mut buffer).unwrap();

        let decoded = Decoder::new()
            .decode_point_cloud_from_buffer(&mut DecoderBuffer::new(buffer.data()))
            .unwrap();
        let att = decoded.attribute(0);
        prop_assert_eq!(att.size(), positions.len());

        let range = largest_extent(&positions).max(1.0);
        let step = range / ((1u32 << bits) - 1) as f32;
        for (i, p) in positions.iter().enumerate() {
            let got = att.convert_value::<f32, 3>(AttributeValueIndex(i as u32)).unwrap();
            for c in 0..3 {
                // One step plus the f32 rounding of the reconstruction.
                let tolerance = step + 4.0 * f32::EPSILON * p[c].abs().max(1.0);
                prop_assert!((got[c] - p[c]).abs() <= tolerance, "{} vs {} (step {})", got[c], p[c], step);
            }
        }
    }
}
