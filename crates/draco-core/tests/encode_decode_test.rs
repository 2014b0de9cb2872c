use draco_core::decoder_buffer::DecoderBuffer;
use draco_core::draco_types::DataType;
use draco_core::encoder_buffer::EncoderBuffer;
use draco_core::encoder_options::EncoderOptions;
use draco_core::geometry_attribute::{GeometryAttributeType, PointAttribute};
use draco_core::geometry_indices::AttributeValueIndex;
use draco_core::point_cloud::PointCloud;
use draco_core::point_cloud_decoder::PointCloudDecoder;
use draco_core::point_cloud_encoder::PointCloudEncoder;
use draco_core::{Decoder, EncodedGeometryType, Encoder};

fn point_cloud_with_colors() -> PointCloud {
    let positions: [[f32; 3]; 3] = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
    let colors: [[u8; 3]; 3] = [[255, 0, 0], [0, 255, 0], [0, 0, 255]];

    let mut pc = PointCloud::new();
    let mut pos_att = PointAttribute::new();
    pos_att.init(GeometryAttributeType::Position, 3, DataType::Float32, false, positions.len());
    for (i, p) in positions.iter().enumerate() {
        assert!(pos_att.set_attribute_value(AttributeValueIndex(i as u32), p));
    }
    pc.add_attribute(pos_att);

    let mut color_att = PointAttribute::new();
    color_att.init(GeometryAttributeType::Color, 3, DataType::Uint8, true, colors.len());
    for (i, c) in colors.iter().enumerate() {
        assert!(color_att.set_attribute_value(AttributeValueIndex(i as u32), c));
    }
    pc.add_attribute(color_att);
    pc
}

#[test]
fn test_point_cloud_encode_decode() {
    let pc = point_cloud_with_colors();

    let mut encoder = PointCloudEncoder::new();
    encoder.set_point_cloud(pc.clone());
    let mut options = EncoderOptions::new();
    options.set_attribute_int(0, "quantization_bits", 14);

    let mut enc_buffer = EncoderBuffer::new();
    let status = encoder.encode(&options, &mut enc_buffer);
    assert!(status.is_ok(), "Encoding failed: {:?}", status.err());

    let mut dec_buffer = DecoderBuffer::new(enc_buffer.data());
    let mut decoded_pc = PointCloud::new();
    let mut decoder = PointCloudDecoder::new();
    let status = decoder.decode(&mut dec_buffer, &mut decoded_pc);
    assert!(status.is_ok(), "Decoding failed: {:?}", status.err());

    assert_eq!(decoded_pc.num_points(), 3);
    assert_eq!(decoded_pc.num_attributes(), 2);

    let decoded_pos = decoded_pc.named_attribute(GeometryAttributeType::Position).unwrap();
    let original_pos = pc.named_attribute(GeometryAttributeType::Position).unwrap();
    for i in 0..3 {
        let avi = AttributeValueIndex(i);
        let got = decoded_pos.convert_value::<f32, 3>(avi).unwrap();
        let want = original_pos.convert_value::<f32, 3>(avi).unwrap();
        for c in 0..3 {
            assert!((got[c] - want[c]).abs() < 0.001, "Value mismatch at {}: {:?} vs {:?}", i, got, want);
        }
    }

    // Colors are stored verbatim.
    assert_eq!(
        decoded_pc.named_attribute(GeometryAttributeType::Color),
        pc.named_attribute(GeometryAttributeType::Color)
    );
}

#[test]
fn test_lossless_without_quantization() {
    let pc = point_cloud_with_colors();
    for speed in [0, 5, 10] {
        let mut encoder = Encoder::new();
        encoder.set_speed_options(speed, speed);
        let mut buffer = EncoderBuffer::new();
        encoder.encode_point_cloud_to_buffer(&pc, &mut buffer).unwrap();

        let decoded = Decoder::new()
            .decode_point_cloud_from_buffer(&mut DecoderBuffer::new(buffer.data()))
            .unwrap();
        assert_eq!(decoded, pc, "speed {}", speed);
    }
}

#[test]
fn test_geometry_type_peek() {
    let mut buffer = EncoderBuffer::new();
    Encoder::new()
        .encode_point_cloud_to_buffer(&point_cloud_with_colors(), &mut buffer)
        .unwrap();
    let dec_buffer = DecoderBuffer::new(buffer.data());
    let decoder = Decoder::new();
    assert_eq!(
        decoder.get_encoded_geometry_type(&dec_buffer).unwrap(),
        EncodedGeometryType::PointCloud
    );
    assert_eq!(dec_buffer.position(), 0);
}

#[test]
fn test_empty_point_cloud() {
    let mut buffer = EncoderBuffer::new();
    Encoder::new()
        .encode_point_cloud_to_buffer(&PointCloud::new(), &mut buffer)
        .unwrap();
    let decoded = Decoder::new()
        .decode_point_cloud_from_buffer(&mut DecoderBuffer::new(buffer.data()))
        .unwrap();
    assert_eq!(decoded.num_points(), 0);
    assert_eq!(decoded.num_attributes(), 0);
}

#[test]
fn test_truncated_streams_fail() {
    let mut buffer = EncoderBuffer::new();
    Encoder::new()
        .encode_point_cloud_to_buffer(&point_cloud_with_colors(), &mut buffer)
        .unwrap();
    for len in 0..buffer.size() {
        let result = Decoder::new().decode_point_cloud_from_buffer(&mut DecoderBuffer::new(&buffer.data()[..len]));
        assert!(result.is_err(), "prefix of {} bytes decoded", len);
    }
}
