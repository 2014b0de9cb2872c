use std::collections::HashMap;

use crate::geometry_attribute::GeometryAttributeType;

/// String keyed integer options that steer the encoder.
///
/// Per-attribute options can be set by attribute id or by attribute type.
/// Lookups fall back from id to type to the global value.
#[derive(Debug, Clone, Default)]
pub struct EncoderOptions {
    global_options: HashMap<String, i32>,
    attribute_options: HashMap<i32, HashMap<String, i32>>,
    attribute_type_options: HashMap<GeometryAttributeType, HashMap<String, i32>>,
}

impl EncoderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_encoding_speed(&self) -> i32 {
        self.get_global_int("encoding_speed", 5)
    }

    pub fn get_decoding_speed(&self) -> i32 {
        self.get_global_int("decoding_speed", 5)
    }

    /// Sets both speeds. Values are clamped into `0..=10`.
    pub fn set_speed(&mut self, encoding_speed: i32, decoding_speed: i32) {
        self.set_global_int("encoding_speed", encoding_speed.clamp(0, 10));
        self.set_global_int("decoding_speed", decoding_speed.clamp(0, 10));
    }

    pub fn set_global_int(&mut self, key: &str, value: i32) {
        self.global_options.insert(key.to_string(), value);
    }

    pub fn get_global_int(&self, key: &str, default_val: i32) -> i32 {
        *self.global_options.get(key).unwrap_or(&default_val)
    }

    pub fn set_attribute_int(&mut self, att_id: i32, key: &str, value: i32) {
        self.attribute_options
            .entry(att_id)
            .or_default()
            .insert(key.to_string(), value);
    }

    pub fn set_attribute_type_int(&mut self, att_type: GeometryAttributeType, key: &str, value: i32) {
        self.attribute_type_options
            .entry(att_type)
            .or_default()
            .insert(key.to_string(), value);
    }

    pub fn get_attribute_int(&self, att_id: i32, key: &str, default_val: i32) -> i32 {
        if let Some(val) = self.attribute_options.get(&att_id).and_then(|opts| opts.get(key)) {
            return *val;
        }
        self.get_global_int(key, default_val)
    }

    /// Resolves `key` for an attribute, checking its id, then its type, then
    /// the global options.
    pub fn get_attribute_int_for(
        &self,
        att_id: i32,
        att_type: GeometryAttributeType,
        key: &str,
        default_val: i32,
    ) -> i32 {
        if let Some(val) = self.attribute_options.get(&att_id).and_then(|opts| opts.get(key)) {
            return *val;
        }
        if let Some(val) = self.attribute_type_options.get(&att_type).and_then(|opts| opts.get(key)) {
            return *val;
        }
        self.get_global_int(key, default_val)
    }

    /// Quantization bits for an attribute, 0 when quantization is off.
    pub fn quantization_bits(&self, att_id: i32, att_type: GeometryAttributeType) -> i32 {
        self.get_attribute_int_for(att_id, att_type, "quantization_bits", 0)
    }
}
