// Copyright 2022 The Draco Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use byteorder::{ByteOrder, LittleEndian};

use crate::status::{DracoError, Status};
use crate::version::DEFAULT_MESH_VERSION;

/// Output buffer for Draco serialization.
/// Supports both byte-aligned and bit-level encoding.
#[derive(Debug, Clone)]
pub struct EncoderBuffer {
    /// Main buffer data
    buffer: Vec<u8>,

    /// Bit encoder state (active when encoding bits)
    bit_encoder: Option<BitEncoder>,

    /// Whether to prefix the bit sequence with its size in bytes
    encode_bit_sequence_size: bool,

    version_major: u8,
    version_minor: u8,
}

/// Bit encoder for variable-length bit sequences
#[derive(Debug, Clone, Default)]
pub struct BitEncoder {
    /// Bits written so far, LSB first
    bits: Vec<u8>,

    /// Current bit position within `bits`
    bit_offset: usize,
}

impl EncoderBuffer {
    /// Create a new empty encoder buffer
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a buffer with initial capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
            bit_encoder: None,
            encode_bit_sequence_size: false,
            version_major: DEFAULT_MESH_VERSION.0,
            version_minor: DEFAULT_MESH_VERSION.1,
        }
    }

    /// Clear all data from the buffer
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.bit_encoder = None;
        self.encode_bit_sequence_size = false;
    }

    /// Get the current buffer data
    pub fn data(&self) -> &[u8] {
        &self.buffer
    }

    /// Get the current buffer size
    pub fn size(&self) -> usize {
        self.buffer.len()
    }

    /// Consume the buffer and return the encoded bytes
    pub fn into_data(self) -> Vec<u8> {
        self.buffer
    }

    pub fn set_version(&mut self, major: u8, minor: u8) {
        self.version_major = major;
        self.version_minor = minor;
    }

    pub fn version_major(&self) -> u8 {
        self.version_major
    }

    pub fn version_minor(&self) -> u8 {
        self.version_minor
    }

    /// Check if bit encoder is currently active
    pub fn bit_encoder_active(&self) -> bool {
        self.bit_encoder.is_some()
    }

    /// Start encoding a bit sequence
    ///
    /// # Arguments
    /// * `required_bits` - Expected number of bits, used as a capacity hint
    /// * `encode_size` - Whether to encode the size of the bit sequence
    pub fn start_bit_encoding(&mut self, required_bits: usize, encode_size: bool) -> Status {
        if self.bit_encoder_active() {
            return Err(DracoError::BufferError("Bit encoder already active".into()));
        }
        self.bit_encoder = Some(BitEncoder {
            bits: Vec::with_capacity((required_bits + 7) / 8),
            bit_offset: 0,
        });
        self.encode_bit_sequence_size = encode_size;
        Ok(())
    }

    /// End bit encoding and append the packed bits to the buffer
    pub fn end_bit_encoding(&mut self) {
        if let Some(encoder) = self.bit_encoder.take() {
            if self.encode_bit_sequence_size {
                self.encode_varint(encoder.bits.len() as u64);
            }
            self.buffer.extend_from_slice(&encoder.bits);
        }
        self.encode_bit_sequence_size = false;
    }

    /// Encode least significant bits of a value
    ///
    /// # Arguments
    /// * `nbits` - Number of bits to encode (0-32)
    /// * `value` - Value to encode
    pub fn encode_least_significant_bits32(&mut self, nbits: u8, value: u32) -> Status {
        if nbits > 32 {
            return Err(DracoError::BufferError("Cannot encode more than 32 bits".into()));
        }
        match self.bit_encoder.as_mut() {
            Some(encoder) => {
                encoder.put_bits(value, nbits);
                Ok(())
            }
            None => Err(DracoError::BufferError("Bit encoder not active".into())),
        }
    }

    /// Encode raw bytes (byte-aligned)
    pub fn encode_data(&mut self, data: &[u8]) {
        debug_assert!(!self.bit_encoder_active(), "byte-aligned write during bit encoding");
        self.buffer.extend_from_slice(data);
    }

    pub fn encode_u8(&mut self, value: u8) {
        self.encode_data(&[value]);
    }

    pub fn encode_u16(&mut self, value: u16) {
        let mut bytes = [0u8; 2];
        LittleEndian::write_u16(&mut bytes, value);
        self.encode_data(&bytes);
    }

    pub fn encode_u32(&mut self, value: u32) {
        let mut bytes = [0u8; 4];
        LittleEndian::write_u32(&mut bytes, value);
        self.encode_data(&bytes);
    }

    pub fn encode_f32(&mut self, value: f32) {
        let mut bytes = [0u8; 4];
        LittleEndian::write_f32(&mut bytes, value);
        self.encode_data(&bytes);
    }

    /// Encodes an unsigned integer as a LEB128 varint.
    pub fn encode_varint(&mut self, mut value: u64) {
        loop {
            let byte = (value & 0x7F) as u8;
            value >>= 7;
            if value == 0 {
                self.encode_u8(byte);
                break;
            }
            self.encode_u8(byte | 0x80);
        }
    }

    /// Encodes a signed integer as a zig-zag folded varint
    /// (non-negative `v` becomes `2v`, negative `v` becomes `2(-v - 1) + 1`).
    pub fn encode_varint_signed(&mut self, value: i64) {
        let folded = if value >= 0 {
            (value as u64) << 1
        } else {
            ((-(value + 1)) as u64) << 1 | 1
        };
        self.encode_varint(folded);
    }
}

impl BitEncoder {
    /// Write up to 32 bits, LSB first
    pub fn put_bits(&mut self, data: u32, nbits: u8) {
        debug_assert!(nbits <= 32, "Cannot write more than 32 bits");

        for bit in 0..nbits {
            self.put_bit((data >> bit) & 1);
        }
    }

    /// Get the current bit offset
    pub fn bit_offset(&self) -> usize {
        self.bit_offset
    }

    /// Get number of bits required to store the given number
    pub fn bits_required(x: u32) -> u32 {
        32 - x.leading_zeros()
    }

    fn put_bit(&mut self, value: u32) {
        let byte_offset = self.bit_offset / 8;
        let bit_shift = (self.bit_offset % 8) as u8;
        if byte_offset == self.bits.len() {
            self.bits.push(0);
        }
        self.bits[byte_offset] |= ((value & 1) as u8) << bit_shift;
        self.bit_offset += 1;
    }
}

impl Default for EncoderBuffer {
    fn default() -> Self {
        Self::new()
    }
}
