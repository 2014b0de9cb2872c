use byteorder::{ByteOrder, LittleEndian};

use crate::status::DracoError;
use crate::version::DEFAULT_MESH_VERSION;

/// Input buffer for reading compressed Draco data.
///
/// `DecoderBuffer` provides sequential byte and bit-level access to compressed data.
/// It supports both byte-aligned reads (integers, floats, varints) and bit-level
/// reads for packed values.
///
/// # Example
///
/// ```
/// use draco_core::DecoderBuffer;
///
/// let data = &[0x44, 0x52, 0x41, 0x43, 0x4F]; // "DRACO" header
/// let mut buffer = DecoderBuffer::new(data);
///
/// assert_eq!(buffer.decode_u8().unwrap(), 0x44);
/// assert_eq!(buffer.remaining_size(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct DecoderBuffer<'a> {
    data: &'a [u8],
    pos: usize,
    bit_decoder_active: bool,
    bit_start_pos: usize,
    current_bit_offset: usize,
    bit_stream_end_pos: usize,
    bit_sequence_size_known: bool,
    version_major: u8,
    version_minor: u8,
}

impl<'a> DecoderBuffer<'a> {
    /// Creates a new `DecoderBuffer` from a byte slice.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            bit_decoder_active: false,
            bit_start_pos: 0,
            current_bit_offset: 0,
            bit_stream_end_pos: 0,
            bit_sequence_size_known: false,
            version_major: DEFAULT_MESH_VERSION.0,
            version_minor: DEFAULT_MESH_VERSION.1,
        }
    }

    /// Sets the bitstream version read from the header.
    pub fn set_version(&mut self, major: u8, minor: u8) {
        self.version_major = major;
        self.version_minor = minor;
    }

    /// Returns the major version number.
    pub fn version_major(&self) -> u8 {
        self.version_major
    }

    /// Returns the minor version number.
    pub fn version_minor(&self) -> u8 {
        self.version_minor
    }

    /// Returns the current read position in bytes.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the number of bytes remaining in the buffer.
    pub fn remaining_size(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Starts bit-level decoding mode.
    ///
    /// When `decode_size` is true, reads the bit sequence size (in bytes) from
    /// the buffer and returns it.
    ///
    /// # Errors
    ///
    /// Returns `DracoError::BufferError` if bit decoding is already active or
    /// the declared size runs past the end of the buffer.
    pub fn start_bit_decoding(&mut self, decode_size: bool) -> Result<u64, DracoError> {
        if self.bit_decoder_active {
            return Err(DracoError::BufferError("Bit decoding already active".into()));
        }
        let mut size_bytes: u64 = 0;
        if decode_size {
            size_bytes = self.decode_varint()?;
            if size_bytes > self.remaining_size() as u64 {
                return Err(DracoError::BufferError(format!(
                    "Bit sequence of {} bytes exceeds remaining {}",
                    size_bytes,
                    self.remaining_size()
                )));
            }
        }

        self.bit_start_pos = self.pos;
        self.bit_decoder_active = true;
        self.current_bit_offset = 0;
        self.bit_sequence_size_known = decode_size;
        self.bit_stream_end_pos = if decode_size {
            self.bit_start_pos + size_bytes as usize
        } else {
            self.data.len()
        };

        Ok(size_bytes)
    }

    /// Ends bit-level decoding mode and advances the byte position.
    pub fn end_bit_decoding(&mut self) {
        self.bit_decoder_active = false;
        if self.bit_sequence_size_known {
            self.pos = self.bit_stream_end_pos;
        } else {
            let bytes_consumed = (self.current_bit_offset + 7) / 8;
            self.pos = self.bit_start_pos + bytes_consumed;
        }
    }

    /// Decodes `nbits` least significant bits as a u32.
    ///
    /// # Errors
    ///
    /// Returns `DracoError::BufferError` if bit decoding is not active or end of stream.
    pub fn decode_least_significant_bits32(&mut self, nbits: u32) -> Result<u32, DracoError> {
        if !self.bit_decoder_active {
            return Err(DracoError::BufferError("Bit decoding not active".into()));
        }
        if nbits > 32 {
            return Err(DracoError::BufferError("Cannot decode more than 32 bits".into()));
        }
        let mut value = 0;
        for i in 0..nbits {
            let bit = self.get_bit()?;
            value |= bit << i;
        }
        Ok(value)
    }

    fn get_bit(&mut self) -> Result<u32, DracoError> {
        let byte_offset = self.bit_start_pos + self.current_bit_offset / 8;
        let bit_shift = self.current_bit_offset % 8;

        if byte_offset < self.bit_stream_end_pos && byte_offset < self.data.len() {
            let bit = (self.data[byte_offset] >> bit_shift) & 1;
            self.current_bit_offset += 1;
            Ok(bit as u32)
        } else {
            Err(DracoError::BufferError("Unexpected end of bit stream".into()))
        }
    }

    /// Decodes and returns a slice of the specified size.
    ///
    /// # Errors
    ///
    /// Returns `DracoError::BufferError` if bit decoding is active or not
    /// enough bytes remain.
    pub fn decode_slice(&mut self, size: usize) -> Result<&'a [u8], DracoError> {
        if self.bit_decoder_active {
            return Err(DracoError::BufferError(
                "Cannot decode bytes while bit decoding is active".into(),
            ));
        }
        if size > self.remaining_size() {
            return Err(DracoError::BufferError(format!(
                "Unexpected end of buffer: need {} bytes, have {}",
                size,
                self.remaining_size()
            )));
        }
        let slice = &self.data[self.pos..self.pos + size];
        self.pos += size;
        Ok(slice)
    }

    /// Decodes bytes into the provided buffer.
    pub fn decode_bytes(&mut self, out: &mut [u8]) -> Result<(), DracoError> {
        let src = self.decode_slice(out.len())?;
        out.copy_from_slice(src);
        Ok(())
    }

    /// Decodes a single byte.
    pub fn decode_u8(&mut self) -> Result<u8, DracoError> {
        Ok(self.decode_slice(1)?[0])
    }

    /// Decodes a little-endian u16.
    pub fn decode_u16(&mut self) -> Result<u16, DracoError> {
        Ok(LittleEndian::read_u16(self.decode_slice(2)?))
    }

    /// Decodes a little-endian u32.
    pub fn decode_u32(&mut self) -> Result<u32, DracoError> {
        Ok(LittleEndian::read_u32(self.decode_slice(4)?))
    }

    /// Decodes a little-endian f32.
    pub fn decode_f32(&mut self) -> Result<f32, DracoError> {
        Ok(LittleEndian::read_f32(self.decode_slice(4)?))
    }

    /// Decodes a variable-length unsigned integer (varint).
    pub fn decode_varint(&mut self) -> Result<u64, DracoError> {
        let mut val = 0u64;
        let mut shift = 0;
        loop {
            let b = self.decode_u8()?;
            val |= ((b & 0x7F) as u64) << shift;
            if (b & 0x80) == 0 {
                break;
            }
            shift += 7;
            if shift >= 64 {
                return Err(DracoError::BufferError("Varint exceeds 64 bits".into()));
            }
        }
        Ok(val)
    }

    /// Decodes a zig-zag folded signed varint.
    pub fn decode_varint_signed(&mut self) -> Result<i64, DracoError> {
        let symbol = self.decode_varint()?;
        let v = (symbol >> 1) as i64;
        if symbol & 1 == 0 {
            Ok(v)
        } else {
            Ok(-v - 1)
        }
    }

    /// Decodes a varint that must fit into a `usize` count no larger than `limit`.
    pub fn decode_count(&mut self, limit: usize, what: &str) -> Result<usize, DracoError> {
        let value = self.decode_varint()?;
        if value > limit as u64 {
            return Err(DracoError::BufferError(format!(
                "Invalid {}: {} exceeds limit {}",
                what, value, limit
            )));
        }
        Ok(value as usize)
    }
}
