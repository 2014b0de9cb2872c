use crate::capabilities::{AttributeKind, AttributeKinds};
use crate::error::{MeshCodecError, Result};

/// Largest quantization bit count the codec accepts.
pub const MAX_QUANTIZATION_BITS: i32 = 30;
/// Largest compression level, which maps to codec speed 0.
pub const MAX_COMPRESSION_LEVEL: i32 = 10;

/// Encoding options.
///
/// Quantization bits of `0` store an attribute losslessly. Negative texture
/// coordinate or normal bits drop that attribute before encoding; positions
/// cannot be dropped, so negative position bits are a configuration error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    pub pos_quantization_bits: i32,
    pub tex_coords_quantization_bits: i32,
    pub normals_quantization_bits: i32,
    pub compression_level: i32,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            pos_quantization_bits: 11,
            tex_coords_quantization_bits: 10,
            normals_quantization_bits: 8,
            compression_level: 7,
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// All attributes stored losslessly at the default compression level.
    pub fn disabled_quantization() -> Self {
        Self {
            pos_quantization_bits: 0,
            tex_coords_quantization_bits: 0,
            normals_quantization_bits: 0,
            ..Self::default()
        }
    }

    pub fn with_pos_quantization_bits(mut self, bits: i32) -> Self {
        self.pos_quantization_bits = bits;
        self
    }

    pub fn with_tex_coords_quantization_bits(mut self, bits: i32) -> Self {
        self.tex_coords_quantization_bits = bits;
        self
    }

    pub fn with_normals_quantization_bits(mut self, bits: i32) -> Self {
        self.normals_quantization_bits = bits;
        self
    }

    pub fn with_compression_level(mut self, level: i32) -> Self {
        self.compression_level = level;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.pos_quantization_bits < 0 {
            return Err(MeshCodecError::Config(format!(
                "position quantization bits must be non-negative, got {}",
                self.pos_quantization_bits
            )));
        }
        for (name, bits) in [
            ("position", self.pos_quantization_bits),
            ("tex_coords", self.tex_coords_quantization_bits),
            ("normals", self.normals_quantization_bits),
        ] {
            if bits > MAX_QUANTIZATION_BITS {
                return Err(MeshCodecError::Config(format!(
                    "{} quantization bits {} exceed {}",
                    name, bits, MAX_QUANTIZATION_BITS
                )));
            }
        }
        if !(0..=MAX_COMPRESSION_LEVEL).contains(&self.compression_level) {
            return Err(MeshCodecError::Config(format!(
                "compression level {} outside 0..={}",
                self.compression_level, MAX_COMPRESSION_LEVEL
            )));
        }
        Ok(())
    }

    /// Codec speed for both encoding and decoding.
    pub fn speed(&self) -> i32 {
        MAX_COMPRESSION_LEVEL - self.compression_level
    }

    /// Quantization bits for `kind`. Colors are always stored verbatim.
    pub fn quantization_bits(&self, kind: AttributeKind) -> i32 {
        match kind {
            AttributeKind::Position => self.pos_quantization_bits,
            AttributeKind::TexCoord => self.tex_coords_quantization_bits,
            AttributeKind::Normal => self.normals_quantization_bits,
            AttributeKind::Color => 0,
        }
    }

    /// Kinds removed before encoding because their bits are negative.
    pub fn deleted_kinds(&self) -> AttributeKinds {
        [AttributeKind::TexCoord, AttributeKind::Normal]
            .into_iter()
            .filter(|kind| self.quantization_bits(*kind) < 0)
            .collect()
    }

    /// Kinds that survive into the encoded stream.
    pub fn capabilities(&self) -> AttributeKinds {
        self.deleted_kinds()
            .iter()
            .fold(AttributeKinds::ALL, AttributeKinds::without)
    }
}
