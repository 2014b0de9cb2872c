use crate::status::DracoError;

/// Magic bytes at the start of every encoded stream.
pub const DRACO_MAGIC: &[u8; 5] = b"DRACO";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodedGeometryType {
    InvalidGeometryType = -1,
    PointCloud = 0,
    TriangularMesh = 1,
}

impl TryFrom<u8> for EncodedGeometryType {
    type Error = DracoError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(EncodedGeometryType::PointCloud),
            1 => Ok(EncodedGeometryType::TriangularMesh),
            other => Err(DracoError::InvalidGeometryType(other)),
        }
    }
}

impl EncodedGeometryType {
    /// Header tag for this geometry type. `None` for the invalid marker.
    pub fn tag(self) -> Option<u8> {
        match self {
            EncodedGeometryType::PointCloud => Some(0),
            EncodedGeometryType::TriangularMesh => Some(1),
            EncodedGeometryType::InvalidGeometryType => None,
        }
    }
}

/// How index and value streams are laid out.
///
/// `Raw` writes fixed-width indices and bit-packed quantized values and is
/// picked for the fastest speed setting. `Compressed` delta codes every stream
/// into zig-zag varints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequentialEncodingMethod {
    Compressed = 0,
    Raw = 1,
}

impl TryFrom<u8> for SequentialEncodingMethod {
    type Error = DracoError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(SequentialEncodingMethod::Compressed),
            1 => Ok(SequentialEncodingMethod::Raw),
            other => Err(DracoError::UnsupportedFeature(format!("Encoding method {}", other))),
        }
    }
}

impl SequentialEncodingMethod {
    /// Chooses the layout for the given speed pair. Only `(10, 10)` selects raw.
    pub fn for_speeds(encoding_speed: i32, decoding_speed: i32) -> Self {
        if encoding_speed >= 10 && decoding_speed >= 10 {
            SequentialEncodingMethod::Raw
        } else {
            SequentialEncodingMethod::Compressed
        }
    }
}

/// Layout of an attribute's value array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeValueEncoding {
    Generic = 0,
    Quantized = 2,
}

impl TryFrom<u8> for AttributeValueEncoding {
    type Error = DracoError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(AttributeValueEncoding::Generic),
            2 => Ok(AttributeValueEncoding::Quantized),
            other => Err(DracoError::UnsupportedFeature(format!("Attribute encoding {}", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_type_tags() {
        assert_eq!(EncodedGeometryType::try_from(1).unwrap(), EncodedGeometryType::TriangularMesh);
        assert_eq!(EncodedGeometryType::PointCloud.tag(), Some(0));
        assert_eq!(EncodedGeometryType::InvalidGeometryType.tag(), None);
        assert!(matches!(
            EncodedGeometryType::try_from(7),
            Err(DracoError::InvalidGeometryType(7))
        ));
    }

    #[test]
    fn test_method_for_speeds() {
        assert_eq!(SequentialEncodingMethod::for_speeds(10, 10), SequentialEncodingMethod::Raw);
        assert_eq!(SequentialEncodingMethod::for_speeds(10, 3), SequentialEncodingMethod::Compressed);
        assert_eq!(SequentialEncodingMethod::for_speeds(3, 3), SequentialEncodingMethod::Compressed);
    }
}
