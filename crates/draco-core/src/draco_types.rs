use byteorder::{ByteOrder, LittleEndian};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Invalid = 0,
    Int8,
    Uint8,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Int64,
    Uint64,
    Float32,
    Float64,
    Bool,
}

impl DataType {
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => DataType::Int8,
            2 => DataType::Uint8,
            3 => DataType::Int16,
            4 => DataType::Uint16,
            5 => DataType::Int32,
            6 => DataType::Uint32,
            7 => DataType::Int64,
            8 => DataType::Uint64,
            9 => DataType::Float32,
            10 => DataType::Float64,
            11 => DataType::Bool,
            _ => DataType::Invalid,
        }
    }

    pub fn byte_length(&self) -> usize {
        match self {
            DataType::Invalid => 0,
            DataType::Int8 | DataType::Uint8 | DataType::Bool => 1,
            DataType::Int16 | DataType::Uint16 => 2,
            DataType::Int32 | DataType::Uint32 | DataType::Float32 => 4,
            DataType::Int64 | DataType::Uint64 | DataType::Float64 => 8,
        }
    }

    pub fn is_integral(&self) -> bool {
        !matches!(self, DataType::Float32 | DataType::Float64 | DataType::Invalid)
    }

    pub fn is_float(&self) -> bool {
        matches!(self, DataType::Float32 | DataType::Float64)
    }

    /// Reads one component stored with this data type and widens it to `f64`.
    ///
    /// Returns `None` for [`DataType::Invalid`] or when `bytes` is too short.
    pub fn read_component(&self, bytes: &[u8]) -> Option<f64> {
        if bytes.len() < self.byte_length() || *self == DataType::Invalid {
            return None;
        }
        let value = match self {
            DataType::Int8 => bytes[0] as i8 as f64,
            DataType::Uint8 | DataType::Bool => bytes[0] as f64,
            DataType::Int16 => LittleEndian::read_i16(bytes) as f64,
            DataType::Uint16 => LittleEndian::read_u16(bytes) as f64,
            DataType::Int32 => LittleEndian::read_i32(bytes) as f64,
            DataType::Uint32 => LittleEndian::read_u32(bytes) as f64,
            DataType::Int64 => LittleEndian::read_i64(bytes) as f64,
            DataType::Uint64 => LittleEndian::read_u64(bytes) as f64,
            DataType::Float32 => LittleEndian::read_f32(bytes) as f64,
            DataType::Float64 => LittleEndian::read_f64(bytes),
            DataType::Invalid => return None,
        };
        Some(value)
    }
}

/// Scalar types that can be stored as attribute components.
pub trait ComponentType: Copy + Default + num_traits::NumCast {
    const DATA_TYPE: DataType;

    fn write_le(self, out: &mut [u8]);
    fn read_le(bytes: &[u8]) -> Self;
}

impl ComponentType for u8 {
    const DATA_TYPE: DataType = DataType::Uint8;

    fn write_le(self, out: &mut [u8]) {
        out[0] = self;
    }

    fn read_le(bytes: &[u8]) -> Self {
        bytes[0]
    }
}

impl ComponentType for i8 {
    const DATA_TYPE: DataType = DataType::Int8;

    fn write_le(self, out: &mut [u8]) {
        out[0] = self as u8;
    }

    fn read_le(bytes: &[u8]) -> Self {
        bytes[0] as i8
    }
}

macro_rules! impl_component_type {
    ($t:ty, $dt:expr, $write:ident, $read:ident) => {
        impl ComponentType for $t {
            const DATA_TYPE: DataType = $dt;

            fn write_le(self, out: &mut [u8]) {
                LittleEndian::$write(out, self);
            }

            fn read_le(bytes: &[u8]) -> Self {
                LittleEndian::$read(bytes)
            }
        }
    };
}

impl_component_type!(u16, DataType::Uint16, write_u16, read_u16);
impl_component_type!(i16, DataType::Int16, write_i16, read_i16);
impl_component_type!(u32, DataType::Uint32, write_u32, read_u32);
impl_component_type!(i32, DataType::Int32, write_i32, read_i32);
impl_component_type!(f32, DataType::Float32, write_f32, read_f32);
impl_component_type!(f64, DataType::Float64, write_f64, read_f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_u8_matches_discriminant() {
        for dt in [
            DataType::Int8,
            DataType::Uint8,
            DataType::Uint32,
            DataType::Float32,
            DataType::Bool,
        ] {
            assert_eq!(DataType::from_u8(dt as u8), dt);
        }
        assert_eq!(DataType::from_u8(0), DataType::Invalid);
        assert_eq!(DataType::from_u8(200), DataType::Invalid);
    }

    #[test]
    fn test_read_component() {
        let mut bytes = [0u8; 4];
        1.5f32.write_le(&mut bytes);
        assert_eq!(DataType::Float32.read_component(&bytes), Some(1.5));
        assert_eq!(DataType::Uint8.read_component(&[200]), Some(200.0));
        assert_eq!(DataType::Int8.read_component(&[0xFF]), Some(-1.0));
        assert_eq!(DataType::Float32.read_component(&[0, 0]), None);
        assert_eq!(DataType::Invalid.read_component(&bytes), None);
    }
}
