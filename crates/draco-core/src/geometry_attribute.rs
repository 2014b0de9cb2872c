use num_traits::NumCast;

use crate::data_buffer::DataBuffer;
use crate::draco_types::{ComponentType, DataType};
use crate::geometry_indices::{AttributeValueIndex, PointIndex, INVALID_ATTRIBUTE_VALUE_INDEX};
use crate::status::{DracoError, Status};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryAttributeType {
    Invalid = -1,
    Position = 0,
    Normal,
    Color,
    TexCoord,
    Generic,
}

impl GeometryAttributeType {
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => GeometryAttributeType::Position,
            1 => GeometryAttributeType::Normal,
            2 => GeometryAttributeType::Color,
            3 => GeometryAttributeType::TexCoord,
            4 => GeometryAttributeType::Generic,
            _ => GeometryAttributeType::Invalid,
        }
    }
}

/// Layout description shared by every attribute: semantic type, component
/// data type and count.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryAttribute {
    attribute_type: GeometryAttributeType,
    data_type: DataType,
    num_components: u8,
    normalized: bool,
    byte_stride: usize,
    unique_id: u32,
}

impl Default for GeometryAttribute {
    fn default() -> Self {
        Self {
            attribute_type: GeometryAttributeType::Invalid,
            data_type: DataType::Invalid,
            num_components: 0,
            normalized: false,
            byte_stride: 0,
            unique_id: 0,
        }
    }
}

impl GeometryAttribute {
    pub fn init(&mut self, attribute_type: GeometryAttributeType, num_components: u8, data_type: DataType, normalized: bool) {
        self.attribute_type = attribute_type;
        self.num_components = num_components;
        self.data_type = data_type;
        self.normalized = normalized;
        self.byte_stride = num_components as usize * data_type.byte_length();
    }

    pub fn attribute_type(&self) -> GeometryAttributeType {
        self.attribute_type
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    pub fn num_components(&self) -> u8 {
        self.num_components
    }

    pub fn normalized(&self) -> bool {
        self.normalized
    }

    pub fn byte_stride(&self) -> usize {
        self.byte_stride
    }

    pub fn unique_id(&self) -> u32 {
        self.unique_id
    }

    pub fn set_unique_id(&mut self, id: u32) {
        self.unique_id = id;
    }
}

/// An attribute value array plus the mapping from points to values.
///
/// With identity mapping point `i` reads value `i`. With explicit mapping every
/// point carries its own [`AttributeValueIndex`], which lets many points share
/// one stored value.
#[derive(Debug, Clone, PartialEq)]
pub struct PointAttribute {
    base: GeometryAttribute,
    buffer: DataBuffer,
    indices_map: Vec<AttributeValueIndex>,
    identity_mapping: bool,
    num_unique_entries: usize,
}

impl Default for PointAttribute {
    fn default() -> Self {
        Self {
            base: GeometryAttribute::default(),
            buffer: DataBuffer::new(),
            indices_map: Vec::new(),
            identity_mapping: true,
            num_unique_entries: 0,
        }
    }
}

impl PointAttribute {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn init(&mut self, attribute_type: GeometryAttributeType, num_components: u8, data_type: DataType, normalized: bool, num_attribute_values: usize) {
        self.base.init(attribute_type, num_components, data_type, normalized);
        self.buffer.resize(num_attribute_values * self.base.byte_stride());
        self.num_unique_entries = num_attribute_values;
        self.set_identity_mapping();
    }

    pub fn mapped_index(&self, point_index: PointIndex) -> AttributeValueIndex {
        if self.identity_mapping {
            AttributeValueIndex(point_index.0)
        } else {
            self.indices_map
                .get(point_index.value())
                .copied()
                .unwrap_or(INVALID_ATTRIBUTE_VALUE_INDEX)
        }
    }

    /// Number of stored values (not the number of points).
    pub fn size(&self) -> usize {
        self.num_unique_entries
    }

    pub fn is_empty(&self) -> bool {
        self.num_unique_entries == 0
    }

    pub fn buffer(&self) -> &DataBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut DataBuffer {
        &mut self.buffer
    }

    pub fn attribute_type(&self) -> GeometryAttributeType {
        self.base.attribute_type()
    }

    pub fn unique_id(&self) -> u32 {
        self.base.unique_id()
    }

    pub fn set_unique_id(&mut self, id: u32) {
        self.base.set_unique_id(id);
    }

    pub fn data_type(&self) -> DataType {
        self.base.data_type()
    }

    pub fn normalized(&self) -> bool {
        self.base.normalized()
    }

    pub fn num_components(&self) -> u8 {
        self.base.num_components()
    }

    pub fn byte_stride(&self) -> usize {
        self.base.byte_stride()
    }

    pub fn is_mapping_identity(&self) -> bool {
        self.identity_mapping
    }

    pub fn indices_map(&self) -> &[AttributeValueIndex] {
        &self.indices_map
    }

    pub fn set_identity_mapping(&mut self) {
        self.identity_mapping = true;
        self.indices_map.clear();
    }

    pub fn set_explicit_mapping(&mut self, num_points: usize) {
        self.identity_mapping = false;
        self.indices_map.clear();
        self.indices_map.resize(num_points, INVALID_ATTRIBUTE_VALUE_INDEX);
    }

    /// Returns false if the attribute uses identity mapping or the point is
    /// outside the explicit map.
    pub fn set_point_map_entry(&mut self, point_index: PointIndex, entry_index: AttributeValueIndex) -> bool {
        if self.identity_mapping {
            return false;
        }
        match self.indices_map.get_mut(point_index.value()) {
            Some(slot) => {
                *slot = entry_index;
                true
            }
            None => false,
        }
    }

    /// Checks that every point in `0..num_points` maps to a stored value.
    pub fn validate_mapping(&self, num_points: usize) -> Status {
        if self.identity_mapping {
            if num_points > self.num_unique_entries {
                return Err(DracoError::DracoError(format!(
                    "Identity mapped attribute has {} values for {} points",
                    self.num_unique_entries, num_points
                )));
            }
            return Ok(());
        }
        if self.indices_map.len() != num_points {
            return Err(DracoError::DracoError(format!(
                "Attribute mapping has {} entries for {} points",
                self.indices_map.len(),
                num_points
            )));
        }
        if let Some(bad) = self.indices_map.iter().find(|avi| avi.value() >= self.num_unique_entries) {
            return Err(DracoError::DracoError(format!(
                "Mapped value index {} out of range for {} values",
                bad.0, self.num_unique_entries
            )));
        }
        Ok(())
    }

    pub fn value_bytes(&self, index: AttributeValueIndex) -> Option<&[u8]> {
        let stride = self.byte_stride();
        self.buffer.slice(index.value() * stride, stride)
    }

    /// Stores `value` at `index`. The component type must match the
    /// attribute's data type and the component count.
    pub fn set_attribute_value<T: ComponentType>(&mut self, index: AttributeValueIndex, value: &[T]) -> bool {
        if T::DATA_TYPE != self.data_type() || value.len() != self.num_components() as usize {
            return false;
        }
        if index.value() >= self.num_unique_entries {
            return false;
        }
        let component_size = self.data_type().byte_length();
        let stride = self.byte_stride();
        let offset = index.value() * stride;
        let dst = &mut self.buffer.data_mut()[offset..offset + stride];
        for (c, component) in value.iter().enumerate() {
            component.write_le(&mut dst[c * component_size..(c + 1) * component_size]);
        }
        true
    }

    /// Reads the value at `index` converted to `N` components of type `T`.
    ///
    /// Missing components (when `N` exceeds the stored count) are filled with
    /// `T::default()`. Returns `None` when the index is out of range or a
    /// component does not fit into `T`.
    pub fn convert_value<T: NumCast + Copy + Default, const N: usize>(&self, index: AttributeValueIndex) -> Option<[T; N]> {
        let bytes = self.value_bytes(index)?;
        let data_type = self.data_type();
        let component_size = data_type.byte_length();
        let mut out = [T::default(); N];
        for (c, slot) in out.iter_mut().enumerate().take(self.num_components() as usize) {
            let raw = data_type.read_component(&bytes[c * component_size..])?;
            *slot = <T as NumCast>::from(raw)?;
        }
        Some(out)
    }
}
