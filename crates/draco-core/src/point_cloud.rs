use crate::geometry_attribute::{GeometryAttributeType, PointAttribute};
use crate::status::Status;

/// A set of points carrying any number of attributes.
///
/// Every attribute is addressed by its position in the attribute list. Each
/// attribute maps the shared point indices `0..num_points` to its own values.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PointCloud {
    attributes: Vec<PointAttribute>,
    num_points: usize,
}

impl PointCloud {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_num_points(&mut self, num_points: usize) {
        self.num_points = num_points;
    }

    pub fn num_points(&self) -> usize {
        self.num_points
    }

    /// Appends an attribute and returns its id.
    pub fn add_attribute(&mut self, mut attribute: PointAttribute) -> i32 {
        if self.num_points == 0 && attribute.is_mapping_identity() && attribute.size() > 0 {
            self.num_points = attribute.size();
        }
        let id = self.attributes.len() as i32;
        attribute.set_unique_id(id as u32);
        self.attributes.push(attribute);
        id
    }

    /// Removes the attribute with `att_id`; ids of later attributes shift down.
    pub fn delete_attribute(&mut self, att_id: i32) -> Option<PointAttribute> {
        if att_id < 0 || att_id as usize >= self.attributes.len() {
            return None;
        }
        Some(self.attributes.remove(att_id as usize))
    }

    /// Removes every attribute of `att_type` and returns how many were removed.
    pub fn delete_named_attributes(&mut self, att_type: GeometryAttributeType) -> usize {
        let before = self.attributes.len();
        self.attributes.retain(|att| att.attribute_type() != att_type);
        before - self.attributes.len()
    }

    pub fn num_attributes(&self) -> i32 {
        self.attributes.len() as i32
    }

    pub fn attribute(&self, att_id: i32) -> &PointAttribute {
        &self.attributes[att_id as usize]
    }

    pub fn attribute_mut(&mut self, att_id: i32) -> &mut PointAttribute {
        &mut self.attributes[att_id as usize]
    }

    pub fn attributes(&self) -> &[PointAttribute] {
        &self.attributes
    }

    pub fn num_named_attributes(&self, att_type: GeometryAttributeType) -> usize {
        self.attributes
            .iter()
            .filter(|att| att.attribute_type() == att_type)
            .count()
    }

    pub fn named_attribute_id(&self, att_type: GeometryAttributeType) -> Option<i32> {
        self.attributes
            .iter()
            .position(|att| att.attribute_type() == att_type)
            .map(|i| i as i32)
    }

    pub fn named_attribute(&self, att_type: GeometryAttributeType) -> Option<&PointAttribute> {
        self.attributes.iter().find(|att| att.attribute_type() == att_type)
    }

    pub fn named_attribute_mut(&mut self, att_type: GeometryAttributeType) -> Option<&mut PointAttribute> {
        self.attributes.iter_mut().find(|att| att.attribute_type() == att_type)
    }

    /// Checks every attribute mapping against `num_points`.
    pub fn validate_attributes(&self) -> Status {
        for att in &self.attributes {
            att.validate_mapping(self.num_points)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draco_types::DataType;

    fn attribute(att_type: GeometryAttributeType, size: usize) -> PointAttribute {
        let mut att = PointAttribute::new();
        att.init(att_type, 2, DataType::Float32, false, size);
        att
    }

    #[test]
    fn test_named_attributes() {
        let mut pc = PointCloud::new();
        assert_eq!(pc.add_attribute(attribute(GeometryAttributeType::Position, 4)), 0);
        assert_eq!(pc.add_attribute(attribute(GeometryAttributeType::TexCoord, 4)), 1);
        assert_eq!(pc.num_points(), 4);
        assert_eq!(pc.named_attribute_id(GeometryAttributeType::TexCoord), Some(1));
        assert_eq!(pc.named_attribute_id(GeometryAttributeType::Normal), None);
        assert!(pc.named_attribute(GeometryAttributeType::Color).is_none());
    }

    #[test]
    fn test_delete_named_attributes() {
        let mut pc = PointCloud::new();
        pc.add_attribute(attribute(GeometryAttributeType::Position, 2));
        pc.add_attribute(attribute(GeometryAttributeType::TexCoord, 2));
        pc.add_attribute(attribute(GeometryAttributeType::TexCoord, 2));
        assert_eq!(pc.num_named_attributes(GeometryAttributeType::TexCoord), 2);
        assert_eq!(pc.delete_named_attributes(GeometryAttributeType::TexCoord), 2);
        assert_eq!(pc.num_attributes(), 1);
        assert!(pc.delete_attribute(3).is_none());
        assert!(pc.delete_attribute(0).is_some());
        assert_eq!(pc.num_attributes(), 0);
    }
}
