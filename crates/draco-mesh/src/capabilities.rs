use std::fmt;

use draco_core::GeometryAttributeType;

/// Attribute kinds the bookkeeping layer moves through the codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AttributeKind {
    Position,
    TexCoord,
    Color,
    Normal,
}

impl AttributeKind {
    pub const ALL: [AttributeKind; 4] = [
        AttributeKind::Position,
        AttributeKind::TexCoord,
        AttributeKind::Color,
        AttributeKind::Normal,
    ];

    pub fn geometry_type(self) -> GeometryAttributeType {
        match self {
            AttributeKind::Position => GeometryAttributeType::Position,
            AttributeKind::TexCoord => GeometryAttributeType::TexCoord,
            AttributeKind::Color => GeometryAttributeType::Color,
            AttributeKind::Normal => GeometryAttributeType::Normal,
        }
    }

    pub fn from_geometry_type(att_type: GeometryAttributeType) -> Option<Self> {
        match att_type {
            GeometryAttributeType::Position => Some(AttributeKind::Position),
            GeometryAttributeType::TexCoord => Some(AttributeKind::TexCoord),
            GeometryAttributeType::Color => Some(AttributeKind::Color),
            GeometryAttributeType::Normal => Some(AttributeKind::Normal),
            GeometryAttributeType::Generic | GeometryAttributeType::Invalid => None,
        }
    }

    fn bit(self) -> u8 {
        1 << self as u8
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AttributeKind::Position => "position",
            AttributeKind::TexCoord => "tex_coord",
            AttributeKind::Color => "color",
            AttributeKind::Normal => "normal",
        };
        f.write_str(name)
    }
}

/// A set of [`AttributeKind`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttributeKinds(u8);

impl AttributeKinds {
    pub const NONE: AttributeKinds = AttributeKinds(0);
    pub const ALL: AttributeKinds = AttributeKinds(0b1111);
    /// Positions and texture coordinates only.
    pub const POSITIONS_AND_UVS: AttributeKinds = AttributeKinds(0b0011);

    pub fn contains(self, kind: AttributeKind) -> bool {
        self.0 & kind.bit() != 0
    }

    pub fn with(self, kind: AttributeKind) -> Self {
        AttributeKinds(self.0 | kind.bit())
    }

    pub fn without(self, kind: AttributeKind) -> Self {
        AttributeKinds(self.0 & !kind.bit())
    }

    pub fn intersection(self, other: AttributeKinds) -> Self {
        AttributeKinds(self.0 & other.0)
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = AttributeKind> {
        AttributeKind::ALL.into_iter().filter(move |k| self.contains(*k))
    }
}

impl Default for AttributeKinds {
    fn default() -> Self {
        AttributeKinds::ALL
    }
}

impl FromIterator<AttributeKind> for AttributeKinds {
    fn from_iter<I: IntoIterator<Item = AttributeKind>>(iter: I) -> Self {
        iter.into_iter().fold(AttributeKinds::NONE, AttributeKinds::with)
    }
}
