use draco_core::{DracoError, Face, Mesh, PointAttribute, PointIndex};

use crate::capabilities::{AttributeKind, AttributeKinds};
use crate::error::{MeshCodecError, Result};

/// Codec-facing form of a mesh or point cloud.
///
/// Every attribute kind appears at most once. Each attribute keeps its value
/// array verbatim and maps the `num_points` points onto it. In mesh mode the
/// face table references corner points, not original vertices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CornerPointSet {
    mesh: Mesh,
}

impl CornerPointSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a decoded mesh after checking the one-attribute-per-kind and
    /// mapping invariants.
    pub fn from_mesh(mesh: Mesh) -> Result<Self> {
        for kind in AttributeKind::ALL {
            let count = mesh.num_named_attributes(kind.geometry_type());
            if count > 1 {
                return Err(MeshCodecError::Codec(DracoError::DracoError(format!(
                    "{} {} attributes in decoded geometry",
                    count, kind
                ))));
            }
        }
        mesh.validate_attributes()?;
        mesh.validate_faces()?;
        Ok(Self { mesh })
    }

    pub(crate) fn mesh_mut(&mut self) -> &mut Mesh {
        &mut self.mesh
    }

    pub fn as_mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn into_mesh(self) -> Mesh {
        self.mesh
    }

    pub fn num_points(&self) -> usize {
        self.mesh.num_points()
    }

    pub fn num_faces(&self) -> usize {
        self.mesh.num_faces()
    }

    /// Corner point triples, one per face. Empty for point clouds.
    pub fn face_table(&self) -> &[Face] {
        self.mesh.faces()
    }

    pub fn is_empty(&self) -> bool {
        self.num_points() == 0
    }

    pub fn attribute(&self, kind: AttributeKind) -> Option<&PointAttribute> {
        self.mesh.named_attribute(kind.geometry_type())
    }

    pub fn kinds(&self) -> AttributeKinds {
        AttributeKind::ALL
            .into_iter()
            .filter(|kind| self.attribute(*kind).is_some())
            .collect()
    }

    /// Value index of every point for `kind`, in point order.
    pub fn mapping(&self, kind: AttributeKind) -> Option<Vec<u32>> {
        let att = self.attribute(kind)?;
        Some(
            (0..self.num_points())
                .map(|p| att.mapped_index(PointIndex(p as u32)).0)
                .collect(),
        )
    }

    /// Removes the attribute of `kind`. Returns whether one was present.
    pub fn delete_attribute(&mut self, kind: AttributeKind) -> bool {
        self.mesh.delete_named_attributes(kind.geometry_type()) > 0
    }
}
