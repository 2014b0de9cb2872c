use draco_core::{AttributeValueIndex, DracoError, EncodedGeometryType, Face, PointAttribute};
use num_traits::NumCast;

use crate::capabilities::AttributeKind;
use crate::corner_point_set::CornerPointSet;
use crate::error::{MeshCodecError, Result};
use crate::shared_mesh::SharedMesh;

/// Tag reported for the invalid geometry type marker.
const INVALID_GEOMETRY_TAG: u8 = u8::MAX;

/// Rebuilds a shared-vertex mesh from a decoded [`CornerPointSet`].
///
/// Value arrays come back verbatim. Face indices are recovered through the
/// position mapping, UV face indices through the UV mapping. Nothing is
/// returned unless every array converted cleanly.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttributeDecoder;

impl AttributeDecoder {
    pub fn new() -> Self {
        Self
    }

    pub fn decode(&self, points: &CornerPointSet, geometry_type: EncodedGeometryType) -> Result<SharedMesh> {
        let is_mesh = match geometry_type {
            EncodedGeometryType::TriangularMesh => true,
            EncodedGeometryType::PointCloud => false,
            EncodedGeometryType::InvalidGeometryType => {
                return Err(MeshCodecError::GeometryType(INVALID_GEOMETRY_TAG))
            }
        };
        let Some(position_att) = points.attribute(AttributeKind::Position).filter(|att| !att.is_empty())
        else {
            return Ok(SharedMesh::new());
        };

        let positions = read_values::<f32, 3>(position_att, AttributeKind::Position)?;
        let colors = match points.attribute(AttributeKind::Color) {
            Some(att) => read_values::<u8, 3>(att, AttributeKind::Color)?,
            None => Vec::new(),
        };
        let normals = match points.attribute(AttributeKind::Normal) {
            Some(att) => read_values::<f32, 3>(att, AttributeKind::Normal)?,
            None => Vec::new(),
        };
        if !is_mesh {
            return Ok(SharedMesh {
                positions,
                colors,
                normals,
                ..SharedMesh::default()
            });
        }

        let faces = face_indices(position_att, points.face_table(), AttributeKind::Position)?;
        let (uvs, uv_faces) = match points.attribute(AttributeKind::TexCoord) {
            Some(att) => (
                read_values::<f32, 2>(att, AttributeKind::TexCoord)?,
                face_indices(att, points.face_table(), AttributeKind::TexCoord)?,
            ),
            None => (Vec::new(), Vec::new()),
        };
        Ok(SharedMesh {
            positions,
            uvs,
            colors,
            normals,
            faces,
            uv_faces,
        })
    }
}

fn read_values<T: NumCast + Copy + Default, const N: usize>(
    att: &PointAttribute,
    kind: AttributeKind,
) -> Result<Vec<[T; N]>> {
    (0..att.size())
        .map(|i| {
            att.convert_value::<T, N>(AttributeValueIndex(i as u32)).ok_or_else(|| {
                MeshCodecError::Codec(DracoError::DracoError(format!(
                    "{} value {} cannot be converted",
                    kind, i
                )))
            })
        })
        .collect()
}

fn face_indices(att: &PointAttribute, face_table: &[Face], kind: AttributeKind) -> Result<Vec<[u32; 3]>> {
    let mut out = Vec::with_capacity(face_table.len());
    for face in face_table {
        let mut indices = [0u32; 3];
        for (slot, point) in indices.iter_mut().zip(face) {
            let index = att.mapped_index(*point);
            if index.value() >= att.size() {
                return Err(MeshCodecError::Codec(DracoError::DracoError(format!(
                    "{} mapping of point {} points past {} values",
                    kind,
                    point.0,
                    att.size()
                ))));
            }
            *slot = index.0;
        }
        out.push(indices);
    }
    Ok(out)
}
