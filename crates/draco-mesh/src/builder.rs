use draco_core::{
    AttributeValueIndex, ComponentType, FaceIndex, GeometryAttributeType, PointAttribute, PointIndex,
};
use tracing::{debug, warn};

use crate::capabilities::{AttributeKind, AttributeKinds};
use crate::corner_point_set::CornerPointSet;
use crate::error::{MeshCodecError, Result};
use crate::shared_mesh::SharedMesh;

/// Why an optional attribute array did not make it into the point set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OmissionReason {
    /// Colors and normals must have one entry per position.
    LengthMismatch { expected: usize, actual: usize },
    /// UVs need one UV face per face.
    MissingUvFaces { faces: usize, uv_faces: usize },
    /// Point clouds have no UV index space.
    NoFaces,
    /// The capability set excluded the kind.
    Disabled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeOmission {
    pub kind: AttributeKind,
    pub reason: OmissionReason,
}

/// Non-fatal findings of a build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub omissions: Vec<AttributeOmission>,
}

impl BuildReport {
    pub fn is_clean(&self) -> bool {
        self.omissions.is_empty()
    }

    pub fn omitted(&self, kind: AttributeKind) -> Option<OmissionReason> {
        self.omissions.iter().find(|o| o.kind == kind).map(|o| o.reason)
    }

    fn omit(&mut self, kind: AttributeKind, reason: OmissionReason) {
        warn!(%kind, ?reason, "attribute omitted from encoded geometry");
        self.omissions.push(AttributeOmission { kind, reason });
    }
}

/// Result of [`AttributeSetBuilder::build`].
#[derive(Debug, Clone, PartialEq)]
pub struct Built {
    pub points: CornerPointSet,
    pub report: BuildReport,
}

/// Expands a shared-vertex mesh into corner points.
///
/// In mesh mode face `i` gets the fresh points `3i, 3i + 1, 3i + 2`, and
/// every attribute maps those points back onto its untouched value array.
/// Without faces the positions become the points directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttributeSetBuilder {
    kinds: AttributeKinds,
}

impl AttributeSetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the attribute kinds the builder may create. Positions are
    /// mandatory and must stay in the set.
    pub fn with_kinds(kinds: AttributeKinds) -> Self {
        Self { kinds }
    }

    pub fn kinds(&self) -> AttributeKinds {
        self.kinds
    }

    pub fn build(&self, mesh: &SharedMesh) -> Result<Built> {
        if !self.kinds.contains(AttributeKind::Position) {
            return Err(MeshCodecError::Config(
                "attribute set must include positions".to_string(),
            ));
        }
        let mut report = BuildReport::default();
        if mesh.positions.is_empty() {
            debug!("no positions, building an empty point set");
            return Ok(Built {
                points: CornerPointSet::new(),
                report,
            });
        }
        check_indices(&mesh.faces, mesh.positions.len(), "face")?;

        let points = if mesh.faces.is_empty() {
            self.build_point_cloud(mesh, &mut report)?
        } else {
            self.build_mesh(mesh, &mut report)?
        };
        debug!(
            num_points = points.num_points(),
            num_faces = points.num_faces(),
            kinds = ?points.kinds(),
            "built corner point set"
        );
        Ok(Built { points, report })
    }

    fn build_mesh(&self, mesh: &SharedMesh, report: &mut BuildReport) -> Result<CornerPointSet> {
        let num_faces = mesh.faces.len();
        let num_points = num_faces
            .checked_mul(3)
            .filter(|n| *n <= u32::MAX as usize)
            .ok_or_else(|| MeshCodecError::InvalidGeometry(format!("{} faces exceed the point limit", num_faces)))?;

        let mut points = CornerPointSet::new();
        let pc = points.mesh_mut();
        pc.set_num_points(num_points);

        let mut positions = value_attribute(GeometryAttributeType::Position, &mesh.positions, false);
        map_corners(&mut positions, &mesh.faces);
        pc.add_attribute(positions);

        if self.admits(AttributeKind::TexCoord, !mesh.uvs.is_empty(), report) {
            if mesh.uv_faces.len() == num_faces {
                check_indices(&mesh.uv_faces, mesh.uvs.len(), "uv face")?;
                let mut uvs = value_attribute(GeometryAttributeType::TexCoord, &mesh.uvs, false);
                map_corners(&mut uvs, &mesh.uv_faces);
                pc.add_attribute(uvs);
            } else {
                report.omit(
                    AttributeKind::TexCoord,
                    OmissionReason::MissingUvFaces {
                        faces: num_faces,
                        uv_faces: mesh.uv_faces.len(),
                    },
                );
            }
        }

        if let Some(mut colors) = self.per_position(AttributeKind::Color, &mesh.colors, mesh, report, true) {
            map_corners(&mut colors, &mesh.faces);
            pc.add_attribute(colors);
        }
        if let Some(mut normals) = self.per_position(AttributeKind::Normal, &mesh.normals, mesh, report, false) {
            map_corners(&mut normals, &mesh.faces);
            pc.add_attribute(normals);
        }

        for i in 0..num_faces {
            let first = (3 * i) as u32;
            pc.set_face(
                FaceIndex(i as u32),
                [PointIndex(first), PointIndex(first + 1), PointIndex(first + 2)],
            );
        }
        Ok(points)
    }

    fn build_point_cloud(&self, mesh: &SharedMesh, report: &mut BuildReport) -> Result<CornerPointSet> {
        let mut points = CornerPointSet::new();
        let pc = points.mesh_mut();
        pc.set_num_points(mesh.positions.len());
        pc.add_attribute(value_attribute(GeometryAttributeType::Position, &mesh.positions, false));

        if self.admits(AttributeKind::TexCoord, !mesh.uvs.is_empty(), report) {
            report.omit(AttributeKind::TexCoord, OmissionReason::NoFaces);
        }
        if let Some(colors) = self.per_position(AttributeKind::Color, &mesh.colors, mesh, report, true) {
            pc.add_attribute(colors);
        }
        if let Some(normals) = self.per_position(AttributeKind::Normal, &mesh.normals, mesh, report, false) {
            pc.add_attribute(normals);
        }
        Ok(points)
    }

    /// True when `kind` has data and is allowed. Data of a disallowed kind is
    /// reported as disabled.
    fn admits(&self, kind: AttributeKind, has_data: bool, report: &mut BuildReport) -> bool {
        if !has_data {
            return false;
        }
        if !self.kinds.contains(kind) {
            report.omit(kind, OmissionReason::Disabled);
            return false;
        }
        true
    }

    /// Attribute for an array that follows the position index space.
    fn per_position<T: ComponentType, const N: usize>(
        &self,
        kind: AttributeKind,
        values: &[[T; N]],
        mesh: &SharedMesh,
        report: &mut BuildReport,
        normalized: bool,
    ) -> Option<PointAttribute> {
        if !self.admits(kind, !values.is_empty(), report) {
            return None;
        }
        if values.len() != mesh.positions.len() {
            report.omit(
                kind,
                OmissionReason::LengthMismatch {
                    expected: mesh.positions.len(),
                    actual: values.len(),
                },
            );
            return None;
        }
        Some(value_attribute(kind.geometry_type(), values, normalized))
    }
}

/// Attribute holding `values` verbatim with identity mapping.
fn value_attribute<T: ComponentType, const N: usize>(
    att_type: GeometryAttributeType,
    values: &[[T; N]],
    normalized: bool,
) -> PointAttribute {
    let mut att = PointAttribute::new();
    att.init(att_type, N as u8, T::DATA_TYPE, normalized, values.len());
    for (i, value) in values.iter().enumerate() {
        att.set_attribute_value(AttributeValueIndex(i as u32), &value[..]);
    }
    att
}

/// Maps corner point `3i + j` to `faces[i][j]`.
fn map_corners(att: &mut PointAttribute, faces: &[[u32; 3]]) {
    att.set_explicit_mapping(faces.len() * 3);
    for (i, face) in faces.iter().enumerate() {
        for (j, index) in face.iter().enumerate() {
            att.set_point_map_entry(PointIndex((3 * i + j) as u32), AttributeValueIndex(*index));
        }
    }
}

fn check_indices(faces: &[[u32; 3]], len: usize, what: &str) -> Result<()> {
    for (i, face) in faces.iter().enumerate() {
        for (j, index) in face.iter().enumerate() {
            if *index as usize >= len {
                return Err(MeshCodecError::InvalidGeometry(format!(
                    "{} {} corner {} references index {} but only {} values exist",
                    what, i, j, index, len
                )));
            }
        }
    }
    Ok(())
}
