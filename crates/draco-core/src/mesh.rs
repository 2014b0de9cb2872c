use crate::geometry_indices::{FaceIndex, PointIndex};
use crate::point_cloud::PointCloud;
use crate::status::{DracoError, Status};
use std::ops::{Deref, DerefMut};

pub type Face = [PointIndex; 3];

/// A triangle mesh: a point cloud plus faces over its point indices.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Mesh {
    point_cloud: PointCloud,
    faces: Vec<Face>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_face(&mut self, face: Face) {
        self.faces.push(face);
    }

    pub fn set_face(&mut self, face_id: FaceIndex, face: Face) {
        if face_id.value() >= self.faces.len() {
            self.faces.resize(face_id.value() + 1, [PointIndex(0); 3]);
        }
        self.faces[face_id.value()] = face;
    }

    pub fn face(&self, face_id: FaceIndex) -> Face {
        self.faces[face_id.value()]
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    pub fn set_num_faces(&mut self, num_faces: usize) {
        self.faces.resize(num_faces, [PointIndex(0); 3]);
    }

    pub fn point_cloud(&self) -> &PointCloud {
        &self.point_cloud
    }

    pub fn into_point_cloud(self) -> PointCloud {
        self.point_cloud
    }

    /// Checks that every face corner references an existing point.
    pub fn validate_faces(&self) -> Status {
        let num_points = self.num_points();
        for (i, face) in self.faces.iter().enumerate() {
            if let Some(p) = face.iter().find(|p| p.value() >= num_points) {
                return Err(DracoError::DracoError(format!(
                    "Face {} references point {} but the mesh has {} points",
                    i, p.0, num_points
                )));
            }
        }
        Ok(())
    }
}

impl From<PointCloud> for Mesh {
    fn from(point_cloud: PointCloud) -> Self {
        Self {
            point_cloud,
            faces: Vec::new(),
        }
    }
}

impl Deref for Mesh {
    type Target = PointCloud;

    fn deref(&self) -> &Self::Target {
        &self.point_cloud
    }
}

impl DerefMut for Mesh {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.point_cloud
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_face_grows() {
        let mut mesh = Mesh::new();
        mesh.set_num_points(6);
        mesh.set_face(FaceIndex(1), [PointIndex(3), PointIndex(4), PointIndex(5)]);
        assert_eq!(mesh.num_faces(), 2);
        assert_eq!(mesh.face(FaceIndex(0)), [PointIndex(0); 3]);
        assert!(mesh.validate_faces().is_ok());
    }

    #[test]
    fn test_validate_faces_out_of_range() {
        let mut mesh = Mesh::new();
        mesh.set_num_points(2);
        mesh.add_face([PointIndex(0), PointIndex(1), PointIndex(2)]);
        assert!(mesh.validate_faces().is_err());
    }
}
