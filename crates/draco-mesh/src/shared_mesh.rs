/// Mesh in shared-vertex form, as produced by mesh loaders.
///
/// `faces` index into `positions`, `uv_faces` index into `uvs` and run
/// parallel to `faces`. `colors` and `normals` have no index arrays of their
/// own and follow `positions`, so they are only usable when their length
/// matches. A mesh without faces is an unordered point cloud.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SharedMesh {
    pub positions: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub colors: Vec<[u8; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub faces: Vec<[u32; 3]>,
    pub uv_faces: Vec<[u32; 3]>,
}

impl SharedMesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point cloud from positions only.
    pub fn from_positions(positions: Vec<[f32; 3]>) -> Self {
        Self {
            positions,
            ..Self::default()
        }
    }

    pub fn with_faces(mut self, faces: Vec<[u32; 3]>) -> Self {
        self.faces = faces;
        self
    }

    pub fn with_uvs(mut self, uvs: Vec<[f32; 2]>, uv_faces: Vec<[u32; 3]>) -> Self {
        self.uvs = uvs;
        self.uv_faces = uv_faces;
        self
    }

    pub fn with_colors(mut self, colors: Vec<[u8; 3]>) -> Self {
        self.colors = colors;
        self
    }

    pub fn with_normals(mut self, normals: Vec<[f32; 3]>) -> Self {
        self.normals = normals;
        self
    }

    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    pub fn is_point_cloud(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
