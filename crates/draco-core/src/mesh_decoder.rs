use tracing::debug;

use crate::compression_config::{EncodedGeometryType, SequentialEncodingMethod};
use crate::decoder_buffer::DecoderBuffer;
use crate::geometry_indices::PointIndex;
use crate::mesh::Mesh;
use crate::point_cloud_decoder::{decode_header, DracoHeader};
use crate::sequential_attribute_decoder::{decode_attributes, decode_indices};
use crate::status::{DracoError, Status};

pub struct MeshDecoder {
    header: Option<DracoHeader>,
}

impl Default for MeshDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl MeshDecoder {
    pub fn new() -> Self {
        Self { header: None }
    }

    pub fn header(&self) -> Option<&DracoHeader> {
        self.header.as_ref()
    }

    pub fn decode(&mut self, in_buffer: &mut DecoderBuffer, out_mesh: &mut Mesh) -> Status {
        let header = decode_header(in_buffer)?;
        self.header = Some(header);
        if header.geometry_type != EncodedGeometryType::TriangularMesh {
            return Err(DracoError::DracoError(format!(
                "Expected a mesh stream, found {:?}",
                header.geometry_type
            )));
        }
        decode_mesh_data(in_buffer, header.method, out_mesh)
    }
}

pub(crate) fn decode_mesh_data(
    in_buffer: &mut DecoderBuffer,
    method: SequentialEncodingMethod,
    mesh: &mut Mesh,
) -> Status {
    // Every face needs at least three bytes of connectivity.
    let num_faces = in_buffer.decode_count(in_buffer.remaining_size() / 3, "face count")?;
    let num_points = in_buffer.decode_count(u32::MAX as usize, "point count")?;
    mesh.set_num_points(num_points);

    let corners = decode_indices(in_buffer, num_faces * 3, num_points, method)?;
    mesh.set_num_faces(0);
    for face in corners.chunks_exact(3) {
        mesh.add_face([PointIndex(face[0]), PointIndex(face[1]), PointIndex(face[2])]);
    }

    decode_attributes(in_buffer, mesh, method)?;
    debug!(num_faces, num_points, num_attributes = mesh.num_attributes(), "decoded mesh");
    Ok(())
}
