//! Shared-vertex meshes over the Draco-style codec.
//!
//! Loaders hand out meshes whose attributes each carry their own index
//! space: positions are indexed by `faces`, texture coordinates by
//! `uv_faces`. The codec instead wants one point per face corner with every
//! attribute mapped from that point. This crate converts between the two.
//!
//! ```
//! use draco_mesh::{Options, SharedMesh};
//!
//! let mesh = SharedMesh::from_positions(vec![
//!     [0.0, 0.0, 0.0],
//!     [1.0, 0.0, 0.0],
//!     [1.0, 1.0, 0.0],
//!     [0.0, 1.0, 0.0],
//! ])
//! .with_faces(vec![[0, 1, 2], [0, 2, 3]]);
//!
//! let encoded = draco_mesh::encode(&mesh, &Options::disabled_quantization()).unwrap();
//! let decoded = draco_mesh::decode(&encoded.bytes).unwrap();
//! assert_eq!(decoded.faces, mesh.faces);
//! ```

pub mod adapter;
pub mod attribute_decoder;
pub mod builder;
pub mod capabilities;
pub mod corner_point_set;
pub mod error;
pub mod options;
pub mod shared_mesh;

pub use adapter::CodecAdapter;
pub use attribute_decoder::AttributeDecoder;
pub use builder::{AttributeOmission, AttributeSetBuilder, BuildReport, Built, OmissionReason};
pub use capabilities::{AttributeKind, AttributeKinds};
pub use corner_point_set::CornerPointSet;
pub use error::{MeshCodecError, Result};
pub use options::{Options, MAX_COMPRESSION_LEVEL, MAX_QUANTIZATION_BITS};
pub use shared_mesh::SharedMesh;

/// Output of [`encode`].
#[derive(Debug, Clone, PartialEq)]
pub struct Encoded {
    pub bytes: Vec<u8>,
    /// Arrays the builder could not use.
    pub report: BuildReport,
    /// Kinds removed because their quantization bits were negative.
    pub deleted: AttributeKinds,
}

impl Encoded {
    pub fn is_deleted(&self, kind: AttributeKind) -> bool {
        self.deleted.contains(kind)
    }
}

/// Encodes `mesh` with every attribute kind allowed.
pub fn encode(mesh: &SharedMesh, options: &Options) -> Result<Encoded> {
    encode_with(mesh, options, AttributeKinds::ALL)
}

/// Encodes `mesh`, creating only attributes of the given kinds.
pub fn encode_with(mesh: &SharedMesh, options: &Options, kinds: AttributeKinds) -> Result<Encoded> {
    options.validate()?;
    let Built { points, report } =
        AttributeSetBuilder::with_kinds(kinds.intersection(options.capabilities())).build(mesh)?;
    let bytes = CodecAdapter::new().encode(points, options)?;
    Ok(Encoded {
        bytes,
        report,
        deleted: options.deleted_kinds(),
    })
}

/// Decodes bytes produced by [`encode`].
pub fn decode(data: &[u8]) -> Result<SharedMesh> {
    let (points, geometry_type) = CodecAdapter::new().decode(data)?;
    AttributeDecoder::new().decode(&points, geometry_type)
}
