use draco_mesh::{AttributeKind, AttributeSetBuilder, Options, SharedMesh};
use proptest::prelude::*;

fn positions(max: usize) -> impl Strategy<Value = Vec<[f32; 3]>> {
    prop::collection::vec(prop::array::uniform3(-50.0f32..50.0), 1..max)
}

/// Positions plus faces whose indices stay in bounds.
fn indexed_mesh() -> impl Strategy<Value = SharedMesh> {
    positions(24).prop_flat_map(|positions| {
        let n = positions.len() as u32;
        prop::collection::vec(prop::array::uniform3(0..n), 1..32)
            .prop_map(move |faces| SharedMesh::from_positions(positions.clone()).with_faces(faces))
    })
}

fn largest_extent(positions: &[[f32; 3]]) -> f32 {
    (0..3)
        .map(|c| {
            let lo = positions.iter().map(|p| p[c]).fold(f32::MAX, f32::min);
            let hi = positions.iter().map(|p| p[c]).fold(f32::MIN, f32::max);
            hi - lo
        })
        .fold(0.0, f32::max)
}

proptest! {
    #[test]
    fn prop_corner_mapping_matches_faces(mesh in indexed_mesh()) {
        let built = AttributeSetBuilder::new().build(&mesh).unwrap();
        let points = &built.points;
        prop_assert_eq!(points.num_points(), 3 * mesh.faces.len());
        let mapping = points.mapping(AttributeKind::Position).unwrap();
        for (i, face) in mesh.faces.iter().enumerate() {
            for j in 0..3 {
                prop_assert_eq!(points.face_table()[i][j].0 as usize, 3 * i + j);
                prop_assert_eq!(mapping[3 * i + j], face[j]);
            }
        }
    }

    #[test]
    fn prop_topology_survives_lossless_round_trip(
        mesh in indexed_mesh(),
        level in 0i32..=10,
    ) {
        let options = Options::disabled_quantization().with_compression_level(level);
        let encoded = draco_mesh::encode(&mesh, &options).unwrap();
        let decoded = draco_mesh::decode(&encoded.bytes).unwrap();
        prop_assert_eq!(decoded, mesh);
    }

    #[test]
    fn prop_position_error_within_one_step(
        mesh in indexed_mesh(),
        bits in 4i32..=16,
        level in prop::sample::select(vec![0, 7, 10]),
    ) {
        let options = Options::default()
            .with_pos_quantization_bits(bits)
            .with_compression_level(level);
        let encoded = draco_mesh::encode(&mesh, &options).unwrap();
        let decoded = draco_mesh::decode(&encoded.bytes).unwrap();
        prop_assert_eq!(&decoded.faces, &mesh.faces);
        prop_assert_eq!(decoded.positions.len(), mesh.positions.len());

        let step = largest_extent(&mesh.positions) / ((1u32 << bits) - 1) as f32;
        for (got, want) in decoded.positions.iter().zip(&mesh.positions) {
            for c in 0..3 {
                // One step plus the f32 rounding of the reconstruction.
                let tolerance = step + 4.0 * f32::EPSILON * want[c].abs().max(1.0);
                prop_assert!((got[c] - want[c]).abs() <= tolerance, "{:?} vs {:?}", got, want);
            }
        }
    }

    #[test]
    fn prop_point_clouds_stay_point_clouds(positions in positions(64)) {
        let cloud = SharedMesh::from_positions(positions);
        let encoded = draco_mesh::encode(&cloud, &Options::disabled_quantization()).unwrap();
        let decoded = draco_mesh::decode(&encoded.bytes).unwrap();
        prop_assert!(decoded.faces.is_empty());
        prop_assert!(decoded.uv_faces.is_empty());
        prop_assert_eq!(decoded, cloud);
    }
}
