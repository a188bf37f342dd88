use meshfmt_core::{AttributeCompressor, AttributeVertexBlender, DenseMesh, PolyMesh};
use proptest::prelude::*;

proptest! {
    #[test]
    fn equal_corner_values_share_one_index(values in prop::collection::vec(0u8..6, 1..64)) {
        // Small integer-valued normals so duplicates are frequent.
        let corners: Vec<[f64; 3]> = values.iter().map(|&v| [f64::from(v), 0.0, 1.0]).collect();

        let mut compressor = AttributeCompressor::new();
        for &c in &corners {
            compressor.insert_value(c);
        }
        let mut distinct = values.clone();
        distinct.sort_unstable();
        distinct.dedup();
        prop_assert_eq!(compressor.len(), distinct.len());

        for (i, &a) in corners.iter().enumerate() {
            let ia = compressor.get_index_for_value(a, false);
            prop_assert!(ia.is_some());
            prop_assert_eq!(compressor.unique_values()[ia.unwrap()], a);
            for &b in &corners[i + 1..] {
                if a == b {
                    prop_assert_eq!(ia, compressor.get_index_for_value(b, false));
                }
            }
        }
    }

    #[test]
    fn blended_value_is_the_mean(colors in prop::collection::vec(0.0f64..1.0, 1..16)) {
        let mut blender = AttributeVertexBlender::new(2, [0.0f64; 1]);
        for &c in &colors {
            blender.accumulate_value(0, [c]);
        }
        let mean = colors.iter().sum::<f64>() / colors.len() as f64;
        prop_assert!((blender.get_vertex_value(0)[0] - mean).abs() < 1e-12);
        prop_assert_eq!(blender.get_vertex_value(1), [0.0]);
    }
}

#[test]
fn dense_and_poly_meshes_agree_on_a_triangle() {
    let positions = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];

    let mut dense = DenseMesh::new();
    let mut poly = PolyMesh::new();
    for p in positions {
        dense.append_vertex(p);
        poly.append_vertex(p);
    }
    dense.append_triangle([0, 1, 2], 0);
    poly.append_triangle([0, 1, 2]);

    assert_eq!(dense.triangle_count(), poly.face_count());
    assert_eq!(dense.triangle(0), poly.triangle(poly.face(0)));
    assert_eq!(dense.bounds(), Some(([0.0; 3], [1.0, 1.0, 0.0])));
}
