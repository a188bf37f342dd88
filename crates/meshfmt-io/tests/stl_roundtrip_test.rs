use std::fs;

use meshfmt_core::dense_mesh::DenseMesh;
use meshfmt_io::stl_reader::read_stl;
use meshfmt_io::stl_writer::write_stl;
use meshfmt_io::{Reader, StlReader, StlWriteOptions, StlWriter, Writer};
use tempfile::tempdir;

fn tetrahedron() -> DenseMesh {
    let mut mesh = DenseMesh::new();
    for p in [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]] {
        mesh.append_vertex(p);
    }
    for t in [[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]] {
        mesh.append_triangle(t, 0);
    }
    mesh
}

#[test]
fn binary_file_has_one_record_per_triangle() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tet.stl");
    let mesh = tetrahedron();
    write_stl(&path, &mesh, &StlWriteOptions::default()).unwrap();

    let bytes = fs::read(&path).unwrap();
    let n = mesh.triangle_count();
    assert_eq!(bytes.len(), 84 + 50 * n);
    assert_eq!(u32::from_le_bytes([bytes[80], bytes[81], bytes[82], bytes[83]]) as usize, n);

    let data = read_stl(&path).unwrap();
    assert_eq!(data.triangles.len(), n);
    assert!(!data.incomplete);
    assert_eq!(data.header_text(), "meshfmt_stl");
}

#[test]
fn ascii_and_binary_read_back_the_same_soup() {
    let dir = tempdir().unwrap();
    let mesh = tetrahedron();
    let ascii_path = dir.path().join("tet_ascii.stl");
    let binary_path = dir.path().join("tet_binary.stl");
    write_stl(&ascii_path, &mesh, &StlWriteOptions::default().with_binary(false)).unwrap();
    write_stl(&binary_path, &mesh, &StlWriteOptions::default()).unwrap();

    assert!(fs::read_to_string(&ascii_path).unwrap().starts_with("solid mesh\n"));

    let ascii = StlReader::open(&ascii_path).unwrap().read_mesh().unwrap();
    let binary = StlReader::open(&binary_path).unwrap().read_mesh().unwrap();
    assert_eq!(ascii.vertex_count(), 12);
    assert_eq!(binary.vertex_count(), 12);
    for vid in 0..12 {
        assert_eq!(ascii.position(vid), binary.position(vid));
    }
    for tid in 0..4 {
        assert_eq!(ascii.triangle(tid), binary.triangle(tid));
        // ASCII normals carry six decimals.
        let (a, b) = (ascii.tri_vtx_normals(tid)[0], binary.tri_vtx_normals(tid)[0]);
        for k in 0..3 {
            assert!((a[k] - b[k]).abs() < 1e-5);
        }
    }
    // The first face lies in the z = 0 plane, wound clockwise seen from +Z.
    assert_eq!(binary.tri_vtx_normals(0)[0], [0.0, 0.0, -1.0]);
}

#[test]
fn truncated_binary_keeps_complete_records() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cut.stl");
    write_stl(&path, &tetrahedron(), &StlWriteOptions::default()).unwrap();

    let mut bytes = fs::read(&path).unwrap();
    bytes.truncate(84 + 50 * 2 + 10);
    fs::write(&path, &bytes).unwrap();

    let data = read_stl(&path).unwrap();
    assert_eq!(data.triangles.len(), 2);
    assert!(data.incomplete);
}

#[test]
fn ascii_without_facet_keyword_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.stl");
    fs::write(&path, "solid broken\n  outer loop\n    vertex 0 0 0\n").unwrap();
    assert!(read_stl(&path).is_err());
    assert!(StlReader::open(&path).unwrap().read_mesh().is_err());
}

#[test]
fn writer_trait_names_the_solid() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("named.stl");
    let mut writer = StlWriter::new().with_options(StlWriteOptions::default().with_binary(false));
    writer.add_mesh(&tetrahedron(), Some("tet")).unwrap();
    writer.write(&path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("solid tet\n"));
    assert!(text.trim_end().ends_with("endsolid tet"));
    assert_eq!(text.matches("endfacet").count(), 4);
}
