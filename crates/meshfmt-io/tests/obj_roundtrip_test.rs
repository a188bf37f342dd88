use std::fs;

use meshfmt_core::dense_mesh::DenseMesh;
use meshfmt_core::math_utils::INVALID_INDEX;
use meshfmt_io::obj_reader::{read_obj, read_obj_from};
use meshfmt_io::obj_writer::{write_obj_file, write_obj_mesh_file};
use meshfmt_io::{
    obj_format_data_to_dense_mesh, ObjFaceType, ObjReadOptions, ObjReader, ObjToMeshOptions, ObjWriteOptions,
    Reader,
};
use tempfile::tempdir;

fn grid_mesh() -> DenseMesh {
    // 3x3 vertex grid, two triangles per cell, groups by row.
    let mut mesh = DenseMesh::new();
    for y in 0..3 {
        for x in 0..3 {
            mesh.append_vertex([x as f64 * 0.5, y as f64 * 0.25, 1.0]);
        }
    }
    for y in 0..2 {
        for x in 0..2 {
            let v = y * 3 + x;
            mesh.append_triangle([v, v + 1, v + 4], y);
            mesh.append_triangle([v, v + 4, v + 3], y);
        }
    }
    mesh
}

fn sorted_triangles(mesh: &DenseMesh) -> Vec<[i32; 3]> {
    let mut triangles: Vec<[i32; 3]> = (0..mesh.triangle_count()).map(|t| mesh.triangle(t)).collect();
    triangles.sort();
    triangles
}

#[test]
fn dense_mesh_survives_write_and_read() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("grid.obj");
    let mesh = grid_mesh();

    write_obj_mesh_file(&path, &mesh, &ObjWriteOptions::default()).unwrap();
    let read_back = ObjReader::open(&path).unwrap().read_mesh().unwrap();

    assert_eq!(read_back.vertex_count(), mesh.vertex_count());
    for vid in 0..mesh.vertex_count() {
        let (a, b) = (mesh.position(vid), read_back.position(vid));
        for k in 0..3 {
            assert!((a[k] - b[k]).abs() < 1e-6, "vertex {} differs: {:?} vs {:?}", vid, a, b);
        }
    }
    assert_eq!(sorted_triangles(&read_back), sorted_triangles(&mesh));

    let mut groups: Vec<i32> = (0..read_back.triangle_count()).map(|t| read_back.tri_group(t)).collect();
    groups.sort();
    assert_eq!(groups, vec![1, 1, 1, 1, 2, 2, 2, 2]);
}

#[test]
fn polygons_and_header_survive_ifm_round_trip() {
    let text = "# exported by a modeling tool\n\
                # units: meters\n\
                v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nv -0.5 0.5 0\nv 2 0.5 0\n\
                vt 0 0\nvt 1 0\nvt 1 1\nvt 0 1\n\
                vn 0 0 1\n\
                f 1/1/1 2/2/1 3/3/1 4/4/1\n\
                f 1 4 5\n\
                f 2 6 3 4 1\n";
    let data = read_obj_from(text.as_bytes(), &ObjReadOptions::default()).unwrap();

    let dir = tempdir().unwrap();
    let path = dir.path().join("poly.obj");
    write_obj_file(&path, &data, &ObjWriteOptions::default()).unwrap();

    let written = fs::read_to_string(&path).unwrap();
    assert!(written.starts_with("# exported by a modeling tool\n# units: meters\n"));

    let again = read_obj(&path, &ObjReadOptions::default()).unwrap();
    assert_eq!(again.header_comments, data.header_comments);
    assert_eq!(again.vertex_positions, data.vertex_positions);
    assert_eq!(again.uvs, data.uvs);
    assert_eq!(again.normals, data.normals);
    assert_eq!(again.quads, data.quads);
    assert_eq!(again.triangles, data.triangles);
    assert_eq!(again.polygons, data.polygons);
    let kinds: Vec<ObjFaceType> = again.face_stream.iter().map(|f| f.face_type).collect();
    assert_eq!(kinds, vec![ObjFaceType::Quad, ObjFaceType::Triangle, ObjFaceType::Polygon]);
}

#[test]
fn out_of_range_uv_is_tolerated() {
    let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nvt 1 0\nf 1/1 2/2 3/9\n";
    let data = read_obj_from(text.as_bytes(), &ObjReadOptions::default()).unwrap();
    assert_eq!(data.triangles[0].uvs, [0, 1, 8]);

    let mesh = obj_format_data_to_dense_mesh(&data, &ObjToMeshOptions::default());
    assert_eq!(mesh.triangle_count(), 1);
    assert_eq!(mesh.tri_vtx_uvs(0)[2], [0.0, 0.0]);

    let dir = tempdir().unwrap();
    let path = dir.path().join("bad_uv.obj");
    write_obj_file(&path, &data, &ObjWriteOptions::default()).unwrap();
    let written = fs::read_to_string(&path).unwrap();
    assert!(written.lines().any(|l| l == "f 1 2 3"));

    let again = read_obj(&path, &ObjReadOptions::default()).unwrap();
    assert_eq!(again.triangles[0].uvs, [INVALID_INDEX; 3]);
}

#[test]
fn meshmixer_groups_round_trip_as_group_lines() {
    let text = "# mm_gid 4\nv 0 0 0\nv 1 0 0\nv 0 1 0\nv 1 1 0\nf 1 2 3\n# mm_gid 9\nf 2 4 3\n";
    let data = read_obj_from(text.as_bytes(), &ObjReadOptions::default()).unwrap();
    let groups: Vec<i32> = data.face_stream.iter().map(|f| f.group_id).collect();
    assert_eq!(groups, vec![4, 9]);

    let dir = tempdir().unwrap();
    let path = dir.path().join("groups.obj");
    write_obj_file(&path, &data, &ObjWriteOptions::default()).unwrap();
    let written = fs::read_to_string(&path).unwrap();
    let group_lines: Vec<&str> = written.lines().filter(|l| l.starts_with("g ")).collect();
    assert_eq!(group_lines, vec!["g 4", "g 9"]);
}

#[test]
fn missing_file_is_reported() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("absent.obj");
    assert!(<ObjReader as Reader>::open(&missing).is_err());
    assert!(read_obj(&missing, &ObjReadOptions::default()).is_err());
}
