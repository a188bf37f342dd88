//! Builds a small mesh and writes it through every writer, then reads each
//! file back with the matching reader.

use meshfmt_core::dense_mesh::DenseMesh;
use meshfmt_core::status::StatusResult;
use meshfmt_io::{ObjReader, ObjWriter, Reader, StlReader, StlWriteOptions, StlWriter, Writer};

fn main() -> StatusResult<()> {
    let mesh = create_test_mesh();
    let dir = std::env::temp_dir();

    println!("=== Unified Writer/Reader Demo ===\n");

    let obj_path = dir.join("meshfmt_demo.obj");
    write_with_trait(ObjWriter::new(), &mesh, &obj_path, "OBJ")?;
    read_with_trait::<ObjReader>(&obj_path, "OBJ")?;

    let stl_path = dir.join("meshfmt_demo.stl");
    write_with_trait(StlWriter::new(), &mesh, &stl_path, "STL (binary)")?;
    read_with_trait::<StlReader>(&stl_path, "STL (binary)")?;

    let ascii_path = dir.join("meshfmt_demo_ascii.stl");
    let ascii = StlWriter::new().with_options(StlWriteOptions::default().with_binary(false));
    write_with_trait(ascii, &mesh, &ascii_path, "STL (ASCII)")?;
    read_with_trait::<StlReader>(&ascii_path, "STL (ASCII)")?;

    Ok(())
}

fn write_with_trait<W: Writer>(mut writer: W, mesh: &DenseMesh, path: &std::path::Path, label: &str) -> StatusResult<()> {
    writer.add_mesh(mesh, Some("Pyramid"))?;
    writer.write(path)?;
    println!(
        "wrote {:<13} {} vertices, {} faces -> {}",
        label,
        writer.vertex_count(),
        writer.face_count(),
        path.display()
    );
    Ok(())
}

fn read_with_trait<R: Reader>(path: &std::path::Path, label: &str) -> StatusResult<()> {
    let mesh = R::open(path)?.read_mesh()?;
    println!(
        "read  {:<13} {} vertices, {} triangles",
        label,
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    Ok(())
}

/// A square pyramid with one group per side.
fn create_test_mesh() -> DenseMesh {
    let mut mesh = DenseMesh::new();
    for p in [
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [1.0, 1.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.5, 0.5, 1.0],
    ] {
        mesh.append_vertex(p);
    }
    mesh.append_triangle([0, 2, 1], 0);
    mesh.append_triangle([0, 3, 2], 0);
    for (side, [a, b]) in [[0, 1], [1, 2], [2, 3], [3, 0]].into_iter().enumerate() {
        mesh.append_triangle([a, b, 4], side as i32 + 1);
    }
    mesh
}
