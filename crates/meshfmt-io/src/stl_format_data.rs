//! STL triangle-soup records and their conversion to a dense mesh.

use meshfmt_core::dense_mesh::DenseMesh;
use meshfmt_core::math_utils::{to_f64, Vector3f};

pub const STL_HEADER_SIZE: usize = 80;
pub const STL_TRIANGLE_RECORD_SIZE: usize = 50;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StlTriangle {
    pub normal: Vector3f,
    pub vertex1: Vector3f,
    pub vertex2: Vector3f,
    pub vertex3: Vector3f,
    /// Attribute byte count of the binary record; zero for ASCII input.
    pub attribute: u16,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StlMeshData {
    /// The 80-byte binary header, kept as read. Empty for ASCII input.
    pub header: Vec<u8>,
    pub triangles: Vec<StlTriangle>,
    /// Set when a binary file ended before its declared triangle count.
    pub incomplete: bool,
}

impl StlMeshData {
    /// Header bytes up to the first NUL, as text.
    pub fn header_text(&self) -> String {
        let end = self.header.iter().position(|&b| b == 0).unwrap_or(self.header.len());
        String::from_utf8_lossy(&self.header[..end]).into_owned()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StlFormat {
    Ascii,
    Binary,
}

/// Convert a triangle soup into a dense mesh.
///
/// Every triangle gets three new vertices; no welding is performed. A
/// non-zero facet normal is copied to the triangle's three corner normals.
pub fn stl_mesh_to_dense_mesh(data: &StlMeshData) -> DenseMesh {
    let num_triangles = data.triangles.len();
    let mut mesh = DenseMesh::new();
    mesh.resize(3 * num_triangles, num_triangles);

    for (tid, triangle) in data.triangles.iter().enumerate() {
        let base = 3 * tid;
        mesh.set_position(base, to_f64(triangle.vertex1));
        mesh.set_position(base + 1, to_f64(triangle.vertex2));
        mesh.set_position(base + 2, to_f64(triangle.vertex3));
        let first = base as i32;
        mesh.set_triangle(tid, [first, first + 1, first + 2]);
        if triangle.normal != [0.0; 3] {
            mesh.set_tri_vtx_normals(tid, [triangle.normal; 3]);
        }
    }
    mesh
}
