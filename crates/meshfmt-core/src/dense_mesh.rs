//! Dense triangle mesh with per-triangle-corner attributes.

use crate::math_utils::{Index3i, Vector2f, Vector3d, Vector3f};

pub type TriVtxNormals = [Vector3f; 3];
pub type TriVtxUVs = [Vector2f; 3];
pub type TriVtxColors = [Vector3f; 3];

pub const DEFAULT_NORMAL: Vector3f = [0.0, 0.0, 1.0];
pub const DEFAULT_UV: Vector2f = [0.0, 0.0];
pub const DEFAULT_COLOR: Vector3f = [1.0, 1.0, 1.0];

/// Triangle mesh storing positions per vertex and normals, UVs and colors
/// per triangle corner.
///
/// Every triangle always carries a full set of corner attributes; newly
/// created triangles start with [`DEFAULT_NORMAL`], [`DEFAULT_UV`] and
/// [`DEFAULT_COLOR`] and group 0.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DenseMesh {
    positions: Vec<Vector3d>,
    triangles: Vec<Index3i>,
    tri_groups: Vec<i32>,
    tri_normals: Vec<TriVtxNormals>,
    tri_uvs: Vec<TriVtxUVs>,
    tri_colors: Vec<TriVtxColors>,
}

impl DenseMesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resizes the vertex and triangle arrays. New elements take default values.
    pub fn resize(&mut self, num_vertices: usize, num_triangles: usize) {
        self.positions.resize(num_vertices, [0.0; 3]);
        self.triangles.resize(num_triangles, [0; 3]);
        self.tri_groups.resize(num_triangles, 0);
        self.tri_normals.resize(num_triangles, [DEFAULT_NORMAL; 3]);
        self.tri_uvs.resize(num_triangles, [DEFAULT_UV; 3]);
        self.tri_colors.resize(num_triangles, [DEFAULT_COLOR; 3]);
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() && self.triangles.is_empty()
    }

    pub fn position(&self, vid: usize) -> Vector3d {
        self.positions[vid]
    }

    pub fn set_position(&mut self, vid: usize, position: Vector3d) {
        self.positions[vid] = position;
    }

    pub fn positions(&self) -> &[Vector3d] {
        &self.positions
    }

    /// Appends a vertex and returns its index.
    pub fn append_vertex(&mut self, position: Vector3d) -> usize {
        self.positions.push(position);
        self.positions.len() - 1
    }

    pub fn triangle(&self, tid: usize) -> Index3i {
        self.triangles[tid]
    }

    pub fn set_triangle(&mut self, tid: usize, triangle: Index3i) {
        self.triangles[tid] = triangle;
    }

    /// Appends a triangle with default corner attributes and returns its index.
    pub fn append_triangle(&mut self, triangle: Index3i, group: i32) -> usize {
        let tid = self.triangles.len();
        self.resize(self.positions.len(), tid + 1);
        self.triangles[tid] = triangle;
        self.tri_groups[tid] = group;
        tid
    }

    pub fn tri_group(&self, tid: usize) -> i32 {
        self.tri_groups[tid]
    }

    pub fn set_tri_group(&mut self, tid: usize, group: i32) {
        self.tri_groups[tid] = group;
    }

    pub fn tri_vtx_normals(&self, tid: usize) -> TriVtxNormals {
        self.tri_normals[tid]
    }

    pub fn set_tri_vtx_normals(&mut self, tid: usize, normals: TriVtxNormals) {
        self.tri_normals[tid] = normals;
    }

    pub fn tri_vtx_uvs(&self, tid: usize) -> TriVtxUVs {
        self.tri_uvs[tid]
    }

    pub fn set_tri_vtx_uvs(&mut self, tid: usize, uvs: TriVtxUVs) {
        self.tri_uvs[tid] = uvs;
    }

    pub fn tri_vtx_colors(&self, tid: usize) -> TriVtxColors {
        self.tri_colors[tid]
    }

    pub fn set_tri_vtx_colors(&mut self, tid: usize, colors: TriVtxColors) {
        self.tri_colors[tid] = colors;
    }

    /// Appends all vertices and triangles of `other`, offsetting its vertex
    /// indices past the vertices already present.
    pub fn append_mesh(&mut self, other: &DenseMesh) {
        let offset = self.positions.len() as i32;
        self.positions.extend_from_slice(&other.positions);
        self.triangles
            .extend(other.triangles.iter().map(|t| t.map(|v| v + offset)));
        self.tri_groups.extend_from_slice(&other.tri_groups);
        self.tri_normals.extend_from_slice(&other.tri_normals);
        self.tri_uvs.extend_from_slice(&other.tri_uvs);
        self.tri_colors.extend_from_slice(&other.tri_colors);
    }

    /// Axis-aligned bounds of the vertex positions, or `None` for a mesh
    /// without vertices.
    pub fn bounds(&self) -> Option<(Vector3d, Vector3d)> {
        let first = *self.positions.first()?;
        let bounds = self.positions.iter().fold((first, first), |(mut lo, mut hi), p| {
            for k in 0..3 {
                lo[k] = lo[k].min(p[k]);
                hi[k] = hi[k].max(p[k]);
            }
            (lo, hi)
        });
        Some(bounds)
    }
}
