//! Polygonal mesh with mixed triangle, quad and n-gon faces.
//!
//! Face topology lives in three pools addressed by [`Face`] handles. Normals,
//! UVs and colors are stored in numbered attribute sets, each an indexed pool
//! of values plus one index per face corner. Face groups are stored in
//! numbered group sets holding one id per face.

use crate::math_utils::{Index3i, Index4i, Vector2d, Vector3d, Vector3f, Vector4f, INVALID_INDEX};

/// Handle to a face, tagged with the pool it lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    Triangle(usize),
    Quad(usize),
    Polygon(usize),
}

impl Face {
    pub fn is_triangle(&self) -> bool {
        matches!(self, Face::Triangle(_))
    }

    pub fn is_quad(&self) -> bool {
        matches!(self, Face::Quad(_))
    }

    pub fn is_polygon(&self) -> bool {
        matches!(self, Face::Polygon(_))
    }

    /// Index of the face within its pool.
    pub fn pool_index(&self) -> usize {
        match *self {
            Face::Triangle(i) | Face::Quad(i) | Face::Polygon(i) => i,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polygon {
    pub vertices: Vec<i32>,
}

/// Indexed attribute channel: a pool of values and per-face-corner indices
/// into it. Corners without a value hold [`INVALID_INDEX`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexedAttributeSet<T> {
    values: Vec<T>,
    corner_indices: Vec<Vec<i32>>,
}

impl<T: Copy> IndexedAttributeSet<T> {
    fn with_faces<I: IntoIterator<Item = usize>>(face_vertex_counts: I) -> Self {
        Self {
            values: Vec::new(),
            corner_indices: face_vertex_counts
                .into_iter()
                .map(|n| vec![INVALID_INDEX; n])
                .collect(),
        }
    }

    fn push_face(&mut self, vertex_count: usize) {
        self.corner_indices.push(vec![INVALID_INDEX; vertex_count]);
    }

    pub fn value_count(&self) -> usize {
        self.values.len()
    }

    pub fn value(&self, index: usize) -> T {
        self.values[index]
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn append_value(&mut self, value: T) -> i32 {
        self.values.push(value);
        (self.values.len() - 1) as i32
    }

    pub fn corner_index(&self, fid: usize, corner: usize) -> i32 {
        self.corner_indices
            .get(fid)
            .and_then(|c| c.get(corner))
            .copied()
            .unwrap_or(INVALID_INDEX)
    }

    pub fn set_corner_index(&mut self, fid: usize, corner: usize, index: i32) {
        if let Some(slot) = self.corner_indices.get_mut(fid).and_then(|c| c.get_mut(corner)) {
            *slot = index;
        }
    }

    /// Value referenced by the corner, if the reference is valid.
    pub fn corner_value(&self, fid: usize, corner: usize) -> Option<T> {
        let index = self.corner_index(fid, corner);
        if index < 0 {
            return None;
        }
        self.values.get(index as usize).copied()
    }
}

pub type NormalSet = IndexedAttributeSet<Vector3f>;
pub type UVSet = IndexedAttributeSet<Vector2d>;
pub type ColorSet = IndexedAttributeSet<Vector4f>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolyMesh {
    positions: Vec<Vector3d>,
    triangles: Vec<Index3i>,
    quads: Vec<Index4i>,
    polygons: Vec<Polygon>,
    faces: Vec<Face>,
    normal_sets: Vec<NormalSet>,
    uv_sets: Vec<UVSet>,
    color_sets: Vec<ColorSet>,
    group_sets: Vec<Vec<i32>>,
}

impl PolyMesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn position(&self, vid: usize) -> Vector3d {
        self.positions[vid]
    }

    pub fn set_position(&mut self, vid: usize, position: Vector3d) {
        self.positions[vid] = position;
    }

    pub fn append_vertex(&mut self, position: Vector3d) -> usize {
        self.positions.push(position);
        self.positions.len() - 1
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn quad_count(&self) -> usize {
        self.quads.len()
    }

    pub fn polygon_count(&self) -> usize {
        self.polygons.len()
    }

    pub fn face(&self, fid: usize) -> Face {
        self.faces[fid]
    }

    pub fn append_triangle(&mut self, triangle: Index3i) -> usize {
        self.triangles.push(triangle);
        self.push_face(Face::Triangle(self.triangles.len() - 1), 3)
    }

    pub fn append_quad(&mut self, quad: Index4i) -> usize {
        self.quads.push(quad);
        self.push_face(Face::Quad(self.quads.len() - 1), 4)
    }

    pub fn append_polygon(&mut self, vertices: Vec<i32>) -> usize {
        let n = vertices.len();
        self.polygons.push(Polygon { vertices });
        self.push_face(Face::Polygon(self.polygons.len() - 1), n)
    }

    fn push_face(&mut self, face: Face, vertex_count: usize) -> usize {
        self.faces.push(face);
        for set in &mut self.normal_sets {
            set.push_face(vertex_count);
        }
        for set in &mut self.uv_sets {
            set.push_face(vertex_count);
        }
        for set in &mut self.color_sets {
            set.push_face(vertex_count);
        }
        for set in &mut self.group_sets {
            set.push(0);
        }
        self.faces.len() - 1
    }

    pub fn triangle(&self, face: Face) -> Index3i {
        self.triangles[face.pool_index()]
    }

    pub fn quad(&self, face: Face) -> Index4i {
        self.quads[face.pool_index()]
    }

    pub fn polygon(&self, face: Face) -> &Polygon {
        &self.polygons[face.pool_index()]
    }

    pub fn face_vertex_count(&self, face: Face) -> usize {
        match face {
            Face::Triangle(_) => 3,
            Face::Quad(_) => 4,
            Face::Polygon(i) => self.polygons[i].vertices.len(),
        }
    }

    pub fn face_vertex(&self, face: Face, corner: usize) -> i32 {
        match face {
            Face::Triangle(i) => self.triangles[i][corner],
            Face::Quad(i) => self.quads[i][corner],
            Face::Polygon(i) => self.polygons[i].vertices[corner],
        }
    }

    /// Vertex indices of the face in corner order.
    pub fn face_vertices(&self, face: Face) -> Vec<i32> {
        (0..self.face_vertex_count(face))
            .map(|j| self.face_vertex(face, j))
            .collect()
    }

    fn face_vertex_counts(&self) -> Vec<usize> {
        self.faces.iter().map(|f| self.face_vertex_count(*f)).collect()
    }

    // Normal sets

    pub fn add_normal_set(&mut self) -> usize {
        let set = NormalSet::with_faces(self.face_vertex_counts());
        self.normal_sets.push(set);
        self.normal_sets.len() - 1
    }

    pub fn num_normal_sets(&self) -> usize {
        self.normal_sets.len()
    }

    pub fn normal_set(&self, set: usize) -> &NormalSet {
        &self.normal_sets[set]
    }

    pub fn normal_set_mut(&mut self, set: usize) -> &mut NormalSet {
        &mut self.normal_sets[set]
    }

    pub fn normal_count(&self, set: usize) -> usize {
        self.normal_sets.get(set).map_or(0, |s| s.value_count())
    }

    pub fn normal(&self, index: usize, set: usize) -> Vector3f {
        self.normal_sets[set].value(index)
    }

    pub fn face_vertex_normal_index(&self, fid: usize, corner: usize, set: usize) -> i32 {
        self.normal_sets[set].corner_index(fid, corner)
    }

    // UV sets

    pub fn add_uv_set(&mut self) -> usize {
        let set = UVSet::with_faces(self.face_vertex_counts());
        self.uv_sets.push(set);
        self.uv_sets.len() - 1
    }

    pub fn num_uv_sets(&self) -> usize {
        self.uv_sets.len()
    }

    pub fn uv_set(&self, set: usize) -> &UVSet {
        &self.uv_sets[set]
    }

    pub fn uv_set_mut(&mut self, set: usize) -> &mut UVSet {
        &mut self.uv_sets[set]
    }

    pub fn uv_count(&self, set: usize) -> usize {
        self.uv_sets.get(set).map_or(0, |s| s.value_count())
    }

    pub fn uv(&self, index: usize, set: usize) -> Vector2d {
        self.uv_sets[set].value(index)
    }

    pub fn face_vertex_uv_index(&self, fid: usize, corner: usize, set: usize) -> i32 {
        self.uv_sets[set].corner_index(fid, corner)
    }

    // Color sets

    pub fn add_color_set(&mut self) -> usize {
        let set = ColorSet::with_faces(self.face_vertex_counts());
        self.color_sets.push(set);
        self.color_sets.len() - 1
    }

    pub fn num_color_sets(&self) -> usize {
        self.color_sets.len()
    }

    pub fn color_set(&self, set: usize) -> &ColorSet {
        &self.color_sets[set]
    }

    pub fn color_set_mut(&mut self, set: usize) -> &mut ColorSet {
        &mut self.color_sets[set]
    }

    pub fn color_count(&self, set: usize) -> usize {
        self.color_sets.get(set).map_or(0, |s| s.value_count())
    }

    /// Color at the face corner; corners without a color read as opaque white.
    pub fn face_vertex_color(&self, fid: usize, corner: usize, set: usize) -> Vector4f {
        self.color_sets[set]
            .corner_value(fid, corner)
            .unwrap_or([1.0, 1.0, 1.0, 1.0])
    }

    // Face group sets

    pub fn add_face_group_set(&mut self) -> usize {
        self.group_sets.push(vec![0; self.faces.len()]);
        self.group_sets.len() - 1
    }

    pub fn num_face_group_sets(&self) -> usize {
        self.group_sets.len()
    }

    pub fn face_group(&self, fid: usize, set: usize) -> i32 {
        self.group_sets[set][fid]
    }

    pub fn set_face_group(&mut self, fid: usize, group: i32, set: usize) {
        self.group_sets[set][fid] = group;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mixed_mesh() -> PolyMesh {
        let mut mesh = PolyMesh::new();
        for i in 0..6 {
            mesh.append_vertex([i as f64, 0.0, 0.0]);
        }
        mesh.append_triangle([0, 1, 2]);
        mesh.append_quad([0, 1, 2, 3]);
        mesh.append_polygon(vec![0, 1, 2, 3, 4, 5]);
        mesh
    }

    #[test]
    fn test_face_kinds() {
        let mesh = mixed_mesh();
        assert_eq!(mesh.face_count(), 3);
        assert!(mesh.face(0).is_triangle());
        assert!(mesh.face(1).is_quad());
        assert!(mesh.face(2).is_polygon());
        assert_eq!(mesh.face_vertex_count(mesh.face(2)), 6);
        assert_eq!(mesh.face_vertices(mesh.face(1)), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_attribute_sets_track_faces() {
        let mut mesh = mixed_mesh();
        let set = mesh.add_normal_set();
        let n = mesh.normal_set_mut(set).append_value([0.0, 1.0, 0.0]);
        mesh.normal_set_mut(set).set_corner_index(2, 5, n);
        assert_eq!(mesh.face_vertex_normal_index(2, 5, set), 0);
        assert_eq!(mesh.face_vertex_normal_index(2, 4, set), INVALID_INDEX);

        // faces appended after the set was created get corner slots too
        let fid = mesh.append_triangle([3, 4, 5]);
        assert_eq!(mesh.face_vertex_normal_index(fid, 2, set), INVALID_INDEX);
    }

    #[test]
    fn test_groups_and_colors() {
        let mut mesh = mixed_mesh();
        let groups = mesh.add_face_group_set();
        mesh.set_face_group(1, 9, groups);
        assert_eq!(mesh.face_group(0, groups), 0);
        assert_eq!(mesh.face_group(1, groups), 9);

        let colors = mesh.add_color_set();
        let c = mesh.color_set_mut(colors).append_value([1.0, 0.0, 0.0, 1.0]);
        mesh.color_set_mut(colors).set_corner_index(0, 0, c);
        assert_eq!(mesh.face_vertex_color(0, 0, colors), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(mesh.face_vertex_color(0, 1, colors), [1.0, 1.0, 1.0, 1.0]);
    }
}
