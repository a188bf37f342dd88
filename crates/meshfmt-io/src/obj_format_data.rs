//! Indexed intermediate representation shared by the OBJ reader and writer.
//!
//! [`ObjFormatData`] decouples the OBJ grammar from the mesh containers. The
//! face pools (`triangles`, `quads`, `polygons`) carry no ordering of their
//! own; on-disk face order and group membership come only from
//! `face_stream`.

use meshfmt_core::math_utils::{is_valid_index, Index3i, Index4i, Vector2d, Vector3d, Vector3f, INVALID_INDEX};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjTriangle {
    pub positions: Index3i,
    pub normals: Index3i,
    pub uvs: Index3i,
}

impl ObjTriangle {
    /// Triangle with positions only; normal and UV references are absent.
    pub fn new(positions: Index3i) -> Self {
        Self {
            positions,
            normals: [INVALID_INDEX; 3],
            uvs: [INVALID_INDEX; 3],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjQuad {
    pub positions: Index4i,
    pub normals: Index4i,
    pub uvs: Index4i,
}

impl ObjQuad {
    pub fn new(positions: Index4i) -> Self {
        Self {
            positions,
            normals: [INVALID_INDEX; 4],
            uvs: [INVALID_INDEX; 4],
        }
    }
}

/// N-gon face. `normals` and `uvs` are either empty (attribute not provided)
/// or paired element-wise with `positions`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjPolygon {
    pub positions: Vec<i32>,
    pub normals: Vec<i32>,
    pub uvs: Vec<i32>,
}

impl ObjPolygon {
    pub fn new(positions: Vec<i32>) -> Self {
        Self {
            positions,
            normals: Vec::new(),
            uvs: Vec::new(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjFaceType {
    Triangle,
    Quad,
    Polygon,
}

/// Entry of the face stream: which pool, which element, which group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjFace {
    pub face_type: ObjFaceType,
    pub face_index: usize,
    pub group_id: i32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjFormatData {
    /// Leading comment lines, verbatim including the comment marker.
    pub header_comments: Vec<String>,

    pub vertex_positions: Vec<Vector3d>,
    /// Either empty or exactly one color per vertex position.
    pub vertex_colors: Vec<Vector3f>,
    pub normals: Vec<Vector3d>,
    pub uvs: Vec<Vector2d>,

    pub triangles: Vec<ObjTriangle>,
    pub quads: Vec<ObjQuad>,
    pub polygons: Vec<ObjPolygon>,

    /// Ordered references into `triangles`/`quads`/`polygons`.
    pub face_stream: Vec<ObjFace>,
}

impl ObjFormatData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn face_count(&self) -> usize {
        self.face_stream.len()
    }

    pub fn has_vertex_colors(&self) -> bool {
        !self.vertex_colors.is_empty() && self.vertex_colors.len() == self.vertex_positions.len()
    }

    pub fn append_triangle(&mut self, triangle: ObjTriangle, group_id: i32) -> usize {
        self.triangles.push(triangle);
        self.push_face(ObjFaceType::Triangle, self.triangles.len() - 1, group_id)
    }

    pub fn append_quad(&mut self, quad: ObjQuad, group_id: i32) -> usize {
        self.quads.push(quad);
        self.push_face(ObjFaceType::Quad, self.quads.len() - 1, group_id)
    }

    pub fn append_polygon(&mut self, polygon: ObjPolygon, group_id: i32) -> usize {
        self.polygons.push(polygon);
        self.push_face(ObjFaceType::Polygon, self.polygons.len() - 1, group_id)
    }

    fn push_face(&mut self, face_type: ObjFaceType, face_index: usize, group_id: i32) -> usize {
        self.face_stream.push(ObjFace {
            face_type,
            face_index,
            group_id,
        });
        self.face_stream.len() - 1
    }

    /// Number of distinct group ids referenced by the face stream.
    pub fn distinct_group_count(&self) -> usize {
        let mut groups: Vec<i32> = self.face_stream.iter().map(|f| f.group_id).collect();
        groups.sort_unstable();
        groups.dedup();
        groups.len()
    }

    /// Corner data of a face-stream entry, or `None` if the entry points past
    /// the end of its pool.
    pub fn face_corners(&self, face: &ObjFace) -> Option<FaceCorners<'_>> {
        match face.face_type {
            ObjFaceType::Triangle => self.triangles.get(face.face_index).map(|t| FaceCorners {
                positions: &t.positions,
                normals: &t.normals,
                uvs: &t.uvs,
            }),
            ObjFaceType::Quad => self.quads.get(face.face_index).map(|q| FaceCorners {
                positions: &q.positions,
                normals: &q.normals,
                uvs: &q.uvs,
            }),
            ObjFaceType::Polygon => self.polygons.get(face.face_index).map(|p| FaceCorners {
                positions: &p.positions,
                normals: &p.normals,
                uvs: &p.uvs,
            }),
        }
    }

    /// Checks that every face-stream entry addresses an existing pool element.
    pub fn is_face_stream_valid(&self) -> bool {
        self.face_stream.iter().all(|f| self.face_corners(f).is_some())
    }
}

/// Borrowed view of one face's corner indices, uniform across face types.
#[derive(Debug, Clone, Copy)]
pub struct FaceCorners<'a> {
    pub positions: &'a [i32],
    pub normals: &'a [i32],
    pub uvs: &'a [i32],
}

impl FaceCorners<'_> {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// True if every corner has a normal index within `[0, num_normals)`.
    pub fn has_valid_normals(&self, num_normals: usize) -> bool {
        all_valid(self.normals, self.positions.len(), num_normals)
    }

    /// True if every corner has a UV index within `[0, num_uvs)`.
    pub fn has_valid_uvs(&self, num_uvs: usize) -> bool {
        all_valid(self.uvs, self.positions.len(), num_uvs)
    }
}

fn all_valid(indices: &[i32], corner_count: usize, pool_size: usize) -> bool {
    indices.len() == corner_count && indices.iter().all(|&i| is_valid_index(i, pool_size))
}
