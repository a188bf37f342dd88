//! Conversions between the mesh containers and [`ObjFormatData`].
//!
//! Export (mesh → IFM) orders faces by group id with a stable sort, so faces
//! within a group keep their original relative order. Import (IFM → mesh)
//! walks the face stream; the dense import fan-triangulates quads and
//! polygons from their first corner.

use log::warn;

use meshfmt_core::attribute_compressor::AttributeCompressor;
use meshfmt_core::attribute_vertex_blender::AttributeVertexBlender;
use meshfmt_core::dense_mesh::{DenseMesh, DEFAULT_NORMAL, DEFAULT_UV};
use meshfmt_core::math_utils::{is_valid_index, to_f32, to_f64, Index3i, Vector2d, Vector3d, Vector3f, INVALID_INDEX};
use meshfmt_core::poly_mesh::PolyMesh;

use crate::obj_format_data::{FaceCorners, ObjFaceType, ObjFormatData, ObjPolygon, ObjQuad, ObjTriangle};

/// Selects which attributes a mesh → IFM conversion carries over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshExportOptions {
    pub normals: bool,
    pub uvs: bool,
    pub vertex_colors: bool,
}

impl Default for MeshExportOptions {
    fn default() -> Self {
        Self {
            normals: true,
            uvs: true,
            vertex_colors: true,
        }
    }
}

impl MeshExportOptions {
    pub fn with_normals(mut self, normals: bool) -> Self {
        self.normals = normals;
        self
    }

    pub fn with_uvs(mut self, uvs: bool) -> Self {
        self.uvs = uvs;
        self
    }

    pub fn with_vertex_colors(mut self, vertex_colors: bool) -> Self {
        self.vertex_colors = vertex_colors;
        self
    }
}

/// Selects which attributes an IFM → mesh conversion drops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObjToMeshOptions {
    pub ignore_uvs: bool,
    pub ignore_normals: bool,
    pub ignore_colors: bool,
}

/// Returns face indices ordered by group id. The sort is stable: faces that
/// share a group keep their original relative order.
pub fn stable_group_order<I: IntoIterator<Item = i32>>(groups: I) -> Vec<usize> {
    let mut order: Vec<(usize, i32)> = groups.into_iter().enumerate().collect();
    order.sort_by_key(|&(_, group)| group);
    order.into_iter().map(|(index, _)| index).collect()
}

fn vertex_slot(vid: i32, num_vertices: usize) -> Option<usize> {
    is_valid_index(vid, num_vertices).then_some(vid as usize)
}

fn resolve_index(index: Option<usize>) -> i32 {
    index.map_or(INVALID_INDEX, |i| i as i32)
}

// ============================================================================
// Export
// ============================================================================

/// Builds an [`ObjFormatData`] from a dense triangle mesh.
///
/// Vertex colors are blended per vertex from the triangle-corner colors.
/// Corner normals and UVs are deduplicated into shared pools.
pub fn dense_mesh_to_obj_format_data(mesh: &DenseMesh, options: &MeshExportOptions) -> ObjFormatData {
    let num_vertices = mesh.vertex_count();
    let num_triangles = mesh.triangle_count();

    let mut data = ObjFormatData::new();
    data.vertex_positions = mesh.positions().to_vec();

    if options.vertex_colors {
        let mut blender = AttributeVertexBlender::new(num_vertices, [0.0f32; 3]);
        for tid in 0..num_triangles {
            let triangle = mesh.triangle(tid);
            let colors = mesh.tri_vtx_colors(tid);
            for j in 0..3 {
                if let Some(vid) = vertex_slot(triangle[j], num_vertices) {
                    blender.accumulate_value(vid, colors[j]);
                }
            }
        }
        data.vertex_colors = blender.vertex_values();
    }

    let order = stable_group_order((0..num_triangles).map(|tid| mesh.tri_group(tid)));

    let mut normals = AttributeCompressor::<Vector3d>::new();
    if options.normals {
        for tid in 0..num_triangles {
            for n in mesh.tri_vtx_normals(tid) {
                normals.insert_value(to_f64(n));
            }
        }
    }

    let mut uvs = AttributeCompressor::<Vector2d>::new();
    if options.uvs {
        for tid in 0..num_triangles {
            for uv in mesh.tri_vtx_uvs(tid) {
                uvs.insert_value(to_f64(uv));
            }
        }
    }

    data.triangles.reserve(num_triangles);
    data.face_stream.reserve(num_triangles);
    for tid in order {
        let mut triangle = ObjTriangle::new(mesh.triangle(tid));
        if options.normals {
            let corner_normals = mesh.tri_vtx_normals(tid);
            for j in 0..3 {
                triangle.normals[j] = resolve_index(normals.get_index_for_value(to_f64(corner_normals[j]), false));
            }
        }
        if options.uvs {
            let corner_uvs = mesh.tri_vtx_uvs(tid);
            for j in 0..3 {
                triangle.uvs[j] = resolve_index(uvs.get_index_for_value(to_f64(corner_uvs[j]), false));
            }
        }
        data.append_triangle(triangle, mesh.tri_group(tid));
    }

    data.normals = normals.into_unique_values();
    data.uvs = uvs.into_unique_values();
    data
}

/// Builds an [`ObjFormatData`] from a polygonal mesh.
///
/// Attribute set 0 of each kind is used. Normals and UVs are copied as
/// stored, since the polygonal mesh already keeps them indexed.
pub fn poly_mesh_to_obj_format_data(mesh: &PolyMesh, options: &MeshExportOptions) -> ObjFormatData {
    const NORMAL_SET: usize = 0;
    const UV_SET: usize = 0;
    const COLOR_SET: usize = 0;
    const GROUP_SET: usize = 0;

    let have_normals = options.normals && mesh.normal_count(NORMAL_SET) > 0;
    let have_uvs = options.uvs && mesh.uv_count(UV_SET) > 0;
    let have_colors = options.vertex_colors && mesh.color_count(COLOR_SET) > 0;
    let have_groups = mesh.num_face_group_sets() > GROUP_SET;

    let num_vertices = mesh.vertex_count();
    let num_faces = mesh.face_count();

    let mut data = ObjFormatData::new();
    data.vertex_positions = (0..num_vertices).map(|vid| mesh.position(vid)).collect();

    if have_colors {
        let mut blender = AttributeVertexBlender::new(num_vertices, [0.0f32; 3]);
        for fid in 0..num_faces {
            let face = mesh.face(fid);
            for j in 0..mesh.face_vertex_count(face) {
                if let Some(vid) = vertex_slot(mesh.face_vertex(face, j), num_vertices) {
                    let c = mesh.face_vertex_color(fid, j, COLOR_SET);
                    blender.accumulate_value(vid, [c[0], c[1], c[2]]);
                }
            }
        }
        data.vertex_colors = blender.vertex_values();
    }

    let group_of = |fid: usize| if have_groups { mesh.face_group(fid, GROUP_SET) } else { 0 };
    let order = stable_group_order((0..num_faces).map(group_of));

    if have_normals {
        data.normals = mesh.normal_set(NORMAL_SET).values().iter().map(|n| to_f64(*n)).collect();
    }
    if have_uvs {
        data.uvs = mesh.uv_set(UV_SET).values().to_vec();
    }

    data.triangles.reserve(mesh.triangle_count());
    data.quads.reserve(mesh.quad_count());
    data.polygons.reserve(mesh.polygon_count());
    data.face_stream.reserve(num_faces);

    for fid in order {
        let face = mesh.face(fid);
        let group_id = group_of(fid);
        let normal_index = |j: usize| mesh.face_vertex_normal_index(fid, j, NORMAL_SET);
        let uv_index = |j: usize| mesh.face_vertex_uv_index(fid, j, UV_SET);

        // The face's own kind decides the pool, not its vertex count.
        if face.is_triangle() {
            let mut triangle = ObjTriangle::new(mesh.triangle(face));
            if have_normals {
                triangle.normals = std::array::from_fn(normal_index);
            }
            if have_uvs {
                triangle.uvs = std::array::from_fn(uv_index);
            }
            data.append_triangle(triangle, group_id);
        } else if face.is_quad() {
            let mut quad = ObjQuad::new(mesh.quad(face));
            if have_normals {
                quad.normals = std::array::from_fn(normal_index);
            }
            if have_uvs {
                quad.uvs = std::array::from_fn(uv_index);
            }
            data.append_quad(quad, group_id);
        } else if face.is_polygon() {
            let n = mesh.face_vertex_count(face);
            let mut polygon = ObjPolygon::new(mesh.polygon(face).vertices.clone());
            if have_normals {
                polygon.normals = (0..n).map(normal_index).collect();
            }
            if have_uvs {
                polygon.uvs = (0..n).map(uv_index).collect();
            }
            data.append_polygon(polygon, group_id);
        }
    }

    data
}

// ============================================================================
// Import
// ============================================================================

/// Number of triangles a fan triangulation of the face stream produces.
pub fn fan_triangle_count(data: &ObjFormatData) -> usize {
    data.face_stream
        .iter()
        .filter_map(|f| data.face_corners(f))
        .map(|c| c.vertex_count().saturating_sub(2))
        .sum()
}

/// Corner triples `(0, i, i + 1)` of the fan over an `n`-corner face.
fn fan_corners(n: usize) -> impl Iterator<Item = [usize; 3]> {
    (1..n.saturating_sub(1)).map(|i| [0, i, i + 1])
}

/// Extracts a dense triangle mesh from an [`ObjFormatData`].
///
/// Quads and polygons are fan-triangulated from their first corner, so
/// non-convex polygons may produce overlapping triangles. The vertex count
/// equals the number of positions. Normal and UV references outside their
/// pools resolve to +Z and the UV origin. Triangles that reference a
/// position outside the position pool are dropped.
pub fn obj_format_data_to_dense_mesh(data: &ObjFormatData, options: &ObjToMeshOptions) -> DenseMesh {
    let num_vertices = data.vertex_positions.len();
    let use_normals = !options.ignore_normals;
    let use_uvs = !options.ignore_uvs;
    let use_colors = !options.ignore_colors && data.has_vertex_colors();

    let mut mesh = DenseMesh::new();
    mesh.resize(num_vertices, 0);
    for (vid, p) in data.vertex_positions.iter().enumerate() {
        mesh.set_position(vid, *p);
    }

    let expected = fan_triangle_count(data);
    let mut dropped = 0usize;

    for face in &data.face_stream {
        let Some(corners) = data.face_corners(face) else {
            warn!("face stream entry {:?} has no matching face, skipping", face);
            continue;
        };

        for fan in fan_corners(corners.vertex_count()) {
            let positions: Index3i = fan.map(|k| corners.positions[k]);
            if !positions.iter().all(|&v| is_valid_index(v, num_vertices)) {
                dropped += 1;
                continue;
            }

            let tid = mesh.append_triangle(positions, face.group_id);
            if use_normals {
                mesh.set_tri_vtx_normals(tid, fan.map(|k| corner_normal(data, &corners, k)));
            }
            if use_uvs {
                mesh.set_tri_vtx_uvs(tid, fan.map(|k| corner_uv(data, &corners, k)));
            }
            if use_colors {
                mesh.set_tri_vtx_colors(tid, positions.map(|v| data.vertex_colors[v as usize]));
            }
        }
    }

    if dropped > 0 {
        warn!(
            "dropped {} of {} triangles referencing positions outside [0, {})",
            dropped, expected, num_vertices
        );
    }
    mesh
}

fn corner_normal(data: &ObjFormatData, corners: &FaceCorners<'_>, k: usize) -> Vector3f {
    corners
        .normals
        .get(k)
        .filter(|&&i| is_valid_index(i, data.normals.len()))
        .map_or(DEFAULT_NORMAL, |&i| to_f32(data.normals[i as usize]))
}

fn corner_uv(data: &ObjFormatData, corners: &FaceCorners<'_>, k: usize) -> [f32; 2] {
    corners
        .uvs
        .get(k)
        .filter(|&&i| is_valid_index(i, data.uvs.len()))
        .map_or(DEFAULT_UV, |&i| to_f32(data.uvs[i as usize]))
}

/// Extracts a polygonal mesh from an [`ObjFormatData`], keeping each face's
/// arity.
///
/// Normals and UVs become attribute set 0 when present; corners whose
/// reference falls outside the pool point at a default value appended to
/// the set. Per-vertex colors become color set 0 and group ids become face
/// group set 0. Faces referencing a position outside the pool are dropped.
pub fn obj_format_data_to_poly_mesh(data: &ObjFormatData, options: &ObjToMeshOptions) -> PolyMesh {
    let num_vertices = data.vertex_positions.len();

    let mut mesh = PolyMesh::new();
    for p in &data.vertex_positions {
        mesh.append_vertex(*p);
    }

    let normal_set = (!options.ignore_normals && !data.normals.is_empty()).then(|| {
        let set = mesh.add_normal_set();
        for n in &data.normals {
            mesh.normal_set_mut(set).append_value(to_f32(*n));
        }
        set
    });
    let uv_set = (!options.ignore_uvs && !data.uvs.is_empty()).then(|| {
        let set = mesh.add_uv_set();
        for uv in &data.uvs {
            mesh.uv_set_mut(set).append_value(*uv);
        }
        set
    });
    let color_set = (!options.ignore_colors && data.has_vertex_colors()).then(|| {
        let set = mesh.add_color_set();
        for c in &data.vertex_colors {
            mesh.color_set_mut(set).append_value([c[0], c[1], c[2], 1.0]);
        }
        set
    });
    let group_set = mesh.add_face_group_set();

    let mut default_normal: Option<i32> = None;
    let mut default_uv: Option<i32> = None;
    let mut dropped = 0usize;

    for face in &data.face_stream {
        let Some(corners) = data.face_corners(face) else {
            warn!("face stream entry {:?} has no matching face, skipping", face);
            continue;
        };
        if !corners.positions.iter().all(|&v| is_valid_index(v, num_vertices)) {
            dropped += 1;
            continue;
        }

        let p = corners.positions;
        let fid = match face.face_type {
            ObjFaceType::Triangle => mesh.append_triangle([p[0], p[1], p[2]]),
            ObjFaceType::Quad => mesh.append_quad([p[0], p[1], p[2], p[3]]),
            ObjFaceType::Polygon => mesh.append_polygon(p.to_vec()),
        };
        mesh.set_face_group(fid, face.group_id, group_set);

        for (k, &vid) in p.iter().enumerate() {
            if let Some(set) = normal_set {
                let index = match corners.normals.get(k) {
                    Some(&i) if is_valid_index(i, data.normals.len()) => i,
                    _ => *default_normal
                        .get_or_insert_with(|| mesh.normal_set_mut(set).append_value(DEFAULT_NORMAL)),
                };
                mesh.normal_set_mut(set).set_corner_index(fid, k, index);
            }
            if let Some(set) = uv_set {
                let index = match corners.uvs.get(k) {
                    Some(&i) if is_valid_index(i, data.uvs.len()) => i,
                    _ => *default_uv.get_or_insert_with(|| mesh.uv_set_mut(set).append_value([0.0, 0.0])),
                };
                mesh.uv_set_mut(set).set_corner_index(fid, k, index);
            }
            if let Some(set) = color_set {
                mesh.color_set_mut(set).set_corner_index(fid, k, vid);
            }
        }
    }

    if dropped > 0 {
        warn!("dropped {} faces referencing positions outside [0, {})", dropped, num_vertices);
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshfmt_core::dense_mesh::DEFAULT_COLOR;

    fn single_triangle_mesh() -> DenseMesh {
        let mut mesh = DenseMesh::new();
        mesh.append_vertex([0.0, 0.0, 0.0]);
        mesh.append_vertex([1.0, 0.0, 0.0]);
        mesh.append_vertex([0.0, 1.0, 0.0]);
        mesh.append_triangle([0, 1, 2], 0);
        mesh
    }

    #[test]
    fn test_stable_group_order() {
        assert_eq!(stable_group_order([2, 1, 2, 1]), vec![1, 3, 0, 2]);
        assert_eq!(stable_group_order(Vec::new()), Vec::<usize>::new());
    }

    #[test]
    fn test_fan_corners() {
        let fans: Vec<[usize; 3]> = fan_corners(5).collect();
        assert_eq!(fans, vec![[0, 1, 2], [0, 2, 3], [0, 3, 4]]);
        assert_eq!(fan_corners(2).count(), 0);
        assert_eq!(fan_corners(0).count(), 0);
    }

    #[test]
    fn test_dense_export_dedups_normals() {
        let mut mesh = single_triangle_mesh();
        mesh.append_vertex([1.0, 1.0, 0.0]);
        mesh.append_triangle([1, 3, 2], 0);
        mesh.set_tri_vtx_normals(1, [[0.0, 0.0, 1.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);

        let data = dense_mesh_to_obj_format_data(&mesh, &MeshExportOptions::default());
        assert_eq!(data.normals, vec![[0.0, 0.0, 1.0], [0.0, 1.0, 0.0]]);
        assert_eq!(data.triangles[0].normals, [0, 0, 0]);
        assert_eq!(data.triangles[1].normals, [0, 1, 0]);
        assert_eq!(data.uvs.len(), 1);
    }

    #[test]
    fn test_dense_export_without_attributes() {
        let options = MeshExportOptions::default()
            .with_normals(false)
            .with_uvs(false)
            .with_vertex_colors(false);
        let data = dense_mesh_to_obj_format_data(&single_triangle_mesh(), &options);
        assert!(data.normals.is_empty());
        assert!(data.uvs.is_empty());
        assert!(data.vertex_colors.is_empty());
        assert_eq!(data.triangles[0].normals, [INVALID_INDEX; 3]);
    }

    #[test]
    fn test_dense_export_blends_colors() {
        let mut mesh = single_triangle_mesh();
        mesh.append_vertex([1.0, 1.0, 0.0]);
        mesh.append_triangle([1, 3, 2], 0);
        mesh.set_tri_vtx_colors(0, [[1.0, 0.0, 0.0]; 3]);
        mesh.set_tri_vtx_colors(1, [[0.0, 0.0, 1.0]; 3]);

        let data = dense_mesh_to_obj_format_data(&mesh, &MeshExportOptions::default());
        assert_eq!(data.vertex_colors[0], [1.0, 0.0, 0.0]);
        assert_eq!(data.vertex_colors[1], [0.5, 0.0, 0.5]);
        assert_eq!(data.vertex_colors[3], [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_dense_export_sorts_by_group() {
        let mut mesh = single_triangle_mesh();
        for group in [1, 2, 1] {
            mesh.append_triangle([0, 1, 2], group);
        }
        mesh.set_tri_group(0, 2);

        let data = dense_mesh_to_obj_format_data(&mesh, &MeshExportOptions::default());
        let groups: Vec<i32> = data.face_stream.iter().map(|f| f.group_id).collect();
        assert_eq!(groups, vec![1, 1, 2, 2]);
    }

    #[test]
    fn test_import_clamps_attribute_indices() {
        let mut data = ObjFormatData::new();
        data.vertex_positions = vec![[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        data.normals = vec![[1.0, 0.0, 0.0]];
        let mut tri = ObjTriangle::new([0, 1, 2]);
        tri.normals = [0, 7, INVALID_INDEX];
        data.append_triangle(tri, 3);

        let mesh = obj_format_data_to_dense_mesh(&data, &ObjToMeshOptions::default());
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.tri_group(0), 3);
        assert_eq!(mesh.tri_vtx_normals(0), [[1.0, 0.0, 0.0], DEFAULT_NORMAL, DEFAULT_NORMAL]);
        assert_eq!(mesh.tri_vtx_uvs(0), [DEFAULT_UV; 3]);
    }

    #[test]
    fn test_import_drops_triangles_with_bad_positions() {
        let mut data = ObjFormatData::new();
        data.vertex_positions = vec![[0.0; 3]; 4];
        data.append_quad(ObjQuad::new([0, 1, 2, 9]), 0);

        let mesh = obj_format_data_to_dense_mesh(&data, &ObjToMeshOptions::default());
        assert_eq!(fan_triangle_count(&data), 2);
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.triangle(0), [0, 1, 2]);
        assert_eq!(mesh.vertex_count(), 4);
    }

    fn colored_triangle_data() -> ObjFormatData {
        let mut data = ObjFormatData::new();
        data.vertex_positions = vec![[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        data.vertex_colors = vec![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
        data.append_triangle(ObjTriangle::new([0, 1, 2]), 0);
        data
    }

    #[test]
    fn test_import_reads_vertex_colors_per_corner() {
        let data = colored_triangle_data();
        let mesh = obj_format_data_to_dense_mesh(&data, &ObjToMeshOptions::default());
        assert_eq!(mesh.tri_vtx_colors(0), [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);

        let options = ObjToMeshOptions {
            ignore_colors: true,
            ..ObjToMeshOptions::default()
        };
        let plain = obj_format_data_to_dense_mesh(&data, &options);
        assert_eq!(plain.tri_vtx_colors(0), [DEFAULT_COLOR; 3]);
    }

    #[test]
    fn test_poly_import_fills_color_and_group_sets() {
        let mut data = colored_triangle_data();
        data.vertex_positions.push([1.0, 1.0, 0.0]);
        data.vertex_colors.push([0.5, 0.5, 0.5]);
        data.append_quad(ObjQuad::new([0, 1, 3, 2]), 4);

        let poly = obj_format_data_to_poly_mesh(&data, &ObjToMeshOptions::default());
        assert_eq!(poly.num_color_sets(), 1);
        assert_eq!(poly.color_count(0), 4);
        assert_eq!(poly.face_vertex_color(0, 2, 0), [0.0, 0.0, 1.0, 1.0]);
        assert_eq!(poly.face_vertex_color(1, 2, 0), [0.5, 0.5, 0.5, 1.0]);
        assert_eq!(poly.num_face_group_sets(), 1);
        assert_eq!(poly.face_group(0, 0), 0);
        assert_eq!(poly.face_group(1, 0), 4);
    }

    #[test]
    fn test_poly_export_blends_shared_vertex_colors() {
        let mut poly = PolyMesh::new();
        for p in [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 1.0, 0.0]] {
            poly.append_vertex(p);
        }
        poly.append_triangle([0, 1, 2]);
        poly.append_triangle([1, 3, 2]);
        let set = poly.add_color_set();
        let red = poly.color_set_mut(set).append_value([1.0, 0.0, 0.0, 1.0]);
        let blue = poly.color_set_mut(set).append_value([0.0, 0.0, 1.0, 1.0]);
        for corner in 0..3 {
            poly.color_set_mut(set).set_corner_index(0, corner, red);
            poly.color_set_mut(set).set_corner_index(1, corner, blue);
        }

        let data = poly_mesh_to_obj_format_data(&poly, &MeshExportOptions::default());
        assert_eq!(data.vertex_colors[0], [1.0, 0.0, 0.0]);
        assert_eq!(data.vertex_colors[1], [0.5, 0.0, 0.5]);
        assert_eq!(data.vertex_colors[2], [0.5, 0.0, 0.5]);
        assert_eq!(data.vertex_colors[3], [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_poly_export_keeps_three_corner_polygons_in_polygon_pool() {
        let mut poly = PolyMesh::new();
        for p in [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 1.0, 0.0]] {
            poly.append_vertex(p);
        }
        poly.append_polygon(vec![0, 1, 2]);
        poly.append_quad([0, 1, 3, 2]);

        let data = poly_mesh_to_obj_format_data(&poly, &MeshExportOptions::default());
        assert_eq!(data.polygons.len(), 1);
        assert_eq!(data.triangles.len(), 0);
        assert_eq!(data.quads.len(), 1);
        assert_eq!(data.polygons[0].positions, vec![0, 1, 2]);

        let mesh = obj_format_data_to_dense_mesh(&data, &ObjToMeshOptions::default());
        assert_eq!(mesh.triangle_count(), 3);
        assert_eq!(mesh.triangle(0), [0, 1, 2]);
    }
}
