//! OBJ format writer.
//!
//! Writes an [`ObjFormatData`] verbatim, or a [`DenseMesh`] by first
//! converting it with [`dense_mesh_to_obj_format_data`].
//!
//! # Example
//!
//! ```ignore
//! use meshfmt_io::obj_writer::{ObjWriteOptions, ObjWriter};
//! use meshfmt_io::Writer;
//!
//! let mut writer = ObjWriter::new().with_options(ObjWriteOptions::default().with_uvs(false));
//! writer.add_mesh(&mesh, None)?;
//! writer.write("output.obj")?;
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::{debug, warn};

use meshfmt_core::dense_mesh::DenseMesh;
use meshfmt_core::math_utils::is_valid_index;
use meshfmt_core::status::Status;

use crate::obj_conversion::{dense_mesh_to_obj_format_data, MeshExportOptions};
use crate::obj_format_data::{FaceCorners, ObjFormatData};
use crate::traits::Writer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjWriteOptions {
    pub vertex_colors: bool,
    pub normals: bool,
    pub uvs: bool,
    /// Reverse the corner order of every written face.
    pub reverse_orientation: bool,
}

impl Default for ObjWriteOptions {
    fn default() -> Self {
        Self {
            vertex_colors: true,
            normals: true,
            uvs: true,
            reverse_orientation: false,
        }
    }
}

impl ObjWriteOptions {
    pub fn with_vertex_colors(mut self, vertex_colors: bool) -> Self {
        self.vertex_colors = vertex_colors;
        self
    }

    pub fn with_normals(mut self, normals: bool) -> Self {
        self.normals = normals;
        self
    }

    pub fn with_uvs(mut self, uvs: bool) -> Self {
        self.uvs = uvs;
        self
    }

    pub fn with_reverse_orientation(mut self, reverse: bool) -> Self {
        self.reverse_orientation = reverse;
        self
    }

    fn export_options(&self) -> MeshExportOptions {
        MeshExportOptions::default()
            .with_normals(self.normals)
            .with_uvs(self.uvs)
            .with_vertex_colors(self.vertex_colors)
    }
}

/// OBJ format writer.
///
/// Meshes added through [`Writer::add_mesh`] are merged into one mesh and
/// written when [`Writer::write`] is called.
#[derive(Debug, Clone, Default)]
pub struct ObjWriter {
    options: ObjWriteOptions,
    mesh: DenseMesh,
}

impl ObjWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(mut self, options: ObjWriteOptions) -> Self {
        self.options = options;
        self
    }

    /// The merged mesh that will be written.
    pub fn mesh(&self) -> &DenseMesh {
        &self.mesh
    }
}

impl Writer for ObjWriter {
    fn new() -> Self {
        ObjWriter::new()
    }

    fn add_mesh(&mut self, mesh: &DenseMesh, _name: Option<&str>) -> Status {
        self.mesh.append_mesh(mesh);
        Ok(())
    }

    fn write<P: AsRef<Path>>(&self, path: P) -> Status {
        write_obj_mesh_file(path, &self.mesh, &self.options)
    }

    fn vertex_count(&self) -> usize {
        self.mesh.vertex_count()
    }

    fn face_count(&self) -> usize {
        self.mesh.triangle_count()
    }
}

/// Write an [`ObjFormatData`] to a file.
pub fn write_obj_file<P: AsRef<Path>>(path: P, data: &ObjFormatData, options: &ObjWriteOptions) -> Status {
    let mut writer = BufWriter::new(File::create(path)?);
    write_obj_data(&mut writer, data, options)?;
    writer.flush()?;
    Ok(())
}

/// Write a dense triangle mesh to an OBJ file.
pub fn write_obj_mesh_file<P: AsRef<Path>>(path: P, mesh: &DenseMesh, options: &ObjWriteOptions) -> Status {
    let mut writer = BufWriter::new(File::create(path)?);
    write_obj_mesh(&mut writer, mesh, options)?;
    writer.flush()?;
    Ok(())
}

/// Write a dense triangle mesh as OBJ text.
///
/// Triangles are written sorted by group id, with corner normals and UVs
/// deduplicated into shared `vn`/`vt` pools.
pub fn write_obj_mesh<W: Write>(writer: &mut W, mesh: &DenseMesh, options: &ObjWriteOptions) -> Status {
    let data = dense_mesh_to_obj_format_data(mesh, &options.export_options());
    write_obj_data(writer, &data, options)
}

/// Write an [`ObjFormatData`] as OBJ text.
///
/// Faces are written in face-stream order. A `g <id>` line is written at each
/// change of group id when the face stream holds more than one group.
/// Normal and UV references are written per face, only when every corner of
/// that face has a valid index.
pub fn write_obj_data<W: Write>(writer: &mut W, data: &ObjFormatData, options: &ObjWriteOptions) -> Status {
    for comment in &data.header_comments {
        writeln!(writer, "{}", comment)?;
    }

    let write_colors = options.vertex_colors && data.has_vertex_colors();
    for (vid, p) in data.vertex_positions.iter().enumerate() {
        if write_colors {
            let c = data.vertex_colors[vid];
            writeln!(
                writer,
                "v {:.6} {:.6} {:.6} {:.6} {:.6} {:.6}",
                p[0], p[1], p[2], c[0], c[1], c[2]
            )?;
        } else {
            writeln!(writer, "v {:.6} {:.6} {:.6}", p[0], p[1], p[2])?;
        }
    }

    let num_normals = if options.normals { data.normals.len() } else { 0 };
    for n in &data.normals[..num_normals] {
        writeln!(writer, "vn {:.6} {:.6} {:.6}", n[0], n[1], n[2])?;
    }

    let num_uvs = if options.uvs { data.uvs.len() } else { 0 };
    for uv in &data.uvs[..num_uvs] {
        writeln!(writer, "vt {:.6} {:.6}", uv[0], uv[1])?;
    }

    let num_positions = data.vertex_positions.len();
    let write_groups = data.distinct_group_count() > 1;
    let mut current_group = None;
    let mut faces_written = 0;
    let mut skipped = 0usize;
    for face in &data.face_stream {
        let Some(corners) = data.face_corners(face) else {
            debug!("skipping face-stream entry past the end of its pool: {:?}", face);
            continue;
        };
        if !corners.positions.iter().all(|&v| is_valid_index(v, num_positions)) {
            skipped += 1;
            continue;
        }

        if write_groups && current_group != Some(face.group_id) {
            writeln!(writer, "g {}", face.group_id)?;
            current_group = Some(face.group_id);
        }

        write_face(writer, &corners, num_normals, num_uvs, options.reverse_orientation)?;
        faces_written += 1;
    }

    if skipped > 0 {
        warn!("skipped {} faces referencing positions outside [0, {})", skipped, num_positions);
    }
    debug!(
        "wrote OBJ: {} vertices, {} normals, {} uvs, {} faces",
        data.vertex_positions.len(),
        num_normals,
        num_uvs,
        faces_written
    );
    Ok(())
}

fn write_face<W: Write>(
    writer: &mut W,
    corners: &FaceCorners<'_>,
    num_normals: usize,
    num_uvs: usize,
    reverse: bool,
) -> Status {
    let include_normals = corners.has_valid_normals(num_normals);
    let include_uvs = corners.has_valid_uvs(num_uvs);

    let n = corners.vertex_count();
    write!(writer, "f")?;
    for k in 0..n {
        let j = if reverse { n - 1 - k } else { k };
        let vertex = corners.positions[j] + 1;
        match (include_uvs, include_normals) {
            (true, true) => write!(writer, " {}/{}/{}", vertex, corners.uvs[j] + 1, corners.normals[j] + 1)?,
            (true, false) => write!(writer, " {}/{}", vertex, corners.uvs[j] + 1)?,
            (false, true) => write!(writer, " {}//{}", vertex, corners.normals[j] + 1)?,
            (false, false) => write!(writer, " {}", vertex)?,
        }
    }
    writeln!(writer)?;
    Ok(())
}
