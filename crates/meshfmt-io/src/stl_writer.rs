//! STL format writer.
//!
//! Writes a [`DenseMesh`] as ASCII or binary STL. Facet normals are always
//! recomputed from the triangle positions; stored corner normals are not
//! consulted.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use byteorder::{LittleEndian, WriteBytesExt};
use log::{debug, warn};

use meshfmt_core::dense_mesh::DenseMesh;
use meshfmt_core::math_utils::{is_valid_index, to_f32, triangle_normal, Vector3d};
use meshfmt_core::status::Status;

use crate::stl_format_data::STL_HEADER_SIZE;
use crate::traits::Writer;

const STL_HEADER_TAG: &[u8] = b"meshfmt_stl";

pub const DEFAULT_SOLID_NAME: &str = "mesh";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StlWriteOptions {
    pub binary: bool,
    /// Name written after `solid`/`endsolid` in ASCII output.
    pub solid_name: String,
}

impl Default for StlWriteOptions {
    fn default() -> Self {
        Self {
            binary: true,
            solid_name: DEFAULT_SOLID_NAME.to_string(),
        }
    }
}

impl StlWriteOptions {
    pub fn with_binary(mut self, binary: bool) -> Self {
        self.binary = binary;
        self
    }

    pub fn with_solid_name(mut self, name: impl Into<String>) -> Self {
        self.solid_name = name.into();
        self
    }
}

/// STL format writer.
///
/// Meshes added through [`Writer::add_mesh`] are merged into one solid. The
/// first mesh name passed in becomes the solid name unless one was set in the
/// options.
#[derive(Debug, Clone, Default)]
pub struct StlWriter {
    options: StlWriteOptions,
    named: bool,
    mesh: DenseMesh,
}

impl StlWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(mut self, options: StlWriteOptions) -> Self {
        self.named = options.solid_name != DEFAULT_SOLID_NAME;
        self.options = options;
        self
    }

    pub fn options(&self) -> &StlWriteOptions {
        &self.options
    }
}

impl Writer for StlWriter {
    fn new() -> Self {
        StlWriter::new()
    }

    fn add_mesh(&mut self, mesh: &DenseMesh, name: Option<&str>) -> Status {
        if let (false, Some(name)) = (self.named, name) {
            self.options.solid_name = name.to_string();
            self.named = true;
        }
        self.mesh.append_mesh(mesh);
        Ok(())
    }

    fn write<P: AsRef<Path>>(&self, path: P) -> Status {
        write_stl(path, &self.mesh, &self.options)
    }

    fn vertex_count(&self) -> usize {
        self.mesh.vertex_count()
    }

    fn face_count(&self) -> usize {
        self.mesh.triangle_count()
    }
}

/// Write `mesh` to a file as ASCII or binary STL.
pub fn write_stl<P: AsRef<Path>>(path: P, mesh: &DenseMesh, options: &StlWriteOptions) -> Status {
    let mut writer = BufWriter::new(File::create(path)?);
    if options.binary {
        write_stl_binary(&mut writer, mesh)?;
    } else {
        write_stl_ascii(&mut writer, mesh, &options.solid_name)?;
    }
    writer.flush()?;
    Ok(())
}

/// Positions and recomputed normal of every triangle with in-range vertex
/// indices.
fn facets(mesh: &DenseMesh) -> Vec<(Vector3d, [Vector3d; 3])> {
    let num_vertices = mesh.vertex_count();
    let facets: Vec<_> = (0..mesh.triangle_count())
        .filter_map(|tid| {
            let t = mesh.triangle(tid);
            if !t.iter().all(|&v| is_valid_index(v, num_vertices)) {
                return None;
            }
            let corners = t.map(|v| mesh.position(v as usize));
            Some((triangle_normal(corners[0], corners[1], corners[2]), corners))
        })
        .collect();

    let dropped = mesh.triangle_count() - facets.len();
    if dropped > 0 {
        warn!("skipping {} triangles with out-of-range vertex indices", dropped);
    }
    facets
}

/// Write `mesh` as ASCII STL.
pub fn write_stl_ascii<W: Write>(writer: &mut W, mesh: &DenseMesh, name: &str) -> Status {
    let facets = facets(mesh);

    writeln!(writer, "solid {}", name)?;
    for (normal, corners) in &facets {
        let n = to_f32(*normal);
        writeln!(writer, "facet normal {:.6} {:.6} {:.6}", n[0], n[1], n[2])?;
        writeln!(writer, " outer loop")?;
        for corner in corners {
            let p = to_f32(*corner);
            writeln!(writer, "  vertex {:.6} {:.6} {:.6}", p[0], p[1], p[2])?;
        }
        writeln!(writer, " endloop")?;
        writeln!(writer, "endfacet")?;
    }
    writeln!(writer, "endsolid {}", name)?;

    debug!("wrote ASCII STL: {} triangles", facets.len());
    Ok(())
}

/// Write `mesh` as binary STL: a tagged 80-byte header, the triangle count,
/// then one 50-byte record per triangle with a zero attribute word.
pub fn write_stl_binary<W: Write>(writer: &mut W, mesh: &DenseMesh) -> Status {
    let facets = facets(mesh);

    let mut header = [0u8; STL_HEADER_SIZE];
    header[..STL_HEADER_TAG.len()].copy_from_slice(STL_HEADER_TAG);
    writer.write_all(&header)?;
    writer.write_u32::<LittleEndian>(facets.len() as u32)?;

    for (normal, corners) in &facets {
        write_vector3(writer, *normal)?;
        for corner in corners {
            write_vector3(writer, *corner)?;
        }
        writer.write_u16::<LittleEndian>(0)?;
    }

    debug!("wrote binary STL: {} triangles", facets.len());
    Ok(())
}

fn write_vector3<W: Write>(writer: &mut W, v: Vector3d) -> Status {
    for c in to_f32(v) {
        writer.write_f32::<LittleEndian>(c)?;
    }
    Ok(())
}
