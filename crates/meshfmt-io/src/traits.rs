//! Common traits for readers and writers.
//!
//! Every format implements the same pair of interfaces over [`DenseMesh`],
//! which allows generic load/save helpers:
//!
//! ```ignore
//! use meshfmt_io::{Reader, Writer, ObjReader, StlWriter};
//!
//! fn convert<R: Reader, W: Writer>(input: &str, output: &str) -> StatusResult<()> {
//!     let mesh = R::open(input)?.read_mesh()?;
//!     let mut writer = W::new();
//!     writer.add_mesh(&mesh, Some("Model"))?;
//!     writer.write(output)
//! }
//! ```

use std::path::Path;

use meshfmt_core::dense_mesh::DenseMesh;
use meshfmt_core::status::{MeshIoError, StatusResult};

/// Common interface for mesh writers.
pub trait Writer: Sized {
    /// Create a new writer with default options.
    fn new() -> Self;

    /// Add a mesh to be written.
    ///
    /// Meshes added to the same writer are merged into one output. `name`
    /// is used where the format has a place for it.
    fn add_mesh(&mut self, mesh: &DenseMesh, name: Option<&str>) -> StatusResult<()>;

    /// Write all added meshes to a file.
    fn write<P: AsRef<Path>>(&self, path: P) -> StatusResult<()>;

    /// Number of vertices added so far.
    fn vertex_count(&self) -> usize;

    /// Number of faces added so far.
    fn face_count(&self) -> usize {
        0
    }
}

/// Common interface for mesh readers.
pub trait Reader: Sized {
    /// Open a file for reading.
    fn open<P: AsRef<Path>>(path: P) -> StatusResult<Self>;

    /// Read the file as a single dense triangle mesh.
    fn read_mesh(&mut self) -> StatusResult<DenseMesh>;
}

/// Mesh file formats known to this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshFormat {
    Obj,
    Stl,
}

impl MeshFormat {
    /// Determine the format from a file extension, case-insensitively.
    pub fn from_path<P: AsRef<Path>>(path: P) -> StatusResult<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match extension.as_deref() {
            Some("obj") => Ok(MeshFormat::Obj),
            Some("stl") => Ok(MeshFormat::Stl),
            _ => Err(MeshIoError::UnsupportedFormat(path.display().to_string())),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            MeshFormat::Obj => "obj",
            MeshFormat::Stl => "stl",
        }
    }
}
