//! OBJ and STL mesh interchange.
//!
//! This crate reads and writes OBJ and STL files against the mesh containers
//! of `meshfmt-core`. OBJ data passes through an intermediate indexed record,
//! [`ObjFormatData`], so format parsing stays independent of the mesh type.
//!
//! # Supported Formats
//!
//! | Format      | Read | Write | Intermediate record |
//! |-------------|------|-------|---------------------|
//! | OBJ         | ✓    | ✓     | [`ObjFormatData`]   |
//! | STL ASCII   | ✓    | ✓     | [`StlMeshData`]     |
//! | STL binary  | ✓    | ✓     | [`StlMeshData`]     |
//!
//! # Unified Trait API
//!
//! All readers implement [`Reader`] and all writers implement [`Writer`]:
//!
//! ```ignore
//! use meshfmt_io::{Reader, Writer, ObjReader, StlWriter};
//!
//! let mesh = ObjReader::open("input.obj")?.read_mesh()?;
//! let mut writer = StlWriter::new();
//! writer.add_mesh(&mesh, Some("Part"))?;
//! writer.write("output.stl")?;
//! ```
//!
//! Or let the file extension decide:
//!
//! ```ignore
//! let mesh = meshfmt_io::read_mesh_file("input.stl")?;
//! meshfmt_io::write_mesh_file("output.obj", &mesh)?;
//! ```
//!
//! # Polygonal OBJ
//!
//! Quads and n-gons survive a trip through [`ObjFormatData`] and
//! [`meshfmt_core::PolyMesh`]. Converting to a [`meshfmt_core::DenseMesh`]
//! fan-triangulates them.

pub mod line_reader;
pub mod obj_conversion;
pub mod obj_format_data;
pub mod stl_format_data;

// Reader modules
#[cfg(feature = "reader")]
pub mod obj_reader;
#[cfg(feature = "reader")]
pub mod stl_reader;

// Writer modules
#[cfg(feature = "writer")]
pub mod obj_writer;
#[cfg(feature = "writer")]
pub mod stl_writer;

// Traits module is always available
pub mod traits;

pub use obj_conversion::{
    dense_mesh_to_obj_format_data, obj_format_data_to_dense_mesh, obj_format_data_to_poly_mesh,
    poly_mesh_to_obj_format_data, MeshExportOptions, ObjToMeshOptions,
};
pub use obj_format_data::{ObjFace, ObjFaceType, ObjFormatData, ObjPolygon, ObjQuad, ObjTriangle};
pub use stl_format_data::{stl_mesh_to_dense_mesh, StlFormat, StlMeshData, StlTriangle};
pub use traits::{MeshFormat, Reader, Writer};

#[cfg(feature = "reader")]
pub use obj_reader::{ObjReadOptions, ObjReader};
#[cfg(feature = "reader")]
pub use stl_reader::StlReader;
#[cfg(feature = "writer")]
pub use obj_writer::{ObjWriteOptions, ObjWriter};
#[cfg(feature = "writer")]
pub use stl_writer::{StlWriteOptions, StlWriter};

#[cfg(feature = "reader")]
use meshfmt_core::dense_mesh::DenseMesh;
#[cfg(feature = "reader")]
use meshfmt_core::status::StatusResult;

/// Read a mesh file, choosing the reader from the file extension.
#[cfg(feature = "reader")]
pub fn read_mesh_file<P: AsRef<std::path::Path>>(path: P) -> StatusResult<DenseMesh> {
    match MeshFormat::from_path(&path)? {
        MeshFormat::Obj => ObjReader::open(path)?.read_mesh(),
        MeshFormat::Stl => StlReader::open(path)?.read_mesh(),
    }
}

/// Write a mesh file with default options, choosing the writer from the file
/// extension.
#[cfg(feature = "writer")]
pub fn write_mesh_file<P: AsRef<std::path::Path>>(
    path: P,
    mesh: &meshfmt_core::dense_mesh::DenseMesh,
) -> meshfmt_core::status::Status {
    match MeshFormat::from_path(&path)? {
        MeshFormat::Obj => obj_writer::write_obj_mesh_file(path, mesh, &ObjWriteOptions::default()),
        MeshFormat::Stl => stl_writer::write_stl(path, mesh, &StlWriteOptions::default()),
    }
}
