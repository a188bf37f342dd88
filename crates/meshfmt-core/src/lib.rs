//! meshfmt core library
//!
//! Mesh containers and the attribute utilities shared by the OBJ and STL
//! codecs in `meshfmt-io`:
//!
//! - [`DenseMesh`]: triangle mesh with per-corner normals, UVs and colors
//! - [`PolyMesh`]: mixed triangle/quad/n-gon mesh with attribute sets
//! - [`AttributeCompressor`]: exact-equality value deduplication
//! - [`AttributeVertexBlender`]: per-vertex averaging of corner values

pub mod attribute_compressor;
pub mod attribute_vertex_blender;
pub mod dense_mesh;
pub mod math_utils;
pub mod poly_mesh;
pub mod status;

pub use attribute_compressor::{AttributeCompressor, AttributeValue};
pub use attribute_vertex_blender::{AttributeVertexBlender, BlendValue};
pub use dense_mesh::DenseMesh;
pub use math_utils::{Index3i, Index4i, Vector2d, Vector2f, Vector3d, Vector3f, Vector4f, INVALID_INDEX};
pub use poly_mesh::{Face, PolyMesh, Polygon};
pub use status::{MeshIoError, Status, StatusResult};
