//! OBJ format reader.
//!
//! Parses the `v`, `vn`, `vt`, `f` and `g` directives into an
//! [`ObjFormatData`] one line at a time. Other directives are ignored.
//!
//! Two non-standard conventions are honored:
//! - Comment lines containing `mm_gid <id>` set the group id of the faces
//!   that follow. Once such a comment has been seen, `g` directives no longer
//!   change the current group.
//! - `g` does not read a group name; each `g` line starts the next group id.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use log::{debug, warn};

use meshfmt_core::dense_mesh::DenseMesh;
use meshfmt_core::math_utils::INVALID_INDEX;
use meshfmt_core::poly_mesh::PolyMesh;
use meshfmt_core::status::{MeshIoError, StatusResult};

use crate::line_reader::{LineReader, DEFAULT_MAX_LINE_LENGTH};
use crate::obj_conversion::{obj_format_data_to_dense_mesh, obj_format_data_to_poly_mesh, ObjToMeshOptions};
use crate::obj_format_data::{ObjFormatData, ObjPolygon, ObjQuad, ObjTriangle};
use crate::traits::Reader;

const MESHMIXER_GROUP_TAG: &str = "mm_gid";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjReadOptions {
    pub vertex_colors: bool,
    pub normals: bool,
    pub uvs: bool,
    /// Honor `mm_gid` group annotations in comments.
    pub meshmixer_group_ids: bool,
    /// Lines longer than this abort the read.
    pub max_line_length: usize,
}

impl Default for ObjReadOptions {
    fn default() -> Self {
        Self {
            vertex_colors: true,
            normals: true,
            uvs: true,
            meshmixer_group_ids: true,
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
        }
    }
}

impl ObjReadOptions {
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

    pub fn with_meshmixer_group_ids(mut self, enabled: bool) -> Self {
        self.meshmixer_group_ids = enabled;
        self
    }

    pub fn with_max_line_length(mut self, max_line_length: usize) -> Self {
        self.max_line_length = max_line_length;
        self
    }
}

/// OBJ format reader.
#[derive(Debug)]
pub struct ObjReader {
    path: PathBuf,
    options: ObjReadOptions,
}

impl ObjReader {
    /// Open an OBJ file for reading.
    pub fn open<P: AsRef<Path>>(path: P) -> StatusResult<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Err(MeshIoError::NotFound(path.display().to_string()));
        }
        Ok(Self {
            path,
            options: ObjReadOptions::default(),
        })
    }

    pub fn with_options(mut self, options: ObjReadOptions) -> Self {
        self.options = options;
        self
    }

    /// Read the file into the intermediate representation.
    pub fn read_obj_data(&mut self) -> StatusResult<ObjFormatData> {
        read_obj(&self.path, &self.options)
    }

    /// Read the file as a dense triangle mesh.
    pub fn read_mesh(&mut self) -> StatusResult<DenseMesh> {
        let data = self.read_obj_data()?;
        Ok(obj_format_data_to_dense_mesh(&data, &ObjToMeshOptions::default()))
    }

    /// Read the file as a polygonal mesh, keeping quads and n-gons.
    pub fn read_poly_mesh(&mut self) -> StatusResult<PolyMesh> {
        let data = self.read_obj_data()?;
        Ok(obj_format_data_to_poly_mesh(&data, &ObjToMeshOptions::default()))
    }
}

impl Reader for ObjReader {
    fn open<P: AsRef<Path>>(path: P) -> StatusResult<Self> {
        ObjReader::open(path)
    }

    fn read_mesh(&mut self) -> StatusResult<DenseMesh> {
        ObjReader::read_mesh(self)
    }
}

/// Read an OBJ file into an [`ObjFormatData`].
pub fn read_obj<P: AsRef<Path>>(path: P, options: &ObjReadOptions) -> StatusResult<ObjFormatData> {
    let file = File::open(path)?;
    read_obj_from(BufReader::new(file), options)
}

#[derive(Debug)]
struct ParsingState {
    current_group_id: i32,
    have_meshmixer_group_ids: bool,
    in_header: bool,
}

#[derive(Debug, Default)]
struct ParsedFace {
    positions: Vec<i32>,
    normals: Vec<i32>,
    uvs: Vec<i32>,
}

/// Parse OBJ text from any buffered source.
pub fn read_obj_from<R: BufRead>(reader: R, options: &ObjReadOptions) -> StatusResult<ObjFormatData> {
    let mut lines = LineReader::with_max_line_length(reader, options.max_line_length);
    let mut data = ObjFormatData::new();
    let mut state = ParsingState {
        current_group_id: 0,
        have_meshmixer_group_ids: false,
        in_header: true,
    };
    let mut face = ParsedFace::default();

    while let Some(line) = lines.read_line()? {
        let text = line.text.trim_start_matches(|c: char| c == ' ' || c == '\t');
        if text.is_empty() {
            continue;
        }

        if text.starts_with('#') || text.starts_with('/') {
            if state.in_header {
                data.header_comments.push(text.to_string());
            }
            if options.meshmixer_group_ids {
                process_comment(text, &mut state);
            }
            continue;
        }
        state.in_header = false;

        let mut tokens = text.split_whitespace();
        match tokens.next() {
            Some("v") => {
                let p = [parse_f64(tokens.next()), parse_f64(tokens.next()), parse_f64(tokens.next())];
                data.vertex_positions.push(p);
                if let Some(r) = tokens.next() {
                    if options.vertex_colors {
                        let g = tokens.next();
                        let b = tokens.next();
                        data.vertex_colors.push([parse_f32(Some(r)), parse_f32(g), parse_f32(b)]);
                    }
                }
            }
            Some("vn") => {
                if options.normals {
                    let n = [parse_f64(tokens.next()), parse_f64(tokens.next()), parse_f64(tokens.next())];
                    data.normals.push(n);
                }
            }
            Some("vt") => {
                if options.uvs {
                    data.uvs.push([parse_f64(tokens.next()), parse_f64(tokens.next())]);
                }
            }
            Some("f") => {
                parse_face(tokens, &data, &mut face);
                if !options.normals {
                    face.normals.clear();
                }
                if !options.uvs {
                    face.uvs.clear();
                }
                append_face(&mut data, &face, state.current_group_id, line.number);
            }
            Some("g") => {
                // After the first mm_gid, only mm_gid annotations set the group.
                if !state.have_meshmixer_group_ids {
                    state.current_group_id += 1;
                }
            }
            _ => {}
        }
    }

    // Colors are kept only if every vertex supplied one.
    if data.vertex_colors.len() != data.vertex_positions.len() {
        if !data.vertex_colors.is_empty() {
            warn!(
                "discarding vertex colors: {} colors for {} vertices",
                data.vertex_colors.len(),
                data.vertex_positions.len()
            );
        }
        data.vertex_colors.clear();
    }

    debug!(
        "read OBJ: {} vertices, {} normals, {} uvs, {} faces ({} lines)",
        data.vertex_positions.len(),
        data.normals.len(),
        data.uvs.len(),
        data.face_count(),
        lines.line_number()
    );
    Ok(data)
}

fn process_comment(text: &str, state: &mut ParsingState) {
    let Some(pos) = text.find(MESHMIXER_GROUP_TAG) else {
        return;
    };
    let rest = &text[pos + MESHMIXER_GROUP_TAG.len()..];
    match rest.split_whitespace().next().map(str::parse::<i32>) {
        Some(Ok(group_id)) => {
            state.have_meshmixer_group_ids = true;
            state.current_group_id = group_id;
        }
        _ => debug!("ignoring malformed group annotation: {}", text),
    }
}

fn parse_f64(token: Option<&str>) -> f64 {
    token.and_then(|t| t.parse().ok()).unwrap_or(0.0)
}

fn parse_f32(token: Option<&str>) -> f32 {
    token.and_then(|t| t.parse().ok()).unwrap_or(0.0)
}

/// Converts a 1-based (or negative, relative) OBJ index to a 0-based index.
/// Zero and unparseable indices become [`INVALID_INDEX`].
fn resolve_index(token: &str, pool_len: usize) -> i32 {
    match token.parse::<i32>() {
        Ok(i) if i > 0 => i - 1,
        Ok(i) if i < 0 => {
            let resolved = pool_len as i64 + i64::from(i);
            if resolved >= 0 {
                resolved as i32
            } else {
                INVALID_INDEX
            }
        }
        _ => INVALID_INDEX,
    }
}

/// Parses vertex groups of the forms `i`, `i/t`, `i//n` and `i/t/n`.
///
/// If the number of UV or normal indices differs from the number of
/// positions, that attribute is dropped for the face.
fn parse_face<'a, I: Iterator<Item = &'a str>>(groups: I, data: &ObjFormatData, face: &mut ParsedFace) {
    face.positions.clear();
    face.normals.clear();
    face.uvs.clear();

    let num_positions = data.vertex_positions.len();
    let num_normals = data.normals.len();
    let num_uvs = data.uvs.len();

    for group in groups {
        let mut parts = group.split('/');
        face.positions.push(resolve_index(parts.next().unwrap_or(""), num_positions));
        match (parts.next(), parts.next()) {
            (None, _) => {}
            (Some(uv), None) => face.uvs.push(resolve_index(uv, num_uvs)),
            (Some(""), Some(normal)) => face.normals.push(resolve_index(normal, num_normals)),
            (Some(uv), Some(normal)) => {
                face.uvs.push(resolve_index(uv, num_uvs));
                face.normals.push(resolve_index(normal, num_normals));
            }
        }
    }

    if face.normals.len() != face.positions.len() {
        face.normals.clear();
    }
    if face.uvs.len() != face.positions.len() {
        face.uvs.clear();
    }
}

fn corner_array<const N: usize>(indices: &[i32]) -> [i32; N] {
    if indices.len() == N {
        std::array::from_fn(|k| indices[k])
    } else {
        [INVALID_INDEX; N]
    }
}

fn append_face(data: &mut ObjFormatData, face: &ParsedFace, group_id: i32, line_number: usize) {
    match face.positions.len() {
        3 => {
            let triangle = ObjTriangle {
                positions: corner_array(&face.positions),
                normals: corner_array(&face.normals),
                uvs: corner_array(&face.uvs),
            };
            data.append_triangle(triangle, group_id);
        }
        4 => {
            let quad = ObjQuad {
                positions: corner_array(&face.positions),
                normals: corner_array(&face.normals),
                uvs: corner_array(&face.uvs),
            };
            data.append_quad(quad, group_id);
        }
        n if n > 4 => {
            let polygon = ObjPolygon {
                positions: face.positions.clone(),
                normals: face.normals.clone(),
                uvs: face.uvs.clone(),
            };
            data.append_polygon(polygon, group_id);
        }
        n => debug!("line {}: skipping face with {} vertices", line_number, n),
    }
}
