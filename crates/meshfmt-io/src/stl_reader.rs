//! STL format reader.
//!
//! Reads both the ASCII and the binary variant into an [`StlMeshData`]
//! triangle soup. The variant is detected from the first five bytes of the
//! file: `solid` selects the ASCII grammar, anything else the binary layout.
//! A binary file whose header happens to start with `solid` is misdetected.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use byteorder::{LittleEndian, ReadBytesExt};
use log::{debug, warn};

use meshfmt_core::dense_mesh::DenseMesh;
use meshfmt_core::math_utils::Vector3f;
use meshfmt_core::status::{MeshIoError, StatusResult};

use crate::line_reader::LineReader;
use crate::stl_format_data::{stl_mesh_to_dense_mesh, StlFormat, StlMeshData, StlTriangle, STL_HEADER_SIZE};
use crate::traits::Reader;

/// Upper bound on the triangles reserved up front from a binary header count.
const MAX_TRIANGLE_RESERVE: usize = 1 << 20;

const ASCII_MAGIC: &[u8; 5] = b"solid";

/// STL format reader.
#[derive(Debug)]
pub struct StlReader {
    path: PathBuf,
}

impl StlReader {
    /// Open an STL file for reading.
    pub fn open<P: AsRef<Path>>(path: P) -> StatusResult<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Err(MeshIoError::NotFound(path.display().to_string()));
        }
        Ok(Self { path })
    }

    pub fn read_stl_data(&mut self) -> StatusResult<StlMeshData> {
        read_stl(&self.path)
    }

    /// Read the file as a dense triangle mesh with unshared vertices.
    pub fn read_mesh(&mut self) -> StatusResult<DenseMesh> {
        let data = self.read_stl_data()?;
        Ok(stl_mesh_to_dense_mesh(&data))
    }
}

impl Reader for StlReader {
    fn open<P: AsRef<Path>>(path: P) -> StatusResult<Self> {
        StlReader::open(path)
    }

    fn read_mesh(&mut self) -> StatusResult<DenseMesh> {
        StlReader::read_mesh(self)
    }
}

/// Read an STL file of either variant.
pub fn read_stl<P: AsRef<Path>>(path: P) -> StatusResult<StlMeshData> {
    let file = File::open(path)?;
    read_stl_from(BufReader::new(file))
}

/// Detect the variant of `reader` and parse it.
pub fn read_stl_from<R: Read + Seek>(mut reader: R) -> StatusResult<StlMeshData> {
    match detect_stl_format(&mut reader)? {
        StlFormat::Ascii => {
            debug!("detected ASCII STL");
            read_stl_ascii(BufReader::new(reader))
        }
        StlFormat::Binary => {
            debug!("detected binary STL");
            read_stl_binary(&mut BufReader::new(reader))
        }
    }
}

/// Inspect the first five bytes and rewind to the start.
pub fn detect_stl_format<R: Read + Seek>(reader: &mut R) -> StatusResult<StlFormat> {
    let mut magic = Vec::with_capacity(ASCII_MAGIC.len());
    reader.by_ref().take(ASCII_MAGIC.len() as u64).read_to_end(&mut magic)?;
    reader.seek(SeekFrom::Start(0))?;
    if magic.as_slice() == ASCII_MAGIC {
        Ok(StlFormat::Ascii)
    } else {
        Ok(StlFormat::Binary)
    }
}

// ============================================================================
// Binary
// ============================================================================

/// Parse the binary layout: 80-byte header, little-endian `u32` triangle
/// count, then one 50-byte record per triangle.
///
/// A missing header or count is an error. Running out of records early is
/// not: the triangles read so far are returned with `incomplete` set.
pub fn read_stl_binary<R: Read>(reader: &mut R) -> StatusResult<StlMeshData> {
    let mut header = vec![0u8; STL_HEADER_SIZE];
    reader
        .read_exact(&mut header)
        .map_err(|e| truncated(e, "binary STL header"))?;
    let declared = reader
        .read_u32::<LittleEndian>()
        .map_err(|e| truncated(e, "binary STL triangle count"))? as usize;

    let mut triangles = Vec::with_capacity(declared.min(MAX_TRIANGLE_RESERVE));
    let mut incomplete = false;
    for _ in 0..declared {
        match read_triangle_record(reader) {
            Ok(triangle) => triangles.push(triangle),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                incomplete = true;
                break;
            }
            Err(e) => return Err(e.into()),
        }
    }

    if incomplete {
        warn!(
            "binary STL declares {} triangles but only {} could be read",
            declared,
            triangles.len()
        );
    }
    debug!("read binary STL: {} triangles", triangles.len());

    Ok(StlMeshData {
        header,
        triangles,
        incomplete,
    })
}

fn truncated(err: io::Error, what: &str) -> MeshIoError {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        MeshIoError::UnexpectedEndOfFile(what.to_string())
    } else {
        err.into()
    }
}

fn read_vector3<R: Read>(reader: &mut R) -> io::Result<Vector3f> {
    Ok([
        reader.read_f32::<LittleEndian>()?,
        reader.read_f32::<LittleEndian>()?,
        reader.read_f32::<LittleEndian>()?,
    ])
}

fn read_triangle_record<R: Read>(reader: &mut R) -> io::Result<StlTriangle> {
    Ok(StlTriangle {
        normal: read_vector3(reader)?,
        vertex1: read_vector3(reader)?,
        vertex2: read_vector3(reader)?,
        vertex3: read_vector3(reader)?,
        attribute: reader.read_u16::<LittleEndian>()?,
    })
}

// ============================================================================
// ASCII
// ============================================================================

/// Position in the ASCII grammar:
///
/// ```text
/// solid <ignored...>
///   facet normal nx ny nz
///     outer loop
///       vertex x y z   (x3)
///     endloop
///   endfacet
/// endsolid <ignored...>
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenSequence {
    Solid,
    Facet,
    Normal,
    NormalX,
    NormalY,
    NormalZ,
    Outer,
    Loop,
    Vertex1,
    Vertex1X,
    Vertex1Y,
    Vertex1Z,
    Vertex2,
    Vertex2X,
    Vertex2Y,
    Vertex2Z,
    Vertex3,
    Vertex3X,
    Vertex3Y,
    Vertex3Z,
    EndLoop,
    EndFacet,
    EndSolid,
}

impl TokenSequence {
    const ORDER: [TokenSequence; 23] = [
        TokenSequence::Solid,
        TokenSequence::Facet,
        TokenSequence::Normal,
        TokenSequence::NormalX,
        TokenSequence::NormalY,
        TokenSequence::NormalZ,
        TokenSequence::Outer,
        TokenSequence::Loop,
        TokenSequence::Vertex1,
        TokenSequence::Vertex1X,
        TokenSequence::Vertex1Y,
        TokenSequence::Vertex1Z,
        TokenSequence::Vertex2,
        TokenSequence::Vertex2X,
        TokenSequence::Vertex2Y,
        TokenSequence::Vertex2Z,
        TokenSequence::Vertex3,
        TokenSequence::Vertex3X,
        TokenSequence::Vertex3Y,
        TokenSequence::Vertex3Z,
        TokenSequence::EndLoop,
        TokenSequence::EndFacet,
        TokenSequence::EndSolid,
    ];

    /// The state after a token has been accepted. A finished facet loops back
    /// to expecting the next one.
    fn next(self) -> Self {
        match self {
            TokenSequence::EndFacet => TokenSequence::Facet,
            TokenSequence::EndSolid => TokenSequence::EndSolid,
            _ => Self::ORDER[self as usize + 1],
        }
    }

    /// Keyword expected in this state, or `None` for a float state.
    fn keyword(self) -> Option<&'static str> {
        match self {
            TokenSequence::Solid => Some("solid"),
            TokenSequence::Facet => Some("facet"),
            TokenSequence::Normal => Some("normal"),
            TokenSequence::Outer => Some("outer"),
            TokenSequence::Loop => Some("loop"),
            TokenSequence::Vertex1 | TokenSequence::Vertex2 | TokenSequence::Vertex3 => Some("vertex"),
            TokenSequence::EndLoop => Some("endloop"),
            TokenSequence::EndFacet => Some("endfacet"),
            TokenSequence::EndSolid => Some("endsolid"),
            _ => None,
        }
    }

    /// The triangle field written by a float state.
    fn float_slot(self, triangle: &mut StlTriangle) -> Option<&mut f32> {
        let slot = match self {
            TokenSequence::NormalX => &mut triangle.normal[0],
            TokenSequence::NormalY => &mut triangle.normal[1],
            TokenSequence::NormalZ => &mut triangle.normal[2],
            TokenSequence::Vertex1X => &mut triangle.vertex1[0],
            TokenSequence::Vertex1Y => &mut triangle.vertex1[1],
            TokenSequence::Vertex1Z => &mut triangle.vertex1[2],
            TokenSequence::Vertex2X => &mut triangle.vertex2[0],
            TokenSequence::Vertex2Y => &mut triangle.vertex2[1],
            TokenSequence::Vertex2Z => &mut triangle.vertex2[2],
            TokenSequence::Vertex3X => &mut triangle.vertex3[0],
            TokenSequence::Vertex3Y => &mut triangle.vertex3[1],
            TokenSequence::Vertex3Z => &mut triangle.vertex3[2],
            _ => return None,
        };
        Some(slot)
    }
}

/// Parse the ASCII grammar.
///
/// Keywords are matched exactly and case-sensitively; any mismatch or
/// unparseable number aborts the read. The rest of the `solid` line (the
/// solid name) is ignored. Reaching the end of input before `endsolid` is
/// tolerated; if it happens inside a facet, `incomplete` is set.
pub fn read_stl_ascii<R: BufRead>(reader: R) -> StatusResult<StlMeshData> {
    let mut lines = LineReader::new(reader);
    let mut state = TokenSequence::Solid;
    let mut triangle = StlTriangle::default();
    let mut triangles = Vec::new();
    let mut reached_end = false;

    'lines: while let Some(line) = lines.read_line()? {
        let number = line.number;
        let mut tokens = line.text.split_whitespace();

        if state == TokenSequence::Solid {
            match tokens.next() {
                Some("solid") => {
                    state = state.next();
                    continue;
                }
                found => return Err(unexpected(number, "solid", found.unwrap_or(""))),
            }
        }

        for token in tokens {
            if let Some(slot) = state.float_slot(&mut triangle) {
                *slot = token.parse().map_err(|_| MeshIoError::InvalidFloat {
                    line: number,
                    token: token.to_string(),
                })?;
                state = state.next();
                continue;
            }

            if state == TokenSequence::Facet && token == "endsolid" {
                reached_end = true;
                break 'lines;
            }

            let expected = state.keyword().unwrap_or("");
            if token != expected {
                return Err(unexpected(number, expected, token));
            }

            if state == TokenSequence::EndFacet {
                triangles.push(std::mem::take(&mut triangle));
            }
            state = state.next();
        }
    }

    // Input that stops inside a facet drops the partial facet.
    let incomplete = !reached_end && !matches!(state, TokenSequence::Solid | TokenSequence::Facet);
    if incomplete {
        warn!("ASCII STL truncated inside a facet after {} triangles", triangles.len());
    } else if !reached_end {
        warn!("ASCII STL ended after {} triangles without `endsolid`", triangles.len());
    }
    debug!("read ASCII STL: {} triangles", triangles.len());

    Ok(StlMeshData {
        header: Vec::new(),
        triangles,
        incomplete,
    })
}

fn unexpected(line: usize, expected: &str, found: &str) -> MeshIoError {
    MeshIoError::UnexpectedToken {
        line,
        expected: expected.to_string(),
        found: found.to_string(),
    }
}
