use std::path::{Path, PathBuf};

use thiserror::Error;

use meshfmt_core::dense_mesh::DenseMesh;
use meshfmt_core::status::MeshIoError;
use meshfmt_io::obj_reader::read_obj;
use meshfmt_io::obj_writer::{write_obj_file, write_obj_mesh_file};
use meshfmt_io::stl_reader::{detect_stl_format, read_stl};
use meshfmt_io::stl_writer::{write_stl, DEFAULT_SOLID_NAME};
use meshfmt_io::{
    obj_format_data_to_dense_mesh, stl_mesh_to_dense_mesh, MeshFormat, ObjFaceType, ObjReadOptions,
    ObjToMeshOptions, ObjWriteOptions, StlFormat, StlWriteOptions,
};

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Mesh(#[from] MeshIoError),
    #[error("{0} is empty")]
    EmptyMesh(String),
}

/// Convert and inspect OBJ and STL mesh files.
#[derive(Debug, clap::Parser)]
#[command(version)]
pub struct Args {
    /// Log debug output (overridden by `RUST_LOG`).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Convert a mesh file. Formats are chosen from the file extensions.
    Convert {
        input: PathBuf,
        output: PathBuf,
        /// Write ASCII instead of binary STL.
        #[arg(long)]
        ascii: bool,
        /// Drop normals.
        #[arg(long)]
        no_normals: bool,
        /// Drop texture coordinates.
        #[arg(long)]
        no_uvs: bool,
        /// Drop vertex colors.
        #[arg(long)]
        no_colors: bool,
        /// Reverse the winding of every face.
        #[arg(long)]
        reverse: bool,
        /// Solid name for STL output.
        #[arg(long, default_value = DEFAULT_SOLID_NAME)]
        name: String,
    },
    /// Print a summary of a mesh file.
    Info { input: PathBuf },
}

pub fn exec(command: Command) -> Result<(), CliError> {
    match command {
        Command::Convert {
            input,
            output,
            ascii,
            no_normals,
            no_uvs,
            no_colors,
            reverse,
            name,
        } => {
            let settings = ConvertSettings {
                ascii,
                normals: !no_normals,
                uvs: !no_uvs,
                colors: !no_colors,
                reverse,
                name,
            };
            convert(&input, &output, &settings)
        }
        Command::Info { input } => {
            print!("{}", info(&input)?);
            Ok(())
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConvertSettings {
    pub ascii: bool,
    pub normals: bool,
    pub uvs: bool,
    pub colors: bool,
    pub reverse: bool,
    pub name: String,
}

impl ConvertSettings {
    fn obj_read_options(&self) -> ObjReadOptions {
        ObjReadOptions::default()
            .with_normals(self.normals)
            .with_uvs(self.uvs)
            .with_vertex_colors(self.colors)
    }

    fn obj_write_options(&self) -> ObjWriteOptions {
        ObjWriteOptions::default()
            .with_normals(self.normals)
            .with_uvs(self.uvs)
            .with_vertex_colors(self.colors)
            .with_reverse_orientation(self.reverse)
    }

    fn to_mesh_options(&self) -> ObjToMeshOptions {
        ObjToMeshOptions {
            ignore_uvs: !self.uvs,
            ignore_normals: !self.normals,
            ignore_colors: !self.colors,
        }
    }
}

pub fn convert(input: &Path, output: &Path, settings: &ConvertSettings) -> Result<(), CliError> {
    let input_format = MeshFormat::from_path(input)?;
    let output_format = MeshFormat::from_path(output)?;

    // OBJ to OBJ stays in the intermediate record so quads and n-gons survive.
    if input_format == MeshFormat::Obj && output_format == MeshFormat::Obj {
        let data = read_obj(input, &settings.obj_read_options())?;
        write_obj_file(output, &data, &settings.obj_write_options())?;
        log::info!("converted {} faces", data.face_count());
        return Ok(());
    }

    let mut mesh = match input_format {
        MeshFormat::Obj => {
            let data = read_obj(input, &settings.obj_read_options())?;
            obj_format_data_to_dense_mesh(&data, &settings.to_mesh_options())
        }
        MeshFormat::Stl => stl_mesh_to_dense_mesh(&read_stl(input)?),
    };
    if mesh.triangle_count() == 0 {
        return Err(CliError::EmptyMesh(input.display().to_string()));
    }

    match output_format {
        MeshFormat::Obj => write_obj_mesh_file(output, &mesh, &settings.obj_write_options())?,
        MeshFormat::Stl => {
            if settings.reverse {
                reverse_triangles(&mut mesh);
            }
            let options = StlWriteOptions::default()
                .with_binary(!settings.ascii)
                .with_solid_name(settings.name.clone());
            write_stl(output, &mesh, &options)?;
        }
    }
    log::info!("converted {} triangles", mesh.triangle_count());
    Ok(())
}

fn reverse_triangles(mesh: &mut DenseMesh) {
    for tid in 0..mesh.triangle_count() {
        let [a, b, c] = mesh.triangle(tid);
        mesh.set_triangle(tid, [c, b, a]);
    }
}

/// Human-readable summary of a mesh file.
pub fn info(input: &Path) -> Result<String, CliError> {
    let mut lines = vec![format!("file:      {}", input.display())];

    let mesh = match MeshFormat::from_path(input)? {
        MeshFormat::Obj => {
            let data = read_obj(input, &ObjReadOptions::default())?;
            let count = |kind: ObjFaceType| data.face_stream.iter().filter(|f| f.face_type == kind).count();
            lines.push("format:    OBJ".to_string());
            lines.push(format!("vertices:  {}", data.vertex_positions.len()));
            lines.push(format!("normals:   {}", data.normals.len()));
            lines.push(format!("uvs:       {}", data.uvs.len()));
            lines.push(format!("colors:    {}", if data.has_vertex_colors() { "yes" } else { "no" }));
            lines.push(format!(
                "faces:     {} ({} triangles, {} quads, {} polygons)",
                data.face_count(),
                count(ObjFaceType::Triangle),
                count(ObjFaceType::Quad),
                count(ObjFaceType::Polygon)
            ));
            lines.push(format!("groups:    {}", data.distinct_group_count()));
            obj_format_data_to_dense_mesh(&data, &ObjToMeshOptions::default())
        }
        MeshFormat::Stl => {
            let file = std::fs::File::open(input).map_err(MeshIoError::from)?;
            let variant = detect_stl_format(&mut std::io::BufReader::new(file))?;
            let data = read_stl(input)?;
            lines.push(match variant {
                StlFormat::Ascii => "format:    STL (ASCII)".to_string(),
                StlFormat::Binary => format!("format:    STL (binary, header \"{}\")", data.header_text()),
            });
            lines.push(format!("triangles: {}", data.triangles.len()));
            if data.incomplete {
                lines.push("warning:   file ends before its declared triangle count".to_string());
            }
            stl_mesh_to_dense_mesh(&data)
        }
    };

    if let Some((lo, hi)) = mesh.bounds() {
        lines.push(format!(
            "bounds:    [{:.6}, {:.6}, {:.6}] - [{:.6}, {:.6}, {:.6}]",
            lo[0], lo[1], lo[2], hi[0], hi[1], hi[2]
        ));
    }

    let mut text = lines.join("\n");
    text.push('\n');
    Ok(text)
}
