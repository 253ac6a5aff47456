use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use qme::{EncodeOptions, Ellipsoid, Extension, Metadata, SphereMethod};
use rayon::prelude::*;
use std::{
    fs::{self, File},
    io::{BufRead, BufReader, BufWriter},
    path::{Path, PathBuf},
};
use tracing::{info, warn};
use walkdir::WalkDir;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SphereMethodArg {
    BoundingBox,
    Naive,
    Ritter,
    Auto,
}

impl From<SphereMethodArg> for SphereMethod {
    fn from(v: SphereMethodArg) -> Self {
        match v {
            SphereMethodArg::BoundingBox => SphereMethod::BoundingBox,
            SphereMethodArg::Naive => SphereMethod::Naive,
            SphereMethodArg::Ritter => SphereMethod::Ritter,
            SphereMethodArg::Auto => SphereMethod::Auto,
        }
    }
}

/// Reads Wavefront OBJ terrain meshes (vertices in lon/lat/height degrees)
/// and writes Quantized Mesh `.terrain` tiles.
#[derive(Parser, Debug)]
#[command(name = "qme-cli", version)]
struct Args {
    /// Directory of `.obj` files to convert.
    #[arg(long, default_value = "tiles")]
    input_dir: String,

    /// Directory `.terrain` files are written into.
    #[arg(long, default_value = "tiles_out")]
    output_dir: String,

    /// Overwrite existing output files.
    #[arg(long, default_value_t = false)]
    overwrite: bool,

    /// Bounding-sphere strategy.
    #[arg(long, value_enum, default_value_t = SphereMethodArg::Auto)]
    sphere_method: SphereMethodArg,

    /// Semi-major axis in meters. Defaults to WGS84.
    #[arg(long)]
    ellipsoid_a: Option<f64>,

    /// Semi-minor axis in meters. Defaults to WGS84.
    #[arg(long)]
    ellipsoid_b: Option<f64>,

    /// Attach the vertex normals extension.
    #[arg(long, default_value_t = false)]
    normals: bool,

    /// Optional path to a minified-on-write JSON file attached as the
    /// metadata extension.
    #[arg(long)]
    metadata_json: Option<String>,
}

/// Parses `v x y z` and `f a b c` (optionally `a/b/c`-style vertex/texture/
/// normal indices, taking only the vertex index) records out of an OBJ file.
/// Vertex triples are interpreted as `(longitude deg, latitude deg, height m)`.
fn parse_obj<R: std::io::Read>(reader: R) -> Result<(Vec<f64>, Vec<u32>)> {
    let mut positions = Vec::new();
    let mut indices = Vec::new();

    for line_result in BufReader::new(reader).lines() {
        let line = line_result?;
        let trimmed = line.trim();

        if let Some(rest) = trimmed.strip_prefix("v ") {
            let mut parts = rest.split_whitespace();
            let lon: f64 = parts.next().context("missing longitude")?.parse()?;
            let lat: f64 = parts.next().context("missing latitude")?.parse()?;
            let h: f64 = parts.next().context("missing height")?.parse()?;
            positions.push(lon);
            positions.push(lat);
            positions.push(h);
        } else if let Some(rest) = trimmed.strip_prefix("f ") {
            let face_indices: Vec<u32> = rest
                .split_whitespace()
                .map(|token| {
                    let vertex_part = token.split('/').next().unwrap_or(token);
                    vertex_part
                        .parse::<i64>()
                        .map(|one_based| (one_based - 1) as u32)
                })
                .collect::<std::result::Result<_, _>>()?;

            // Fan-triangulate faces with more than 3 vertices.
            for window in 1..face_indices.len().saturating_sub(1) {
                indices.push(face_indices[0]);
                indices.push(face_indices[window]);
                indices.push(face_indices[window + 1]);
            }
        }
    }

    Ok((positions, indices))
}

fn convert_one(path: &Path, output_path: &Path, args: &Args) -> Result<()> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let (positions, indices) = parse_obj(file)?;

    if positions.is_empty() {
        warn!(path = %path.display(), "no vertices found, skipping");
        return Ok(());
    }

    let ellipsoid = match (args.ellipsoid_a, args.ellipsoid_b) {
        (Some(a), Some(b)) => Ellipsoid::new(a, b),
        _ => Ellipsoid::WGS84,
    };

    let mut builder = EncodeOptions::builder()
        .sphere_method(args.sphere_method.into())
        .ellipsoid(ellipsoid);

    if args.normals {
        builder = builder.extension(Extension::VertexNormals);
    }

    if let Some(metadata_path) = &args.metadata_json {
        let contents = fs::read_to_string(metadata_path)
            .with_context(|| format!("reading {}", metadata_path))?;
        let value: serde_json::Value = serde_json::from_str(&contents)?;
        builder = builder.extension(Extension::Metadata(Metadata::Json(value)));
    }

    let options = builder.build();

    let out_file = File::create(output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;
    let mut writer = BufWriter::new(out_file);

    let stats = qme::encode(&mut writer, &positions, &indices, &options)
        .map_err(|e| anyhow::anyhow!("{e}"))
        .with_context(|| format!("encoding {}", path.display()))?;

    info!(
        path = %path.display(),
        vertices = positions.len() / 3,
        triangles = indices.len() / 3,
        bytes = stats.total(),
        "wrote terrain tile"
    );

    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    fs::create_dir_all(&args.output_dir)?;

    let obj_paths: Vec<PathBuf> = WalkDir::new(&args.input_dir)
        .follow_links(true)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension()
                .and_then(|s| s.to_str())
                .map(|s| s.eq_ignore_ascii_case("obj"))
                .unwrap_or(false)
        })
        .collect();

    obj_paths.par_iter().for_each(|path| {
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("tile");
        let output_path = PathBuf::from(&args.output_dir).join(format!("{stem}.terrain"));

        if !args.overwrite && output_path.exists() {
            return;
        }

        if let Err(err) = convert_one(path, &output_path, &args) {
            warn!(path = %path.display(), error = %err, "conversion failed");
        }
    });

    Ok(())
}
