//! The pack-and-write driver: orchestrates header, vertices, indices (with
//! alignment padding), edge indices, and extensions into one byte stream.
//!
//! State machine: `Idle -> Header -> Vertices -> Align -> Indices ->
//! EdgeIndices -> Extensions* -> Done`. Any failure is terminal; there are
//! no partial retries once bytes have started flowing to the sink.

use std::collections::HashSet;
use std::io::Write;

use tracing::{debug, trace};

use crate::bounding_sphere::{self, Sphere};
use crate::edges::{self, EdgeIndices};
use crate::error::{EncodeError, Result};
use crate::extensions::ExtensionContext;
use crate::occlusion;
use crate::options::EncodeOptions;
use crate::projection::project_all;
use crate::quantize::{self, Quantized};
use crate::wire;
use crate::zigzag;

/// Vertex/triangle-index width threshold: at or below this vertex count,
/// indices (and edge indices) are serialized as 16-bit.
pub const INDEX16_VERTEX_LIMIT: usize = 65536;

/// Byte counts per section of a successful encode, for logging/telemetry.
/// Does not change the wire output; exists so callers can assert on shape
/// without re-parsing the emitted stream.
#[derive(Debug, Clone, Copy, Default)]
pub struct EncodeStats {
    pub header_bytes: usize,
    pub vertex_bytes: usize,
    pub padding_bytes: usize,
    pub index_bytes: usize,
    pub edge_index_bytes: usize,
    pub extension_bytes: usize,
}

impl EncodeStats {
    pub fn total(&self) -> usize {
        self.header_bytes
            + self.vertex_bytes
            + self.padding_bytes
            + self.index_bytes
            + self.edge_index_bytes
            + self.extension_bytes
    }
}

fn validate_inputs(positions: &[f64], indices: &[u32], options: &EncodeOptions) -> Result<usize> {
    if positions.is_empty() || positions.len() % 3 != 0 {
        return Err(EncodeError::InvalidInput(
            "positions length must be a non-zero multiple of 3",
        ));
    }

    let n = positions.len() / 3;

    if indices.len() % 3 != 0 {
        return Err(EncodeError::InvalidInput(
            "indices length must be a multiple of 3",
        ));
    }

    for &i in indices {
        if i as usize >= n {
            return Err(EncodeError::InvalidInput("index out of range of positions"));
        }
    }

    if !options.ellipsoid.is_valid() {
        return Err(EncodeError::NumericFailure(
            "ellipsoid semi-major/semi-minor axes must be positive",
        ));
    }

    if let Some((min_lon, min_lat, max_lon, max_lat)) = options.bounds {
        if max_lon <= min_lon || max_lat <= min_lat {
            return Err(EncodeError::InvalidInput(
                "bounds must satisfy max > min on both planar axes",
            ));
        }
    }

    let mut seen_ids = HashSet::new();
    for ext in &options.extensions {
        if !seen_ids.insert(ext.id()) {
            return Err(EncodeError::InvalidExtension("duplicate extension id"));
        }
    }

    Ok(n)
}

fn ecef_aabb_center(points: &[[f64; 3]]) -> [f64; 3] {
    let mut min = points[0];
    let mut max = points[0];

    for p in &points[1..] {
        for axis in 0..3 {
            if p[axis] < min[axis] {
                min[axis] = p[axis];
            }
            if p[axis] > max[axis] {
                max[axis] = p[axis];
            }
        }
    }

    [
        (min[0] + max[0]) / 2.0,
        (min[1] + max[1]) / 2.0,
        (min[2] + max[2]) / 2.0,
    ]
}

fn height_range(positions: &[f64]) -> (f32, f32) {
    let mut min_h = f64::INFINITY;
    let mut max_h = f64::NEG_INFINITY;
    for triple in positions.chunks_exact(3) {
        if triple[2] < min_h {
            min_h = triple[2];
        }
        if triple[2] > max_h {
            max_h = triple[2];
        }
    }
    (min_h as f32, max_h as f32)
}

fn write_header<W: Write>(
    sink: &mut W,
    center: [f64; 3],
    min_h: f32,
    max_h: f32,
    sphere: Sphere,
    hop: [f64; 3],
) -> Result<usize> {
    wire::write_f64(sink, center[0])?;
    wire::write_f64(sink, center[1])?;
    wire::write_f64(sink, center[2])?;

    wire::write_f32(sink, min_h)?;
    wire::write_f32(sink, max_h)?;

    wire::write_f64(sink, sphere.center[0])?;
    wire::write_f64(sink, sphere.center[1])?;
    wire::write_f64(sink, sphere.center[2])?;
    wire::write_f64(sink, sphere.radius)?;

    wire::write_f64(sink, hop[0])?;
    wire::write_f64(sink, hop[1])?;
    wire::write_f64(sink, hop[2])?;

    Ok(88)
}

fn write_vertex_data<W: Write>(sink: &mut W, quantized: &Quantized) -> Result<usize> {
    let n = quantized.u.len();
    wire::write_u32(sink, n as u32)?;

    let mut bytes = 4;
    for channel in [&quantized.u, &quantized.v, &quantized.h] {
        let zz = zigzag::encode_channel(channel);

        #[cfg(target_endian = "little")]
        {
            // Zero-copy reinterpret of the zig-zagged u16 channel, matching
            // this workspace's bytemuck-based fast path for packed
            // little-endian data (see `hypc::parse_hypc_bytes`'s points
            // block). Only sound when the host's native u16 layout is
            // already little-endian.
            let raw: &[u8] = bytemuck::cast_slice(&zz);
            sink.write_all(raw)?;
            bytes += raw.len();
        }

        #[cfg(not(target_endian = "little"))]
        {
            for v in &zz {
                wire::write_u16(sink, *v)?;
                bytes += 2;
            }
        }
    }

    Ok(bytes)
}

fn write_indices<W: Write>(sink: &mut W, indices: &[u32], wide: bool) -> Result<usize> {
    let triangle_count = (indices.len() / 3) as u32;
    wire::write_u32(sink, triangle_count)?;

    let encoded = crate::hwm::encode(indices);
    let mut bytes = 4;
    for v in encoded {
        wire::write_index(sink, v, wide)?;
        bytes += if wide { 4 } else { 2 };
    }

    Ok(bytes)
}

fn write_edge_list<W: Write>(sink: &mut W, list: &[u32], wide: bool) -> Result<usize> {
    wire::write_u32(sink, list.len() as u32)?;
    let mut bytes = 4;
    for &v in list {
        wire::write_index(sink, v, wide)?;
        bytes += if wide { 4 } else { 2 };
    }
    Ok(bytes)
}

fn write_edge_indices<W: Write>(sink: &mut W, edges: &EdgeIndices, wide: bool) -> Result<usize> {
    let mut bytes = 0;
    bytes += write_edge_list(sink, &edges.west, wide)?;
    bytes += write_edge_list(sink, &edges.south, wide)?;
    bytes += write_edge_list(sink, &edges.east, wide)?;
    bytes += write_edge_list(sink, &edges.north, wide)?;
    Ok(bytes)
}

/// Encodes a mesh (flat geodetic `positions` and triangle `indices`) into the
/// Quantized Mesh wire format, writing the result to `sink`.
pub fn encode<W: Write>(
    sink: &mut W,
    positions: &[f64],
    indices: &[u32],
    options: &EncodeOptions,
) -> Result<EncodeStats> {
    let n = validate_inputs(positions, indices, options)?;

    let cartesian_flat = project_all(positions, &options.ellipsoid);
    for &c in &cartesian_flat {
        if !c.is_finite() {
            return Err(EncodeError::NumericFailure(
                "projection produced a non-finite ECEF coordinate",
            ));
        }
    }
    debug!(vertex_count = n, "projected positions to ECEF");

    let cartesian_points: Vec<[f64; 3]> = cartesian_flat
        .chunks_exact(3)
        .map(|c| [c[0], c[1], c[2]])
        .collect();

    let center = ecef_aabb_center(&cartesian_points);
    let (min_h, max_h) = height_range(positions);

    let sphere = bounding_sphere::compute(&cartesian_points, options.sphere_method);
    if options.strict && sphere.radius == 0.0 {
        return Err(EncodeError::NumericFailure(
            "all positions are coincident; bounding sphere has zero radius",
        ));
    }
    debug!(sphere_method = ?options.sphere_method, radius = sphere.radius, "computed bounding sphere");

    let hop = occlusion::occlusion_point(&cartesian_points, sphere.center, &options.ellipsoid);

    let planar_bounds = options
        .bounds
        .unwrap_or_else(|| quantize::planar_bounds_from_positions(positions));
    let quantized = quantize::quantize_positions(positions, planar_bounds);
    let edge_indices = edges::classify(&quantized);
    debug!(
        west = edge_indices.west.len(),
        south = edge_indices.south.len(),
        east = edge_indices.east.len(),
        north = edge_indices.north.len(),
        "classified edge vertices"
    );

    let wide = n > INDEX16_VERTEX_LIMIT;

    let mut stats = EncodeStats::default();
    stats.header_bytes = write_header(sink, center, min_h, max_h, sphere, hop)?;
    stats.vertex_bytes = write_vertex_data(sink, &quantized)?;

    let align = if wide { 4 } else { 2 };
    let offset = stats.header_bytes + stats.vertex_bytes;
    let remainder = offset % align;
    let padding = if remainder == 0 { 0 } else { align - remainder };
    if padding > 0 {
        sink.write_all(&vec![0u8; padding])?;
    }
    stats.padding_bytes = padding;

    stats.index_bytes = write_indices(sink, indices, wide)?;
    stats.edge_index_bytes = write_edge_indices(sink, &edge_indices, wide)?;

    let ext_ctx = ExtensionContext {
        cartesian_positions: &cartesian_flat,
        indices,
    };

    let mut extension_bytes = 0;
    for ext in &options.extensions {
        let mut buf = Vec::new();
        ext.write(&mut buf, &ext_ctx)?;
        trace!(id = ext.id(), bytes = buf.len(), "wrote extension block");
        extension_bytes += buf.len();
        sink.write_all(&buf)?;
    }
    stats.extension_bytes = extension_bytes;

    debug!(total_bytes = stats.total(), "encode complete");
    Ok(stats)
}
