//! Encoder for the [Quantized Mesh terrain tile format][format], the binary
//! mesh tile format consumed by virtual-globe renderers such as CesiumJS.
//!
//! This crate covers only the encoder: geodetic-to-ECEF projection,
//! bounding-sphere and horizon-occlusion derivation, (u, v, h) quantization,
//! zig-zag/delta and high-water-mark index compression, tile-edge
//! classification, area-weighted vertex normals, and bit-exact
//! little-endian serialization including extension framing. Decoding,
//! rendering, and mesh generation from raster data are out of scope.
//!
//! [format]: https://github.com/CesiumGS/quantized-mesh

pub mod bounding_sphere;
pub mod edges;
mod encode;
pub mod ellipsoid;
pub mod error;
pub mod extensions;
mod hwm;
pub mod normals;
pub mod occlusion;
pub mod options;
pub mod projection;
pub mod quantize;
mod wire;
mod zigzag;

pub use bounding_sphere::SphereMethod;
pub use ellipsoid::Ellipsoid;
pub use encode::{encode, EncodeStats, INDEX16_VERTEX_LIMIT};
pub use error::{EncodeError, Result};
pub use extensions::{Extension, Metadata, WaterMask};
pub use options::{EncodeOptions, EncodeOptionsBuilder, PlanarBounds};

#[cfg(test)]
mod tests {
    use super::*;

    /// Scenario B from the spec: a small hand-built mesh, checked end to end
    /// for index round-trip and edge classification.
    #[test]
    fn scenario_b_small_mesh_end_to_end() {
        let positions: Vec<f64> = vec![
            0.0, 0.0, 0.0, //
            1.0, 1.0, 1.0, //
            0.0, 1.0, 4.0, //
            2.0, 3.0, 4.0, //
            8.0, 9.0, 10.0, //
            12.0, 13.0, 14.0,
        ];
        let indices: Vec<u32> = vec![0, 1, 2, 1, 2, 3, 2, 3, 4, 3, 4, 5];

        let options = EncodeOptions::builder().build();
        let mut out = Vec::new();
        let stats = encode(&mut out, &positions, &indices, &options).expect("encode succeeds");

        assert_eq!(out.len(), stats.total());
        assert_eq!(&out[0..88].len(), &88);

        // Vertex count field sits right after the 88-byte header.
        let n = u32::from_le_bytes([out[88], out[89], out[90], out[91]]);
        assert_eq!(n, 6);

        let bounds = quantize::planar_bounds_from_positions(&positions);
        let quantized = quantize::quantize_positions(&positions, bounds);
        let edges = edges::classify(&quantized);
        assert_eq!(edges.west, vec![0, 2]);
        assert_eq!(edges.south, vec![0]);
        assert_eq!(edges.east, vec![5]);
        assert_eq!(edges.north, vec![5]);
    }

    /// Scenario F: encoding with the VertexNormalsExtension attached yields
    /// extension framing consistent with `compute_vertex_normals`.
    #[test]
    fn scenario_f_vertex_normals_extension_framing() {
        let positions: Vec<f64> = vec![
            0.0, 0.0, 0.0, //
            1.0, 1.0, 1.0, //
            0.0, 1.0, 4.0, //
            2.0, 3.0, 4.0, //
            8.0, 9.0, 10.0, //
            12.0, 13.0, 14.0,
        ];
        let indices: Vec<u32> = vec![0, 1, 2, 1, 2, 3, 2, 3, 4, 3, 4, 5];

        let options = EncodeOptions::builder()
            .extension(Extension::VertexNormals)
            .build();
        let mut out = Vec::new();
        encode(&mut out, &positions, &indices, &options).expect("encode succeeds");

        // The extension block is the final 1 + 4 + 2*N bytes of the stream.
        let n = 6usize;
        let ext_len = 1 + 4 + 2 * n;
        let ext_block = &out[out.len() - ext_len..];
        assert_eq!(ext_block[0], extensions::EXTENSION_ID_VERTEX_NORMALS);
        let declared_len = u32::from_le_bytes([ext_block[1], ext_block[2], ext_block[3], ext_block[4]]);
        assert_eq!(declared_len as usize, 2 * n);
    }

    #[test]
    fn rejects_empty_mesh() {
        let options = EncodeOptions::builder().build();
        let mut out = Vec::new();
        assert!(encode(&mut out, &[], &[], &options).is_err());
    }

    #[test]
    fn rejects_out_of_range_index() {
        let positions = vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 0.0, 1.0, 4.0];
        let indices = vec![0u32, 1, 5];
        let options = EncodeOptions::builder().build();
        let mut out = Vec::new();
        assert!(encode(&mut out, &positions, &indices, &options).is_err());
    }

    #[test]
    fn rejects_duplicate_extension_ids() {
        let positions = vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 0.0, 1.0, 4.0];
        let indices = vec![0u32, 1, 2];
        let options = EncodeOptions::builder()
            .extension(Extension::VertexNormals)
            .extension(Extension::VertexNormals)
            .build();
        let mut out = Vec::new();
        assert!(encode(&mut out, &positions, &indices, &options).is_err());
    }

    #[test]
    fn header_is_always_88_bytes_regardless_of_mesh_size() {
        for n in [1usize, 3, 10] {
            let mut positions = Vec::new();
            for i in 0..n {
                positions.extend_from_slice(&[i as f64, (i * 2) as f64, (i * 3) as f64]);
            }
            let options = EncodeOptions::builder().build();
            let mut out = Vec::new();
            encode(&mut out, &positions, &[], &options).expect("encode succeeds");
            assert!(out.len() >= 88);
        }
    }
}
