//! Extension framing: the `{id: u8, length: u32, payload}` envelope, and the
//! three known extension kinds.

use crate::error::{EncodeError, Result};
use crate::normals::{compute_vertex_normals, oct_encode};
use crate::wire;
use std::io::Write;

pub const EXTENSION_ID_VERTEX_NORMALS: u8 = 1;
pub const EXTENSION_ID_WATER_MASK: u8 = 2;
pub const EXTENSION_ID_METADATA: u8 = 4;

/// Water Mask payload: either a single uniform byte, or a full 256x256 grid.
#[derive(Debug, Clone)]
pub enum WaterMask {
    Uniform(u8),
    Grid(Vec<u8>),
}

/// Metadata payload: raw bytes the caller has already minified, or a
/// key-ordered set of entries this crate will minify itself.
#[derive(Debug, Clone)]
pub enum Metadata {
    Json(serde_json::Value),
    Bytes(Vec<u8>),
}

/// An encoder-computed context passed to extensions so they can reuse
/// intermediates the core pipeline already produced, instead of recomputing
/// them from scratch.
pub struct ExtensionContext<'a> {
    pub cartesian_positions: &'a [f64],
    pub indices: &'a [u32],
}

/// A single extension attached to an encode call, tagged by kind.
pub enum Extension {
    VertexNormals,
    WaterMask(WaterMask),
    Metadata(Metadata),
}

impl Extension {
    pub fn id(&self) -> u8 {
        match self {
            Extension::VertexNormals => EXTENSION_ID_VERTEX_NORMALS,
            Extension::WaterMask(_) => EXTENSION_ID_WATER_MASK,
            Extension::Metadata(_) => EXTENSION_ID_METADATA,
        }
    }

    fn payload(&self, ctx: &ExtensionContext) -> Result<Vec<u8>> {
        match self {
            Extension::VertexNormals => {
                let normals = compute_vertex_normals(ctx.cartesian_positions, ctx.indices);
                let mut buf = Vec::with_capacity(normals.len() * 2);
                for n in normals {
                    let [x, y] = oct_encode(n);
                    buf.push(x);
                    buf.push(y);
                }
                Ok(buf)
            }
            Extension::WaterMask(mask) => match mask {
                WaterMask::Uniform(v) => Ok(vec![*v]),
                WaterMask::Grid(data) => {
                    if data.len() != 256 * 256 {
                        return Err(EncodeError::InvalidExtension(
                            "water mask grid must be exactly 256x256 bytes",
                        ));
                    }
                    Ok(data.clone())
                }
            },
            Extension::Metadata(meta) => match meta {
                Metadata::Json(value) => {
                    serde_json::to_vec(value).map_err(|_| {
                        EncodeError::InvalidExtension("metadata payload is not valid JSON")
                    })
                }
                Metadata::Bytes(bytes) => Ok(bytes.clone()),
            },
        }
    }

    /// Writes the full `{id, length, payload}` envelope to `sink`.
    pub fn write<W: Write>(&self, sink: &mut W, ctx: &ExtensionContext) -> Result<()> {
        let payload = self.payload(ctx)?;
        wire::write_u8(sink, self.id())?;
        wire::write_u32(sink, payload.len() as u32)?;
        sink.write_all(&payload)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_normals_roundtrip_length() {
        let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
        let indices = [0u32, 1, 2];
        let ext = Extension::VertexNormals;
        let ctx = ExtensionContext {
            cartesian_positions: &positions,
            indices: &indices,
        };

        let mut out = Vec::new();
        ext.write(&mut out, &ctx).unwrap();
        assert_eq!(out[0], EXTENSION_ID_VERTEX_NORMALS);
        let len = u32::from_le_bytes([out[1], out[2], out[3], out[4]]);
        assert_eq!(len, 6);
        assert_eq!(out.len(), 1 + 4 + 6);
    }

    #[test]
    fn water_mask_grid_rejects_wrong_size() {
        let ext = Extension::WaterMask(WaterMask::Grid(vec![0u8; 10]));
        let ctx = ExtensionContext {
            cartesian_positions: &[],
            indices: &[],
        };
        let mut out = Vec::new();
        assert!(ext.write(&mut out, &ctx).is_err());
    }

    #[test]
    fn metadata_minifies_json() {
        let value = serde_json::json!({"a": 1, "b": [1, 2]});
        let ext = Extension::Metadata(Metadata::Json(value));
        let ctx = ExtensionContext {
            cartesian_positions: &[],
            indices: &[],
        };
        let mut out = Vec::new();
        ext.write(&mut out, &ctx).unwrap();
        let len = u32::from_le_bytes([out[1], out[2], out[3], out[4]]) as usize;
        let payload = &out[5..5 + len];
        assert!(!payload.iter().any(|&b| b == b'\n'));
    }
}
