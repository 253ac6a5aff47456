//! Classifies vertices onto the four tile edges in quantized (u, v) space.

use crate::quantize::{Quantized, MAX_QUANTIZED};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeIndices {
    pub west: Vec<u32>,
    pub south: Vec<u32>,
    pub east: Vec<u32>,
    pub north: Vec<u32>,
}

/// Scans the quantized vertex stream once, in vertex-index order. Corner
/// vertices end up in the two lists they qualify for.
pub fn classify(quantized: &Quantized) -> EdgeIndices {
    let mut edges = EdgeIndices::default();

    for (i, (&u, &v)) in quantized.u.iter().zip(&quantized.v).enumerate() {
        let idx = i as u32;
        if u == 0 {
            edges.west.push(idx);
        }
        if u == MAX_QUANTIZED as i16 {
            edges.east.push(idx);
        }
        if v == 0 {
            edges.south.push(idx);
        }
        if v == MAX_QUANTIZED as i16 {
            edges.north.push(idx);
        }
    }

    edges
}
