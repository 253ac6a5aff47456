//! High-water-mark compression of triangle indices.
//!
//! Each emitted value is the gap between a running maximum ("high water
//! mark") and the index being encoded; the mark only advances when an index
//! equal to it is seen, which happens often in triangle-strip-like meshes
//! where new vertices are introduced in increasing order.

/// Encodes `indices` into an array of the same length, one gap per index.
pub fn encode(indices: &[u32]) -> Vec<u32> {
    let mut out = Vec::with_capacity(indices.len());
    let mut highest: u32 = 0;

    for &i in indices {
        out.push(highest.wrapping_sub(i));
        if i == highest {
            highest += 1;
        }
    }

    out
}

/// Inverse of [`encode`]. Only used by tests: decoding is outside this
/// crate's scope in production use.
#[cfg(test)]
pub fn decode(deltas: &[u32]) -> Vec<u32> {
    let mut out = Vec::with_capacity(deltas.len());
    let mut highest: u32 = 0;

    for &delta in deltas {
        let i = highest.wrapping_sub(delta);
        out.push(i);
        if delta == 0 {
            highest += 1;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips() {
        let indices = [0u32, 1, 2, 1, 2, 3, 3, 4, 5, 2, 3, 4];
        let encoded = encode(&indices);
        assert_eq!(decode(&encoded), indices.to_vec());
    }

    #[test]
    fn strictly_increasing_indices_compress_to_zero() {
        let indices = [0u32, 1, 2, 3, 4, 5];
        assert_eq!(encode(&indices), vec![0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn non_monotonic_indices_wrap_instead_of_panicking() {
        let indices = [2u32, 1, 0];
        let encoded = encode(&indices);
        assert_eq!(decode(&encoded), indices.to_vec());
    }
}
