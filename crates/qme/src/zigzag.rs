//! Zig-zag coding: maps signed 16-bit deltas to unsigned 16-bit, keeping
//! small magnitudes near zero.

/// `zz(i) = (i << 1) ^ (i >> 15)`, arithmetic shift, reinterpreted as `u16`.
#[inline]
pub fn encode(i: i16) -> u16 {
    (((i as i32) << 1) ^ ((i as i32) >> 15)) as u16
}

/// Inverse of [`encode`]. Only used by tests: decoding is outside this
/// crate's scope in production use.
#[cfg(test)]
pub fn decode(z: u16) -> i16 {
    ((z >> 1) as i16) ^ -((z & 1) as i16)
}

/// Zig-zags a per-axis channel: the first value verbatim, then the zig-zag of
/// each wrapping delta from its predecessor.
pub fn encode_channel(values: &[i16]) -> Vec<u16> {
    let mut out = Vec::with_capacity(values.len());
    if values.is_empty() {
        return out;
    }

    out.push(encode(values[0]));
    for window in values.windows(2) {
        out.push(encode(window[1].wrapping_sub(window[0])));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_values() {
        assert_eq!(encode(-1), 1);
        assert_eq!(encode(-2), 3);
        assert_eq!(encode(0), 0);
        assert_eq!(encode(1), 2);
        assert_eq!(encode(2), 4);
    }

    #[test]
    fn round_trips() {
        for i in [-32768_i16, -1000, -1, 0, 1, 1000, 32767] {
            assert_eq!(decode(encode(i)), i);
        }
    }

    #[test]
    fn channel_round_trip_recovers_prefix_sums() {
        let values: [i16; 5] = [10, 20, 5, 5, -30];
        let zz = encode_channel(&values);

        let mut out = Vec::with_capacity(values.len());
        let mut running = decode(zz[0]);
        out.push(running);
        for &z in &zz[1..] {
            running = running.wrapping_add(decode(z));
            out.push(running);
        }

        assert_eq!(out, values);
    }
}
