//! Little-endian write helpers for the wire format. Grounded in this
//! workspace's existing HYPC reader/writer's `le_u16`/`le_u32`/`write_u32`
//! free-function style, extended with float writers the integer-only HYPC
//! format never needed.

use std::io::{self, Write};

#[inline]
pub fn write_u8<W: Write>(w: &mut W, v: u8) -> io::Result<()> {
    w.write_all(&[v])
}

#[inline]
pub fn write_u16<W: Write>(w: &mut W, v: u16) -> io::Result<()> {
    w.write_all(&v.to_le_bytes())
}

#[inline]
pub fn write_u32<W: Write>(w: &mut W, v: u32) -> io::Result<()> {
    w.write_all(&v.to_le_bytes())
}

#[inline]
pub fn write_i32<W: Write>(w: &mut W, v: i32) -> io::Result<()> {
    w.write_all(&v.to_le_bytes())
}

#[inline]
pub fn write_f32<W: Write>(w: &mut W, v: f32) -> io::Result<()> {
    w.write_all(&v.to_le_bytes())
}

#[inline]
pub fn write_f64<W: Write>(w: &mut W, v: f64) -> io::Result<()> {
    w.write_all(&v.to_le_bytes())
}

/// Writes `count` entries from `values` at the given index width (16- or
/// 32-bit), zero-extending each `u32` value when the width is 16-bit.
pub fn write_index<W: Write>(w: &mut W, value: u32, wide: bool) -> io::Result<()> {
    if wide {
        write_u32(w, value)
    } else {
        write_u16(w, value as u16)
    }
}
