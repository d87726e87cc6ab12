use super::uleb128;
use crate::error::DeltaResult;

/// Decodes a zig-zag encoded signed varint, returning the value and the
/// number of bytes it took.
pub fn decode(values: &[u8]) -> DeltaResult<(i64, usize)> {
    let (u, consumed) = uleb128::decode(values)?;
    Ok((zigzag_decode(u), consumed))
}

/// Encodes `value`, returning the buffer and how many of its bytes are used.
pub fn encode(value: i64) -> ([u8; 10], usize) {
    let mut container = [0u8; 10];
    let used = uleb128::encode(zigzag_encode(value), &mut container);
    (container, used)
}

#[inline]
pub fn zigzag_decode(u: u64) -> i64 {
    ((u >> 1) as i64) ^ -((u & 1) as i64)
}

#[inline]
pub fn zigzag_encode(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}
