use crate::error::{fmt_err, DeltaResult};

/// Decodes an unsigned LEB128 varint from the start of `values`, returning
/// the value and the number of bytes it took.
pub fn decode(values: &[u8]) -> DeltaResult<(u64, usize)> {
    let mut result = 0u64;
    let mut shift = 0;

    for (consumed, byte) in values.iter().enumerate() {
        if shift == 63 && *byte > 1 {
            return Err(fmt_err!(MalformedHeader, "varint does not fit in 64 bits"));
        }
        result |= u64::from(byte & 0x7f) << shift;
        if byte & 0x80 == 0 {
            return Ok((result, consumed + 1));
        }
        shift += 7;
    }
    Err(fmt_err!(
        UnexpectedEof,
        "varint truncated after {} bytes",
        values.len()
    ))
}

/// Encodes `value` into `container`, returning the number of bytes used.
pub fn encode(mut value: u64, container: &mut [u8; 10]) -> usize {
    let mut consumed = 0;
    let mut iter = container.iter_mut();
    loop {
        let mut byte = (value as u8) & !128;
        value >>= 7;
        if value != 0 {
            byte |= 128;
        }
        if let Some(slot) = iter.next() {
            *slot = byte;
        }
        consumed += 1;
        if value == 0 {
            return consumed;
        }
    }
}
