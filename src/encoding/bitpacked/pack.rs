use num_traits::AsPrimitive;

use crate::encoding::ceil8;

/// Packs `unpacked` at `num_bits` bits per value into `packed`, least
/// significant bit first. Bits above `num_bits` are dropped.
///
/// The first `ceil8(unpacked.len() * num_bits)` bytes of `packed` are
/// overwritten, the rest is left untouched.
#[inline]
pub fn encode_pack<T>(unpacked: &[T], num_bits: usize, packed: &mut [u8])
where
    T: AsPrimitive<u64>,
{
    let used = ceil8(unpacked.len() * num_bits);
    packed[..used].fill(0);
    if num_bits == 0 {
        return;
    }
    debug_assert!(num_bits <= 64);

    let mask = if num_bits == 64 {
        u64::MAX
    } else {
        (1u64 << num_bits) - 1
    };
    for (i, value) in unpacked.iter().enumerate() {
        let start = i * num_bits;
        let mut window = ((value.as_() & mask) as u128) << (start % 8);
        for byte in &mut packed[start / 8..ceil8(start + num_bits)] {
            *byte |= window as u8;
            window >>= 8;
        }
    }
}
