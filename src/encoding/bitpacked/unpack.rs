use num_traits::AsPrimitive;

use crate::encoding::ceil8;

/// Unpacks `unpacked.len()` values of `num_bits` bits each from `packed`,
/// least significant bit first.
///
/// `packed` must hold at least `ceil8(unpacked.len() * num_bits)` bytes and
/// `num_bits` must not exceed 64.
#[inline]
pub fn decode_pack<T>(packed: &[u8], num_bits: usize, unpacked: &mut [T])
where
    T: Copy + 'static,
    u64: AsPrimitive<T>,
{
    if num_bits == 0 {
        unpacked.fill(0u64.as_());
        return;
    }
    debug_assert!(num_bits <= 64);
    debug_assert!(packed.len() >= ceil8(unpacked.len() * num_bits));

    let mask = if num_bits == 64 {
        u64::MAX
    } else {
        (1u64 << num_bits) - 1
    };
    for (i, out) in unpacked.iter_mut().enumerate() {
        let start = i * num_bits;
        let first = start / 8;
        let last = ceil8(start + num_bits);
        // at most 9 bytes: 64 bits plus a 7 bit offset
        let mut window = 0u128;
        for (j, byte) in packed[first..last].iter().enumerate() {
            window |= (*byte as u128) << (8 * j);
        }
        *out = (((window >> (start % 8)) as u64) & mask).as_();
    }
}
