//! Fixed-width bit packing of unsigned integers, least significant bit first,
//! as used by the miniblocks of `DELTA_BINARY_PACKED`.
mod decode;
mod pack;
mod unpack;

pub use decode::Decoder;
pub use pack::encode_pack;
pub use unpack::decode_pack;

use std::fmt::Debug;
use std::ops::{Index, IndexMut};

use num_traits::{AsPrimitive, PrimInt};

/// A pack of bytes holding [`Unpacked::LENGTH`] values at the widest width.
pub trait Packed: Copy + Sized + AsRef<[u8]> + AsMut<[u8]> {
    const LENGTH: usize;
    fn zero() -> Self;
}

impl Packed for [u8; 32 * 4] {
    const LENGTH: usize = 32 * 4;
    #[inline]
    fn zero() -> Self {
        [0; 32 * 4]
    }
}

impl Packed for [u8; 64 * 8] {
    const LENGTH: usize = 64 * 8;
    #[inline]
    fn zero() -> Self {
        [0; 64 * 8]
    }
}

/// A pack of unpacked values.
pub trait Unpacked<T>:
    Copy + Sized + Debug + AsRef<[T]> + AsMut<[T]> + Index<usize, Output = T> + IndexMut<usize>
{
    const LENGTH: usize;
    fn zero() -> Self;
}

impl Unpacked<u32> for [u32; 32] {
    const LENGTH: usize = 32;
    #[inline]
    fn zero() -> Self {
        [0; 32]
    }
}

impl Unpacked<u64> for [u64; 64] {
    const LENGTH: usize = 64;
    #[inline]
    fn zero() -> Self {
        [0; 64]
    }
}

/// A type that can be bitpacked and unpacked by this crate.
pub trait Unpackable: PrimInt + AsPrimitive<u64> + Debug + Default + 'static {
    const BITS: usize;
    type Packed: Packed;
    type Unpacked: Unpacked<Self>;

    fn unpack(packed: &[u8], num_bits: usize, unpacked: &mut Self::Unpacked);
    fn pack(unpacked: &Self::Unpacked, num_bits: usize, packed: &mut [u8]);
}

impl Unpackable for u32 {
    const BITS: usize = 32;
    type Packed = [u8; 32 * 4];
    type Unpacked = [u32; 32];

    #[inline]
    fn unpack(packed: &[u8], num_bits: usize, unpacked: &mut Self::Unpacked) {
        decode_pack(packed, num_bits, unpacked.as_mut())
    }

    #[inline]
    fn pack(unpacked: &Self::Unpacked, num_bits: usize, packed: &mut [u8]) {
        encode_pack(unpacked.as_ref(), num_bits, packed)
    }
}

impl Unpackable for u64 {
    const BITS: usize = 64;
    type Packed = [u8; 64 * 8];
    type Unpacked = [u64; 64];

    #[inline]
    fn unpack(packed: &[u8], num_bits: usize, unpacked: &mut Self::Unpacked) {
        decode_pack(packed, num_bits, unpacked.as_mut())
    }

    #[inline]
    fn pack(unpacked: &Self::Unpacked, num_bits: usize, packed: &mut [u8]) {
        encode_pack(unpacked.as_ref(), num_bits, packed)
    }
}
