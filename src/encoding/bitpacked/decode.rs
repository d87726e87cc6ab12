use crate::encoding::ceil8;
use crate::error::{fmt_err, DeltaResult};

use super::{Packed, Unpackable, Unpacked};

/// An [`Iterator`] over `len` values bitpacked at `num_bits` bits each.
///
/// Values are unpacked a whole pack (`T::Unpacked::LENGTH` values) at a time
/// into an inline buffer, so iterating doesn't allocate.
#[derive(Debug, Clone)]
pub struct Decoder<'a, T: Unpackable> {
    packed: &'a [u8],
    num_bits: usize,
    len: usize,
    pack: T::Unpacked,
    // next index into `pack`, `LENGTH` once it is drained
    position: usize,
}

impl<'a, T: Unpackable> Decoder<'a, T> {
    pub fn try_new(packed: &'a [u8], num_bits: usize, len: usize) -> DeltaResult<Self> {
        if num_bits == 0 || num_bits > T::BITS {
            return Err(fmt_err!(
                InvalidBitWidth,
                "bit width {} is out of range for {} bit values",
                num_bits,
                T::BITS
            ));
        }
        let needed = ceil8(len * num_bits);
        if packed.len() < needed {
            return Err(fmt_err!(
                UnexpectedEof,
                "unpacking {} values of {} bits requires {} bytes, got {}",
                len,
                num_bits,
                needed,
                packed.len()
            ));
        }
        Ok(Self {
            packed: &packed[..needed],
            num_bits,
            len,
            pack: T::Unpacked::zero(),
            position: T::Unpacked::LENGTH,
        })
    }

    fn refill(&mut self) {
        let pack_bytes = T::Unpacked::LENGTH * self.num_bits / 8;
        let (bytes, rest) = self.packed.split_at(pack_bytes.min(self.packed.len()));
        if bytes.len() < pack_bytes {
            let mut padded = T::Packed::zero();
            padded.as_mut()[..bytes.len()].copy_from_slice(bytes);
            T::unpack(&padded.as_ref()[..pack_bytes], self.num_bits, &mut self.pack);
        } else {
            T::unpack(bytes, self.num_bits, &mut self.pack);
        }
        self.packed = rest;
        self.position = 0;
    }
}

impl<'a, T: Unpackable> Iterator for Decoder<'a, T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        if self.position == T::Unpacked::LENGTH {
            self.refill();
        }
        let value = self.pack[self.position];
        self.position += 1;
        self.len -= 1;
        Some(value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, T: Unpackable> ExactSizeIterator for Decoder<'a, T> {}
