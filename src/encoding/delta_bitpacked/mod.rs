/*******************************************************************************
 *     ___                  _   ____  ____
 *    / _ \ _   _  ___  ___| |_|  _ \| __ )
 *   | | | | | | |/ _ \/ __| __| | | |  _ \
 *   | |_| | |_| |  __/\__ \ |_| |_| | |_) |
 *    \__\_\\__,_|\___||___/\__|____/|____/
 *
 *  Copyright (c) 2014-2019 Appsicle
 *  Copyright (c) 2019-2024 QuestDB
 *
 *  Licensed under the Apache License, Version 2.0 (the "License");
 *  you may not use this file except in compliance with the License.
 *  You may obtain a copy of the License at
 *
 *  http://www.apache.org/licenses/LICENSE-2.0
 *
 *  Unless required by applicable law or agreed to in writing, software
 *  distributed under the License is distributed on an "AS IS" BASIS,
 *  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *  See the License for the specific language governing permissions and
 *  limitations under the License.
 *
 ******************************************************************************/

//! [Delta encoding](https://github.com/apache/parquet-format/blob/master/Encodings.md#delta-encoding-delta_binary_packed--5)
//! of 32 and 64 bit integers.
//!
//! A stream starts with a [`Header`] followed by blocks. Each block holds a
//! zig-zag encoded minimum delta, one bit width byte per miniblock and then
//! the miniblocks themselves: `values_per_mini_block` deltas minus the
//! minimum delta, bitpacked at the miniblock's width.
mod decoder;
mod encoder;

pub use decoder::{decode, Decoder};
pub use encoder::encode;

use std::fmt::Debug;

use num_traits::{WrappingAdd, WrappingSub};

use super::bitpacked::{self, Unpackable};
use super::{ceil8, uleb128, zigzag_leb128};
use crate::error::{fmt_err, DeltaErrorExt, DeltaResult};

/// An integer type delta streams can be decoded into.
///
/// Arithmetic on the running value wraps at the width of the type, matching
/// how writers compute deltas.
pub trait DeltaInteger:
    Copy + Default + Debug + Ord + WrappingAdd + WrappingSub + Send + Sync + 'static
{
    /// The unsigned type the miniblock deltas are unpacked as.
    type Unsigned: Unpackable;

    const BITS: usize;

    fn checked_from_i64(value: i64) -> Option<Self>;

    fn from_i64_wrapping(value: i64) -> Self;

    fn to_i64(self) -> i64;

    fn from_unsigned(value: Self::Unsigned) -> Self;

    fn to_unsigned(self) -> Self::Unsigned;
}

impl DeltaInteger for i32 {
    type Unsigned = u32;
    const BITS: usize = 32;

    #[inline]
    fn checked_from_i64(value: i64) -> Option<Self> {
        i32::try_from(value).ok()
    }

    #[inline]
    fn from_i64_wrapping(value: i64) -> Self {
        value as i32
    }

    #[inline]
    fn to_i64(self) -> i64 {
        self as i64
    }

    #[inline]
    fn from_unsigned(value: u32) -> Self {
        value as i32
    }

    #[inline]
    fn to_unsigned(self) -> u32 {
        self as u32
    }
}

impl DeltaInteger for i64 {
    type Unsigned = u64;
    const BITS: usize = 64;

    #[inline]
    fn checked_from_i64(value: i64) -> Option<Self> {
        Some(value)
    }

    #[inline]
    fn from_i64_wrapping(value: i64) -> Self {
        value
    }

    #[inline]
    fn to_i64(self) -> i64 {
        self
    }

    #[inline]
    fn from_unsigned(value: u64) -> Self {
        value as i64
    }

    #[inline]
    fn to_unsigned(self) -> u64 {
        self as u64
    }
}

/// The header at the start of every delta stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Number of values per block, a multiple of 128.
    pub block_size: usize,
    pub num_mini_blocks: usize,
    /// Total number of values in the stream, including the first value.
    pub num_values: usize,
    pub first_value: i64,
}

fn to_usize(value: u64, field: &str) -> DeltaResult<usize> {
    usize::try_from(value)
        .map_err(|_| fmt_err!(MalformedHeader, "{} is too large: {}", field, value))
}

impl Header {
    /// Reads and validates a header, returning it with the rest of `src`.
    pub fn try_decode(src: &[u8]) -> DeltaResult<(Self, &[u8])> {
        let (block_size, consumed) = uleb128::decode(src).context("decoding block size")?;
        let src = &src[consumed..];
        let (num_mini_blocks, consumed) =
            uleb128::decode(src).context("decoding number of mini blocks")?;
        let src = &src[consumed..];
        let (num_values, consumed) =
            uleb128::decode(src).context("decoding total number of values")?;
        let src = &src[consumed..];
        let (first_value, consumed) =
            zigzag_leb128::decode(src).context("decoding first value")?;
        let src = &src[consumed..];

        let header = Self {
            block_size: to_usize(block_size, "block size")?,
            num_mini_blocks: to_usize(num_mini_blocks, "number of mini blocks")?,
            num_values: to_usize(num_values, "total number of values")?,
            first_value,
        };
        header.validate()?;
        Ok((header, src))
    }

    fn validate(&self) -> DeltaResult<()> {
        if self.num_mini_blocks == 0 {
            return Err(fmt_err!(
                MalformedHeader,
                "invalid number of mini blocks ({})",
                self.num_mini_blocks
            ));
        }
        if self.block_size > i32::MAX as usize {
            return Err(fmt_err!(
                MalformedHeader,
                "block size is too large: {}",
                self.block_size
            ));
        }
        if self.block_size == 0 || self.block_size % 128 != 0 {
            return Err(fmt_err!(
                MalformedHeader,
                "invalid block size is not a multiple of 128 ({})",
                self.block_size
            ));
        }
        if self.block_size % self.num_mini_blocks != 0 {
            return Err(fmt_err!(
                MalformedHeader,
                "block size {} is not divisible into {} mini blocks",
                self.block_size,
                self.num_mini_blocks
            ));
        }
        let values_per_mini_block = self.values_per_mini_block();
        if values_per_mini_block % 32 != 0 {
            return Err(fmt_err!(
                MalformedHeader,
                "invalid mini block size is not a multiple of 32 ({})",
                values_per_mini_block
            ));
        }
        if values_per_mini_block.checked_mul(64).is_none() {
            return Err(fmt_err!(
                MalformedHeader,
                "mini block of {} values is too large",
                values_per_mini_block
            ));
        }
        if self.num_values > i32::MAX as usize {
            return Err(fmt_err!(
                MalformedHeader,
                "too many values: {}",
                self.num_values
            ));
        }
        Ok(())
    }

    #[inline]
    pub fn values_per_mini_block(&self) -> usize {
        self.block_size / self.num_mini_blocks
    }

    pub fn encode(&self, buffer: &mut Vec<u8>) {
        let mut container = [0u8; 10];
        for value in [self.block_size, self.num_mini_blocks, self.num_values] {
            let used = uleb128::encode(value as u64, &mut container);
            buffer.extend_from_slice(&container[..used]);
        }
        let (container, used) = zigzag_leb128::encode(self.first_value);
        buffer.extend_from_slice(&container[..used]);
    }
}

/// The per-block prelude: minimum delta and miniblock bit widths.
#[derive(Debug, Clone, Copy)]
struct Block<'a> {
    min_delta: i64,
    bit_widths: &'a [u8],
}

fn read_block(src: &[u8], num_mini_blocks: usize) -> DeltaResult<(Block<'_>, &[u8])> {
    let (min_delta, consumed) = zigzag_leb128::decode(src).context("decoding min delta")?;
    let src = &src[consumed..];
    if src.len() < num_mini_blocks {
        return Err(fmt_err!(
            UnexpectedEof,
            "expected {} mini block bit widths, {} bytes left",
            num_mini_blocks,
            src.len()
        ));
    }
    let (bit_widths, src) = src.split_at(num_mini_blocks);
    Ok((Block { min_delta, bit_widths }, src))
}

/// Reads the payload of one miniblock holding `len` meaningful deltas.
///
/// A zero bit width has no payload and yields `None`: every delta of the
/// miniblock is then the block's minimum delta. The whole miniblock is
/// consumed even when `len` is short of `values_per_mini_block`.
fn read_mini_block<U: Unpackable>(
    src: &[u8],
    bit_width: usize,
    values_per_mini_block: usize,
    len: usize,
) -> DeltaResult<(Option<bitpacked::Decoder<'_, U>>, &[u8])> {
    if bit_width > U::BITS {
        return Err(fmt_err!(
            InvalidBitWidth,
            "invalid bit width {} for {} bit integers",
            bit_width,
            U::BITS
        ));
    }
    if bit_width == 0 {
        return Ok((None, src));
    }
    let size = values_per_mini_block
        .checked_mul(bit_width)
        .map(ceil8)
        .ok_or_else(|| {
            fmt_err!(
                MalformedHeader,
                "mini block of {} values at bit width {} overflows",
                values_per_mini_block,
                bit_width
            )
        })?;
    if src.len() < size {
        return Err(fmt_err!(
            UnexpectedEof,
            "mini block of {} values at bit width {} needs {} bytes, {} left",
            values_per_mini_block,
            bit_width,
            size,
            src.len()
        ));
    }
    let (packed, src) = src.split_at(size);
    let deltas = bitpacked::Decoder::try_new(packed, bit_width, len)?;
    Ok((Some(deltas), src))
}
