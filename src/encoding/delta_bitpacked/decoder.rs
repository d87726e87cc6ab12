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

use log::trace;

use super::{read_block, read_mini_block, DeltaInteger, Header};
use crate::buffer::grow::resize_no_clear;
use crate::encoding::bitpacked;
use crate::error::{fmt_err, DeltaErrorExt, DeltaResult};

/// Decodes one delta stream from `src`, appending its values to `dst`.
///
/// Returns the bytes of `src` following the stream. On error `dst` may hold
/// some of the stream's values past its original length.
pub fn decode<'a, T: DeltaInteger>(dst: &mut Vec<T>, src: &'a [u8]) -> DeltaResult<&'a [u8]> {
    let (header, mut src) = Header::try_decode(src)?;
    trace!("decoding delta binary packed stream {:?}", header);
    if header.num_values == 0 {
        return Ok(src);
    }

    let first_value = T::checked_from_i64(header.first_value).ok_or_else(|| {
        fmt_err!(
            MalformedHeader,
            "first value {} is out of range for {} bit integers",
            header.first_value,
            T::BITS
        )
    })?;
    dst.push(first_value);

    let values_per_mini_block = header.values_per_mini_block();
    let mut last = first_value;
    let mut remaining = header.num_values - 1;
    while remaining > 0 {
        let (block, rest) = read_block(src, header.num_mini_blocks)
            .with_context(|_| format!("{} values missing", remaining))?;
        src = rest;
        let min_delta = T::from_i64_wrapping(block.min_delta);

        for &bit_width in block.bit_widths {
            let len = values_per_mini_block.min(remaining);
            let (deltas, rest) = read_mini_block::<T::Unsigned>(
                src,
                bit_width as usize,
                values_per_mini_block,
                len,
            )?;
            src = rest;

            // Reserve per miniblock, the header's value count is untrusted.
            let new_len = dst.len() + len;
            resize_no_clear(dst, new_len);
            match deltas {
                None => {
                    for _ in 0..len {
                        last = last.wrapping_add(&min_delta);
                        dst.push(last);
                    }
                }
                Some(deltas) => {
                    for delta in deltas {
                        last = last
                            .wrapping_add(&min_delta)
                            .wrapping_add(&T::from_unsigned(delta));
                        dst.push(last);
                    }
                }
            }

            remaining -= len;
            if remaining == 0 {
                // Widths of the miniblocks past the last value carry no data.
                break;
            }
        }
    }
    trace!("decoded {} values, {} bytes left", header.num_values, src.len());
    Ok(src)
}

#[derive(Debug, Clone)]
enum MiniBlock<'a> {
    /// Number of deltas left that equal the block's minimum delta.
    Constant(usize),
    Packed(bitpacked::Decoder<'a, u64>),
}

/// A streaming decoder of a delta stream of 64 bit integers.
///
/// Values are decoded one miniblock at a time without buffering the
/// stream. The first error ends the iteration.
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    values: &'a [u8],
    consumed_bytes: usize,
    header: Header,
    // values still to be yielded, including the first one
    remaining: usize,
    // values not yet covered by a loaded miniblock
    unassigned: usize,
    first_pending: bool,
    last: i64,
    min_delta: i64,
    bit_widths: &'a [u8],
    mini_block: MiniBlock<'a>,
}

impl<'a> Decoder<'a> {
    pub fn try_new(values: &'a [u8]) -> DeltaResult<Self> {
        let (header, rest) = Header::try_decode(values)?;
        Ok(Self {
            values: rest,
            consumed_bytes: values.len() - rest.len(),
            header,
            remaining: header.num_values,
            unassigned: header.num_values.saturating_sub(1),
            first_pending: header.num_values > 0,
            last: header.first_value,
            min_delta: 0,
            bit_widths: &[],
            mini_block: MiniBlock::Constant(0),
        })
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Number of bytes read from the input so far.
    ///
    /// Once the iteration is exhausted this is the size of the whole stream,
    /// trailing padding included.
    pub fn consumed_bytes(&self) -> usize {
        self.consumed_bytes
    }

    /// Fills `out` with the next values, returning how many were written.
    /// Fewer than `out.len()` are written only at the end of the stream.
    pub fn decode_batch(&mut self, out: &mut [i64]) -> DeltaResult<usize> {
        let mut written = 0;
        for slot in out.iter_mut() {
            match self.next() {
                Some(value) => *slot = value?,
                None => break,
            }
            written += 1;
        }
        Ok(written)
    }

    fn advance(&mut self, rest: &'a [u8]) {
        self.consumed_bytes += self.values.len() - rest.len();
        self.values = rest;
    }

    fn load_mini_block(&mut self) -> DeltaResult<()> {
        if self.bit_widths.is_empty() {
            let (block, rest) = read_block(self.values, self.header.num_mini_blocks)
                .with_context(|_| format!("{} values missing", self.unassigned))?;
            self.advance(rest);
            self.min_delta = block.min_delta;
            self.bit_widths = block.bit_widths;
        }
        let bit_width = self.bit_widths[0] as usize;
        self.bit_widths = &self.bit_widths[1..];

        let values_per_mini_block = self.header.values_per_mini_block();
        let len = values_per_mini_block.min(self.unassigned);
        let (deltas, rest) =
            read_mini_block::<u64>(self.values, bit_width, values_per_mini_block, len)?;
        self.advance(rest);
        self.unassigned -= len;
        self.mini_block = match deltas {
            None => MiniBlock::Constant(len),
            Some(deltas) => MiniBlock::Packed(deltas),
        };

        if self.unassigned == 0 {
            // Skip the bit widths of the unused trailing miniblocks.
            self.bit_widths = &[];
        }
        Ok(())
    }

    fn next_delta(&mut self) -> DeltaResult<u64> {
        loop {
            match &mut self.mini_block {
                MiniBlock::Constant(len) if *len > 0 => {
                    *len -= 1;
                    return Ok(0);
                }
                MiniBlock::Packed(deltas) => {
                    if let Some(delta) = deltas.next() {
                        return Ok(delta);
                    }
                }
                MiniBlock::Constant(_) => {}
            }
            self.load_mini_block()?;
        }
    }
}

impl<'a> Iterator for Decoder<'a> {
    type Item = DeltaResult<i64>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        if self.first_pending {
            self.first_pending = false;
            return Some(Ok(self.last));
        }
        match self.next_delta() {
            Ok(delta) => {
                self.last = self
                    .last
                    .wrapping_add(self.min_delta)
                    .wrapping_add(delta as i64);
                Some(Ok(self.last))
            }
            Err(err) => {
                self.remaining = 0;
                Some(Err(err))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DeltaErrorCause;

    // block size 128, 4 miniblocks, 4 values, first value 1,
    // min delta -1, widths [3, 0, 0, 0], deltas [3, 0, 7] packed
    const ONE_THREE_TWO_EIGHT: &[u8] = &[
        0x80, 0x01, 0x04, 0x04, 0x02, 0x01, 3, 0, 0, 0, 0xC3, 0x01, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    ];

    fn page(header: Header, blocks: &[u8]) -> Vec<u8> {
        let mut data = vec![];
        header.encode(&mut data);
        data.extend_from_slice(blocks);
        data
    }

    fn header(num_values: usize, first_value: i64) -> Header {
        Header {
            block_size: 128,
            num_mini_blocks: 4,
            num_values,
            first_value,
        }
    }

    #[test]
    fn test_decode_int32() {
        let mut dst = vec![];
        let rest = decode::<i32>(&mut dst, ONE_THREE_TWO_EIGHT).unwrap();
        assert_eq!(dst, vec![1, 3, 2, 8]);
        assert!(rest.is_empty());
    }

    #[test]
    fn test_decode_appends() {
        let mut dst = vec![9i64];
        decode(&mut dst, ONE_THREE_TWO_EIGHT).unwrap();
        assert_eq!(dst, vec![9, 1, 3, 2, 8]);
    }

    #[test]
    fn test_empty_stream() {
        let mut data = page(header(0, 0), &[]);
        data.push(0x42);
        let mut dst = vec![7i32];
        let rest = decode(&mut dst, &data).unwrap();
        assert_eq!(dst, vec![7]);
        assert_eq!(rest, &[0x42]);
    }

    #[test]
    fn test_single_value_has_no_block() {
        let data = page(header(1, -5), &[]);
        let mut dst = vec![];
        let rest = decode::<i64>(&mut dst, &data).unwrap();
        assert_eq!(dst, vec![-5]);
        assert!(rest.is_empty());
    }

    #[test]
    fn test_bit_width_too_wide() {
        let mut blocks = vec![0x00, 33, 0, 0, 0];
        blocks.extend(std::iter::repeat(0xff).take(32 * 33 / 8));
        let data = page(header(3, 0), &blocks);

        let err = decode::<i32>(&mut vec![], &data).unwrap_err();
        assert_eq!(err.cause(), DeltaErrorCause::InvalidBitWidth);

        let mut dst = vec![];
        decode::<i64>(&mut dst, &data).unwrap();
        let delta = (1i64 << 33) - 1;
        assert_eq!(dst, vec![0, delta, 2 * delta]);
    }

    #[test]
    fn test_first_value_out_of_range() {
        let data = page(header(1, i32::MAX as i64 + 1), &[]);
        let err = decode::<i32>(&mut vec![], &data).unwrap_err();
        assert_eq!(err.cause(), DeltaErrorCause::MalformedHeader);
        assert!(decode::<i64>(&mut vec![], &data).is_ok());
    }

    #[test]
    fn test_wrapping_arithmetic() {
        // min delta 1 on every value, all widths 0
        let data = page(header(3, i32::MAX as i64), &[0x02, 0, 0, 0, 0]);
        let mut dst = vec![];
        decode::<i32>(&mut dst, &data).unwrap();
        assert_eq!(dst, vec![i32::MAX, i32::MIN, i32::MIN + 1]);

        // a min delta wider than 32 bits wraps to its low bits
        let min_delta = (1i64 << 32) + 2;
        let (container, used) = crate::encoding::zigzag_leb128::encode(min_delta);
        let mut blocks = container[..used].to_vec();
        blocks.extend_from_slice(&[0, 0, 0, 0]);
        let data = page(header(2, 0), &blocks);
        let mut dst = vec![];
        decode::<i32>(&mut dst, &data).unwrap();
        assert_eq!(dst, vec![0, 2]);
    }

    #[test]
    fn test_truncated_stream() {
        for len in 0..ONE_THREE_TWO_EIGHT.len() {
            let err = decode::<i32>(&mut vec![], &ONE_THREE_TWO_EIGHT[..len]).unwrap_err();
            assert_eq!(err.cause(), DeltaErrorCause::UnexpectedEof, "len {}", len);
        }
        let err = decode::<i32>(&mut vec![], &ONE_THREE_TWO_EIGHT[..5]).unwrap_err();
        assert!(err.to_string().starts_with("3 values missing"), "{}", err);
    }

    #[test]
    fn test_multiple_blocks_and_padding() {
        // 130 values: 1 first value, block 1 covers 128 deltas, block 2 covers 1
        let mut blocks = vec![0x02, 0, 0, 0, 0];
        blocks.extend_from_slice(&[0x00, 1, 0, 0, 0]);
        let mut payload = [0u8; 4];
        payload[0] = 1;
        blocks.extend_from_slice(&payload);
        blocks.extend_from_slice(&[0xEE]);
        let data = page(header(130, 10), &blocks);

        let mut dst = vec![];
        let rest = decode::<i64>(&mut dst, &data).unwrap();
        assert_eq!(rest, &[0xEE]);
        assert_eq!(dst.len(), 130);
        assert_eq!(dst[128], 10 + 128);
        assert_eq!(dst[129], 10 + 129);
    }

    #[test]
    fn test_chained_streams() {
        let mut data = ONE_THREE_TWO_EIGHT.to_vec();
        data.extend_from_slice(&page(header(2, 100), &[0x01, 0, 0, 0, 0]));

        let mut dst = vec![];
        let rest = decode::<i32>(&mut dst, &data).unwrap();
        let rest = decode::<i32>(&mut dst, rest).unwrap();
        assert!(rest.is_empty());
        assert_eq!(dst, vec![1, 3, 2, 8, 100, 99]);
    }

    #[test]
    fn test_streaming_decoder() {
        let mut decoder = Decoder::try_new(ONE_THREE_TWO_EIGHT).unwrap();
        assert_eq!(decoder.size_hint(), (4, Some(4)));
        assert_eq!(decoder.header().num_values, 4);
        assert_eq!(decoder.consumed_bytes(), 5);

        let mut out = [0i64; 3];
        assert_eq!(decoder.decode_batch(&mut out).unwrap(), 3);
        assert_eq!(out, [1, 3, 2]);
        assert_eq!(decoder.decode_batch(&mut out).unwrap(), 1);
        assert_eq!(out[0], 8);
        assert!(decoder.next().is_none());
        assert_eq!(decoder.consumed_bytes(), ONE_THREE_TWO_EIGHT.len());
    }

    #[test]
    fn test_streaming_decoder_errors_once() {
        let mut decoder = Decoder::try_new(&ONE_THREE_TWO_EIGHT[..8]).unwrap();
        assert_eq!(decoder.next().unwrap().unwrap(), 1);
        let err = decoder.next().unwrap().unwrap_err();
        assert_eq!(err.cause(), DeltaErrorCause::UnexpectedEof);
        assert!(decoder.next().is_none());
    }
}
