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

use num_traits::PrimInt;

use super::{DeltaInteger, Header};
use crate::encoding::bitpacked::{self, Unpackable};
use crate::encoding::zigzag_leb128;

const BLOCK_SIZE: usize = 128;
const NUM_MINI_BLOCKS: usize = 4;
const VALUES_PER_MINI_BLOCK: usize = BLOCK_SIZE / NUM_MINI_BLOCKS;

/// Encodes the values of `iterator` as one delta stream appended to `buffer`.
///
/// Blocks hold 128 values split in 4 miniblocks. Deltas wrap at the width of
/// `T`, so any sequence of values round trips.
pub fn encode<T, I>(mut iterator: I, buffer: &mut Vec<u8>)
where
    T: DeltaInteger,
    I: ExactSizeIterator<Item = T>,
{
    let num_values = iterator.len();
    let first_value = iterator.next().unwrap_or_default();
    Header {
        block_size: BLOCK_SIZE,
        num_mini_blocks: NUM_MINI_BLOCKS,
        num_values,
        first_value: first_value.to_i64(),
    }
    .encode(buffer);

    let mut last = first_value;
    let mut deltas = [T::default(); BLOCK_SIZE];
    loop {
        let mut len = 0;
        for (slot, value) in deltas.iter_mut().zip(iterator.by_ref()) {
            *slot = value.wrapping_sub(&last);
            last = value;
            len += 1;
        }
        if len == 0 {
            break;
        }
        encode_block(&deltas[..len], buffer);
    }
}

fn encode_block<T: DeltaInteger>(deltas: &[T], buffer: &mut Vec<u8>) {
    let min_delta = deltas.iter().copied().min().unwrap_or_default();
    let (container, used) = zigzag_leb128::encode(min_delta.to_i64());
    buffer.extend_from_slice(&container[..used]);

    // trailing miniblocks without values keep a width of 0 and no payload
    let widths_start = buffer.len();
    buffer.resize(widths_start + NUM_MINI_BLOCKS, 0);

    for (i, chunk) in deltas.chunks(VALUES_PER_MINI_BLOCK).enumerate() {
        let mut mini_block = [T::Unsigned::default(); VALUES_PER_MINI_BLOCK];
        for (slot, delta) in mini_block.iter_mut().zip(chunk) {
            *slot = delta.wrapping_sub(&min_delta).to_unsigned();
        }
        let bit_width = mini_block
            .iter()
            .map(|v| <T::Unsigned as Unpackable>::BITS - v.leading_zeros() as usize)
            .max()
            .unwrap_or(0);
        buffer[widths_start + i] = bit_width as u8;

        let start = buffer.len();
        buffer.resize(start + VALUES_PER_MINI_BLOCK * bit_width / 8, 0);
        bitpacked::encode_pack(&mini_block, bit_width, &mut buffer[start..]);
    }
}
