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

use crate::buffer::BufferPools;
use crate::encoding::delta_bitpacked;

/// Encodes `iterator` as a `DELTA_BYTE_ARRAY` page appended to `buffer`.
pub fn encode<'a, I>(iterator: I, buffer: &mut Vec<u8>)
where
    I: Iterator<Item = &'a [u8]>,
{
    let pools = BufferPools::global();
    let mut prefix_lengths = pools.int32.checkout();
    let mut suffix_lengths = pools.int32.checkout();
    let mut suffixes = pools.bytes.checkout();

    let mut previous: &[u8] = &[];
    for value in iterator {
        let prefix = previous
            .iter()
            .zip(value)
            .take_while(|(a, b)| a == b)
            .count();
        prefix_lengths.push(prefix as i32);
        suffix_lengths.push((value.len() - prefix) as i32);
        suffixes.extend_from_slice(&value[prefix..]);
        previous = value;
    }

    delta_bitpacked::encode(prefix_lengths.iter().copied(), buffer);
    delta_bitpacked::encode(suffix_lengths.iter().copied(), buffer);
    buffer.extend_from_slice(&suffixes);
}
