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

/// Encodes `iterator` as a `DELTA_LENGTH_BYTE_ARRAY` page appended to
/// `buffer`.
pub fn encode<'a, I>(iterator: I, buffer: &mut Vec<u8>)
where
    I: Iterator<Item = &'a [u8]>,
{
    let pools = BufferPools::global();
    let mut lengths = pools.int32.checkout();
    let mut values = pools.bytes.checkout();
    for value in iterator {
        lengths.push(value.len() as i32);
        values.extend_from_slice(value);
    }
    delta_bitpacked::encode(lengths.iter().copied(), buffer);
    buffer.extend_from_slice(&values);
}
