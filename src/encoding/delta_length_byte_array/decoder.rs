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

use crate::buffer::{grow::grow, BufferPools, ByteArrays};
use crate::encoding::delta_bitpacked;
use crate::error::{fmt_err, DeltaErrorExt, DeltaResult};

/// Converts a decoded length, rejecting negative ones.
#[inline]
pub(crate) fn to_length(length: i32, kind: &str) -> DeltaResult<usize> {
    usize::try_from(length).map_err(|_| {
        fmt_err!(
            InvalidNegativeLength,
            "invalid negative {} length: {}",
            kind,
            length
        )
    })
}

/// Decodes one page from `src` into `dst`, which is cleared first.
///
/// The lengths are decoded into a buffer checked out of `pools`. Returns the
/// bytes of `src` following the last value.
pub fn decode<'a>(
    pools: &BufferPools,
    dst: &mut ByteArrays,
    src: &'a [u8],
) -> DeltaResult<&'a [u8]> {
    let mut lengths = pools.int32.checkout();
    let src = delta_bitpacked::decode(&mut lengths, src).context("decoding value lengths")?;

    let mut total = 0usize;
    for &length in lengths.iter() {
        let length = to_length(length, "value")?;
        let available = src.len() - total;
        if length > available {
            return Err(fmt_err!(
                ValueLengthOutOfBounds,
                "value length is larger than the input size: {} > {}",
                length,
                available
            ));
        }
        total += length;
    }

    dst.clear();
    grow(&mut dst.data, total);
    dst.offsets.reserve(lengths.len());
    let (mut values, rest) = src.split_at(total);
    for &length in lengths.iter() {
        let (value, tail) = values.split_at(length as usize);
        dst.push(value);
        values = tail;
    }
    Ok(rest)
}
