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

use crate::buffer::{BufferPools, ByteArrays};
use crate::encoding::delta_bitpacked;
use crate::encoding::delta_length_byte_array::to_length;
use crate::error::{fmt_err, DeltaErrorExt, DeltaResult};

/// Decodes one page from `src` into `dst`, which is cleared first.
///
/// Both length streams are decoded into buffers checked out of `pools`.
/// Returns the bytes of `src` following the last suffix.
pub fn decode<'a>(
    pools: &BufferPools,
    dst: &mut ByteArrays,
    src: &'a [u8],
) -> DeltaResult<&'a [u8]> {
    let mut prefix_lengths = pools.int32.checkout();
    let src =
        delta_bitpacked::decode(&mut prefix_lengths, src).context("decoding prefix lengths")?;
    let mut suffix_lengths = pools.int32.checkout();
    let mut src =
        delta_bitpacked::decode(&mut suffix_lengths, src).context("decoding suffix lengths")?;

    if prefix_lengths.len() != suffix_lengths.len() {
        return Err(fmt_err!(
            PrefixSuffixLengthMismatch,
            "length of prefix and suffix mismatch: {} != {}",
            prefix_lengths.len(),
            suffix_lengths.len()
        ));
    }
    trace!(
        "decoding {} incremental values from {} bytes",
        prefix_lengths.len(),
        src.len()
    );

    dst.clear();
    dst.offsets.reserve(prefix_lengths.len());
    let mut last_len = 0;
    for (&prefix, &suffix) in prefix_lengths.iter().zip(suffix_lengths.iter()) {
        let prefix = to_length(prefix, "prefix")?;
        let suffix = to_length(suffix, "suffix")?;
        if prefix > last_len {
            return Err(fmt_err!(
                PrefixLengthOutOfBounds,
                "prefix length {} is larger than the last value of size {}",
                prefix,
                last_len
            ));
        }
        if suffix > src.len() {
            return Err(fmt_err!(
                ValueLengthOutOfBounds,
                "value length is larger than the input size: {} > {}",
                suffix,
                src.len()
            ));
        }
        let (suffix_bytes, rest) = src.split_at(suffix);
        dst.push_with_prefix(prefix, suffix_bytes);
        src = rest;
        last_len = prefix + suffix;
    }
    Ok(src)
}
