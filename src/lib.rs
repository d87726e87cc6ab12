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

//! Decoders for the Parquet delta encodings: `DELTA_BINARY_PACKED` integers,
//! and `DELTA_LENGTH_BYTE_ARRAY` / `DELTA_BYTE_ARRAY` byte strings.
//!
//! Every decode call consumes one page (or, for integers, one delta stream)
//! from the front of the input and returns the rest, so several pages laid
//! out back to back can be decoded from one buffer. Scratch buffers come
//! from a [`BufferPools`], either the process-wide one or one passed in.

pub mod buffer;
pub mod encoding;
pub mod error;

pub use buffer::{BufferPools, ByteArrays, Pool, PoolConfig, Pooled};
pub use error::{DeltaError, DeltaErrorCause, DeltaResult};

use encoding::{delta_bitpacked, delta_byte_array, delta_length_byte_array};

/// Appends the values of a `DELTA_BINARY_PACKED` stream of 32 bit integers
/// to `dst`.
pub fn decode_int32<'a>(dst: &mut Vec<i32>, src: &'a [u8]) -> DeltaResult<&'a [u8]> {
    delta_bitpacked::decode(dst, src)
}

/// Appends the values of a `DELTA_BINARY_PACKED` stream of 64 bit integers
/// to `dst`.
pub fn decode_int64<'a>(dst: &mut Vec<i64>, src: &'a [u8]) -> DeltaResult<&'a [u8]> {
    delta_bitpacked::decode(dst, src)
}

/// Decodes a `DELTA_BYTE_ARRAY` page into `dst` using the global pools.
pub fn decode_byte_array<'a>(dst: &mut ByteArrays, src: &'a [u8]) -> DeltaResult<&'a [u8]> {
    decode_byte_array_with(BufferPools::global(), dst, src)
}

pub fn decode_byte_array_with<'a>(
    pools: &BufferPools,
    dst: &mut ByteArrays,
    src: &'a [u8],
) -> DeltaResult<&'a [u8]> {
    delta_byte_array::decode(pools, dst, src)
}

/// Decodes a `DELTA_LENGTH_BYTE_ARRAY` page into `dst` using the global
/// pools.
pub fn decode_length_byte_array<'a>(
    dst: &mut ByteArrays,
    src: &'a [u8],
) -> DeltaResult<&'a [u8]> {
    decode_length_byte_array_with(BufferPools::global(), dst, src)
}

pub fn decode_length_byte_array_with<'a>(
    pools: &BufferPools,
    dst: &mut ByteArrays,
    src: &'a [u8],
) -> DeltaResult<&'a [u8]> {
    delta_length_byte_array::decode(pools, dst, src)
}
