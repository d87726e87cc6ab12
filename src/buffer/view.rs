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

//! Zero-copy views between integer buffers and their bytes.
//!
//! Integer buffers are always allocated typed, so viewing them as bytes can't
//! fail. The other direction goes through `bytemuck`'s checked casts and
//! reports misaligned or ragged byte slices as [`DeltaErrorCause::Layout`]
//! errors. Where the byte order of the platform can't be assumed, use the
//! `read_*_le` functions which decode field by field.
//!
//! [`DeltaErrorCause::Layout`]: crate::error::DeltaErrorCause::Layout

use bytemuck::{Pod, PodCastError};

use crate::error::{fmt_err, DeltaResult};

#[inline]
pub fn as_bytes<T: Pod>(values: &[T]) -> &[u8] {
    bytemuck::cast_slice(values)
}

#[inline]
pub fn as_bytes_mut<T: Pod>(values: &mut [T]) -> &mut [u8] {
    bytemuck::cast_slice_mut(values)
}

fn cast_err<T>(err: PodCastError, len: usize) -> crate::error::DeltaError {
    let width = std::mem::size_of::<T>();
    match err {
        PodCastError::OutputSliceWouldHaveSlop => fmt_err!(
            Layout,
            "byte length {} is not a multiple of the element width {}",
            len,
            width
        ),
        _ => fmt_err!(
            Layout,
            "can't view {} bytes as {} byte integers: {:?}",
            len,
            width,
            err
        ),
    }
}

#[inline]
fn try_view<T: Pod>(bytes: &[u8]) -> DeltaResult<&[T]> {
    bytemuck::try_cast_slice(bytes).map_err(|err| cast_err::<T>(err, bytes.len()))
}

#[inline]
fn try_view_mut<T: Pod>(bytes: &mut [u8]) -> DeltaResult<&mut [T]> {
    let len = bytes.len();
    bytemuck::try_cast_slice_mut(bytes).map_err(|err| cast_err::<T>(err, len))
}

pub fn try_as_i32s(bytes: &[u8]) -> DeltaResult<&[i32]> {
    try_view(bytes)
}

pub fn try_as_i64s(bytes: &[u8]) -> DeltaResult<&[i64]> {
    try_view(bytes)
}

pub fn try_as_i32s_mut(bytes: &mut [u8]) -> DeltaResult<&mut [i32]> {
    try_view_mut(bytes)
}

pub fn try_as_i64s_mut(bytes: &mut [u8]) -> DeltaResult<&mut [i64]> {
    try_view_mut(bytes)
}

/// Appends the little-endian `i32`s stored in `bytes` to `dst`.
pub fn read_i32s_le(bytes: &[u8], dst: &mut Vec<i32>) -> DeltaResult<()> {
    if bytes.len() % 4 != 0 {
        return Err(cast_err::<i32>(PodCastError::OutputSliceWouldHaveSlop, bytes.len()));
    }
    dst.extend(
        bytes
            .chunks_exact(4)
            .map(|c| i32::from_le_bytes([c[0], c[1], c[2], c[3]])),
    );
    Ok(())
}

/// Appends the little-endian `i64`s stored in `bytes` to `dst`.
pub fn read_i64s_le(bytes: &[u8], dst: &mut Vec<i64>) -> DeltaResult<()> {
    if bytes.len() % 8 != 0 {
        return Err(cast_err::<i64>(PodCastError::OutputSliceWouldHaveSlop, bytes.len()));
    }
    dst.extend(bytes.chunks_exact(8).map(|c| {
        let mut word = [0u8; 8];
        word.copy_from_slice(c);
        i64::from_le_bytes(word)
    }));
    Ok(())
}
