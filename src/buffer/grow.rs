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

use bytemuck::Pod;

/// Resizes `buf` to exactly `size` elements.
///
/// The first `min(buf.len(), size)` elements are preserved and any newly
/// exposed element is zeroed. Growth past the current capacity goes through
/// [`grow`], so repeated extensions cost amortized O(1) per element.
#[inline]
pub fn resize<T: Pod>(buf: &mut Vec<T>, size: usize) {
    if buf.capacity() < size {
        grow(buf, size);
    }
    buf.resize(size, T::zeroed());
}

/// Like [`resize`], but leaves the new elements to the caller.
///
/// Shrinking truncates. Growing only guarantees room for `size` elements:
/// the length is unchanged and the caller is expected to append exactly
/// `size - buf.len()` elements, each of which it writes anyway, so the zero
/// fill done by [`resize`] is skipped.
#[inline]
pub fn resize_no_clear<T>(buf: &mut Vec<T>, size: usize) {
    if size <= buf.len() {
        buf.truncate(size);
    } else if buf.capacity() < size {
        grow(buf, size);
    }
}

/// Reallocates `buf` with a capacity of at least
/// `max(2 * buf.capacity(), size)`, keeping its live elements.
#[inline]
pub fn grow<T>(buf: &mut Vec<T>, size: usize) {
    let new_cap = size.max(buf.capacity().saturating_mul(2));
    if new_cap > buf.capacity() {
        buf.reserve_exact(new_cap - buf.len());
    }
}
