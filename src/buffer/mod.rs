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

pub mod grow;
pub mod pool;
pub mod view;

pub use pool::{BufferPools, Pool, PoolConfig, Pooled};

/// A sequence of byte strings stored back to back in one arena.
///
/// `offsets` always holds `len() + 1` entries starting at 0, value `i` being
/// `data[offsets[i]..offsets[i + 1]]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteArrays {
    pub data: Vec<u8>,
    pub offsets: Vec<usize>,
}

impl ByteArrays {
    pub fn new() -> Self {
        Self { data: Vec::new(), offsets: vec![0] }
    }

    pub fn with_capacity(values: usize, bytes: usize) -> Self {
        let mut offsets = Vec::with_capacity(values + 1);
        offsets.push(0);
        Self { data: Vec::with_capacity(bytes), offsets }
    }

    pub fn len(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.data.clear();
        self.offsets.clear();
        self.offsets.push(0);
    }

    pub fn get(&self, index: usize) -> Option<&[u8]> {
        let start = *self.offsets.get(index)?;
        let end = *self.offsets.get(index + 1)?;
        Some(&self.data[start..end])
    }

    pub fn last(&self) -> &[u8] {
        match self.len() {
            0 => &[],
            n => &self.data[self.offsets[n - 1]..],
        }
    }

    pub fn push(&mut self, value: &[u8]) {
        self.data.extend_from_slice(value);
        self.offsets.push(self.data.len());
    }

    /// Appends a value made of the first `prefix_len` bytes of the last value
    /// followed by `suffix`. `prefix_len` must not exceed the last value's
    /// length.
    pub(crate) fn push_with_prefix(&mut self, prefix_len: usize, suffix: &[u8]) {
        let last_start = match self.len() {
            0 => self.data.len(),
            n => self.offsets[n - 1],
        };
        self.data.extend_from_within(last_start..last_start + prefix_len);
        self.data.extend_from_slice(suffix);
        self.offsets.push(self.data.len());
    }

    pub fn iter(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.offsets
            .windows(2)
            .map(move |w| &self.data[w[0]..w[1]])
    }
}

impl Default for ByteArrays {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> FromIterator<&'a [u8]> for ByteArrays {
    fn from_iter<I: IntoIterator<Item = &'a [u8]>>(iter: I) -> Self {
        let mut arrays = Self::new();
        for value in iter {
            arrays.push(value);
        }
        arrays
    }
}
