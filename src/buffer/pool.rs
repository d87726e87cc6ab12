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

use std::ops::{Deref, DerefMut};

use log::debug;
use once_cell::sync::Lazy;
use parking_lot::Mutex;

/// Initial capacity, in elements, of buffers the pool has to allocate.
pub const DEFAULT_INITIAL_CAPACITY: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    /// Capacity, in elements, of buffers created when the free list is empty.
    pub initial_capacity: usize,
}

impl PoolConfig {
    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self { initial_capacity: DEFAULT_INITIAL_CAPACITY }
    }
}

/// A free list of reusable `Vec<T>` buffers.
///
/// Buffers are handed out through [`Pooled`] handles which give exclusive
/// access to the buffer and put it back into the free list when dropped.
/// Checked out buffers are always empty but keep the capacity they grew to
/// while in previous use. The pool doesn't cap the number of idle buffers.
pub struct Pool<T> {
    free: Mutex<Vec<Vec<T>>>,
    config: PoolConfig,
}

impl<T> Pool<T> {
    pub fn new(config: PoolConfig) -> Self {
        Self { free: Mutex::new(Vec::new()), config }
    }

    pub fn checkout(&self) -> Pooled<'_, T> {
        let reused = self.free.lock().pop();
        let buf = match reused {
            Some(mut buf) => {
                buf.clear();
                buf
            }
            None => {
                debug!(
                    "allocating pooled buffer of {} x {} bytes",
                    self.config.initial_capacity,
                    std::mem::size_of::<T>()
                );
                Vec::with_capacity(self.config.initial_capacity)
            }
        };
        Pooled {
            buf,
            pool: self,
            detached: false,
        }
    }

    /// Number of buffers waiting in the free list.
    pub fn idle(&self) -> usize {
        self.free.lock().len()
    }

    pub fn config(&self) -> PoolConfig {
        self.config
    }

    fn release(&self, buf: Vec<T>) {
        self.free.lock().push(buf);
    }
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self::new(PoolConfig::default())
    }
}

/// Exclusive handle to a buffer checked out of a [`Pool`].
pub struct Pooled<'a, T> {
    buf: Vec<T>,
    pool: &'a Pool<T>,
    detached: bool,
}

impl<T> Pooled<'_, T> {
    /// Takes the buffer out of the pool's custody; it won't be reused.
    pub fn detach(mut self) -> Vec<T> {
        self.detached = true;
        std::mem::take(&mut self.buf)
    }
}

impl<T> Deref for Pooled<'_, T> {
    type Target = Vec<T>;

    fn deref(&self) -> &Vec<T> {
        &self.buf
    }
}

impl<T> DerefMut for Pooled<'_, T> {
    fn deref_mut(&mut self) -> &mut Vec<T> {
        &mut self.buf
    }
}

impl<T> Drop for Pooled<'_, T> {
    fn drop(&mut self) {
        if !self.detached {
            self.pool.release(std::mem::take(&mut self.buf));
        }
    }
}

/// The pools a decode call draws its scratch buffers from, one per element
/// kind.
#[derive(Default)]
pub struct BufferPools {
    pub int32: Pool<i32>,
    pub int64: Pool<i64>,
    pub bytes: Pool<u8>,
}

impl BufferPools {
    pub fn with_config(config: PoolConfig) -> Self {
        Self {
            int32: Pool::new(config),
            int64: Pool::new(config),
            bytes: Pool::new(config),
        }
    }

    /// Process-wide pools used by the decode functions that don't take
    /// explicit pools.
    pub fn global() -> &'static BufferPools {
        static INSTANCE: Lazy<BufferPools> = Lazy::new(BufferPools::default);
        &INSTANCE
    }
}
