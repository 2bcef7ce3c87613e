//! StringBuf: owned, growable, NUL-terminated byte buffer.
//!
//! Capacity is managed explicitly rather than left to `Vec`'s policy so the
//! growth contract is observable:
//! - a fresh empty buffer starts at [`DEFAULT_CAPACITY`];
//! - a buffer built from an initializer is sized to exactly `len + 1`;
//! - `assign` grows to exactly `len + 1` and never shrinks;
//! - `append` grows to `2 * (new_len + 1)`.
//!
//! After every operation `capacity() >= len() + 1` and the byte at
//! `len()` is NUL.

use crate::error::{Result, RuntimeError};
use core::fmt;
use log::debug;

/// Capacity of a buffer created without an initializer.
pub const DEFAULT_CAPACITY: usize = 16;

#[derive(Clone)]
pub struct StringBuf {
    // storage.len() is the allocated capacity; bytes past `len` are zero.
    storage: Vec<u8>,
    len: usize,
}

impl StringBuf {
    pub fn new() -> Self {
        Self {
            storage: vec![0; DEFAULT_CAPACITY],
            len: 0,
        }
    }

    /// Buffer holding a copy of `init`, with capacity exactly `len + 1`.
    pub fn from_text(init: impl AsRef<[u8]>) -> Self {
        let init = init.as_ref();
        let mut storage = Vec::with_capacity(init.len() + 1);
        storage.extend_from_slice(init);
        storage.push(0);
        Self {
            storage,
            len: init.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.storage[..self.len]
    }

    /// Contents followed by the terminating NUL.
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.storage[..=self.len]
    }

    /// Contents as UTF-8, if they are valid UTF-8.
    pub fn to_str(&self) -> Option<&str> {
        core::str::from_utf8(self.as_bytes()).ok()
    }

    fn grow_to(&mut self, capacity: usize) -> Result<()> {
        let extra = capacity.saturating_sub(self.storage.len());
        self.storage
            .try_reserve_exact(extra)
            .map_err(|e| RuntimeError::alloc("growing string buffer", e))?;
        self.storage.resize(capacity, 0);
        Ok(())
    }

    /// Replace the contents with `text`. Reallocates only when `text` plus
    /// its terminator does not fit; capacity never shrinks.
    ///
    /// On allocation failure the buffer is unchanged.
    pub fn assign(&mut self, text: impl AsRef<[u8]>) -> Result<&mut Self> {
        let text = text.as_ref();
        let needed = text.len() + 1;
        if needed > self.capacity() {
            self.grow_to(needed)?;
        }
        self.storage[..text.len()].copy_from_slice(text);
        // Zero the tail left over from longer previous contents.
        self.storage[text.len()..=self.len.max(text.len())].fill(0);
        self.len = text.len();
        Ok(self)
    }

    /// Extend the contents with `text`, doubling past the required size
    /// when a reallocation is needed.
    ///
    /// On allocation failure the buffer is unchanged.
    pub fn append(&mut self, text: impl AsRef<[u8]>) -> Result<&mut Self> {
        let text = text.as_ref();
        let new_len = self.len + text.len();
        if new_len + 1 > self.capacity() {
            self.grow_to((new_len + 1) * 2)?;
        }
        self.storage[self.len..new_len].copy_from_slice(text);
        self.storage[new_len] = 0;
        self.len = new_len;
        Ok(self)
    }

    /// Dispose of the buffer.
    ///
    /// With `free_segment == false` the contents are handed to the caller
    /// (the returned `Vec` reuses the backing allocation, terminator
    /// excluded). With `free_segment == true` the storage is freed and
    /// nothing is returned.
    pub fn release(self, free_segment: bool) -> Option<Vec<u8>> {
        if free_segment {
            return None;
        }
        debug!("string buffer of {} bytes handed to caller", self.len);
        let mut storage = self.storage;
        storage.truncate(self.len);
        Some(storage)
    }
}

impl Default for StringBuf {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Write for StringBuf {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.append(s).map(|_| ()).map_err(|_| fmt::Error)
    }
}

impl fmt::Display for StringBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(self.as_bytes()))
    }
}

impl fmt::Debug for StringBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringBuf")
            .field("text", &String::from_utf8_lossy(self.as_bytes()))
            .field("len", &self.len)
            .field("capacity", &self.capacity())
            .finish()
    }
}
