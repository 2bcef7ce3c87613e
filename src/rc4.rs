//! RC4 keystream cipher used for encrypted database pages.
//!
//! The transform is its own inverse: applying it twice with the same key
//! restores the input. The permutation state lives on the stack for one
//! call and is never kept.

use crate::error::{Result, RuntimeError};
use log::trace;

struct KeySchedule {
    s: [u8; 256],
}

impl KeySchedule {
    /// Identity permutation mixed with `key`, cycled over all 256 entries.
    /// `key` must not be empty.
    fn new(key: &[u8]) -> Self {
        let mut s = [0u8; 256];
        for (i, v) in s.iter_mut().enumerate() {
            *v = i as u8;
        }
        let mut j = 0u8;
        for i in 0..256 {
            j = j.wrapping_add(s[i]).wrapping_add(key[i % key.len()]);
            s.swap(i, j as usize);
        }
        Self { s }
    }

    fn apply_keystream(mut self, data: &mut [u8]) {
        let s = &mut self.s;
        let (mut i, mut j) = (0u8, 0u8);
        for byte in data.iter_mut() {
            i = i.wrapping_add(1);
            j = j.wrapping_add(s[i as usize]);
            s.swap(i as usize, j as usize);
            let k = s[i as usize].wrapping_add(s[j as usize]);
            *byte ^= s[k as usize];
        }
    }
}

/// Encrypt or decrypt `data` in place with `key`.
pub fn apply(key: &[u8], data: &mut [u8]) -> Result<()> {
    if key.is_empty() {
        return Err(RuntimeError::EmptyKey);
    }
    trace!("RC4 over {} bytes with {}-byte key", data.len(), key.len());
    KeySchedule::new(key).apply_keystream(data);
    Ok(())
}
