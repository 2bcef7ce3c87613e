//! Payload arena and the opaque handles containers store.
//!
//! Containers in this crate never own what they point at. The layer above
//! keeps payloads in an [`Arena`] and passes [`Handle`]s around; dropping
//! an array, list or table releases bookkeeping only. Handles are
//! generational, so a handle whose payload was released resolves to
//! `None` instead of aliasing whatever reuses the slot.

use slotmap::{DefaultKey, SlotMap};

/// Opaque, copyable, identity-compared reference to an arena payload.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Handle(DefaultKey);

impl Handle {
    /// Borrow the payload this handle refers to, if it is still live.
    pub fn get<'a, T>(&self, arena: &'a Arena<T>) -> Option<&'a T> {
        arena.slots.get(self.0)
    }

    pub fn get_mut<'a, T>(&self, arena: &'a mut Arena<T>) -> Option<&'a mut T> {
        arena.slots.get_mut(self.0)
    }
}

/// Central owner of payloads referenced by handles.
#[derive(Debug)]
pub struct Arena<T> {
    slots: SlotMap<DefaultKey, T>,
}

impl<T> Arena<T> {
    pub fn new() -> Self {
        Self {
            slots: SlotMap::with_key(),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Take ownership of `value` and return the handle naming it.
    pub fn alloc(&mut self, value: T) -> Handle {
        Handle(self.slots.insert(value))
    }

    /// Release a payload, returning it. Outstanding copies of `handle`
    /// become stale.
    pub fn release(&mut self, handle: Handle) -> Option<T> {
        self.slots.remove(handle.0)
    }

    pub fn contains(&self, handle: Handle) -> bool {
        self.slots.contains_key(handle.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Handle, &T)> {
        self.slots.iter().map(|(k, v)| (Handle(k), v))
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}
