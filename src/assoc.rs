//! AssocTable: key/value container resolved by a caller-supplied equality
//! predicate.
//!
//! Despite serving where a parser expects a hash table, lookups are a
//! linear scan over entry records kept in insertion order. Every
//! `insert`, `lookup` and `remove` is O(n); this is intended for the small
//! key spaces of catalog and column maps. See [`crate::hashed`] for the
//! hash-indexed alternative.
//!
//! Layout
//! - `entries`: slot map owning the entry records (key, value).
//! - `order`: a [`PtrArray`] of entry keys giving iteration order.
//!
//! Invariants
//! - At most one entry per key under the predicate. Inserting an equal key
//!   overwrites the stored value and keeps the originally stored key.
//! - `order` and `entries` name exactly the same set of records.

use crate::ptr_array::PtrArray;
use log::{debug, warn};
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Stable reference to an entry record inside an [`AssocTable`].
    pub struct EntryRef;
}

impl EntryRef {
    pub fn key<'a, K, V, E>(&self, table: &'a AssocTable<K, V, E>) -> Option<&'a K> {
        table.entries.get(*self).map(|e| &e.key)
    }

    pub fn value<'a, K, V, E>(&self, table: &'a AssocTable<K, V, E>) -> Option<&'a V> {
        table.entries.get(*self).map(|e| &e.value)
    }

    pub fn value_mut<'a, K, V, E>(&self, table: &'a mut AssocTable<K, V, E>) -> Option<&'a mut V> {
        table.entries.get_mut(*self).map(|e| &mut e.value)
    }
}

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
}

pub struct AssocTable<K, V, E> {
    eq: E,
    entries: SlotMap<EntryRef, Entry<K, V>>,
    order: PtrArray<EntryRef>,
}

impl<K, V, E> AssocTable<K, V, E>
where
    E: Fn(&K, &K) -> bool,
{
    /// Create an empty table that treats two keys as the same key when
    /// `eq(stored, probe)` returns true.
    pub fn new(eq: E) -> Self {
        Self {
            eq,
            entries: SlotMap::with_key(),
            order: PtrArray::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn position(&self, key: &K) -> Option<(usize, EntryRef)> {
        self.order
            .iter()
            .enumerate()
            .find(|&(_, r)| (self.eq)(&self.entries[r].key, key))
    }

    /// Locate the entry stored under `key`.
    pub fn find(&self, key: &K) -> Option<EntryRef> {
        self.position(key).map(|(_, r)| r)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.position(key).is_some()
    }

    /// Upsert. If an equal key is stored, its value is replaced and the old
    /// value returned; the stored key is kept and `key` is dropped.
    /// Otherwise a new entry is appended.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(r) = self.find(&key) {
            return Some(core::mem::replace(&mut self.entries[r].value, value));
        }
        let r = self.entries.insert(Entry { key, value });
        if let Err(e) = self.order.try_append(r) {
            // Never keep a record the order array cannot reach.
            warn!("AssocTable::insert dropped an entry: {e}");
            self.entries.remove(r);
        }
        None
    }

    pub fn lookup(&self, key: &K) -> Option<&V> {
        self.find(key).map(|r| &self.entries[r].value)
    }

    pub fn lookup_mut(&mut self, key: &K) -> Option<&mut V> {
        let r = self.find(key)?;
        Some(&mut self.entries[r].value)
    }

    /// Like [`AssocTable::lookup`], also yielding the key as originally
    /// stored. Useful for canonicalizing equal-but-distinct probe keys.
    pub fn lookup_extended(&self, key: &K) -> Option<(&K, &V)> {
        self.find(key).map(|r| {
            let e = &self.entries[r];
            (&e.key, &e.value)
        })
    }

    /// Drop the entry record stored under `key` and hand back its key and
    /// value. Later entries keep their relative order.
    pub fn remove(&mut self, key: &K) -> Option<(K, V)> {
        let (i, r) = self.position(key)?;
        self.order.remove_index(i);
        self.entries.remove(r).map(|e| (e.key, e.value))
    }

    /// Visit entries in insertion order.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&K, &V),
    {
        for r in self.order.iter() {
            let e = &self.entries[r];
            f(&e.key, &e.value);
        }
    }

    /// Visit entries in insertion order, removing each one for which
    /// `remove` returns true. Compaction happens during the same pass, so
    /// every surviving entry is visited exactly once. Returns the number of
    /// entries removed.
    pub fn for_each_remove<F>(&mut self, mut remove: F) -> usize
    where
        F: FnMut(&K, &V) -> bool,
    {
        let before = self.order.len();
        let entries = &mut self.entries;
        self.order.retain(|r| {
            let e = &entries[r];
            if !remove(&e.key, &e.value) {
                return true;
            }
            entries.remove(r);
            false
        });
        before - self.order.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.order.iter().map(move |r| {
            let e = &self.entries[r];
            (&e.key, &e.value)
        })
    }

    /// Release every entry record and the order array.
    pub fn destroy(self) {
        debug!("destroying associative table with {} entries", self.len());
        self.order.destroy(false);
    }
}
