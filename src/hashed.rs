//! HashedTable: hash-indexed variant of [`crate::assoc::AssocTable`].
//!
//! Same upsert/lookup/remove/visit contract, but keys are resolved through a
//! `hashbrown::HashTable` index instead of a linear predicate scan, so
//! `insert` and `lookup` are O(1) on average. This trades the pluggable
//! predicate for `K: Eq + Hash` and is meant for key spaces that outgrow the
//! linear table. Iteration stays in insertion order; removal pays an O(n)
//! compaction of the order array to keep it that way.
//!
//! Each entry stores its precomputed hash; the index never rehashes keys.

use crate::ptr_array::PtrArray;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use hashbrown::hash_table::Entry as IndexEntry;
use hashbrown::HashTable;
use log::{debug, warn};
use slotmap::{new_key_type, SlotMap};
use std::collections::hash_map::RandomState;

new_key_type! {
    struct SlotRef;
}

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
    hash: u64,
}

pub struct HashedTable<K, V, S = RandomState> {
    hasher: S,
    index: HashTable<SlotRef>,
    slots: SlotMap<SlotRef, Entry<K, V>>,
    order: PtrArray<SlotRef>,
}

impl<K, V> HashedTable<K, V>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self::with_hasher(RandomState::new())
    }
}

impl<K, V> Default for HashedTable<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> HashedTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            hasher,
            index: HashTable::new(),
            slots: SlotMap::with_key(),
            order: PtrArray::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn find_slot<Q>(&self, q: &Q) -> Option<SlotRef>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.hasher.hash_one(q);
        self.index
            .find(hash, |&s| <K as Borrow<Q>>::borrow(&self.slots[s].key) == q)
            .copied()
    }

    pub fn contains_key<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.find_slot(q).is_some()
    }

    /// Upsert: replace and return the value stored under an equal key
    /// (keeping the stored key), or append a new entry.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let hash = self.hasher.hash_one(&key);
        let slots = &mut self.slots;
        match self.index.entry(
            hash,
            |&s| slots[s].key == key,
            |&s| slots[s].hash,
        ) {
            IndexEntry::Occupied(o) => {
                let s = *o.get();
                Some(core::mem::replace(&mut slots[s].value, value))
            }
            IndexEntry::Vacant(v) => {
                let s = slots.insert(Entry { key, value, hash });
                if let Err(e) = self.order.try_append(s) {
                    warn!("HashedTable::insert dropped an entry: {e}");
                    slots.remove(s);
                    return None;
                }
                v.insert(s);
                None
            }
        }
    }

    pub fn lookup<Q>(&self, q: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.find_slot(q).map(|s| &self.slots[s].value)
    }

    pub fn lookup_mut<Q>(&mut self, q: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let s = self.find_slot(q)?;
        Some(&mut self.slots[s].value)
    }

    /// Lookup that also yields the key as originally stored.
    pub fn lookup_extended<Q>(&self, q: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.find_slot(q).map(|s| {
            let e = &self.slots[s];
            (&e.key, &e.value)
        })
    }

    fn unlink(&mut self, s: SlotRef) -> Option<(K, V)> {
        let entry = self.slots.remove(s)?;
        drop_from_index(&mut self.index, entry.hash, s);
        self.order.remove(s);
        Some((entry.key, entry.value))
    }

    pub fn remove<Q>(&mut self, q: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let s = self.find_slot(q)?;
        self.unlink(s)
    }

    /// Visit entries in insertion order.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&K, &V),
    {
        for s in self.order.iter() {
            let e = &self.slots[s];
            f(&e.key, &e.value);
        }
    }

    /// Visit entries in insertion order, removing those `remove` selects.
    /// The order array is compacted during the same pass. Returns how many
    /// were removed.
    pub fn for_each_remove<F>(&mut self, mut remove: F) -> usize
    where
        F: FnMut(&K, &V) -> bool,
    {
        let before = self.order.len();
        let (slots, index) = (&mut self.slots, &mut self.index);
        self.order.retain(|s| {
            let e = &slots[s];
            if !remove(&e.key, &e.value) {
                return true;
            }
            if let Some(entry) = slots.remove(s) {
                drop_from_index(index, entry.hash, s);
            }
            false
        });
        before - self.order.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.order.iter().map(move |s| {
            let e = &self.slots[s];
            (&e.key, &e.value)
        })
    }

    pub fn destroy(self) {
        debug!("destroying hashed table with {} entries", self.len());
        self.order.destroy(false);
    }
}

fn drop_from_index(index: &mut HashTable<SlotRef>, hash: u64, s: SlotRef) {
    if let Ok(found) = index.find_entry(hash, |&kk| kk == s) {
        found.remove();
    }
}
