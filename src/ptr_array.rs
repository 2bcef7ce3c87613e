//! PtrArray: contiguous, non-owning array of opaque handles.
//!
//! Storage grows by exactly one slot per append and is compacted on
//! removal. Elements are compared by identity (`PartialEq` on the handle,
//! never on the payload it names) and are never dropped as payloads:
//! destroying the array releases the slot block only.

use crate::error::{Result, RuntimeError};
use core::cmp::Ordering;
use log::{debug, warn};

#[derive(Debug, Clone)]
pub struct PtrArray<H> {
    slots: Vec<H>,
}

impl<H> PtrArray<H>
where
    H: Copy + PartialEq,
{
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of slots currently backed by storage. Always `>= len()`.
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Store `handle` at the new last position.
    ///
    /// If growing the backing block fails the array is left untouched and
    /// the handle is dropped on the floor; use [`PtrArray::try_append`] to
    /// observe the failure.
    pub fn append(&mut self, handle: H) {
        if let Err(e) = self.try_append(handle) {
            warn!("PtrArray::append discarded a handle: {e}");
        }
    }

    /// Like [`PtrArray::append`], but reports a failed reallocation.
    pub fn try_append(&mut self, handle: H) -> Result<()> {
        self.slots
            .try_reserve_exact(1)
            .map_err(|e| RuntimeError::alloc("growing pointer array", e))?;
        self.slots.push(handle);
        Ok(())
    }

    /// Remove the first slot holding `handle`, shifting later slots left.
    /// Returns whether a slot was found.
    pub fn remove(&mut self, handle: H) -> bool {
        match self.position(handle) {
            Some(i) => {
                self.slots.remove(i);
                true
            }
            None => false,
        }
    }

    /// Remove and return the slot at `index`, preserving the order of the rest.
    pub fn remove_index(&mut self, index: usize) -> Option<H> {
        (index < self.slots.len()).then(|| self.slots.remove(index))
    }

    pub fn position(&self, handle: H) -> Option<usize> {
        self.slots.iter().position(|&h| h == handle)
    }

    pub fn contains(&self, handle: H) -> bool {
        self.position(handle).is_some()
    }

    pub fn get(&self, index: usize) -> Option<H> {
        self.slots.get(index).copied()
    }

    pub fn as_slice(&self) -> &[H] {
        &self.slots
    }

    pub fn iter(&self) -> impl Iterator<Item = H> + '_ {
        self.slots.iter().copied()
    }

    /// Keep only the handles `keep` accepts, compacting in one pass.
    /// Survivors keep their relative order; `keep` sees each handle once,
    /// in index order.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(H) -> bool,
    {
        self.slots.retain(|&h| keep(h));
    }

    /// Visit every handle in index order.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(H),
    {
        for &h in &self.slots {
            f(h);
        }
    }

    /// Order the array with `compare` using adjacent-swap passes.
    ///
    /// Quadratic and only meant for the short arrays a catalog produces.
    /// Equal elements may end up in any relative order.
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&H, &H) -> Ordering,
    {
        let n = self.slots.len();
        if n <= 1 {
            return;
        }
        for pass in 0..n - 1 {
            let mut swapped = false;
            for j in 0..n - pass - 1 {
                if compare(&self.slots[j], &self.slots[j + 1]) == Ordering::Greater {
                    self.slots.swap(j, j + 1);
                    swapped = true;
                }
            }
            if !swapped {
                break;
            }
        }
    }

    /// Release the slot block. `free_elements` is accepted for callers
    /// written against the pointer-array convention but never causes
    /// payloads to be released; those belong to whoever issued the handles.
    pub fn destroy(self, free_elements: bool) {
        debug!(
            "destroying pointer array of {} handles (free_elements={free_elements} ignored)",
            self.slots.len()
        );
    }
}

impl<H> Default for PtrArray<H>
where
    H: Copy + PartialEq,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<H> FromIterator<H> for PtrArray<H>
where
    H: Copy + PartialEq,
{
    fn from_iter<I: IntoIterator<Item = H>>(iter: I) -> Self {
        let mut a = PtrArray::new();
        for h in iter {
            a.append(h);
        }
        a
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::Arena;

    #[test]
    fn append_remove_keeps_order() {
        let mut arena: Arena<&str> = Arena::new();
        let (a, b, c) = (arena.alloc("A"), arena.alloc("B"), arena.alloc("C"));

        let mut arr = PtrArray::new();
        arr.append(a);
        arr.append(b);
        arr.append(c);
        assert!(arr.remove(b));

        let mut seen = Vec::new();
        arr.for_each(|h| seen.push(*h.get(&arena).unwrap()));
        assert_eq!(seen, ["A", "C"]);
    }

    #[test]
    fn remove_matches_identity_not_value() {
        let mut arena: Arena<i32> = Arena::new();
        let first = arena.alloc(7);
        let twin = arena.alloc(7);

        let mut arr: PtrArray<_> = [first, twin].into_iter().collect();
        assert!(arr.remove(twin));
        assert_eq!(arr.as_slice(), &[first]);
        assert!(!arr.remove(twin), "second removal finds nothing");
    }

    #[test]
    fn remove_only_first_duplicate() {
        let mut arr: PtrArray<u8> = [1, 2, 1, 3].into_iter().collect();
        assert!(arr.remove(1));
        assert_eq!(arr.as_slice(), &[2, 1, 3]);
    }

    #[test]
    fn append_grows_one_slot_at_a_time() {
        let mut arr: PtrArray<usize> = PtrArray::new();
        for i in 0..8 {
            arr.try_append(i).unwrap();
            assert!(arr.capacity() >= arr.len());
        }
        assert_eq!(arr.len(), 8);
        assert_eq!(arr.get(7), Some(7));
        assert_eq!(arr.get(8), None);
    }

    #[test]
    fn sort_orders_by_comparator() {
        let mut arr: PtrArray<i32> = [5, 3, 9, 1, 3].into_iter().collect();
        arr.sort_by(|a, b| a.cmp(b));
        assert_eq!(arr.as_slice(), &[1, 3, 3, 5, 9]);
        arr.sort_by(|a, b| b.cmp(a));
        assert_eq!(arr.as_slice(), &[9, 5, 3, 3, 1]);
    }

    #[test]
    fn sort_trivial_sizes() {
        let mut empty: PtrArray<i32> = PtrArray::new();
        empty.sort_by(|a, b| a.cmp(b));
        assert!(empty.is_empty());

        let mut one: PtrArray<i32> = [4].into_iter().collect();
        one.sort_by(|_, _| panic!("comparator must not run for one element"));
        assert_eq!(one.as_slice(), &[4]);
    }

    #[test]
    fn destroy_leaves_payloads_alive() {
        let mut arena: Arena<String> = Arena::new();
        let h = arena.alloc("row".to_string());
        let mut arr = PtrArray::new();
        arr.append(h);
        arr.destroy(true);
        assert_eq!(h.get(&arena).map(String::as_str), Some("row"));
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn retain_compacts_in_order() {
        let mut arr: PtrArray<u32> = (0..10).collect();
        let mut seen = Vec::new();
        arr.retain(|h| {
            seen.push(h);
            h % 3 != 0
        });
        assert_eq!(seen, (0..10).collect::<Vec<_>>());
        assert_eq!(arr.as_slice(), &[1, 2, 4, 5, 7, 8]);
    }

    #[test]
    fn remove_index_bounds() {
        let mut arr: PtrArray<char> = ['x', 'y'].into_iter().collect();
        assert_eq!(arr.remove_index(5), None);
        assert_eq!(arr.remove_index(0), Some('x'));
        assert_eq!(arr.as_slice(), &['y']);
    }
}
