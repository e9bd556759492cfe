//! SlotStore: fixed slot array over an entry arena.
//!
//! Entries live in a `SlotMap`; each slot owns the chain of arena keys that
//! hang off it, head first. The head is the slot's direct occupant. This
//! layer knows nothing about hashing or probing.

use crate::error::{IndexError, Result};
use slotmap::{DefaultKey, SlotMap};
use std::collections::VecDeque;

/// Stable reference to an inserted token.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Handle(DefaultKey);

impl Handle {
    pub(crate) fn new(k: DefaultKey) -> Self {
        Handle(k)
    }
    pub(crate) fn raw_handle(&self) -> DefaultKey {
        self.0
    }

    pub fn token<'a>(&self, store: &'a SlotStore) -> Option<&'a str> {
        store.entry(*self).map(|e| e.token.as_str())
    }

    /// Home slot the token hashed to, which is not necessarily where it sits.
    pub fn home(&self, store: &SlotStore) -> Option<usize> {
        store.entry(*self).map(|e| e.home)
    }
}

#[derive(Debug)]
pub(crate) struct Entry {
    token: String,
    home: usize,
}

impl Entry {
    pub(crate) fn new(token: &str, home: usize) -> Result<Self> {
        let mut owned = String::new();
        owned
            .try_reserve_exact(token.len())
            .map_err(IndexError::allocation(token.len()))?;
        owned.push_str(token);
        Ok(Self { token: owned, home })
    }
}

type Chain = VecDeque<DefaultKey>;

pub struct SlotStore {
    entries: SlotMap<DefaultKey, Entry>,
    slots: Box<[Chain]>,
}

impl SlotStore {
    pub fn with_slots(slots: usize) -> Self {
        Self {
            entries: SlotMap::with_key(),
            slots: (0..slots).map(|_| Chain::new()).collect(),
        }
    }

    /// Number of slots, fixed at construction.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn is_occupied(&self, slot: usize) -> bool {
        !self.slots[slot].is_empty()
    }

    /// Direct occupant of `slot`, i.e. the head of its chain.
    pub fn occupant(&self, slot: usize) -> Option<&str> {
        self.slots[slot]
            .front()
            .and_then(|&k| self.entries.get(k))
            .map(|e| e.token.as_str())
    }

    pub(crate) fn occupant_handle(&self, slot: usize) -> Option<Handle> {
        self.slots[slot].front().map(|&k| Handle::new(k))
    }

    /// Position of `token` in `slot`'s chain (0 is the occupant).
    pub(crate) fn position_in_chain(&self, slot: usize, token: &str) -> Option<(usize, Handle)> {
        self.slots[slot].iter().enumerate().find_map(|(i, &k)| {
            self.entries
                .get(k)
                .filter(|e| e.token == token)
                .map(|_| (i, Handle::new(k)))
        })
    }

    /// Make `entry` the occupant of an empty slot.
    pub(crate) fn place(&mut self, slot: usize, entry: Entry) -> Result<Handle> {
        debug_assert!(!self.is_occupied(slot), "place into occupied slot {slot}");
        self.prepend(slot, entry)
    }

    /// Push `entry` in front of `slot`'s chain; the old head becomes its
    /// successor. Only the chain is reserved fallibly; the arena insert
    /// aborts on exhaustion.
    pub(crate) fn prepend(&mut self, slot: usize, entry: Entry) -> Result<Handle> {
        let chain = &mut self.slots[slot];
        chain
            .try_reserve(1)
            .map_err(IndexError::allocation(core::mem::size_of::<DefaultKey>()))?;
        let k = self.entries.insert(entry);
        chain.push_front(k);
        Ok(Handle::new(k))
    }

    pub(crate) fn entry(&self, h: Handle) -> Option<&Entry> {
        self.entries.get(h.raw_handle())
    }

    /// View of a single slot, empty or not.
    pub fn slot(&self, slot: usize) -> SlotView<'_> {
        SlotView {
            store: self,
            index: slot,
        }
    }

    /// Non-empty slots in index order.
    pub fn occupied(&self) -> Occupied<'_> {
        Occupied {
            store: self,
            next: 0,
        }
    }

    /// Entries reachable by walking every chain. Equals `len()` unless the
    /// structure is corrupt.
    pub fn reachable(&self) -> usize {
        self.slots
            .iter()
            .map(|c| c.iter().filter(|&&k| self.entries.contains_key(k)).count())
            .sum()
    }
}

/// Read-only view of one slot.
#[derive(Copy, Clone)]
pub struct SlotView<'a> {
    store: &'a SlotStore,
    index: usize,
}

impl<'a> SlotView<'a> {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn occupant(&self) -> Option<&'a str> {
        self.store.occupant(self.index)
    }

    pub fn len(&self) -> usize {
        self.store.slots[self.index].len()
    }
    pub fn is_empty(&self) -> bool {
        self.store.slots[self.index].is_empty()
    }

    /// Tokens in link order, occupant first.
    pub fn tokens(&self) -> Tokens<'a> {
        let store = self.store;
        Tokens {
            it: store.slots[self.index].iter(),
            entries: &store.entries,
        }
    }

    /// `(token, home)` pairs in link order.
    pub fn entries(&self) -> impl Iterator<Item = (&'a str, usize)> + 'a {
        let store = self.store;
        let entries = &store.entries;
        store.slots[self.index]
            .iter()
            .filter_map(move |&k| entries.get(k))
            .map(|e| (e.token.as_str(), e.home))
    }
}

/// Iterator over the tokens of one chain.
pub struct Tokens<'a> {
    it: std::collections::vec_deque::Iter<'a, DefaultKey>,
    entries: &'a SlotMap<DefaultKey, Entry>,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a str;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        for &k in self.it.by_ref() {
            if let Some(e) = self.entries.get(k) {
                return Some(e.token.as_str());
            }
        }
        None
    }
}

/// Iterator over non-empty slots.
pub struct Occupied<'a> {
    store: &'a SlotStore,
    next: usize,
}

impl<'a> Iterator for Occupied<'a> {
    type Item = SlotView<'a>;
    fn next(&mut self) -> Option<Self::Item> {
        while self.next < self.store.capacity() {
            let i = self.next;
            self.next += 1;
            if self.store.is_occupied(i) {
                return Some(self.store.slot(i));
            }
        }
        None
    }
}
