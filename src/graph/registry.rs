//! Dense entity storage with identifier recycling
//!
//! Records live in a `Vec<Option<T>>` indexed by id. A removed record leaves an
//! empty slot and its id goes onto a free set; the next insertion takes the
//! smallest free id before issuing a fresh one.

use std::collections::BTreeSet;
use std::marker::PhantomData;
use tracing::warn;

#[derive(Debug, Clone)]
pub(crate) struct Registry<I, T> {
    slots: Vec<Option<T>>,

    /// Ids of empty slots below `next_id`
    free_ids: BTreeSet<u64>,

    next_id: u64,

    live: usize,

    _id: PhantomData<I>,
}

impl<I, T> Registry<I, T>
where
    I: Copy + From<u64> + Into<u64>,
{
    /// Reserve `capacity` slots; if the allocation fails the registry starts
    /// empty and grows on demand
    pub fn with_capacity(capacity: usize) -> Self {
        let mut slots: Vec<Option<T>> = Vec::new();
        if slots.try_reserve_exact(capacity).is_err() {
            warn!("Could not reserve {} registry slots, growing on demand", capacity);
        }
        Registry {
            slots,
            free_ids: BTreeSet::new(),
            next_id: 0,
            live: 0,
            _id: PhantomData,
        }
    }

    /// Allocate an id and store the record built for it
    pub fn insert_with(&mut self, build: impl FnOnce(I) -> T) -> I {
        let raw = match self.free_ids.pop_first() {
            Some(id) => id,
            None => {
                let id = self.next_id;
                self.next_id += 1;
                id
            }
        };
        let idx = raw as usize;
        if idx >= self.slots.len() {
            self.slots.resize_with(idx + 1, || None);
        }
        let id = I::from(raw);
        debug_assert!(self.slots[idx].is_none(), "slot {} issued while occupied", raw);
        self.slots[idx] = Some(build(id));
        self.live += 1;
        id
    }

    pub fn get(&self, id: I) -> Option<&T> {
        let idx: u64 = id.into();
        self.slots.get(idx as usize).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: I) -> Option<&mut T> {
        let idx: u64 = id.into();
        self.slots.get_mut(idx as usize).and_then(Option::as_mut)
    }

    pub fn contains(&self, id: I) -> bool {
        self.get(id).is_some()
    }

    /// Take the record out and recycle its id
    pub fn remove(&mut self, id: I) -> Option<T> {
        let raw: u64 = id.into();
        let record = self.slots.get_mut(raw as usize)?.take()?;
        self.free_ids.insert(raw);
        self.live -= 1;
        Some(record)
    }

    /// Number of live records
    pub fn len(&self) -> usize {
        self.live
    }

    /// Live records in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.slots.iter().filter_map(Option::as_ref)
    }

    /// Live ids in ascending order
    pub fn ids(&self) -> impl Iterator<Item = I> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(idx, _)| I::from(idx as u64))
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_ids.clear();
        self.next_id = 0;
        self.live = 0;
    }
}
