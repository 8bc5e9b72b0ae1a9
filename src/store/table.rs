//! Open-addressing table behind [`Dictionary`](super::Dictionary) and
//! [`Lookup`](super::Lookup).
//!
//! Entries live in a dense `Vec` in insertion order; the slot array only holds
//! indices into it, so key enumeration order never depends on bucket layout.
//! A key's home slot is `bucket_hash & (capacity - 1)`. On a slot holding a
//! different key the configured [`ProbeStrategy`](crate::ProbeStrategy)
//! derives the next candidate, until an empty slot or an equal key turns up.
//! Entries are never removed, so no tombstones are needed.

use crate::comparer::EqualityComparer;
use crate::config::StoreOptions;
use tracing::trace;

const MIN_CAPACITY: usize = 8;

pub(crate) struct Entry<K, V> {
    pub(crate) hash: u64,
    pub(crate) key: K,
    pub(crate) value: V,
}

enum Probe {
    Found(usize),
    Vacant(usize),
    Full,
}

pub(crate) struct ProbeTable<K, V> {
    slots: Vec<Option<usize>>,
    entries: Vec<Entry<K, V>>,
    options: StoreOptions,
}

impl<K, V> ProbeTable<K, V> {
    pub(crate) fn new(options: StoreOptions) -> Self {
        let capacity = options
            .initial_capacity
            .max(MIN_CAPACITY)
            .next_power_of_two();
        Self {
            slots: vec![None; capacity],
            entries: Vec::new(),
            options,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn options(&self) -> StoreOptions {
        self.options
    }

    pub(crate) fn entries(&self) -> &[Entry<K, V>] {
        &self.entries
    }

    pub(crate) fn entry(&self, index: usize) -> &Entry<K, V> {
        &self.entries[index]
    }

    pub(crate) fn value_mut(&mut self, index: usize) -> &mut V {
        &mut self.entries[index].value
    }

    pub(crate) fn into_entries(self) -> Vec<Entry<K, V>> {
        self.entries
    }

    /// Index of the entry whose key equals `key`.
    pub(crate) fn find<C>(&self, comparer: &C, key: &K) -> Option<usize>
    where
        C: EqualityComparer<K> + ?Sized,
    {
        let hash = comparer.hash_code(key).bucket_hash();
        match self.probe(comparer, hash, key) {
            Probe::Found(index) => Some(index),
            Probe::Vacant(_) | Probe::Full => None,
        }
    }

    /// Insert a new entry, or hand the key and value back together with the
    /// index of the entry that already holds an equal key.
    pub(crate) fn insert<C>(&mut self, comparer: &C, key: K, value: V) -> Result<usize, (usize, K, V)>
    where
        C: EqualityComparer<K> + ?Sized,
    {
        let hash = comparer.insertion_hash_code(&key).bucket_hash();
        if self.over_load(self.entries.len() + 1) {
            self.grow();
        }
        loop {
            match self.probe(comparer, hash, &key) {
                Probe::Found(index) => return Err((index, key, value)),
                Probe::Vacant(slot) => {
                    let index = self.entries.len();
                    self.entries.push(Entry { hash, key, value });
                    self.slots[slot] = Some(index);
                    return Ok(index);
                }
                Probe::Full => self.grow(),
            }
        }
    }

    /// Same slot layout, every value mapped through `f`.
    pub(crate) fn map_values<W>(self, mut f: impl FnMut(V) -> W) -> ProbeTable<K, W> {
        ProbeTable {
            slots: self.slots,
            entries: self
                .entries
                .into_iter()
                .map(|e| Entry {
                    hash: e.hash,
                    key: e.key,
                    value: f(e.value),
                })
                .collect(),
            options: self.options,
        }
    }

    fn probe<C>(&self, comparer: &C, hash: u64, key: &K) -> Probe
    where
        C: EqualityComparer<K> + ?Sized,
    {
        let mask = self.slots.len() - 1;
        #[allow(clippy::cast_possible_truncation)]
        let mut slot = hash as usize & mask;
        for attempt in 1..=self.slots.len() {
            match self.slots[slot] {
                None => {
                    if attempt > 1 {
                        trace!(attempts = attempt, "probe passed colliding keys");
                    }
                    return Probe::Vacant(slot);
                }
                Some(index) => {
                    let entry = &self.entries[index];
                    if entry.hash == hash && comparer.equals(&entry.key, key) {
                        return Probe::Found(index);
                    }
                }
            }
            slot = self.options.probe.next_slot(slot, attempt, mask);
        }
        Probe::Full
    }

    #[allow(clippy::cast_precision_loss)]
    fn over_load(&self, occupied: usize) -> bool {
        occupied as f64 > self.slots.len() as f64 * self.options.max_load_factor
    }

    fn grow(&mut self) {
        let capacity = self.slots.len() * 2;
        trace!(
            from = self.slots.len(),
            to = capacity,
            entries = self.entries.len(),
            "growing keyed table"
        );
        self.slots = vec![None; capacity];
        for index in 0..self.entries.len() {
            let hash = self.entries[index].hash;
            self.place(hash, index);
        }
    }

    /// Re-home an existing entry; only used while rebuilding the slot array,
    /// where keys are already known to be unique.
    fn place(&mut self, hash: u64, index: usize) {
        let mask = self.slots.len() - 1;
        #[allow(clippy::cast_possible_truncation)]
        let mut slot = hash as usize & mask;
        for attempt in 1..=self.slots.len() {
            if self.slots[slot].is_none() {
                self.slots[slot] = Some(index);
                return;
            }
            slot = self.options.probe.next_slot(slot, attempt, mask);
        }
    }
}
