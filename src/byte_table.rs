//! ByteTable: open-addressed storage of owned byte-string pairs.

use crate::error::TableError;
use crate::prime::{grown_length, next_prime_at_least};
use crate::probe::Probe;
use crate::slot::{copy_bytes, empty_slots, Entry, Slot};
use log::{debug, trace, warn};

/// Slot count of a table built with [`ByteTable::new`].
pub const DEFAULT_LENGTH: usize = 13;

/// Point-in-time view of the table's bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableStats {
    /// Physical slot count; always prime.
    pub length: usize,
    /// Ceiling on occupied plus tombstoned slots before a rehash, `length / 2`.
    pub capacity: usize,
    /// Slots holding a live entry.
    pub occupied: usize,
    /// Slots vacated by `remove` and not yet reused or purged.
    pub tombstones: usize,
}

/// Hash table from byte strings to byte strings.
///
/// Keys and values are copied in on insert and owned by the table until
/// they are removed, overwritten, or the table is dropped.
#[derive(Debug, Clone)]
pub struct ByteTable {
    slots: Vec<Slot>,
    capacity: usize,
    occupied: usize,
    tombstones: usize,
}

impl ByteTable {
    /// Empty table of [`DEFAULT_LENGTH`] slots.
    pub fn new() -> Result<Self, TableError> {
        Self::with_initial_length(DEFAULT_LENGTH)
    }

    /// Empty table whose slot count is the smallest prime `>= length`.
    pub fn with_initial_length(length: usize) -> Result<Self, TableError> {
        if length < 2 {
            return Err(TableError::InvalidArgument(
                "initial length must be at least 2",
            ));
        }
        let length = next_prime_at_least(length).ok_or(TableError::OutOfMemory)?;
        let slots = empty_slots(length)?;
        trace!("created table: length={} capacity={}", length, length / 2);
        Ok(Self {
            slots,
            capacity: length / 2,
            occupied: 0,
            tombstones: 0,
        })
    }

    pub fn len(&self) -> usize {
        self.occupied
    }

    /// Number of stored entries; same as [`ByteTable::len`].
    pub fn size(&self) -> usize {
        self.occupied
    }

    pub fn is_empty(&self) -> bool {
        self.occupied == 0
    }

    pub fn stats(&self) -> TableStats {
        TableStats {
            length: self.slots.len(),
            capacity: self.capacity,
            occupied: self.occupied,
            tombstones: self.tombstones,
        }
    }

    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.position(key).is_some()
    }

    /// Borrow the value stored under `key`.
    ///
    /// The view lives only as long as the shared borrow of the table, so it
    /// cannot outlast the next insert or remove.
    pub fn get(&self, key: &[u8]) -> Option<&[u8]> {
        let i = self.position(key)?;
        match &self.slots[i] {
            Slot::Occupied(entry) => Some(&entry.value[..]),
            _ => None,
        }
    }

    /// Store a copy of `key` and `value`.
    ///
    /// If `key` is already present its value is replaced in place and the
    /// previous value is returned; the entry count does not change and no
    /// rehash happens. A new key may first trigger a rehash when occupied
    /// plus tombstoned slots have reached capacity.
    ///
    /// On error the table is unchanged.
    pub fn insert(&mut self, key: &[u8], value: &[u8]) -> Result<Option<Box<[u8]>>, TableError> {
        if let Some(i) = self.position(key) {
            let fresh = copy_bytes(value)?;
            if let Slot::Occupied(entry) = &mut self.slots[i] {
                return Ok(Some(std::mem::replace(&mut entry.value, fresh)));
            }
        }

        let entry = Entry::copy_from(key, value)?;
        if self.occupied + self.tombstones >= self.capacity {
            self.rehash()?;
        }

        let i = vacancy(&self.slots, key).ok_or_else(|| self.exhausted())?;
        if matches!(self.slots[i], Slot::Tombstone) {
            self.tombstones -= 1;
        }
        self.slots[i] = Slot::Occupied(entry);
        self.occupied += 1;
        Ok(None)
    }

    /// Drop the entry stored under `key`, leaving a tombstone in its slot.
    /// Storage never shrinks.
    pub fn remove(&mut self, key: &[u8]) -> Result<(), TableError> {
        let i = self.position(key).ok_or(TableError::NotFound)?;
        let entry = self.slots[i].bury().ok_or(TableError::NotFound)?;
        drop(entry);
        self.occupied -= 1;
        self.tombstones += 1;
        Ok(())
    }

    /// Index of the occupied slot holding `key`.
    ///
    /// Tombstones and other keys are walked past; the first empty slot ends
    /// the search.
    fn position(&self, key: &[u8]) -> Option<usize> {
        for i in Probe::new(key, self.slots.len()) {
            match &self.slots[i] {
                Slot::Empty => return None,
                Slot::Occupied(entry) if entry.matches(key) => return Some(i),
                _ => {}
            }
        }
        None
    }

    /// Move every live entry into a fresh slot array, dropping tombstones.
    ///
    /// Grows to the next prime at least twice the length when at least half
    /// of the capacity is live; otherwise the churn is tombstones and the
    /// length is kept. The new array is allocated before anything moves, so
    /// an allocation failure leaves the table untouched.
    fn rehash(&mut self) -> Result<(), TableError> {
        let old_length = self.slots.len();
        let new_length = if self.occupied >= self.capacity / 2 {
            grown_length(old_length).ok_or(TableError::OutOfMemory)?
        } else {
            old_length
        };
        // Live entries must fit in the distinct half of the new probe
        // sequence for placement to succeed.
        if self.occupied >= (new_length + 1) / 2 {
            return Err(self.exhausted());
        }

        let fresh = empty_slots(new_length)?;
        let old = std::mem::replace(&mut self.slots, fresh);
        let dropped = self.tombstones;
        self.capacity = new_length / 2;
        self.occupied = 0;
        self.tombstones = 0;

        for slot in old {
            if let Slot::Occupied(entry) = slot {
                let i = vacancy(&self.slots, &entry.key).ok_or_else(|| self.exhausted())?;
                self.slots[i] = Slot::Occupied(entry);
                self.occupied += 1;
            }
        }

        debug!(
            "rehashed table: length {} -> {}, moved {} entries, dropped {} tombstones",
            old_length, new_length, self.occupied, dropped
        );
        Ok(())
    }

    fn exhausted(&self) -> TableError {
        let length = self.slots.len();
        warn!(
            "probe sequence exhausted: length={} occupied={} tombstones={}",
            length, self.occupied, self.tombstones
        );
        TableError::ProbeExhausted { length }
    }
}

/// First slot on `key`'s probe where a new entry may go: the earliest
/// tombstone passed, else the empty slot that ends the probe.
fn vacancy(slots: &[Slot], key: &[u8]) -> Option<usize> {
    let mut tombstone = None;
    for i in Probe::new(key, slots.len()) {
        match &slots[i] {
            Slot::Empty => return Some(tombstone.unwrap_or(i)),
            Slot::Tombstone => {
                tombstone.get_or_insert(i);
            }
            Slot::Occupied(_) => {}
        }
    }
    tombstone
}

/// Release `table` and every entry it owns, returning how many entries
/// were released.
///
/// Dropping a `ByteTable` releases the same memory; this entry point exists
/// for callers holding an optional table, where an absent table is reported
/// as `InvalidArgument` and nothing else happens.
pub fn destroy(table: Option<ByteTable>) -> Result<usize, TableError> {
    match table {
        Some(table) => {
            let released = table.len();
            drop(table);
            trace!("destroyed table with {} entries", released);
            Ok(released)
        }
        None => {
            warn!("destroy called without a table");
            Err(TableError::InvalidArgument("no table to destroy"))
        }
    }
}
