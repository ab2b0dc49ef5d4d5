//! Slot states of the open-addressed array.

use crate::error::TableError;

/// An owned key/value pair. Both halves are immutable once stored; an
/// overwrite swaps in a fresh value allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Entry {
    pub(crate) key: Box<[u8]>,
    pub(crate) value: Box<[u8]>,
}

impl Entry {
    /// Copy `key` and `value` into table-owned storage. Either both copies
    /// succeed or nothing is allocated.
    pub(crate) fn copy_from(key: &[u8], value: &[u8]) -> Result<Self, TableError> {
        Ok(Entry {
            key: copy_bytes(key)?,
            value: copy_bytes(value)?,
        })
    }

    #[inline]
    pub(crate) fn matches(&self, key: &[u8]) -> bool {
        // Slice equality compares lengths before bytes.
        *self.key == *key
    }
}

/// Fallible copy of a byte slice into a boxed slice.
pub(crate) fn copy_bytes(bytes: &[u8]) -> Result<Box<[u8]>, TableError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(bytes.len())?;
    buf.extend_from_slice(bytes);
    Ok(buf.into_boxed_slice())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) enum Slot {
    /// Never used since the array was allocated. Ends every probe.
    #[default]
    Empty,
    /// Previously occupied. Probes pass through it; inserts may reuse it.
    Tombstone,
    Occupied(Entry),
}

impl Slot {
    /// Take the entry out, leaving a tombstone behind.
    pub(crate) fn bury(&mut self) -> Option<Entry> {
        match std::mem::replace(self, Slot::Tombstone) {
            Slot::Occupied(entry) => Some(entry),
            other => {
                *self = other;
                None
            }
        }
    }
}

/// Allocate `length` empty slots, or fail without allocating anything.
pub(crate) fn empty_slots(length: usize) -> Result<Vec<Slot>, TableError> {
    let mut slots = Vec::new();
    slots.try_reserve_exact(length)?;
    slots.resize_with(length, Slot::default);
    Ok(slots)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Invariant: Stored bytes are a copy, independent of the caller's buffer.
    #[test]
    fn entry_copies_bytes() {
        let mut key = b"MSI".to_vec();
        let entry = Entry::copy_from(&key, b"Microsoft").unwrap();
        key[0] = b'X';
        assert_eq!(&*entry.key, b"MSI");
        assert_eq!(&*entry.value, b"Microsoft");
    }

    #[test]
    fn matches_is_exact() {
        let entry = Entry::copy_from(b"power", b"Of One").unwrap();
        assert!(entry.matches(b"power"));
        assert!(!entry.matches(b"powe"));
        assert!(!entry.matches(b"power\0"));
        assert!(!entry.matches(b"Power"));
    }

    /// Invariant: Burying an occupied slot yields its entry and leaves a
    /// tombstone; burying anything else changes nothing.
    #[test]
    fn bury_only_affects_occupied() {
        let entry = Entry::copy_from(b"k", b"v").unwrap();
        let mut slot = Slot::Occupied(entry.clone());
        assert_eq!(slot.bury(), Some(entry));
        assert_eq!(slot, Slot::Tombstone);

        assert_eq!(slot.bury(), None);
        assert_eq!(slot, Slot::Tombstone);

        let mut empty = Slot::Empty;
        assert_eq!(empty.bury(), None);
        assert_eq!(empty, Slot::Empty);
    }

    #[test]
    fn empty_slots_are_all_empty() {
        let slots = empty_slots(13).unwrap();
        assert_eq!(slots.len(), 13);
        assert!(slots.iter().all(|s| *s == Slot::Empty));
    }

    #[test]
    fn oversized_slot_array_is_out_of_memory() {
        assert_eq!(empty_slots(usize::MAX).unwrap_err(), TableError::OutOfMemory);
    }
}
