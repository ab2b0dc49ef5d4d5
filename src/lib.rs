//! byte-table: a single-owner hash table from byte strings to byte strings.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: an open-addressed table whose storage, probing, and growth are
//!   small enough to reason about one layer at a time.
//! - Layers:
//!   - `hash`: djb2 over the raw key bytes; pure, no table state.
//!   - `probe`: quadratic probe sequence (offsets 1, 3, 5, ... accumulate
//!     to k^2) over a prime-length array, bounded to one lap.
//!   - `slot`: `Empty | Tombstone | Occupied(Entry)`; the tombstone is a
//!     variant tag, not a sentinel address.
//!   - `prime`: primality by trial division and the next-prime search
//!     used for growth.
//!   - `ByteTable`: owns the slot array and the counters, and exposes
//!     insert/get/remove/len.
//!
//! Constraints
//! - Single owner: every mutation takes `&mut self`; lookups hand out
//!   borrows that end before the next mutation. No internal locking.
//! - Physical length is always prime; capacity is `length / 2`.
//! - `occupied + tombstones <= capacity` after every operation, so at
//!   least half of the slots are empty and every probe meets one within
//!   its first `(length + 1) / 2` positions.
//! - Keys are unique among occupied slots: inserting a present key
//!   overwrites its value.
//!
//! Rehashing
//! - Triggered before placing a new key once `occupied + tombstones`
//!   reaches capacity. With at least half of capacity live, the array grows
//!   to the smallest prime `>= 2 * length`; otherwise it is rebuilt at the
//!   same length, which clears the tombstones.
//! - A flat loop moves the existing key/value allocations into the new
//!   array; nothing is copied and no insert is re-entered.
//! - The new array is allocated before the old one is touched, so an
//!   allocation failure leaves the table as it was.
//!
//! Notes and non-goals
//! - No iteration API, no custom hashers, no persistence.
//! - Not `Sync`-aware beyond what `Vec` gives; wrap in a mutex to share.

pub mod byte_table;
mod byte_table_proptest;
pub mod error;
pub mod hash;
mod prime;
mod probe;
mod slot;

// Public surface
pub use byte_table::{destroy, ByteTable, TableStats, DEFAULT_LENGTH};
pub use error::TableError;
