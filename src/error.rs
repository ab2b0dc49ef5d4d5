//! Error kinds reported by `ByteTable` operations.

use std::collections::TryReserveError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// Slot storage or a key/value copy could not be allocated. The table is
    /// left exactly as it was before the failing call.
    #[error("out of memory")]
    OutOfMemory,
    /// A required input was absent or unusable.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    /// The key is not stored in the table.
    #[error("key not found")]
    NotFound,
    /// Every probe position was visited without finding a vacancy. Cannot
    /// happen while the load bookkeeping holds.
    #[error("probe sequence exhausted in table of length {length}")]
    ProbeExhausted { length: usize },
}

impl From<TryReserveError> for TableError {
    fn from(_: TryReserveError) -> Self {
        TableError::OutOfMemory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Invariant: A failed reservation surfaces as `OutOfMemory`.
    #[test]
    fn try_reserve_failure_maps_to_out_of_memory() {
        let mut v: Vec<u8> = Vec::new();
        let err = v.try_reserve_exact(usize::MAX).unwrap_err();
        assert_eq!(TableError::from(err), TableError::OutOfMemory);
    }

    #[test]
    fn display_messages() {
        assert_eq!(TableError::NotFound.to_string(), "key not found");
        assert_eq!(
            TableError::InvalidArgument("length").to_string(),
            "invalid argument: length"
        );
        assert_eq!(
            TableError::ProbeExhausted { length: 13 }.to_string(),
            "probe sequence exhausted in table of length 13"
        );
    }
}
