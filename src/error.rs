//! Errors surfaced by the fallible sizing paths of `LongHashMap`.

use std::collections::TryReserveError;
use thiserror::Error;

/// Growth of the bucket array could not be satisfied.
///
/// Lookups and removals never fail; a missing key is `None`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LongMapError {
    #[error("long map capacity overflow")]
    CapacityOverflow,
    #[error("failed to allocate {requested} buckets")]
    AllocFailed {
        requested: usize,
        #[source]
        source: TryReserveError,
    },
}
