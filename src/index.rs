//! Bucket index function.
//!
//! Keys are dispersed by a fixed multiplicative hash: the key is multiplied
//! by [`MULTIPLIER`] with 64-bit wraparound and the product is reduced
//! modulo the table capacity. Capacity is always a power of two, so the
//! reduction keeps the low bits of the wrapped product, which is the same
//! slot a Euclidean remainder would give for negative products.

/// Multiplier applied to every key before reduction.
pub const MULTIPLIER: i64 = 23_424_234;

/// Maps `key` to a slot in `[0, capacity)`.
///
/// `capacity` must be a non-zero power of two.
#[inline]
pub fn bucket_index(key: i64, capacity: usize) -> usize {
    debug_assert!(capacity.is_power_of_two(), "capacity must be a power of two");
    let product = key.wrapping_mul(MULTIPLIER) as u64;
    (product & (capacity as u64 - 1)) as usize
}
