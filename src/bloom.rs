//! Deterministic Bloom-bit derivation for RAPPOR reports.
//!
//! The bit positions for a (cohort, value) pair come from a single MD5
//! digest over the 4-byte big-endian cohort followed by the value bytes:
//! digest byte `i` mod `k` is the `i`-th position. One digest byte per hash
//! function keeps the construction cheap while spreading collisions; only
//! uniformity of the low-order remainders matters here, not any
//! cryptographic property of MD5. The layout is a cross-implementation
//! contract and must not change.

use crate::error::{RapporError, Result};
use crate::params::RapporParams;
use md5::{Digest, Md5};

/// Byte length of the MD5 digest backing the derivation, and therefore the
/// maximum supported number of hash functions.
pub const DIGEST_LEN: usize = 16;

/// Derives the ordered `num_hashes` bit positions, each in
/// `[0, num_bloombits)`, for `value` within `cohort`.
///
/// Fails with [`RapporError::TooManyHashes`] when `num_hashes` exceeds
/// [`DIGEST_LEN`]; the check runs before any digest work.
pub fn bloom_bit_positions(
    value: &[u8],
    cohort: u32,
    num_hashes: usize,
    num_bloombits: usize,
) -> Result<Vec<usize>> {
    if num_hashes > DIGEST_LEN {
        return Err(RapporError::TooManyHashes {
            requested: num_hashes,
            digest_len: DIGEST_LEN,
        });
    }
    debug_assert!(num_bloombits > 0, "Bloom filter width must be positive");

    let mut hasher = Md5::new();
    hasher.update(cohort.to_be_bytes());
    hasher.update(value);
    let digest = hasher.finalize();

    Ok(digest[..num_hashes]
        .iter()
        .map(|&byte| byte as usize % num_bloombits)
        .collect())
}

/// Sets bit `n` in a packed bit array, LSB-first within each byte.
pub fn set_bit(bytes: &mut [u8], n: usize) {
    bytes[n / 8] |= 1 << (n % 8);
}

/// Reads bit `n` from a packed bit array; layout matches [`set_bit`].
pub fn get_bit(bytes: &[u8], n: usize) -> bool {
    bytes[n / 8] & (1 << (n % 8)) != 0
}

/// Builds the signal Bloom filter for `value` within `cohort`: a
/// `ceil(k / 8)` byte array with the derived bit positions set.
pub fn bloom_signal(value: &[u8], cohort: u32, params: &RapporParams) -> Result<Vec<u8>> {
    let positions =
        bloom_bit_positions(value, cohort, params.num_hashes, params.num_bloombits)?;

    let mut bloom = vec![0u8; params.num_bloombits.div_ceil(8)];
    for pos in positions {
        set_bit(&mut bloom, pos);
    }
    Ok(bloom)
}
