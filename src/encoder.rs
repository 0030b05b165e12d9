//! Two-stage randomized response over the signal Bloom filter.
//!
//! The pipeline follows the RAPPOR scheme: the deterministic signal is
//! first passed through the permanent randomized response (probability f),
//! whose output the client is expected to memoize per reported value, then
//! through the instantaneous randomized response (probabilities p and q)
//! freshly for every report. The RNG is injected so callers control both
//! reproducibility and PRR memoization; a caller that wants a stable
//! permanent response seeds the RNG from a per-client secret.

use crate::bloom::{bloom_signal, get_bit, set_bit};
use crate::error::Result;
use crate::params::RapporParams;
use rand::Rng;
use tracing::debug;

/// A single encoded report: the noisy Bloom filter bytes for one cohort.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Report {
    pub cohort: u32,
    pub bytes: Vec<u8>,
}

/// Permanent randomized response: each of the first `num_bits` bits is,
/// with probability `prob_f`, replaced by a fair coin (so flips to 1 with
/// probability f/2 and to 0 with probability f/2), and kept otherwise.
pub fn permanent_response<R: Rng>(
    signal: &[u8],
    num_bits: usize,
    prob_f: f64,
    rng: &mut R,
) -> Vec<u8> {
    let mut out = vec![0u8; signal.len()];
    for bit in 0..num_bits {
        let value = if rng.random_bool(prob_f) {
            rng.random_bool(0.5)
        } else {
            get_bit(signal, bit)
        };
        if value {
            set_bit(&mut out, bit);
        }
    }
    out
}

/// Instantaneous randomized response: a report bit is 1 with probability
/// `prob_q` where the permanent response has a 1, and with probability
/// `prob_p` where it has a 0.
pub fn instantaneous_response<R: Rng>(
    prr: &[u8],
    num_bits: usize,
    prob_p: f64,
    prob_q: f64,
    rng: &mut R,
) -> Vec<u8> {
    let mut out = vec![0u8; prr.len()];
    for bit in 0..num_bits {
        let prob = if get_bit(prr, bit) { prob_q } else { prob_p };
        if rng.random_bool(prob) {
            set_bit(&mut out, bit);
        }
    }
    out
}

/// Runs the full encoding pipeline for `value` within `cohort`.
///
/// Fails only via [`crate::RapporError::TooManyHashes`] from the underlying
/// bit derivation.
pub fn encode_with_rng<R: Rng>(
    value: &[u8],
    cohort: u32,
    params: &RapporParams,
    rng: &mut R,
) -> Result<Report> {
    let signal = bloom_signal(value, cohort, params)?;
    let prr = permanent_response(&signal, params.num_bloombits, params.prob_f, rng);
    let bytes =
        instantaneous_response(&prr, params.num_bloombits, params.prob_p, params.prob_q, rng);

    debug!(cohort, num_bits = params.num_bloombits, "encoded rappor report");
    Ok(Report { cohort, bytes })
}

/// [`encode_with_rng`] with a thread-local RNG, for callers that do not
/// memoize the permanent response themselves.
pub fn encode(value: &[u8], cohort: u32, params: &RapporParams) -> Result<Report> {
    encode_with_rng(value, cohort, params, &mut rand::rng())
}
