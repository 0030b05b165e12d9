//! RAPPOR (Randomized Aggregatable Privacy-Preserving Ordinal Response)
//! client-side core: encoding parameters and deterministic Bloom-bit
//! derivation, plus the two-stage randomized-response encoder built on them.
//!
//! The crate covers the part of the scheme with hard compatibility
//! contracts:
//!   * [`RapporParams`] parses the canonical two-row `k,h,m,p,q,f` parameter
//!     table and re-emits it under the renamed JSON keys the aggregation
//!     service expects.
//!   * [`bloom_bit_positions`] maps a (cohort, value) pair to its Bloom
//!     filter bit positions via an MD5 digest, bit-exactly reproducible
//!     across implementations.
//!
//! Decoding (the EM-based estimation of aggregate statistics from collected
//! reports) lives on the server side and is not part of this crate.

mod bloom;
mod encoder;
mod error;
mod params;

pub use bloom::{DIGEST_LEN, bloom_bit_positions, bloom_signal, get_bit, set_bit};
pub use encoder::{
    Report, encode, encode_with_rng, instantaneous_response, permanent_response,
};
pub use error::{MalformedInput, RapporError, Result};
pub use params::{
    CompatibleParams, RapporParams, RapporParamsBuilder, RapporParamsBuilderError,
};
