use thiserror::Error;

pub type Result<T> = std::result::Result<T, RapporError>;

#[derive(Error, Debug)]
pub enum RapporError {
    #[error("malformed parameter table: {0}")]
    MalformedInput(#[from] MalformedInput),

    #[error(
        "requested {requested} hash functions, but the digest only provides {digest_len} bytes"
    )]
    TooManyHashes { requested: usize, digest_len: usize },

    #[error("failed to read parameter table: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Ways the two-row parameter table can fail to parse. Carried inside
/// [`RapporError::MalformedInput`] so callers can branch on the coarse kind
/// and still report the exact mismatch.
#[derive(Error, Debug)]
pub enum MalformedInput {
    #[error("header row {received:?} is malformed; expected k,h,m,p,q,f")]
    Header { received: String },

    #[error("value row {row:?} is malformed: {cause}")]
    ValueRow { row: String, cause: String },

    #[error("parameter table must have exactly two rows")]
    ExtraRows,

    #[error("expected second row with parameter values")]
    MissingParameterRow,
}
