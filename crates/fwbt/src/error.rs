use std::io;

use thiserror::Error;

/// Every way a table operation can fail.
#[derive(Debug, Error)]
pub enum Error {
    /// The first four bytes are not `FWBT`.
    #[error("signature is missing or malformed")]
    NoSignature,
    #[error("unsupported format version {0}")]
    UnsupportedVersion(u8),
    /// Key width is zero, or a key buffer does not match the table's key width.
    #[error("invalid key width")]
    InvalidKeyWidth,
    /// Value width is zero, or a value buffer does not match the table's value width.
    #[error("invalid value width")]
    InvalidValueWidth,
    /// Entry count equals the reserved full-table sentinel.
    #[error("invalid entry count")]
    InvalidEntryCount,
    #[error("body is {actual} bytes, expected {expected}")]
    InvalidBodySize { expected: u64, actual: u64 },
    #[error("data is {0} bytes, shorter than the header")]
    TooShort(usize),
    /// An empty buffer was given where key or value bytes were expected.
    #[error("empty buffer where key or value bytes were expected")]
    NullInput,
    #[error("memory allocation failed")]
    AllocationFailure,
    #[error("a value with the same key already exists")]
    DuplicateKey,
    #[error("no value with the given key could be found")]
    KeyNotFound,
    #[error("index {index} is out of range for {len} entries")]
    OutOfRange { index: usize, len: usize },
    #[error("table is full")]
    TableFull,
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// A refused [`Table::set`](crate::Table::set) call.
///
/// Ownership of the key and value only passes to the table when the call
/// succeeds, so a refused call hands both buffers back.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct Rejected {
    #[source]
    pub error: Error,
    pub key: Vec<u8>,
    pub value: Vec<u8>,
}

impl Rejected {
    pub(crate) fn new(error: Error, key: Vec<u8>, value: Vec<u8>) -> Self {
        Self { error, key, value }
    }

    /// Drops the returned buffers and keeps only the cause.
    pub fn into_error(self) -> Error {
        self.error
    }
}

impl From<Rejected> for Error {
    fn from(r: Rejected) -> Self {
        r.error
    }
}
