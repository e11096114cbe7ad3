use std::fmt;

/// Classification of what went wrong, mirrors the outcomes enumerated in
/// the error handling design: format/version problems, disposed datasets,
/// I/O failures, and pool exhaustion are the only ways a call propagates
/// a failure instead of a degraded-but-valid result.
#[derive(Debug)]
pub enum ErrorKind {
    /// Magic/version mismatch, truncated region, or a violated data model invariant.
    DatasetFormat,
    /// The dataset (or a reader obtained from it) was used after `Dataset::dispose`.
    DatasetDisposed,
    /// The underlying source failed to read.
    DataFileIO,
    /// A reader pool configured with a hard capacity had none free to lend.
    PoolExhausted,
}

#[derive(Debug)]
pub struct Error {
    pub kind: ErrorKind,
    pub context: String,
}

impl Error {
    pub fn new(kind: ErrorKind, context: impl Into<String>) -> Self {
        Error { kind, context: context.into() }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.context)
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error { kind: ErrorKind::DataFileIO, context: err.to_string() }
    }
}

impl From<tempfile::PathPersistError> for Error {
    fn from(err: tempfile::PathPersistError) -> Self {
        Error { kind: ErrorKind::DataFileIO, context: err.to_string() }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
