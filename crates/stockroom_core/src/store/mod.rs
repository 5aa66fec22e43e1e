//! Snapshot persistence for repositories.
//!
//! # Responsibility
//! - Encode a repository's ordered content as a JSON array of records.
//! - Save snapshots atomically and load them back into fresh repositories.
//!
//! # Invariants
//! - `decode(encode(x)) == x` field-for-field and in order.
//! - A missing store file means "no prior data", never an error.
//! - A crash mid-save leaves either the old snapshot or the new one, never a
//!   partially written file at the store path.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod codec;
mod file;
pub mod record;
mod snapshot;

pub use codec::{decode, encode, CodecOptions};
pub use file::{load_from_store, save_to_store};
pub use record::{FieldError, FieldMap, FieldReader, FieldWriter, Record};
pub use snapshot::SnapshotStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence failure kinds.
#[derive(Debug)]
pub enum StoreError {
    /// Bytes could not be parsed into a list of records.
    MalformedData(String),
    /// A record is missing a required field or holds the wrong type/value.
    FieldMismatch {
        /// Position of the record inside the snapshot.
        index: usize,
        field: String,
        expected: &'static str,
        found: String,
    },
    /// Reading or writing the store file failed.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedData(reason) => write!(f, "malformed snapshot data: {reason}"),
            Self::FieldMismatch {
                index,
                field,
                expected,
                found,
            } => write!(
                f,
                "record {index}: field `{field}` expected {expected}, found {found}"
            ),
            Self::Io { path, source } => {
                write!(f, "snapshot I/O failed for `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::MalformedData(_) | Self::FieldMismatch { .. } => None,
        }
    }
}
