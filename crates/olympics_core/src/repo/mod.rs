//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define one CRUD contract shared by all storage backends.
//! - Isolate serialization and query details from service orchestration.
//!
//! # Invariants
//! - Repository writes must enforce `Entity::validate()` before touching
//!   the backing store.
//! - `save` rejects an already-present id with `DuplicateId`; `update`
//!   and `delete` reject an absent id with `UnknownId`. The policy is
//!   identical across all four backends.
//! - Read paths reject invalid persisted state instead of masking it.

pub mod file;
pub mod memory;
pub mod sql;
pub mod xml;

use crate::model::{Entity, EntityId, ValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::PathBuf;

pub type RepoResult<T> = Result<T, RepoError>;

/// Error taxonomy shared by every storage backend.
#[derive(Debug)]
pub enum RepoError {
    /// A domain rule failed; the store was not touched.
    Validation(ValidationError),
    /// `save` targeted an id that is already present.
    DuplicateId { entity: &'static str, id: EntityId },
    /// `update` or `delete` targeted an id that was never saved.
    UnknownId { entity: &'static str, id: EntityId },
    /// A flat-file line could not be parsed back into a record.
    Format {
        path: PathBuf,
        line: usize,
        message: String,
    },
    /// An XML document could not be parsed back into records.
    Xml {
        path: PathBuf,
        position: u64,
        message: String,
    },
    /// Driver-level failure in the relational backend.
    Sqlite(rusqlite::Error),
    /// Filesystem failure in the flat-file or XML backend.
    Io { path: PathBuf, source: io::Error },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicateId { entity, id } => {
                write!(f, "a {entity} with id {id} already exists")
            }
            Self::UnknownId { entity, id } => {
                write!(f, "there is no {entity} with id {id}")
            }
            Self::Format {
                path,
                line,
                message,
            } => write!(
                f,
                "malformed record in `{}` at line {line}: {message}",
                path.display()
            ),
            Self::Xml {
                path,
                position,
                message,
            } => write!(
                f,
                "malformed XML in `{}` near byte {position}: {message}",
                path.display()
            ),
            Self::Sqlite(err) => write!(f, "database failure: {err}"),
            Self::Io { path, source } => {
                write!(f, "I/O failure on `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Sqlite(err) => Some(err),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Uniform CRUD contract implemented by the four storage backends.
///
/// The active backend is selected once at startup from configuration,
/// never at the call site.
pub trait Repository<T: Entity> {
    /// Returns the stored record, or `None` when the id is absent.
    fn find_by_id(&self, id: EntityId) -> RepoResult<Option<T>>;

    /// Returns every stored record. Order is backend-defined: insertion
    /// order for the memory, flat-file and XML backends, id order for
    /// the relational backend.
    fn find_all(&self) -> RepoResult<Vec<T>>;

    /// Inserts a new record. Fails with `DuplicateId` when the id is
    /// already present.
    fn save(&mut self, entity: &T) -> RepoResult<()>;

    /// Replaces the stored record with the same id. Fails with
    /// `UnknownId` when no such record exists.
    fn update(&mut self, entity: &T) -> RepoResult<()>;

    /// Removes the record with the given id. Fails with `UnknownId`
    /// when no such record exists.
    fn delete(&mut self, id: EntityId) -> RepoResult<()>;
}

// Shared scalar parsing for the textual stores. Error messages are
// plain fragments; the calling backend attaches file and position.

pub(crate) fn parse_id_field(value: &str) -> Result<EntityId, String> {
    value
        .trim()
        .parse::<EntityId>()
        .map_err(|_| format!("`{value}` is not a whole-number id"))
}

pub(crate) fn parse_u32_field(value: &str, field: &str) -> Result<u32, String> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("`{value}` is not a valid {field}"))
}

pub(crate) fn parse_i64_field(value: &str, field: &str) -> Result<i64, String> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| format!("`{value}` is not a valid {field}"))
}

pub(crate) fn parse_date_field(value: &str) -> Result<chrono::NaiveDate, String> {
    crate::model::competition::Competition::parse_date(value.trim())
        .map_err(|_| format!("`{value}` is not a date in dd-mm-YYYY layout"))
}
