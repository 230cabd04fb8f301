//! Olympic-games domain model.
//!
//! # Responsibility
//! - Define the canonical records managed by the catalog.
//! - Expose one shared identity and validation contract for all of them.
//!
//! # Invariants
//! - Every record carries a caller-assigned, strictly positive `EntityId`.
//! - Relationships between records are expressed by foreign ids only.

pub mod athlete;
pub mod competition;
pub mod participation;
pub mod sponsor;
pub mod sponsorship;
pub mod validate;

pub use athlete::Athlete;
pub use competition::Competition;
pub use participation::Participation;
pub use sponsor::Sponsor;
pub use sponsorship::Sponsorship;
pub use validate::{FieldIssue, ValidationError};

/// Stable identifier for every catalog record.
///
/// Ids are assigned by the caller, never generated, and immutable after
/// creation. Kept as a type alias to make semantic intent explicit in
/// signatures.
pub type EntityId = i64;

/// Contract shared by all catalog records.
pub trait Entity: Clone {
    /// Lowercase kind label used in storage naming, errors and log events.
    const KIND: &'static str;

    /// Returns the caller-assigned stable id.
    fn id(&self) -> EntityId;

    /// Checks every domain rule and reports all failed fields at once.
    fn validate(&self) -> Result<(), ValidationError>;
}
