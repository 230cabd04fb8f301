//! Field-level validation reporting.
//!
//! # Responsibility
//! - Collect every failed domain rule of a record into one error.
//!
//! # Invariants
//! - A `ValidationError` always names the entity kind, the offending id
//!   and at least one field issue.

use crate::model::EntityId;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One failed domain rule, tied to the field that broke it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: &'static str,
    pub message: String,
}

/// Validation failure for a single record, carrying all failed fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub entity: &'static str,
    pub id: EntityId,
    pub issues: Vec<FieldIssue>,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} #{}:", self.entity, self.id)?;
        for issue in &self.issues {
            write!(f, " {} ({});", issue.message, issue.field)?;
        }
        Ok(())
    }
}

impl Error for ValidationError {}

/// Accumulator used by the entity `validate` implementations.
#[derive(Debug, Default)]
pub(crate) struct IssueList {
    issues: Vec<FieldIssue>,
}

impl IssueList {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Records an issue when `ok` does not hold.
    pub(crate) fn require(&mut self, ok: bool, field: &'static str, message: impl Into<String>) {
        if !ok {
            self.issues.push(FieldIssue {
                field,
                message: message.into(),
            });
        }
    }

    pub(crate) fn require_positive_id(&mut self, value: EntityId, field: &'static str) {
        self.require(
            value > 0,
            field,
            format!("{field} must be strictly positive, but it is {value}"),
        );
    }

    pub(crate) fn require_non_empty(&mut self, value: &str, field: &'static str) {
        self.require(!value.is_empty(), field, format!("{field} must be non-empty"));
    }

    pub(crate) fn into_result(
        self,
        entity: &'static str,
        id: EntityId,
    ) -> Result<(), ValidationError> {
        if self.issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                entity,
                id,
                issues: self.issues,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::IssueList;

    #[test]
    fn empty_list_resolves_ok() {
        assert!(IssueList::new().into_result("athlete", 1).is_ok());
    }

    #[test]
    fn error_message_names_every_failed_field() {
        let mut issues = IssueList::new();
        issues.require_positive_id(0, "id");
        issues.require_non_empty("", "country");
        let error = issues.into_result("athlete", 0).unwrap_err();
        assert_eq!(error.issues.len(), 2);
        let rendered = error.to_string();
        assert!(rendered.contains("id"));
        assert!(rendered.contains("country"));
    }
}
