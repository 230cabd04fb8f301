//! Sponsor record.

use crate::model::validate::IssueList;
use crate::model::{Entity, EntityId, ValidationError};
use std::fmt::{Display, Formatter};

/// A company or organisation sponsoring competitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sponsor {
    pub id: EntityId,
    pub name: String,
    pub country: String,
}

impl Sponsor {
    pub fn new(id: EntityId, name: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            country: country.into(),
        }
    }
}

impl Display for Sponsor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "sponsor #{}: {} ({})", self.id, self.name, self.country)
    }
}

impl Entity for Sponsor {
    const KIND: &'static str = "sponsor";

    fn id(&self) -> EntityId {
        self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        let mut issues = IssueList::new();
        issues.require_positive_id(self.id, "id");
        issues.require_non_empty(&self.name, "name");
        issues.require_non_empty(&self.country, "country");
        issues.into_result(Self::KIND, self.id)
    }
}
