//! Athlete record.

use crate::model::validate::IssueList;
use crate::model::{Entity, EntityId, ValidationError};
use std::fmt::{Display, Formatter};

/// An athlete registered in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Athlete {
    pub id: EntityId,
    pub first_name: String,
    pub last_name: String,
    pub country: String,
    pub age: u32,
}

impl Athlete {
    pub fn new(
        id: EntityId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        country: impl Into<String>,
        age: u32,
    ) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            country: country.into(),
            age,
        }
    }
}

impl Display for Athlete {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "athlete #{}: {} {} ({}), age {}",
            self.id, self.first_name, self.last_name, self.country, self.age
        )
    }
}

impl Entity for Athlete {
    const KIND: &'static str = "athlete";

    fn id(&self) -> EntityId {
        self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        let mut issues = IssueList::new();
        issues.require_positive_id(self.id, "id");
        issues.require_non_empty(&self.first_name, "first_name");
        issues.require_non_empty(&self.last_name, "last_name");
        issues.require_non_empty(&self.country, "country");
        issues.require(
            self.age > 0,
            "age",
            format!("age must be strictly positive, but it is {}", self.age),
        );
        issues.into_result(Self::KIND, self.id)
    }
}
