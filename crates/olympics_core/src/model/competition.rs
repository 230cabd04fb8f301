//! Competition record.

use crate::model::validate::IssueList;
use crate::model::{Entity, EntityId, ValidationError};
use chrono::NaiveDate;
use std::fmt::{Display, Formatter};

/// Date layout used by the flat-file, XML and relational stores.
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// A competition taking place at a known date and location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Competition {
    pub id: EntityId,
    pub date: NaiveDate,
    pub location: String,
    pub name: String,
    pub description: String,
}

impl Competition {
    pub fn new(
        id: EntityId,
        date: NaiveDate,
        location: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            date,
            location: location.into(),
            name: name.into(),
            description: description.into(),
        }
    }

    /// Renders the date in the fixed `dd-mm-YYYY` storage layout.
    pub fn date_string(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }

    /// Parses a date in the fixed `dd-mm-YYYY` storage layout.
    pub fn parse_date(value: &str) -> Result<NaiveDate, chrono::ParseError> {
        NaiveDate::parse_from_str(value, DATE_FORMAT)
    }
}

impl Display for Competition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "competition #{}: {} at {} on {} ({})",
            self.id,
            self.name,
            self.location,
            self.date_string(),
            self.description
        )
    }
}

impl Entity for Competition {
    const KIND: &'static str = "competition";

    fn id(&self) -> EntityId {
        self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        let mut issues = IssueList::new();
        issues.require_positive_id(self.id, "id");
        issues.require_non_empty(&self.location, "location");
        issues.require_non_empty(&self.name, "name");
        issues.require_non_empty(&self.description, "description");
        issues.into_result(Self::KIND, self.id)
    }
}
