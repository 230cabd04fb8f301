//! Sponsorship record.

use crate::model::validate::IssueList;
use crate::model::{Entity, EntityId, ValidationError};
use std::fmt::{Display, Formatter};

/// A sponsor's money contribution to one competition.
///
/// References are by foreign id only; the repository layer does not
/// enforce that the sponsor or competition exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sponsorship {
    pub id: EntityId,
    pub competition_id: EntityId,
    pub sponsor_id: EntityId,
    pub money_contribution: i64,
}

impl Sponsorship {
    pub fn new(
        id: EntityId,
        competition_id: EntityId,
        sponsor_id: EntityId,
        money_contribution: i64,
    ) -> Self {
        Self {
            id,
            competition_id,
            sponsor_id,
            money_contribution,
        }
    }
}

impl Display for Sponsorship {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "sponsorship #{}: sponsor {} backs competition {} with {}",
            self.id, self.sponsor_id, self.competition_id, self.money_contribution
        )
    }
}

impl Entity for Sponsorship {
    const KIND: &'static str = "sponsorship";

    fn id(&self) -> EntityId {
        self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        let mut issues = IssueList::new();
        issues.require_positive_id(self.id, "id");
        issues.require_positive_id(self.competition_id, "competition_id");
        issues.require_positive_id(self.sponsor_id, "sponsor_id");
        issues.require(
            self.money_contribution > 0,
            "money_contribution",
            format!(
                "money_contribution must be strictly positive, but it is {}",
                self.money_contribution
            ),
        );
        issues.into_result(Self::KIND, self.id)
    }
}
