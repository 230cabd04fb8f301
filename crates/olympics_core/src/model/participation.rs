//! Participation record.

use crate::model::validate::IssueList;
use crate::model::{Entity, EntityId, ValidationError};
use std::fmt::{Display, Formatter};

/// An athlete's result in one competition.
///
/// References are by foreign id only; the repository layer does not
/// enforce that the athlete or competition exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participation {
    pub id: EntityId,
    pub athlete_id: EntityId,
    pub competition_id: EntityId,
    pub rank: u32,
}

impl Participation {
    pub fn new(id: EntityId, athlete_id: EntityId, competition_id: EntityId, rank: u32) -> Self {
        Self {
            id,
            athlete_id,
            competition_id,
            rank,
        }
    }
}

impl Display for Participation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "participation #{}: athlete {} in competition {}, rank {}",
            self.id, self.athlete_id, self.competition_id, self.rank
        )
    }
}

impl Entity for Participation {
    const KIND: &'static str = "participation";

    fn id(&self) -> EntityId {
        self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        let mut issues = IssueList::new();
        issues.require_positive_id(self.id, "id");
        issues.require_positive_id(self.athlete_id, "athlete_id");
        issues.require_positive_id(self.competition_id, "competition_id");
        issues.require(
            self.rank > 0,
            "rank",
            format!("rank must be strictly positive, but it is {}", self.rank),
        );
        issues.into_result(Self::KIND, self.id)
    }
}
