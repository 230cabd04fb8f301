//! Aggregate reports over the catalog.
//!
//! # Responsibility
//! - Compute the four summary reports as pure functions over full
//!   record sets, sorted by the aggregate descending.
//!
//! # Invariants
//! - Entities with no matching rows appear with a zero aggregate.
//! - Rows referencing an id outside the entity set are skipped; the
//!   repository layer enforces no referential integrity.

use crate::model::{Athlete, Competition, Entity, EntityId, Participation, Sponsor, Sponsorship};
use std::collections::HashMap;

/// Total sponsored money per sponsor, largest contribution first.
pub fn sponsor_contributions(
    sponsors: &[Sponsor],
    sponsorships: &[Sponsorship],
) -> Vec<(Sponsor, i64)> {
    let mut totals: HashMap<EntityId, i64> =
        sponsors.iter().map(|sponsor| (sponsor.id, 0)).collect();
    for sponsorship in sponsorships {
        if let Some(total) = totals.get_mut(&sponsorship.sponsor_id) {
            *total += sponsorship.money_contribution;
        }
    }
    ranked(sponsors, &totals)
}

/// Number of sponsorships per competition, most sponsored first.
pub fn competition_sponsorship_counts(
    competitions: &[Competition],
    sponsorships: &[Sponsorship],
) -> Vec<(Competition, i64)> {
    counted(competitions, sponsorships.iter().map(|s| s.competition_id))
}

/// Number of participations per athlete, most active first.
pub fn athlete_participation_counts(
    athletes: &[Athlete],
    participations: &[Participation],
) -> Vec<(Athlete, i64)> {
    counted(athletes, participations.iter().map(|p| p.athlete_id))
}

/// Number of participations per competition, most attended first.
pub fn competition_participation_counts(
    competitions: &[Competition],
    participations: &[Participation],
) -> Vec<(Competition, i64)> {
    counted(competitions, participations.iter().map(|p| p.competition_id))
}

fn counted<T: Entity>(entities: &[T], owner_ids: impl Iterator<Item = EntityId>) -> Vec<(T, i64)> {
    let mut counts: HashMap<EntityId, i64> =
        entities.iter().map(|entity| (entity.id(), 0)).collect();
    for owner_id in owner_ids {
        if let Some(count) = counts.get_mut(&owner_id) {
            *count += 1;
        }
    }
    ranked(entities, &counts)
}

fn ranked<T: Entity>(entities: &[T], totals: &HashMap<EntityId, i64>) -> Vec<(T, i64)> {
    let mut rows: Vec<(T, i64)> = entities
        .iter()
        .map(|entity| {
            (
                entity.clone(),
                totals.get(&entity.id()).copied().unwrap_or(0),
            )
        })
        .collect();
    // Ties break by id so report output stays deterministic.
    rows.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.id().cmp(&b.0.id())));
    rows
}
