//! Generic CRUD service plus the catalog's named filters.
//!
//! # Responsibility
//! - Wrap exactly one repository implementation per entity type, chosen
//!   at startup by configuration.
//! - Evaluate filters as linear predicates over `find_all`; no indexing.
//!
//! # Invariants
//! - Service APIs never bypass the repository validation/persistence
//!   contract.
//! - The service layer remains storage-agnostic.

use crate::model::{
    Athlete, Competition, Entity, EntityId, Participation, Sponsor, Sponsorship,
};
use crate::repo::{RepoResult, Repository};

/// CRUD service wrapper around one boxed repository backend.
pub struct EntityService<T: Entity> {
    repo: Box<dyn Repository<T>>,
}

pub type AthleteService = EntityService<Athlete>;
pub type CompetitionService = EntityService<Competition>;
pub type ParticipationService = EntityService<Participation>;
pub type SponsorService = EntityService<Sponsor>;
pub type SponsorshipService = EntityService<Sponsorship>;

impl<T: Entity> EntityService<T> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: Box<dyn Repository<T>>) -> Self {
        Self { repo }
    }

    pub fn add(&mut self, entity: &T) -> RepoResult<()> {
        self.repo.save(entity)
    }

    pub fn get(&self, id: EntityId) -> RepoResult<Option<T>> {
        self.repo.find_by_id(id)
    }

    pub fn get_all(&self) -> RepoResult<Vec<T>> {
        self.repo.find_all()
    }

    pub fn update(&mut self, entity: &T) -> RepoResult<()> {
        self.repo.update(entity)
    }

    pub fn remove(&mut self, id: EntityId) -> RepoResult<()> {
        self.repo.delete(id)
    }

    /// Returns the records matching the predicate, evaluated linearly
    /// over `find_all`.
    pub fn filter(&self, predicate: impl Fn(&T) -> bool) -> RepoResult<Vec<T>> {
        Ok(self
            .repo
            .find_all()?
            .into_iter()
            .filter(|record| predicate(record))
            .collect())
    }
}

impl EntityService<Athlete> {
    pub fn filter_by_country(&self, country: &str) -> RepoResult<Vec<Athlete>> {
        self.filter(|athlete| athlete.country == country)
    }

    pub fn filter_by_first_name(&self, first_name: &str) -> RepoResult<Vec<Athlete>> {
        self.filter(|athlete| athlete.first_name == first_name)
    }
}

impl EntityService<Competition> {
    pub fn filter_by_location(&self, location: &str) -> RepoResult<Vec<Competition>> {
        self.filter(|competition| competition.location == location)
    }
}

impl EntityService<Participation> {
    pub fn filter_by_rank(&self, rank: u32) -> RepoResult<Vec<Participation>> {
        self.filter(|participation| participation.rank == rank)
    }

    pub fn filter_by_competition(&self, competition_id: EntityId) -> RepoResult<Vec<Participation>> {
        self.filter(|participation| participation.competition_id == competition_id)
    }
}

impl EntityService<Sponsor> {
    pub fn filter_by_country(&self, country: &str) -> RepoResult<Vec<Sponsor>> {
        self.filter(|sponsor| sponsor.country == country)
    }
}

impl EntityService<Sponsorship> {
    pub fn filter_by_sponsor(&self, sponsor_id: EntityId) -> RepoResult<Vec<Sponsorship>> {
        self.filter(|sponsorship| sponsorship.sponsor_id == sponsor_id)
    }

    pub fn filter_by_min_contribution(&self, minimum: i64) -> RepoResult<Vec<Sponsorship>> {
        self.filter(|sponsorship| sponsorship.money_contribution >= minimum)
    }
}
