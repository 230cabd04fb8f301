//! In-memory storage backend.
//!
//! # Responsibility
//! - Hold records in a process-local id map with no persistence.
//!
//! # Invariants
//! - `find_all` preserves insertion order.
//! - Lookups stay O(1) average; only `find_all` is O(n).

use crate::model::{Entity, EntityId};
use crate::repo::{RepoError, RepoResult, Repository};
use std::collections::HashMap;

/// Map-backed repository; contents vanish when the process exits.
#[derive(Debug, Default)]
pub struct InMemoryRepository<T: Entity> {
    entities: HashMap<EntityId, T>,
    // Insertion log; keeps `find_all` deterministic where a bare map
    // would not be.
    order: Vec<EntityId>,
}

impl<T: Entity> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            entities: HashMap::new(),
            order: Vec::new(),
        }
    }
}

impl<T: Entity> Repository<T> for InMemoryRepository<T> {
    fn find_by_id(&self, id: EntityId) -> RepoResult<Option<T>> {
        Ok(self.entities.get(&id).cloned())
    }

    fn find_all(&self) -> RepoResult<Vec<T>> {
        Ok(self
            .order
            .iter()
            .filter_map(|id| self.entities.get(id).cloned())
            .collect())
    }

    fn save(&mut self, entity: &T) -> RepoResult<()> {
        entity.validate()?;
        if self.entities.contains_key(&entity.id()) {
            return Err(RepoError::DuplicateId {
                entity: T::KIND,
                id: entity.id(),
            });
        }
        self.entities.insert(entity.id(), entity.clone());
        self.order.push(entity.id());
        Ok(())
    }

    fn update(&mut self, entity: &T) -> RepoResult<()> {
        entity.validate()?;
        match self.entities.get_mut(&entity.id()) {
            Some(stored) => {
                *stored = entity.clone();
                Ok(())
            }
            None => Err(RepoError::UnknownId {
                entity: T::KIND,
                id: entity.id(),
            }),
        }
    }

    fn delete(&mut self, id: EntityId) -> RepoResult<()> {
        match self.entities.remove(&id) {
            Some(_) => {
                self.order.retain(|stored| *stored != id);
                Ok(())
            }
            None => Err(RepoError::UnknownId {
                entity: T::KIND,
                id,
            }),
        }
    }
}
