//! Core domain logic for the Olympics catalog.
//! This crate is the single source of truth for business invariants.

pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{
    AppConfig, BackendKind, ConfigError, ConfigResult, DatabaseConfig, LoggingConfig, StoreConfig,
};
pub use logging::{init_logging, logging_status};
pub use model::{
    Athlete, Competition, Entity, EntityId, Participation, Sponsor, Sponsorship, ValidationError,
};
pub use repo::file::FlatFileRepository;
pub use repo::memory::InMemoryRepository;
pub use repo::sql::SqliteRepository;
pub use repo::xml::XmlRepository;
pub use repo::{RepoError, RepoResult, Repository};
pub use service::entity_service::{
    AthleteService, CompetitionService, EntityService, ParticipationService, SponsorService,
    SponsorshipService,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
