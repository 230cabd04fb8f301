//! Application configuration and store bootstrap.
//!
//! # Responsibility
//! - Load the TOML configuration once at startup into an explicit
//!   struct handed to constructors; no ambient global lookup.
//! - Open the configured backend for each entity type.
//!
//! # Invariants
//! - Missing required keys and unknown backend names are reported
//!   before any store is opened.
//! - Backend selection happens here only, never at a call site.

use crate::model::Entity;
use crate::repo::file::{FlatFileRecord, FlatFileRepository};
use crate::repo::memory::InMemoryRepository;
use crate::repo::sql::{SqlRecord, SqliteRepository};
use crate::repo::xml::{XmlRecord, XmlRepository};
use crate::repo::{RepoError, Repository};
use log::info;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Storage backend selector, one per entity section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Memory,
    File,
    Xml,
    Sqlite,
}

/// Per-entity store settings: which backend, and where it lives.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    pub backend: BackendKind,
    /// Store file path; required for the file and xml backends.
    pub path: Option<PathBuf>,
}

/// Shared SQLite database location, required when any entity uses the
/// sqlite backend.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

/// Optional file-logging settings.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    pub directory: PathBuf,
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Whole application configuration, constructed once at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub logging: Option<LoggingConfig>,
    pub database: Option<DatabaseConfig>,
    pub athletes: StoreConfig,
    pub competitions: StoreConfig,
    pub participations: StoreConfig,
    pub sponsors: StoreConfig,
    pub sponsorships: StoreConfig,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: io::Error },
    Parse { path: PathBuf, source: toml::de::Error },
    /// A file or xml section lacks its `path` key.
    MissingPath { section: &'static str },
    /// A section selects sqlite but no `[database]` block exists.
    MissingDatabase { section: &'static str },
    /// Opening a configured store failed.
    Store(RepoError),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "cannot read config `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "cannot parse config `{}`: {source}", path.display())
            }
            Self::MissingPath { section } => write!(
                f,
                "section `{section}` selects a file-backed store but has no `path` key"
            ),
            Self::MissingDatabase { section } => write!(
                f,
                "section `{section}` selects the sqlite backend but no [database] block is configured"
            ),
            Self::Store(err) => write!(f, "cannot open store: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ConfigError {
    fn from(value: RepoError) -> Self {
        Self::Store(value)
    }
}

impl AppConfig {
    /// Reads and checks the configuration file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.check_completeness()?;
        info!(
            "event=config_load module=config status=ok path={}",
            path.display()
        );
        Ok(config)
    }

    /// Rejects sections whose backend needs a key that is absent.
    fn check_completeness(&self) -> ConfigResult<()> {
        for (section, store) in self.sections() {
            match store.backend {
                BackendKind::File | BackendKind::Xml if store.path.is_none() => {
                    return Err(ConfigError::MissingPath { section });
                }
                BackendKind::Sqlite if self.database.is_none() => {
                    return Err(ConfigError::MissingDatabase { section });
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn sections(&self) -> [(&'static str, &StoreConfig); 5] {
        [
            ("athletes", &self.athletes),
            ("competitions", &self.competitions),
            ("participations", &self.participations),
            ("sponsors", &self.sponsors),
            ("sponsorships", &self.sponsorships),
        ]
    }
}

impl StoreConfig {
    /// Opens the backend this section selects.
    ///
    /// `section` names the config section in error messages; `database`
    /// is the shared SQLite location, when configured.
    pub fn open_repository<T>(
        &self,
        section: &'static str,
        database: Option<&DatabaseConfig>,
    ) -> ConfigResult<Box<dyn Repository<T>>>
    where
        T: Entity + FlatFileRecord + XmlRecord + SqlRecord + 'static,
    {
        match self.backend {
            BackendKind::Memory => Ok(Box::new(InMemoryRepository::<T>::new())),
            BackendKind::File => {
                let path = self
                    .path
                    .as_ref()
                    .ok_or(ConfigError::MissingPath { section })?;
                Ok(Box::new(FlatFileRepository::<T>::new(path)))
            }
            BackendKind::Xml => {
                let path = self
                    .path
                    .as_ref()
                    .ok_or(ConfigError::MissingPath { section })?;
                Ok(Box::new(XmlRepository::<T>::new(path)))
            }
            BackendKind::Sqlite => {
                let database =
                    database.ok_or(ConfigError::MissingDatabase { section })?;
                Ok(Box::new(SqliteRepository::<T>::open(&database.path)?))
            }
        }
    }
}
